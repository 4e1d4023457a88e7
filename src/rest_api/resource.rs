//! # Entity Resources
//!
//! Generic CRUD and criteria routes, instantiated once per criteria type.
//!
//! | Method | Path                | Action                          |
//! |--------|---------------------|---------------------------------|
//! | GET    | /{collection}       | criteria list, paged            |
//! | GET    | /{collection}/count | criteria count                  |
//! | GET    | /{collection}/:id   | lookup                          |
//! | POST   | /{collection}       | create, 201 + Location          |
//! | PUT    | /{collection}/:id   | full update                     |
//! | PATCH  | /{collection}/:id   | merge update                    |
//! | DELETE | /{collection}/:id   | delete, 204                     |

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::Value as JsonValue;

use super::errors::{RestError, RestResult};
use super::params::{parse_page_request, FromQueryParams};
use super::response::{alert_headers, pagination_headers};
use super::API_PREFIX;
use crate::config::PaginationConfig;
use crate::criteria::{AlbumCriteria, PhotoCriteria, TagCriteria};
use crate::domain::Entity;
use crate::observability::MetricsRegistry;
use crate::search::InMemorySearchIndex;
use crate::service::{EntityService, QueryService, ServiceError};
use crate::storage::{InMemoryStore, Stored};

/// A criteria type exposed as a REST collection
pub trait Resource: FromQueryParams {
    /// Columns accepted by the `sort` parameter
    const SORTABLE: &'static [&'static str];
}

impl Resource for PhotoCriteria {
    const SORTABLE: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "imageContentType",
        "height",
        "width",
        "taken",
        "uploaded",
        "albumId",
    ];
}

impl Resource for AlbumCriteria {
    const SORTABLE: &'static [&'static str] = &["id", "title", "description", "created", "userId"];
}

impl Resource for TagCriteria {
    const SORTABLE: &'static [&'static str] = &["id", "name"];
}

/// Services behind one collection
pub struct ResourceState<C>
where
    C: Resource,
    C::Entity: Stored,
{
    pub queries: QueryService<C, InMemoryStore>,
    pub entities: EntityService<C::Entity, InMemoryStore, InMemorySearchIndex>,
    pub pagination: PaginationConfig,
    metrics: Arc<MetricsRegistry>,
}

impl<C> ResourceState<C>
where
    C: Resource,
    C::Entity: Stored,
{
    pub fn new(
        store: Arc<InMemoryStore>,
        search: Arc<InMemorySearchIndex>,
        metrics: Arc<MetricsRegistry>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            queries: QueryService::new(Arc::clone(&store), Arc::clone(&metrics)),
            entities: EntityService::new(store, search, Arc::clone(&metrics)),
            pagination,
            metrics,
        }
    }

    /// Counts a request refused before it reached a service
    fn rejected(&self, err: RestError) -> RestError {
        self.metrics.increment_requests_rejected();
        err
    }

    fn criteria(&self, params: &[(String, String)]) -> RestResult<C> {
        C::from_params(params).map_err(|e| self.rejected(e))
    }

    fn body(&self, body: JsonValue) -> RestResult<C::Entity> {
        serde_json::from_value(body)
            .map_err(|e| self.rejected(RestError::InvalidBody(e.to_string())))
    }
}

type Shared<C> = Arc<ResourceState<C>>;

/// Build the routes for one collection
pub fn resource_routes<C>(state: Shared<C>) -> Router
where
    C: Resource,
    C::Entity: Stored,
{
    let collection = C::Entity::KIND.collection();

    Router::new()
        .route(
            &format!("/{}", collection),
            get(list_handler::<C>).post(create_handler::<C>),
        )
        .route(&format!("/{}/count", collection), get(count_handler::<C>))
        .route(
            &format!("/{}/:id", collection),
            get(get_handler::<C>)
                .put(update_handler::<C>)
                .patch(patch_handler::<C>)
                .delete(delete_handler::<C>),
        )
        .with_state(state)
}

/// List handler: criteria page plus pagination headers
async fn list_handler<C>(
    State(state): State<Shared<C>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> RestResult<(HeaderMap, Json<Vec<C::Entity>>)>
where
    C: Resource,
    C::Entity: Stored,
{
    let criteria = state.criteria(&params)?;
    let request = parse_page_request(&params, &state.pagination, C::SORTABLE)
        .map_err(|e| state.rejected(e))?;

    let page = state.queries.find_page_by_criteria(&criteria, &request)?;
    let headers = pagination_headers(uri.path(), uri.query(), &page);
    Ok((headers, Json(page.content)))
}

/// Count handler
async fn count_handler<C>(
    State(state): State<Shared<C>>,
    Query(params): Query<Vec<(String, String)>>,
) -> RestResult<Json<u64>>
where
    C: Resource,
    C::Entity: Stored,
{
    let criteria = state.criteria(&params)?;
    Ok(Json(state.queries.count_by_criteria(&criteria)?))
}

/// Get single entity handler
async fn get_handler<C>(
    State(state): State<Shared<C>>,
    Path(id): Path<i64>,
) -> RestResult<Json<C::Entity>>
where
    C: Resource,
    C::Entity: Stored,
{
    state
        .entities
        .find_one(id)?
        .map(Json)
        .ok_or_else(|| {
            RestError::Service(ServiceError::NotFound {
                kind: C::Entity::KIND,
                id,
            })
        })
}

/// Create handler
async fn create_handler<C>(
    State(state): State<Shared<C>>,
    Json(body): Json<JsonValue>,
) -> RestResult<(StatusCode, HeaderMap, Json<C::Entity>)>
where
    C: Resource,
    C::Entity: Stored,
{
    let entity = state.entities.save(state.body(body)?)?;
    let id = entity.id().unwrap_or_default();

    let mut headers = alert_headers(C::Entity::KIND, "created", id);
    let location = format!("{}/{}/{}", API_PREFIX, C::Entity::KIND.collection(), id);
    if let Ok(location) = HeaderValue::from_str(&location) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(entity)))
}

/// Full update handler
async fn update_handler<C>(
    State(state): State<Shared<C>>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> RestResult<(HeaderMap, Json<C::Entity>)>
where
    C: Resource,
    C::Entity: Stored,
{
    let entity = state.entities.update(id, state.body(body)?)?;
    Ok((alert_headers(C::Entity::KIND, "updated", id), Json(entity)))
}

/// Merge update handler
async fn patch_handler<C>(
    State(state): State<Shared<C>>,
    Path(id): Path<i64>,
    Json(body): Json<JsonValue>,
) -> RestResult<(HeaderMap, Json<C::Entity>)>
where
    C: Resource,
    C::Entity: Stored,
{
    let entity = state.entities.partial_update(id, body)?;
    Ok((alert_headers(C::Entity::KIND, "updated", id), Json(entity)))
}

/// Delete handler
async fn delete_handler<C>(
    State(state): State<Shared<C>>,
    Path(id): Path<i64>,
) -> RestResult<(StatusCode, HeaderMap)>
where
    C: Resource,
    C::Entity: Stored,
{
    state.entities.delete(id)?;
    Ok((
        StatusCode::NO_CONTENT,
        alert_headers(C::Entity::KIND, "deleted", id),
    ))
}
