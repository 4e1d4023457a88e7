//! # Gallery REST API Module
//!
//! JSON endpoints for albums, photos and tags. List and count endpoints
//! turn `field.operator=value` query parameters into entity criteria.

pub mod errors;
pub mod params;
pub mod resource;
pub mod response;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use params::{parse_page_request, FromQueryParams, RESERVED_PARAMS};
pub use resource::{resource_routes, Resource, ResourceState};
pub use response::{alert_headers, link_header, pagination_headers};

/// Path prefix under which the entity resources are mounted
pub const API_PREFIX: &str = "/api";
