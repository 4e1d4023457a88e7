//! # Response Headers
//!
//! Pagination and entity alert headers in the form the gallery web client
//! reads them.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::domain::EntityKind;
use crate::executor::Page;

/// Application name used as the alert header prefix
pub const APPLICATION_NAME: &str = "galleryApp";

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";
pub const ALERT_HEADER: &str = "x-galleryapp-alert";
pub const ALERT_PARAMS_HEADER: &str = "x-galleryapp-params";

/// Builds `X-Total-Count` and `Link` for a page of results.
///
/// Links keep every query parameter of the request except `page` and
/// `size`, which they replace.
pub fn pagination_headers<T>(path: &str, query: Option<&str>, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(page.total_elements),
    );
    if let Ok(link) = HeaderValue::from_str(&link_header(path, query, page)) {
        headers.insert(axum::http::header::LINK, link);
    }
    headers
}

/// Renders the `Link` header with `next`, `prev`, `last` and `first` relations
pub fn link_header<T>(path: &str, query: Option<&str>, page: &Page<T>) -> String {
    let retained: Vec<&str> = query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or("");
            key != "page" && key != "size"
        })
        .collect();

    let uri = |number: u64| {
        let mut uri = format!("{}?", path);
        for pair in &retained {
            uri.push_str(pair);
            uri.push('&');
        }
        format!("{}page={}&size={}", uri, number, page.size)
    };

    let current = u64::from(page.page);
    let last = page.total_pages().saturating_sub(1);

    let mut links = Vec::with_capacity(4);
    if current < last {
        links.push(format!("<{}>; rel=\"next\"", uri(current + 1)));
    }
    if current > 0 {
        links.push(format!("<{}>; rel=\"prev\"", uri(current - 1)));
    }
    links.push(format!("<{}>; rel=\"last\"", uri(last)));
    links.push(format!("<{}>; rel=\"first\"", uri(0)));
    links.join(",")
}

/// Builds the alert headers for a completed write, e.g.
/// `galleryApp.photo.created` with the entity id as parameter
pub fn alert_headers(kind: EntityKind, action: &str, id: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let alert = format!("{}.{}.{}", APPLICATION_NAME, kind.as_str(), action);
    if let Ok(value) = HeaderValue::from_str(&alert) {
        headers.insert(HeaderName::from_static(ALERT_HEADER), value);
    }
    headers.insert(HeaderName::from_static(ALERT_PARAMS_HEADER), HeaderValue::from(id));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::PageRequest;

    fn page(number: u32, size: u32, total: usize) -> Page<u32> {
        Page::from_sorted(vec![0; total], &PageRequest::of(number, size))
    }

    #[test]
    fn test_middle_page_links() {
        let link = link_header("/api/photos", Some("page=1&size=10"), &page(1, 10, 35));
        assert_eq!(
            link,
            "</api/photos?page=2&size=10>; rel=\"next\",\
             </api/photos?page=0&size=10>; rel=\"prev\",\
             </api/photos?page=3&size=10>; rel=\"last\",\
             </api/photos?page=0&size=10>; rel=\"first\""
        );
    }

    #[test]
    fn test_single_page_links() {
        let link = link_header("/api/tags", None, &page(0, 20, 3));
        assert_eq!(
            link,
            "</api/tags?page=0&size=20>; rel=\"last\",</api/tags?page=0&size=20>; rel=\"first\""
        );
    }

    #[test]
    fn test_links_keep_filters() {
        let link = link_header(
            "/api/photos",
            Some("height.equals=10&page=0&tagId.in=7,8"),
            &page(0, 1, 2),
        );
        assert!(link.starts_with("</api/photos?height.equals=10&tagId.in=7,8&page=1&size=1>; rel=\"next\""));
    }

    #[test]
    fn test_empty_result_links() {
        let link = link_header("/api/albums", None, &page(0, 20, 0));
        assert!(link.contains("page=0&size=20>; rel=\"last\""));
        assert!(!link.contains("next"));
    }

    #[test]
    fn test_total_count_header() {
        let headers = pagination_headers("/api/photos", None, &page(0, 2, 5));
        assert_eq!(headers[TOTAL_COUNT_HEADER], "5");
        assert!(headers.contains_key(axum::http::header::LINK));
    }

    #[test]
    fn test_alert_headers() {
        let headers = alert_headers(EntityKind::Photo, "created", 7);
        assert_eq!(headers[ALERT_HEADER], "galleryApp.photo.created");
        assert_eq!(headers[ALERT_PARAMS_HEADER], "7");
    }
}
