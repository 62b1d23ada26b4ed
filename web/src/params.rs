//! Request parameter flattening

use std::collections::HashMap;

use crate::request::InboundRequest;

/// Flatten a multi-valued parameter map to the first value of each key
///
/// Later values of a repeated key are dropped. Keys without any value are
/// skipped and a missing request gives an empty map.
pub fn request_params<R: InboundRequest + ?Sized>(request: Option<&R>) -> HashMap<String, String> {
    let Some(request) = request else {
        return HashMap::new();
    };

    request
        .parameter_map()
        .into_iter()
        .filter_map(|(key, values)| values.into_iter().next().map(|first| (key, first)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RawRequest;
    use axum::body::Body;
    use axum::http::Request;

    #[test]
    fn test_first_value_wins() {
        let req = RawRequest::new().with_param("q", "1").with_param("q", "2");
        let p = request_params(Some(&req));
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("q").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_missing_request() {
        assert!(request_params::<RawRequest>(None).is_empty());
    }

    #[test]
    fn test_http_query() {
        let req = Request::builder()
            .uri("/list?page=3&sort=name&page=4")
            .body(Body::empty())
            .unwrap();
        let p = request_params(Some(&req));
        assert_eq!(p.get("page").map(String::as_str), Some("3"));
        assert_eq!(p.get("sort").map(String::as_str), Some("name"));
    }
}
