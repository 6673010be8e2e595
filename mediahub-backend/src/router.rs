//! Pure routing: (method, action) -> what the handler should do

use crate::models::{ApiEvent, Listing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight, answered without touching the database
    Preflight,
    List(Listing),
    NotFound,
}

impl Route {
    pub fn from_event(event: &ApiEvent) -> Self {
        route(&event.http_method, event.query_param("action"))
    }
}

pub fn route(method: &str, action: Option<&str>) -> Route {
    if method == "OPTIONS" {
        return Route::Preflight;
    }

    let action = action.unwrap_or(Listing::DEFAULT_ACTION);
    match Listing::from_action(action) {
        Some(listing) if method == "GET" => Route::List(listing),
        _ => Route::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_always_preflight() {
        assert_eq!(route("OPTIONS", None), Route::Preflight);
        assert_eq!(route("OPTIONS", Some("media")), Route::Preflight);
        assert_eq!(route("OPTIONS", Some("nonsense")), Route::Preflight);
    }

    #[test]
    fn test_get_listings() {
        assert_eq!(route("GET", Some("users")), Route::List(Listing::Users));
        assert_eq!(route("GET", Some("media")), Route::List(Listing::Media));
        assert_eq!(route("GET", Some("documents")), Route::List(Listing::Documents));
        assert_eq!(route("GET", Some("messages")), Route::List(Listing::Messages));
    }

    #[test]
    fn test_missing_action_defaults_to_users() {
        assert_eq!(route("GET", None), route("GET", Some("users")));
    }

    #[test]
    fn test_unknown_action_not_found() {
        assert_eq!(route("GET", Some("orders")), Route::NotFound);
        assert_eq!(route("GET", Some("")), Route::NotFound);
        assert_eq!(route("GET", Some("MEDIA")), Route::NotFound);
    }

    #[test]
    fn test_non_get_methods_not_found() {
        for method in ["POST", "PUT", "DELETE", "PATCH", "HEAD", "get"] {
            assert_eq!(route(method, None), Route::NotFound, "{method}");
            for listing in Listing::all() {
                assert_eq!(route(method, Some(listing.as_action())), Route::NotFound, "{method}");
            }
        }
    }

    #[test]
    fn test_from_event() {
        let event = ApiEvent::new("GET").with_query("action", "documents");
        assert_eq!(Route::from_event(&event), Route::List(Listing::Documents));

        let event = ApiEvent::new("DELETE").with_query("action", "documents");
        assert_eq!(Route::from_event(&event), Route::NotFound);
    }
}
