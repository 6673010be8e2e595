//! HTTP surface for the listing handler
//!
//! Converts an actix request into the same `ApiEvent` the lambda entrypoint
//! receives, so both transports share routing and CORS behavior.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;

use crate::models::{ApiEvent, ApiResponse};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api").to(invoke));
}

async fn invoke(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let event = event_from_request(&req);
    into_http_response(state.handler.handle(&event).await)
}

fn event_from_request(req: &HttpRequest) -> ApiEvent {
    let query: HashMap<String, String> = url::form_urlencoded::parse(req.query_string().as_bytes())
        .into_owned()
        .collect();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    ApiEvent {
        http_method: req.method().as_str().to_string(),
        query_string_parameters: (!query.is_empty()).then_some(query),
        headers: Some(headers),
    }
}

fn into_http_response(response: ApiResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    for (name, value) in &response.headers {
        builder.insert_header((name.as_str(), value.as_str()));
    }
    builder.body(response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::Fixture;
    use crate::handler::{DatabaseConnector, Handler};
    use actix_web::http::Method;
    use actix_web::{test, App};

    fn state(database_url: String) -> web::Data<AppState> {
        web::Data::new(AppState {
            handler: Handler::new(DatabaseConnector::from_url(&database_url)),
        })
    }

    #[actix_web::test]
    async fn test_preflight() {
        let app = test::init_service(
            App::new()
                .app_data(state("/nonexistent/mediahub.db".to_string()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api?action=media")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Methods").unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Headers").unwrap(),
            "Content-Type, X-User-Id, X-Auth-Token"
        );
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_get_messages() {
        let fixture = Fixture::new();
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.database_url()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api?action=messages")
            .insert_header(("X-User-Id", "1"))
            .insert_header(("X-Auth-Token", "ignored"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "application/json");
        assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");

        let body: serde_json::Value = test::read_body_json(resp).await;
        let messages: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["message"].as_str().unwrap())
            .collect();
        assert_eq!(
            messages,
            vec![
                "How do I upload a video?",
                "Use the Upload button on the library tab.",
                "Thanks!"
            ]
        );
    }

    #[actix_web::test]
    async fn test_not_found() {
        let fixture = Fixture::new();
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.database_url()))
                .configure(config),
        )
        .await;

        for req in [
            test::TestRequest::get().uri("/api?action=orders").to_request(),
            test::TestRequest::post().uri("/api?action=users").to_request(),
            test::TestRequest::delete().uri("/api").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body = test::read_body(resp).await;
            assert_eq!(body, r#"{"error": "Not found"}"#);
        }
    }

    #[actix_web::test]
    async fn test_default_action_is_users() {
        let fixture = Fixture::new();
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.database_url()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["name"], "Мария");
    }

    #[actix_web::test]
    async fn test_event_from_request() {
        let req = test::TestRequest::get()
            .uri("/api?action=docu%6Dents&extra=1")
            .insert_header(("X-User-Id", "7"))
            .to_http_request();
        let event = event_from_request(&req);
        assert_eq!(event.http_method, "GET");
        assert_eq!(event.query_param("action"), Some("documents"));
        assert_eq!(event.headers.unwrap().get("x-user-id").map(String::as_str), Some("7"));

        let req = test::TestRequest::get().uri("/api").to_http_request();
        assert!(event_from_request(&req).query_string_parameters.is_none());
    }
}
