pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sections", get(handlers::handle_list_sections))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/edits",
            post(handlers::handle_apply_edit),
        )
        // Preview
        .route(
            "/api/v1/sessions/:id/preview",
            get(handlers::handle_get_preview),
        )
        .route(
            "/api/v1/sessions/:id/preview.html",
            get(handlers::handle_get_preview_html),
        )
        // Navigation
        .route(
            "/api/v1/sessions/:id/navigation/visibility",
            post(handlers::handle_visibility),
        )
        .route(
            "/api/v1/sessions/:id/navigation/viewport",
            post(handlers::handle_viewport),
        )
        .route(
            "/api/v1/sessions/:id/navigation/scroll/:section",
            post(handlers::handle_scroll),
        )
        // Export
        .route("/api/v1/sessions/:id/export", post(handlers::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::export::HtmlPageExporter;

    fn test_state() -> AppState {
        AppState::new(&Config::default(), Arc::new(HtmlPageExporter::default()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let response = send(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_health_reports_service_name() {
        let app = build_router(test_state());
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "resume-builder");
    }

    #[tokio::test]
    async fn test_sections_listed_in_page_order() {
        let app = build_router(test_state());
        let body = body_json(send(&app, Method::GET, "/api/v1/sections", None).await).await;
        let ids: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "personal",
                "experience",
                "education",
                "skills",
                "certifications",
                "references"
            ]
        );
    }

    #[tokio::test]
    async fn test_new_session_has_default_document() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let body = body_json(send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await).await;
        assert_eq!(body["revision"], 0);
        assert_eq!(body["activeSection"], "personal");
        assert_eq!(body["exporting"], false);
        assert_eq!(body["document"]["experience"].as_array().unwrap().len(), 1);
        assert_eq!(body["document"]["skills"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_edit_updates_document_and_revision() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({"op": "update_personal", "field": "name", "value": "Ada Lovelace"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["revision"], 1);
        assert_eq!(body["document"]["personal"]["name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_noop_edit_keeps_revision() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let body = body_json(
            send(
                &app,
                Method::POST,
                &format!("/api/v1/sessions/{id}/edits"),
                Some(json!({"op": "remove_education", "id": 99})),
            )
            .await,
        )
        .await;
        assert_eq!(body["revision"], 0);
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({"op": "update_personal", "field": "shoeSize", "value": "42"})),
        )
        .await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_preview_html_escapes_user_text() {
        let app = build_router(test_state());
        let id = create_session(&app).await;
        send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/edits"),
            Some(json!({"op": "update_personal", "field": "name", "value": "<b>Ada</b>"})),
        )
        .await;

        let response = send(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{id}/preview.html"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;Ada&lt;&#47;b&gt;"));
    }

    #[tokio::test]
    async fn test_visibility_batch_moves_active_section() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let body = body_json(
            send(
                &app,
                Method::POST,
                &format!("/api/v1/sessions/{id}/navigation/visibility"),
                Some(json!({"events": [
                    {"section": "experience", "ratio": 0.3, "isIntersecting": true},
                    {"section": "education", "ratio": 0.6, "isIntersecting": true}
                ]})),
            )
            .await,
        )
        .await;
        assert_eq!(body["activeSection"], "education");
    }

    #[tokio::test]
    async fn test_scroll_plans_animation_without_changing_active_section() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/navigation/scroll/education"),
            Some(json!({"container": {
                "container": {"top": 0.0, "height": 800.0},
                "scrollTop": 0.0,
                "sections": [
                    {"section": "personal", "top": 0.0, "height": 400.0},
                    {"section": "education", "top": 1200.0, "height": 300.0}
                ]
            }})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["animation"]["to"], 1120.0);
        assert_eq!(body["frames"].as_array().unwrap().last().unwrap(), 1120.0);

        let session = body_json(send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await).await;
        assert_eq!(session["activeSection"], "personal");
    }

    #[tokio::test]
    async fn test_scroll_without_container_is_noop() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let body = body_json(
            send(
                &app,
                Method::POST,
                &format!("/api/v1/sessions/{id}/navigation/scroll/skills"),
                Some(json!({})),
            )
            .await,
        )
        .await;
        assert!(body["animation"].is_null());
        assert!(body["frames"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scroll_without_body_is_noop() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/navigation/scroll/skills"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["animation"].is_null());
        assert!(body["frames"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_viewport_report_moves_active_section() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let body = body_json(
            send(
                &app,
                Method::POST,
                &format!("/api/v1/sessions/{id}/navigation/viewport"),
                Some(json!({
                    "scrollTop": 504.0,
                    "viewportHeight": 1000.0,
                    "sections": [
                        {"section": "experience", "top": 0.0, "height": 800.0},
                        {"section": "education", "top": 800.0, "height": 432.0},
                        {"section": "skills", "top": 1232.0, "height": 500.0}
                    ]
                })),
            )
            .await,
        )
        .await;
        assert_eq!(body["activeSection"], "education");
    }

    #[tokio::test]
    async fn test_expired_session_is_not_found() {
        let state = test_state();
        let app = build_router(state.clone());
        let id = create_session(&app).await;
        let uuid: Uuid = id.parse().unwrap();

        state
            .sessions
            .update(uuid, |s| s.last_active = Utc::now() - chrono::Duration::hours(2))
            .await;
        let purged = state
            .sessions
            .purge_idle(Config::default().session_ttl())
            .await;
        assert_eq!(purged, 1);

        let response = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_scroll_to_unknown_section_is_rejected() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/navigation/scroll/hobbies"),
            Some(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_returns_attachment() {
        let app = build_router(test_state());
        let id = create_session(&app).await;

        let response = send(&app, Method::POST, &format!("/api/v1/sessions/{id}/export"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.html\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_export_while_busy_conflicts() {
        let state = test_state();
        let app = build_router(state.clone());
        let id = create_session(&app).await;

        let guard = state
            .sessions
            .read(id.parse().unwrap(), |s| s.export_guard())
            .await
            .unwrap();
        let ticket = guard.try_begin().unwrap();

        let response = send(&app, Method::POST, &format!("/api/v1/sessions/{id}/export"), None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        drop(ticket);
        let response = send(&app, Method::POST, &format!("/api/v1/sessions/{id}/export"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = build_router(test_state());
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}");

        assert_eq!(
            send(&app, Method::DELETE, &uri, None).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            send(&app, Method::GET, &uri, None).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
