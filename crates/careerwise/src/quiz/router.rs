use axum::{
    extract::{Path, Query},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{DraftDoc, DraftError, DraftId, DraftStatus};
use super::routing::{destination_for_raw_status, Destination, RoutedDestination};
use crate::error::AppError;

/// Router builder exposing the draft destination endpoints.
pub fn quiz_router() -> Router {
    Router::new()
        .route("/api/v1/quiz/destination", get(destination_handler))
        .route(
            "/api/v1/quiz/drafts/:rid/destination",
            post(draft_destination_handler),
        )
        .route("/quiz/resume", get(resume_handler))
}

#[derive(Debug, Default, Deserialize)]
pub struct DestinationQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationView {
    pub rid: DraftId,
    pub status: Option<DraftStatus>,
    pub destination: Destination,
    pub path: String,
    pub fallback: bool,
}

impl DestinationView {
    fn new(rid: DraftId, routed: RoutedDestination) -> Self {
        Self {
            rid,
            status: routed.status,
            destination: routed.destination,
            path: routed.path,
            fallback: routed.fallback,
        }
    }
}

fn route_query(query: DestinationQuery) -> Result<DestinationView, AppError> {
    let rid = DraftId::parse(query.rid.unwrap_or_default())?;
    let raw_status = query.status.unwrap_or_default();
    let routed = destination_for_raw_status(&raw_status, rid.as_str());
    Ok(DestinationView::new(rid, routed))
}

pub(crate) async fn destination_handler(
    Query(query): Query<DestinationQuery>,
) -> Result<Json<DestinationView>, AppError> {
    route_query(query).map(Json)
}

pub(crate) async fn draft_destination_handler(
    Path(rid): Path<String>,
    Json(draft): Json<DraftDoc>,
) -> Result<Json<DestinationView>, AppError> {
    let rid = DraftId::parse(rid)?;
    let destination = Destination::for_status(draft.status);
    let routed = RoutedDestination {
        status: Some(draft.status),
        destination,
        path: draft.destination(rid.as_str()),
        fallback: false,
    };
    Ok(Json(DestinationView::new(rid, routed)))
}

/// 307 to the next page. A `rid` that cannot form a header value is a client error.
pub(crate) async fn resume_handler(
    Query(query): Query<DestinationQuery>,
) -> Result<Response, AppError> {
    let view = route_query(query)?;
    let location =
        HeaderValue::from_bytes(view.path.as_bytes()).map_err(|_| DraftError::InvalidDraftId)?;
    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn destination_handler_routes_known_status() {
        let query = DestinationQuery {
            status: Some("macro_done".to_string()),
            rid: Some("abc123".to_string()),
        };

        let Json(view) = destination_handler(Query(query))
            .await
            .expect("destination resolves");

        assert_eq!(view.status, Some(DraftStatus::MacroDone));
        assert_eq!(view.destination, Destination::Riasec);
        assert_eq!(view.path, "/riasec?rid=abc123");
        assert!(!view.fallback);
    }

    #[tokio::test]
    async fn destination_handler_rejects_missing_rid() {
        let query = DestinationQuery {
            status: Some("started".to_string()),
            rid: None,
        };

        let err = destination_handler(Query(query))
            .await
            .expect_err("rid is required");
        assert!(matches!(err, AppError::Draft(_)));
    }

    #[tokio::test]
    async fn destination_route_reports_fallback() {
        let response = quiz_router()
            .oneshot(
                Request::get("/api/v1/quiz/destination?status=legacy_state&rid=xyz")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload,
            json!({
                "rid": "xyz",
                "status": null,
                "destination": "intake",
                "path": "/intake?rid=xyz",
                "fallback": true
            })
        );
    }

    #[tokio::test]
    async fn destination_route_returns_bad_request_for_empty_rid() {
        let response = quiz_router()
            .oneshot(
                Request::get("/api/v1/quiz/destination?status=started&rid=")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert!(payload.get("error").is_some());
    }

    #[tokio::test]
    async fn draft_route_uses_document_status() {
        let body = json!({ "status": "premium_done", "entitlement": "premium" });
        let response = quiz_router()
            .oneshot(
                Request::post("/api/v1/quiz/drafts/d-42/destination")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("body encodes")))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["rid"], "d-42");
        assert_eq!(payload["status"], "premium_done");
        assert_eq!(payload["path"], "/final?rid=d-42");
        assert_eq!(payload["fallback"], false);
    }

    #[tokio::test]
    async fn draft_route_rejects_unknown_status_in_body() {
        let body = json!({ "status": "riasec_in_progress" });
        let response = quiz_router()
            .oneshot(
                Request::post("/api/v1/quiz/drafts/d-42/destination")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("body encodes")))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn resume_route_redirects_to_next_page() {
        let response = quiz_router()
            .oneshot(
                Request::get("/quiz/resume?status=free_done&rid=r9")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/results?rid=r9")
        );
    }

    #[tokio::test]
    async fn destination_route_without_status_takes_intake_fallback() {
        let response = quiz_router()
            .oneshot(
                Request::get("/api/v1/quiz/destination?rid=x")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["fallback"], true);
        assert_eq!(payload["path"], "/intake?rid=x");
        assert_eq!(payload["status"], Value::Null);
    }

    #[tokio::test]
    async fn resume_route_rejects_rid_with_control_characters() {
        let response = quiz_router()
            .oneshot(
                Request::get("/quiz/resume?status=started&rid=a%0Ab")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::LOCATION).is_none());
        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .is_some_and(|message| message.contains("redirect")));
    }

    #[tokio::test]
    async fn resume_route_passes_non_ascii_rid_through() {
        let response = quiz_router()
            .oneshot(
                Request::get("/quiz/resume?status=intake_done&rid=%C3%A9")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).map(|value| value.as_bytes()),
            Some("/macro?rid=é".as_bytes())
        );
    }
}
