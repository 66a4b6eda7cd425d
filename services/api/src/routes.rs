use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use bussola::quiz::{
    quiz_router, self_positioning_options, QuizService, RemoteClassifier, SelfPositioningOption,
};
use bussola::ranking::ParticipationStore;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct SelfPositioningResponse {
    pub(crate) options: Vec<SelfPositioningOption>,
}

pub(crate) fn with_quiz_routes<C, S>(service: Arc<QuizService<C, S>>) -> axum::Router
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    quiz_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/self-positioning",
            axum::routing::get(self_positioning_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn self_positioning_endpoint() -> Json<SelfPositioningResponse> {
    Json(SelfPositioningResponse {
        options: self_positioning_options(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryParticipationStore, UnconfiguredClassifier};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use bussola::config::QuizConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let service = Arc::new(QuizService::new(
            Arc::new(UnconfiguredClassifier),
            Arc::new(InMemoryParticipationStore::default()),
            &QuizConfig {
                target_size: 20,
                seed: Some(1),
            },
        ));
        (with_quiz_routes(service).layer(Extension(state)), readiness)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request builds")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (router, _) = app(false);

        let response = router.oneshot(get("/health")).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (router, readiness) = app(false);

        let response = router
            .clone()
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        readiness.store(true, Ordering::Release);
        let response = router.oneshot(get("/ready")).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_are_rendered_as_prometheus_text() {
        let (router, _) = app(true);

        let response = router.oneshot(get("/metrics")).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some("text/plain; version=0.0.4".as_bytes())
        );
    }

    #[tokio::test]
    async fn self_positioning_lists_every_option() {
        let (router, _) = app(true);

        let response = router
            .oneshot(get("/api/v1/self-positioning"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        let options = payload["options"].as_array().expect("options array");
        assert_eq!(options.len(), 6);
        assert_eq!(options[0]["id"], "left");
        assert!(options[5]["scores"].is_null());
    }

    #[tokio::test]
    async fn quiz_routes_are_mounted() {
        let (router, _) = app(true);

        let response = router
            .oneshot(
                Request::post("/api/v1/quiz/results")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"answers":[{"statementId":1,"value":5}]}"#))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(payload["origin"], "local_fallback");
    }
}
