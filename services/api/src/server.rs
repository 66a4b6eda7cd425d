use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryParticipationStore, UnconfiguredClassifier};
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bussola::config::AppConfig;
use bussola::error::AppError;
use bussola::quiz::QuizService;
use bussola::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryParticipationStore::default());
    let quiz_service = Arc::new(QuizService::new(
        Arc::new(UnconfiguredClassifier),
        store,
        &config.quiz,
    ));

    let app = with_quiz_routes(quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        quiz_size = config.quiz.target_size,
        seeded = config.quiz.seed.is_some(),
        "bussola quiz service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
