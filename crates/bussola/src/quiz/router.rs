use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::Statement;
use super::service::{QuizCompletion, QuizService, RemoteClassifier};
use crate::error::AppError;
use crate::ranking::{ParticipationStore, TimeRange};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizRequest {
    #[serde(default)]
    pub(crate) target_size: Option<usize>,
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct QuizResponse {
    pub(crate) questions: Vec<Statement>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankingQuery {
    #[serde(default)]
    pub(crate) range: Option<String>,
}

/// Router builder exposing quiz sampling, result submission and the ranking.
pub fn quiz_router<C, S>(service: Arc<QuizService<C, S>>) -> Router
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    Router::new()
        .route("/api/v1/quiz", post(new_quiz_handler::<C, S>))
        .route("/api/v1/quiz/results", post(results_handler::<C, S>))
        .route("/api/v1/ranking", get(ranking_handler::<C, S>))
        .route("/api/v1/ranking/trend.csv", get(trend_csv_handler::<C, S>))
        .with_state(service)
}

pub(crate) async fn new_quiz_handler<C, S>(
    State(service): State<Arc<QuizService<C, S>>>,
    axum::Json(request): axum::Json<QuizRequest>,
) -> Response
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    let questions = match request.seed {
        Some(seed) => service.new_quiz_seeded(request.target_size, seed),
        None => service.new_quiz(request.target_size),
    };

    (StatusCode::OK, axum::Json(QuizResponse { questions })).into_response()
}

pub(crate) async fn results_handler<C, S>(
    State(service): State<Arc<QuizService<C, S>>>,
    axum::Json(completion): axum::Json<QuizCompletion>,
) -> Response
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    match service.complete(completion) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

fn parse_range(query: &RankingQuery) -> Result<TimeRange, Response> {
    query
        .range
        .as_deref()
        .unwrap_or("all")
        .parse::<TimeRange>()
        .map_err(|err| AppError::Input(err.to_string()).into_response())
}

pub(crate) async fn ranking_handler<C, S>(
    State(service): State<Arc<QuizService<C, S>>>,
    Query(query): Query<RankingQuery>,
) -> Response
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    let range = match parse_range(&query) {
        Ok(range) => range,
        Err(response) => return response,
    };

    match service.ranking(range, Utc::now()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn trend_csv_handler<C, S>(
    State(service): State<Arc<QuizService<C, S>>>,
    Query(query): Query<RankingQuery>,
) -> Response
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    let range = match parse_range(&query) {
        Ok(range) => range,
        Err(response) => return response,
    };

    let csv = service
        .ranking(range, Utc::now())
        .map_err(AppError::from)
        .and_then(|summary| summary.monthly_trend_csv().map_err(AppError::from));

    match csv {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
