use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{
    FeedbackKind, HistoryRepository, ProfileRepository, RecordId, RepositoryError,
    WardrobeRepository,
};
use super::service::{
    RecommendationRequest, RecommendationResponse, RecommendationService,
    RecommendationServiceError,
};
use crate::wardrobe::{UserId, UserProfile};

const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Router builder exposing recommendation, history, profile and gap endpoints.
pub fn recommendation_router<W, P, H>(service: Arc<RecommendationService<W, P, H>>) -> Router
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/recommendations/:user_id",
            post(recommend_handler::<W, P, H>),
        )
        .route(
            "/api/v1/recommendations/:user_id/history",
            post(save_history_handler::<W, P, H>).get(history_handler::<W, P, H>),
        )
        .route(
            "/api/v1/recommendations/:user_id/history/:record_id/feedback",
            post(feedback_handler::<W, P, H>),
        )
        .route("/api/v1/profiles/:user_id", put(profile_handler::<W, P, H>))
        .route(
            "/api/v1/profiles/:user_id/analysis",
            get(profile_analysis_handler::<W, P, H>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/gaps",
            get(gaps_handler::<W, P, H>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryQuery {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedbackRequest {
    feedback: FeedbackKind,
    #[serde(default)]
    reason: Option<String>,
}

pub(crate) async fn recommend_handler<W, P, H>(
    State(service): State<Arc<RecommendationService<W, P, H>>>,
    Path(user_id): Path<u64>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    match service.recommend(UserId(user_id), request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_history_handler<W, P, H>(
    State(service): State<Arc<RecommendationService<W, P, H>>>,
    Path(user_id): Path<u64>,
    axum::Json(response): axum::Json<RecommendationResponse>,
) -> Response
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    match service.save_history(UserId(user_id), &response) {
        Ok(record) => {
            let payload = json!({
                "history_id": record.id,
                "saved_at": record.created_at,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<W, P, H>(
    State(service): State<Arc<RecommendationService<W, P, H>>>,
    Path(user_id): Path<u64>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match service.load_history(UserId(user_id), limit) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn feedback_handler<W, P, H>(
    State(service): State<Arc<RecommendationService<W, P, H>>>,
    Path((user_id, record_id)): Path<(u64, u64)>,
    axum::Json(request): axum::Json<FeedbackRequest>,
) -> Response
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    match service.record_feedback(
        UserId(user_id),
        RecordId(record_id),
        request.feedback,
        request.reason,
    ) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<W, P, H>(
    State(service): State<Arc<RecommendationService<W, P, H>>>,
    Path(user_id): Path<u64>,
    axum::Json(profile): axum::Json<UserProfile>,
) -> Response
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    match service.update_profile(UserId(user_id), profile) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_analysis_handler<W, P, H>(
    State(service): State<Arc<RecommendationService<W, P, H>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    match service.profile_analysis(UserId(user_id)) {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn gaps_handler<W, P, H>(
    State(service): State<Arc<RecommendationService<W, P, H>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    match service.wardrobe_gaps(UserId(user_id)) {
        Ok(suggestions) => (StatusCode::OK, axum::Json(suggestions)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RecommendationServiceError) -> Response {
    let status = match &error {
        RecommendationServiceError::UserNotFound(_)
        | RecommendationServiceError::Repository(RepositoryError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        RecommendationServiceError::EmptyWardrobe
        | RecommendationServiceError::InvalidProfile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecommendationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RecommendationServiceError::Pipeline(_)
        | RecommendationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
