//! HTTP route handlers for Axum.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::types::{
    CommunityEngagementRequest, ComprehensiveCampaignRequest, ContentCampaignRequest,
    ContentGenerationRequest, ErrorBody, RepositoryResponse, StatusResponse, TaskAccepted,
    ToolStatus, ToolsStatusResponse, UserAnalysisRequest,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Request rejections raised after the body has been parsed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unprocessable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        warn!(%status, error = %self, "rejecting request");
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "system",
    responses((status = 200, description = "Service status", body = StatusResponse))
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let settings = &state.settings;
    Json(StatusResponse {
        status: "operational".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        debug: state.runtime.debug,
        reload: state.runtime.reload,
        scheduler_enabled: settings.enable_scheduler,
        scheduler_timezone: settings.scheduler_timezone.clone(),
        ai_model: settings.openai_model_name.clone(),
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/repository",
    tag = "system",
    responses((status = 200, description = "Target repository", body = RepositoryResponse))
)]
pub async fn repository(State(state): State<AppState>) -> Json<RepositoryResponse> {
    let repository = state.settings.github_repository.trim().to_string();
    Json(RepositoryResponse {
        configured: !repository.is_empty(),
        repository,
        token_configured: state.settings.github_token.is_set(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/tools/status",
    tag = "system",
    responses((status = 200, description = "Integration status", body = ToolsStatusResponse))
)]
pub async fn tools_status(State(state): State<AppState>) -> Json<ToolsStatusResponse> {
    let tools: Vec<ToolStatus> = state
        .settings
        .configured_tools()
        .into_iter()
        .map(|(name, configured)| ToolStatus {
            name: name.to_string(),
            configured,
        })
        .collect();
    let configured = tools.iter().filter(|t| t.configured).count();
    Json(ToolsStatusResponse {
        total: tools.len(),
        configured,
        tools,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/analyze/users",
    tag = "analysis",
    request_body = UserAnalysisRequest,
    responses(
        (status = 200, description = "Task accepted", body = TaskAccepted),
        (status = 422, description = "Request rejected", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn analyze_users(Json(request): Json<UserAnalysisRequest>) -> ApiResult<TaskAccepted> {
    let users: Vec<&str> = request
        .user_list
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .collect();
    if users.is_empty() {
        return Err(ApiError::Unprocessable(
            "user_list must name at least one account".to_string(),
        ));
    }
    info!(
        users = users.len(),
        depth = %request.analysis_depth,
        language = ?request.language,
        "user analysis accepted"
    );
    Ok(Json(TaskAccepted::new(
        "user_analysis",
        format!("analysis of {} queued", users.join(", ")),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/campaigns/content",
    tag = "campaigns",
    request_body = ContentCampaignRequest,
    responses(
        (status = 200, description = "Task accepted", body = TaskAccepted),
        (status = 422, description = "Request rejected", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn content_campaign(
    Json(request): Json<ContentCampaignRequest>,
) -> ApiResult<TaskAccepted> {
    info!(
        name = %request.name,
        topics = request.topics.len(),
        content_types = ?request.content_types,
        "content campaign accepted"
    );
    Ok(Json(TaskAccepted::new(
        "content_campaign",
        format!("content campaign '{}' queued", request.name),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/engagement/community",
    tag = "community",
    request_body = CommunityEngagementRequest,
    responses(
        (status = 200, description = "Task accepted", body = TaskAccepted),
        (status = 422, description = "Request rejected", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn community_engagement(
    Json(request): Json<CommunityEngagementRequest>,
) -> ApiResult<TaskAccepted> {
    if request.target_count == 0 {
        return Err(ApiError::Unprocessable(
            "target_count must be at least 1".to_string(),
        ));
    }
    info!(
        target_count = request.target_count,
        interaction_types = ?request.interaction_types,
        level = %request.engagement_level,
        "community engagement accepted"
    );
    Ok(Json(TaskAccepted::new(
        "community_engagement",
        format!("engagement with {} community members queued", request.target_count),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/content/generate",
    tag = "content",
    request_body = ContentGenerationRequest,
    responses(
        (status = 200, description = "Task accepted", body = TaskAccepted),
        (status = 422, description = "Request rejected", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn generate_content(
    Json(request): Json<ContentGenerationRequest>,
) -> ApiResult<TaskAccepted> {
    info!(
        content_type = %request.content_type,
        topic = %request.topic,
        language = ?request.language,
        "content generation accepted"
    );
    Ok(Json(TaskAccepted::new(
        "content_generation",
        format!("{} content on '{}' queued", request.content_type, request.topic),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/campaigns/comprehensive",
    tag = "campaigns",
    request_body = ComprehensiveCampaignRequest,
    responses(
        (status = 200, description = "Task accepted", body = TaskAccepted),
        (status = 422, description = "Request rejected", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn comprehensive_campaign(
    Json(request): Json<ComprehensiveCampaignRequest>,
) -> ApiResult<TaskAccepted> {
    info!(
        name = %request.name,
        objectives = request.objectives.len(),
        channels = ?request.priority_channels,
        "comprehensive campaign accepted"
    );
    Ok(Json(TaskAccepted::new(
        "comprehensive_campaign",
        format!("comprehensive campaign '{}' queued", request.name),
    )))
}
