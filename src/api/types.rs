//! Request and response bodies of the `/api/v1` surface.
//!
//! The request types are shared by the service handlers (deserialize) and the
//! demo client (serialize); field order is the order keys appear on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Output language for analyses and generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

/// `POST /analyze/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserAnalysisRequest {
    pub user_list: Vec<String>,
    #[serde(default = "default_analysis_depth")]
    pub analysis_depth: String,
    #[serde(default)]
    pub language: Language,
}

fn default_analysis_depth() -> String {
    "basic".to_string()
}

/// `POST /campaigns/content`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContentCampaignRequest {
    pub name: String,
    pub target_audience: String,
    pub topics: Vec<String>,
    pub content_types: Vec<String>,
    pub duration: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub language: Language,
}

/// `POST /engagement/community`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommunityEngagementRequest {
    pub interaction_types: Vec<String>,
    pub target_count: u32,
    pub engagement_level: String,
    #[serde(default)]
    pub language: Language,
}

/// `POST /content/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContentGenerationRequest {
    pub content_type: String,
    pub topic: String,
    pub target_audience: String,
    pub tone: String,
    pub length: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// `POST /campaigns/comprehensive`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComprehensiveCampaignRequest {
    pub name: String,
    pub objectives: Vec<String>,
    pub target_audience: String,
    pub duration: String,
    pub budget_level: String,
    pub priority_channels: Vec<String>,
    #[serde(default)]
    pub language: Language,
}

/// Envelope returned when a job is handed to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskAccepted {
    pub task_id: Uuid,
    pub status: String,
    pub kind: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl TaskAccepted {
    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            task_id: Uuid::new_v4(),
            status: "accepted".to_string(),
            kind: kind.to_string(),
            message: message.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub debug: bool,
    pub reload: bool,
    pub scheduler_enabled: bool,
    pub scheduler_timezone: String,
    pub ai_model: String,
    pub uptime_seconds: u64,
}

/// `GET /repository`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepositoryResponse {
    pub repository: String,
    pub configured: bool,
    pub token_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolStatus {
    pub name: String,
    pub configured: bool,
}

/// `GET /tools/status`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolsStatusResponse {
    pub tools: Vec<ToolStatus>,
    pub total: usize,
    pub configured: usize,
}

/// Body of every 4xx/5xx produced by the handlers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}
