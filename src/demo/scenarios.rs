//! The scripted demonstration scenarios and their request payloads.

use std::time::Duration;

use crate::api::{
    paths,
    types::{
        CommunityEngagementRequest, ComprehensiveCampaignRequest, ContentCampaignRequest,
        ContentGenerationRequest, Language, UserAnalysisRequest,
    },
};

use super::transport::{ApiRequest, ClientError};

/// Delay taken before a step.
///
/// Purely cosmetic: it spaces out calls that trigger external side effects
/// (posts, comments). Ordering is not guaranteed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    None,
    Short,
    Long,
}

/// Concrete durations for [`Pause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub short: Duration,
    pub long: Duration,
}

impl Pacing {
    pub fn standard() -> Self {
        Self {
            short: Duration::from_secs(1),
            long: Duration::from_secs(2),
        }
    }

    pub fn none() -> Self {
        Self {
            short: Duration::ZERO,
            long: Duration::ZERO,
        }
    }

    pub fn delay(&self, pause: Pause) -> Duration {
        match pause {
            Pause::None => Duration::ZERO,
            Pause::Short => self.short,
            Pause::Long => self.long,
        }
    }
}

/// One HTTP call inside a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Progress line printed before the call.
    pub announce: &'static str,
    /// Heading for the printed response.
    pub title: &'static str,
    pub request: ApiRequest,
    pub pause_before: Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    UserAnalysis,
    ContentMarketing,
    CommunityEngagement,
    ContentGeneration,
    SystemStatus,
    Comprehensive,
}

impl Scenario {
    /// Menu order.
    pub const ALL: [Scenario; 6] = [
        Scenario::UserAnalysis,
        Scenario::ContentMarketing,
        Scenario::CommunityEngagement,
        Scenario::ContentGeneration,
        Scenario::SystemStatus,
        Scenario::Comprehensive,
    ];

    /// 1-based menu number to scenario.
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::UserAnalysis => "User Analysis",
            Scenario::ContentMarketing => "Content Marketing",
            Scenario::CommunityEngagement => "Community Engagement",
            Scenario::ContentGeneration => "Content Generation",
            Scenario::SystemStatus => "System Status",
            Scenario::Comprehensive => "Comprehensive Demo",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Scenario::UserAnalysis => "Scenario 1: Analyze Prominent GitHub Users",
            Scenario::ContentMarketing => "Scenario 2: Create a Content Marketing Campaign",
            Scenario::CommunityEngagement => "Scenario 3: Execute Community Engagement Activity",
            Scenario::ContentGeneration => "Scenario 4: AI Content Generation",
            Scenario::SystemStatus => "Scenario 5: System Status Check and Configuration",
            Scenario::Comprehensive => "Comprehensive Demo: Complete Marketing Workflow",
        }
    }

    pub fn description(self) -> &'static [&'static str] {
        match self {
            Scenario::UserAnalysis => &[
                "Analyze a few well-known GitHub users",
                "Understand their technical background and community influence",
                "Develop personalized interaction strategies",
            ],
            Scenario::ContentMarketing => &[
                "Create technical blog content for the Dingo project",
                "Develop a content strategy for the developer community",
                "Generate various types of marketing materials",
            ],
            Scenario::CommunityEngagement => &[
                "Analyze the status of the target project's GitHub community",
                "Interact with active users",
                "Establish long-term community relationships",
            ],
            Scenario::ContentGeneration => &[
                "Use AI to generate technical blog articles",
                "Create social media content",
                "Supports Chinese and English content generation",
            ],
            Scenario::SystemStatus => &[
                "Check system operating status",
                "View and configure the target repository",
                "Understand available tools and Agents",
            ],
            Scenario::Comprehensive => &[
                "Execute a complete marketing workflow",
                "Includes user analysis, content creation, community engagement, etc.",
                "Demonstrate multi-Agent collaboration capabilities",
            ],
        }
    }

    /// Calls made by the scenario, in order.
    pub fn steps(self) -> Result<Vec<Step>, ClientError> {
        let steps = match self {
            Scenario::UserAnalysis => {
                let mut payload = UserAnalysisRequest {
                    user_list: strings(&["octocat", "defunkt"]),
                    analysis_depth: "basic".to_string(),
                    language: Language::Zh,
                };
                let zh = ApiRequest::post_json(paths::ANALYZE_USERS, &payload)?;
                payload.language = Language::En;
                payload.user_list = strings(&["gvanrossum"]);
                let en = ApiRequest::post_json(paths::ANALYZE_USERS, &payload)?;
                vec![
                    step(
                        "🔍 Executing Chinese user analysis...",
                        "Chinese Analysis Result",
                        zh,
                        Pause::None,
                    ),
                    step(
                        "🔍 Executing English user analysis...",
                        "English Analysis Result",
                        en,
                        Pause::Long,
                    ),
                ]
            }
            Scenario::ContentMarketing => {
                let payload = ContentCampaignRequest {
                    name: "Dingo Data Quality Tool Promotion".to_string(),
                    target_audience: "Python Developers and Data Engineers".to_string(),
                    topics: strings(&[
                        "Data Quality Assessment",
                        "Python Data Tools",
                        "Open Source Project Contributions",
                    ]),
                    content_types: strings(&["blog", "social", "tutorial"]),
                    duration: "2 Weeks".to_string(),
                    keywords: strings(&[
                        "Data Quality",
                        "Python",
                        "Open Source",
                        "Data Validation",
                    ]),
                    language: Language::Zh,
                };
                vec![step(
                    "📝 Creating content marketing campaign...",
                    "Content Marketing Campaign Result",
                    ApiRequest::post_json(paths::CONTENT_CAMPAIGN, &payload)?,
                    Pause::None,
                )]
            }
            Scenario::CommunityEngagement => {
                let payload = CommunityEngagementRequest {
                    interaction_types: strings(&["comment", "issue"]),
                    target_count: 5,
                    engagement_level: "moderate".to_string(),
                    language: Language::Zh,
                };
                vec![step(
                    "🤝 Executing community engagement...",
                    "Community Engagement Result",
                    ApiRequest::post_json(paths::COMMUNITY_ENGAGEMENT, &payload)?,
                    Pause::None,
                )]
            }
            Scenario::ContentGeneration => {
                let mut payload = ContentGenerationRequest {
                    content_type: "blog".to_string(),
                    topic: "How to use Dingo to improve data quality".to_string(),
                    target_audience: "Data Engineers".to_string(),
                    tone: "professional".to_string(),
                    length: "medium".to_string(),
                    language: Language::Zh,
                    keywords: strings(&["Data Quality", "Dingo", "Best Practices"]),
                };
                let blog = ApiRequest::post_json(paths::GENERATE_CONTENT, &payload)?;
                payload.content_type = "social".to_string();
                payload.topic = "Introducing Dingo: A Python Data Quality Tool".to_string();
                payload.target_audience = "developers".to_string();
                payload.language = Language::En;
                payload.keywords = strings(&["data quality", "Python", "open source"]);
                let social = ApiRequest::post_json(paths::GENERATE_CONTENT, &payload)?;
                vec![
                    step(
                        "✍️ Generating Chinese technical blog...",
                        "Chinese Blog Generation Result",
                        blog,
                        Pause::None,
                    ),
                    step(
                        "📱 Generating English social media content...",
                        "English Social Media Content",
                        social,
                        Pause::Long,
                    ),
                ]
            }
            Scenario::SystemStatus => vec![
                step(
                    "🔍 Checking system status...",
                    "System Status",
                    ApiRequest::get(paths::STATUS),
                    Pause::None,
                ),
                step(
                    "📂 Viewing current target repository...",
                    "Current Repository Configuration",
                    ApiRequest::get(paths::REPOSITORY),
                    Pause::Short,
                ),
                step(
                    "🛠️ Viewing tool status...",
                    "Tool Status",
                    ApiRequest::get(paths::TOOLS_STATUS),
                    Pause::Short,
                ),
            ],
            Scenario::Comprehensive => {
                let payload = ComprehensiveCampaignRequest {
                    name: "Dingo Project Promotion Plan".to_string(),
                    objectives: strings(&[
                        "Increase Project Visibility",
                        "Attract Contributors",
                        "Establish Technical Community",
                    ]),
                    target_audience: "Python Developers and Data Scientists".to_string(),
                    duration: "1 Month".to_string(),
                    budget_level: "medium".to_string(),
                    priority_channels: strings(&["github", "social", "blog"]),
                    language: Language::Zh,
                };
                vec![step(
                    "🚀 Launching comprehensive marketing campaign...",
                    "Comprehensive Marketing Campaign Result",
                    ApiRequest::post_json(paths::COMPREHENSIVE_CAMPAIGN, &payload)?,
                    Pause::None,
                )]
            }
        };
        Ok(steps)
    }
}

fn step(
    announce: &'static str,
    title: &'static str,
    request: ApiRequest,
    pause_before: Pause,
) -> Step {
    Step {
        announce,
        title,
        request,
        pause_before,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
