//! OpenAPI description of the `/api/v1` surface, rendered at [`DOCS_PATH`].

use axum::Router;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::routes;

/// Interactive API reference page.
pub const DOCS_PATH: &str = "/docs";

#[derive(OpenApi)]
#[openapi(
    info(title = "Dingo Marketing API"),
    paths(
        routes::status,
        routes::repository,
        routes::tools_status,
        routes::analyze_users,
        routes::content_campaign,
        routes::community_engagement,
        routes::generate_content,
        routes::comprehensive_campaign,
    ),
    tags(
        (name = "system", description = "Service status and configuration"),
        (name = "analysis", description = "GitHub user analysis"),
        (name = "campaigns", description = "Marketing campaigns"),
        (name = "community", description = "Community engagement"),
        (name = "content", description = "AI content generation"),
    )
)]
pub struct ApiDoc;

/// Routes serving the reference page with the document embedded.
pub fn docs_router() -> Router {
    Router::new().merge(Scalar::with_url(DOCS_PATH, ApiDoc::openapi()))
}
