//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler of the inbound layer, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the bearer token
//! security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use crate::inbound::http::blogs::{BlogRequestBody, CommentsRequestBody};
use crate::inbound::http::schemas::{
    AuthorBlogCountSchema, AuthorLikesSchema, BlogSchema, BlogStatsSchema, ErrorCodeSchema,
    ErrorSchema, FavoriteBlogSchema, OwnerSummarySchema, PopulatedBlogSchema, UserSchema,
};
use crate::inbound::http::users::{LoginRequest, LoginResponse, RegisterRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by handler annotations.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bloglist backend API",
        description = "Blog collection with per-owner write access, accounts and aggregate statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::blog_stats,
        crate::inbound::http::blogs::get_blog,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::blogs::replace_comments,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        OwnerSummarySchema,
        BlogSchema,
        PopulatedBlogSchema,
        BlogStatsSchema,
        FavoriteBlogSchema,
        AuthorBlogCountSchema,
        AuthorLikesSchema,
        BlogRequestBody,
        CommentsRequestBody,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
    )),
    tags(
        (name = "blogs", description = "Blog collection and statistics"),
        (name = "users", description = "Accounts and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
