//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: all HTTP endpoints from the inbound layer, the wire
//! schemas, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, PostRecord, UserProfile};
use crate::inbound::http::auth::{LoginRequest, SignupRequest};
use crate::inbound::http::forms::{FormDescriptor, FormField, ImageUploadRequest};
use crate::inbound::http::posts::CreatePostRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Corkboard backend API",
        description = "Session-authenticated signup/login and post board."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup_form,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login_form,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::user_profile,
        crate::inbound::http::posts::post_form,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserProfile,
        PostRecord,
        SignupRequest,
        LoginRequest,
        CreatePostRequest,
        ImageUploadRequest,
        FormDescriptor,
        FormField,
    )),
    tags(
        (name = "auth", description = "Signup, login, logout, and the user profile"),
        (name = "posts", description = "Post creation and retrieval"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_references_every_route() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialise document");
        let paths = json.get("paths").and_then(|p| p.as_object()).expect("paths");
        for path in [
            "/api/v1/signup",
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/userProfile",
            "/api/v1/posts/create",
            "/api/v1/posts",
            "/api/v1/posts/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn document_carries_the_session_security_scheme() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialise document");
        assert!(
            json.pointer("/components/securitySchemes/SessionCookie")
                .is_some()
        );
    }
}
