//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, complaints,
//!   admin, health)
//! - **Schemas**: the domain payload types ([`User`], [`Complaint`],
//!   [`Error`], [`ErrorCode`]) returned by those endpoints
//! - **Security**: the session cookie scheme and the administrator bearer
//!   token scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.
//!
//! [`User`]: crate::domain::User
//! [`Complaint`]: crate::domain::Complaint
//! [`Error`]: crate::domain::Error
//! [`ErrorCode`]: crate::domain::ErrorCode

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the authentication schemes.
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
                "Session cookie issued by POST /login.",
            ))),
        );
        components.add_security_scheme(
            "AdminBearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Static administrator token configured at deployment time.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Grumble backend API",
        description = "HTTP interface for complaint registration, submission, and administration.",
        license(name = "MIT", url = "https://opensource.org/license/mit/")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::complaints::submit_complaint,
        crate::inbound::http::complaints::get_all_complaints_for_user,
        crate::inbound::http::complaints::view_complaint,
        crate::inbound::http::admin::get_all_complaints_for_admin,
        crate::inbound::http::admin::resolve_complaint,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::User,
        crate::domain::Complaint,
        crate::domain::Error,
        crate::domain::ErrorCode
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "complaints", description = "Complaints owned by the signed-in user"),
        (name = "admin", description = "Administrative complaint review"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
