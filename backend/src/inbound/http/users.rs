//! Registration and login handlers.
//!
//! ```text
//! POST /register {"name":"Ada Lovelace","email":"ada@example.com"}
//! POST /login {"secretCode":"h9dGk2Lm4Qr7Tx1Vw3Yz5Bc8"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation;

/// Registration request body for `POST /register`.
///
/// Example JSON:
/// `{"name":"Ada Lovelace","email":"ada@example.com"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

/// Login request body for `POST /login`.
///
/// Example JSON:
/// `{"secretCode":"h9dGk2Lm4Qr7Tx1Vw3Yz5Bc8"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub secret_code: String,
}

/// Register a new user.
///
/// The server mints the user's identifier and secret code; the registration
/// response is the only place the secret code is ever returned.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered; note the secret code now", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest { name, email } = payload.into_inner();
    let draft = validation::registration_draft(name, email)?;
    let user = state.store.register(draft).await?;
    tracing::info!(user_id = %user.id(), "user registered");
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate a secret code and establish a session.
///
/// Registering does not log the user in; clients must present the secret
/// code here to obtain a session cookie.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown secret code", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let code = validation::parse_secret_code(payload.into_inner().secret_code)?;
    let user = state.store.authenticate(&code).await?;
    session.persist_user(user.id())?;
    tracing::info!(user_id = %user.id(), "user logged in");
    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_utils::test_session_middleware())
            .app_data(test_utils::test_state())
            .service(register)
            .service(login)
    }

    async fn register_user(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Value {
        let request = actix_test::TestRequest::post()
            .uri("/register")
            .set_json(RegisterRequest {
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
            })
            .to_request();
        let response = actix_test::call_service(app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("registration JSON")
    }

    #[actix_web::test]
    async fn register_returns_the_minted_identity_in_camel_case() {
        let app = actix_test::init_service(test_app()).await;
        let registered = register_user(&app).await;

        let id = registered
            .get("id")
            .and_then(Value::as_str)
            .expect("id present");
        uuid::Uuid::parse_str(id).expect("id is a UUID");
        let code = registered
            .get("secretCode")
            .and_then(Value::as_str)
            .expect("secretCode present");
        assert_eq!(code.len(), credentials::SECRET_CODE_LEN);
        assert_eq!(
            registered.get("name").and_then(Value::as_str),
            Some("Ada Lovelace")
        );
        assert_eq!(
            registered.get("email").and_then(Value::as_str),
            Some("ada@example.com")
        );
        assert_eq!(registered.get("complaints"), Some(&Value::Array(vec![])));
        assert!(registered.get("secret_code").is_none());
    }

    #[actix_web::test]
    async fn register_mints_a_distinct_identity_per_user() {
        let app = actix_test::init_service(test_app()).await;
        let first = register_user(&app).await;
        let second = register_user(&app).await;

        assert_ne!(first.get("id"), second.get("id"));
        assert_ne!(first.get("secretCode"), second.get("secretCode"));
    }

    #[rstest]
    #[case("   ", "ada@example.com", "name must not be blank", "name")]
    #[case("Ada", "", "email must not be blank", "email")]
    #[actix_web::test]
    async fn register_rejects_blank_fields(
        #[case] name: &str,
        #[case] email: &str,
        #[case] message: &str,
        #[case] field: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/register")
            .set_json(RegisterRequest {
                name: name.into(),
                email: email.into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value.get("message").and_then(Value::as_str), Some(message));
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        let details = value
            .get("details")
            .and_then(|v| v.as_object())
            .expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("blank_field")
        );
    }

    #[actix_web::test]
    async fn login_establishes_a_session_for_the_registered_user() {
        let app = actix_test::init_service(test_app()).await;
        let registered = register_user(&app).await;
        let code = registered
            .get("secretCode")
            .and_then(Value::as_str)
            .expect("secretCode present");

        let request = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(LoginRequest {
                secret_code: code.into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session"),
            "login sets the session cookie"
        );
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("login JSON");
        assert_eq!(value.get("id"), registered.get("id"));
        assert_eq!(value.get("name"), registered.get("name"));
    }

    #[actix_web::test]
    async fn login_rejects_unknown_codes_with_unauthorised_status() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(LoginRequest {
                secret_code: "wRonGc0deswRonGc0deswRon".into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("invalid secret code")
        );
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("unauthorized")
        );
    }

    #[actix_web::test]
    async fn login_rejects_malformed_codes_without_echoing_them() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(LoginRequest {
                secret_code: "   ".into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        let details = value
            .get("details")
            .and_then(|v| v.as_object())
            .expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("malformed_secret_code")
        );
        assert!(
            details.get("value").is_none(),
            "rejected credentials must not be echoed"
        );
    }
}
