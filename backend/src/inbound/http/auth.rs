//! Authentication handlers: signup, login, logout, and the user profile.
//!
//! ```text
//! POST /api/v1/signup {"username":"ada","email":"ada@example.com","password":"Abcdef1"}
//! POST /api/v1/login  {"email":"ada@example.com","password":"Abcdef1"}
//! POST /api/v1/logout
//! GET  /api/v1/userProfile
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, ImageUpload, LoginCredentials, LoginValidationError, SignupForm,
    SignupValidationError, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{FormDescriptor, ImageUploadRequest};
use crate::inbound::http::session::{AuthenticatedUser, SessionContext};
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /api/v1/signup`.
///
/// Fields are optional at the serde level so an absent field reports through
/// the domain's missing-fields validation rather than a deserialiser error.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image: Option<ImageUploadRequest>,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    let message = err.to_string();
    match err {
        SignupValidationError::MissingFields => {
            Error::invalid_request(message).with_details(json!({ "code": "missing_fields" }))
        }
        SignupValidationError::WeakPassword => Error::invalid_request(message)
            .with_details(json!({ "code": "weak_password", "field": "password" })),
        SignupValidationError::InvalidUsername(_) => Error::invalid_request(message)
            .with_details(json!({ "code": "validation_failed", "field": "username" })),
        SignupValidationError::InvalidEmail(_) => Error::invalid_request(message)
            .with_details(json!({ "code": "validation_failed", "field": "email" })),
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::MissingCredentials => Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "missing_credentials" })),
    }
}

/// Describe the signup form.
#[utoipa::path(
    get,
    path = "/api/v1/signup",
    responses((status = 200, description = "Signup form descriptor", body = FormDescriptor)),
    tags = ["auth"],
    operation_id = "signupForm",
    security([])
)]
#[get("/signup")]
pub async fn signup_form() -> web::Json<FormDescriptor> {
    web::Json(FormDescriptor::signup())
}

/// Create an account.
///
/// Establishes no session; the client logs in afterwards.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Missing fields, weak password, or invalid shape", body = Error),
        (status = 409, description = "Username or email already used", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        username,
        email,
        password,
        image,
    } = payload.into_inner();
    let image = image.map(ImageUpload::try_from).transpose()?;
    let form = SignupForm::try_from_parts(
        username.as_deref().unwrap_or_default(),
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
        image,
    )
    .map_err(map_signup_validation_error)?;

    let user = state.auth.signup(form).await?;
    Ok(HttpResponse::Created().json(UserProfile::from(&user)))
}

/// Describe the login form.
#[utoipa::path(
    get,
    path = "/api/v1/login",
    responses((status = 200, description = "Login form descriptor", body = FormDescriptor)),
    tags = ["auth"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form() -> web::Json<FormDescriptor> {
    web::Json(FormDescriptor::login())
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserProfile,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing credentials", body = Error),
        (status = 401, description = "Unknown email or incorrect password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserProfile>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .map_err(map_login_validation_error)?;

    let user = state.auth.login(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(UserProfile::from(&user)))
}

/// Destroy the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session destroyed")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Live profile of the session user.
#[utoipa::path(
    get,
    path = "/api/v1/userProfile",
    responses(
        (status = 200, description = "Profile of the logged-in user", body = UserProfile),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "userProfile"
)]
#[get("/userProfile")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserProfile>> {
    let record = state.auth.profile(&user.0).await?;
    Ok(web::Json(UserProfile::from(&record)))
}
