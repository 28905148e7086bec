/// Auth handlers - account registration and session issuance
use crate::credentials::Registration;
use crate::error::{AppError, Result};
use crate::metrics::{ACCOUNTS_REGISTERED_TOTAL, AUTH_FAILURES_TOTAL};
use crate::middleware::TOKEN_COOKIE;
use crate::models::{CredentialsRequest, SignInResponse};
use crate::AppState;
use actix_web::cookie::{time::OffsetDateTime, Cookie};
use actix_web::{web, HttpResponse};

/// Register an account
///
/// Hashing runs on the blocking pool. Re-registering a username replaces its
/// password.
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    let CredentialsRequest { username, password } = payload.into_inner();

    let registry = state.clone();
    let name = username.clone();
    let outcome = web::block(move || registry.credentials.register(&name, &password)).await??;

    let label = match outcome {
        Registration::Created => "created",
        Registration::Replaced => "replaced",
    };
    ACCOUNTS_REGISTERED_TOTAL.with_label_values(&[label]).inc();
    tracing::info!(username = %username, outcome = label, "Account registered");

    Ok(HttpResponse::Created().finish())
}

/// Verify credentials and hand out a session token
///
/// The token is set as the `token` cookie, expiring with the token, and also
/// returned in the body.
pub async fn signin(
    state: web::Data<AppState>,
    payload: web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    let CredentialsRequest { username, password } = payload.into_inner();

    let registry = state.clone();
    let name = username.clone();
    let valid = web::block(move || registry.credentials.verify(&name, &password)).await??;

    if !valid {
        AUTH_FAILURES_TOTAL
            .with_label_values(&["bad_credentials"])
            .inc();
        tracing::warn!(username = %username, "Sign-in rejected");
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let issued = state.tokens.issue(&username)?;

    let expires = OffsetDateTime::from_unix_timestamp(issued.expires_at.timestamp())
        .map_err(|e| AppError::Internal(format!("Cookie expiry out of range: {}", e)))?;
    let cookie = Cookie::build(TOKEN_COOKIE, issued.token.clone())
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .expires(expires)
        .finish();

    tracing::info!(username = %username, "Session issued");

    Ok(HttpResponse::Ok().cookie(cookie).json(SignInResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
