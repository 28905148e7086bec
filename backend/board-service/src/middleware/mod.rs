/// Access gate for board-service
///
/// Decides who the caller is before any mutating store operation. The token
/// is read from the `token` cookie, falling back to an
/// `Authorization: Bearer` header. Handlers opt in by taking an
/// [`AuthenticatedUser`] argument; routes that don't are public.
use crate::error::{AppError, Result};
use crate::metrics::AUTH_FAILURES_TOTAL;
use crate::AppState;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use crypto_core::{TokenAuthority, TokenError};
use std::future::{ready, Ready};

/// Name of the session cookie set by `/signin`
pub const TOKEN_COOKIE: &str = "token";

/// Username proven by a valid session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Pull the bearer token out of the request, if one was presented.
///
/// `Err(BadRequest)` when a carrier header is unreadable (non-UTF-8 `Cookie`,
/// non-Bearer `Authorization`); `Ok(None)` when no token was sent at all.
/// Individual cookie pairs that fail to parse are skipped.
pub fn extract_token(req: &HttpRequest) -> Result<Option<String>> {
    {
        let cookies = req
            .cookies()
            .map_err(|e| AppError::BadRequest(format!("Malformed cookie header: {}", e)))?;

        if let Some(cookie) = cookies.iter().find(|c| c.name() == TOKEN_COOKIE) {
            return Ok(Some(cookie.value().to_string()));
        }
    }

    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::BadRequest("Malformed Authorization header".to_string()))?;

    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::BadRequest("Invalid Authorization header format".to_string())
    })?;

    Ok(Some(token.trim().to_string()))
}

/// Resolve the caller's username or reject the request.
///
/// Bad signatures, malformed tokens and expired tokens are all reported as
/// the same `Unauthorized` error.
pub fn authenticate(req: &HttpRequest, tokens: &TokenAuthority) -> Result<String> {
    let token = extract_token(req)
        .map_err(|e| {
            AUTH_FAILURES_TOTAL.with_label_values(&["bad_carrier"]).inc();
            e
        })?
        .ok_or_else(|| {
            AUTH_FAILURES_TOTAL.with_label_values(&["missing"]).inc();
            AppError::Unauthorized("Missing session token".to_string())
        })?;

    match tokens.verify(&token) {
        Ok(claims) => Ok(claims.username),
        Err(err) => {
            let reason = match err {
                TokenError::Expired => "expired",
                _ => "invalid",
            };
            tracing::debug!(reason, "Rejected session token");
            AUTH_FAILURES_TOTAL.with_label_values(&[reason]).inc();
            Err(err.into())
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AppState>>() {
            Some(state) => authenticate(req, &state.tokens).map(AuthenticatedUser),
            None => Err(AppError::Internal(
                "application state not configured".to_string(),
            )),
        };
        ready(result)
    }
}
