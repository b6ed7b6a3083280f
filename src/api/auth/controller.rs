use actix_web::{http::header, web, HttpRequest, HttpResponse};

use super::{
    dtos::{ChallengeResponse, ErrorBody},
    error::AuthError,
    service,
};
use crate::app_context::AppContext;

pub(crate) fn user_agent(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
}

/// Issue a signing challenge
///
/// Returns a fresh `{timestamp, nonce, sessionId, derivedKey}` tuple. The
/// client signs exactly one write request with it. Any `_t` query parameter
/// is a cache buster and is ignored.
#[utoipa::path(
    get,
    path = "/api/auth/challenge",
    tag = "auth",
    params(
        ("_t" = Option<String>, Query, description = "Cache buster, ignored")
    ),
    responses(
        (status = 200, description = "Challenge issued", body = ChallengeResponse),
        (status = 500, description = "Challenge store unavailable", body = ErrorBody)
    )
)]
pub(crate) async fn get_challenge(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AuthError> {
    let data = service::issue_challenge(ctx.into_inner(), user_agent(&req)).await?;
    Ok(HttpResponse::Ok()
        .insert_header(header::CacheControl(vec![header::CacheDirective::NoStore]))
        .json(ChallengeResponse {
            success: true,
            data,
        }))
}
