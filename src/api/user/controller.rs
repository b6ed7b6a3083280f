use actix_web::{web, HttpRequest, HttpResponse};

use super::{
    dtos::{RegisterDto, RegisterResponse},
    error::UserError,
    service,
};
use crate::api::auth::{
    controller::user_agent,
    dtos::{ErrorBody, SignatureQuery},
};
use crate::app_context::AppContext;

/// Register an account with a signed request
///
/// The query string carries the signature over `email + nickname + password`
/// made with the derived key of a challenge. Each challenge authorizes one
/// registration.
#[utoipa::path(
    post,
    path = "/api/user/register",
    tag = "user",
    params(SignatureQuery),
    request_body = RegisterDto,
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Signature parameters missing or invalid body", body = ErrorBody),
        (status = 403, description = "Request rejected", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub(crate) async fn register(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    query: web::Query<SignatureQuery>,
    web::Json(register_dto): web::Json<RegisterDto>,
) -> Result<HttpResponse, UserError> {
    let account = service::register(
        &ctx,
        query.into_inner(),
        user_agent(&req),
        register_dto,
    )
    .await?;
    Ok(HttpResponse::Ok().json(RegisterResponse {
        success: true,
        message: "Registered".to_string(),
        user: account.into(),
    }))
}
