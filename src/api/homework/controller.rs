use actix_web::{web, HttpRequest, HttpResponse};

use super::{
    dtos::{UploadDto, UploadResponse},
    error::HomeworkError,
    service,
};
use crate::api::auth::{
    controller::user_agent,
    dtos::{ErrorBody, SignatureQuery},
};
use crate::app_context::AppContext;

/// Submit a homework upload with a signed request
///
/// Signed source is `stageId + nickname + imageNames` with the image names
/// sorted before concatenation.
#[utoipa::path(
    post,
    path = "/api/homework/upload",
    tag = "homework",
    params(SignatureQuery),
    request_body = UploadDto,
    responses(
        (status = 200, description = "Upload accepted", body = UploadResponse),
        (status = 400, description = "Signature parameters missing or invalid body", body = ErrorBody),
        (status = 403, description = "Request rejected", body = ErrorBody)
    )
)]
pub(crate) async fn upload(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    query: web::Query<SignatureQuery>,
    web::Json(upload_dto): web::Json<UploadDto>,
) -> Result<HttpResponse, HomeworkError> {
    let data = service::upload(&ctx, query.into_inner(), user_agent(&req), upload_dto).await?;
    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        data,
    }))
}
