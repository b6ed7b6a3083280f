use crate::api::openapi::{AuthApiDoc, CombinedApiDoc, SignedActionsApiDoc};
use actix_web::{web, HttpResponse, Scope};
use utoipa::OpenApi;

pub(crate) fn api_docs_module() -> Scope {
    web::scope("/api-docs")
        .route("/openapi.json", web::get().to(openapi_json))
        .route("/auth/openapi.json", web::get().to(auth_openapi_json))
        .route("/signed/openapi.json", web::get().to(signed_openapi_json))
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(CombinedApiDoc::openapi())
}

async fn auth_openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(AuthApiDoc::openapi())
}

async fn signed_openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(SignedActionsApiDoc::openapi())
}
