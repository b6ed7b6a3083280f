use utoipa::OpenApi;

/// API documentation for challenge issuance
#[derive(OpenApi)]
#[openapi(
    paths(crate::api::auth::controller::get_challenge),
    components(schemas(
        crate::api::auth::dtos::ChallengeData,
        crate::api::auth::dtos::ChallengeResponse,
        crate::api::auth::dtos::ErrorBody
    )),
    tags(
        (name = "auth", description = "Signing challenge endpoints")
    )
)]
pub struct AuthApiDoc;

/// API documentation for signed write endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::user::controller::register,
        crate::api::homework::controller::upload
    ),
    components(schemas(
        crate::api::user::dtos::RegisterDto,
        crate::api::user::dtos::AccountDto,
        crate::api::user::dtos::RegisterResponse,
        crate::api::homework::dtos::UploadDto,
        crate::api::homework::dtos::UploadReceipt,
        crate::api::homework::dtos::UploadResponse,
        crate::api::auth::dtos::ErrorBody
    )),
    tags(
        (name = "user", description = "Account registration"),
        (name = "homework", description = "Homework submission")
    )
)]
pub struct SignedActionsApiDoc;

/// Combined API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::auth::controller::get_challenge,
        crate::api::user::controller::register,
        crate::api::homework::controller::upload
    ),
    components(schemas(
        crate::api::auth::dtos::ChallengeData,
        crate::api::auth::dtos::ChallengeResponse,
        crate::api::auth::dtos::ErrorBody,
        crate::api::user::dtos::RegisterDto,
        crate::api::user::dtos::AccountDto,
        crate::api::user::dtos::RegisterResponse,
        crate::api::homework::dtos::UploadDto,
        crate::api::homework::dtos::UploadReceipt,
        crate::api::homework::dtos::UploadResponse
    )),
    tags(
        (name = "auth", description = "Signing challenge endpoints"),
        (name = "user", description = "Account registration"),
        (name = "homework", description = "Homework submission")
    ),
    info(
        title = "Sigauth API",
        description = "Derived-key challenge-response signing service"
    )
)]
pub struct CombinedApiDoc;
