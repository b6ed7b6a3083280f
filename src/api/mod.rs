use actix_web::{web, Scope};

pub(crate) mod auth;
pub(crate) mod docs;
pub(crate) mod homework;
pub(crate) mod openapi;
pub(crate) mod user;


// Everything under `/api`
pub(crate) fn api_module() -> Scope {
    web::scope("/api")
        .service(auth::auth_module())
        .service(user::user_module())
        .service(homework::homework_module())
}
