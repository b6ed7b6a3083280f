use actix_web::{web, Scope};
pub(crate) mod controller;
pub(crate) mod dtos;
pub(crate) mod error;
pub(crate) mod service;

pub(crate) fn auth_module() -> Scope {
    web::scope("/auth").route("/challenge", web::get().to(controller::get_challenge))
}
