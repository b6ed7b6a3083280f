use actix_web::{web, Scope};
pub(crate) mod controller;
pub(crate) mod dtos;
pub(crate) mod error;
mod service;

pub(crate) fn user_module() -> Scope {
    web::scope("/user").route("/register", web::post().to(controller::register))
}
