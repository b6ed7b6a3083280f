use actix_web::{web, Scope};
pub(crate) mod controller;
pub(crate) mod dtos;
mod error;
mod service;

pub(crate) fn homework_module() -> Scope {
    web::scope("/homework").route("/upload", web::post().to(controller::upload))
}
