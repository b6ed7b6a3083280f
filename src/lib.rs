pub mod accounts;
pub(crate) mod api;
pub mod app_context;
pub mod args;
pub mod config_loader;
pub mod models;
pub mod signing;
pub mod web_server;
