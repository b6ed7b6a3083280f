use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use rustls::{pki_types::PrivateKeyDer, ServerConfig};
use rustls_pemfile::{certs, pkcs8_private_keys};
use std::{
    fs::File,
    io::{self, BufReader},
};

use crate::api::{self, auth::dtos::ErrorBody};
use crate::app_context::AppContext;
use crate::config_loader::Tls;

// Routes shared by the server and the HTTP tests
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api::api_module())
        .service(api::docs::api_docs_module());
}

// Malformed query strings and bodies answer 400 with the usual JSON shape
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let body = ErrorBody::new(err.to_string());
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(err.to_string());
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

pub(crate) fn app_data(ctx: web::Data<AppContext>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let limit = ctx.config.json_payload_limit;
        cfg.app_data(ctx)
            .app_data(json_config(limit))
            .app_data(query_config());
    }
}

pub async fn run_actix_server(ctx: AppContext) -> io::Result<()> {
    let ctx = web::Data::new(ctx);
    ctx.signing.spawn_sweeper();

    let server_config = ctx.config.server.clone();
    let bind_addr = (server_config.host.clone(), server_config.port);

    let server = HttpServer::new({
        let ctx = ctx.clone();
        move || {
            App::new()
                // enable logger
                .wrap(middleware::Logger::default())
                .wrap(Cors::permissive())
                .configure(app_data(ctx.clone()))
                .configure(configure)
        }
    });

    match &server_config.tls {
        Some(tls) => {
            let tls_config = load_rustls_config(tls)?;
            log::info!(
                "starting HTTPS server at https://{}:{}",
                server_config.host,
                server_config.port
            );
            server.bind_rustls_0_23(bind_addr, tls_config)?.run().await
        }
        None => {
            log::info!(
                "starting HTTP server at http://{}:{}",
                server_config.host,
                server_config.port
            );
            server.bind(bind_addr)?.run().await
        }
    }
}

fn load_rustls_config(tls: &Tls) -> io::Result<ServerConfig> {
    // a provider may already be installed by another component
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // init server config builder with safe defaults
    let config = ServerConfig::builder().with_no_client_auth();

    // load TLS key/cert files
    let cert_file = &mut BufReader::new(File::open(&tls.cert_file)?);
    let key_file = &mut BufReader::new(File::open(&tls.key_file)?);

    // convert files to key/cert objects
    let cert_chain = certs(cert_file).collect::<Result<Vec<_>, _>>()?;
    let mut keys = pkcs8_private_keys(key_file)
        .map(|key| key.map(PrivateKeyDer::Pkcs8))
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Could not locate PKCS 8 private keys in {}", tls.key_file),
        ));
    }

    config
        .with_single_cert(cert_chain, keys.remove(0))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
