use clap::Parser;

use sigauth::app_context::AppContext;
use sigauth::args::SigauthArgs;
use sigauth::config_loader::load_config;
use sigauth::models::crypto::MasterSecret;
use sigauth::web_server::run_actix_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = SigauthArgs::parse();
    let config = load_config(&args.config).map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let master = MasterSecret::from_str(&args.master_secret);
    if master.is_empty() {
        log::error!("Master secret must not be empty");
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty master secret",
        ));
    }

    run_actix_server(AppContext::new(config, master)).await
}
