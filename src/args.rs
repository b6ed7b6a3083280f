use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
pub struct SigauthArgs {
    /// The master secret all per-session signing keys are derived from.
    #[arg(long, env = "SIGAUTH_MASTER_SECRET", hide_env_values = true)]
    pub master_secret: String,

    /// Path of the TOML config file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
}
