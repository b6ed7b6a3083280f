use std::sync::Arc;

use crate::accounts::AccountRegistry;
use crate::config_loader::Config;
use crate::models::clock::{Clock, SystemClock};
use crate::models::crypto::MasterSecret;
use crate::signing::SigningService;

pub struct AppContext {
    pub config: Config,
    pub signing: Arc<SigningService>,
    pub accounts: AccountRegistry,
}

impl AppContext {
    pub fn new(config: Config, master: MasterSecret) -> Self {
        Self::with_clock(config, master, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, master: MasterSecret, clock: Arc<dyn Clock>) -> Self {
        let signing = Arc::new(SigningService::new(&config.signing, master, clock));
        Self {
            config,
            signing,
            accounts: AccountRegistry::new(),
        }
    }
}
