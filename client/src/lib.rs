use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tracing::{info, warn};
use url::Url;

use self::error::{Error, Result};
use self::gateway::ApiClient;
use self::storage::{FileStorage, MemoryStorage, SessionStorage};
use self::store::SessionStore;

pub mod api;
pub mod error;
pub mod gateway;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod store;

const DATA_DIR_NAME: &str = ".party-manager";

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[arg(
        long,
        env = "PARTY_API_URL",
        default_value = "http://ggustac-002-site2.htempurl.com/api"
    )]
    pub api_url: Url,

    #[arg(long, help = "Directory holding the persisted session", env = "PARTY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Request timeout in seconds", env = "PARTY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, help = "Keep the session in memory only")]
    pub ephemeral: bool,
}

impl Config {
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| home::home_dir().map(|home| home.join(DATA_DIR_NAME)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything a screen needs: the remote API and the session store. Built
/// once at startup and handed down explicitly.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: Arc<SessionStore>,
}

impl AppContext {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            api,
            session: Arc::new(session),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api = ApiClient::new(&config.api_url, config.timeout())?;
        let storage: Arc<dyn SessionStorage> = match (config.ephemeral, config.data_dir()) {
            (false, Some(dir)) => {
                info!(data_dir = %dir.display(), "Using file session storage");
                Arc::new(FileStorage::new(dir))
            }
            (false, None) => {
                warn!("No home directory found, session will not survive restarts");
                Arc::new(MemoryStorage::new())
            }
            (true, _) => Arc::new(MemoryStorage::new()),
        };
        Ok(Self::new(api, SessionStore::open(storage)))
    }

    /// `(user_id, token)` of the current session, or `NotLoggedIn`.
    pub fn credentials(&self) -> Result<(i64, String)> {
        let session = self.session.read();
        session
            .credentials()
            .map(|(user_id, token)| (user_id, token.to_owned()))
            .ok_or(Error::NotLoggedIn)
    }
}
