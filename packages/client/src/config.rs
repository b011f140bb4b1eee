//! Client configuration.

use std::{path::PathBuf, time::Duration};

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.chessearn.com";
pub const DEFAULT_POLL_SECS: u64 = 30;
const SOCKET_IO_PATH: &str = "/socket.io/?EIO=4&transport=websocket";
const CREDENTIALS_DIR: &str = ".chessearn";
const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// REST API base, without trailing slash
    pub api_base_url: String,
    /// Full Socket.IO WebSocket endpoint
    pub realtime_url: String,
    pub credentials_path: PathBuf,
    /// Open-game listing refresh interval
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Build a configuration, deriving whatever was not given explicitly.
    pub fn new(
        api_base_url: impl Into<String>,
        realtime_url: Option<String>,
        credentials_path: Option<PathBuf>,
        poll_secs: u64,
    ) -> Result<Self, ClientError> {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        let realtime_url = match realtime_url {
            Some(url) => url,
            None => realtime_endpoint(&api_base_url)?,
        };
        let credentials_path = match credentials_path {
            Some(path) => path,
            None => default_credentials_path()?,
        };
        if poll_secs == 0 {
            return Err(ClientError::Config(
                "poll interval must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            realtime_url,
            credentials_path,
            poll_interval: Duration::from_secs(poll_secs),
        })
    }
}

/// Socket.IO endpoint served next to the REST API: `http` becomes `ws`,
/// `https` becomes `wss`.
pub fn realtime_endpoint(api_base_url: &str) -> Result<String, ClientError> {
    let base = api_base_url.trim_end_matches('/');
    let rest = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        return Err(ClientError::Config(format!(
            "API URL must start with http:// or https:// (got '{}')",
            api_base_url
        )));
    };
    Ok(format!("{}{}", rest, SOCKET_IO_PATH))
}

/// `$HOME/.chessearn/credentials.json`
pub fn default_credentials_path() -> Result<PathBuf, ClientError> {
    let home = std::env::var_os("HOME").ok_or_else(|| {
        ClientError::Config("HOME is not set; pass --credentials explicitly".to_string())
    })?;
    Ok(PathBuf::from(home).join(CREDENTIALS_DIR).join(CREDENTIALS_FILE))
}
