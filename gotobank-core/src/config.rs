use crate::{DEFAULT_BATCH_SIZE, DEFAULT_HOST, DEFAULT_ROUTE};
use std::num::NonZeroU32;

/// Where the API lives and the token sent with every call.
///
/// The token is captured once at startup and never refreshed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(token: &str) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            token: token.to_string(),
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }
}

/// Load generator settings. Fixed for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadConfig {
    pub host: String,
    pub route: String,
    pub token: String,
    pub batch_size: NonZeroU32,
}

impl LoadConfig {
    pub fn new(token: &str) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            route: DEFAULT_ROUTE.to_string(),
            token: token.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn route(mut self, route: &str) -> Self {
        self.route = route.to_string();
        self
    }

    pub fn batch_size(mut self, batch_size: NonZeroU32) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.token).host(&self.host)
    }

    /// Render the config as command line flags, so a child process can be started with an
    /// identical copy of it. Values are attached with `=` so ones starting with `-` survive.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            format!("--host={}", self.host),
            format!("--route={}", self.route),
            format!("--token={}", self.token),
            format!("--batch-size={}", self.batch_size),
        ]
    }
}
