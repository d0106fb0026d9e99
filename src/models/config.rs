use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Directory holding `default.yaml` and the per-environment overrides.
const CONFIG_DIR: &str = "config";

/// Runtime configuration for the HTTP server.
///
/// Values are layered: `config/default.yaml`, then `config/{APP_ENV}.yaml`
/// when present, then `APP_*` environment variables
/// (e.g. `APP_DATABASE_URL`, `APP_PORT`).
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or URL.
    pub database_url: String,
    /// Interface the server binds to.
    pub address: String,
    pub port: u16,
    /// Secret used to sign session cookies. Must be at least 64 bytes.
    pub secret_key: String,
    /// Cookie domain; empty means host-only cookies.
    #[serde(default)]
    pub domain: String,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .add_source(File::with_name(&format!("{CONFIG_DIR}/default")))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// `address:port` pair passed to `HttpServer::bind`.
    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }
}
