use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// YAML pipeline config (corpus, embedder, search). Defaults apply when unset.
    #[serde(default)]
    pub pipeline_config: Option<PathBuf>,

    /// Directory served under `/public`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Page served at `/`
    #[serde(default = "default_index_page")]
    pub index_page: PathBuf,

    /// Load the corpus before accepting requests
    #[serde(default = "default_true")]
    pub preload_corpus: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            cors_allowed_origins: Vec::new(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            pipeline_config: None,
            static_dir: default_static_dir(),
            index_page: default_index_page(),
            preload_corpus: default_true(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.{toml,yaml}` file and
    /// `WORDSIM_SERVER__*` environment variables, in increasing priority.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(
                config::Environment::with_prefix("WORDSIM_SERVER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_index_page() -> PathBuf {
    PathBuf::from("views/index.html")
}
