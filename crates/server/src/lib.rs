//! wordsim server: HTTP API for word suggestions.
//!
//! Wraps [`wordsim::SuggestionService`] in an axum router with request ids,
//! structured request logging, CORS, compression, a global request timeout
//! and Prometheus metrics.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /{phrase}` - Suggestions for a phrase; mark the word with `[word]`
//! - `GET /api/v1/suggest?q=..&k=..&format=scored|words` - Same, query-string form
//! - `GET /api/v1/corpus` - Corpus statistics
//! - `POST /api/v1/corpus/reload` - Re-read the corpus files
//! - `GET /api/v1/info` - Service information
//! - `GET /health`, `GET /ready` - Liveness and readiness probes
//! - `GET /metrics` - Prometheus metrics
//! - `GET /`, `GET /public/*` - Static page and assets
//!
//! Suggestions come back as
//! `{"missingWord": "cat", "suggestions": [{"word": "dog", "score": 0.99, "percent": 99.39}]}`.
//! Errors come back as `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
