//! spotyauth library
//!
//! A small web server that walks the Spotify OAuth 2.0 authorization-code
//! flow, keeps the resulting tokens in an in-memory per-browser session, and
//! forwards one authenticated read (the user's playlists) to the Web API.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for `/`, `/login`, `/callback`, `/playlists`,
//!   `/refresh-token` and `/health`
//! - `config` - Configuration loading and validation
//! - `error` - Error types and their HTTP mapping
//! - `management` - Session records and the token lifecycle
//! - `server` - Router construction and the listener
//! - `spotify` - Outbound client for the accounts service and Web API
//! - `telemetry` - Tracing subscriber setup
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotyauth::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotyauth::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config, false).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod telemetry;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges (startup, serving) where any error is fatal and
/// only needs to be reported. Request-level failures use [`error::AppError`].
///
/// # Example
///
/// ```
/// use spotyauth::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a console status line with a blue bullet.
///
/// The colored macros below are for the operator watching the terminal
/// (startup, listening address, fatal configuration). Request handling logs
/// through `tracing` instead.
///
/// ```
/// info!("Loaded configuration from {}", path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a console status line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line to stderr and exits with status 1.
///
/// Only for startup failures; the expression has type `!` so it can end a
/// `match` arm that would otherwise produce a value.
///
/// ```
/// let config = match Config::from_env() {
///     Ok(c) => c,
///     Err(e) => error!("Invalid configuration: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a console warning line with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
