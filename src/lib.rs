//! Supabase connection configuration
//!
//! A typed loader and validator for the connection descriptor a Supabase
//! client needs: project URL, anon key, and auth options.
//!
//! ## Features
//!
//! - **Validated configuration** - HTTPS endpoint, well-formed credential,
//!   boolean-typed auth options, all checked before a config is handed out
//! - **Layered sources** - environment variables, conventional
//!   `SUPABASE_URL`/`SUPABASE_ANON_KEY` variables, and TOML files
//! - **Explicit profiles** - one file can hold several environments, selected
//!   by name and never guessed
//! - **Redacted secrets** - the anon key never appears in logs, `Debug`
//!   output, or error messages
//!
//! ## Example Configuration
//!
//! ```toml
//! url = "https://buitvqglzmvhdzreqeuj.supabase.co"
//! # anon_key from SUPABASE_ANON_KEY env var
//!
//! [options.auth]
//! auto_refresh_token = true
//! persist_session = true
//! detect_session_in_url = true
//! ```
//!
//! Or with per-environment profiles:
//!
//! ```toml
//! [profiles.production]
//! url = "https://prod-ref.supabase.co"
//!
//! [profiles.staging]
//! url = "https://staging-ref.supabase.co"
//! [profiles.staging.options.auth]
//! persist_session = false
//! ```

pub mod config;
pub mod error;
pub mod util;

// Re-export main types
pub use config::{
    AuthOptions, ConnectionConfig, load_config, load_config_from_str, load_from_value,
};
pub use error::{ConfigError, Result};
pub use util::secret::AnonKey;
