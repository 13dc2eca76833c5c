//! Configuration types for supaconf
//!
//! This module defines the validated connection descriptor handed to the
//! Supabase client, plus the auth options record with its documented
//! defaults.

use crate::util::secret::AnonKey;
use serde::Deserialize;
use url::Url;

/// A validated, immutable connection descriptor.
///
/// The loader in [`crate::config::loader`] only constructs these after
/// every validation rule has passed. There is no partially-valid state:
/// either all fields are present and well-formed, or loading failed.
///
/// The value is read-only and `Send + Sync`; share it freely across
/// concurrent readers without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Project endpoint, guaranteed absolute and HTTPS with a host.
    pub endpoint_url: Url,

    /// Anon (public) API key, treated as an opaque secret.
    pub anon_key: AnonKey,

    /// Client auth behavior flags.
    pub auth: AuthOptions,
}

impl ConnectionConfig {
    /// Host of the validated endpoint.
    ///
    /// Safe to log, unlike the key.
    pub fn host(&self) -> &str {
        // Validation rejects host-less URLs before construction.
        self.endpoint_url.host_str().unwrap_or_default()
    }

    /// Project reference extracted from a `<ref>.supabase.co` host.
    ///
    /// Returns `None` for self-hosted or custom-domain endpoints.
    pub fn project_ref(&self) -> Option<&str> {
        let host = self.host();
        host.strip_suffix(".supabase.co")
            .filter(|prefix| !prefix.is_empty() && !prefix.contains('.'))
    }
}

/// Auth behavior flags forwarded to the Supabase client.
///
/// Missing fields default to `true`. `persist_session` is the one flag
/// commonly set to `false`, for session-less server-side contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthOptions {
    /// Refresh the access token automatically before it expires
    #[serde(alias = "auto_refresh_token")]
    pub auto_refresh_token: bool,

    /// Persist the session across restarts
    #[serde(alias = "persist_session")]
    pub persist_session: bool,

    /// Detect OAuth/magic-link sessions in the redirect URL
    #[serde(alias = "detect_session_in_url")]
    pub detect_session_in_url: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            auto_refresh_token: true,
            persist_session: true,
            detect_session_in_url: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> ConnectionConfig {
        ConnectionConfig {
            endpoint_url: Url::parse(url).unwrap(),
            anon_key: AnonKey::new("abc.def.ghi"),
            auth: AuthOptions::default(),
        }
    }

    #[test]
    fn test_default_auth_options_all_true() {
        let options = AuthOptions::default();
        assert!(options.auto_refresh_token);
        assert!(options.persist_session);
        assert!(options.detect_session_in_url);
    }

    #[test]
    fn test_deserialize_camel_case_and_snake_case() {
        let json = r#"{"autoRefreshToken": false, "persist_session": false}"#;
        let options: AuthOptions = serde_json::from_str(json).unwrap();
        assert!(!options.auto_refresh_token);
        assert!(!options.persist_session);
        assert!(options.detect_session_in_url); // default applied
    }

    #[test]
    fn test_project_ref_from_hosted_endpoint() {
        let config = config_for("https://buitvqglzmvhdzreqeuj.supabase.co");
        assert_eq!(config.host(), "buitvqglzmvhdzreqeuj.supabase.co");
        assert_eq!(config.project_ref(), Some("buitvqglzmvhdzreqeuj"));
    }

    #[test]
    fn test_project_ref_absent_for_custom_domain() {
        let config = config_for("https://db.example.com");
        assert_eq!(config.project_ref(), None);

        // Nested subdomains are not a project ref
        let config = config_for("https://a.b.supabase.co");
        assert_eq!(config.project_ref(), None);
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = config_for("https://buitvqglzmvhdzreqeuj.supabase.co");
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("abc.def.ghi"));
        assert!(debug_output.contains("[REDACTED]"));
    }
}
