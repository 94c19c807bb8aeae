//! Client configuration: credentials, output directory, dotenv loading.
//!
//! Credential precedence is: explicit builder argument, then process
//! environment variable, then a dotenv-style file (`.env` in the working
//! directory, falling back to `~/.genstudio.env`), then nothing. At least
//! one provider credential must resolve or [`ClientConfigBuilder::build`]
//! fails.

use crate::error::{GenStudioError, Result};
use std::env;
use std::path::PathBuf;

/// Environment variable holding the Google API key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_OUTPUT_DIR: &str = "temp";
const HOME_ENV_FILE: &str = ".genstudio.env";

/// Resolved configuration for a [`GenerationClient`](crate::GenerationClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Google API key, if configured.
    pub google_api_key: Option<String>,
    /// OpenAI API key, if configured.
    pub openai_api_key: Option<String>,
    /// Directory generated artifacts are written to.
    pub output_dir: PathBuf,
}

impl ClientConfig {
    /// Creates a new `ClientConfigBuilder`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Resolves configuration from the environment (and dotenv file).
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    google_api_key: Option<String>,
    openai_api_key: Option<String>,
    output_dir: Option<PathBuf>,
    load_env_file: bool,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            google_api_key: None,
            openai_api_key: None,
            output_dir: None,
            load_env_file: true,
        }
    }
}

impl ClientConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Google API key. Falls back to `GOOGLE_API_KEY`.
    pub fn google_api_key(mut self, key: impl Into<String>) -> Self {
        self.google_api_key = Some(key.into());
        self
    }

    /// Sets the OpenAI API key. Falls back to `OPENAI_API_KEY`.
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Sets the output directory. Defaults to a relative `temp` folder.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Skips dotenv file loading; only explicit values and the process
    /// environment are consulted.
    pub fn skip_env_file(mut self) -> Self {
        self.load_env_file = false;
        self
    }

    /// Builds the configuration, resolving credentials.
    ///
    /// Fails with [`GenStudioError::Config`] when no credential resolves
    /// from any provider.
    pub fn build(self) -> Result<ClientConfig> {
        if self.load_env_file {
            load_env_file();
        }

        let google_api_key = resolve_key(self.google_api_key, GOOGLE_API_KEY_VAR);
        let openai_api_key = resolve_key(self.openai_api_key, OPENAI_API_KEY_VAR);

        if google_api_key.is_none() && openai_api_key.is_none() {
            return Err(GenStudioError::Config(format!(
                "no API key configured; set {GOOGLE_API_KEY_VAR} or {OPENAI_API_KEY_VAR}"
            )));
        }

        Ok(ClientConfig {
            google_api_key,
            openai_api_key,
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }
}

fn resolve_key(explicit: Option<String>, var: &str) -> Option<String> {
    explicit
        .or_else(|| env::var(var).ok())
        .filter(|key| !key.trim().is_empty())
}

/// Merges a dotenv file into the process environment. Existing variables
/// win; the file only fills gaps.
fn load_env_file() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(HOME_ENV_FILE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_succeeds() {
        let config = ClientConfig::builder()
            .google_api_key("test-key")
            .skip_env_file()
            .build()
            .unwrap();
        assert_eq!(config.google_api_key.as_deref(), Some("test-key"));
        assert_eq!(config.output_dir, PathBuf::from("temp"));
    }

    #[test]
    fn test_explicit_key_wins_over_environment() {
        // Explicit argument takes precedence regardless of what the
        // environment holds.
        assert_eq!(
            resolve_key(Some("explicit".into()), "GENSTUDIO_TEST_UNSET_VAR"),
            Some("explicit".into())
        );
    }

    #[test]
    fn test_blank_key_is_ignored() {
        assert_eq!(resolve_key(Some("  ".into()), "GENSTUDIO_TEST_UNSET_VAR"), None);
    }

    #[test]
    fn test_no_credential_fails() {
        std::env::remove_var(GOOGLE_API_KEY_VAR);
        std::env::remove_var(OPENAI_API_KEY_VAR);
        let result = ClientConfig::builder().skip_env_file().build();
        assert!(matches!(result, Err(GenStudioError::Config(_))));
    }

    #[test]
    fn test_custom_output_dir() {
        let config = ClientConfig::builder()
            .openai_api_key("sk-test")
            .output_dir("artifacts")
            .skip_env_file()
            .build()
            .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("artifacts"));
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
    }
}
