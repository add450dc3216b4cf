use std::env;
use std::fmt;

use super::openai::{OpenAiModel, OPENAI_API_KEY, OPENAI_HOST};
use crate::errors::{Error, Result};

pub const OPENAI_API_HOST: &str = "OPENAI_API_HOST";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const PARLEY_VERBOSE: &str = "PARLEY_VERBOSE";

pub trait ProviderConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Read an environment variable, falling back to `default` when it is absent.
    ///
    /// A required variable that is absent or empty is reported as a missing credential,
    /// since that is the only kind of variable a provider cannot start without.
    fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
        match env::var(key) {
            Ok(value) if required && value.trim().is_empty() => {
                Err(Error::MissingCredential(key.to_string()))
            }
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) if !required => Ok(default),
            Err(env::VarError::NotPresent) => Err(Error::MissingCredential(key.to_string())),
            Err(e) => Err(Error::Config(format!("{}: {}", key, e))),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: OpenAiModel,
    /// Echo prompts and replies to the trace sink
    pub verbose: bool,
    /// Reject transcripts carrying roles the backend does not know instead of
    /// dropping those entries
    pub strict_roles: bool,
}

impl OpenAiProviderConfig {
    pub fn new<S: Into<String>>(api_key: S, model: OpenAiModel) -> Self {
        Self {
            host: OPENAI_HOST.to_string(),
            api_key: api_key.into(),
            model,
            verbose: false,
            strict_roles: false,
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_strict_roles(mut self, strict_roles: bool) -> Self {
        self.strict_roles = strict_roles;
        self
    }
}

impl fmt::Debug for OpenAiProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProviderConfig")
            .field("host", &self.host)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("verbose", &self.verbose)
            .field("strict_roles", &self.strict_roles)
            .finish()
    }
}

impl ProviderConfig for OpenAiProviderConfig {
    fn from_env() -> Result<Self> {
        let api_key = Self::get_env(OPENAI_API_KEY, true, None)?
            .ok_or_else(|| Error::MissingCredential(OPENAI_API_KEY.to_string()))?;

        let host = Self::get_env(OPENAI_API_HOST, false, None)?
            .unwrap_or_else(|| OPENAI_HOST.to_string());

        let model = match Self::get_env(OPENAI_MODEL, false, None)? {
            Some(name) => name
                .parse::<OpenAiModel>()
                .map_err(|_| Error::Config(format!("unknown OpenAI model '{}'", name)))?,
            None => OpenAiModel::default(),
        };

        let verbose = Self::get_env(PARLEY_VERBOSE, false, None)?
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Ok(Self::new(api_key, model)
            .with_host(host)
            .with_verbose(verbose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [OPENAI_API_KEY, OPENAI_API_HOST, OPENAI_MODEL, PARLEY_VERBOSE] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = OpenAiProviderConfig::new("sk-secret-value", OpenAiModel::Gpt4);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret-value"));
        assert!(printed.contains("[REDACTED]"));
        assert!(printed.contains("Gpt4"));
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        let err = OpenAiProviderConfig::from_env().unwrap_err();
        assert!(matches!(err, Error::MissingCredential(ref key) if key == OPENAI_API_KEY));

        env::set_var(OPENAI_API_KEY, "");
        let err = OpenAiProviderConfig::from_env().unwrap_err();
        assert!(matches!(err, Error::MissingCredential(_)));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_reads_optional_settings() {
        clear_env();
        env::set_var(OPENAI_API_KEY, "sk-test");
        env::set_var(OPENAI_API_HOST, "http://localhost:9999");
        env::set_var(OPENAI_MODEL, "gpt-4o");
        env::set_var(PARLEY_VERBOSE, "true");

        let config = OpenAiProviderConfig::from_env().unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.host, "http://localhost:9999");
        assert_eq!(config.model, OpenAiModel::Gpt4o);
        assert!(config.verbose);
        assert!(!config.strict_roles);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_model() {
        clear_env();
        env::set_var(OPENAI_API_KEY, "sk-test");
        env::set_var(OPENAI_MODEL, "not-a-model");

        let err = OpenAiProviderConfig::from_env().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        env::set_var(OPENAI_API_KEY, "sk-test");

        let config = OpenAiProviderConfig::from_env().unwrap();
        assert_eq!(config.host, OPENAI_HOST);
        assert_eq!(config.model, OpenAiModel::default());
        assert!(!config.verbose);
        clear_env();
    }
}
