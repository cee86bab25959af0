// crates/patterns-contract/src/config/env.rs
// ============================================================================
// Module: Contract Environment
// Description: Environment-backed configuration for contract checks.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid or empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default endpoint: the sandbox reached over loopback.
pub const DEFAULT_BASE_URL: &str = "https://127.0.0.1/patterns/1.0";

/// Default `Host` header: the production virtual host the sandbox answers as.
pub const DEFAULT_HOST: &str = "api.wordpress.org";

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for contract-check configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractEnv {
    /// Optional endpoint base URL override.
    BaseUrl,
    /// Optional `Host` header override.
    Host,
    /// Verify the certificate hostname (`true`/`false` or `1`/`0`).
    VerifyHostname,
    /// Optional PEM bundle with extra trusted roots.
    CaFile,
    /// Optional request timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional artifact run root override.
    RunRoot,
}

impl ContractEnv {
    /// Every recognized environment key.
    pub const ALL: [Self; 6] = [
        Self::BaseUrl,
        Self::Host,
        Self::VerifyHostname,
        Self::CaFile,
        Self::TimeoutSeconds,
        Self::RunRoot,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "PATTERNS_CONTRACT_BASE_URL",
            Self::Host => "PATTERNS_CONTRACT_HOST",
            Self::VerifyHostname => "PATTERNS_CONTRACT_VERIFY_HOSTNAME",
            Self::CaFile => "PATTERNS_CONTRACT_CA_FILE",
            Self::TimeoutSeconds => "PATTERNS_CONTRACT_TIMEOUT_SEC",
            Self::RunRoot => "PATTERNS_CONTRACT_RUN_ROOT",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Value is not valid UTF-8.
    #[error("{0} must be valid UTF-8")]
    NotUtf8(&'static str),
    /// Value is set but empty or whitespace.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// Value failed validation.
    #[error("{name} {reason}")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// Validation failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed contract-check configuration derived from environment variables.
///
/// # Invariants
/// - `base_url` parses as an `http` or `https` URL.
/// - `verify_hostname = false` only affects clients built from this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Endpoint base URL; request suffixes are appended verbatim.
    pub base_url: String,
    /// `Host` header sent with every request.
    pub host: String,
    /// Whether the certificate must be valid for the connected hostname.
    pub verify_hostname: bool,
    /// Optional PEM bundle with extra trusted roots.
    pub ca_file: Option<PathBuf>,
    /// Optional request timeout override.
    pub timeout: Option<Duration>,
    /// Optional artifact run root override.
    pub run_root: Option<PathBuf>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            verify_hostname: false,
            ca_file: None,
            timeout: None,
            run_root: None,
        }
    }
}

impl ContractConfig {
    /// Loads configuration from environment variables, falling back to the
    /// sandbox defaults for unset keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an environment value is not valid UTF-8,
    /// is empty, or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url = read_env_nonempty(ContractEnv::BaseUrl)?.unwrap_or(defaults.base_url);
        validate_base_url(&base_url)?;
        let host = read_env_nonempty(ContractEnv::Host)?.unwrap_or(defaults.host);
        let verify_hostname = parse_bool_env(
            ContractEnv::VerifyHostname.as_str(),
            read_env_nonempty(ContractEnv::VerifyHostname)?,
        )?;
        let ca_file = read_env_nonempty(ContractEnv::CaFile)?.map(PathBuf::from);
        if let Some(path) = &ca_file
            && !path.is_file()
        {
            return Err(ConfigError::Invalid {
                name: ContractEnv::CaFile.as_str(),
                reason: format!("must point to a readable file: {}", path.display()),
            });
        }
        let timeout = read_env_nonempty(ContractEnv::TimeoutSeconds)?
            .map(|value| parse_timeout_seconds(ContractEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let run_root = read_env_nonempty(ContractEnv::RunRoot)?.map(PathBuf::from);
        Ok(Self {
            base_url,
            host,
            verify_hostname,
            ca_file,
            timeout,
            run_root,
        })
    }

    /// Returns a config targeting `base_url` with every other field defaulted.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(key: ContractEnv) -> Result<Option<String>, ConfigError> {
    std::env::var_os(key.as_str()).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::NotUtf8(key.as_str()))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(key: ContractEnv) -> Result<Option<String>, ConfigError> {
    match read_env_strict(key)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(key.as_str())),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Ensures the base URL parses and uses an HTTP scheme.
///
/// # Errors
///
/// Returns an error when the URL is malformed or uses another scheme.
fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let name = ContractEnv::BaseUrl.as_str();
    let url = Url::parse(raw).map_err(|err| ConfigError::Invalid {
        name,
        reason: format!("must be a valid URL: {err}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid {
            name,
            reason: format!("must use http or https, got {scheme}"),
        }),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
fn parse_timeout_seconds(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: "must be a positive integer number of seconds".to_string(),
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable; unset means `false`.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(ConfigError::Invalid {
        name,
        reason: "must be 1, 0, true, or false".to_string(),
    })
}
