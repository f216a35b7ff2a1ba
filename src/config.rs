//! Configuration constants and utilities for esline
//!
//! Connection settings come from three places, in order of precedence:
//! command-line flags, a named section of the INI profile file, and the
//! built-in defaults below. The result is a [`ReplConfig`] that is built once
//! at startup and handed to the command loop.

use crate::cmd_args::CommandLineArgs;
use crate::repl::models::VerbCase;
use crate::repl::services::BodyMode;
use ini::Ini;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default profile file path for esline
pub const DEFAULT_PROFILE_PATH: &str = "~/.esline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "ESLINE_PROFILE_PATH";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9200;

/// Get the profile file path, checking environment variable first, then falling back to default.
/// A leading `~` is expanded to the home directory.
pub fn get_profile_path() -> String {
    let raw = std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string());
    shellexpand::tilde(&raw).into_owned()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: ini::Error,
    },

    #[error("invalid value '{value}' for '{key}' in profile [{profile}]: {reason}")]
    InvalidValue {
        profile: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Connection defaults read from one profile section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    host: Option<String>,
    port: Option<u16>,
    mode: Option<BodyMode>,
    verb_case: Option<VerbCase>,
    form_header: Option<bool>,
    timeout: Option<Duration>,
}

impl Profile {
    /// Load the named section from the profile file at `path`.
    ///
    /// Returns `Ok(None)` when the file or the section does not exist.
    pub fn load(path: impl AsRef<Path>, name: &str) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Profile file {} not found, using defaults", path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let Some(section) = ini.section(Some(name)) else {
            tracing::debug!("Profile [{name}] not found in {}", path.display());
            return Ok(None);
        };

        let field = |key: &str| section.get(key).map(str::trim);
        let invalid = |key: &str, value: &str, reason: String| ConfigError::InvalidValue {
            profile: name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };

        let mut profile = Profile {
            host: field("host").map(str::to_string),
            ..Default::default()
        };

        if let Some(value) = field("port") {
            profile.port = Some(
                value
                    .parse::<u16>()
                    .map_err(|e| invalid("port", value, e.to_string()))?,
            );
        }
        if let Some(value) = field("mode") {
            profile.mode = Some(value.parse().map_err(|e| invalid("mode", value, e))?);
        }
        if let Some(value) = field("verb_case") {
            profile.verb_case = Some(value.parse().map_err(|e| invalid("verb_case", value, e))?);
        }
        if let Some(value) = field("form_header") {
            profile.form_header =
                Some(parse_bool(value).map_err(|e| invalid("form_header", value, e))?);
        }
        if let Some(value) = field("timeout") {
            let secs = value
                .parse::<u64>()
                .map_err(|e| invalid("timeout", value, e.to_string()))?;
            profile.timeout = Some(Duration::from_secs(secs));
        }

        tracing::info!("Loaded profile [{name}] from {}", path.display());
        Ok(Some(profile))
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn mode(&self) -> Option<BodyMode> {
        self.mode
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

/// Immutable settings for one run of the command loop
#[derive(Debug, Clone, PartialEq)]
pub struct ReplConfig {
    pub host: String,
    pub port: u16,
    pub body_mode: BodyMode,
    pub verb_case: VerbCase,
    pub attach_form_header: bool,
    pub timeout: Option<Duration>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self::for_mode(BodyMode::default())
    }
}

impl ReplConfig {
    /// Defaults for a body mode, with the header setting that mode implies
    pub fn for_mode(body_mode: BodyMode) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            body_mode,
            verb_case: VerbCase::default(),
            attach_form_header: body_mode.default_form_header(),
            timeout: None,
        }
    }

    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Merge flags over the profile over the defaults
    pub fn resolve(args: &CommandLineArgs, profile: Option<&Profile>) -> Self {
        let profile_default = Profile::default();
        let profile = profile.unwrap_or(&profile_default);

        let body_mode = args.mode().or(profile.mode).unwrap_or_default();
        // a mode chosen on the command line brings its own header default
        let attach_form_header = match args.mode() {
            Some(mode) => mode.default_form_header(),
            None => profile
                .form_header
                .unwrap_or_else(|| body_mode.default_form_header()),
        };

        Self {
            host: args
                .host()
                .or(profile.host())
                .unwrap_or(DEFAULT_HOST)
                .to_string(),
            port: args.port().or(profile.port).unwrap_or(DEFAULT_PORT),
            body_mode,
            verb_case: args
                .verb_case()
                .or(profile.verb_case)
                .unwrap_or_default(),
            attach_form_header,
            timeout: args.timeout().map(Duration::from_secs).or(profile.timeout),
        }
    }
}
