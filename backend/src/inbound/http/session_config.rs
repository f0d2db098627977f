//! Session cookie configuration parsing and validation.
//!
//! Settings come from environment variables read through [`mockable::Env`]
//! so they can be tested without touching the process environment. Debug
//! builds fall back to defaults with a warning; release builds reject
//! missing or invalid values.

pub mod fingerprint;
mod parsing;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

use parsing::{BoolEnvConfig, debug_warn_or_error, parse_bool_env, parse_same_site_value};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Shortest key material accepted at all; `Key::derive_from` needs 32 bytes.
const SESSION_KEY_MIN_LEN_DEBUG: usize = 32;
const SESSION_KEY_MIN_LEN_RELEASE: usize = 64;
const DEFAULT_COOKIE_NAME: &str = "snippets.sid";

const NAME_ENV: &str = "SESSION_NAME";
const SECRET_ENV: &str = "SESSION_SECRET";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    fn min_key_len(self) -> usize {
        match self {
            Self::Debug => SESSION_KEY_MIN_LEN_DEBUG,
            Self::Release => SESSION_KEY_MIN_LEN_RELEASE,
        }
    }
}

/// Where the active key came from; logged at startup next to its fingerprint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeySource {
    Secret,
    File,
    Ephemeral,
}

/// Validated session cookie settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    pub key_source: KeySource,
    pub cookie_name: String,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key from {origin} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        origin: String,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// Key material is taken from `SESSION_SECRET` when set, otherwise from the
/// file named by `SESSION_KEY_FILE`. A random per-process key is used only in
/// debug builds or when `SESSION_ALLOW_EPHEMERAL` is enabled outside release.
///
/// # Examples
///
/// ```rust
/// use snippets::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_SECRET" => Some("s".repeat(64)),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Lax".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert_eq!(settings.cookie_name, "snippets.sid");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_name = cookie_name_from_env(env);
    let cookie_secure = parse_bool_env(
        env,
        mode,
        BoolEnvConfig::new(COOKIE_SECURE_ENV, true),
        |flag, _| Ok(flag),
    )?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = parse_bool_env(
        env,
        mode,
        BoolEnvConfig::new(ALLOW_EPHEMERAL_ENV, false),
        |flag, mode| {
            if flag && !mode.is_debug() {
                Err(SessionConfigError::EphemeralNotAllowed)
            } else {
                Ok(flag)
            }
        },
    )?;
    let (key, key_source) = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        key_source,
        cookie_name,
        cookie_secure,
        same_site,
    })
}

fn cookie_name_from_env<E: Env>(env: &E) -> String {
    match env.string(NAME_ENV) {
        Some(name) if !name.trim().is_empty() => name.trim().to_owned(),
        Some(_) => {
            warn!("blank SESSION_NAME; using default cookie name");
            DEFAULT_COOKIE_NAME.to_owned()
        }
        None => DEFAULT_COOKIE_NAME.to_owned(),
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    match env.string(SAMESITE_ENV) {
        Some(value) => parse_same_site_value(value, mode, cookie_secure, SameSite::Lax),
        None => debug_warn_or_error(
            mode,
            SameSite::Lax,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using Lax"),
        ),
    }
}

fn key_from_bytes(
    bytes: &[u8],
    origin: impl FnOnce() -> String,
    mode: BuildMode,
) -> Result<Key, SessionConfigError> {
    let min_len = mode.min_key_len();
    if bytes.len() < min_len {
        return Err(SessionConfigError::KeyTooShort {
            origin: origin(),
            length: bytes.len(),
            min_len,
        });
    }
    Ok(Key::derive_from(bytes))
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<(Key, KeySource), SessionConfigError> {
    if let Some(secret) = env.string(SECRET_ENV) {
        let secret = Zeroizing::new(secret);
        let key = key_from_bytes(secret.as_bytes(), || SECRET_ENV.to_owned(), mode)?;
        return Ok((key, KeySource::Secret));
    }

    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let key = key_from_bytes(&bytes, || path.display().to_string(), mode);
            bytes.zeroize();
            key.map(|key| (key, KeySource::File))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok((Key::generate(), KeySource::Ephemeral))
            } else {
                Err(SessionConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}
