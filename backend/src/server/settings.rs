//! Application settings loaded via OrthoConfig.
//!
//! Values come from the command line or `SNIPPETS_*` environment variables.
//! Every field is optional; accessors apply the defaults.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use snippets::inbound::http::{BasePath, ErrorPageMode};
use snippets::outbound::security::{BcryptCostError, BcryptPasswordHasher, DEFAULT_BCRYPT_COST};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Settings rejected after loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind host {host:?}: {source}")]
    BindHost {
        host: String,
        source: std::net::AddrParseError,
    },
    #[error("unknown environment {value:?}; expected development or production")]
    Environment { value: String },
    #[error(transparent)]
    BcryptCost(#[from] BcryptCostError),
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SNIPPETS")]
pub struct AppSettings {
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Interface address to bind.
    pub bind_host: Option<String>,
    /// Path prefix every page is mounted under.
    pub base_url: Option<String>,
    /// `development` or `production`; selects the error page policy.
    pub environment: Option<String>,
    /// PostgreSQL connection string; in-memory storage when absent.
    pub database_url: Option<String>,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST).trim();
        let ip: IpAddr = host.parse().map_err(|source| SettingsError::BindHost {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    pub fn base_path(&self) -> BasePath {
        self.base_url
            .as_deref()
            .map_or_else(BasePath::default, BasePath::new)
    }

    pub fn error_page_mode(&self) -> Result<ErrorPageMode, SettingsError> {
        match self.environment.as_deref() {
            None => Ok(ErrorPageMode::for_build()),
            Some(raw) => ErrorPageMode::parse(raw).ok_or_else(|| SettingsError::Environment {
                value: raw.to_owned(),
            }),
        }
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn password_hasher(&self) -> Result<BcryptPasswordHasher, SettingsError> {
        let cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        Ok(BcryptPasswordHasher::new(cost)?)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "SNIPPETS_PORT",
        "SNIPPETS_BIND_HOST",
        "SNIPPETS_BASE_URL",
        "SNIPPETS_ENVIRONMENT",
        "SNIPPETS_DATABASE_URL",
        "SNIPPETS_BCRYPT_COST",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("snippets")]).expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse().expect("socket address")
        );
        assert_eq!(settings.base_path().as_str(), "/");
        assert_eq!(
            settings.error_page_mode().expect("mode"),
            ErrorPageMode::for_build()
        );
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.password_hasher().expect("hasher").cost(),
            DEFAULT_BCRYPT_COST
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SNIPPETS_PORT", Some("3000".to_owned())),
            ("SNIPPETS_BIND_HOST", Some("127.0.0.1".to_owned())),
            ("SNIPPETS_BASE_URL", Some("board".to_owned())),
            ("SNIPPETS_ENVIRONMENT", Some("development".to_owned())),
            (
                "SNIPPETS_DATABASE_URL",
                Some("postgres://localhost/snippets".to_owned()),
            ),
            ("SNIPPETS_BCRYPT_COST", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:3000".parse().expect("socket address")
        );
        assert_eq!(settings.base_path().as_str(), "/board/");
        assert_eq!(
            settings.error_page_mode().expect("mode"),
            ErrorPageMode::Development
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/snippets")
        );
        assert_eq!(settings.password_hasher().expect("hasher").cost(), 4);
    }

    fn blank_settings() -> AppSettings {
        AppSettings {
            port: None,
            bind_host: None,
            base_url: None,
            environment: None,
            database_url: None,
            bcrypt_cost: None,
        }
    }

    #[rstest]
    fn rejects_unknown_environment() {
        let settings = AppSettings {
            environment: Some("staging".to_owned()),
            ..blank_settings()
        };
        assert!(matches!(
            settings.error_page_mode(),
            Err(SettingsError::Environment { .. })
        ));
    }

    #[rstest]
    fn rejects_unparseable_bind_host() {
        let settings = AppSettings {
            bind_host: Some("not a host".to_owned()),
            ..blank_settings()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindHost { .. })
        ));
    }

    #[rstest]
    #[case(3)]
    #[case(32)]
    fn rejects_out_of_range_cost(#[case] cost: u32) {
        let settings = AppSettings {
            bcrypt_cost: Some(cost),
            ..blank_settings()
        };
        assert!(matches!(
            settings.password_hasher(),
            Err(SettingsError::BcryptCost(_))
        ));
    }

    #[rstest]
    fn blank_database_url_means_memory() {
        let settings = AppSettings {
            database_url: Some("   ".to_owned()),
            ..blank_settings()
        };
        assert!(settings.database_url().is_none());
    }
}
