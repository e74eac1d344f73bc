// src/config.rs
use crate::domain::slug::{SLUG_MAX_LENGTH, SlugSettings};
use crate::infrastructure::crypto::FieldCipher;
use crate::infrastructure::logging::LogFormat;
use crate::presentation::http::middleware::admin_auth::AdminCredentials;
use crate::presentation::http::middleware::admin_restrict::{
    AdminAccessPolicy, DEFAULT_ADMIN_AREA, parse_subnet,
};
use crate::presentation::http::middleware::rate_limit::RateLimitSettings;
use ipnet::IpNet;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    listen_addr: String,
    admin_area_prefix: String,
    restricted_prefixes: Vec<String>,
    admin_allowed_subnets: Vec<IpNet>,
    admin_credentials: AdminCredentials,
    field_cipher: Option<FieldCipher>,
    slug_max_length: usize,
    slug_max_probes: Option<u64>,
    rate_limit_enabled: bool,
    log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

const DEFAULT_DATABASE_URL: &str = "sqlite://slugkeeper.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 16;
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_ALLOWED_SUBNETS: &str = "127.0.0.0/8,::1/128";

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_var<T: FromStr>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::Invalid(format!("{key}={raw:?}")))
        })
        .transpose()
}

fn parse_bool(key: &'static str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    value
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid(format!("{key}={raw:?}"))),
        })
        .transpose()
}

impl AppConfig {
    /// Build configuration from the process environment, after loading a
    /// `.env` file when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset keys take defaults;
    /// set but malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        if database_url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections =
            parse_var::<u32>("DATABASE_MAX_CONNECTIONS", lookup("DATABASE_MAX_CONNECTIONS"))?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be positive".into(),
            ));
        }

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into());

        let admin_area_prefix = lookup("ADMIN_AREA_PREFIX")
            .unwrap_or_else(|| DEFAULT_ADMIN_AREA.into())
            .trim()
            .trim_matches('/')
            .to_string();
        if admin_area_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "ADMIN_AREA_PREFIX cannot be empty".into(),
            ));
        }

        let restricted_prefixes = lookup("RESTRICTED_PREFIXES")
            .map(|value| split_list(&value).map(str::to_string).collect())
            .unwrap_or_default();

        let admin_allowed_subnets = split_list(
            &lookup("ADMIN_API_ALLOWED_SUBNETS").unwrap_or_else(|| DEFAULT_ALLOWED_SUBNETS.into()),
        )
        .map(|subnet| parse_subnet(subnet).map_err(ConfigError::Invalid))
        .collect::<Result<Vec<_>, _>>()?;

        let admin_credentials = AdminCredentials::new(lookup("ADMIN_API_TOKEN").as_deref());

        let field_cipher = lookup("DB_ENCRYPTION_KEY")
            .map(|key| {
                FieldCipher::new(&key)
                    .map_err(|err| ConfigError::Invalid(format!("DB_ENCRYPTION_KEY: {err}")))
            })
            .transpose()?;

        let slug_max_length = parse_var::<usize>("SLUG_MAX_LENGTH", lookup("SLUG_MAX_LENGTH"))?
            .unwrap_or(SLUG_MAX_LENGTH);
        let slug_max_probes = parse_var::<u64>("SLUG_MAX_PROBES", lookup("SLUG_MAX_PROBES"))?;
        SlugSettings::new(slug_max_length, slug_max_probes)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        let rate_limit_enabled =
            parse_bool("RATE_LIMIT_ENABLED", lookup("RATE_LIMIT_ENABLED"))?.unwrap_or(true);

        let log_format = lookup("LOG_FORMAT")
            .map(|value| value.parse::<LogFormat>().map_err(ConfigError::Invalid))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            admin_area_prefix,
            restricted_prefixes,
            admin_allowed_subnets,
            admin_credentials,
            field_cipher,
            slug_max_length,
            slug_max_probes,
            rate_limit_enabled,
            log_format,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn slug_settings(&self) -> SlugSettings {
        SlugSettings {
            max_length: self.slug_max_length,
            max_probes: self.slug_max_probes,
        }
    }

    pub fn admin_access_policy(&self) -> AdminAccessPolicy {
        AdminAccessPolicy::new(
            &self.admin_area_prefix,
            &self.restricted_prefixes,
            self.admin_allowed_subnets.clone(),
        )
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        self.admin_credentials.clone()
    }

    /// Cipher for encrypted columns, when `DB_ENCRYPTION_KEY` is set.
    pub fn field_cipher(&self) -> Option<FieldCipher> {
        self.field_cipher.clone()
    }

    pub fn rate_limit(&self) -> Option<RateLimitSettings> {
        self.rate_limit_enabled.then(RateLimitSettings::default)
    }
}
