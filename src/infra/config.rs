//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::net::SocketAddr;
use std::str::FromStr;

/// How store failures are turned into HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMapping {
    /// Every store failure is answered with 404, whatever its cause.
    #[default]
    Uniform,
    /// Statuses follow the error class (404, 409, 400, 503 or 500).
    Classified,
}

impl FromStr for ErrorMapping {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(ErrorMapping::Uniform),
            "classified" => Ok(ErrorMapping::Classified),
            other => Err(anyhow!(
                "ERROR_MAPPING must be 'uniform' or 'classified', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub error_mapping: ErrorMapping,
    pub bootstrap_schema: bool,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = database_url(&get)?;

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a valid u32, got '{}'", v))?
                .max(1),
            None => 5,
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR must be host:port, got '{}'", bind_addr))?;

        let error_mapping = match get("ERROR_MAPPING") {
            Some(v) => v.parse()?,
            None => ErrorMapping::default(),
        };

        let bootstrap_schema = match get("BOOTSTRAP_SCHEMA") {
            Some(v) => v
                .trim()
                .parse::<bool>()
                .with_context(|| format!("BOOTSTRAP_SCHEMA must be true or false, got '{}'", v))?,
            None => true,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            error_mapping,
            bootstrap_schema,
            log_format,
        })
    }
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the individual
/// `DB_*` variables (`LOCALHOST` is accepted as a legacy name for the host).
fn database_url<F>(get: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = get("DATABASE_URL") {
        return Ok(url);
    }

    let database = get("DB_DATABASE")
        .ok_or_else(|| anyhow!("DATABASE_URL or DB_DATABASE must be set"))?;
    let host = get("DB_HOST")
        .or_else(|| get("LOCALHOST"))
        .unwrap_or_else(|| "localhost".to_string());
    let credentials = match (get("DB_USER"), get("DB_PASSWORD")) {
        (Some(user), Some(password)) => format!("{}:{}@", user, password),
        (Some(user), None) => format!("{}@", user),
        _ => String::new(),
    };

    Ok(format!("postgres://{}{}/{}", credentials, host, database))
}
