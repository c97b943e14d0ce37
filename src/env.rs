// src/env.rs

use std::env;
use std::fmt;
use std::time::Duration;

use dotenv::dotenv;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Everything outside the RFC 3986 unreserved set gets escaped.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const AMQP_PORT: u16 = 5672;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Runtime settings, read once at startup.
///
/// | Key | Default |
/// |-----|---------|
/// | `RABBITMQ_HOST` (or `RABBIT_HOST`) | `rabbitmq.messaging.svc.cluster.local` |
/// | `RABBITMQ_USER` | `user` |
/// | `RABBITMQ_PASSWORD` | `guest` |
/// | `RABBITMQ_CONNECT_TIMEOUT_SECONDS` | `10` |
/// | `HTTP_PORT` | `8080` |
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub rabbitmq_host: String,
    pub rabbitmq_user: String,
    pub rabbitmq_password: String,
    pub rabbitmq_connect_timeout_seconds: u64,
    pub http_port: u16,
}

fn default_host() -> String {
    "rabbitmq.messaging.svc.cluster.local".to_string()
}

fn default_user() -> String {
    "user".to_string()
}

fn default_password() -> String {
    "guest".to_string()
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_http_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rabbitmq_host: default_host(),
            rabbitmq_user: default_user(),
            rabbitmq_password: default_password(),
            rabbitmq_connect_timeout_seconds: default_connect_timeout_seconds(),
            http_port: default_http_port(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            rabbitmq_host: lookup("RABBITMQ_HOST")
                .or_else(|| lookup("RABBIT_HOST"))
                .unwrap_or_else(default_host),
            rabbitmq_user: lookup("RABBITMQ_USER").unwrap_or_else(default_user),
            rabbitmq_password: lookup("RABBITMQ_PASSWORD").unwrap_or_else(default_password),
            rabbitmq_connect_timeout_seconds: match lookup("RABBITMQ_CONNECT_TIMEOUT_SECONDS") {
                Some(val) => parse("RABBITMQ_CONNECT_TIMEOUT_SECONDS", &val)?,
                None => default_connect_timeout_seconds(),
            },
            http_port: match lookup("HTTP_PORT") {
                Some(val) => parse("HTTP_PORT", &val)?,
                None => default_http_port(),
            },
        })
    }

    /// `amqp://<user>:<escaped-password>@<host>:5672/`
    pub fn amqp_addr(&self) -> String {
        format!(
            "amqp://{}:{}@{}:{}/",
            self.rabbitmq_user,
            utf8_percent_encode(&self.rabbitmq_password, USERINFO),
            self.rabbitmq_host,
            AMQP_PORT
        )
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.rabbitmq_connect_timeout_seconds)
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

// Keeps the password out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rabbitmq_host", &self.rabbitmq_host)
            .field("rabbitmq_user", &self.rabbitmq_user)
            .field("rabbitmq_password", &"***")
            .field(
                "rabbitmq_connect_timeout_seconds",
                &self.rabbitmq_connect_timeout_seconds,
            )
            .field("http_port", &self.http_port)
            .finish()
    }
}
