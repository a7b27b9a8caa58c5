use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};

pub const ENV_PREFIX: &str = "SETTINGS_";

const SECRET_KEYS: [&str; 2] = ["supabase_service_role_dev", "openai_key"];

/// A credential that never prints its value.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**********)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("**********")
    }
}

// The env provider types values it can parse, so an all-digit key arrives as
// a number. Any scalar is taken as its text.
impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SecretVisitor;

        impl Visitor<'_> for SecretVisitor {
            type Value = Secret;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a secret string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Secret, E> {
                Ok(Secret::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Secret, E> {
                Ok(Secret(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Secret, E> {
                Ok(Secret(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Secret, E> {
                Ok(Secret(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Secret, E> {
                Ok(Secret(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Secret, E> {
                Ok(Secret(v.to_string()))
            }
        }

        deserializer.deserialize_any(SecretVisitor)
    }
}

/// Field names as they appear after the `SETTINGS_` prefix is stripped.
#[derive(Serialize, Deserialize)]
struct RawSettings {
    next_public_supabase_url_dev: String,
    gotrue_url: String,
    embedding_model: String,
    openai_base_url: String,
    http_timeout_secs: u64,
    #[serde(default, skip_serializing)]
    supabase_service_role_dev: Option<Secret>,
    #[serde(default, skip_serializing)]
    openai_key: Option<Secret>,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            next_public_supabase_url_dev: "http://127.0.0.1:54321".to_string(),
            gotrue_url: "http://127.0.0.1:54321/auth/v1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            http_timeout_secs: 10,
            supabase_service_role_dev: None,
            openai_key: None,
        }
    }
}

/// Endpoints and credentials for one seeding run. Built once, then passed
/// by reference to every client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub supabase_url: String,
    pub gotrue_url: String,
    pub embedding_model: String,
    pub openai_base_url: String,
    pub http_timeout: Duration,
    pub supabase_service_role: Secret,
    pub openai_key: Secret,
}

impl Settings {
    /// Overlay the env file onto the process environment, then read every
    /// `SETTINGS_*` variable. Variables already set in the environment win
    /// over the file.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        load_env_file(env_file)?;
        let mut figment = Figment::new().merge(Env::prefixed(ENV_PREFIX));
        // Re-read secrets verbatim: number parsing would drop leading zeros.
        for key in SECRET_KEYS {
            if let Ok(raw) = std::env::var(format!("{ENV_PREFIX}{}", key.to_uppercase())) {
                figment = figment.merge(Serialized::default(key, raw));
            }
        }
        Self::from_figment(figment)
    }

    /// Build settings from an explicit provider stack layered over the
    /// defaults.
    pub fn from_figment(overrides: Figment) -> Result<Self> {
        let raw: RawSettings = Figment::from(Serialized::defaults(RawSettings::default()))
            .merge(overrides)
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        if raw.http_timeout_secs == 0 {
            return Err(Error::InvalidConfig(format!(
                "{ENV_PREFIX}HTTP_TIMEOUT_SECS must be greater than zero"
            )));
        }

        Ok(Self {
            supabase_url: trim_url(raw.next_public_supabase_url_dev),
            gotrue_url: trim_url(raw.gotrue_url),
            embedding_model: raw.embedding_model,
            openai_base_url: trim_url(raw.openai_base_url),
            http_timeout: Duration::from_secs(raw.http_timeout_secs),
            supabase_service_role: require(raw.supabase_service_role_dev, "supabase_service_role_dev")?,
            openai_key: require(raw.openai_key, "openai_key")?,
        })
    }
}

fn require(secret: Option<Secret>, key: &str) -> Result<Secret> {
    match secret {
        Some(s) if !s.expose().trim().is_empty() => Ok(s),
        _ => Err(Error::InvalidConfig(format!(
            "{ENV_PREFIX}{} is required",
            key.to_uppercase()
        ))),
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            dotenvy::from_path(p).map_err(|e| {
                Error::InvalidConfig(format!("Failed to read env file {}: {}", p.display(), e))
            })?;
            debug!(path = %p.display(), "loaded env file");
            Ok(())
        }
        None => match dotenvy::dotenv() {
            Ok(p) => {
                debug!(path = %p.display(), "loaded env file");
                Ok(())
            }
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(Error::InvalidConfig(format!("Failed to read .env: {e}"))),
        },
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
