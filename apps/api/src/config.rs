use anyhow::{bail, Context, Result};

use crate::analysis::composite::JitterPolicy;
use crate::analysis::nlp::EngineConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub jitter: JitterPolicy,
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            jitter: parse_jitter(
                lookup("SCORE_JITTER").as_deref(),
                lookup("SCORE_JITTER_SEED").as_deref(),
            )?,
            engine: EngineConfig {
                vector_dims: parse_or("NLP_VECTOR_DIMS", &lookup, defaults.vector_dims)?,
                max_input_chars: parse_or(
                    "NLP_MAX_INPUT_CHARS",
                    &lookup,
                    defaults.max_input_chars,
                )?,
            },
        })
    }
}

fn parse_or<F>(key: &str, lookup: &F, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        None => Ok(default),
    }
}

fn parse_jitter(switch: Option<&str>, seed: Option<&str>) -> Result<JitterPolicy> {
    let enabled = match switch.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("on") | Some("true") | Some("1") => true,
        Some("off") | Some("false") | Some("0") => false,
        Some(other) => bail!("SCORE_JITTER must be 'on' or 'off', got '{other}'"),
    };
    if !enabled {
        return Ok(JitterPolicy::Disabled);
    }

    match seed {
        Some(raw) => {
            let seed = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SCORE_JITTER_SEED must be a u64, got '{raw}'"))?;
            Ok(JitterPolicy::Seeded(seed))
        }
        None => Ok(JitterPolicy::Entropy),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.jitter, JitterPolicy::Entropy);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_jitter_off_and_seeded() {
        let config = config_from(&[("SCORE_JITTER", "off"), ("SCORE_JITTER_SEED", "9")]).unwrap();
        assert_eq!(config.jitter, JitterPolicy::Disabled);

        let config = config_from(&[("SCORE_JITTER_SEED", "9")]).unwrap();
        assert_eq!(config.jitter, JitterPolicy::Seeded(9));
    }

    #[test]
    fn test_engine_overrides() {
        let config = config_from(&[("NLP_VECTOR_DIMS", "0"), ("NLP_MAX_INPUT_CHARS", "500")])
            .unwrap();
        assert_eq!(config.engine.vector_dims, 0);
        assert_eq!(config.engine.max_input_chars, 500);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("SCORE_JITTER", "sometimes")]).is_err());
        assert!(config_from(&[("SCORE_JITTER_SEED", "-1")]).is_err());
        assert!(config_from(&[("NLP_VECTOR_DIMS", "wide")]).is_err());
    }
}
