//! Rule configuration.
//!
//! Defaults are the strict tournament rules. A JSON override can be supplied
//! through the `ST_RULES_PATH` environment variable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{env, fs};
use thiserror::Error;

pub const RULES_PATH_ENV: &str = "ST_RULES_PATH";

/// How squad-level era compatibility is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EraRule {
    /// All units of the squad share at least one era (full intersection).
    #[default]
    CommonEra,
    /// Legacy check: every unit shares an era with at least one squad mate.
    /// Not transitive, so a squad can pass with no era in common.
    PairwiseOverlap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    #[serde(default)]
    pub era_rule: EraRule,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read rules file from {env}='{path}': {source}")]
    Io {
        env: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RuleConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rules from the file named by `ST_RULES_PATH`; unset or blank means defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(RULES_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            env: RULES_PATH_ENV,
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
