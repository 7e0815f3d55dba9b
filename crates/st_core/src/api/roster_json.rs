//! Roster validation JSON API
//!
//! String-in/string-out entry point for hosts that only speak JSON (the web
//! front end and the CLI). The catalog travels with the request so the call
//! is self-contained.

use crate::catalog::{RawCharacter, UnitCatalog};
use crate::config::RuleConfig;
use crate::error::{CoreError, Result};
use crate::models::{Role, Roster};
use crate::validation::{roster_summary, CompositionValidator, SquadSummary, Violation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SCHEMA_VERSION: u8 = 1;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

/// One picked character, in slot order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RosterEntry {
    #[serde(rename = "characterId", alias = "character_id")]
    pub character_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RosterValidationRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub catalog: Vec<RawCharacter>,
    pub characters: Vec<RosterEntry>,
    /// Validate an in-progress roster (missing slots are not reported)
    #[serde(default)]
    pub partial: bool,
    /// Overrides the rules from `ST_RULES_PATH`
    #[serde(default)]
    pub rules: Option<RuleConfig>,
}

impl RosterValidationRequest {
    pub fn roster(&self) -> Roster {
        Roster::from_picks(self.characters.iter().map(|e| (e.character_id.clone(), e.role)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterValidationResponse {
    pub schema_version: u8,
    pub success: bool,
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub squads: Vec<SquadSummary>,
    /// Catalog records that could not be normalized
    pub catalog_skipped: Vec<String>,
    pub error: Option<String>,
}

impl RosterValidationResponse {
    fn failure(message: String) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: false,
            is_valid: false,
            violations: vec![],
            squads: vec![],
            catalog_skipped: vec![],
            error: Some(message),
        }
    }
}

/// Validate a roster described as JSON; always returns a JSON response.
pub fn validate_roster_json(request_json: &str) -> String {
    let response = match process_roster_validation(request_json) {
        Ok(response) => response,
        Err(e) => RosterValidationResponse::failure(e.to_string()),
    };
    serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"success":false,"error":"Serialization failed"}"#.to_string())
}

pub fn process_roster_validation(request_json: &str) -> Result<RosterValidationResponse> {
    let request: RosterValidationRequest = serde_json::from_str(request_json)
        .map_err(|e| CoreError::InvalidRequest(format!("malformed JSON: {}", e)))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::InvalidRequest(format!(
            "Unsupported schema version: {}",
            request.schema_version
        )));
    }

    let rules = match request.rules {
        Some(rules) => rules,
        None => RuleConfig::from_env().unwrap_or_else(|e| {
            warn!("Falling back to default rules: {}", e);
            RuleConfig::default()
        }),
    };

    let roster = request.roster();
    let load = UnitCatalog::from_raw(request.catalog);
    let validator = CompositionValidator::new(rules);
    let violations = if request.partial {
        validator.validate_partial(&roster, &load.catalog)
    } else {
        validator.validate(&roster, &load.catalog)
    };

    Ok(RosterValidationResponse {
        schema_version: SCHEMA_VERSION,
        success: true,
        is_valid: violations.is_empty(),
        squads: roster_summary(&roster, &load.catalog),
        violations,
        catalog_skipped: load.stats.rejected,
        error: None,
    })
}

/// JSON Schema of [`RosterValidationRequest`], pretty-printed.
pub fn request_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(RosterValidationRequest);
    Ok(serde_json::to_string_pretty(&schema)?)
}
