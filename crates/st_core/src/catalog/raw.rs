//! Loosely-typed character records and their normalization into [`Unit`].
//!
//! Field aliases follow the collection app's data files:
//! - role: `role` or `unit_type`
//! - SP: `sp` or `squad_points`
//! - PC: `pc` or `point_cost`
//! - eras: `era` or `period`, each a single string or a list

use super::CatalogError;
use crate::models::{Role, Unit};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EraField {
    One(String),
    Many(Vec<String>),
}

impl EraField {
    fn tags(&self) -> Vec<&str> {
        match self {
            EraField::One(era) => vec![era.as_str()],
            EraField::Many(eras) => eras.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawCharacter {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub sp: Option<Value>,
    #[serde(default)]
    pub squad_points: Option<Value>,
    #[serde(default)]
    pub pc: Option<Value>,
    #[serde(default)]
    pub point_cost: Option<Value>,
    #[serde(default)]
    pub era: Option<EraField>,
    #[serde(default)]
    pub period: Option<EraField>,
}

impl RawCharacter {
    /// Normalize into a [`Unit`]. `index` is the record's position, used for
    /// error reporting when the id itself is missing.
    pub fn into_unit(self, index: usize) -> Result<Unit, CatalogError> {
        let id = match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(CatalogError::MissingId { index }),
        };

        let role_value = first_text(&[&self.role, &self.unit_type])
            .ok_or_else(|| CatalogError::MissingRole { id: id.clone() })?;
        let native_role = Role::parse(role_value)
            .ok_or_else(|| CatalogError::UnknownRole { id: id.clone(), value: role_value.to_string() })?;

        let primary_cost = first_cost(&id, &[("sp", &self.sp), ("squad_points", &self.squad_points)])?;
        let secondary_cost = first_cost(&id, &[("pc", &self.pc), ("point_cost", &self.point_cost)])?;

        let eras: BTreeSet<String> = [&self.era, &self.period]
            .into_iter()
            .flatten()
            .flat_map(EraField::tags)
            .map(str::trim)
            .filter(|era| !era.is_empty())
            .map(str::to_string)
            .collect();

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => id.clone(),
        };

        Ok(Unit { id, name, native_role, primary_cost, secondary_cost, eras })
    }
}

fn first_text<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|value| value.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// First non-zero cost among the aliases; absent or null fields count as zero.
/// Aliases after the first non-zero one are not looked at.
fn first_cost(id: &str, fields: &[(&'static str, &Option<Value>)]) -> Result<u32, CatalogError> {
    for (field, value) in fields {
        let Some(value) = value else { continue };
        let parsed = parse_cost(value).ok_or_else(|| CatalogError::InvalidCost {
            id: id.to_string(),
            field: *field,
            value: value.to_string(),
        })?;
        if parsed != 0 {
            return Ok(parsed);
        }
    }
    Ok(0)
}

fn parse_cost(value: &Value) -> Option<u32> {
    match value {
        Value::Null => Some(0),
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return u32::try_from(n).ok();
            }
            let f = number.as_f64()?;
            if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
                Some(f as u32)
            } else {
                None
            }
        }
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                Some(0)
            } else {
                text.parse().ok()
            }
        }
        _ => None,
    }
}
