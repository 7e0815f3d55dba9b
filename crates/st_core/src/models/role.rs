use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Squad role a unit is built for, and the slot it occupies in a squad.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[serde(alias = "Primary", alias = "primary")]
    Primary,
    #[serde(alias = "Secondary", alias = "secondary")]
    Secondary,
    #[serde(alias = "Support", alias = "support", alias = "SUPPORTING", alias = "Supporting")]
    Support,
}

impl Role {
    /// Every role, in squad slot order.
    pub const ALL: [Role; 3] = [Role::Primary, Role::Secondary, Role::Support];

    pub fn code(&self) -> &'static str {
        match self {
            Role::Primary => "PRIMARY",
            Role::Secondary => "SECONDARY",
            Role::Support => "SUPPORT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Primary => "Primary",
            Role::Secondary => "Secondary",
            Role::Support => "Support",
        }
    }

    /// Lenient parse used at the catalog boundary ("Primary", "primary", "SUPPORTING", ...).
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PRIMARY" => Some(Role::Primary),
            "SECONDARY" => Some(Role::Secondary),
            "SUPPORT" | "SUPPORTING" => Some(Role::Support),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| format!("unknown role: {s}"))
    }
}
