use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a freshly parsed snapshot is merged into an engine's block-set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Union with the previous block-set. Entries removed upstream stay blocked.
    #[default]
    Cumulative,
    /// Clear, then insert the new snapshot, inside one write section.
    Replace,
}

impl UpdateMode {
    pub fn to_str(&self) -> &'static str {
        match self {
            UpdateMode::Cumulative => "cumulative",
            UpdateMode::Replace => "replace",
        }
    }
}

impl FromStr for UpdateMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cumulative" => Ok(UpdateMode::Cumulative),
            "replace" => Ok(UpdateMode::Replace),
            other => Err(DomainError::UnknownUpdateMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}
