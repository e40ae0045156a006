use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Text format of a blocklist payload.
///
/// Each variant maps to one decision engine: hosts files are matched
/// exactly, filter lists are matched on every parent domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlocklistFormat {
    Hosts,
    #[serde(rename = "abp", alias = "filter_list")]
    FilterList,
}

impl BlocklistFormat {
    pub const ALL: [BlocklistFormat; 2] = [BlocklistFormat::Hosts, BlocklistFormat::FilterList];

    pub fn to_str(&self) -> &'static str {
        match self {
            BlocklistFormat::Hosts => "hosts",
            BlocklistFormat::FilterList => "abp",
        }
    }
}

impl FromStr for BlocklistFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hosts" => Ok(BlocklistFormat::Hosts),
            "abp" | "filter_list" | "filter-list" => Ok(BlocklistFormat::FilterList),
            other => Err(DomainError::UnknownBlocklistFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for BlocklistFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}
