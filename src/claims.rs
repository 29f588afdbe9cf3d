use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::listings::repo_types::UnknownVariant;

/// Fulfillment state of a claim. Claims are read-only here; the type is
/// used to check status values coming back from analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Completed,
    Pending,
    Cancelled,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [
        ClaimStatus::Completed,
        ClaimStatus::Pending,
        ClaimStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for ClaimStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "claim status", value: s.to_string() })
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
