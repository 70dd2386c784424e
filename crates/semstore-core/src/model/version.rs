use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::snapshot::SemanticSnapshot;

/// `major.minor.patch` number of a semantic version
///
/// Ordering is numeric per component, so `1.10.0 > 1.9.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionNumber {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionNumber {
    /// The number given to the very first published version
    pub const INITIAL: VersionNumber = VersionNumber::new(1, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Same major, next minor, patch reset to zero
    ///
    /// `None` when the minor component is already `u32::MAX`.
    pub fn next_minor(&self) -> Option<Self> {
        self.minor
            .checked_add(1)
            .map(|minor| Self::new(self.major, minor, 0))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionNumber {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(format!("expected major.minor.patch, got '{}'", s));
        }
        let parse = |p: &str| {
            p.parse::<u32>()
                .map_err(|e| format!("invalid version component '{}': {}", p, e))
        };
        Ok(Self::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
    }
}

impl Serialize for VersionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Published,
    Deprecated,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VersionStatus::Draft => "draft",
            VersionStatus::Published => "published",
            VersionStatus::Deprecated => "deprecated",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionStats {
    pub object_count: usize,
    pub field_count: usize,
    pub relation_count: usize,
}

/// One node in the version history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticVersion {
    pub version_id: String,
    pub version: VersionNumber,
    pub status: VersionStatus,
    pub is_active: bool,
    /// Replaced wholesale while draft; frozen afterwards
    pub snapshot: Arc<SemanticSnapshot>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<VersionStats>,
}

impl SemanticVersion {
    /// Create a new draft holding `snapshot`
    pub fn new_draft(version_id: String, version: VersionNumber, snapshot: SemanticSnapshot) -> Self {
        let stats = snapshot.stats();
        Self {
            version_id,
            version,
            status: VersionStatus::Draft,
            is_active: false,
            snapshot: Arc::new(snapshot),
            created_at: Utc::now(),
            published_at: None,
            deprecated_at: None,
            change_summary: None,
            stats: Some(stats),
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == VersionStatus::Draft
    }

    /// True for published and deprecated versions
    pub fn was_published(&self) -> bool {
        self.status != VersionStatus::Draft
    }
}
