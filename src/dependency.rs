use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timing relation between a predecessor and its successor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    /// Successor starts after the predecessor finishes.
    #[default]
    FinishToStart,
    /// Successor starts after the predecessor starts.
    StartToStart,
    /// Successor finishes after the predecessor finishes.
    FinishToFinish,
    /// Successor finishes after the predecessor starts.
    StartToFinish,
}

impl DependencyType {
    pub const ALL: [DependencyType; 4] = [
        DependencyType::FinishToStart,
        DependencyType::StartToStart,
        DependencyType::FinishToFinish,
        DependencyType::StartToFinish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "finish_to_start",
            DependencyType::StartToStart => "start_to_start",
            DependencyType::FinishToFinish => "finish_to_finish",
            DependencyType::StartToFinish => "start_to_finish",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "fs",
            DependencyType::StartToStart => "ss",
            DependencyType::FinishToFinish => "ff",
            DependencyType::StartToFinish => "sf",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dependency type: {0}")]
pub struct ParseDependencyTypeError(String);

impl FromStr for DependencyType {
    type Err = ParseDependencyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DependencyType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized || t.abbreviation() == normalized)
            .ok_or_else(|| ParseDependencyTypeError(s.to_string()))
    }
}

/// Which record collection a dependency endpoint refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    #[default]
    Activity,
    Milestone,
}

/// Largest lag magnitude, in days, a stored project may carry (about a
/// century either way).
pub const MAX_LAG_DAYS: i64 = 36_500;

/// A directed, typed relation `source -> target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub source_id: String,
    #[serde(default)]
    pub source_kind: EndpointKind,
    pub target_id: String,
    #[serde(default)]
    pub target_kind: EndpointKind,
    #[serde(default)]
    pub dependency_type: DependencyType,
    /// Positive values delay the successor, negative values allow overlap.
    #[serde(default)]
    pub lag_days: i64,
}

impl Dependency {
    /// A finish-to-start dependency with zero lag between two activities.
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            source_kind: EndpointKind::Activity,
            target_id: target_id.into(),
            target_kind: EndpointKind::Activity,
            dependency_type: DependencyType::FinishToStart,
            lag_days: 0,
        }
    }

    pub fn with_type(mut self, dependency_type: DependencyType) -> Self {
        self.dependency_type = dependency_type;
        self
    }

    pub fn with_lag(mut self, lag_days: i64) -> Self {
        self.lag_days = lag_days;
        self
    }

    pub fn with_kinds(mut self, source_kind: EndpointKind, target_kind: EndpointKind) -> Self {
        self.source_kind = source_kind;
        self.target_kind = target_kind;
        self
    }

    pub fn connects(&self, source_id: &str, target_id: &str) -> bool {
        self.source_id == source_id && self.target_id == target_id
    }
}
