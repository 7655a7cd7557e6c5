//! Domain Value Objects
//!
//! Closed vocabularies of the portfolio domain. Request bodies are accepted
//! in any case; path segments must spell the canonical code exactly. The
//! canonical code is what gets stored and returned.

use derive_more::Display;
use serde::{Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ============================================================================
// ProjectStatus
// ============================================================================

/// Lifecycle state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum ProjectStatus {
    #[default]
    #[display("completed")]
    Completed,
    #[display("in_progress")]
    InProgress,
    #[display("archived")]
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Completed, Self::InProgress, Self::Archived];
    pub const CODES: [&'static str; 3] = ["completed", "in_progress", "archived"];

    /// Get string code for storage and the API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in_progress",
            Self::Archived => "archived",
        }
    }

    /// Parse a stored or submitted code (case-insensitive)
    pub fn from_code(code: &str) -> Result<Self, UnknownVariant> {
        let trimmed = code.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("project status", code))
    }

    /// Exact canonical code only
    pub fn from_exact(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// ============================================================================
// SkillCategory
// ============================================================================

/// Grouping of a technical skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SkillCategory {
    #[display("FRONTEND")]
    Frontend,
    #[display("BACKEND")]
    Backend,
    #[display("DATABASE")]
    Database,
    #[display("TOOLS")]
    Tools,
    #[display("DEVOPS")]
    Devops,
    #[display("OTHER")]
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 6] = [
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::Tools,
        Self::Devops,
        Self::Other,
    ];
    pub const CODES: [&'static str; 6] =
        ["FRONTEND", "BACKEND", "DATABASE", "TOOLS", "DEVOPS", "OTHER"];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Frontend => "FRONTEND",
            Self::Backend => "BACKEND",
            Self::Database => "DATABASE",
            Self::Tools => "TOOLS",
            Self::Devops => "DEVOPS",
            Self::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, UnknownVariant> {
        let trimmed = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("skill category", code))
    }

    pub fn from_exact(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl FromStr for SkillCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Serialize for SkillCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// ============================================================================
// SkillLevel
// ============================================================================

/// Proficiency of a technical skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SkillLevel {
    #[display("LOW")]
    Low,
    #[display("MEDIUM")]
    Medium,
    #[display("HIGH")]
    High,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [Self::Low, Self::Medium, Self::High];
    pub const CODES: [&'static str; 3] = ["LOW", "MEDIUM", "HIGH"];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, UnknownVariant> {
        let trimmed = code.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant::new("skill level", code))
    }
}

impl FromStr for SkillLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Serialize for SkillLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
