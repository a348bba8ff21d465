//! Rubric: the clause catalog and the risk pattern catalog.
//!
//! The built-in rubric is assembled from static tables on first use and
//! validated once; a rubric that fails validation is a startup error, never
//! a per-request one. Custom rubrics can be loaded from YAML or JSON and go
//! through the same validation.

mod clauses;
mod risks;

pub use clauses::{ClauseEntry, SpecificityEntry, CLAUSE_TABLE};
pub use risks::{EntryMode, RiskEntry, HOURLY_MARKERS, RISK_TABLE};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::{literals, ClauseDef, Importance, Keyword, MatchMode, RiskPatternDef};

/// Errors that can occur when loading or validating a rubric.
#[derive(Error, Debug)]
pub enum RubricError {
    #[error("Failed to read rubric file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Duplicate clause name: {0}")]
    DuplicateClause(String),

    #[error("Duplicate risk pattern name: {0}")]
    DuplicatePattern(String),

    #[error("{0} has no trigger keywords")]
    NoKeywords(String),

    #[error("{0} contains an empty keyword")]
    EmptyKeyword(String),

    #[error("{0} needs both specific and vague keywords")]
    IncompleteSpecificity(String),
}

lazy_static! {
    static ref BUILTIN: Rubric = {
        let rubric = Rubric {
            clauses: CLAUSE_TABLE.iter().map(ClauseDef::from).collect(),
            risk_patterns: RISK_TABLE.iter().map(RiskPatternDef::from).collect(),
            hourly_markers: literals(HOURLY_MARKERS),
        };
        if let Err(e) = rubric.validate() {
            panic!("built-in rubric is invalid: {}", e);
        }
        rubric
    };
}

/// A validated set of clause and risk pattern definitions.
///
/// Deserializing goes through [`Rubric::validate`], so an invalid document
/// never produces a `Rubric`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RubricRepr")]
pub struct Rubric {
    clauses: Vec<ClauseDef>,

    risk_patterns: Vec<RiskPatternDef>,

    /// Terms that mark a contract as time-billed
    #[serde(default)]
    hourly_markers: Vec<Keyword>,
}

/// Unvalidated wire form of [`Rubric`].
#[derive(Deserialize)]
struct RubricRepr {
    clauses: Vec<ClauseDef>,

    risk_patterns: Vec<RiskPatternDef>,

    #[serde(default)]
    hourly_markers: Vec<Keyword>,
}

impl TryFrom<RubricRepr> for Rubric {
    type Error = RubricError;

    fn try_from(repr: RubricRepr) -> Result<Self, Self::Error> {
        let rubric = Rubric {
            clauses: repr.clauses,
            risk_patterns: repr.risk_patterns,
            hourly_markers: repr.hourly_markers,
        };
        rubric.validate()?;
        Ok(rubric)
    }
}

impl Rubric {
    /// Build a rubric from definitions, validating it.
    pub fn new(
        clauses: Vec<ClauseDef>,
        risk_patterns: Vec<RiskPatternDef>,
    ) -> Result<Self, RubricError> {
        let rubric = Self {
            clauses,
            risk_patterns,
            hourly_markers: Vec::new(),
        };
        rubric.validate()?;
        Ok(rubric)
    }

    pub fn with_hourly_markers(mut self, markers: Vec<Keyword>) -> Result<Self, RubricError> {
        self.hourly_markers = markers;
        self.validate()?;
        Ok(self)
    }

    /// The rubric shipped with the engine.
    pub fn builtin() -> &'static Rubric {
        &BUILTIN
    }

    // Parsed as the repr first so validation failures keep their variant
    // instead of surfacing as a parse error.
    pub fn from_yaml(yaml: &str) -> Result<Self, RubricError> {
        let repr: RubricRepr = serde_yaml::from_str(yaml)?;
        Rubric::try_from(repr)
    }

    pub fn from_json(json: &str) -> Result<Self, RubricError> {
        let repr: RubricRepr = serde_json::from_str(json)?;
        Rubric::try_from(repr)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a rubric file, picking the format from the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let path = path.as_ref();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    pub fn to_yaml(&self) -> Result<String, RubricError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn clauses(&self) -> &[ClauseDef] {
        &self.clauses
    }

    pub fn risk_patterns(&self) -> &[RiskPatternDef] {
        &self.risk_patterns
    }

    pub fn hourly_markers(&self) -> &[Keyword] {
        &self.hourly_markers
    }

    pub fn clause(&self, name: &str) -> Option<&ClauseDef> {
        self.clauses.iter().find(|c| c.name == name)
    }

    pub fn risk_pattern(&self, name: &str) -> Option<&RiskPatternDef> {
        self.risk_patterns.iter().find(|p| p.name == name)
    }

    /// Number of clauses of the given importance.
    pub fn count(&self, importance: Importance) -> usize {
        self.clauses
            .iter()
            .filter(|c| c.importance == importance)
            .count()
    }

    /// Check the catalog invariants.
    ///
    /// - clause names unique, risk pattern names unique
    /// - every entry has at least one trigger keyword, none of them empty
    /// - every specificity rule has both keyword lists non-empty
    pub fn validate(&self) -> Result<(), RubricError> {
        let mut seen = HashSet::new();
        for clause in &self.clauses {
            if !seen.insert(clause.name.as_str()) {
                return Err(RubricError::DuplicateClause(clause.name.clone()));
            }
            check_keywords(&clause.name, &clause.keywords)?;
            if let Some(rule) = &clause.specificity {
                check_specificity(&clause.name, &rule.specific_keywords, &rule.vague_keywords)?;
            }
        }

        let mut seen = HashSet::new();
        for pattern in &self.risk_patterns {
            if !seen.insert(pattern.name.as_str()) {
                return Err(RubricError::DuplicatePattern(pattern.name.clone()));
            }
            check_keywords(&pattern.name, &pattern.keywords)?;
            match &pattern.mode {
                MatchMode::Simple { anti_keywords } => {
                    if anti_keywords.iter().any(|k| k.as_str().is_empty()) {
                        return Err(RubricError::EmptyKeyword(pattern.name.clone()));
                    }
                }
                MatchMode::VagueCheck(rule) => {
                    check_specificity(
                        &pattern.name,
                        &rule.specific_keywords,
                        &rule.vague_keywords,
                    )?;
                }
            }
        }

        if self.hourly_markers.iter().any(|k| k.as_str().is_empty()) {
            return Err(RubricError::EmptyKeyword("hourly_markers".to_string()));
        }

        Ok(())
    }
}

fn check_keywords(owner: &str, keywords: &[Keyword]) -> Result<(), RubricError> {
    if keywords.is_empty() {
        return Err(RubricError::NoKeywords(owner.to_string()));
    }
    if keywords.iter().any(|k| k.as_str().is_empty()) {
        return Err(RubricError::EmptyKeyword(owner.to_string()));
    }
    Ok(())
}

fn check_specificity(
    owner: &str,
    specific: &[Keyword],
    vague: &[Keyword],
) -> Result<(), RubricError> {
    if specific.is_empty() || vague.is_empty() {
        return Err(RubricError::IncompleteSpecificity(owner.to_string()));
    }
    if specific.iter().chain(vague.iter()).any(|k| k.as_str().is_empty()) {
        return Err(RubricError::EmptyKeyword(owner.to_string()));
    }
    Ok(())
}
