//! Core types for contract analysis.
//!
//! Rubric entries (clauses, risk patterns) and the structures produced by
//! the [`Evaluator`](crate::Evaluator).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Keywords
// =============================================================================

/// A single trigger term.
///
/// Rubric files write a literal as a bare string and a regular expression as
/// `{ pattern: "..." }`. Every entry of the built-in rubric is a literal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "KeywordRepr", into = "KeywordRepr")]
pub enum Keyword {
    /// Matches when the text contains this exact substring.
    Literal(String),

    /// Matches when the regex finds a match anywhere in the text.
    Pattern(Regex),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum KeywordRepr {
    Literal(String),
    Pattern { pattern: String },
}

impl TryFrom<KeywordRepr> for Keyword {
    type Error = regex::Error;

    fn try_from(repr: KeywordRepr) -> Result<Self, Self::Error> {
        match repr {
            KeywordRepr::Literal(text) => Ok(Keyword::Literal(text)),
            KeywordRepr::Pattern { pattern } => Keyword::pattern(&pattern),
        }
    }
}

impl From<Keyword> for KeywordRepr {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Literal(text) => KeywordRepr::Literal(text),
            Keyword::Pattern(regex) => KeywordRepr::Pattern {
                pattern: regex.as_str().to_string(),
            },
        }
    }
}

impl Keyword {
    /// Create a literal keyword.
    pub fn literal(text: impl Into<String>) -> Self {
        Keyword::Literal(text.into())
    }

    /// Compile a regex keyword.
    pub fn pattern(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Keyword::Pattern)
    }

    /// The keyword as written in the rubric.
    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Literal(text) => text,
            Keyword::Pattern(regex) => regex.as_str(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Keyword::Pattern(_))
    }

    /// Test whether this keyword occurs in `text`. Case-sensitive.
    pub fn is_present(&self, text: &str) -> bool {
        match self {
            Keyword::Literal(literal) => text.contains(literal.as_str()),
            Keyword::Pattern(regex) => regex.is_match(text),
        }
    }
}

impl PartialEq for Keyword {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

impl Eq for Keyword {}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a list of literal keywords.
pub fn literals(words: &[&str]) -> Vec<Keyword> {
    words.iter().map(|w| Keyword::literal(*w)).collect()
}

// =============================================================================
// Clause catalog entries
// =============================================================================

/// How much a clause matters to the score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Counted in the 60-point coverage component.
    Required,

    /// Counted in the 40-point bonus component.
    Recommended,

    /// Only meaningful for time-billed contracts. Not scored.
    RequiredIfHourly,
}

impl Importance {
    /// Label used in rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            Importance::Required => "필수",
            Importance::Recommended => "권장",
            Importance::RequiredIfHourly => "필수(시간제)",
        }
    }
}

/// Concrete vs. hedge vocabulary for a clause or pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecificityRule {
    /// Concrete terms: currency units, rates, numeric qualifiers
    pub specific_keywords: Vec<Keyword>,

    /// Hedge terms that leave the amount or method open
    pub vague_keywords: Vec<Keyword>,
}

impl SpecificityRule {
    pub fn new(specific_keywords: Vec<Keyword>, vague_keywords: Vec<Keyword>) -> Self {
        Self {
            specific_keywords,
            vague_keywords,
        }
    }
}

/// A clause the rubric expects to find in a retainer contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClauseDef {
    /// Unique identifier within the rubric
    pub name: String,

    /// Presence of ANY keyword marks the clause as found
    pub keywords: Vec<Keyword>,

    pub importance: Importance,

    /// Where the clause sits in the standard retainer form
    #[serde(default)]
    pub standard_location: String,

    pub description: String,

    pub risk_if_missing: String,

    /// Present when the clause must also be stated concretely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specificity: Option<SpecificityRule>,
}

impl ClauseDef {
    pub fn requires_specificity(&self) -> bool {
        self.specificity.is_some()
    }
}

// =============================================================================
// Risk pattern catalog entries
// =============================================================================

/// Severity of a risk pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Points subtracted from the score when a pattern of this level fires.
    pub const fn penalty(&self) -> u32 {
        match self {
            RiskLevel::VeryHigh => 15,
            RiskLevel::High => 10,
            RiskLevel::Medium => 5,
            RiskLevel::Low => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::VeryHigh => "매우높음",
            RiskLevel::High => "높음",
            RiskLevel::Medium => "중간",
            RiskLevel::Low => "낮음",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            RiskLevel::VeryHigh => "🔴🔴",
            RiskLevel::High => "🔴",
            RiskLevel::Medium => "🟡",
            RiskLevel::Low => "🟢",
        }
    }
}

/// How a triggered risk pattern decides whether it fires.
///
/// A pattern has exactly one mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchMode {
    /// Fires on any trigger unless an anti-keyword is present.
    /// With no anti-keywords the trigger alone fires it.
    Simple {
        #[serde(default)]
        anti_keywords: Vec<Keyword>,
    },

    /// Fires on a trigger only when hedge wording is present and no
    /// concrete wording is.
    VagueCheck(SpecificityRule),
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::Simple {
            anti_keywords: Vec::new(),
        }
    }
}

/// A drafting pattern associated with client harm or disputes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskPatternDef {
    /// Unique identifier within the rubric
    pub name: String,

    /// Trigger keywords, ANY-match
    pub keywords: Vec<Keyword>,

    pub risk_level: RiskLevel,

    pub description: String,

    pub why_risky: String,

    pub suggestion: String,

    #[serde(default)]
    pub mode: MatchMode,
}

// =============================================================================
// Analysis results
// =============================================================================

/// Outcome of the specificity check for one clause.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpecificityStatus {
    Specific,
    Vague,
}

impl SpecificityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SpecificityStatus::Specific => "구체적",
            SpecificityStatus::Vague => "모호함",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecificityFinding {
    pub status: SpecificityStatus,

    pub description: String,

    /// Only set for vague findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SpecificityFinding {
    pub fn is_vague(&self) -> bool {
        self.status == SpecificityStatus::Vague
    }
}

/// Presence check of one catalog clause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClauseCheck {
    pub name: String,

    pub found: bool,

    /// Keywords that matched, in catalog order
    #[serde(default)]
    pub matched_keywords: Vec<String>,

    pub definition: ClauseDef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specificity: Option<SpecificityFinding>,
}

impl ClauseCheck {
    pub fn importance(&self) -> Importance {
        self.definition.importance
    }
}

/// A risk pattern that fired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskFinding {
    pub definition: RiskPatternDef,

    /// Trigger keywords that matched
    #[serde(default)]
    pub matched_keywords: Vec<String>,
}

impl RiskFinding {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.definition.risk_level
    }
}

/// A clause that is present but worded vaguely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecificityIssue {
    pub clause_name: String,
    pub finding: SpecificityFinding,
}

/// Overall verdict band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Score 80 or above
    Excellent,
    /// Score 60 to 79
    Fair,
    /// Below 60
    Caution,
}

impl Grade {
    pub const EXCELLENT_THRESHOLD: u8 = 80;
    pub const FAIR_THRESHOLD: u8 = 60;

    pub fn from_score(score: u8) -> Self {
        if score >= Self::EXCELLENT_THRESHOLD {
            Grade::Excellent
        } else if score >= Self::FAIR_THRESHOLD {
            Grade::Fair
        } else {
            Grade::Caution
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "우수",
            Grade::Fair => "보통",
            Grade::Caution => "주의",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Grade::Excellent => "✅",
            Grade::Fair => "⚠️",
            Grade::Caution => "🚨",
        }
    }
}

/// Every term of the score formula, before clamping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub required_found: usize,
    pub required_total: usize,
    pub recommended_found: usize,
    pub recommended_total: usize,

    /// `(required_found / required_total) * 60`
    pub coverage_points: f64,

    /// `(recommended_found / recommended_total) * 40`
    pub recommended_points: f64,

    /// Sum of severity penalties of fired patterns
    pub risk_penalty: u32,

    /// 5 per specificity issue
    pub specificity_penalty: u32,

    /// Running total; may be negative or above 100
    pub raw_total: f64,
}

impl ScoreBreakdown {
    /// Truncate toward zero, then clamp into 0..=100.
    pub fn final_score(&self) -> u8 {
        self.raw_total.trunc().clamp(0.0, 100.0) as u8
    }
}

/// Result of analyzing one contract text.
///
/// Created per call and owned by the caller. It never holds the analyzed text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// Final score, 0 to 100
    pub score: u8,

    pub max_score: u8,

    pub grade: Grade,

    /// One entry per catalog clause, in catalog order
    pub required_check: Vec<ClauseCheck>,

    /// Fired patterns, in catalog order
    pub risk_patterns: Vec<RiskFinding>,

    pub specificity_issues: Vec<SpecificityIssue>,

    /// Whether the text reads as a time-billed engagement
    #[serde(default)]
    pub hourly_billing: bool,

    pub breakdown: ScoreBreakdown,
}

impl AnalysisResult {
    /// Look up the check for a clause by name.
    pub fn clause(&self, name: &str) -> Option<&ClauseCheck> {
        self.required_check.iter().find(|c| c.name == name)
    }

    pub fn is_found(&self, name: &str) -> bool {
        self.clause(name).map(|c| c.found).unwrap_or(false)
    }

    /// Checks for clauses of one importance, in catalog order.
    pub fn clauses_with(&self, importance: Importance) -> impl Iterator<Item = &ClauseCheck> {
        self.required_check
            .iter()
            .filter(move |c| c.importance() == importance)
    }

    /// Required clauses that were not found.
    pub fn missing_required(&self) -> Vec<&ClauseCheck> {
        self.clauses_with(Importance::Required)
            .filter(|c| !c.found)
            .collect()
    }

    pub fn has_risk(&self, pattern_name: &str) -> bool {
        self.risk_patterns.iter().any(|r| r.name() == pattern_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_lookup() {
        assert_eq!(RiskLevel::VeryHigh.penalty(), 15);
        assert_eq!(RiskLevel::High.penalty(), 10);
        assert_eq!(RiskLevel::Medium.penalty(), 5);
        assert_eq!(RiskLevel::Low.penalty(), 0);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(100), Grade::Excellent);
        assert_eq!(Grade::from_score(80), Grade::Excellent);
        assert_eq!(Grade::from_score(79), Grade::Fair);
        assert_eq!(Grade::from_score(60), Grade::Fair);
        assert_eq!(Grade::from_score(59), Grade::Caution);
        assert_eq!(Grade::from_score(0), Grade::Caution);
    }

    #[test]
    fn test_final_score_truncates_then_clamps() {
        let mut breakdown = ScoreBreakdown {
            required_found: 0,
            required_total: 0,
            recommended_found: 0,
            recommended_total: 0,
            coverage_points: 0.0,
            recommended_points: 0.0,
            risk_penalty: 0,
            specificity_penalty: 0,
            raw_total: 79.99,
        };
        assert_eq!(breakdown.final_score(), 79);

        breakdown.raw_total = -0.5;
        assert_eq!(breakdown.final_score(), 0);

        breakdown.raw_total = -42.0;
        assert_eq!(breakdown.final_score(), 0);

        breakdown.raw_total = 112.7;
        assert_eq!(breakdown.final_score(), 100);
    }

    #[test]
    fn test_literal_keyword_is_plain_substring() {
        let keyword = Keyword::literal("계약 후.*시간");
        assert!(!keyword.is_present("계약 후 72시간"));
        assert!(keyword.is_present("문구 그대로 계약 후.*시간 포함"));
    }

    #[test]
    fn test_pattern_keyword_uses_regex() {
        let keyword = Keyword::pattern("계약 후.*시간").unwrap();
        assert!(keyword.is_present("계약 후 72시간이 지나면"));
        assert!(!keyword.is_present("72시간"));
    }

    #[test]
    fn test_keyword_serde_forms() {
        let keywords: Vec<Keyword> =
            serde_json::from_str(r#"["착수금", {"pattern": "지연.*이자"}]"#).unwrap();
        assert_eq!(keywords[0], Keyword::literal("착수금"));
        assert!(keywords[1].is_pattern());
        assert_eq!(keywords[1].as_str(), "지연.*이자");

        let json = serde_json::to_string(&keywords).unwrap();
        assert_eq!(json, r#"["착수금",{"pattern":"지연.*이자"}]"#);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let parsed: Result<Vec<Keyword>, _> = serde_json::from_str(r#"[{"pattern": "("}]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_match_mode_serde_is_tagged() {
        let mode: MatchMode = serde_json::from_str(
            r#"{"kind": "vague_check", "specific_keywords": ["원"], "vague_keywords": ["적정"]}"#,
        )
        .unwrap();
        assert!(matches!(mode, MatchMode::VagueCheck(_)));

        let mode: MatchMode =
            serde_json::from_str(r#"{"kind": "simple", "anti_keywords": ["동의"]}"#).unwrap();
        assert_eq!(
            mode,
            MatchMode::Simple {
                anti_keywords: literals(&["동의"])
            }
        );
    }
}
