//! # counsel-core
//!
//! Deterministic quality checker for attorney retainer contracts
//! (사건위임계약서).
//!
//! Given the plain text of a contract, the engine answers:
//! - Which standard clauses are present?
//! - Which drafting patterns put the client at risk?
//! - Which present clauses are worded too vaguely to enforce?
//!
//! and condenses the answers into a 0-100 score with a grade.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same text and rubric always produce the same result
//! 2. **Total**: Every string is a valid input; evaluation never fails
//! 3. **Traceable**: Every finding names the rubric entry and keywords behind it
//! 4. **Stateless**: The analyzed text is never retained
//!
//! ## Example
//!
//! ```rust
//! use counsel_core::{evaluate, format_report, Grade};
//!
//! let result = evaluate("팀제로 운영합니다.");
//! assert_eq!(result.grade, Grade::Caution);
//! assert!(result.has_risk("팀제운영"));
//! println!("{}", format_report(&result));
//! ```

pub mod evaluator;
pub mod matcher;
pub mod report;
pub mod rubric;
pub mod types;

// Re-export main types at crate root
pub use evaluator::Evaluator;
pub use report::{format_improvement_request, format_report, format_summary, summary_line};
pub use rubric::{Rubric, RubricError};
pub use types::{
    AnalysisResult, ClauseCheck, ClauseDef, Grade, Importance, Keyword, MatchMode, RiskFinding,
    RiskLevel, RiskPatternDef, ScoreBreakdown, SpecificityFinding, SpecificityIssue,
    SpecificityRule, SpecificityStatus,
};

/// Analyze a contract text against the built-in rubric.
///
/// This is the main entry point. Use [`evaluate_with`] for a custom rubric.
pub fn evaluate(text: &str) -> AnalysisResult {
    Evaluator::builtin().evaluate(text)
}

/// Analyze a contract text against the given rubric.
pub fn evaluate_with(rubric: &Rubric, text: &str) -> AnalysisResult {
    Evaluator::new(rubric).evaluate(text)
}
