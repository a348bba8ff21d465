//! Evaluator: runs the rubric over a contract text and scores it.
//!
//! The evaluator applies four passes in a fixed order:
//! 1. Clause pass: a clause is found when ANY of its keywords occurs
//! 2. Specificity pass: found clauses with a specificity rule are graded
//! 3. Risk pass: each risk pattern is decided by its match mode
//! 4. Scoring: coverage, risk penalties, recommended bonus, vagueness
//!
//! The score is accumulated as a running total and clamped once, at the end.
//! A text that collects enough penalties can therefore be pulled back up by
//! later bonus terms before the clamp.

use tracing::{debug, trace};

use crate::matcher::{contains_any, matched_keywords, risk_pattern_fires, specificity_hits};
use crate::rubric::Rubric;
use crate::types::{
    AnalysisResult, ClauseCheck, ClauseDef, Grade, Importance, RiskFinding, ScoreBreakdown,
    SpecificityFinding, SpecificityIssue, SpecificityStatus,
};

/// Scores contract texts against a [`Rubric`].
///
/// Holds only a borrowed rubric, so it is cheap to build and safe to share.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    rubric: &'r Rubric,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Evaluator<'static> {
    /// Evaluator over the built-in rubric.
    pub fn builtin() -> Self {
        Self::new(Rubric::builtin())
    }
}

impl<'r> Evaluator<'r> {
    /// Points available for full Required coverage.
    pub const REQUIRED_WEIGHT: f64 = 60.0;

    /// Points available for full Recommended coverage.
    pub const RECOMMENDED_WEIGHT: f64 = 40.0;

    /// Deduction per vague clause.
    pub const SPECIFICITY_PENALTY: u32 = 5;

    pub const MAX_SCORE: u8 = 100;

    pub fn new(rubric: &'r Rubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &'r Rubric {
        self.rubric
    }

    /// Analyze a contract text.
    ///
    /// Total over every input: an empty or unrelated text simply finds
    /// nothing. Same text and rubric always give the same result.
    pub fn evaluate(&self, text: &str) -> AnalysisResult {
        let required_check = self.check_clauses(text);
        let specificity_issues = collect_issues(&required_check);
        let risk_patterns = self.find_risks(text);
        let hourly_billing = contains_any(text, self.rubric.hourly_markers());

        let breakdown = self.score(&required_check, &risk_patterns, &specificity_issues);
        let score = breakdown.final_score();

        debug!(
            score,
            raw_total = breakdown.raw_total,
            risks = risk_patterns.len(),
            specificity_issues = specificity_issues.len(),
            hourly_billing,
            "Contract evaluated"
        );

        AnalysisResult {
            score,
            max_score: Self::MAX_SCORE,
            grade: Grade::from_score(score),
            required_check,
            risk_patterns,
            specificity_issues,
            hourly_billing,
            breakdown,
        }
    }

    fn check_clauses(&self, text: &str) -> Vec<ClauseCheck> {
        let checks: Vec<ClauseCheck> = self
            .rubric
            .clauses()
            .iter()
            .map(|clause| {
                let matched = matched_keywords(text, &clause.keywords);
                let found = !matched.is_empty();
                let specificity = if found {
                    grade_specificity(text, clause)
                } else {
                    None
                };
                ClauseCheck {
                    name: clause.name.clone(),
                    found,
                    matched_keywords: matched,
                    definition: clause.clone(),
                    specificity,
                }
            })
            .collect();

        debug!(
            found = checks.iter().filter(|c| c.found).count(),
            total = checks.len(),
            "Clause pass complete"
        );
        checks
    }

    fn find_risks(&self, text: &str) -> Vec<RiskFinding> {
        self.rubric
            .risk_patterns()
            .iter()
            .filter(|pattern| risk_pattern_fires(text, pattern))
            .map(|pattern| {
                trace!(pattern = %pattern.name, level = ?pattern.risk_level, "Risk pattern fired");
                RiskFinding {
                    definition: pattern.clone(),
                    matched_keywords: matched_keywords(text, &pattern.keywords),
                }
            })
            .collect()
    }

    fn score(
        &self,
        checks: &[ClauseCheck],
        risks: &[RiskFinding],
        issues: &[SpecificityIssue],
    ) -> ScoreBreakdown {
        let (required_found, required_total) = tally(checks, Importance::Required);
        let (recommended_found, recommended_total) = tally(checks, Importance::Recommended);

        let coverage_points = ratio_points(required_found, required_total, Self::REQUIRED_WEIGHT);
        let recommended_points =
            ratio_points(recommended_found, recommended_total, Self::RECOMMENDED_WEIGHT);
        let risk_penalty: u32 = risks.iter().map(|r| r.risk_level().penalty()).sum();
        let specificity_penalty = Self::SPECIFICITY_PENALTY * issues.len() as u32;

        let mut total = coverage_points;
        total -= f64::from(risk_penalty);
        total += recommended_points;
        total -= f64::from(specificity_penalty);

        ScoreBreakdown {
            required_found,
            required_total,
            recommended_found,
            recommended_total,
            coverage_points,
            recommended_points,
            risk_penalty,
            specificity_penalty,
            raw_total: total,
        }
    }
}

fn grade_specificity(text: &str, clause: &ClauseDef) -> Option<SpecificityFinding> {
    let rule = clause.specificity.as_ref()?;
    let hits = specificity_hits(text, rule);

    if hits.is_vague() {
        Some(SpecificityFinding {
            status: SpecificityStatus::Vague,
            description: format!("{} 조항이 있지만 구체적이지 않음", clause.name),
            suggestion: Some("구체적인 금액이나 계산 방식을 명시해달라고 요청하세요".to_string()),
        })
    } else if hits.has_specific {
        Some(SpecificityFinding {
            status: SpecificityStatus::Specific,
            description: format!("{} 조항이 구체적으로 명시됨", clause.name),
            suggestion: None,
        })
    } else {
        None
    }
}

fn collect_issues(checks: &[ClauseCheck]) -> Vec<SpecificityIssue> {
    checks
        .iter()
        .filter_map(|check| {
            check
                .specificity
                .as_ref()
                .filter(|finding| finding.is_vague())
                .map(|finding| SpecificityIssue {
                    clause_name: check.name.clone(),
                    finding: finding.clone(),
                })
        })
        .collect()
}

/// `(found, total)` for one importance.
fn tally(checks: &[ClauseCheck], importance: Importance) -> (usize, usize) {
    checks
        .iter()
        .filter(|c| c.importance() == importance)
        .fold((0, 0), |(found, total), c| {
            (found + usize::from(c.found), total + 1)
        })
}

fn ratio_points(found: usize, total: usize, weight: f64) -> f64 {
    if total == 0 {
        0.0
    } else {
        found as f64 / total as f64 * weight
    }
}
