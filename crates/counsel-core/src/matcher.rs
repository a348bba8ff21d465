//! Keyword presence predicates.
//!
//! Everything the evaluator decides reduces to "does any of these keywords
//! occur in the text". Matching is case-sensitive containment, with no
//! tokenization or normalization, so that a finding can always be traced
//! back to a literal term of the rubric.

use crate::types::{Keyword, MatchMode, RiskPatternDef, SpecificityRule};

/// Check whether any keyword occurs in `text`.
///
/// An empty keyword list never matches.
pub fn contains_any(text: &str, keywords: &[Keyword]) -> bool {
    keywords.iter().any(|kw| kw.is_present(text))
}

/// Keywords that occur in `text`, in list order.
pub fn matched_keywords(text: &str, keywords: &[Keyword]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| kw.is_present(text))
        .map(|kw| kw.as_str().to_string())
        .collect()
}

/// Which side of a [`SpecificityRule`] the text hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecificityHits {
    pub has_vague: bool,
    pub has_specific: bool,
}

impl SpecificityHits {
    /// Hedge wording without any concrete wording. Specific wins.
    pub fn is_vague(&self) -> bool {
        self.has_vague && !self.has_specific
    }
}

pub fn specificity_hits(text: &str, rule: &SpecificityRule) -> SpecificityHits {
    SpecificityHits {
        has_vague: contains_any(text, &rule.vague_keywords),
        has_specific: contains_any(text, &rule.specific_keywords),
    }
}

/// Decide whether a risk pattern fires on `text`.
///
/// No trigger keyword, no finding. Otherwise the pattern's [`MatchMode`]
/// decides.
pub fn risk_pattern_fires(text: &str, pattern: &RiskPatternDef) -> bool {
    if !contains_any(text, &pattern.keywords) {
        return false;
    }

    match &pattern.mode {
        MatchMode::Simple { anti_keywords } => !contains_any(text, anti_keywords),
        MatchMode::VagueCheck(rule) => specificity_hits(text, rule).is_vague(),
    }
}
