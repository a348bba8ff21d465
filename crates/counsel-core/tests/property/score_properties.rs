use counsel_core::{evaluate, format_improvement_request, format_report, Grade};
use proptest::prelude::*;

proptest! {
    #[test]
    fn score_is_bounded(s in ".{0,400}") {
        let result = evaluate(&s);
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.max_score, 100);
        prop_assert_eq!(result.grade, Grade::from_score(result.score));
    }

    #[test]
    fn evaluation_is_deterministic(s in ".{0,200}") {
        let first = evaluate(&s);
        let second = evaluate(&s);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(format_report(&first), format_report(&second));
        prop_assert_eq!(format_improvement_request(&first), format_improvement_request(&second));
    }

    #[test]
    fn every_clause_is_checked(s in ".{0,200}") {
        let result = evaluate(&s);
        prop_assert_eq!(result.required_check.len(), 19);
    }

    #[test]
    fn appending_text_never_loses_a_clause(a in ".{0,100}", b in ".{0,100}") {
        let before = evaluate(&a);
        let after = evaluate(&format!("{}{}", a, b));
        for (x, y) in before.required_check.iter().zip(after.required_check.iter()) {
            prop_assert!(!x.found || y.found, "{} lost after append", x.name);
        }
    }

    #[test]
    fn anti_keyword_always_suppresses(s in ".{0,100}") {
        let result = evaluate(&format!("{} 담당 변경 시 동의를 받는다", s));
        prop_assert!(!result.has_risk("담당변경가능"));
    }

    #[test]
    fn specific_wording_beats_vague(s in ".{0,100}") {
        let result = evaluate(&format!("{} 변호사가 책임진다. 한도 1만원", s));
        prop_assert!(result
            .specificity_issues
            .iter()
            .all(|issue| issue.clause_name != "변호사책임"));
    }

    #[test]
    fn breakdown_matches_score(s in "[가-힣 0-9]{0,300}") {
        let result = evaluate(&s);
        prop_assert_eq!(result.breakdown.final_score(), result.score);
        prop_assert_eq!(result.breakdown.required_total, 7);
        prop_assert_eq!(result.breakdown.recommended_total, 11);
    }
}
