//! Plain-text renderings of an [`AnalysisResult`].
//!
//! All functions here are pure: the same result always renders to the same
//! bytes. Output is Korean, matching the vocabulary of the rubric.

use crate::types::{AnalysisResult, ClauseCheck, Importance};

const REPORT_RULE_WIDTH: usize = 50;
const LETTER_RULE_WIDTH: usize = 60;

/// Questions every client should put to the attorney, whatever the analysis found.
pub const VERIFICATION_QUESTIONS: [&str; 5] = [
    "가압류/가처분도 위임 범위에 포함되나요?",
    "시간당 차지 금액이 얼마인가요?",
    "화해로 끝나도 성과보수를 내야 하나요?",
    "일부 승소 시 비율 계산은 어떻게 하나요?",
    "계약 해지 시 환불 금액은 어떻게 계산하나요?",
];

/// Line-oriented text builder with banner sections.
struct Sheet {
    lines: Vec<String>,
    rule: String,
}

impl Sheet {
    fn new(rule_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            rule: "=".repeat(rule_width),
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn rule(&mut self) {
        let rule = self.rule.clone();
        self.lines.push(rule);
    }

    /// Rule, title, rule, blank.
    fn banner(&mut self, title: &str) {
        self.rule();
        self.line(title);
        self.rule();
        self.blank();
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Render the full analysis report.
pub fn format_report(result: &AnalysisResult) -> String {
    let mut sheet = Sheet::new(REPORT_RULE_WIDTH);

    sheet.banner("📊 계약서 품질 분석 결과");
    sheet.line(format!(
        "{} 종합 점수: {}/{} ({})",
        result.grade.marker(),
        result.score,
        result.max_score,
        result.grade.label()
    ));
    sheet.line(summary_line(result));
    sheet.blank();

    if result.risk_patterns.is_empty() {
        sheet.line("✅ 위험 조항이 발견되지 않았습니다.");
        sheet.blank();
    } else {
        sheet.banner(&format!("⚠️ 위험 조항 발견 ({}개)", result.risk_patterns.len()));
        for (i, risk) in result.risk_patterns.iter().enumerate() {
            let def = &risk.definition;
            sheet.line(format!("[{}] {} {}", i + 1, def.risk_level.marker(), def.description));
            sheet.line(format!("    위험도: {}", def.risk_level.label()));
            sheet.line(format!("    이유: {}", def.why_risky));
            sheet.line(format!("    💡 제안: {}", def.suggestion));
            sheet.blank();
        }
    }

    if !result.specificity_issues.is_empty() {
        sheet.banner(&format!(
            "📝 구체성 문제 ({}개)",
            result.specificity_issues.len()
        ));
        sheet.line("다음 조항들이 있지만 충분히 구체적이지 않습니다:");
        sheet.blank();
        for (i, issue) in result.specificity_issues.iter().enumerate() {
            sheet.line(format!("[{}] ⚠️ {}", i + 1, issue.clause_name));
            sheet.line(format!("    문제: {}", issue.finding.description));
            if let Some(suggestion) = &issue.finding.suggestion {
                sheet.line(format!("    💡 제안: {}", suggestion));
            }
            sheet.blank();
        }
        sheet.line("⚠️ 모호한 표현 대신 구체적인 금액/방법을 요청하세요!");
        sheet.blank();
    }

    sheet.banner("📋 필수 조항 체크");
    for check in result.clauses_with(Importance::Required) {
        checklist_entry(&mut sheet, check, "❌", "⚠️ 위험");
    }

    sheet.banner("📌 권장 조항");
    for check in result.clauses_with(Importance::Recommended) {
        checklist_entry(&mut sheet, check, "⭕", "💡 있으면 더 좋아요");
    }

    if result.hourly_billing {
        sheet.banner("⏱️ 시간제 계약 조항");
        for check in result.clauses_with(Importance::RequiredIfHourly) {
            checklist_entry(&mut sheet, check, "❌", "⚠️ 위험");
        }
    }

    sheet.finish()
}

fn checklist_entry(sheet: &mut Sheet, check: &ClauseCheck, missing_mark: &str, missing_label: &str) {
    let def = &check.definition;
    let mark = if check.found { "✅" } else { missing_mark };
    sheet.line(format!("{} {}: {}", mark, check.name, def.description));
    if !check.found {
        sheet.line(format!("    {}: {}", missing_label, def.risk_if_missing));
        if !def.standard_location.is_empty() {
            sheet.line(format!("    📍 표준 위치: {}", def.standard_location));
        }
    }
    sheet.blank();
}

/// One-line dashboard: required coverage, risk count, specificity issue count.
pub fn summary_line(result: &AnalysisResult) -> String {
    let b = &result.breakdown;
    format!(
        "필수 조항 {}/{} · 위험 조항 {}개 · 구체성 문제 {}개",
        b.required_found,
        b.required_total,
        result.risk_patterns.len(),
        result.specificity_issues.len()
    )
}

/// Render a short summary: score line, dashboard, and the formula terms.
pub fn format_summary(result: &AnalysisResult) -> String {
    let b = &result.breakdown;
    let lines = [
        format!(
            "{} {}/{} ({})",
            result.grade.marker(),
            result.score,
            result.max_score,
            result.grade.label()
        ),
        summary_line(result),
        format!(
            "필수 {:.1} - 위험 {} + 권장 {:.1} - 구체성 {} = {:.1}",
            b.coverage_points,
            b.risk_penalty,
            b.recommended_points,
            b.specificity_penalty,
            b.raw_total
        ),
    ];
    lines.join("\n")
}

/// Render the improvement request letter addressed to the attorney.
///
/// Section numbers are fixed; a section with nothing to say is skipped
/// without renumbering the rest. The verification questions are always
/// included.
pub fn format_improvement_request(result: &AnalysisResult) -> String {
    let mut sheet = Sheet::new(LETTER_RULE_WIDTH);

    sheet.banner("계약서 개선 요청서");
    sheet.line("변호사님께,");
    sheet.blank();
    sheet.line("계약서를 검토한 결과 다음 사항에 대해 명확히 해주시면 감사하겠습니다:");
    sheet.blank();

    if !result.risk_patterns.is_empty() {
        sheet.banner("1. 위험 조항 개선 요청");
        for (i, risk) in result.risk_patterns.iter().enumerate() {
            sheet.line(format!("[{}] {}", i + 1, risk.definition.description));
            sheet.line(format!("    → 개선 요청: {}", risk.definition.suggestion));
            sheet.blank();
        }
    }

    if !result.specificity_issues.is_empty() {
        sheet.banner("2. 구체성 개선 요청");
        for (i, issue) in result.specificity_issues.iter().enumerate() {
            sheet.line(format!("[{}] {}", i + 1, issue.clause_name));
            if let Some(suggestion) = &issue.finding.suggestion {
                sheet.line(format!("    → {}", suggestion));
            }
            sheet.blank();
        }
    }

    let missing = result.missing_required();
    if !missing.is_empty() {
        sheet.banner("3. 누락된 필수 조항");
        for check in missing {
            sheet.line(format!("- {}: {}", check.name, check.definition.description));
        }
        sheet.blank();
    }

    sheet.banner("4. 추가 확인 질문");
    for question in VERIFICATION_QUESTIONS {
        sheet.line(format!("□ {}", question));
    }
    sheet.blank();
    sheet.rule();
    sheet.blank();
    sheet.line("위 사항들에 대해 명확한 답변 부탁드립니다.");
    sheet.line("감사합니다.");
    sheet.blank();
    sheet.line("의뢰인 올림");

    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Evaluator;

    #[test]
    fn test_report_is_deterministic() {
        let result = Evaluator::builtin().evaluate("팀제로 운영하며 착수금은 협의한다");
        assert_eq!(format_report(&result), format_report(&result));
        assert_eq!(
            format_improvement_request(&result),
            format_improvement_request(&result)
        );
    }

    #[test]
    fn test_report_header_and_score() {
        let result = Evaluator::builtin().evaluate("");
        let report = format_report(&result);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "=".repeat(50));
        assert_eq!(lines[1], "📊 계약서 품질 분석 결과");
        assert_eq!(lines[4], "🚨 종합 점수: 0/100 (주의)");
        assert!(report.contains("✅ 위험 조항이 발견되지 않았습니다."));
        assert!(!report.contains("📝 구체성 문제"));
    }

    #[test]
    fn test_report_lists_risks_in_catalog_order() {
        let result = Evaluator::builtin().evaluate("팀제로 운영하며 현금 결제 시 할인");
        let report = format_report(&result);
        assert!(report.contains("⚠️ 위험 조항 발견 (2개)"));
        assert!(report.contains("[1] 🔴 실제 담당 변호사가 명시되지 않음"));
        assert!(report.contains("[2] 🔴🔴 현금 결제 시 할인 제안"));
        assert!(report.contains("    위험도: 매우높음"));
    }

    #[test]
    fn test_report_missing_required_shows_risk() {
        let result = Evaluator::builtin().evaluate("");
        let report = format_report(&result);
        assert!(report.contains("❌ 담당변호사: 실제로 사건을 담당할 변호사 이름"));
        assert!(report.contains("    ⚠️ 위험: 상담한 변호사와 다른 사람이 사건을 맡을 수 있음"));
        assert!(report.contains("⭕ 비밀유지: 정보 보호 의무"));
        assert!(report.contains("    💡 있으면 더 좋아요: 정보가 유출될 수 있음"));
    }

    #[test]
    fn test_report_specificity_section() {
        let result = Evaluator::builtin().evaluate("변호사가 책임진다");
        let report = format_report(&result);
        assert!(report.contains("📝 구체성 문제 (1개)"));
        assert!(report.contains("[1] ⚠️ 변호사책임"));
        assert!(report.contains("    문제: 변호사책임 조항이 있지만 구체적이지 않음"));
    }

    #[test]
    fn test_hourly_section_only_for_hourly_contracts() {
        let report = format_report(&Evaluator::builtin().evaluate("착수금 5,000,000원"));
        assert!(!report.contains("⏱️ 시간제 계약 조항"));

        let report = format_report(&Evaluator::builtin().evaluate("시간제로 보수를 정한다"));
        assert!(report.contains("⏱️ 시간제 계약 조항"));
        assert!(report.contains("❌ 시간당요율: 시간제 계약 시 시간당 요율"));
    }

    #[test]
    fn test_letter_always_has_questions() {
        let result = Evaluator::builtin().evaluate("");
        let letter = format_improvement_request(&result);
        assert!(letter.starts_with(&"=".repeat(60)));
        assert!(!letter.contains("1. 위험 조항 개선 요청"));
        assert!(letter.contains("3. 누락된 필수 조항"));
        assert!(letter.contains("- 착수금: 초기 지급 금액"));
        assert!(letter.contains("4. 추가 확인 질문"));
        for question in VERIFICATION_QUESTIONS {
            assert!(letter.contains(&format!("□ {}", question)));
        }
        assert!(letter.ends_with("의뢰인 올림"));
    }

    #[test]
    fn test_letter_numbering_is_fixed() {
        let result = Evaluator::builtin().evaluate("팀제");
        let letter = format_improvement_request(&result);
        assert!(letter.contains("1. 위험 조항 개선 요청"));
        assert!(letter.contains("[1] 실제 담당 변호사가 명시되지 않음"));
        assert!(letter.contains("    → 개선 요청: 담당 변호사 이름과 변호사 등록번호를 명시해달라고 요청하세요"));
        assert!(!letter.contains("2. 구체성 개선 요청"));
        assert!(letter.contains("3. 누락된 필수 조항"));
    }

    #[test]
    fn test_summary_line() {
        let result = Evaluator::builtin().evaluate("착수금 5,000,000원");
        assert_eq!(summary_line(&result), "필수 조항 1/7 · 위험 조항 0개 · 구체성 문제 0개");
    }
}
