//! Built-in risk pattern catalog.

use crate::types::{literals, MatchMode, RiskLevel, RiskPatternDef, SpecificityRule};

/// Terms that mark a contract as billed on a time basis.
pub static HOURLY_MARKERS: &[&str] = &["시간제", "time charge", "타임차지", "시간당"];

/// How a static risk entry decides to fire once a trigger is present.
#[derive(Debug, Clone, Copy)]
pub enum EntryMode {
    /// Suppressed by any of these anti-keywords.
    Simple(&'static [&'static str]),
    VagueCheck {
        specific: &'static [&'static str],
        vague: &'static [&'static str],
    },
}

/// One row of the static risk pattern table.
#[derive(Debug, Clone, Copy)]
pub struct RiskEntry {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub risk_level: RiskLevel,
    pub description: &'static str,
    pub why_risky: &'static str,
    pub suggestion: &'static str,
    pub mode: EntryMode,
}

impl From<EntryMode> for MatchMode {
    fn from(mode: EntryMode) -> Self {
        match mode {
            EntryMode::Simple(anti) => MatchMode::Simple {
                anti_keywords: literals(anti),
            },
            EntryMode::VagueCheck { specific, vague } => {
                MatchMode::VagueCheck(SpecificityRule::new(literals(specific), literals(vague)))
            }
        }
    }
}

impl From<&RiskEntry> for RiskPatternDef {
    fn from(entry: &RiskEntry) -> Self {
        RiskPatternDef {
            name: entry.name.to_string(),
            keywords: literals(entry.keywords),
            risk_level: entry.risk_level,
            description: entry.description.to_string(),
            why_risky: entry.why_risky.to_string(),
            suggestion: entry.suggestion.to_string(),
            mode: entry.mode.into(),
        }
    }
}

// Terms written like "계약 후.*시간" are literal, not regular expressions.
pub static RISK_TABLE: &[RiskEntry] = &[
    RiskEntry {
        name: "팀제운영",
        keywords: &["팀제", "팀으로", "공동으로", "협업"],
        risk_level: RiskLevel::High,
        description: "실제 담당 변호사가 명시되지 않음",
        why_risky: "상담한 변호사가 아닌 다른 변호사(특히 경험이 적은 변호사)가 실제로 사건을 처리할 수 있습니다.",
        suggestion: "담당 변호사 이름과 변호사 등록번호를 명시해달라고 요청하세요",
        mode: EntryMode::Simple(&[]),
    },
    RiskEntry {
        name: "환불불가",
        keywords: &["일절 환불", "환불 불가", "환불되지 않", "반환하지 않"],
        risk_level: RiskLevel::High,
        description: "변호사가 일을 착수하지 않아도 환불 불가",
        why_risky: "변호사가 업무를 제대로 수행하지 않아도 돈을 돌려받을 수 없습니다.",
        suggestion: "착수 전 100% 환불, 소장 제출 전 50% 환불 등 단계별 환불 규정을 추가해달라고 요청하세요",
        mode: EntryMode::Simple(&[]),
    },
    RiskEntry {
        name: "72시간조항",
        keywords: &["72시간", "3일", "계약 후.*시간"],
        risk_level: RiskLevel::VeryHigh,
        description: "계약 후 72시간 경과 시 무조건 환불 불가",
        why_risky: "변협이 '72시간 약관'을 사용한 법무법인에 정직 6개월 중징계를 검토한 바 있습니다. 구조적으로 환불을 차단하는 조항입니다.",
        suggestion: "이 조항은 변협에서 중징계 대상으로 본 악질 조항입니다. 계약하지 마세요",
        mode: EntryMode::Simple(&[]),
    },
    RiskEntry {
        name: "추가비용애매",
        keywords: &["추가 비용 발생", "별도 청구", "실비 청구"],
        risk_level: RiskLevel::High,
        description: "추가 비용 항목 및 금액이 불명확",
        why_risky: "나중에 예상하지 못한 금액이 청구될 수 있습니다.",
        suggestion: "예상되는 추가 비용 항목(인지대, 송달료 등)과 대략적인 금액을 명시해달라고 요청하세요",
        mode: EntryMode::Simple(&["인지대", "송달료", "감정료"]),
    },
    RiskEntry {
        name: "비용상한없음",
        keywords: &["무제한", "상한 없", "제한 없"],
        risk_level: RiskLevel::High,
        description: "추가 비용이나 성과보수에 상한이 없음",
        why_risky: "예상보다 훨씬 많은 금액이 청구될 수 있습니다.",
        suggestion: "총 비용 한도액 또는 성과보수 상한을 명시해달라고 요청하세요",
        mode: EntryMode::Simple(&[]),
    },
    RiskEntry {
        name: "담당변경가능",
        keywords: &["담당 변경", "변경할 수 있", "교체할 수"],
        risk_level: RiskLevel::Medium,
        description: "의뢰인 동의 없이 담당 변호사 변경 가능",
        why_risky: "내가 선택한 변호사가 아닌 다른 사람이 갑자기 사건을 맡을 수 있습니다.",
        suggestion: "담당 변호사 변경 시 사전 동의 조항을 추가해달라고 요청하세요",
        mode: EntryMode::Simple(&["동의", "승인", "사전 협의"]),
    },
    RiskEntry {
        name: "소통불명확",
        keywords: &["중요한.*통지", "필요한.*보고"],
        risk_level: RiskLevel::Low,
        description: "연락 빈도가 불명확",
        why_risky: "연락이 잘 안 되거나, 중요한 정보를 늦게 알 수 있습니다.",
        suggestion: "주 1회 또는 월 1회 등 정기 보고 조항을 추가해달라고 요청하세요",
        mode: EntryMode::Simple(&["주 1회", "월 1회", "분기별", "정기적"]),
    },
    RiskEntry {
        name: "조정권한독단",
        keywords: &["조정.*할 수 있", "화해.*할 수 있"],
        risk_level: RiskLevel::Medium,
        description: "의뢰인 동의 없이 조정/화해 가능",
        why_risky: "원하지 않는 조건으로 조정되거나 화해될 수 있습니다.",
        suggestion: "조정이나 화해 시 반드시 의뢰인 사전 동의를 받는다는 조항을 추가해달라고 요청하세요",
        mode: EntryMode::Simple(&["동의", "승낙", "사전 협의"]),
    },
    RiskEntry {
        name: "성공기준모호",
        keywords: &["성공 시", "승소 시"],
        risk_level: RiskLevel::Medium,
        description: "성공 기준이 구체적이지 않음",
        why_risky: "나중에 성공 여부로 분쟁이 발생할 수 있습니다.",
        suggestion: "전부 승소/일부 승소 시 각각 얼마인지, 승소 비율 계산 방법을 명시해달라고 요청하세요",
        mode: EntryMode::Simple(&["전부 승소", "일부 승소", "승소 비율"]),
    },
    RiskEntry {
        name: "시간제조항없음",
        keywords: &["시간제", "time charge", "타임차지"],
        risk_level: RiskLevel::High,
        description: "시간제 계약인데 시간당 요율이 없음",
        why_risky: "시간당 얼마인지 모른 채 무제한으로 청구될 수 있습니다.",
        suggestion: "시간당 요율을 명확히 명시해달라고 요청하세요",
        mode: EntryMode::Simple(&["시간당", "원/시간", "보수율"]),
    },
    RiskEntry {
        name: "잔금기한없음",
        keywords: &["잔금", "나머지"],
        risk_level: RiskLevel::Medium,
        description: "잔금 납부 기한이 없음",
        why_risky: "잔금 미납 시 계약 해지되거나, 기납부 착수금도 환불 안 될 수 있습니다.",
        suggestion: "잔금을 언제까지 내야 하는지 명시해달라고 요청하세요",
        mode: EntryMode::Simple(&["까지", "이내", "기한"]),
    },
    RiskEntry {
        name: "임의해지",
        keywords: &["일방적", "임의로", "자의적"],
        risk_level: RiskLevel::High,
        description: "변호사가 일방적으로 계약 해지 가능",
        why_risky: "갑자기 사임하고 착수금도 환불 안 할 수 있습니다.",
        suggestion: "계약 해지 시 사전 통지 및 환불 규정을 명시해달라고 요청하세요",
        mode: EntryMode::Simple(&[]),
    },
    RiskEntry {
        name: "책임조항모호",
        keywords: &["책임", "배상"],
        risk_level: RiskLevel::Medium,
        description: "변호사 책임 조항이 있지만 구체적이지 않음",
        why_risky: "변호사가 잘못해도 '상당한 금액' 같은 애매한 표현으로 책임을 회피할 수 있습니다.",
        suggestion: "구체적인 금액(예: 착수금의 2배, 손해액 전액 등)과 이자율을 명시해달라고 요청하세요",
        mode: EntryMode::VagueCheck {
            specific: &["원", "만원", "억", "지연.*이자", "지체.*이자"],
            vague: &["적절한", "상당한", "합리적인", "책임진다", "배상한다"],
        },
    },
    RiskEntry {
        name: "금액표기모호",
        keywords: &["금액", "보수", "비용", "수임료"],
        risk_level: RiskLevel::High,
        description: "금액이 '협의' 또는 '적정 금액' 등으로만 표기됨",
        why_risky: "나중에 예상보다 훨씬 많은 금액이 청구될 수 있습니다.",
        suggestion: "구체적인 금액 또는 계산 방식을 명시해달라고 요청하세요",
        mode: EntryMode::VagueCheck {
            specific: &["원", "만원", "억", "%"],
            vague: &["적정", "합리적", "협의", "별도 협의", "추후 결정"],
        },
    },
    RiskEntry {
        name: "위임범위좁음",
        keywords: &["위임", "범위", "사건"],
        risk_level: RiskLevel::High,
        description: "위임 범위에 가압류/가처분 등이 포함되지 않음",
        why_risky: "본안 소송만 포함되고 가압류/가처분은 추가 비용이 발생할 수 있습니다. 의뢰인은 당연히 포함인 줄 알았는데 나중에 추가 청구됩니다.",
        suggestion: "가압류, 가처분, 강제집행도 포함되는지 반드시 확인하세요. 별도 비용일 수 있습니다",
        mode: EntryMode::Simple(&["가압류", "가처분", "강제집행", "보전처분"]),
    },
    RiskEntry {
        name: "시간차지과다",
        keywords: &["시간당", "time charge", "시간제"],
        risk_level: RiskLevel::High,
        description: "시간당 차지 금액이 과다하거나 불명확함",
        why_risky: "계약 해지 시 시간당 비용으로 공제되는데, 금액이 과다하면 환불이 거의 없을 수 있습니다.",
        suggestion: "대형 로펌 기준 시간당 70~150만원입니다. 이를 초과하거나 금액이 명시되지 않았다면 확인하세요",
        mode: EntryMode::Simple(&[]),
    },
    RiskEntry {
        name: "현금할인제시",
        keywords: &["현금", "할인", "세금", "탈세"],
        risk_level: RiskLevel::VeryHigh,
        description: "현금 결제 시 할인 제안",
        why_risky: "세무 문제에 연루될 수 있고, 나중에 계약서 효력에 문제가 생길 수 있습니다. 변호사 징계 대상입니다.",
        suggestion: "이는 탈세 위험이 있는 불법 행위입니다. 절대 거래하지 마세요",
        mode: EntryMode::Simple(&[]),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_mode_conversion() {
        let simple: MatchMode = EntryMode::Simple(&["동의"]).into();
        assert_eq!(
            simple,
            MatchMode::Simple {
                anti_keywords: literals(&["동의"])
            }
        );

        let vague: MatchMode = EntryMode::VagueCheck {
            specific: &["원"],
            vague: &["협의"],
        }
        .into();
        match vague {
            MatchMode::VagueCheck(rule) => {
                assert_eq!(rule.specific_keywords, literals(&["원"]));
                assert_eq!(rule.vague_keywords, literals(&["협의"]));
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn test_vague_check_entries() {
        let names: Vec<&str> = RISK_TABLE
            .iter()
            .filter(|e| matches!(e.mode, EntryMode::VagueCheck { .. }))
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["책임조항모호", "금액표기모호"]);
    }

    #[test]
    fn test_very_high_entries() {
        let names: Vec<&str> = RISK_TABLE
            .iter()
            .filter(|e| e.risk_level == RiskLevel::VeryHigh)
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["72시간조항", "현금할인제시"]);
    }
}
