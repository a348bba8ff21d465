//! Built-in clause catalog.
//!
//! Clauses of the standard attorney retainer form (사건위임계약서) that a
//! client should expect to see, with the terms that evidence each one.

use crate::types::{literals, ClauseDef, Importance, SpecificityRule};

/// One row of the static clause table.
#[derive(Debug, Clone, Copy)]
pub struct ClauseEntry {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub importance: Importance,
    pub standard_location: &'static str,
    pub description: &'static str,
    pub risk_if_missing: &'static str,
    pub specificity: Option<SpecificityEntry>,
}

/// Concrete and hedge terms for a clause that must be stated concretely.
#[derive(Debug, Clone, Copy)]
pub struct SpecificityEntry {
    pub specific: &'static [&'static str],
    pub vague: &'static [&'static str],
}

impl From<&ClauseEntry> for ClauseDef {
    fn from(entry: &ClauseEntry) -> Self {
        ClauseDef {
            name: entry.name.to_string(),
            keywords: literals(entry.keywords),
            importance: entry.importance,
            standard_location: entry.standard_location.to_string(),
            description: entry.description.to_string(),
            risk_if_missing: entry.risk_if_missing.to_string(),
            specificity: entry
                .specificity
                .map(|s| SpecificityRule::new(literals(s.specific), literals(s.vague))),
        }
    }
}

pub static CLAUSE_TABLE: &[ClauseEntry] = &[
    ClauseEntry {
        name: "담당변호사",
        keywords: &["담당변호사", "담당 변호사", "수임변호사"],
        importance: Importance::Required,
        standard_location: "계약서 하단",
        description: "실제로 사건을 담당할 변호사 이름",
        risk_if_missing: "상담한 변호사와 다른 사람이 사건을 맡을 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "변호사등록번호",
        keywords: &["등록번호", "변호사 번호", "변호사등록번호"],
        importance: Importance::Recommended,
        standard_location: "계약서 하단",
        description: "변호사 자격 확인",
        risk_if_missing: "가짜 변호사일 가능성 확인 불가",
        specificity: None,
    },
    ClauseEntry {
        name: "위임범위",
        keywords: &["위임한계", "심급", "당해 심급"],
        importance: Importance::Required,
        standard_location: "제2조",
        description: "어디까지 해주는지 명시",
        risk_if_missing: "추가 비용 발생할 업무가 불명확",
        specificity: None,
    },
    ClauseEntry {
        name: "착수금",
        keywords: &["착수보수", "착수금", "선급금"],
        importance: Importance::Required,
        standard_location: "제4조 또는 제6조",
        description: "초기 지급 금액",
        risk_if_missing: "비용이 명시되지 않음",
        specificity: None,
    },
    ClauseEntry {
        name: "환불조건",
        keywords: &["반환", "환불", "지급의무"],
        importance: Importance::Required,
        standard_location: "제4조 또는 제6조",
        description: "언제 얼마를 돌려받을 수 있는지",
        risk_if_missing: "일 안 해도 돈 못 받을 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "성공보수",
        keywords: &["성과보수", "성공보수"],
        importance: Importance::Required,
        standard_location: "제5조 또는 제7조",
        description: "승소 시 지급 금액",
        risk_if_missing: "나중에 추가 청구 가능",
        specificity: None,
    },
    ClauseEntry {
        name: "성공기준",
        keywords: &["전부 승소", "일부 승소", "승소 비율", "승소로 보는"],
        importance: Importance::Required,
        standard_location: "제5조 또는 제7조",
        description: "어떤 경우에 성공으로 보는지",
        risk_if_missing: "성공 여부로 분쟁 발생 가능",
        specificity: None,
    },
    ClauseEntry {
        name: "추가비용",
        keywords: &["인지대", "송달료", "감정료", "실비"],
        importance: Importance::Required,
        standard_location: "제6조 또는 제8조",
        description: "추가로 발생하는 비용 항목",
        risk_if_missing: "예상 못한 비용 청구 가능",
        specificity: None,
    },
    ClauseEntry {
        name: "예치금액",
        keywords: &["예치", "충당하기 위하여"],
        importance: Importance::Recommended,
        standard_location: "제6조 또는 제8조",
        description: "추가 비용 예치금 금액",
        risk_if_missing: "얼마를 미리 내야 하는지 모름",
        specificity: None,
    },
    ClauseEntry {
        name: "출장비기준",
        keywords: &["출장 일당", "1일 금"],
        importance: Importance::Recommended,
        standard_location: "제6조 또는 제8조",
        description: "출장 시 1일당 금액",
        risk_if_missing: "출장비가 무제한으로 청구될 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "통지의무",
        keywords: &["통지", "보고", "알려야"],
        importance: Importance::Recommended,
        standard_location: "제8조 또는 제10조",
        description: "처리 상황을 알려주는 의무",
        risk_if_missing: "연락이 안 될 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "자료보관기간",
        keywords: &["3개월", "보관", "폐기"],
        importance: Importance::Recommended,
        standard_location: "제10조~제12조",
        description: "서류를 언제까지 보관하는지",
        risk_if_missing: "중요 서류가 바로 폐기될 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "비밀유지",
        keywords: &["비밀", "비밀유지"],
        importance: Importance::Recommended,
        standard_location: "제13조~제15조",
        description: "정보 보호 의무",
        risk_if_missing: "정보가 유출될 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "조정화해권한",
        keywords: &["조정", "화해", "동의", "승낙"],
        importance: Importance::Recommended,
        standard_location: "특약사항",
        description: "조정이나 화해 시 의뢰인 동의 필요 여부",
        risk_if_missing: "의뢰인 동의 없이 조정/화해될 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "시간당요율",
        keywords: &["시간당", "보수율", "time charge"],
        importance: Importance::RequiredIfHourly,
        standard_location: "별첨",
        description: "시간제 계약 시 시간당 요율",
        risk_if_missing: "시간당 얼마인지 모름",
        specificity: None,
    },
    ClauseEntry {
        name: "변호사책임",
        // "변호사.*책임" is kept as a literal term.
        keywords: &["손해배상", "배상", "책임", "변호사.*책임"],
        importance: Importance::Recommended,
        standard_location: "특약사항 또는 본문",
        description: "변호사의 잘못으로 손해 발생 시 책임",
        risk_if_missing: "변호사가 잘못해도 책임 안 질 수 있음",
        specificity: Some(SpecificityEntry {
            specific: &["원", "만원", "억", "배상", "이자", "지연"],
            vague: &["적절한", "상당한", "합리적인", "책임진다", "배상한다"],
        }),
    },
    ClauseEntry {
        name: "강제집행범위",
        keywords: &["가압류", "가처분", "강제집행", "보전처분"],
        importance: Importance::Recommended,
        standard_location: "위임범위 조항",
        description: "본안 소송 외 추가 절차 포함 여부",
        risk_if_missing: "가압류/가처분 진행 시 추가 비용 청구될 수 있음",
        specificity: None,
    },
    ClauseEntry {
        name: "승소범위정의",
        keywords: &["승소", "성공", "화해", "조정", "승소 기준"],
        importance: Importance::Recommended,
        standard_location: "성공보수 조항",
        description: "화해/조정도 승소로 보는지 여부",
        risk_if_missing: "화해로 끝났는데 성과보수 청구될 수 있음",
        specificity: Some(SpecificityEntry {
            specific: &["전부 승소", "일부 승소", "비율", "판결"],
            vague: &["성공 시", "승소 시", "유리하게"],
        }),
    },
    ClauseEntry {
        name: "시간차지방식",
        keywords: &["시간당", "time charge", "시간제", "공제"],
        importance: Importance::Recommended,
        standard_location: "환불조건 조항",
        description: "계약 해지 시 시간당 비용 공제 방식",
        risk_if_missing: "환불 시 예상보다 많이 공제될 수 있음",
        specificity: Some(SpecificityEntry {
            specific: &["만원", "원", "시간당"],
            vague: &["합리적", "적정", "통상적"],
        }),
    },
];
