//! Runtime orchestrator for contract analysis sessions.
//!
//! The orchestrator wires the pieces around the engine:
//! - Intake: submission to text, with the minimum-length gate
//! - Evaluation: the configured rubric via counsel-core
//! - Retention: per-session results that expire after the configured TTL
//!
//! The analyzed text only lives for the duration of [`Orchestrator::analyze`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use counsel_core::{
    format_improvement_request, format_report, AnalysisResult, Evaluator, Rubric, RubricError,
};

use crate::config::{ConfigError, RuntimeConfig};
use crate::intake::{extract_text, IntakeError, Submission};
use crate::retention::{RetentionError, RetentionStore, SessionId};

/// Errors from the runtime orchestrator.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Rubric error: {0}")]
    Rubric(#[from] RubricError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Retention error: {0}")]
    Retention(#[from] RetentionError),

    #[error("Result for session {0} has expired")]
    ResultExpired(SessionId),

    #[error("No result for session {0}")]
    NoResult(SessionId),
}

/// Everything produced by one analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,

    /// Rendered report
    pub report: String,

    /// Rendered letter to the attorney
    pub improvement_request: String,

    /// When the retained result stops being retrievable
    pub expires_at: DateTime<Utc>,
}

/// Runs analyses and keeps their results per session.
pub struct Orchestrator {
    config: RuntimeConfig,
    rubric: Rubric,
    store: RetentionStore,
}

impl Orchestrator {
    /// Build an orchestrator from config, loading the custom rubric if one
    /// is configured.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let rubric = match &config.rubric.path {
            Some(path) => {
                info!(path = %path.display(), "Loading custom rubric");
                Rubric::from_file(path)?
            }
            None => Rubric::builtin().clone(),
        };
        Self::with_rubric(config, rubric)
    }

    pub fn with_rubric(config: RuntimeConfig, rubric: Rubric) -> Result<Self, RuntimeError> {
        config.validate()?;
        let store = RetentionStore::from_config(&config.retention)?;
        Ok(Self {
            config,
            rubric,
            store,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Analyze a submission and retain the result for `session`.
    ///
    /// A rejected submission leaves any previous result of the session
    /// untouched.
    pub fn analyze(
        &mut self,
        session: SessionId,
        submission: &Submission,
        now: DateTime<Utc>,
    ) -> Result<AnalysisOutcome, RuntimeError> {
        let text = extract_text(submission, &self.config.intake)?;
        let result = Evaluator::new(&self.rubric).evaluate(&text);
        drop(text);

        info!(
            session = %session,
            score = result.score,
            grade = ?result.grade,
            "Analysis complete"
        );

        let report = format_report(&result);
        let improvement_request = format_improvement_request(&result);
        let expires_at = self.store.put(session, result.clone(), now)?;

        Ok(AnalysisOutcome {
            result,
            report,
            improvement_request,
            expires_at,
        })
    }

    /// The session's retained result.
    pub fn result(
        &mut self,
        session: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<&AnalysisResult, RuntimeError> {
        let held = self.store.contains(session);
        match self.store.get(session, now) {
            Some(result) => Ok(result),
            None if held => {
                warn!(session = %session, "Requested result has expired");
                Err(RuntimeError::ResultExpired(session.clone()))
            }
            None => Err(RuntimeError::NoResult(session.clone())),
        }
    }

    /// Re-render the report of the session's retained result.
    pub fn report(&mut self, session: &SessionId, now: DateTime<Utc>) -> Result<String, RuntimeError> {
        self.result(session, now).map(format_report)
    }

    /// Re-render the improvement request of the session's retained result.
    pub fn improvement_request(
        &mut self,
        session: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<String, RuntimeError> {
        self.result(session, now).map(format_improvement_request)
    }

    /// Seconds left before the session's result expires.
    pub fn remaining(&self, session: &SessionId, now: DateTime<Utc>) -> u64 {
        self.store.remaining(session, now)
    }

    /// Discard the session's result immediately.
    pub fn clear(&mut self, session: &SessionId) -> bool {
        self.store.clear(session)
    }

    /// Drop every expired result.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        self.store.purge_expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use counsel_core::Grade;

    const CONTRACT: &str = "\
사건위임계약서
제4조 착수금 5,000,000원을 지급한다. 팀제로 운영하며 담당변호사는 추후 정한다.";

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap()
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(RuntimeConfig::default()).unwrap()
    }

    #[test]
    fn test_analyze_text() {
        let mut orch = orchestrator();
        let outcome = orch
            .analyze(SessionId::new("s1"), &Submission::text(CONTRACT), t0())
            .unwrap();

        assert!(outcome.result.has_risk("팀제운영"));
        assert_eq!(outcome.result.grade, Grade::Caution);
        assert_eq!(outcome.expires_at, t0() + Duration::minutes(5));
        assert!(outcome.report.contains("📊 계약서 품질 분석 결과"));
        assert!(outcome.improvement_request.contains("계약서 개선 요청서"));
    }

    #[test]
    fn test_analyze_pdf_pages() {
        let mut orch = orchestrator();
        let pages = CONTRACT.lines().map(String::from).collect();
        let outcome = orch
            .analyze(SessionId::new("s1"), &Submission::pdf_pages(pages), t0())
            .unwrap();
        assert!(outcome.result.is_found("착수금"));
    }

    #[test]
    fn test_short_text_rejected() {
        let mut orch = orchestrator();
        let result = orch.analyze(SessionId::new("s1"), &Submission::text("착수금"), t0());
        assert!(matches!(
            result,
            Err(RuntimeError::Intake(IntakeError::TooShort { .. }))
        ));
    }

    #[test]
    fn test_image_rejected() {
        let mut orch = orchestrator();
        let result = orch.analyze(SessionId::new("s1"), &Submission::image("image/jpeg"), t0());
        assert!(matches!(
            result,
            Err(RuntimeError::Intake(IntakeError::UnsupportedInput(_)))
        ));
    }

    #[test]
    fn test_rejection_keeps_previous_result() {
        let mut orch = orchestrator();
        let session = SessionId::new("s1");
        orch.analyze(session.clone(), &Submission::text(CONTRACT), t0())
            .unwrap();
        let _ = orch.analyze(session.clone(), &Submission::text("짧음"), t0());
        assert!(orch.result(&session, t0()).is_ok());
    }

    #[test]
    fn test_report_until_expiry() {
        let mut orch = orchestrator();
        let session = SessionId::new("s1");
        let outcome = orch
            .analyze(session.clone(), &Submission::text(CONTRACT), t0())
            .unwrap();

        let report = orch.report(&session, t0() + Duration::minutes(4)).unwrap();
        assert_eq!(report, outcome.report);
        assert_eq!(orch.remaining(&session, t0() + Duration::minutes(4)), 60);

        let expired = orch.report(&session, t0() + Duration::minutes(6));
        assert!(matches!(expired, Err(RuntimeError::ResultExpired(_))));

        let gone = orch.report(&session, t0() + Duration::minutes(6));
        assert!(matches!(gone, Err(RuntimeError::NoResult(_))));
    }

    #[test]
    fn test_improvement_request_and_clear() {
        let mut orch = orchestrator();
        let session = SessionId::new("s1");
        orch.analyze(session.clone(), &Submission::text(CONTRACT), t0())
            .unwrap();

        let letter = orch.improvement_request(&session, t0()).unwrap();
        assert!(letter.contains("1. 위험 조항 개선 요청"));

        assert!(orch.clear(&session));
        assert!(matches!(
            orch.improvement_request(&session, t0()),
            Err(RuntimeError::NoResult(_))
        ));
    }

    #[test]
    fn test_custom_min_chars() {
        let mut config = RuntimeConfig::default();
        config.intake.min_text_chars = 2;
        let mut orch = Orchestrator::new(config).unwrap();
        let outcome = orch
            .analyze(SessionId::new("s1"), &Submission::text("팀제"), t0())
            .unwrap();
        assert_eq!(outcome.result.score, 0);
    }

    #[test]
    fn test_missing_rubric_file() {
        let mut config = RuntimeConfig::default();
        config.rubric.path = Some("/nonexistent/rubric.yaml".into());
        assert!(matches!(
            Orchestrator::new(config),
            Err(RuntimeError::Rubric(RubricError::IoError(_)))
        ));
    }

    #[test]
    fn test_oversized_ttl_rejected_at_setup() {
        let config = RuntimeConfig::from_yaml("retention:\n  ttl: \"1000000years\"\n");
        assert!(matches!(config, Err(ConfigError::Invalid(_))));

        let mut config = RuntimeConfig::default();
        config.retention.ttl = std::time::Duration::from_secs(1_000_000 * 365 * 24 * 60 * 60);
        assert!(matches!(
            Orchestrator::new(config),
            Err(RuntimeError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_purge_expired() {
        let mut orch = orchestrator();
        orch.analyze(SessionId::new("a"), &Submission::text(CONTRACT), t0())
            .unwrap();
        assert_eq!(orch.purge_expired(t0() + Duration::minutes(1)), 0);
        assert_eq!(orch.purge_expired(t0() + Duration::minutes(6)), 1);
    }
}
