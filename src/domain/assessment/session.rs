//! Assessment session aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, StateMachine, Timestamp, UserId,
};

use super::question::{
    find_question, find_quick_question, group_questions, group_size, EvaluationQuestion,
    QuestionGroup, QuickQuestion, QUICK_BANK,
};

/// How the assessment gathers profile information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    /// The user declares their types directly.
    KnownTypes,
    /// Exactly three fixed questions for immediate optimization.
    Quick,
    /// Multi-phase discovery protocol.
    FullDiscovery,
}

impl std::fmt::Display for AssessmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KnownTypes => write!(f, "known_types"),
            Self::Quick => write!(f, "quick"),
            Self::FullDiscovery => write!(f, "full_discovery"),
        }
    }
}

/// Phase marker of a discovery session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryPhase {
    /// ADHD, MBTI, and cognitive-style question groups.
    Screening,
    /// Behavioral preference questions.
    PreferenceTuning,
    /// Passive refinement from interaction behavior.
    Continuous,
    /// Profile confirmed by the user.
    Confirmed,
}

impl StateMachine for DiscoveryPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DiscoveryPhase::*;
        matches!(
            (self, target),
            (Screening, PreferenceTuning)
                | (Screening, Continuous)
                | (PreferenceTuning, Continuous)
                | (PreferenceTuning, Confirmed)
                | (Continuous, Confirmed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DiscoveryPhase::*;
        match self {
            Screening => vec![PreferenceTuning, Continuous],
            PreferenceTuning => vec![Continuous, Confirmed],
            Continuous => vec![Confirmed],
            Confirmed => vec![],
        }
    }
}

impl std::fmt::Display for DiscoveryPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Screening => write!(f, "screening"),
            Self::PreferenceTuning => write!(f, "preference_tuning"),
            Self::Continuous => write!(f, "continuous"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
    Abandoned,
}

/// One recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub option_index: usize,
    pub sequence: u32,
}

/// Presentation view of the next question to ask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub question_id: String,
    pub group: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub progress: String,
}

impl QuestionView {
    fn from_bank(question: &EvaluationQuestion, answered: usize, total: usize) -> Self {
        Self {
            question_id: question.id.to_string(),
            group: question.group.to_string(),
            prompt: question.prompt.to_string(),
            options: question.options.iter().map(|o| o.text.to_string()).collect(),
            progress: format!("{}: {}/{}", question.group, answered, total),
        }
    }

    fn from_quick(question: &QuickQuestion, answered: usize) -> Self {
        Self {
            question_id: question.id.to_string(),
            group: "Quick Assessment".to_string(),
            prompt: question.prompt.to_string(),
            options: question.options.iter().map(|o| o.to_string()).collect(),
            progress: format!("Quick Assessment: {}/{}", answered, QUICK_BANK.len()),
        }
    }
}

/// Outcome of applying an answer to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerApplied {
    /// True when an earlier answer to the same question was overwritten.
    pub overwritten: bool,
}

/// Assessment session aggregate.
///
/// Answers are applied strictly in arrival order: each submission names
/// its sequence position and anything out of order is rejected without
/// touching session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSession {
    id: SessionId,
    user_id: UserId,
    mode: AssessmentMode,
    phase: DiscoveryPhase,
    status: SessionStatus,
    answers: Vec<AnswerRecord>,
    next_sequence: u32,
    started_at: Timestamp,
}

impl AssessmentSession {
    /// Starts a new session.
    ///
    /// Known-types sessions skip straight to preference tuning; the other
    /// modes begin with screening.
    pub fn new(user_id: UserId, mode: AssessmentMode, timestamp: Timestamp) -> Self {
        let phase = match mode {
            AssessmentMode::KnownTypes => DiscoveryPhase::PreferenceTuning,
            AssessmentMode::Quick | AssessmentMode::FullDiscovery => DiscoveryPhase::Screening,
        };
        Self {
            id: SessionId::new(),
            user_id,
            mode,
            phase,
            status: SessionStatus::Active,
            answers: Vec::new(),
            next_sequence: 0,
            started_at: timestamp,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn mode(&self) -> AssessmentMode {
        self.mode
    }

    pub fn phase(&self) -> DiscoveryPhase {
        self.phase
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Sequence position expected by the next submission.
    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }

    /// Recorded answers in arrival order.
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Number of answered questions.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Looks up the recorded answer for a question.
    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    fn answered_in_group(&self, group: QuestionGroup) -> usize {
        group_questions(group)
            .filter(|q| self.answer_for(q.id).is_some())
            .count()
    }

    fn group_complete(&self, group: QuestionGroup) -> bool {
        self.answered_in_group(group) == group_size(group)
    }

    /// Applies an answer.
    ///
    /// Out-of-order submission and closed sessions are rejected with the
    /// session unchanged. Resubmitting an answered question overwrites the
    /// previous answer.
    pub fn submit(
        &mut self,
        question_id: &str,
        raw_answer: &str,
        sequence: u32,
    ) -> Result<AnswerApplied, DomainError> {
        if self.status != SessionStatus::Active {
            return Err(DomainError::new(
                ErrorCode::SessionClosed,
                format!("Session {} is no longer active", self.id),
            ));
        }
        if sequence != self.next_sequence {
            return Err(DomainError::sequence(self.next_sequence, sequence));
        }

        let option_index = match self.mode {
            AssessmentMode::Quick => {
                let (position, question) = find_quick_question(question_id).ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::QuestionNotFound,
                        format!("Unknown quick question '{}'", question_id),
                    )
                })?;
                question.resolve_answer(position, raw_answer)?
            }
            AssessmentMode::KnownTypes | AssessmentMode::FullDiscovery => {
                let question = find_question(question_id).ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::QuestionNotFound,
                        format!("Unknown question '{}'", question_id),
                    )
                })?;
                question.resolve_answer(raw_answer)?
            }
        };

        let record = AnswerRecord {
            question_id: question_id.to_string(),
            option_index,
            sequence,
        };
        let overwritten = if let Some(existing) =
            self.answers.iter_mut().find(|a| a.question_id == question_id)
        {
            *existing = record;
            true
        } else {
            self.answers.push(record);
            false
        };

        self.next_sequence += 1;
        self.advance_phase();
        Ok(AnswerApplied { overwritten })
    }

    fn advance_phase(&mut self) {
        match self.mode {
            AssessmentMode::Quick => {
                if self.phase == DiscoveryPhase::Screening
                    && self.answers.len() == QUICK_BANK.len()
                {
                    self.phase = DiscoveryPhase::Continuous;
                }
            }
            AssessmentMode::KnownTypes | AssessmentMode::FullDiscovery => {
                if self.phase == DiscoveryPhase::Screening
                    && QuestionGroup::screening().iter().all(|g| self.group_complete(*g))
                {
                    self.phase = DiscoveryPhase::PreferenceTuning;
                }
                if self.phase == DiscoveryPhase::PreferenceTuning
                    && self.group_complete(QuestionGroup::PreferenceTuning)
                {
                    self.phase = DiscoveryPhase::Continuous;
                }
            }
        }
    }

    /// Returns the next question to ask, if any.
    pub fn next_question(&self) -> Option<QuestionView> {
        if self.status != SessionStatus::Active {
            return None;
        }
        match self.mode {
            AssessmentMode::Quick => QUICK_BANK
                .iter()
                .find(|q| self.answer_for(q.id).is_none())
                .map(|q| QuestionView::from_quick(q, self.answers.len())),
            AssessmentMode::KnownTypes | AssessmentMode::FullDiscovery => {
                let groups: &[QuestionGroup] = match self.phase {
                    DiscoveryPhase::Screening => QuestionGroup::screening(),
                    DiscoveryPhase::PreferenceTuning => &[QuestionGroup::PreferenceTuning],
                    DiscoveryPhase::Continuous | DiscoveryPhase::Confirmed => return None,
                };
                for group in groups {
                    if let Some(question) =
                        group_questions(*group).find(|q| self.answer_for(q.id).is_none())
                    {
                        return Some(QuestionView::from_bank(
                            question,
                            self.answered_in_group(*group),
                            group_size(*group),
                        ));
                    }
                }
                None
            }
        }
    }

    /// Marks the estimated profile as confirmed and completes the session.
    pub fn mark_confirmed(&mut self) -> Result<(), DomainError> {
        self.phase = self
            .phase
            .transition_to(DiscoveryPhase::Confirmed)
            .map_err(DomainError::from)?;
        self.status = SessionStatus::Completed;
        Ok(())
    }

    /// Moves the session into continuous learning without confirmation.
    pub fn continue_learning(&mut self) -> Result<(), DomainError> {
        if self.phase != DiscoveryPhase::Continuous {
            self.phase = self
                .phase
                .transition_to(DiscoveryPhase::Continuous)
                .map_err(DomainError::from)?;
        }
        Ok(())
    }

    /// Explicitly abandons the session.
    pub fn abandon(&mut self) {
        self.status = SessionStatus::Abandoned;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn ts() -> Timestamp {
        Timestamp::from_unix_secs(1_704_326_400)
    }

    fn full_session() -> AssessmentSession {
        AssessmentSession::new(test_user_id(), AssessmentMode::FullDiscovery, ts())
    }

    #[test]
    fn new_full_discovery_session_starts_in_screening() {
        let session = full_session();
        assert_eq!(session.phase(), DiscoveryPhase::Screening);
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.next_sequence(), 0);
    }

    #[test]
    fn known_types_session_skips_to_preference_tuning() {
        let session = AssessmentSession::new(test_user_id(), AssessmentMode::KnownTypes, ts());
        assert_eq!(session.phase(), DiscoveryPhase::PreferenceTuning);
        assert_eq!(
            session.next_question().unwrap().question_id,
            "beh_feedback"
        );
    }

    #[test]
    fn next_question_walks_groups_in_order() {
        let mut session = full_session();
        assert_eq!(session.next_question().unwrap().question_id, "adhd_1");

        for (i, id) in ["adhd_1", "adhd_2", "adhd_3", "adhd_4", "adhd_5", "adhd_6"]
            .iter()
            .enumerate()
        {
            session.submit(id, "Sometimes", i as u32).unwrap();
        }
        assert_eq!(session.next_question().unwrap().question_id, "mbti_ei");
    }

    #[test]
    fn out_of_order_submission_fails_and_leaves_state_unchanged() {
        let mut session = full_session();
        let err = session.submit("adhd_1", "Sometimes", 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::SequenceViolation);
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.next_sequence(), 0);
    }

    #[test]
    fn invalid_answer_fails_and_leaves_state_unchanged() {
        let mut session = full_session();
        let err = session.submit("adhd_1", "constantly", 0).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.next_sequence(), 0);
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut session = full_session();
        let err = session.submit("adhd_99", "Sometimes", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuestionNotFound);
    }

    #[test]
    fn resubmission_overwrites_in_place() {
        let mut session = full_session();
        session.submit("adhd_1", "Never", 0).unwrap();
        let applied = session.submit("adhd_1", "Very Often", 1).unwrap();

        assert!(applied.overwritten);
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.answer_for("adhd_1").unwrap().option_index, 4);
    }

    #[test]
    fn completing_all_groups_advances_phases() {
        let mut session = full_session();
        let mut seq = 0;
        for question in super::super::question::QUESTION_BANK {
            if question.group != QuestionGroup::PreferenceTuning {
                session.submit(question.id, "b", seq).unwrap();
                seq += 1;
            }
        }
        assert_eq!(session.phase(), DiscoveryPhase::PreferenceTuning);

        for question in super::super::question::QUESTION_BANK {
            if question.group == QuestionGroup::PreferenceTuning {
                session.submit(question.id, "b", seq).unwrap();
                seq += 1;
            }
        }
        assert_eq!(session.phase(), DiscoveryPhase::Continuous);
        assert!(session.next_question().is_none());
    }

    #[test]
    fn quick_session_completes_after_three_answers() {
        let mut session = AssessmentSession::new(test_user_id(), AssessmentMode::Quick, ts());
        assert_eq!(
            session.next_question().unwrap().question_id,
            "quick_attention"
        );

        session.submit("quick_attention", "1b", 0).unwrap();
        session.submit("quick_interaction", "2b", 1).unwrap();
        session.submit("quick_information", "3d", 2).unwrap();

        assert_eq!(session.phase(), DiscoveryPhase::Continuous);
        assert!(session.next_question().is_none());
    }

    #[test]
    fn closed_session_rejects_answers() {
        let mut session = full_session();
        session.abandon();
        let err = session.submit("adhd_1", "Sometimes", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionClosed);
    }

    #[test]
    fn mark_confirmed_completes_session() {
        let mut session = AssessmentSession::new(test_user_id(), AssessmentMode::KnownTypes, ts());
        session.mark_confirmed().unwrap();
        assert_eq!(session.phase(), DiscoveryPhase::Confirmed);
        assert_eq!(session.status(), SessionStatus::Completed);
        assert!(session.next_question().is_none());
    }
}
