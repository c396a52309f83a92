//! RunRevisionCycle - one pass of the learning loop for a user.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::learning::{gather_evidence, propose_revisions, LearningParams};
use crate::domain::detector::WindowLimits;
use crate::domain::profile::AttributeChangeRecord;
use crate::ports::{AuditTrail, InteractionEventLog, ProfileRepository};

/// Command to run one revision cycle.
#[derive(Debug, Clone)]
pub struct RunRevisionCycleCommand {
    pub user_id: UserId,
}

/// Result of a revision cycle.
#[derive(Debug, Clone)]
pub struct RunRevisionCycleResult {
    pub revisions_applied: usize,
}

/// Handler for learning loop cycles.
///
/// Works on a snapshot of the committed profile and commits the revised
/// profile in one update, so policy queries racing with a cycle only ever
/// observe the previous or the next committed version. One audit record
/// is appended per changed attribute; records are never rewritten.
pub struct RunRevisionCycleHandler {
    profiles: Arc<dyn ProfileRepository>,
    events: Arc<dyn InteractionEventLog>,
    audit: Arc<dyn AuditTrail>,
    params: LearningParams,
    window: WindowLimits,
}

impl RunRevisionCycleHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        events: Arc<dyn InteractionEventLog>,
        audit: Arc<dyn AuditTrail>,
        params: LearningParams,
        window: WindowLimits,
    ) -> Self {
        Self {
            profiles,
            events,
            audit,
            params,
            window,
        }
    }

    pub async fn handle(
        &self,
        cmd: RunRevisionCycleCommand,
    ) -> Result<RunRevisionCycleResult, DomainError> {
        let now = Timestamp::now();

        let Some(mut profile) = self.profiles.find_by_user(&cmd.user_id).await? else {
            debug!(user_id = %cmd.user_id, "no profile; revision cycle skipped");
            return Ok(RunRevisionCycleResult {
                revisions_applied: 0,
            });
        };

        let window = self.events.recent(&cmd.user_id, &self.window, now).await?;
        let evidence = gather_evidence(&window, &self.params);
        let revisions = propose_revisions(&profile, &evidence, &self.params);

        if revisions.is_empty() {
            debug!(user_id = %cmd.user_id, "no revisions warranted");
            return Ok(RunRevisionCycleResult {
                revisions_applied: 0,
            });
        }

        let mut records = Vec::with_capacity(revisions.len());
        for revision in &revisions {
            let change = profile.apply_revision(revision.proposed, revision.confidence, now)?;
            records.push(AttributeChangeRecord::new(
                cmd.user_id.clone(),
                change.kind,
                change.previous,
                change.current,
                revision.confidence,
                revision.evidence_summary.clone(),
                now,
            ));
        }

        // commit the revised profile before exposing the audit records
        self.profiles.update(&profile).await?;
        for record in records {
            self.audit.append(record).await?;
        }

        info!(
            user_id = %cmd.user_id,
            revisions = revisions.len(),
            "revision cycle applied"
        );
        Ok(RunRevisionCycleResult {
            revisions_applied: revisions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAuditTrail, InMemoryEventLog, InMemoryProfileRepository,
    };
    use crate::domain::detector::{EventKind, InteractionEvent};
    use crate::domain::foundation::Confidence;
    use crate::domain::profile::{
        AttentionSpan, AttributeKind, AttributeStatus, AttributeValue, NeurotypeProfile,
    };
    use crate::ports::{AuditTrail as _, InteractionEventLog as _, ProfileRepository as _};

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    struct Fixture {
        handler: RunRevisionCycleHandler,
        profiles: Arc<InMemoryProfileRepository>,
        events: Arc<InMemoryEventLog>,
        audit: Arc<InMemoryAuditTrail>,
    }

    fn fixture() -> Fixture {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let events = Arc::new(InMemoryEventLog::default());
        let audit = Arc::new(InMemoryAuditTrail::new());
        Fixture {
            handler: RunRevisionCycleHandler::new(
                profiles.clone(),
                events.clone(),
                audit.clone(),
                LearningParams::default(),
                WindowLimits::default(),
            ),
            profiles,
            events,
            audit,
        }
    }

    async fn seed_profile(f: &Fixture, span: AttentionSpan, confidence: f32) {
        let mut profile = NeurotypeProfile::new(user(), Timestamp::now());
        profile
            .set_assessed(
                AttributeValue::AttentionSpan(span),
                Confidence::new(confidence).unwrap(),
                Timestamp::now(),
            )
            .unwrap();
        f.profiles.create(&profile).await.unwrap();
    }

    async fn seed_switch_storm(f: &Fixture) {
        for _ in 0..30 {
            f.events
                .append(
                    &user(),
                    InteractionEvent::new(Timestamp::now(), EventKind::TopicSwitch),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn contradicting_evidence_revises_attribute_with_one_audit_record() {
        let f = fixture();
        seed_profile(&f, AttentionSpan::Medium, 0.5).await;
        seed_switch_storm(&f).await;

        let result = f
            .handler
            .handle(RunRevisionCycleCommand { user_id: user() })
            .await
            .unwrap();
        assert_eq!(result.revisions_applied, 1);

        let profile = f.profiles.find_by_user(&user()).await.unwrap().unwrap();
        let slot = profile.slot(AttributeKind::AttentionSpan);
        assert_eq!(
            slot.value(),
            Some(AttributeValue::AttentionSpan(AttentionSpan::Variable))
        );
        assert_eq!(slot.status(), AttributeStatus::Revised);

        let records = f.audit.for_user(&user()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].previous_value,
            Some(AttributeValue::AttentionSpan(AttentionSpan::Medium))
        );
        assert_eq!(
            records[0].new_value,
            AttributeValue::AttentionSpan(AttentionSpan::Variable)
        );
    }

    #[tokio::test]
    async fn repeated_cycles_do_not_duplicate_records() {
        let f = fixture();
        seed_profile(&f, AttentionSpan::Medium, 0.5).await;
        seed_switch_storm(&f).await;

        f.handler
            .handle(RunRevisionCycleCommand { user_id: user() })
            .await
            .unwrap();
        let first_records = f.audit.for_user(&user()).await.unwrap();

        // evidence now agrees with the stored value; nothing to revise
        let second = f
            .handler
            .handle(RunRevisionCycleCommand { user_id: user() })
            .await
            .unwrap();
        assert_eq!(second.revisions_applied, 0);

        let records = f.audit.for_user(&user()).await.unwrap();
        assert_eq!(records.len(), first_records.len());
        assert_eq!(records[0], first_records[0]);
    }

    #[tokio::test]
    async fn high_confidence_values_resist_revision() {
        let f = fixture();
        seed_profile(&f, AttentionSpan::Medium, 0.9).await;
        seed_switch_storm(&f).await;

        let result = f
            .handler
            .handle(RunRevisionCycleCommand { user_id: user() })
            .await
            .unwrap();
        assert_eq!(result.revisions_applied, 0);
        assert!(f.audit.for_user(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_profile_is_a_quiet_no_op() {
        let f = fixture();
        let result = f
            .handler
            .handle(RunRevisionCycleCommand { user_id: user() })
            .await
            .unwrap();
        assert_eq!(result.revisions_applied, 0);
    }
}
