//! Applicant registry - the lifecycle manager over the applicant collection
//!
//! Owns the in-memory applicant list and drives every mutation through the
//! domain state machine. Each committed mutation is persisted to the
//! applicant slot fire-and-forget: a write failure is logged, never retried,
//! and never rolls back the in-memory state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{Applicant, ApplicantId, ApplicationStatus, LifecycleAction, TransitionOutcome};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{APPLICANTS_SLOT, KeyValueStore},
};

/// Service owning the applicant collection
pub struct ApplicantRegistry {
    store: Arc<dyn KeyValueStore>,
    applicants: RwLock<Vec<Applicant>>,
}

impl std::fmt::Debug for ApplicantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicantRegistry").finish_non_exhaustive()
    }
}

impl ApplicantRegistry {
    /// Load the registry from the applicant slot
    ///
    /// An empty or missing slot yields an empty registry; a corrupt slot is
    /// a persistence error.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, ApplicationError> {
        let applicants = match store.get(APPLICANTS_SLOT).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ApplicationError::Persistence(format!("corrupt applicant slot: {e}")))?,
            None => Vec::new(),
        };

        debug!(count = applicants.len(), "Loaded applicant collection");
        Ok(Self {
            store,
            applicants: RwLock::new(applicants),
        })
    }

    /// Snapshot of the full collection
    pub fn list(&self) -> Vec<Applicant> {
        self.applicants.read().clone()
    }

    /// Get a record by identifier
    pub fn get(&self, id: &ApplicantId) -> Result<Applicant, ApplicationError> {
        self.applicants
            .read()
            .iter()
            .find(|a| a.id == *id)
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound(format!("applicant {id}")))
    }

    /// Find the submitted record for an identity number
    ///
    /// Draft records never match; of several matches the most recently
    /// submitted wins. Used to let a returning applicant retrieve and amend
    /// their submission.
    pub fn find_by_identity(&self, identity_number: &str) -> Result<Applicant, ApplicationError> {
        self.applicants
            .read()
            .iter()
            .filter(|a| a.status.is_submitted() && a.identity_number.as_str() == identity_number)
            .max_by_key(|a| a.submitted_at)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("submission for identity {identity_number}"))
            })
    }

    /// Insert or wholesale-replace a record
    ///
    /// When a stored record shares the identifier, the incoming record
    /// replaces it entirely; if the replacement moves the status into
    /// Approved from any other status, the first-approval stamp is applied
    /// before storing. Returns the record as stored.
    #[instrument(skip(self, incoming), fields(applicant_id = %incoming.id))]
    pub async fn upsert(&self, mut incoming: Applicant, now: DateTime<Utc>) -> Applicant {
        let stored = {
            let mut applicants = self.applicants.write();
            match applicants.iter().position(|a| a.id == incoming.id) {
                Some(pos) => {
                    let entering_approved = incoming.status == ApplicationStatus::Approved
                        && applicants[pos].status != ApplicationStatus::Approved;
                    if entering_approved {
                        incoming.stamp_first_approval(now);
                    }
                    applicants[pos] = incoming.clone();
                    incoming
                },
                None => {
                    applicants.push(incoming.clone());
                    incoming
                },
            }
        };

        self.persist().await;
        stored
    }

    /// Submit a draft for review
    #[instrument(skip(self), fields(applicant_id = %id))]
    pub async fn submit(
        &self,
        id: &ApplicantId,
        now: DateTime<Utc>,
    ) -> Result<Applicant, ApplicationError> {
        let outcome = self.apply_transition(id, LifecycleAction::Submit, now)?;
        info!("Application submitted for review");
        self.persist().await;
        Ok(outcome.applicant)
    }

    /// Approve a pending or rejected application
    ///
    /// The returned outcome carries the lifecycle stamp when this was the
    /// first approval.
    #[instrument(skip(self), fields(applicant_id = %id))]
    pub async fn approve(
        &self,
        id: &ApplicantId,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, ApplicationError> {
        let outcome = self.apply_transition(id, LifecycleAction::Approve, now)?;
        info!(first_approval = outcome.stamp.is_some(), "Application approved");
        self.persist().await;
        Ok(outcome)
    }

    /// Reject a pending or approved application with a reason
    #[instrument(skip(self, reason), fields(applicant_id = %id))]
    pub async fn reject(
        &self,
        id: &ApplicantId,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Applicant, ApplicationError> {
        let action = LifecycleAction::Reject {
            reason: reason.into(),
        };
        let outcome = self.apply_transition(id, action, now)?;
        info!("Application rejected");
        self.persist().await;
        Ok(outcome.applicant)
    }

    /// Remove a single record; returns whether it existed
    #[instrument(skip(self), fields(applicant_id = %id))]
    pub async fn delete(&self, id: &ApplicantId) -> bool {
        let removed = {
            let mut applicants = self.applicants.write();
            let before = applicants.len();
            applicants.retain(|a| a.id != *id);
            applicants.len() < before
        };
        if removed {
            self.persist().await;
        }
        removed
    }

    /// Remove several records at once; returns how many were removed
    ///
    /// Removal is immediate and irreversible; there are no tombstones.
    #[instrument(skip(self, ids))]
    pub async fn delete_many(&self, ids: &[ApplicantId]) -> usize {
        let removed = {
            let mut applicants = self.applicants.write();
            let before = applicants.len();
            applicants.retain(|a| !ids.contains(&a.id));
            before - applicants.len()
        };
        if removed > 0 {
            self.persist().await;
        }
        removed
    }

    /// Records whose membership expires within the 30-day warning window
    pub fn expiring_soon(&self, now: DateTime<Utc>) -> Vec<Applicant> {
        self.applicants
            .read()
            .iter()
            .filter(|a| a.is_expiring_soon(now))
            .cloned()
            .collect()
    }

    /// Run a domain transition against the stored record and replace it
    fn apply_transition(
        &self,
        id: &ApplicantId,
        action: LifecycleAction,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, ApplicationError> {
        let mut applicants = self.applicants.write();
        let pos = applicants
            .iter()
            .position(|a| a.id == *id)
            .ok_or_else(|| ApplicationError::NotFound(format!("applicant {id}")))?;

        let outcome = applicants[pos].clone().transition(action, now)?;
        applicants[pos] = outcome.applicant.clone();
        Ok(outcome)
    }

    /// Persist the collection to its slot, fire-and-forget
    async fn persist(&self) {
        let snapshot = self.list();
        match serde_json::to_value(&snapshot) {
            Ok(value) => {
                if let Err(e) = self.store.set(APPLICANTS_SLOT, value).await {
                    warn!(error = %e, "Failed to persist applicants; in-memory state kept");
                }
            },
            Err(e) => warn!(error = %e, "Failed to serialize applicants; in-memory state kept"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use domain::{
        ApplicationStatus, ContactDetails, DocumentAttachment, EmailAddress, IdentityNumber,
        MembershipRole, PhoneNumber,
    };

    use super::*;
    use crate::ports::MockKeyValueStore;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn applicant(identity: &str) -> Applicant {
        let today = fixed_now().date_naive();
        let identity = IdentityNumber::parse_with_today(identity, today).unwrap();
        let dob = identity.date_of_birth_with_today(today).unwrap();
        Applicant::draft(
            identity,
            dob,
            ContactDetails {
                full_name: "Thandi Mokoena".to_string(),
                email: EmailAddress::new("thandi@example.com").unwrap(),
                phone: PhoneNumber::new("0821234567").unwrap(),
                address: "12 Main Rd".to_string(),
                province: "Eastern Cape".to_string(),
                municipality: "Enoch Mgijima".to_string(),
            },
        )
        .with_id_photo(DocumentAttachment::new("id.jpg", "data:image/jpeg;base64,aQ=="))
        .with_payment_proof(DocumentAttachment::new("pop.pdf", "data:application/pdf;base64,aQ=="))
    }

    fn quiet_store() -> Arc<dyn KeyValueStore> {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_set().returning(|_, _| Ok(()));
        Arc::new(store)
    }

    async fn registry() -> ApplicantRegistry {
        ApplicantRegistry::load(quiet_store()).await.unwrap()
    }

    #[tokio::test]
    async fn load_from_empty_slot_yields_empty_registry() {
        let registry = registry().await;
        assert!(registry.list().is_empty());
    }

    #[tokio::test]
    async fn load_restores_persisted_records() {
        let persisted = vec![applicant("9202204720083")];
        let value = serde_json::to_value(&persisted).unwrap();

        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(move |_| Ok(Some(value.clone())));
        let registry = ApplicantRegistry::load(Arc::new(store)).await.unwrap();

        assert_eq!(registry.list(), persisted);
    }

    #[tokio::test]
    async fn load_rejects_a_corrupt_slot() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(serde_json::json!({"not": "an array"}))));
        let err = ApplicantRegistry::load(Arc::new(store)).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Persistence(_)));
    }

    #[tokio::test]
    async fn upsert_inserts_new_records() {
        let registry = registry().await;
        let record = applicant("9202204720083");
        registry.upsert(record.clone(), fixed_now()).await;
        assert_eq!(registry.list(), vec![record]);
    }

    #[tokio::test]
    async fn upsert_replaces_wholesale_by_id() {
        let registry = registry().await;
        let record = applicant("9202204720083");
        registry.upsert(record.clone(), fixed_now()).await;

        let mut amended = record.clone();
        amended.contact.address = "99 New St".to_string();
        registry.upsert(amended.clone(), fixed_now()).await;

        let stored = registry.get(&record.id).unwrap();
        assert_eq!(stored.contact.address, "99 New St");
        assert_eq!(registry.list().len(), 1);
    }

    #[tokio::test]
    async fn upsert_into_approved_applies_the_first_approval_stamp() {
        let registry = registry().await;
        let record = applicant("9202204720083");
        let pending = record
            .transition(LifecycleAction::Submit, fixed_now())
            .unwrap()
            .applicant;
        registry.upsert(pending.clone(), fixed_now()).await;

        let mut decided = pending;
        decided.status = ApplicationStatus::Approved;
        let stored = registry.upsert(decided, fixed_now()).await;

        assert_eq!(stored.approved_at, Some(fixed_now()));
        assert_eq!(
            stored.expires_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap())
        );
        assert_eq!(stored.membership_role, MembershipRole::Member);
    }

    #[tokio::test]
    async fn upsert_reapproval_does_not_restamp() {
        let registry = registry().await;
        let now = fixed_now();
        let pending = applicant("9202204720083")
            .transition(LifecycleAction::Submit, now)
            .unwrap()
            .applicant;
        let id = pending.id;
        registry.upsert(pending, now).await;

        registry.approve(&id, now).await.unwrap();
        registry.reject(&id, "lapsed", now + Duration::days(10)).await.unwrap();

        let later = now + Duration::days(20);
        let mut redecided = registry.get(&id).unwrap();
        redecided.status = ApplicationStatus::Approved;
        let stored = registry.upsert(redecided, later).await;

        assert_eq!(stored.approved_at, Some(now));
    }

    #[tokio::test]
    async fn submit_then_approve_flow() {
        let registry = registry().await;
        let record = applicant("9202204720083");
        let id = record.id;
        registry.upsert(record, fixed_now()).await;

        let submitted = registry.submit(&id, fixed_now()).await.unwrap();
        assert_eq!(submitted.status, ApplicationStatus::Pending);

        let outcome = registry.approve(&id, fixed_now()).await.unwrap();
        let stamp = outcome.stamp.unwrap();
        assert_eq!(
            stamp.expires_at,
            stamp.approved_at.checked_add_months(chrono::Months::new(12)).unwrap()
        );
    }

    #[tokio::test]
    async fn approving_a_missing_record_is_not_found() {
        let registry = registry().await;
        let err = registry
            .approve(&ApplicantId::new(), fixed_now())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_by_identity_skips_drafts() {
        let registry = registry().await;
        let draft = applicant("9202204720083");
        let identity = draft.identity_number.as_str().to_string();
        registry.upsert(draft, fixed_now()).await;

        let err = registry.find_by_identity(&identity).unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_by_identity_returns_the_submitted_record() {
        let registry = registry().await;
        let record = applicant("9202204720083");
        let id = record.id;
        let identity = record.identity_number.as_str().to_string();
        registry.upsert(record, fixed_now()).await;
        registry.submit(&id, fixed_now()).await.unwrap();

        let found = registry.find_by_identity(&identity).unwrap();
        assert_eq!(found.id, id);
    }

    #[tokio::test]
    async fn bulk_delete_removes_exactly_the_given_ids() {
        let registry = registry().await;
        let a = applicant("9202204720083");
        let b = applicant("8001015009087");
        let c = applicant("2501015009082");
        let (id_a, id_b, id_c) = (a.id, b.id, c.id);
        registry.upsert(a, fixed_now()).await;
        registry.upsert(b, fixed_now()).await;
        registry.upsert(c, fixed_now()).await;

        let removed = registry.delete_many(&[id_a, id_b]).await;
        assert_eq!(removed, 2);

        let remaining = registry.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, id_c);
    }

    #[tokio::test]
    async fn delete_returns_false_for_unknown_id() {
        let registry = registry().await;
        assert!(!registry.delete(&ApplicantId::new()).await);
    }

    #[tokio::test]
    async fn expiring_soon_filters_by_window() {
        let registry = registry().await;
        let now = fixed_now();

        let mut inside = applicant("9202204720083");
        inside.expires_at = Some(now + Duration::days(10));
        let mut outside = applicant("8001015009087");
        outside.expires_at = Some(now + Duration::days(45));
        let inside_id = inside.id;

        registry.upsert(inside, now).await;
        registry.upsert(outside, now).await;

        let soon = registry.expiring_soon(now);
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].id, inside_id);
    }

    #[tokio::test]
    async fn persistence_failure_keeps_the_in_memory_mutation() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(ApplicationError::Persistence("disk full".to_string())));
        let registry = ApplicantRegistry::load(Arc::new(store)).await.unwrap();

        let record = applicant("9202204720083");
        let id = record.id;
        registry.upsert(record, fixed_now()).await;

        assert!(registry.get(&id).is_ok());
    }
}
