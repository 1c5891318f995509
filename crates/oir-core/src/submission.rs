//! Batch submission flow
//!
//! Drafts are validated one at a time as they join a batch, then the batch is
//! submitted as a single operation. Status moves strictly
//! `Idle -> Submitting -> Success | Error`:
//! - a second submit while `Submitting` or `Success` is refused
//! - `Success` clears the batch after a display delay and returns to `Idle`
//! - `Error` keeps the batch so it can be submitted again
//!
//! Status changes are published on a `watch` channel.

use crate::config::RegistryConfig;
use crate::drafts::{Draft, MemberDraft, UnionDraft};
use crate::error::{DraftError, SubmitError};
use crate::registry::Registry;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Where a batch is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    /// Whether the batch can be edited or submitted
    #[inline]
    #[must_use]
    pub fn accepts_changes(self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }
}

/// Remote side of a batch submission
#[async_trait]
pub trait BatchSubmitter<D: Draft>: Send + Sync {
    /// Submit every draft; returns how many were accepted
    async fn submit(&self, batch: &[D]) -> Result<usize, SubmitError>;
}

#[derive(Debug)]
struct BatchState<D> {
    drafts: Vec<D>,
    /// Bumped on every discard or reset so stale completions are ignored
    generation: u64,
}

#[derive(Debug)]
struct Inner<D> {
    state: Mutex<BatchState<D>>,
    status: watch::Sender<SubmissionStatus>,
    success_display: Duration,
}

/// Pending batch of drafts and its submission status
#[derive(Debug)]
pub struct BatchSubmission<D: Draft> {
    inner: Arc<Inner<D>>,
}

impl<D: Draft> Clone for BatchSubmission<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: Draft> BatchSubmission<D> {
    #[must_use]
    pub fn new(success_display: Duration) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(BatchState {
                    drafts: Vec::new(),
                    generation: 0,
                }),
                status,
                success_display,
            }),
        }
    }

    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.success_display())
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        *self.inner.status.borrow()
    }

    /// Receiver observing every status change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.inner.status.subscribe()
    }

    /// Snapshot of the pending drafts
    #[must_use]
    pub fn drafts(&self) -> Vec<D> {
        self.inner.state.lock().drafts.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().drafts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().drafts.is_empty()
    }

    /// Append a validated draft and return the next blank form
    ///
    /// An invalid draft is rejected and the batch is left unchanged.
    pub fn add_draft(&self, candidate: D) -> Result<D, DraftError> {
        let mut state = self.inner.state.lock();
        if !self.status().accepts_changes() {
            return Err(DraftError::BatchLocked);
        }
        candidate.validate()?;
        let next = candidate.carry_over();
        state.drafts.push(candidate);
        Ok(next)
    }

    /// Remove the draft at `index`; out of range or locked is a no-op
    pub fn remove_draft(&self, index: usize) -> Option<D> {
        let mut state = self.inner.state.lock();
        if !self.status().accepts_changes() || index >= state.drafts.len() {
            return None;
        }
        Some(state.drafts.remove(index))
    }

    /// Drop the batch and return to idle, e.g. when the form is closed
    pub fn discard(&self) {
        let mut state = self.inner.state.lock();
        state.drafts.clear();
        state.generation += 1;
        self.inner.status.send_replace(SubmissionStatus::Idle);
    }

    /// Submit the whole batch
    ///
    /// Must be called inside a tokio runtime: on success a task is spawned to
    /// clear the batch once the success display delay has passed.
    pub async fn submit<S>(&self, submitter: &S) -> Result<usize, SubmitError>
    where
        S: BatchSubmitter<D> + ?Sized,
    {
        let (batch, generation) = {
            let state = self.inner.state.lock();
            if !self.status().accepts_changes() {
                tracing::debug!("submission ignored, one is already in flight");
                return Err(SubmitError::InFlight);
            }
            if state.drafts.is_empty() {
                return Err(SubmitError::EmptyBatch);
            }
            self.inner.status.send_replace(SubmissionStatus::Submitting);
            (state.drafts.clone(), state.generation)
        };

        tracing::info!(size = batch.len(), "submitting batch");
        let outcome = submitter.submit(&batch).await;

        let state = self.inner.state.lock();
        if state.generation != generation {
            tracing::debug!("batch discarded while submitting");
            return outcome;
        }

        match outcome {
            Ok(accepted) => {
                self.inner.status.send_replace(SubmissionStatus::Success);
                drop(state);
                tracing::info!(accepted, "batch submitted");
                self.schedule_reset(generation);
                Ok(accepted)
            }
            Err(err) => {
                self.inner.status.send_replace(SubmissionStatus::Error);
                tracing::warn!(error = %err, "batch submission failed");
                Err(err)
            }
        }
    }

    fn schedule_reset(&self, generation: u64) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.success_display).await;
            let mut state = inner.state.lock();
            if state.generation == generation {
                state.drafts.clear();
                state.generation += 1;
                inner.status.send_replace(SubmissionStatus::Idle);
            }
        });
    }
}

/// Submitter that only waits, optionally failing
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedSubmitter {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
        }
    }

    /// Fail every submission with `reason`
    #[inline]
    #[must_use]
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }
}

#[async_trait]
impl<D: Draft> BatchSubmitter<D> for SimulatedSubmitter {
    async fn submit(&self, batch: &[D]) -> Result<usize, SubmitError> {
        tokio::time::sleep(self.latency).await;
        match &self.failure {
            Some(reason) => Err(SubmitError::Failed(reason.clone())),
            None => Ok(batch.len()),
        }
    }
}

/// Submitter that commits to a [`Registry`] after the configured latency
#[derive(Debug, Clone)]
pub struct RegistrySubmitter {
    registry: Arc<Registry>,
}

impl RegistrySubmitter {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl BatchSubmitter<MemberDraft> for RegistrySubmitter {
    async fn submit(&self, batch: &[MemberDraft]) -> Result<usize, SubmitError> {
        tokio::time::sleep(self.registry.config().submit_latency()).await;
        let members = self.registry.enroll_members(batch.to_vec())?;
        Ok(members.len())
    }
}

#[async_trait]
impl BatchSubmitter<UnionDraft> for RegistrySubmitter {
    async fn submit(&self, batch: &[UnionDraft]) -> Result<usize, SubmitError> {
        tokio::time::sleep(self.registry.config().submit_latency()).await;
        let unions = self.registry.register_unions(batch.to_vec())?;
        Ok(unions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use oir_test_utils::{code, date};

    mock! {
        Remote {}

        #[async_trait]
        impl BatchSubmitter<MemberDraft> for Remote {
            async fn submit(&self, batch: &[MemberDraft]) -> Result<usize, SubmitError>;
        }
    }

    fn draft(name: &str) -> MemberDraft {
        MemberDraft::new(date(2025, 1, 1))
            .with_union(code("IO-142"))
            .with_name(name)
            .with_employee_id("EMP001")
            .with_position("Engineer")
    }

    fn batch() -> BatchSubmission<MemberDraft> {
        BatchSubmission::new(Duration::from_secs(2))
    }

    #[test]
    fn invalid_draft_leaves_batch_unchanged() {
        let b = batch();
        b.add_draft(draft("John Smith")).unwrap();
        let err = b.add_draft(draft("")).unwrap_err();
        assert_eq!(err, DraftError::MissingFields(vec!["name"]));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn add_returns_form_with_union_kept() {
        let next = batch().add_draft(draft("John Smith")).unwrap();
        assert_eq!(next.union_code, Some(code("IO-142")));
        assert!(next.name.is_empty());
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let b = batch();
        b.add_draft(draft("A")).unwrap();
        b.add_draft(draft("B")).unwrap();
        assert!(b.remove_draft(5).is_none());
        assert_eq!(b.remove_draft(0).map(|d| d.name), Some("A".to_string()));
        assert_eq!(b.drafts()[0].name, "B");
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_without_calling_remote() {
        let mut remote = MockRemote::new();
        remote.expect_submit().never();
        assert_eq!(batch().submit(&remote).await, Err(SubmitError::EmptyBatch));
    }

    #[tokio::test(start_paused = true)]
    async fn success_clears_batch_after_display_delay() {
        let b = batch();
        b.add_draft(draft("A")).unwrap();
        b.add_draft(draft("B")).unwrap();

        let mut remote = MockRemote::new();
        remote
            .expect_submit()
            .times(1)
            .returning(|drafts| Ok(drafts.len()));

        assert_eq!(b.submit(&remote).await, Ok(2));
        assert_eq!(b.status(), SubmissionStatus::Success);
        assert_eq!(b.len(), 2);
        assert!(matches!(b.add_draft(draft("C")), Err(DraftError::BatchLocked)));
        assert_eq!(b.submit(&remote).await, Err(SubmitError::InFlight));

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(b.status(), SubmissionStatus::Idle);
        assert!(b.is_empty());
    }

    #[tokio::test]
    async fn failure_keeps_batch_for_retry() {
        let b = batch();
        b.add_draft(draft("A")).unwrap();

        let mut remote = MockRemote::new();
        let mut calls = 0;
        remote.expect_submit().times(2).returning(move |drafts| {
            calls += 1;
            if calls == 1 {
                Err(SubmitError::Failed("network".to_string()))
            } else {
                Ok(drafts.len())
            }
        });

        assert!(b.submit(&remote).await.is_err());
        assert_eq!(b.status(), SubmissionStatus::Error);
        assert_eq!(b.len(), 1);

        assert_eq!(b.submit(&remote).await, Ok(1));
        assert_eq!(b.status(), SubmissionStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_submit_is_ignored() {
        let b = batch();
        b.add_draft(draft("A")).unwrap();
        let remote = SimulatedSubmitter::new(Duration::from_secs(1));

        let first = {
            let b = b.clone();
            let remote = remote.clone();
            tokio::spawn(async move { b.submit(&remote).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(b.status(), SubmissionStatus::Submitting);
        assert_eq!(b.submit(&remote).await, Err(SubmitError::InFlight));

        assert_eq!(first.await.unwrap(), Ok(1));
    }

    #[tokio::test(start_paused = true)]
    async fn discard_during_success_cancels_pending_reset() {
        let b = batch();
        b.add_draft(draft("A")).unwrap();
        b.submit(&SimulatedSubmitter::new(Duration::ZERO)).await.unwrap();

        b.discard();
        b.add_draft(draft("B")).unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(b.len(), 1);
        assert_eq!(b.status(), SubmissionStatus::Idle);
    }
}
