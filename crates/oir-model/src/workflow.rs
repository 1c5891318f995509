//! Award workflows and incoming correspondence
//!
//! Workflow statuses form a closed set. Each status belongs to a
//! [`StatusGroup`] used by filters and dashboard counters, and maps to a
//! display [`Tone`].

use crate::error::ModelError;
use crate::ids::{CorrespondenceId, WorkflowId};
use crate::status::{Priority, Tone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Area of work a workflow belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowCategory {
    Registrations,
    Tribunal,
    /// Union elections
    Unions,
    Strikes,
    Legal,
    Policy,
}

impl WorkflowCategory {
    pub const ALL: &'static [Self] = &[
        Self::Registrations,
        Self::Tribunal,
        Self::Unions,
        Self::Strikes,
        Self::Legal,
        Self::Policy,
    ];

    /// Identifier used in filters
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Registrations => "registrations",
            Self::Tribunal => "tribunal",
            Self::Unions => "unions",
            Self::Strikes => "strikes",
            Self::Legal => "legal",
            Self::Policy => "policy",
        }
    }

    /// Tab label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Registrations => "Registrations",
            Self::Tribunal => "Tribunal Determinations",
            Self::Unions => "Union Elections",
            Self::Strikes => "Strike Interventions",
            Self::Legal => "Legal Matters",
            Self::Policy => "Policy Work",
        }
    }
}

impl FromStr for WorkflowCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::unknown("workflow category", s))
    }
}

/// Coarse grouping of workflow statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusGroup {
    Processed,
    Returned,
    Pending,
    Rejected,
    Completed,
    /// Work still moving or waiting on someone else
    Active,
}

/// Workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowStatus {
    #[serde(rename = "Processed & Cleared")]
    ProcessedAndCleared,
    #[serde(rename = "Returned for Correction")]
    ReturnedForCorrection,
    #[serde(rename = "Pending NEC Consideration")]
    PendingNecConsideration,
    #[serde(rename = "Referred to NEC")]
    ReferredToNec,
    #[serde(rename = "Rejected")]
    Rejected,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Resolved")]
    Resolved,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Monitoring")]
    Monitoring,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl WorkflowStatus {
    pub const ALL: &'static [Self] = &[
        Self::ProcessedAndCleared,
        Self::ReturnedForCorrection,
        Self::PendingNecConsideration,
        Self::ReferredToNec,
        Self::Rejected,
        Self::Completed,
        Self::Resolved,
        Self::InProgress,
        Self::Monitoring,
        Self::Delayed,
        Self::NotStarted,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ProcessedAndCleared => "Processed & Cleared",
            Self::ReturnedForCorrection => "Returned for Correction",
            Self::PendingNecConsideration => "Pending NEC Consideration",
            Self::ReferredToNec => "Referred to NEC",
            Self::Rejected => "Rejected",
            Self::Completed => "Completed",
            Self::Resolved => "Resolved",
            Self::InProgress => "In Progress",
            Self::Monitoring => "Monitoring",
            Self::Delayed => "Delayed",
            Self::NotStarted => "Not Started",
        }
    }

    #[must_use]
    pub fn group(self) -> StatusGroup {
        match self {
            Self::ProcessedAndCleared => StatusGroup::Processed,
            Self::ReturnedForCorrection => StatusGroup::Returned,
            Self::PendingNecConsideration => StatusGroup::Pending,
            Self::Rejected => StatusGroup::Rejected,
            Self::Completed | Self::Resolved => StatusGroup::Completed,
            Self::ReferredToNec
            | Self::InProgress
            | Self::Monitoring
            | Self::Delayed
            | Self::NotStarted => StatusGroup::Active,
        }
    }

    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            Self::ProcessedAndCleared => Tone::Green,
            Self::ReturnedForCorrection => Tone::Yellow,
            Self::PendingNecConsideration => Tone::Purple,
            Self::Rejected | Self::Delayed => Tone::Red,
            Self::Completed | Self::Resolved | Self::InProgress => Tone::Blue,
            Self::Monitoring => Tone::Orange,
            Self::ReferredToNec | Self::NotStarted => Tone::Gray,
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkflowStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::unknown("workflow status", s))
    }
}

/// Award or registration workflow tracked by the office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: WorkflowId,
    pub name: String,
    /// Free-text type, e.g. "Industrial Agreement"
    #[serde(rename = "type")]
    pub kind: String,
    pub category: WorkflowCategory,
    pub status: WorkflowStatus,
    /// Percent complete, `0..=100`
    pub progress: u8,
    pub assigned: Vec<String>,
    pub due_date: NaiveDate,
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
    /// Linked correspondence, in link order
    #[serde(default)]
    pub correspondence: Vec<CorrespondenceId>,
}

impl Workflow {
    /// Set progress, clamped to 100
    #[inline]
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// Link a correspondence item, ignoring repeats
    pub fn link(&mut self, correspondence: CorrespondenceId) -> bool {
        if self.correspondence.contains(&correspondence) {
            return false;
        }
        self.correspondence.push(correspondence);
        true
    }
}

/// Processing state of an incoming letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrespondenceStatus {
    #[default]
    Pending,
    Processed,
    Archived,
}

impl CorrespondenceStatus {
    pub const ALL: &'static [Self] = &[Self::Pending, Self::Processed, Self::Archived];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Archived => "archived",
        }
    }

    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            Self::Pending => Tone::Yellow,
            Self::Processed => Tone::Green,
            Self::Archived => Tone::Gray,
        }
    }
}

/// File attached to a letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub date_uploaded: NaiveDate,
}

/// Incoming letter logged by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correspondence {
    pub id: CorrespondenceId,
    pub date_received: NaiveDate,
    #[serde(rename = "from")]
    pub sender: String,
    pub subject: String,
    pub document_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_out: Option<NaiveDate>,
    #[serde(default)]
    pub comments: String,
    pub status: CorrespondenceStatus,
    /// Workflow this letter belongs to; may name a workflow not yet recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowId>,
    #[serde(default)]
    pub documents: Vec<AttachedDocument>,
}
