//! Workflow board views: status filter tabs and dashboard counters

use oir_model::{Priority, StatusGroup, Workflow, WorkflowCategory, WorkflowStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status filter shown above the workflow table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Processed,
    Returned,
    Pending,
    Rejected,
    Completed,
}

impl StatusFilter {
    pub const ALL: &'static [Self] = &[
        Self::All,
        Self::Processed,
        Self::Returned,
        Self::Pending,
        Self::Rejected,
        Self::Completed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Processed => "processed",
            Self::Returned => "returned",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Whether a workflow in `status` is shown
    #[must_use]
    pub fn matches(self, status: WorkflowStatus) -> bool {
        let group = status.group();
        match self {
            Self::All => true,
            Self::Processed => group == StatusGroup::Processed,
            Self::Returned => group == StatusGroup::Returned,
            Self::Pending => group == StatusGroup::Pending,
            Self::Rejected => group == StatusGroup::Rejected,
            Self::Completed => group == StatusGroup::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = oir_model::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| oir_model::ModelError::UnknownVariant {
                kind: "status filter",
                value: s.to_string(),
            })
    }
}

/// Workflows in category `tab` (every category when `None`) passing `status`
#[must_use]
pub fn filter_workflows<'a>(
    workflows: &'a [Workflow],
    tab: Option<WorkflowCategory>,
    status: StatusFilter,
) -> Vec<&'a Workflow> {
    workflows
        .iter()
        .filter(|w| tab.map_or(true, |c| w.category == c))
        .filter(|w| status.matches(w.status))
        .collect()
}

/// Critical-priority workflows, in board order
#[must_use]
pub fn critical(workflows: &[Workflow]) -> Vec<&Workflow> {
    workflows
        .iter()
        .filter(|w| w.priority == Priority::Critical)
        .collect()
}

/// Dashboard counters above the workflow board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStats {
    pub total: usize,
    pub processed: usize,
    pub pending_nec: usize,
    pub critical: usize,
    pub union_elections: usize,
    pub delayed: usize,
}

impl WorkflowStats {
    #[must_use]
    pub fn collect(workflows: &[Workflow]) -> Self {
        workflows.iter().fold(Self::default(), |mut stats, w| {
            stats.total += 1;
            match w.status.group() {
                StatusGroup::Processed => stats.processed += 1,
                StatusGroup::Pending => stats.pending_nec += 1,
                _ => {}
            }
            if w.status == WorkflowStatus::Delayed {
                stats.delayed += 1;
            }
            if w.priority == Priority::Critical {
                stats.critical += 1;
            }
            if w.category == WorkflowCategory::Unions {
                stats.union_elections += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oir_test_utils::workflow;

    fn board() -> Vec<Workflow> {
        let mut a = workflow("Eddy Yaman v. Air Niugini", WorkflowCategory::Tribunal);
        a.status = WorkflowStatus::ProcessedAndCleared;
        a.priority = Priority::Critical;

        let mut b = workflow("Police Association Election", WorkflowCategory::Unions);
        b.status = WorkflowStatus::PendingNecConsideration;

        let mut c = workflow("Mining Sector Award", WorkflowCategory::Registrations);
        c.status = WorkflowStatus::Resolved;

        let mut d = workflow("Port Moresby Dock Strike", WorkflowCategory::Strikes);
        d.status = WorkflowStatus::Delayed;
        d.priority = Priority::Critical;

        let mut e = workflow("Teachers Union Election", WorkflowCategory::Unions);
        e.status = WorkflowStatus::ReferredToNec;

        vec![a, b, c, d, e]
    }

    #[test]
    fn completed_covers_resolved() {
        let items = board();
        let out = filter_workflows(&items, None, StatusFilter::Completed);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Mining Sector Award");
    }

    #[test]
    fn tab_and_status_combine() {
        let items = board();
        assert_eq!(filter_workflows(&items, Some(WorkflowCategory::Unions), StatusFilter::All).len(), 2);
        assert_eq!(
            filter_workflows(&items, Some(WorkflowCategory::Unions), StatusFilter::Pending).len(),
            1
        );
        assert!(filter_workflows(&items, Some(WorkflowCategory::Legal), StatusFilter::All).is_empty());
    }

    #[test]
    fn referred_to_nec_is_not_pending() {
        assert!(!StatusFilter::Pending.matches(WorkflowStatus::ReferredToNec));
        assert!(StatusFilter::All.matches(WorkflowStatus::ReferredToNec));
    }

    #[test]
    fn stats_count_each_bucket() {
        let stats = WorkflowStats::collect(&board());
        assert_eq!(
            stats,
            WorkflowStats {
                total: 5,
                processed: 1,
                pending_nec: 1,
                critical: 2,
                union_elections: 2,
                delayed: 1,
            }
        );
        assert_eq!(critical(&board()).len(), 2);
    }

    #[test]
    fn status_filter_parses_keys() {
        assert_eq!("Returned".parse::<StatusFilter>().unwrap(), StatusFilter::Returned);
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}
