//! Form drafts accumulated into a batch before submission

use crate::error::DraftError;
use chrono::{NaiveDate, Utc};
use oir_model::{Industry, Member, MemberId, Province, RecordStatus, UnionCode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Record being filled in on a form
pub trait Draft: Clone + Debug + Send + Sync + 'static {
    /// Required fields that are still empty, in form order
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Fresh form for the next entry, keeping fields that repeat across a batch
    fn carry_over(&self) -> Self;

    fn validate(&self) -> Result<(), DraftError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::MissingFields(missing))
        }
    }
}

#[inline]
fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// New financial member awaiting review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    #[serde(default)]
    pub union_code: Option<UnionCode>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub position: String,
    pub joining_date: NaiveDate,
    #[serde(default = "pending")]
    pub status: RecordStatus,
}

fn pending() -> RecordStatus {
    RecordStatus::Pending
}

impl MemberDraft {
    /// Empty form dated `joining_date`
    #[must_use]
    pub fn new(joining_date: NaiveDate) -> Self {
        Self {
            union_code: None,
            name: String::new(),
            employee_id: String::new(),
            position: String::new(),
            joining_date,
            status: RecordStatus::Pending,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_union(mut self, code: UnionCode) -> Self {
        self.union_code = Some(code);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_employee_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = employee_id.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Member record for a validated draft
    pub fn into_member(self) -> Result<Member, DraftError> {
        self.validate()?;
        let union_code = self
            .union_code
            .ok_or(DraftError::MissingFields(vec!["union"]))?;
        Ok(Member {
            id: MemberId::new(),
            union_code,
            name: self.name.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            position: self.position.trim().to_string(),
            joining_date: self.joining_date,
            status: self.status,
        })
    }
}

impl Default for MemberDraft {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl Draft for MemberDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("name");
        }
        if blank(&self.employee_id) {
            missing.push("employeeId");
        }
        if blank(&self.position) {
            missing.push("position");
        }
        if self.union_code.is_none() {
            missing.push("union");
        }
        missing
    }

    fn carry_over(&self) -> Self {
        Self {
            union_code: self.union_code,
            ..Self::new(self.joining_date)
        }
    }
}

/// Union registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub province: Option<Province>,
    #[serde(default)]
    pub industries: Vec<Industry>,
    #[serde(default)]
    pub branches: Vec<String>,
    #[serde(default = "pending")]
    pub status: RecordStatus,
    /// Defaults to 0 when registered
    #[serde(default)]
    pub member_count: Option<u32>,
    /// Defaults to the current year when registered
    #[serde(default)]
    pub year: Option<String>,
}

impl Default for UnionDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            abbreviation: String::new(),
            province: None,
            industries: Vec::new(),
            branches: Vec::new(),
            status: RecordStatus::Pending,
            member_count: None,
            year: None,
        }
    }
}

impl UnionDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_province(mut self, province: Province) -> Self {
        self.province = Some(province);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_industry(mut self, industry: Industry) -> Self {
        if !self.industries.contains(&industry) {
            self.industries.push(industry);
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    /// Select or deselect an industry; returns whether it is now selected
    pub fn toggle_industry(&mut self, industry: Industry) -> bool {
        if let Some(pos) = self.industries.iter().position(|i| *i == industry) {
            self.industries.remove(pos);
            false
        } else {
            self.industries.push(industry);
            true
        }
    }

    /// Append a branch; blank input is ignored
    pub fn add_branch(&mut self, branch: &str) -> bool {
        let branch = branch.trim();
        if branch.is_empty() {
            return false;
        }
        self.branches.push(branch.to_string());
        true
    }

    /// Remove every branch with this name
    pub fn remove_branch(&mut self, branch: &str) {
        self.branches.retain(|b| b != branch);
    }
}

impl Draft for UnionDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("name");
        }
        if blank(&self.abbreviation) {
            missing.push("abbreviation");
        }
        if self.province.is_none() {
            missing.push("province");
        }
        if self.industries.is_empty() {
            missing.push("industries");
        }
        missing
    }

    fn carry_over(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oir_test_utils::{code, date};

    fn complete_member() -> MemberDraft {
        MemberDraft::new(date(2025, 2, 1))
            .with_union(code("IO-142"))
            .with_name("John Smith")
            .with_employee_id("EMP001")
            .with_position("Senior Engineer")
    }

    #[test]
    fn member_reports_every_missing_field() {
        let draft = MemberDraft::new(date(2025, 2, 1)).with_name("  ");
        assert_eq!(
            draft.missing_fields(),
            vec!["name", "employeeId", "position", "union"]
        );
        assert!(matches!(draft.validate(), Err(DraftError::MissingFields(_))));
    }

    #[test]
    fn member_carry_over_keeps_union_and_date() {
        let next = complete_member().carry_over();
        assert_eq!(next.union_code, Some(code("IO-142")));
        assert_eq!(next.joining_date, date(2025, 2, 1));
        assert!(next.name.is_empty());
        assert_eq!(next.status, RecordStatus::Pending);
    }

    #[test]
    fn member_converts_with_trimmed_fields() {
        let member = complete_member().with_name(" John Smith ").into_member().unwrap();
        assert_eq!(member.name, "John Smith");
        assert_eq!(member.union_code, code("IO-142"));
    }

    #[test]
    fn union_requires_an_industry() {
        let draft = UnionDraft::new("Test Union", "TU").with_province(Province::Central);
        assert_eq!(draft.missing_fields(), vec!["industries"]);
        assert!(draft.with_industry(Industry::Mining).validate().is_ok());
    }

    #[test]
    fn industries_toggle() {
        let mut draft = UnionDraft::default();
        assert!(draft.toggle_industry(Industry::Mining));
        assert!(draft.toggle_industry(Industry::Energy));
        assert!(!draft.toggle_industry(Industry::Mining));
        assert_eq!(draft.industries, vec![Industry::Energy]);
    }

    #[test]
    fn branches_are_trimmed_and_blank_ignored() {
        let mut draft = UnionDraft::default();
        assert!(draft.add_branch("  Lae "));
        assert!(!draft.add_branch("   "));
        draft.add_branch("Port Moresby");
        draft.remove_branch("Lae");
        assert_eq!(draft.branches, vec!["Port Moresby".to_string()]);
    }

    #[test]
    fn union_carry_over_resets_the_form() {
        let draft = UnionDraft::new("Test Union", "TU").with_status(RecordStatus::Active);
        assert_eq!(draft.carry_over(), UnionDraft::default());
    }
}
