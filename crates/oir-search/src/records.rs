//! Filter bindings for registry records
//!
//! | record         | category               | matched fields                     |
//! |----------------|------------------------|------------------------------------|
//! | Union          | `RecordStatus`         | name, code, abbreviation           |
//! | Document       | `FolderType`           | file name, union name, folder name |
//! | Member         | `RecordStatus`         | name, employee id, position        |
//! | Workflow       | `WorkflowCategory`     | name, type, notes, assignees       |
//! | Correspondence | `CorrespondenceStatus` | sender, subject, comments          |

use crate::filter::{Category, Searchable};
use oir_model::{
    Correspondence, CorrespondenceStatus, Document, FolderType, Member, RecordStatus, Union,
    Workflow, WorkflowCategory,
};
use std::borrow::Cow;

impl Category for RecordStatus {
    const ALL: &'static [Self] = RecordStatus::ALL;

    fn key(self) -> &'static str {
        self.as_str()
    }
}

impl Category for FolderType {
    const ALL: &'static [Self] = FolderType::ALL;

    fn key(self) -> &'static str {
        self.code()
    }
}

impl Category for WorkflowCategory {
    const ALL: &'static [Self] = WorkflowCategory::ALL;

    fn key(self) -> &'static str {
        WorkflowCategory::key(self)
    }
}

impl Category for CorrespondenceStatus {
    const ALL: &'static [Self] = CorrespondenceStatus::ALL;

    fn key(self) -> &'static str {
        self.as_str()
    }
}

impl Searchable for Union {
    type Category = RecordStatus;

    fn category(&self) -> RecordStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Owned(self.code.to_string()),
            Cow::Borrowed(self.abbreviation.as_str()),
        ]
    }
}

impl Searchable for Document {
    type Category = FolderType;

    fn category(&self) -> FolderType {
        self.folder
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.file_name.as_str()),
            Cow::Borrowed(self.union_name.as_str()),
            Cow::Borrowed(self.folder.name()),
        ]
    }
}

impl Searchable for Member {
    type Category = RecordStatus;

    fn category(&self) -> RecordStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.employee_id.as_str()),
            Cow::Borrowed(self.position.as_str()),
        ]
    }
}

impl Searchable for Workflow {
    type Category = WorkflowCategory;

    fn category(&self) -> WorkflowCategory {
        self.category
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.kind.as_str()),
            Cow::Borrowed(self.notes.as_str()),
        ];
        fields.extend(self.assigned.iter().map(|a| Cow::Borrowed(a.as_str())));
        fields
    }
}

impl Searchable for Correspondence {
    type Category = CorrespondenceStatus;

    fn category(&self) -> CorrespondenceStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.sender.as_str()),
            Cow::Borrowed(self.subject.as_str()),
            Cow::Borrowed(self.comments.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, filter_where, FilterState};
    use oir_test_utils::{document, member, union, workflow};

    #[test]
    fn unions_match_on_code_and_abbreviation() {
        let unions = vec![
            union("IO-142", "Australian Manufacturing Workers Union", "AMWU"),
            union("IO-143", "Health Services Union", "HSU"),
        ];

        let by_code = filter(&unions, &FilterState::new().with_query("io-143"));
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].abbreviation, "HSU");

        let by_abbrev = filter(&unions, &FilterState::new().with_query("amwu"));
        assert_eq!(by_abbrev[0].code.to_string(), "IO-142");
    }

    #[test]
    fn documents_match_on_folder_name_and_scope_by_union() {
        let docs = vec![
            document("IO-142", "AMWU_Constitution_2024.pdf", FolderType::Rules),
            document("IO-143", "HSU_Rules.pdf", FolderType::Rules),
            document("IO-142", "AMWU_Members.xlsx", FolderType::Membership),
        ];

        let state = FilterState::new().with_query("constitution");
        let scoped = filter_where(&docs, &state, |d| d.union_code.to_string() == "IO-142");
        assert_eq!(scoped.len(), 1);

        let mut rules_only = FilterState::new();
        rules_only.enable_only(FolderType::Rules);
        assert_eq!(filter(&docs, &rules_only).len(), 2);
    }

    #[test]
    fn members_filter_by_status() {
        let mut inactive = member("IO-144", "Emily Davis", "EMP004");
        inactive.status = RecordStatus::Inactive;
        let members = vec![member("IO-142", "John Smith", "EMP001"), inactive];

        let state = FilterState::new().with(RecordStatus::Inactive, false);
        let out = filter(&members, &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].employee_id, "EMP001");
    }

    #[test]
    fn workflows_match_on_assignees() {
        let mut wf = workflow("Eddy Yaman v. Air Niugini", WorkflowCategory::Tribunal);
        wf.assigned = vec!["Legal Team".to_string()];
        let items = vec![wf, workflow("Police Association Election", WorkflowCategory::Unions)];

        let out = filter(&items, &FilterState::new().with_query("legal team"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, WorkflowCategory::Tribunal);
    }
}
