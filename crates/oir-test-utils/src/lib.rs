//! Testing utilities for the OIR workspace
//!
//! Record fixtures with plausible defaults; tests override the fields they
//! care about.

#![allow(missing_docs)]

use chrono::{NaiveDate, TimeZone, Utc};
use oir_model::{
    AccountStatus, Correspondence, CorrespondenceId, CorrespondenceStatus, Document, DocumentId,
    FileType, FolderType, Industry, Member, MemberId, Priority, Province, RecordStatus, Role,
    Union, UnionCode, UnionId, UserId, UserView, Workflow, WorkflowCategory, WorkflowId,
    WorkflowStatus,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn code(code: &str) -> UnionCode {
    code.parse().unwrap()
}

pub fn union(union_code: &str, name: &str, abbreviation: &str) -> Union {
    Union {
        id: UnionId::new(),
        code: code(union_code),
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        registered_date: date(2024, 1, 15),
        status: RecordStatus::Active,
        member_count: 0,
        industries: vec![Industry::Manufacturing],
        province: Province::Central,
        branches: Vec::new(),
        year: "2024".to_string(),
    }
}

pub fn document(union_code: &str, file_name: &str, folder: FolderType) -> Document {
    let file_type = file_name
        .rsplit_once('.')
        .and_then(|(_, ext)| FileType::from_extension(ext))
        .unwrap_or(FileType::Pdf);
    Document {
        id: DocumentId::new(),
        file_name: file_name.to_string(),
        union_code: code(union_code),
        union_name: format!("{union_code} Union"),
        folder,
        uploaded_by: "Registry Clerk".to_string(),
        upload_date: date(2024, 3, 15),
        file_size: "2.4 MB".to_string(),
        file_type,
    }
}

pub fn member(union_code: &str, name: &str, employee_id: &str) -> Member {
    Member {
        id: MemberId::new(),
        union_code: code(union_code),
        name: name.to_string(),
        employee_id: employee_id.to_string(),
        position: "Technician".to_string(),
        joining_date: date(2023, 1, 15),
        status: RecordStatus::Active,
    }
}

pub fn workflow(name: &str, category: WorkflowCategory) -> Workflow {
    Workflow {
        id: WorkflowId::new(),
        name: name.to_string(),
        kind: "Industrial Agreement".to_string(),
        category,
        status: WorkflowStatus::NotStarted,
        progress: 0,
        assigned: Vec::new(),
        due_date: date(2025, 6, 30),
        priority: Priority::Medium,
        notes: String::new(),
        correspondence: Vec::new(),
    }
}

pub fn correspondence(sender: &str, subject: &str) -> Correspondence {
    Correspondence {
        id: CorrespondenceId::new(),
        date_received: date(2025, 1, 8),
        sender: sender.to_string(),
        subject: subject.to_string(),
        document_date: date(2025, 1, 6),
        referred_to: None,
        date_out: None,
        comments: String::new(),
        status: CorrespondenceStatus::Pending,
        workflow: None,
        documents: Vec::new(),
    }
}

pub fn user_view(name: &str, email: &str, role: Role) -> UserView {
    UserView {
        id: UserId::new(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        department: "Registry".to_string(),
        status: AccountStatus::Active,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    }
}
