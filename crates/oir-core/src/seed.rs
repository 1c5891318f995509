//! Sample records for demos and a populated dev server

use crate::clock::Clock;
use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::registry::Registry;
use chrono::NaiveDate;
use oir_model::{
    AttachedDocument, Correspondence, CorrespondenceId, CorrespondenceStatus, Document, DocumentId,
    FileType, FolderType, Industry, Member, MemberId, Priority, Province, RecordStatus, Union,
    UnionCode, UnionId, Workflow, WorkflowCategory, WorkflowId, WorkflowStatus,
};
use std::sync::Arc;

fn day(year: i32, month: u32, date: u32) -> Result<NaiveDate, RegistryError> {
    NaiveDate::from_ymd_opt(year, month, date)
        .ok_or_else(|| RegistryError::InvalidDate(format!("{year}-{month:02}-{date:02}")))
}

/// Registry on `clock` holding the sample records
pub fn demo_registry(
    config: RegistryConfig,
    clock: Arc<dyn Clock>,
) -> Result<Registry, RegistryError> {
    let registry = Registry::with_clock(config, clock);
    populate(&registry)?;
    Ok(registry)
}

/// Load the sample records into `registry`
pub fn populate(registry: &Registry) -> Result<(), RegistryError> {
    let unions = unions()?;
    let union_count = unions.len();
    for union in unions {
        registry.insert_union(union)?;
    }
    for document in documents(registry)? {
        registry.insert_document(document)?;
    }
    for member in members()? {
        registry.insert_member(member)?;
    }

    let workflows = workflows()?;
    let workflow_count = workflows.len();
    let mut ids = Vec::with_capacity(workflow_count);
    for workflow in workflows {
        ids.push(registry.add_workflow(workflow)?.id);
    }
    for letter in correspondence(&ids)? {
        registry.record_correspondence(letter)?;
    }

    tracing::info!(
        unions = union_count,
        workflows = workflow_count,
        "sample records loaded"
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn union(
    code: u16,
    name: &str,
    abbreviation: &str,
    registered: NaiveDate,
    member_count: u32,
    industries: &[Industry],
    province: Province,
    branches: &[&str],
) -> Result<Union, RegistryError> {
    Ok(Union {
        id: UnionId::new(),
        code: UnionCode::new(code)?,
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        registered_date: registered,
        status: RecordStatus::Active,
        member_count,
        industries: industries.to_vec(),
        province,
        branches: branches.iter().map(|b| (*b).to_string()).collect(),
        year: registered.format("%Y").to_string(),
    })
}

fn unions() -> Result<Vec<Union>, RegistryError> {
    Ok(vec![
        union(
            142,
            "Australian Manufacturing Workers Union",
            "AMWU",
            day(2022, 5, 15)?,
            12_500,
            &[Industry::Manufacturing],
            Province::NationalCapitalDistrict,
            &["Port Moresby", "Lae"],
        )?,
        union(
            143,
            "Health Services Union",
            "HSU",
            day(2021, 8, 2)?,
            4_200,
            &[Industry::Healthcare],
            Province::NationalCapitalDistrict,
            &["Port Moresby"],
        )?,
        union(
            144,
            "Transport Workers Union",
            "TWU",
            day(2020, 11, 19)?,
            3_100,
            &[Industry::Transport],
            Province::Morobe,
            &["Lae", "Madang"],
        )?,
        union(
            145,
            "Finance Sector Union",
            "FSU",
            day(2023, 3, 7)?,
            1_850,
            &[Industry::Finance, Industry::Services],
            Province::NationalCapitalDistrict,
            &["Port Moresby"],
        )?,
    ])
}

fn documents(registry: &Registry) -> Result<Vec<Document>, RegistryError> {
    let code = UnionCode::new(142)?;
    let union_name = registry
        .union(code)
        .map(|u| u.name)
        .ok_or(RegistryError::UnknownUnion(code))?;
    Ok(vec![Document {
        id: DocumentId::new(),
        file_name: "AMWU_Constitution_2024.pdf".to_string(),
        union_code: code,
        union_name,
        folder: FolderType::Rules,
        uploaded_by: "Sarah Johnson".to_string(),
        upload_date: day(2024, 3, 15)?,
        file_size: "2.4 MB".to_string(),
        file_type: FileType::Pdf,
    }])
}

fn member(
    code: u16,
    name: &str,
    employee_id: &str,
    position: &str,
    joining_date: NaiveDate,
    status: RecordStatus,
) -> Result<Member, RegistryError> {
    Ok(Member {
        id: MemberId::new(),
        union_code: UnionCode::new(code)?,
        name: name.to_string(),
        employee_id: employee_id.to_string(),
        position: position.to_string(),
        joining_date,
        status,
    })
}

fn members() -> Result<Vec<Member>, RegistryError> {
    use RecordStatus::{Active, Inactive};
    Ok(vec![
        member(142, "John Smith", "EMP001", "Senior Engineer", day(2023, 1, 15)?, Active)?,
        member(142, "Sarah Johnson", "EMP002", "Project Manager", day(2023, 2, 20)?, Active)?,
        member(143, "Michael Brown", "EMP003", "Healthcare Worker", day(2023, 3, 10)?, Active)?,
        member(144, "Emily Davis", "EMP004", "Transport Officer", day(2023, 4, 5)?, Inactive)?,
        member(145, "David Wilson", "EMP005", "Financial Analyst", day(2023, 5, 15)?, Active)?,
    ])
}

struct WorkflowRow<'a> {
    name: &'a str,
    kind: &'a str,
    category: WorkflowCategory,
    status: WorkflowStatus,
    progress: u8,
    assigned: &'a [&'a str],
    due: NaiveDate,
    priority: Priority,
    notes: &'a str,
}

impl WorkflowRow<'_> {
    fn build(self) -> Workflow {
        Workflow {
            id: WorkflowId::new(),
            name: self.name.to_string(),
            kind: self.kind.to_string(),
            category: self.category,
            status: self.status,
            progress: self.progress,
            assigned: self.assigned.iter().map(|a| (*a).to_string()).collect(),
            due_date: self.due,
            priority: self.priority,
            notes: self.notes.to_string(),
            correspondence: Vec::new(),
        }
    }
}

/// Index into the workflow list used by the sample letters
const EDDY_YAMAN: usize = 2;
const PIUS_YAFAET: usize = 4;
const MARIA_MERAVA: usize = 6;

fn workflows() -> Result<Vec<Workflow>, RegistryError> {
    let rows = [
        WorkflowRow {
            name: "Ramu Nickel Project Operation Industrial Agreement 2025-2027",
            kind: "Industrial Agreement",
            category: WorkflowCategory::Registrations,
            status: WorkflowStatus::ProcessedAndCleared,
            progress: 100,
            assigned: &["Natasha Utubasi"],
            due: day(2025, 3, 15)?,
            priority: Priority::High,
            notes: "Successfully registered and gazetted",
        },
        WorkflowRow {
            name: "PNG Maritime & Transport Workers Union (Amendment) Agreement 2025",
            kind: "Industrial Agreement",
            category: WorkflowCategory::Registrations,
            status: WorkflowStatus::ReturnedForCorrection,
            progress: 40,
            assigned: &["John Doe"],
            due: day(2025, 4, 30)?,
            priority: Priority::Medium,
            notes: "Needs proper formatting before resubmission",
        },
        WorkflowRow {
            name: "Eddy Yaman v. Air Niugini",
            kind: "Tribunal Determination",
            category: WorkflowCategory::Tribunal,
            status: WorkflowStatus::ProcessedAndCleared,
            progress: 100,
            assigned: &["Legal Team"],
            due: day(2025, 2, 10)?,
            priority: Priority::High,
            notes: "Termination case, decision in favour of employer",
        },
        WorkflowRow {
            name: "Shauna Paike v. Bank South Pacific",
            kind: "Tribunal Determination",
            category: WorkflowCategory::Tribunal,
            status: WorkflowStatus::ProcessedAndCleared,
            progress: 100,
            assigned: &["Legal Team"],
            due: day(2025, 2, 15)?,
            priority: Priority::High,
            notes: "Unfair dismissal claim, no hearing conducted",
        },
        WorkflowRow {
            name: "Pius Yafaet v. Air Niugini Ltd",
            kind: "Tribunal Determination",
            category: WorkflowCategory::Tribunal,
            status: WorkflowStatus::PendingNecConsideration,
            progress: 80,
            assigned: &["Natasha Utubasi", "Legal Team"],
            due: day(2025, 5, 30)?,
            priority: Priority::Critical,
            notes: "Retrospective reinstatement award requires NEC consideration",
        },
        WorkflowRow {
            name: "Police Association of PNG Election",
            kind: "Union Election",
            category: WorkflowCategory::Unions,
            status: WorkflowStatus::InProgress,
            progress: 60,
            assigned: &["Electoral Team"],
            due: day(2025, 6, 30)?,
            priority: Priority::High,
            notes: "Ballot box issues from 2021 election being resolved",
        },
        WorkflowRow {
            name: "Maria Merava vs Express Freight Management",
            kind: "Legal Review",
            category: WorkflowCategory::Legal,
            status: WorkflowStatus::ReferredToNec,
            progress: 100,
            assigned: &["Legal Team"],
            due: day(2025, 1, 30)?,
            priority: Priority::Completed,
            notes: "10-year old termination case with retrospective reinstatement",
        },
    ];
    Ok(rows.into_iter().map(WorkflowRow::build).collect())
}

fn tribunal_decision(name: &str, uploaded: NaiveDate) -> AttachedDocument {
    AttachedDocument {
        name: name.to_string(),
        kind: "Tribunal Decision".to_string(),
        url: "#".to_string(),
        date_uploaded: uploaded,
    }
}

fn correspondence(workflows: &[WorkflowId]) -> Result<Vec<Correspondence>, RegistryError> {
    const CONCILIATION: &str =
        "Beverley Doiwa, Chairman, Office of Industrial Conciliation & Arbitration & MWB";
    let received = day(2025, 1, 6)?;
    let linked = |index: usize| workflows.get(index).copied();

    Ok(vec![
        Correspondence {
            id: CorrespondenceId::new(),
            date_received: received,
            sender: CONCILIATION.to_string(),
            subject: "Registration and safekeeping of four (4) ADHOC Tribunal Decisions"
                .to_string(),
            document_date: day(2024, 11, 6)?,
            referred_to: None,
            date_out: None,
            comments: String::new(),
            status: CorrespondenceStatus::Processed,
            workflow: linked(EDDY_YAMAN),
            documents: vec![tribunal_decision("Eddy Yaman vs Air Niugini Limited", received)],
        },
        Correspondence {
            id: CorrespondenceId::new(),
            date_received: received,
            sender: CONCILIATION.to_string(),
            subject: "Registration and safekeeping of Tribunal Decisions".to_string(),
            document_date: day(2024, 10, 31)?,
            referred_to: Some("Mrs Utubasi, a/Industrial Registrar".to_string()),
            date_out: Some(received),
            comments: "Awards hand-delivered and received on 06 Jan 2025; to be registered \
                       under the acting Industrial Registrar."
                .to_string(),
            status: CorrespondenceStatus::Processed,
            workflow: linked(PIUS_YAFAET),
            documents: vec![tribunal_decision("Pius Yafacet vs Air Niugini Limited", received)],
        },
        Correspondence {
            id: CorrespondenceId::new(),
            date_received: day(2025, 1, 8)?,
            sender: "George Taunakekei, Secretary, DLIR".to_string(),
            subject: "Minister's Planning Workshop".to_string(),
            document_date: day(2025, 1, 8)?,
            referred_to: None,
            date_out: None,
            comments: String::new(),
            status: CorrespondenceStatus::Processed,
            workflow: None,
            documents: Vec::new(),
        },
        Correspondence {
            id: CorrespondenceId::new(),
            date_received: day(2025, 1, 27)?,
            sender: "Hon. Kessy Sawang MP, Minister of Labour & Empl.".to_string(),
            subject: "Referral of Industrial Cases".to_string(),
            document_date: day(2025, 1, 7)?,
            referred_to: Some("Legal Team".to_string()),
            date_out: Some(day(2025, 1, 28)?),
            comments: "Urgent review required".to_string(),
            status: CorrespondenceStatus::Processed,
            workflow: linked(MARIA_MERAVA),
            documents: Vec::new(),
        },
    ])
}
