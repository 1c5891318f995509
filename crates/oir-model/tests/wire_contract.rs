//! Wire-format contract for records exchanged with the dashboard.

use chrono::NaiveDate;
use oir_model::{
    AttachedDocument, Correspondence, CorrespondenceId, CorrespondenceStatus, Member, MemberId,
    RecordStatus, UnionCode, WorkflowId,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn correspondence_omits_absent_optionals() {
    let letter = Correspondence {
        id: CorrespondenceId::new(),
        date_received: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
        sender: "George Taunakekei, Secretary - DLIR".to_string(),
        subject: "Minister's Planning Workshop".to_string(),
        document_date: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
        referred_to: None,
        date_out: None,
        comments: String::new(),
        status: CorrespondenceStatus::Processed,
        workflow: None,
        documents: Vec::new(),
    };

    let value = serde_json::to_value(&letter).unwrap();
    assert_eq!(value["from"], "George Taunakekei, Secretary - DLIR");
    assert!(value.get("referredTo").is_none());
    assert!(value.get("dateOut").is_none());
    assert!(value.get("workflow").is_none());

    let back: Correspondence = serde_json::from_value(value).unwrap();
    assert_eq!(back, letter);
}

#[test]
fn correspondence_accepts_linked_workflow_and_attachments() {
    let workflow = WorkflowId::new();
    let value = json!({
        "id": CorrespondenceId::new().to_string(),
        "dateReceived": "2025-01-06",
        "from": "Office of Industrial Conciliation",
        "subject": "Registration of Tribunal Decisions",
        "documentDate": "2024-10-31",
        "referredTo": "Acting Industrial Registrar",
        "dateOut": "2025-01-06",
        "status": "processed",
        "workflow": workflow.to_string(),
        "documents": [{
            "name": "Pius Yafacet vs Air Niugini Limited",
            "type": "Tribunal Decision",
            "url": "#",
            "dateUploaded": "2025-01-06"
        }]
    });

    let letter: Correspondence = serde_json::from_value(value).unwrap();
    assert_eq!(letter.workflow, Some(workflow));
    assert_eq!(letter.comments, "");
    assert_eq!(
        letter.documents,
        vec![AttachedDocument {
            name: "Pius Yafacet vs Air Niugini Limited".to_string(),
            kind: "Tribunal Decision".to_string(),
            url: "#".to_string(),
            date_uploaded: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        }]
    );
}

#[test]
fn member_rejects_malformed_union_code() {
    let value = json!({
        "id": MemberId::new().to_string(),
        "unionCode": "IO-14",
        "name": "John Smith",
        "employeeId": "EMP001",
        "position": "Senior Engineer",
        "joiningDate": "2023-01-15",
        "status": "active"
    });
    assert!(serde_json::from_value::<Member>(value).is_err());
}

#[test]
fn member_round_trips_through_json() {
    let member = Member {
        id: MemberId::new(),
        union_code: "IO-143".parse::<UnionCode>().unwrap(),
        name: "Michael Brown".to_string(),
        employee_id: "EMP003".to_string(),
        position: "Healthcare Worker".to_string(),
        joining_date: NaiveDate::from_ymd_opt(2023, 3, 10).unwrap(),
        status: RecordStatus::Active,
    };
    let text = serde_json::to_string(&member).unwrap();
    assert!(text.contains("\"employeeId\":\"EMP003\""));
    assert_eq!(serde_json::from_str::<Member>(&text).unwrap(), member);
}
