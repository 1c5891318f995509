//! Union, document and member records

use crate::catalog::{FileType, FolderType, Industry, Province};
use crate::ids::{DocumentId, MemberId, UnionCode, UnionId};
use crate::status::RecordStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registered trade union
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    pub id: UnionId,
    /// Unique registry code
    pub code: UnionCode,
    pub name: String,
    pub abbreviation: String,
    pub registered_date: NaiveDate,
    pub status: RecordStatus,
    pub member_count: u32,
    /// Sectors covered, in selection order without duplicates
    pub industries: Vec<Industry>,
    pub province: Province,
    pub branches: Vec<String>,
    /// Year the union was established
    pub year: String,
}

impl Union {
    /// Whether the union covers `industry`
    #[inline]
    #[must_use]
    pub fn covers(&self, industry: Industry) -> bool {
        self.industries.contains(&industry)
    }
}

/// Document filed in a union's records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub file_name: String,
    /// Owning union
    pub union_code: UnionCode,
    /// Owning union's name at filing time
    pub union_name: String,
    pub folder: FolderType,
    pub uploaded_by: String,
    pub upload_date: NaiveDate,
    /// Size rendered for display, e.g. `"2.4 MB"`
    pub file_size: String,
    pub file_type: FileType,
}

impl Document {
    /// Name of the folder the document is filed under
    #[inline]
    #[must_use]
    pub fn folder_name(&self) -> &'static str {
        self.folder.name()
    }
}

/// Union member on a membership list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    /// Registry code of the owning union
    pub union_code: UnionCode,
    pub name: String,
    pub employee_id: String,
    pub position: String,
    pub joining_date: NaiveDate,
    pub status: RecordStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_union() -> Union {
        Union {
            id: UnionId::new(),
            code: UnionCode::from_str("IO-142").unwrap(),
            name: "Australian Manufacturing Workers Union".to_string(),
            abbreviation: "AMWU".to_string(),
            registered_date: NaiveDate::from_ymd_opt(2022, 5, 15).unwrap(),
            status: RecordStatus::Active,
            member_count: 12_500,
            industries: vec![Industry::Manufacturing],
            province: Province::NationalCapitalDistrict,
            branches: vec!["Port Moresby".to_string(), "Lae".to_string()],
            year: "2022".to_string(),
        }
    }

    #[test]
    fn union_wire_format_uses_camel_case() {
        let json = serde_json::to_value(sample_union()).unwrap();
        assert_eq!(json["code"], "IO-142");
        assert_eq!(json["registeredDate"], "2022-05-15");
        assert_eq!(json["memberCount"], 12_500);
        assert_eq!(json["province"], "National Capital District");
        assert_eq!(json["industries"][0], "Manufacturing");
    }

    #[test]
    fn union_covers_listed_industries() {
        let union = sample_union();
        assert!(union.covers(Industry::Manufacturing));
        assert!(!union.covers(Industry::Mining));
    }

    #[test]
    fn document_reports_folder_name() {
        let doc = Document {
            id: DocumentId::new(),
            file_name: "AMWU_Constitution_2024.pdf".to_string(),
            union_code: UnionCode::from_str("IO-142").unwrap(),
            union_name: "Australian Manufacturing Workers Union".to_string(),
            folder: FolderType::Rules,
            uploaded_by: "Sarah Johnson".to_string(),
            upload_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            file_size: "2.4 MB".to_string(),
            file_type: FileType::Pdf,
        };
        assert_eq!(doc.folder_name(), "Rules and Constitution");

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["folder"], "rules");
        assert_eq!(json["fileType"], "PDF");
    }
}
