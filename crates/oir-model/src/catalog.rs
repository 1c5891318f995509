//! Classification catalog
//!
//! Closed sets used to classify unions and documents:
//! - [`Industry`]: 13 sectors a union may cover
//! - [`Province`]: 21 provinces a union is registered in
//! - [`FolderType`]: 12 record folders a union's documents are filed under
//! - [`FileType`]: extensions accepted for upload
//!
//! Lookups by code return `Option` so callers can fall back to a default
//! label; strict parsing goes through `FromStr` and returns [`ModelError`].

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for an uploaded file, in megabytes
pub const MAX_UPLOAD_MB: u64 = 10;

const BYTES_PER_MB: u64 = 1024 * 1024;

macro_rules! named_set {
    (
        $(#[$meta:meta])*
        $name:ident, $err:path, { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in catalog order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Display name
            #[inline]
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Look up by display name, ignoring case
            #[must_use]
            pub fn lookup(name: &str) -> Option<Self> {
                let name = name.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(name))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::lookup(s).ok_or_else(|| $err(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

named_set!(
    /// Industry sector covered by a union
    Industry, ModelError::UnknownIndustry, {
        Mining => "Mining",
        Fisheries => "Fisheries",
        Agriculture => "Agriculture",
        Forestry => "Forestry",
        Construction => "Construction",
        Manufacturing => "Manufacturing",
        Services => "Services",
        Transport => "Transport",
        Energy => "Energy",
        Tourism => "Tourism",
        Finance => "Finance",
        Education => "Education",
        Healthcare => "Healthcare",
    }
);

named_set!(
    /// Province a union is registered in
    Province, ModelError::UnknownProvince, {
        Central => "Central",
        Gulf => "Gulf",
        MilneBay => "Milne Bay",
        Oro => "Oro",
        SouthernHighlands => "Southern Highlands",
        WesternHighlands => "Western Highlands",
        Enga => "Enga",
        Simbu => "Simbu",
        EasternHighlands => "Eastern Highlands",
        Morobe => "Morobe",
        Madang => "Madang",
        EastSepik => "East Sepik",
        WestSepik => "West Sepik",
        Manus => "Manus",
        NewIreland => "New Ireland",
        EastNewBritain => "East New Britain",
        WestNewBritain => "West New Britain",
        Bougainville => "Autonomous Region of Bougainville",
        NationalCapitalDistrict => "National Capital District",
        Hela => "Hela",
        Jiwaka => "Jiwaka",
    }
);

/// Folder a union document is filed under
///
/// Serialised by its short code (`"rules"`), displayed by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FolderType {
    #[default]
    General,
    Application,
    Registration,
    Rules,
    Membership,
    Elections,
    Ballots,
    Financial,
    Affiliations,
    Inspections,
    Appointments,
    Welfare,
}

impl FolderType {
    /// Every folder, in catalog order
    pub const ALL: &'static [Self] = &[
        Self::General,
        Self::Application,
        Self::Registration,
        Self::Rules,
        Self::Membership,
        Self::Elections,
        Self::Ballots,
        Self::Financial,
        Self::Affiliations,
        Self::Inspections,
        Self::Appointments,
        Self::Welfare,
    ];

    /// Short code used in storage paths and filters
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Application => "application",
            Self::Registration => "registration",
            Self::Rules => "rules",
            Self::Membership => "membership",
            Self::Elections => "elections",
            Self::Ballots => "ballots",
            Self::Financial => "financial",
            Self::Affiliations => "affiliations",
            Self::Inspections => "inspections",
            Self::Appointments => "appointments",
            Self::Welfare => "welfare",
        }
    }

    /// Human-readable folder name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::General => "General Matters",
            Self::Application => "Application For Registration",
            Self::Registration => "Registration Certificate",
            Self::Rules => "Rules and Constitution",
            Self::Membership => "Financial Membership List",
            Self::Elections => "Election of Office Bearers",
            Self::Ballots => "Secret Ballots",
            Self::Financial => "Financial Returns",
            Self::Affiliations => "Affiliations",
            Self::Inspections => "Inspection Reports",
            Self::Appointments => "General Secretary Appointments",
            Self::Welfare => "Welfare Funds",
        }
    }

    /// Look up a folder by code
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FolderType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ModelError::UnknownFolder(s.to_string()))
    }
}

impl Serialize for FolderType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for FolderType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Folder name for a code
///
/// Returns `None` for codes outside the catalog.
#[inline]
#[must_use]
pub fn folder_name(code: &str) -> Option<&'static str> {
    FolderType::from_code(code).map(FolderType::name)
}

/// Folder name for a code, falling back to the general folder
#[inline]
#[must_use]
pub fn folder_name_or_default(code: &str) -> &'static str {
    folder_name(code).unwrap_or_else(|| FolderType::default().name())
}

/// File type accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Pdf,
    Docx,
    Xlsx,
    Jpg,
    Png,
}

impl FileType {
    /// Every accepted type
    pub const ALL: &'static [Self] = &[Self::Pdf, Self::Docx, Self::Xlsx, Self::Jpg, Self::Png];

    /// Lowercase extension
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }

    /// Uppercase label shown next to file names
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Xlsx => "XLSX",
            Self::Jpg => "JPG",
            Self::Png => "PNG",
        }
    }

    /// Whether the type is an image
    #[inline]
    #[must_use]
    pub fn is_image(self) -> bool {
        matches!(self, Self::Jpg | Self::Png)
    }

    /// Look up by extension, ignoring case and a leading dot
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim().trim_start_matches('.');
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FileType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| ModelError::UnknownFileType(s.to_string()))
    }
}

impl Serialize for FileType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for FileType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether an extension is accepted for upload
#[inline]
#[must_use]
pub fn is_valid_extension(ext: &str) -> bool {
    FileType::from_extension(ext).is_some()
}

/// Size bound applied to uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPolicy {
    /// Largest accepted file, in bytes
    pub max_bytes: u64,
}

impl UploadPolicy {
    /// Policy with a limit in megabytes
    #[inline]
    #[must_use]
    pub fn with_max_mb(mb: u64) -> Self {
        Self {
            max_bytes: mb * BYTES_PER_MB,
        }
    }

    /// Whether `bytes` fits the limit (inclusive)
    #[inline]
    #[must_use]
    pub fn within_limit(&self, bytes: u64) -> bool {
        bytes <= self.max_bytes
    }

    /// Limit rendered in whole megabytes
    #[inline]
    #[must_use]
    pub fn max_mb(&self) -> u64 {
        self.max_bytes / BYTES_PER_MB
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::with_max_mb(MAX_UPLOAD_MB)
    }
}

/// Render a byte count in megabytes with one decimal (`"2.4 MB"`)
#[must_use]
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / BYTES_PER_MB as f64)
}

/// Folder entry as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderEntry {
    pub code: &'static str,
    pub name: &'static str,
}

/// Snapshot of every closed set, for clients building forms
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub industries: Vec<Industry>,
    pub provinces: Vec<Province>,
    pub folders: Vec<FolderEntry>,
    pub file_types: Vec<&'static str>,
    pub max_upload_bytes: u64,
}

impl Catalog {
    /// Build the snapshot for a given upload policy
    #[must_use]
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            industries: Industry::ALL.to_vec(),
            provinces: Province::ALL.to_vec(),
            folders: FolderType::ALL
                .iter()
                .map(|f| FolderEntry {
                    code: f.code(),
                    name: f.name(),
                })
                .collect(),
            file_types: FileType::ALL.iter().map(|t| t.extension()).collect(),
            max_upload_bytes: policy.max_bytes,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(UploadPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_sizes_are_fixed() {
        assert_eq!(Industry::ALL.len(), 13);
        assert_eq!(Province::ALL.len(), 21);
        assert_eq!(FolderType::ALL.len(), 12);
        assert_eq!(FileType::ALL.len(), 5);
    }

    #[test]
    fn folder_lookup_by_code() {
        assert_eq!(folder_name("rules"), Some("Rules and Constitution"));
        assert_eq!(folder_name("minutes"), None);
        assert_eq!(folder_name_or_default("minutes"), "General Matters");
        assert_eq!("welfare".parse::<FolderType>().unwrap(), FolderType::Welfare);
        assert!(matches!(
            "minutes".parse::<FolderType>(),
            Err(ModelError::UnknownFolder(_))
        ));
    }

    #[test]
    fn folder_codes_are_unique() {
        let mut codes: Vec<_> = FolderType::ALL.iter().map(|f| f.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), FolderType::ALL.len());
    }

    #[test]
    fn extension_membership_ignores_case() {
        assert!(is_valid_extension("pdf"));
        assert!(is_valid_extension("PDF"));
        assert!(is_valid_extension(".docx"));
        assert!(!is_valid_extension("exe"));
        assert!(!is_valid_extension("doc"));
    }

    #[test]
    fn upload_policy_limit_is_inclusive() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.max_mb(), 10);
        assert!(policy.within_limit(10 * 1024 * 1024));
        assert!(!policy.within_limit(10 * 1024 * 1024 + 1));
    }

    #[test]
    fn megabytes_render_with_one_decimal() {
        assert_eq!(format_megabytes(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(format_megabytes(2_516_582), "2.4 MB");
        assert_eq!(format_megabytes(0), "0.0 MB");
    }

    #[test]
    fn provinces_parse_by_display_name() {
        assert_eq!(
            "national capital district".parse::<Province>().unwrap(),
            Province::NationalCapitalDistrict
        );
        assert!("Atlantis".parse::<Province>().is_err());
    }

    #[test]
    fn serde_uses_catalog_labels() {
        let json = serde_json::to_string(&(Industry::Mining, FolderType::Rules, FileType::Pdf)).unwrap();
        assert_eq!(json, r#"["Mining","rules","PDF"]"#);

        let back: (Industry, FolderType, FileType) = serde_json::from_str(&json).unwrap();
        assert_eq!(back, (Industry::Mining, FolderType::Rules, FileType::Pdf));
    }

    #[test]
    fn catalog_snapshot_lists_folders_in_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.folders[0].code, "general");
        assert_eq!(catalog.folders[11].name, "Welfare Funds");
        assert_eq!(catalog.max_upload_bytes, 10 * 1024 * 1024);
    }
}
