//! OIR Record Model
//!
//! Typed records kept by the Office of the Industrial Registrar and the
//! closed catalogs used to classify them.
//!
//! # Core Concepts
//!
//! - [`Union`], [`Document`], [`Member`]: the union registry and its files
//! - [`Workflow`], [`Correspondence`]: award workflows and incoming letters
//! - [`User`]: staff accounts (credential never serialised)
//! - [`catalog`]: industries, provinces, folder types, upload file types
//!
//! # Example
//!
//! ```rust
//! use oir_model::{catalog, FolderType, UnionCode};
//!
//! let code: UnionCode = "IO-142".parse().unwrap();
//! assert_eq!(code.number(), 142);
//!
//! assert_eq!(catalog::folder_name("rules"), Some("Rules and Constitution"));
//! assert_eq!(catalog::folder_name_or_default("unknown"), FolderType::General.name());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
mod ids;
mod records;
mod status;
mod user;
mod workflow;

pub use catalog::{Catalog, FileType, FolderType, Industry, Province, UploadPolicy};
pub use error::ModelError;
pub use ids::{CorrespondenceId, DocumentId, MemberId, UnionCode, UnionId, UserId, WorkflowId};
pub use records::{Document, Member, Union};
pub use status::{Priority, RecordStatus, Tone};
pub use user::{AccountStatus, Role, User, UserView};
pub use workflow::{
    AttachedDocument, Correspondence, CorrespondenceStatus, StatusGroup, Workflow,
    WorkflowCategory, WorkflowStatus,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
