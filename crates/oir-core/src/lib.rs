//! OIR Core Services
//!
//! Stateful services behind the Office of the Industrial Registrar records
//! system.
//!
//! # Core Concepts
//!
//! - [`Registry`]: unions, documents, members, workflows and correspondence
//!   with their cross-record rules
//! - [`BatchSubmission`]: drafts validated one by one, then submitted as a
//!   batch through a [`BatchSubmitter`]
//! - [`SearchSession`]: debounced global search publishing [`SearchState`]
//! - [`DocumentUploader`]: upload validation in front of a [`DocumentStore`]
//! - [`UserDirectory`]: staff accounts with salted password hashes
//!
//! # Example
//!
//! ```rust
//! use oir_core::{Registry, RegistryConfig, UnionDraft};
//! use oir_model::{Industry, Province};
//!
//! let registry = Registry::new(RegistryConfig::default());
//! let union = registry
//!     .register_union(
//!         UnionDraft::new("Test Union", "TU")
//!             .with_province(Province::Central)
//!             .with_industry(Industry::Mining),
//!     )
//!     .unwrap();
//! assert_eq!(union.member_count, 0);
//! assert!(union.code.to_string().starts_with("IO-"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod clock;
pub mod config;
pub mod credentials;
pub mod debounce;
pub mod drafts;
pub mod error;
pub mod registry;
pub mod repository;
pub mod search_session;
pub mod seed;
pub mod storage;
pub mod submission;
pub mod upload;
pub mod users;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::RegistryConfig;
pub use debounce::Debouncer;
pub use drafts::{Draft, MemberDraft, UnionDraft};
pub use error::{DraftError, RegistryError, SubmitError, UploadError, UserError};
pub use registry::Registry;
pub use repository::{Entity, InMemoryRepository, Repository};
pub use search_session::{SearchSession, SearchState};
pub use storage::{
    DocumentMetadata, DocumentStore, DocumentUploader, LocalDocumentStore, MemoryDocumentStore,
    UploadReceipt, UploadRequest,
};
pub use submission::{
    BatchSubmission, BatchSubmitter, RegistrySubmitter, SimulatedSubmitter, SubmissionStatus,
};
pub use upload::{validate_upload, ValidatedUpload};
pub use users::{NewUser, UserDirectory};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the registry services
    pub use crate::{
        BatchSubmission, BatchSubmitter, Draft, MemberDraft, Registry, RegistryConfig,
        RegistryError, UnionDraft, UserDirectory,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
