//! OIR Search
//!
//! Pure filtering and ranking over registry records:
//! - [`FilterState`]: free-text query plus per-category flags
//! - [`filter`] / [`filter_where`]: conjunctive text and category predicates
//! - [`SearchIndex`]: global search across unions, documents, members,
//!   workflows and users, ranked by relevance
//! - [`workflow_view`]: workflow board status tabs and counters
//!
//! # Example
//!
//! ```rust
//! use oir_search::{Category, SearchFilters, SearchKind};
//!
//! let mut filters = SearchFilters::new().with_query("amwu");
//! assert!(!filters.is_enabled(SearchKind::User));
//! filters.toggle(SearchKind::User);
//! assert_eq!(SearchKind::from_key("users"), Some(SearchKind::User));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod filter;
pub mod global;
pub mod query;
mod records;
pub mod workflow_view;

pub use filter::{count, filter, filter_where, Category, FilterState, Searchable};
pub use global::{SearchFilters, SearchIndex, SearchKind, SearchResult, Sources};
pub use query::TextQuery;
pub use workflow_view::{filter_workflows, StatusFilter, WorkflowStats};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for filtering registry records
    pub use crate::{
        filter, filter_where, Category, FilterState, SearchFilters, SearchIndex, SearchKind,
        Searchable, TextQuery,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
