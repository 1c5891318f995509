//! Global search across every record kind
//!
//! Records are projected into [`SearchResult`]s and collected into a
//! [`SearchIndex`]. A search scores each result against the query, drops the
//! ones that do not match and ranks the rest with the filter engine.
//!
//! | score | condition                                   |
//! |-------|---------------------------------------------|
//! | 1.0   | title equals the query                      |
//! | 0.9   | title starts with the query                 |
//! | 0.8   | title contains the query                    |
//! | 0.6   | description or union name contains the query |

use crate::filter::{filter, Category, FilterState, Searchable};
use crate::query::TextQuery;
use chrono::NaiveDate;
use oir_model::{Document, FileType, FolderType, Member, Union, UnionCode, UserView, Workflow};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Kind of record a search result points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Union,
    Certificate,
    Award,
    Constitution,
    Membership,
    File,
    User,
}

impl SearchKind {
    pub const ALL: &'static [Self] = &[
        Self::Union,
        Self::Certificate,
        Self::Award,
        Self::Constitution,
        Self::Membership,
        Self::File,
        Self::User,
    ];

    /// Value of the result's `type` field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Certificate => "certificate",
            Self::Award => "award",
            Self::Constitution => "constitution",
            Self::Membership => "membership",
            Self::File => "file",
            Self::User => "user",
        }
    }

    /// Result kind for a document filed in `folder`
    #[must_use]
    pub fn for_folder(folder: FolderType) -> Self {
        match folder {
            FolderType::Registration => Self::Certificate,
            FolderType::Rules => Self::Constitution,
            FolderType::Membership => Self::Membership,
            _ => Self::File,
        }
    }
}

impl Category for SearchKind {
    const ALL: &'static [Self] = SearchKind::ALL;

    fn key(self) -> &'static str {
        match self {
            Self::Union => "unions",
            Self::Certificate => "certificates",
            Self::Award => "awards",
            Self::Constitution => "constitutions",
            Self::Membership => "memberships",
            Self::File => "files",
            Self::User => "users",
        }
    }

    fn default_enabled(self) -> bool {
        self != Self::User
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter flags for the global search, keyed `unions`, `certificates`, ...
pub type SearchFilters = FilterState<SearchKind>;

/// One hit in the global search panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    pub date: NaiveDate,
    /// Dashboard route of the record
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
}

impl SearchResult {
    /// Score against `query`; `None` when the query is blank or nothing matches
    #[must_use]
    pub fn score(&self, query: &TextQuery) -> Option<f64> {
        if query.is_blank() {
            return None;
        }
        let needle = query.needle();
        let title = self.title.to_lowercase();
        if title == needle {
            Some(1.0)
        } else if title.starts_with(needle) {
            Some(0.9)
        } else if title.contains(needle) {
            Some(0.8)
        } else if query.matches(&self.description)
            || self.union_name.as_deref().is_some_and(|n| query.matches(n))
        {
            Some(0.6)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn with_union_name(mut self, name: impl Into<String>) -> Self {
        self.union_name = Some(name.into());
        self
    }
}

impl Searchable for SearchResult {
    type Category = SearchKind;

    fn category(&self) -> SearchKind {
        self.kind
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.description.as_str()),
        ];
        if let Some(name) = &self.union_name {
            fields.push(Cow::Borrowed(name.as_str()));
        }
        fields
    }

    fn relevance(&self) -> Option<f64> {
        self.relevance
    }
}

impl From<&Union> for SearchResult {
    fn from(union: &Union) -> Self {
        Self {
            id: union.id.to_string(),
            kind: SearchKind::Union,
            title: union.name.clone(),
            description: format!(
                "{} ({}), {} province",
                union.abbreviation, union.code, union.province
            ),
            union_name: None,
            file_type: None,
            date: union.registered_date,
            path: format!("/unions/{}", union.code),
            relevance: None,
        }
    }
}

impl From<&Document> for SearchResult {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            kind: SearchKind::for_folder(doc.folder),
            title: doc.file_name.clone(),
            description: doc.folder_name().to_string(),
            union_name: Some(doc.union_name.clone()),
            file_type: Some(doc.file_type),
            date: doc.upload_date,
            path: format!("/documents/{}/{}", doc.union_code, doc.id),
            relevance: None,
        }
    }
}

impl From<&Member> for SearchResult {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            kind: SearchKind::Membership,
            title: member.name.clone(),
            description: format!("{}, {}", member.position, member.employee_id),
            union_name: None,
            file_type: None,
            date: member.joining_date,
            path: format!("/membership/{}", member.union_code),
            relevance: None,
        }
    }
}

impl From<&Workflow> for SearchResult {
    fn from(workflow: &Workflow) -> Self {
        Self {
            id: workflow.id.to_string(),
            kind: SearchKind::Award,
            title: workflow.name.clone(),
            description: format!("{}, {}", workflow.kind, workflow.status),
            union_name: None,
            file_type: None,
            date: workflow.due_date,
            path: format!("/workflows/{}", workflow.id),
            relevance: None,
        }
    }
}

impl From<&UserView> for SearchResult {
    fn from(user: &UserView) -> Self {
        Self {
            id: user.id.to_string(),
            kind: SearchKind::User,
            title: user.name.clone(),
            description: format!("{}, {}", user.role, user.department),
            union_name: None,
            file_type: None,
            date: user.created_at.date_naive(),
            path: format!("/users/{}", user.id),
            relevance: None,
        }
    }
}

/// Records a [`SearchIndex`] is built from
#[derive(Debug, Clone, Copy, Default)]
pub struct Sources<'a> {
    pub unions: &'a [Union],
    pub documents: &'a [Document],
    pub members: &'a [Member],
    pub workflows: &'a [Workflow],
    pub users: &'a [UserView],
}

/// Snapshot of every searchable record
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<SearchResult>,
}

impl SearchIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Project every record in `sources`
    ///
    /// Members carry the name of their union when the union is present.
    #[must_use]
    pub fn build(sources: Sources<'_>) -> Self {
        let names: HashMap<UnionCode, &str> = sources
            .unions
            .iter()
            .map(|u| (u.code, u.name.as_str()))
            .collect();

        let mut entries = Vec::with_capacity(
            sources.unions.len()
                + sources.documents.len()
                + sources.members.len()
                + sources.workflows.len()
                + sources.users.len(),
        );
        entries.extend(sources.unions.iter().map(SearchResult::from));
        entries.extend(sources.documents.iter().map(SearchResult::from));
        entries.extend(sources.members.iter().map(|m| {
            let result = SearchResult::from(m);
            match names.get(&m.union_code) {
                Some(name) => result.with_union_name(*name),
                None => result,
            }
        }));
        entries.extend(sources.workflows.iter().map(SearchResult::from));
        entries.extend(sources.users.iter().map(SearchResult::from));

        Self { entries }
    }

    pub fn push(&mut self, result: SearchResult) {
        self.entries.push(result);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matching results, highest relevance first
    ///
    /// A blank query returns nothing.
    #[must_use]
    pub fn search(&self, filters: &SearchFilters) -> Vec<SearchResult> {
        let query = filters.query();
        if query.is_blank() {
            return Vec::new();
        }

        let scored: Vec<SearchResult> = self
            .entries
            .iter()
            .filter(|r| filters.is_enabled(r.kind))
            .filter_map(|r| {
                r.score(query).map(|relevance| SearchResult {
                    relevance: Some(relevance),
                    ..r.clone()
                })
            })
            .collect();

        let ranked: Vec<SearchResult> = filter(&scored, filters).into_iter().cloned().collect();
        tracing::debug!(query = query.raw(), hits = ranked.len(), "global search");
        ranked
    }
}

impl Extend<SearchResult> for SearchIndex {
    fn extend<I: IntoIterator<Item = SearchResult>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
