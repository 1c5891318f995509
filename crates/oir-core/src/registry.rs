//! Registry service
//!
//! Owns the union, document, member, workflow and correspondence stores and
//! enforces the cross-record rules:
//! - union codes are unique and allocated from `IO-100..=IO-999`
//! - documents and members must belong to a registered union
//! - correspondence may point at a workflow that does not exist yet;
//!   [`Registry::dangling_correspondence`] reports those links

use crate::clock::{Clock, SystemClock};
use crate::config::RegistryConfig;
use crate::drafts::{Draft, MemberDraft, UnionDraft};
use crate::error::{DraftError, RegistryError};
use crate::repository::{InMemoryRepository, Repository};
use crate::upload::ValidatedUpload;
use oir_model::{
    Catalog, Correspondence, CorrespondenceId, Document, DocumentId, FolderType, Member,
    RecordStatus, Union, UnionCode, UnionId, UserView, Workflow, WorkflowCategory, WorkflowId,
};
use oir_search::{
    filter, filter_where, filter_workflows, FilterState, SearchIndex, Sources, StatusFilter,
    WorkflowStats,
};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

/// Random draws before falling back to a linear scan for a free code
const CODE_ATTEMPTS: usize = 32;

/// Registry of unions and their records
#[derive(Debug)]
pub struct Registry {
    unions: InMemoryRepository<Union>,
    documents: InMemoryRepository<Document>,
    members: InMemoryRepository<Member>,
    workflows: InMemoryRepository<Workflow>,
    correspondence: InMemoryRepository<Correspondence>,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl Registry {
    /// Empty registry on the system clock
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(config: RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            unions: InMemoryRepository::new(),
            documents: InMemoryRepository::new(),
            members: InMemoryRepository::new(),
            workflows: InMemoryRepository::new(),
            correspondence: InMemoryRepository::new(),
            clock,
            config,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Taxonomy snapshot using this registry's upload policy
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.config.upload)
    }

    // Unions

    /// Register a union from a completed form
    ///
    /// The code is drawn at random from the free codes; the registration
    /// date is today, member count and year fall back to 0 and the current
    /// year.
    pub fn register_union(&self, draft: UnionDraft) -> Result<Union, RegistryError> {
        draft.validate()?;
        let union = self.unions.create_with(|taken| {
            let code = allocate_code(taken, &HashSet::new())?;
            self.union_from_draft(draft, code)
        })?;
        tracing::info!(code = %union.code, name = %union.name, "union registered");
        Ok(union)
    }

    /// Register every draft or none of them
    pub fn register_unions(&self, drafts: Vec<UnionDraft>) -> Result<Vec<Union>, RegistryError> {
        for draft in &drafts {
            draft.validate()?;
        }
        let unions = self.unions.create_all_with(|taken| {
            let mut held = HashSet::with_capacity(drafts.len());
            drafts
                .into_iter()
                .map(|draft| {
                    let code = allocate_code(taken, &held)?;
                    held.insert(code);
                    self.union_from_draft(draft, code)
                })
                .collect()
        })?;
        for union in &unions {
            tracing::info!(code = %union.code, name = %union.name, "union registered");
        }
        Ok(unions)
    }

    fn union_from_draft(
        &self,
        draft: UnionDraft,
        code: UnionCode,
    ) -> Result<Union, RegistryError> {
        let province = draft
            .province
            .ok_or_else(|| DraftError::MissingFields(vec!["province"]))?;
        Ok(Union {
            id: UnionId::new(),
            code,
            name: draft.name.trim().to_string(),
            abbreviation: draft.abbreviation.trim().to_string(),
            registered_date: self.clock.today(),
            status: draft.status,
            member_count: draft.member_count.unwrap_or(0),
            industries: draft.industries,
            province,
            branches: draft.branches,
            year: draft
                .year
                .filter(|y| !y.trim().is_empty())
                .unwrap_or_else(|| self.clock.year().to_string()),
        })
    }

    /// Add an already-coded union, e.g. when loading existing records
    pub fn insert_union(&self, union: Union) -> Result<Union, RegistryError> {
        self.unions.create(union)
    }

    /// Change a union's status; any transition is allowed
    pub fn set_union_status(
        &self,
        code: UnionCode,
        status: RecordStatus,
    ) -> Result<Union, RegistryError> {
        let union = self.unions.modify(&code, |u| u.status = status)?;
        tracing::info!(%code, status = %status, "union status changed");
        Ok(union)
    }

    #[must_use]
    pub fn union(&self, code: UnionCode) -> Option<Union> {
        self.unions.get(&code)
    }

    #[must_use]
    pub fn unions(&self) -> Vec<Union> {
        self.unions.list()
    }

    /// Unions admitted by `state`
    #[must_use]
    pub fn find_unions(&self, state: &FilterState<RecordStatus>) -> Vec<Union> {
        let all = self.unions.list();
        filter(&all, state).into_iter().cloned().collect()
    }

    fn require_union(&self, code: UnionCode) -> Result<Union, RegistryError> {
        self.unions
            .get(&code)
            .ok_or(RegistryError::UnknownUnion(code))
    }

    // Documents

    /// File a validated upload under a union; folder defaults to general
    pub fn attach_document(
        &self,
        union_code: UnionCode,
        folder: Option<FolderType>,
        upload: ValidatedUpload,
        uploaded_by: &str,
    ) -> Result<Document, RegistryError> {
        let union = self.require_union(union_code)?;
        let document = Document {
            id: DocumentId::new(),
            file_name: upload.file_name,
            union_code,
            union_name: union.name,
            folder: folder.unwrap_or_default(),
            uploaded_by: uploaded_by.to_string(),
            upload_date: self.clock.today(),
            file_size: upload.file_size_display,
            file_type: upload.file_type,
        };

        let document = self.documents.create(document)?;
        tracing::info!(
            union = %union_code,
            folder = document.folder.code(),
            file = %document.file_name,
            "document attached"
        );
        Ok(document)
    }

    /// Add an existing document record; its union must be registered
    pub fn insert_document(&self, document: Document) -> Result<Document, RegistryError> {
        self.require_union(document.union_code)?;
        self.documents.create(document)
    }

    /// Documents filed under `code`, in upload order
    #[must_use]
    pub fn documents_for(&self, code: UnionCode) -> Vec<Document> {
        self.documents.find(|d| d.union_code == code)
    }

    /// Documents admitted by `state`, optionally scoped to one union
    #[must_use]
    pub fn find_documents(
        &self,
        union: Option<UnionCode>,
        state: &FilterState<FolderType>,
    ) -> Vec<Document> {
        let all = self.documents.list();
        filter_where(&all, state, |d| union.map_or(true, |c| d.union_code == c))
            .into_iter()
            .cloned()
            .collect()
    }

    // Members

    /// Convert and store a batch of member drafts
    ///
    /// The whole batch is checked before anything is stored, so a bad draft
    /// leaves the registry unchanged.
    pub fn enroll_members(&self, drafts: Vec<MemberDraft>) -> Result<Vec<Member>, RegistryError> {
        let members = drafts
            .into_iter()
            .map(MemberDraft::into_member)
            .collect::<Result<Vec<_>, _>>()?;
        for member in &members {
            self.require_union(member.union_code)?;
        }

        let stored = members
            .into_iter()
            .map(|m| self.members.create(m))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(count = stored.len(), "members enrolled");
        Ok(stored)
    }

    /// Add an existing member record; its union must be registered
    pub fn insert_member(&self, member: Member) -> Result<Member, RegistryError> {
        self.require_union(member.union_code)?;
        self.members.create(member)
    }

    /// Members of `code`, in enrolment order
    #[must_use]
    pub fn members_of(&self, code: UnionCode) -> Vec<Member> {
        self.members.find(|m| m.union_code == code)
    }

    #[must_use]
    pub fn members(&self) -> Vec<Member> {
        self.members.list()
    }

    /// Members admitted by `state`
    #[must_use]
    pub fn find_members(&self, state: &FilterState<RecordStatus>) -> Vec<Member> {
        let all = self.members.list();
        filter(&all, state).into_iter().cloned().collect()
    }

    // Workflows and correspondence

    pub fn add_workflow(&self, mut workflow: Workflow) -> Result<Workflow, RegistryError> {
        workflow.set_progress(workflow.progress);
        let workflow = self.workflows.create(workflow)?;
        tracing::debug!(workflow = %workflow.id, name = %workflow.name, "workflow added");
        Ok(workflow)
    }

    #[must_use]
    pub fn workflow(&self, id: WorkflowId) -> Option<Workflow> {
        self.workflows.get(&id)
    }

    #[must_use]
    pub fn workflows(&self) -> Vec<Workflow> {
        self.workflows.list()
    }

    /// Workflows on the `tab` board passing `status`
    #[must_use]
    pub fn board(&self, tab: Option<WorkflowCategory>, status: StatusFilter) -> Vec<Workflow> {
        let all = self.workflows.list();
        filter_workflows(&all, tab, status)
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn workflow_stats(&self) -> WorkflowStats {
        WorkflowStats::collect(&self.workflows.list())
    }

    /// Store an incoming letter
    ///
    /// When it names an existing workflow the workflow is linked back; a
    /// workflow that does not exist yet is tolerated.
    pub fn record_correspondence(
        &self,
        letter: Correspondence,
    ) -> Result<Correspondence, RegistryError> {
        let letter = self.correspondence.create(letter)?;
        if let Some(workflow) = letter.workflow {
            match self.workflows.modify(&workflow, |w| {
                w.link(letter.id);
            }) {
                Ok(_) => {}
                Err(RegistryError::NotFound { .. }) => {
                    tracing::warn!(
                        correspondence = %letter.id,
                        %workflow,
                        "correspondence refers to an unknown workflow"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(letter)
    }

    /// Link a letter to a workflow in both directions
    pub fn link_correspondence(
        &self,
        letter: CorrespondenceId,
        workflow: WorkflowId,
    ) -> Result<(), RegistryError> {
        if !self.workflows.contains(&workflow) {
            return Err(RegistryError::not_found("workflow", workflow));
        }
        self.correspondence
            .modify(&letter, |c| c.workflow = Some(workflow))?;
        self.workflows.modify(&workflow, |w| {
            w.link(letter);
        })?;
        Ok(())
    }

    #[must_use]
    pub fn correspondence(&self) -> Vec<Correspondence> {
        self.correspondence.list()
    }

    /// Letters of `workflow`, in the order they were linked
    #[must_use]
    pub fn correspondence_for(&self, workflow: WorkflowId) -> Vec<Correspondence> {
        self.workflows
            .get(&workflow)
            .map(|w| {
                w.correspondence
                    .iter()
                    .filter_map(|id| self.correspondence.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Letters pointing at a workflow that is not registered
    #[must_use]
    pub fn dangling_correspondence(&self) -> Vec<Correspondence> {
        self.correspondence.find(|c| {
            c.workflow
                .is_some_and(|workflow| !self.workflows.contains(&workflow))
        })
    }

    // Search

    /// Global search snapshot over every record plus `users`
    #[must_use]
    pub fn search_index(&self, users: &[UserView]) -> SearchIndex {
        let unions = self.unions.list();
        let documents = self.documents.list();
        let members = self.members.list();
        let workflows = self.workflows.list();
        SearchIndex::build(Sources {
            unions: &unions,
            documents: &documents,
            members: &members,
            workflows: &workflows,
            users,
        })
    }
}

/// A code that is neither stored (`taken`) nor already picked for this batch
fn allocate_code(
    taken: &dyn Fn(&UnionCode) -> bool,
    held: &HashSet<UnionCode>,
) -> Result<UnionCode, RegistryError> {
    let free = |code: &UnionCode| !taken(code) && !held.contains(code);
    let mut rng = rand::rng();
    for _ in 0..CODE_ATTEMPTS {
        let code = UnionCode::new(rng.random_range(UnionCode::MIN..=UnionCode::MAX))?;
        if free(&code) {
            return Ok(code);
        }
    }

    (UnionCode::MIN..=UnionCode::MAX)
        .filter_map(|n| UnionCode::new(n).ok())
        .find(|code| free(code))
        .ok_or(RegistryError::CodeSpaceExhausted)
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
