//! Document storage
//!
//! Uploaded files are stored under `{folder}/{millis}-{reference}.{ext}`
//! with a JSON metadata record kept alongside. Two stores are provided:
//! - [`LocalDocumentStore`]: files under a root directory, metadata in a
//!   `.meta.json` sidecar
//! - [`MemoryDocumentStore`]: process-local, for tests and demos

use crate::clock::{Clock, SystemClock};
use crate::error::UploadError;
use crate::upload::accepted_extensions;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use oir_model::catalog::format_megabytes;
use oir_model::{FileType, FolderType, UploadPolicy};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

const SIDECAR_SUFFIX: &str = ".meta.json";

/// Metadata stored with every document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub folder: FolderType,
    pub document_type: String,
    pub reference: String,
    pub description: String,
    pub file_type: FileType,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Backend holding document content and metadata
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    async fn save(
        &self,
        path: &str,
        content: &[u8],
        metadata: &DocumentMetadata,
    ) -> Result<(), UploadError>;

    async fn load(&self, path: &str) -> Result<Vec<u8>, UploadError>;

    async fn metadata(&self, path: &str) -> Result<DocumentMetadata, UploadError>;
}

/// Store rooted at a local directory
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `path`, refusing anything that leaves the root
    fn resolve(&self, path: &str) -> Result<PathBuf, UploadError> {
        let relative = Path::new(path);
        let contained = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            return Err(UploadError::InvalidReference(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn sidecar(file: &Path) -> PathBuf {
        let mut name = file.as_os_str().to_owned();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }
}

fn missing(path: &str, err: std::io::Error) -> UploadError {
    if err.kind() == std::io::ErrorKind::NotFound {
        UploadError::NotFound(path.to_string())
    } else {
        UploadError::Io(err)
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn save(
        &self,
        path: &str,
        content: &[u8],
        metadata: &DocumentMetadata,
    ) -> Result<(), UploadError> {
        let file = self.resolve(path)?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, content).await?;
        let json = serde_json::to_vec_pretty(metadata)?;
        tokio::fs::write(Self::sidecar(&file), json).await?;
        tracing::debug!(path, bytes = content.len(), "document written");
        Ok(())
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>, UploadError> {
        let file = self.resolve(path)?;
        tokio::fs::read(&file).await.map_err(|e| missing(path, e))
    }

    async fn metadata(&self, path: &str) -> Result<DocumentMetadata, UploadError> {
        let file = self.resolve(path)?;
        let raw = tokio::fs::read(Self::sidecar(&file))
            .await
            .map_err(|e| missing(path, e))?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

/// Store kept in process memory
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    entries: DashMap<String, (Vec<u8>, DocumentMetadata)>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored paths, sorted
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn save(
        &self,
        path: &str,
        content: &[u8],
        metadata: &DocumentMetadata,
    ) -> Result<(), UploadError> {
        self.entries
            .insert(path.to_string(), (content.to_vec(), metadata.clone()));
        Ok(())
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>, UploadError> {
        self.entries
            .get(path)
            .map(|e| e.0.clone())
            .ok_or_else(|| UploadError::NotFound(path.to_string()))
    }

    async fn metadata(&self, path: &str) -> Result<DocumentMetadata, UploadError> {
        self.entries
            .get(path)
            .map(|e| e.1.clone())
            .ok_or_else(|| UploadError::NotFound(path.to_string()))
    }
}

/// Decoded upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub content: Vec<u8>,
    /// Folder code, e.g. `"rules"`
    pub folder: String,
    pub document_type: String,
    pub reference: String,
    pub description: String,
    /// Extension, e.g. `"pdf"`
    pub file_type: String,
}

/// Outcome of a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub success: bool,
    pub path: String,
}

/// Validates uploads and hands them to a [`DocumentStore`]
#[derive(Debug, Clone)]
pub struct DocumentUploader {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    policy: UploadPolicy,
}

impl DocumentUploader {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, policy: UploadPolicy) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            policy,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Validate and store one document
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadReceipt, UploadError> {
        let folder = FolderType::from_code(&request.folder)
            .ok_or_else(|| UploadError::UnknownFolder(request.folder.clone()))?;
        let file_type = FileType::from_extension(&request.file_type).ok_or_else(|| {
            UploadError::InvalidFileType {
                extension: request.file_type.clone(),
                accepted: accepted_extensions(),
            }
        })?;
        let reference = request.reference.trim();
        if !valid_reference(reference) {
            return Err(UploadError::InvalidReference(request.reference.clone()));
        }
        let size_bytes = request.content.len() as u64;
        if !self.policy.within_limit(size_bytes) {
            return Err(UploadError::FileTooLarge {
                size: format_megabytes(size_bytes),
                max_mb: self.policy.max_mb(),
            });
        }

        let now = self.clock.now();
        let path = format!(
            "{}/{}-{}.{}",
            folder.code(),
            now.timestamp_millis(),
            reference,
            file_type.extension()
        );
        let metadata = DocumentMetadata {
            folder,
            document_type: request.document_type.trim().to_string(),
            reference: reference.to_string(),
            description: request.description,
            file_type,
            size_bytes,
            uploaded_at: now,
        };

        self.store.save(&path, &request.content, &metadata).await?;
        tracing::info!(%path, size_bytes, "document uploaded");
        Ok(UploadReceipt {
            success: true,
            path,
        })
    }
}

fn valid_reference(reference: &str) -> bool {
    !reference.is_empty()
        && !reference.contains(['/', '\\'])
        && !reference.contains("..")
}
