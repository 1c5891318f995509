use std::sync::Arc;

use chrono::{TimeZone, Utc};
use oir_core::{
    validate_upload, Clock, DocumentStore, DocumentUploader, FixedClock, LocalDocumentStore,
    Registry, RegistryConfig, UploadError, UploadRequest,
};
use oir_model::{FileType, FolderType};
use oir_search::{SearchFilters, SearchKind};
use oir_test_utils::{code, union};

const MB: u64 = 1024 * 1024;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()))
}

#[tokio::test]
async fn stored_upload_is_filed_under_its_union() {
    let dir = tempfile::tempdir().unwrap();
    let config = RegistryConfig::default();
    let registry = Registry::with_clock(config.clone(), clock());
    registry
        .insert_union(union("IO-142", "Australian Manufacturing Workers Union", "AMWU"))
        .unwrap();

    let store = Arc::new(LocalDocumentStore::new(dir.path()));
    let uploader = DocumentUploader::new(store.clone(), config.upload).with_clock(clock());

    let content = b"registration certificate".to_vec();
    let receipt = uploader
        .upload(UploadRequest {
            content: content.clone(),
            folder: "registration".to_string(),
            document_type: "Certificate".to_string(),
            reference: "IO-142-certificate".to_string(),
            description: "Certificate of registration".to_string(),
            file_type: "pdf".to_string(),
        })
        .await
        .unwrap();
    assert!(receipt.success);
    assert!(receipt.path.starts_with("registration/"));
    assert_eq!(store.load(&receipt.path).await.unwrap(), content);

    let checked = validate_upload(
        "AMWU_Certificate.pdf",
        content.len() as u64,
        &registry.config().upload,
    )
    .unwrap();
    assert_eq!(checked.file_type, FileType::Pdf);
    let document = registry
        .attach_document(
            code("IO-142"),
            Some(FolderType::Registration),
            checked,
            "Registry Clerk",
        )
        .unwrap();
    assert_eq!(document.upload_date, clock().today());

    let hits = registry
        .search_index(&[])
        .search(&SearchFilters::new().with_query("certificate"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, SearchKind::Certificate);
    assert_eq!(hits[0].file_type, Some(FileType::Pdf));
}

#[tokio::test]
async fn upload_limit_follows_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let config = RegistryConfig::default()
        .with_upload_policy(oir_model::UploadPolicy::with_max_mb(1));
    let uploader = DocumentUploader::new(
        Arc::new(LocalDocumentStore::new(dir.path())),
        config.upload,
    );

    let err = uploader
        .upload(UploadRequest {
            content: vec![0; (MB + 1) as usize],
            folder: "financial".to_string(),
            document_type: "Financial Return".to_string(),
            reference: "FSU-2024".to_string(),
            description: String::new(),
            file_type: "xlsx".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::FileTooLarge { max_mb: 1, .. }));
    assert_eq!(err.to_string(), "file too large: 1.0 MB (max 1MB)");
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}
