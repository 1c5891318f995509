//! Request handlers
//!
//! Handlers that accept JSON take the raw body so a malformed payload gets
//! the same endpoint-specific error shape as a failed validation.

use crate::error::{ApiError, ErrorBody};
use crate::AppState;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use oir_core::{NewUser, UnionDraft, UploadError, UploadRequest};
use oir_model::{RecordStatus, WorkflowCategory};
use oir_search::{Category, FilterState, SearchFilters, SearchKind, StatusFilter};
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Rejection, Reply};

#[derive(Debug, Serialize)]
struct Message {
    message: &'static str,
}

pub async fn create_user(body: Bytes, state: AppState) -> Result<impl Reply, Rejection> {
    let created = serde_json::from_slice::<NewUser>(&body)
        .map_err(|e| vec![e.to_string()])
        .and_then(|request| state.users.create(request).map_err(|e| e.details()));

    Ok(match created {
        Ok(_) => warp::reply::with_status(
            warp::reply::json(&Message {
                message: "User created successfully",
            }),
            StatusCode::CREATED,
        ),
        Err(details) => {
            tracing::warn!(?details, "user creation rejected");
            ErrorBody::new("Failed to create user")
                .with_details(details)
                .reply(StatusCode::BAD_REQUEST)
        }
    })
}

pub async fn list_users(state: AppState) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&state.users.list()))
}

/// Upload payload; `file` is base64, optionally as a data URL
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadBody {
    file: String,
    folder: String,
    #[serde(default)]
    document_type: String,
    reference: String,
    #[serde(default)]
    description: String,
    file_type: String,
}

#[derive(Debug, Serialize)]
struct UploadFailure {
    success: bool,
    error: String,
}

fn decode_file(file: &str) -> Result<Vec<u8>, UploadError> {
    let encoded = match file.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => file,
    };
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| UploadError::Encoding(e.to_string()))
}

pub async fn upload_document(body: Bytes, state: AppState) -> Result<impl Reply, Rejection> {
    let request = serde_json::from_slice::<UploadBody>(&body)
        .map_err(UploadError::from)
        .and_then(|body| {
            Ok(UploadRequest {
                content: decode_file(&body.file)?,
                folder: body.folder,
                document_type: body.document_type,
                reference: body.reference,
                description: body.description,
                file_type: body.file_type,
            })
        });
    let outcome = match request {
        Ok(request) => state.uploader.upload(request).await,
        Err(e) => Err(e),
    };

    Ok(match outcome {
        Ok(receipt) => warp::reply::with_status(warp::reply::json(&receipt), StatusCode::OK),
        Err(err) => {
            let status = match err {
                UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            tracing::warn!(error = %err, "upload rejected");
            warp::reply::with_status(
                warp::reply::json(&UploadFailure {
                    success: false,
                    error: err.to_string(),
                }),
                status,
            )
        }
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Comma separated category keys to switch on
    pub include: Option<String>,
    /// Comma separated category keys to switch off
    pub exclude: Option<String>,
}

fn keys(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

fn search_filters(params: &SearchParams) -> Result<SearchFilters, ApiError> {
    let mut filters = SearchFilters::new().with_query(params.q.as_str());
    for (name, raw, enabled) in [
        ("include", params.include.as_deref(), true),
        ("exclude", params.exclude.as_deref(), false),
    ] {
        for key in keys(raw) {
            let kind = SearchKind::from_key(key).ok_or_else(|| ApiError::InvalidQuery {
                name,
                value: key.to_string(),
            })?;
            filters.set(kind, enabled);
        }
    }
    Ok(filters)
}

pub async fn search(params: SearchParams, state: AppState) -> Result<impl Reply, Rejection> {
    let filters = search_filters(&params).map_err(warp::reject::custom)?;
    let index = state.registry.search_index(&state.users.list());
    Ok(warp::reply::json(&index.search(&filters)))
}

#[derive(Debug, Default, Deserialize)]
pub struct UnionParams {
    #[serde(default)]
    pub q: String,
    pub status: Option<String>,
}

pub async fn list_unions(params: UnionParams, state: AppState) -> Result<impl Reply, Rejection> {
    let mut filters = FilterState::<RecordStatus>::all_enabled().with_query(params.q.as_str());
    if let Some(raw) = params.status.as_deref().filter(|s| !s.is_empty() && *s != "all") {
        let status = RecordStatus::from_key(raw).ok_or_else(|| {
            warp::reject::custom(ApiError::InvalidQuery {
                name: "status",
                value: raw.to_string(),
            })
        })?;
        filters.enable_only(status);
    }
    Ok(warp::reply::json(&state.registry.find_unions(&filters)))
}

pub async fn register_union(body: Bytes, state: AppState) -> Result<impl Reply, Rejection> {
    let draft = match serde_json::from_slice::<UnionDraft>(&body) {
        Ok(draft) => draft,
        Err(e) => {
            return Ok(ErrorBody::new("Failed to register union")
                .with_details(vec![e.to_string()])
                .reply(StatusCode::BAD_REQUEST));
        }
    };

    Ok(match state.registry.register_union(draft) {
        Ok(union) => warp::reply::with_status(warp::reply::json(&union), StatusCode::CREATED),
        Err(err) => {
            let api = ApiError::from(err);
            ErrorBody::new("Failed to register union")
                .with_details(vec![api.to_string()])
                .reply(api.status())
        }
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkflowParams {
    pub category: Option<String>,
    pub status: Option<String>,
}

pub async fn list_workflows(
    params: WorkflowParams,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let tab = match params.category.as_deref().filter(|c| !c.is_empty() && *c != "all") {
        Some(raw) => Some(WorkflowCategory::from_key(raw).ok_or_else(|| {
            warp::reject::custom(ApiError::InvalidQuery {
                name: "category",
                value: raw.to_string(),
            })
        })?),
        None => None,
    };
    let status = match params.status.as_deref() {
        Some(raw) => raw.parse::<StatusFilter>().map_err(|_| {
            warp::reject::custom(ApiError::InvalidQuery {
                name: "status",
                value: raw.to_string(),
            })
        })?,
        None => StatusFilter::All,
    };
    Ok(warp::reply::json(&state.registry.board(tab, status)))
}

pub async fn workflow_stats(state: AppState) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&state.registry.workflow_stats()))
}

pub async fn catalog(state: AppState) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&state.registry.catalog()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_urls_and_plain_base64_decode_alike() {
        assert_eq!(decode_file("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            decode_file("data:application/pdf;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
        assert!(matches!(decode_file("***"), Err(UploadError::Encoding(_))));
    }

    #[test]
    fn filter_keys_toggle_categories() {
        let params = SearchParams {
            q: "amwu".to_string(),
            include: Some("users".to_string()),
            exclude: Some("files, memberships".to_string()),
        };
        let filters = search_filters(&params).unwrap();
        assert!(filters.is_enabled(SearchKind::User));
        assert!(!filters.is_enabled(SearchKind::File));
        assert!(!filters.is_enabled(SearchKind::Membership));
        assert!(filters.is_enabled(SearchKind::Union));
    }

    #[test]
    fn unknown_filter_key_is_rejected() {
        let params = SearchParams {
            include: Some("planets".to_string()),
            ..SearchParams::default()
        };
        assert!(matches!(
            search_filters(&params),
            Err(ApiError::InvalidQuery { name: "include", .. })
        ));
    }
}
