//! OIR Server
//!
//! JSON-over-HTTP front end for the registry services, built on `warp`.
//!
//! # Endpoints
//!
//! - `POST /api/users`, `GET /api/users`: staff accounts
//! - `POST /api/documents/upload`: base64 document upload
//! - `GET /api/search?q=&include=&exclude=`: global search
//! - `GET /api/unions?q=&status=`, `POST /api/unions`: union registry
//! - `GET /api/workflows?category=&status=`, `GET /api/workflows/stats`
//! - `GET /api/catalog`: industries, provinces, folders and file types
//!
//! # Example
//!
//! ```rust,ignore
//! use oir_server::{routes, AppState, ServerConfig};
//!
//! let config = ServerConfig::load(None)?;
//! let state = AppState::from_config(&config)?;
//! warp::serve(routes(state, config.body_limit))
//!     .run(config.socket_addr())
//!     .await;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;

pub use config::{ConfigError, ServerConfig};
pub use error::{handle_rejection, ApiError, ErrorBody};

use oir_core::{
    seed, DocumentUploader, LocalDocumentStore, Registry, RegistryError, UserDirectory,
};
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Reply};

/// Services shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub users: Arc<UserDirectory>,
    pub uploader: DocumentUploader,
}

impl AppState {
    #[must_use]
    pub fn new(
        registry: Arc<Registry>,
        users: Arc<UserDirectory>,
        uploader: DocumentUploader,
    ) -> Self {
        Self {
            registry,
            users,
            uploader,
        }
    }

    /// Services described by `config`, seeded when asked
    pub fn from_config(config: &ServerConfig) -> Result<Self, RegistryError> {
        let registry = Registry::new(config.registry.clone());
        if config.seed {
            seed::populate(&registry)?;
        }
        let store = Arc::new(LocalDocumentStore::new(config.storage_root.clone()));
        let uploader = DocumentUploader::new(store, config.registry.upload);
        Ok(Self::new(
            Arc::new(registry),
            Arc::new(UserDirectory::default()),
            uploader,
        ))
    }
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Every endpoint, with JSON errors and request tracing
pub fn routes(
    state: AppState,
    body_limit: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let body = warp::body::content_length_limit(body_limit).and(warp::body::bytes());

    let create_user = warp::path!("api" / "users")
        .and(warp::post())
        .and(body.clone())
        .and(with_state(state.clone()))
        .and_then(handlers::create_user);
    let list_users = warp::path!("api" / "users")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::list_users);
    let upload = warp::path!("api" / "documents" / "upload")
        .and(warp::post())
        .and(body.clone())
        .and(with_state(state.clone()))
        .and_then(handlers::upload_document);
    let search = warp::path!("api" / "search")
        .and(warp::get())
        .and(warp::query::<handlers::SearchParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::search);
    let list_unions = warp::path!("api" / "unions")
        .and(warp::get())
        .and(warp::query::<handlers::UnionParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::list_unions);
    let register_union = warp::path!("api" / "unions")
        .and(warp::post())
        .and(body)
        .and(with_state(state.clone()))
        .and_then(handlers::register_union);
    let workflows = warp::path!("api" / "workflows")
        .and(warp::get())
        .and(warp::query::<handlers::WorkflowParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::list_workflows);
    let workflow_stats = warp::path!("api" / "workflows" / "stats")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::workflow_stats);
    let catalog = warp::path!("api" / "catalog")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::catalog);

    create_user
        .or(list_users)
        .or(upload)
        .or(search)
        .or(list_unions)
        .or(register_union)
        .or(workflows)
        .or(workflow_stats)
        .or(catalog)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
