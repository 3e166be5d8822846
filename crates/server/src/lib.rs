//! HTTP boundary: decodes requests, calls one store operation, encodes the result.

use std::net::SocketAddr;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use folio_core::{BlobStore, CoreError, NewProject, Project, ProjectId, ProjectStore};
use folio_proto::{
    CreateProjectParams, ErrorBody, HealthResponse, ProjectsResponse, UpdateProjectParams,
    ROUTE_HEALTH, ROUTE_INITIALIZE, ROUTE_PROJECT, ROUTE_PROJECTS,
};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
}

/// Failure of a single request, mapped onto a status code and `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("no project with id {0}")]
    UnknownId(i64),
    #[error("rejected request: {detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("worker task failed: {0}")]
    Join(String),
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::Rejected {
            status: r.status(),
            detail: r.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        ApiError::Rejected {
            status: r.status(),
            detail: r.body_text(),
        }
    }
}

/// Ids arrive as signed integers; anything that cannot name a stored
/// project is simply not found.
fn parse_project_id(path: Result<Path<i64>, PathRejection>) -> Result<ProjectId, ApiError> {
    let Path(raw) = path?;
    ProjectId::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ApiError::UnknownId(raw))
}

impl ApiError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(CoreError::NotFound(_)) | ApiError::UnknownId(_) => {
                (StatusCode::NOT_FOUND, "Project not found".to_owned())
            }
            ApiError::Core(CoreError::Validation(e)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ApiError::Core(CoreError::StorageRead(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load projects: {e}"),
            ),
            ApiError::Core(CoreError::StorageWrite(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save projects: {e}"),
            ),
            ApiError::Rejected { status, detail } => (*status, detail.clone()),
            ApiError::Join(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, %status, "request rejected");
        }
        (status, Json(ErrorBody::new(detail))).into_response()
    }
}

pub struct Server<S> {
    store: ProjectStore<S>,
}

impl<S> Clone for Server<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: BlobStore + 'static> Server<S> {
    pub fn new(store: ProjectStore<S>) -> Self {
        Self { store }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(ROUTE_HEALTH, get(healthz))
            .route(
                ROUTE_PROJECTS,
                get(list_projects::<S>).post(create_project::<S>),
            )
            .route(ROUTE_INITIALIZE, post(initialize_projects::<S>))
            .route(
                ROUTE_PROJECT,
                get(get_project::<S>)
                    .put(update_project::<S>)
                    .delete(delete_project::<S>),
            )
            .with_state(self.clone())
    }

    pub async fn run_http(&self, addr: &str) -> Result<(), ServerError> {
        let bind_addr: SocketAddr = addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::Parse(e.to_string()))?;
        let listener = tokio::net::TcpListener::bind(bind_addr)
            .await
            .map_err(|e| ServerError::Io(e.to_string()))?;
        info!(%addr, key = %self.store.key(), "http server listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("ctrl_c received; shutting down http server");
                }
            })
            .await
            .map_err(|e| ServerError::Io(e.to_string()))
    }

    /// Runs a store operation off the async runtime.
    async fn blocking<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(ProjectStore<S>) -> Result<T, CoreError> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(store))
            .await
            .map_err(|e| ApiError::Join(e.to_string()))?
            .map_err(ApiError::from)
    }
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

async fn list_projects<S: BlobStore + 'static>(
    State(server): State<Server<S>>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let projects = server.blocking(|store| Ok(store.list())).await?;
    debug!(count = projects.len(), "listed projects");
    Ok(Json(ProjectsResponse { projects }))
}

async fn get_project<S: BlobStore + 'static>(
    State(server): State<Server<S>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Project>, ApiError> {
    let project_id = parse_project_id(path)?;
    let project = server.blocking(move |store| store.get(project_id)).await?;
    Ok(Json(project))
}

async fn create_project<S: BlobStore + 'static>(
    State(server): State<Server<S>>,
    body: Result<Json<CreateProjectParams>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let Json(params) = body?;
    let new = NewProject::try_from(params).map_err(CoreError::from)?;
    let project = server.blocking(move |store| store.create(new)).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project<S: BlobStore + 'static>(
    State(server): State<Server<S>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateProjectParams>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let project_id = parse_project_id(path)?;
    let Json(patch) = body?;
    let project = server
        .blocking(move |store| store.update(project_id, patch))
        .await?;
    Ok(Json(project))
}

async fn delete_project<S: BlobStore + 'static>(
    State(server): State<Server<S>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let project_id = parse_project_id(path)?;
    server
        .blocking(move |store| store.delete(project_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn initialize_projects<S: BlobStore + 'static>(
    State(server): State<Server<S>>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let projects = server.blocking(|store| store.initialize()).await?;
    Ok(Json(ProjectsResponse { projects }))
}
