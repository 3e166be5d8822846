//! Core domain model, validation, and the project repository.
//! No async and no IO within this crate; persistence goes through [`BlobStore`].

pub mod errors;
pub mod key;
pub mod model;
pub mod seed;
pub mod store;
pub mod traits;
pub mod validate;

pub use crate::errors::{CoreError, ValidationError};
pub use crate::key::{sanitize_storage_key, StorageKey, PROJECTS_STORAGE_NAME};
pub use crate::model::{NewProject, Project, ProjectId, ProjectPatch};
pub use crate::seed::seed_projects;
pub use crate::store::ProjectStore;
pub use crate::traits::BlobStore;
pub use crate::validate::validate_new_project;
