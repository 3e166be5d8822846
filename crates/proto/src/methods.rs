//! Request and response shapes for the HTTP boundary.

use folio_core::{NewProject, Project, ProjectPatch, ValidationError};
use serde::{Deserialize, Serialize};

pub const ROUTE_PROJECTS: &str = "/projects";
pub const ROUTE_PROJECT: &str = "/projects/{project_id}";
pub const ROUTE_INITIALIZE: &str = "/projects/initialize";
pub const ROUTE_HEALTH: &str = "/healthz";

/// Create body as received; every field is required but checked here so a
/// missing one maps to a validation error instead of a decode failure.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CreateProjectParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl TryFrom<CreateProjectParams> for NewProject {
    type Error = ValidationError;

    fn try_from(p: CreateProjectParams) -> Result<Self, Self::Error> {
        Ok(NewProject {
            title: p.title.ok_or(ValidationError::MissingField("title"))?,
            description: p
                .description
                .ok_or(ValidationError::MissingField("description"))?,
            category: p.category.ok_or(ValidationError::MissingField("category"))?,
            image_url: p.image_url.ok_or(ValidationError::MissingField("imageUrl"))?,
            tags: p.tags.ok_or(ValidationError::MissingField("tags"))?,
        })
    }
}

/// Update body; absent and `null` fields are both left unchanged.
pub type UpdateProjectParams = ProjectPatch;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}
