//! Repository over the single JSON document holding every project.
//!
//! Each operation loads the whole collection from the blob store; mutating
//! operations write it back in full. Mutations run their read-modify-write
//! cycle under a guard shared by every clone of the handle, so all writers for
//! one storage key must go through clones of the same [`ProjectStore`].

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::errors::CoreError;
use crate::key::{StorageKey, PROJECTS_STORAGE_NAME};
use crate::model::{NewProject, Project, ProjectId, ProjectPatch};
use crate::seed::seed_projects;
use crate::traits::BlobStore;
use crate::validate::validate_new_project;

pub struct ProjectStore<S> {
    blob: Arc<S>,
    key: StorageKey,
    write_guard: Arc<Mutex<()>>,
}

impl<S> Clone for ProjectStore<S> {
    fn clone(&self) -> Self {
        Self {
            blob: Arc::clone(&self.blob),
            key: self.key.clone(),
            write_guard: Arc::clone(&self.write_guard),
        }
    }
}

impl<S: BlobStore> ProjectStore<S> {
    pub fn new(blob: Arc<S>) -> Self {
        Self::with_logical_name(blob, PROJECTS_STORAGE_NAME)
    }

    pub fn with_logical_name(blob: Arc<S>, name: &str) -> Self {
        Self {
            blob,
            key: StorageKey::from_logical(name),
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub fn blob(&self) -> &Arc<S> {
        &self.blob
    }

    fn load(&self) -> Result<Vec<Project>, CoreError> {
        let raw = self
            .blob
            .get_json(self.key.as_str())
            .map_err(|e| CoreError::StorageRead(e.to_string()))?;
        match raw {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(doc) => serde_json::from_value(doc)
                .map_err(|e| CoreError::StorageRead(format!("malformed project document: {e}"))),
        }
    }

    fn save(&self, projects: &[Project]) -> Result<(), CoreError> {
        let doc =
            serde_json::to_value(projects).map_err(|e| CoreError::StorageWrite(e.to_string()))?;
        self.blob.put_json(self.key.as_str(), &doc).map_err(|e| {
            error!(error = %e, key = %self.key, "failed to save projects");
            CoreError::StorageWrite(e.to_string())
        })
    }

    /// Full collection in insertion order. A failed read is logged and
    /// reported as an empty collection; use [`Self::try_list`] to observe it.
    pub fn list(&self) -> Vec<Project> {
        match self.load() {
            Ok(projects) => projects,
            Err(e) => {
                warn!(error = %e, key = %self.key, "failed to load projects; returning empty list");
                Vec::new()
            }
        }
    }

    pub fn try_list(&self) -> Result<Vec<Project>, CoreError> {
        self.load()
    }

    pub fn get(&self, id: ProjectId) -> Result<Project, CoreError> {
        self.load()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(CoreError::NotFound(id))
    }

    pub fn create(&self, new: NewProject) -> Result<Project, CoreError> {
        validate_new_project(&new)?;
        let _guard = self.write_guard.lock();
        let mut projects = self.load()?;
        let id = next_id(&projects)?;
        let project = Project::from_new(id, new);
        projects.push(project.clone());
        self.save(&projects)?;
        info!(project_id = id, count = projects.len(), "project created");
        Ok(project)
    }

    pub fn update(&self, id: ProjectId, patch: ProjectPatch) -> Result<Project, CoreError> {
        let fields = patch.field_names();
        let _guard = self.write_guard.lock();
        let mut projects = self.load()?;
        let Some(pos) = projects.iter().position(|p| p.id == id) else {
            return Err(CoreError::NotFound(id));
        };
        projects[pos].apply(patch);
        let updated = projects[pos].clone();
        self.save(&projects)?;
        debug!(project_id = id, ?fields, "project updated");
        Ok(updated)
    }

    pub fn delete(&self, id: ProjectId) -> Result<(), CoreError> {
        let _guard = self.write_guard.lock();
        let mut projects = self.load()?;
        let Some(pos) = projects.iter().position(|p| p.id == id) else {
            return Err(CoreError::NotFound(id));
        };
        projects.remove(pos);
        self.save(&projects)?;
        info!(project_id = id, count = projects.len(), "project deleted");
        Ok(())
    }

    /// Seeds an empty collection. A populated collection is returned untouched,
    /// and an unreadable one is an error rather than a reason to re-seed.
    pub fn initialize(&self) -> Result<Vec<Project>, CoreError> {
        let _guard = self.write_guard.lock();
        let existing = self.load()?;
        if !existing.is_empty() {
            debug!(count = existing.len(), "projects already initialized");
            return Ok(existing);
        }
        let seed = seed_projects();
        self.save(&seed)?;
        info!(count = seed.len(), key = %self.key, "seeded project collection");
        Ok(seed)
    }
}

fn next_id(projects: &[Project]) -> Result<ProjectId, CoreError> {
    match projects.iter().map(|p| p.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| CoreError::StorageWrite("project id space exhausted".into())),
    }
}
