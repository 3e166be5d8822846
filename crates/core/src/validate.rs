use crate::errors::ValidationError;
use crate::model::NewProject;

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

/// Text fields of a new project must be non-empty; tags may be an empty list.
pub fn validate_new_project(new: &NewProject) -> Result<(), ValidationError> {
    require_text("title", &new.title)?;
    require_text("description", &new.description)?;
    require_text("category", &new.category)?;
    require_text("imageUrl", &new.image_url)?;
    Ok(())
}
