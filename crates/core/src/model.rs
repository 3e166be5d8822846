use serde::{Deserialize, Serialize};

pub type ProjectId = u64;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Fields of a project before the store assigns its id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub tags: Vec<String>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Project {
    pub fn from_new(id: ProjectId, new: NewProject) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            category: new.category,
            image_url: new.image_url,
            tags: new.tags,
        }
    }

    /// Merges the supplied fields. The id is never touched.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.image_url {
            self.image_url = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
    }
}

impl ProjectPatch {
    /// Names of the fields this patch would change, in wire spelling.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.title.is_some() {
            names.push("title");
        }
        if self.description.is_some() {
            names.push("description");
        }
        if self.category.is_some() {
            names.push("category");
        }
        if self.image_url.is_some() {
            names.push("imageUrl");
        }
        if self.tags.is_some() {
            names.push("tags");
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project {
            id: 7,
            title: "t".into(),
            description: "d".into(),
            category: "c".into(),
            image_url: "https://example.com/i.png".into(),
            tags: vec!["a".into(), "b".into()],
        }
    }

    #[test]
    fn persisted_layout_uses_camel_case_image_url() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["imageUrl"], "https://example.com/i.png");
        assert!(v.get("image_url").is_none());
        assert_eq!(v["id"], 7);
        assert_eq!(v["tags"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn patch_null_fields_are_treated_as_absent() {
        let patch: ProjectPatch =
            serde_json::from_str(r#"{"title":null,"tags":null,"category":"Print"}"#).unwrap();
        assert_eq!(patch.field_names(), vec!["category"]);
        let mut p = sample();
        p.apply(patch);
        assert_eq!(p.title, "t");
        assert_eq!(p.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(p.category, "Print");
        assert_eq!(p.id, 7);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let patch = ProjectPatch::default();
        assert!(patch.field_names().is_empty());
        let mut p = sample();
        p.apply(patch);
        assert_eq!(p, sample());
    }
}
