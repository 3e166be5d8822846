use crate::model::Project;

fn project(
    id: u64,
    title: &str,
    description: &str,
    category: &str,
    image_url: &str,
    tags: &[&str],
) -> Project {
    Project {
        id,
        title: title.to_owned(),
        description: description.to_owned(),
        category: category.to_owned(),
        image_url: image_url.to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
    }
}

/// The six records written when the collection is initialized from nothing.
pub fn seed_projects() -> Vec<Project> {
    vec![
        project(
            1,
            "Minimalist Brand Identity",
            "A clean, modern brand identity for a luxury fashion label featuring custom typography and a refined color palette.",
            "Branding",
            "https://images.unsplash.com/photo-1541185933-ef5d8ed016c2?q=80&w=1170&auto=format&fit=crop",
            &["Brand Identity", "Logo Design", "Typography"],
        ),
        project(
            2,
            "E-Commerce Website Design",
            "Responsive e-commerce platform with intuitive navigation and seamless checkout experience.",
            "Web Design",
            "https://images.unsplash.com/photo-1547658719-da2b51169166?q=80&w=1164&auto=format&fit=crop",
            &["UI/UX", "Web Development", "E-commerce"],
        ),
        project(
            3,
            "Abstract Photography Series",
            "Collection of abstract architectural photographs exploring light, shadow, and form.",
            "Photography",
            "https://images.unsplash.com/photo-1545178803-4056771d60a3?q=80&w=1170&auto=format&fit=crop",
            &["Photography", "Abstract", "Architecture"],
        ),
        project(
            4,
            "Mobile App Interface",
            "Health tracking application with intuitive data visualization and user-friendly interface.",
            "UI/UX",
            "https://images.unsplash.com/photo-1551650975-87deedd944c3?q=80&w=1074&auto=format&fit=crop",
            &["Mobile Design", "UI/UX", "App Development"],
        ),
        project(
            5,
            "Packaging Design",
            "Sustainable packaging solution for an organic food brand with distinctive visual language.",
            "Branding",
            "https://images.unsplash.com/photo-1635405446898-da87459d15e3?q=80&w=1025&auto=format&fit=crop",
            &["Packaging", "Sustainable Design", "Branding"],
        ),
        project(
            6,
            "Editorial Layout Design",
            "Magazine spread layout with innovative typography and visual hierarchy.",
            "Print",
            "https://images.unsplash.com/photo-1543002588-bfa74002ed7e?q=80&w=1287&auto=format&fit=crop",
            &["Editorial Design", "Typography", "Print"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_new_project;
    use crate::model::NewProject;

    #[test]
    fn seed_ids_are_one_through_six() {
        let ids: Vec<u64> = seed_projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn seed_records_pass_create_validation() {
        for p in seed_projects() {
            let draft = NewProject {
                title: p.title,
                description: p.description,
                category: p.category,
                image_url: p.image_url,
                tags: p.tags,
            };
            assert!(validate_new_project(&draft).is_ok());
        }
    }
}
