//! The project gallery shown on the portfolio. The dataset is static and
//! compiled into the binary.

use utoipa::ToSchema;

const EMBEDDED_PROJECTS: &str = include_str!("../assets/projects.json");

/// Category filter value meaning "do not filter".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub subheading: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub live_demo: String,
    pub github: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Load the gallery shipped with the site.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        serde_json::from_str(EMBEDDED_PROJECTS).map(Self::new)
    }

    /// Projects in `category`, or every project when no category (or
    /// [`ALL_CATEGORIES`]) is requested.
    pub fn filter(&self, category: Option<&str>) -> Vec<&Project> {
        match category {
            None | Some(ALL_CATEGORIES) => self.projects.iter().collect(),
            Some(category) => self
                .projects
                .iter()
                .filter(|p| p.category == category)
                .collect(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = vec![];
        for project in &self.projects {
            if !categories.contains(&project.category.as_str()) {
                categories.push(&project.category);
            }
        }
        categories
    }
}
