//! Portfolio project records
//!
//! The interactive core only reads these; the source is a pluggable
//! collaborator so a real backend can replace the built-in records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A portfolio entry, serialized camelCase for the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of project records
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, ProjectError>;
}

/// Built-in records served when no external source is wired up
pub struct StaticProjects {
    projects: Vec<Project>,
}

impl StaticProjects {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// The portfolio's fixed project set
    pub fn portfolio() -> Self {
        Self::new(vec![
            Project {
                id: 1,
                title: "E-Commerce Platform".to_string(),
                description:
                    "Full-featured online store with cart, checkout, and order tracking built for a boutique retailer."
                        .to_string(),
                image: "/images/projects/ecommerce.jpg".to_string(),
                technologies: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "PostgreSQL".to_string(),
                    "Stripe".to_string(),
                ],
                live_url: Some("https://shop.jamescastillo.dev".to_string()),
                github_url: Some("https://github.com/jamescastillo/ecommerce-platform".to_string()),
                featured: true,
            },
            Project {
                id: 2,
                title: "Task Management App".to_string(),
                description:
                    "Kanban-style task manager with drag-and-drop boards and team collaboration."
                        .to_string(),
                image: "/images/projects/tasks.jpg".to_string(),
                technologies: vec![
                    "Vue.js".to_string(),
                    "Node.js".to_string(),
                    "MongoDB".to_string(),
                ],
                live_url: Some("https://tasks.jamescastillo.dev".to_string()),
                github_url: None,
                featured: true,
            },
            Project {
                id: 3,
                title: "Analytics Dashboard".to_string(),
                description:
                    "Interactive charts and real-time metrics for marketing campaign performance."
                        .to_string(),
                image: "/images/projects/analytics.jpg".to_string(),
                technologies: vec![
                    "React".to_string(),
                    "TypeScript".to_string(),
                    "D3.js".to_string(),
                    "AWS".to_string(),
                ],
                live_url: None,
                github_url: Some("https://github.com/jamescastillo/analytics-dashboard".to_string()),
                featured: false,
            },
        ])
    }
}

#[async_trait]
impl ProjectSource for StaticProjects {
    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        Ok(self.projects.clone())
    }
}

/// All technologies across the records, deduplicated, insertion order kept
pub fn all_technologies(projects: &[Project]) -> Vec<String> {
    let mut seen = Vec::new();
    for project in projects {
        for tech in &project.technologies {
            if !seen.contains(tech) {
                seen.push(tech.clone());
            }
        }
    }
    seen
}

/// Records passing the technology filter and the featured-only toggle
pub fn filter_projects<'a>(
    projects: &'a [Project],
    technology: Option<&str>,
    featured_only: bool,
) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| {
            if let Some(tech) = technology {
                if !project.technologies.iter().any(|t| t == tech) {
                    return false;
                }
            }
            if featured_only && !project.featured {
                return false;
            }
            true
        })
        .collect()
}
