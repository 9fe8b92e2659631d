//! Project gallery operations.

use crate::collection::FindOptions;
use crate::collections::PROJECTS;
use crate::document::{self, to_document};
use crate::error::{DatabaseError, Result};
use crate::filter::{Filter, Sort};
use crate::listing::{paginate, Page, PageBounds, PageRequest};
use crate::models::{Project, ProjectCreate};
use crate::service::soft_delete;
use crate::validation::{bounded, Validate};
use crate::Database;

const ENTITY: &str = "Project";

/// Page sizes for the project listing.
pub const PAGE_BOUNDS: PageBounds = PageBounds::new(12, 50);

/// Default and range of the featured-projects limit.
pub const FEATURED_LIMIT: (i64, i64, i64) = (6, 1, 20);

/// Optional listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    /// Defaults to active projects only.
    pub is_active: Option<bool>,
}

impl ProjectQuery {
    fn filter(&self) -> Filter {
        Filter::new()
            .eq("is_active", self.is_active.unwrap_or(true))
            .eq_opt("category", self.category.as_deref())
            .eq_opt("is_featured", self.is_featured)
    }
}

/// List projects, newest first.
pub async fn list_projects(
    db: &Database,
    query: &ProjectQuery,
    page: PageRequest,
) -> Result<Page<Project>> {
    paginate(
        db.collection(PROJECTS),
        &query.filter(),
        Sort::desc("created_at"),
        page,
    )
    .await
}

/// Active featured projects, newest first.
pub async fn featured_projects(db: &Database, limit: Option<i64>) -> Result<Vec<Project>> {
    let (default, min, max) = FEATURED_LIMIT;
    let limit = bounded("limit", limit, default, min, max)?;

    let filter = Filter::new().eq("is_featured", true).eq("is_active", true);
    let options = FindOptions::sorted(Sort::desc("created_at")).with_limit(limit as u64);

    db.collection(PROJECTS)
        .find(&filter, &options)
        .await?
        .into_iter()
        .map(|doc| document::decode_checked(PROJECTS, doc))
        .collect()
}

/// Get a project by ID.
pub async fn get_project(db: &Database, id: &str) -> Result<Project> {
    let doc = db
        .collection(PROJECTS)
        .find_one(&Filter::new().eq("id", id))
        .await?
        .ok_or_else(|| DatabaseError::not_found(ENTITY, id))?;
    document::decode_checked(PROJECTS, doc)
}

/// Create a new project.
pub async fn create_project(db: &Database, input: ProjectCreate) -> Result<Project> {
    input.validate()?;

    let project = Project::from_create(input);
    db.collection(PROJECTS).insert_one(&project).await?;

    tracing::info!(id = %project.id, featured = project.is_featured, "Project created");
    Ok(project)
}

/// Replace the mutable fields of a project.
pub async fn update_project(db: &Database, id: &str, input: ProjectCreate) -> Result<()> {
    input.validate()?;

    let set = to_document(PROJECTS, &input)?;
    let matched = db
        .collection(PROJECTS)
        .update_one(&Filter::new().eq("id", id), &set)
        .await?;

    if !matched {
        return Err(DatabaseError::not_found(ENTITY, id));
    }
    Ok(())
}

/// Soft-delete a project.
pub async fn delete_project(db: &Database, id: &str) -> Result<()> {
    soft_delete(db, PROJECTS, ENTITY, id).await
}

/// Distinct categories among active projects.
pub async fn list_categories(db: &Database) -> Result<Vec<String>> {
    db.collection(PROJECTS)
        .distinct("category", &Filter::new().eq("is_active", true))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use crate::validation::ValidationError;

    fn input(title: &str, category: &str, is_featured: bool) -> ProjectCreate {
        ProjectCreate {
            title: title.to_string(),
            title_en: None,
            description: "Villa fit-out".to_string(),
            description_en: None,
            image_url: "https://i.ibb.co/example.jpg".to_string(),
            category: category.to_string(),
            location: Some("Riyadh".to_string()),
            completion_date: None,
            is_featured,
        }
    }

    #[tokio::test]
    async fn test_project_crud() {
        let db = test_db().await;

        let created = create_project(&db, input("Villa", "interior", false)).await.unwrap();
        assert!(created.is_active);
        assert_eq!(get_project(&db, &created.id).await.unwrap(), created);

        let mut changed = input("Villa", "interior", true);
        changed.location = None;
        update_project(&db, &created.id, changed).await.unwrap();
        let fetched = get_project(&db, &created.id).await.unwrap();
        assert!(fetched.is_featured);
        assert_eq!(fetched.location, None);
        assert_eq!(fetched.created_at, created.created_at);

        delete_project(&db, &created.id).await.unwrap();
        assert!(!get_project(&db, &created.id).await.unwrap().is_active);

        let result = delete_project(&db, "missing").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_featured_respects_limit_and_activity() {
        let db = test_db().await;
        for n in 0..8 {
            create_project(&db, input(&format!("F{n}"), "interior", true)).await.unwrap();
        }
        create_project(&db, input("Plain", "interior", false)).await.unwrap();
        let hidden = create_project(&db, input("Hidden", "interior", true)).await.unwrap();
        delete_project(&db, &hidden.id).await.unwrap();

        let featured = featured_projects(&db, None).await.unwrap();
        assert_eq!(featured.len(), 6);
        assert!(featured.iter().all(|p| p.is_featured && p.is_active));
        // Newest first: the last featured insert leads.
        assert_eq!(featured[0].title, "F7");

        let featured = featured_projects(&db, Some(20)).await.unwrap();
        assert_eq!(featured.len(), 8);

        let result = featured_projects(&db, Some(21)).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(featured_projects(&db, Some(0)).await.is_err());
    }

    #[tokio::test]
    async fn test_listing_filters() {
        let db = test_db().await;
        create_project(&db, input("A", "interior", true)).await.unwrap();
        create_project(&db, input("B", "exterior", false)).await.unwrap();
        create_project(&db, input("C", "exterior", true)).await.unwrap();

        let page = PageRequest::new(None, None, PAGE_BOUNDS).unwrap();
        assert_eq!(page.per_page(), 12);

        let query = ProjectQuery {
            category: Some("exterior".to_string()),
            is_featured: Some(true),
            ..Default::default()
        };
        let result = list_projects(&db, &query, page).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].title, "C");

        let all = list_projects(&db, &ProjectQuery::default(), page).await.unwrap();
        let titles: Vec<_> = all.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);

        let categories = list_categories(&db).await.unwrap();
        assert_eq!(categories, vec!["exterior".to_string(), "interior".to_string()]);
    }
}
