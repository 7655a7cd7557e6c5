//! Project Service
//!
//! Every read is cached in `projects`. Any write clears the whole cache since
//! a single project can appear under several list keys.

use std::sync::Arc;

use kernel::audit::Actor;
use kernel::id::ProjectId;

use crate::application::cache::{
    ALL_PROJECTS_KEY, FEATURED_PROJECTS_KEY, PROJECTS_CACHE, PortfolioCaches, ProjectsEntry,
    category_key, id_key, status_key,
};
use crate::domain::entities::{NewProject, Project, ProjectPatch};
use crate::domain::repository::ProjectRepository;
use crate::domain::value_objects::ProjectStatus;
use crate::error::{PortfolioError, PortfolioResult};

#[derive(Clone)]
pub struct ProjectService<R> {
    repo: Arc<R>,
    caches: Arc<PortfolioCaches>,
}

impl<R> ProjectService<R>
where
    R: ProjectRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, caches: Arc<PortfolioCaches>) -> Self {
        Self { repo, caches }
    }

    pub async fn get_all_projects(&self) -> PortfolioResult<Arc<Vec<Project>>> {
        self.cached_list(ALL_PROJECTS_KEY, || self.repo.find_all_projects())
            .await
    }

    pub async fn get_featured_projects(&self) -> PortfolioResult<Arc<Vec<Project>>> {
        self.cached_list(FEATURED_PROJECTS_KEY, || self.repo.find_featured_projects())
            .await
    }

    pub async fn get_projects_by_category(
        &self,
        category: &str,
    ) -> PortfolioResult<Arc<Vec<Project>>> {
        self.cached_list(&category_key(category), || {
            self.repo.find_projects_by_category(category)
        })
        .await
    }

    /// Projects whose status code is exactly `status`; unknown codes match nothing
    pub async fn get_projects_by_status(
        &self,
        status: &str,
    ) -> PortfolioResult<Arc<Vec<Project>>> {
        self.cached_list(&status_key(status), || async {
            match ProjectStatus::from_exact(status) {
                Some(status) => self.repo.find_projects_by_status(status).await,
                None => Ok(Vec::new()),
            }
        })
        .await
    }

    pub async fn get_project_by_id(&self, id: ProjectId) -> PortfolioResult<Project> {
        let entry = self
            .caches
            .projects
            .get_or_try_load(&id_key(id), || async {
                self.repo
                    .find_project_by_id(id)
                    .await?
                    .map(ProjectsEntry::Single)
                    .ok_or_else(|| PortfolioError::project_not_found(id))
            })
            .await?;

        match entry {
            ProjectsEntry::Single(project) => Ok(project),
            ProjectsEntry::List(_) => Err(PortfolioError::Internal(format!(
                "Unexpected list entry under project key {}",
                id
            ))),
        }
    }

    pub async fn create_project(
        &self,
        project: NewProject,
        actor: &Actor,
    ) -> PortfolioResult<Project> {
        if self.repo.exists_project_by_title(&project.title).await? {
            return Err(PortfolioError::duplicate_project_title(project.title));
        }

        let created = self.repo.insert_project(project, actor).await?;
        self.caches.evict_all(PROJECTS_CACHE);

        tracing::info!(project_id = %created.id, title = %created.title, actor = %actor, "Project created");
        Ok(created)
    }

    pub async fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
        actor: &Actor,
    ) -> PortfolioResult<Project> {
        let mut project = self
            .repo
            .find_project_by_id(id)
            .await?
            .ok_or_else(|| PortfolioError::project_not_found(id))?;

        if let Some(title) = project.renamed_to(&patch) {
            if self.repo.exists_project_by_title_other_than(title, id).await? {
                return Err(PortfolioError::duplicate_project_title(title));
            }
        }

        project.apply(patch);
        let updated = self.repo.update_project(&project, actor).await?;
        self.caches.evict_all(PROJECTS_CACHE);

        tracing::info!(project_id = %id, actor = %actor, "Project updated");
        Ok(updated)
    }

    pub async fn delete_project(&self, id: ProjectId, actor: &Actor) -> PortfolioResult<()> {
        if self.repo.find_project_by_id(id).await?.is_none() {
            return Err(PortfolioError::project_not_found(id));
        }

        self.repo.soft_delete_project(id, actor).await?;
        self.caches.evict_all(PROJECTS_CACHE);

        tracing::info!(project_id = %id, actor = %actor, "Project deleted");
        Ok(())
    }

    pub fn refresh_projects_cache(&self) {
        self.caches.evict_all(PROJECTS_CACHE);
    }

    async fn cached_list<F, Fut>(&self, key: &str, load: F) -> PortfolioResult<Arc<Vec<Project>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PortfolioResult<Vec<Project>>>,
    {
        let entry = self
            .caches
            .projects
            .get_or_try_load(key, || async {
                load().await.map(|projects| ProjectsEntry::List(Arc::new(projects)))
            })
            .await?;

        match entry {
            ProjectsEntry::List(projects) => Ok(projects),
            ProjectsEntry::Single(_) => Err(PortfolioError::Internal(format!(
                "Unexpected single entry under project key {}",
                key
            ))),
        }
    }
}
