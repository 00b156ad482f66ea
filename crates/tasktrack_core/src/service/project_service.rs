//! Project use-case service.

use crate::model::project::{Project, ProjectPatch};
use crate::model::timestamp::Timestamp;
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::project_repo::ProjectRepository;
use log::info;

/// Raw input for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// Project paired with its derived progress percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectProgress {
    pub project: Project,
    pub progress: u8,
}

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates input through `Project::new` and inserts an active project.
    pub fn add_project(&self, input: &NewProject) -> RepoResult<RecordId> {
        let project = Project::new(
            &input.name,
            &input.description,
            input.start_date,
            input.end_date,
        )?;
        let id = self.repo.add_project(&project)?;
        info!("event=project_add module=service status=ok project_id={id}");
        Ok(id)
    }

    pub fn get_project(&self, id: RecordId) -> RepoResult<Option<Project>> {
        self.repo.get_project_by_id(id)
    }

    pub fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.get_all_projects()
    }

    pub fn update_project(&self, id: RecordId, patch: &ProjectPatch) -> RepoResult<bool> {
        self.repo.update_project_checked(id, patch)
    }

    /// Parses `status`, applies it to the stored project and returns the
    /// result.
    pub fn set_project_status(&self, id: RecordId, status: &str) -> RepoResult<Project> {
        let mut project = self
            .repo
            .get_project_by_id(id)?
            .ok_or(RepoError::NotFound {
                entity: "project",
                id,
            })?;
        project.update_status(status)?;
        self.repo
            .update_project_checked(id, &ProjectPatch::status(project.status))?;
        info!(
            "event=project_status module=service status=ok project_id={id} project_status={}",
            project.status
        );
        Ok(project)
    }

    /// Idempotent delete. Tasks of the project keep existing with a null
    /// `project_id`.
    pub fn delete_project(&self, id: RecordId) -> RepoResult<bool> {
        let removed = self.repo.delete_project_counted(id)?;
        info!("event=project_delete module=service status=ok project_id={id} removed={removed}");
        Ok(true)
    }

    /// Every project with its progress as of `now`.
    pub fn progress_report_at(&self, now: Timestamp) -> RepoResult<Vec<ProjectProgress>> {
        Ok(self
            .repo
            .get_all_projects()?
            .into_iter()
            .map(|project| {
                let progress = project.progress_at(now);
                ProjectProgress { project, progress }
            })
            .collect())
    }
}
