//! Domain model for projects and project membership.

mod error;
mod ids;
mod project;

pub use error::{ParseProjectPriorityError, ParseProjectStatusError, ProjectDomainError};
pub use ids::ProjectId;
pub use project::{
    PersistedProjectData, Progress, Project, ProjectDraft, ProjectMember, ProjectPriority,
    ProjectStatus, ProjectUpdate,
};
