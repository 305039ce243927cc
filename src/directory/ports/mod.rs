//! Port contracts for directory persistence.

mod repository;

pub use repository::{
    DirectoryRepositoryError, DirectoryRepositoryResult, UserRepository, WorkspaceRepository,
};
