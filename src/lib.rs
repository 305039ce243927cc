//! Atelier: multi-tenant project management core.
//!
//! This crate provides the domain core for a project-management service:
//! users organized into workspaces, workspaces containing projects, projects
//! containing tasks, tasks carrying comments, with role-based access control
//! and email notifications driven by a durably-executed assignment workflow.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, etc.)
//!
//! # Modules
//!
//! - [`directory`]: Workspaces, users, and membership roles
//! - [`project`]: Projects and project membership within a workspace
//! - [`task`]: Tasks and comments within a project
//! - [`notify`]: Task-assignment notification workflow

pub mod directory;
pub mod notify;
pub mod project;
pub mod task;
