//! Workspace and user directory for Atelier.
//!
//! The directory context owns the tenant structure: user profiles synced
//! from an external identity provider, workspaces, and workspace
//! memberships with ADMIN/MEMBER roles. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
