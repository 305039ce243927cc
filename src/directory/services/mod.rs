//! Orchestration services for the directory context.

mod identity_sync;
mod membership;

pub use identity_sync::{IdentityEvent, IdentitySyncError, IdentitySyncService, SyncOutcome};
pub use membership::{AddMemberRequest, MembershipError, MembershipService};
