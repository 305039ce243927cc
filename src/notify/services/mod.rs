//! Orchestration services for the notification workflow.

mod assignment;

pub use assignment::{
    AssignmentNotificationService, NotificationError, STEP_CHECK_AND_REMIND,
    STEP_SEND_ASSIGNMENT, STEP_WAIT_FOR_DUE_DATE,
};
