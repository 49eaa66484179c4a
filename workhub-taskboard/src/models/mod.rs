/// Database models for the task-manager service
///
/// # Models
///
/// - `user`: task-manager accounts (unrelated to the fileshare user type)
/// - `task`: tasks and their many-to-many assignee sets

pub mod task;
pub mod user;
