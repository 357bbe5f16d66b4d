//! Ownership-based task access rules.

use super::Task;
use crate::auth::domain::Principal;

/// Decides whether `principal` may read or change `task`.
///
/// Admins may access every task; anyone else only the tasks that list them
/// as an assignee. An unauthenticated caller never has access.
#[must_use]
pub fn has_access(task: &Task, principal: Option<&Principal>) -> bool {
    principal.is_some_and(|acting| acting.is_admin() || task.is_assigned_to(acting.id()))
}
