//! Application services for task identifier allocation and lifecycle
//! orchestration.

mod allocator;
mod lifecycle;

pub use allocator::{AllocationError, AllocationResult, DailyTaskIdAllocator};
pub use lifecycle::{
    DEFAULT_MAX_CREATE_ATTEMPTS, TaskLifecycleService, TaskServiceError, TaskServiceResult,
};
