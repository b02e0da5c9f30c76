//! Shared domain types for the taskboard client.
//!
//! Everything here mirrors the wire format of the task-tracker REST service:
//! the enums serialize to the service's canonical snake_case strings and the
//! payload structs match its request bodies field for field.

pub mod models;

pub use models::{
    Comment, Identity, Priority, Project, ProjectFields, Task, TaskFields, TaskFilter, TaskStatus,
};
