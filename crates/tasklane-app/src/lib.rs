//! Application layer logic for tasklane.
//!
//! This crate provides the mutation service, the store abstraction and its
//! backends, and configuration shared by front-ends.

pub mod async_store;
pub mod config;
pub mod interaction;
#[cfg(any(test, feature = "test-util"))]
pub mod memory_store;
pub mod service;
pub mod task_store;

// Re-exports for convenience
pub use config::{ProjectConfig, RemoteConfig};
pub use interaction::{ADD_FAILED_MESSAGE, Interaction, delete_confirmation};
#[cfg(any(test, feature = "test-util"))]
pub use memory_store::{MemoryStore, MemoryStoreError, StoreOp};
pub use service::{MutationError, Outcome, TaskService};
pub use task_store::TaskStore;
