//! In-memory adapters for development and tests.

pub mod inmem_queue;
pub mod inmem_store;

pub use inmem_queue::InMemoryQueue;
pub use inmem_store::{InMemoryContractStore, InMemoryProposalStore};
