//! Ports - abstraction layer over external collaborators.
//!
//! Each trait hides an external system (message queue, backing store) behind
//! an interface the application layer can be wired and tested against.

pub mod queue;
pub mod store;

pub use self::queue::{MessageAttributeValue, QueueTransport, ReceivedMessage};
pub use self::store::{ContractStore, ProposalStore};
