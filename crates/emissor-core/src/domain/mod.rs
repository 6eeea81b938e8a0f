//! Domain model (ids, entities, wire message, errors).

pub mod contract;
pub mod errors;
pub mod ids;
pub mod message;
pub mod proposal;

pub use contract::Contract;
pub use errors::{DomainError, StoreError, TransportError};
pub use ids::{ContractId, ProposalId};
pub use message::{EVENT_TYPE_KEY, STATUS_UPDATED_EVENT, StatusChangeMessage};
pub use proposal::{Proposal, ProposalStatus};
