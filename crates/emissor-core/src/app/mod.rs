//! App - application layer.
//!
//! Combines the ports into the two services and the asynchronous
//! status-change pipeline:
//!
//! - **ProposalService / ContractService**: synchronous API-facing operations
//! - **StatusChangePublisher**: status update -> durable queue message
//! - **MessageConsumer**: poll loop (receive -> dispatch -> delete)
//! - **EventDispatcher**: attribute filter + decode + handler routing
//! - **ProposalApprovalHandler**: "approval triggers contract issuance"

pub mod approval;
pub mod consumer;
pub mod contract_service;
pub mod dispatcher;
pub mod proposal_service;
pub mod publisher;

pub use self::approval::{CONTRACT_DURATION_MONTHS, ProposalApprovalHandler};
pub use self::consumer::{ConsumerConfig, ConsumerHandle, MessageConsumer};
pub use self::contract_service::{ContractService, CreateContract};
pub use self::dispatcher::{
    EventDispatcher, EventTypeMatch, ProcessingError, StatusChangeHandler,
};
pub use self::proposal_service::{CreateProposal, ProposalService};
pub use self::publisher::StatusChangePublisher;
