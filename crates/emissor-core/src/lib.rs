//! emissor-core
//!
//! Core building blocks for the emissor insurance services.
//!
//! # Module layout
//! - **domain**: entities and wire types (ids, proposal, contract, message, errors)
//! - **ports**: abstraction layer (QueueTransport, ProposalStore, ContractStore)
//! - **app**: application logic (services, publisher, dispatcher, consumer loop)
//! - **impls**: in-memory adapters for development and tests

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
