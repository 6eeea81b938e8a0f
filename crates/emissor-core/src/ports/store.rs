//! Store ports for proposals and contracts.
//!
//! Request-scoped, single-row operations; the backing store provides its own
//! transactional guarantees, so no cross-entity transactions appear here.

use async_trait::async_trait;

use crate::domain::{Contract, ContractId, Proposal, ProposalId, ProposalStatus, StoreError};

#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn add(&self, proposal: Proposal) -> Result<(), StoreError>;

    async fn update(&self, proposal: Proposal) -> Result<(), StoreError>;

    async fn get(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError>;

    async fn list(&self) -> Result<Vec<Proposal>, StoreError>;

    async fn list_by_status(&self, status: ProposalStatus) -> Result<Vec<Proposal>, StoreError>;
}

#[async_trait]
pub trait ContractStore: Send + Sync {
    async fn add(&self, contract: Contract) -> Result<(), StoreError>;

    async fn update(&self, contract: Contract) -> Result<(), StoreError>;

    async fn get(&self, id: ContractId) -> Result<Option<Contract>, StoreError>;

    async fn get_by_proposal(
        &self,
        proposal_id: ProposalId,
    ) -> Result<Option<Contract>, StoreError>;

    async fn list(&self) -> Result<Vec<Contract>, StoreError>;

    async fn list_active_by_cpf(&self, cpf: &str) -> Result<Vec<Contract>, StoreError>;
}
