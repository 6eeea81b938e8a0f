//! In-memory proposal and contract stores.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{Contract, ContractId, Proposal, ProposalId, ProposalStatus, StoreError};
use crate::ports::{ContractStore, ProposalStore};

/// HashMap-backed proposal store.
#[derive(Default)]
pub struct InMemoryProposalStore {
    proposals: Mutex<HashMap<Uuid, Proposal>>,
}

impl InMemoryProposalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProposalStore for InMemoryProposalStore {
    async fn add(&self, proposal: Proposal) -> Result<(), StoreError> {
        let mut proposals = self.proposals.lock().await;
        proposals.insert(proposal.id().as_uuid(), proposal);
        Ok(())
    }

    async fn update(&self, proposal: Proposal) -> Result<(), StoreError> {
        let mut proposals = self.proposals.lock().await;
        proposals.insert(proposal.id().as_uuid(), proposal);
        Ok(())
    }

    async fn get(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        let proposals = self.proposals.lock().await;
        Ok(proposals.get(&id.as_uuid()).cloned())
    }

    async fn list(&self) -> Result<Vec<Proposal>, StoreError> {
        let proposals = self.proposals.lock().await;
        Ok(proposals.values().cloned().collect())
    }

    async fn list_by_status(&self, status: ProposalStatus) -> Result<Vec<Proposal>, StoreError> {
        let proposals = self.proposals.lock().await;
        Ok(proposals
            .values()
            .filter(|p| p.status() == status)
            .cloned()
            .collect())
    }
}

/// HashMap-backed contract store.
#[derive(Default)]
pub struct InMemoryContractStore {
    contracts: Mutex<HashMap<Uuid, Contract>>,
}

impl InMemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractStore for InMemoryContractStore {
    async fn add(&self, contract: Contract) -> Result<(), StoreError> {
        let mut contracts = self.contracts.lock().await;
        contracts.insert(contract.id().as_uuid(), contract);
        Ok(())
    }

    async fn update(&self, contract: Contract) -> Result<(), StoreError> {
        let mut contracts = self.contracts.lock().await;
        contracts.insert(contract.id().as_uuid(), contract);
        Ok(())
    }

    async fn get(&self, id: ContractId) -> Result<Option<Contract>, StoreError> {
        let contracts = self.contracts.lock().await;
        Ok(contracts.get(&id.as_uuid()).cloned())
    }

    async fn get_by_proposal(
        &self,
        proposal_id: ProposalId,
    ) -> Result<Option<Contract>, StoreError> {
        let contracts = self.contracts.lock().await;
        Ok(contracts
            .values()
            .find(|c| c.proposal_id() == proposal_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Contract>, StoreError> {
        let contracts = self.contracts.lock().await;
        Ok(contracts.values().cloned().collect())
    }

    async fn list_active_by_cpf(&self, cpf: &str) -> Result<Vec<Contract>, StoreError> {
        let contracts = self.contracts.lock().await;
        Ok(contracts
            .values()
            .filter(|c| c.is_active() && c.cpf() == cpf)
            .cloned()
            .collect())
    }
}
