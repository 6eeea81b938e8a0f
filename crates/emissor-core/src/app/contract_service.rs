//! Contract issuance and lifecycle operations.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{Contract, ContractId, DomainError, ProposalId};
use crate::ports::ContractStore;

/// Input for the contract-creation command.
#[derive(Debug, Clone)]
pub struct CreateContract {
    pub proposal_id: ProposalId,
    pub nome: String,
    pub cpf: String,
    pub valor_seguro: Decimal,
    pub duration_months: u32,
}

pub struct ContractService {
    store: Arc<dyn ContractStore>,
}

impl ContractService {
    pub fn new(store: Arc<dyn ContractStore>) -> Self {
        Self { store }
    }

    /// Issue a new contract. Validation failures leave nothing persisted.
    pub async fn create(&self, input: CreateContract) -> Result<Contract, DomainError> {
        let contract = Contract::new(
            input.proposal_id,
            input.nome,
            input.cpf,
            input.valor_seguro,
            input.duration_months,
        )?;
        self.store.add(contract.clone()).await?;
        info!(contract_id = %contract.id(), "contract created");
        Ok(contract)
    }

    pub async fn get(&self, id: ContractId) -> Result<Contract, DomainError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("contract", id.as_uuid()))
    }

    pub async fn get_by_proposal(&self, proposal_id: ProposalId) -> Result<Contract, DomainError> {
        self.store
            .get_by_proposal(proposal_id)
            .await?
            .ok_or_else(|| DomainError::not_found("contract for proposal", proposal_id.as_uuid()))
    }

    pub async fn list(&self) -> Result<Vec<Contract>, DomainError> {
        Ok(self.store.list().await?)
    }

    pub async fn list_active_by_cpf(&self, cpf: &str) -> Result<Vec<Contract>, DomainError> {
        if cpf.trim().is_empty() || cpf.len() < 11 {
            return Err(DomainError::invalid_argument(
                "cpf",
                "must contain at least 11 characters",
            ));
        }
        Ok(self.store.list_active_by_cpf(cpf).await?)
    }

    /// Cancel a contract; cancelling twice is an `InvalidState` error.
    pub async fn cancel(&self, id: ContractId) -> Result<Contract, DomainError> {
        let mut contract = self.get(id).await?;
        contract.cancel()?;
        self.store.update(contract.clone()).await?;
        info!(contract_id = %contract.id(), "contract cancelled");
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryContractStore;

    fn service() -> (ContractService, Arc<InMemoryContractStore>) {
        let store = Arc::new(InMemoryContractStore::new());
        (ContractService::new(store.clone()), store)
    }

    fn input() -> CreateContract {
        CreateContract {
            proposal_id: ProposalId::generate(),
            nome: "Ana".to_string(),
            cpf: "12345678900".to_string(),
            valor_seguro: Decimal::from(500),
            duration_months: 12,
        }
    }

    #[tokio::test]
    async fn create_persists_and_returns_contract() {
        let (service, store) = service();
        let created = service.create(input()).await.unwrap();

        let stored = store.get(created.id()).await.unwrap().unwrap();
        assert_eq!(stored.id(), created.id());
        assert!(stored.is_active());
    }

    #[tokio::test]
    async fn invalid_input_persists_nothing() {
        let (service, store) = service();
        let mut bad = input();
        bad.valor_seguro = Decimal::ZERO;

        assert!(service.create(bad).await.is_err());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_proposal_not_found() {
        let (service, _) = service();
        let err = service
            .get_by_proposal(ProposalId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn cancel_twice_fails_and_state_is_unchanged() {
        let (service, store) = service();
        let created = service.create(input()).await.unwrap();

        let cancelled = service.cancel(created.id()).await.unwrap();
        assert!(!cancelled.is_active());

        let err = service.cancel(created.id()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert!(!store.get(created.id()).await.unwrap().unwrap().is_active());
    }

    #[tokio::test]
    async fn cancel_missing_contract_is_not_found() {
        let (service, _) = service();
        let err = service.cancel(ContractId::generate()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_active_by_cpf_validates_cpf() {
        let (service, _) = service();
        let err = service.list_active_by_cpf("123").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidArgument { field: "cpf", .. }
        ));
    }
}
