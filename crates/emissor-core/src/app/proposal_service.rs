//! Proposal intake and status-update operations.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use super::publisher::StatusChangePublisher;
use crate::domain::{DomainError, Proposal, ProposalId, ProposalStatus};
use crate::ports::ProposalStore;

/// Input for the proposal intake operation.
#[derive(Debug, Clone)]
pub struct CreateProposal {
    pub nome: String,
    pub cpf: String,
    pub valor_seguro: Decimal,
}

/// Proposal intake and status tracking.
///
/// Every persisted state change is followed by a status-change message on
/// the queue (the producer half of the pipeline).
pub struct ProposalService {
    store: Arc<dyn ProposalStore>,
    publisher: StatusChangePublisher,
}

impl ProposalService {
    pub fn new(store: Arc<dyn ProposalStore>, publisher: StatusChangePublisher) -> Self {
        Self { store, publisher }
    }

    /// Accept a proposal. Invalid input fails before anything is persisted
    /// or published.
    pub async fn create(&self, input: CreateProposal) -> Result<Proposal, DomainError> {
        let proposal = Proposal::new(input.nome, input.cpf, input.valor_seguro)?;
        self.store.add(proposal.clone()).await?;
        self.publisher.publish(&proposal).await?;
        info!(proposal_id = %proposal.id(), "proposal created");
        Ok(proposal)
    }

    /// Apply a status decision and publish the change.
    pub async fn update_status(
        &self,
        id: ProposalId,
        new_status: ProposalStatus,
    ) -> Result<Proposal, DomainError> {
        let mut proposal = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("proposal", id.as_uuid()))?;

        proposal.update_status(new_status)?;
        self.store.update(proposal.clone()).await?;
        self.publisher.publish(&proposal).await?;
        info!(
            proposal_id = %proposal.id(),
            status = %proposal.status(),
            "proposal status updated"
        );
        Ok(proposal)
    }

    pub async fn get(&self, id: ProposalId) -> Result<Proposal, DomainError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("proposal", id.as_uuid()))
    }

    pub async fn list(&self) -> Result<Vec<Proposal>, DomainError> {
        Ok(self.store.list().await?)
    }

    pub async fn list_by_status(
        &self,
        status: ProposalStatus,
    ) -> Result<Vec<Proposal>, DomainError> {
        Ok(self.store.list_by_status(status).await?)
    }
}
