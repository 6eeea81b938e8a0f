//! Proposal approval handler: the single place where "approval triggers
//! contract issuance" is encoded.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::contract_service::{ContractService, CreateContract};
use super::dispatcher::StatusChangeHandler;
use crate::domain::{DomainError, StatusChangeMessage};

/// Fixed contract duration issued for an approved proposal.
pub const CONTRACT_DURATION_MONTHS: u32 = 12;

/// Wire status value that triggers contract issuance (compared
/// case-insensitively).
const APPROVED_STATUS: &str = "Aprovada";

/// Issues a contract when a decoded status-change message reports approval.
///
/// Intentionally decoupled from the dispatcher's transport-level filtering:
/// this handler only sees decoded payloads.
pub struct ProposalApprovalHandler {
    contracts: Arc<ContractService>,
}

impl ProposalApprovalHandler {
    pub fn new(contracts: Arc<ContractService>) -> Self {
        Self { contracts }
    }

    fn validate(message: &StatusChangeMessage) -> Result<(), DomainError> {
        if message.proposta_id.is_nil() {
            return Err(DomainError::invalid_argument(
                "proposta_id",
                "must not be empty",
            ));
        }
        if message.nome.trim().is_empty() {
            return Err(DomainError::invalid_argument("nome", "must not be empty"));
        }
        if message.cpf.trim().is_empty() || message.cpf.len() < 11 {
            return Err(DomainError::invalid_argument(
                "cpf",
                "must contain at least 11 characters",
            ));
        }
        if message.valor_seguro <= Decimal::ZERO {
            return Err(DomainError::invalid_argument(
                "valor_seguro",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl StatusChangeHandler for ProposalApprovalHandler {
    async fn handle(&self, message: StatusChangeMessage) -> Result<(), DomainError> {
        Self::validate(&message)?;

        if !message.status.eq_ignore_ascii_case(APPROVED_STATUS) {
            // Unrecognized or non-approval statuses are not an error.
            debug!(
                proposal_id = %message.proposta_id,
                status = %message.status,
                "proposal not approved, no contract issued"
            );
            return Ok(());
        }

        let contract = self
            .contracts
            .create(CreateContract {
                proposal_id: message.proposta_id,
                nome: message.nome,
                cpf: message.cpf,
                valor_seguro: message.valor_seguro,
                duration_months: CONTRACT_DURATION_MONTHS,
            })
            .await?;

        info!(
            contract_id = %contract.id(),
            proposal_id = %contract.proposal_id(),
            "contract issued for approved proposal"
        );
        Ok(())
    }
}
