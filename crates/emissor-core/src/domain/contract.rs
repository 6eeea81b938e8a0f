//! Contract entity.

use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::errors::DomainError;
use super::ids::{ContractId, ProposalId};

/// Issued insurance agreement created after proposal approval.
///
/// Structurally immutable after creation; `cancel` flips the active flag
/// exactly once. There is no uniqueness guard on `proposal_id`: duplicate
/// delivery of the approval event creates duplicate contracts.
#[derive(Debug, Clone)]
pub struct Contract {
    id: ContractId,
    proposal_id: ProposalId,
    nome: String,
    cpf: String,
    valor_seguro: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    active: bool,
    created_at: DateTime<Utc>,
}

impl Contract {
    /// Issue a new active contract.
    ///
    /// Coverage starts today (UTC, truncated to day) and ends
    /// `duration_months` later.
    pub fn new(
        proposal_id: ProposalId,
        nome: impl Into<String>,
        cpf: impl Into<String>,
        valor_seguro: Decimal,
        duration_months: u32,
    ) -> Result<Self, DomainError> {
        let nome = nome.into();
        let cpf = cpf.into();

        if proposal_id.is_nil() {
            return Err(DomainError::invalid_argument(
                "proposta_id",
                "must not be empty",
            ));
        }
        if nome.trim().is_empty() {
            return Err(DomainError::invalid_argument("nome", "must not be empty"));
        }
        if cpf.trim().is_empty() || cpf.len() < 11 {
            return Err(DomainError::invalid_argument(
                "cpf",
                "must contain at least 11 characters",
            ));
        }
        if valor_seguro <= Decimal::ZERO {
            return Err(DomainError::invalid_argument(
                "valor_seguro",
                "must be greater than zero",
            ));
        }
        if duration_months == 0 {
            return Err(DomainError::invalid_argument(
                "duracao_meses",
                "must be greater than zero",
            ));
        }

        let now = Utc::now();
        let start_date = now.date_naive();
        let end_date = start_date
            .checked_add_months(Months::new(duration_months))
            .ok_or_else(|| {
                DomainError::invalid_argument("duracao_meses", "duration out of range")
            })?;

        Ok(Self {
            id: ContractId::generate(),
            proposal_id,
            nome,
            cpf,
            valor_seguro,
            start_date,
            end_date,
            active: true,
            created_at: now,
        })
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    pub fn proposal_id(&self) -> ProposalId {
        self.proposal_id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn valor_seguro(&self) -> Decimal {
        self.valor_seguro
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Cancel the contract. Cancelling an already-inactive contract is an
    /// error and leaves state unchanged.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::invalid_state("contract is already cancelled"));
        }
        self.active = false;
        Ok(())
    }
}
