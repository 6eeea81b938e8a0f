//! Proposal entity and its status state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::DomainError;
use super::ids::ProposalId;

/// Decision status of a proposal.
///
/// Wire and display names are the Portuguese literals used by the
/// status-change message (`EmAnalise` / `Aprovada` / `Rejeitada`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    #[serde(rename = "EmAnalise")]
    UnderReview,
    #[serde(rename = "Aprovada")]
    Approved,
    #[serde(rename = "Rejeitada")]
    Rejected,
}

impl ProposalStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            ProposalStatus::UnderReview => "EmAnalise",
            ProposalStatus::Approved => "Aprovada",
            ProposalStatus::Rejected => "Rejeitada",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Request for insurance coverage awaiting a decision.
///
/// Created by the intake operation, mutated only through `update_status`,
/// never deleted.
#[derive(Debug, Clone)]
pub struct Proposal {
    id: ProposalId,
    nome: String,
    cpf: String,
    valor_seguro: Decimal,
    status: ProposalStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Proposal {
    /// Create a new proposal in `UnderReview`.
    ///
    /// Validates every field and names the offending one on failure; nothing
    /// is generated (no id, no timestamp) for invalid input.
    pub fn new(
        nome: impl Into<String>,
        cpf: impl Into<String>,
        valor_seguro: Decimal,
    ) -> Result<Self, DomainError> {
        let nome = nome.into();
        let cpf = cpf.into();

        if nome.trim().is_empty() {
            return Err(DomainError::invalid_argument("nome", "must not be empty"));
        }
        if !cpf_is_valid(&cpf) {
            return Err(DomainError::invalid_argument(
                "cpf",
                "must contain exactly 11 digits",
            ));
        }
        if valor_seguro <= Decimal::ZERO {
            return Err(DomainError::invalid_argument(
                "valor_seguro",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            id: ProposalId::generate(),
            nome,
            cpf,
            valor_seguro,
            status: ProposalStatus::UnderReview,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    pub fn id(&self) -> ProposalId {
        self.id
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

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Apply a status transition.
    ///
    /// Rules:
    /// - same status is a no-op and does not touch `updated_at`
    /// - `Rejected` is terminal
    /// - `Approved` cannot go back to `UnderReview`
    pub fn update_status(&mut self, new_status: ProposalStatus) -> Result<(), DomainError> {
        if new_status == self.status {
            return Ok(());
        }
        if self.status == ProposalStatus::Rejected {
            return Err(DomainError::invalid_state(
                "a rejected proposal cannot change status",
            ));
        }
        if self.status == ProposalStatus::Approved && new_status == ProposalStatus::UnderReview {
            return Err(DomainError::invalid_state(
                "an approved proposal cannot return to review",
            ));
        }

        self.status = new_status;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

/// Exactly 11 digits once separators like `.` and `-` are stripped.
fn cpf_is_valid(cpf: &str) -> bool {
    cpf.chars().filter(|c| c.is_ascii_digit()).count() == 11
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_proposal() -> Proposal {
        Proposal::new("Ana Souza", "123.456.789-00", Decimal::from(1000)).unwrap()
    }

    #[test]
    fn new_proposal_starts_under_review() {
        let proposal = valid_proposal();
        assert_eq!(proposal.status(), ProposalStatus::UnderReview);
        assert!(!proposal.id().is_nil());
        assert!(proposal.updated_at().is_none());
        assert_eq!(proposal.cpf(), "123.456.789-00");
    }

    #[test]
    fn new_proposals_get_unique_ids() {
        assert_ne!(valid_proposal().id(), valid_proposal().id());
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn rejects_blank_name(#[case] nome: &str) {
        let err = Proposal::new(nome, "12345678900", Decimal::from(100)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { field: "nome", .. }));
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_short("123")]
    #[case::too_long("123456789012345")]
    #[case::letters("abcdefghijk")]
    fn rejects_bad_cpf(#[case] cpf: &str) {
        let err = Proposal::new("Ana", cpf, Decimal::from(100)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { field: "cpf", .. }));
    }

    #[test]
    fn accepts_cpf_with_separators() {
        assert!(Proposal::new("Ana", "123.456.789-00", Decimal::from(100)).is_ok());
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::from(-1))]
    fn rejects_non_positive_value(#[case] valor: Decimal) {
        let err = Proposal::new("Ana", "12345678900", valor).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidArgument { field: "valor_seguro", .. }
        ));
    }

    #[test]
    fn same_status_is_a_no_op() {
        let mut proposal = valid_proposal();
        proposal.update_status(ProposalStatus::Approved).unwrap();
        let stamped = proposal.updated_at();
        assert!(stamped.is_some());

        proposal.update_status(ProposalStatus::Approved).unwrap();
        assert_eq!(proposal.updated_at(), stamped);
    }

    #[test]
    fn transition_stamps_updated_at() {
        let mut proposal = valid_proposal();
        assert!(proposal.updated_at().is_none());
        proposal.update_status(ProposalStatus::Approved).unwrap();
        assert!(proposal.updated_at().is_some());
    }

    #[rstest]
    #[case(ProposalStatus::Approved)]
    #[case(ProposalStatus::UnderReview)]
    fn rejected_is_terminal(#[case] next: ProposalStatus) {
        let mut proposal = valid_proposal();
        proposal.update_status(ProposalStatus::Rejected).unwrap();

        let err = proposal.update_status(next).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(proposal.status(), ProposalStatus::Rejected);
    }

    #[test]
    fn approved_cannot_return_to_review() {
        let mut proposal = valid_proposal();
        proposal.update_status(ProposalStatus::Approved).unwrap();

        let err = proposal.update_status(ProposalStatus::UnderReview).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(proposal.status(), ProposalStatus::Approved);
    }

    #[test]
    fn approved_can_still_be_rejected() {
        let mut proposal = valid_proposal();
        proposal.update_status(ProposalStatus::Approved).unwrap();
        proposal.update_status(ProposalStatus::Rejected).unwrap();
        assert_eq!(proposal.status(), ProposalStatus::Rejected);
    }

    #[test]
    fn status_serializes_to_wire_literals() {
        assert_eq!(
            serde_json::to_string(&ProposalStatus::UnderReview).unwrap(),
            "\"EmAnalise\""
        );
        assert_eq!(
            serde_json::to_string(&ProposalStatus::Approved).unwrap(),
            "\"Aprovada\""
        );
        assert_eq!(
            serde_json::to_string(&ProposalStatus::Rejected).unwrap(),
            "\"Rejeitada\""
        );
    }
}
