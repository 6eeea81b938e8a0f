//! Status-change wire message.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::ProposalId;
use super::proposal::Proposal;

/// Transport attribute key used to filter messages before decoding.
pub const EVENT_TYPE_KEY: &str = "EventType";

/// Event-type literal carried by every proposal status-change message.
pub const STATUS_UPDATED_EVENT: &str = "PropostaStatusAtualizado";

/// JSON body of a proposal status-change event.
///
/// Field names are fixed by the wire contract; `status` stays a free-form
/// string so consumers can filter unknown values without failing the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChangeMessage {
    #[serde(rename = "PropostaId")]
    pub proposta_id: ProposalId,

    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "DataAtualizacao")]
    pub data_atualizacao: Option<DateTime<Utc>>,

    #[serde(rename = "Nome")]
    pub nome: String,

    #[serde(rename = "CPF")]
    pub cpf: String,

    #[serde(rename = "ValorSeguro")]
    pub valor_seguro: Decimal,
}

impl StatusChangeMessage {
    /// Snapshot the current field values of a proposal.
    pub fn from_proposal(proposal: &Proposal) -> Self {
        Self {
            proposta_id: proposal.id(),
            status: proposal.status().as_wire().to_string(),
            data_atualizacao: proposal.updated_at(),
            nome: proposal.nome().to_string(),
            cpf: proposal.cpf().to_string(),
            valor_seguro: proposal.valor_seguro(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatusChangeMessage {
        StatusChangeMessage {
            proposta_id: ProposalId::generate(),
            status: "Aprovada".to_string(),
            data_atualizacao: Some(Utc::now()),
            nome: "Ana".to_string(),
            cpf: "12345678900".to_string(),
            valor_seguro: Decimal::from(500),
        }
    }

    #[test]
    fn body_uses_exact_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "PropostaId",
            "Status",
            "DataAtualizacao",
            "Nome",
            "CPF",
            "ValorSeguro",
        ] {
            assert!(object.contains_key(key), "missing wire field {key}");
        }
        assert!(object["ValorSeguro"].is_number());
    }

    #[test]
    fn missing_update_timestamp_serializes_as_null() {
        let mut message = sample();
        message.data_atualizacao = None;

        let value = serde_json::to_value(&message).unwrap();
        assert!(value["DataAtualizacao"].is_null());
    }

    #[test]
    fn snapshot_matches_proposal_fields() {
        let proposal = Proposal::new("Ana", "123.456.789-00", Decimal::from(1500)).unwrap();
        let message = StatusChangeMessage::from_proposal(&proposal);

        assert_eq!(message.proposta_id, proposal.id());
        assert_eq!(message.status, "EmAnalise");
        assert_eq!(message.data_atualizacao, None);
        assert_eq!(message.nome, "Ana");
        assert_eq!(message.cpf, "123.456.789-00");
        assert_eq!(message.valor_seguro, proposal.valor_seguro());
    }
}
