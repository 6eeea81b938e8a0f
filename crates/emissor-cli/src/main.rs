//! End-to-end in-memory demo of the proposal -> contract pipeline.
//!
//! Wires the two services against the in-memory queue and stores, spawns the
//! consumer, then walks one proposal from intake through approval to an
//! issued contract.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use emissor_core::app::{
    ConsumerConfig, ContractService, CreateProposal, EventDispatcher, MessageConsumer,
    ProposalApprovalHandler, ProposalService, StatusChangePublisher,
};
use emissor_core::domain::ProposalStatus;
use emissor_core::impls::{InMemoryContractStore, InMemoryProposalStore, InMemoryQueue};
use emissor_core::ports::QueueTransport;

const QUEUE_URL: &str = "fila-proposta-status";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // (A) transport and stores
    let queue: Arc<dyn QueueTransport> = Arc::new(InMemoryQueue::new());
    let proposal_store = Arc::new(InMemoryProposalStore::new());
    let contract_store = Arc::new(InMemoryContractStore::new());

    // (B) contract side + consumer
    let contract_service = Arc::new(ContractService::new(contract_store));
    let handler = Arc::new(ProposalApprovalHandler::new(contract_service.clone()));
    let consumer = MessageConsumer::new(
        queue.clone(),
        EventDispatcher::new(handler),
        ConsumerConfig::new(QUEUE_URL),
    );
    let consumer_handle = consumer.spawn();

    // (C) proposal side
    let publisher = StatusChangePublisher::new(queue.clone(), QUEUE_URL);
    let proposal_service = ProposalService::new(proposal_store, publisher);

    // (D) intake, then approve
    let proposal = proposal_service
        .create(CreateProposal {
            nome: "Ana Souza".to_string(),
            cpf: "123.456.789-00".to_string(),
            valor_seguro: Decimal::from(1500),
        })
        .await?;
    info!(proposal_id = %proposal.id(), "proposal submitted");

    proposal_service
        .update_status(proposal.id(), ProposalStatus::Approved)
        .await?;

    // (E) wait for the consumer to issue the contract
    let contract = loop {
        match contract_service.get_by_proposal(proposal.id()).await {
            Ok(contract) => break contract,
            Err(_) => tokio::time::sleep(Duration::from_millis(50)).await,
        }
    };
    info!(
        contract_id = %contract.id(),
        start = %contract.start_date(),
        end = %contract.end_date(),
        active = contract.is_active(),
        "contract issued"
    );

    consumer_handle.shutdown_and_join().await;
    Ok(())
}
