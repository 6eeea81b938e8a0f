//! Domain identifiers (strongly-typed IDs).
//!
//! UUIDs wrapped in a generic `Id<T>` with a phantom marker type, so a
//! `ProposalId` can never be passed where a `ContractId` is expected.
//! Serde is transparent: on the wire an id is a plain UUID string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Marker trait for each id type.
///
/// Provides the prefix used by `Display` (for log output only; serde never
/// sees it).
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic id type.
///
/// `T` is phantom: zero runtime cost, compile-time separation.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// The all-zero sentinel (C#'s `Guid.Empty` equivalent on the wire).
    pub fn nil() -> Self {
        Self::from_uuid(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.uuid
    }
}

impl<T: IdMarker> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.uuid)
    }
}

/// Marker type for proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProposalMarker {}

impl IdMarker for ProposalMarker {
    fn prefix() -> &'static str {
        "proposta-"
    }
}

/// Marker type for contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractMarker {}

impl IdMarker for ContractMarker {
    fn prefix() -> &'static str {
        "contrato-"
    }
}

/// Identifier of a Proposal (intake unit awaiting a decision).
pub type ProposalId = Id<ProposalMarker>;

/// Identifier of a Contract (issued insurance agreement).
pub type ContractId = Id<ContractMarker>;
