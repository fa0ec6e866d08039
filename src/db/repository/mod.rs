//! Repository trait definitions.
//!
//! The repository pattern keeps the engine independent of the storage
//! backend: the observation store and station registry are external
//! collaborators reached through these traits, and the derived-state store
//! carries its update contracts in the trait itself.

pub mod derived;
pub mod error;
pub mod observations;
pub mod stations;

pub use derived::DerivedStateRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use observations::ObservationRepository;
pub use stations::StationRepository;

/// Full repository: everything the engine and the HTTP layer need.
pub trait FullRepository:
    ObservationRepository + StationRepository + DerivedStateRepository
{
}

impl<T> FullRepository for T where
    T: ObservationRepository + StationRepository + DerivedStateRepository
{
}
