//! Repository implementations.
//!
//! Currently the in-memory `LocalRepository`; persistent backends plug in
//! behind the same traits.

pub mod local;

pub use local::LocalRepository;
