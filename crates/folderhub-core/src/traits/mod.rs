//! Collaborator traits consumed by the mutation engine.

pub mod prompt;
pub mod remote;

pub use prompt::{AlwaysConfirm, Confirmation};
pub use remote::RemoteBackend;
