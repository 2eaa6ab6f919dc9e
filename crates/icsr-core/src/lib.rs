//! Service layer for ICSR documents.
//!
//! Ties the layers together: api input is converted to the domain layer,
//! checked against the business rules, converted to the storage layer and
//! handed to an [`IcsrStore`]; reads travel the same way back.

pub mod service;
pub mod store;

pub use service::{IcsrService, ServiceError, ServiceOutcome};
pub use store::{IcsrStore, InMemoryStore, StoreError};
