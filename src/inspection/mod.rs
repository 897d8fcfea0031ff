//! Inspection core - identity extraction and notification reconciliation
//!
//! This is the domain layer. It never talks to the network, the filesystem or
//! the property store directly; every collaborator arrives through a port
//! defined in `crate::ports::outbound`.
pub mod domain;
pub mod extractors;
pub mod services;
