//! Connection dispatch driven by proxy auto-configuration.
//!
//! For every outbound connection a [`Dispatcher`](domain::Dispatcher) asks a
//! resolver which proxy to use, keeps the first directive of the answer and
//! opens the socket directly or through a protocol connector built once per
//! distinct directive.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use config::AgentConfig;
pub use domain::{ConnectionRequest, Dispatcher, ProxyError, ProxyStream, Result};

/// Build version, from `git describe` when available.
pub const VERSION: &str = env!("PACDISPATCH_VERSION");
