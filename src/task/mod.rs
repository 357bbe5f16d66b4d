//! Task records with ownership-scoped access and daily sequential ids.
//!
//! Tasks are identified as `YYMMDDnnn`: the creation date followed by a
//! per-day sequence. Admins may act on every task; other principals only on
//! tasks that list them as assignees. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
