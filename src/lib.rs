//! Taskgate: task management HTTP backend.
//!
//! Registered users sign in with an email and password and receive a
//! session token. Tasks carry a day-scoped sequential identifier of the form
//! `YYMMDDnnn`; admins see and manage every task while regular users only
//! reach the tasks they are assigned to.
//!
//! # Architecture
//!
//! Taskgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration of domain rules over the ports
//!
//! # Modules
//!
//! - [`auth`]: Accounts, password digests, session tokens, and principals
//! - [`task`]: Task records, identifier allocation, and access control
//! - [`http`]: Routes, request authentication, and error responses
//! - [`config`], [`telemetry`], [`server`]: Process wiring

pub mod auth;
pub mod config;
pub mod database;
pub mod http;
pub mod server;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_clock;
