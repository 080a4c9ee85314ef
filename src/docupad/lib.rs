//! # Docupad Architecture
//!
//! Docupad is a **UI-agnostic document-management library** with pluggable
//! collaborative editing. The CLI binary is just one client of it; the same
//! core could sit behind a web application's document screens.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (selectors → UUIDs, category names)    │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                     │                    │
//!                     ▼                    ▼
//! ┌───────────────────────────┐ ┌───────────────────────────────┐
//! │  Storage Layer (store/)   │ │  Editor Layer (editors/)      │
//! │  - DocumentStore trait    │ │  - DocEditor trait + registry │
//! │  - FileStore (production) │ │  - EtherPadEditor over a      │
//! │  - InMemoryStore (tests)  │ │    PadService remote client   │
//! └───────────────────────────┘ └───────────────────────────────┘
//! ```
//!
//! ## The Editor Layer
//!
//! Editors are a closed registry of backends, each declaring the file
//! extensions it can handle and probing its own remote service for
//! availability. A document opened for editing is bound to a deterministic
//! remote session id derived from the hosting root URL and the document
//! name, so re-opening is idempotent. See [`editors`] for the dispatch
//! rules and [`editors::etherpad`] for the session lifecycle.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage, editors), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! Remote-service calls are the one exception to purity: they are blocking
//! network calls bounded by the configured timeout, made through the
//! `PadService` trait so tests never touch a network.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade: entry point for all operations
//! - [`commands`]: Business logic for each screen
//! - [`store`]: Storage abstraction and implementations
//! - [`editors`]: Editor registry, dispatch, and the Etherpad backend
//! - [`model`]: Core data types (`Document`, `Category`)
//! - [`listing`]: Display indexing and canonical ordering
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editors;
pub mod error;
pub mod listing;
pub mod model;
pub mod store;
