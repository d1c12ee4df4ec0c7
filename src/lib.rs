//! # PYQ Search
//!
//! Site search for a previous-year question paper (PYQ) library.
//!
//! The index is built in two phases. A fixed catalog of branches, their
//! semesters and a handful of curated pages is appended synchronously and
//! is always complete. Subjects are then scraped from every semester page
//! by detached background tasks and appended as pages arrive; pages that
//! fail to load contribute nothing. Queries score every resident entry
//! through intent-aware tier ladders and never wait for enrichment.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Catalog    │──▶│ SearchIndex  │◀──│  Enrichment  │
//! │ (core, sync) │   │ append-only  │   │ fetch+scrape │
//! └──────────────┘   └──────┬───────┘   └──────────────┘
//!                           │
//!                    ┌──────┴───────┐
//!                    ▼              ▼
//!               ┌──────────┐   ┌──────────┐
//!               │   CLI    │   │   HTTP   │
//!               │  (pyq)   │   │  (axum)  │
//!               └──────────┘   └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`fetch`] | Page fetchers (HTTP, filesystem) |
//! | [`extract`] | Subject section extraction from semester pages |
//! | [`builder`] | Catalog + background enrichment |
//! | [`service`] | Query front end with retry-once semantics |
//! | [`render`] | Result panel markup |
//! | [`search`] | `pyq search` command |
//! | [`stats`] | `pyq index` command |
//! | [`server`] | HTTP server |
//!
//! Scoring, ranking and the catalog tables live in `pyq-search-core`.

pub mod builder;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod render;
pub mod search;
pub mod server;
pub mod service;
pub mod stats;
