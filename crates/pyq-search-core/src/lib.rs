//! # PYQ Search Core
//!
//! Runtime-free logic for the PYQ site search: the index data model, the
//! static branch/semester catalog, the append-only index container, query
//! intent classification, the tiered scoring cascade, and ranked retrieval
//! with title highlighting.
//!
//! This crate performs no I/O and pulls in no async runtime. Fetching and
//! scraping semester pages lives in the `pyq-search` application crate,
//! which appends what it finds to a shared [`index::SearchIndex`].

pub mod catalog;
pub mod index;
pub mod intent;
pub mod models;
pub mod scoring;
pub mod search;
pub mod text;
