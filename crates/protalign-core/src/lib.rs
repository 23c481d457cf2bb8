//! # protalign Core Library
//!
//! A library for measuring how well the attention patterns of a
//! protein language model align with the residue contact map of the
//! corresponding protein structure.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`ProteinChain`, `AttentionStack`), the pure mathematics of contact-map
//!   construction and attention scoring, and I/O for structure and attention
//!   files.
//!
//! - **[`engine`]: The Logic Core.** Holds the pipeline configuration, the
//!   chain selector, the score accumulator, and the progress-reporting
//!   machinery shared by all workflows.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties `engine` and `core` together to execute complete analyses:
//!   scoring a single chain, batch-processing a chain set, and exporting the
//!   residue contact network.

pub mod core;
pub mod engine;
pub mod workflows;
