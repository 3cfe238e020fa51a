//! # Neopix Architecture
//!
//! Neopix gates a build on visual regressions: it takes a freshly rendered
//! image, finds the accepted baseline with the same filename, renders a
//! perceptual diff and reports whether the mismatch stays within a threshold.
//!
//! The pixel comparison itself comes from the `image-compare` crate. What
//! lives here is the bookkeeping around it: path resolution, the workspace
//! buckets, baseline promotion and the pass/fail verdict.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses flags, sets up logging, prints messages           │
//! │  - The ONLY place that knows about stderr and exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Owns store, engine and the resolved RunConfig            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - init: ensure buckets     - admit: baseline promotion     │
//! │  - compare: one diff        - check: the full run           │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                           │
//!                  ▼                           ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Storage (store/)            │ │  Engine (engine/)          │
//! │  ImageStore: FileStore,      │ │  DiffEngine:               │
//! │  InMemoryStore               │ │  ImageCompareEngine        │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Run lifecycle
//!
//! 1. Resolve the input and base directory to absolute paths ([`paths`]).
//! 2. Merge flags, `neopix.json` and defaults into a [`config::RunConfig`].
//! 3. Create the baseline, updated and diff buckets.
//! 4. Admit the input (see [`commands::admit`] for the state table).
//! 5. Diff baseline against updated and write the diff under the same
//!    filename. On first sight both hold the input, so the diff is empty.
//! 6. Turn the mismatch into a [`model::Outcome`]: `mismatch <= threshold`
//!    passes.
//!
//! Exit codes are decided by the binary from the returned outcome: 0 passed,
//! 1 threshold exceeded, 2 operational error.
//!
//! ## Concurrency
//!
//! None. Each invocation is one sequential run. Two invocations sharing a
//! workspace race on the promotion step and are not supported.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade
//! - [`commands`]: One module per step
//! - [`store`]: Workspace storage trait and implementations
//! - [`engine`]: Diff engine trait and the `image-compare` adapter
//! - [`config`]: Settings file, tolerance modes, diff options
//! - [`model`]: Buckets, layout, admission and outcome types
//! - [`paths`]: Path resolution
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod paths;
pub mod store;
