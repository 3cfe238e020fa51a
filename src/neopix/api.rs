//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! neopix operation. It owns the store, the engine and the resolved
//! [`RunConfig`], and passes them to the commands explicitly: there is no
//! shared mutable configuration anywhere in the crate.
//!
//! `NeopixApi<S, E>` is generic over both seams:
//! - Production: `NeopixApi<FileStore, ImageCompareEngine>`
//! - Testing: `NeopixApi<InMemoryStore, _>` with a canned engine
//!
//! Nothing here prints or exits. Callers get a [`CmdResult`] whose `outcome`
//! they map to an exit status.

use crate::commands::{self, CmdResult};
use crate::config::RunConfig;
use crate::engine::DiffEngine;
use crate::error::Result;
use crate::store::ImageStore;
use std::path::Path;

pub use crate::commands::{CmdMessage, DiffSummary, MessageLevel};

pub struct NeopixApi<S: ImageStore, E: DiffEngine> {
    store: S,
    engine: E,
    config: RunConfig,
}

impl<S: ImageStore, E: DiffEngine> NeopixApi<S, E> {
    pub fn new(store: S, engine: E, config: RunConfig) -> Self {
        Self {
            store,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ensure_workspace(&mut self) -> Result<CmdResult> {
        commands::init::run(&mut self.store)
    }

    pub fn admit_image(&mut self, source: &Path, name: &str) -> Result<CmdResult> {
        commands::admit::run(&mut self.store, source, name)
    }

    pub fn diff_image(&mut self, name: &str) -> Result<CmdResult> {
        commands::compare::run(&mut self.store, &self.engine, name, &self.config.diff)
    }

    /// Full run for one input image.
    pub fn check(&mut self, source: &Path) -> Result<CmdResult> {
        commands::check::run(&mut self.store, &self.engine, &self.config, source)
    }
}
