// SPDX-License-Identifier: MIT

//! Run loader - YAML file loading and parsing
//!
//! JSON documents are valid YAML, so exports from the playbooks server can
//! be loaded directly.

use super::types::{Playbook, Run};
use crate::error::Result;
use crate::property::PropertyUpdate;
use std::fs;
use std::path::Path;

/// Loads run, playbook and update definitions from YAML files
pub struct RunLoader;

impl RunLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a run definition from a YAML file
    pub fn load_run<P: AsRef<Path>>(&self, path: P) -> Result<Run> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a run definition from a YAML string
    pub fn parse_yaml(content: &str) -> Result<Run> {
        let run: Run = serde_yaml::from_str(content)?;
        log::debug!(
            "Loaded run {} with {} checklists and {} conditions",
            run.id,
            run.checklists.len(),
            run.conditions.len()
        );
        Ok(run)
    }

    /// Load a playbook definition from a YAML file
    pub fn load_playbook<P: AsRef<Path>>(&self, path: P) -> Result<Playbook> {
        let content = fs::read_to_string(path)?;
        Self::parse_playbook(&content)
    }

    pub fn parse_playbook(content: &str) -> Result<Playbook> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a property update from a YAML file
    pub fn load_update<P: AsRef<Path>>(&self, path: P) -> Result<PropertyUpdate> {
        let content = fs::read_to_string(path)?;
        Self::parse_update(&content)
    }

    pub fn parse_update(content: &str) -> Result<PropertyUpdate> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl Default for RunLoader {
    fn default() -> Self {
        Self::new()
    }
}
