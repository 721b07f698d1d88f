use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cookbook::{Cookbook, CookbookPatch};
use crate::error::{Error, Result};

/// Client-side cookbook state.
///
/// Only `cookbooks` survives [`CookbookStore::save`]; the draft and generation
/// fields live for one session.
#[derive(Clone, Debug, Default)]
pub struct CookbookStore {
    pub current: Option<Cookbook>,

    pub is_generating: bool,
    pub generation_progress: f64,
    pub generation_message: String,

    /// Newest first
    pub cookbooks: Vec<Cookbook>,
    pub is_loading: bool,
}

#[derive(Serialize, Deserialize)]
struct PersistedState {
    cookbooks: Vec<Cookbook>,
}

impl CookbookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current(&mut self, cookbook: Option<Cookbook>) {
        self.current = cookbook;
    }

    /// Merges `patch` into the current draft. No-op without a draft.
    pub fn update_current(&mut self, patch: &CookbookPatch) {
        if let Some(current) = self.current.as_mut() {
            patch.apply(current);
        }
    }

    /// Starting a generation resets progress to zero, stopping keeps the last value.
    pub fn set_generating(&mut self, is_generating: bool, message: impl Into<String>) {
        self.is_generating = is_generating;
        self.generation_message = message.into();
        if is_generating {
            self.generation_progress = 0.0;
        }
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.generation_progress = progress;
    }

    pub fn set_cookbooks(&mut self, cookbooks: Vec<Cookbook>) {
        self.cookbooks = cookbooks;
        self.is_loading = false;
    }

    pub fn add_cookbook(&mut self, cookbook: Cookbook) {
        self.cookbooks.insert(0, cookbook);
    }

    pub fn get(&self, id: &str) -> Option<&Cookbook> {
        self.cookbooks.iter().find(|c| c.id == id)
    }

    pub fn update_cookbook(&mut self, id: &str, patch: &CookbookPatch, now: u64) -> Result<()> {
        let cookbook = self
            .cookbooks
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::CookbookNotFound(id.to_string()))?;
        patch.apply(cookbook);
        cookbook.updated_at = now;
        Ok(())
    }

    /// Replaces a stored cookbook wholesale, e.g. once generation finishes.
    pub fn replace_cookbook(&mut self, cookbook: Cookbook) -> Result<()> {
        let slot = self
            .cookbooks
            .iter_mut()
            .find(|c| c.id == cookbook.id)
            .ok_or_else(|| Error::CookbookNotFound(cookbook.id.clone()))?;
        *slot = cookbook;
        Ok(())
    }

    /// Returns whether anything was removed.
    pub fn remove_cookbook(&mut self, id: &str) -> bool {
        let before = self.cookbooks.len();
        self.cookbooks.retain(|c| c.id != id);
        before != self.cookbooks.len()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let persisted = PersistedState {
            cookbooks: self.cookbooks.clone(),
        };
        let json = serde_json::to_string_pretty(&persisted)?;
        std::fs::write(path, json)?;
        debug!("Saved {} cookbooks to {}", self.cookbooks.len(), path.display());
        Ok(())
    }

    /// Restores the cookbook list. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let mut store = Self::new();
        if !path.exists() {
            return Ok(store);
        }
        store.is_loading = true;
        let text = std::fs::read_to_string(path)?;
        let persisted: PersistedState = serde_json::from_str(&text)?;
        info!("Loaded {} cookbooks from {}", persisted.cookbooks.len(), path.display());
        store.set_cookbooks(persisted.cookbooks);
        Ok(store)
    }
}
