//! Read-only reference data: foods, menu items and recipes.
//!
//! Catalogs are read once when a process starts and are never reloaded. A
//! missing or unparsable file produces an empty catalog.

mod foods;
mod menu;
mod recipes;

pub use foods::{Food, FoodCatalog, FoodsDocument};
pub use menu::{MenuCatalog, MenuDocument, MenuItem};
pub use recipes::{Nutrition, Recipe, RecipeCatalog, RecipeSummary, RecipesDocument};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::store::RecordStore;

/// An entry addressable by id or display name.
pub trait CatalogEntry: Sized {
    /// On-disk shape of the whole catalog file.
    type Document: Serialize + DeserializeOwned + Default;

    fn from_document(doc: Self::Document) -> Vec<Self>;

    fn id(&self) -> String;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Catalog<E> {
    entries: Vec<E>,
}

impl<E> Default for Catalog<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: CatalogEntry> Catalog<E> {
    pub fn new(entries: Vec<E>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> Self {
        let doc = RecordStore::<E::Document>::new(path).load();
        let catalog = Self::new(E::from_document(doc));
        tracing::info!(path = %path.display(), entries = catalog.len(), "loaded catalog");
        catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    /// Entries in the given category, or all of them.
    pub fn list(&self, category: Option<&str>) -> Vec<&E> {
        self.entries
            .iter()
            .filter(|e| category.is_none() || e.category() == category)
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&E> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Exact id match first, then a case-insensitive name match.
    pub fn get(&self, id_or_name: &str) -> Option<&E> {
        self.by_id(id_or_name).or_else(|| {
            self.entries
                .iter()
                .find(|e| e.name().eq_ignore_ascii_case(id_or_name))
        })
    }

    /// Case-insensitive substring match on name and description.
    pub fn search(&self, query: &str) -> Vec<&E> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.name().to_lowercase().contains(&needle)
                    || e
                        .description()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
