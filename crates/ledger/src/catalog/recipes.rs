use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipesDocument {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub serving_size: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub total_time: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub health_rating: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub fat: u32,
    pub carbs: u32,
    pub protein: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
        }
    }
}

impl CatalogEntry for Recipe {
    type Document = RecipesDocument;

    fn from_document(doc: RecipesDocument) -> Vec<Self> {
        doc.recipes
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub type RecipeCatalog = Catalog<Recipe>;

impl Catalog<Recipe> {
    pub fn summaries(&self) -> Vec<RecipeSummary> {
        self.iter().map(RecipeSummary::from).collect()
    }
}
