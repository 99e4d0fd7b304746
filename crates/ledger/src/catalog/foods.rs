use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Catalog, CatalogEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodsDocument {
    #[serde(default)]
    pub foods: IndexMap<String, Food>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: u64,
    pub name: String,
    /// Nutrition or other metadata carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry for Food {
    type Document = FoodsDocument;

    fn from_document(doc: FoodsDocument) -> Vec<Self> {
        doc.foods.into_values().collect()
    }

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub type FoodCatalog = Catalog<Food>;

impl Catalog<Food> {
    pub fn ids(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|f| f.id.to_string())
    }

    /// Display label for a pantry key.
    ///
    /// Known ids resolve to the food's name; a non-numeric key is already a
    /// name; an unknown numeric id becomes `Unknown (ID n)`.
    pub fn display_name(&self, key: &str) -> String {
        match self.by_id(key) {
            Some(food) => food.name.clone(),
            None if key.parse::<u64>().is_err() => key.to_string(),
            None => format!("Unknown (ID {key})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> FoodCatalog {
        let doc: FoodsDocument = serde_json::from_value(json!({
            "foods": {
                "1": {"id": 1, "name": "Tomato", "kcal": 18},
                "2": {"id": 2, "name": "Feta Cheese"}
            }
        }))
        .unwrap();
        FoodCatalog::new(Food::from_document(doc))
    }

    #[test]
    fn resolves_names() {
        let foods = catalog();
        assert_eq!(foods.display_name("1"), "Tomato");
        assert_eq!(foods.display_name("42"), "Unknown (ID 42)");
        assert_eq!(foods.display_name("olive_oil"), "olive_oil");
    }

    #[test]
    fn keeps_extra_metadata() {
        let foods = catalog();
        assert_eq!(foods.by_id("1").unwrap().extra["kcal"], json!(18));
        assert_eq!(foods.get("feta cheese").unwrap().id, 2);
    }
}
