use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Catalog, CatalogEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub menu: IndexMap<String, MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Key of the item in the menu file, e.g. `greek_salad`.
    #[serde(skip)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub dietary: Vec<String>,
    /// Minutes.
    #[serde(default)]
    pub prep_time: Option<u32>,
    /// Minutes.
    #[serde(default)]
    pub cook_time: Option<u32>,
}

impl CatalogEntry for MenuItem {
    type Document = MenuDocument;

    fn from_document(doc: MenuDocument) -> Vec<Self> {
        doc.menu
            .into_iter()
            .map(|(key, item)| MenuItem { key, ..item })
            .collect()
    }

    fn id(&self) -> String {
        self.key.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn category(&self) -> Option<&str> {
        (!self.category.is_empty()).then_some(self.category.as_str())
    }
}

pub type MenuCatalog = Catalog<MenuItem>;

impl Catalog<MenuItem> {
    /// Items ordered by category, then name.
    pub fn sorted(&self, category: Option<&str>) -> Vec<&MenuItem> {
        let mut items = self.list(category);
        items.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        items
    }

    pub fn categories(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|item| item.category())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn menu() -> MenuCatalog {
        let doc: MenuDocument = serde_json::from_value(json!({
            "menu": {
                "Pancakes": {"name": "Pancakes", "category": "Breakfast", "description": "Fluffy stack with maple syrup", "price": 9.5},
                "Greek Salad": {"name": "Greek Salad", "category": "Salads", "description": "Feta, olives and crisp cucumber"},
                "Avocado Toast": {"name": "Avocado Toast", "category": "Breakfast", "description": "Sourdough with lime"}
            }
        }))
        .unwrap();
        MenuCatalog::new(MenuItem::from_document(doc))
    }

    #[test]
    fn finds_items_by_key_or_name() {
        let doc: MenuDocument = serde_json::from_value(json!({
            "menu": {
                "quinoa_buddha_bowl": {"name": "Quinoa Buddha Bowl", "category": "Bowls"}
            }
        }))
        .unwrap();
        let menu = MenuCatalog::new(MenuItem::from_document(doc));

        assert_eq!(menu.get("quinoa_buddha_bowl").unwrap().name, "Quinoa Buddha Bowl");
        assert_eq!(menu.get("quinoa buddha bowl").unwrap().key, "quinoa_buddha_bowl");
        assert!(menu.get("buddha").is_none());
    }

    #[test]
    fn sorts_by_category_then_name() {
        let names: Vec<_> = menu().sorted(None).iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Avocado Toast", "Pancakes", "Greek Salad"]);
    }

    #[test]
    fn filters_and_lists_categories() {
        let menu = menu();
        assert_eq!(menu.sorted(Some("Salads")).len(), 1);
        assert!(menu.sorted(Some("Desserts")).is_empty());
        assert_eq!(menu.categories(), vec!["Breakfast", "Salads"]);
    }

    #[test]
    fn searches_name_and_description() {
        let menu = menu();
        assert_eq!(menu.search("MAPLE").len(), 1);
        assert_eq!(menu.search("toast").len(), 1);
        assert!(menu.search("sushi").is_empty());
    }
}
