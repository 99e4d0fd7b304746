//! Pantry tools: stock checks, debits for the chef, restocking for the supplier.

use async_trait::async_trait;
use indexmap::IndexMap;
use orderup_ledger::{LedgerError, Quantity, Stock, StockCheck};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{Empty, failure, parse_args};
use crate::tools::{Tool, ToolContext, ToolDefinition, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
struct CheckPantryArgs {
    /// Ingredient key to check. Omit to list the whole pantry.
    #[serde(default)]
    ingredient: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct IngredientsArgs {
    /// Ingredient keys mapped to quantities.
    ingredients: IndexMap<String, f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LowStockArgs {
    /// Report items at or below this quantity. Defaults to the configured threshold.
    #[serde(default)]
    threshold: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListFoodsArgs {
    /// Case-insensitive substring of the food name.
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MatchIngredientsArgs {
    /// Ingredient names as written in a recipe or supplier invoice.
    names: Vec<String>,
}

fn to_stock(amounts: IndexMap<String, f64>) -> Stock {
    amounts
        .into_iter()
        .map(|(key, amount)| (key, Quantity::new(amount)))
        .collect()
}

/// Refusals become payloads; malformed quantities are the caller's fault.
fn refusal(error: LedgerError) -> Result<Value, ToolError> {
    match error {
        LedgerError::InsufficientStock { missing } => Ok(json!({
            "success": false,
            "message": "Insufficient ingredients",
            "missing": missing,
        })),
        e @ LedgerError::InvalidQuantity { .. } => Err(ToolError::InvalidRequest(e.to_string())),
        e => Ok(failure(e)),
    }
}

#[derive(Debug, Default)]
pub struct CheckPantryTool;

impl CheckPantryTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for CheckPantryTool {
    fn name(&self) -> &str {
        "check_pantry"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<CheckPantryArgs>(
            self.name(),
            "Check pantry stock for one ingredient, or list the whole inventory when no ingredient is given.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: CheckPantryArgs = parse_args(args)?;
        let pantry = &context.kitchen().pantry;

        match pantry.check(args.ingredient.as_deref()) {
            StockCheck::Item {
                key,
                quantity,
                available,
            } => {
                tracing::debug!(server = context.server_name(), item = %key, quantity = %quantity, "checked pantry item");
                if key == "available" {
                    // The keyed shape would lose the quantity to the flag.
                    return Ok(json!({
                        "item": key,
                        "quantity": quantity,
                        "available": available,
                    }));
                }
                let mut result = Map::new();
                result.insert(key, serde_json::to_value(quantity)?);
                result.insert("available".to_string(), Value::Bool(available));
                Ok(Value::Object(result))
            }
            StockCheck::All(inventory) => Ok(json!({
                "total_items": inventory.len(),
                "inventory": inventory,
            })),
        }
    }
}

#[derive(Debug, Default)]
pub struct TakeIngredientsTool;

impl TakeIngredientsTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for TakeIngredientsTool {
    fn name(&self) -> &str {
        "take_ingredients"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<IngredientsArgs>(
            self.name(),
            "Remove ingredients from the pantry for a recipe. Either every ingredient is taken or, \
             if any is short, nothing is taken and each shortage is listed.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: IngredientsArgs = parse_args(args)?;
        match context.kitchen().pantry.take(&to_stock(args.ingredients)) {
            Ok(updated) => Ok(json!({
                "success": true,
                "message": "All ingredients provided",
                "updated_inventory": updated,
            })),
            Err(e) => refusal(e),
        }
    }
}

#[derive(Debug, Default)]
pub struct AddIngredientsTool;

impl AddIngredientsTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for AddIngredientsTool {
    fn name(&self) -> &str {
        "add_ingredients"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<IngredientsArgs>(
            self.name(),
            "Restock the pantry. Unknown ingredients are created. Use match_ingredients first to \
             reuse existing pantry keys.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: IngredientsArgs = parse_args(args)?;
        match context.kitchen().pantry.add(&to_stock(args.ingredients)) {
            Ok(updated) => Ok(json!({
                "success": true,
                "message": format!("Added {} ingredient types", updated.len()),
                "updated_inventory": updated,
            })),
            Err(e) => refusal(e),
        }
    }
}

#[derive(Debug, Default)]
pub struct GetLowStockItemsTool;

impl GetLowStockItemsTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for GetLowStockItemsTool {
    fn name(&self) -> &str {
        "get_low_stock_items"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<LowStockArgs>(
            self.name(),
            "List pantry items whose quantity is at or below a threshold (default 3).",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: LowStockArgs = parse_args(args)?;
        let kitchen = context.kitchen();
        let threshold = args
            .threshold
            .map(Quantity::new)
            .unwrap_or(kitchen.low_stock_threshold);
        if !threshold.is_valid() {
            return Err(ToolError::InvalidRequest(format!(
                "threshold must be a non-negative number, got {}",
                threshold
            )));
        }

        let items = kitchen.pantry.low_stock(threshold);
        Ok(json!({
            "count": items.len(),
            "low_stock_items": items,
            "threshold": threshold,
        }))
    }
}

#[derive(Debug, Default)]
pub struct ListPantryTool;

impl ListPantryTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListPantryTool {
    fn name(&self) -> &str {
        "list_pantry"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<Empty>(
            self.name(),
            "List every pantry entry with its display name, including catalog foods that are out of stock.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let _: Empty = parse_args(args)?;
        let kitchen = context.kitchen();
        let items = kitchen.pantry.pantry_view(&kitchen.foods);
        Ok(json!({
            "count": items.len(),
            "items": items,
        }))
    }
}

#[derive(Debug, Default)]
pub struct ListFoodsTool;

impl ListFoodsTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListFoodsTool {
    fn name(&self) -> &str {
        "list_foods"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<ListFoodsArgs>(
            self.name(),
            "List foods from the catalog, optionally filtered by name.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: ListFoodsArgs = parse_args(args)?;
        let catalog = &context.kitchen().foods;
        let foods = match args.query.as_deref() {
            Some(query) => catalog.search(query),
            None => catalog.iter().collect(),
        };
        Ok(json!({
            "count": foods.len(),
            "foods": foods,
        }))
    }
}

#[derive(Debug, Default)]
pub struct MatchIngredientsTool;

impl MatchIngredientsTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for MatchIngredientsTool {
    fn name(&self) -> &str {
        "match_ingredients"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<MatchIngredientsArgs>(
            self.name(),
            "Map ingredient names onto existing pantry keys (e.g. 'Roma tomatoes' -> 'tomatoes'). \
             Names with no match map to null.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: MatchIngredientsArgs = parse_args(args)?;
        let matches = context
            .kitchen()
            .pantry
            .match_names(args.names.iter().map(String::as_str));
        Ok(json!({ "matches": matches }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::ServerKind;
    use crate::tools::builtins::test_support::{context, write};
    use tempfile::TempDir;

    #[tokio::test]
    async fn take_reports_every_shortage() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pantry.json", json!({"tomatoes": 8, "basil": 1}));
        let ctx = context(&dir, ServerKind::Pantry);

        let ok = TakeIngredientsTool::new()
            .call(json!({"ingredients": {"tomatoes": 5}}), &ctx)
            .await
            .unwrap();
        assert_eq!(ok["success"], json!(true));
        assert_eq!(ok["updated_inventory"], json!({"tomatoes": 3}));

        let short = TakeIngredientsTool::new()
            .call(json!({"ingredients": {"tomatoes": 5, "basil": 2}}), &ctx)
            .await
            .unwrap();
        assert_eq!(short["success"], json!(false));
        assert_eq!(short["message"], json!("Insufficient ingredients"));
        assert_eq!(
            short["missing"],
            json!({
                "tomatoes": {"needed": 5, "available": 3, "shortage": 2},
                "basil": {"needed": 2, "available": 1, "shortage": 1}
            })
        );
    }

    #[tokio::test]
    async fn check_single_item_and_everything() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pantry.json", json!({"eggs": 24, "saffron": 0}));
        let ctx = context(&dir, ServerKind::Pantry);
        let tool = CheckPantryTool::new();

        let eggs = tool.call(json!({"ingredient": "eggs"}), &ctx).await.unwrap();
        assert_eq!(eggs, json!({"eggs": 24, "available": true}));

        let saffron = tool.call(json!({"ingredient": "saffron"}), &ctx).await.unwrap();
        assert_eq!(saffron["available"], json!(false));

        let all = tool.call(Value::Null, &ctx).await.unwrap();
        assert_eq!(all["total_items"], json!(2));
    }

    #[tokio::test]
    async fn item_named_available_keeps_its_quantity() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pantry.json", json!({"available": 3}));
        let ctx = context(&dir, ServerKind::Pantry);

        let checked = CheckPantryTool::new()
            .call(json!({"ingredient": "available"}), &ctx)
            .await
            .unwrap();
        assert_eq!(
            checked,
            json!({"item": "available", "quantity": 3, "available": true})
        );
    }

    #[tokio::test]
    async fn add_then_low_stock() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pantry.json", json!({"beef": 3, "ginger": 5}));
        let ctx = context(&dir, ServerKind::Pantry);

        let added = AddIngredientsTool::new()
            .call(json!({"ingredients": {"ginger": 1, "lemongrass": 2}}), &ctx)
            .await
            .unwrap();
        assert_eq!(added["message"], json!("Added 2 ingredient types"));
        assert_eq!(added["updated_inventory"], json!({"ginger": 6, "lemongrass": 2}));

        let low = GetLowStockItemsTool::new().call(json!({}), &ctx).await.unwrap();
        assert_eq!(low["threshold"], json!(3));
        assert_eq!(
            low["low_stock_items"],
            json!([{"item": "beef", "quantity": 3}, {"item": "lemongrass", "quantity": 2}])
        );
    }

    #[tokio::test]
    async fn negative_quantities_are_invalid_requests() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::Pantry);
        let err = AddIngredientsTool::new()
            .call(json!({"ingredients": {"eggs": -2}}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidRequest(_)));

        let missing = TakeIngredientsTool::new().call(json!({}), &ctx).await;
        assert!(matches!(missing, Err(ToolError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn pantry_listing_joins_the_food_catalog() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pantry.json", json!({"1": 2.5, "99": 1}));
        write(
            &dir,
            "food.json",
            json!({"foods": {"1": {"id": 1, "name": "Tomato"}, "2": {"id": 2, "name": "Onion"}}}),
        );
        let ctx = context(&dir, ServerKind::Pantry);

        let listing = ListPantryTool::new().call(json!({}), &ctx).await.unwrap();
        assert_eq!(
            listing["items"],
            json!([
                {"id": "1", "name": "Tomato", "quantity": 2.5},
                {"id": "2", "name": "Onion", "quantity": 0},
                {"id": "99", "name": "Unknown (ID 99)", "quantity": 1}
            ])
        );

        let foods = ListFoodsTool::new()
            .call(json!({"query": "oni"}), &ctx)
            .await
            .unwrap();
        assert_eq!(foods["count"], json!(1));
    }

    #[tokio::test]
    async fn matches_names_to_existing_keys() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pantry.json", json!({"tomatoes": 1, "feta_cheese": 2}));
        let ctx = context(&dir, ServerKind::Pantry);

        let result = MatchIngredientsTool::new()
            .call(json!({"names": ["Tomato", "feta", "dragonfruit"]}), &ctx)
            .await
            .unwrap();
        assert_eq!(
            result["matches"],
            json!({"Tomato": "tomatoes", "feta": "feta_cheese", "dragonfruit": null})
        );
    }
}
