//! Recipe book for the chef.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Empty, parse_args};
use crate::tools::{Tool, ToolContext, ToolDefinition, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
struct GetRecipeArgs {
    /// Recipe id from list_recipes, e.g. "recipe_001".
    recipe_id: String,
}

#[derive(Debug, Default)]
pub struct ListRecipesTool;

impl ListRecipesTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListRecipesTool {
    fn name(&self) -> &str {
        "list_recipes"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<Empty>(
            self.name(),
            "List all available recipes with their ids and names.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let _: Empty = parse_args(args)?;
        Ok(serde_json::to_value(context.kitchen().recipes.summaries())?)
    }
}

#[derive(Debug, Default)]
pub struct GetRecipeTool;

impl GetRecipeTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for GetRecipeTool {
    fn name(&self) -> &str {
        "get_recipe"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<GetRecipeArgs>(
            self.name(),
            "Get a complete recipe: serving size, times, ingredients with amounts, steps, \
             nutrition and health rating.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: GetRecipeArgs = parse_args(args)?;
        match context.kitchen().recipes.by_id(&args.recipe_id) {
            Some(recipe) => Ok(serde_json::to_value(recipe)?),
            None => Ok(json!({
                "success": false,
                "message": format!("Recipe with ID '{}' not found", args.recipe_id),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::ServerKind;
    use crate::tools::builtins::test_support::{context, write};
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_and_fetches_recipes() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "recipes.json",
            json!({"recipes": [
                {"id": "recipe_006", "name": "Avocado Toast", "ingredients": ["2 slices bread", "1 avocado"], "steps": ["Toast", "Spread"]},
                {"id": "recipe_008", "name": "Pancakes"}
            ]}),
        );
        let ctx = context(&dir, ServerKind::Recipes);

        let listed = ListRecipesTool::new().call(json!({}), &ctx).await.unwrap();
        assert_eq!(
            listed,
            json!([
                {"id": "recipe_006", "name": "Avocado Toast"},
                {"id": "recipe_008", "name": "Pancakes"}
            ])
        );

        let toast = GetRecipeTool::new()
            .call(json!({"recipe_id": "recipe_006"}), &ctx)
            .await
            .unwrap();
        assert_eq!(toast["steps"], json!(["Toast", "Spread"]));

        let missing = GetRecipeTool::new()
            .call(json!({"recipe_id": "recipe_404"}), &ctx)
            .await
            .unwrap();
        assert_eq!(missing["success"], json!(false));
    }

    #[tokio::test]
    async fn missing_catalog_is_empty() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::Recipes);
        let listed = ListRecipesTool::new().call(json!({}), &ctx).await.unwrap();
        assert_eq!(listed, json!([]));
    }
}
