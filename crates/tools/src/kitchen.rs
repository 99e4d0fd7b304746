//! Per-process bundle of ledgers and catalogs, and the server groupings.

use orderup_ledger::{
    CustomerOrders, FoodCatalog, InventoryLedger, KitchenOrders, MenuCatalog, Quantity,
    RecipeCatalog,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::tools::ToolRegistry;
use crate::tools::builtins;

/// One tool server. Each kind runs as its own process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerKind {
    Pantry,
    Orders,
    OrderUp,
    Menu,
    Recipes,
}

impl ServerKind {
    pub const ALL: [ServerKind; 5] = [
        ServerKind::Pantry,
        ServerKind::Orders,
        ServerKind::OrderUp,
        ServerKind::Menu,
        ServerKind::Recipes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServerKind::Pantry => "pantry",
            ServerKind::Orders => "orders",
            ServerKind::OrderUp => "order-up",
            ServerKind::Menu => "menu",
            ServerKind::Recipes => "recipes",
        }
    }

    /// Registry holding exactly this server's tools.
    pub fn registry(self) -> ToolRegistry {
        builtins::tools_for(self).into_iter().collect()
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ServerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = ServerKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown server '{s}', expected one of: {}", known.join(", "))
            })
    }
}

/// Ledgers and catalogs a server process works against.
///
/// Ledgers are handles onto files and hold no state of their own. Catalogs are
/// read here, once, and only for the server kinds that consult them.
pub struct Kitchen {
    pub pantry: InventoryLedger,
    pub orders: CustomerOrders,
    pub chef_orders: KitchenOrders,
    pub foods: FoodCatalog,
    pub menu: MenuCatalog,
    pub recipes: RecipeCatalog,
    pub low_stock_threshold: Quantity,
}

impl Kitchen {
    pub fn open(config: &Config, kind: ServerKind) -> Self {
        let files = &config.files;
        let path = |name: &str| config.data_path(name);

        let foods = match kind {
            ServerKind::Pantry => FoodCatalog::load(&path(&files.foods)),
            _ => FoodCatalog::default(),
        };
        let menu = match kind {
            ServerKind::Menu => MenuCatalog::load(&path(&files.menu)),
            _ => MenuCatalog::default(),
        };
        let recipes = match kind {
            ServerKind::Recipes => RecipeCatalog::load(&path(&files.recipes)),
            _ => RecipeCatalog::default(),
        };

        tracing::debug!(server = %kind, data_dir = %config.data_dir.display(), lock_mode = ?config.lock_mode, "opening kitchen");

        Self {
            pantry: InventoryLedger::open(path(&files.pantry), config.lock_mode),
            orders: CustomerOrders::open(path(&files.orders), config.lock_mode),
            chef_orders: KitchenOrders::open(path(&files.chef_orders), config.lock_mode),
            foods,
            menu,
            recipes,
            low_stock_threshold: Quantity::new(config.low_stock_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_names() {
        assert_eq!("order-up".parse::<ServerKind>().unwrap(), ServerKind::OrderUp);
        assert_eq!("ORDER_UP".parse::<ServerKind>().unwrap(), ServerKind::OrderUp);
        assert!("waiter".parse::<ServerKind>().is_err());
    }

    #[test]
    fn every_kind_has_tools_with_unique_names() {
        for kind in ServerKind::ALL {
            let registry = kind.registry();
            let mut names = registry.names();
            assert!(!names.is_empty(), "{kind} has no tools");
            names.sort();
            names.dedup();
            assert_eq!(names.len(), registry.len());
        }
    }
}
