use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::catalogs::dtos::ModelEntryDto;
use crate::modules::sheets::SheetStore;
use crate::shared::constants::{
    ACTIONS_TABLE, CLASSIFICATIONS_TABLE, DEFECT_TYPES_TABLE, MODEL_CATALOG_TABLE,
    PLACEHOLDER_OPTION, STATIONS_TABLE,
};

/// Header of every single-column option table
const OPTION_COLUMN: &str = "option";

/// Catalog names accepted in route paths, mapped to backing tables.
pub fn option_table(name: &str) -> Option<&'static str> {
    match name {
        "defects" => Some(DEFECT_TYPES_TABLE),
        "actions" => Some(ACTIONS_TABLE),
        "classifications" => Some(CLASSIFICATIONS_TABLE),
        "stations" => Some(STATIONS_TABLE),
        _ => None,
    }
}

/// Reference-catalog access: dropdown option lists and the model catalog.
///
/// Catalogs are flat lists with no foreign-key enforcement; a ticket may
/// keep referencing an option that was later removed.
pub struct CatalogService {
    store: Arc<dyn SheetStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Selectable values of an option table, placeholder first.
    pub async fn options(&self, table: &str) -> Vec<String> {
        let mut options = vec![PLACEHOLDER_OPTION.to_string()];
        for row in self.store.fetch_all(table).await {
            let value = row.get(OPTION_COLUMN).trim().to_string();
            if !value.is_empty() {
                options.push(value);
            }
        }
        options
    }

    /// All model-catalog entries.
    pub async fn model_catalog(&self) -> Vec<ModelEntryDto> {
        self.store
            .fetch_all(MODEL_CATALOG_TABLE)
            .await
            .iter()
            .filter_map(|row| {
                let model = row.get("model").trim().to_string();
                if model.is_empty() {
                    return None;
                }
                Some(ModelEntryDto {
                    model,
                    product: row.get("product").trim().to_string(),
                })
            })
            .collect()
    }

    /// Selectable model options, placeholder first.
    pub async fn model_options(&self) -> Vec<String> {
        let mut options = vec![PLACEHOLDER_OPTION.to_string()];
        options.extend(self.model_catalog().await.into_iter().map(|e| e.model));
        options
    }

    /// Product name derived from a model, `None` when the model is not in
    /// the catalog (or the catalog is unavailable).
    pub async fn product_for(&self, model: &str) -> Option<String> {
        self.model_catalog()
            .await
            .into_iter()
            .find(|e| e.model == model)
            .map(|e| e.product)
    }

    /// Full replace of an option table; blank entries are dropped first.
    pub async fn replace_options(&self, name: &str, options: Vec<String>) -> Result<()> {
        let table = option_table(name)
            .ok_or_else(|| AppError::NotFound(format!("Unknown catalog '{}'", name)))?;

        let rows: Vec<Vec<String>> = options
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .map(|o| vec![o])
            .collect();

        self.store
            .replace_all(table, vec![OPTION_COLUMN.to_string()], rows)
            .await?;
        tracing::info!("Catalog '{}' replaced", name);
        Ok(())
    }

    /// Full replace of the model catalog; entries without a model are
    /// dropped first.
    pub async fn replace_model_catalog(&self, entries: Vec<ModelEntryDto>) -> Result<()> {
        let rows: Vec<Vec<String>> = entries
            .into_iter()
            .filter(|e| !e.model.trim().is_empty())
            .map(|e| vec![e.model.trim().to_string(), e.product.trim().to_string()])
            .collect();

        self.store
            .replace_all(
                MODEL_CATALOG_TABLE,
                vec!["model".to_string(), "product".to_string()],
                rows,
            )
            .await?;
        tracing::info!("Model catalog replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::sheets::memory::MemorySheetStore;

    fn seeded() -> (Arc<MemorySheetStore>, CatalogService) {
        let store = Arc::new(MemorySheetStore::new());
        store.seed(
            MODEL_CATALOG_TABLE,
            &["model", "product"],
            vec![
                vec!["M1".into(), "Controller".into()],
                vec!["M2".into(), "Driver".into()],
            ],
        );
        store.seed(
            DEFECT_TYPES_TABLE,
            &["option"],
            vec![vec!["Electrical".into()], vec!["Mechanical".into()]],
        );
        let service = CatalogService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_options_prepends_placeholder() {
        let (_, svc) = seeded();
        let options = svc.options(DEFECT_TYPES_TABLE).await;
        assert_eq!(options[0], PLACEHOLDER_OPTION);
        assert_eq!(options[1..], ["Electrical", "Mechanical"]);
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let (_, svc) = seeded();
        assert_eq!(svc.product_for("M1").await.as_deref(), Some("Controller"));
        assert_eq!(svc.product_for("M9").await, None);
    }

    #[tokio::test]
    async fn test_options_empty_when_store_down() {
        let (store, svc) = seeded();
        store.set_unavailable(true);
        assert_eq!(svc.options(DEFECT_TYPES_TABLE).await.len(), 1); // placeholder only
        assert_eq!(svc.product_for("M1").await, None);
    }

    #[tokio::test]
    async fn test_replace_options_filters_blanks_and_rewrites() {
        let (store, svc) = seeded();
        svc.replace_options(
            "defects",
            vec!["Cosmetic".into(), "  ".into(), "Solder".into()],
        )
        .await
        .unwrap();
        assert_eq!(store.row_count(DEFECT_TYPES_TABLE), 2);
        assert_eq!(store.cell(DEFECT_TYPES_TABLE, 1, 0), "Cosmetic");
    }

    #[tokio::test]
    async fn test_replace_unknown_catalog_rejected() {
        let (_, svc) = seeded();
        assert!(svc.replace_options("users", vec![]).await.is_err());
    }
}
