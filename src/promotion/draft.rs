use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::promotion::{Product, RetailStore};

/// Plain-data save payload snapshotted from a [`PromotionState`].
///
/// This is the record handed to the persistence layer; the crate itself does
/// no I/O. Serialized keys follow the backend's camelCase wire.
///
/// [`PromotionState`]: crate::promotion::PromotionState
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionDraft {
    pub name: String,
    /// Id of the record the wizard was launched from.
    pub parent_id: String,
    pub products: Vec<Product>,
    pub stores: Vec<RetailStore>,
}

/// Why a draft is not ready to be saved.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DraftError {
    #[error("promotion name is required")]
    MissingName,
    #[error("at least one product must be selected")]
    NoProducts,
    #[error("discount for product `{0}` must be between 0 and 100")]
    InvalidDiscount(String),
    #[error("at least one store must be selected")]
    NoStores,
}

impl PromotionDraft {
    /// Check the draft against the wizard's step gates.
    ///
    /// A draft needs a non-empty name, at least one product with every
    /// discount within 0–100, and at least one store. The first failing gate
    /// is reported.
    pub fn validate(&self) -> Result<(), DraftError> {
        let result = self.check();
        if let Err(err) = &result {
            log::warn!("draft rejected: {err}");
        }
        result
    }

    fn check(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.products.is_empty() {
            return Err(DraftError::NoProducts);
        }
        if let Some(product) = self
            .products
            .iter()
            .find(|p| !(0.0..=100.0).contains(&p.discount_percent))
        {
            return Err(DraftError::InvalidDiscount(product.id.clone()));
        }
        if self.stores.is_empty() {
            return Err(DraftError::NoStores);
        }
        Ok(())
    }
}

/// Reply from the persistence layer after saving a draft.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
    /// Id of the newly created promotion record, when the save succeeded.
    pub promotion_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PromotionDraft {
        PromotionDraft {
            name: "Summer Sale".into(),
            parent_id: "a01".into(),
            products: vec![Product {
                id: "p1".into(),
                name: "Espresso Beans".into(),
                category: Some("Coffee".into()),
                discount_percent: 15.0,
            }],
            stores: vec![RetailStore {
                id: "s1".into(),
                name: "Downtown".into(),
                location_group: Some("Metro".into()),
            }],
        }
    }

    #[test]
    fn complete_draft_validates() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn each_gate_reports_its_error() {
        let mut missing_name = draft();
        missing_name.name = "  ".into();
        assert_eq!(missing_name.validate(), Err(DraftError::MissingName));

        let mut no_products = draft();
        no_products.products.clear();
        assert_eq!(no_products.validate(), Err(DraftError::NoProducts));

        let mut bad_discount = draft();
        bad_discount.products[0].discount_percent = 120.0;
        assert_eq!(
            bad_discount.validate(),
            Err(DraftError::InvalidDiscount("p1".into()))
        );

        let mut no_stores = draft();
        no_stores.stores.clear();
        assert_eq!(no_stores.validate(), Err(DraftError::NoStores));
    }

    #[test]
    fn serializes_with_backend_keys() {
        let json = serde_json::to_value(draft()).unwrap();

        assert_eq!(json["parentId"], "a01");
        assert_eq!(json["products"][0]["discountPercent"], 15.0);
        assert_eq!(json["stores"][0]["locationGroup"], "Metro");
    }

    #[test]
    fn draft_round_trips() {
        let original = draft();
        let json = serde_json::to_string(&original).unwrap();
        let back: PromotionDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn parses_save_reply() {
        let reply = r#"{
            "success": true,
            "message": "Promotion created successfully!",
            "promotionId": "prm-001"
        }"#;

        let outcome: SaveOutcome = serde_json::from_str(reply).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.promotion_id.as_deref(), Some("prm-001"));
    }
}
