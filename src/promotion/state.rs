use serde::{Deserialize, Serialize};

use crate::atom::{set_atom, Atom};
use crate::computed::Computed;
use crate::promotion::PromotionDraft;
use crate::state::define_state;

/// A product chosen for the promotion, with its discount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub discount_percent: f64,
}

/// Partial update for a product, keyed by `id`.
///
/// Absent fields leave the existing entry's fields untouched on merge; on
/// insert they materialize as defaults (empty name, no category, zero
/// discount).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub discount_percent: Option<f64>,
}

impl ProductPatch {
    fn merge_into(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = Some(category);
        }
        if let Some(discount) = self.discount_percent {
            product.discount_percent = discount;
        }
    }
}

impl From<ProductPatch> for Product {
    fn from(patch: ProductPatch) -> Self {
        Self {
            id: patch.id,
            name: patch.name.unwrap_or_default(),
            category: patch.category,
            discount_percent: patch.discount_percent.unwrap_or(0.0),
        }
    }
}

impl From<Product> for ProductPatch {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: Some(product.name),
            category: product.category,
            discount_percent: Some(product.discount_percent),
        }
    }
}

/// A retail store location chosen for the promotion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailStore {
    pub id: String,
    pub name: String,
    pub location_group: Option<String>,
}

/// Shared state for the promotion creation wizard.
///
/// One instance is constructed per wizard session and shared by cloning the
/// handle; clones alias the same atoms, so every step reads and writes the
/// same state. Atoms and the derived count are public for reading and
/// subscribing; writes go through the mutator methods, each of which does its
/// read-modify-write as one synchronous sequence ending in a single set.
///
/// # Examples
///
/// ```
/// use atomstore::{ProductPatch, PromotionState};
///
/// let state = PromotionState::new();
/// state.set_name("Summer Sale");
/// state.set_product(ProductPatch {
///     id: "p1".into(),
///     discount_percent: Some(10.0),
///     ..Default::default()
/// });
///
/// assert_eq!(state.product_count.get(), 1);
/// assert_eq!(state.product_discount("p1"), 10.0);
/// ```
#[derive(Clone)]
pub struct PromotionState {
    /// Promotion name.
    pub name: Atom<String>,
    /// Products chosen so far.
    pub products: Atom<Vec<Product>>,
    /// Retail stores chosen so far.
    pub stores: Atom<Vec<RetailStore>>,
    /// Number of chosen products, derived from `products`.
    pub product_count: Computed<usize>,
}

impl PromotionState {
    /// Build a fresh wizard store.
    pub fn new() -> Self {
        define_state(|state| {
            let name = state.atom(String::new());
            let products: Atom<Vec<Product>> = state.atom(Vec::new());
            let stores: Atom<Vec<RetailStore>> = state.atom(Vec::new());
            let product_count = state.computed({
                let products = products.clone();
                move || products.with(Vec::len)
            });

            PromotionState {
                name,
                products,
                stores,
                product_count,
            }
        })
    }

    /// Add or update a product.
    ///
    /// If an entry with the patch's id exists, the patch's present fields are
    /// merged onto it; otherwise a new entry is appended.
    pub fn set_product(&self, patch: ProductPatch) {
        let mut chosen = self.products.get();
        if let Some(existing) = chosen.iter_mut().find(|p| p.id == patch.id) {
            log::debug!("updating product {}", existing.id);
            patch.merge_into(existing);
        } else {
            log::debug!("adding product {}", patch.id);
            chosen.push(patch.into());
        }
        set_atom(Some(&self.products), chosen);
    }

    /// Remove the product with the given id; unknown ids are a no-op.
    pub fn remove_product(&self, id: &str) {
        let mut chosen = self.products.get();
        chosen.retain(|p| p.id != id);
        log::debug!("removed product {id}, {} remaining", chosen.len());
        set_atom(Some(&self.products), chosen);
    }

    /// Replace the whole product selection.
    ///
    /// The slice is copied in; the store keeps no aliasing to caller-owned
    /// storage.
    pub fn replace_products(&self, products: &[Product]) {
        set_atom(Some(&self.products), products.to_vec());
    }

    /// Whether a product with the given id is selected.
    pub fn is_product_selected(&self, id: &str) -> bool {
        self.products.with(|products| products.iter().any(|p| p.id == id))
    }

    /// Discount for the given product id, or 0 when it is not selected.
    pub fn product_discount(&self, id: &str) -> f64 {
        self.products.with(|products| {
            products
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.discount_percent)
                .unwrap_or(0.0)
        })
    }

    /// Replace the whole store selection, copying the slice in.
    pub fn replace_stores(&self, stores: &[RetailStore]) {
        set_atom(Some(&self.stores), stores.to_vec());
    }

    /// Set the promotion name.
    pub fn set_name(&self, name: impl Into<String>) {
        set_atom(Some(&self.name), name.into());
    }

    /// Snapshot the live state into a plain-data save payload.
    ///
    /// The draft owns its data; mutating the store afterwards does not change
    /// an already-taken draft.
    pub fn draft(&self, parent_id: impl Into<String>) -> PromotionDraft {
        PromotionDraft {
            name: self.name.get(),
            parent_id: parent_id.into(),
            products: self.products.get(),
            stores: self.stores.get(),
        }
    }
}

impl Default for PromotionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, discount: f64) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            category: None,
            discount_percent: discount,
        }
    }

    #[test]
    fn set_product_appends_then_merges() {
        let state = PromotionState::new();

        state.set_product(ProductPatch {
            id: "p1".into(),
            name: Some("Espresso Beans".into()),
            category: Some("Coffee".into()),
            discount_percent: Some(10.0),
        });
        assert_eq!(state.product_count.get(), 1);

        // Partial patch: only the discount changes, other fields survive.
        state.set_product(ProductPatch {
            id: "p1".into(),
            discount_percent: Some(15.0),
            ..Default::default()
        });

        let products = state.products.get();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Espresso Beans");
        assert_eq!(products[0].category.as_deref(), Some("Coffee"));
        assert_eq!(products[0].discount_percent, 15.0);
    }

    #[test]
    fn remove_product_is_exact_key_and_order_preserving() {
        let state = PromotionState::new();
        state.replace_products(&[
            product("p1", "One", 5.0),
            product("p2", "Two", 10.0),
            product("p3", "Three", 15.0),
        ]);

        state.remove_product("p4");
        assert_eq!(state.product_count.get(), 3);

        state.remove_product("p2");
        let ids: Vec<_> = state
            .products
            .with(|products| products.iter().map(|p| p.id.clone()).collect());
        assert_eq!(ids, ["p1", "p3"]);
    }

    #[test]
    fn replace_products_copies_the_input() {
        let state = PromotionState::new();

        let mut mine = vec![product("p1", "One", 5.0)];
        state.replace_products(&mine);

        mine[0].discount_percent = 99.0;
        mine.push(product("p2", "Two", 1.0));

        assert_eq!(state.product_count.get(), 1);
        assert_eq!(state.product_discount("p1"), 5.0);
    }

    #[test]
    fn full_record_converts_to_patch() {
        let state = PromotionState::new();
        state.set_product(ProductPatch::from(product("p9", "Nine", 7.0)));

        assert!(state.is_product_selected("p9"));
        assert_eq!(state.product_discount("p9"), 7.0);
        assert_eq!(state.products.get()[0].name, "Nine");
    }

    #[test]
    fn selection_queries() {
        let state = PromotionState::new();
        state.set_product(ProductPatch {
            id: "p1".into(),
            discount_percent: Some(12.5),
            ..Default::default()
        });

        assert!(state.is_product_selected("p1"));
        assert!(!state.is_product_selected("p2"));
        assert_eq!(state.product_discount("p1"), 12.5);
        assert_eq!(state.product_discount("p2"), 0.0);
    }

    #[test]
    fn count_follows_the_list_back_to_empty() {
        let state = PromotionState::new();
        assert_eq!(state.product_count.get(), 0);

        state.set_product(ProductPatch {
            id: "p1".into(),
            ..Default::default()
        });
        assert_eq!(state.product_count.get(), 1);

        state.remove_product("p1");
        assert_eq!(state.product_count.get(), 0);
    }

    #[test]
    fn clones_share_state_across_steps() {
        let wizard = PromotionState::new();
        let step1 = wizard.clone();
        let step3 = wizard.clone();

        step1.set_name("Back to School");
        step3.replace_stores(&[RetailStore {
            id: "s1".into(),
            name: "Downtown".into(),
            location_group: None,
        }]);

        assert_eq!(wizard.name.get(), "Back to School");
        assert_eq!(wizard.stores.with(Vec::len), 1);
    }

    #[test]
    fn name_changes_notify_subscribers() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let state = PromotionState::new();
        let notified = Arc::new(AtomicUsize::new(0));

        let _sub = state.name.subscribe({
            let notified = Arc::clone(&notified);
            move |_| {
                notified.fetch_add(1, Ordering::SeqCst);
            }
        });

        state.set_name("Clearance");
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert_eq!(state.name.get(), "Clearance");
    }
}
