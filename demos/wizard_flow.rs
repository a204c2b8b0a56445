//! Promotion wizard walkthrough: one shared store across three steps

use atomstore::{ProductPatch, PromotionState, RetailStore, SaveOutcome};

fn main() {
    println!("=== Promotion Wizard Flow ===\n");

    // One store per wizard session; steps share it by cloning the handle.
    let wizard = PromotionState::new();

    // Watch the product selection like a summary panel would
    let _sub = wizard.products.subscribe(|products| {
        println!("   [State] {} product(s) selected", products.len());
    });

    println!("Step 1: promotion details");
    let step1 = wizard.clone();
    step1.set_name("Summer Sale");

    println!("\nStep 2: pick products and discounts");
    let step2 = wizard.clone();
    step2.set_product(ProductPatch {
        id: "p1".into(),
        name: Some("Espresso Beans".into()),
        category: Some("Coffee".into()),
        discount_percent: Some(10.0),
    });
    step2.set_product(ProductPatch {
        id: "p2".into(),
        name: Some("Moka Pot".into()),
        discount_percent: Some(5.0),
        ..Default::default()
    });

    println!("   Revising p1 discount to 15%...");
    step2.set_product(ProductPatch {
        id: "p1".into(),
        discount_percent: Some(15.0),
        ..Default::default()
    });
    println!("   p1 discount is now {}%", wizard.product_discount("p1"));

    println!("\nStep 3: pick stores");
    let step3 = wizard.clone();
    step3.replace_stores(&[
        RetailStore {
            id: "s1".into(),
            name: "Downtown".into(),
            location_group: Some("Metro".into()),
        },
        RetailStore {
            id: "s2".into(),
            name: "Airport".into(),
            location_group: None,
        },
    ]);

    println!("\nBuilding the save payload...");
    let draft = wizard.draft("a01");
    match draft.validate() {
        Ok(()) => {
            let payload = serde_json::to_string_pretty(&draft).unwrap();
            println!("{payload}");
        }
        Err(err) => {
            println!("Draft rejected: {err}");
            return;
        }
    }

    // What the persistence layer would answer
    let reply = r#"{
        "success": true,
        "message": "Promotion created successfully!",
        "promotionId": "prm-001"
    }"#;
    let outcome: SaveOutcome = serde_json::from_str(reply).unwrap();
    println!(
        "\nSaved: {} (record {})",
        outcome.message,
        outcome.promotion_id.as_deref().unwrap_or("-")
    );
}
