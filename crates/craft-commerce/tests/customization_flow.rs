//! End-to-end flow: author a configuration, store and reload it, drive a
//! shopper session, and synthesize the total.

use craft_commerce::prelude::*;

fn vnd(amount: i64) -> Money {
    Money::new(amount, Currency::VND)
}

#[test]
fn authored_configuration_prices_a_shopper_session() {
    // An administrator configures a variant: bundled Lego pieces with a
    // tier above 5 units, a required Lego category capped at 2 picks, and
    // custom quantities between 1 and 10.
    let draft = ConfigurationDraft::new(VariantId::new("variant-1"))
        .add_item("Lego pieces", 2, true)
        .set_allow_custom_quantity(true)
        .set_max_custom_quantity(10)
        .add_variant_category_rule(CategoryId::new("lego"), "Lego", true, Some(2));
    let item_id = draft.system().items[0].id.clone();
    let draft = draft.add_price_rule(
        &item_id,
        RuleCondition::GreaterThan,
        5,
        None,
        vnd(1000),
        None,
    );

    // The configuration survives a store/reload round trip.
    let payload = draft.system().to_payload().unwrap();
    let config = ConfigurationSystem::from_payload(&payload).unwrap();
    assert_eq!(&config, draft.system());

    // Options authored separately.
    let options = OptionsDraft::new(VariantId::new("variant-1"))
        .add_option("Premium gift box", vnd(20000))
        .into_options();

    // The shopper picks a product, raises the item quantity, selects the
    // gift box, and continues.
    let mut session = SelectionOrchestrator::new(config.clone());
    session.toggle_category_product(&CategoryId::new("lego"), &ProductCustomId::new("pc-1"));
    session.set_pick_quantity(&CategoryId::new("lego"), &ProductCustomId::new("pc-1"), 2);
    session.set_custom_quantity(&item_id, 6);
    session.toggle_option(&options[0]);

    let outcome = session.continue_checkout(false).unwrap();
    assert_eq!(outcome, ContinueOutcome::Ready(Continuation::Cart));

    // Price it: base 100000 + tier 6x1000 + option 20000 + pick 2x15000.
    let mut catalog = CatalogSession::new();
    catalog.merge_price(&ProductCustomId::new("pc-1"), vnd(15000));

    let pricing = craft_commerce::pricing::compute_total(
        vnd(100000),
        session.config(),
        session.state(),
        catalog.price_lookup(),
    )
    .unwrap();

    assert_eq!(pricing.item_total.amount, 6000);
    assert_eq!(pricing.option_total.amount, 20000);
    assert_eq!(pricing.category_total.amount, 30000);
    assert_eq!(pricing.grand_total.amount, 156000);

    session.submit().unwrap();
    assert_eq!(session.phase(), SelectionPhase::Submitted);
}

#[test]
fn unmet_required_category_blocks_until_fixed() {
    let config = ConfigurationDraft::new(VariantId::new("variant-1"))
        .add_variant_category_rule(CategoryId::new("lego"), "Lego", true, None)
        .into_system();

    let mut session = SelectionOrchestrator::new(config);
    let outcome = session.continue_checkout(true).unwrap();
    let ContinueOutcome::Blocked(violations) = outcome else {
        panic!("expected a blocked session");
    };
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("Lego"));

    session.acknowledge().unwrap();
    session.toggle_category_product(&CategoryId::new("lego"), &ProductCustomId::new("pc-1"));

    let outcome = session.continue_checkout(true).unwrap();
    assert_eq!(
        outcome,
        ContinueOutcome::Ready(Continuation::BackgroundCustomization)
    );
}

#[test]
fn malformed_stored_payload_degrades_to_empty_screen() {
    let config = ConfigurationSystem::parse_or_default("{\"items\": \"oops\"}");
    assert!(config.is_empty());

    // The shopper can still continue straight through an empty screen.
    let mut session = SelectionOrchestrator::new(config);
    let outcome = session.continue_checkout(false).unwrap();
    assert_eq!(outcome, ContinueOutcome::Ready(Continuation::Cart));
}
