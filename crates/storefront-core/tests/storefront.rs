//! End-to-end checks across catalog, search, cart and checkout.

use std::sync::Arc;

use storefront_core::prelude::*;

fn product(id: &str, price_cents: i64, rating: f64) -> Product {
    Product {
        id: ProductId::new(id),
        slug: format!("item-{}", id),
        name: format!("Item {}", id),
        brand: "Acme".to_string(),
        description: String::new(),
        short_description: String::new(),
        images: Vec::new(),
        price: Money::new(price_cents, Currency::USD),
        original_price: None,
        category: "Misc".to_string(),
        category_slug: "misc".to_string(),
        rating,
        reviews: 0,
        in_stock: true,
        featured: false,
        specifications: Vec::new(),
    }
}

fn builtin() -> Catalog {
    Catalog::builtin().expect("bundled catalog parses")
}

#[test]
fn min_rating_with_price_sort() {
    let catalog = Catalog::new(
        vec![product("1", 10_000, 4.5), product("2", 5_000, 3.0)],
        vec![],
    )
    .unwrap();

    let spec = FilterSpec::new().with_min_rating(4.0);
    let results = apply(catalog.products(), &spec, SortKey::PriceLow);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id.as_str(), "1");
}

#[test]
fn default_spec_returns_catalog_unchanged() {
    let catalog = builtin();
    let results = apply(catalog.products(), &FilterSpec::default(), SortKey::Default);

    assert_eq!(results.len(), catalog.len());
    for (got, expected) in results.iter().zip(catalog.products()) {
        assert!(Arc::ptr_eq(got, expected));
    }
}

#[test]
fn every_result_satisfies_every_predicate() {
    let catalog = builtin();
    let specs = [
        FilterSpec::new().with_search("pro"),
        FilterSpec::new().with_category("audio").with_min_rating(4.5),
        FilterSpec::new().with_brand("Apple").with_price_range(
            Money::new(20_000, Currency::USD),
            Money::new(110_000, Currency::USD),
        ),
        FilterSpec::new().with_search("SONY").with_category("cameras"),
    ];

    for spec in &specs {
        for sort in SortKey::ALL {
            for p in apply(catalog.products(), spec, sort) {
                assert!(spec.matches(&p), "{} violates {:?}", p.slug, spec);
            }
        }
    }
}

#[test]
fn price_sorts_are_mirror_images_without_ties() {
    let catalog = builtin();
    let spec = FilterSpec::new().with_category("laptops");

    let low: Vec<_> = apply(catalog.products(), &spec, SortKey::PriceLow)
        .iter()
        .map(|p| p.id.clone())
        .collect();
    let mut high: Vec<_> = apply(catalog.products(), &spec, SortKey::PriceHigh)
        .iter()
        .map(|p| p.id.clone())
        .collect();
    high.reverse();

    assert!(!low.is_empty());
    assert_eq!(low, high);
}

#[test]
fn inverted_price_range_is_empty() {
    let catalog = builtin();
    let spec = FilterSpec::new().with_price_range(
        Money::new(50_000, Currency::USD),
        Money::new(10_000, Currency::USD),
    );
    assert!(apply(catalog.products(), &spec, SortKey::Default).is_empty());
}

#[test]
fn apply_is_repeatable() {
    let catalog = builtin();
    let spec = FilterSpec::new().with_search("a");
    let first = apply(catalog.products(), &spec, SortKey::Rating);
    let second = apply(catalog.products(), &spec, SortKey::Rating);
    assert_eq!(first, second);
}

#[test]
fn repeated_adds_aggregate() {
    let p = Arc::new(product("p", 1_000, 4.0));
    let mut cart = Cart::new(Currency::USD);

    cart.add_to_cart(&p, 2);
    cart.add_to_cart(&p, 3);

    assert_eq!(cart.total_items(), 5);
    assert_eq!(cart.len(), 1);
}

#[test]
fn zero_quantity_update_removes_line() {
    let p = Arc::new(product("p", 1_000, 4.0));
    let q = Arc::new(product("q", 500, 4.0));
    let mut cart = Cart::new(Currency::USD);
    cart.add_to_cart(&p, 2);
    cart.add_to_cart(&q, 1);

    cart.update_quantity(&p.id, 0);

    assert!(cart.get_item(&p.id).is_none());
    assert_eq!(cart.total_items(), 1);
}

#[test]
fn removing_unknown_id_changes_nothing() {
    let mut cart = Cart::new(Currency::USD);
    cart.add_to_cart(&Arc::new(product("p", 1_000, 4.0)), 2);
    let (len, items, price) = (cart.len(), cart.total_items(), cart.total_price());

    cart.remove_from_cart(&ProductId::new("ghost"));

    assert_eq!(cart.len(), len);
    assert_eq!(cart.total_items(), items);
    assert_eq!(cart.total_price(), price);
}

#[test]
fn totals_for_single_line() {
    let mut cart = Cart::new(Currency::USD);
    cart.add_to_cart(&Arc::new(product("p", 2_000, 4.0)), 3);

    assert_eq!(cart.total_price(), Money::new(6_000, Currency::USD));
    assert_eq!(cart.total_items(), 3);
}

#[test]
fn browse_add_and_check_out() {
    let catalog = builtin();
    let mut cart = Cart::new(catalog.currency());

    let phones = apply(
        catalog.products(),
        &FilterSpec::new().with_category("smartphones"),
        SortKey::PriceLow,
    );
    let cheapest = &phones[0];
    cart.add_to_cart(cheapest, 2);

    let detail = catalog.require_product("wh-1000xm5").unwrap();
    cart.add_to_cart(detail, 1);
    assert_eq!(cart.total_items(), 3);

    let mut form = CheckoutForm::new();
    form.set_field(FormField::FirstName, "Grace");
    form.set_field(FormField::LastName, "Hopper");
    form.set_field(FormField::Email, "grace@navy.mil");
    form.set_field(FormField::Phone, "2025550143");
    form.set_field(FormField::Address, "1 Compiler Rd");
    form.set_field(FormField::City, "Arlington");
    form.set_field(FormField::PostalCode, "22201");
    form.shipping_method = ShippingMethod::Express;

    let expected_subtotal = cart.total_price();
    let order = place_order(&mut cart, &form, &ShippingRates::default()).unwrap();

    assert!(cart.is_empty());
    assert_eq!(order.line_items.len(), 2);
    assert_eq!(order.subtotal, expected_subtotal);
    assert_eq!(
        order.grand_total.amount_cents,
        expected_subtotal.amount_cents + 1_500
    );
}
