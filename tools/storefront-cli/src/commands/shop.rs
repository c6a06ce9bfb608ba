//! Interactive shopping session.
//!
//! A session keeps one filter, one cart and one checkout form alive across
//! commands. Commands come from a prompt, or from a script file with one
//! command per line (`#` starts a comment).

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context as _, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use storefront_core::prelude::*;
use tracing::{debug, info};

use super::browse::{print_listing, show_product};
use super::ShopArgs;
use crate::context::Context;
use crate::output::money;

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    match args.script {
        Some(path) => {
            let path = ctx.cwd.join(path);
            let script = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read script: {}", path.display()))?;
            let mut session = Session::new(ctx, false);
            session.run_script(&script).await
        }
        None => {
            let mut session = Session::new(ctx, true);
            session.run_interactive().await
        }
    }
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopCommand {
    List,
    Search(String),
    Category(String),
    Brand(String),
    Price { min: f64, max: f64 },
    Rating(f64),
    Sort(SortKey),
    Reset,
    View(String),
    Add { slug: String, quantity: i64 },
    Remove(String),
    Quantity { slug: String, quantity: i64 },
    Cart,
    Clear,
    Form { field: FormField, value: String },
    Ship(ShippingMethod),
    Pay(PaymentMethod),
    Checkout,
    Help,
    Quit,
}

impl FromStr for ShopCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" => ShopCommand::List,
            "search" => ShopCommand::Search(rest.to_string()),
            "category" => ShopCommand::Category(required(rest, "category <slug|all>")?),
            "brand" => ShopCommand::Brand(required(rest, "brand <name|all>")?),
            "price" => match args.as_slice() {
                [min, max] => ShopCommand::Price {
                    min: number(min)?,
                    max: number(max)?,
                },
                _ => return Err("usage: price <min> <max>".to_string()),
            },
            "rating" => match args.as_slice() {
                [value] => ShopCommand::Rating(number(value)?),
                _ => return Err("usage: rating <0-5>".to_string()),
            },
            "sort" => ShopCommand::Sort(required(rest, "sort <key>")?.parse()?),
            "reset" => ShopCommand::Reset,
            "view" | "show" => ShopCommand::View(required(rest, "view <slug>")?),
            "add" => match args.as_slice() {
                [slug] => ShopCommand::Add {
                    slug: slug.to_string(),
                    quantity: 1,
                },
                [slug, qty] => ShopCommand::Add {
                    slug: slug.to_string(),
                    quantity: quantity(qty)?,
                },
                _ => return Err("usage: add <slug> [quantity]".to_string()),
            },
            "remove" | "rm" => ShopCommand::Remove(required(rest, "remove <slug>")?),
            "qty" | "quantity" => match args.as_slice() {
                [slug, qty] => ShopCommand::Quantity {
                    slug: slug.to_string(),
                    quantity: quantity(qty)?,
                },
                _ => return Err("usage: qty <slug> <quantity>".to_string()),
            },
            "cart" => ShopCommand::Cart,
            "clear" => ShopCommand::Clear,
            "form" => {
                let (name, value) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                ShopCommand::Form {
                    field: form_field(name)?,
                    value: value.trim().to_string(),
                }
            }
            "ship" => ShopCommand::Ship(required(rest, "ship <standard|express>")?.parse()?),
            "pay" => ShopCommand::Pay(required(rest, "pay <credit|debit|cod>")?.parse()?),
            "checkout" => ShopCommand::Checkout,
            "help" | "?" => ShopCommand::Help,
            "quit" | "exit" | "q" => ShopCommand::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command: {} (try 'help')", other)),
        };

        Ok(command)
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(rest.to_string())
    }
}

fn number(s: &str) -> Result<f64, String> {
    s.parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or_else(|| format!("not a number: {}", s))
}

fn quantity(s: &str) -> Result<i64, String> {
    s.parse().map_err(|_| format!("not a whole number: {}", s))
}

/// Accepts `postalCode`, `postal_code`, `postal-code` and the like.
fn form_field(name: &str) -> Result<FormField, String> {
    let wanted: String = name
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();
    FormField::ALL
        .into_iter()
        .find(|f| f.as_str().to_lowercase() == wanted)
        .ok_or_else(|| {
            let names: Vec<_> = FormField::ALL.iter().map(|f| f.as_str()).collect();
            format!("unknown field: {} (one of {})", name, names.join(", "))
        })
}

const HELP: &[(&str, &str)] = &[
    ("list", "show products matching the current filters"),
    ("search <text>", "match name, description or brand (empty clears)"),
    ("category <slug|all>", "restrict to one category"),
    ("brand <name|all>", "restrict to one brand"),
    ("price <min> <max>", "inclusive price range"),
    ("rating <0-5>", "minimum rating, 0 turns it off"),
    ("sort <key>", "default, price-low, price-high, rating, newest"),
    ("reset", "clear every filter"),
    ("view <slug>", "product details"),
    ("add <slug> [qty]", "add to cart"),
    ("remove <slug>", "remove from cart"),
    ("qty <slug> <n>", "set quantity, 0 removes"),
    ("cart", "show cart and totals"),
    ("clear", "empty the cart"),
    ("form <field> <value>", "fill a checkout field"),
    ("ship <method>", "standard or express"),
    ("pay <method>", "credit, debit or cod"),
    ("checkout", "place the order"),
    ("quit", "leave the shop"),
];

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State carried between commands.
pub struct Session<'a> {
    ctx: &'a Context,
    spec: FilterSpec,
    sort: SortKey,
    cart: Cart,
    form: CheckoutForm,
    rates: ShippingRates,
    interactive: bool,
    orders: Vec<Order>,
}

impl<'a> Session<'a> {
    pub fn new(ctx: &'a Context, interactive: bool) -> Self {
        Self {
            ctx,
            spec: FilterSpec::for_currency(ctx.catalog.currency()),
            sort: SortKey::Default,
            cart: Cart::new(ctx.catalog.currency()),
            form: CheckoutForm::new(),
            rates: ctx.shipping_rates(),
            interactive,
            orders: Vec::new(),
        }
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        self.ctx.output.header(&format!("Welcome to {}", self.ctx.config.store.name));
        self.ctx.output.info("Type 'help' for commands.");

        loop {
            let prompt = format!("shop [{} in cart]", self.cart.total_items());
            let line: String = Input::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            if line.trim().is_empty() {
                continue;
            }
            if self.dispatch(&line).await? == Flow::Quit {
                break;
            }
        }
        self.farewell();
        Ok(())
    }

    async fn run_script(&mut self, script: &str) -> Result<()> {
        for line in script.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.ctx.output.line(&format!("{} {}", style(">").dim(), line));
            if self.dispatch(line).await? == Flow::Quit {
                break;
            }
        }
        self.farewell();
        Ok(())
    }

    fn farewell(&self) {
        match self.orders.len() {
            0 => self.ctx.output.info("Goodbye"),
            1 => self.ctx.output.info("Goodbye. You placed 1 order."),
            n => self.ctx.output.info(&format!("Goodbye. You placed {} orders.", n)),
        }
    }

    /// Parse and run one line. Parse failures are reported, not returned.
    async fn dispatch(&mut self, line: &str) -> Result<Flow> {
        match line.parse::<ShopCommand>() {
            Ok(command) => self.execute(command).await,
            Err(e) => {
                self.ctx.output.warn(&e);
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn execute(&mut self, command: ShopCommand) -> Result<Flow> {
        debug!(?command, "shop command");
        let currency = self.ctx.catalog.currency();

        match command {
            ShopCommand::List => self.list(),
            ShopCommand::Search(text) => {
                self.update_filter(|spec| spec.with_search(text));
            }
            ShopCommand::Category(slug) => {
                if slug != "all" && self.ctx.catalog.category_by_slug(&slug).is_none() {
                    self.ctx.output.warn(&format!("Unknown category: {}", slug));
                } else {
                    self.update_filter(|spec| spec.with_category(slug));
                }
            }
            ShopCommand::Brand(brand) => {
                if brand != "all" && !self.ctx.catalog.brands().contains(&brand) {
                    self.ctx.output.warn(&format!("Unknown brand: {}", brand));
                } else {
                    self.update_filter(|spec| spec.with_brand(brand));
                }
            }
            ShopCommand::Price { min, max } => {
                self.update_filter(|spec| {
                    spec.with_price_range(
                        Money::from_decimal(min, currency),
                        Money::from_decimal(max, currency),
                    )
                });
            }
            ShopCommand::Rating(rating) => {
                self.update_filter(|spec| spec.with_min_rating(rating));
            }
            ShopCommand::Sort(sort) => {
                self.sort = sort;
                self.list();
            }
            ShopCommand::Reset => {
                self.spec.reset();
                self.sort = SortKey::Default;
                self.list();
            }
            ShopCommand::View(slug) => match self.ctx.catalog.product_by_slug(&slug) {
                Some(product) => {
                    show_product(self.ctx, product);
                    let related = self
                        .ctx
                        .catalog
                        .related(product, self.ctx.config.listing.related_limit);
                    if !related.is_empty() {
                        self.ctx.output.header("You may also like");
                        self.ctx.output.product_table(&related);
                    }
                }
                None => self.ctx.output.warn(&format!("No product '{}'", slug)),
            },
            ShopCommand::Add { slug, quantity } => {
                let Some(product) = self.ctx.catalog.product_by_slug(&slug) else {
                    self.ctx.output.warn(&format!("No product '{}'", slug));
                    return Ok(Flow::Continue);
                };
                if !product.in_stock {
                    self.ctx
                        .output
                        .warn(&format!("{} is out of stock", product.name));
                } else if self.cart.add_to_cart(product, quantity) {
                    self.ctx
                        .output
                        .success(&format!("Added {} x {} to cart", quantity, product.name));
                } else if quantity < 1 {
                    self.ctx.output.warn("Quantity must be at least 1");
                } else {
                    self.ctx.output.warn("Quantity is too large");
                }
            }
            ShopCommand::Remove(slug) => {
                let removed = self
                    .ctx
                    .catalog
                    .product_by_slug(&slug)
                    .map_or(false, |p| self.cart.remove_from_cart(&p.id));
                if removed {
                    self.ctx.output.success(&format!("Removed {}", slug));
                } else {
                    self.ctx.output.warn(&format!("'{}' is not in the cart", slug));
                }
            }
            ShopCommand::Quantity { slug, quantity } => {
                let Some(product) = self
                    .ctx
                    .catalog
                    .product_by_slug(&slug)
                    .filter(|p| self.cart.contains(&p.id))
                else {
                    self.ctx.output.warn(&format!("'{}' is not in the cart", slug));
                    return Ok(Flow::Continue);
                };
                if self.cart.update_quantity(&product.id, quantity) {
                    self.show_cart();
                } else {
                    self.ctx.output.warn("Quantity is too large");
                }
            }
            ShopCommand::Cart => self.show_cart(),
            ShopCommand::Clear => {
                self.cart.clear_cart();
                self.ctx.output.success("Cart cleared");
            }
            ShopCommand::Form { field, value } => {
                self.form.set_field(field, value);
                if let Some(message) = field_error(&self.form, field) {
                    self.ctx.output.warn(&format!("{}: {}", field.label(), message));
                }
            }
            ShopCommand::Ship(method) => {
                self.form.shipping_method = method;
                self.ctx.output.success(&format!(
                    "Shipping: {} ({}, {})",
                    method.display_name(),
                    method.delivery_estimate(),
                    self.rates.label(method)
                ));
            }
            ShopCommand::Pay(method) => {
                self.form.payment_method = method;
                self.ctx
                    .output
                    .success(&format!("Payment: {}", method.display_name()));
            }
            ShopCommand::Checkout => self.checkout().await?,
            ShopCommand::Help => {
                self.ctx.output.header("Commands");
                for (usage, description) in HELP {
                    self.ctx.output.kv(usage, description);
                }
            }
            ShopCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn update_filter(&mut self, change: impl FnOnce(FilterSpec) -> FilterSpec) {
        self.spec = change(std::mem::take(&mut self.spec));
        self.list();
    }

    fn list(&self) {
        let results = apply(self.ctx.catalog.products(), &self.spec, self.sort);
        if self.ctx.output.is_json() {
            self.ctx.output.json(&results);
        } else {
            print_listing(self.ctx, &results, self.sort);
        }
    }

    fn show_cart(&self) {
        let pricing = self
            .cart
            .pricing(self.rates.rate(self.form.shipping_method));

        if self.ctx.output.is_json() {
            self.ctx.output.json(&pricing);
            return;
        }

        if self.cart.is_empty() {
            self.ctx.output.info("Your cart is empty");
            return;
        }

        self.ctx
            .output
            .header(&format!("Cart ({} items)", self.cart.total_items()));
        const WIDTHS: [usize; 4] = [30, 5, 12, 12];
        self.ctx.output.table_row(&["ITEM", "QTY", "PRICE", "TOTAL"], &WIDTHS);
        for item in self.cart.items() {
            let quantity = item.quantity.to_string();
            let unit = item.product.price.display();
            let total = item.line_total().display();
            self.ctx.output.table_row(
                &[item.product.name.as_str(), quantity.as_str(), unit.as_str(), total.as_str()],
                &WIDTHS,
            );
        }

        self.ctx.output.line("");
        self.ctx.output.kv("subtotal", &money(pricing.subtotal));
        self.ctx.output.kv(
            "shipping",
            &format!(
                "{} ({})",
                self.rates.label(self.form.shipping_method),
                self.form.shipping_method.display_name()
            ),
        );
        self.ctx.output.kv("total", &money(pricing.grand_total));
    }

    async fn checkout(&mut self) -> Result<()> {
        if self.cart.is_empty() {
            self.ctx.output.warn("Your cart is empty");
            return Ok(());
        }

        if self.interactive {
            self.complete_form()?;
            self.show_cart();
            let total = self
                .cart
                .pricing(self.rates.rate(self.form.shipping_method))
                .grand_total;
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Place order for {}?", total.display()))
                .default(true)
                .interact()?;
            if !confirmed {
                self.ctx.output.info("Checkout cancelled");
                return Ok(());
            }
        } else if let Err(errors) = self.form.validate() {
            self.report(&errors);
            return Ok(());
        }

        let spinner = self.ctx.output.spinner("Processing order...");
        tokio::time::sleep(Duration::from_millis(
            self.ctx.config.checkout.simulated_delay_ms,
        ))
        .await;
        let result = place_order(&mut self.cart, &self.form, &self.rates);
        spinner.finish_and_clear();

        match result {
            Ok(order) => {
                info!(order_number = %order.order_number, "checkout complete");
                self.confirm(&order);
                self.orders.push(order);
            }
            Err(CommerceError::Validation(errors)) => self.report(&errors),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Prompt for every field that fails validation, then shipping and payment.
    fn complete_form(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();

        for field in FormField::ALL {
            if field_error(&self.form, field).is_none() {
                continue;
            }
            let form = self.form.clone();
            let value: String = Input::with_theme(&theme)
                .with_prompt(field.label())
                .with_initial_text(self.form.field(field).to_string())
                .validate_with(move |input: &String| -> Result<(), String> {
                    let mut candidate = form.clone();
                    candidate.set_field(field, input.as_str());
                    field_error(&candidate, field).map_or(Ok(()), Err)
                })
                .interact_text()?;
            self.form.set_field(field, value);
        }

        let labels: Vec<String> = ShippingMethod::ALL
            .iter()
            .map(|m| {
                format!(
                    "{} ({}) - {}",
                    m.display_name(),
                    m.delivery_estimate(),
                    self.rates.label(*m)
                )
            })
            .collect();
        let current = ShippingMethod::ALL
            .iter()
            .position(|m| *m == self.form.shipping_method)
            .unwrap_or(0);
        let choice = Select::with_theme(&theme)
            .with_prompt("Shipping method")
            .items(&labels)
            .default(current)
            .interact()?;
        self.form.shipping_method = ShippingMethod::ALL[choice];

        let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.display_name()).collect();
        let current = PaymentMethod::ALL
            .iter()
            .position(|m| *m == self.form.payment_method)
            .unwrap_or(0);
        let choice = Select::with_theme(&theme)
            .with_prompt("Payment method")
            .items(&labels)
            .default(current)
            .interact()?;
        self.form.payment_method = PaymentMethod::ALL[choice];

        Ok(())
    }

    fn report(&self, errors: &ValidationErrors) {
        if self.ctx.output.is_json() {
            self.ctx.output.json(errors);
            return;
        }
        self.ctx.output.warn("Please fix the checkout form:");
        for error in &errors.errors {
            self.ctx
                .output
                .kv(error.field.label(), &style(&error.message).red().to_string());
        }
    }

    fn confirm(&self, order: &Order) {
        if self.ctx.output.is_json() {
            self.ctx.output.json(order);
            return;
        }

        self.ctx.output.success("Order placed. Thank you for your purchase!");
        self.ctx.output.header(&format!("Order {}", order.order_number));
        self.ctx.output.kv("customer", &order.customer_name);
        self.ctx.output.kv("email", &order.email);
        self.ctx.output.kv("ship to", &order.shipping_address);
        self.ctx.output.kv(
            "shipping",
            &format!(
                "{} ({})",
                order.shipping_method.display_name(),
                order.shipping_method.delivery_estimate()
            ),
        );
        self.ctx
            .output
            .kv("payment", order.payment_method.display_name());
        for line in &order.line_items {
            self.ctx.output.list_item(&format!(
                "{} x {} = {}",
                line.quantity,
                line.product_name,
                line.total.display()
            ));
        }
        self.ctx.output.kv("subtotal", &money(order.subtotal));
        self.ctx.output.kv("shipping", &money(order.shipping_total));
        self.ctx.output.kv("total", &money(order.grand_total));
    }
}

/// Validation message for one field of the form, if any.
fn field_error(form: &CheckoutForm, field: FormField) -> Option<String> {
    form.validate()
        .err()
        .and_then(|errors| errors.get(field).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::output::Output;

    fn context() -> Context {
        let mut config = StorefrontConfig::default();
        config.checkout.simulated_delay_ms = 0;
        Context {
            config,
            output: Output::new(false, false),
            cwd: std::env::temp_dir(),
            config_path: None,
            catalog: Catalog::builtin().unwrap(),
        }
    }

    fn parse(line: &str) -> ShopCommand {
        line.parse().unwrap()
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(parse("list"), ShopCommand::List);
        assert_eq!(parse("search  noise cancelling "), ShopCommand::Search("noise cancelling".into()));
        assert_eq!(parse("search"), ShopCommand::Search(String::new()));
        assert_eq!(parse("category audio"), ShopCommand::Category("audio".into()));
        assert_eq!(parse("price 10 99.5"), ShopCommand::Price { min: 10.0, max: 99.5 });
        assert_eq!(parse("rating 4"), ShopCommand::Rating(4.0));
        assert_eq!(parse("sort price-high"), ShopCommand::Sort(SortKey::PriceHigh));
        assert_eq!(parse("RESET"), ShopCommand::Reset);
    }

    #[test]
    fn test_parse_cart_and_checkout() {
        assert_eq!(
            parse("add pixel-8"),
            ShopCommand::Add { slug: "pixel-8".into(), quantity: 1 }
        );
        assert_eq!(
            parse("add pixel-8 3"),
            ShopCommand::Add { slug: "pixel-8".into(), quantity: 3 }
        );
        assert_eq!(
            parse("qty pixel-8 0"),
            ShopCommand::Quantity { slug: "pixel-8".into(), quantity: 0 }
        );
        assert_eq!(
            parse("form postal_code 12345"),
            ShopCommand::Form { field: FormField::PostalCode, value: "12345".into() }
        );
        assert_eq!(
            parse("form address 1 Main St"),
            ShopCommand::Form { field: FormField::Address, value: "1 Main St".into() }
        );
        assert_eq!(parse("ship express"), ShopCommand::Ship(ShippingMethod::Express));
        assert_eq!(parse("pay cod"), ShopCommand::Pay(PaymentMethod::CashOnDelivery));
        assert_eq!(parse("q"), ShopCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        for line in ["", "dance", "price 10", "rating high", "add", "add x two", "sort sideways", "form nickname Bob", "ship drone"] {
            assert!(line.parse::<ShopCommand>().is_err(), "{:?} should not parse", line);
        }
    }

    #[test]
    fn test_form_field_aliases() {
        assert_eq!(form_field("firstName"), Ok(FormField::FirstName));
        assert_eq!(form_field("first-name"), Ok(FormField::FirstName));
        assert_eq!(form_field("FIRST_NAME"), Ok(FormField::FirstName));
        assert!(form_field("nickname").is_err());
    }

    #[tokio::test]
    async fn test_filters_accumulate_until_reset() {
        let ctx = context();
        let mut session = Session::new(&ctx, false);

        session.execute(parse("category audio")).await.unwrap();
        session.execute(parse("rating 4.5")).await.unwrap();
        assert_eq!(session.spec.category_slug.as_deref(), Some("audio"));
        assert_eq!(session.spec.min_rating, 4.5);

        session.execute(parse("category nowhere")).await.unwrap();
        assert_eq!(session.spec.category_slug.as_deref(), Some("audio"));

        session.execute(parse("category all")).await.unwrap();
        assert_eq!(session.spec.category_slug, None);

        session.execute(parse("sort rating")).await.unwrap();
        session.execute(parse("reset")).await.unwrap();
        assert!(!session.spec.is_active());
        assert_eq!(session.sort, SortKey::Default);
    }

    #[tokio::test]
    async fn test_reset_keeps_catalog_currency() {
        let builtin = Catalog::builtin().unwrap();
        let euro: Vec<Product> = builtin
            .products()
            .iter()
            .map(|p| {
                let mut p = (**p).clone();
                p.price.currency = Currency::EUR;
                p.original_price = p.original_price.map(|m| Money::new(m.amount_cents, Currency::EUR));
                p
            })
            .collect();
        let mut ctx = context();
        ctx.catalog = Catalog::new(euro, builtin.categories().to_vec()).unwrap();
        let mut session = Session::new(&ctx, false);
        assert!(!session.spec.is_active());

        session.execute(parse("price 100 500")).await.unwrap();
        assert!(session.spec.is_active());
        assert_eq!(session.spec.price_max, Money::new(50_000, Currency::EUR));

        session.execute(parse("reset")).await.unwrap();
        assert!(!session.spec.is_active());
        assert_eq!(session.spec, FilterSpec::for_currency(Currency::EUR));
        assert_eq!(session.cart.currency(), Currency::EUR);
    }

    #[tokio::test]
    async fn test_cart_commands() {
        let ctx = context();
        let mut session = Session::new(&ctx, false);

        session.execute(parse("add pixel-8 2")).await.unwrap();
        session.execute(parse("add pixel-8")).await.unwrap();
        session.execute(parse("add airpods-pro-2 0")).await.unwrap();
        session.execute(parse("add no-such-thing")).await.unwrap();
        assert_eq!(session.cart.total_items(), 3);
        assert_eq!(session.cart.len(), 1);

        session.execute(parse("qty pixel-8 0")).await.unwrap();
        assert!(session.cart.is_empty());

        session.execute(parse("add magsafe-charger")).await.unwrap();
        session.execute(parse("clear")).await.unwrap();
        assert!(session.cart.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_stock_cannot_be_added() {
        let ctx = context();
        let mut session = Session::new(&ctx, false);
        assert!(!ctx.catalog.require_product("zenbook-14-oled").unwrap().in_stock);

        session.execute(parse("add zenbook-14-oled 2")).await.unwrap();
        assert!(session.cart.is_empty());

        session.execute(parse("add xps-14")).await.unwrap();
        assert_eq!(session.cart.total_items(), 1);
    }

    #[tokio::test]
    async fn test_huge_quantity_is_ignored() {
        let ctx = context();
        let mut session = Session::new(&ctx, false);

        session.execute(parse("add pixel-8 9223372036854775807")).await.unwrap();
        assert!(session.cart.is_empty());

        session.execute(parse("add pixel-8 2")).await.unwrap();
        session.execute(parse("qty pixel-8 9223372036854775807")).await.unwrap();
        assert_eq!(session.cart.total_items(), 2);
    }

    #[tokio::test]
    async fn test_invalid_form_keeps_cart() {
        let ctx = context();
        let mut session = Session::new(&ctx, false);

        session.execute(parse("add pixel-8")).await.unwrap();
        session.execute(parse("form email not-an-email")).await.unwrap();
        session.execute(parse("checkout")).await.unwrap();

        assert!(session.orders.is_empty());
        assert_eq!(session.cart.total_items(), 1);
    }

    #[tokio::test]
    async fn test_script_checkout() {
        let ctx = context();
        let mut session = Session::new(&ctx, false);
        let script = "\
# buy headphones with express shipping
add wh-1000xm5 2
form firstName Ada
form lastName Lovelace
form email ada@example.com
form phone 555-123-4567
form address 12 Analytical Way
form city London
form postalCode 12345
ship express
pay debit
checkout
quit
list
";
        session.run_script(script).await.unwrap();

        assert!(session.cart.is_empty());
        assert_eq!(session.orders.len(), 1);
        let order = &session.orders[0];
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.shipping_method, ShippingMethod::Express);
        assert_eq!(order.payment_method, PaymentMethod::Debit);
        assert_eq!(order.shipping_total.amount_cents, 1_500);
        assert_eq!(
            order.grand_total.amount_cents,
            order.subtotal.amount_cents + 1_500
        );
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart_places_nothing() {
        let ctx = context();
        let mut session = Session::new(&ctx, false);
        assert_eq!(session.execute(ShopCommand::Checkout).await.unwrap(), Flow::Continue);
        assert!(session.orders.is_empty());
        assert_eq!(session.execute(ShopCommand::Quit).await.unwrap(), Flow::Quit);
    }
}
