//! Interactive shopping session.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use techknot_shop::catalog::{Catalog, Category};
use techknot_shop::checkout::Checkout;
use techknot_shop::notify::NotificationQueue;
use techknot_shop::search::ProductFilter;
use techknot_shop::session::ShopSession;
use techknot_shop::{CommerceError, ProductId};

use super::catalog::print_products;
use super::quote::print_cart;
use super::ShopArgs;
use crate::context::Context;

type Session<'a> = ShopSession<'a, NotificationQueue>;

const ADJUSTMENTS: [&str; 3] = ["+ one more", "- one less", "Set quantity..."];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Browse,
    AddToCart,
    ChangeQuantity,
    Remove,
    ToggleWishlist,
    ViewWishlist,
    ViewCart,
    Checkout,
    Quit,
}

impl Action {
    const ALL: [Action; 9] = [
        Action::Browse,
        Action::AddToCart,
        Action::ChangeQuantity,
        Action::Remove,
        Action::ToggleWishlist,
        Action::ViewWishlist,
        Action::ViewCart,
        Action::Checkout,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::Browse => "Browse products",
            Action::AddToCart => "Add to cart",
            Action::ChangeQuantity => "Change quantity",
            Action::Remove => "Remove from cart",
            Action::ToggleWishlist => "Add/remove wishlist item",
            Action::ViewWishlist => "View wishlist",
            Action::ViewCart => "View cart",
            Action::Checkout => "Checkout",
            Action::Quit => "Quit",
        }
    }
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("`shop` is interactive and does not support --json");
    }

    let catalog = Catalog::iot_components();
    let checkout = ctx.checkout()?;
    let mut session = ShopSession::new(&catalog, &ctx.config.pricing, NotificationQueue::new());
    tracing::debug!(gateway = checkout.gateway_name(), "shop session started");

    for id in args.add {
        session.add_to_cart(id)?;
    }
    flush_notifications(ctx, &session);

    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    loop {
        let prompt = cart_summary(&session)?;
        let choice = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[choice] {
            Action::Browse => browse(ctx, &catalog)?,
            Action::AddToCart => {
                if let Some(id) = pick_product(&catalog, "Add which product?")? {
                    session.add_to_cart(id)?;
                }
            }
            Action::ChangeQuantity => change_quantity(ctx, &mut session)?,
            Action::Remove => {
                if let Some(id) = pick_line(ctx, &session, "Remove which item?")? {
                    session.remove_from_cart(id);
                }
            }
            Action::ToggleWishlist => {
                if let Some(id) = pick_product(&catalog, "Wishlist which product?")? {
                    session.toggle_wishlist(id)?;
                }
            }
            Action::ViewWishlist => view_wishlist(ctx, &session),
            Action::ViewCart => view_cart(ctx, &session)?,
            Action::Checkout => {
                flush_notifications(ctx, &session);
                run_checkout(ctx, &mut session, &checkout).await?;
            }
            Action::Quit => break,
        }

        flush_notifications(ctx, &session);
    }

    if !session.ledger().is_empty() {
        ctx.output.info(&format!(
            "Left {} item(s) in the cart; carts are not saved between sessions",
            session.ledger().item_count()
        ));
    }

    Ok(())
}

fn flush_notifications(ctx: &Context, session: &Session<'_>) {
    for note in session.notifier().drain() {
        ctx.output.notification(&note);
    }
}

fn cart_summary(session: &Session<'_>) -> Result<String> {
    let totals = session.totals()?;
    Ok(format!(
        "Cart: {} item(s), {} | Wishlist: {}",
        totals.item_count,
        totals.total,
        session.wishlist().len()
    ))
}

fn browse(ctx: &Context, catalog: &Catalog) -> Result<()> {
    let mut tabs = vec!["All".to_string()];
    tabs.extend(catalog.categories().iter().map(|c| c.to_string()));

    let tab = Select::new()
        .with_prompt("Category")
        .items(&tabs)
        .default(0)
        .interact()?;
    let category = if tab == 0 {
        None
    } else {
        Category::from_name(&tabs[tab])
    };

    let query: String = Input::new()
        .with_prompt("Search (blank for none)")
        .allow_empty(true)
        .interact_text()?;

    let filter = ProductFilter::new().category(category).text(query);
    let products = catalog.search(&filter);
    if products.is_empty() {
        ctx.output.info("No products found");
    } else {
        ctx.output.header(&format!("Products ({})", products.len()));
        print_products(&ctx.output, &products);
    }
    Ok(())
}

fn pick_product(catalog: &Catalog, prompt: &str) -> Result<Option<ProductId>> {
    let items: Vec<String> = catalog
        .products()
        .iter()
        .map(|p| format!("{} ({})", p.name, p.price))
        .collect();

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| catalog.products()[i].id))
}

fn pick_line(ctx: &Context, session: &Session<'_>, prompt: &str) -> Result<Option<ProductId>> {
    let lines = session.ledger().lines();
    if lines.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(None);
    }

    let items: Vec<String> = lines
        .iter()
        .map(|l| format!("{} x{}", l.name, l.quantity))
        .collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| lines[i].product_id))
}

fn change_quantity(ctx: &Context, session: &mut Session<'_>) -> Result<()> {
    let Some(id) = pick_line(ctx, session, "Change which item?")? else {
        return Ok(());
    };

    let choice = Select::new()
        .with_prompt("Adjust")
        .items(&ADJUSTMENTS[..])
        .default(0)
        .interact()?;

    match choice {
        0 => {
            session.increment(id)?;
        }
        1 => {
            session.decrement(id)?;
        }
        _ => {
            let current = session.ledger().get(id).map_or(1, |l| l.quantity);
            let quantity: u32 = Input::new()
                .with_prompt("Quantity")
                .default(current)
                .interact_text()?;
            session.set_quantity(id, quantity);
        }
    }
    Ok(())
}

fn view_wishlist(ctx: &Context, session: &Session<'_>) {
    if session.wishlist().is_empty() {
        ctx.output.info("Your wishlist is empty");
        return;
    }
    ctx.output.header("Wishlist");
    for id in session.wishlist().ids() {
        if let Some(product) = session.catalog().get(*id) {
            ctx.output.list_item(&format!("{} ({})", product.name, product.price));
        }
    }
}

fn view_cart(ctx: &Context, session: &Session<'_>) -> Result<()> {
    let totals = session.totals()?;
    ctx.output.header("Cart");
    print_cart(&ctx.output, session.ledger(), &totals);
    if !totals.is_empty() {
        ctx.output.totals(&totals, ctx.config.pricing.tax_rate_percent());
    }
    Ok(())
}

async fn run_checkout(ctx: &Context, session: &mut Session<'_>, checkout: &Checkout) -> Result<()> {
    if session.ledger().is_empty() {
        ctx.output.warn("Your cart is empty");
        return Ok(());
    }

    view_cart(ctx, session)?;
    let confirmed = Confirm::new()
        .with_prompt("Place order?")
        .default(true)
        .interact()?;
    if !confirmed {
        ctx.output.warn("Checkout cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Processing payment...");
    let result = session.checkout(checkout).await;
    spinner.finish_and_clear();

    match result {
        Ok(receipt) => {
            ctx.output.kv("Order", receipt.order_id.as_str());
            ctx.output.kv("Charged", &receipt.amount.to_string());
        }
        // The session already raised a "Payment failed" notification.
        Err(CommerceError::Checkout(e)) => {
            ctx.output.debug(&format!("gateway error: {:?}", e));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
