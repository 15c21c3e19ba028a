//! Price a cart without checking out.

use anyhow::Result;
use techknot_shop::cart::{CartLedger, CartPricing};
use techknot_shop::catalog::Catalog;
use techknot_shop::notify::TracingNotifier;
use techknot_shop::session::ShopSession;

use super::QuoteArgs;
use crate::context::Context;
use crate::output::{truncate, Output};

const WIDTHS: [usize; 5] = [3, 32, 10, 4, 12];

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = Catalog::iot_components();
    let mut session = ShopSession::new(&catalog, &ctx.config.pricing, TracingNotifier);

    for id in args.ids {
        session.add_to_cart(id)?;
    }

    let totals = session.totals()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": session.ledger().lines(),
            "totals": totals,
        }));
        return Ok(());
    }

    ctx.output.header("Quote");
    print_cart(&ctx.output, session.ledger(), &totals);
    ctx.output.totals(&totals, ctx.config.pricing.tax_rate_percent());

    Ok(())
}

/// Print the cart's lines with their line totals.
pub fn print_cart(output: &Output, ledger: &CartLedger, totals: &CartPricing) {
    if ledger.is_empty() {
        output.info("Your cart is empty");
        return;
    }

    output.table_row(&["ID", "ITEM", "PRICE", "QTY", "LINE TOTAL"], &WIDTHS);
    for (line, priced) in ledger.lines().iter().zip(&totals.lines) {
        let id = line.product_id.to_string();
        let name = truncate(&line.name, WIDTHS[1]);
        let price = line.unit_price.to_string();
        let quantity = line.quantity.to_string();
        let line_total = priced.line_total.to_string();
        output.table_row(&[&id, &name, &price, &quantity, &line_total], &WIDTHS);
    }
}
