//! Browse the catalog.

use anyhow::{bail, Result};
use techknot_shop::catalog::{Catalog, Category, Product};
use techknot_shop::search::ProductFilter;
use techknot_shop::Money;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{format_rating, truncate, Output};

const COLUMNS: [&str; 6] = ["ID", "NAME", "CATEGORY", "PRICE", "RATING", "STOCK"];
const WIDTHS: [usize; 6] = [3, 32, 16, 10, 11, 5];

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = Catalog::iot_components();
    let currency = catalog.currency();

    let mut filter = ProductFilter::new()
        .category(parse_category(args.category.as_deref())?)
        .text(args.search.unwrap_or_default())
        .price_range(
            args.min_price.map(|p| Money::from_major(p, currency)),
            args.max_price.map(|p| Money::from_major(p, currency)),
        );
    if args.in_stock {
        filter = filter.in_stock();
    }

    let products = catalog.search(&filter);
    tracing::debug!(matched = products.len(), filters = filter.filters.len(), "catalog search");

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", products.len()));
    print_products(&ctx.output, &products);

    Ok(())
}

/// Parse a `--category` value. `None` or "All" means every category.
pub fn parse_category(name: Option<&str>) -> Result<Option<Category>> {
    let Some(name) = name else {
        return Ok(None);
    };
    if name.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match Category::from_name(name) {
        Some(category) => Ok(Some(category)),
        None => {
            let known: Vec<&str> = Category::ALL.iter().map(|c| c.display_name()).collect();
            bail!("Unknown category '{}'. Expected one of: All, {}", name, known.join(", "))
        }
    }
}

/// Print products as a table.
pub fn print_products(output: &Output, products: &[&Product]) {
    output.table_row(&COLUMNS, &WIDTHS);
    for product in products {
        let id = product.id.to_string();
        let name = truncate(&product.name, WIDTHS[1]);
        let price = product.price.to_string();
        let rating = format_rating(product.rating);
        let stock = product.stock.to_string();
        output.table_row(
            &[
                &id,
                &name,
                product.category.display_name(),
                &price,
                &rating,
                &stock,
            ],
            &WIDTHS,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(None).unwrap(), None);
        assert_eq!(parse_category(Some("All")).unwrap(), None);
        assert_eq!(parse_category(Some("sensors")).unwrap(), Some(Category::Sensors));
        assert!(parse_category(Some("Robots")).is_err());
    }
}
