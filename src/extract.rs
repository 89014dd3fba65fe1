//! HTML extractors for the site's pages.
//!
//! Each extractor assumes the fixed document shape the site serves and fails
//! fast with [`Error::NotFound`] when the anchoring element is missing; there
//! is no partial-extraction mode. Nothing outside this module sees a parsed
//! markup tree, only the typed records.

use crate::error::{Error, Result};
use crate::order::{CartItem, Order, PendingOrder};
use crate::parse::{cell_text, parse_cell, parse_int, parse_price, parse_timestamp};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static ORDER_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"table[title="Mine bestillinger"]"#).unwrap());
static ORDER_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.myOrderDetails").unwrap());
static CUSTOMER_ID_INPUT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[name="customerId"]"#).unwrap());
static CART_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table#cartTableId").unwrap());
static CART_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.cart-row").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static TOKEN_INPUT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input#token[name="token"]"#).unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Extract the order history from the account page, in document order
/// (the site lists the most recent order first).
pub fn orders(html: &str) -> Result<Vec<Order>> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(&ORDER_TABLE)
        .next()
        .ok_or_else(|| Error::NotFound("order history table".to_string()))?;
    table.select(&ORDER_ROW).map(order_from_row).collect()
}

fn order_from_row(row: ElementRef<'_>) -> Result<Order> {
    let cols: Vec<ElementRef<'_>> = row.select(&TD).collect();
    if cols.len() < 6 {
        return Err(Error::Format(format!(
            "order row has {} columns, expected 6",
            cols.len()
        )));
    }
    Ok(Order {
        id: parse_cell(cols[0], parse_int)?,
        placed_at: parse_cell(cols[1], parse_timestamp)?,
        item_count: parse_cell(cols[2], parse_int)?,
        price: parse_cell(cols[3], parse_price)?,
        status: cell_text(cols[4]),
        customer_id: customer_id(cols[5])?,
    })
}

fn customer_id(col: ElementRef<'_>) -> Result<i64> {
    let input = col
        .select(&CUSTOMER_ID_INPUT)
        .next()
        .ok_or_else(|| Error::NotFound("customerId input in order row".to_string()))?;
    let value = input
        .value()
        .attr("value")
        .ok_or_else(|| Error::Format("customerId input has no value".to_string()))?;
    parse_int(value)
}

/// Extract the single top-level cart line from the cart page.
///
/// Rows prefixed `customizeable` are add-on sub-rows (toppings and the like),
/// not cart lines, and are skipped. The cart is modeled as holding exactly
/// one line at a time; with several qualifying rows the first wins.
pub fn cart_item(html: &str) -> Result<CartItem> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(&CART_TABLE)
        .next()
        .ok_or_else(|| Error::NotFound("cart table".to_string()))?;
    let row = table
        .select(&CART_ROW)
        .find(|row| is_product_row(*row))
        .ok_or_else(|| Error::NotFound("product row in cart table".to_string()))?;
    let cols: Vec<ElementRef<'_>> = row.select(&TD).collect();
    if cols.len() < 4 {
        return Err(Error::Format(format!(
            "cart row has {} columns, expected 4",
            cols.len()
        )));
    }
    let remove_href = cols[0]
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| Error::NotFound("removal link in cart row".to_string()))?;
    Ok(CartItem {
        remove_href: remove_href.to_string(),
        product: cell_text(cols[1]),
        quantity: parse_cell(cols[2], parse_int)?,
        price: parse_cell(cols[3], parse_price)?,
    })
}

fn is_product_row(row: ElementRef<'_>) -> bool {
    !row.value().classes().any(|c| c.starts_with("customizeable"))
}

/// Extract the one-time anti-forgery token from the checkout-information page.
pub fn checkout_token(html: &str) -> Result<String> {
    let doc = Html::parse_document(html);
    let input = doc
        .select(&TOKEN_INPUT)
        .next()
        .ok_or_else(|| Error::NotFound("checkout token input".to_string()))?;
    input
        .value()
        .attr("value")
        .map(str::to_string)
        .ok_or_else(|| Error::Format("checkout token input has no value".to_string()))
}

/// Extract the freshly placed order from the checkout-success page.
///
/// The page starts its client-side verification with a line like
/// `startOrderVerificationProcess("<token>",<x>,"<order id>");` and that line
/// is the only place the status token appears.
pub fn pending_order(page: &str) -> Result<PendingOrder> {
    let line = page
        .lines()
        .find(|line| line.contains("startOrderVerificationProcess"))
        .ok_or_else(|| Error::NotFound("order verification call in success page".to_string()))?;
    let (status_token, id) = parse_verification_line(line)?;
    Ok(PendingOrder::new(id, status_token))
}

fn parse_verification_line(line: &str) -> Result<(String, i64)> {
    let start = line
        .find('"')
        .ok_or_else(|| Error::Format(format!("no quoted arguments in {line:?}")))?;
    let args = line[start..].replace('"', "").replace(");", "");
    let fields: Vec<&str> = args.split(',').collect();
    if fields.len() < 3 {
        return Err(Error::Format(format!(
            "expected 3 verification arguments, got {}",
            fields.len()
        )));
    }
    Ok((fields[0].to_string(), parse_int(fields[2])?))
}
