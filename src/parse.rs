//! Scalar field parsing for scraped markup fragments.
//!
//! Table cells on the site sometimes wrap the meaningful text in a nested
//! element and sometimes carry it directly, so [`cell_text`] searches the
//! fragment's children for the first non-empty text before falling back to
//! the fragment's own text.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use scraper::ElementRef;
use std::fmt;
use std::str::FromStr;

/// Extract the trimmed text of a table cell.
///
/// Returns the first direct child whose (recursive) text trims to something
/// non-empty; if none does, falls back to the element's own trimmed text.
pub fn cell_text(el: ElementRef<'_>) -> String {
    for child in el.children() {
        let text = match ElementRef::wrap(child) {
            Some(child_el) => child_el.text().collect::<String>(),
            None => match child.value().as_text() {
                Some(t) => (**t).to_string(),
                None => continue,
            },
        };
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    el.text().collect::<String>().trim().to_string()
}

/// Extract a cell's text and run it through a parse function.
pub fn parse_cell<T>(el: ElementRef<'_>, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
    parse(&cell_text(el))
}

/// Parse a base-10 integer field.
pub fn parse_int<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Format(format!("{raw:?} is not an integer: {e}")))
}

/// Parse a localized DKK amount such as `"1.234,50 DKK"` into `1234.50`.
///
/// The site formats prices with `.` as thousands separator, `,` as decimal
/// separator and a `" DKK"` suffix.
pub fn parse_price(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    let normalized = raw
        .strip_suffix(" DKK")
        .unwrap_or(raw)
        .replace('.', "")
        .replace(',', ".");
    normalized
        .parse()
        .map_err(|e| Error::Format(format!("{raw:?} is not a DKK amount: {e}")))
}

/// Parse an order timestamp such as `"11-08-22 19:07"` (no timezone).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), "%d-%m-%y %H:%M")
        .map_err(|e| Error::Format(format!("{raw:?} is not a timestamp: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use once_cell::sync::Lazy;
    use scraper::{Html, Selector};

    static DIV: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());

    fn first_div(doc: &Html) -> ElementRef<'_> {
        doc.select(&DIV).next().unwrap()
    }

    #[test]
    fn price_with_thousands_separator() {
        assert_eq!(parse_price("1.234,50 DKK").unwrap(), 1234.50);
    }

    #[test]
    fn price_without_thousands_separator() {
        assert_eq!(parse_price("76,00 DKK").unwrap(), 76.00);
    }

    #[test]
    fn price_rejects_non_numeric() {
        assert!(matches!(parse_price("DKK"), Err(Error::Format(_))));
    }

    #[test]
    fn timestamp_day_month_short_year() {
        let expected = NaiveDate::from_ymd_opt(2022, 8, 11)
            .unwrap()
            .and_hms_opt(19, 7, 0)
            .unwrap();
        assert_eq!(parse_timestamp("11-08-22 19:07").unwrap(), expected);
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert!(matches!(parse_timestamp("yesterday"), Err(Error::Format(_))));
    }

    #[test]
    fn int_rejects_garbage() {
        assert!(matches!(parse_int::<i64>("44a"), Err(Error::Format(_))));
    }

    #[test]
    fn cell_text_prefers_first_non_empty_child() {
        let doc = Html::parse_fragment("<div><span>  </span><b> 76,00 DKK </b>tail</div>");
        assert_eq!(cell_text(first_div(&doc)), "76,00 DKK");
    }

    #[test]
    fn cell_text_handles_direct_text() {
        let doc = Html::parse_fragment("<div> 44028 </div>");
        assert_eq!(cell_text(first_div(&doc)), "44028");
    }

    #[test]
    fn cell_text_falls_back_to_own_text_when_children_are_empty() {
        let doc = Html::parse_fragment("<div><span>  </span><i></i></div>");
        assert_eq!(cell_text(first_div(&doc)), "");
    }

    #[test]
    fn parse_cell_applies_parser_to_nested_text() {
        let doc = Html::parse_fragment("<div><span>42</span></div>");
        assert_eq!(parse_cell(first_div(&doc), parse_int::<u32>).unwrap(), 42);
    }
}
