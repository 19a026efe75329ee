//! Parsing locale-formatted listing prices.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid price amount regex"));

const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

/// A price read from a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    /// Currency symbol as shown on the card, when present.
    pub symbol: Option<char>,
    pub amount: Decimal,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Some(symbol) => write!(f, "{symbol}{}", self.amount),
            None => write!(f, "{}", self.amount),
        }
    }
}

/// Extracts the first amount and any currency symbol from a price string.
///
/// Commas are thousands separators (`"1,299.00"`), except for a lone comma
/// followed by exactly two digits with no decimal point, which is a decimal
/// comma (`"4,99 €"`). Returns `None` when no digits are present.
#[must_use]
pub fn parse_price(text: &str) -> Option<Price> {
    let matched = AMOUNT_RE.find(text)?.as_str();
    let amount = parse_amount(matched)?;
    let symbol = text.chars().find(|c| CURRENCY_SYMBOLS.contains(c));
    Some(Price { symbol, amount })
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let normalized = match raw.rsplit_once(',') {
        Some((head, tail)) if !raw.contains('.') && !head.contains(',') && tail.len() == 2 => {
            format!("{head}.{tail}")
        }
        _ => raw.replace(',', ""),
    };
    Decimal::from_str(&normalized).ok()
}

/// Display price and parsed amount for a product record. Unparseable text is
/// passed through trimmed with no amount.
#[must_use]
pub fn price_fields(text: &str) -> (String, Option<Decimal>) {
    match parse_price(text) {
        Some(price) => (price.to_string(), Some(price.amount)),
        None => (text.trim().to_string(), None),
    }
}
