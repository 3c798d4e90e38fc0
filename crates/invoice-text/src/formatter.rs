//! Currency and quantity formatting

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Invoice currency
///
/// Known codes carry a symbol; any other code is kept verbatim and printed
/// as a prefix followed by a space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
    Other(String),
}

impl Currency {
    /// Resolve a currency code. An empty code means INR.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "" | "INR" => Currency::Inr,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            other => Currency::Other(other.to_string()),
        }
    }

    /// ISO code as stored
    pub fn code(&self) -> &str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Other(code) => code,
        }
    }

    /// Symbol for known currencies
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Currency::Inr => Some("₹"),
            Currency::Usd => Some("$"),
            Currency::Eur => Some("€"),
            Currency::Gbp => Some("£"),
            Currency::Other(_) => None,
        }
    }

    /// Text placed directly before the digits
    pub fn prefix(&self) -> String {
        match self.symbol() {
            Some(symbol) => symbol.to_string(),
            None => format!("{} ", self.code()),
        }
    }

    /// Whether the code resolved to a known symbol
    pub fn is_known(&self) -> bool {
        self.symbol().is_some()
    }
}

impl FromStr for Currency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Currency::from_code(s))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Format an amount for display
///
/// Two fractional digits, rounded half away from zero, South-Asian digit
/// grouping, symbol prefix and the minus sign ahead of the symbol.
/// Non-finite amounts format as zero. Cents are counted in a `u128`, so
/// amounts up to about 3.4e36 print every digit and larger ones clamp.
///
/// # Examples
/// ```
/// use invoice_text::{format_currency, Currency};
/// assert_eq!(format_currency(1000000.0, &Currency::Inr), "₹10,00,000.00");
/// assert_eq!(format_currency(-1234.56, &Currency::Usd), "-$1,234.56");
/// assert_eq!(format_currency(5.0, &Currency::from_code("JPY")), "JPY 5.00");
/// ```
pub fn format_currency(amount: f64, currency: &Currency) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };

    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    // "-0.00" never shows up for tiny negatives
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!(
        "{sign}{}{}.{fraction:02}",
        currency.prefix(),
        group_south_asian(whole)
    )
}

/// Format an amount given a raw currency code
pub fn format_currency_code(amount: f64, code: &str) -> String {
    format_currency(amount, &Currency::from_code(code))
}

/// Format a quantity as a plain number (`3`, `2.5`)
pub fn format_quantity(quantity: f64) -> String {
    if !quantity.is_finite() || quantity == 0.0 {
        return "0".to_string();
    }
    quantity.to_string()
}

/// Group digits as 12,34,567: the last three digits, then pairs
fn group_south_asian(value: u128) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
