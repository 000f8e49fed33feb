//! Number formatting for exports and summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::is_dollar_label;

/// Currency presentation of an amount cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyFormat {
    /// `$ 1,234.56`
    Dollar,
    /// `Bs. 1,234.56`
    Local,
}

impl CurrencyFormat {
    /// Format used for rows in the given currency label.
    pub fn for_label(label: &str) -> Self {
        if is_dollar_label(label) {
            Self::Dollar
        } else {
            Self::Local
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Dollar => "$",
            Self::Local => "Bs.",
        }
    }
}

/// Round to 2 places and group thousands: `-1234.5` → `"-1,234.50"`.
pub fn format_grouped(d: Decimal) -> String {
    let s = format!("{:.2}", d.round_dp(2));
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.001 rounds to "-0.00"
    let sign = if grouped.chars().all(|c| c == '0' || c == ',') && frac_part == "00" {
        ""
    } else {
        sign
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Currency-aware display: `"$ 1,234.56"`, `"-Bs. 10.00"`.
pub fn format_amount(d: Decimal, format: CurrencyFormat) -> String {
    with_symbol(&format_grouped(d), format)
}

/// Like [`format_amount`] with local separators in the number only:
/// `"Bs. 1.234,56"`.
pub fn format_amount_locale(d: Decimal, format: CurrencyFormat) -> String {
    with_symbol(&to_locale(&format_grouped(d)), format)
}

fn with_symbol(number: &str, format: CurrencyFormat) -> String {
    match number.strip_prefix('-') {
        Some(abs) => format!("-{} {abs}", format.symbol()),
        None => format!("{} {number}", format.symbol()),
    }
}

/// Swap separators to the local convention: `1,234.56` → `1.234,56`.
pub fn to_locale(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect()
}
