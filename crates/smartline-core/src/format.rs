//! # Ruble Formatting
//!
//! Russian-locale money text, matching what `Intl.NumberFormat("ru-RU",
//! { style: "currency", currency: "RUB" })` renders on the frontend:
//!
//! ```text
//!   Precision::Rubles   →  "1 500 ₽"       (list cards, totals)
//!   Precision::Kopecks  →  "1 500,00 ₽"    (printed line items)
//!                            │      │  │
//!                            │      │  └── U+00A0 then the ruble sign
//!                            │      └───── decimal comma
//!                            └──────────── U+00A0 thousands separator
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// U+00A0 NO-BREAK SPACE, the ru-RU group and currency separator.
pub const NBSP: char = '\u{a0}';

pub const RUBLE_SIGN: char = '₽';

/// How many fraction digits to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Whole rubles, kopecks rounded half away from zero.
    #[default]
    Rubles,
    /// Two fraction digits.
    Kopecks,
}

/// Groups the digits of `n` in threes with NBSP.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * NBSP.len_utf8());

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(NBSP);
        }
        out.push(ch);
    }
    out
}

/// Formats the number alone, without the currency sign.
///
/// ## Example
/// ```rust
/// use smartline_core::format::{format_number, Precision};
/// use smartline_core::Money;
///
/// assert_eq!(format_number(Money::from_kopecks(123_456_789), Precision::Kopecks), "1\u{a0}234\u{a0}567,89");
/// assert_eq!(format_number(Money::from_kopecks(150), Precision::Rubles), "2");
/// ```
pub fn format_number(amount: Money, precision: Precision) -> String {
    let amount = match precision {
        Precision::Rubles => amount.round_to_rubles(),
        Precision::Kopecks => amount,
    };

    let sign = if amount.is_negative() { "-" } else { "" };
    let whole = group_thousands(amount.rubles().unsigned_abs());

    match precision {
        Precision::Rubles => format!("{sign}{whole}"),
        Precision::Kopecks => format!("{sign}{whole},{:02}", amount.kopecks_part()),
    }
}

/// Formats a ruble amount with the `₽` sign.
///
/// ## Example
/// ```rust
/// use smartline_core::format::{format_rub, Precision};
/// use smartline_core::Money;
///
/// let total = Money::from_rubles_kopecks(3500, 0);
/// assert_eq!(format_rub(total, Precision::Rubles), "3\u{a0}500\u{a0}₽");
/// assert_eq!(format_rub(total, Precision::Kopecks), "3\u{a0}500,00\u{a0}₽");
/// ```
pub fn format_rub(amount: Money, precision: Precision) -> String {
    format!("{}{NBSP}{RUBLE_SIGN}", format_number(amount, precision))
}

/// `dd.mm.yyyy`, as documents and payment lists show dates.
pub fn format_date_ru(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Ticket code: prefix plus the id zero-padded to four digits.
///
/// ## Example
/// ```rust
/// use smartline_core::format::format_work_order_number;
///
/// assert_eq!(format_work_order_number("ЗН-", 42), "ЗН-0042");
/// assert_eq!(format_work_order_number("ЗН-", 12345), "ЗН-12345");
/// ```
pub fn format_work_order_number(prefix: &str, id: i64) -> String {
    format!("{prefix}{id:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rub(rubles: i64) -> Money {
        Money::from_rubles_kopecks(rubles, 0)
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_rub(rub(0), Precision::Rubles), "0\u{a0}₽");
        assert_eq!(format_rub(rub(999), Precision::Rubles), "999\u{a0}₽");
        assert_eq!(format_rub(rub(1500), Precision::Rubles), "1\u{a0}500\u{a0}₽");
        assert_eq!(
            format_rub(rub(1_234_567), Precision::Rubles),
            "1\u{a0}234\u{a0}567\u{a0}₽"
        );
    }

    #[test]
    fn test_kopecks_precision() {
        assert_eq!(
            format_rub(Money::from_kopecks(50_005), Precision::Kopecks),
            "500,05\u{a0}₽"
        );
        assert_eq!(format_rub(rub(12), Precision::Kopecks), "12,00\u{a0}₽");
    }

    #[test]
    fn test_rubles_precision_rounds_half_away_from_zero() {
        assert_eq!(format_rub(Money::from_kopecks(149_950), Precision::Rubles), "1\u{a0}500\u{a0}₽");
        assert_eq!(format_rub(Money::from_kopecks(149_949), Precision::Rubles), "1\u{a0}499\u{a0}₽");
        assert_eq!(format_rub(Money::from_kopecks(-50), Precision::Rubles), "-1\u{a0}₽");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_rub(rub(-500), Precision::Rubles), "-500\u{a0}₽");
        assert_eq!(
            format_rub(Money::from_kopecks(-123_456), Precision::Kopecks),
            "-1\u{a0}234,56\u{a0}₽"
        );
        // Rounds to zero, so no sign.
        assert_eq!(format_rub(Money::from_kopecks(-49), Precision::Rubles), "0\u{a0}₽");
    }

    #[test]
    fn test_i64_extremes_do_not_overflow() {
        let text = format_number(Money::from_kopecks(i64::MIN + 100), Precision::Kopecks);
        assert!(text.starts_with("-92\u{a0}233"));
    }

    #[test]
    fn test_format_date_ru() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_date_ru(date), "05.03.2025");
    }

    #[test]
    fn test_work_order_number() {
        assert_eq!(format_work_order_number("ЗН-", 1), "ЗН-0001");
        assert_eq!(format_work_order_number("", 7), "0007");
    }
}
