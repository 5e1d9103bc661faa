//! # Amount in Words
//!
//! Spells a ruble amount in Russian for printed documents:
//! `1234.56` → "Одна тысяча двести тридцать четыре рубля 56 копеек".
//!
//! ## Agreement Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  last two digits  │ form  │ рубль    тысяча   миллион    копейка        │
//! │  ─────────────────┼───────┼──────────────────────────────────────────   │
//! │  11..=19          │ Many  │ рублей   тысяч    миллионов  копеек         │
//! │  ends in 1        │ One   │ рубль    тысяча   миллион    копейка        │
//! │  ends in 2..=4    │ Few   │ рубля    тысячи   миллиона   копейки        │
//! │  anything else    │ Many  │ рублей   тысяч    миллионов  копеек         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "тысяча" is feminine, so its group says "одна"/"две" instead of
//! "один"/"два". Kopecks are always written as two digits. Below one ruble
//! the document form is fixed: "Ноль рублей NN копеек".

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, KOPECKS_PER_RUBLE};

// =============================================================================
// Plural Forms
// =============================================================================

/// Russian numeral agreement class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralForm {
    /// 1, 21, 101 ... (рубль)
    One,
    /// 2-4, 22-24 ... (рубля)
    Few,
    /// 0, 5-20, 25-30 ... (рублей)
    Many,
}

/// Picks the agreement class from the last two digits of `n`.
///
/// ## Example
/// ```rust
/// use smartline_core::words::{plural_form, PluralForm};
///
/// assert_eq!(plural_form(21), PluralForm::One);
/// assert_eq!(plural_form(11), PluralForm::Many);
/// assert_eq!(plural_form(1003), PluralForm::Few);
/// ```
pub const fn plural_form(n: u64) -> PluralForm {
    if matches!(n % 100, 11..=19) {
        return PluralForm::Many;
    }
    match n % 10 {
        1 => PluralForm::One,
        2..=4 => PluralForm::Few,
        _ => PluralForm::Many,
    }
}

/// The three declined forms of a counted noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordForms {
    pub one: &'static str,
    pub few: &'static str,
    pub many: &'static str,
}

impl WordForms {
    pub const fn new(one: &'static str, few: &'static str, many: &'static str) -> Self {
        WordForms { one, few, many }
    }

    /// The form agreeing with `n`.
    pub const fn for_count(&self, n: u64) -> &'static str {
        match plural_form(n) {
            PluralForm::One => self.one,
            PluralForm::Few => self.few,
            PluralForm::Many => self.many,
        }
    }
}

pub const RUBLES: WordForms = WordForms::new("рубль", "рубля", "рублей");
pub const KOPECKS: WordForms = WordForms::new("копейка", "копейки", "копеек");

// =============================================================================
// Cardinal Tables
// =============================================================================

/// Grammatical gender of the counted noun; only 1 and 2 change form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
}

const UNITS: [&str; 10] = [
    "", "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];
const TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];
const TENS: [&str; 10] = [
    "", "", "двадцать", "тридцать", "сорок", "пятьдесят", "шестьдесят", "семьдесят",
    "восемьдесят", "девяносто",
];
const HUNDREDS: [&str; 10] = [
    "", "сто", "двести", "триста", "четыреста", "пятьсот", "шестьсот", "семьсот", "восемьсот",
    "девятьсот",
];

/// Scale words by group index (10^3k), each with the gender of its noun.
/// Index 0 has no noun; the caller supplies the gender.
const SCALES: [(WordForms, Gender); 7] = [
    (WordForms::new("", "", ""), Gender::Masculine),
    (WordForms::new("тысяча", "тысячи", "тысяч"), Gender::Feminine),
    (WordForms::new("миллион", "миллиона", "миллионов"), Gender::Masculine),
    (WordForms::new("миллиард", "миллиарда", "миллиардов"), Gender::Masculine),
    (WordForms::new("триллион", "триллиона", "триллионов"), Gender::Masculine),
    (WordForms::new("квадриллион", "квадриллиона", "квадриллионов"), Gender::Masculine),
    (WordForms::new("квинтиллион", "квинтиллиона", "квинтиллионов"), Gender::Masculine),
];

fn unit_word(digit: u64, gender: Gender) -> &'static str {
    match (digit, gender) {
        (1, Gender::Feminine) => "одна",
        (2, Gender::Feminine) => "две",
        _ => UNITS[digit as usize],
    }
}

/// Pushes the words for 1..=999 onto `out`.
fn push_triplet(out: &mut Vec<&'static str>, n: u64, gender: Gender) {
    let hundreds = n / 100;
    let rest = n % 100;

    if hundreds > 0 {
        out.push(HUNDREDS[hundreds as usize]);
    }

    if (10..=19).contains(&rest) {
        out.push(TEENS[(rest - 10) as usize]);
        return;
    }

    let tens = rest / 10;
    let units = rest % 10;
    if tens >= 2 {
        out.push(TENS[tens as usize]);
    }
    if units > 0 {
        out.push(unit_word(units, gender));
    }
}

/// Spells a whole number, lowercase, with `gender` applied to the final
/// group. Zero is "ноль".
///
/// ## Example
/// ```rust
/// use smartline_core::words::{number_in_words, Gender};
///
/// assert_eq!(number_in_words(2002, Gender::Masculine), "две тысячи два");
/// assert_eq!(number_in_words(21, Gender::Feminine), "двадцать одна");
/// ```
pub fn number_in_words(n: u64, gender: Gender) -> String {
    if n == 0 {
        return "ноль".to_string();
    }

    let mut groups = Vec::with_capacity(SCALES.len());
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    let mut words = Vec::new();
    for (index, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        let (forms, scale_gender) = SCALES[index];
        let group_gender = if index == 0 { gender } else { scale_gender };

        push_triplet(&mut words, group, group_gender);
        if index > 0 {
            words.push(forms.for_count(group));
        }
    }

    words.join(" ")
}

/// Uppercases the first character, leaves the rest untouched.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Amount in Words
// =============================================================================

/// Spells a ruble amount for documents.
///
/// Rubles are written out, kopecks stay as two digits:
///
/// ```rust
/// use smartline_core::words::amount_in_words;
/// use smartline_core::Money;
///
/// assert_eq!(
///     amount_in_words(Money::from_rubles_kopecks(1234, 56)).unwrap(),
///     "Одна тысяча двести тридцать четыре рубля 56 копеек"
/// );
/// assert_eq!(amount_in_words(Money::zero()).unwrap(), "Ноль рублей 00 копеек");
/// ```
///
/// ## Errors
/// [`CoreError::NegativeAmount`] for amounts below zero.
pub fn amount_in_words(amount: Money) -> CoreResult<String> {
    if amount.is_negative() {
        return Err(CoreError::NegativeAmount {
            kopecks: amount.kopecks(),
        });
    }

    let kopecks_total = amount.kopecks() as u64;
    let rubles = kopecks_total / KOPECKS_PER_RUBLE as u64;
    let kopecks = kopecks_total % KOPECKS_PER_RUBLE as u64;

    if rubles == 0 {
        return Ok(format!("Ноль рублей {kopecks:02} копеек"));
    }

    let text = format!(
        "{} {} {:02} {}",
        number_in_words(rubles, Gender::Masculine),
        RUBLES.for_count(rubles),
        kopecks,
        KOPECKS.for_count(kopecks)
    );

    Ok(capitalize_first(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(rubles: i64) -> String {
        amount_in_words(Money::from_rubles_kopecks(rubles, 0)).unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(words(0), "Ноль рублей 00 копеек");
    }

    #[test]
    fn test_ruble_declension() {
        assert_eq!(words(1), "Один рубль 00 копеек");
        assert_eq!(words(2), "Два рубля 00 копеек");
        assert_eq!(words(5), "Пять рублей 00 копеек");
        assert_eq!(words(300), "Триста рублей 00 копеек");
    }

    #[test]
    fn test_teen_exception() {
        assert_eq!(words(11), "Одиннадцать рублей 00 копеек");
        assert_eq!(words(12), "Двенадцать рублей 00 копеек");
        assert_eq!(words(111), "Сто одиннадцать рублей 00 копеек");
        assert_eq!(words(11_000), "Одиннадцать тысяч рублей 00 копеек");
    }

    #[test]
    fn test_units_agreement_after_twenty() {
        assert_eq!(words(21), "Двадцать один рубль 00 копеек");
        assert_eq!(words(22), "Двадцать два рубля 00 копеек");
        assert_eq!(words(101), "Сто один рубль 00 копеек");
    }

    #[test]
    fn test_thousands_are_feminine() {
        assert_eq!(words(1000), "Одна тысяча рублей 00 копеек");
        assert_eq!(words(2000), "Две тысячи рублей 00 копеек");
        assert_eq!(words(5000), "Пять тысяч рублей 00 копеек");
        assert_eq!(words(21_000), "Двадцать одна тысяча рублей 00 копеек");
        assert_eq!(words(2002), "Две тысячи два рубля 00 копеек");
    }

    #[test]
    fn test_millions_and_up() {
        assert_eq!(words(1_000_000), "Один миллион рублей 00 копеек");
        assert_eq!(
            words(2_500_000),
            "Два миллиона пятьсот тысяч рублей 00 копеек"
        );
        assert_eq!(
            words(1_001_001),
            "Один миллион одна тысяча один рубль 00 копеек"
        );
        assert_eq!(words(5_000_000_000), "Пять миллиардов рублей 00 копеек");
    }

    #[test]
    fn test_under_one_ruble_kopeck_word_is_fixed() {
        let spell = |k| amount_in_words(Money::from_kopecks(k)).unwrap();
        assert_eq!(spell(1), "Ноль рублей 01 копеек");
        assert_eq!(spell(2), "Ноль рублей 02 копеек");
        assert_eq!(spell(21), "Ноль рублей 21 копеек");
        assert_eq!(spell(99), "Ноль рублей 99 копеек");
    }

    #[test]
    fn test_rounding_happens_once_at_deserialization() {
        #[derive(serde::Deserialize)]
        struct Total {
            #[serde(with = "crate::money::rubles")]
            amount: Money,
        }
        let spell_json = |json: &str| {
            let total: Total = serde_json::from_str(json).unwrap();
            amount_in_words(total.amount).unwrap()
        };

        assert_eq!(spell_json(r#"{"amount": 1.999}"#), "Два рубля 00 копеек");
        // 10.005 * 100 is 1000.5000000000001 in f64, so it rounds up.
        assert_eq!(spell_json(r#"{"amount": 10.005}"#), "Десять рублей 01 копейка");
        assert_eq!(spell_json(r#"{"amount": 0.005}"#), "Ноль рублей 01 копеек");
    }

    #[test]
    fn test_kopecks() {
        let spell = |k| amount_in_words(Money::from_kopecks(k)).unwrap();
        assert_eq!(
            spell(123_456),
            "Одна тысяча двести тридцать четыре рубля 56 копеек"
        );
        assert_eq!(spell(2_202), "Двадцать два рубля 02 копейки");
        assert_eq!(spell(1_511), "Пятнадцать рублей 11 копеек");
        assert_eq!(spell(350_021), "Три тысячи пятьсот рублей 21 копейка");
    }

    #[test]
    fn test_seventeen_digit_maximum_does_not_panic() {
        let text = amount_in_words(Money::from_kopecks(i64::MAX)).unwrap();
        assert!(text.starts_with("Девяносто два квадриллиона"));
        assert!(text.ends_with("семьсот пятьдесят восемь рублей 07 копеек"));
    }

    #[test]
    fn test_number_in_words_covers_u64() {
        let text = number_in_words(u64::MAX, Gender::Masculine);
        assert!(text.starts_with("восемнадцать квинтиллионов четыреста сорок шесть квадриллионов"));
        assert!(text.ends_with("шестьсот пятнадцать"));
    }

    #[test]
    fn test_negative_is_rejected() {
        let err = amount_in_words(Money::from_kopecks(-100)).unwrap_err();
        assert!(matches!(err, CoreError::NegativeAmount { kopecks: -100 }));
    }

    #[test]
    fn test_idempotent() {
        let amount = Money::from_kopecks(987_654_321);
        assert_eq!(amount_in_words(amount).unwrap(), amount_in_words(amount).unwrap());
    }

    #[test]
    fn test_word_forms_for_count() {
        let payments = WordForms::new("платёж", "платежа", "платежей");
        assert_eq!(payments.for_count(1), "платёж");
        assert_eq!(payments.for_count(3), "платежа");
        assert_eq!(payments.for_count(14), "платежей");
        assert_eq!(payments.for_count(0), "платежей");
    }
}
