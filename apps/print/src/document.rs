//! # Work-Order Document
//!
//! Renders the printable заказ-наряд as fixed-width text. All amounts come
//! from [`WorkOrderTotals`], so the printout cannot disagree with the list
//! card or the detail view.
//!
//! ## Layout
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │ Smartline                                          ЗАКАЗ-НАРЯД     │
//! │ Установочный центр                                     ЗН-0042     │
//! │ ══════════════════════════════════════════════════════════════════ │
//! │ Дата / Статус / Клиент / Мастер / Автомобиль                       │
//! │ РАБОТЫ                        (omitted when there are no works)    │
//! │ ЗАПАСНЫЕ ЧАСТИ И МАТЕРИАЛЫ    (omitted when there are no parts)    │
//! │ ИТОГО К ОПЛАТЕ + сумма прописью                                    │
//! │ ОПЛАТА                        (only with --payments)               │
//! │ signatures, company requisites                                     │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use smartline_core::format::format_date_ru;
use smartline_core::words::{amount_in_words, WordForms};
use smartline_core::{totals, Payment, WorkItem, WorkOrder, WorkOrderTotals};
use tracing::debug;

use crate::config::PrintConfig;
use crate::error::PrintResult;

/// Characters per line.
pub const PAGE_WIDTH: usize = 72;

const AMOUNT_WIDTH: usize = 14;
const LABEL_WIDTH: usize = 13;
const EMPTY_FIELD: &str = "—";

const PAYMENTS: WordForms = WordForms::new("платёж", "платежа", "платежей");

/// Renders the full document.
///
/// `payments`, when given, adds the paid / remaining block.
///
/// ## Errors
/// Fails only if the grand total is negative (it cannot be spelled).
pub fn render_document(
    order: &WorkOrder,
    config: &PrintConfig,
    payments: Option<&[Payment]>,
) -> PrintResult<String> {
    let summary = WorkOrderTotals::of(order);
    let in_words = amount_in_words(summary.grand_total)?;

    debug!(
        number = %order.number,
        works = order.works.len(),
        parts = order.parts.len(),
        total = summary.grand_total.kopecks(),
        "Rendering work order"
    );

    let mut out = String::new();
    write_header(&mut out, order, config)?;
    write_details(&mut out, order)?;

    if !order.works.is_empty() {
        write_works(&mut out, order, &summary, config)?;
    }
    if !order.parts.is_empty() {
        write_parts(&mut out, order, &summary, config)?;
    }

    write_grand_total(&mut out, &summary, &in_words, config)?;

    if let Some(payments) = payments {
        write_payments(&mut out, payments, &summary, config)?;
    }

    write_signatures(&mut out)?;
    write_footer(&mut out, config)?;
    Ok(out)
}

// =============================================================================
// Sections
// =============================================================================

fn write_header(out: &mut String, order: &WorkOrder, config: &PrintConfig) -> PrintResult<()> {
    writeln!(out, "{}", two_columns(&config.shop_name, "ЗАКАЗ-НАРЯД"))?;
    writeln!(out, "{}", two_columns(&config.shop_tagline, &config.display_number(order)))?;
    writeln!(out, "{}", "=".repeat(PAGE_WIDTH))?;
    writeln!(out)?;
    Ok(())
}

fn write_details(out: &mut String, order: &WorkOrder) -> PrintResult<()> {
    let date = if order.date.trim().is_empty() {
        order
            .created_on()
            .map(format_date_ru)
            .unwrap_or_else(|| EMPTY_FIELD.to_string())
    } else {
        order.date.clone()
    };

    write_field(out, "Дата:", &date)?;
    write_field(out, "Статус:", order.status.label())?;
    write_field(out, "Клиент:", &order.client)?;
    if let Some(phone) = non_empty(order.client_phone.as_deref()) {
        write_field(out, "Телефон:", phone)?;
    }
    if !order.payer_name.trim().is_empty() {
        write_field(out, "Плательщик:", &order.payer_name)?;
    }
    write_field(out, "Мастер:", or_dash(&order.master))?;
    write_field(out, "Автомобиль:", or_dash(&order.car))?;
    if let Some(vin) = non_empty(order.car_vin.as_deref()) {
        write_field(out, "VIN:", vin)?;
    }
    if let Some(issued) = order.issued_on() {
        write_field(out, "Выдан:", &format_date_ru(issued))?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_works(
    out: &mut String,
    order: &WorkOrder,
    summary: &WorkOrderTotals,
    config: &PrintConfig,
) -> PrintResult<()> {
    let name_width = PAGE_WIDTH - 4 - 1 - 1 - AMOUNT_WIDTH;

    write_section_title(out, "РАБОТЫ")?;
    writeln!(
        out,
        "{:<4} {:<name_width$} {:>AMOUNT_WIDTH$}",
        "№", "Наименование", "Стоимость"
    )?;

    for (i, work) in order.works.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<name_width$} {:>AMOUNT_WIDTH$}",
            i + 1,
            fit(&work.name, name_width),
            config.format_amount(work.price)
        )?;
        if let Some(note) = work_annotation(work, config) {
            writeln!(out, "{:<4} {}", "", fit(&note, PAGE_WIDTH - 5))?;
        }
    }

    write_subtotal(out, "Итого работы:", &config.format_amount(summary.works_total))?;
    writeln!(out)?;
    Ok(())
}

fn write_parts(
    out: &mut String,
    order: &WorkOrder,
    summary: &WorkOrderTotals,
    config: &PrintConfig,
) -> PrintResult<()> {
    let name_width = PAGE_WIDTH - 4 - 1 - 7 - 1 - (AMOUNT_WIDTH + 1) * 2;

    write_section_title(out, "ЗАПАСНЫЕ ЧАСТИ И МАТЕРИАЛЫ")?;
    writeln!(
        out,
        "{:<4} {:<name_width$} {:>7} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$}",
        "№", "Наименование", "Кол-во", "Цена", "Сумма"
    )?;

    for (i, part) in order.parts.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<name_width$} {:>7} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$}",
            i + 1,
            fit(&part.name, name_width),
            part.qty,
            config.format_amount(part.price),
            config.format_amount(part.line_total())
        )?;
    }

    write_subtotal(out, "Итого запчасти:", &config.format_amount(summary.parts_total))?;
    writeln!(out)?;
    Ok(())
}

fn write_grand_total(
    out: &mut String,
    summary: &WorkOrderTotals,
    in_words: &str,
    config: &PrintConfig,
) -> PrintResult<()> {
    writeln!(out, "{}", "=".repeat(PAGE_WIDTH))?;
    write_subtotal(out, "ИТОГО К ОПЛАТЕ:", &config.format_amount(summary.grand_total))?;
    for line in wrap(&format!("Сумма прописью: {in_words}"), PAGE_WIDTH) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_payments(
    out: &mut String,
    payments: &[Payment],
    summary: &WorkOrderTotals,
    config: &PrintConfig,
) -> PrintResult<()> {
    let paid = totals::total_paid(payments);
    let remaining = totals::balance_due(summary.grand_total, paid);

    write_section_title(out, "ОПЛАТА")?;
    for payment in payments {
        let left = format!(
            "+{}  {} · {}",
            config.format_amount(payment.amount),
            payment.payment_method.label(),
            or_dash(&payment.cashbox_name)
        );
        let date = payment.paid_on().map(format_date_ru).unwrap_or_default();
        writeln!(out, "{}", two_columns(&left, &date))?;
    }

    let count = payments.len() as u64;
    writeln!(out, "{} {}", count, PAYMENTS.for_count(count))?;
    write_subtotal(out, "Оплачено:", &config.format_amount(paid))?;
    if remaining.is_positive() {
        write_subtotal(out, "Остаток:", &config.format_amount(remaining))?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_signatures(out: &mut String) -> PrintResult<()> {
    let line = "_".repeat(22);
    writeln!(out)?;
    writeln!(out, "{:<LABEL_WIDTH$}{line}   {:<10}{line}", "Исполнитель:", "Заказчик:")?;
    writeln!(
        out,
        "{:<LABEL_WIDTH$}{:<22}   {:<10}{}",
        "", "подпись / ФИО", "", "подпись / ФИО"
    )?;
    writeln!(out)?;
    Ok(())
}

fn write_footer(out: &mut String, config: &PrintConfig) -> PrintResult<()> {
    let company = &config.company;
    writeln!(out, "{}", "-".repeat(PAGE_WIDTH))?;
    for line in [
        company.name.clone(),
        company.requisites_line(),
        company.address.clone(),
    ] {
        for wrapped in wrap(&line, PAGE_WIDTH) {
            writeln!(out, "{wrapped}")?;
        }
    }
    writeln!(out, "{} — {}", config.shop_name, config.shop_tagline)?;
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn write_section_title(out: &mut String, title: &str) -> PrintResult<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(PAGE_WIDTH))?;
    Ok(())
}

fn write_field(out: &mut String, label: &str, value: &str) -> PrintResult<()> {
    writeln!(out, "{label:<LABEL_WIDTH$}{value}")?;
    Ok(())
}

fn write_subtotal(out: &mut String, label: &str, amount: &str) -> PrintResult<()> {
    writeln!(out, "{:>PAGE_WIDTH$}", format!("{label} {amount}"))?;
    Ok(())
}

/// Norm-hour and discount notes under a labor line.
fn work_annotation(work: &WorkItem, config: &PrintConfig) -> Option<String> {
    let mut notes = Vec::new();
    if work.has_norm() {
        notes.push(format!(
            "н/ч: {} × {}",
            format_hours(work.norm_hours),
            config.format_amount(work.norm_hour_price)
        ));
    }
    if work.discount.is_positive() {
        notes.push(format!("скидка: {}", config.format_amount(work.discount)));
    }
    (!notes.is_empty()).then(|| notes.join(", "))
}

/// `2.5` → "2,5".
fn format_hours(hours: f64) -> String {
    hours.to_string().replace('.', ",")
}

/// `left` and `right` on one line, `right` flush with the page edge.
fn two_columns(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = PAGE_WIDTH.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

/// Greedy word wrap. Words longer than `width` are left whole.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + 1;
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncates to `width` chars with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY_FIELD
    } else {
        value
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartline_core::format::Precision;
    use smartline_core::{Money, PartItem, PaymentMethod, WorkOrderStatus};

    fn rub(rubles: i64) -> Money {
        Money::from_rubles_kopecks(rubles, 0)
    }

    fn oil_change() -> WorkOrder {
        let mut order = WorkOrder::new(42, "ЗН-0042", "Петров П.", WorkOrderStatus::Done);
        order.date = "15.03.2025".to_string();
        order.car = "Kia Rio".to_string();
        order.add_work(WorkItem::new("Замена масла", rub(1500)).unwrap());
        order.add_part(
            PartItem::new("Масло", 4, rub(500))
                .unwrap()
                .with_purchase_price(rub(350)),
        );
        order
    }

    fn nbsp(text: &str) -> String {
        text.replace(' ', "\u{a0}")
    }

    #[test]
    fn test_document_sections_and_totals() {
        let doc = render_document(&oil_change(), &PrintConfig::default(), None).unwrap();

        assert!(doc.starts_with("Smartline"));
        assert!(doc.contains("ЗАКАЗ-НАРЯД"));
        assert!(doc.contains("ЗН-0042"));
        assert!(doc.contains("Статус:      Готов"));
        assert!(doc.contains("Мастер:      —"));
        assert!(doc.contains("РАБОТЫ"));
        assert!(doc.contains("ЗАПАСНЫЕ ЧАСТИ И МАТЕРИАЛЫ"));
        assert!(doc.contains(&format!("Итого работы: {}", nbsp("1 500 ₽"))));
        assert!(doc.contains(&format!("Итого запчасти: {}", nbsp("2 000 ₽"))));
        assert!(doc.contains(&format!("ИТОГО К ОПЛАТЕ: {}", nbsp("3 500 ₽"))));
        assert!(doc.contains("Сумма прописью: Три тысячи пятьсот рублей 00 копеек"));
        assert!(doc.contains("ИНН 2465155610 / КПП 246501001 / ОГРН 1162468118010"));
        assert!(doc.trim_end().ends_with("Smartline — Установочный центр"));
        assert!(!doc.contains("ОПЛАТА"));
    }

    #[test]
    fn test_lines_fit_page_width() {
        let mut order = oil_change();
        order.add_part(PartItem::new(&"Очень длинное название ".repeat(5), 1, rub(10)).unwrap());
        let doc = render_document(&order, &PrintConfig::default(), None).unwrap();

        for line in doc.lines() {
            assert!(line.chars().count() <= PAGE_WIDTH, "too wide: {line}");
        }
        assert!(doc.contains('…'));
    }

    #[test]
    fn test_blank_number_uses_configured_prefix() {
        let mut order = oil_change();
        order.number = "  ".to_string();
        let config = PrintConfig {
            number_prefix: "НЗ-".to_string(),
            ..PrintConfig::default()
        };

        let doc = render_document(&order, &config, None).unwrap();
        let second_line = doc.lines().nth(1).unwrap();
        assert!(second_line.ends_with("НЗ-0042"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let order = WorkOrder::new(1, "ЗН-0001", "Иванов", WorkOrderStatus::New);
        let doc = render_document(&order, &PrintConfig::default(), None).unwrap();

        assert!(!doc.contains("РАБОТЫ"));
        assert!(!doc.contains("ЗАПАСНЫЕ ЧАСТИ"));
        assert!(doc.contains("Дата:        —"));
        assert!(doc.contains("Сумма прописью: Ноль рублей 00 копеек"));
    }

    #[test]
    fn test_kopecks_precision_and_annotations() {
        let mut order = WorkOrder::new(3, "ЗН-0003", "Сидоров", WorkOrderStatus::InProgress);
        order.add_work(
            WorkItem::new("Установка парктроника", Money::from_kopecks(450_050))
                .unwrap()
                .with_norm(1.5, rub(3000))
                .with_discount(rub(500)),
        );
        let config = PrintConfig {
            precision: Precision::Kopecks,
            ..PrintConfig::default()
        };

        let doc = render_document(&order, &config, None).unwrap();
        assert!(doc.contains(&nbsp("4 500,50 ₽")));
        assert!(doc.contains(&format!("н/ч: 1,5 × {}", nbsp("3 000,00 ₽"))));
        assert!(doc.contains(&format!("скидка: {}", nbsp("500,00 ₽"))));
        assert!(doc.contains("Четыре тысячи пятьсот рублей 50 копеек"));
    }

    #[test]
    fn test_payments_block() {
        let payments = vec![Payment {
            id: 1,
            amount: rub(1000),
            payment_method: PaymentMethod::Card,
            cashbox_name: "Терминал".to_string(),
            created_at: "2025-03-15 12:00:00".to_string(),
        }];

        let doc = render_document(&oil_change(), &PrintConfig::default(), Some(&payments)).unwrap();
        assert!(doc.contains("ОПЛАТА"));
        assert!(doc.contains("Карта · Терминал"));
        assert!(doc.contains("15.03.2025"));
        assert!(doc.contains("1 платёж"));
        assert!(doc.contains(&format!("Оплачено: {}", nbsp("1 000 ₽"))));
        assert!(doc.contains(&format!("Остаток: {}", nbsp("2 500 ₽"))));
    }

    #[test]
    fn test_fully_paid_has_no_remaining_line() {
        let payments = vec![Payment {
            id: 1,
            amount: rub(3500),
            payment_method: PaymentMethod::Cash,
            cashbox_name: String::new(),
            created_at: String::new(),
        }];
        let doc = render_document(&oil_change(), &PrintConfig::default(), Some(&payments)).unwrap();
        assert!(!doc.contains("Остаток:"));
    }

    #[test]
    fn test_negative_total_fails() {
        let mut order = oil_change();
        order.parts[0].qty = -10;
        assert!(render_document(&order, &PrintConfig::default(), None).is_err());
    }

    #[test]
    fn test_render_is_deterministic() {
        let order = oil_change();
        let config = PrintConfig::default();
        assert_eq!(
            render_document(&order, &config, None).unwrap(),
            render_document(&order, &config, None).unwrap()
        );
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("один два три", 7), ["один", "два три"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("Масло", 10), "Масло");
        assert_eq!(fit("Масляный фильтр", 6), "Масля…");
    }
}
