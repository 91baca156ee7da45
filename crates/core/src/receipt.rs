//! Receipt
//!
//! Renders a composed draft as a line-item table followed by its price summary,
//! promotion notice and any blocking problems.

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    composer::Composition,
    drafts::BookingDraft,
    offerings::PricingUnit,
    pricing::{PricingError, PromotionOutcome, line_total},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error pricing a line.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO(#[from] io::Error),
}

/// Write `draft` and its `composition` to `out`.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if a line cannot be priced or written.
pub fn write_receipt(
    mut out: impl io::Write,
    draft: &BookingDraft<'_>,
    composition: &Composition<'_>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Amount"]);

    if let Some(offering) = draft.offering() {
        let units = draft.billable_units();

        let amount = match line_total(offering, units) {
            Ok(amount) => amount.to_string(),
            Err(PricingError::Overflow(_)) => "-".to_string(),
            Err(error) => return Err(error.into()),
        };

        builder.push_record([
            offering.name().to_string(),
            units_label(offering.pricing_unit(), units),
            offering.base_price().to_string(),
            amount,
        ]);
    }

    for add_on in draft.add_ons().iter() {
        builder.push_record([
            add_on.name().to_string(),
            "1".to_string(),
            add_on.price().to_string(),
            add_on.price().to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..4), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    write_summary(&mut out, composition)?;

    Ok(())
}

fn units_label(unit: PricingUnit, units: u32) -> String {
    match unit {
        PricingUnit::PerHour => format!("{units} h"),
        PricingUnit::PerUnit | PricingUnit::PerBooking => units.to_string(),
    }
}

fn write_summary(
    out: &mut impl io::Write,
    composition: &Composition<'_>,
) -> Result<(), ReceiptError> {
    let summary = composition.summary();

    let discount_label = match composition.promotion() {
        PromotionOutcome::Applied { code, .. } => format!("Discount ({code}):"),
        PromotionOutcome::None | PromotionOutcome::NotApplicable { .. } => {
            "Discount:".to_string()
        }
    };

    let lines = [
        ("Subtotal:".to_string(), summary.subtotal()),
        (discount_label, negated(summary.discount())?),
        ("Total:".to_string(), summary.total()),
    ];

    let label_width = lines
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or_default();

    for (label, amount) in &lines {
        let amount = amount.to_string();

        writeln!(out, " {label:<label_width$} {amount:>16}")?;
    }

    if let PromotionOutcome::NotApplicable { code, reason } = composition.promotion() {
        writeln!(out, "\n Note: {code}: {reason}")?;
    }

    for violation in composition.violations() {
        writeln!(out, " Cannot submit: {violation}")?;
    }

    Ok(())
}

fn negated<'a>(amount: Money<'a, Currency>) -> Result<Money<'a, Currency>, MoneyError> {
    Money::from_minor(0, amount.currency()).sub(amount)
}
