//! Display formatting for amounts.
//!
//! Reproduces hledger's own textual rendering of an amount so that what
//! the viewer shows matches what the journal tooling prints. The work
//! splits into three layers:
//!
//! - [`group_digits`]: thousands-style separator insertion into the
//!   integer part, driven by the commodity's digit-grouping rule
//! - [`format_quantity`]: sign- and precision-aware rendering of the
//!   numeric value, grouping applied
//! - [`format_amount`]: commodity placement, quoting, and recursive
//!   `@`/`@@` price annotations
//!
//! All three are pure and total. Where the upstream data could be
//! malformed (absurd precision, non-finite floats, endless price chains)
//! an explicit fallback policy applies instead of a panic, and a
//! `tracing` warning is emitted.

use crate::amount::{Amount, AmountPrice, AmountStyle, DigitGroups, Side};
use crate::quantity::Quantity;

/// Fractional digits beyond this carry no information for an `f64`.
const MAX_PRECISION: usize = 18;

/// Price chains longer than this are truncated. hledger itself never
/// nests more than one level.
const MAX_PRICE_DEPTH: usize = 64;

/// Inserts group separators into a string of integer-part digits.
///
/// Group sizes are consumed right to left starting from the end of the
/// list; a single-element list repeats its size indefinitely, a longer
/// list walks toward its first element which then repeats. Grouping stops
/// as soon as the next size is not smaller than the digits remaining, so
/// a group is never left empty. With no rule, an empty size list, or a
/// zero size, the input comes back unchanged from that point.
///
/// The input must be ASCII digits only: no sign, no decimal point.
pub fn group_digits(groups: Option<&DigitGroups>, digits: &str) -> String {
    let Some(DigitGroups(separator, sizes)) = groups else {
        return digits.to_string();
    };
    if sizes.is_empty() {
        return digits.to_string();
    }

    // separator offsets, found right to left
    let mut splits = Vec::new();
    let mut remaining = digits.len();
    let mut next = sizes.len() - 1;
    loop {
        let size = sizes[next];
        if size == 0 || size >= remaining {
            break;
        }
        remaining -= size;
        splits.push(remaining);
        next = next.saturating_sub(1);
    }

    let mut grouped = String::with_capacity(digits.len() + splits.len());
    let mut start = 0;
    for &split in splits.iter().rev() {
        grouped.push_str(&digits[start..split]);
        grouped.push(*separator);
        start = split;
    }
    grouped.push_str(&digits[start..]);
    grouped
}

/// Renders the numeric value of a quantity under the given style:
/// absolute value rounded half-away-from-zero to `precision` fractional
/// digits, integer part grouped, parts joined by the style's decimal
/// point (`.` when unset), and a leading minus taken solely from the
/// float's sign. No decimal point is emitted at precision 0, so
/// `-0.0001` renders as `-0` there.
pub fn format_quantity(style: &AmountStyle, quantity: &Quantity) -> String {
    let value = quantity.floating_point;
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = if style.precision > MAX_PRECISION {
        tracing::warn!(precision = style.precision, "clamping display precision");
        MAX_PRECISION
    } else {
        style.precision
    };

    let scaled = (value.abs() * 10f64.powi(precision as i32)).round();
    let digits = if scaled.is_finite() {
        format!("{:.0}", scaled)
    } else {
        // magnitude too large to scale; take the platform conversion
        let mut all = format!("{:.*}", precision, value.abs());
        all.retain(|c| c != '.');
        all
    };

    let (integer, fraction) = if digits.len() > precision {
        digits.split_at(digits.len() - precision)
    } else {
        ("", digits.as_str())
    };
    let integer = if integer.is_empty() { "0" } else { integer };

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(style.digit_groups.as_ref(), integer));
    if precision > 0 {
        out.push(style.decimal_point.unwrap_or('.'));
        for _ in fraction.len()..precision {
            out.push('0');
        }
        out.push_str(fraction);
    }
    out
}

/// Renders a full amount: quantity, commodity symbol (quoted verbatim
/// when it contains a space, matching hledger's own convention), and any
/// chained price annotations.
pub fn format_amount(amount: &Amount) -> String {
    render(amount, MAX_PRICE_DEPTH)
}

fn render(amount: &Amount, depth: usize) -> String {
    let value = format_quantity(&amount.style, &amount.quantity);
    let commodity = if amount.commodity.contains(' ') {
        format!("\"{}\"", amount.commodity)
    } else {
        amount.commodity.clone()
    };
    let space = if amount.style.spaced { " " } else { "" };
    let rendered = match amount.style.commodity_side {
        Side::Left => format!("{commodity}{space}{value}"),
        Side::Right => format!("{value}{space}{commodity}"),
    };

    let Some(price) = amount.price.as_deref() else {
        return rendered;
    };
    if depth == 0 {
        tracing::warn!("price chain too deep, truncating");
        return rendered;
    }
    match price {
        AmountPrice::TotalPrice(contents) => {
            format!("{} @@ {}", rendered, render(contents, depth - 1))
        }
        AmountPrice::UnitPrice(contents) => {
            format!("{} @ {}", rendered, render(contents, depth - 1))
        }
    }
}
