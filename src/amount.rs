//! Amounts and their display styles.
//!
//! An [`Amount`] is one commodity's worth of money as hledger-web reports
//! it: a quantity, the commodity label, the style hledger inferred from the
//! journal (symbol side, spacing, precision, decimal point, digit
//! grouping), and optionally a `@`/`@@` price annotation pointing at
//! another amount. Field names on the wire are hledger's own
//! (`acommodity`, `aquantity`, ...) and must stay exact for round-tripping.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::format;
use crate::quantity::Quantity;

/// Which side of the number the commodity symbol is rendered on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    #[default]
    Right,
}

/// Digit-grouping rule: a separator plus group sizes applied right to
/// left, the last size repeating once the list is exhausted. Encoded on
/// the wire as a two-element array, e.g. `[",", [3]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitGroups(pub char, pub Vec<usize>);

impl DigitGroups {
    pub fn separator(&self) -> char {
        self.0
    }

    pub fn sizes(&self) -> &[usize] {
        &self.1
    }
}

/// Rendering rules for one commodity, as inferred by hledger.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountStyle {
    #[serde(rename = "ascommodityside")]
    pub commodity_side: Side,
    #[serde(rename = "ascommodityspaced")]
    pub spaced: bool,
    #[serde(rename = "asprecision")]
    pub precision: usize,
    #[serde(rename = "asdecimalpoint")]
    pub decimal_point: Option<char>,
    #[serde(rename = "asdigitgroups")]
    pub digit_groups: Option<DigitGroups>,
}

pub type Commodity = String;

/// Conversion-price annotation attached to an amount. `TotalPrice` covers
/// the whole posted quantity (`@@`), `UnitPrice` is per unit (`@`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "contents")]
pub enum AmountPrice {
    TotalPrice(Amount),
    UnitPrice(Amount),
}

impl AmountPrice {
    pub fn amount(&self) -> &Amount {
        match self {
            AmountPrice::TotalPrice(amount) | AmountPrice::UnitPrice(amount) => amount,
        }
    }
}

/// A single-commodity amount with its display style and optional price.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(rename = "acommodity")]
    pub commodity: Commodity,
    #[serde(rename = "aquantity")]
    pub quantity: Quantity,
    #[serde(rename = "astyle")]
    pub style: AmountStyle,
    #[serde(rename = "aprice")]
    pub price: Option<Box<AmountPrice>>,
    #[serde(rename = "aismultiplier", default)]
    pub is_multiplier: bool,
}

impl Amount {
    /// Render this amount the way hledger prints it, price annotations
    /// included. See [`crate::format`] for the exact rules.
    pub fn format(&self) -> String {
        format::format_amount(self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

lazy_static! {
    static ref UNQUOTED_COMMODITY: Regex = Regex::new(
        r"^([^[[:digit:]][[:space:]][-!?\.,\+]]+)|([^[[:digit:]][[:space:]][-!?\.,\+]]+)$"
    )
    .unwrap();
    static ref QUOTED_COMMODITY: Regex = Regex::new(r#"^(".+")|(".+")$"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseAmountError {
    #[error("failed to parse quantity: {0}")]
    InvalidAmount(String),
    #[error("quantity not found")]
    MissingAmount,
}

/// Parses an amount as a user would type it into the new-transaction
/// form: `[-]SYMBOL 1,234.56` or `1 234,56 SYMBOL`, with an optional
/// `@ price` or `@@ price` tail. The inferred style carries no digit
/// grouping.
impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((base, price)) = s.split_once("@@") {
            let mut amount = Self::from_str(base)?;
            amount.price = Some(Box::new(AmountPrice::TotalPrice(Self::from_str(price)?)));
            return Ok(amount);
        }
        if let Some((base, price)) = s.split_once('@') {
            let mut amount = Self::from_str(base)?;
            amount.price = Some(Box::new(AmountPrice::UnitPrice(Self::from_str(price)?)));
            return Ok(amount);
        }
        parse_bare(s)
    }
}

fn parse_bare(s: &str) -> Result<Amount, ParseAmountError> {
    let s = s.trim();

    // the sign may come before a left-side commodity
    let negative_prefix = s.starts_with('-');
    let s = s.trim_start_matches(['-', '+']).trim_start();

    let (side, commodity) = detect_commodity(s);
    let rest = s.replace(commodity, "");
    if rest.is_empty() {
        return Err(ParseAmountError::MissingAmount);
    }

    let spaced = match side {
        Side::Left => rest.starts_with(char::is_whitespace),
        Side::Right => rest.ends_with(char::is_whitespace),
    };
    let rest = rest.trim();
    let negative = negative_prefix || rest.starts_with('-');

    // the decimal point is the last comma or dot; everything after it
    // determines the precision
    let decimal_point = rest.chars().filter(|c| matches!(*c, ',' | '.')).last();
    let places = decimal_point
        .and_then(|point| rest.rsplit(point).next())
        .map_or(0, str::len);
    if places > Quantity::MAX_PLACES as usize {
        return Err(ParseAmountError::InvalidAmount(rest.to_string()));
    }

    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    let mantissa = digits
        .parse::<i64>()
        .map_err(|_| ParseAmountError::InvalidAmount(rest.to_string()))?;
    let mantissa = if negative { -mantissa } else { mantissa };

    Ok(Amount {
        commodity: commodity.replace('"', ""),
        quantity: Quantity::new(mantissa, places as u32),
        style: AmountStyle {
            commodity_side: side,
            spaced,
            precision: places,
            decimal_point,
            digit_groups: None,
        },
        price: None,
        is_multiplier: false,
    })
}

/// Finds a quoted or unquoted commodity symbol at either end of the
/// input. Defaults to an empty right-side commodity when there is none.
fn detect_commodity(s: &str) -> (Side, &str) {
    QUOTED_COMMODITY
        .captures(s)
        .or_else(|| UNQUOTED_COMMODITY.captures(s))
        .and_then(|caps| {
            caps.get(1)
                .map(|m| (Side::Left, m.as_str()))
                .or_else(|| caps.get(2).map(|m| (Side::Right, m.as_str())))
        })
        .unwrap_or((Side::Right, ""))
}
