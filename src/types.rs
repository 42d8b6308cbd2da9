//! Core types used throughout GoldCatalog
//!
//! Catalog records, their priced projection, and the filter applied to it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Scale factor from the [0, 1] popularity score to the 0–5 rating
pub const POPULARITY_RATING_SCALE: Decimal = dec!(5);

/// Image URLs for the three metal colours of an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemImages {
    pub yellow: String,
    pub rose: String,
    pub white: String,
}

/// Immutable catalog record as delivered by a catalog source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u32,
    pub name: String,
    /// Normalized desirability in [0, 1]
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub popularity_score: Decimal,
    /// Weight in grams
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub weight: Decimal,
    #[serde(default)]
    pub images: ItemImages,
}

impl Item {
    /// Check the record invariants, returning the first violation
    pub fn validate(&self) -> Result<(), String> {
        if self.id == 0 {
            return Err("id must be positive".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.popularity_score < Decimal::ZERO || self.popularity_score > Decimal::ONE {
            return Err(format!(
                "popularityScore {} outside [0, 1]",
                self.popularity_score
            ));
        }
        if self.weight <= Decimal::ZERO {
            return Err(format!("weight {} must be positive", self.weight));
        }
        Ok(())
    }

    /// Popularity score rescaled to 0–5, None on overflow
    pub fn popularity_rating(&self) -> Option<Decimal> {
        self.popularity_score.checked_mul(POPULARITY_RATING_SCALE)
    }
}

/// An item with its request-time derived fields. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    #[serde(flatten)]
    pub item: Item,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub popularity_rating: Decimal,
}

/// Optional inclusive bounds, combined conjunctively
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<Decimal>,
    /// Compared against the raw popularity score, not the rating
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_popularity: Option<Decimal>,
}

/// Query-string bound: `?minPrice=` (blank) means unset, anything else must
/// parse as a decimal
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Decimal::from_str(value)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal {:?}: {}", value, e))),
    }
}

impl PriceFilter {
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none() && self.min_popularity.is_none()
    }

    pub fn matches(&self, priced: &PricedItem) -> bool {
        if let Some(min) = self.min_price {
            if priced.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if priced.price > max {
                return false;
            }
        }
        if let Some(min) = self.min_popularity {
            if priced.item.popularity_score < min {
                return false;
            }
        }
        true
    }
}
