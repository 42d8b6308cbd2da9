//! Pricing Engine - Gold-derived item prices and range filters
//!
//! price = (popularity_score + 1) * weight * gold_price_per_gram
//!
//! Everything here is a pure projection over borrowed items; nothing is
//! written back, so prices follow the reference price on every request.
//! Arithmetic is checked: an item whose price does not fit in a `Decimal`
//! is skipped, never priced with a panic.

use rust_decimal::Decimal;

use crate::types::{Item, PriceFilter, PricedItem};

#[derive(Debug, Default, Clone, Copy)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Price of a single item at the given gold price per gram, None on
    /// overflow
    pub fn price_of(&self, item: &Item, price_per_gram: Decimal) -> Option<Decimal> {
        item.popularity_score
            .checked_add(Decimal::ONE)?
            .checked_mul(item.weight)?
            .checked_mul(price_per_gram)
    }

    pub fn price_item(&self, item: &Item, price_per_gram: Decimal) -> Option<PricedItem> {
        Some(PricedItem {
            item: item.clone(),
            price: self.price_of(item, price_per_gram)?,
            popularity_rating: item.popularity_rating()?,
        })
    }

    /// Price every item, keeping catalog order, and drop the ones outside
    /// the filter bounds
    pub fn price_and_filter(
        &self,
        items: &[Item],
        price_per_gram: Decimal,
        filter: &PriceFilter,
    ) -> Vec<PricedItem> {
        let priced: Vec<PricedItem> = items
            .iter()
            .filter_map(|item| {
                let priced = self.price_item(item, price_per_gram);
                if priced.is_none() {
                    tracing::warn!(
                        id = item.id,
                        weight = %item.weight,
                        price_per_gram = %price_per_gram,
                        "Price overflow, skipping catalog item"
                    );
                }
                priced
            })
            .filter(|priced| filter.matches(priced))
            .collect();

        tracing::debug!(
            total = items.len(),
            matched = priced.len(),
            price_per_gram = %price_per_gram.round_dp(4),
            filter = ?filter,
            "Priced catalog"
        );

        priced
    }
}
