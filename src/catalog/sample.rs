//! Built-in catalog served when the catalog file is unusable

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Item, ItemImages};

const CDN_BASE: &str = "https://cdn.shopify.com/s/files/1/0484/1429/4167/files";

/// (id, score, weight, sku, yellow/rose/white version tags)
const SAMPLE_RINGS: [(u32, Decimal, Decimal, &str, [&str; 3]); 8] = [
    (1, dec!(0.85), dec!(2.1), "EG085-100P", ["1696588368", "1696588406", "1696588402"]),
    (2, dec!(0.51), dec!(3.4), "EG012", ["1707727068", "1707727068", "1707727068"]),
    (3, dec!(0.92), dec!(3.8), "EG020-100P", ["1683534032", "1683534032", "1683534032"]),
    (4, dec!(0.88), dec!(4.5), "EG022-100P", ["1683532153", "1683532153", "1683532153"]),
    (5, dec!(0.80), dec!(2.5), "EG074-100P", ["1696232035", "1696927124", "1696927124"]),
    (6, dec!(0.82), dec!(1.8), "EG075-100P", ["1696591786", "1696591802", "1696591798"]),
    (7, dec!(0.70), dec!(5.2), "EG094-100P", ["1696589183", "1696589214", "1696589210"]),
    (8, dec!(0.90), dec!(3.7), "EG115-100P", ["1696596076", "1696596151", "1696596147"]),
];

fn image_url(sku: &str, colour: char, version: &str) -> String {
    format!("{}/{}-{}.jpg?v={}", CDN_BASE, sku, colour, version)
}

/// Eight engagement rings, always non-empty and valid
pub fn sample_catalog() -> Vec<Item> {
    SAMPLE_RINGS
        .iter()
        .map(|&(id, popularity_score, weight, sku, [yellow, rose, white])| Item {
            id,
            name: format!("Engagement Ring {}", id),
            popularity_score,
            weight,
            images: ItemImages {
                yellow: image_url(sku, 'Y', yellow),
                rose: image_url(sku, 'R', rose),
                white: image_url(sku, 'W', white),
            },
        })
        .collect()
}
