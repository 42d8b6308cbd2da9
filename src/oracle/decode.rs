//! Spot feed body decoding
//!
//! The feed's response shape is not guaranteed, so bodies are run through an
//! ordered chain of strategies and the first positive price wins.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::DecodeError;

#[derive(Debug, Deserialize)]
struct PriceFieldBody {
    price: Decimal,
}

#[derive(Debug, Deserialize)]
struct GoldFieldBody {
    gold: Decimal,
}

/// One way of reading a spot price out of a feed body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStrategy {
    /// `[2075.30, ...]` - first element is the spot price
    SpotArray,
    /// `{"price": 2075.30}`
    PriceField,
    /// `{"gold": 2075.30}`
    GoldField,
}

/// Strategies tried by the oracle, in order
pub const DEFAULT_STRATEGIES: [DecodeStrategy; 3] = [
    DecodeStrategy::SpotArray,
    DecodeStrategy::PriceField,
    DecodeStrategy::GoldField,
];

impl DecodeStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            DecodeStrategy::SpotArray => "spot_array",
            DecodeStrategy::PriceField => "price_field",
            DecodeStrategy::GoldField => "gold_field",
        }
    }

    /// Decode a strictly positive spot price from a raw body
    pub fn decode(&self, body: &[u8]) -> Result<Decimal, DecodeError> {
        let json_err = |source| DecodeError::Json {
            strategy: self.name(),
            source,
        };

        let price = match self {
            DecodeStrategy::SpotArray => serde_json::from_slice::<Vec<Decimal>>(body)
                .map_err(json_err)?
                .into_iter()
                .next()
                .ok_or(DecodeError::EmptyArray)?,
            DecodeStrategy::PriceField => {
                serde_json::from_slice::<PriceFieldBody>(body)
                    .map_err(json_err)?
                    .price
            }
            DecodeStrategy::GoldField => {
                serde_json::from_slice::<GoldFieldBody>(body)
                    .map_err(json_err)?
                    .gold
            }
        };

        if price <= Decimal::ZERO {
            return Err(DecodeError::NonPositive(price));
        }
        Ok(price)
    }
}

/// Walk the strategy chain and return the first usable price with the
/// strategy that produced it
pub fn decode_spot_price(
    body: &[u8],
    strategies: &[DecodeStrategy],
) -> Result<(DecodeStrategy, Decimal), DecodeError> {
    let mut failures = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        match strategy.decode(body) {
            Ok(price) => return Ok((*strategy, price)),
            Err(e) => {
                tracing::trace!(strategy = strategy.name(), error = %e, "Decode strategy rejected body");
                failures.push(format!("{}: {}", strategy.name(), e));
            }
        }
    }

    Err(DecodeError::Unrecognized(failures.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn decode(body: &str) -> Result<(DecodeStrategy, Decimal), DecodeError> {
        decode_spot_price(body.as_bytes(), &DEFAULT_STRATEGIES)
    }

    #[test]
    fn test_spot_array_takes_first_element() {
        let (strategy, price) = decode("[2075.30, 1999.10]").unwrap();
        assert_eq!(strategy, DecodeStrategy::SpotArray);
        assert_eq!(price, dec!(2075.30));
    }

    #[test]
    fn test_price_field_object() {
        let (strategy, price) = decode(r#"{"price": 2075.30, "currency": "USD"}"#).unwrap();
        assert_eq!(strategy, DecodeStrategy::PriceField);
        assert_eq!(price, dec!(2075.3));
    }

    #[test]
    fn test_gold_field_object() {
        let (strategy, price) = decode(r#"{"gold": 2310.5}"#).unwrap();
        assert_eq!(strategy, DecodeStrategy::GoldField);
        assert_eq!(price, dec!(2310.5));
    }

    #[test]
    fn test_string_encoded_number() {
        let (_, price) = decode(r#"["2075.30"]"#).unwrap();
        assert_eq!(price, dec!(2075.30));
    }

    #[test]
    fn test_non_positive_array_falls_through_to_failure() {
        assert!(decode("[0]").is_err());
        assert!(decode("[-12.5]").is_err());
        assert!(decode(r#"{"price": 0}"#).is_err());
    }

    #[test]
    fn test_non_positive_price_field_still_tries_gold() {
        let (strategy, price) = decode(r#"{"price": 0, "gold": 2000}"#).unwrap();
        assert_eq!(strategy, DecodeStrategy::GoldField);
        assert_eq!(price, dec!(2000));
    }

    #[test]
    fn test_empty_array() {
        let err = DecodeStrategy::SpotArray.decode(b"[]").unwrap_err();
        assert!(matches!(err, DecodeError::EmptyArray));
    }

    #[test]
    fn test_garbage_reports_every_strategy() {
        let err = decode("<html>502 Bad Gateway</html>").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("spot_array"));
        assert!(msg.contains("price_field"));
        assert!(msg.contains("gold_field"));
    }

    #[test]
    fn test_strategy_order_is_respected() {
        let only_gold = [DecodeStrategy::GoldField];
        assert!(decode_spot_price(b"[2075.30]", &only_gold).is_err());
    }
}
