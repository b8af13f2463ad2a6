//! Price feed document types.
//!
//! The upstream feed is a JSON document of the shape
//! `{"prices": [{"price": 1.23, "startDate": "2025-02-24T22:15:00.000Z"},
//! ...]}`. Decoding borrows the timestamp strings from the payload buffer;
//! nothing from the document outlives one fetch cycle. Fields the display
//! does not use (such as `endDate`) are skipped.

use alloc::vec::Vec;
use serde::Deserialize;
use thiserror_no_std::Error;

/// One spot price observation.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct PriceEntry<'a> {
    /// Price in c/kWh.
    pub price: f32,
    /// ISO-8601 UTC start of the delivery period.
    #[serde(rename = "startDate")]
    pub start_date: &'a str,
}

/// The decoded feed document.
#[derive(Debug, Deserialize)]
pub struct PriceFeed<'a> {
    #[serde(borrow)]
    pub prices: Vec<PriceEntry<'a>>,
}

/// Error decoding a feed payload.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The payload is not the expected JSON document.
    #[error("price feed decode failed: {0}")]
    Decode(#[from] serde_json_core::de::Error),
}

/// Decode a fetched feed payload.
pub fn decode(payload: &str) -> Result<PriceFeed<'_>, FeedError> {
    let (feed, _consumed) = serde_json_core::from_str(payload)?;
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_feed_document() {
        let payload = concat!(
            r#"{"prices":["#,
            r#"{"price":12.34,"startDate":"2025-02-24T22:15:00.000Z","endDate":"2025-02-24T22:30:00.000Z"},"#,
            r#"{"price":-0.25,"startDate":"2025-02-24T22:30:00.000Z","endDate":"2025-02-24T22:45:00.000Z"}"#,
            r#"]}"#,
        );

        let feed = decode(payload).unwrap();
        assert_eq!(feed.prices.len(), 2);
        assert_eq!(feed.prices[0].price, 12.34);
        assert_eq!(feed.prices[0].start_date, "2025-02-24T22:15:00.000Z");
        assert_eq!(feed.prices[1].price, -0.25);
    }

    #[test]
    fn empty_price_array_is_valid() {
        let feed = decode(r#"{"prices":[]}"#).unwrap();
        assert!(feed.prices.is_empty());
    }

    #[test]
    fn rejects_other_documents() {
        assert!(decode("[]").is_err());
        assert!(decode("{}").is_err());
        assert!(decode("not json").is_err());
    }
}
