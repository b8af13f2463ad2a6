//! One fetch cycle: GET, decode, aggregate, publish.

use alloc::vec;

use embassy_net::Stack;
use log::info;
use thiserror_no_std::Error;

use spotti_core::clock::Instant;
use spotti_core::config::{FEED_HOST, FEED_PATH, FEED_PORT};
use spotti_core::feed::{self, FeedError};
use spotti_core::prices::aggregate;
use spotti_core::state::PriceStore;
use spotti_core::timezone::{Helsinki, TimeZone};

use crate::http::{self, HttpError};

/// Response buffer: the quarter-hour feed runs to a few tens of kilobytes.
const RESPONSE_BUFFER_BYTES: usize = 32 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http: {0}")]
    Http(#[from] HttpError),
    #[error("payload is not UTF-8")]
    Encoding,
    #[error("feed: {0}")]
    Feed(#[from] FeedError),
}

/// Fetch the latest feed and publish a fresh aggregate for the local day
/// containing `now`.
///
/// On any failure nothing is published and the previous snapshot stays in
/// place; whether to keep showing it is the caller's policy.
pub async fn refresh(stack: Stack<'_>, store: &PriceStore, now: Instant) -> Result<(), FetchError> {
    let mut buf = vec![0u8; RESPONSE_BUFFER_BYTES];
    let body = http::get(stack, FEED_HOST, FEED_PORT, FEED_PATH, &mut buf).await?;
    let payload = core::str::from_utf8(body).map_err(|_| FetchError::Encoding)?;
    let feed = feed::decode(payload)?;

    let today = Helsinki.to_local(now).date;
    let prices = aggregate(feed.prices.iter(), today, &Helsinki);
    info!(
        "aggregated {} feed entries, tomorrow published: {}",
        feed.prices.len(),
        prices.has_tomorrow
    );

    store.publish(prices);
    Ok(())
}
