//! Published price snapshot shared between the fetch and render sides.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::prices::AggregatedPrices;

/// Single owned [`AggregatedPrices`] slot.
///
/// The fetch side computes a complete aggregate and publishes it by whole
/// replacement; the render side copies the latest snapshot out, so a redraw
/// never observes a partially written aggregate. A failed fetch publishes
/// nothing, leaving the previous snapshot in place.
pub struct PriceStore {
    slot: Mutex<CriticalSectionRawMutex, Cell<Option<AggregatedPrices>>>,
}

impl PriceStore {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(None)),
        }
    }

    /// Replace the published snapshot.
    pub fn publish(&self, prices: AggregatedPrices) {
        self.slot.lock(|slot| slot.set(Some(prices)));
    }

    /// Copy out the latest snapshot, if any cycle has published one.
    pub fn snapshot(&self) -> Option<AggregatedPrices> {
        self.slot.lock(Cell::get)
    }
}

impl Default for PriceStore {
    fn default() -> Self {
        Self::new()
    }
}
