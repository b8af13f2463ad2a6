//! Spot price aggregation into local-day buckets.

use log::{debug, warn};

use crate::clock::{parse_utc, CivilDate, CivilDateTime};
use crate::feed::PriceEntry;
use crate::timezone::TimeZone;

/// Quarter-hour slots in one local day.
pub const QUARTER_SLOTS: usize = 96;

/// Hour slots in one local day.
pub const HOUR_SLOTS: usize = 24;

/// Aggregated prices for the current local day and the next.
///
/// Rebuilt wholesale on every fetch cycle, never mutated incrementally. A
/// slot holds either the aggregate of at least one feed entry or 0.0 when no
/// entry covered it; the two cases are not distinguishable by value.
/// `has_tomorrow` is the only presence flag: set iff any hour of the next
/// day received data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedPrices {
    /// Today's raw price per 15-minute slot, index `hour * 4 + minute / 15`.
    pub quarter_today: [f32; QUARTER_SLOTS],
    /// Today's mean price per hour.
    pub hourly_today: [f32; HOUR_SLOTS],
    /// Tomorrow's mean price per hour.
    pub hourly_tomorrow: [f32; HOUR_SLOTS],
    /// Whether any hour of tomorrow received at least one entry.
    pub has_tomorrow: bool,
}

impl Default for AggregatedPrices {
    fn default() -> Self {
        Self {
            quarter_today: [0.0; QUARTER_SLOTS],
            hourly_today: [0.0; HOUR_SLOTS],
            hourly_tomorrow: [0.0; HOUR_SLOTS],
            has_tomorrow: false,
        }
    }
}

impl AggregatedPrices {
    /// Today's price for the quarter-hour slot containing `local`.
    pub fn price_at(&self, local: &CivilDateTime) -> f32 {
        self.quarter_today[local.quarter_slot()]
    }
}

/// Aggregate feed entries into local-day buckets.
///
/// Each entry's timestamp is parsed, localized through `tz`, and classified
/// against `today`: entries on `today` overwrite their quarter-hour slot
/// (last write wins) and contribute to that hour's mean; entries on the
/// following calendar day contribute to tomorrow's hourly means; everything
/// else is discarded, as are entries whose timestamp does not parse.
///
/// Never fails: empty or useless input yields an all-zero aggregate with
/// `has_tomorrow = false`. Whether stale data should be kept on a failed
/// fetch is the caller's policy, not this function's.
pub fn aggregate<'a, I, Z>(entries: I, today: CivilDate, tz: &Z) -> AggregatedPrices
where
    I: IntoIterator<Item = &'a PriceEntry<'a>>,
    Z: TimeZone,
{
    let tomorrow = today.next();

    let mut out = AggregatedPrices::default();
    let mut today_sum = [0.0f32; HOUR_SLOTS];
    let mut today_count = [0u16; HOUR_SLOTS];
    let mut tomorrow_sum = [0.0f32; HOUR_SLOTS];
    let mut tomorrow_count = [0u16; HOUR_SLOTS];
    let mut skipped = 0usize;

    for entry in entries {
        let at = match parse_utc(entry.start_date) {
            Ok(at) => at,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let local = tz.to_local(at);
        let hour = local.hour as usize;

        if local.date == today {
            out.quarter_today[local.quarter_slot()] = entry.price;
            today_sum[hour] += entry.price;
            today_count[hour] += 1;
        } else if local.date == tomorrow {
            tomorrow_sum[hour] += entry.price;
            tomorrow_count[hour] += 1;
        }
    }

    for hour in 0..HOUR_SLOTS {
        if today_count[hour] > 0 {
            out.hourly_today[hour] = today_sum[hour] / f32::from(today_count[hour]);
        }
        if tomorrow_count[hour] > 0 {
            out.hourly_tomorrow[hour] = tomorrow_sum[hour] / f32::from(tomorrow_count[hour]);
            out.has_tomorrow = true;
        }
    }

    if skipped > 0 {
        warn!("skipped {skipped} entries with malformed timestamps");
    }
    debug!(
        "aggregated prices for {:04}-{:02}-{:02}, tomorrow published: {}",
        today.year, today.month, today.day, out.has_tomorrow
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Instant;
    use crate::timezone::Helsinki;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    /// A winter Monday; the local day runs 22:00Z the previous evening to
    /// 22:00Z.
    const TODAY: CivilDate = CivilDate::new(2025, 2, 24);

    /// Instant of local midnight opening `date` in Helsinki.
    fn local_midnight(date: CivilDate) -> Instant {
        let guess = parse_utc(&format!(
            "{:04}-{:02}-{:02}T00:00:00Z",
            date.year, date.month, date.day
        ))
        .unwrap();
        Instant::from_secs(guess.as_secs() - i64::from(Helsinki.utc_offset_secs(guess)))
    }

    fn iso(at: Instant) -> String {
        let utc = CivilDateTime::from_instant(at, 0);
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.000Z",
            utc.date.year, utc.date.month, utc.date.day, utc.hour, utc.minute, utc.second
        )
    }

    fn entries<'a>(raw: &'a [(String, f32)]) -> Vec<PriceEntry<'a>> {
        raw.iter()
            .map(|(start_date, price)| PriceEntry {
                price: *price,
                start_date,
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_all_zeroes() {
        let out = aggregate(core::iter::empty::<&PriceEntry>(), TODAY, &Helsinki);
        assert!(!out.has_tomorrow);
        assert_eq!(out.quarter_today, [0.0; QUARTER_SLOTS]);
        assert_eq!(out.hourly_today, [0.0; HOUR_SLOTS]);
        assert_eq!(out.hourly_tomorrow, [0.0; HOUR_SLOTS]);
    }

    #[test]
    fn full_day_of_quarter_entries() {
        let start = local_midnight(TODAY);
        let raw: Vec<(String, f32)> = (0..QUARTER_SLOTS)
            .map(|slot| {
                let at = Instant::from_secs(start.as_secs() + slot as i64 * 900);
                (iso(at), slot as f32 * 0.25 + 1.0)
            })
            .collect();
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), TODAY, &Helsinki);

        assert!(!out.has_tomorrow);
        for slot in 0..QUARTER_SLOTS {
            assert_eq!(out.quarter_today[slot], slot as f32 * 0.25 + 1.0);
        }
        for hour in 0..HOUR_SLOTS {
            let mean = (0..4)
                .map(|q| (hour * 4 + q) as f32 * 0.25 + 1.0)
                .sum::<f32>()
                / 4.0;
            assert!((out.hourly_today[hour] - mean).abs() < 1e-4);
        }
    }

    #[test]
    fn tomorrow_only_input() {
        let start = local_midnight(TODAY.next());
        let raw: Vec<(String, f32)> = (0..HOUR_SLOTS)
            .map(|hour| {
                let at = Instant::from_secs(start.as_secs() + hour as i64 * 3600);
                (iso(at), 5.0 + hour as f32)
            })
            .collect();
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), TODAY, &Helsinki);

        assert!(out.has_tomorrow);
        assert_eq!(out.hourly_today, [0.0; HOUR_SLOTS]);
        assert_eq!(out.quarter_today, [0.0; QUARTER_SLOTS]);
        for hour in 0..HOUR_SLOTS {
            assert_eq!(out.hourly_tomorrow[hour], 5.0 + hour as f32);
        }
    }

    #[test]
    fn duplicate_quarter_slot_keeps_last_price_but_averages_both() {
        // Local 12:00 today is 10:00 UTC in winter.
        let raw = [
            (String::from("2025-02-24T10:00:00.000Z"), 4.0),
            (String::from("2025-02-24T10:00:00.000Z"), 8.0),
        ];
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), TODAY, &Helsinki);

        assert_eq!(out.quarter_today[12 * 4], 8.0);
        assert_eq!(out.hourly_today[12], 6.0);
    }

    #[test]
    fn malformed_timestamps_are_skipped_not_fatal() {
        let raw = [
            (String::from("not a timestamp"), 99.0),
            (String::from("2025-02-24T10:15:00.000Z"), 3.5),
        ];
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), TODAY, &Helsinki);

        assert_eq!(out.quarter_today[12 * 4 + 1], 3.5);
        assert_eq!(out.hourly_today[12], 3.5);
        assert_eq!(out.hourly_today.iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn entries_outside_today_and_tomorrow_are_discarded() {
        let yesterday = local_midnight(TODAY);
        let day_after = local_midnight(TODAY.next().next());
        let raw = [
            (iso(Instant::from_secs(yesterday.as_secs() - 3600)), 42.0),
            (iso(day_after), 42.0),
        ];
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), TODAY, &Helsinki);

        assert_eq!(out, AggregatedPrices::default());
    }

    #[test]
    fn tomorrow_rolls_over_a_month_boundary() {
        let today = CivilDate::new(2025, 1, 31);
        // Local 2025-02-01 10:00 is 08:00 UTC in winter.
        let raw = [(String::from("2025-02-01T08:00:00.000Z"), 7.0)];
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), today, &Helsinki);

        assert!(out.has_tomorrow);
        assert_eq!(out.hourly_tomorrow[10], 7.0);
    }

    #[test]
    fn classification_uses_local_time_not_utc() {
        // 22:30Z the previous evening is already 00:30 local today.
        let raw = [(String::from("2025-02-23T22:30:00.000Z"), 2.5)];
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), TODAY, &Helsinki);

        assert_eq!(out.quarter_today[2], 2.5);
        assert_eq!(out.hourly_today[0], 2.5);
    }

    #[test]
    fn summer_time_offset_applies_on_dst_days() {
        // Summer time starts 2025-03-30 at 01:00 UTC; from then on the
        // local clock runs at UTC+3, so 01:00 UTC is 04:00 local.
        let today = CivilDate::new(2025, 3, 30);
        let raw = [(String::from("2025-03-30T01:00:00.000Z"), 9.0)];
        let entries = entries(&raw);

        let out = aggregate(entries.iter(), today, &Helsinki);

        assert_eq!(out.quarter_today[4 * 4], 9.0);
        assert_eq!(out.hourly_today[4], 9.0);
    }
}
