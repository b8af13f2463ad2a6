//! Local-time rules.
//!
//! The device shows Finnish local time. There is no tzset environment under
//! `no_std`, so the rule for Eastern European Time
//! (`EET-2EEST,M3.5.0/3,M10.5.0/4`) is evaluated directly: UTC+2 in winter,
//! UTC+3 between 01:00 UTC on the last Sunday of March and 01:00 UTC on the
//! last Sunday of October. The [`TimeZone`] trait is the seam that keeps the
//! aggregation logic independent of any one zone.

use crate::clock::{days_from_civil, days_in_month, CivilDateTime, Instant, SECS_PER_DAY};

/// A fixed local-time rule for converting instants to civil time.
pub trait TimeZone {
    /// Offset from UTC, in seconds, in effect at `at`.
    fn utc_offset_secs(&self, at: Instant) -> i32;

    /// Civil date and time of `at` in this zone.
    fn to_local(&self, at: Instant) -> CivilDateTime {
        CivilDateTime::from_instant(at, self.utc_offset_secs(at))
    }
}

const EET_OFFSET_SECS: i32 = 2 * 3600;
const EEST_OFFSET_SECS: i32 = 3 * 3600;

/// Both EU transitions happen at 01:00 UTC.
const TRANSITION_SECS_UTC: i64 = 3600;

/// Europe/Helsinki: EET (UTC+2) with EU summer time (UTC+3).
#[derive(Debug, Clone, Copy, Default)]
pub struct Helsinki;

impl Helsinki {
    /// Instant of 01:00 UTC on the last Sunday of `month` in `year`.
    fn transition(year: i32, month: u8) -> Instant {
        let days = days_from_civil(year, month, days_in_month(year, month));
        // 1970-01-01 was a Thursday; day-of-week with 0 = Sunday.
        let weekday = (days + 4) % 7;
        Instant::from_secs((days - weekday) * SECS_PER_DAY + TRANSITION_SECS_UTC)
    }
}

impl TimeZone for Helsinki {
    fn utc_offset_secs(&self, at: Instant) -> i32 {
        let year = CivilDateTime::from_instant(at, 0).date.year;
        let dst_start = Self::transition(year, 3);
        let dst_end = Self::transition(year, 10);
        if at >= dst_start && at < dst_end {
            EEST_OFFSET_SECS
        } else {
            EET_OFFSET_SECS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{parse_utc, CivilDate};

    fn offset(s: &str) -> i32 {
        Helsinki.utc_offset_secs(parse_utc(s).unwrap())
    }

    #[test]
    fn winter_is_utc_plus_2() {
        assert_eq!(offset("2025-01-15T12:00:00Z"), 7200);
        assert_eq!(offset("2025-12-24T18:00:00Z"), 7200);
    }

    #[test]
    fn summer_is_utc_plus_3() {
        assert_eq!(offset("2025-07-01T12:00:00Z"), 10800);
    }

    #[test]
    fn spring_transition_boundary() {
        // Summer time starts 2025-03-30 at 01:00 UTC.
        assert_eq!(offset("2025-03-30T00:59:59Z"), 7200);
        assert_eq!(offset("2025-03-30T01:00:00Z"), 10800);
    }

    #[test]
    fn autumn_transition_boundary() {
        // Summer time ends 2025-10-26 at 01:00 UTC.
        assert_eq!(offset("2025-10-26T00:59:59Z"), 10800);
        assert_eq!(offset("2025-10-26T01:00:00Z"), 7200);
    }

    #[test]
    fn local_midnight_crossing() {
        // 21:30 UTC in summer is 00:30 the next local day.
        let local = Helsinki.to_local(parse_utc("2025-06-30T21:30:00Z").unwrap());
        assert_eq!(local.date, CivilDate::new(2025, 7, 1));
        assert_eq!((local.hour, local.minute), (0, 30));
    }
}
