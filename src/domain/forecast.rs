//! Day bucketing for the 5-day/3-hour forecast feed.
//!
//! The feed carries eight samples per day. The forecast view shows one card per
//! day for the first three dates present, each represented by the sample nearest
//! to noon.
//!
//! Dates are always UTC calendar dates. The hour compared against noon is taken
//! in a caller-chosen timezone: [`bucket_by_day_local`] uses the machine's local
//! zone, which ignores the city's own offset and is only an approximation of the
//! city's noon. [`bucket_by_day_for_city`] uses the offset the API reports for
//! the city instead; [`NoonClock`] picks between the two.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Timelike, Utc};

use crate::domain::weather::{DayBucket, ForecastSample};

pub const MAX_DAYS: usize = 3;
const TARGET_HOUR: u32 = 12;
// Larger than any reachable distance from noon (at most 12).
const NO_DELTA: u32 = 24;

/// Picks one representative sample per calendar date for the first
/// [`MAX_DAYS`] distinct dates, in order of first appearance.
///
/// Within a date the sample whose hour in `tz` is closest to 12:00 wins; on a
/// tie the earlier sample in input order is kept.
#[must_use]
pub fn bucket_by_day<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DayBucket> {
    let keyed: Vec<(NaiveDate, u32, &ForecastSample)> = samples
        .iter()
        .filter_map(|sample| {
            let (date, hour) = date_and_hour(sample.timestamp_utc_seconds, tz)?;
            Some((date, hour, sample))
        })
        .collect();

    let mut dates: Vec<NaiveDate> = Vec::with_capacity(MAX_DAYS);
    for (date, _, _) in &keyed {
        if dates.len() == MAX_DAYS {
            break;
        }
        if !dates.contains(date) {
            dates.push(*date);
        }
    }

    dates
        .into_iter()
        .filter_map(|date| {
            let mut best: Option<&ForecastSample> = None;
            let mut best_delta = NO_DELTA;
            for (_, hour, sample) in keyed.iter().filter(|(d, _, _)| *d == date) {
                let delta = hour.abs_diff(TARGET_HOUR);
                if delta < best_delta {
                    best = Some(*sample);
                    best_delta = delta;
                }
            }
            best.map(|sample| DayBucket {
                calendar_date: date,
                representative_sample: sample.clone(),
            })
        })
        .collect()
}

/// Noon measured on the machine's local clock.
#[must_use]
pub fn bucket_by_day_local(samples: &[ForecastSample]) -> Vec<DayBucket> {
    bucket_by_day(samples, &Local)
}

/// Noon measured at the city, `utc_offset_seconds` east of UTC. An offset
/// outside +-24h falls back to UTC.
#[must_use]
pub fn bucket_by_day_for_city(
    samples: &[ForecastSample],
    utc_offset_seconds: i32,
) -> Vec<DayBucket> {
    match FixedOffset::east_opt(utc_offset_seconds) {
        Some(offset) => bucket_by_day(samples, &offset),
        None => bucket_by_day(samples, &Utc),
    }
}

/// Whose clock decides which sample is "noon".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoonClock {
    #[default]
    Local,
    City,
}

impl NoonClock {
    #[must_use]
    pub fn bucket(self, samples: &[ForecastSample], city_offset_seconds: i32) -> Vec<DayBucket> {
        match self {
            Self::Local => bucket_by_day_local(samples),
            Self::City => bucket_by_day_for_city(samples, city_offset_seconds),
        }
    }
}

fn date_and_hour<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<(NaiveDate, u32)> {
    let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
    let hour = utc.with_timezone(tz).hour();
    Some((utc.date_naive(), hour))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Local, NaiveDate, Utc};

    use super::*;
    use crate::test_support::{DAY_ONE, HOUR, sample_at};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(bucket_by_day(&[], &Utc).is_empty());
        assert!(bucket_by_day_local(&[]).is_empty());
    }

    #[test]
    fn single_sample_is_its_own_representative() {
        let sample = sample_at(DAY_ONE + 3 * HOUR);
        let buckets = bucket_by_day(std::slice::from_ref(&sample), &Utc);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].calendar_date, date(2024, 1, 1));
        assert_eq!(buckets[0].representative_sample, sample);
    }

    #[test]
    fn closer_to_noon_wins() {
        let nine = sample_at(DAY_ONE + 9 * HOUR);
        let thirteen = sample_at(DAY_ONE + 13 * HOUR);
        let buckets = bucket_by_day(&[nine, thirteen.clone()], &Utc);
        assert_eq!(buckets[0].representative_sample, thirteen);
    }

    #[test]
    fn equal_distance_keeps_first_occurrence() {
        let nine = sample_at(DAY_ONE + 9 * HOUR);
        let fifteen = sample_at(DAY_ONE + 15 * HOUR);
        let buckets = bucket_by_day(&[nine.clone(), fifteen.clone()], &Utc);
        assert_eq!(buckets[0].representative_sample, nine);

        let reversed = bucket_by_day(&[fifteen.clone(), nine], &Utc);
        assert_eq!(reversed[0].representative_sample, fifteen);
    }

    #[test]
    fn hour_is_read_in_the_given_zone_but_date_stays_utc() {
        // UTC hours 0,3,..,21 on 2024-01-01 are 5,8,..,2 at UTC+5.
        let samples: Vec<_> = (0..8).map(|i| sample_at(DAY_ONE + i * 3 * HOUR)).collect();
        let plus_five = FixedOffset::east_opt(5 * 3600).expect("valid offset");

        let buckets = bucket_by_day(&samples, &plus_five);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].calendar_date, date(2024, 1, 1));
        // Local 11:00 (06:00 UTC) is one hour from noon.
        assert_eq!(
            buckets[0].representative_sample.timestamp_utc_seconds,
            DAY_ONE + 6 * HOUR
        );
    }

    #[test]
    fn city_offset_variant_matches_explicit_zone() {
        let samples: Vec<_> = (0..16).map(|i| sample_at(DAY_ONE + i * 3 * HOUR)).collect();
        let offset = -4 * 3600;
        let tz = FixedOffset::east_opt(offset).expect("valid offset");
        assert_eq!(
            bucket_by_day_for_city(&samples, offset),
            bucket_by_day(&samples, &tz)
        );
        assert_eq!(
            bucket_by_day_for_city(&samples, 200_000),
            bucket_by_day(&samples, &Utc)
        );
    }

    #[test]
    fn local_variant_reads_hours_on_the_machine_clock() {
        let samples: Vec<_> = (0..40).map(|i| sample_at(DAY_ONE + i * 3 * HOUR)).collect();
        let buckets = bucket_by_day_local(&samples);
        assert_eq!(buckets, bucket_by_day(&samples, &Local));
        assert_eq!(buckets.len(), MAX_DAYS);

        for bucket in &buckets {
            let hour_delta = |sample: &ForecastSample| {
                date_and_hour(sample.timestamp_utc_seconds, &Local)
                    .map(|(_, hour)| hour.abs_diff(TARGET_HOUR))
            };
            let best = samples
                .iter()
                .filter(|s| {
                    date_and_hour(s.timestamp_utc_seconds, &Utc).map(|(d, _)| d)
                        == Some(bucket.calendar_date)
                })
                .filter_map(hour_delta)
                .min();
            assert_eq!(hour_delta(&bucket.representative_sample), best);
        }
    }

    #[test]
    fn noon_clock_selects_the_zone() {
        let samples: Vec<_> = (0..16).map(|i| sample_at(DAY_ONE + i * 3 * HOUR)).collect();
        assert_eq!(
            NoonClock::City.bucket(&samples, 9 * 3600),
            bucket_by_day_for_city(&samples, 9 * 3600)
        );
        assert_eq!(NoonClock::Local.bucket(&samples, 9 * 3600), bucket_by_day_local(&samples));
        assert_eq!(NoonClock::default(), NoonClock::Local);
    }

    #[test]
    fn unrepresentable_timestamps_are_skipped() {
        let good = sample_at(DAY_ONE + 12 * HOUR);
        let bad = sample_at(i64::MAX);
        let buckets = bucket_by_day(&[bad, good.clone()], &Utc);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].representative_sample, good);
    }
}
