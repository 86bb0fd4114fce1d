/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::time::Duration;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer};
use parse_duration::parse;

#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
#[inline] pub fn hours (n: u64)->Duration { Duration::from_secs(n * 3600) }

#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// signed time difference in fractional minutes
pub fn minutes_between (earlier: &DateTime<Utc>, later: &DateTime<Utc>) -> f64 {
    (*later - *earlier).num_milliseconds() as f64 / 60_000.0
}

/// convert a std Duration to a chrono TimeDelta, saturating at TimeDelta::MAX
pub fn to_time_delta (dur: Duration) -> TimeDelta {
    TimeDelta::from_std(dur).unwrap_or(TimeDelta::MAX)
}

pub fn naive_utc_date_to_utc_datetime (nd: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset( NaiveDateTime::new(nd, NaiveTime::MIN), Utc)
}

/// parse the date formats we see in flight snapshots: RFC 3339 with offset, naive ISO date-time
/// (assumed to be UTC) and plain dates (midnight UTC)
pub fn parse_datetime (s: &str)->Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_str(s, "%+") {
        return Some(dt.to_utc())
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some( DateTime::from_naive_utc_and_offset(ndt, Utc))
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some( DateTime::from_naive_utc_and_offset(ndt, Utc))
    }
    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some( naive_utc_date_to_utc_datetime(nd))
    }
    None
}

/// same as [`parse_datetime`] but reporting a parse error for unsupported input
pub fn parse_datetime_str (s: &str)->crate::Result<DateTime<Utc>> {
    parse_datetime(s).ok_or_else( || crate::parse_error!("unsupported date format: {:?}", s))
}

//--- support for serde

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    Other(serde::de::IgnoredAny),
}

/// lenient optional timestamp field: accepts date strings (see [`parse_datetime`]), epoch millis, null
/// or a missing field. Anything we can't interpret becomes `None` instead of failing the whole record,
/// which is how ineligible schedules are represented downstream
pub fn de_lenient_datetime <'a,D>(deserializer: D) -> Result<Option<DateTime<Utc>>,D::Error> where D: Deserializer<'a> {
    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    Ok( match raw {
        Some(RawTimestamp::Text(s)) => parse_datetime(&s),
        Some(RawTimestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms),
        _ => None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_datetime () {
        let dt = parse_datetime("2025-03-01T10:15:00+02:00").unwrap();
        assert_eq!( dt.hour(), 8);

        let dt = parse_datetime("2025-03-01T10:15:00").unwrap();
        assert_eq!( dt.hour(), 10);

        let dt = parse_datetime("2025-03-01").unwrap();
        assert_eq!( (dt.day(), dt.hour()), (1, 0));

        assert!( parse_datetime("not a date").is_none());
    }

    #[test]
    fn test_minutes_between () {
        let a = parse_datetime("2025-03-01T10:00:00Z").unwrap();
        let b = parse_datetime("2025-03-01T11:30:00Z").unwrap();
        assert_eq!( minutes_between(&a, &b), 90.0);
        assert_eq!( minutes_between(&b, &a), -90.0);
    }
}
