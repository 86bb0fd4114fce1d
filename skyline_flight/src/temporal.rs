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

//! flight lifecycle classification. This is the single place that decides if a flight is in the air,
//! everything that needs status or progress goes through [`classify`]. Nothing here holds state, callers
//! have to re-classify whenever `now` changes

use std::time::Duration;
use chrono::{DateTime,Utc};
use skyline_common::clamp01;
use crate::{Flight, FlightStatus};

/// lifecycle phase of a flight at a given time
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum FlightPhase {
    NotStarted,
    InProgress(f64), // progress fraction in [0,1]
    Completed,
    Cancelled,
}

impl FlightPhase {
    #[inline] pub fn is_in_progress (&self)->bool { matches!( self, FlightPhase::InProgress(_)) }

    pub fn progress (&self)->Option<f64> {
        if let FlightPhase::InProgress(p) = self { Some(*p) } else { None }
    }
}

/// departure and arrival if both are present and arrival is after departure
pub fn valid_schedule (flight: &Flight)->Option<(DateTime<Utc>,DateTime<Utc>)> {
    match (flight.scheduled_departure, flight.scheduled_arrival) {
        (Some(dep), Some(arr)) if arr > dep => Some((dep,arr)),
        _ => None
    }
}

/// classify the flight at `now`. Cancelled flights always report `Cancelled`, flights without a valid
/// schedule always report `NotStarted`. Both schedule boundaries count as in-progress
pub fn classify (flight: &Flight, now: DateTime<Utc>)->FlightPhase {
    if flight.is_cancelled() {
        return FlightPhase::Cancelled
    }

    match valid_schedule(flight) {
        Some((dep,arr)) => {
            if now < dep {
                FlightPhase::NotStarted
            } else if now > arr {
                FlightPhase::Completed
            } else {
                let total = (arr - dep).num_milliseconds() as f64;
                let elapsed = (now - dep).num_milliseconds() as f64;
                FlightPhase::InProgress( clamp01( elapsed / total))
            }
        }
        None => FlightPhase::NotStarted
    }
}

#[inline]
pub fn is_in_progress (flight: &Flight, now: DateTime<Utc>)->bool {
    classify(flight,now).is_in_progress()
}

/// progress details of an in-progress flight
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct LiveProgress {
    pub progress: f64,
    pub elapsed: Duration,
    pub remaining: Duration,
}

impl LiveProgress {
    pub fn elapsed_minutes (&self)->f64 { self.elapsed.as_secs_f64() / 60.0 }
    pub fn remaining_minutes (&self)->f64 { self.remaining.as_secs_f64() / 60.0 }
    pub fn percent (&self)->u32 { (self.progress * 100.0).round() as u32 }
}

pub fn live_progress (flight: &Flight, now: DateTime<Utc>)->Option<LiveProgress> {
    let progress = classify(flight,now).progress()?;
    let (dep,arr) = valid_schedule(flight)?;

    let elapsed = (now - dep).to_std().unwrap_or_default();
    let remaining = (arr - now).to_std().unwrap_or_default();
    Some( LiveProgress { progress, elapsed, remaining })
}

/// status to display: cancelled stays cancelled, anything that ended in the past is completed
pub fn effective_status (flight: &Flight, now: DateTime<Utc>)->FlightStatus {
    if flight.is_cancelled() {
        return FlightStatus::Cancelled
    }

    let end = flight.scheduled_arrival.or(flight.scheduled_departure).or(flight.date);
    match end {
        Some(end) if end < now => FlightStatus::Completed,
        _ => flight.status
    }
}

/// "45m" or "2h 5m". Negative values show as "0m"
pub fn format_minutes (minutes: f64)->String {
    let m = if minutes.is_finite() { minutes.round().max(0.0) as u64 } else { 0 };
    let h = m / 60;
    let mm = m % 60;
    if h == 0 { format!("{mm}m") } else { format!("{h}h {mm}m") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes () {
        assert_eq!( format_minutes(45.0), "45m");
        assert_eq!( format_minutes(125.4), "2h 5m");
        assert_eq!( format_minutes(60.0), "1h 0m");
        assert_eq!( format_minutes(-3.0), "0m");
        assert_eq!( format_minutes(f64::NAN), "0m");
    }
}
