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

//! flight metrics derived from user entered data: planned duration and route distance

use lazy_static::lazy_static;
use regex::Regex;
use skyline_common::geo::distance_km;
use crate::{Flight, temporal::valid_schedule};

lazy_static! {
    static ref HHMM_RE: Regex = Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap();
    static ref HOURS_RE: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*h").unwrap();
    static ref MINUTES_RE: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*m").unwrap();
}

/// parse a human duration string into whole minutes. Accepts "HH:MM", "2h 30m", "2h", "150m", "2.5 hours"
/// and "90 minutes". Returns `None` for empty, unparsable or zero durations
pub fn parse_duration_minutes (s: &str)->Option<u64> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None
    }

    if let Some(caps) = HHMM_RE.captures(&s) {
        let h: u64 = caps[1].parse().ok()?;
        let m: u64 = caps[2].parse().ok()?;
        let total = h * 60 + m;
        return if total > 0 { Some(total) } else { None }
    }

    // note the 'h' and 'm' patterns also cover "hours" and "minutes"
    let hours = HOURS_RE.captures(&s).and_then( |c| c[1].parse::<f64>().ok());
    let minutes = MINUTES_RE.captures(&s).and_then( |c| c[1].parse::<f64>().ok());
    if hours.is_none() && minutes.is_none() {
        return None
    }

    let total = (hours.unwrap_or(0.0) * 60.0 + minutes.unwrap_or(0.0)).round();
    if total >= 1.0 { Some(total as u64) } else { None }
}

/// planned flight duration in minutes: the entered duration, else the scheduled block time
pub fn planned_duration_minutes (flight: &Flight)->Option<f64> {
    if let Some(m) = flight.duration.as_deref().and_then( parse_duration_minutes) {
        return Some(m as f64)
    }

    valid_schedule(flight).map( |(dep,arr)| ((arr - dep).num_seconds() as f64 / 60.0).round())
}

/// rounded km with thousands separators ("1,234 km"). Negative or non-finite values show as "0 km"
pub fn format_distance_km (km: f64)->String {
    let km = if km.is_finite() { km.round().max(0.0) as u64 } else { 0 };
    let digits = km.to_string();

    let mut s = String::with_capacity( digits.len() + digits.len()/3 + 3);
    for (i,c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            s.push(',');
        }
        s.push(c);
    }
    s.push_str(" km");
    s
}

/// the stored route distance, or the great circle distance between the airports if we know their locations
pub fn route_distance_km (flight: &Flight)->Option<f64> {
    if let Some(km) = flight.distance_km.filter( |km| km.is_finite() && *km >= 0.0) {
        return Some(km)
    }

    let (a,b) = flight.route()?;
    if a.is_valid() && b.is_valid() { Some( distance_km( &a, &b)) } else { None }
}
