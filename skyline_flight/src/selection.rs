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

//! which flight to feature and how to order flight lists

use std::cmp::Ordering;
use chrono::{DateTime,Utc};
use crate::{Flight, temporal::{classify, FlightPhase}};

/// the featured flight: the in-progress flight that lands first, else the next flight to start.
/// Cancelled flights are never featured
pub fn select_featured<'a> (flights: &'a [Flight], now: DateTime<Utc>)->Option<&'a Flight> {
    let candidates = || flights.iter().filter( |f| !f.is_cancelled());

    // min_by_key returns the first of equal elements, which keeps input order for exact ties
    let active = candidates()
        .filter( |f| classify(f,now).is_in_progress())
        .min_by_key( |f| f.scheduled_arrival);
    if active.is_some() {
        return active
    }

    candidates()
        .filter_map( |f| f.start_time().filter( |t| *t >= now).map( |t| (t,f)))
        .min_by_key( |(t,_)| *t)
        .map( |(_,f)| f)
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord)]
enum DisplayTier {
    InProgress,
    Upcoming,
    Rest
}

fn display_tier (flight: &Flight, now: DateTime<Utc>)->DisplayTier {
    match classify(flight,now) {
        FlightPhase::InProgress(_) => DisplayTier::InProgress,
        FlightPhase::Cancelled => DisplayTier::Rest,
        _ => {
            if flight.start_time().is_some_and( |t| t >= now) { DisplayTier::Upcoming } else { DisplayTier::Rest }
        }
    }
}

/// in-progress flights first, then upcoming ones (soonest first), then everything else (most recent first).
/// Flights without start time go last within their tier. The sort is stable
pub fn order_for_display<'a> (flights: &'a [Flight], now: DateTime<Utc>)->Vec<&'a Flight> {
    let mut ranked: Vec<(DisplayTier,Option<DateTime<Utc>>,&Flight)> = flights.iter()
        .map( |f| (display_tier(f,now), f.start_time(), f))
        .collect();

    ranked.sort_by( |a,b| {
        a.0.cmp(&b.0).then_with( || {
            match a.0 {
                DisplayTier::Rest => cmp_start_desc( a.1, b.1),
                _ => cmp_start_asc( a.1, b.1)
            }
        })
    });

    ranked.into_iter().map( |(_,_,f)| f).collect()
}

fn cmp_start_asc (a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>)->Ordering {
    match (a,b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal
    }
}

fn cmp_start_desc (a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>)->Ordering {
    match (a,b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal
    }
}

/// case insensitive substring match on id, flight number and airport names. An empty query matches everything
pub fn filter_by_query<'a> (flights: &'a [Flight], query: &str)->Vec<&'a Flight> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return flights.iter().collect()
    }

    let matches = |s: Option<&str>| s.is_some_and( |s| s.to_lowercase().contains(&q));

    flights.iter().filter( |f| {
        matches( Some(f.id.as_str()))
        || matches( f.flight_number.as_deref())
        || matches( f.origin.as_ref().map(|a| a.name.as_str()))
        || matches( f.destination.as_ref().map(|a| a.name.as_str()))
    }).collect()
}
