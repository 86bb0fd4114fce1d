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
#![allow(uncommon_codepoints)]

//! the skyline flight engine: flight lifecycle classification, featured flight selection, live position
//! simulation of in-progress flights with camera follow, and time compressed preview playback of a
//! single route. The pure computations live in their own modules, the time driven parts are coordinated
//! by the [`actor::FlightMapActor`]

use std::{fmt, path::Path};
use serde::{Serialize,Deserialize};
use chrono::{DateTime,Utc};
use skyline_common::{datetime::de_lenient_datetime, geo::GeoPoint, is_none};

pub mod errors;
use errors::Result;

pub mod config;
pub use config::{FlightMapConfig, PreviewConfig, load_config};

pub mod temporal;
pub mod selection;
pub mod metrics;
pub mod tracking;
pub mod camera;
pub mod preview;
pub mod timer;
pub mod actor;

/* #region Airport ************************************************************************************************/

/// airport as referenced by a flight. Coordinates are optional since manually entered flights might not have them
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(from="RawAirport", into="RawAirport")]
pub struct Airport {
    pub name: String,
    pub iata: Option<String>,
    pub city: Option<String>,
    pub location: Option<GeoPoint>,
}

impl Airport {
    pub fn new (name: impl ToString, iata: Option<&str>, location: Option<GeoPoint>)->Self {
        Airport { name: name.to_string(), iata: iata.map(|s| s.to_string()), city: None, location }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.iata {
            Some(iata) => write!(f, "{} ({})", self.name, iata),
            None => write!(f, "{}", self.name)
        }
    }
}

// the snapshot format keeps lat/lon as top level airport fields
#[derive(Serialize,Deserialize)]
struct RawAirport {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if="is_none")]
    iata: Option<String>,
    #[serde(default, skip_serializing_if="is_none")]
    city: Option<String>,
    #[serde(default, alias="lat", skip_serializing_if="is_none")]
    latitude: Option<f64>,
    #[serde(default, alias="lon", alias="lng", skip_serializing_if="is_none")]
    longitude: Option<f64>,
}

impl From<RawAirport> for Airport {
    fn from (raw: RawAirport)->Self {
        let location = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lon)) => Some( GeoPoint::new_unchecked( lat, lon)),
            _ => None
        };
        Airport { name: raw.name, iata: raw.iata, city: raw.city, location }
    }
}

impl From<Airport> for RawAirport {
    fn from (a: Airport)->Self {
        RawAirport {
            name: a.name, iata: a.iata, city: a.city,
            latitude: a.location.map(|p| p.latitude_degrees()),
            longitude: a.location.map(|p| p.longitude_degrees())
        }
    }
}

/* #endregion Airport */

/* #region Flight *************************************************************************************************/

/// the stored (user visible) status. Only `Cancelled` is authoritative, the others can be superseded
/// by the schedule (see [`temporal::effective_status`])
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum FlightStatus {
    #[default]
    Upcoming,
    Completed,
    Cancelled
}

/// a flight record as provided by the external store. The engine never mutates flights
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct Flight {
    pub id: String,

    #[serde(default, skip_serializing_if="is_none")]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if="is_none")]
    pub airline: Option<String>,

    #[serde(rename="from", alias="origin", default)]
    pub origin: Option<Airport>,
    #[serde(rename="to", alias="destination", default)]
    pub destination: Option<Airport>,

    /// the travel day (fallback if there is no scheduled departure)
    #[serde(default, deserialize_with="de_lenient_datetime", skip_serializing_if="is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(rename="departureAt", alias="scheduledDeparture", default, deserialize_with="de_lenient_datetime", skip_serializing_if="is_none")]
    pub scheduled_departure: Option<DateTime<Utc>>,
    #[serde(rename="arrivalAt", alias="scheduledArrival", default, deserialize_with="de_lenient_datetime", skip_serializing_if="is_none")]
    pub scheduled_arrival: Option<DateTime<Utc>>,

    /// planned duration as entered by the user ("2h 30m", "2.5 hours", "02:30")
    #[serde(default, skip_serializing_if="is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if="is_none")]
    pub distance_km: Option<f64>,

    #[serde(default)]
    pub status: FlightStatus,
}

impl Flight {
    pub fn new (id: impl ToString, origin: Option<Airport>, destination: Option<Airport>)->Self {
        Flight {
            id: id.to_string(),
            flight_number: None,
            airline: None,
            origin,
            destination,
            date: None,
            scheduled_departure: None,
            scheduled_arrival: None,
            duration: None,
            distance_km: None,
            status: FlightStatus::Upcoming
        }
    }

    pub fn with_schedule (mut self, departure: DateTime<Utc>, arrival: DateTime<Utc>)->Self {
        self.scheduled_departure = Some(departure);
        self.scheduled_arrival = Some(arrival);
        self
    }

    pub fn with_status (mut self, status: FlightStatus)->Self {
        self.status = status;
        self
    }

    pub fn with_duration (mut self, duration: impl ToString)->Self {
        self.duration = Some(duration.to_string());
        self
    }

    #[inline] pub fn is_cancelled (&self)->bool { self.status == FlightStatus::Cancelled }

    pub fn origin_location (&self)->Option<GeoPoint> { self.origin.as_ref().and_then(|a| a.location) }
    pub fn destination_location (&self)->Option<GeoPoint> { self.destination.as_ref().and_then(|a| a.location) }

    /// origin and destination coordinates if both are known
    pub fn route (&self)->Option<(GeoPoint,GeoPoint)> {
        Some( (self.origin_location()?, self.destination_location()?) )
    }

    /// the instant used for ordering: scheduled departure, else the travel date
    pub fn start_time (&self)->Option<DateTime<Utc>> {
        self.scheduled_departure.or(self.date)
    }

    pub fn label (&self)->&str {
        self.flight_number.as_deref().unwrap_or( self.id.as_str())
    }

    /// read a JSON array of flights
    pub fn load_snapshot<P: AsRef<Path>> (path: P)->Result<Vec<Flight>> {
        let data = std::fs::read( path.as_ref())?;
        Ok( serde_json::from_slice( data.as_slice())? )
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |a: &Option<Airport>| a.as_ref().map(|a| a.name.clone()).unwrap_or_else(|| "?".to_string());
        write!(f, "{} {} -> {}", self.label(), name(&self.origin), name(&self.destination))
    }
}

/* #endregion Flight */
