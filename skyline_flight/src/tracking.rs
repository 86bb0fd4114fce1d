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

//! live position simulation of in-progress flights. Each tick is a full recompute from the flight
//! snapshot and the current time, the only state we keep is in the explicit [`TrackingSession`]
//! (lifecycle, focused flight and last known viewport)

use chrono::{DateTime,Utc};
use serde::Serialize;
use tracing::{debug,info,warn};
use skyline_common::{
    angle::Angle360, clamp01,
    geo::{GeoPoint, initial_bearing, sample_path, slerp}
};
use crate::{
    Flight, FlightMapConfig,
    camera::{CameraFollow, Region},
    errors::{Result, SkylineFlightError},
    temporal::classify
};

/* #region route split ********************************************************************************************/

/// partition of a sampled route at a progress fraction. The last traveled point is the first remaining point
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct RouteSplit {
    pub traveled: Vec<GeoPoint>,
    pub remaining: Vec<GeoPoint>,
}

/// split `path` at the sample that was last passed at `progress`. Paths with less than 2 points are
/// returned unchanged as both parts
pub fn split_route (path: &[GeoPoint], progress: f64)->RouteSplit {
    let len = path.len();
    if len < 2 {
        return RouteSplit { traveled: path.to_vec(), remaining: path.to_vec() }
    }

    let idx = ((clamp01(progress) * (len-1) as f64).floor() as usize).min(len-1);
    RouteSplit {
        traveled: path[..=idx].to_vec(),
        remaining: path[idx..].to_vec()
    }
}

/// position and tangent bearing at `progress` along a sampled route, interpolating linearly between
/// the neighbouring samples. `None` for empty paths
pub fn point_along_route (path: &[GeoPoint], progress: f64)->Option<(GeoPoint,Angle360)> {
    match path.len() {
        0 => None,
        1 => Some( (path[0], Angle360::from_degrees(0.0))),
        len => {
            let x = clamp01(progress) * (len-1) as f64;
            let i0 = (x.floor() as usize).min(len-2);
            let i1 = i0 + 1;
            let f = x - i0 as f64;

            let a = &path[i0];
            let b = &path[i1];
            let p = GeoPoint::new_unchecked(
                a.latitude_degrees() + (b.latitude_degrees() - a.latitude_degrees()) * f,
                a.longitude_degrees() + (b.longitude_degrees() - a.longitude_degrees()) * f
            );
            Some( (p, initial_bearing(a,b)))
        }
    }
}

/* #endregion route split */

/* #region live track computation *********************************************************************************/

/// per flight output of a live tracking tick
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct LiveTrackState {
    pub flight_id: String,
    pub progress: f64,
    pub position: GeoPoint,
    pub bearing: Angle360, // from the current position towards the destination
    pub route_split: RouteSplit,
}

/// the live state of `flight` at `now`, `Ok(None)` if the flight is not in the air or has no route.
/// Malformed airport coordinates are reported as errors
pub fn live_track_state (flight: &Flight, now: DateTime<Utc>, samples: usize)->Result<Option<LiveTrackState>> {
    let progress = match classify(flight, now).progress() {
        Some(p) => p,
        None => return Ok(None)
    };
    let (origin, destination) = match flight.route() {
        Some(route) => route,
        None => return Ok(None)
    };

    for p in [&origin, &destination] {
        if !p.is_valid() {
            return Err( SkylineFlightError::InvalidCoordinate( format!("{} in flight {}", p, flight.id)))
        }
    }

    let position = slerp( &origin, &destination, progress);
    let bearing = initial_bearing( &position, &destination);
    let path = sample_path( &origin, &destination, samples);
    let route_split = split_route( &path, progress);

    Ok( Some( LiveTrackState { flight_id: flight.id.clone(), progress, position, bearing, route_split }))
}

/// live states for all eligible flights. Flights that fail are logged and skipped, they never abort the
/// computation for the others
pub fn live_tracks (flights: &[Flight], now: DateTime<Utc>, samples: usize)->Vec<LiveTrackState> {
    flights.iter().filter_map( |f| {
        match live_track_state( f, now, samples) {
            Ok(state) => state,
            Err(e) => {
                warn!("skipping flight {}: {}", f.id, e);
                None
            }
        }
    }).collect()
}

/* #endregion live track computation */

/* #region tracking session ***************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum TrackingState {
    Idle,
    Running
}

/// result of a session tick
#[derive(Debug,Clone,Default)]
pub struct TickUpdate {
    pub tracks: Vec<LiveTrackState>,
    pub camera: Option<Region>, // set if the camera has to move to keep the focused flight in view
}

/// the explicit tracking context: lifecycle state, focused flight and the viewport we last moved to
#[derive(Debug,Clone)]
pub struct TrackingSession {
    state: TrackingState,
    samples: usize,
    camera: CameraFollow,
    viewport: Option<Region>,
    focused: Option<String>,
}

impl TrackingSession {
    pub fn new (config: &FlightMapConfig)->Self {
        TrackingSession {
            state: TrackingState::Idle,
            samples: config.live_samples,
            camera: CameraFollow::new( config.recenter_threshold, config.min_span_deg, config.focus_span_deg),
            viewport: None,
            focused: None
        }
    }

    pub fn state (&self)->TrackingState { self.state }
    pub fn is_running (&self)->bool { self.state == TrackingState::Running }

    /// returns true if this was a transition from Idle
    pub fn start (&mut self)->bool {
        let was_idle = self.state == TrackingState::Idle;
        if was_idle { info!("live tracking started") }
        self.state = TrackingState::Running;
        was_idle
    }

    /// returns true if this was a transition from Running
    pub fn stop (&mut self)->bool {
        let was_running = self.state == TrackingState::Running;
        if was_running { info!("live tracking stopped") }
        self.state = TrackingState::Idle;
        was_running
    }

    pub fn viewport (&self)->Option<&Region> { self.viewport.as_ref() }
    pub fn set_viewport (&mut self, region: Region) { self.viewport = Some(region) }

    pub fn focused (&self)->Option<&str> { self.focused.as_deref() }
    pub fn focus (&mut self, flight_id: impl ToString) { self.focused = Some(flight_id.to_string()) }
    pub fn clear_focus (&mut self) { self.focused = None }

    /// compute live tracks for the snapshot. This is a no-op while Idle
    pub fn tick (&mut self, flights: &[Flight], now: DateTime<Utc>)->TickUpdate {
        if !self.is_running() {
            debug!("ignoring tick while idle");
            return TickUpdate::default()
        }

        let tracks = live_tracks( flights, now, self.samples);
        let camera = self.follow_focused( &tracks);
        TickUpdate { tracks, camera }
    }

    fn follow_focused (&mut self, tracks: &[LiveTrackState])->Option<Region> {
        let id = self.focused.as_deref()?;
        let track = tracks.iter().find( |t| t.flight_id == id)?;

        let region = self.camera.follow( self.viewport.as_ref(), &track.position)?;
        self.viewport = Some(region);
        Some(region)
    }

    /// the region centered on the live position of the focused flight, if that flight is in the air
    pub fn focus_region (&mut self, flights: &[Flight], now: DateTime<Utc>)->Option<Region> {
        let id = self.focused.as_deref()?;
        let flight = flights.iter().find( |f| f.id == id)?;

        match live_track_state( flight, now, 1) {
            Ok(Some(state)) => {
                let region = self.camera.focus( &state.position);
                self.viewport = Some(region);
                Some(region)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("cannot focus flight {}: {}", id, e);
                None
            }
        }
    }
}

/* #endregion tracking session */
