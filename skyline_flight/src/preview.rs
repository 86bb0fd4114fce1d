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

//! time compressed playback of a single flight route. [`PreviewPlayer`] is a plain state machine that
//! tells its driver what to show and how long to wait before the next step. It does not own any timers,
//! the actor schedules exactly one pending step at a time

use std::time::Duration;
use serde::Serialize;
use skyline_common::{angle::{shortest_rotation, Angle360}, geo::{initial_bearing, lerp, sample_path, GeoPoint}};
use crate::{
    Flight, FlightMapConfig, PreviewConfig,
    errors::{invalid_route, Result, SkylineFlightError},
    metrics::planned_duration_minutes
};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
#[serde(rename_all="lowercase")]
pub enum PreviewPhase {
    Flying,
    Landing,
    Finished
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct PreviewPlaybackState {
    pub flight_id: String,
    pub segment_index: usize,
    pub position: GeoPoint,
    pub bearing: Angle360,
    pub rotation: f64, // unwrapped rotation in degrees, consecutive values differ by at most 180
    pub phase: PreviewPhase,
    pub target: GeoPoint,   // where the marker has to be once `duration` has elapsed
    pub duration: Duration,
}

impl PreviewPlaybackState {
    /// marker position `elapsed` after this state was reported, moving linearly towards `target`
    pub fn position_after (&self, elapsed: Duration)->GeoPoint {
        if self.duration.is_zero() {
            self.target
        } else {
            lerp( &self.position, &self.target, elapsed.as_secs_f64() / self.duration.as_secs_f64())
        }
    }
}

/// what the driver has to do next
#[derive(Debug,Clone,PartialEq)]
pub enum PreviewStep {
    /// move from `state.position` to `target` within `duration`, then call `on_timer`
    Segment { state: PreviewPlaybackState, target: GeoPoint, duration: Duration },
    /// show the landing state for `duration`, then call `on_timer`
    Landing { state: PreviewPlaybackState, duration: Duration },
    /// playback is finished, call `on_timer` after `deselect_after` to get the deselect step
    Finished { state: PreviewPlaybackState, deselect_after: Duration },
    /// the previewed flight should be deselected
    Deselect { flight_id: String },
    Done
}

impl PreviewStep {
    /// how long to wait before calling `on_timer`, `None` if there is nothing left to schedule
    pub fn delay (&self)->Option<Duration> {
        match self {
            PreviewStep::Segment{duration,..} => Some(*duration),
            PreviewStep::Landing{duration,..} => Some(*duration),
            PreviewStep::Finished{deselect_after,..} => Some(*deselect_after),
            _ => None
        }
    }

    pub fn state (&self)->Option<&PreviewPlaybackState> {
        match self {
            PreviewStep::Segment{state,..} | PreviewStep::Landing{state,..} | PreviewStep::Finished{state,..} => Some(state),
            _ => None
        }
    }
}

/// total playback duration for a flight: planned minutes scaled to `ms_per_planned_minute`, clamped to
/// the configured range. Flights without known duration use `fallback_minutes`
pub fn preview_duration (flight: &Flight, config: &PreviewConfig)->Duration {
    let minutes = planned_duration_minutes(flight).unwrap_or( config.fallback_minutes);
    let ms = (minutes.max(0.0) * config.ms_per_planned_minute as f64).round() as u64;
    Duration::from_millis(ms).max( config.min_duration).min( config.max_duration)
}

/// player for the sampled great circle route of `flight`. Flights without (valid) airport coordinates
/// can't be previewed. If no `total` is given we use [`preview_duration`]
pub fn preview_player_for (flight: &Flight, config: &FlightMapConfig, total: Option<Duration>)->Result<PreviewPlayer> {
    let (origin,destination) = flight.route()
        .ok_or_else( || invalid_route!("flight {} has no airport coordinates", flight.id))?;

    for p in [&origin, &destination] {
        if !p.is_valid() {
            return Err( SkylineFlightError::InvalidCoordinate( format!("{} in flight {}", p, flight.id)))
        }
    }

    let path = sample_path( &origin, &destination, config.preview_samples);
    let total = total.unwrap_or_else( || preview_duration( flight, &config.preview));
    PreviewPlayer::new( &flight.id, path, total, &config.preview)
}

#[derive(Debug,Clone,Copy,PartialEq)]
enum Stage {
    Ready,
    Flying(usize), // segment index
    Landing,
    Finished,
    Done
}

#[derive(Debug)]
pub struct PreviewPlayer {
    flight_id: String,
    path: Vec<GeoPoint>,
    segment_duration: Duration,
    landing_duration: Duration,
    deselect_delay: Duration,

    stage: Stage,
    rotation: f64,
}

impl PreviewPlayer {
    pub fn new (flight_id: impl ToString, path: Vec<GeoPoint>, total: Duration, config: &PreviewConfig)->Result<Self> {
        let flight_id = flight_id.to_string();
        if path.len() < 2 {
            return Err( invalid_route!("preview of {} needs at least 2 path points, got {}", flight_id, path.len()))
        }

        let segment_duration = total / (path.len() - 1) as u32;
        let rotation = initial_bearing( &path[0], &path[1]).degrees();

        Ok( PreviewPlayer {
            flight_id,
            path,
            segment_duration,
            landing_duration: config.landing_duration,
            deselect_delay: config.deselect_delay,
            stage: Stage::Ready,
            rotation
        })
    }

    pub fn flight_id (&self)->&str { self.flight_id.as_str() }
    pub fn segment_count (&self)->usize { self.path.len() - 1 }
    pub fn segment_duration (&self)->Duration { self.segment_duration }
    pub fn rotation (&self)->f64 { self.rotation }
    pub fn is_done (&self)->bool { self.stage == Stage::Done }

    pub fn start (&mut self)->PreviewStep {
        if self.stage != Stage::Ready {
            return PreviewStep::Done
        }
        self.fly_segment(0)
    }

    /// advance after the delay of the last step has elapsed
    pub fn on_timer (&mut self)->PreviewStep {
        match self.stage {
            Stage::Flying(i) => {
                if i + 1 < self.segment_count() {
                    self.fly_segment( i + 1)
                } else {
                    self.stage = Stage::Landing;
                    let last = self.path.len() - 1;
                    let state = self.state_at( last, self.path[last], self.landing_duration, PreviewPhase::Landing);
                    PreviewStep::Landing { state, duration: self.landing_duration }
                }
            }
            Stage::Landing => {
                self.stage = Stage::Finished;
                let last = self.path.len() - 1;
                let state = self.state_at( last, self.path[last], Duration::ZERO, PreviewPhase::Finished);
                PreviewStep::Finished { state, deselect_after: self.deselect_delay }
            }
            Stage::Finished => {
                self.stage = Stage::Done;
                PreviewStep::Deselect { flight_id: self.flight_id.clone() }
            }
            Stage::Ready | Stage::Done => PreviewStep::Done
        }
    }

    fn fly_segment (&mut self, i: usize)->PreviewStep {
        let bearing = initial_bearing( &self.path[i], &self.path[i+1]);
        self.rotation += shortest_rotation( self.rotation, bearing.degrees());
        self.stage = Stage::Flying(i);

        let state = self.state_at( i, self.path[i+1], self.segment_duration, PreviewPhase::Flying);
        PreviewStep::Segment { state, target: self.path[i+1], duration: self.segment_duration }
    }

    fn state_at (&self, i: usize, target: GeoPoint, duration: Duration, phase: PreviewPhase)->PreviewPlaybackState {
        PreviewPlaybackState {
            flight_id: self.flight_id.clone(),
            segment_index: i,
            position: self.path[i],
            bearing: Angle360::from_degrees( self.rotation),
            rotation: self.rotation,
            phase,
            target,
            duration
        }
    }
}
