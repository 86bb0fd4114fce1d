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

use std::{path::Path, time::Duration};
use serde::Deserialize;
use tracing::info;
use skyline_common::datetime::{deserialize_duration, millis, secs};
use crate::errors::Result;

/// tunables for the flight map engine. All fields are optional in the RON source
#[derive(Deserialize,Debug,Clone)]
#[serde(default)]
pub struct FlightMapConfig {
    #[serde(deserialize_with="deserialize_duration")]
    pub tick_interval: Duration,  // live tracking cadence

    pub live_samples: usize,      // great circle segments for live route splits
    pub preview_samples: usize,   // great circle segments for preview playback

    pub recenter_threshold: f64,  // fraction of viewport span the focused flight may drift before we recenter
    pub min_span_deg: f64,        // never zoom in tighter than this when recentering
    pub focus_span_deg: f64,      // span used when explicitly focusing a flight

    pub preview: PreviewConfig,

    pub channel_bounds: usize,    // actor message queue size
}

impl Default for FlightMapConfig {
    fn default()->Self {
        FlightMapConfig {
            tick_interval: secs(1),
            live_samples: 80,
            preview_samples: 150,
            recenter_threshold: 0.25,
            min_span_deg: 0.45,
            focus_span_deg: 0.8,
            preview: PreviewConfig::default(),
            channel_bounds: 64,
        }
    }
}

#[derive(Deserialize,Debug,Clone)]
#[serde(default)]
pub struct PreviewConfig {
    pub ms_per_planned_minute: u64,
    #[serde(deserialize_with="deserialize_duration")]
    pub min_duration: Duration,
    #[serde(deserialize_with="deserialize_duration")]
    pub max_duration: Duration,
    pub fallback_minutes: f64,    // planned duration if the flight does not tell us
    #[serde(deserialize_with="deserialize_duration")]
    pub landing_duration: Duration,
    #[serde(deserialize_with="deserialize_duration")]
    pub deselect_delay: Duration, // after landing finished
}

impl Default for PreviewConfig {
    fn default()->Self {
        PreviewConfig {
            ms_per_planned_minute: 35,
            min_duration: millis(2500),
            max_duration: millis(12000),
            fallback_minutes: 180.0,
            landing_duration: millis(1000),
            deselect_delay: millis(1500),
        }
    }
}

/// load a RON config from `path`. A missing file is not an error, we just use the defaults
pub fn load_config<P: AsRef<Path>> (path: P)->Result<FlightMapConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        info!("no config file {:?}, using defaults", path);
        return Ok( FlightMapConfig::default())
    }

    let data = std::fs::read(path)?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_ron () {
        let cfg: FlightMapConfig = ron::from_str(r#"(
            tick_interval: "500ms",
            live_samples: 40,
            preview: ( landing_duration: "2s" )
        )"#).unwrap();

        assert_eq!( cfg.tick_interval, millis(500));
        assert_eq!( cfg.live_samples, 40);
        assert_eq!( cfg.preview_samples, 150);
        assert_eq!( cfg.preview.landing_duration, secs(2));
        assert_eq!( cfg.preview.deselect_delay, millis(1500));
    }

    #[test]
    fn test_missing_file () {
        let cfg = load_config("does/not/exist.ron").unwrap();
        assert_eq!( cfg.min_span_deg, 0.45);
    }

    #[test]
    fn test_bundled_config () {
        let cfg = load_config( concat!( env!("CARGO_MANIFEST_DIR"), "/configs/flight_map.ron")).unwrap();
        assert_eq!( cfg.tick_interval, secs(1));
        assert_eq!( cfg.preview.max_duration, millis(12000));
    }
}
