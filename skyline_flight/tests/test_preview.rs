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
#![allow(unused)]

use std::time::Duration;
use chrono::{TimeDelta, Utc};
use skyline_common::geo::{sample_path, GeoPoint};
use skyline_flight::{
    Airport, Flight, FlightMapConfig, PreviewConfig,
    errors::SkylineFlightError,
    preview::{preview_duration, preview_player_for, PreviewPhase, PreviewPlayer, PreviewStep}
};

/// run with "cargo test --test test_preview -- --nocapture"

fn ms (n: u64)->Duration { Duration::from_millis(n) }

fn route_flight (id: &str, from: GeoPoint, to: GeoPoint)->Flight {
    Flight::new( id, Some( Airport::new( "A", None, Some(from))), Some( Airport::new( "B", None, Some(to))))
}

#[test]
fn test_preview_duration () {
    let cfg = PreviewConfig::default();
    let f = Flight::new( "f", None, None);

    assert_eq!( preview_duration( &f.clone().with_duration("3h"), &cfg), ms(6300));
    assert_eq!( preview_duration( &f, &cfg), ms(6300)); // 180min fallback
    assert_eq!( preview_duration( &f.clone().with_duration("45m"), &cfg), ms(2500)); // 1575 clamped up
    assert_eq!( preview_duration( &f.clone().with_duration("14h"), &cfg), ms(12000)); // 29400 clamped down
    assert_eq!( preview_duration( &f.clone().with_duration("garbage"), &cfg), ms(6300));

    // no duration string, use the schedule
    let now = Utc::now();
    let scheduled = f.clone().with_schedule( now, now + TimeDelta::minutes(100));
    assert_eq!( preview_duration( &scheduled, &cfg), ms(3500));
}

#[test]
fn test_short_path_rejected () {
    let cfg = PreviewConfig::default();
    let p = GeoPoint::new_unchecked( 1.0, 2.0);
    assert!( matches!( PreviewPlayer::new( "x", vec![p], ms(1000), &cfg), Err(SkylineFlightError::InvalidRoute(_))));
    assert!( PreviewPlayer::new( "x", vec![], ms(1000), &cfg).is_err());
}

#[test]
fn test_flight_without_coordinates_rejected () {
    let config = FlightMapConfig::default();
    let f = Flight::new( "f", Some( Airport::new( "A", None, None)), None);
    assert!( preview_player_for( &f, &config, None).is_err());

    let bad = route_flight( "bad", GeoPoint::new_unchecked( 0.0, 0.0), GeoPoint::new_unchecked( 95.0, 0.0));
    assert!( matches!( preview_player_for( &bad, &config, None), Err(SkylineFlightError::InvalidCoordinate(_))));
}

#[test]
fn test_step_sequence () {
    let cfg = PreviewConfig::default();
    let path = sample_path( &GeoPoint::new_unchecked( 48.2, 16.4), &GeoPoint::new_unchecked( 51.5, -0.1), 4); // 5 points
    let mut player = PreviewPlayer::new( "f1", path.clone(), ms(4000), &cfg).unwrap();
    assert_eq!( player.segment_count(), 4);
    assert_eq!( player.segment_duration(), ms(1000));

    let mut segments = Vec::new();
    let mut step = player.start();
    while let PreviewStep::Segment{state, target, duration} = &step {
        assert_eq!( state.phase, PreviewPhase::Flying);
        assert_eq!( state.position, path[state.segment_index]);
        assert_eq!( *target, path[state.segment_index + 1]);
        assert_eq!( *duration, ms(1000));
        assert_eq!( (state.target, state.duration), (*target, *duration));
        segments.push( state.segment_index);
        step = player.on_timer();
    }
    assert_eq!( segments, vec![0,1,2,3]);

    match &step {
        PreviewStep::Landing{state, duration} => {
            assert_eq!( state.phase, PreviewPhase::Landing);
            assert_eq!( state.position, path[4]);
            assert_eq!( *duration, ms(1000));
        }
        other => panic!("expected landing, got {other:?}")
    }

    match player.on_timer() {
        PreviewStep::Finished{state, deselect_after} => {
            assert_eq!( state.phase, PreviewPhase::Finished);
            assert_eq!( deselect_after, ms(1500));
        }
        other => panic!("expected finished, got {other:?}")
    }

    assert_eq!( player.on_timer(), PreviewStep::Deselect{ flight_id: "f1".to_string() });
    assert!( player.is_done());
    assert_eq!( player.on_timer(), PreviewStep::Done);
    assert_eq!( player.start(), PreviewStep::Done);
}

#[test]
fn test_rotation_unwrap_bound () {
    let cfg = PreviewConfig::default();

    // a zig-zag path crossing north repeatedly, raw bearings alternate around 0/360
    let path: Vec<GeoPoint> = (0..20).map( |i| {
        let lon = if i % 2 == 0 { 0.0 } else { 0.5 };
        GeoPoint::new_unchecked( i as f64, lon)
    }).collect();

    let mut player = PreviewPlayer::new( "zz", path, ms(2000), &cfg).unwrap();
    let mut last = player.rotation();
    let mut step = player.start();
    while let Some(state) = step.state() {
        let delta = state.rotation - last;
        assert!( delta.abs() <= 180.0, "rotation jumped by {delta}");
        let b = state.bearing.degrees();
        assert!( b >= 0.0 && b < 360.0);
        last = state.rotation;
        step = player.on_timer();
    }
}

#[test]
fn test_rotation_takes_short_way () {
    let cfg = PreviewConfig::default();
    // heading ~350 then ~10: the unwrapped rotation should turn +20, not -340
    let path = vec![
        GeoPoint::new_unchecked( 0.0, 0.0),
        GeoPoint::new_unchecked( 1.0, -0.176),
        GeoPoint::new_unchecked( 2.0, 0.0),
    ];
    let mut player = PreviewPlayer::new( "n", path, ms(1000), &cfg).unwrap();
    let r0 = player.start().state().unwrap().rotation;
    let r1 = player.on_timer().state().unwrap().rotation;
    println!("rotation {r0:.2} -> {r1:.2}");
    assert!( r0 > 349.0 && r0 < 351.0);
    assert!( (r1 - r0 - 20.0).abs() < 0.5);
    assert!( r1 > 360.0);
}

#[test]
fn test_position_within_segment () {
    let cfg = PreviewConfig::default();
    let a = GeoPoint::new_unchecked( 0.0, 0.0);
    let b = GeoPoint::new_unchecked( 0.0, 2.0);
    let mut player = PreviewPlayer::new( "p", vec![a,b], ms(1000), &cfg).unwrap();

    let state = player.start().state().cloned().unwrap();
    assert_eq!( (state.position, state.target, state.duration), (a, b, ms(1000)));
    assert_eq!( state.position_after( ms(0)), a);
    let p = state.position_after( ms(500));
    assert!( (p.longitude_degrees() - 1.0).abs() < 1e-9);
    assert_eq!( state.position_after( ms(5000)), b);

    // landing and finished states stay at the destination
    let landing = player.on_timer().state().cloned().unwrap();
    assert_eq!( (landing.target, landing.duration), (b, cfg.landing_duration));
    assert_eq!( landing.position_after( ms(300)), b);
    let finished = player.on_timer().state().cloned().unwrap();
    assert_eq!( finished.position_after( ms(0)), b);
}
