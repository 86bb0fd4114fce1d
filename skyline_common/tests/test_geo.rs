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

use skyline_common::geo::{GeoPoint, distance_km, initial_bearing, initial_bearing_degrees, slerp, sample_path, path_length_km};

/// tests for great circle functions
/// run with "cargo test --test test_geo -- --nocapture"

fn vienna ()->GeoPoint { GeoPoint::new_unchecked( 48.2082, 16.3738) }
fn london ()->GeoPoint { GeoPoint::new_unchecked( 51.5072, -0.1276) }

fn test_points ()->Vec<GeoPoint> {
    vec![
        (48.2082, 16.3738), (51.5072, -0.1276), (40.6413, -73.7781), (-33.9399, 151.1753),
        (35.5494, 139.7798), (0.0, 0.0), (64.1466, -21.9426), (-54.8019, -68.3030), (21.3187, -157.9225)
    ].into_iter().map( |(lat,lon)| GeoPoint::new_unchecked(lat,lon)).collect()
}

#[test]
fn test_distance_symmetry () {
    let ps = test_points();
    for a in &ps {
        for b in &ps {
            let d1 = distance_km(a,b);
            let d2 = distance_km(b,a);
            assert!( (d1 - d2).abs() < 1e-6, "{a} {b}: {d1} != {d2}");
        }
        assert!( distance_km(a,a).abs() < 1e-9);
    }
}

#[test]
fn test_known_distance () {
    let d = distance_km( &vienna(), &london());
    println!("Vienna - London: {d:.1}km");
    assert!( d > 1230.0 && d < 1250.0);

    let l = vienna().distance_to( &london());
    assert!( (l.get::<uom::si::length::kilometer>() - d).abs() < 1e-9);
}

#[test]
fn test_identity_slerp () {
    for a in test_points() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_eq!( slerp( &a, &a, t), a);
        }
    }
}

#[test]
fn test_slerp_monotonic () {
    let ps = test_points();
    for a in &ps {
        for b in &ps {
            let mut last = 0.0;
            for i in 0..=50 {
                let t = i as f64 / 50.0;
                let d = distance_km( a, &slerp(a, b, t));
                assert!( d + 1e-6 >= last, "not monotonic {a} -> {b} at t={t}");
                last = d;
            }
        }
    }
}

#[test]
fn test_slerp_endpoints () {
    let p = slerp( &vienna(), &london(), 1.0);
    assert!( distance_km( &p, &london()) < 1e-6);
    let p = slerp( &vienna(), &london(), 0.0);
    assert!( distance_km( &p, &vienna()) < 1e-6);
}

#[test]
fn test_bearing_range () {
    let ps = test_points();
    for a in &ps {
        for b in &ps {
            let deg = initial_bearing_degrees(a,b);
            assert!( deg >= 0.0 && deg < 360.0, "bearing {a}->{b} out of range: {deg}");
        }
    }

    // due east along the equator, due north along a meridian
    let e = initial_bearing( &GeoPoint::new_unchecked(0.0,0.0), &GeoPoint::new_unchecked(0.0,10.0));
    assert!( (e.degrees() - 90.0).abs() < 1e-9);
    let n = initial_bearing( &GeoPoint::new_unchecked(0.0,0.0), &GeoPoint::new_unchecked(10.0,0.0));
    assert!( n.degrees().abs() < 1e-9);
    let w = initial_bearing_degrees( &vienna(), &london());
    assert!( w > 270.0 && w < 300.0);
}

#[test]
fn test_sample_path () {
    let path = sample_path( &vienna(), &london(), 80);
    assert_eq!( path.len(), 81);
    assert_eq!( path[0], vienna());
    assert_eq!( path[80], london());

    // great circle path length equals the direct distance
    let d = distance_km( &vienna(), &london());
    assert!( (path_length_km(&path) - d).abs() < 0.01);

    // degenerate route
    let path = sample_path( &vienna(), &vienna(), 10);
    assert_eq!( path.len(), 11);
    assert!( path.iter().all( |p| *p == vienna()));

    assert_eq!( sample_path( &vienna(), &london(), 0).len(), 2);
}

#[test]
fn test_midpoint () {
    let m = slerp( &vienna(), &london(), 0.5);
    let da = distance_km( &vienna(), &m);
    let db = distance_km( &m, &london());
    println!("midpoint {m}: {da:.3}km / {db:.3}km");
    assert!( (da - db).abs() < 0.01);
}
