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

//! spherical earth geometry for geodetic points: haversine distance, initial bearing,
//! great circle interpolation and path sampling. All functions are pure

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::Point;
use uom::si::f64::Length;
use uom::si::length::kilometer;

use crate::angle::{normalize_180, Angle360};
use crate::cartesian3::Cartesian3;
use crate::geo_constants::{ANGULAR_EPSILON, MEAN_EARTH_RADIUS_KM};
use crate::errors::{SkylineCommonError, Result};

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that stores geodetic degrees (x = longitude, y = latitude).
/// Points are not normalized on construction so that malformed input can be detected with [`GeoPoint::is_valid`]
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from="LatLon", into="LatLon")]
pub struct GeoPoint(Point);

impl GeoPoint {
    /// checked constructor - returns an error for non-finite or out-of-range coordinates
    pub fn from_lat_lon_degrees (lat: f64, lon: f64) -> Result<Self> {
        let p = GeoPoint( Point::new( lon, lat));
        if p.is_valid() { Ok(p) } else { Err( SkylineCommonError::InvalidCoordinate( format!("lat={lat} lon={lon}"))) }
    }

    /// unchecked constructor for data we just pass through (e.g. deserialized snapshots)
    pub fn new_unchecked (lat: f64, lon: f64) -> Self {
        GeoPoint( Point::new( lon, lat))
    }

    #[inline] pub fn latitude_degrees(&self) -> f64 { self.0.y() }
    #[inline] pub fn longitude_degrees(&self) -> f64 { self.0.x() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }

    pub fn is_valid (&self) -> bool {
        let lat = self.0.y();
        let lon = self.0.x();
        lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
    }

    pub fn distance_to (&self, other: &GeoPoint) -> Length {
        Length::new::<kilometer>( distance_km( self, other))
    }

    fn to_cartesian (&self) -> Cartesian3 {
        Cartesian3::from_lat_lon_degrees( self.0.y(), self.0.x())
    }

    fn from_cartesian (v: &Cartesian3) -> Self {
        let (lat,lon) = v.to_lat_lon_degrees();
        GeoPoint( Point::new( lon, lat))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4},{:.4})", self.0.y(), self.0.x())
    }
}

/// serialized form. We accept "lat"/"latitude" and "lon"/"lng"/"longitude" on input
#[derive(Serialize,Deserialize)]
struct LatLon {
    #[serde(alias="latitude")]
    lat: f64,
    #[serde(alias="longitude", alias="lng")]
    lon: f64,
}

impl From<LatLon> for GeoPoint {
    fn from (ll: LatLon) -> Self { GeoPoint::new_unchecked( ll.lat, ll.lon) }
}

impl From<GeoPoint> for LatLon {
    fn from (p: GeoPoint) -> Self { LatLon { lat: p.0.y(), lon: p.0.x() } }
}

/* #endregion GeoPoint */

/* #region great circle functions *********************************************************************************/

/// haversine great circle distance in km (mean earth radius 6371km)
pub fn distance_km (a: &GeoPoint, b: &GeoPoint) -> f64 {
    let φ1 = a.latitude_degrees().to_radians();
    let φ2 = b.latitude_degrees().to_radians();
    let Δφ = φ2 - φ1;
    let Δλ = (b.longitude_degrees() - a.longitude_degrees()).to_radians();

    let h = (Δφ/2.0).sin().powi(2) + φ1.cos() * φ2.cos() * (Δλ/2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2( (1.0 - h).max(0.0).sqrt());
    MEAN_EARTH_RADIUS_KM * c
}

/// forward azimuth from `a` towards `b`. The value for `a == b` is unspecified (but normalized)
pub fn initial_bearing (a: &GeoPoint, b: &GeoPoint) -> Angle360 {
    let φ1 = a.latitude_degrees().to_radians();
    let φ2 = b.latitude_degrees().to_radians();
    let Δλ = (b.longitude_degrees() - a.longitude_degrees()).to_radians();

    let y = Δλ.sin() * φ2.cos();
    let x = φ1.cos() * φ2.sin() - φ1.sin() * φ2.cos() * Δλ.cos();
    Angle360::from_radians( y.atan2(x))
}

#[inline]
pub fn initial_bearing_degrees (a: &GeoPoint, b: &GeoPoint) -> f64 {
    initial_bearing(a,b).degrees()
}

/// spherical linear interpolation along the great circle from `a` to `b` with `t` ∈ [0,1] (clamped).
/// Identical points return `a` for all `t`. Antipodal points have no unique great circle, we then
/// pick the one that passes closest to the north pole (or through lon 0 if `a` is a pole)
pub fn slerp (a: &GeoPoint, b: &GeoPoint, t: f64) -> GeoPoint {
    let t = crate::clamp01(t);
    let va = a.to_cartesian();
    let vb = b.to_cartesian();
    let d = va.angle_to(&vb);

    if d < ANGULAR_EPSILON || !d.is_finite() {
        return *a
    }

    match Cartesian3::slerp( &va, &vb, t) {
        Some(v) => GeoPoint::from_cartesian(&v),
        None => { // antipodal
            let north = Cartesian3::new( 0.0, 0.0, 1.0);
            let mut k = north - va * va.dot(&north);
            if k.length() < ANGULAR_EPSILON {
                k = Cartesian3::new( 1.0, 0.0, 0.0) - va * va.x;
            }
            k.scale_to_unit_length();
            let θ = t * d;
            GeoPoint::from_cartesian( &(va * θ.cos() + k * θ.sin()))
        }
    }
}

/// `n+1` points along the great circle from `a` to `b`, both endpoints included. `n` is at least 1
pub fn sample_path (a: &GeoPoint, b: &GeoPoint, n: usize) -> Vec<GeoPoint> {
    let n = n.max(1);
    let mut path = Vec::with_capacity(n+1);

    for i in 0..=n {
        let t = i as f64 / n as f64;
        path.push( slerp( a, b, t));
    }
    // avoid rounding drift at the endpoints
    path[0] = *a;
    path[n] = *b;
    path
}

/// linear (planar) interpolation between two points, taking the short way around the antimeridian
pub fn lerp (a: &GeoPoint, b: &GeoPoint, t: f64) -> GeoPoint {
    let t = crate::clamp01(t);
    let lat = a.latitude_degrees() + (b.latitude_degrees() - a.latitude_degrees()) * t;
    let dlon = normalize_180( b.longitude_degrees() - a.longitude_degrees());
    let lon = normalize_180( a.longitude_degrees() + dlon * t);
    GeoPoint::new_unchecked( lat, lon)
}

/// sum of segment distances in km
pub fn path_length_km (path: &[GeoPoint]) -> f64 {
    path.windows(2).map( |w| distance_km( &w[0], &w[1])).sum()
}

/* #endregion great circle functions */
