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

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};
use serde::{Serialize,Deserialize};

/// 3D vectors used for spherical computations on the unit sphere (x towards lon=0 on the equator,
/// z towards the north pole). We do not use uom here since these are dimensionless directions
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    pub fn new (x: f64, y: f64, z: f64)->Cartesian3 {
        Cartesian3{x,y,z}
    }

    pub fn zero ()->Cartesian3 {
        Cartesian3{x: 0.0, y: 0.0, z: 0.0}
    }

    /// unit vector for given geodetic latitude and longitude degrees (spherical earth)
    pub fn from_lat_lon_degrees (lat_deg: f64, lon_deg: f64)->Cartesian3 {
        let φ = lat_deg.to_radians();
        let λ = lon_deg.to_radians();
        let cos_φ = φ.cos();

        Cartesian3 {
            x: cos_φ * λ.cos(),
            y: cos_φ * λ.sin(),
            z: φ.sin()
        }
    }

    /// (lat,lon) degrees of the direction this vector points to. Does not require unit length
    pub fn to_lat_lon_degrees (&self)->(f64,f64) {
        let lat = self.z.atan2( (self.x*self.x + self.y*self.y).sqrt());
        let lon = self.y.atan2( self.x);
        (lat.to_degrees(), lon.to_degrees())
    }

    pub fn cross (&self, p: &Cartesian3)->Self {
        Cartesian3 {
            x: (self.y * p.z) - (self.z * p.y),
            y: (self.z * p.x) - (self.x * p.z),
            z: (self.x * p.y) - (self.y * p.x)
        }
    }

    pub fn dot(&self, p: &Cartesian3) -> f64 {
        (self.x * p.x) + (self.y * p.y) +(self.z * p.z)
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn scale_to_unit_length(&mut self) {
        let length = self.length();
        if length > 0.0 {
            self.x = self.x / length;
            self.y = self.y / length;
            self.z = self.z / length;
        }
    }

    /// central angle in radians between the directions of two vectors
    pub fn angle_to (&self, p: &Cartesian3)->f64 {
        // atan2 of |a×b| and a·b stays accurate for very small and nearly antipodal angles
        self.cross(p).length().atan2( self.dot(p))
    }

    /// spherical linear interpolation between two unit vectors with fraction f ∈ [0..1].
    /// Returns `None` if the vectors are identical or antipodal (no unique great circle)
    pub fn slerp (p1: &Cartesian3, p2: &Cartesian3, f: f64)->Option<Cartesian3> {
        let d = p1.angle_to(p2);
        let sin_d = d.sin();

        if d == 0.0 || !d.is_finite() || sin_d.abs() < crate::geo_constants::ANGULAR_EPSILON {
            None
        } else {
            let a = ((1.0 - f) * d).sin() / sin_d;
            let b = (f * d).sin() / sin_d;
            Some( *p1 * a + *p2 * b)
        }
    }
}

impl std::fmt::Display for Cartesian3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ {}, {}, {} ]", self.x, self.y, self.z)
    }
}

impl Add for Cartesian3 {
    type Output = Self;

    fn add (self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl AddAssign for Cartesian3 {
    fn add_assign (&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Cartesian3 {
    type Output = Self;

    fn sub (self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl Mul<f64> for Cartesian3 {
    type Output = Self;

    fn mul (self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

impl MulAssign<f64> for Cartesian3 {
    fn mul_assign (&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lon_roundtrip () {
        let v = Cartesian3::from_lat_lon_degrees( 48.2, 16.37);
        assert!( (v.length() - 1.0).abs() < 1e-12);

        let (lat,lon) = v.to_lat_lon_degrees();
        assert!( (lat - 48.2).abs() < 1e-9);
        assert!( (lon - 16.37).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_slerp () {
        let p = Cartesian3::from_lat_lon_degrees( 10.0, 20.0);
        assert!( Cartesian3::slerp( &p, &p, 0.5).is_none());

        let q = Cartesian3::from_lat_lon_degrees( -10.0, -160.0);
        assert!( Cartesian3::slerp( &p, &q, 0.5).is_none());
    }

    #[test]
    fn test_quarter_circle () {
        let p1 = Cartesian3::new( 1.0, 0.0, 0.0);
        let p2 = Cartesian3::new( 0.0, 1.0, 0.0);
        let m = Cartesian3::slerp( &p1, &p2, 0.5).unwrap();
        let s = 0.5f64.sqrt();
        assert!( (m.x - s).abs() < 1e-12 && (m.y - s).abs() < 1e-12 && m.z.abs() < 1e-12);
    }
}
