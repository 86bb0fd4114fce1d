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

//! normalized angle types. Values are kept in degrees and normalized on construction so that
//! arithmetic results always stay within the range of their kind

use std::{fmt, marker::PhantomData, cmp};
use serde::ser::{Serialize, Serializer};
use serde::de::{self, Deserialize, Deserializer, Visitor};

/// normalize to [-180,180]
#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/// normalize to [0,360). Note that `-ε % 360 + 360` can round to exactly 360.0, which we map back to 0
#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    let x = if x < 0.0 { 360.0 + x } else { x };
    if x >= 360.0 { 0.0 } else { x }
}

/// the signed smallest rotation (in degrees, within [-180,180]) that turns `from` into `to`
#[inline]
pub fn shortest_rotation (from: f64, to: f64) -> f64 {
    normalize_180( to - from)
}

pub trait AngleKind {
    fn normalize(v: f64)->f64;
    fn fmt_debug(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

#[derive(Debug,Clone,Copy)]
pub struct FullCircleKind {}
impl AngleKind for FullCircleKind {
    fn normalize(v: f64) -> f64 { normalize_360(v) }
    fn fmt_debug(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", value) }
}

#[derive(Copy, Clone)]
pub struct NormalizedAngle<K> where K: AngleKind {
    value: f64,
    kind: PhantomData<K>,
}

impl<K> NormalizedAngle<K> where K: AngleKind {
    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        NormalizedAngle { value: K::normalize(deg), kind: PhantomData }
    }

    pub fn from_radians(rad: f64) -> Self {
        NormalizedAngle { value: K::normalize(rad.to_degrees()), kind: PhantomData }
    }

    #[inline] pub fn degrees(&self)->f64 { self.value }
}

impl <K> From<NormalizedAngle<K>> for f64 where K: AngleKind {
    fn from(a: NormalizedAngle<K>) -> Self { a.value }
}

impl<K> fmt::Display for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", self.value) }
}

impl<K> fmt::Debug for NormalizedAngle<K> where K: AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { K::fmt_debug( self.value, f) }
}

impl<K> cmp::PartialOrd for NormalizedAngle<K> where K: AngleKind {
    fn partial_cmp(&self,other:&Self) -> Option<cmp::Ordering> { self.value.partial_cmp( &other.value) }
}

impl<K> cmp::PartialEq for NormalizedAngle<K> where K: AngleKind {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}

/// compass headings (clockwise from true north)
pub type Angle360 = NormalizedAngle<FullCircleKind>;

//--- serde support

impl<K> Serialize for NormalizedAngle<K> where K: AngleKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_f64(self.value)
    }
}

impl<'de> Deserialize<'de> for Angle360 {
    fn deserialize<D>(deserializer: D) -> Result<Angle360, D::Error> where D: Deserializer<'de> {
        struct AngleVisitor;

        impl<'de> Visitor<'de> for AngleVisitor {
            type Value = Angle360;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!( formatter, "floating point degrees between [0..360]")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> where E: de::Error {
                if value >= 0.0 && value <= 360.0 {
                    Ok( Angle360::from_degrees(value))
                } else {
                    Err( E::custom(format!("degrees out of range: {}", value)))
                }
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> where E: de::Error {
                self.visit_f64( value as f64)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> where E: de::Error {
                self.visit_f64( value as f64)
            }
        }

        deserializer.deserialize_f64( AngleVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_360 () {
        assert_eq!( normalize_360(370.0), 10.0);
        assert_eq!( normalize_360(-90.0), 270.0);
        assert_eq!( normalize_360(360.0), 0.0);

        let x = normalize_360(-1e-15);
        assert!( x >= 0.0 && x < 360.0);
    }

    #[test]
    fn test_normalize_180 () {
        assert_eq!( normalize_180(190.0), -170.0);
        assert_eq!( normalize_180(-190.0), 170.0);
    }

    #[test]
    fn test_heading_serde () {
        let a: Angle360 = serde_json::from_str("360").unwrap();
        assert_eq!( a.degrees(), 0.0);
        assert_eq!( serde_json::to_string( &Angle360::from_degrees(-90.0)).unwrap(), "270.0");
        assert!( serde_json::from_str::<Angle360>("-10.5").is_err());
    }

    #[test]
    fn test_shortest_rotation () {
        assert_eq!( shortest_rotation( 350.0, 10.0), 20.0);
        assert_eq!( shortest_rotation( 10.0, 350.0), -20.0);
        assert_eq!( shortest_rotation( 0.0, 90.0), 90.0);
    }
}
