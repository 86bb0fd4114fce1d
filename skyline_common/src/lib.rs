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
#![allow(non_snake_case)]

//! common support for skyline crates: normalized angles, geodetic points and great circle
//! operations on a spherical earth model, plus datetime and clock utilities

pub mod angle;
pub mod geo_constants;
pub mod cartesian3;
pub mod geo;
pub mod datetime;
pub mod sim_clock;

pub mod errors;
pub use errors::{SkylineCommonError,Result};

/// clamp to the closed unit interval. NaN is mapped to 0
#[inline]
pub fn clamp01 (x: f64)->f64 {
    if x.is_nan() { 0.0 } else { x.clamp( 0.0, 1.0) }
}

// a global fn that can be used with serde(skip_serializing_if="skyline_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01 () {
        assert_eq!( clamp01(-0.5), 0.0);
        assert_eq!( clamp01(0.25), 0.25);
        assert_eq!( clamp01(7.0), 1.0);
        assert_eq!( clamp01(f64::NAN), 0.0);
    }
}
