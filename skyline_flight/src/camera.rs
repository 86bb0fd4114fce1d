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

use serde::{Serialize,Deserialize};
use skyline_common::{angle::normalize_180, geo::GeoPoint};

/// visible map region: center plus latitude/longitude extent in degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Region {
    pub center: GeoPoint,
    pub lat_span: f64,
    pub lon_span: f64,
}

impl Region {
    pub fn new (center: GeoPoint, lat_span: f64, lon_span: f64)->Self {
        Region { center, lat_span, lon_span }
    }

    pub fn centered (center: GeoPoint, span: f64)->Self {
        Region { center, lat_span: span, lon_span: span }
    }

    /// (min_lat, min_lon, max_lat, max_lon)
    pub fn bbox (&self)->(f64,f64,f64,f64) {
        let lat = self.center.latitude_degrees();
        let lon = self.center.longitude_degrees();
        (lat - self.lat_span/2.0, lon - self.lon_span/2.0, lat + self.lat_span/2.0, lon + self.lon_span/2.0)
    }
}

/// hysteresis based camera follow for a moving target
#[derive(Debug,Clone)]
pub struct CameraFollow {
    pub threshold: f64,    // fraction of the span the target may drift from the center
    pub min_span: f64,     // degrees
    pub default_span: f64, // assumed span if the viewport is not known
}

impl CameraFollow {
    pub fn new (threshold: f64, min_span: f64, default_span: f64)->Self {
        CameraFollow { threshold, min_span, default_span }
    }

    /// the region to move to if `target` drifted too far from the viewport center, `None` if the camera
    /// should stay. Without a known viewport the target counts as centered
    pub fn follow (&self, viewport: Option<&Region>, target: &GeoPoint)->Option<Region> {
        let viewport = viewport?;
        let lat_span = if viewport.lat_span.is_finite() && viewport.lat_span > 0.0 { viewport.lat_span } else { self.default_span };
        let lon_span = if viewport.lon_span.is_finite() && viewport.lon_span > 0.0 { viewport.lon_span } else { self.default_span };

        let drift_lat = (viewport.center.latitude_degrees() - target.latitude_degrees()).abs();
        let drift_lon = normalize_180( viewport.center.longitude_degrees() - target.longitude_degrees()).abs();

        if drift_lat > lat_span * self.threshold || drift_lon > lon_span * self.threshold {
            Some( Region::new( *target, lat_span.max(self.min_span), lon_span.max(self.min_span)))
        } else {
            None
        }
    }

    /// region for an explicit focus request
    pub fn focus (&self, target: &GeoPoint)->Region {
        Region::centered( *target, self.default_span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox () {
        let r = Region::centered( GeoPoint::new_unchecked( 10.0, 20.0), 2.0);
        assert_eq!( r.bbox(), (9.0, 19.0, 11.0, 21.0));
    }
}
