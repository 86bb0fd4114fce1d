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

//! time sources. Engine code never calls `Utc::now()` directly but goes through a [`Clock`] so that
//! schedule-driven computations can be run against simulated (or paused tokio) time

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use crate::datetime::to_time_delta;

pub trait Clock: Send + Sync + 'static {
    fn now (&self) -> DateTime<Utc>;
}

/// the system clock
#[derive(Debug,Clone,Copy,Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now (&self) -> DateTime<Utc> { Utc::now() }
}

/// a clock that starts at a given base date and advances with the tokio clock. Under a paused tokio
/// runtime this only moves when time is advanced, which makes timer driven tests deterministic
#[derive(Debug,Clone)]
pub struct SimClock {
    base: DateTime<Utc>,
    start: Instant,
}

impl SimClock {
    pub fn new (base: DateTime<Utc>) -> Self {
        SimClock { base, start: Instant::now() }
    }
}

impl Clock for SimClock {
    fn now (&self) -> DateTime<Utc> {
        self.base + to_time_delta( self.start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_sim_clock_follows_tokio_time () {
        let base = Utc::now();
        let clock = SimClock::new(base);
        assert_eq!( clock.now(), base);

        tokio::time::advance( Duration::from_secs(90)).await;
        assert_eq!( (clock.now() - base).num_seconds(), 90);
    }
}
