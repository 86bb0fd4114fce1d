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

//! timer tasks that deliver [`TimerTick`] messages to an actor channel. Timer tasks never touch actor
//! state, they only send. Each timer has a unique id so that the receiver can tell current from stale ticks

use std::time::Duration;
use kanal::AsyncSender;
use tokio::{task::AbortHandle, time::{interval, sleep, MissedTickBehavior}};

/// the message a timer sends when it expires
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct TimerTick { pub id: u64 }

/// handle of a running timer task. Cancelling is idempotent, dropping the handle cancels the timer
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
    abort_handle: AbortHandle,
}

impl TimerHandle {
    pub fn id (&self)->u64 { self.id }

    pub fn cancel (&self) { self.abort_handle.abort() }

    pub fn is_finished (&self)->bool { self.abort_handle.is_finished() }
}

impl Drop for TimerHandle {
    fn drop (&mut self) { self.abort_handle.abort() }
}

/// send one `TimerTick{id}` after `delay`
pub fn oneshot_timer_for<M> (tx: AsyncSender<M>, id: u64, delay: Duration)->TimerHandle where M: From<TimerTick> + Send + 'static {
    let jh = tokio::spawn( async move {
        sleep(delay).await;
        let _ = tx.send( TimerTick{id}.into()).await; // receiver might be gone, nothing to do then
    });
    TimerHandle { id, abort_handle: jh.abort_handle() }
}

/// send a `TimerTick{id}` every `period` until cancelled or the channel is closed. If `instantly` is set the
/// first tick is sent right away
pub fn repeat_timer_for<M> (tx: AsyncSender<M>, id: u64, period: Duration, instantly: bool)->TimerHandle where M: From<TimerTick> + Send + 'static {
    let mut interval = interval(period);
    interval.set_missed_tick_behavior( MissedTickBehavior::Delay);
    let mut send_tick = instantly;

    let jh = tokio::spawn( async move {
        loop {
            interval.tick().await;
            if send_tick {
                if tx.send( TimerTick{id}.into()).await.is_err() { break }
            } else {
                send_tick = true;
            }
        }
    });
    TimerHandle { id, abort_handle: jh.abort_handle() }
}

/// monotonic id source for timers of one owner
#[derive(Debug,Default)]
pub struct TimerIds(u64);

impl TimerIds {
    pub fn next_id (&mut self)->u64 {
        self.0 += 1;
        self.0
    }
}
