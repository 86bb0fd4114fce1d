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

//! the flight map actor coordinates everything that is driven by time: the periodic live tracking tick,
//! camera follow for the focused flight, and the step chain of a preview playback. All state is owned by
//! a single task that processes one message at a time, timer tasks only send [`TimerTick`] messages.
//! Ticks of cancelled timers that were already queued are recognized by their id and dropped

use std::{sync::Arc, time::Duration};
use kanal::{AsyncReceiver, AsyncSender, bounded_async};
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{debug,info,warn,error};
use skyline_common::sim_clock::Clock;

use crate::{
    Flight, FlightMapConfig,
    camera::Region,
    errors::{Result, SkylineFlightError},
    preview::{preview_player_for, PreviewPlaybackState, PreviewPlayer, PreviewStep},
    timer::{oneshot_timer_for, repeat_timer_for, TimerHandle, TimerIds, TimerTick},
    tracking::{LiveTrackState, TrackingSession}
};

/// what the actor reports to its owner
#[derive(Debug,Clone,PartialEq)]
pub enum FlightMapEvent {
    LiveUpdate(Vec<LiveTrackState>),
    CameraMove(Region),
    Preview(PreviewPlaybackState),
    PreviewRejected(String), // flight without a valid route, no further preview events follow
    AutoDeselect(String),
}

#[derive(Debug)]
enum Command {
    SetFlights(Vec<Flight>),
    SetViewport(Region),
    StartTracking,
    StopTracking,
    FocusFlight(String),
    ClearFocus,
    StartPreview(Box<Flight>, Option<Duration>),
    CancelPreview,
}

#[derive(Debug)]
enum FlightMapMsg {
    Control(Command, oneshot::Sender<()>),
    Timer(TimerTick),
    Terminate,
}

impl From<TimerTick> for FlightMapMsg {
    fn from (tick: TimerTick)->Self { FlightMapMsg::Timer(tick) }
}

/* #region handle *************************************************************************************************/

/// control surface of a running [`FlightMapActor`]. Each call returns after the actor has processed it, i.e.
/// once `stop_tracking()` returns there will be no further live updates until tracking is restarted.
/// Note the owner has to keep draining the event channel since the actor awaits event delivery
#[derive(Clone)]
pub struct FlightMapHandle {
    tx: AsyncSender<FlightMapMsg>,
}

impl FlightMapHandle {
    async fn exec (&self, cmd: Command)->Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx.send( FlightMapMsg::Control(cmd, ack_tx)).await?;
        ack_rx.await.map_err( |_| SkylineFlightError::ChannelClosed("flight map actor terminated".to_string()))
    }

    /// replace the flight snapshot used by subsequent ticks
    pub async fn set_flights (&self, flights: Vec<Flight>)->Result<()> { self.exec( Command::SetFlights(flights)).await }

    /// the viewport the map currently shows (e.g. after user panning)
    pub async fn set_viewport (&self, region: Region)->Result<()> { self.exec( Command::SetViewport(region)).await }

    pub async fn start_tracking (&self)->Result<()> { self.exec( Command::StartTracking).await }
    pub async fn stop_tracking (&self)->Result<()> { self.exec( Command::StopTracking).await }

    pub async fn focus_flight (&self, flight_id: impl ToString)->Result<()> { self.exec( Command::FocusFlight(flight_id.to_string())).await }
    pub async fn clear_focus (&self)->Result<()> { self.exec( Command::ClearFocus).await }

    /// start a preview of `flight`, replacing any running preview. `total` overrides the computed playback duration
    pub async fn start_preview (&self, flight: Flight, total: Option<Duration>)->Result<()> {
        self.exec( Command::StartPreview( Box::new(flight), total)).await
    }
    pub async fn cancel_preview (&self)->Result<()> { self.exec( Command::CancelPreview).await }

    /// stop the actor, cancelling all timers
    pub async fn terminate (&self)->Result<()> {
        Ok( self.tx.send( FlightMapMsg::Terminate).await? )
    }
}

/* #endregion handle */

/* #region actor **************************************************************************************************/

struct ActivePreview {
    player: PreviewPlayer,
    timer: Option<TimerHandle>, // the one pending step
}

pub struct FlightMapActor<C> where C: Clock {
    config: Arc<FlightMapConfig>,
    clock: C,
    hself: AsyncSender<FlightMapMsg>, // for our timers
    events: AsyncSender<FlightMapEvent>,

    flights: Vec<Flight>,
    session: TrackingSession,
    tick_timer: Option<TimerHandle>,
    preview: Option<ActivePreview>,
    timer_ids: TimerIds,
}

/// spawn a flight map actor task that reports to `events`
pub fn spawn_flight_map<C> (config: FlightMapConfig, clock: C, events: AsyncSender<FlightMapEvent>)->(FlightMapHandle, JoinHandle<()>)
    where C: Clock
{
    let (tx,rx) = bounded_async( config.channel_bounds.max(1));
    let actor = FlightMapActor::new( config, clock, tx.clone(), events);
    let jh = tokio::spawn( actor.run(rx));
    (FlightMapHandle{tx}, jh)
}

impl<C> FlightMapActor<C> where C: Clock {
    fn new (config: FlightMapConfig, clock: C, hself: AsyncSender<FlightMapMsg>, events: AsyncSender<FlightMapEvent>)->Self {
        let session = TrackingSession::new( &config);
        FlightMapActor {
            config: Arc::new(config),
            clock, hself, events,
            flights: Vec::new(),
            session,
            tick_timer: None,
            preview: None,
            timer_ids: TimerIds::default()
        }
    }

    async fn run (mut self, rx: AsyncReceiver<FlightMapMsg>) {
        debug!("flight map actor started");

        while let Ok(msg) = rx.recv().await {
            match msg {
                FlightMapMsg::Control(cmd, ack) => {
                    if let Err(e) = self.exec(cmd).await {
                        error!("flight map command failed: {}", e)
                    }
                    let _ = ack.send(()); // caller might not wait
                }
                FlightMapMsg::Timer(tick) => {
                    if let Err(e) = self.on_timer(tick).await {
                        error!("flight map timer action failed: {}", e)
                    }
                }
                FlightMapMsg::Terminate => break
            }
        }

        self.tick_timer = None;
        self.cancel_preview();
        debug!("flight map actor terminated");
    }

    async fn exec (&mut self, cmd: Command)->Result<()> {
        match cmd {
            Command::SetFlights(flights) => {
                debug!("received {} flights", flights.len());
                self.flights = flights;
            }
            Command::SetViewport(region) => {
                self.session.set_viewport(region);
            }
            Command::StartTracking => {
                self.session.start();
                self.start_tick_timer();
            }
            Command::StopTracking => {
                self.tick_timer = None; // drop cancels
                self.session.stop();
            }
            Command::FocusFlight(id) => {
                // only switching to another flight ends a running preview
                let is_previewed = self.preview.as_ref().is_some_and( |p| p.player.flight_id() == id);
                if !is_previewed && self.session.focused() != Some(id.as_str()) {
                    self.cancel_preview();
                }
                self.session.focus(id);
                let now = self.clock.now();
                if let Some(region) = self.session.focus_region( &self.flights, now) {
                    self.emit( FlightMapEvent::CameraMove(region)).await?;
                }
            }
            Command::ClearFocus => {
                self.cancel_preview();
                self.session.clear_focus();
            }
            Command::StartPreview(flight, total) => {
                self.cancel_preview();
                self.start_preview( &flight, total).await?;
            }
            Command::CancelPreview => {
                self.cancel_preview();
            }
        }
        Ok(())
    }

    async fn on_timer (&mut self, tick: TimerTick)->Result<()> {
        if self.tick_timer.as_ref().is_some_and( |t| t.id() == tick.id) {
            self.tick().await

        } else if self.preview.as_ref().and_then( |p| p.timer.as_ref()).is_some_and( |t| t.id() == tick.id) {
            self.advance_preview().await

        } else {
            debug!("ignoring stale timer {}", tick.id);
            Ok(())
        }
    }

    //--- live tracking

    fn start_tick_timer (&mut self) {
        let id = self.timer_ids.next_id();
        // replacing the handle cancels the old timer
        self.tick_timer = Some( repeat_timer_for( self.hself.clone(), id, self.config.tick_interval, true));
    }

    async fn tick (&mut self)->Result<()> {
        let now = self.clock.now();
        let update = self.session.tick( &self.flights, now);

        self.emit( FlightMapEvent::LiveUpdate( update.tracks)).await?;
        if let Some(region) = update.camera {
            self.emit( FlightMapEvent::CameraMove(region)).await?;
        }
        Ok(())
    }

    //--- preview

    async fn start_preview (&mut self, flight: &Flight, total: Option<Duration>)->Result<()> {
        let player = match preview_player_for( flight, &self.config, total) {
            Ok(player) => player,
            Err(e) => {
                warn!("no preview for flight {}: {}", flight.id, e);
                return self.emit( FlightMapEvent::PreviewRejected( flight.id.clone())).await
            }
        };

        info!("starting preview of flight {} ({} segments of {:?})", flight.id, player.segment_count(), player.segment_duration());
        self.preview = Some( ActivePreview { player, timer: None });

        let step = match self.preview.as_mut() {
            Some(p) => p.player.start(),
            None => PreviewStep::Done
        };
        self.process_preview_step(step).await
    }

    async fn advance_preview (&mut self)->Result<()> {
        let step = match self.preview.as_mut() {
            Some(p) => {
                p.timer = None;
                p.player.on_timer()
            }
            None => PreviewStep::Done
        };
        self.process_preview_step(step).await
    }

    async fn process_preview_step (&mut self, step: PreviewStep)->Result<()> {
        if let Some(delay) = step.delay() {
            let id = self.timer_ids.next_id();
            let timer = oneshot_timer_for( self.hself.clone(), id, delay);
            if let Some(p) = self.preview.as_mut() {
                p.timer = Some(timer);
            }
        }

        match step {
            PreviewStep::Segment{state,..} | PreviewStep::Landing{state,..} => {
                self.emit( FlightMapEvent::Preview(state)).await
            }
            PreviewStep::Finished{state,..} => {
                info!("preview of flight {} finished", state.flight_id);
                self.emit( FlightMapEvent::Preview(state)).await
            }
            PreviewStep::Deselect{flight_id} => {
                self.preview = None;
                if self.session.focused() == Some(flight_id.as_str()) {
                    self.session.clear_focus();
                }
                self.emit( FlightMapEvent::AutoDeselect(flight_id)).await
            }
            PreviewStep::Done => {
                self.preview = None;
                Ok(())
            }
        }
    }

    /// drops the player together with its pending step timer, whatever phase it is in
    fn cancel_preview (&mut self) {
        if let Some(p) = self.preview.take() {
            info!("preview of flight {} cancelled", p.player.flight_id());
        }
    }

    async fn emit (&self, event: FlightMapEvent)->Result<()> {
        Ok( self.events.send(event).await? )
    }
}

/* #endregion actor */
