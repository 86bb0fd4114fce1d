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

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use skyline_common::{datetime::{parse_datetime_str, utc_now}, sim_clock::SimClock};
use skyline_flight::{
    Flight, load_config,
    actor::{spawn_flight_map, FlightMapEvent},
    metrics::{format_distance_km, route_distance_km},
    selection::{filter_by_query, order_for_display, select_featured},
    temporal::{effective_status, format_minutes, live_progress}
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "show flight list and simulated live positions for a flight snapshot")]
pub struct Args {
    /// JSON flight snapshot
    #[arg(short,long, default_value = concat!( env!("CARGO_MANIFEST_DIR"), "/resources/flights.json"))]
    pub flights: PathBuf,

    /// RON engine config
    #[arg(short,long, default_value = concat!( env!("CARGO_MANIFEST_DIR"), "/configs/flight_map.ron"))]
    pub config: PathBuf,

    /// simulation start time (RFC 3339), defaults to now
    #[arg(long)]
    pub now: Option<String>,

    /// only show flights matching this query
    #[arg(short,long, default_value = "")]
    pub query: String,

    /// number of live tracking ticks to run
    #[arg(long, default_value_t = 3)]
    pub ticks: usize,

    /// flight to focus (camera follow)
    #[arg(long)]
    pub focus: Option<String>,

    /// flight to preview
    #[arg(long)]
    pub preview: Option<String>,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let args = Args::parse();
    let config = load_config( &args.config)?;
    let now = match &args.now {
        Some(s) => parse_datetime_str(s)?,
        None => utc_now()
    };

    let flights: Vec<Flight> = Flight::load_snapshot( &args.flights)?;
    let flights: Vec<Flight> = filter_by_query( &flights, &args.query).into_iter().cloned().collect();

    println!("-- flights at {now}");
    for f in order_for_display( &flights, now) {
        let dist = route_distance_km(f).map( format_distance_km).unwrap_or_else( || "-".to_string());
        print!("  {:<40} {:>10} {:?}", f.to_string(), dist, effective_status(f, now));
        if let Some(lp) = live_progress(f, now) {
            print!(" {}% ({} elapsed, {} left)", lp.percent(), format_minutes(lp.elapsed_minutes()), format_minutes(lp.remaining_minutes()));
        }
        println!();
    }

    match select_featured( &flights, now) {
        Some(f) => println!("-- featured: {f}"),
        None => println!("-- no featured flight")
    }

    let (tx,rx) = kanal::bounded_async( 256);
    let (hmap, jh) = spawn_flight_map( config, SimClock::new(now), tx);

    hmap.set_flights( flights.clone()).await?;
    if let Some(id) = &args.focus {
        hmap.focus_flight(id).await?;
    }
    hmap.start_tracking().await?;

    let mut preview_pending = false;
    if let Some(id) = &args.preview {
        if let Some(f) = flights.iter().find( |f| &f.id == id) {
            hmap.start_preview( f.clone(), None).await?;
            preview_pending = true;
        }
    }

    let mut n_ticks = 0;
    while n_ticks < args.ticks || preview_pending {
        match rx.recv().await? {
            FlightMapEvent::LiveUpdate(tracks) => {
                n_ticks += 1;
                println!("-- tick {n_ticks}: {} flights in the air", tracks.len());
                for t in &tracks {
                    println!("  {:<8} {} heading {:5.1} progress {:.3}", t.flight_id, t.position, t.bearing.degrees(), t.progress);
                }
                if n_ticks == args.ticks {
                    hmap.stop_tracking().await?;
                }
            }
            FlightMapEvent::CameraMove(region) => println!("  camera -> {} span {:.2}/{:.2}", region.center, region.lat_span, region.lon_span),
            FlightMapEvent::Preview(state) => {
                println!("  preview {:?} segment {} at {} -> {} in {:?}, rotation {:.1}",
                         state.phase, state.segment_index, state.position, state.target, state.duration, state.rotation);
            }
            FlightMapEvent::PreviewRejected(id) => {
                println!("  no preview for {id}");
                preview_pending = false;
            }
            FlightMapEvent::AutoDeselect(id) => {
                println!("  deselect {id}");
                preview_pending = false;
            }
        }
    }

    hmap.terminate().await?;
    jh.await?;
    Ok(())
}
