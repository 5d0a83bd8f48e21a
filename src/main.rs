use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod airports;
mod basemap;
mod colormap;
mod config;
mod errors;
mod extent;
mod projection;
mod raster;
mod render;
mod server;
mod telemetry;

use airports::AirportTable;
use config::Args;
use errors::Result;
use render::FlightMap;
use server::AppState;
use telemetry::TrackData;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightmap=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let track = TrackData::load(&args.data_file)?;

    if args.list_channels {
        for s in track.stats() {
            println!("{:<32} {:>8} samples  min {:>14.6}  max {:>14.6}", s.name, s.len, s.min, s.max);
        }
        return Ok(());
    }

    // the table is only read when there is something to look up
    let airports = if args.airports.is_empty() {
        AirportTable::from_records(Vec::new())
    } else {
        AirportTable::load(&args.airport_table)?
    };

    let options = args.plot_options()?;
    let flight_map = FlightMap::new(track, args.projection, args.color_by.as_deref(), airports)?;
    let mut plot = flight_map.make_plot(&options)?;

    for icao in &args.airports {
        flight_map.plot_airport(&mut plot, icao);
    }

    let view = plot.geo_extent();
    info!(
        "plotted {} track points and {}/{} airports, view lon {:.3}..{:.3} lat {:.3}..{:.3}",
        plot.points().len(),
        plot.markers().len(),
        args.airports.len(),
        view.min_x,
        view.max_x,
        view.min_y,
        view.max_y
    );
    debug!("figure {:.0}x{:.0} px", plot.layout().width, plot.layout().height);

    let usvg_options = Arc::new(if args.needs_fonts() {
        raster::usvg_options()
    } else {
        usvg::Options::default()
    });
    if let Some(path) = &args.output {
        plot.save(path, &usvg_options)?;
    }

    if args.should_serve() {
        let state = AppState::new(plot.to_svg(), usvg_options);
        server::serve(args.addr(), state).await?;
    }

    Ok(())
}
