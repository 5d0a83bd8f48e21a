use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::airports::DEFAULT_AIRPORT_TABLE;
use crate::basemap::Layer;
use crate::colormap::Colormap;
use crate::errors::Result;
use crate::projection::ProjectionKind;
use crate::render::PlotOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot recorded flight tracks on a map")]
pub struct Args {
    /// Telemetry JSON file mapping channel names to sample arrays
    pub data_file: PathBuf,
    #[arg(long, value_enum, default_value_t = ProjectionKind::Orthographic)]
    pub projection: ProjectionKind,
    /// Channel used to color the track points, e.g. PLANE_ALTITUDE
    #[arg(long)]
    pub color_by: Option<String>,
    #[arg(long, value_enum, default_value_t = Colormap::Gnuplot)]
    pub colormap: Colormap,
    /// ICAO code of an airport to mark, may be repeated
    #[arg(long = "airport", value_name = "ICAO")]
    pub airports: Vec<String>,
    /// CSV table with ICAO, LAT and LON columns
    #[arg(long, default_value = DEFAULT_AIRPORT_TABLE)]
    pub airport_table: PathBuf,
    /// GeoJSON land polygons / coastlines
    #[arg(long)]
    pub land: Option<PathBuf>,
    /// GeoJSON country borders
    #[arg(long)]
    pub borders: Option<PathBuf>,
    /// Figure size in inches as WIDTH,HEIGHT
    #[arg(long, value_parser = parse_figsize, default_value = "12,12")]
    pub figsize: (f64, f64),
    #[arg(long, value_parser = parse_positive, default_value_t = 100.0)]
    pub dpi: f64,
    /// Scatter marker area in points²
    #[arg(long, default_value_t = 0.5)]
    pub point_size: f64,
    /// Margin around the track as a fraction of its span
    #[arg(long, default_value_t = 0.05)]
    pub margin: f64,
    /// Write the map to a .svg or .png file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Serve the map over HTTP even if an output file is written
    #[arg(long, default_value_t = false)]
    pub show: bool,
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
    /// Print the channels of the data file and exit
    #[arg(long, default_value_t = false)]
    pub list_channels: bool,
}

fn parse_positive(s: &str) -> std::result::Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| *v > 0.0 && v.is_finite())
        .ok_or_else(|| format!("expected a positive number, got {:?}", s))
}

fn parse_figsize(s: &str) -> std::result::Result<(f64, f64), String> {
    let (w, h) = s.split_once(',').ok_or_else(|| format!("expected WIDTH,HEIGHT, got {:?}", s))?;
    Ok((parse_positive(w)?, parse_positive(h)?))
}

impl Args {
    /// Without an output file the map is shown.
    pub fn should_serve(&self) -> bool {
        self.show || self.output.is_none()
    }

    /// PNG output and the show server rasterize, which needs the system fonts.
    pub fn needs_fonts(&self) -> bool {
        let png_output = self
            .output
            .as_ref()
            .and_then(|p| p.extension())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        png_output || self.should_serve()
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn plot_options(&self) -> Result<PlotOptions> {
        let load = |path: &Option<PathBuf>| -> Result<Option<Layer>> {
            let Some(path) = path else { return Ok(None) };
            let layer = Layer::load(path)?;
            if layer.is_empty() {
                warn!("{} contains no lines or polygons", path.display());
            }
            Ok(Some(layer))
        };

        Ok(PlotOptions {
            figsize: self.figsize,
            dpi: self.dpi,
            point_size: self.point_size,
            margin: self.margin,
            colormap: self.colormap,
            land: load(&self.land)?,
            borders: load(&self.borders)?,
        })
    }
}
