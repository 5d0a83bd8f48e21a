use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlightMapError>;

#[derive(Error, Debug)]
pub enum FlightMapError {
    #[error("IO error on {path}: {source}")]
    IOError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("telemetry parse error in {path}: {source}")]
    TelemetryParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required channel {0}")]
    MissingChannel(String),

    #[error("channel {name} has {len} samples, expected {expected}")]
    ChannelLength {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("telemetry contains no samples")]
    EmptyTrack,

    #[error("unknown channel {name} (available: {available})")]
    UnknownChannel { name: String, available: String },

    #[error("airport table error in {path}: {source}")]
    AirportTableError {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("geojson error in {path}: {source}")]
    GeoJsonError {
        path: PathBuf,
        #[source]
        source: geojson::Error,
    },

    #[error("track extent is not visible in the {0} projection")]
    EmptyView(&'static str),

    #[error("unsupported output format {0:?} (expected .svg or .png)")]
    UnsupportedOutput(PathBuf),

    #[error("HTTP server error {0}")]
    ServerError(#[source] std::io::Error),

    #[error("render error {0}")]
    RenderError(String),
}

impl FlightMapError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FlightMapError::IOError { path: path.into(), source }
    }
}
