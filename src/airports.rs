use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::errors::{FlightMapError, Result};

pub const DEFAULT_AIRPORT_TABLE: &str = "airport_data/airports.dat";

/// One row of the airport table. Coordinates stay textual until looked up so
/// that a bad row only affects that airport.
#[derive(Debug, Clone, Deserialize)]
pub struct AirportRecord {
    #[serde(rename = "ICAO")]
    pub icao: String,
    #[serde(rename = "LAT")]
    pub lat: String,
    #[serde(rename = "LON")]
    pub lon: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum AirportError {
    #[error("no airport with ICAO code {0:?}")]
    NotFound(String),

    #[error("{count} airports share ICAO code {icao:?}")]
    Ambiguous { icao: String, count: usize },

    #[error("invalid {field} {value:?} for airport {icao}")]
    InvalidCoordinate { icao: String, field: &'static str, value: String },
}

pub struct AirportTable {
    records: Vec<AirportRecord>,
}

impl AirportTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table_err = |source| FlightMapError::AirportTableError { path: path.into(), source };

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path).map_err(table_err)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<AirportRecord>, _>>()
            .map_err(table_err)?;

        info!("loaded {} airports from {}", records.len(), path.display());
        Ok(AirportTable { records })
    }

    pub fn from_records(records: Vec<AirportRecord>) -> Self {
        AirportTable { records }
    }

    /// `(longitude, latitude)` of the single airport with this ICAO code.
    pub fn lookup(&self, icao: &str) -> std::result::Result<(f64, f64), AirportError> {
        let mut matches = self.records.iter().filter(|r| r.icao == icao);
        let record = matches.next().ok_or_else(|| AirportError::NotFound(icao.to_string()))?;

        let extra = matches.count();
        if extra > 0 {
            return Err(AirportError::Ambiguous { icao: icao.to_string(), count: extra + 1 });
        }

        let parse = |field: &'static str, value: &str| {
            let invalid = || AirportError::InvalidCoordinate { icao: icao.to_string(), field, value: value.to_string() };
            value.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(invalid)
        };

        Ok((parse("LON", &record.lon)?, parse("LAT", &record.lat)?))
    }
}
