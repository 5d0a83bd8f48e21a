//! Recorded flight telemetry: named channels of equally long sample series.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{FlightMapError, Result};
use crate::extent::Extent;

pub const LATITUDE: &str = "PLANE_LATITUDE";
pub const LONGITUDE: &str = "PLANE_LONGITUDE";

#[derive(Debug, Clone)]
pub struct TrackData {
    channels: BTreeMap<String, Vec<f64>>,
    len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStats {
    pub name: String,
    pub len: usize,
    pub min: f64,
    pub max: f64,
}

impl TrackData {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FlightMapError::io(path, e))?;
        let channels: BTreeMap<String, Vec<f64>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| FlightMapError::TelemetryParseError { path: path.into(), source })?;

        let track = Self::from_channels(channels)?;
        info!("loaded {} samples in {} channels from {}", track.len, track.channels.len(), path.display());
        Ok(track)
    }

    pub fn from_channels(channels: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        for required in [LATITUDE, LONGITUDE] {
            if !channels.contains_key(required) {
                return Err(FlightMapError::MissingChannel(required.to_string()));
            }
        }

        let expected = channels[LATITUDE].len();
        if let Some((name, values)) = channels.iter().find(|(_, v)| v.len() != expected) {
            return Err(FlightMapError::ChannelLength { name: name.clone(), len: values.len(), expected });
        }
        if expected == 0 {
            return Err(FlightMapError::EmptyTrack);
        }

        Ok(TrackData { channels, len: expected })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn latitude(&self) -> &[f64] {
        &self.channels[LATITUDE]
    }

    pub fn longitude(&self) -> &[f64] {
        &self.channels[LONGITUDE]
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Look up a channel by a user supplied name.
    pub fn channel(&self, name: &str) -> Result<&[f64]> {
        debug!("resolving channel {}", name);
        self.channels.get(name).map(Vec::as_slice).ok_or_else(|| FlightMapError::UnknownChannel {
            name: name.to_string(),
            available: self.channel_names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Longitude/latitude points in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.longitude().iter().copied().zip(self.latitude().iter().copied())
    }

    pub fn bounds(&self) -> Extent {
        // non-empty is checked on construction
        Extent::from_points(self.points()).unwrap_or(Extent::new(0.0, 0.0, 0.0, 0.0))
    }

    /// `(longitude, latitude)` of the bounding box center.
    pub fn midpoint(&self) -> (f64, f64) {
        self.bounds().center()
    }

    pub fn stats(&self) -> Vec<ChannelStats> {
        self.channels
            .iter()
            .map(|(name, values)| ChannelStats {
                name: name.clone(),
                len: values.len(),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn channels(entries: &[(&str, &[f64])]) -> BTreeMap<String, Vec<f64>> {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_vec())).collect()
    }

    #[test]
    fn load_reads_json_channels() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"{"PLANE_LATITUDE": [60.19, 59.0, 55.61],
                 "PLANE_LONGITUDE": [11.1, 11.8, 12.65],
                 "PLANE_ALTITUDE": [680.0, 35000.0, 17.0]}"#,
        )
        .unwrap();

        let track = TrackData::load(temp.path()).unwrap();
        assert_eq!(track.len(), 3);
        assert_eq!(track.channel("PLANE_ALTITUDE").unwrap(), &[680.0, 35000.0, 17.0]);

        let (lon, lat) = track.midpoint();
        assert!((lon - 11.875).abs() < 1e-9);
        assert!((lat - 57.9).abs() < 1e-9);
    }

    #[test]
    fn load_propagates_missing_file_and_bad_json() {
        assert!(matches!(
            TrackData::load("/nonexistent/track.json"),
            Err(FlightMapError::IOError { .. })
        ));

        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{\"PLANE_LATITUDE\": [1.0, ").unwrap();
        assert!(matches!(
            TrackData::load(temp.path()),
            Err(FlightMapError::TelemetryParseError { .. })
        ));
    }

    #[test]
    fn mismatched_channel_lengths_are_rejected() {
        let result = TrackData::from_channels(channels(&[
            (LATITUDE, &[1.0, 2.0]),
            (LONGITUDE, &[1.0, 2.0]),
            ("PLANE_ALTITUDE", &[100.0]),
        ]));
        match result {
            Err(FlightMapError::ChannelLength { name, len, expected }) => {
                assert_eq!(name, "PLANE_ALTITUDE");
                assert_eq!(len, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn position_channels_are_required() {
        let result = TrackData::from_channels(channels(&[(LATITUDE, &[1.0])]));
        assert!(matches!(result, Err(FlightMapError::MissingChannel(c)) if c == LONGITUDE));

        let result = TrackData::from_channels(channels(&[(LATITUDE, &[]), (LONGITUDE, &[])]));
        assert!(matches!(result, Err(FlightMapError::EmptyTrack)));
    }

    #[test]
    fn unknown_channel_lists_known_names() {
        let track = TrackData::from_channels(channels(&[(LATITUDE, &[1.0]), (LONGITUDE, &[2.0])])).unwrap();
        match track.channel("PLANE_SPEED") {
            Err(FlightMapError::UnknownChannel { name, available }) => {
                assert_eq!(name, "PLANE_SPEED");
                assert_eq!(available, "PLANE_LATITUDE, PLANE_LONGITUDE");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stats_cover_every_channel() {
        let track = TrackData::from_channels(channels(&[
            (LATITUDE, &[1.0, 3.0]),
            (LONGITUDE, &[-2.0, 2.0]),
        ]))
        .unwrap();
        let stats = track.stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1], ChannelStats { name: LONGITUDE.into(), len: 2, min: -2.0, max: 2.0 });
        assert_eq!(track.bounds(), Extent::new(-2.0, 2.0, 1.0, 3.0));
    }
}
