//! Optional background geography (land areas, borders) read from GeoJSON.

use std::fs;
use std::path::Path;

use geojson::{GeoJson, Geometry, Value};
use tracing::info;

use crate::errors::{FlightMapError, Result};
use crate::projection::Projection;

pub type Path2 = Vec<(f64, f64)>;

/// Geographic shapes in longitude/latitude degrees.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    /// polygon rings, first ring is the exterior
    pub areas: Vec<Vec<Path2>>,
    pub lines: Vec<Path2>,
}

impl Layer {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| FlightMapError::io(path, e))?;
        let geojson = text
            .parse::<GeoJson>()
            .map_err(|source| FlightMapError::GeoJsonError { path: path.into(), source })?;

        let layer = Layer::from_geojson(&geojson);
        info!("loaded {} areas and {} lines from {}", layer.areas.len(), layer.lines.len(), path.display());
        Ok(layer)
    }

    pub fn from_geojson(geojson: &GeoJson) -> Self {
        let mut layer = Layer::default();
        match geojson {
            GeoJson::FeatureCollection(fc) => {
                for geometry in fc.features.iter().filter_map(|f| f.geometry.as_ref()) {
                    layer.add_geometry(geometry);
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    layer.add_geometry(geometry);
                }
            }
            GeoJson::Geometry(geometry) => layer.add_geometry(geometry),
        }
        layer
    }

    fn add_geometry(&mut self, geometry: &Geometry) {
        match &geometry.value {
            Value::LineString(line) => self.lines.push(to_path(line)),
            Value::MultiLineString(lines) => self.lines.extend(lines.iter().map(|l| to_path(l))),
            Value::Polygon(rings) => self.areas.push(rings.iter().map(|r| to_path(r)).collect()),
            Value::MultiPolygon(polygons) => {
                for rings in polygons {
                    self.areas.push(rings.iter().map(|r| to_path(r)).collect());
                }
            }
            Value::GeometryCollection(geometries) => {
                for g in geometries {
                    self.add_geometry(g);
                }
            }
            _ => {} // points carry no outline
        }
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty() && self.lines.is_empty()
    }
}

fn to_path(positions: &[Vec<f64>]) -> Path2 {
    positions.iter().filter(|p| p.len() >= 2).map(|p| (p[0], p[1])).collect()
}

/// Project a path, splitting it wherever vertices leave the visible side of the globe.
pub fn project_path(projection: &Projection, path: &[(f64, f64)]) -> Vec<Path2> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for &(lon, lat) in path {
        match projection.project(lon, lat) {
            Some(p) => current.push(p),
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

/// Project a ring for filling, `None` unless every vertex is visible.
pub fn project_ring(projection: &Projection, ring: &[(f64, f64)]) -> Option<Path2> {
    ring.iter().map(|&(lon, lat)| projection.project(lon, lat)).collect()
}
