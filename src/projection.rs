//! Forward map projections from geographic degrees to plane coordinates.

use clap::ValueEnum;

use crate::extent::Extent;

/// WGS84 semi-major axis in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

const EXTENT_SAMPLES: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProjectionKind {
    /// Orthographic view of the globe centered on the track
    #[default]
    #[value(name = "ortho")]
    Orthographic,
    /// Equirectangular, longitude/latitude in degrees
    #[value(name = "platecarree")]
    PlateCarree,
}

impl ProjectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProjectionKind::Orthographic => "ortho",
            ProjectionKind::PlateCarree => "platecarree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    pub central_longitude: f64,
    pub central_latitude: f64,
}

impl Projection {
    pub fn centered(kind: ProjectionKind, central_longitude: f64, central_latitude: f64) -> Self {
        Projection { kind, central_longitude, central_latitude }
    }

    /// Plane coordinates of a point, `None` if it is not visible (far side of the globe).
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        match self.kind {
            ProjectionKind::PlateCarree => Some((lon, lat)),
            ProjectionKind::Orthographic => {
                let (phi, phi0) = (lat.to_radians(), self.central_latitude.to_radians());
                let dlambda = (lon - self.central_longitude).to_radians();

                let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * dlambda.cos();
                if cos_c < 0.0 {
                    return None;
                }

                let x = EARTH_RADIUS * phi.cos() * dlambda.sin();
                let y = EARTH_RADIUS * (phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * dlambda.cos());
                Some((x, y))
            }
        }
    }

    /// Bounding box in plane coordinates of the visible part of a lon/lat box.
    pub fn project_extent(&self, extent: &Extent) -> Option<Extent> {
        if self.kind == ProjectionKind::PlateCarree {
            return Some(*extent);
        }

        // a squared box can reach past the poles, sample only real latitudes
        let min_y = extent.min_y.clamp(-90.0, 90.0);
        let max_y = extent.max_y.clamp(-90.0, 90.0);

        let n = EXTENT_SAMPLES;
        let samples = (0..=n).flat_map(|i| {
            let lon = extent.min_x + extent.width() * i as f64 / n as f64;
            (0..=n).map(move |j| (lon, min_y + (max_y - min_y) * j as f64 / n as f64))
        });

        Extent::from_points(samples.filter_map(|(lon, lat)| self.project(lon, lat)))
    }

    /// Radius of the visible disc, only orthographic views have one.
    pub fn limb_radius(&self) -> Option<f64> {
        match self.kind {
            ProjectionKind::Orthographic => Some(EARTH_RADIUS),
            ProjectionKind::PlateCarree => None,
        }
    }
}
