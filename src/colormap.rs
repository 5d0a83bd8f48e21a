use std::fmt;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const RED: Rgb = Rgb(255, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Colormap {
    /// Black through purple and red to yellow
    #[default]
    Gnuplot,
    Gray,
}

impl Colormap {
    /// Color for a normalized value, clamped to `[0,1]`.
    pub fn color(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (r, g, b) = match self {
            Colormap::Gnuplot => (t.sqrt(), t.powi(3), (2.0 * std::f64::consts::PI * t).sin()),
            Colormap::Gray => (t, t, t),
        };
        Rgb(channel(r), channel(g), channel(b))
    }
}

fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Linear mapping of a data range onto `[0,1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (vmin, vmax) = finite.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
        Some(Normalize { vmin, vmax })
    }

    pub fn apply(&self, v: f64) -> f64 {
        if self.vmax > self.vmin {
            (v - self.vmin) / (self.vmax - self.vmin)
        } else {
            0.0
        }
    }
}

/// Round tick values inside `[vmin, vmax]`, roughly `target` of them.
pub fn nice_ticks(vmin: f64, vmax: f64, target: usize) -> Vec<f64> {
    if !(vmax > vmin) || target == 0 {
        return vec![vmin];
    }

    let raw = (vmax - vmin) / target as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (vmin / step).ceil() as i64;
    let last = (vmax / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Tick label without trailing zeros.
pub fn format_tick(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
