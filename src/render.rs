//! Flight track map rendering.
//!
//! [`FlightMap`] holds the loaded data and the projection centered on the
//! track. [`FlightMap::make_plot`] lays out a figure and returns a [`MapPlot`]
//! handle that later steps (airport markers, saving, serving) operate on.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::airports::AirportTable;
use crate::basemap::{self, Layer};
use crate::colormap::{self, BLACK, Colormap, Normalize, RED, Rgb};
use crate::errors::{FlightMapError, Result};
use crate::extent::Extent;
use crate::projection::{Projection, ProjectionKind};
use crate::raster::svg_to_png;
use crate::telemetry::TrackData;

const POINTS_PER_INCH: f64 = 72.0;

// matplotlib's default subplot box, as fractions of the figure
const AXES_LEFT: f64 = 0.125;
const AXES_RIGHT: f64 = 0.9;
const AXES_TOP: f64 = 0.12;
const AXES_BOTTOM: f64 = 0.89;

const COLORBAR_FRACTION: f64 = 0.15;
const COLORBAR_PAD: f64 = 0.05;
const COLORBAR_ASPECT: f64 = 20.0;
const COLORBAR_TICKS: usize = 5;
const COLORBAR_STOPS: usize = 16;

const MARKER_SIZE: f64 = 6.0;
const FONT_SIZE: f64 = 10.0;

const LAND_COLOR: &str = "#efefdb";
const BORDER_COLOR: &str = "#808080";

#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// figure size in inches
    pub figsize: (f64, f64),
    pub dpi: f64,
    /// scatter marker area in points²
    pub point_size: f64,
    /// autoscale margin as a fraction of the data span
    pub margin: f64,
    pub colormap: Colormap,
    pub land: Option<Layer>,
    pub borders: Option<Layer>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            figsize: (12.0, 12.0),
            dpi: 100.0,
            point_size: 0.5,
            margin: 0.05,
            colormap: Colormap::Gnuplot,
            land: None,
            borders: None,
        }
    }
}

pub struct FlightMap {
    track: TrackData,
    projection: Projection,
    color_by: Option<String>,
    airports: AirportTable,
}

impl FlightMap {
    pub fn new(
        track: TrackData,
        kind: ProjectionKind,
        color_by: Option<&str>,
        airports: AirportTable,
    ) -> Result<Self> {
        if let Some(name) = color_by {
            track.channel(name)?;
        }

        let (mid_lon, mid_lat) = track.midpoint();
        let projection = Projection::centered(kind, mid_lon, mid_lat);
        info!("{} projection centered on lon {:.4} lat {:.4}", kind.name(), mid_lon, mid_lat);

        Ok(FlightMap { track, projection, color_by: color_by.map(String::from), airports })
    }

    pub fn make_plot(&self, options: &PlotOptions) -> Result<MapPlot> {
        let kind = self.projection.kind;
        let geo_extent = self.track.bounds().padded(options.margin).normalized();
        let view = self
            .projection
            .project_extent(&geo_extent)
            .filter(|v| v.width() > 0.0 && v.height() > 0.0)
            .ok_or(FlightMapError::EmptyView(kind.name()))?;

        let colorbar = match &self.color_by {
            Some(name) => {
                let values = self.track.channel(name)?;
                Normalize::from_values(values).map(|norm| ColorBar {
                    label: name.clone(),
                    norm,
                    colormap: options.colormap,
                })
            }
            None => None,
        };

        let layout = Layout::new(options, &view, colorbar.is_some());
        let mut plot = MapPlot {
            layout,
            view,
            geo_extent,
            projection: self.projection,
            dpi: options.dpi,
            point_radius: options.point_size.max(0.0).sqrt() / 2.0 * options.dpi / POINTS_PER_INCH,
            points: Vec::with_capacity(self.track.len()),
            markers: Vec::new(),
            land: Vec::new(),
            coastlines: Vec::new(),
            borders: Vec::new(),
            colorbar,
        };

        if let Some(land) = &options.land {
            for rings in &land.areas {
                for ring in rings {
                    if let Some(projected) = basemap::project_ring(&self.projection, ring) {
                        let d = plot.path_data(&projected, true);
                        plot.land.push(d);
                    }
                    let runs = plot.project_lines(ring);
                    plot.coastlines.extend(runs);
                }
            }
            for line in &land.lines {
                let runs = plot.project_lines(line);
                plot.coastlines.extend(runs);
            }
        }
        if let Some(borders) = &options.borders {
            let paths = borders.lines.iter().chain(borders.areas.iter().flatten());
            for path in paths {
                let runs = plot.project_lines(path);
                plot.borders.extend(runs);
            }
        }

        let color_values = match &self.color_by {
            Some(name) => Some(self.track.channel(name)?),
            None => None,
        };
        let mut hidden = 0;
        for (i, (lon, lat)) in self.track.points().enumerate() {
            let Some((x, y)) = self.projection.project(lon, lat) else {
                hidden += 1;
                continue;
            };
            let color = match (&plot.colorbar, color_values) {
                (Some(cb), Some(values)) => cb.colormap.color(cb.norm.apply(values[i])),
                _ => BLACK,
            };
            let (px, py) = plot.to_pixel(x, y);
            plot.points.push(ScatterPoint { x: px, y: py, color });
        }
        if hidden > 0 {
            debug!("{} samples lie on the far side of the globe", hidden);
        }
        Ok(plot)
    }

    /// Mark an airport with a red cross. Lookup failures are reported and the
    /// marker skipped, they never abort the plot.
    pub fn plot_airport(&self, plot: &mut MapPlot, icao: &str) -> bool {
        let (lon, lat) = match self.airports.lookup(icao) {
            Ok(pos) => pos,
            Err(e) => {
                warn!("Couldn't plot airport: {}", e);
                return false;
            }
        };

        match plot.projection.project(lon, lat) {
            Some((x, y)) => {
                if !plot.view.contains(x, y) {
                    debug!("airport {} lies outside the map view", icao);
                }
                let (px, py) = plot.to_pixel(x, y);
                plot.markers.push(Marker { icao: icao.to_string(), x: px, y: py });
                info!("marked airport {} at lon {} lat {}", icao, lon, lat);
                true
            }
            None => {
                warn!("Couldn't plot airport: {} is not visible in this projection", icao);
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Pixel geometry of the figure, y grows downwards.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub frame: Rect,
    pub colorbar: Option<Rect>,
    scale: f64,
}

impl Layout {
    fn new(options: &PlotOptions, view: &Extent, with_colorbar: bool) -> Self {
        let width = options.figsize.0 * options.dpi;
        let height = options.figsize.1 * options.dpi;

        let left = AXES_LEFT * width;
        let top = AXES_TOP * height;
        let mut avail_w = (AXES_RIGHT - AXES_LEFT) * width;
        let avail_h = (AXES_BOTTOM - AXES_TOP) * height;
        let full_w = avail_w;
        if with_colorbar {
            avail_w *= 1.0 - COLORBAR_FRACTION - COLORBAR_PAD;
        }

        // equal aspect: one scale for both axes, frame centered in its slot
        let scale = (avail_w / view.width()).min(avail_h / view.height());
        let (w, h) = (view.width() * scale, view.height() * scale);
        let frame = Rect { x: left + (avail_w - w) / 2.0, y: top + (avail_h - h) / 2.0, w, h };

        let colorbar = with_colorbar.then(|| {
            let bar_w = h / COLORBAR_ASPECT;
            Rect { x: frame.x + w + COLORBAR_PAD * full_w, y: frame.y, w: bar_w, h }
        });

        Layout { width, height, frame, colorbar, scale }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub icao: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
struct ColorBar {
    label: String,
    norm: Normalize,
    colormap: Colormap,
}

/// A laid out map figure. Created by [`FlightMap::make_plot`].
pub struct MapPlot {
    layout: Layout,
    view: Extent,
    geo_extent: Extent,
    projection: Projection,
    dpi: f64,
    point_radius: f64,
    points: Vec<ScatterPoint>,
    markers: Vec<Marker>,
    land: Vec<String>,
    coastlines: Vec<String>,
    borders: Vec<String>,
    colorbar: Option<ColorBar>,
}

impl MapPlot {
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The square longitude/latitude extent the view was derived from.
    pub fn geo_extent(&self) -> &Extent {
        &self.geo_extent
    }

    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let f = &self.layout.frame;
        let s = self.layout.scale;
        (f.x + (x - self.view.min_x) * s, f.y + (self.view.max_y - y) * s)
    }

    fn pt(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }

    fn path_data(&self, path: &[(f64, f64)], closed: bool) -> String {
        let mut d = String::with_capacity(path.len() * 16);
        for (i, &(x, y)) in path.iter().enumerate() {
            let (px, py) = self.to_pixel(x, y);
            d.push_str(&format!("{}{:.2},{:.2}", if i == 0 { "M" } else { "L" }, px, py));
        }
        if closed {
            d.push('Z');
        }
        d
    }

    /// SVG path data of the visible parts of a lon/lat polyline.
    fn project_lines(&self, path: &[(f64, f64)]) -> Vec<String> {
        basemap::project_path(&self.projection, path).iter().map(|run| self.path_data(run, false)).collect()
    }

    pub fn to_svg(&self) -> String {
        let Layout { width, height, frame, .. } = self.layout;
        let line_width = self.pt(0.8);

        let mut map_layer = String::new();
        if let Some(r) = self.projection.limb_radius() {
            let (cx, cy) = self.to_pixel(0.0, 0.0);
            map_layer.push_str(&format!(
                "<clipPath id='limb'><circle cx='{:.2}' cy='{:.2}' r='{:.2}' /></clipPath>\n",
                cx,
                cy,
                r * self.layout.scale
            ));
            map_layer.push_str("<g clip-path='url(#limb)'>\n");
        } else {
            map_layer.push_str("<g>\n");
        }

        for d in &self.land {
            map_layer.push_str(&format!("<path d='{}' fill='{}' stroke='none' />\n", d, LAND_COLOR));
        }
        for d in &self.coastlines {
            map_layer.push_str(&format!(
                "<path d='{}' fill='none' stroke='{}' stroke-width='{:.2}' />\n",
                d, BLACK, line_width
            ));
        }
        for d in &self.borders {
            map_layer.push_str(&format!(
                "<path d='{}' fill='none' stroke='{}' stroke-width='{:.2}' />\n",
                d, BORDER_COLOR, line_width
            ));
        }
        for p in &self.points {
            map_layer.push_str(&format!(
                "<circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{}' />\n",
                p.x, p.y, self.point_radius, p.color
            ));
        }

        let half = self.pt(MARKER_SIZE / 2.0);
        for m in &self.markers {
            map_layer.push_str(&format!(
                "<path id='airport-{}' d='M{:.2},{:.2}L{:.2},{:.2}M{:.2},{:.2}L{:.2},{:.2}' fill='none' stroke='{}' stroke-width='{:.2}' />\n",
                xml_escape(&m.icao),
                m.x - half,
                m.y - half,
                m.x + half,
                m.y + half,
                m.x - half,
                m.y + half,
                m.x + half,
                m.y - half,
                RED,
                self.pt(1.0)
            ));
        }
        map_layer.push_str("</g>\n");

        if let Some(r) = self.projection.limb_radius() {
            let (cx, cy) = self.to_pixel(0.0, 0.0);
            map_layer.push_str(&format!(
                "<circle id='globe' cx='{:.2}' cy='{:.2}' r='{:.2}' fill='none' stroke='{}' stroke-width='{:.2}' />\n",
                cx,
                cy,
                r * self.layout.scale,
                BLACK,
                line_width
            ));
        }

        let colorbar = match (&self.colorbar, self.layout.colorbar) {
            (Some(cb), Some(rect)) => self.colorbar_svg(cb, rect),
            _ => String::new(),
        };

        format!(
            r#"<svg width='{width:.0}' height='{height:.0}' viewBox='0 0 {width:.0} {height:.0}' xmlns='http://www.w3.org/2000/svg'>
  <rect width='{width:.0}' height='{height:.0}' fill='white' />

  <!-- Map -->
  <clipPath id='frame'><rect x='{fx:.2}' y='{fy:.2}' width='{fw:.2}' height='{fh:.2}' /></clipPath>
  <g clip-path='url(#frame)'>
{map_layer}  </g>
  <rect x='{fx:.2}' y='{fy:.2}' width='{fw:.2}' height='{fh:.2}' fill='none' stroke='#000000' stroke-width='{line_width:.2}' />
{colorbar}</svg>"#,
            fx = frame.x,
            fy = frame.y,
            fw = frame.w,
            fh = frame.h,
        )
    }

    fn colorbar_svg(&self, cb: &ColorBar, rect: Rect) -> String {
        let mut stops = String::new();
        for i in 0..=COLORBAR_STOPS {
            let t = i as f64 / COLORBAR_STOPS as f64;
            stops.push_str(&format!("    <stop offset='{:.4}' stop-color='{}' />\n", t, cb.colormap.color(t)));
        }

        let font = self.pt(FONT_SIZE);
        let tick_len = self.pt(3.5);
        let bottom = rect.y + rect.h;
        let mut ticks = String::new();
        let mut label_x = rect.x + rect.w + tick_len;
        for v in colormap::nice_ticks(cb.norm.vmin, cb.norm.vmax, COLORBAR_TICKS) {
            let y = bottom - cb.norm.apply(v) * rect.h;
            let text = colormap::format_tick(v);
            ticks.push_str(&format!(
                "  <line x1='{x0:.2}' y1='{y:.2}' x2='{x1:.2}' y2='{y:.2}' stroke='#000000' stroke-width='{w:.2}' />\n  \
                 <text x='{tx:.2}' y='{ty:.2}' font-family='sans-serif' font-size='{font:.1}' fill='#000000'>{text}</text>\n",
                x0 = rect.x + rect.w,
                x1 = rect.x + rect.w + tick_len,
                w = self.pt(0.8),
                tx = rect.x + rect.w + tick_len * 1.5,
                ty = y + font * 0.35,
            ));
            // rough width of the label at ~0.6em per glyph
            label_x = label_x.max(rect.x + rect.w + tick_len * 1.5 + text.len() as f64 * font * 0.6);
        }
        label_x += font;
        let label_y = rect.y + rect.h / 2.0;

        format!(
            r#"
  <!-- Color bar -->
  <linearGradient id='cbar' x1='0' y1='1' x2='0' y2='0'>
{stops}  </linearGradient>
  <rect x='{x:.2}' y='{y:.2}' width='{w:.2}' height='{h:.2}' fill='url(#cbar)' stroke='#000000' stroke-width='{sw:.2}' />
{ticks}  <text x='{label_x:.2}' y='{label_y:.2}' transform='rotate(-90 {label_x:.2} {label_y:.2})' font-family='sans-serif' font-size='{font:.1}' text-anchor='middle' fill='#000000'>{label}</text>
"#,
            x = rect.x,
            y = rect.y,
            w = rect.w,
            h = rect.h,
            sw = self.pt(0.8),
            label = xml_escape(&cb.label),
        )
    }

    /// Write the map as `.svg` or `.png`, chosen by the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P, opt: &usvg::Options) -> Result<()> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        let bytes = match ext.as_deref() {
            Some("svg") => self.to_svg().into_bytes(),
            Some("png") => svg_to_png(&self.to_svg(), opt)?,
            _ => return Err(FlightMapError::UnsupportedOutput(path.into())),
        };

        fs::write(path, bytes).map_err(|e| FlightMapError::io(path, e))?;
        info!("saved map to {}", path.display());
        Ok(())
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('\'', "&apos;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports::AirportRecord;
    use crate::telemetry::{LATITUDE, LONGITUDE};
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, SubscriberExt};

    fn airport(icao: &str, lat: &str, lon: &str) -> AirportRecord {
        AirportRecord { icao: icao.into(), lat: lat.into(), lon: lon.into() }
    }

    fn flight_map(kind: ProjectionKind, color_by: Option<&str>) -> Result<FlightMap> {
        let channels: BTreeMap<String, Vec<f64>> = [
            (LATITUDE, vec![60.19, 59.2, 57.4, 55.62]),
            (LONGITUDE, vec![11.10, 11.5, 12.1, 12.66]),
            ("PLANE_ALTITUDE", vec![680.0, 21000.0, 35000.0, 17.0]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let track = TrackData::from_channels(channels)?;
        let airports = AirportTable::from_records(vec![
            airport("ENGM", "60.193901", "11.1004"),
            airport("EKCH", "55.617901", "12.656"),
            airport("YSSY", "-33.9461", "151.177"),
            airport("BAD1", "n/a", "12.0"),
            airport("TWIN", "58.0", "11.0"),
            airport("TWIN", "58.5", "11.5"),
        ]);
        FlightMap::new(track, kind, color_by, airports)
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warnings(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    fn small() -> PlotOptions {
        PlotOptions { figsize: (4.0, 3.0), dpi: 50.0, ..PlotOptions::default() }
    }

    #[test]
    fn view_is_square_and_centered_on_track() {
        let map = flight_map(ProjectionKind::Orthographic, None).unwrap();
        let p = &map.projection;
        assert!((p.central_longitude - 11.88).abs() < 1e-9);
        assert!((p.central_latitude - 57.905).abs() < 1e-9);

        let plot = map.make_plot(&PlotOptions::default()).unwrap();
        let e = plot.geo_extent();
        assert!((e.width() - e.height()).abs() < 1e-9);
        let (cx, cy) = e.center();
        assert!((cx - 11.88).abs() < 1e-9 && (cy - 57.905).abs() < 1e-9);
    }

    #[test]
    fn points_fall_inside_the_frame() {
        let map = flight_map(ProjectionKind::Orthographic, None).unwrap();
        let plot = map.make_plot(&PlotOptions::default()).unwrap();
        let layout = plot.layout();
        assert_eq!((layout.width, layout.height), (1200.0, 1200.0));
        assert!(layout.colorbar.is_none());

        let f = layout.frame;
        assert_eq!(plot.points().len(), 4);
        for p in plot.points() {
            assert!(p.x > f.x && p.x < f.x + f.w && p.y > f.y && p.y < f.y + f.h);
            assert_eq!(p.color, BLACK);
        }
        // first sample is the northernmost
        assert!(plot.points()[0].y < plot.points()[3].y);
    }

    #[test]
    fn color_channel_adds_colorbar() {
        let map = flight_map(ProjectionKind::PlateCarree, Some("PLANE_ALTITUDE")).unwrap();
        let plot = map.make_plot(&small()).unwrap();
        let layout = plot.layout();
        let bar = layout.colorbar.unwrap();
        assert!(bar.x > layout.frame.x + layout.frame.w);
        assert!(bar.x + bar.w <= layout.width);

        assert_eq!(plot.points()[2].color, Colormap::Gnuplot.color(1.0));
        assert_eq!(plot.points()[3].color, Colormap::Gnuplot.color(0.0));

        let svg = plot.to_svg();
        assert!(svg.contains("PLANE_ALTITUDE"));
        assert!(svg.contains("linearGradient id='cbar'"));
        assert!(svg.contains(">30000</text>"));
    }

    #[test]
    fn unknown_color_channel_is_rejected() {
        assert!(matches!(
            flight_map(ProjectionKind::Orthographic, Some("PLANE_SPEED")),
            Err(FlightMapError::UnknownChannel { .. })
        ));
    }

    #[test]
    fn airport_failures_skip_the_marker() {
        let map = flight_map(ProjectionKind::Orthographic, None).unwrap();
        let mut plot = map.make_plot(&small()).unwrap();

        assert!(map.plot_airport(&mut plot, "ENGM"));
        assert!(map.plot_airport(&mut plot, "EKCH"));
        assert!(!map.plot_airport(&mut plot, "ZZZZ"));
        assert!(!map.plot_airport(&mut plot, "BAD1"));
        assert!(!map.plot_airport(&mut plot, "YSSY"));

        let icaos: Vec<&str> = plot.markers().iter().map(|m| m.icao.as_str()).collect();
        assert_eq!(icaos, vec!["ENGM", "EKCH"]);

        let svg = plot.to_svg();
        assert!(svg.contains("id='airport-ENGM'"));
        assert!(svg.contains("stroke='#ff0000'"));
        assert!(!svg.contains("airport-ZZZZ"));
    }

    #[test]
    fn each_skipped_airport_warns_once() {
        let map = flight_map(ProjectionKind::Orthographic, None).unwrap();
        let mut plot = map.make_plot(&small()).unwrap();

        // not found, ambiguous, bad coordinate, far side
        for icao in ["ZZZZ", "TWIN", "BAD1", "YSSY"] {
            let mut plotted = true;
            let warnings = count_warnings(|| plotted = map.plot_airport(&mut plot, icao));
            assert!(!plotted, "{} should be skipped", icao);
            assert_eq!(warnings, 1, "{} should warn once", icao);
        }
        assert!(plot.markers().is_empty());

        let mut plotted = false;
        let warnings = count_warnings(|| plotted = map.plot_airport(&mut plot, "ENGM"));
        assert!(plotted);
        assert_eq!(warnings, 0);
        assert_eq!(plot.markers().len(), 1);
    }

    #[test]
    fn globe_outline_only_on_orthographic_maps() {
        let ortho = flight_map(ProjectionKind::Orthographic, None).unwrap();
        let svg = ortho.make_plot(&small()).unwrap().to_svg();
        assert!(svg.contains("<circle id='globe'"));
        assert!(svg.contains("fill='none' stroke='#000000'"));

        let flat = flight_map(ProjectionKind::PlateCarree, None).unwrap();
        let svg = flat.make_plot(&small()).unwrap().to_svg();
        assert!(!svg.contains("id='globe'"));
        assert!(!svg.contains("url(#limb)"));
    }

    #[test]
    fn basemap_layers_are_drawn() {
        let map = flight_map(ProjectionKind::Orthographic, None).unwrap();
        let land = Layer {
            areas: vec![vec![vec![(10.0, 55.0), (14.0, 55.0), (14.0, 61.0), (10.0, 55.0)]]],
            lines: Vec::new(),
        };
        let borders = Layer { areas: Vec::new(), lines: vec![vec![(12.0, 56.0), (12.0, 60.0)]] };
        let options = PlotOptions { land: Some(land), borders: Some(borders), ..small() };

        let svg = map.make_plot(&options).unwrap().to_svg();
        assert!(svg.contains(&format!("fill='{}'", LAND_COLOR)));
        assert!(svg.contains(&format!("stroke='{}'", BORDER_COLOR)));
        assert!(svg.contains("clip-path='url(#limb)'"));
    }

    #[test]
    fn save_picks_format_from_extension() {
        let map = flight_map(ProjectionKind::Orthographic, Some("PLANE_ALTITUDE")).unwrap();
        let plot = map.make_plot(&small()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let opt = usvg::Options::default();

        let svg_path = dir.path().join("map.svg");
        plot.save(&svg_path, &opt).unwrap();
        assert!(fs::read_to_string(&svg_path).unwrap().starts_with("<svg"));

        let png_path = dir.path().join("map.PNG");
        plot.save(&png_path, &opt).unwrap();
        assert_eq!(&fs::read(&png_path).unwrap()[..4], b"\x89PNG");

        assert!(matches!(
            plot.save(dir.path().join("map.jpg"), &opt),
            Err(FlightMapError::UnsupportedOutput(_))
        ));
    }
}
