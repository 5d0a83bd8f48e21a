//! Rectangular map extents and the square-aspect correction applied before a
//! track is shown on a circular projection.

/// Half span used for an axis that has no extent at all (single sample track).
pub const MIN_HALF_SPAN: f64 = 0.5;

/// Axis aligned box, `x` is longitude and `y` latitude for geographic extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Make an extent square by widening its smaller axis around its center.
///
/// When the x span is smaller (`diff < 0`) the x bounds move by `diff/2`,
/// which, `diff` being negative, pushes them apart. Otherwise the y bounds are
/// pushed apart by `diff/2`. Inputs are not validated.
pub fn normalize_extent(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> (f64, f64, f64, f64) {
    let diff = (max_x - min_x) - (max_y - min_y);
    if diff < 0.0 {
        (min_x + diff / 2.0, max_x - diff / 2.0, min_y, max_y)
    } else {
        (min_x, max_x, min_y - diff / 2.0, max_y + diff / 2.0)
    }
}

impl Extent {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Extent { min_x, max_x, min_y, max_y }
    }

    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x, y) = iter.next()?;
        let init = Extent::new(x, x, y, y);

        Some(iter.fold(init, |e, (x, y)| Extent {
            min_x: e.min_x.min(x),
            max_x: e.max_x.max(x),
            min_y: e.min_y.min(y),
            max_y: e.max_y.max(y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn normalized(&self) -> Self {
        let (min_x, max_x, min_y, max_y) = normalize_extent(self.min_x, self.max_x, self.min_y, self.max_y);
        Extent { min_x, max_x, min_y, max_y }
    }

    /// Grow both axes by `fraction` of their span on each side. A degenerate
    /// axis is first opened up to `±MIN_HALF_SPAN` around its center.
    pub fn padded(&self, fraction: f64) -> Self {
        let (min_x, max_x) = pad_axis(self.min_x, self.max_x, fraction);
        let (min_y, max_y) = pad_axis(self.min_y, self.max_y, fraction);
        Extent { min_x, max_x, min_y, max_y }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

fn pad_axis(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    let (min, max) = if max - min > 0.0 {
        (min, max)
    } else {
        let c = (min + max) / 2.0;
        (c - MIN_HALF_SPAN, c + MIN_HALF_SPAN)
    };
    let pad = (max - min) * fraction;
    (min - pad, max + pad)
}
