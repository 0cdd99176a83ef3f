//! Plot-space projection for price series.
//!
//! Every coordinate produced here is a percentage of the plotting viewport:
//! `x` runs left to right over `[0, 100]`, `y` runs top to bottom over
//! `[0, 100]`. Renderers scale these to whatever surface they draw on.

use ratatui::layout::Rect;

pub const BASELINE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    /// Headroom added above and below the data, as a share of the range.
    pub padding: f64,
    /// Smallest range used for scaling, so flat series stay finite.
    pub min_range: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            padding: 0.1,
            min_range: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverState {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub line: Vec<(f64, f64)>,
    /// The line closed down to the baseline at both edges.
    pub fill: Vec<(f64, f64)>,
}

pub fn project<'a, I>(samples: I, geometry: &ChartGeometry) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a f64>,
    I::IntoIter: ExactSizeIterator + Clone,
{
    let iter = samples.into_iter();
    let n = iter.len();
    if n == 0 {
        return Vec::new();
    }

    let (min, max) = iter
        .clone()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let range = (max - min).max(geometry.min_range);
    let pad = range * geometry.padding;
    let padded_range = range * (1.0 + 2.0 * geometry.padding);

    iter.enumerate()
        .map(|(i, value)| {
            let x = if n == 1 {
                0.0
            } else {
                i as f64 / (n - 1) as f64 * 100.0
            };
            let y = 100.0 - ((value - min + pad) / padded_range * 100.0);
            ChartPoint {
                x,
                y,
                value: *value,
            }
        })
        .collect()
}

pub fn build_outline(points: &[ChartPoint]) -> Outline {
    let line: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    if line.is_empty() {
        return Outline::default();
    }
    let mut fill = Vec::with_capacity(line.len() + 2);
    fill.push((0.0, BASELINE));
    fill.extend(line.iter().copied());
    fill.push((100.0, BASELINE));
    Outline { line, fill }
}

/// Sample nearest to a pointer given as a fraction of the plot width.
pub fn nearest_point(points: &[ChartPoint], fraction: f64) -> Option<HoverState> {
    if points.is_empty() {
        return None;
    }
    let last = points.len() - 1;
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let index = ((fraction * last as f64).round() as usize).min(last);
    let point = points[index];
    Some(HoverState {
        x: point.x,
        y: point.y,
        value: point.value,
        index,
    })
}

/// Height of the outline at `x`, interpolated between neighbouring vertices.
pub fn interpolate_y(line: &[(f64, f64)], x: f64) -> Option<f64> {
    let first = line.first()?;
    if line.len() == 1 || x <= first.0 {
        return Some(first.1);
    }
    for pair in line.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            if x1 - x0 <= f64::EPSILON {
                return Some(y1);
            }
            let t = (x - x0) / (x1 - x0);
            return Some(y0 + (y1 - y0) * t);
        }
    }
    line.last().map(|p| p.1)
}

/// Horizontal pointer position inside `area` as a fraction of its width.
/// `None` means the pointer is off the plot.
pub fn pointer_fraction(column: u16, row: u16, area: Rect) -> Option<f64> {
    let inside = column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height);
    if !inside {
        return None;
    }
    if area.width <= 1 {
        return Some(0.0);
    }
    Some((column - area.x) as f64 / (area.width - 1) as f64)
}

/// Pointer read-out over a chart. Updates are applied immediately, one per
/// pointer event.
#[derive(Debug, Default, Clone)]
pub struct Hover {
    state: Option<HoverState>,
}

impl Hover {
    pub fn on_pointer_move(&mut self, points: &[ChartPoint], fraction: f64) {
        self.state = nearest_point(points, fraction);
    }

    pub fn on_pointer_leave(&mut self) {
        self.state = None;
    }

    pub fn state(&self) -> Option<HoverState> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ChartGeometry {
        ChartGeometry::default()
    }

    #[test]
    fn empty_series_projects_nothing() {
        let samples: Vec<f64> = Vec::new();
        assert!(project(&samples, &geometry()).is_empty());
        assert_eq!(build_outline(&[]), Outline::default());
        assert!(nearest_point(&[], 0.5).is_none());
    }

    #[test]
    fn single_sample_sits_on_left_edge() {
        let points = project(&[0.05], &geometry());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 0.0);
        assert!((0.0..=100.0).contains(&points[0].y));
    }

    #[test]
    fn projection_spans_width_and_inverts_y() {
        let samples = [10.0, 20.0, 30.0];
        let points = project(&samples, &geometry());
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[1].x, 50.0);
        assert_eq!(points[2].x, 100.0);
        // range 20, pad 2, padded 24
        let expected_low = 100.0 - (2.0 / 24.0 * 100.0);
        let expected_high = 100.0 - (22.0 / 24.0 * 100.0);
        assert!((points[0].y - expected_low).abs() < 1e-9);
        assert!((points[2].y - expected_high).abs() < 1e-9);
        assert!(points[2].y < points[0].y);
    }

    #[test]
    fn flat_series_stays_in_viewport() {
        let points = project(&[0.3, 0.3, 0.3], &geometry());
        for p in points {
            assert!((0.0..=100.0).contains(&p.y));
        }
    }

    #[test]
    fn outline_closes_to_baseline() {
        let points = project(&[1.0, 2.0], &geometry());
        let outline = build_outline(&points);
        assert_eq!(outline.line.len(), 2);
        assert_eq!(outline.fill.first(), Some(&(0.0, BASELINE)));
        assert_eq!(outline.fill.last(), Some(&(100.0, BASELINE)));
        assert_eq!(&outline.fill[1..3], outline.line.as_slice());
    }

    #[test]
    fn nearest_point_clamps_out_of_range_fractions() {
        let points = project(&[1.0, 2.0, 3.0, 4.0], &geometry());
        assert_eq!(nearest_point(&points, 0.0).unwrap().index, 0);
        assert_eq!(nearest_point(&points, 1.0).unwrap().index, 3);
        assert_eq!(nearest_point(&points, -3.0).unwrap().index, 0);
        assert_eq!(nearest_point(&points, 7.5).unwrap().index, 3);
        assert_eq!(nearest_point(&points, 0.5).unwrap().index, 2);
        assert_eq!(nearest_point(&points, f64::NAN).unwrap().index, 0);
    }

    #[test]
    fn interpolation_follows_segments() {
        let line = [(0.0, 100.0), (50.0, 0.0), (100.0, 50.0)];
        assert_eq!(interpolate_y(&line, 25.0), Some(50.0));
        assert_eq!(interpolate_y(&line, 75.0), Some(25.0));
        assert_eq!(interpolate_y(&line, 120.0), Some(50.0));
        assert_eq!(interpolate_y(&[], 10.0), None);
    }

    #[test]
    fn pointer_fraction_maps_columns() {
        let area = Rect::new(10, 5, 11, 4);
        assert_eq!(pointer_fraction(10, 5, area), Some(0.0));
        assert_eq!(pointer_fraction(20, 8, area), Some(1.0));
        assert_eq!(pointer_fraction(15, 6, area), Some(0.5));
        assert_eq!(pointer_fraction(21, 6, area), None);
        assert_eq!(pointer_fraction(12, 9, area), None);
    }

    #[test]
    fn hover_tracks_and_clears() {
        let points = project(&[1.0, 2.0], &geometry());
        let mut hover = Hover::default();
        hover.on_pointer_move(&points, 0.9);
        assert_eq!(hover.state().map(|h| h.index), Some(1));
        hover.on_pointer_move(&points, 0.1);
        assert_eq!(hover.state().map(|h| h.index), Some(0));
        hover.on_pointer_leave();
        assert!(hover.state().is_none());
    }
}
