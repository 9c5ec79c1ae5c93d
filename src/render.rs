//! Planar geometry and SVG output for abstract values.
//!
//! This module turns an interval pair or a zonotope of at most two dimensions
//! into drawable primitives (rectangle, generator arrows, polygon) and
//! renders them as a standalone SVG document.
//!
//! One-dimensional zonotopes are drawn on the `y = 0` line.
//!
//! # Examples
//!
//! ```
//! use ndarray::array;
//! use zonotope_rs::render::SvgConfig;
//! use zonotope_rs::zonotope::Zonotope;
//!
//! let z = Zonotope::new(array![[2.0, 1.0, 0.0], [3.0, 1.0, 1.0]]);
//! let svg = z.to_svg(&SvgConfig::default()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! // std::fs::write("zonotope.svg", svg).unwrap();
//! ```

use log::debug;

use crate::error::{DomainError, Result};
use crate::interval::Interval;
use crate::zonotope::Zonotope;

/// A point in the plane.
pub type Point = (f64, f64);

/// Axis-aligned rectangle spanned by two intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Segment from the center of a zonotope to `center ± generator`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub from: Point,
    pub to: Point,
}

/// Configuration options for SVG output.
///
/// ```
/// use zonotope_rs::render::SvgConfig;
///
/// let config = SvgConfig {
///     arrows: false,
///     fill: "steelblue",
///     ..SvgConfig::default()
/// };
/// assert!(config.shape);
/// ```
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Canvas width in pixels (default: 400)
    pub width: f64,
    /// Canvas height in pixels (default: 500)
    pub height: f64,
    /// Visible x range (default: 0..4)
    pub x_range: (f64, f64),
    /// Visible y range (default: 0..5)
    pub y_range: (f64, f64),
    /// Fill colour of shapes (default: "green")
    pub fill: &'static str,
    /// Fill opacity of shapes (default: 0.5)
    pub opacity: f64,
    /// Stroke colour of outlines and arrows (default: "black")
    pub stroke: &'static str,
    /// Draw generator arrows (default: true)
    pub arrows: bool,
    /// Draw the filled zonotope shape (default: true)
    pub shape: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 500.0,
            x_range: (0.0, 4.0),
            y_range: (0.0, 5.0),
            fill: "green",
            opacity: 0.5,
            stroke: "black",
            arrows: true,
            shape: true,
        }
    }
}

impl SvgConfig {
    fn project(&self, (x, y): Point) -> Point {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        let px = (x - x0) / (x1 - x0) * self.width;
        let py = self.height - (y - y0) / (y1 - y0) * self.height;
        (px, py)
    }

    fn header(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
            self.width, self.height, self.width, self.height
        )
    }
}

/// Rectangle covering `x × y`.
pub fn rectangle(x: Interval, y: Interval) -> Rect {
    Rect {
        x: x.lower,
        y: y.lower,
        width: x.width(),
        height: y.width(),
    }
}

/// SVG document with the unfilled rectangle `x × y`.
pub fn intervals_to_svg(x: Interval, y: Interval, config: &SvgConfig) -> String {
    let rect = rectangle(x, y);
    let (px0, py0) = config.project((rect.x, rect.y + rect.height));
    let (px1, py1) = config.project((rect.x + rect.width, rect.y));

    let mut svg = config.header();
    svg.push_str(&format!(
        "<rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" fill=\"none\" stroke=\"{}\"/>\n",
        px0,
        py0,
        px1 - px0,
        py1 - py0,
        config.stroke
    ));
    svg.push_str("</svg>\n");
    svg
}

impl Zonotope {
    /// Center and generators projected to the plane.
    fn planar(&self) -> Result<(Point, Vec<Point>)> {
        if self.dimensions() > 2 {
            return Err(DomainError::UnsupportedDimension(self.dimensions()));
        }
        let values = self.values();
        let coord = |dim: usize, col: usize| if dim < self.dimensions() { values[[dim, col]] } else { 0.0 };
        let center = (coord(0, 0), coord(1, 0));
        let generators = (1..=self.generators()).map(|k| (coord(0, k), coord(1, k))).collect();
        Ok((center, generators))
    }

    /// Two arrows per generator: center to `center + g` and center to `center - g`.
    pub fn generator_arrows(&self) -> Result<Vec<Arrow>> {
        let (c, generators) = self.planar()?;
        Ok(generators
            .iter()
            .flat_map(|&(gx, gy)| {
                [
                    Arrow {
                        from: c,
                        to: (c.0 + gx, c.1 + gy),
                    },
                    Arrow {
                        from: c,
                        to: (c.0 - gx, c.1 - gy),
                    },
                ]
            })
            .collect())
    }

    /// All `2^generators` sign combinations of the generators, ordered by
    /// angle around their centroid.
    ///
    /// # Panics
    ///
    /// Panics if the zonotope has 32 or more generators.
    pub fn vertices(&self) -> Result<Vec<Point>> {
        let (c, generators) = self.planar()?;
        let m = generators.len();
        assert!(m < 32, "Too many generators to enumerate: {}", m);
        debug!("vertices: enumerating {} sign combinations", 1u64 << m);

        let mut points: Vec<Point> = (0..1u64 << m)
            .map(|mask| {
                generators.iter().enumerate().fold(c, |(x, y), (k, &(gx, gy))| {
                    let sign = if mask & (1 << k) != 0 { 1.0 } else { -1.0 };
                    (x + sign * gx, y + sign * gy)
                })
            })
            .collect();

        let n = points.len() as f64;
        let cx = points.iter().map(|p| p.0).sum::<f64>() / n;
        let cy = points.iter().map(|p| p.1).sum::<f64>() / n;
        points.sort_by(|a, b| {
            let ta = (a.1 - cy).atan2(a.0 - cx);
            let tb = (b.1 - cy).atan2(b.0 - cx);
            ta.total_cmp(&tb)
        });
        Ok(points)
    }

    /// Renders the zonotope as an SVG document.
    ///
    /// With fewer than two generators the shape degenerates to a segment and
    /// is drawn as a polyline. Fails for more than two dimensions even when
    /// nothing is drawn.
    pub fn to_svg(&self, config: &SvgConfig) -> Result<String> {
        self.planar()?;
        let mut svg = config.header();

        if config.shape {
            let points: Vec<String> = self
                .vertices()?
                .into_iter()
                .map(|p| {
                    let (x, y) = config.project(p);
                    format!("{:.3},{:.3}", x, y)
                })
                .collect();
            let element = if self.generators() >= 2 { "polygon" } else { "polyline" };
            svg.push_str(&format!(
                "<{} points=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\"/>\n",
                element,
                points.join(" "),
                config.fill,
                config.opacity,
                config.stroke
            ));
        }

        if config.arrows {
            for arrow in self.generator_arrows()? {
                let (x1, y1) = config.project(arrow.from);
                let (x2, y2) = config.project(arrow.to);
                svg.push_str(&format!(
                    "<line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\" stroke=\"{}\"/>\n",
                    x1, y1, x2, y2, config.stroke
                ));
            }
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}
