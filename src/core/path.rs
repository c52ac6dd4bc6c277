use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

const EPSILON: f64 = 1e-6;
const TAU_EPSILON: f64 = TAU - EPSILON;

/// Incremental SVG path-data builder.
///
/// Tracks the current point so `arc` can connect to the previous segment
/// with an implicit line, and emits coordinates rounded to 1/1000 px.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    data: String,
    subpath_start: Option<(f64, f64)>,
    current: Option<(f64, f64)>,
}

impl PathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: String::with_capacity(128),
            subpath_start: None,
            current: None,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_command('M', &[x, y]);
        self.subpath_start = Some((x, y));
        self.current = Some((x, y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_command('L', &[x, y]);
        self.current = Some((x, y));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if self.current.is_some() {
            self.current = self.subpath_start;
            self.data.push('Z');
        }
        self
    }

    /// Circular arc around `(cx, cy)` from angle `a0` to `a1` (radians,
    /// screen orientation: 0 points right, positive turns clockwise).
    ///
    /// Starts with a move when the path is empty and with a line when the arc
    /// start is not the current point. Sweeps of a full turn or more are drawn
    /// as two half arcs.
    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        a0: f64,
        a1: f64,
        counter_clockwise: bool,
    ) -> &mut Self {
        let radius = radius.abs();
        let dx = radius * a0.cos();
        let dy = radius * a0.sin();
        let x0 = cx + dx;
        let y0 = cy + dy;
        let sweep = if counter_clockwise { 0.0 } else { 1.0 };
        let mut da = if counter_clockwise { a0 - a1 } else { a1 - a0 };

        match self.current {
            None => {
                self.move_to(x0, y0);
            }
            Some((x, y)) if (x - x0).abs() > EPSILON || (y - y0).abs() > EPSILON => {
                self.line_to(x0, y0);
            }
            Some(_) => {}
        }

        if radius == 0.0 || !da.is_finite() {
            return self;
        }

        if da < 0.0 {
            da = da % TAU + TAU;
        }

        if da > TAU_EPSILON {
            self.push_command('A', &[radius, radius, 0.0, 1.0, sweep, cx - dx, cy - dy]);
            self.push_command('A', &[radius, radius, 0.0, 1.0, sweep, x0, y0]);
            self.current = Some((x0, y0));
        } else if da > EPSILON {
            let x1 = cx + radius * a1.cos();
            let y1 = cy + radius * a1.sin();
            let large_arc = if da >= PI { 1.0 } else { 0.0 };
            self.push_command('A', &[radius, radius, 0.0, large_arc, sweep, x1, y1]);
            self.current = Some((x1, y1));
        }

        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.data
    }

    fn push_command(&mut self, command: char, values: &[f64]) {
        self.data.push(command);
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.data.push(',');
            }
            // Writing into a String cannot fail.
            let _ = write!(self.data, "{}", PathNumber(*value));
        }
    }
}

/// Path coordinate rounded to three decimals, without trailing zeros.
#[derive(Debug, Clone, Copy)]
pub struct PathNumber(pub f64);

impl std::fmt::Display for PathNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{rounded}")
        }
    }
}

/// Straight-segment path through `data`, breaking wherever `defined` is false.
///
/// Each run of consecutive defined points starts a new subpath, so no segment
/// ever joins two points across an undefined one. A run of one point is closed
/// (`Mx,yZ`) so round line caps still draw it as a dot. Returns `""` when no
/// point is defined.
pub fn line_path<T>(
    data: &[T],
    defined: impl Fn(&T) -> bool,
    x: impl Fn(&T) -> f64,
    y: impl Fn(&T) -> f64,
) -> String {
    let mut path = PathBuilder::new();
    let mut run_len = 0usize;

    for datum in data {
        if !defined(datum) {
            if run_len == 1 {
                path.close();
            }
            run_len = 0;
            continue;
        }
        if run_len == 0 {
            path.move_to(x(datum), y(datum));
        } else {
            path.line_to(x(datum), y(datum));
        }
        run_len += 1;
    }
    if run_len == 1 {
        path.close();
    }

    path.finish()
}
