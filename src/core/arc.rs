use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::core::path::PathBuilder;

const EPSILON: f64 = 1e-12;

/// Annular sector generator centred on the origin.
///
/// Angles are in radians measured clockwise from 12 o'clock, so `0..TAU` is a
/// full turn starting at the top. Corners between the radial edges and the
/// arcs are rounded with `corner_radius`, limited to half the ring thickness
/// and, for sweeps under a half turn, to what the sector angle leaves room for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGenerator {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub corner_radius: f64,
}

impl ArcGenerator {
    #[must_use]
    pub const fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// SVG path data for the sector between `start_angle` and `end_angle`.
    ///
    /// Returns `""` when either angle is not finite.
    #[must_use]
    pub fn path(self, start_angle: f64, end_angle: f64) -> String {
        if !start_angle.is_finite() || !end_angle.is_finite() {
            return String::new();
        }

        let mut r0 = self.inner_radius.max(0.0);
        let mut r1 = self.outer_radius.max(0.0);
        if r1 < r0 {
            std::mem::swap(&mut r0, &mut r1);
        }

        let a0 = start_angle - FRAC_PI_2;
        let a1 = end_angle - FRAC_PI_2;
        let da = (a1 - a0).abs();
        let cw = a1 > a0;

        let mut path = PathBuilder::new();

        if r1 <= EPSILON {
            path.move_to(0.0, 0.0);
        } else if da > TAU - EPSILON {
            path.move_to(r1 * a0.cos(), r1 * a0.sin());
            path.arc(0.0, 0.0, r1, a0, a1, !cw);
            if r0 > EPSILON {
                path.move_to(r0 * a1.cos(), r0 * a1.sin());
                path.arc(0.0, 0.0, r0, a1, a0, cw);
            }
        } else {
            self.sector(&mut path, r0, r1, a0, a1, da, cw);
        }

        path.close();
        path.finish()
    }

    #[allow(clippy::too_many_arguments)]
    fn sector(
        self,
        path: &mut PathBuilder,
        r0: f64,
        r1: f64,
        a0: f64,
        a1: f64,
        da: f64,
        cw: bool,
    ) {
        let rc = ((r1 - r0).abs() / 2.0).min(self.corner_radius.max(0.0));
        let mut rc0 = rc;
        let mut rc1 = rc;

        let x01 = r1 * a0.cos();
        let y01 = r1 * a0.sin();
        let x10 = r0 * a1.cos();
        let y10 = r0 * a1.sin();
        let x11 = r1 * a1.cos();
        let y11 = r1 * a1.sin();
        let x00 = r0 * a0.cos();
        let y00 = r0 * a0.sin();

        if rc > EPSILON && da < PI {
            match intersect((x01, y01), (x00, y00), (x11, y11), (x10, y10)) {
                Some((ox, oy)) => {
                    let (ax, ay) = (x01 - ox, y01 - oy);
                    let (bx, by) = (x11 - ox, y11 - oy);
                    let cos_theta = (ax * bx + ay * by)
                        / ((ax * ax + ay * ay).sqrt() * (bx * bx + by * by).sqrt());
                    let kc = 1.0 / (cos_theta.clamp(-1.0, 1.0).acos() / 2.0).sin();
                    let lc = (ox * ox + oy * oy).sqrt();
                    rc0 = rc.min((r0 - lc) / (kc - 1.0));
                    rc1 = rc.min((r1 - lc) / (kc + 1.0));
                }
                None => {
                    rc0 = 0.0;
                    rc1 = 0.0;
                }
            }
        }

        if da <= EPSILON {
            path.move_to(x01, y01);
        } else if rc1 > EPSILON {
            let t0 = corner_tangents((x00, y00), (x01, y01), r1, rc1, cw);
            let t1 = corner_tangents((x11, y11), (x10, y10), r1, rc1, cw);
            path.move_to(t0.cx + t0.x01, t0.cy + t0.y01);
            if rc1 < rc {
                path.arc(t0.cx, t0.cy, rc1, t0.y01.atan2(t0.x01), t1.y01.atan2(t1.x01), !cw);
            } else {
                path.arc(t0.cx, t0.cy, rc1, t0.y01.atan2(t0.x01), t0.y11.atan2(t0.x11), !cw);
                path.arc(
                    0.0,
                    0.0,
                    r1,
                    (t0.cy + t0.y11).atan2(t0.cx + t0.x11),
                    (t1.cy + t1.y11).atan2(t1.cx + t1.x11),
                    !cw,
                );
                path.arc(t1.cx, t1.cy, rc1, t1.y11.atan2(t1.x11), t1.y01.atan2(t1.x01), !cw);
            }
        } else {
            path.move_to(x01, y01);
            path.arc(0.0, 0.0, r1, a0, a1, !cw);
        }

        if r0 <= EPSILON || da <= EPSILON {
            path.line_to(x10, y10);
        } else if rc0 > EPSILON {
            let t0 = corner_tangents((x10, y10), (x11, y11), r0, -rc0, cw);
            let t1 = corner_tangents((x01, y01), (x00, y00), r0, -rc0, cw);
            path.line_to(t0.cx + t0.x01, t0.cy + t0.y01);
            if rc0 < rc {
                path.arc(t0.cx, t0.cy, rc0, t0.y01.atan2(t0.x01), t1.y01.atan2(t1.x01), !cw);
            } else {
                path.arc(t0.cx, t0.cy, rc0, t0.y01.atan2(t0.x01), t0.y11.atan2(t0.x11), !cw);
                path.arc(
                    0.0,
                    0.0,
                    r0,
                    (t0.cy + t0.y11).atan2(t0.cx + t0.x11),
                    (t1.cy + t1.y11).atan2(t1.cx + t1.x11),
                    cw,
                );
                path.arc(t1.cx, t1.cy, rc0, t1.y11.atan2(t1.x11), t1.y01.atan2(t1.x01), !cw);
            }
        } else {
            path.arc(0.0, 0.0, r0, a1, a0, cw);
        }
    }
}

/// Intersection of line `p0 -> p1` with line `p2 -> p3`, if not parallel.
fn intersect(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
) -> Option<(f64, f64)> {
    let (x10, y10) = (p1.0 - p0.0, p1.1 - p0.1);
    let (x32, y32) = (p3.0 - p2.0, p3.1 - p2.1);
    let denom = y32 * x10 - x32 * y10;
    if denom * denom < EPSILON {
        return None;
    }
    let t = (x32 * (p0.1 - p2.1) - y32 * (p0.0 - p2.0)) / denom;
    Some((p0.0 + t * x10, p0.1 + t * y10))
}

/// Rounded-corner circle touching the radial edge `p0 -> p1` and the arc of
/// radius `r1`. `x01/y01` is the tangent point on the edge relative to the
/// corner centre, `x11/y11` the tangent point on the arc.
#[derive(Debug, Clone, Copy)]
struct CornerTangents {
    cx: f64,
    cy: f64,
    x01: f64,
    y01: f64,
    x11: f64,
    y11: f64,
}

fn corner_tangents(p0: (f64, f64), p1: (f64, f64), r1: f64, rc: f64, cw: bool) -> CornerTangents {
    let (x0, y0) = p0;
    let (x1, y1) = p1;
    let x01 = x0 - x1;
    let y01 = y0 - y1;
    let lo = (if cw { rc } else { -rc }) / (x01 * x01 + y01 * y01).sqrt();
    let ox = lo * y01;
    let oy = -lo * x01;
    let x11 = x0 + ox;
    let y11 = y0 + oy;
    let x10 = x1 + ox;
    let y10 = y1 + oy;
    let mid_x = (x11 + x10) / 2.0;
    let mid_y = (y11 + y10) / 2.0;
    let dx = x10 - x11;
    let dy = y10 - y11;
    let d2 = dx * dx + dy * dy;
    let r = r1 - rc;
    let cross = x11 * y10 - x10 * y11;
    let d = (if dy < 0.0 { -1.0 } else { 1.0 }) * (r * r * d2 - cross * cross).max(0.0).sqrt();

    let mut cx = (cross * dy - dx * d) / d2;
    let mut cy = (-cross * dx - dy * d) / d2;
    let cx_alt = (cross * dy + dx * d) / d2;
    let cy_alt = (-cross * dx + dy * d) / d2;

    let (dx0, dy0) = (cx - mid_x, cy - mid_y);
    let (dx1, dy1) = (cx_alt - mid_x, cy_alt - mid_y);
    if dx0 * dx0 + dy0 * dy0 > dx1 * dx1 + dy1 * dy1 {
        cx = cx_alt;
        cy = cy_alt;
    }

    CornerTangents {
        cx,
        cy,
        x01: -ox,
        y01: -oy,
        x11: cx * (r1 / r - 1.0),
        y11: cy * (r1 / r - 1.0),
    }
}

/// Angle of the point `(x, y)` in the generator's convention (clockwise from
/// 12 o'clock, in `[0, TAU)`).
#[must_use]
pub fn pointer_angle(x: f64, y: f64) -> f64 {
    (x.atan2(-y)).rem_euclid(TAU)
}
