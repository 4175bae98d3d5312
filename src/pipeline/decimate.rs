// Track thinning for map rendering

use crate::models::Coordinate;

/// Every STRIDE-th point is kept.
pub const STRIDE: usize = 30;

/// A usable fix has both sides present and non-zero.
pub fn is_fix(point: &Coordinate) -> bool {
    point.iter().all(|v| v.is_some_and(|x| x != 0.0))
}

/// Drops trailing points without a fix so the track ends on a real position.
pub fn trim_invalid_tail(points: &mut Vec<Coordinate>) {
    while points.last().is_some_and(|p| !is_fix(p)) {
        points.pop();
    }
}

/// Trims the invalid tail, then keeps indices 0, 30, 60, ... of all but the last
/// point, and always re-appends the last point.
pub fn decimate(mut points: Vec<Coordinate>) -> Vec<Coordinate> {
    trim_invalid_tail(&mut points);
    let Some(last) = points.pop() else {
        return Vec::new();
    };
    let mut out: Vec<Coordinate> = points.into_iter().step_by(STRIDE).collect();
    out.push(last);
    out
}
