//! Collinear point removal for lattice rings.

use super::outline::PixelPath;

/// Drop every point that lies on the straight line through its neighbours.
///
/// Walks the ring once with a pending vertex: while the next point stays
/// on the line from the last committed vertex through the pending one,
/// the pending vertex is extended; when the line breaks it is committed.
/// The seam where the ring closes is then checked the same way, so the
/// result is idempotent.
pub fn simplify(path: &PixelPath) -> PixelPath {
    PixelPath {
        points: simplify_ring(&path.points),
        kind: path.kind,
    }
}

pub fn simplify_ring(points: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut iter = points.iter().copied();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut output = vec![first];
    let mut pending: Option<(i32, i32)> = None;

    for p in iter {
        match pending {
            Some(mid) if output.last().is_some_and(|&anchor| collinear(anchor, mid, p)) => {
                pending = Some(p);
            }
            Some(mid) => {
                output.push(mid);
                pending = Some(p);
            }
            None => {
                pending = Some(p);
            }
        }
    }
    flush(&mut output, &mut pending);
    close_seam(&mut output);
    output
}

/// Remove collinear points across the closing seam (last → first).
fn close_seam(ring: &mut Vec<(i32, i32)>) {
    while ring.len() >= 3 {
        let n = ring.len();
        if collinear(ring[n - 2], ring[n - 1], ring[0]) {
            ring.pop();
        } else if collinear(ring[n - 1], ring[0], ring[1]) {
            ring.remove(0);
        } else {
            break;
        }
    }
}

fn flush(output: &mut Vec<(i32, i32)>, pending: &mut Option<(i32, i32)>) {
    if let Some(p) = pending.take() {
        output.push(p);
    }
}

/// Exact integer collinearity: cross product of (b - a) and (c - a) is zero.
fn collinear(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> bool {
    let (abx, aby) = ((b.0 - a.0) as i64, (b.1 - a.1) as i64);
    let (acx, acy) = ((c.0 - a.0) as i64, (c.1 - a.1) as i64);
    abx * acy - aby * acx == 0
}
