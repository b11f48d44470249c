//! Point ordering: arrange a sampled point cloud into a traced path.
//!
//! Uses a greedy nearest-neighbor heuristic -- an approximate solution
//! to the open-path Hamiltonian problem. Visual continuity, not
//! minimal length, is the goal, so the heuristic is deliberately
//! simple rather than optimal.
//!
//! Complexity is O(n²) in the point count; this is the dominant cost
//! of the whole pipeline and the reason sampling density is bounded
//! upstream (stride and working resolution in
//! [`TraceConfig`](crate::types::TraceConfig)). A spatial index could
//! cut the scan cost, but only if it preserved the tie-break order
//! below exactly; the naive scan is kept for that reason.

use crate::types::{PixelPath, PixelPoint};

/// Order a point cloud into a single traced path.
///
/// Starts from the first point in input order (the sampler's row-major
/// scan makes this stable for identical input), then repeatedly appends
/// the remaining point nearest to the last appended one. Distance
/// comparisons use exact squared values; ties go to the
/// earliest-encountered remaining point.
///
/// The result is a permutation of the input -- every point appears
/// exactly once. Inputs with fewer than 2 points are returned
/// unchanged.
#[must_use = "returns the ordered path"]
pub fn order_points(points: &[PixelPoint]) -> PixelPath {
    let n = points.len();
    if n < 2 {
        return PixelPath::new(points.to_vec());
    }

    let mut visited = vec![false; n];
    let mut ordered = Vec::with_capacity(n);

    visited[0] = true;
    ordered.push(points[0]);
    let mut current = points[0];

    for _ in 1..n {
        let mut best: Option<usize> = None;
        let mut best_dist = u64::MAX;

        for (j, &candidate) in points.iter().enumerate() {
            if visited[j] {
                continue;
            }
            let dist = current.distance_squared(candidate);
            // Strict < keeps the earliest candidate on ties.
            if dist < best_dist {
                best_dist = dist;
                best = Some(j);
            }
        }

        // The loop invariant guarantees at least one unvisited point,
        // so `best` is always `Some` here. Use `continue` to satisfy
        // the type system without panicking.
        let Some(best_idx) = best else {
            continue;
        };

        visited[best_idx] = true;
        current = points[best_idx];
        ordered.push(current);
    }

    PixelPath::new(ordered)
}
