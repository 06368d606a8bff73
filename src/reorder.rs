//! Sifting-based variable reordering.
//!
//! The size of a BDD is highly sensitive to the variable order: for
//! `f = (x1 ∧ y1) ∨ (x2 ∧ y2) ∨ ... ∨ (xn ∧ yn)` an interleaved order gives
//! O(n) nodes while separating the x's from the y's gives O(2^n). Finding
//! the optimal order is NP-complete, so the driver uses Rudell's sifting
//! heuristic: move one variable at a time through every position and keep
//! the position that minimized the diagram.
//!
//! Candidate positions are measured by rebuilding the diagram from the
//! netlist under the permuted order and reading the root's size, so the cost
//! of a pass is O(n^2) rebuilds. The driver makes exactly one pass over the
//! order; it does not iterate to a fixpoint.
//!
//! # References
//!
//! - R. Rudell. "Dynamic variable ordering for ordered binary decision
//!   diagrams." ICCAD 1993.

use log::{debug, info};

use crate::cache::CacheStats;
use crate::rebuild::Session;
use crate::reference::Ref;

/// Statistics collected during a sifting pass.
#[derive(Debug, Clone, Default)]
pub struct SiftStats {
    /// Diagram size before the pass.
    pub initial_size: usize,
    /// Diagram size after the pass.
    pub final_size: usize,
    /// Number of rebuilds performed.
    pub rebuilds: usize,
    /// Number of variables committed to a new position.
    pub moves: usize,
    /// Kernel operation-cache totals over the pass.
    pub cache: CacheStats,
}

impl SiftStats {
    /// Size reduction as a percentage of the initial size.
    pub fn reduction_percent(&self) -> f64 {
        if self.initial_size == 0 {
            return 0.0;
        }
        100.0 * (1.0 - self.final_size as f64 / self.initial_size as f64)
    }
}

/// Runs one sifting pass over the session's variable order.
///
/// For each variable of the order as it existed at entry: rebuild to get a
/// baseline, walk the variable up to the top one adjacent swap at a time,
/// measuring after every rebuild, restore, walk it down to the bottom the
/// same way, then commit the best position found (strictly smaller sizes
/// only, so the earliest position discovered wins ties) and rebuild. The
/// returned root is built under the final committed order.
pub fn sift(session: &mut Session) -> (Ref, SiftStats) {
    let mut stats = SiftStats::default();

    let mut root = session.rebuild();
    stats.rebuilds += 1;
    stats.initial_size = session.bdd().size(root);

    let vars = session.order().snapshot();
    debug!("sifting {} variables, initial size {}", vars.len(), stats.initial_size);

    for &v in &vars {
        let i = session.order().index_of(v);
        let snapshot = session.order().snapshot();

        root = session.rebuild();
        stats.rebuilds += 1;
        let mut best_size = session.bdd().size(root);
        let mut best_pos = i;

        // Walk up towards position 0.
        for j in (0..i).rev() {
            session.order_mut().swap_adjacent(j);
            root = session.rebuild();
            stats.rebuilds += 1;
            let size = session.bdd().size(root);
            if size < best_size {
                best_size = size;
                best_pos = j;
            }
        }
        session.order_mut().set_order(snapshot.clone());

        // Walk down towards the last position.
        for j in i + 1..snapshot.len() {
            session.order_mut().swap_adjacent(j - 1);
            root = session.rebuild();
            stats.rebuilds += 1;
            let size = session.bdd().size(root);
            if size < best_size {
                best_size = size;
                best_pos = j;
            }
        }
        session.order_mut().set_order(snapshot);

        if best_pos != i {
            session.order_mut().move_var(i, best_pos);
            root = session.rebuild();
            stats.rebuilds += 1;
            stats.moves += 1;
            debug!(
                "moved {} from position {} to {} (size {})",
                session.order().name(v),
                i,
                best_pos,
                best_size
            );
        }
    }

    // The last variable may have been explored without a commit; leave the
    // kernel consistent with the committed order.
    root = session.rebuild();
    stats.rebuilds += 1;
    stats.final_size = session.bdd().size(root);
    stats.cache = session.bdd().cache_stats();

    info!(
        "sifting: {} -> {} nodes ({:.1}% reduction, {} rebuilds, {} moves, {:.0}% cache hit rate)",
        stats.initial_size,
        stats.final_size,
        stats.reduction_percent(),
        stats.rebuilds,
        stats.moves,
        100.0 * stats.cache.hit_rate()
    );

    (root, stats)
}
