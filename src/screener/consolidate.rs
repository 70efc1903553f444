//! Overlap consolidation
//!
//! Candidates a few bars apart often track the same run. Moves of one ticker
//! whose start-to-peak windows overlap collapse into the strongest of them.

use std::collections::BTreeMap;

use crate::analysis::Move;

/// Keep one move per cluster of overlapping moves, per ticker
///
/// A cluster is a chain of moves each overlapping the next when sorted by
/// start date. The survivor has the largest growth; ties go to the earlier
/// start. Output is sorted by ticker, then start date.
pub fn consolidate_overlapping_moves(moves: Vec<Move>) -> Vec<Move> {
    let mut by_ticker: BTreeMap<String, Vec<Move>> = BTreeMap::new();
    for mv in moves {
        by_ticker.entry(mv.ticker.clone()).or_default().push(mv);
    }

    let mut consolidated = Vec::new();
    for (ticker, mut group) in by_ticker {
        let before = group.len();
        group.sort_by_key(|m| (m.start_date, m.end_date));

        let mut kept: Vec<Move> = Vec::new();
        let mut cluster_end = None;
        for mv in group {
            match (kept.last_mut(), cluster_end) {
                (Some(best), Some(end)) if mv.start_date <= end => {
                    cluster_end = Some(mv.end_date.max(end));
                    if mv.growth_percentage > best.growth_percentage {
                        *best = mv;
                    }
                }
                _ => {
                    cluster_end = Some(mv.end_date);
                    kept.push(mv);
                }
            }
        }

        if kept.len() < before {
            tracing::debug!(
                ticker = %ticker,
                before,
                after = kept.len(),
                "Consolidated overlapping moves"
            );
        }
        consolidated.extend(kept);
    }

    consolidated.sort_by(|a, b| {
        a.ticker
            .cmp(&b.ticker)
            .then(a.start_date.cmp(&b.start_date))
    });
    consolidated
}
