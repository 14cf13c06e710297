//! Result sink for parallel aggregation
//!
//! Drains partial sums once every worker has finished and combines them.

use crossbeam_channel::Receiver;

use super::types::PartialSum;

/// Combined result of draining the partial-sum channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct CombinedSum {
    pub total: i64,
    pub partials: usize,
}

/// Drain every partial sum from `result_receiver` and add them up.
///
/// Must only be called after all senders are dropped, otherwise it blocks
/// until they are. Completion order does not affect the result.
pub(crate) fn combine_partial_sums(result_receiver: Receiver<PartialSum>) -> CombinedSum {
    result_receiver
        .iter()
        .fold(CombinedSum::default(), |acc, partial| CombinedSum {
            total: acc.total.wrapping_add(partial.sum),
            partials: acc.partials + 1,
        })
}
