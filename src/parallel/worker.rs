//! Worker thread for parallel aggregation
//!
//! Each worker sums one chunk and reports a single partial result.

use crossbeam_channel::Sender;

use crate::record::Record;

use super::types::{Chunk, PartialSum};

/// Sum `a + b` over every record, wrapping at the `i64` width
pub fn chunk_sum(records: &[Record]) -> i64 {
    records
        .iter()
        .fold(0i64, |acc, record| acc.wrapping_add(record.value()))
}

/// Worker thread: sums `chunk` of `records` with `sum_chunk` and sends the partial result
pub(crate) fn worker_thread<F>(
    chunk: Chunk,
    records: &[Record],
    result_sender: Sender<PartialSum>,
    sum_chunk: &F,
) where
    F: Fn(&[Record]) -> i64,
{
    let sum = sum_chunk(&records[chunk.range()]);

    // The receiver is held by the coordinator until every worker has been joined
    let sent = result_sender.send(PartialSum {
        chunk_id: chunk.id,
        sum,
    });
    debug_assert!(sent.is_ok(), "result receiver dropped before chunk {}", chunk.id);
}
