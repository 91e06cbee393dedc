//! Tail deduplication
//!
//! Every block gets a content key: Keccak-256 over its header and slots,
//! with pointer slots contributing the key of their target instead of an
//! offset. Keys ignore declared types, so any two tails that would decode
//! from the same words share one copy.
//!
//! Within each key group the copy laid out last is kept and every other
//! pointer is aliased to it. Aliased targets are then skipped when
//! flattening, along with everything below them. Keeping the last copy
//! keeps all offsets pointing forward.

use crate::layout::{BlockGraph, BlockId, Slot};
use calldata_primitives::{Hash, H256};
use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use tracing::debug;

const TAG_HEADER: u8 = 0x01;
const TAG_NO_HEADER: u8 = 0x02;
const TAG_WORD: u8 = 0x03;
const TAG_POINTER: u8 = 0x04;

/// Outcome of one optimizer pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct OptimizeSummary {
    /// Pointer slots examined
    pub(crate) pointers: usize,
    /// Pointer slots redirected to a shared copy
    pub(crate) aliases: usize,
    /// Bytes no longer emitted
    pub(crate) bytes_saved: usize,
}

/// Alias every duplicate tail in `graph` to its last copy
pub(crate) fn optimize(graph: &mut BlockGraph) -> OptimizeSummary {
    let keys = content_keys(graph);
    let before = emitted_len(graph);

    let mut last: HashMap<Hash, BlockId> = HashMap::new();
    for id in graph.layout_order() {
        last.insert(keys[id], id);
    }

    let mut summary = OptimizeSummary::default();
    for block in &mut graph.blocks {
        for slot in &mut block.slots {
            if let Slot::Pointer { target, alias } = slot {
                summary.pointers += 1;
                let keep = last.get(&keys[*target]).copied().unwrap_or(*target);
                if keep != *target {
                    *alias = Some(keep);
                    summary.aliases += 1;
                }
            }
        }
    }

    summary.bytes_saved = before.saturating_sub(emitted_len(graph));
    debug!(
        "Optimized calldata: {} pointers, {} aliased, {} bytes saved",
        summary.pointers, summary.aliases, summary.bytes_saved
    );
    summary
}

/// Content key of every block, indexed by id.
///
/// Children always have lower ids than their parents, so one pass in id
/// order sees every child key before it is needed.
fn content_keys(graph: &BlockGraph) -> Vec<Hash> {
    let mut keys: Vec<Hash> = Vec::with_capacity(graph.blocks.len());
    for block in &graph.blocks {
        let mut hasher = Keccak256::new();
        match &block.header {
            Some(header) => {
                hasher.update([TAG_HEADER]);
                hasher.update(header.as_bytes());
            }
            None => hasher.update([TAG_NO_HEADER]),
        }
        for slot in &block.slots {
            match slot {
                Slot::Word(word) => {
                    hasher.update([TAG_WORD]);
                    hasher.update(word.as_bytes());
                }
                Slot::Pointer { target, .. } => {
                    hasher.update([TAG_POINTER]);
                    hasher.update(keys[*target].as_bytes());
                }
            }
        }
        keys.push(H256::from_bytes(hasher.finalize().into()));
    }
    keys
}

fn emitted_len(graph: &BlockGraph) -> usize {
    graph
        .layout_order()
        .into_iter()
        .map(|id| graph.blocks[id].byte_len())
        .sum()
}
