//! Head/tail layout
//!
//! Encoding runs in two passes. `build` walks the codec and value trees
//! together and pushes one [`Block`] per dynamic value into an arena;
//! children are always pushed before their parent, so a block only ever
//! refers to lower ids. `BlockGraph::to_bytes` then assigns positions in
//! depth-first order and resolves every pointer slot into a relative offset.

use crate::codec::{elementary, ArrayLength, Codec};
use crate::error::AbiError;
use crate::value::Value;
use calldata_primitives::{padded_len, H256, WORD_SIZE};
use tracing::trace;

/// Index of a block in a [`BlockGraph`]
pub(crate) type BlockId = usize;

/// One head word
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Inline static data
    Word(H256),
    /// Offset to a child tail. `alias` redirects the offset to an
    /// identical block kept elsewhere; `target` itself is then not emitted.
    Pointer {
        target: BlockId,
        alias: Option<BlockId>,
    },
}

/// A contiguous run of words: an optional length header followed by
/// head slots. Offsets in the slots are relative to the end of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub(crate) header: Option<H256>,
    pub(crate) slots: Vec<Slot>,
}

impl Block {
    /// Length-prefixed, right-padded payload of a `bytes` or `string`
    fn payload(data: &[u8]) -> Self {
        let mut slots = Vec::with_capacity(padded_len(data.len()) / WORD_SIZE);
        for chunk in data.chunks(WORD_SIZE) {
            let mut word = [0u8; WORD_SIZE];
            word[..chunk.len()].copy_from_slice(chunk);
            slots.push(Slot::Word(H256::from_bytes(word)));
        }
        Block {
            header: Some(H256::from_usize(data.len())),
            slots,
        }
    }

    pub(crate) fn header_len(&self) -> usize {
        if self.header.is_some() {
            WORD_SIZE
        } else {
            0
        }
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.header_len() + self.slots.len() * WORD_SIZE
    }
}

/// Arena of blocks rooted at `root`
#[derive(Debug, Clone)]
pub(crate) struct BlockGraph {
    pub(crate) blocks: Vec<Block>,
    pub(crate) root: BlockId,
}

/// Lay out `value` as the root of a fresh block graph
pub(crate) fn build(codec: &Codec, value: &Value) -> Result<BlockGraph, AbiError> {
    let mut builder = Builder { blocks: Vec::new() };
    let root = builder.block(codec, value)?;
    Ok(BlockGraph {
        blocks: builder.blocks,
        root,
    })
}

struct Builder {
    blocks: Vec<Block>,
}

impl Builder {
    fn push(&mut self, block: Block) -> BlockId {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    /// The block `value` occupies when referenced through an offset, or
    /// when it is the root. Static codecs get a block of inline words.
    fn block(&mut self, codec: &Codec, value: &Value) -> Result<BlockId, AbiError> {
        if codec.is_static() {
            let mut slots = Vec::new();
            self.inline(codec, value, &mut slots)?;
            return Ok(self.push(Block {
                header: None,
                slots,
            }));
        }

        let block = match codec {
            Codec::Bytes | Codec::String => {
                Block::payload(&elementary::payload_input(codec, value)?)
            }
            Codec::Array(array) => {
                let items = array.bind(value)?;
                let header = match array.length() {
                    ArrayLength::Dynamic => Some(H256::from_usize(items.len())),
                    ArrayLength::Fixed(_) => None,
                };
                let mut slots = Vec::with_capacity(items.len());
                for item in items {
                    self.member(array.element(), item, &mut slots)?;
                }
                Block { header, slots }
            }
            Codec::Tuple(tuple) => {
                let values = tuple.bind(value)?;
                let mut slots = Vec::with_capacity(values.len());
                for (codec, value) in tuple.codecs().zip(values) {
                    self.member(codec, value, &mut slots)?;
                }
                Block {
                    header: None,
                    slots,
                }
            }
            other => {
                return Err(AbiError::InvalidType(format!(
                    "{} has no tail",
                    other.type_name()
                )))
            }
        };
        Ok(self.push(block))
    }

    /// Append a member's head: its inline words if static, otherwise a
    /// pointer to a freshly built tail.
    fn member(
        &mut self,
        codec: &Codec,
        value: &Value,
        slots: &mut Vec<Slot>,
    ) -> Result<(), AbiError> {
        if codec.is_static() {
            return self.inline(codec, value, slots);
        }
        let target = self.block(codec, value)?;
        slots.push(Slot::Pointer {
            target,
            alias: None,
        });
        Ok(())
    }

    fn inline(&mut self, codec: &Codec, value: &Value, slots: &mut Vec<Slot>) -> Result<(), AbiError> {
        match codec {
            Codec::Array(array) => {
                for item in array.bind(value)? {
                    self.inline(array.element(), item, slots)?;
                }
            }
            Codec::Tuple(tuple) => {
                for (codec, value) in tuple.codecs().zip(tuple.bind(value)?) {
                    self.inline(codec, value, slots)?;
                }
            }
            _ => slots.push(Slot::Word(elementary::encode_word(codec, value)?)),
        }
        Ok(())
    }
}

impl BlockGraph {
    /// Blocks in emission order: depth-first from the root, following only
    /// pointers that are not aliased.
    pub(crate) fn layout_order(&self) -> Vec<BlockId> {
        let mut order = Vec::with_capacity(self.blocks.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            let children = self.blocks[id].slots.iter().rev().filter_map(|slot| match slot {
                Slot::Pointer {
                    target,
                    alias: None,
                } => Some(*target),
                _ => None,
            });
            stack.extend(children);
        }
        order
    }

    /// Assign positions and write the flat buffer
    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, AbiError> {
        let order = self.layout_order();

        let mut positions: Vec<Option<usize>> = vec![None; self.blocks.len()];
        let mut total = 0;
        for &id in &order {
            positions[id] = Some(total);
            total += self.blocks[id].byte_len();
        }

        let mut out = Vec::with_capacity(total);
        for &id in &order {
            let block = &self.blocks[id];
            let region = positions[id].ok_or(AbiError::UnresolvedPointer(id))? + block.header_len();
            if let Some(header) = &block.header {
                out.extend_from_slice(header.as_bytes());
            }
            for slot in &block.slots {
                match slot {
                    Slot::Word(word) => out.extend_from_slice(word.as_bytes()),
                    Slot::Pointer { target, alias } => {
                        let dest = alias.unwrap_or(*target);
                        let offset = positions
                            .get(dest)
                            .copied()
                            .flatten()
                            .and_then(|position| position.checked_sub(region))
                            .ok_or(AbiError::UnresolvedPointer(dest))?;
                        out.extend_from_slice(H256::from_usize(offset).as_bytes());
                    }
                }
            }
        }

        trace!(
            "Flattened {} of {} blocks into {} bytes",
            order.len(),
            self.blocks.len(),
            out.len()
        );
        Ok(out)
    }
}
