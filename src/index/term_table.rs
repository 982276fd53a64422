//! In-memory term table for the index builder
//!
//! Open-addressed linear-probing hash table keyed by (hash, length, bytes).
//! Term bytes are owned by a monotonic arena and referenced by offset; each
//! live slot carries the term's posting list. Hash value 0 marks an empty
//! slot, so a real FNV hash of 0 is remapped to 1.

use super::arena::Arena;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const INITIAL_CAPACITY: usize = 1 << 12;

/// FNV-1a over the term bytes, with 0 remapped to 1.
pub fn fnv1a_hash(bytes: &[u8]) -> u64 {
    let mut h = FNV_OFFSET_BASIS;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    if h == 0 {
        1
    } else {
        h
    }
}

struct TermSlot {
    hash: u64,
    term_off: usize,
    term_len: u16,
    postings: Vec<u32>,
}

impl TermSlot {
    fn empty() -> Self {
        Self {
            hash: 0,
            term_off: 0,
            term_len: 0,
            postings: Vec::new(),
        }
    }
}

pub struct TermTable {
    slots: Vec<TermSlot>,
    used: usize,
    arena: Arena,
}

impl TermTable {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// `capacity` must be a power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            slots: (0..capacity).map(|_| TermSlot::empty()).collect(),
            used: 0,
            arena: Arena::new(),
        }
    }

    /// Number of distinct terms currently held.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Record that `term` occurs in `doc_id`, creating the term on first
    /// sight. Doc-ids arrive in ascending order and each document contributes
    /// a term at most once, so comparing against the list tail is enough to
    /// keep the posting list strictly increasing.
    pub fn add_posting(&mut self, term: &[u8], doc_id: u32) {
        if term.is_empty() {
            return;
        }
        self.grow_if_needed();

        let hash = fnv1a_hash(term);
        let mask = self.slots.len() - 1;
        let mut pos = (hash as usize) & mask;
        loop {
            if self.slots[pos].hash == 0 {
                let term_off = self.arena.add(term);
                let slot = &mut self.slots[pos];
                slot.hash = hash;
                slot.term_off = term_off;
                slot.term_len = term.len() as u16;
                slot.postings.push(doc_id);
                self.used += 1;
                return;
            }
            let found = {
                let slot = &self.slots[pos];
                slot.hash == hash
                    && slot.term_len as usize == term.len()
                    && self.arena.get(slot.term_off, term.len()) == term
            };
            if found {
                let postings = &mut self.slots[pos].postings;
                if postings.last() != Some(&doc_id) {
                    postings.push(doc_id);
                }
                return;
            }
            pos = (pos + 1) & mask;
        }
    }

    /// Posting list of `term`, if present.
    pub fn get(&self, term: &[u8]) -> Option<&[u32]> {
        let hash = fnv1a_hash(term);
        let mask = self.slots.len() - 1;
        let mut pos = (hash as usize) & mask;
        loop {
            let slot = &self.slots[pos];
            if slot.hash == 0 {
                return None;
            }
            if slot.hash == hash
                && slot.term_len as usize == term.len()
                && self.arena.get(slot.term_off, term.len()) == term
            {
                return Some(&slot.postings);
            }
            pos = (pos + 1) & mask;
        }
    }

    /// Live entries sorted by (bytes, length), ready for a block flush.
    pub fn sorted_entries(&self) -> Vec<(&[u8], &[u32])> {
        let mut entries: Vec<(&[u8], &[u32])> = self
            .slots
            .iter()
            .filter(|s| s.hash != 0)
            .map(|s| {
                (
                    self.arena.get(s.term_off, s.term_len as usize),
                    s.postings.as_slice(),
                )
            })
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// The memory figure compared against the build budget: slot array plus
    /// arena bytes plus posting-list backing storage.
    pub fn approx_mem_bytes(&self) -> usize {
        let mut bytes = self.slots.len() * std::mem::size_of::<TermSlot>() + self.arena.used();
        for slot in &self.slots {
            if slot.hash != 0 {
                bytes += slot.postings.capacity() * std::mem::size_of::<u32>();
            }
        }
        bytes
    }

    /// Drop all terms: posting allocations are freed, slots zeroed, and the
    /// arena rewound. Capacity is retained for the next ingestion window.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.hash = 0;
            slot.term_off = 0;
            slot.term_len = 0;
            slot.postings = Vec::new();
        }
        self.used = 0;
        self.arena.reset();
    }

    fn grow_if_needed(&mut self) {
        if self.used * 10 < self.slots.len() * 7 {
            return;
        }
        let new_capacity = self.slots.len() * 2;
        let old = std::mem::replace(
            &mut self.slots,
            (0..new_capacity).map(|_| TermSlot::empty()).collect(),
        );
        let mask = new_capacity - 1;
        for slot in old {
            if slot.hash == 0 {
                continue;
            }
            let mut pos = (slot.hash as usize) & mask;
            while self.slots[pos].hash != 0 {
                pos = (pos + 1) & mask;
            }
            self.slots[pos] = slot;
        }
    }
}

impl Default for TermTable {
    fn default() -> Self {
        Self::new()
    }
}
