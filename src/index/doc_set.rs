//! Per-document term dedup set
//!
//! The builder pays one posting-list append per (term, document) pair; this
//! set is what enforces the "per document" part. It shares the open-addressed
//! layout of the term table but stores no postings, and is reset between
//! documents (slots zeroed, arena rewound). When an insert would push the
//! load past 80% the set doubles and rehashes.

use super::arena::Arena;
use super::term_table::fnv1a_hash;

const INITIAL_CAPACITY: usize = 1 << 12;

#[derive(Clone, Copy)]
struct SetSlot {
    hash: u64,
    term_off: usize,
    term_len: u16,
}

const EMPTY_SLOT: SetSlot = SetSlot {
    hash: 0,
    term_off: 0,
    term_len: 0,
};

pub struct DocTermSet {
    slots: Vec<SetSlot>,
    used: usize,
    arena: Arena,
}

impl DocTermSet {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// `capacity` must be a power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            slots: vec![EMPTY_SLOT; capacity],
            used: 0,
            arena: Arena::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Forget all members. Called between documents.
    pub fn reset(&mut self) {
        self.slots.fill(EMPTY_SLOT);
        self.used = 0;
        self.arena.reset();
    }

    /// Returns true if `term` was already present; otherwise inserts it and
    /// returns false. The empty term counts as present.
    pub fn contains_or_add(&mut self, term: &[u8]) -> bool {
        if term.is_empty() {
            return true;
        }
        if self.used * 10 >= self.slots.len() * 8 {
            self.grow();
        }

        let hash = fnv1a_hash(term);
        let mask = self.slots.len() - 1;
        let mut pos = (hash as usize) & mask;
        loop {
            let slot = self.slots[pos];
            if slot.hash == 0 {
                let term_off = self.arena.add(term);
                self.slots[pos] = SetSlot {
                    hash,
                    term_off,
                    term_len: term.len() as u16,
                };
                self.used += 1;
                return false;
            }
            if slot.hash == hash
                && slot.term_len as usize == term.len()
                && self.arena.get(slot.term_off, term.len()) == term
            {
                return true;
            }
            pos = (pos + 1) & mask;
        }
    }

    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        let old = std::mem::replace(&mut self.slots, vec![EMPTY_SLOT; new_capacity]);
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

impl Default for DocTermSet {
    fn default() -> Self {
        Self::new()
    }
}
