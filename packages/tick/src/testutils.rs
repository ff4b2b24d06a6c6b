//! In-memory tick storage for tests.

use std::collections::BTreeMap;

use alloy_primitives::U256;

use crate::store::TickStore;
use crate::types::TickInfo;

#[derive(Clone, Debug, Default)]
pub struct MemoryTickStore {
    pub ticks: BTreeMap<i32, TickInfo>,
    pub words: BTreeMap<i32, U256>,
}

impl MemoryTickStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of `liquidity_net` over every stored tick.
    pub fn net_liquidity_sum(&self) -> i128 {
        self.ticks.values().map(|info| info.liquidity_net).sum()
    }

    /// Whether the bitmap bit for `tick` is set.
    pub fn is_flagged(&self, tick: i32, tick_spacing: i32) -> bool {
        let (word_pos, bit_pos) = crate::bitmap::position(tick / tick_spacing);
        let word = self.read_bitmap_word(word_pos);
        !(word & (U256::ONE << bit_pos)).is_zero()
    }
}

impl TickStore for MemoryTickStore {
    fn read_tick(&self, tick: i32) -> TickInfo {
        self.ticks.get(&tick).cloned().unwrap_or_default()
    }

    fn write_tick(&mut self, tick: i32, info: &TickInfo) {
        self.ticks.insert(tick, info.clone());
    }

    fn remove_tick(&mut self, tick: i32) {
        self.ticks.remove(&tick);
    }

    fn read_bitmap_word(&self, word_pos: i32) -> U256 {
        self.words.get(&word_pos).copied().unwrap_or_default()
    }

    fn write_bitmap_word(&mut self, word_pos: i32, word: U256) {
        self.words.insert(word_pos, word);
    }
}
