use alloy_primitives::U256;

use crate::types::TickInfo;

/// Storage backing the tick index.
///
/// Lets the update, crossing and bitmap logic run against contract storage
/// or an in-memory map alike. Reads of absent entries return the zero value.
pub trait TickStore {
    fn read_tick(&self, tick: i32) -> TickInfo;
    fn write_tick(&mut self, tick: i32, info: &TickInfo);
    fn remove_tick(&mut self, tick: i32);

    /// 256-bit bitmap word holding the initialized flags of compressed ticks
    /// `[word_pos * 256, word_pos * 256 + 255]`
    fn read_bitmap_word(&self, word_pos: i32) -> U256;
    fn write_bitmap_word(&mut self, word_pos: i32, word: U256);
}
