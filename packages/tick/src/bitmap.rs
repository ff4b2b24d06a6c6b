// Tick Bitmap
//
// One bit per usable (compressed) tick, packed into 256-bit words keyed by
// `compressed >> 8`. Searching within a single word is a mask plus a
// most/least significant bit lookup.

use alloy_primitives::U256;

use crate::error::TickError;
use crate::store::TickStore;

/// Word index and bit index of a compressed tick.
#[inline]
pub fn position(compressed: i32) -> (i32, usize) {
    (compressed >> 8, (compressed & 0xff) as usize)
}

/// Tick divided by spacing, rounded toward negative infinity.
#[inline]
pub fn compress(tick: i32, tick_spacing: i32) -> i32 {
    tick.div_euclid(tick_spacing)
}

/// Toggle the initialized bit of `tick`.
pub fn flip_tick<S: TickStore>(store: &mut S, tick: i32, tick_spacing: i32) -> Result<(), TickError> {
    if tick_spacing <= 0 || tick % tick_spacing != 0 {
        return Err(TickError::InvalidTickRange);
    }
    let (word_pos, bit_pos) = position(tick / tick_spacing);
    let mask = U256::ONE << bit_pos;
    let word = store.read_bitmap_word(word_pos);
    store.write_bitmap_word(word_pos, word ^ mask);
    Ok(())
}

/// Next initialized tick in the same word as `tick`, searching left
/// (at or below `tick`) when `lte`, otherwise strictly right.
///
/// When the word holds no initialized tick in that direction, returns the
/// word boundary with `false` so the caller can step to the next word.
pub fn next_initialized_tick_within_one_word<S: TickStore>(
    store: &S,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> (i32, bool) {
    let compressed = compress(tick, tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);
        // all bits at or to the right of bit_pos
        let mask = (U256::ONE << bit_pos) - U256::ONE + (U256::ONE << bit_pos);
        let masked = store.read_bitmap_word(word_pos) & mask;

        if masked.is_zero() {
            ((compressed - bit_pos as i32) * tick_spacing, false)
        } else {
            let msb = 255 - masked.leading_zeros();
            ((compressed - (bit_pos - msb) as i32) * tick_spacing, true)
        }
    } else {
        let (word_pos, bit_pos) = position(compressed + 1);
        // all bits at or to the left of bit_pos
        let mask = !((U256::ONE << bit_pos) - U256::ONE);
        let masked = store.read_bitmap_word(word_pos) & mask;

        if masked.is_zero() {
            ((compressed + 1 + (255 - bit_pos) as i32) * tick_spacing, false)
        } else {
            let lsb = masked.trailing_zeros();
            ((compressed + 1 + (lsb - bit_pos) as i32) * tick_spacing, true)
        }
    }
}
