//! The canonical one-liners.

use super::Word;
use crate::algorithm::{Algorithm, Category};

pub const ALGORITHMS: [Algorithm; 3] = [
    Algorithm::new(
        "Classic Mix",
        "A balanced mix of bass, melody, harmony and rhythm using pure bytebeat operations",
        Category::Classic,
        classic_mix,
    ),
    Algorithm::new(
        "Viznut Original",
        "The original bytebeat formula by Viznut that started it all",
        Category::Classic,
        viznut_original,
    ),
    Algorithm::new(
        "Layered Blend",
        "Weighted blend of the four Classic Mix layers, softened and clamped",
        Category::Classic,
        layered_blend,
    ),
];

/// Bass, melody, harmony and rhythm, in that order.
#[inline]
fn layers(t: Word) -> [Word; 4] {
    let bass = ((t >> 4) | (t >> 8)) * (((t >> 12) & 63) + 1);
    let melody = (t * 5 & t >> 7) | (t * 3 & t >> 10);
    let harmony = t * (t >> 5 | t >> 8) >> (t >> 16);
    let rhythm = t * ((t >> 9 | t >> 13) & 15);
    [bass, melody, harmony, rhythm]
}

pub fn classic_mix(t: i32) -> i32 {
    let [bass, melody, harmony, rhythm] = layers(Word(t));
    (((bass & 0xFF) + (melody & 0xFF) + (harmony & 0xFF) + (rhythm & 0xFF)) >> 2).get()
}

/// `((t*5) & (t>>7)) | (t*3 & t>>10)`
pub fn viznut_original(t: i32) -> i32 {
    let t = Word(t);
    (((t * 5) & (t >> 7)) | (t * 3 & t >> 10)).get()
}

/// Mixes the layers in floating point, then truncates back to an integer
/// before the final mask.
pub fn layered_blend(t: i32) -> i32 {
    let [bass, melody, harmony, rhythm] = layers(Word(t));
    let combined = (f64::from((bass & 0xFF).get()) * 0.3
        + f64::from((melody & 0xFF).get()) * 0.4
        + f64::from((harmony & 0xFF).get()) * 0.2
        + f64::from((rhythm & 0xFF).get()) * 0.1)
        / 1.5;

    (combined.clamp(0.0, 255.0) as i32) & 0xFF
}
