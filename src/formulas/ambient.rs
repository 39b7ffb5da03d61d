//! Drones and textures.

use super::Word;
use crate::algorithm::{Algorithm, Category};

pub const ALGORITHMS: [Algorithm; 4] = [
    Algorithm::new(
        "Cosmic Drift",
        "Space-like drones through complex bit operations",
        Category::Ambient,
        cosmic_drift,
    ),
    Algorithm::new(
        "8-bit Chiptune",
        "Classic video game console sound chip emulation",
        Category::Ambient,
        chiptune,
    ),
    Algorithm::new(
        "Binary Storm",
        "Chaotic storm of binary arithmetic operations",
        Category::Ambient,
        binary_storm,
    ),
    Algorithm::new(
        "Fractal Pulse",
        "Self-similar patterns creating rhythmic structures",
        Category::Ambient,
        fractal_pulse,
    ),
];

pub fn cosmic_drift(t: i32) -> i32 {
    let t = Word(t);
    let drift = t * (t >> 8 | t >> 9) & 46 & t >> 8;
    let space = ((t & t >> 8) | (t >> 3 & t >> 12)) ^ (t >> 14 | t >> 6);
    ((drift + space) & 0xFF).get()
}

pub fn chiptune(t: i32) -> i32 {
    let t = Word(t);
    // square gate is 0 or 1
    let square = (t >> 4) & 1;
    let arp = t * ((t >> 9) | ((t >> 8) & (t >> 13)));
    ((square * arp) & 0xFF).get()
}

pub fn binary_storm(t: i32) -> i32 {
    let t = Word(t);
    let storm = ((t >> 4) ^ (t >> 3)) * ((t >> 2) | (t << 3));
    ((storm + (t >> 6 & t << 4)) & 0xFF).get()
}

pub fn fractal_pulse(t: i32) -> i32 {
    let t = Word(t);
    ((t * ((t >> 12 | t >> 8) & (63 & t >> 4))) & 0xFF).get()
}
