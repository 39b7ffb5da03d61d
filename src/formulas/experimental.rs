//! Experimental formulas.
//!
//! These multiply several wide intermediate products together, so they lean
//! on 32-bit wraparound much harder than the rest of the catalog.

use super::Word;
use crate::algorithm::{Algorithm, Category};

pub const ALGORITHMS: [Algorithm; 3] = [
    Algorithm::new(
        "Spirit Box Transmission",
        "Experimental algorithm that attempts to create speech-like patterns through rapid frequency scanning",
        Category::Experimental,
        spirit_box,
    ),
    Algorithm::new(
        "Quantum Superposition",
        "Explores quantum uncertainty through wave function collapse simulation",
        Category::Experimental,
        quantum_superposition,
    ),
    Algorithm::new(
        "Hyperdimensional Pulse",
        "Attempts to sonify theoretical higher spatial dimensions",
        Category::Experimental,
        hyperdimensional_pulse,
    ),
];

pub fn spirit_box(t: i32) -> i32 {
    let t = Word(t);
    let scan_rate = (t >> 3) & ((t >> 9) | (t >> 7));
    let formant1 = ((t << 3) & (t >> 5)) * ((t >> 7) + 1);
    let formant2 = ((t << 2) & (t >> 7)) * ((t >> 9) + 1);
    let noise = (t >> 4) & (t * 3);
    let envelope = (t >> 8) & ((t >> 15) + 1);
    (((formant1 + formant2) * envelope + noise * scan_rate) & 0xFF).get()
}

pub fn quantum_superposition(t: i32) -> i32 {
    let t = Word(t);
    let wave = ((t >> 7) | (t >> 9)) * ((t >> 4) + 1);
    let collapse = (t * wave) & ((t >> 5) ^ (t << 3));
    ((collapse & ((t >> 4) | (t << 6))) & 0xFF).get()
}

pub fn hyperdimensional_pulse(t: i32) -> i32 {
    let t = Word(t);
    let (d1, d2, d3, d4) = (t >> 3, t >> 5, t >> 7, t >> 9);
    let hyperspace = (d1 ^ d2 ^ d3 ^ d4) & (t >> 2);
    ((hyperspace * ((t >> 6) | (t << 4))) & 0xFF).get()
}
