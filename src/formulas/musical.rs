//! Basslines and leads.

use super::Word;
use crate::algorithm::{Algorithm, Category};

pub const ALGORITHMS: [Algorithm; 3] = [
    Algorithm::new(
        "Glitch Bass",
        "Heavy bass with glitch effects using pure bitwise operations",
        Category::Musical,
        glitch_bass,
    ),
    Algorithm::new(
        "Digital Rain",
        "Cascading digital tones through bitwise manipulation",
        Category::Musical,
        digital_rain,
    ),
    Algorithm::new(
        "Acid Lead",
        "Sharp, acidic lead sounds through bit shifting",
        Category::Musical,
        acid_lead,
    ),
];

pub fn glitch_bass(t: i32) -> i32 {
    let t = Word(t);
    ((t * (t >> 5 | t >> 8) >> (t >> 16)) & 0xFF).get()
}

pub fn digital_rain(t: i32) -> i32 {
    let t = Word(t);
    (((t >> 6) ^ (t & 0x25)) * ((t >> 11) ^ (t & 0x25)) & 0xFF).get()
}

pub fn acid_lead(t: i32) -> i32 {
    let t = Word(t);
    let freq = ((t << 3) & (t >> 5)) + ((t << 2) & (t >> 7));
    let modulation = (t >> 2) & ((t >> 8) | (t >> 16)) & 0x7F;
    ((freq * modulation) & 0xFF).get()
}
