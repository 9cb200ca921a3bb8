//! Demo map data
//!
//! Procedural star and province maps. Read-only once generated; the
//! viewport only sees them through [`crate::viewport::EntityLayer`].

pub mod galaxy;
pub mod provinces;

pub use galaxy::{Galaxy, Star, StarClass};
pub use provinces::{FACTION_COUNT, Province, Provinces};

use rand::Rng;

const SYLLABLES: &[&str] = &[
    "al", "be", "cor", "dra", "el", "fen", "gar", "hes", "ix", "jor", "ka", "lun", "mir", "nox",
    "or", "pra", "qua", "ris", "sol", "tor", "ul", "vex", "wyn", "zan",
];

/// Two or three syllables, capitalized
pub(crate) fn generate_name(rng: &mut impl Rng) -> String {
    let parts = rng.random_range(2..=3);
    let name: String = (0..parts)
        .map(|_| SYLLABLES[rng.random_range(0..SYLLABLES.len())])
        .collect();

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
