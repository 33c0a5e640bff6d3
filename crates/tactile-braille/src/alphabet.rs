//! The braille alphabet table.
//!
//! A closed mapping from lowercase letters, space, and four punctuation
//! marks to 6-dot cell patterns. Built once at first use and never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A single braille cell.
///
/// `dots` holds the raised dot numbers (1..=8, no duplicates since every
/// instance originates from the fixed table or the unmapped fallback).
/// `grade` is always 1 for now; reserved for contraction support.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrailleChar {
    pub character: char,
    pub dots: Vec<u8>,
    pub grade: u8,
}

impl BrailleChar {
    /// Fallback cell for a character outside the alphabet: no raised dots,
    /// source character kept for display.
    pub(crate) fn unmapped(character: char) -> Self {
        Self {
            character,
            dots: Vec::new(),
            grade: 1,
        }
    }
}

fn table() -> &'static HashMap<char, BrailleChar> {
    static TABLE: OnceLock<HashMap<char, BrailleChar>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let entries: &[(char, &[u8])] = &[
            ('a', &[1]),
            ('b', &[1, 2]),
            ('c', &[1, 4]),
            ('d', &[1, 4, 5]),
            ('e', &[1, 5]),
            ('f', &[1, 2, 4]),
            ('g', &[1, 2, 4, 5]),
            ('h', &[1, 2, 5]),
            ('i', &[2, 4]),
            ('j', &[2, 4, 5]),
            ('k', &[1, 3]),
            ('l', &[1, 2, 3]),
            ('m', &[1, 3, 4]),
            ('n', &[1, 3, 4, 5]),
            ('o', &[1, 3, 5]),
            ('p', &[1, 2, 3, 4]),
            ('q', &[1, 2, 3, 4, 5]),
            ('r', &[1, 2, 3, 5]),
            ('s', &[2, 3, 4]),
            ('t', &[2, 3, 4, 5]),
            ('u', &[1, 3, 6]),
            ('v', &[1, 2, 3, 6]),
            ('w', &[2, 4, 5, 6]),
            ('x', &[1, 3, 4, 6]),
            ('y', &[1, 3, 4, 5, 6]),
            ('z', &[1, 3, 5, 6]),
            (' ', &[]),
            ('.', &[2, 5, 6]),
            (',', &[2]),
            ('?', &[2, 3, 6]),
            ('!', &[2, 3, 5]),
        ];

        entries
            .iter()
            .map(|&(character, dots)| {
                (
                    character,
                    BrailleChar {
                        character,
                        dots: dots.to_vec(),
                        grade: 1,
                    },
                )
            })
            .collect()
    })
}

/// Look up the cell for a character. Returns `None` for characters outside
/// the alphabet; callers that need total behavior use the encoder, which
/// falls back to an empty cell.
pub fn lookup(character: char) -> Option<&'static BrailleChar> {
    table().get(&character)
}
