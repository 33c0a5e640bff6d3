//! Text to braille transliteration.

use serde::{Deserialize, Serialize};

use crate::alphabet::{lookup, BrailleChar};

/// A word transliterated to braille: the lowercased source word and one
/// cell per input character, in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrailleWord {
    pub word: String,
    pub characters: Vec<BrailleChar>,
}

/// Transliterate text to a sequence of braille words.
///
/// The input is split on single space characters; consecutive spaces
/// produce zero-length words with empty cell sequences. Characters are
/// lowercased for lookup. Characters outside the alphabet degrade to a
/// cell with no dots, keeping the source character for display; this never
/// fails.
pub fn transliterate(text: &str) -> Vec<BrailleWord> {
    text.split(' ')
        .map(|word| {
            let characters = word
                .chars()
                .map(|ch| match lookup(ch.to_ascii_lowercase()) {
                    Some(cell) => cell.clone(),
                    None => BrailleChar::unmapped(ch),
                })
                .collect();

            BrailleWord {
                word: word.to_lowercase(),
                characters,
            }
        })
        .collect()
}
