//! Keyboard dot entry and input validation.

/// Fixed mapping from entry keys to dot numbers. Home-row keys cover dots
/// 1..=6; dots 7 and 8 have no key because the alphabet uses 6-dot cells.
const KEY_MAPPING: [(char, u8); 6] = [
    ('f', 1),
    ('d', 2),
    ('s', 3),
    ('j', 4),
    ('k', 5),
    ('l', 6),
];

/// The key-to-dot table, for rendering input hints.
pub fn key_mapping() -> &'static [(char, u8)] {
    &KEY_MAPPING
}

/// Dot number for an entry key, case-insensitive. `None` for keys outside
/// the mapping.
pub fn dot_for_key(key: char) -> Option<u8> {
    let key = key.to_ascii_lowercase();
    KEY_MAPPING
        .iter()
        .find(|&&(k, _)| k == key)
        .map(|&(_, dot)| dot)
}

/// Compare a learner's dot pattern against the expected one.
///
/// Order-independent: both sides are sorted before comparison. Duplicates
/// are NOT collapsed, so a caller producing a true set must dedupe before
/// calling. Values are not range-checked.
pub fn validate(input: &[u8], target: &[u8]) -> bool {
    let mut input = input.to_vec();
    let mut target = target.to_vec();
    input.sort_unstable();
    target.sort_unstable();
    input == target
}
