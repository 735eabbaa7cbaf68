//! # Escape Codec
//!
//! Backticks toggle a protected region. Inside it every reserved character is
//! replaced by a sentinel, so the grammar punctuation can travel as plain data
//! through delimiter matching. Leaves are decoded when they are captured.
//!
//! ```text
//! `a,b`      ->  a%&#44%b     ->  a,b
//! ```

/// Reserved characters and their sentinels.
///
/// Sentinels contain no reserved character and none of them is a prefix of another.
const SENTINELS: [(char, &str); 10] = [
    ('(', "%&#40%"),
    (')', "%&#41%"),
    (',', "%&#44%"),
    ('-', "%&#45%"),
    (':', "%&#58%"),
    ('>', "%&#62%"),
    ('[', "%&#91%"),
    (']', "%&#93%"),
    ('{', "%&#123%"),
    ('}', "%&#125%"),
];

const SENTINEL_MARK: &str = "%&#";

/// Toggles protection on and off; never part of the output.
pub const PROTECT: char = '`';

fn sentinel(c: char) -> Option<&'static str> {
    SENTINELS
        .iter()
        .find(|(reserved, _)| *reserved == c)
        .map(|(_, sentinel)| *sentinel)
}

/// Returns true if `c` belongs to the grammar's reserved set.
pub fn is_reserved(c: char) -> bool {
    sentinel(c).is_some()
}

/// Replaces reserved characters inside backtick regions with their sentinels.
pub fn encode(command: &str) -> String {
    let mut encoded = String::with_capacity(command.len());
    let mut protected = false;

    for c in command.chars() {
        if c == PROTECT {
            protected = !protected;
            continue;
        }
        match sentinel(c) {
            Some(replacement) if protected => encoded.push_str(replacement),
            _ => encoded.push(c),
        }
    }

    encoded
}

/// Restores every sentinel in `text` to its reserved character.
pub fn decode(text: &str) -> String {
    if !text.contains(SENTINEL_MARK) {
        return text.to_string();
    }
    SENTINELS
        .iter()
        .fold(text.to_string(), |acc, (reserved, sentinel)| {
            acc.replace(sentinel, reserved.encode_utf8(&mut [0; 4]))
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_unprotected_text_is_untouched() {
        assert_eq!(encode("[a, b] -> int"), "[a, b] -> int");
    }

    #[test]
    fn test_protected_region() {
        let encoded = encode("x,`a,[b]`,y");
        assert_eq!(encoded, "x,a%&#44%%&#91%b%&#93%,y");
        assert_eq!(decode(&encoded), "x,a,[b],y");
    }

    #[test]
    fn test_unbalanced_backtick_protects_to_end() {
        assert_eq!(encode("a`:b"), "a%&#58%b");
    }

    #[test]
    fn test_sentinels_are_transparent_to_the_grammar() {
        for (_, sentinel) in SENTINELS {
            assert!(!sentinel.chars().any(is_reserved), "{sentinel}");
            assert!(!sentinel.contains(PROTECT));
        }
    }

    proptest! {
        #[test]
        fn test_decode_inverts_encode(s in "[a-z0-9 (),:>\\[\\]{}-]{0,40}") {
            let protected = format!("{PROTECT}{s}{PROTECT}");
            let encoded = encode(&protected);
            prop_assert!(!encoded.chars().any(is_reserved));
            prop_assert_eq!(decode(&encoded), s);
        }
    }
}
