//! Input normalization.
//!
//! Everything the engine compares against a keyword or a decomposition
//! pattern goes through [`normalize`] first: surrounding whitespace is
//! trimmed, a trailing run of sentence punctuation is dropped, interior
//! whitespace collapses to single spaces, the text is lowercased and
//! diacritics are stripped. Keywords receive the same treatment at load
//! time, so accented script data matches accent-stripped input.
//!
//! [`strip_accents`] is also used on its own for decomposition patterns and
//! reflection keys, where the whitespace/punctuation rewriting would mangle
//! pattern syntax.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canonical form of one line of user input.
///
/// The output is stable under re-application: a second `normalize` of the
/// result returns it unchanged.
pub(crate) fn normalize(input: &str) -> String {
    let collapsed = regex!(r"\s+").replace_all(input.trim(), " ");
    let clipped = regex!(r"[\s.!,;]+$").replace(&collapsed, "");
    strip_accents(&clipped.to_lowercase())
}

/// Replace accented Latin letters with their unaccented counterparts.
///
/// The ligatures œ/Œ and æ/Æ expand to their two-letter forms, and
/// free-standing combining marks are dropped so decomposed input behaves
/// like precomposed input. Letters without a plain counterpart (ø, ß, …)
/// pass through untouched.
pub(crate) fn strip_accents(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            '\u{0300}'..='\u{036f}' => {}
            _ => out.push(ACCENT_FOLD.get(&ch).copied().unwrap_or(ch)),
        }
    }
    out
}

static ACCENT_FOLD: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let families: &[(&str, char)] = &[
        ("àáâãäåāăą", 'a'),
        ("çćĉč", 'c'),
        ("èéêëēĕėęě", 'e'),
        ("ìíîïĩīĭį", 'i'),
        ("ñńň", 'n'),
        ("òóôõöōŏő", 'o'),
        ("ŕř", 'r'),
        ("śŝš", 's'),
        ("ùúûüũūŭů", 'u'),
        ("ýÿ", 'y'),
        ("źżž", 'z'),
        ("ÀÁÂÃÄÅĀĂĄ", 'A'),
        ("ÇĆĈČ", 'C'),
        ("ÈÉÊËĒĔĖĘĚ", 'E'),
        ("ÌÍÎÏĨĪĬĮ", 'I'),
        ("ÑŃŇ", 'N'),
        ("ÒÓÔÕÖŌŎŐ", 'O'),
        ("ŔŘ", 'R'),
        ("ŚŜŠ", 'S'),
        ("ÙÚÛÜŨŪŬŮ", 'U'),
        ("ÝŸ", 'Y'),
        ("ŹŻŽ", 'Z'),
    ];
    families
        .iter()
        .flat_map(|(accented, plain)| accented.chars().map(move |ch| (ch, *plain)))
        .collect()
});
