//! Porter (1980) suffix-stripping stemmer for lowercase ASCII words.

/// Reduces `word` to its Porter stem.
///
/// Words shorter than three characters and words containing anything other than
/// lowercase ASCII letters are returned unchanged.
pub fn stem(word: &str) -> String {
    if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return word.to_string();
    }

    let mut w = word.as_bytes().to_vec();
    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    replace_suffix(&mut w, STEP2_SUFFIXES);
    replace_suffix(&mut w, STEP3_SUFFIXES);
    step4(&mut w);
    step5(&mut w);

    w.into_iter().map(char::from).collect()
}

// Ordered longest-first; the first matching suffix decides.
const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("ization", "ize"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("tional", "tion"),
    ("biliti", "ble"),
    ("entli", "ent"),
    ("ousli", "ous"),
    ("ation", "ate"),
    ("alism", "al"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("ator", "ate"),
    ("eli", "e"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ness", ""),
    ("ful", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "ement", "ance", "ence", "able", "ible", "ment", "ant", "ent", "ion", "ism", "ate", "iti",
    "ous", "ive", "ize", "al", "er", "ic", "ou",
];

fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences (`m` in `[C](VC){m}[V]`).
fn measure(s: &[u8]) -> usize {
    let len = s.len();
    let mut i = 0;
    while i < len && is_consonant(s, i) {
        i += 1;
    }

    let mut m = 0;
    while i < len {
        while i < len && !is_consonant(s, i) {
            i += 1;
        }
        if i >= len {
            break;
        }
        while i < len && is_consonant(s, i) {
            i += 1;
        }
        m += 1;
    }
    m
}

fn has_vowel(s: &[u8]) -> bool {
    (0..s.len()).any(|i| !is_consonant(s, i))
}

fn ends_double_consonant(s: &[u8]) -> bool {
    let len = s.len();
    len >= 2 && s[len - 1] == s[len - 2] && is_consonant(s, len - 1)
}

/// consonant-vowel-consonant ending where the last consonant is not w, x or y.
fn ends_cvc(s: &[u8]) -> bool {
    let len = s.len();
    if len < 3 {
        return false;
    }
    is_consonant(s, len - 3)
        && !is_consonant(s, len - 2)
        && is_consonant(s, len - 1)
        && !matches!(s[len - 1], b'w' | b'x' | b'y')
}

fn ends_with(w: &[u8], suffix: &str) -> bool {
    w.ends_with(suffix.as_bytes())
}

fn step1a(w: &mut Vec<u8>) {
    if ends_with(w, "sses") || ends_with(w, "ies") {
        w.truncate(w.len() - 2);
    } else if ends_with(w, "s") && !ends_with(w, "ss") {
        w.pop();
    }
}

fn step1b(w: &mut Vec<u8>) {
    if ends_with(w, "eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.pop();
        }
        return;
    }

    for suffix in ["ed", "ing"] {
        if !ends_with(w, suffix) {
            continue;
        }
        let stem_len = w.len() - suffix.len();
        if has_vowel(&w[..stem_len]) {
            w.truncate(stem_len);
            if ends_with(w, "at") || ends_with(w, "bl") || ends_with(w, "iz") {
                w.push(b'e');
            } else if ends_double_consonant(w) && !matches!(w[w.len() - 1], b'l' | b's' | b'z') {
                w.pop();
            } else if measure(w) == 1 && ends_cvc(w) {
                w.push(b'e');
            }
        }
        return;
    }
}

fn step1c(w: &mut [u8]) {
    let len = w.len();
    if ends_with(w, "y") && has_vowel(&w[..len - 1]) {
        w[len - 1] = b'i';
    }
}

fn replace_suffix(w: &mut Vec<u8>, table: &[(&str, &str)]) {
    for (suffix, replacement) in table {
        if ends_with(w, suffix) {
            let stem_len = w.len() - suffix.len();
            if measure(&w[..stem_len]) > 0 {
                w.truncate(stem_len);
                w.extend_from_slice(replacement.as_bytes());
            }
            return;
        }
    }
}

fn step4(w: &mut Vec<u8>) {
    for suffix in STEP4_SUFFIXES {
        if !ends_with(w, suffix) {
            continue;
        }
        let stem_len = w.len() - suffix.len();
        if measure(&w[..stem_len]) > 1 {
            let keeps_ion = *suffix != "ion"
                || (stem_len > 0 && matches!(w[stem_len - 1], b's' | b't'));
            if keeps_ion {
                w.truncate(stem_len);
            }
        }
        return;
    }
}

fn step5(w: &mut Vec<u8>) {
    if ends_with(w, "e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            w.pop();
        }
    }

    if measure(w) > 1 && ends_double_consonant(w) && ends_with(w, "l") {
        w.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plurals_collapse() {
        assert_eq!(stem("cells"), "cell");
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("cats"), "cat");
    }

    #[test]
    fn test_verb_forms_collapse() {
        assert_eq!(stem("divides"), "divid");
        assert_eq!(stem("divide"), "divid");
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("filing"), "file");
        assert_eq!(stem("agreed"), "agre");
    }

    #[test]
    fn test_derivational_suffixes() {
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("conditional"), "condit");
        assert_eq!(stem("identical"), "ident");
        assert_eq!(stem("generalization"), "gener");
        assert_eq!(stem("happiness"), "happi");
    }

    #[test]
    fn test_short_and_non_ascii_words_pass_through() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("42"), "42");
        assert_eq!(stem("mitose"), "mitos");
        assert_eq!(stem("zellteilung"), "zellteilung");
        assert_eq!(stem("café"), "café");
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure(b"tr"), 0);
        assert_eq!(measure(b"tree"), 0);
        assert_eq!(measure(b"trouble"), 1);
        assert_eq!(measure(b"oaten"), 2);
    }
}
