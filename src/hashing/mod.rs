use blake3::Hasher;

/// Cache key for a reference-form embedding.
pub type ReferenceKey = [u8; 32];

/// Key identifying one reference form's embedding.
///
/// Covers the question id, the provider version and the form's text, each
/// length-prefixed so field boundaries cannot shift.
#[inline]
pub fn reference_cache_key(question_id: &str, provider_version: &str, text: &str) -> ReferenceKey {
    let mut hasher = Hasher::new();
    for field in [question_id, provider_version, text] {
        hasher.update(&(field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    *hasher.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_key_sensitivity() {
        let base = reference_cache_key("bio-1", "v1", "cell division");

        assert_eq!(base, reference_cache_key("bio-1", "v1", "cell division"));
        assert_ne!(base, reference_cache_key("bio-2", "v1", "cell division"));
        assert_ne!(base, reference_cache_key("bio-1", "v2", "cell division"));
        assert_ne!(base, reference_cache_key("bio-1", "v1", "cell divisions"));
    }

    #[test]
    fn test_reference_key_field_boundaries() {
        let a = reference_cache_key("ab", "c", "d");
        let b = reference_cache_key("a", "bc", "d");
        let c = reference_cache_key("a", "b", "cd");

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }
}
