//! N-gram overlap metrics over normalized token sequences.

use std::collections::HashMap;

/// Added to zero n-gram match counts so one missing order does not zero the score.
pub const BLEU_EPSILON: f32 = 0.1;

const BLEU_MAX_ORDER: usize = 4;

/// Recall share in the METEOR harmonic mean.
pub const METEOR_ALPHA: f32 = 0.9;
const METEOR_GAMMA: f32 = 0.5;
const METEOR_BETA: f32 = 3.0;

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 {
        return counts;
    }
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Candidate n-grams also in the reference, clipped by the reference count.
fn clipped_matches(reference: &[String], candidate: &[String], n: usize) -> (usize, usize) {
    let reference_counts = ngram_counts(reference, n);
    let candidate_counts = ngram_counts(candidate, n);

    let matches = candidate_counts
        .iter()
        .map(|(gram, &count)| count.min(reference_counts.get(gram).copied().unwrap_or(0)))
        .sum();
    let total = candidate_counts.values().sum();
    (matches, total)
}

/// Sentence-level BLEU-4 with epsilon smoothing and brevity penalty.
///
/// Zero if either side is empty; identical sequences of four or more tokens score 1.
pub fn bleu4(reference: &[String], candidate: &[String]) -> f32 {
    if reference.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let log_precision_sum: f32 = (1..=BLEU_MAX_ORDER)
        .map(|n| {
            let (matches, total) = clipped_matches(reference, candidate, n);
            let precision = match (matches, total) {
                (_, 0) => BLEU_EPSILON,
                (0, total) => BLEU_EPSILON / total as f32,
                (matches, total) => matches as f32 / total as f32,
            };
            precision.ln()
        })
        .sum();

    let (r, c) = (reference.len() as f32, candidate.len() as f32);
    let brevity_penalty = if c > r { 1.0 } else { (1.0 - r / c).exp() };

    (brevity_penalty * (log_precision_sum / BLEU_MAX_ORDER as f32).exp()).clamp(0.0, 1.0)
}

/// ROUGE-N F1 over clipped n-gram overlap.
pub fn rouge_n(reference: &[String], candidate: &[String], n: usize) -> f32 {
    let (overlap, candidate_total) = clipped_matches(reference, candidate, n);
    let reference_total = reference.len().saturating_sub(n.saturating_sub(1));
    if overlap == 0 || candidate_total == 0 || reference_total == 0 || n == 0 {
        return 0.0;
    }

    let precision = overlap as f32 / candidate_total as f32;
    let recall = overlap as f32 / reference_total as f32;
    2.0 * precision * recall / (precision + recall)
}

/// ROUGE-3 F1.
#[inline]
pub fn rouge3(reference: &[String], candidate: &[String]) -> f32 {
    rouge_n(reference, candidate, 3)
}

/// METEOR over exact token matches (tokens are already stemmed by the normalizer).
///
/// Each candidate token aligns to the first unused equal reference token. The
/// recall-weighted harmonic mean of unigram precision and recall is scaled by
/// `1 - 0.5 * (chunks / matches)^3`, where a chunk is a run of matches adjacent in
/// both sequences.
pub fn meteor(reference: &[String], candidate: &[String]) -> f32 {
    let mut used = vec![false; reference.len()];
    let mut alignment: Vec<usize> = Vec::with_capacity(candidate.len());

    for token in candidate {
        if let Some(position) = reference
            .iter()
            .enumerate()
            .position(|(i, r)| !used[i] && r == token)
        {
            used[position] = true;
            alignment.push(position);
        }
    }

    let matches = alignment.len();
    if matches == 0 {
        return 0.0;
    }

    let precision = matches as f32 / candidate.len() as f32;
    let recall = matches as f32 / reference.len() as f32;
    let f_mean = precision * recall / (METEOR_ALPHA * precision + (1.0 - METEOR_ALPHA) * recall);

    let chunks = 1 + alignment.windows(2).filter(|w| w[1] != w[0] + 1).count();
    let fragmentation = chunks as f32 / matches as f32;
    let penalty = METEOR_GAMMA * fragmentation.powf(METEOR_BETA);

    (f_mean * (1.0 - penalty)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_bleu_identical_is_one() {
        let t = toks("cell divid produc two ident daughter cell");
        assert!((bleu4(&t, &t) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bleu_empty_is_zero() {
        let t = toks("cell divid");
        assert_eq!(bleu4(&t, &[]), 0.0);
        assert_eq!(bleu4(&[], &t), 0.0);
    }

    #[test]
    fn test_bleu_partial_overlap_between_zero_and_one() {
        let reference = toks("the cat sat on the mat");
        let candidate = toks("the cat sat on a mat");
        let score = bleu4(&reference, &candidate);
        assert!(score > 0.1 && score < 1.0, "score {score}");
    }

    #[test]
    fn test_bleu_brevity_penalty() {
        let reference = toks("a b c d e f g h");
        let short = toks("a b c d");
        let full = toks("a b c d e f g h");
        assert!(bleu4(&reference, &short) < bleu4(&reference, &full));
    }

    #[test]
    fn test_bleu_clips_repeated_ngrams() {
        let reference = toks("cell divid");
        let spam = toks("cell cell cell cell");
        // unigram precision clipped to 1/4
        assert!(bleu4(&reference, &spam) < 0.1);
    }

    #[test]
    fn test_rouge3_identical_is_one() {
        let t = toks("a b c d");
        assert_eq!(rouge3(&t, &t), 1.0);
    }

    #[test]
    fn test_rouge3_known_value() {
        // reference trigrams: abc bcd cde; candidate: abc bcx
        let reference = toks("a b c d e");
        let candidate = toks("a b c x");
        let precision = 1.0f32 / 2.0;
        let recall = 1.0f32 / 3.0;
        let expected = 2.0 * precision * recall / (precision + recall);
        assert!((rouge3(&reference, &candidate) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_rouge3_short_sequences_are_zero() {
        assert_eq!(rouge3(&toks("a b"), &toks("a b")), 0.0);
        assert_eq!(rouge3(&toks("a b c"), &toks("x y z")), 0.0);
    }

    #[test]
    fn test_meteor_identical_only_pays_single_chunk_penalty() {
        let t = toks("a b c d");
        // one chunk over four matches: 1 - 0.5 * 0.25^3
        assert!((meteor(&t, &t) - 0.992_187_5).abs() < 1e-6);
    }

    #[test]
    fn test_meteor_reordering_is_penalized() {
        let reference = toks("a b c d");
        let reordered = toks("c d a b");
        // two chunks over four matches: 1 - 0.5 * 0.5^3
        assert!((meteor(&reference, &reordered) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn test_meteor_weights_recall_over_precision() {
        let reference = toks("a b");
        let padded = toks("a b x y");
        // P = 0.5, R = 1: f_mean = 0.5 / (0.45 + 0.1), penalty 0.5 * 0.5^3
        let expected = (0.5f32 / 0.55) * (1.0 - 0.0625);
        assert!((meteor(&reference, &padded) - expected).abs() < 1e-5);

        let truncated = toks("a");
        assert!(meteor(&reference, &padded) > meteor(&padded, &reference));
        assert!(meteor(&reference, &truncated) < meteor(&reference, &padded));
    }

    #[test]
    fn test_meteor_no_overlap_or_empty_is_zero() {
        assert_eq!(meteor(&toks("a b"), &toks("x y")), 0.0);
        assert_eq!(meteor(&toks("a b"), &[]), 0.0);
        assert_eq!(meteor(&[], &toks("a b")), 0.0);
    }

    #[test]
    fn test_meteor_repeated_tokens_align_once() {
        let reference = toks("cell divid");
        let spam = toks("cell cell cell");
        // one match: P = 1/3, R = 1/2, one chunk
        let (p, r) = (1.0f32 / 3.0, 0.5f32);
        let expected = p * r / (0.9 * p + 0.1 * r) * 0.5;
        assert!((meteor(&reference, &spam) - expected).abs() < 1e-6);
    }
}
