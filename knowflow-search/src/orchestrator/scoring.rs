//! Score normalisation, preferred-source boost, and final ranking.
//!
//! Every score leaving this module lies in `[0, 1]`. The preferred-source
//! boost is additive and fixed:
//!
//! ```text
//! boosted = min(1.0, score + PREFERRED_SOURCE_BOOST)
//! ```
//!
//! so a preferred source only overtakes another source's result when the raw
//! gap is at most `PREFERRED_SOURCE_BOOST`.

use std::cmp::Ordering;

use crate::types::ResultSnippet;

/// Additive boost applied to results from the caller's preferred source.
pub const PREFERRED_SOURCE_BOOST: f64 = 0.2;

/// Upper bound for any score.
pub const MAX_SCORE: f64 = 1.0;

/// Clamp a source-supplied score into `[0, 1]`. NaN becomes 0.
pub fn normalize_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}

/// Apply the preferred-source boost, capped at [`MAX_SCORE`].
pub fn apply_preferred_boost(score: f64) -> f64 {
    (score + PREFERRED_SOURCE_BOOST).min(MAX_SCORE)
}

/// Tag every snippet with `source_id` and adjust its score.
///
/// Any `source` value the plugin set is overwritten. Scores are normalised
/// first; the boost is applied when `preferred` names this source.
pub fn tag_results(
    mut results: Vec<ResultSnippet>,
    source_id: &str,
    preferred: Option<&str>,
) -> Vec<ResultSnippet> {
    let boosted = preferred == Some(source_id);
    for result in &mut results {
        let raw = result.metadata.score;
        let mut score = normalize_score(raw);
        if score != raw {
            tracing::debug!(source = %source_id, raw, score, "clamped out-of-range score");
        }
        if boosted {
            score = apply_preferred_boost(score);
        }
        result.metadata.source = Some(source_id.to_string());
        result.metadata.score = score;
    }
    results
}

/// Sort by descending score and keep the first `limit` entries.
///
/// The sort is stable: equal scores keep the order in which they were merged
/// (source registration order, then each source's own order).
pub fn rank(mut results: Vec<ResultSnippet>, limit: usize) -> Vec<ResultSnippet> {
    results.sort_by(|a, b| {
        b.metadata
            .score
            .partial_cmp(&a.metadata.score)
            .unwrap_or(Ordering::Equal)
    });
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(content: &str, score: f64) -> ResultSnippet {
        ResultSnippet::new(content, format!("{content}.md"), "2024-03-14", score)
    }

    #[test]
    fn boost_adds_fixed_amount() {
        assert!((apply_preferred_boost(0.5) - 0.7).abs() < 1e-9);
        assert!((apply_preferred_boost(0.0) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn boost_is_capped_at_one() {
        assert!((apply_preferred_boost(0.9) - 1.0).abs() < f64::EPSILON);
        assert!((apply_preferred_boost(1.0) - 1.0).abs() < f64::EPSILON);
        assert!((apply_preferred_boost(0.8) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_clamps_and_handles_nan() {
        assert!((normalize_score(1.7) - 1.0).abs() < f64::EPSILON);
        assert!(normalize_score(-0.3).abs() < f64::EPSILON);
        assert!(normalize_score(f64::NAN).abs() < f64::EPSILON);
        assert!((normalize_score(0.42) - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn tag_overwrites_plugin_supplied_source() {
        let mut spoofed = make_result("a", 0.5);
        spoofed.metadata.source = Some("somebody-else".into());

        let tagged = tag_results(vec![spoofed, make_result("b", 0.4)], "docs", None);

        assert!(tagged.iter().all(|r| r.source() == Some("docs")));
        assert!((tagged[0].score() - 0.5).abs() < f64::EPSILON);
        assert!((tagged[1].score() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn tag_boosts_only_the_preferred_source() {
        let preferred = tag_results(vec![make_result("a", 0.5)], "notes", Some("notes"));
        let other = tag_results(vec![make_result("a", 0.5)], "docs", Some("notes"));

        assert!((preferred[0].score() - 0.7).abs() < 1e-9);
        assert!((other[0].score() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn tag_clamps_before_boosting() {
        let tagged = tag_results(vec![make_result("a", -1.0)], "docs", Some("docs"));
        assert!((tagged[0].score() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn rank_sorts_descending_and_truncates() {
        let results = vec![
            make_result("low", 0.1),
            make_result("high", 0.9),
            make_result("mid", 0.5),
        ];
        let ranked = rank(results, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].content, "high");
        assert_eq!(ranked[1].content, "mid");
    }

    #[test]
    fn rank_keeps_merge_order_for_ties() {
        let results = vec![
            make_result("first", 0.5),
            make_result("second", 0.5),
            make_result("third", 0.5),
        ];
        let ranked = rank(results, 10);
        let order: Vec<&str> = ranked.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn rank_empty_is_empty() {
        assert!(rank(vec![], 3).is_empty());
    }
}
