//! End-to-end checks of the text toolkit and the demo services, mirroring
//! the self-tests the old admin panel ran.

use rstest::rstest;

use wildpraxis::config::Config;
use wildpraxis::services::RetrievalService;
use wildpraxis::utils::{
    cosine_similarity, count_alert_runs, jaccard_similarity, ngram_profile, tokenize,
};

#[test]
fn tokenizer_splits_on_non_alphanumerics() {
    assert_eq!(tokenize("Brook Trout 123!"), vec!["brook", "trout", "123"]);
}

#[rstest]
#[case("brook trout habitat")]
#[case("a")]
#[case("7 8 9")]
fn jaccard_self_similarity_is_one(#[case] s: &str) {
    assert!((jaccard_similarity(s, s) - 1.0).abs() < 1e-12);
}

#[rstest]
#[case("")]
#[case("!!! ???")]
fn jaccard_self_similarity_of_tokenless_text_is_zero(#[case] s: &str) {
    assert_eq!(jaccard_similarity(s, s), 0.0);
}

#[test]
fn jaccard_ignores_token_order() {
    assert_eq!(
        jaccard_similarity("water quality rising", "rising water quality"),
        1.0
    );
}

#[test]
fn cosine_similar_phrases() {
    assert!(cosine_similarity("brook trout habitat", "habitat for trout in brooks", 3) > 0.35);
}

#[test]
fn token_overlap_basic() {
    assert!(jaccard_similarity("conductivity rises in spring", "spring conductivity up") > 0.3);
}

#[test]
fn cross_boundary_ngrams_are_excluded() {
    assert!(ngram_profile("ab cd", 3).is_empty());
}

#[test]
fn alert_counter_cluster() {
    assert_eq!(count_alert_runs(&[1.0, 2.0, 7.0, 8.0, 9.0, 2.0], 7.0, 2), 1);
}

#[test]
fn retrieval_demo_finds_the_sensors_passage() {
    let retrieval = RetrievalService::new(Config::default().similarity);
    let hits = retrieval.rank("conductivity spikes", 2);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].document.title, "Sensors and alerts");
    assert!(hits[0].score > 0.0);
    assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.score)));
}
