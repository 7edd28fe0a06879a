mod common;

use common::{TagDetector, chunks};
use doc_lingo::{
    config::ResultFormat,
    detect::detect_languages,
    report::{AnalysisResult, LanguageDistribution},
};

#[test]
fn single_language_document() {
    let (dominant, dist) = detect_languages(&TagDetector, &chunks(&["en hello world"]));
    assert_eq!(dominant.as_deref(), Some("en"));
    assert_eq!(dist.get("en"), Some(100.0));
    assert_eq!(dist.len(), 1);
}

#[test]
fn failed_chunks_stay_in_denominator() {
    let (dominant, dist) =
        detect_languages(&TagDetector, &chunks(&["en a", "en b", "fr c", "1234"]));

    assert_eq!(dominant.as_deref(), Some("en"));
    assert_eq!(dist.get("en"), Some(50.0));
    assert_eq!(dist.get("fr"), Some(25.0));
    assert_eq!(dist.total(), 75.0);
}

#[test]
fn thirds_are_not_rounded() {
    let (_, dist) = detect_languages(&TagDetector, &chunks(&["de x", "en y", "de z"]));
    let de = dist.get("de").unwrap();
    let en = dist.get("en").unwrap();
    assert!((de - 200.0 / 3.0).abs() < 1e-9);
    assert!((en - 100.0 / 3.0).abs() < 1e-9);
    assert!(dist.total() <= 100.0 + 1e-9);
}

#[test]
fn tie_goes_to_first_detected() {
    let (dominant, dist) = detect_languages(&TagDetector, &chunks(&["fr un", "en one"]));
    assert_eq!(dominant.as_deref(), Some("fr"));
    let order: Vec<&str> = dist.iter().map(|(l, _)| l).collect();
    assert_eq!(order, vec!["fr", "en"]);
}

#[test]
fn nothing_detected_means_no_dominant() {
    let (dominant, dist) = detect_languages(&TagDetector, &chunks(&["", "  ", "42"]));
    assert!(dominant.is_none());
    assert!(dist.is_empty());

    let (dominant, dist) = detect_languages(&TagDetector, &[]);
    assert!(dominant.is_none());
    assert!(dist.is_empty());
}

fn sample_result() -> AnalysisResult {
    let mut dist = LanguageDistribution::new();
    dist.insert("en", 75.0);
    dist.insert("fr", 25.0);
    AnalysisResult {
        is_scanned: false,
        dominant_language: Some("en".into()),
        language_distribution: dist,
    }
}

#[test]
fn literal_dump() {
    let literal = sample_result().render(ResultFormat::Literal).unwrap();
    assert_eq!(
        literal,
        "{'Is Scanned': False, 'Dominant Language': 'en', 'Language Distribution': {'en': 75.0, 'fr': 25.0}}"
    );

    let empty = AnalysisResult {
        is_scanned: true,
        dominant_language: None,
        language_distribution: LanguageDistribution::new(),
    };
    assert_eq!(
        empty.to_literal(),
        "{'Is Scanned': True, 'Dominant Language': None, 'Language Distribution': {}}"
    );
}

#[test]
fn json_dump_is_strict_and_ordered() {
    let json = sample_result().render(ResultFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["Is Scanned"], false);
    assert_eq!(value["Dominant Language"], "en");
    assert_eq!(value["Language Distribution"]["fr"], 25.0);
    assert!(json.find("\"en\"").unwrap() < json.find("\"fr\"").unwrap());

    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample_result());
}
