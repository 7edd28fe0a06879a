use doc_lingo::{
    config::Detection,
    detect::{LanguageDetect, LinguaDetector},
    error::AnalysisError,
};

fn detection(langs: &[&str]) -> Detection {
    Detection {
        languages: langs.iter().map(|s| s.to_string()).collect(),
        ..Detection::default()
    }
}

#[test]
fn detects_english_prose() {
    let detector = LinguaDetector::new(&detection(&["en", "fr", "de"])).unwrap();
    let lang = detector
        .detect("The quarterly report describes the results of the company and its plans for the coming year.")
        .unwrap();
    assert_eq!(lang, "en");
}

#[test]
fn text_without_letters_fails() {
    let detector = LinguaDetector::new(&detection(&["en", "fr"])).unwrap();
    let err = detector.detect("12345 67 / 89").unwrap_err();
    assert!(matches!(err, AnalysisError::LanguageDetection(_)));
}

#[test]
fn rejects_bad_language_lists() {
    assert!(LinguaDetector::new(&detection(&["en"])).is_err());
    assert!(LinguaDetector::new(&detection(&["en", "zz"])).is_err());

    let mut cfg = detection(&["en", "fr"]);
    cfg.minimum_relative_distance = 1.5;
    assert!(LinguaDetector::new(&cfg).is_err());
}
