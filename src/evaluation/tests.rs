use super::*;
use std::io::Write;
use std::sync::Arc;

use crate::config::Config;
use crate::embedding::{HashingEmbedder, MockEmbeddingProvider};

const SET_JSON: &str = r#"[
    {
        "question": {
            "id": "bio-1",
            "prompt": "What is mitosis?",
            "reference": "Mitosis is cell division producing two identical daughter cells.",
            "key_concepts": ["cell division", "daughter cells"]
        },
        "answer": "Mitosis is when a cell divides into two daughter cells.",
        "expected": "correct"
    },
    {
        "question": {
            "id": "bio-1",
            "prompt": "What is mitosis?",
            "reference": "Mitosis is cell division producing two identical daughter cells.",
            "key_concepts": ["cell division", "daughter cells"]
        },
        "answer": "Paris is the capital of France.",
        "expected": "incorrect"
    }
]"#;

fn verifier() -> Verifier<HashingEmbedder> {
    Verifier::from_config(Config::default(), Arc::new(HashingEmbedder::default())).unwrap()
}

#[test]
fn test_from_json_str() {
    let set = EvaluationSet::from_json_str(SET_JSON).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.cases[0].expected, VerdictClass::Correct);
    assert_eq!(set.cases[0].question.key_concepts.len(), 2);
}

#[test]
fn test_from_json_str_rejects_empty_and_malformed() {
    assert!(matches!(
        EvaluationSet::from_json_str("[]"),
        Err(EvaluationError::Empty)
    ));
    assert!(matches!(
        EvaluationSet::from_json_str(r#"{"cases": 1}"#),
        Err(EvaluationError::Parse { .. })
    ));
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SET_JSON.as_bytes()).unwrap();

    let set = EvaluationSet::from_path(file.path()).unwrap();
    assert_eq!(set.len(), 2);

    let missing = EvaluationSet::from_path("/nonexistent/evaluation.json").unwrap_err();
    match &missing {
        EvaluationError::Io { path, source } => {
            assert_eq!(path, Path::new("/nonexistent/evaluation.json"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(std::error::Error::source(&missing).is_some());
    assert!(missing.to_string().contains("/nonexistent/evaluation.json"));
}

#[tokio::test]
async fn test_evaluate_agreement_and_metrics() {
    let set = EvaluationSet::from_json_str(SET_JSON).unwrap();
    let report = evaluate(&verifier(), &set).await.unwrap();

    assert_eq!(report.provider, "hashing");
    assert_eq!(report.cases.len(), 2);
    assert_eq!(report.agreement, 2);
    assert_eq!(report.accuracy(), 1.0);

    for metric in Metric::ALL {
        let summary = report.metric(metric).expect("every metric recorded");
        assert_eq!(summary.samples, 2);
        assert!((0.0..=1.0).contains(&summary.average));
    }

    let unrelated = &report.cases[1];
    assert!(unrelated.score(Metric::Bleu4).unwrap() < 0.05);
    assert_eq!(unrelated.score(Metric::Rouge3), Some(0.0));
    assert_eq!(unrelated.score(Metric::Meteor), Some(0.0));
    assert!(report.cases[0].score(Metric::Meteor).unwrap() > 0.5);
}

#[tokio::test]
async fn test_evaluate_degraded_skips_cosine() {
    let verifier = Verifier::from_config(
        Config::default(),
        Arc::new(MockEmbeddingProvider::failing(384)),
    )
    .unwrap();
    let set = EvaluationSet::from_json_str(SET_JSON).unwrap();

    let report = evaluate(&verifier, &set).await.unwrap();

    assert!(report.cases.iter().all(|c| c.degraded));
    assert!(report.metric(Metric::CosineSimilarity).is_none());
    assert_eq!(report.metric(Metric::Lexical).unwrap().samples, 2);
}

#[tokio::test]
async fn test_evaluate_invalid_question_fails() {
    let mut set = EvaluationSet::from_json_str(SET_JSON).unwrap();
    set.cases[0].question.id = " ".to_string();

    let err = evaluate(&verifier(), &set).await.unwrap_err();
    assert!(matches!(err, EvaluationError::Verify(_)));
}

#[test]
fn test_report_csv() {
    let cases = vec![
        CaseResult {
            question_id: "q1".into(),
            expected: VerdictClass::Correct,
            actual: VerdictClass::Correct,
            degraded: false,
            scores: vec![(Metric::CosineSimilarity, 0.9), (Metric::Bleu4, 0.25)],
        },
        CaseResult {
            question_id: "q2".into(),
            expected: VerdictClass::Correct,
            actual: VerdictClass::Incorrect,
            degraded: true,
            scores: vec![(Metric::Bleu4, 0.5)],
        },
    ];

    let report = EvaluationReport::from_cases("hashing", cases);
    assert_eq!(report.agreement, 1);
    assert_eq!(report.accuracy(), 0.5);
    assert_eq!(
        report.to_csv(),
        "provider,metric,average_score\nhashing,COSINE_SIMILARITY,0.900\nhashing,BLEU_4,0.375\n"
    );
}

#[test]
fn test_write_csv() {
    let report = EvaluationReport::from_cases("hashing", Vec::new());
    assert_eq!(report.accuracy(), 0.0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    report.write_csv(&path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "provider,metric,average_score\n"
    );
}

#[test]
fn test_metric_names() {
    assert_eq!(Metric::Rouge3.to_string(), "ROUGE_3");
    assert_eq!(
        serde_json::to_string(&Metric::CosineSimilarity).unwrap(),
        "\"COSINE_SIMILARITY\""
    );
    assert_eq!(serde_json::to_string(&Metric::Bleu4).unwrap(), "\"BLEU_4\"");
    assert_eq!(serde_json::to_string(&Metric::Meteor).unwrap(), "\"METEOR\"");
    assert_eq!(Metric::Meteor.name(), "METEOR");
}
