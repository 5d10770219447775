use doc_columns::{
    FetchReason, ProjectionEngine, ProjectionOptions, ProjectionOutcome, encode, project_inclusion,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    path: String,
    cases: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    input: Value,
    expected: Value,
    /// `"answer"`, a fetch reason, or absent when either is acceptable.
    outcome: Option<String>,
}

const OPTIONS: ProjectionOptions = ProjectionOptions {
    answer_trivial_sparse: false,
    max_depth: 100,
};

fn load_scenarios() -> ScenarioFile {
    serde_json::from_str(include_str!("scenarios/projection_scenarios.json"))
        .expect("Invalid scenario JSON")
}

#[test]
fn inclusion_projection_matches_expected() {
    let file = load_scenarios();
    for case in &file.cases {
        assert_eq!(
            project_inclusion(&case.input, &file.path),
            case.expected,
            "input {}",
            case.input
        );
    }
}

#[test]
fn answered_projections_equal_expected() {
    let file = load_scenarios();
    let mut answered = 0;

    for case in &file.cases {
        let columns = encode(&case.input).expect("scenario input encodes");
        let outcome = ProjectionEngine::with_options(&columns, OPTIONS)
            .answer(&file.path)
            .unwrap_or_else(|err| panic!("input {}: {}", case.input, err.report()));

        if let ProjectionOutcome::Answered { answer, .. } = &outcome {
            answered += 1;
            assert_eq!(answer, &case.expected, "input {}", case.input);
        }

        match case.outcome.as_deref() {
            None => {}
            Some("answer") => assert!(outcome.is_answered(), "input {}: {outcome:?}", case.input),
            Some(reason) => assert_eq!(
                outcome.fetch_reason().map(|r| r.as_str()),
                Some(reason),
                "input {}",
                case.input
            ),
        }
    }

    assert!(answered > 0);
}

#[test]
fn empty_document_needs_fetch() {
    let columns = encode(&serde_json::json!({})).unwrap();
    let outcome = ProjectionEngine::with_options(&columns, OPTIONS)
        .answer("a.b.c")
        .unwrap();
    assert_eq!(outcome.fetch_reason(), Some(FetchReason::NoDataForPath));
}
