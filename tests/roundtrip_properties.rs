use doc_columns::engine::core::column::ColumnBuilder;
use doc_columns::shared::path::{ROOT_PATH, parent_path};
use doc_columns::{
    ColumnDecoder, ProjectionEngine, ProjectionOptions, ProjectionOutcome, encode, project_inclusion,
    recompress, reconstruct,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

const FIELDS: [&str; 3] = ["a", "b", "c"];
const MAX_DEPTH: usize = 4;
const SEEDS: u64 = 300;

const OPTIONS: ProjectionOptions = ProjectionOptions {
    answer_trivial_sparse: false,
    max_depth: 100,
};

fn random_scalar(rng: &mut StdRng) -> Value {
    match rng.gen_range(0..4) {
        0 => json!(rng.gen_range(-5..50)),
        1 => json!(format!("s{}", rng.gen_range(0..10))),
        2 => json!(rng.gen_bool(0.5)),
        _ => Value::Null,
    }
}

fn random_value(rng: &mut StdRng, depth: usize) -> Value {
    if depth >= MAX_DEPTH {
        return random_scalar(rng);
    }
    match rng.gen_range(0..10) {
        0..=3 => random_scalar(rng),
        4..=6 => random_object(rng, depth + 1),
        _ => {
            let len = rng.gen_range(0..4);
            Value::Array((0..len).map(|_| random_value(rng, depth + 1)).collect())
        }
    }
}

fn random_object(rng: &mut StdRng, depth: usize) -> Value {
    let mut fields = Map::new();
    for field in FIELDS {
        if rng.gen_bool(0.5) {
            fields.insert(field.to_string(), random_value(rng, depth));
        }
    }
    Value::Object(fields)
}

fn documents() -> impl Iterator<Item = Value> {
    (0..SEEDS).map(|seed| random_object(&mut StdRng::seed_from_u64(seed), 0))
}

#[test]
fn reconstruct_restores_every_document() {
    for doc in documents() {
        let columns = encode(&doc).unwrap();
        let rebuilt = reconstruct(&columns).unwrap_or_else(|err| panic!("{doc}: {}", err.report()));
        assert_eq!(rebuilt, doc);
    }
}

#[test]
fn arr_info_expands_to_walker_markers() {
    let decoder = ColumnDecoder::default();
    for doc in documents() {
        let infos = ColumnBuilder::new(100).build(&doc).unwrap();
        let columns = encode(&doc).unwrap();
        for (path, info) in infos.iter().filter(|(path, info)| {
            path.as_str() != ROOT_PATH && !info.values.is_empty()
        }) {
            let column = columns.get(path).unwrap();

            let markers = decoder
                .expand_markers(path, column.values.len(), &column.arr_info)
                .unwrap();
            assert_eq!(markers, info.raw_markers, "{doc} at {path}");

            let again = recompress(path, column.values.len(), &column.arr_info).unwrap();
            assert_eq!(again, column.arr_info, "{doc} at {path}");
        }
    }
}

#[test]
fn sparseness_is_inherited_by_children() {
    for doc in documents() {
        let columns = encode(&doc).unwrap();
        for (path, column) in columns.field_columns() {
            let Some(parent) = parent_path(path) else {
                continue;
            };
            let parent_column = columns
                .get(parent)
                .unwrap_or_else(|| panic!("{doc}: no column for parent of {path}"));
            if parent_column.is_sparse {
                assert!(column.is_sparse, "{doc}: {path} dense under sparse {parent}");
            }
        }
    }
}

#[test]
fn answered_projections_match_document() {
    for doc in documents() {
        let columns = encode(&doc).unwrap();
        let engine = ProjectionEngine::with_options(&columns, OPTIONS);

        let mut targets = vec!["zz".to_string()];
        for path in columns.paths().filter(|path| *path != ROOT_PATH) {
            targets.push(path.to_string());
            targets.push(format!("{path}.z"));
        }

        for target in &targets {
            let outcome = engine
                .answer(target)
                .unwrap_or_else(|err| panic!("{doc} at {target}: {}", err.report()));
            if let ProjectionOutcome::Answered { answer, .. } = outcome {
                assert_eq!(answer, project_inclusion(&doc, target), "{doc} at {target}");
            }
        }
    }
}
