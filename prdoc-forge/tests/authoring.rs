use prdoc_forge::{yaml, Editor, EditorState, Schema, TargetParams};
use serde_json::{json, Value};

fn editor() -> Editor {
    Editor::new(Schema::embedded().unwrap()).unwrap()
}

fn sample_model() -> Value {
    json!({
        "title": "Validate extrinsics before dispatch",
        "doc": [
            {
                "audience": "Runtime Dev",
                "description": "Adds a pre-dispatch validation hook so malformed extrinsics are rejected early."
            }
        ],
        "crates": [
            { "name": "pallet-example" }
        ]
    })
}

#[test]
fn full_flow_from_model_to_submission_url() {
    let mut editor = editor();

    let report = editor.update(sample_model()).unwrap();
    assert!(report.is_empty());
    assert_eq!(editor.state(), EditorState::Valid);

    let params = TargetParams::new("acme", "widgets", 42, "feature-x");
    let url = editor.submit(&params).unwrap();

    assert_eq!(url.host_str(), Some("github.com"));
    assert_eq!(url.path(), "/acme/widgets/new/feature-x");

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs[0].0, "filename");
    assert_eq!(pairs[0].1, "prdoc/pr_42.prdoc");
    assert_eq!(pairs[1].0, "value");
    assert_eq!(pairs[1].1, editor.yaml_text().unwrap());
}

#[test]
fn submitted_yaml_parses_back_to_the_model() {
    let mut editor = editor();
    editor.update(sample_model()).unwrap();

    let url = editor
        .submit(&TargetParams::new("acme", "widgets", 42, "main"))
        .unwrap();
    let (_, value) = url.query_pairs().find(|(k, _)| k == "value").unwrap();

    let restored = yaml::parse(&value).unwrap();
    assert_eq!(&restored, editor.model());
}

#[test]
fn yaml_text_is_block_style_with_document_start() {
    let mut editor = editor();
    editor.update(sample_model()).unwrap();
    let yaml = editor.yaml_text().unwrap();

    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("- audience: Runtime Dev\n"));
    assert!(!yaml.contains('{'), "flow style must not leak into the output");
}

#[test]
fn model_keys_render_in_stable_order() {
    let mut editor = editor();
    editor.update(sample_model()).unwrap();
    let yaml = editor.yaml_text().unwrap();

    let crates_at = yaml.find("crates:").unwrap();
    let doc_at = yaml.find("doc:").unwrap();
    let title_at = yaml.find("title:").unwrap();
    assert!(crates_at < doc_at && doc_at < title_at);
}

#[test]
fn defaults_fill_gaps_without_overwriting() {
    let mut editor = editor();
    let report = editor
        .update(json!({
            "title": "Fix bug",
            "doc": [{ "description": "details" }],
            "crates": [
                { "name": "pallet-a" },
                { "name": "pallet-b", "bump": "major" }
            ]
        }))
        .unwrap();
    assert!(report.is_empty());

    let model = editor.model();
    assert_eq!(model["doc"][0]["audience"], "Runtime Dev");
    assert_eq!(model["crates"][0]["bump"], "patch");
    assert_eq!(model["crates"][1]["bump"], "major");
}

#[test]
fn every_violation_is_reported_at_once() {
    let mut editor = editor();
    let report = editor
        .update(json!({
            "title": "",
            "doc": [{ "audience": "Everyone" }],
            "crates": [{ "bump": "patch" }]
        }))
        .unwrap();

    assert_eq!(editor.state(), EditorState::Draft);

    let paths: Vec<&str> = report.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"/title"));
    assert!(paths.contains(&"/doc/0/audience"));
    assert!(paths.contains(&"/doc/0"), "missing description");
    assert!(paths.contains(&"/crates/0"), "missing crate name");
}

#[test]
fn missing_parameters_are_noticed_in_order() {
    let some = |s: &str| Some(s.to_string());

    let err = TargetParams::resolve(None, some("widgets"), Some(1), some("main")).unwrap_err();
    assert_eq!(err.to_string(), "Missing parameter: org");

    let err = TargetParams::resolve(some("acme"), None, Some(1), some("main")).unwrap_err();
    assert_eq!(err.to_string(), "Missing parameter: repo");

    let err = TargetParams::resolve(some("acme"), some("widgets"), None, some("main")).unwrap_err();
    assert_eq!(err.to_string(), "Missing parameter: pull");

    let err = TargetParams::resolve(some("acme"), some("widgets"), Some(1), None).unwrap_err();
    assert_eq!(err.to_string(), "Missing parameter: branch");
}

#[test]
fn shared_link_parameters_drive_the_submission() {
    let params = TargetParams::from_url(
        "https://forms.example/new?org=acme&repo=widgets&pull=7&branch=release%2Fv1",
    )
    .unwrap();
    assert_eq!(params.branch, "release/v1");

    let mut editor = editor();
    editor.update(json!({ "title": "Fix bug" })).unwrap();

    let url = editor.submit(&params).unwrap();
    assert_eq!(url.path(), "/acme/widgets/new/release%2Fv1");
    let (_, filename) = url.query_pairs().find(|(k, _)| k == "filename").unwrap();
    assert_eq!(filename, "prdoc/pr_7.prdoc");
}
