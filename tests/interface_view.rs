use std::path::PathBuf;

use ivview::core::{group, load_interface_view, Encoding, OutputFormat, PeerReport};
use ivview::models::InterfaceView;
use ivview::{run, write_output, RunOptions};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn options(input: &str) -> RunOptions {
    RunOptions {
        input: data(input),
        templates: None,
        format: OutputFormat::Template,
        encoding: Encoding::Latin1,
    }
}

fn load(name: &str) -> InterfaceView {
    load_interface_view(&data(name)).unwrap()
}

#[test]
fn scenario_model() {
    let view = load("scenario.yaml");

    let model = group(&view.functions);

    insta::assert_yaml_snapshot!(model, @r###"
    component_names:
      - A
      - B
    connections:
      - from: A
        to: B
        messages:
          - x
          - z
    "###);
}

#[test]
fn json_view_groups_by_peer() {
    let view = load("satellite.json");

    let model = group(&view.functions);

    insta::assert_yaml_snapshot!(model, @r###"
    component_names:
      - obsw
      - ground
      - clock
    connections:
      - from: obsw
        to: ground
        messages:
          - tc
          - hk
      - from: obsw
        to: clock
        messages:
          - pulse
      - from: ground
        to: obsw
        messages:
          - tm
    "###);

    let report = PeerReport::check(&view.functions, &model);
    assert!(report.is_clean());
    assert_eq!(report.isolated, vec!["clock".to_string()]);
}

#[test]
fn every_input_name_is_listed_once() {
    for fixture in ["scenario.yaml", "satellite.json", "wide.yaml"] {
        let view = load(fixture);
        let model = group(&view.functions);

        let names: Vec<&String> = view.functions.keys().collect();
        assert_eq!(model.component_names.iter().collect::<Vec<_>>(), names);
        for connection in &model.connections {
            assert!(view.functions.contains_key(&connection.from));
            assert!(!connection.messages.is_empty());
        }
    }
}

#[test]
fn run_renders_bundled_plantuml() {
    let out = run(&options("scenario.yaml")).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "@startuml\nparticipant A\nparticipant B\nB -> A : x, z\n@enduml\n"
    );
}

#[test]
fn run_with_custom_templates() {
    let mut options = options("satellite.json");
    options.templates = Some(data("arrows.stg"));

    let out = run(&options).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "functions: obsw ground clock\n\
         obsw <= ground [\"tc\", \"hk\"]\n\
         obsw <= clock [\"pulse\"]\n\
         ground <= obsw [\"tm\"]\n"
    );
}

#[test]
fn run_json_dump_round_trips() {
    let mut options = options("scenario.yaml");
    options.format = OutputFormat::Json;

    let out = run(&options).unwrap();
    let parsed: ivview::core::RenderModel = serde_json::from_slice(&out).unwrap();

    assert_eq!(parsed, group(&load("scenario.yaml").functions));
}

#[test]
fn latin1_output_rejects_wide_names() {
    let err = run(&options("wide.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("cannot be encoded as latin1"));

    let mut options = options("wide.yaml");
    options.encoding = Encoding::Utf8;
    let out = run(&options).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "@startuml\nparticipant Ωmega\nΩmega -> Ωmega : ping\n@enduml\n"
    );
}

#[test]
fn missing_template_file_is_reported() {
    let mut options = options("scenario.yaml");
    options.templates = Some(data("nope.stg"));

    let err = run(&options).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to load templates"));
}

#[test]
fn group_file_with_declaration_and_indented_bodies() {
    let mut options = options("scenario.yaml");
    options.templates = Some(data("st3.stg"));

    let out = run(&options).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "    A: \"x from B \"z from B\n"
    );
}

#[test]
fn group_without_connection_template_is_rejected_up_front() {
    let mut options = options("scenario.yaml");
    options.templates = Some(data("partial.stg"));

    let err = run(&options).unwrap_err();
    assert!(format!("{err:#}").contains("does not define connection (found: interface_view)"));

    // Model dumps do not need the templates
    options.format = OutputFormat::Yaml;
    assert!(run(&options).is_ok());
}

#[test]
fn output_file_receives_rendered_bytes() {
    let path = std::env::temp_dir().join(format!("ivview-output-{}.txt", std::process::id()));
    let bytes = run(&options("scenario.yaml")).unwrap();

    write_output(Some(path.as_path()), &bytes).unwrap();

    let written = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(written, bytes);
}

#[test]
fn unwritable_output_is_reported() {
    let path = data("missing-dir/out.txt");

    let err = write_output(Some(path.as_path()), b"x").unwrap_err();

    assert!(format!("{err:#}").contains("Failed to write"));
}
