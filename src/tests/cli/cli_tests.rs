use super::*;

fn parse(args: &[&str]) -> Commands {
    Cli::try_parse_from(args).unwrap().command.unwrap()
}

#[test]
fn numeric_ids_parse_as_numbers() {
    let Commands::Toggle { id } = parse(&["checklist", "toggle", "1"]) else {
        panic!("expected toggle");
    };
    assert_eq!(id, TodoId::Num(1));

    let Commands::Rm { id, yes } = parse(&["checklist", "rm", "42"]) else {
        panic!("expected rm");
    };
    assert_eq!(id, TodoId::Num(42));
    assert!(!yes);

    let Commands::Show { id, .. } = parse(&["checklist", "show", "abc"]) else {
        panic!("expected show");
    };
    assert_eq!(id, TodoId::Text("abc".to_string()));
}

#[test]
fn list_filter_is_parsed() {
    let Commands::List { filter, json } = parse(&["checklist", "list", "--filter", "done"]) else {
        panic!("expected list");
    };
    assert_eq!(filter, Filter::Completed);
    assert!(!json);
    assert!(Cli::try_parse_from(["checklist", "list", "--filter", "someday"]).is_err());
}

#[test]
fn url_flag_overrides_a_bad_file_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checklist.json");
    std::fs::write(&path, r#"{"base_url": "localhost:5000", "resource": "/items/"}"#).unwrap();

    let cfg = cli_runtime::resolve_config(
        Some(&path),
        Some("http://127.0.0.1:3000/".to_string()),
        true,
    )
    .unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:3000");
    assert_eq!(cfg.resource, "items");
    assert!(cfg.reload_after_mutation);

    assert!(cli_runtime::resolve_config(Some(&path), None, false).is_err());
}
