use medscale_cli::commands;
use medscale_engine::session::AnswerChange;
use medscale_engine::workbench::Workbench;
use medscale_scales::all_scales;
use medscale_storage::kv::FileStore;
use medscale_storage::state::StateStore;

fn open(dir: &std::path::Path) -> Workbench<'static, FileStore> {
    Workbench::open(all_scales(), StateStore::new(FileStore::new(dir)))
}

#[test]
fn listing_marks_the_active_scale() {
    let dir = tempfile::tempdir().unwrap();
    let mut bench = open(dir.path());
    commands::activate(&mut bench, "chads").unwrap();

    let listing = commands::list_scales(&bench);
    let active: Vec<&str> = listing.lines().filter(|l| l.starts_with('*')).collect();
    assert_eq!(active.len(), 1);
    assert!(active[0].contains("chads"));
    assert_eq!(listing.lines().count(), 4);
}

#[test]
fn scale_argument_defaults_to_active() {
    let dir = tempfile::tempdir().unwrap();
    let mut bench = open(dir.path());
    assert_eq!(commands::scale_id(&bench, None).unwrap(), "phoenix");
    commands::activate(&mut bench, "stopbang").unwrap();
    drop(bench);

    let bench = open(dir.path());
    assert_eq!(commands::scale_id(&bench, None).unwrap(), "stopbang");
    assert_eq!(commands::scale_id(&bench, Some("gfr")).unwrap(), "gfr");
}

#[test]
fn answers_persist_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut bench = open(dir.path());
        let change = AnswerChange::Select {
            field: "sex".to_string(),
            value: "female".to_string(),
        };
        commands::apply(&mut bench, "gfr", &change, false).unwrap();
        for (field, text) in [("age", "60"), ("scr", "0.6")] {
            let change = AnswerChange::Enter {
                field: field.to_string(),
                text: text.to_string(),
            };
            commands::apply(&mut bench, "gfr", &change, false).unwrap();
        }
    }

    let bench = open(dir.path());
    let text = commands::result(&bench, "gfr", false).unwrap();
    assert!(text.contains("Total: 102.7"), "{text}");
    assert!(text.contains("Risk: Normal or high"), "{text}");

    let json = commands::result(&bench, "gfr", true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["scale_id"], "gfr");
    assert_eq!(value["risk_label"], "Normal or high");
}

#[test]
fn show_marks_current_answers() {
    let dir = tempfile::tempdir().unwrap();
    let mut bench = open(dir.path());
    let change = AnswerChange::Toggle {
        field: "stopbang".to_string(),
        value: "neck".to_string(),
        on: true,
    };
    commands::apply(&mut bench, "stopbang", &change, false).unwrap();

    let text = commands::show(&bench, "stopbang", false).unwrap();
    assert!(text.contains("[x] neck"), "{text}");
    assert!(text.contains("[ ] snoring"), "{text}");
    assert!(text.contains("Total: 1/8"), "{text}");

    let text = commands::show(&bench, "phoenix", false).unwrap();
    assert!(text.contains("(*) 0"), "{text}");

    let json = commands::show(&bench, "stopbang", true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["scale"]["answer_mode"], "multi-select");
    assert_eq!(value["result"]["score"], 1.0);
}

#[test]
fn reset_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut bench = open(dir.path());
    let change = AnswerChange::Select {
        field: "lactate".to_string(),
        value: "2".to_string(),
    };
    commands::apply(&mut bench, "phoenix", &change, false).unwrap();
    let exported = commands::export(&bench, "phoenix").unwrap();
    assert!(exported.starts_with("Phoenix Sepsis Score: 2/13"), "{exported}");
    assert!(exported.contains("Risk: Septic shock"), "{exported}");

    let text = commands::reset(&mut bench, "phoenix", false).unwrap();
    assert!(text.contains("Total: 0"), "{text}");
}

#[test]
fn invalid_edits_surface_as_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut bench = open(dir.path());
    let change = AnswerChange::Select {
        field: "stopbang".to_string(),
        value: "neck".to_string(),
    };
    let err = commands::apply(&mut bench, "stopbang", &change, false).unwrap_err();
    assert!(err.to_string().contains("cannot select"), "{err}");
    assert!(commands::show(&bench, "apgar", false).is_err());
}
