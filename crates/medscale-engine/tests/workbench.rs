use medscale_core::store_keys;
use medscale_engine::error::EngineError;
use medscale_engine::session::AnswerChange;
use medscale_engine::workbench::Workbench;
use medscale_scales::all_scales;
use medscale_storage::kv::{KeyValueStore, MemoryStore};
use medscale_storage::state::StateStore;

fn toggle(field: &str, value: &str) -> AnswerChange {
    AnswerChange::Toggle {
        field: field.to_string(),
        value: value.to_string(),
        on: true,
    }
}

#[test]
fn opening_initializes_every_scale() {
    let bench = Workbench::open(all_scales(), StateStore::new(MemoryStore::new()));
    assert_eq!(bench.definitions().count(), 4);
    assert_eq!(bench.display().published(), 4);
    for definition in bench.definitions() {
        assert!(bench.result(&definition.id).is_ok(), "{}", definition.id);
        assert!(bench.store().load(&definition.id).is_some(), "{}", definition.id);
    }
    assert_eq!(bench.active().map(|d| d.id.as_str()), Some("phoenix"));
}

#[test]
fn active_scale_is_remembered() {
    let mut bench = Workbench::open(all_scales(), StateStore::new(MemoryStore::new()));
    bench.activate("gfr").unwrap();
    assert_eq!(
        bench.store().get_value(store_keys::ACTIVE_SCALE).as_deref(),
        Some("gfr")
    );

    let reopened = Workbench::open(all_scales(), bench.into_store());
    assert_eq!(reopened.active().map(|d| d.id.as_str()), Some("gfr"));
}

#[test]
fn unregistered_active_scale_falls_back_to_first() {
    let mut backend = MemoryStore::new();
    backend.set(store_keys::ACTIVE_SCALE, "retired").unwrap();
    let bench = Workbench::open(all_scales(), StateStore::new(backend));
    assert_eq!(bench.active().map(|d| d.id.as_str()), Some("phoenix"));
}

#[test]
fn unknown_scale_is_rejected() {
    let mut bench = Workbench::open(all_scales(), StateStore::new(MemoryStore::new()));
    assert!(matches!(
        bench.activate("apgar"),
        Err(EngineError::UnknownScale(id)) if id == "apgar"
    ));
    assert!(matches!(
        bench.apply("apgar", &toggle("x", "y")),
        Err(EngineError::UnknownScale(_))
    ));
    assert!(bench.export_text("apgar").is_err());
}

#[test]
fn scales_do_not_share_answers() {
    let mut bench = Workbench::open(all_scales(), StateStore::new(MemoryStore::new()));
    bench.apply("chads", &toggle("chads", "age75")).unwrap();
    assert_eq!(bench.result("chads").unwrap().score, 2.0);
    assert_eq!(bench.result("stopbang").unwrap().score, 0.0);
}

#[test]
fn export_renders_current_slots() {
    let mut bench = Workbench::open(all_scales(), StateStore::new(MemoryStore::new()));
    for value in ["snoring", "tired", "observed"] {
        bench.apply("stopbang", &toggle("stopbang", value)).unwrap();
    }
    assert_eq!(
        bench.export_text("stopbang").unwrap(),
        "STOP-BANG: 3/8\nRisk: Moderate risk\nInterpretation: Moderate risk of obstructive sleep apnea"
    );

    let phoenix = bench.export_text("phoenix").unwrap();
    assert!(phoenix.starts_with("Phoenix Sepsis Score: 0/13\n"), "{phoenix}");
    assert!(phoenix.contains("Risk: No sepsis"));

    assert_eq!(bench.export_text("gfr").unwrap(), "eGFR (CKD-EPI 2021): -\nDetail: Age: - y, Scr: - mg/dL");
}

#[test]
fn reset_discards_answers() {
    let mut bench = Workbench::open(all_scales(), StateStore::new(MemoryStore::new()));
    bench.apply("chads", &toggle("chads", "stroke")).unwrap();
    let result = bench.reset("chads").unwrap();
    assert_eq!(result.score, 0.0);

    let reopened = Workbench::open(all_scales(), bench.into_store());
    assert_eq!(reopened.result("chads").unwrap().score, 0.0);
    assert_eq!(reopened.slots("chads").unwrap().risk, "Low risk");
}
