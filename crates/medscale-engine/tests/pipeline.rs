use medscale_core::models::definition::{
    AnswerMode, ChoiceOption, FreeformField, InterpretationRule, ScaleDefinition, Section,
};
use medscale_core::models::score::Score;
use medscale_core::models::values::{FieldValue, ValuesMap};
use medscale_engine::display::{DisplaySlots, PLACEHOLDER};
use medscale_engine::evaluate::{evaluate, run};
use medscale_engine::extract::extract;
use medscale_engine::resolve::{first_match, resolve};
use medscale_engine::surface::{FormSurface, InputElement, InputSurface};
use medscale_scales::scales::{ckd_epi, phoenix, stop_bang};
use medscale_scales::scoring::sum_of_weights;

/// Single-choice scale whose first two rules overlap at 5 and above.
fn overlapping() -> ScaleDefinition {
    ScaleDefinition {
        id: "overlap".to_string(),
        name: "Overlap".to_string(),
        description: String::new(),
        answer_mode: AnswerMode::SingleChoice,
        sections: vec![Section::choice(
            "level",
            "Level",
            vec![
                ChoiceOption::new("low", 1.0, "Low").selected(),
                ChoiceOption::new("high", 6.0, "High"),
            ],
        )],
        score_formula: sum_of_weights,
        result_formatter: None,
        interpretation_rules: vec![
            InterpretationRule::new("Elevated", "At least five", |s, _| s >= 5.0),
            InterpretationRule::new("Severe", "At least six", |s, _| s >= 6.0),
            InterpretationRule::new("Minimal", "Under five", |s, _| s < 5.0),
        ],
        max_score: None,
    }
}

#[test]
fn first_declared_rule_wins_when_rules_overlap() {
    let definition = overlapping();
    let rule = first_match(&definition, &Score::new(6.0)).unwrap();
    assert_eq!(rule.risk_label, "Elevated");
    assert_eq!(
        resolve(&definition, &Score::new(1.0)).risk_label.as_deref(),
        Some("Minimal")
    );
}

#[test]
fn no_matching_rule_gives_empty_interpretation() {
    let definition = ckd_epi::definition();
    let surface = FormSurface::from_definition(&definition);
    let result = run(&definition, &extract(&definition, &surface));
    assert!(result.interpretation().is_empty());
    assert_eq!(result.flags, vec![ckd_epi::INCOMPLETE.to_string()]);

    let slots = DisplaySlots::from_result(&result);
    assert_eq!(slots.total, PLACEHOLDER);
    assert_eq!(slots.risk, PLACEHOLDER);
    assert_eq!(slots.explanation, PLACEHOLDER);
    assert_eq!(slots.detail, "Age: - y, Scr: - mg/dL");
}

#[test]
fn defaults_are_applied_to_a_fresh_surface() {
    let definition = phoenix::definition();
    let surface = FormSurface::from_definition(&definition);
    assert_eq!(surface.selected("respiratory"), vec!["0".to_string()]);
    assert_eq!(surface.fields().count(), 6);

    let result = run(&definition, &extract(&definition, &surface));
    assert_eq!(result.score, 0.0);
    assert_eq!(result.risk_label.as_deref(), Some("No sepsis"));
}

#[test]
fn extraction_follows_section_kind_and_mode() {
    let definition = ckd_epi::definition();
    let mut surface = FormSurface::from_definition(&definition);
    assert!(surface.select("sex", "female"));
    assert!(surface.set_text("age", "64"));

    let values = extract(&definition, &surface);
    assert_eq!(values.choice("sex"), Some("female"));
    assert_eq!(values.raw("age"), "64");
    assert_eq!(values.get("scr"), Some(&FieldValue::Raw(String::new())));
}

#[test]
fn multi_select_extracts_in_declaration_order() {
    let definition = stop_bang::definition();
    let mut surface = FormSurface::from_definition(&definition);
    surface.set_toggle("stopbang", "neck", true);
    surface.set_toggle("stopbang", "snoring", true);

    let values = extract(&definition, &surface);
    let Some(FieldValue::Selections(selected)) = values.get("factors") else {
        panic!("expected selections");
    };
    let order: Vec<&str> = selected.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(order, vec!["snoring", "neck"]);
    assert_eq!(evaluate(&definition, &values).value, 2.0);
}

#[test]
fn nothing_selected_scores_zero() {
    let definition = stop_bang::definition();
    let surface = FormSurface::from_definition(&definition);
    let values = extract(&definition, &surface);
    assert_eq!(values.weight("factors"), 0.0);

    let result = run(&definition, &values);
    assert_eq!(result.formatted_total, "0/8");
    assert_eq!(result.risk_label.as_deref(), Some("Low risk"));
}

#[test]
fn surface_rejects_mismatched_edits() {
    let definition = phoenix::definition();
    let mut surface = FormSurface::from_definition(&definition);
    assert!(!surface.select("respiratory", "7"));
    assert!(!surface.set_toggle("respiratory", "1", true));
    assert!(!surface.set_text("respiratory", "1"));
    assert!(!surface.clear("respiratory"));
    assert!(!surface.select("missing", "0"));
    assert_eq!(surface.selected("respiratory"), vec!["0".to_string()]);
    assert!(surface.inputs("missing").is_empty());
}

#[test]
fn selecting_a_choice_deselects_the_others() {
    let definition = phoenix::definition();
    let mut surface = FormSurface::from_definition(&definition);
    assert!(surface.select("lactate", "2"));
    assert_eq!(
        surface.inputs("lactate"),
        vec![
            InputElement::Choice {
                value: "0".to_string(),
                selected: false
            },
            InputElement::Choice {
                value: "1".to_string(),
                selected: false
            },
            InputElement::Choice {
                value: "2".to_string(),
                selected: true
            },
        ]
    );
}

fn infinite(_: &ValuesMap) -> Score {
    Score::new(f64::INFINITY)
}

#[test]
fn non_finite_score_is_normalized() {
    let definition = ScaleDefinition {
        id: "broken".to_string(),
        name: "Broken".to_string(),
        description: String::new(),
        answer_mode: AnswerMode::SingleChoice,
        sections: vec![Section::freeform(
            "note",
            "Note",
            FreeformField::text("note", "Anything"),
        )],
        score_formula: infinite,
        result_formatter: None,
        interpretation_rules: vec![InterpretationRule::new("Zero", "", |s, _| s == 0.0)],
        max_score: None,
    };
    let surface = FormSurface::from_definition(&definition);
    let result = run(&definition, &extract(&definition, &surface));
    assert_eq!(result.score, 0.0);
    assert_eq!(result.formatted_total, "0");
    assert_eq!(result.risk_label.as_deref(), Some("Zero"));
}

#[test]
fn export_appends_maximum_only_when_missing() {
    let slots = DisplaySlots {
        total: "4".to_string(),
        detail: PLACEHOLDER.to_string(),
        risk: "Septic shock".to_string(),
        explanation: "Treat".to_string(),
    };
    assert_eq!(
        slots.export_text("Phoenix", Some(13.0)),
        "Phoenix: 4/13\nRisk: Septic shock\nInterpretation: Treat"
    );

    let already = DisplaySlots {
        total: "3/8".to_string(),
        ..DisplaySlots::default()
    };
    assert_eq!(already.export_text("STOP-BANG", Some(8.0)), "STOP-BANG: 3/8");

    assert_eq!(DisplaySlots::default().export_text("eGFR", Some(150.0)), "eGFR: -");
}
