//! Command implementations. Each returns the text to print so that tests can
//! drive them against a temporary store.

use std::fmt::Write as _;

use medscale_core::models::definition::{AnswerMode, SectionKind};
use medscale_core::models::result::EvaluationResult;
use medscale_engine::display::DisplaySlots;
use medscale_engine::session::AnswerChange;
use medscale_engine::surface::{InputElement, InputSurface};
use medscale_engine::workbench::Workbench;
use medscale_storage::kv::KeyValueStore;

/// Resolve an optional scale argument to a concrete id.
pub fn scale_id<K: KeyValueStore>(bench: &Workbench<'_, K>, id: Option<&str>) -> eyre::Result<String> {
    match id {
        Some(id) => Ok(id.to_string()),
        None => bench
            .active()
            .map(|d| d.id.clone())
            .ok_or_else(|| eyre::eyre!("no scales are registered")),
    }
}

pub fn list_scales<K: KeyValueStore>(bench: &Workbench<'_, K>) -> String {
    let active = bench.active().map(|d| d.id.as_str());
    let mut out = String::new();
    for definition in bench.definitions() {
        let marker = if Some(definition.id.as_str()) == active { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<10} {:<24} {}",
            definition.id,
            definition.name,
            mode_name(definition.answer_mode)
        );
    }
    out
}

/// Sections, options with their current state, and the current result.
pub fn show<K: KeyValueStore>(bench: &Workbench<'_, K>, id: &str, json: bool) -> eyre::Result<String> {
    let session = bench.session(id)?;
    let definition = session.definition();

    if json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "scale": definition.descriptor(),
            "result": session.last_result(),
        }))?);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {})",
        definition.name,
        definition.id,
        mode_name(definition.answer_mode)
    );
    let _ = writeln!(out, "{}", definition.description);

    for section in &definition.sections {
        let _ = writeln!(out, "\n{} [{}]", section.title, section.field_name);
        let inputs = session.surface().inputs(&section.field_name);
        match &section.kind {
            SectionKind::Choice { options } => {
                for option in options {
                    let selected = inputs.iter().any(|input| match input {
                        InputElement::Choice { value, selected }
                        | InputElement::Toggle { value, selected } => {
                            *selected && *value == option.value
                        }
                        InputElement::Text { .. } => false,
                    });
                    let marker = match (definition.answer_mode, selected) {
                        (AnswerMode::SingleChoice, true) => "(*)",
                        (AnswerMode::SingleChoice, false) => "( )",
                        (AnswerMode::MultiSelect, true) => "[x]",
                        (AnswerMode::MultiSelect, false) => "[ ]",
                    };
                    let _ = writeln!(out, "  {marker} {:<10} {}", option.value, option.label);
                }
            }
            SectionKind::Freeform { field } => {
                let text = session.surface().text(&section.field_name).unwrap_or_default();
                let shown = if text.is_empty() { "-" } else { text.as_str() };
                let _ = writeln!(out, "  {}: {shown}", field.label);
            }
        }
    }

    let _ = writeln!(out);
    out.push_str(&render_slots(&bench.slots(id)?));
    Ok(out)
}

pub fn result<K: KeyValueStore>(bench: &Workbench<'_, K>, id: &str, json: bool) -> eyre::Result<String> {
    if json {
        return render_json(bench.result(id)?);
    }
    Ok(render_slots(&bench.slots(id)?))
}

pub fn export<K: KeyValueStore>(bench: &Workbench<'_, K>, id: &str) -> eyre::Result<String> {
    Ok(bench.export_text(id)?)
}

/// Apply an edit and render the scale's new result.
pub fn apply<K: KeyValueStore>(
    bench: &mut Workbench<'_, K>,
    id: &str,
    change: &AnswerChange,
    json: bool,
) -> eyre::Result<String> {
    let result = bench.apply(id, change)?;
    if json {
        return render_json(&result);
    }
    Ok(render_slots(&bench.slots(id)?))
}

pub fn reset<K: KeyValueStore>(bench: &mut Workbench<'_, K>, id: &str, json: bool) -> eyre::Result<String> {
    let result = bench.reset(id)?;
    if json {
        return render_json(&result);
    }
    Ok(render_slots(&bench.slots(id)?))
}

pub fn activate<K: KeyValueStore>(bench: &mut Workbench<'_, K>, id: &str) -> eyre::Result<String> {
    bench.activate(id)?;
    Ok(format!("active scale: {id}\n"))
}

fn render_slots(slots: &DisplaySlots) -> String {
    format!(
        "Total: {}\nDetail: {}\nRisk: {}\nInterpretation: {}\n",
        slots.total, slots.detail, slots.risk, slots.explanation
    )
}

fn render_json(result: &EvaluationResult) -> eyre::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn mode_name(mode: AnswerMode) -> &'static str {
    match mode {
        AnswerMode::SingleChoice => "single-choice",
        AnswerMode::MultiSelect => "multi-select",
    }
}
