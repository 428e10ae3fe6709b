// file: src/pipeline/blueprint.rs
// description: deterministic fallback blueprint when the planner stage fails
// reference: internal planning defaults

use crate::models::spec::ConceptSpec;
use serde_json::{Map, Value, json};

/// Build a usable blueprint from the concept spec alone. Used when the
/// planner invocation fails twice; derived purely from the spec so the
/// same input always yields the same plan.
pub fn default_blueprint(spec: &ConceptSpec) -> Map<String, Value> {
    let concept = spec.concept();
    let description = spec
        .description()
        .map(str::to_string)
        .unwrap_or_else(|| format!("A simple simulation about {}.", concept));

    let variables = default_variables(concept);

    let sliders: Vec<Value> = variables
        .iter()
        .filter_map(|variable| variable.get("name").and_then(Value::as_str))
        .map(|name| json!(format!("Slider to set {}", name)))
        .collect();

    let blueprint = json!({
        "learning_objectives": [
            format!("Understand what {} means.", concept),
            "See how changing one variable affects the outcome.",
            "Learn to record simple observations."
        ],
        "key_concepts": [
            concept,
            "cause and effect",
            "variables and observation"
        ],
        "variables_to_simulate": variables,
        "user_interactions": {
            "sliders": sliders,
            "buttons": ["Start simulation", "Reset to defaults"],
            "other": "Tap to pause or touch-drag small objects"
        },
        "simulation_logic": [
            "Step 1: Read current values of controls.",
            "Step 2: Update the visual area to reflect the new values.",
            "Step 3: If Start pressed, animate changes over time."
        ],
        "mobile_ui_plan": {
            "layout": "vertical single column",
            "sections": ["Header", "Instructions", "Simulation area", "Controls", "Questions"],
            "touch_targets": "minimum 44px"
        },
        "misconceptions_to_address": [
            "More of something always means faster change (not always true).",
            "If two materials look the same they behave the same (not always true)."
        ],
        "text_instructions_for_students": format!(
            "{} Use the sliders and Start button to explore.",
            truncate_chars(&description, 200)
        ),
        "file_target": "single_file_html",
        "safety_constraints": ["No real heat sources shown; keep examples conceptual."]
    });

    match blueprint {
        Value::Object(map) => map,
        _ => unreachable!("blueprint literal is an object"),
    }
}

/// Two sensible controls for most physical-science topics, switching to a
/// temperature pair when the concept mentions heat.
fn default_variables(concept: &str) -> Vec<Value> {
    let topic = concept.to_lowercase();

    if topic.contains("heat") || topic.contains("temperature") {
        vec![
            json!({"name": "Temperature", "min": 0, "max": 100, "default": 25, "unit": "°C"}),
            json!({"name": "Material", "min": 1, "max": 3, "default": 1, "unit": "choice"}),
        ]
    } else {
        vec![
            json!({"name": "Intensity", "min": 0, "max": 100, "default": 50, "unit": "%"}),
            json!({"name": "Time", "min": 1, "max": 60, "default": 10, "unit": "s"}),
        ]
    }
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
