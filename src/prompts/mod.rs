// file: src/prompts/mod.rs
// description: stage prompt templates for the simulation generation pipeline
// reference: internal prompt library

/// Substitute `{key}` placeholders in a template.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in values {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

const PLANNER_TEMPLATE: &str = r#"You are the Simulation Planner Agent.
Convert the learning topic into a complete simulation blueprint for a CBSE Class 7 student (moderate difficulty, mobile-first).

Input spec JSON:
{spec_json}

Instructions:
- Follow everything in the spec.
- Keep the plan focused on visuals: less text, more graphics.
- Make the simulation engaging and interactive.

Produce a JSON blueprint containing:
1. learning_objectives (3-5)
2. key_concepts
3. variables_to_simulate (max 4)
4. user_interactions (sliders, buttons, drag; assume the simplest HTML controls)
5. simulation_logic (step-by-step behaviour)
6. mobile_ui_plan (vertical layout)
7. misconceptions_to_address
8. text_instructions_for_students (simple English)
9. file_target: "single_file_html"
10. safety_constraints

CRITICAL: Output ONLY valid JSON with NO markdown code blocks, NO extra text, NO commentary.
"#;

const CREATOR_TEMPLATE: &str = r#"You are the HTML Simulation Generator Agent.

Original spec JSON:
{spec_json}

Blueprint:
{plan}

Task:
- Produce a COMPLETE, RUNNABLE single-file HTML document implementing the blueprint.
- Use inline styles and inline scripts for all functionality; no external resources or CDNs.
- Include the viewport meta tag: <meta name="viewport" content="width=device-width, initial-scale=1.0">
- Keep all text at a 7th-grade reading level.
- Implement actual visuals and interactions (SVG graphics, color changes, animations); no placeholders.
- For each variable, create a working control (slider or button) with immediate visual feedback.
- Ensure touch targets are at least 44px.

CRITICAL OUTPUT FORMAT:
- Output the raw HTML document, starting with <!DOCTYPE html>.
- NO markdown code blocks, NO commentary, do NOT echo the spec or blueprint.
"#;

const BUGFIX_TEMPLATE: &str = r#"You are the Bug-Fix Agent.

Input HTML content:
{html}

Task:
- Fix structural HTML errors and broken element references.
- Add the viewport meta tag if it is absent.
- Fix mobile-responsiveness problems (fixed large widths, horizontal overflow).
- Fix JavaScript syntax errors.
- Ensure touch targets are at least 44px.
- Keep the file self-contained (no external resources).

CRITICAL OUTPUT FORMAT:
You MUST output in this EXACT format:

{
  "fixed": true,
  "index.html": "<!DOCTYPE html>...",
  "explanations": ["fix 1", "fix 2"]
}

- Output ONLY valid JSON, NO markdown code blocks, NO commentary.
- The entire corrected HTML document must be in the "index.html" property.
"#;

const STUDENT_INTERACTION_TEMPLATE: &str = r#"You are the Student Interaction Agent for CBSE Class 7.

Original spec JSON:
{spec_json}

Blueprint:
{plan}

Produce JSON with student questions and guidance.

CRITICAL OUTPUT FORMAT:
{
  "intro": "2-3 line friendly intro",
  "questions": [
    {
      "question": "...",
      "type": "mcq",
      "options": ["A) ...", "B) ...", "C) ...", "D) ..."],
      "hint": "...",
      "correct_index": 0
    }
  ],
  "followups": ["suggestion 1", "suggestion 2"],
  "summary": "Short learning summary"
}

Requirements:
- Tone: encouraging and age-appropriate, 7th-grade reading level.
- Do NOT reveal correct answers in the question text.
- Output ONLY valid JSON, NO markdown blocks, NO commentary.
"#;

const INCORPORATE_FEEDBACK_TEMPLATE: &str = r#"You are the Simulation Improvement Agent.

Input HTML:
{html}

Feedback:
{feedback_text}

Task:
Apply improvements based on the feedback while keeping the file self-contained and mobile-first.

CRITICAL OUTPUT FORMAT:
{
  "index.html": "<!DOCTYPE html>...",
  "changes_made": ["change 1", "change 2"]
}

- Output ONLY valid JSON, NO markdown code blocks, NO commentary.
"#;

const REVIEW_TEMPLATE: &str = r#"You are the Review Agent for CBSE Class 7 simulations.

Input HTML:
{html}

Evaluate on these criteria (0-5 scale):
1. Pedagogical clarity
2. Conceptual correctness
3. Mobile responsiveness
4. Interactivity quality
5. Code reliability
6. Safety and age appropriateness

CRITICAL OUTPUT FORMAT:
{
  "scores": {
    "pedagogical_clarity": 0,
    "conceptual_correctness": 0,
    "mobile_responsiveness": 0,
    "interactivity_quality": 0,
    "code_reliability": 0,
    "safety_age_appropriateness": 0
  },
  "pass": true,
  "required_changes": ["change 1", "change 2"]
}

Pass criteria: all scores >= 3 and average >= 4.

- Output ONLY valid JSON, NO markdown code blocks, NO commentary.
"#;

pub fn planner(spec_json: &str) -> String {
    render(PLANNER_TEMPLATE, &[("spec_json", spec_json)])
}

pub fn creator(spec_json: &str, plan: &str) -> String {
    render(CREATOR_TEMPLATE, &[("spec_json", spec_json), ("plan", plan)])
}

pub fn bugfix(html: &str) -> String {
    render(BUGFIX_TEMPLATE, &[("html", html)])
}

pub fn student_interaction(spec_json: &str, plan: &str) -> String {
    render(
        STUDENT_INTERACTION_TEMPLATE,
        &[("spec_json", spec_json), ("plan", plan)],
    )
}

pub fn incorporate_feedback(html: &str, feedback_text: &str) -> String {
    render(
        INCORPORATE_FEEDBACK_TEMPLATE,
        &[("html", html), ("feedback_text", feedback_text)],
    )
}

pub fn review(html: &str) -> String {
    render(REVIEW_TEMPLATE, &[("html", html)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_substituted() {
        let prompt = planner("{\"Concept\": \"Heat\"}");
        assert!(prompt.contains("\"Concept\": \"Heat\""));
        assert!(!prompt.contains("{spec_json}"));
    }

    #[test]
    fn test_creator_receives_both_inputs() {
        let prompt = creator("SPEC-MARKER", "PLAN-MARKER");
        assert!(prompt.contains("SPEC-MARKER"));
        assert!(prompt.contains("PLAN-MARKER"));
    }

    #[test]
    fn test_feedback_prompt() {
        let prompt = incorporate_feedback("<html></html>", "make the slider bigger");
        assert!(prompt.contains("<html></html>"));
        assert!(prompt.contains("make the slider bigger"));
        assert!(!prompt.contains("{feedback_text}"));
    }

    #[test]
    fn test_literal_braces_survive_rendering() {
        // the JSON format examples inside templates are not placeholders
        // and must come through intact
        let prompt = review("<html></html>");
        assert!(prompt.contains("\"pass\": true"));
        assert!(!prompt.contains("{html}"));
    }
}
