// file: src/pipeline/stages.rs
// description: per-stage completion request construction from pipeline state
// reference: internal stage wiring

use crate::config::ModelRoster;
use crate::models::stage::Stage;
use crate::models::state::PipelineState;
use crate::prompts;
use crate::provider::CompletionRequest;

/// Build the provider request for one stage. Each arm reads exactly the
/// state fields that stage depends on; all of them come through defaulting
/// accessors, so an earlier failure shows up as empty input, not a crash.
pub fn build_request(
    stage: Stage,
    state: &PipelineState,
    spec_json: &str,
    models: &ModelRoster,
) -> CompletionRequest {
    let prompt = match stage {
        Stage::Planner => prompts::planner(spec_json),
        Stage::Creator => prompts::creator(spec_json, &state.blueprint_json()),
        Stage::Bugfix => prompts::bugfix(state.html().unwrap_or_default()),
        Stage::StudentInteraction => {
            prompts::student_interaction(spec_json, &state.blueprint_json())
        }
        Stage::IncorporateFeedback => prompts::incorporate_feedback(
            state.html().unwrap_or_default(),
            &state.feedback_text(),
        ),
        Stage::Review => prompts::review(state.html().unwrap_or_default()),
    };

    CompletionRequest {
        prompt,
        generation: models.for_stage(stage),
    }
}
