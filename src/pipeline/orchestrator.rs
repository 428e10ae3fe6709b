// file: src/pipeline/orchestrator.rs
// description: sequences the generation stages with per-stage fallback and persistence
// reference: orchestrates the simulation generation workflow

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::error::Result;
use crate::extractor::ResponseExtractor;
use crate::html::{check_minimum_requirements, enforce_minimum_requirements};
use crate::models::payload::ExtractedPayload;
use crate::models::spec::ConceptSpec;
use crate::models::stage::{Stage, StageOutcome, StageResult};
use crate::models::state::{PipelineState, RunStatus};
use crate::models::verdict::{ApprovalPolicy, Verdict};
use crate::pipeline::blueprint::default_blueprint;
use crate::pipeline::progress::{RunProgress, RunStats};
use crate::pipeline::stages;
use crate::provider::CompletionProvider;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Everything a finished run hands back to the caller. The run directory
/// holds an artifact for every stage regardless of how the run went.
#[derive(Debug)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub approved: bool,
    pub html: String,
    pub verdict: Option<Verdict>,
    pub run_dir: PathBuf,
    pub stats: RunStats,
}

/// Drives the fixed stage sequence over one concept spec. Strictly
/// sequential: a stage starts only after the previous stage's artifact is
/// on disk. Failures after spec loading degrade the run instead of
/// aborting it, so a partial artifact set is always available.
pub struct PipelineOrchestrator<P> {
    config: Config,
    provider: P,
    extractor: ResponseExtractor,
    policy: ApprovalPolicy,
    colored_progress: bool,
}

impl<P: CompletionProvider> PipelineOrchestrator<P> {
    pub fn new(config: Config, provider: P) -> Self {
        let extractor = ResponseExtractor::new(config.pipeline.snippet_limit);
        let policy = ApprovalPolicy::new(config.review.score_floor, config.review.mean_floor);

        Self {
            config,
            provider,
            extractor,
            policy,
            colored_progress: true,
        }
    }

    /// Replace the approval rule. The rule is a pure function over the
    /// verdict scores and never touches the network.
    pub fn with_policy(mut self, policy: ApprovalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress_color(mut self, colored: bool) -> Self {
        self.colored_progress = colored;
        self
    }

    pub async fn run(&self, spec_path: &Path) -> Result<RunOutcome> {
        let spec = ConceptSpec::load(spec_path)?;
        self.run_spec(spec).await
    }

    pub async fn run_spec(&self, spec: ConceptSpec) -> Result<RunOutcome> {
        let concept = spec.concept().to_string();
        let spec_json = spec.to_pretty_json();

        info!("starting generation run for concept: {}", concept);

        let mut store = ArtifactStore::create(&self.config.output.root, &concept)?;
        if self.config.pipeline.save_intermediates {
            store.save_named("spec.json", &spec_json)?;
        }

        let mut state = PipelineState::new(&concept);
        state.iteration = 1;

        let progress = RunProgress::new(self.colored_progress);

        for stage in Stage::SEQUENCE {
            progress.stage_started(stage);

            let result = match stage {
                Stage::Planner => {
                    self.run_planner(&spec, &spec_json, &mut state, &mut store, &progress)
                        .await
                }
                _ => {
                    self.run_best_effort(stage, &spec_json, &mut state, &mut store, &progress)
                        .await
                }
            };

            match &result.outcome {
                StageOutcome::Success(_) => progress.stage_completed(stage),
                StageOutcome::Failure(reason) => {
                    warn!("stage {} failed, continuing: {}", stage, reason);
                    progress.stage_failed(stage);
                }
            }
        }

        let verdict = state.payload(Stage::Review).and_then(Verdict::from_payload);
        let approved = verdict
            .as_ref()
            .map(|v| self.policy.evaluate(&v.scores))
            .unwrap_or(false);
        state.approved = approved;

        let final_html = enforce_minimum_requirements(state.html().unwrap_or_default());
        store.save_named("final_output.html", &final_html)?;

        let verdict_record = json!({
            "approved": approved,
            "verdict": &verdict,
        });
        store.save_named(
            "review_verdict.json",
            &serde_json::to_string_pretty(&verdict_record)?,
        )?;

        store.write_manifest(&concept, approved, state.iteration, &final_html)?;

        progress.finish();
        let stats = progress.stats();
        self.log_summary(&stats, verdict.as_ref(), approved, &final_html);

        Ok(RunOutcome {
            status: RunStatus::Completed { approved },
            approved,
            html: final_html,
            verdict,
            run_dir: store.run_dir().to_path_buf(),
            stats,
        })
    }

    /// Planning is the one stage that must always yield a payload: one
    /// retry of the identical invocation, then a deterministic blueprint
    /// derived from the spec.
    async fn run_planner(
        &self,
        spec: &ConceptSpec,
        spec_json: &str,
        state: &mut PipelineState,
        store: &mut ArtifactStore,
        progress: &RunProgress,
    ) -> StageResult {
        let stage = Stage::Planner;

        let first_error = match self
            .attempt(stage, state, spec_json, store, "raw_response", progress)
            .await
        {
            Ok(payload) => {
                self.save_intermediate_json(store, stage, "blueprint", &payload.to_value());
                state.record(stage, payload.clone());
                info!("blueprint created");
                return StageResult::success(stage, payload);
            }
            Err(err) => err,
        };

        warn!("planner failed, retrying once: {}", first_error);
        self.save_intermediate_text(store, stage, "error", "txt", &first_error.to_string());

        match self
            .attempt(stage, state, spec_json, store, "retry_raw_response", progress)
            .await
        {
            Ok(payload) => {
                self.save_intermediate_json(store, stage, "blueprint", &payload.to_value());
                state.record(stage, payload.clone());
                info!("blueprint created after retry");
                StageResult::success(stage, payload)
            }
            Err(retry_error) => {
                warn!(
                    "planner retry failed, using fallback blueprint: {}",
                    retry_error
                );
                self.save_intermediate_text(
                    store,
                    stage,
                    "retry_error",
                    "txt",
                    &retry_error.to_string(),
                );

                let blueprint = default_blueprint(spec);
                self.save_intermediate_json(
                    store,
                    stage,
                    "blueprint_fallback",
                    &Value::Object(blueprint.clone()),
                );

                let payload = ExtractedPayload::Structured(blueprint);
                state.record(stage, payload.clone());
                progress.planner_defaulted();
                StageResult::success(stage, payload)
            }
        }
    }

    /// Everything after planning degrades on failure: log it, persist the
    /// error as the stage artifact, keep the previous state, move on.
    async fn run_best_effort(
        &self,
        stage: Stage,
        spec_json: &str,
        state: &mut PipelineState,
        store: &mut ArtifactStore,
        progress: &RunProgress,
    ) -> StageResult {
        match self
            .attempt(stage, state, spec_json, store, "raw_response", progress)
            .await
        {
            Ok(payload) => {
                let payload = self.post_process(stage, payload, state);
                self.persist_stage_output(store, stage, &payload);
                state.record(stage, payload.clone());
                StageResult::success(stage, payload)
            }
            Err(err) => {
                self.save_intermediate_text(store, stage, "error", "txt", &err.to_string());
                StageResult::failure(stage, err.to_string())
            }
        }
    }

    async fn attempt(
        &self,
        stage: Stage,
        state: &PipelineState,
        spec_json: &str,
        store: &mut ArtifactStore,
        raw_role: &str,
        progress: &RunProgress,
    ) -> Result<ExtractedPayload> {
        let request = stages::build_request(stage, state, spec_json, &self.config.models);

        progress.provider_call();
        let raw = self.provider.invoke(&request).await?;

        self.save_intermediate_text(store, stage, raw_role, "txt", &raw.flatten());

        let payload = self.extractor.extract(&raw, stage.expected())?;
        Ok(payload)
    }

    /// The bug-fix stage folds its answer back into a repaired document so
    /// later stages review what would actually ship.
    fn post_process(
        &self,
        stage: Stage,
        payload: ExtractedPayload,
        state: &PipelineState,
    ) -> ExtractedPayload {
        if stage == Stage::Creator {
            if let Some(html) = payload
                .as_document()
                .or_else(|| payload.str_field("index.html"))
            {
                for issue in check_minimum_requirements(html) {
                    warn!("creator output issue: {}", issue);
                }
            }
            return payload;
        }

        if stage != Stage::Bugfix {
            return payload;
        }

        if let Some(explanations) = payload
            .as_structured()
            .and_then(|map| map.get("explanations"))
            .and_then(Value::as_array)
        {
            for explanation in explanations.iter().take(3) {
                if let Some(text) = explanation.as_str() {
                    info!("bugfix: {}", text);
                }
            }
        }

        let repaired = payload
            .as_document()
            .or_else(|| payload.str_field("index.html"))
            .or_else(|| state.html())
            .unwrap_or_default();

        ExtractedPayload::Document(enforce_minimum_requirements(repaired))
    }

    fn persist_stage_output(
        &self,
        store: &mut ArtifactStore,
        stage: Stage,
        payload: &ExtractedPayload,
    ) {
        match stage {
            Stage::Creator | Stage::Bugfix | Stage::IncorporateFeedback => {
                let html = payload
                    .as_document()
                    .or_else(|| payload.str_field("index.html"));
                match html {
                    Some(html) => self.save_intermediate_text(store, stage, "output", "html", html),
                    None => self.save_intermediate_json(store, stage, "output", &payload.to_value()),
                }
            }
            _ => self.save_intermediate_json(store, stage, "output", &payload.to_value()),
        }
    }

    fn save_intermediate_text(
        &self,
        store: &mut ArtifactStore,
        stage: Stage,
        role: &str,
        ext: &str,
        content: &str,
    ) {
        if !self.config.pipeline.save_intermediates {
            return;
        }
        if let Err(err) = store.save_stage_text(stage, role, ext, content) {
            error!("failed to persist {} artifact for {}: {}", role, stage, err);
        }
    }

    fn save_intermediate_json(
        &self,
        store: &mut ArtifactStore,
        stage: Stage,
        role: &str,
        value: &Value,
    ) {
        if !self.config.pipeline.save_intermediates {
            return;
        }
        if let Err(err) = store.save_stage_json(stage, role, value) {
            error!("failed to persist {} artifact for {}: {}", role, stage, err);
        }
    }

    fn log_summary(
        &self,
        stats: &RunStats,
        verdict: Option<&Verdict>,
        approved: bool,
        final_html: &str,
    ) {
        info!("=== Generation Run Summary ===");
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Stages run: {}", stats.stages_run);
        info!("Stages failed: {}", stats.stages_failed);
        info!("Stage success rate: {:.0}%", stats.success_rate());
        info!("Provider calls: {}", stats.provider_calls);
        if stats.planner_defaulted {
            info!("Planner used the fallback blueprint");
        }

        if let Some(verdict) = verdict {
            info!("Review scores:");
            for (criterion, score) in &verdict.scores {
                info!("  {}: {}/5", criterion, score);
            }
            info!("Mean score: {:.2}/5.0", verdict.mean_score());
            for change in verdict.required_changes.iter().take(5) {
                info!("Required change: {}", change);
            }
        } else {
            warn!("No review verdict was produced");
        }

        info!("Approved: {}", approved);
        info!("Final HTML size: {} bytes", final_html.len());

        let issues = check_minimum_requirements(final_html);
        if issues.is_empty() {
            info!("All minimum HTML requirements satisfied");
        } else {
            for issue in &issues {
                warn!("Remaining issue: {}", issue);
            }
        }
        info!("==============================");
    }
}
