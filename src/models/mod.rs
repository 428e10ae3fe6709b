// file: src/models/mod.rs
// description: data model module exports
// reference: internal module organization

pub mod payload;
pub mod spec;
pub mod stage;
pub mod state;
pub mod verdict;

pub use payload::{ExpectedShape, ExtractedPayload, RawModelResponse, ResponsePart};
pub use spec::ConceptSpec;
pub use stage::{Stage, StageOutcome, StageResult};
pub use state::{PipelineState, RunStatus};
pub use verdict::{ApprovalPolicy, Verdict};
