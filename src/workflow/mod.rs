pub mod lookup_flow;
pub mod submission_ctx;

pub use lookup_flow::{FlowOutcome, LookupFlow};
pub use submission_ctx::SubmissionCtx;
