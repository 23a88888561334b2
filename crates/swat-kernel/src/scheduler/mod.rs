//! Scheduling of command lines: pipelines run stage by stage.

mod pipeline;

pub use pipeline::PipelineRunner;
