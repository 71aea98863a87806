//! Prelude module for common imports

// Re-export all pipeline types with full paths
pub use crate::pipeline::errors::{CodecError, ValidationError};
pub use crate::pipeline::options::{
    Discarder, GenericWebhookTrigger, IntervalTrigger, MultiBranchJobTrigger, RemoteBuildTrigger,
    TimerTrigger,
};
pub use crate::pipeline::params::{ParameterDefinition, ParameterKind};
pub use crate::pipeline::pipeline_def::{MultiBranchPipeline, SinglePipeline};
pub use crate::pipeline::scm::{
    BitbucketServerSource, DiscoverPrFromForks, GitCloneOption, GitSource, GithubSource,
    GitlabSource, ScmSource, SingleSvnSource, SvnSource,
};
pub use crate::pipeline::types::Validate;

// Re-export codec entry points
pub use crate::codec::{
    decode_multibranch_pipeline, decode_single_pipeline, encode_multibranch_pipeline,
    encode_single_pipeline, update_multibranch_pipeline, update_single_pipeline,
};
