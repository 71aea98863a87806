//! Pipeline domain types
//!
//! Immutable value objects describing single and multi-branch pipelines.
//! The codec in [`crate::codec`] translates these to and from Jenkins job
//! configuration XML; nothing in this module touches XML itself.

pub mod errors;
pub mod options;
pub mod params;
pub mod pipeline_def;
pub mod scm;
pub mod types;

pub use errors::{CodecError, ValidationError};
pub use options::{
    Discarder, GenericWebhookTrigger, IntervalTrigger, MultiBranchJobTrigger, RemoteBuildTrigger,
    TimerTrigger,
};
pub use params::{ParameterDefinition, ParameterKind};
pub use pipeline_def::{MultiBranchPipeline, SinglePipeline};
pub use scm::{
    BitbucketServerSource, DiscoverPrFromForks, GitCloneOption, GitSource, GithubSource,
    GitlabSource, ScmSource, SingleSvnSource, SvnSource,
};
pub use types::Validate;
