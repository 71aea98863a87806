//! # Branchline - Jenkins job-configuration codec
//!
//! Branchline translates typed, provider-agnostic pipeline descriptions into
//! the XML job-configuration documents a Jenkins automation server
//! understands, and parses those documents back with round-trip fidelity, so
//! edit/save/reload cycles of a Kubernetes-native CI/CD controller never
//! lose or corrupt configuration.
//!
//! ## Quick Start
//!
//! ```
//! use branchline::{SinglePipeline, decode_single_pipeline, encode_single_pipeline};
//!
//! let pipeline = SinglePipeline::new("pipeline {\n  agent any\n}")
//!     .with_description("smoke build");
//! let xml = encode_single_pipeline(&pipeline).unwrap();
//! assert_eq!(decode_single_pipeline(&xml).unwrap(), pipeline);
//! ```
//!
//! ## Features
//!
//! - **Two document shapes**: `flow-definition` jobs with inline scripts, and
//!   `WorkflowMultiBranchProject` jobs discovering branches from an SCM source
//! - **Six SCM providers**: Git, GitHub, GitLab, Bitbucket Server, Subversion
//!   and single-location Subversion
//! - **Round-trip contract**: `decode(encode(p)) == p`, including unknown
//!   parameter classes which pass through verbatim
//! - **In-place update**: re-encoding over an existing document preserves
//!   elements added out-of-band and removes elements whose domain counterpart
//!   went away
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod codec;
pub mod infrastructure;
pub mod pipeline;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use codec::{
    BitbucketPrDiscoverTrust, GithubPrDiscoverTrust, PrDiscoverTrust, decode_multibranch_pipeline,
    decode_single_pipeline, encode_multibranch_pipeline, encode_single_pipeline,
    millis_to_crontab, update_multibranch_pipeline, update_single_pipeline,
};
pub use infrastructure::init_logging;
pub use pipeline::{
    BitbucketServerSource, CodecError, DiscoverPrFromForks, Discarder, GenericWebhookTrigger,
    GitCloneOption, GitSource, GithubSource, GitlabSource, IntervalTrigger, MultiBranchJobTrigger,
    MultiBranchPipeline, ParameterDefinition, ParameterKind, RemoteBuildTrigger, ScmSource,
    SingleSvnSource, SinglePipeline, SvnSource, TimerTrigger, Validate, ValidationError,
};

/// Version of the branchline crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
