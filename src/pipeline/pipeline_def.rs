//! Pipeline definitions and builders

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::options::{
    Discarder, GenericWebhookTrigger, IntervalTrigger, MultiBranchJobTrigger, RemoteBuildTrigger,
    TimerTrigger,
};
use super::params::ParameterDefinition;
use super::scm::ScmSource;
use super::types::Validate;

/// A single (no-SCM) pipeline job backed by an inline script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SinglePipeline {
    /// Job description.
    #[serde(default)]
    pub description: String,

    /// Raw pipeline script.
    pub script: String,

    /// Disallow concurrent builds of this job.
    #[serde(default)]
    pub disable_concurrent: bool,

    /// Build-history retention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discarder: Option<Discarder>,

    /// Ordered build parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDefinition>,

    /// Cron timer trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_trigger: Option<TimerTrigger>,

    /// Generic webhook trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_webhook_trigger: Option<GenericWebhookTrigger>,

    /// Remote build trigger token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_trigger: Option<RemoteBuildTrigger>,

    /// Job is disabled.
    #[serde(default)]
    pub disabled: bool,
}

impl SinglePipeline {
    /// Creates a pipeline from a script.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Disallows concurrent builds.
    #[must_use]
    pub fn with_disable_concurrent(mut self, disable: bool) -> Self {
        self.disable_concurrent = disable;
        self
    }

    /// Sets the discarder.
    #[must_use]
    pub fn with_discarder(mut self, discarder: Discarder) -> Self {
        self.discarder = Some(discarder);
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the timer trigger.
    #[must_use]
    pub fn with_timer_trigger(mut self, trigger: TimerTrigger) -> Self {
        self.timer_trigger = Some(trigger);
        self
    }

    /// Sets the generic webhook trigger.
    #[must_use]
    pub fn with_webhook_trigger(mut self, trigger: GenericWebhookTrigger) -> Self {
        self.generic_webhook_trigger = Some(trigger);
        self
    }

    /// Sets the remote build trigger.
    #[must_use]
    pub fn with_remote_trigger(mut self, trigger: RemoteBuildTrigger) -> Self {
        self.remote_trigger = Some(trigger);
        self
    }
}

impl Validate for SinglePipeline {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.script.is_empty() {
            return Err(ValidationError::EmptyScript);
        }
        for parameter in &self.parameters {
            parameter.validate()?;
        }
        if let Some(webhook) = &self.generic_webhook_trigger {
            webhook.validate()?;
        }
        Ok(())
    }
}

/// A multi-branch pipeline whose branches are discovered from an SCM source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiBranchPipeline {
    /// Job description.
    #[serde(default)]
    pub description: String,

    /// Path of the pipeline script inside each discovered branch.
    pub script_path: String,

    /// The one SCM source of this pipeline.
    pub source: ScmSource,

    /// Retention for orphaned branch jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discarder: Option<Discarder>,

    /// Periodic scan trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_trigger: Option<IntervalTrigger>,

    /// Branch-job create/delete trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multibranch_job_trigger: Option<MultiBranchJobTrigger>,
}

impl MultiBranchPipeline {
    /// Creates a multi-branch pipeline over the given source with the
    /// conventional `Jenkinsfile` script path.
    #[must_use]
    pub fn new(source: ScmSource) -> Self {
        Self {
            description: String::new(),
            script_path: "Jenkinsfile".to_string(),
            source,
            discarder: None,
            timer_trigger: None,
            multibranch_job_trigger: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the script path.
    #[must_use]
    pub fn with_script_path(mut self, path: impl Into<String>) -> Self {
        self.script_path = path.into();
        self
    }

    /// Sets the orphaned-item discarder.
    #[must_use]
    pub fn with_discarder(mut self, discarder: Discarder) -> Self {
        self.discarder = Some(discarder);
        self
    }

    /// Sets the periodic scan trigger.
    #[must_use]
    pub fn with_timer_trigger(mut self, trigger: IntervalTrigger) -> Self {
        self.timer_trigger = Some(trigger);
        self
    }

    /// Sets the branch-job create/delete trigger.
    #[must_use]
    pub fn with_job_trigger(mut self, trigger: MultiBranchJobTrigger) -> Self {
        self.multibranch_job_trigger = Some(trigger);
        self
    }
}

impl Validate for MultiBranchPipeline {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.script_path.is_empty() {
            return Err(ValidationError::EmptyScriptPath);
        }
        self.source.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::scm::GitSource;

    #[test]
    fn test_single_pipeline_builder() {
        let pipeline = SinglePipeline::new("echo hello")
            .with_description("smoke job")
            .with_disable_concurrent(true)
            .with_discarder(Discarder::new("7", "10"))
            .with_timer_trigger(TimerTrigger::new("H/15 * * * *"));
        assert_eq!(pipeline.description, "smoke job");
        assert!(pipeline.disable_concurrent);
        assert!(pipeline.validate().is_ok());
    }

    #[test]
    fn test_single_pipeline_empty_script_invalid() {
        let pipeline = SinglePipeline::new("");
        assert_eq!(pipeline.validate(), Err(ValidationError::EmptyScript));
    }

    #[test]
    fn test_multibranch_default_script_path() {
        let pipeline = MultiBranchPipeline::new(ScmSource::Git(GitSource {
            url: "https://example.com/repo.git".to_string(),
            ..GitSource::default()
        }));
        assert_eq!(pipeline.script_path, "Jenkinsfile");
        assert!(pipeline.validate().is_ok());
    }

    #[test]
    fn test_multibranch_empty_script_path_invalid() {
        let pipeline = MultiBranchPipeline::new(ScmSource::Git(GitSource::default()))
            .with_script_path("");
        assert_eq!(pipeline.validate(), Err(ValidationError::EmptyScriptPath));
    }
}
