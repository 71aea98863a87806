//! Retention and trigger options
//!
//! This module defines the build-history discarder and the trigger value
//! objects carried by single and multi-branch pipelines.

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::types::Validate;

/// Build-history retention policy.
///
/// Both fields are free-text numeric strings; Jenkins accepts the empty
/// string as "unbounded", so no numeric parsing happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Discarder {
    /// Days to keep builds.
    #[serde(default)]
    pub days_to_keep: String,

    /// Number of builds to keep.
    #[serde(default)]
    pub num_to_keep: String,
}

impl Discarder {
    /// Creates a discarder from day and count strings.
    pub fn new(days_to_keep: impl Into<String>, num_to_keep: impl Into<String>) -> Self {
        Self {
            days_to_keep: days_to_keep.into(),
            num_to_keep: num_to_keep.into(),
        }
    }
}

/// Cron-based timer trigger for a single pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTrigger {
    /// Jenkins cron expression, e.g. `H/15 * * * *`.
    pub cron: String,
}

impl TimerTrigger {
    /// Creates a timer trigger from a cron expression.
    pub fn new(cron: impl Into<String>) -> Self {
        Self { cron: cron.into() }
    }
}

/// Interval-based scan trigger for a multi-branch pipeline.
///
/// The interval is stored in milliseconds; the codec maps it onto one of the
/// fixed Jenkins cron buckets when writing the periodic folder trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IntervalTrigger {
    /// Scan interval in milliseconds.
    pub interval_ms: u64,
}

impl IntervalTrigger {
    /// Creates an interval trigger from a millisecond interval.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }
}

/// Remote build trigger carrying an opaque authentication token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBuildTrigger {
    /// Opaque token accepted on the remote-build endpoint.
    pub token: String,
}

impl RemoteBuildTrigger {
    /// Creates a remote trigger from a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Generic webhook trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GenericWebhookTrigger {
    /// Token matched against the `token` request parameter.
    pub token: String,

    /// Cause string shown on triggered builds.
    #[serde(default)]
    pub cause: String,

    /// Log resolved variables on the build console.
    #[serde(default)]
    pub print_contributed_variables: bool,

    /// Log the raw post content on the build console.
    #[serde(default)]
    pub print_post_content: bool,

    /// Text the filter expression is applied to.
    #[serde(default)]
    pub regexp_filter_text: String,

    /// Filter expression deciding whether the webhook fires a build.
    #[serde(default)]
    pub regexp_filter_expression: String,
}

impl GenericWebhookTrigger {
    /// Creates a webhook trigger with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Sets the cause string.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = cause.into();
        self
    }

    /// Sets the regexp filter text and expression.
    #[must_use]
    pub fn with_filter(
        mut self,
        text: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.regexp_filter_text = text.into();
        self.regexp_filter_expression = expression.into();
        self
    }
}

impl Validate for GenericWebhookTrigger {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.token.is_empty() {
            return Err(ValidationError::EmptyWebhookToken);
        }
        Ok(())
    }
}

/// Trigger firing downstream jobs when branch jobs are created or deleted.
///
/// Either field may be absent independently; absent fields produce no XML
/// element at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MultiBranchJobTrigger {
    /// Jobs to trigger when a branch job is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_action_job_to_trigger: Option<String>,

    /// Jobs to trigger when a branch job is deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_action_job_to_trigger: Option<String>,
}

impl MultiBranchJobTrigger {
    /// Creates an empty trigger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the create-action job list.
    #[must_use]
    pub fn with_create_action(mut self, jobs: impl Into<String>) -> Self {
        self.create_action_job_to_trigger = Some(jobs.into());
        self
    }

    /// Sets the delete-action job list.
    #[must_use]
    pub fn with_delete_action(mut self, jobs: impl Into<String>) -> Self {
        self.delete_action_job_to_trigger = Some(jobs.into());
        self
    }
}
