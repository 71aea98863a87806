//! Trigger codec
//!
//! Each trigger kind is one element under its container; a trigger absent
//! from the domain object has its element removed, so re-encoding after
//! clearing a trigger is destructive and idempotent.

use crate::codec::cron::millis_to_crontab;
use crate::codec::tree::Element;
use crate::pipeline::options::{
    GenericWebhookTrigger, IntervalTrigger, MultiBranchJobTrigger, TimerTrigger,
};

const TRIGGERS_PROPERTY: &str =
    "org.jenkinsci.plugins.workflow.job.properties.PipelineTriggersJobProperty";
const TIMER_TRIGGER: &str = "hudson.triggers.TimerTrigger";
const GENERIC_TRIGGER: &str = "org.jenkinsci.plugins.gwt.GenericTrigger";
const PERIODIC_FOLDER_TRIGGER: &str =
    "com.cloudbees.hudson.plugins.folder.computed.PeriodicFolderTrigger";
const MULTIBRANCH_TRIGGER_PROPERTY: &str =
    "org.jenkinsci.plugins.workflow.multibranch.PipelineTriggerProperty";

/// Writes the `PipelineTriggersJobProperty` block of a single pipeline.
pub fn append_pipeline_triggers(
    properties: &mut Element,
    timer: Option<&TimerTrigger>,
    webhook: Option<&GenericWebhookTrigger>,
) {
    if timer.is_none() && webhook.is_none() {
        properties.remove_children(TRIGGERS_PROPERTY);
        return;
    }

    let triggers = properties
        .get_or_create_child(TRIGGERS_PROPERTY)
        .get_or_create_child("triggers");

    triggers.remove_children(TIMER_TRIGGER);
    if let Some(timer) = timer {
        triggers
            .add_child(Element::new(TIMER_TRIGGER))
            .add_text_child("spec", timer.cron.as_str());
    }

    triggers.remove_children(GENERIC_TRIGGER);
    if let Some(webhook) = webhook {
        append_generic_webhook(triggers, webhook);
    }
}

/// Reads the single-pipeline trigger block back.
#[must_use]
pub fn get_pipeline_triggers(
    properties: &Element,
) -> (Option<TimerTrigger>, Option<GenericWebhookTrigger>) {
    let Some(triggers) = properties
        .child(TRIGGERS_PROPERTY)
        .and_then(|property| property.child("triggers"))
    else {
        return (None, None);
    };

    let timer = triggers
        .child(TIMER_TRIGGER)
        .map(|trigger| TimerTrigger::new(trigger.child_text("spec")));
    let webhook = triggers.child(GENERIC_TRIGGER).map(parse_generic_webhook);
    (timer, webhook)
}

fn append_generic_webhook(triggers: &mut Element, webhook: &GenericWebhookTrigger) {
    let element = triggers.add_child(
        Element::new(GENERIC_TRIGGER).with_attribute("plugin", "generic-webhook-trigger"),
    );
    element.add_text_child("spec", "");
    element.add_text_child("regexpFilterText", webhook.regexp_filter_text.as_str());
    element.add_text_child(
        "regexpFilterExpression",
        webhook.regexp_filter_expression.as_str(),
    );
    element.add_text_child(
        "printPostContent",
        bool_text(webhook.print_post_content),
    );
    element.add_text_child(
        "printContributedVariables",
        bool_text(webhook.print_contributed_variables),
    );
    element.add_text_child("causeString", webhook.cause.as_str());
    element.add_text_child("token", webhook.token.as_str());
    element.add_text_child("silentResponse", "false");
}

fn parse_generic_webhook(element: &Element) -> GenericWebhookTrigger {
    GenericWebhookTrigger {
        token: element.child_text("token").to_string(),
        cause: element.child_text("causeString").to_string(),
        print_contributed_variables: element.child_text("printContributedVariables") == "true",
        print_post_content: element.child_text("printPostContent") == "true",
        regexp_filter_text: element.child_text("regexpFilterText").to_string(),
        regexp_filter_expression: element.child_text("regexpFilterExpression").to_string(),
    }
}

/// Writes the periodic scan trigger of a multi-branch project under the
/// root-level `triggers` element. The cron `spec` is derived from the
/// millisecond interval; the interval itself is kept alongside it.
pub fn append_scan_trigger(root: &mut Element, timer: Option<&IntervalTrigger>) {
    let triggers = root.get_or_create_child("triggers");
    triggers.remove_children(PERIODIC_FOLDER_TRIGGER);
    if let Some(timer) = timer {
        let element = triggers.add_child(
            Element::new(PERIODIC_FOLDER_TRIGGER).with_attribute("plugin", "cloudbees-folder"),
        );
        element.add_text_child("spec", millis_to_crontab(timer.interval_ms));
        element.add_text_child("interval", timer.interval_ms.to_string());
    }
}

/// Reads the periodic scan trigger back. An unparsable interval is recovered
/// as 0 rather than failing the document.
#[must_use]
pub fn get_scan_trigger(root: &Element) -> Option<IntervalTrigger> {
    let element = root.child("triggers")?.child(PERIODIC_FOLDER_TRIGGER)?;
    let text = element.child_text("interval");
    let interval_ms = text.parse().unwrap_or_else(|_| {
        tracing::warn!(interval = %text, "Unparsable scan interval, falling back to 0");
        0
    });
    Some(IntervalTrigger::new(interval_ms))
}

/// Writes the branch-job create/delete trigger property, replacing any
/// previous one. Absent fields produce no element.
pub fn append_multibranch_job_trigger(
    properties: &mut Element,
    trigger: Option<&MultiBranchJobTrigger>,
) {
    properties.remove_children(MULTIBRANCH_TRIGGER_PROPERTY);
    if let Some(trigger) = trigger {
        let element = properties.add_child(
            Element::new(MULTIBRANCH_TRIGGER_PROPERTY)
                .with_attribute("plugin", "multibranch-action-triggers"),
        );
        if let Some(create) = &trigger.create_action_job_to_trigger {
            element.add_text_child("createActionJobsToTrigger", create.as_str());
        }
        if let Some(delete) = &trigger.delete_action_job_to_trigger {
            element.add_text_child("deleteActionJobsToTrigger", delete.as_str());
        }
    }
}

/// Reads the branch-job trigger property back, reconstructing only the
/// fields actually present.
#[must_use]
pub fn get_multibranch_job_trigger(properties: &Element) -> Option<MultiBranchJobTrigger> {
    let element = properties.child(MULTIBRANCH_TRIGGER_PROPERTY)?;
    let mut trigger = MultiBranchJobTrigger::new();
    if let Some(create) = element.child("createActionJobsToTrigger") {
        trigger.create_action_job_to_trigger = Some(create.text.clone());
    }
    if let Some(delete) = element.child("deleteActionJobsToTrigger") {
        trigger.delete_action_job_to_trigger = Some(delete.text.clone());
    }
    Some(trigger)
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
