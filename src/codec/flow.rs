//! Flow-definition document codec
//!
//! Assembles and parses the `flow-definition` document of a single (no-SCM)
//! pipeline job. Create builds a fresh skeleton; update mutates an existing
//! document in place so unknown elements other tools added are preserved,
//! while elements whose domain counterpart went away are removed.

use crate::codec::params::{append_parameters_to_tree, get_parameters_from_tree};
use crate::codec::tree::{Document, Element, replace_xml_version};
use crate::codec::triggers::{append_pipeline_triggers, get_pipeline_triggers};
use crate::pipeline::errors::CodecError;
use crate::pipeline::options::{Discarder, RemoteBuildTrigger};
use crate::pipeline::pipeline_def::SinglePipeline;

const FLOW_DEFINITION: &str = "flow-definition";
const DISCARDER_PROPERTY: &str = "jenkins.model.BuildDiscarderProperty";
const LOG_ROTATOR_CLASS: &str = "hudson.tasks.LogRotator";
const DISABLE_CONCURRENT_PROPERTY: &str =
    "org.jenkinsci.plugins.workflow.job.properties.DisableConcurrentBuildsJobProperty";
const CPS_FLOW_DEFINITION_CLASS: &str = "org.jenkinsci.plugins.workflow.cps.CpsFlowDefinition";

/// Encodes a single pipeline into a fresh `flow-definition` document.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] when serialization fails.
pub fn encode_single_pipeline(pipeline: &SinglePipeline) -> Result<String, CodecError> {
    let mut root = single_pipeline_skeleton();
    apply_single_pipeline(&mut root, pipeline);
    Ok(replace_xml_version(
        &Document::new(root).to_xml()?,
        "1.0",
        "1.1",
    ))
}

/// Re-encodes a single pipeline over an existing document, preserving
/// elements this codec does not manage.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] for malformed input and
/// [`CodecError::MissingPipelineDefinition`] when the root element is not a
/// `flow-definition`.
pub fn update_single_pipeline(
    existing_xml: &str,
    pipeline: &SinglePipeline,
) -> Result<String, CodecError> {
    let mut document = Document::parse(&replace_xml_version(existing_xml, "1.1", "1.0"))?;
    if document.root.tag != FLOW_DEFINITION {
        return Err(CodecError::MissingPipelineDefinition);
    }
    apply_single_pipeline(&mut document.root, pipeline);
    Ok(replace_xml_version(&document.to_xml()?, "1.0", "1.1"))
}

/// Decodes a `flow-definition` document back into a single pipeline.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] for malformed input and
/// [`CodecError::MissingPipelineDefinition`] when the root element is not a
/// `flow-definition`.
pub fn decode_single_pipeline(xml: &str) -> Result<SinglePipeline, CodecError> {
    let document = Document::parse(&replace_xml_version(xml, "1.1", "1.0"))?;
    let root = &document.root;
    if root.tag != FLOW_DEFINITION {
        return Err(CodecError::MissingPipelineDefinition);
    }

    let mut pipeline = SinglePipeline {
        description: root.child_text("description").to_string(),
        disabled: root.child_text("disabled") == "true",
        ..SinglePipeline::default()
    };

    if let Some(properties) = root.child("properties") {
        if let Some(strategy) = properties
            .child(DISCARDER_PROPERTY)
            .and_then(|property| property.child("strategy"))
        {
            pipeline.discarder = Some(Discarder::new(
                strategy.child_text("daysToKeep"),
                strategy.child_text("numToKeep"),
            ));
        }
        pipeline.disable_concurrent = properties.child(DISABLE_CONCURRENT_PROPERTY).is_some();
        pipeline.parameters = get_parameters_from_tree(properties);
        let (timer, webhook) = get_pipeline_triggers(properties);
        pipeline.timer_trigger = timer;
        pipeline.generic_webhook_trigger = webhook;
    }

    if let Some(definition) = root.child("definition") {
        pipeline.script = definition.child_text("script").to_string();
    }

    if let Some(token) = root.child("authToken") {
        pipeline.remote_trigger = Some(RemoteBuildTrigger::new(token.text.clone()));
    }

    Ok(pipeline)
}

fn single_pipeline_skeleton() -> Element {
    let mut root = Element::new(FLOW_DEFINITION).with_attribute("plugin", "workflow-job");
    root.add_child(Element::new("actions"));
    root.add_child(Element::new("description"));
    root.add_text_child("keepDependencies", "false");
    root.add_child(Element::new("properties"));
    root.add_child(
        Element::new("definition")
            .with_attribute("class", CPS_FLOW_DEFINITION_CLASS)
            .with_attribute("plugin", "workflow-cps"),
    );
    root.add_child(Element::new("triggers"));
    root
}

fn apply_single_pipeline(root: &mut Element, pipeline: &SinglePipeline) {
    root.set_child_text("description", pipeline.description.as_str());

    let properties = root.get_or_create_child("properties");
    properties.remove_children(DISCARDER_PROPERTY);
    if let Some(discarder) = &pipeline.discarder {
        let strategy = properties
            .add_child(Element::new(DISCARDER_PROPERTY))
            .add_child(Element::new("strategy").with_attribute("class", LOG_ROTATOR_CLASS));
        strategy.add_text_child("daysToKeep", discarder.days_to_keep.as_str());
        strategy.add_text_child("numToKeep", discarder.num_to_keep.as_str());
        strategy.add_text_child("artifactDaysToKeep", "-1");
        strategy.add_text_child("artifactNumToKeep", "-1");
    }

    properties.remove_children(DISABLE_CONCURRENT_PROPERTY);
    if pipeline.disable_concurrent {
        properties.add_child(Element::new(DISABLE_CONCURRENT_PROPERTY));
    }

    append_parameters_to_tree(properties, &pipeline.parameters);
    append_pipeline_triggers(
        properties,
        pipeline.timer_trigger.as_ref(),
        pipeline.generic_webhook_trigger.as_ref(),
    );

    let definition = root.get_or_create_child("definition");
    definition.set_attribute("class", CPS_FLOW_DEFINITION_CLASS);
    definition.set_attribute("plugin", "workflow-cps");
    definition.set_child_text("script", pipeline.script.as_str());
    definition.set_child_text("sandbox", "true");

    root.remove_children("authToken");
    if let Some(remote) = &pipeline.remote_trigger {
        root.add_text_child("authToken", remote.token.as_str());
    }
    root.set_child_text(
        "disabled",
        if pipeline.disabled { "true" } else { "false" },
    );
}
