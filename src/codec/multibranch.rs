//! Multi-branch project document codec
//!
//! Assembles and parses the `WorkflowMultiBranchProject` document. The
//! folder-view/health-metric/icon sub-trees are fixed boilerplate Jenkins
//! requires but never reads back into the domain model.

use crate::codec::scm::{append_source_to_tree, get_source_from_tree};
use crate::codec::tree::{Document, Element, replace_xml_version};
use crate::codec::triggers::{
    append_multibranch_job_trigger, append_scan_trigger, get_multibranch_job_trigger,
    get_scan_trigger,
};
use crate::pipeline::errors::CodecError;
use crate::pipeline::options::Discarder;
use crate::pipeline::pipeline_def::MultiBranchPipeline;

const MULTIBRANCH_PROJECT: &str =
    "org.jenkinsci.plugins.workflow.multibranch.WorkflowMultiBranchProject";
const ORPHANED_ITEM_STRATEGY_CLASS: &str =
    "com.cloudbees.hudson.plugins.folder.computed.DefaultOrphanedItemStrategy";
const BRANCH_SOURCE: &str = "jenkins.branch.BranchSource";
const BRANCH_SOURCE_LIST_CLASS: &str = "jenkins.branch.MultiBranchProject$BranchSourceList";
const BRANCH_PROPERTY_STRATEGY_CLASS: &str = "jenkins.branch.DefaultBranchPropertyStrategy";
const FACTORY_CLASS: &str =
    "org.jenkinsci.plugins.workflow.multibranch.WorkflowBranchProjectFactory";

/// Encodes a multi-branch pipeline into a fresh project document.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] when serialization fails.
pub fn encode_multibranch_pipeline(pipeline: &MultiBranchPipeline) -> Result<String, CodecError> {
    let mut root = multibranch_skeleton();
    apply_multibranch_pipeline(&mut root, pipeline);
    Ok(replace_xml_version(
        &Document::new(root).to_xml()?,
        "1.0",
        "1.1",
    ))
}

/// Re-encodes a multi-branch pipeline over an existing document, preserving
/// elements this codec does not manage.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] for malformed input and
/// [`CodecError::MissingMultiBranchProject`] when the root element is not a
/// multi-branch project.
pub fn update_multibranch_pipeline(
    existing_xml: &str,
    pipeline: &MultiBranchPipeline,
) -> Result<String, CodecError> {
    let mut document = Document::parse(&replace_xml_version(existing_xml, "1.1", "1.0"))?;
    if document.root.tag != MULTIBRANCH_PROJECT {
        return Err(CodecError::MissingMultiBranchProject);
    }
    apply_multibranch_pipeline(&mut document.root, pipeline);
    Ok(replace_xml_version(&document.to_xml()?, "1.0", "1.1"))
}

/// Decodes a multi-branch project document back into the domain object.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] for malformed input,
/// [`CodecError::MissingMultiBranchProject`] when the root element is not a
/// multi-branch project, [`CodecError::MissingElement`] when the branch
/// source sub-tree is absent, and [`CodecError::UnsupportedSourceClass`]
/// when the embedded source class matches no known provider.
pub fn decode_multibranch_pipeline(xml: &str) -> Result<MultiBranchPipeline, CodecError> {
    let document = Document::parse(&replace_xml_version(xml, "1.1", "1.0"))?;
    let root = &document.root;
    if root.tag != MULTIBRANCH_PROJECT {
        return Err(CodecError::MissingMultiBranchProject);
    }

    let source_element = root
        .child("sources")
        .and_then(|sources| sources.child("data"))
        .and_then(|data| data.child(BRANCH_SOURCE))
        .and_then(|branch_source| branch_source.child("source"))
        .ok_or_else(|| CodecError::MissingElement {
            element: format!("sources/data/{BRANCH_SOURCE}/source"),
        })?;
    let source = get_source_from_tree(source_element)?;

    let discarder = root.child("orphanedItemStrategy").and_then(|strategy| {
        let days = strategy.child_text("daysToKeep");
        let num = strategy.child_text("numToKeep");
        if days == "-1" && num == "-1" {
            None
        } else {
            Some(Discarder::new(days, num))
        }
    });

    let script_path = root
        .child("factory")
        .map_or_else(String::new, |factory| {
            factory.child_text("scriptPath").to_string()
        });

    Ok(MultiBranchPipeline {
        description: root.child_text("description").to_string(),
        script_path,
        source,
        discarder,
        timer_trigger: get_scan_trigger(root),
        multibranch_job_trigger: root
            .child("properties")
            .and_then(get_multibranch_job_trigger),
    })
}

fn owner_reference() -> Element {
    Element::new("owner")
        .with_attribute("class", MULTIBRANCH_PROJECT)
        .with_attribute("reference", "../..")
}

fn multibranch_skeleton() -> Element {
    let mut root = Element::new(MULTIBRANCH_PROJECT).with_attribute("plugin", "workflow-multibranch");
    root.add_child(Element::new("actions"));
    root.add_child(Element::new("description"));
    root.add_child(Element::new("properties"));

    root.add_child(
        Element::new("folderViews")
            .with_attribute("class", "jenkins.branch.MultiBranchProjectViewHolder")
            .with_attribute("plugin", "branch-api"),
    )
    .add_child(owner_reference());

    root.add_child(Element::new("healthMetrics"))
        .add_child(
            Element::new("com.cloudbees.hudson.plugins.folder.health.WorstChildHealthMetric")
                .with_attribute("plugin", "cloudbees-folder"),
        )
        .add_text_child("nonRecursive", "false");

    root.add_child(
        Element::new("icon")
            .with_attribute("class", "jenkins.branch.MetadataActionFolderIcon")
            .with_attribute("plugin", "branch-api"),
    )
    .add_child(owner_reference());

    root.add_child(
        Element::new("orphanedItemStrategy")
            .with_attribute("class", ORPHANED_ITEM_STRATEGY_CLASS)
            .with_attribute("plugin", "cloudbees-folder"),
    );

    root.add_child(Element::new("triggers"));
    root.add_text_child("disabled", "false");

    let sources = root.add_child(
        Element::new("sources")
            .with_attribute("class", BRANCH_SOURCE_LIST_CLASS)
            .with_attribute("plugin", "branch-api"),
    );
    sources.add_child(Element::new("data"));
    sources.add_child(owner_reference());

    let factory = root.add_child(Element::new("factory").with_attribute("class", FACTORY_CLASS));
    factory.add_child(owner_reference());

    root
}

fn apply_multibranch_pipeline(root: &mut Element, pipeline: &MultiBranchPipeline) {
    root.set_child_text("description", pipeline.description.as_str());

    let properties = root.get_or_create_child("properties");
    append_multibranch_job_trigger(properties, pipeline.multibranch_job_trigger.as_ref());

    let strategy = root.get_or_create_child("orphanedItemStrategy");
    strategy.set_attribute("class", ORPHANED_ITEM_STRATEGY_CLASS);
    strategy.set_attribute("plugin", "cloudbees-folder");
    strategy.set_child_text("pruneDeadBranches", "true");
    match &pipeline.discarder {
        Some(discarder) => {
            strategy.set_child_text("daysToKeep", discarder.days_to_keep.as_str());
            strategy.set_child_text("numToKeep", discarder.num_to_keep.as_str());
        }
        None => {
            strategy.set_child_text("daysToKeep", "-1");
            strategy.set_child_text("numToKeep", "-1");
        }
    }

    append_scan_trigger(root, pipeline.timer_trigger.as_ref());

    let sources = root.get_or_create_child("sources");
    sources.set_attribute("class", BRANCH_SOURCE_LIST_CLASS);
    sources.set_attribute("plugin", "branch-api");
    sources.remove_children("data");
    let branch_source = sources
        .add_child(Element::new("data"))
        .add_child(Element::new(BRANCH_SOURCE));
    let source_element = branch_source.add_child(Element::new("source"));
    append_source_to_tree(source_element, &pipeline.source);
    branch_source
        .add_child(
            Element::new("strategy").with_attribute("class", BRANCH_PROPERTY_STRATEGY_CLASS),
        )
        .add_child(Element::new("properties").with_attribute("class", "empty-list"));

    let factory = root.get_or_create_child("factory");
    factory.set_attribute("class", FACTORY_CLASS);
    factory.set_child_text("scriptPath", pipeline.script_path.as_str());
}
