//! Plain Git source codec

use crate::codec::scm::common;
use crate::codec::tree::Element;
use crate::pipeline::scm::GitSource;

pub(crate) const GIT_SOURCE_CLASS: &str = "jenkins.plugins.git.GitSCMSource";
const BRANCH_DISCOVERY_TRAIT: &str = "jenkins.plugins.git.traits.BranchDiscoveryTrait";

/// Writes a Git source into the `source` element. A `None` source is a
/// no-op.
pub fn append_git_source_to_tree(element: &mut Element, source: Option<&GitSource>) {
    let Some(source) = source else { return };
    element.set_attribute("class", GIT_SOURCE_CLASS);
    element.set_attribute("plugin", "git");
    element.set_child_text("id", source.scm_id.as_str());
    element.set_child_text("remote", source.url.as_str());
    element.set_child_text("credentialsId", source.credential_id.as_str());

    let traits = element.get_or_create_child("traits");
    traits.remove_children(BRANCH_DISCOVERY_TRAIT);
    if source.discover_branches {
        traits.add_child(Element::new(BRANCH_DISCOVERY_TRAIT));
    }
    common::append_clone_option(traits, source.clone_option.as_ref());
    common::append_regex_filter(traits, source.regex_filter.as_deref());
    common::append_notification_gate(traits, source.accept_jenkins_notification);
}

/// Reads a Git source back. An absent element yields a zero-value source.
#[must_use]
pub fn get_git_source_from_tree(element: Option<&Element>) -> GitSource {
    let Some(element) = element else {
        tracing::warn!("Git source element is absent, returning an empty source");
        return GitSource::default();
    };

    let mut source = GitSource {
        scm_id: element.child_text("id").to_string(),
        url: element.child_text("remote").to_string(),
        credential_id: element.child_text("credentialsId").to_string(),
        ..GitSource::default()
    };
    let traits = element.child("traits");
    source.accept_jenkins_notification = traits.is_none_or(common::accepts_notifications);
    if let Some(traits) = traits {
        source.discover_branches = traits.child(BRANCH_DISCOVERY_TRAIT).is_some();
        source.clone_option = common::get_clone_option(traits);
        source.regex_filter = common::get_regex_filter(traits);
    }
    source
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipeline::scm::GitCloneOption;

    fn sample_source() -> GitSource {
        GitSource {
            scm_id: "git-1".to_string(),
            url: "https://example.com/widgets.git".to_string(),
            credential_id: "deploy-key".to_string(),
            discover_branches: true,
            clone_option: Some(GitCloneOption::new(true, 30, 2)),
            regex_filter: Some("release-.*".to_string()),
            accept_jenkins_notification: true,
        }
    }

    #[test]
    fn test_round_trip() {
        let source = sample_source();
        let mut element = Element::new("source");
        append_git_source_to_tree(&mut element, Some(&source));
        assert_eq!(element.attribute("class"), Some(GIT_SOURCE_CLASS));
        assert_eq!(get_git_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_skip_notifications_round_trip() {
        let mut source = sample_source();
        source.accept_jenkins_notification = false;
        let mut element = Element::new("source");
        append_git_source_to_tree(&mut element, Some(&source));
        let traits = element.child("traits").unwrap();
        assert!(
            traits
                .child("io.jenkins.plugins.skipnotifications.SkipNotificationsTrait")
                .is_some()
        );
        assert_eq!(get_git_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_none_source_is_no_op() {
        let mut element = Element::new("source");
        append_git_source_to_tree(&mut element, None);
        assert!(element.children.is_empty());
        assert!(element.attributes.is_empty());
    }

    #[test]
    fn test_absent_element_decodes_to_zero_value() {
        assert_eq!(get_git_source_from_tree(None), GitSource::default());
    }
}
