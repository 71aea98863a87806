//! GitLab source codec

use crate::codec::enums::PrDiscoverTrust;
use crate::codec::scm::common;
use crate::codec::tree::Element;
use crate::pipeline::scm::{DiscoverPrFromForks, GitlabSource};

pub(crate) const GITLAB_SOURCE_CLASS: &str =
    "io.jenkins.plugins.gitlabbranchsource.GitLabSCMSource";
const BRANCH_DISCOVERY_TRAIT: &str = "io.jenkins.plugins.gitlabbranchsource.BranchDiscoveryTrait";
const ORIGIN_MR_TRAIT: &str =
    "io.jenkins.plugins.gitlabbranchsource.OriginMergeRequestDiscoveryTrait";
const FORK_MR_TRAIT: &str =
    "io.jenkins.plugins.gitlabbranchsource.ForkMergeRequestDiscoveryTrait";
const TAG_DISCOVERY_TRAIT: &str = "io.jenkins.plugins.gitlabbranchsource.TagDiscoveryTrait";

/// Writes a GitLab source into the `source` element. A `None` source is a
/// no-op.
pub fn append_gitlab_source_to_tree(element: &mut Element, source: Option<&GitlabSource>) {
    let Some(source) = source else { return };
    element.set_attribute("class", GITLAB_SOURCE_CLASS);
    element.set_attribute("plugin", "gitlab-branch-source");
    element.set_child_text("id", source.scm_id.as_str());
    element.set_child_text("serverName", source.server_name.as_str());
    element.set_child_text("credentialsId", source.credential_id.as_str());
    element.set_child_text("projectOwner", source.owner.as_str());
    element.set_child_text("projectPath", source.repo.as_str());

    let traits = element.get_or_create_child("traits");
    common::append_strategy_trait(traits, BRANCH_DISCOVERY_TRAIT, source.discover_branches);
    common::append_strategy_trait(traits, ORIGIN_MR_TRAIT, source.discover_pr_from_origin);
    traits.remove_children(FORK_MR_TRAIT);
    if let Some(forks) = &source.discover_pr_from_forks {
        let fork_trait = traits.add_child(Element::new(FORK_MR_TRAIT));
        fork_trait.add_text_child("strategyId", forks.strategy.to_string());
        common::append_fork_trust(
            fork_trait,
            FORK_MR_TRAIT,
            PrDiscoverTrust(forks.trust).as_str(),
        );
    }
    traits.remove_children(TAG_DISCOVERY_TRAIT);
    if source.discover_tags {
        traits.add_child(Element::new(TAG_DISCOVERY_TRAIT));
    }
    common::append_clone_option(traits, source.clone_option.as_ref());
    common::append_regex_filter(traits, source.regex_filter.as_deref());
    common::append_notification_gate(traits, source.accept_jenkins_notification);
}

/// Reads a GitLab source back. An absent element yields a zero-value source.
#[must_use]
pub fn get_gitlab_source_from_tree(element: Option<&Element>) -> GitlabSource {
    let Some(element) = element else {
        tracing::warn!("GitLab source element is absent, returning an empty source");
        return GitlabSource::default();
    };

    let mut source = GitlabSource {
        scm_id: element.child_text("id").to_string(),
        server_name: element.child_text("serverName").to_string(),
        credential_id: element.child_text("credentialsId").to_string(),
        owner: element.child_text("projectOwner").to_string(),
        repo: element.child_text("projectPath").to_string(),
        ..GitlabSource::default()
    };
    let traits = element.child("traits");
    source.accept_jenkins_notification = traits.is_none_or(common::accepts_notifications);
    if let Some(traits) = traits {
        source.discover_branches = common::strategy_id(traits, BRANCH_DISCOVERY_TRAIT);
        source.discover_pr_from_origin = common::strategy_id(traits, ORIGIN_MR_TRAIT);
        source.discover_pr_from_forks = traits.child(FORK_MR_TRAIT).map(|fork_trait| {
            let trust = common::fork_trust_name(fork_trait)
                .map_or(0, |name| PrDiscoverTrust::parse_from_string(name).0);
            DiscoverPrFromForks {
                strategy: common::strategy_id(traits, FORK_MR_TRAIT),
                trust,
            }
        });
        source.discover_tags = traits.child(TAG_DISCOVERY_TRAIT).is_some();
        source.clone_option = common::get_clone_option(traits);
        source.regex_filter = common::get_regex_filter(traits);
    }
    source
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_source() -> GitlabSource {
        GitlabSource {
            scm_id: "gitlab-1".to_string(),
            server_name: "gitlab.example.com".to_string(),
            owner: "platform".to_string(),
            repo: "platform/widgets".to_string(),
            credential_id: "gl-token".to_string(),
            discover_branches: 1,
            discover_pr_from_origin: 1,
            discover_pr_from_forks: Some(DiscoverPrFromForks::new(2, 1)),
            discover_tags: true,
            clone_option: None,
            regex_filter: None,
            accept_jenkins_notification: false,
        }
    }

    #[test]
    fn test_round_trip() {
        let source = sample_source();
        let mut element = Element::new("source");
        append_gitlab_source_to_tree(&mut element, Some(&source));
        assert_eq!(get_gitlab_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_fork_trust_uses_generic_enumeration() {
        let mut element = Element::new("source");
        append_gitlab_source_to_tree(&mut element, Some(&sample_source()));
        let trust = element
            .child("traits")
            .and_then(|t| t.child(FORK_MR_TRAIT))
            .and_then(|f| f.child("trust"))
            .unwrap();
        assert_eq!(
            trust.attribute("class"),
            Some(
                "io.jenkins.plugins.gitlabbranchsource.ForkMergeRequestDiscoveryTrait$TrustMembers"
            )
        );
    }

    #[test]
    fn test_tag_discovery_toggle() {
        let mut source = sample_source();
        source.discover_tags = false;
        let mut element = Element::new("source");
        append_gitlab_source_to_tree(&mut element, Some(&source));
        assert!(
            element
                .child("traits")
                .unwrap()
                .child(TAG_DISCOVERY_TRAIT)
                .is_none()
        );
        assert_eq!(get_gitlab_source_from_tree(Some(&element)), source);
    }
}
