//! GitHub source codec
//!
//! Trait tags live in the `github_branch_source` Java package, so the
//! underscore in the package name is doubled when it appears as an XML tag;
//! `class` attribute values keep the plain package name.

use crate::codec::enums::GithubPrDiscoverTrust;
use crate::codec::scm::common;
use crate::codec::tree::Element;
use crate::pipeline::scm::{DiscoverPrFromForks, GithubSource};

pub(crate) const GITHUB_SOURCE_CLASS: &str =
    "org.jenkinsci.plugins.github_branch_source.GitHubSCMSource";
const BRANCH_DISCOVERY_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.BranchDiscoveryTrait";
const ORIGIN_PR_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.OriginPullRequestDiscoveryTrait";
const FORK_PR_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.ForkPullRequestDiscoveryTrait";
const FORK_PR_TRUST_CLASS: &str =
    "org.jenkinsci.plugins.github_branch_source.ForkPullRequestDiscoveryTrait";

/// Writes a GitHub source into the `source` element. A `None` source is a
/// no-op.
pub fn append_github_source_to_tree(element: &mut Element, source: Option<&GithubSource>) {
    let Some(source) = source else { return };
    element.set_attribute("class", GITHUB_SOURCE_CLASS);
    element.set_attribute("plugin", "github-branch-source");
    element.set_child_text("id", source.scm_id.as_str());
    element.set_child_text("credentialsId", source.credential_id.as_str());
    element.set_child_text("repoOwner", source.owner.as_str());
    element.set_child_text("repository", source.repo.as_str());
    element.remove_children("apiUri");
    if let Some(api_uri) = &source.api_uri {
        element.add_text_child("apiUri", api_uri.as_str());
    }

    let traits = element.get_or_create_child("traits");
    common::append_strategy_trait(traits, BRANCH_DISCOVERY_TRAIT, source.discover_branches);
    common::append_strategy_trait(traits, ORIGIN_PR_TRAIT, source.discover_pr_from_origin);
    traits.remove_children(FORK_PR_TRAIT);
    if let Some(forks) = &source.discover_pr_from_forks {
        let fork_trait = traits.add_child(Element::new(FORK_PR_TRAIT));
        fork_trait.add_text_child("strategyId", forks.strategy.to_string());
        common::append_fork_trust(
            fork_trait,
            FORK_PR_TRUST_CLASS,
            GithubPrDiscoverTrust(forks.trust).as_str(),
        );
    }
    common::append_clone_option(traits, source.clone_option.as_ref());
    common::append_regex_filter(traits, source.regex_filter.as_deref());
    common::append_notification_gate(traits, source.accept_jenkins_notification);
}

/// Reads a GitHub source back. An absent element yields a zero-value source.
#[must_use]
pub fn get_github_source_from_tree(element: Option<&Element>) -> GithubSource {
    let Some(element) = element else {
        tracing::warn!("GitHub source element is absent, returning an empty source");
        return GithubSource::default();
    };

    let mut source = GithubSource {
        scm_id: element.child_text("id").to_string(),
        credential_id: element.child_text("credentialsId").to_string(),
        owner: element.child_text("repoOwner").to_string(),
        repo: element.child_text("repository").to_string(),
        api_uri: element.child("apiUri").map(|uri| uri.text.clone()),
        ..GithubSource::default()
    };
    let traits = element.child("traits");
    source.accept_jenkins_notification = traits.is_none_or(common::accepts_notifications);
    if let Some(traits) = traits {
        source.discover_branches = common::strategy_id(traits, BRANCH_DISCOVERY_TRAIT);
        source.discover_pr_from_origin = common::strategy_id(traits, ORIGIN_PR_TRAIT);
        source.discover_pr_from_forks = traits.child(FORK_PR_TRAIT).map(|fork_trait| {
            let trust = common::fork_trust_name(fork_trait)
                .map_or(0, |name| GithubPrDiscoverTrust::parse_from_string(name).0);
            DiscoverPrFromForks {
                strategy: common::strategy_id(traits, FORK_PR_TRAIT),
                trust,
            }
        });
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

    fn sample_source() -> GithubSource {
        GithubSource {
            scm_id: "github-1".to_string(),
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            credential_id: "gh-token".to_string(),
            api_uri: Some("https://github.example.com/api/v3".to_string()),
            discover_branches: 1,
            discover_pr_from_origin: 2,
            discover_pr_from_forks: Some(DiscoverPrFromForks::new(1, 3)),
            clone_option: Some(GitCloneOption::new(false, 20, 1)),
            regex_filter: Some(".*".to_string()),
            accept_jenkins_notification: true,
        }
    }

    #[test]
    fn test_round_trip() {
        let source = sample_source();
        let mut element = Element::new("source");
        append_github_source_to_tree(&mut element, Some(&source));
        assert_eq!(get_github_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_fork_trust_nested_class_name() {
        let mut element = Element::new("source");
        append_github_source_to_tree(&mut element, Some(&sample_source()));
        let trust = element
            .child("traits")
            .and_then(|t| t.child(FORK_PR_TRAIT))
            .and_then(|f| f.child("trust"))
            .unwrap();
        assert_eq!(
            trust.attribute("class"),
            Some(
                "org.jenkinsci.plugins.github_branch_source.ForkPullRequestDiscoveryTrait$TrustPermission"
            )
        );
    }

    #[test]
    fn test_sparse_traits_when_strategies_unset() {
        let source = GithubSource {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            accept_jenkins_notification: true,
            ..GithubSource::default()
        };
        let mut element = Element::new("source");
        append_github_source_to_tree(&mut element, Some(&source));
        let traits = element.child("traits").unwrap();
        assert!(traits.children.is_empty());
        assert_eq!(get_github_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_partial_trait_set_decodes() {
        let mut element = Element::new("source");
        element.set_attribute("class", GITHUB_SOURCE_CLASS);
        element
            .get_or_create_child("traits")
            .add_child(Element::new(BRANCH_DISCOVERY_TRAIT))
            .add_text_child("strategyId", "3");
        let source = get_github_source_from_tree(Some(&element));
        assert_eq!(source.discover_branches, 3);
        assert_eq!(source.discover_pr_from_origin, 0);
        assert!(source.discover_pr_from_forks.is_none());
        assert!(source.accept_jenkins_notification);
    }
}
