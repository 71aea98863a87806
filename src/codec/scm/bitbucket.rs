//! Bitbucket Server source codec

use crate::codec::enums::BitbucketPrDiscoverTrust;
use crate::codec::scm::common;
use crate::codec::tree::Element;
use crate::pipeline::scm::{BitbucketServerSource, DiscoverPrFromForks};

pub(crate) const BITBUCKET_SOURCE_CLASS: &str =
    "com.cloudbees.jenkins.plugins.bitbucket.BitbucketSCMSource";
const BRANCH_DISCOVERY_TRAIT: &str = "com.cloudbees.jenkins.plugins.bitbucket.BranchDiscoveryTrait";
const ORIGIN_PR_TRAIT: &str =
    "com.cloudbees.jenkins.plugins.bitbucket.OriginPullRequestDiscoveryTrait";
const FORK_PR_TRAIT: &str =
    "com.cloudbees.jenkins.plugins.bitbucket.ForkPullRequestDiscoveryTrait";

/// Writes a Bitbucket Server source into the `source` element. A `None`
/// source is a no-op.
pub fn append_bitbucket_source_to_tree(
    element: &mut Element,
    source: Option<&BitbucketServerSource>,
) {
    let Some(source) = source else { return };
    element.set_attribute("class", BITBUCKET_SOURCE_CLASS);
    element.set_attribute("plugin", "cloudbees-bitbucket-branch-source");
    element.set_child_text("id", source.scm_id.as_str());
    element.set_child_text("serverUrl", source.server_url.as_str());
    element.set_child_text("credentialsId", source.credential_id.as_str());
    element.set_child_text("repoOwner", source.owner.as_str());
    element.set_child_text("repository", source.repo.as_str());

    let traits = element.get_or_create_child("traits");
    common::append_strategy_trait(traits, BRANCH_DISCOVERY_TRAIT, source.discover_branches);
    common::append_strategy_trait(traits, ORIGIN_PR_TRAIT, source.discover_pr_from_origin);
    traits.remove_children(FORK_PR_TRAIT);
    if let Some(forks) = &source.discover_pr_from_forks {
        let fork_trait = traits.add_child(Element::new(FORK_PR_TRAIT));
        fork_trait.add_text_child("strategyId", forks.strategy.to_string());
        common::append_fork_trust(
            fork_trait,
            FORK_PR_TRAIT,
            BitbucketPrDiscoverTrust(forks.trust).as_str(),
        );
    }
    common::append_clone_option(traits, source.clone_option.as_ref());
    common::append_regex_filter(traits, source.regex_filter.as_deref());
    common::append_notification_gate(traits, source.accept_jenkins_notification);
}

/// Reads a Bitbucket Server source back. An absent element yields a
/// zero-value source.
#[must_use]
pub fn get_bitbucket_source_from_tree(element: Option<&Element>) -> BitbucketServerSource {
    let Some(element) = element else {
        tracing::warn!("Bitbucket source element is absent, returning an empty source");
        return BitbucketServerSource::default();
    };

    let mut source = BitbucketServerSource {
        scm_id: element.child_text("id").to_string(),
        server_url: element.child_text("serverUrl").to_string(),
        credential_id: element.child_text("credentialsId").to_string(),
        owner: element.child_text("repoOwner").to_string(),
        repo: element.child_text("repository").to_string(),
        ..BitbucketServerSource::default()
    };
    let traits = element.child("traits");
    source.accept_jenkins_notification = traits.is_none_or(common::accepts_notifications);
    if let Some(traits) = traits {
        source.discover_branches = common::strategy_id(traits, BRANCH_DISCOVERY_TRAIT);
        source.discover_pr_from_origin = common::strategy_id(traits, ORIGIN_PR_TRAIT);
        source.discover_pr_from_forks = traits.child(FORK_PR_TRAIT).map(|fork_trait| {
            let trust = common::fork_trust_name(fork_trait)
                .map_or(0, |name| BitbucketPrDiscoverTrust::parse_from_string(name).0);
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

    fn sample_source() -> BitbucketServerSource {
        BitbucketServerSource {
            scm_id: "bb-1".to_string(),
            server_url: "https://bitbucket.example.com".to_string(),
            owner: "PLAT".to_string(),
            repo: "widgets".to_string(),
            credential_id: "bb-token".to_string(),
            discover_branches: 1,
            discover_pr_from_origin: 2,
            discover_pr_from_forks: Some(DiscoverPrFromForks::new(1, 2)),
            clone_option: None,
            regex_filter: Some("main|release-.*".to_string()),
            accept_jenkins_notification: true,
        }
    }

    #[test]
    fn test_round_trip() {
        let source = sample_source();
        let mut element = Element::new("source");
        append_bitbucket_source_to_tree(&mut element, Some(&source));
        assert_eq!(get_bitbucket_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_unknown_trust_name_defaults_to_everyone() {
        let mut element = Element::new("source");
        element.set_attribute("class", BITBUCKET_SOURCE_CLASS);
        let fork_trait = element
            .get_or_create_child("traits")
            .add_child(Element::new(FORK_PR_TRAIT));
        fork_trait.add_text_child("strategyId", "1");
        fork_trait.add_child(
            Element::new("trust")
                .with_attribute("class", format!("{FORK_PR_TRAIT}$TrustSomethingNew")),
        );

        let source = get_bitbucket_source_from_tree(Some(&element));
        assert_eq!(
            source.discover_pr_from_forks,
            Some(DiscoverPrFromForks::new(1, BitbucketPrDiscoverTrust::EVERYONE.0))
        );
    }
}
