//! Trait sub-trees shared by every SCM provider
//!
//! Clone options, regex head filtering and the notification gate are the
//! same wire shape for all providers, so they live here once. Traits are
//! encoded sparsely: an unset option produces no element at all, and every
//! append replaces whatever a previous encode left behind.

use crate::codec::tree::Element;
use crate::pipeline::scm::GitCloneOption;

const CLONE_OPTION_TRAIT: &str = "jenkins.plugins.git.traits.CloneOptionTrait";
const CLONE_EXTENSION_CLASS: &str = "hudson.plugins.git.extensions.impl.CloneOption";
const REGEX_FILTER_TRAIT: &str = "jenkins.scm.impl.trait.RegexSCMHeadFilterTrait";
const SKIP_NOTIFICATIONS_TRAIT: &str =
    "io.jenkins.plugins.skipnotifications.SkipNotificationsTrait";

/// Writes the clone-option trait. Timeout and depth are normalized here, so
/// negative inputs come back as the defaults after a round trip.
pub(crate) fn append_clone_option(traits: &mut Element, option: Option<&GitCloneOption>) {
    traits.remove_children(CLONE_OPTION_TRAIT);
    let Some(option) = option else { return };
    let extension = traits
        .add_child(Element::new(CLONE_OPTION_TRAIT))
        .add_child(Element::new("extension").with_attribute("class", CLONE_EXTENSION_CLASS));
    extension.add_text_child("shallow", bool_text(option.shallow));
    extension.add_text_child("noTags", "false");
    extension.add_text_child("reference", "");
    extension.add_text_child("timeout", option.normalized_timeout().to_string());
    extension.add_text_child("depth", option.normalized_depth().to_string());
    extension.add_text_child("honorRefspec", "false");
}

pub(crate) fn get_clone_option(traits: &Element) -> Option<GitCloneOption> {
    let extension = traits.child(CLONE_OPTION_TRAIT)?.child("extension")?;
    Some(GitCloneOption {
        shallow: extension.child_text("shallow") == "true",
        timeout: parse_i32(extension.child_text("timeout"), 10),
        depth: parse_i32(extension.child_text("depth"), 1),
    })
}

/// Writes the regex head-filter trait; empty filters produce no element.
pub(crate) fn append_regex_filter(traits: &mut Element, filter: Option<&str>) {
    traits.remove_children(REGEX_FILTER_TRAIT);
    if let Some(filter) = filter
        && !filter.is_empty()
    {
        traits
            .add_child(Element::new(REGEX_FILTER_TRAIT))
            .add_text_child("regex", filter);
    }
}

pub(crate) fn get_regex_filter(traits: &Element) -> Option<String> {
    traits
        .child(REGEX_FILTER_TRAIT)
        .map(|t| t.child_text("regex").to_string())
}

/// Writes or removes the skip-notifications trait. The trait is present
/// exactly when the source does NOT accept Jenkins notifications.
pub(crate) fn append_notification_gate(traits: &mut Element, accept: bool) {
    traits.remove_children(SKIP_NOTIFICATIONS_TRAIT);
    if !accept {
        traits.add_child(Element::new(SKIP_NOTIFICATIONS_TRAIT));
    }
}

pub(crate) fn accepts_notifications(traits: &Element) -> bool {
    traits.child(SKIP_NOTIFICATIONS_TRAIT).is_none()
}

/// Writes a discovery trait carrying a bare `strategyId`. A strategy of `0`
/// means "not configured" and removes the trait.
pub(crate) fn append_strategy_trait(traits: &mut Element, tag: &str, strategy: i32) {
    traits.remove_children(tag);
    if strategy != 0 {
        traits
            .add_child(Element::new(tag))
            .add_text_child("strategyId", strategy.to_string());
    }
}

pub(crate) fn strategy_id(traits: &Element, tag: &str) -> i32 {
    traits
        .child(tag)
        .map_or(0, |t| parse_i32(t.child_text("strategyId"), 0))
}

/// Writes the nested trust element of a fork-discovery trait. The `class`
/// attribute is the enclosing trait's class plus `$` plus the trust name,
/// the Java nested-class convention Jenkins serializes.
pub(crate) fn append_fork_trust(fork_trait: &mut Element, trait_class: &str, trust_name: &str) {
    if !trust_name.is_empty() {
        fork_trait.add_child(
            Element::new("trust").with_attribute("class", format!("{trait_class}${trust_name}")),
        );
    }
}

/// Trust name recovered from the nested trust element, if any.
pub(crate) fn fork_trust_name(fork_trait: &Element) -> Option<&str> {
    fork_trait
        .child("trust")?
        .attribute("class")?
        .split('$')
        .nth(1)
}

pub(crate) fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn parse_i32(text: &str, fallback: i32) -> i32 {
    text.parse().unwrap_or(fallback)
}
