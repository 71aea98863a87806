//! Subversion source codecs
//!
//! Two shapes: a `SubversionSCMSource` discovering heads under a remote
//! base, and a `SingleSCMSource` pinned to one location. The single-location
//! shape nests a full `SubversionSCM` configuration; the `$` of its Java
//! inner class is serialized as `_-` in the module-location tag.

use crate::codec::scm::common;
use crate::codec::tree::Element;
use crate::pipeline::scm::{SingleSvnSource, SvnSource};

pub(crate) const SVN_SOURCE_CLASS: &str = "jenkins.scm.impl.subversion.SubversionSCMSource";
pub(crate) const SINGLE_SVN_SOURCE_CLASS: &str = "jenkins.scm.impl.SingleSCMSource";
const SUBVERSION_SCM_CLASS: &str = "hudson.scm.SubversionSCM";
const MODULE_LOCATION: &str = "hudson.scm.SubversionSCM_-ModuleLocation";

/// Writes a Subversion source into the `source` element. A `None` source is
/// a no-op.
pub fn append_svn_source_to_tree(element: &mut Element, source: Option<&SvnSource>) {
    let Some(source) = source else { return };
    element.set_attribute("class", SVN_SOURCE_CLASS);
    element.set_attribute("plugin", "subversion");
    element.set_child_text("id", source.scm_id.as_str());
    element.set_child_text("remoteBase", source.remote.as_str());
    element.set_child_text("credentialsId", source.credential_id.as_str());
    element.set_child_text("includes", source.includes.as_str());
    element.set_child_text("excludes", source.excludes.as_str());
    let traits = element.get_or_create_child("traits");
    common::append_notification_gate(traits, source.accept_jenkins_notification);
}

/// Reads a Subversion source back. An absent element yields a zero-value
/// source.
#[must_use]
pub fn get_svn_source_from_tree(element: Option<&Element>) -> SvnSource {
    let Some(element) = element else {
        tracing::warn!("SVN source element is absent, returning an empty source");
        return SvnSource::default();
    };
    SvnSource {
        scm_id: element.child_text("id").to_string(),
        remote: element.child_text("remoteBase").to_string(),
        credential_id: element.child_text("credentialsId").to_string(),
        includes: element.child_text("includes").to_string(),
        excludes: element.child_text("excludes").to_string(),
        accept_jenkins_notification: element
            .child("traits")
            .is_none_or(common::accepts_notifications),
    }
}

/// Writes a single-location Subversion source into the `source` element.
/// A `None` source is a no-op.
pub fn append_single_svn_source_to_tree(element: &mut Element, source: Option<&SingleSvnSource>) {
    let Some(source) = source else { return };
    element.set_attribute("class", SINGLE_SVN_SOURCE_CLASS);
    element.set_attribute("plugin", "scm-api");
    element.set_child_text("id", source.scm_id.as_str());
    element.set_child_text("name", "master");
    let traits = element.get_or_create_child("traits");
    common::append_notification_gate(traits, source.accept_jenkins_notification);

    let scm = element.get_or_create_child("scm");
    scm.set_attribute("class", SUBVERSION_SCM_CLASS);
    scm.set_attribute("plugin", "subversion");
    let location = scm
        .get_or_create_child("locations")
        .get_or_create_child(MODULE_LOCATION);
    location.set_child_text("remote", source.remote.as_str());
    location.set_child_text("credentialsId", source.credential_id.as_str());
    location.set_child_text("local", ".");
    location.set_child_text("depthOption", "infinity");
    location.set_child_text("ignoreExternalsOption", "false");
    location.set_child_text("cancelProcessOnExternalsFail", "true");
    scm.set_child_text("quietOperation", "true");
    scm.set_child_text("ignoreDirPropChanges", "false");
    scm.set_child_text("filterChangelog", "false");
    scm.get_or_create_child("workspaceUpdater")
        .set_attribute("class", "hudson.scm.subversion.UpdateUpdater");
}

/// Reads a single-location Subversion source back. An absent element yields
/// a zero-value source.
#[must_use]
pub fn get_single_svn_source_from_tree(element: Option<&Element>) -> SingleSvnSource {
    let Some(element) = element else {
        tracing::warn!("Single SVN source element is absent, returning an empty source");
        return SingleSvnSource::default();
    };
    let location = element
        .child("scm")
        .and_then(|scm| scm.child("locations"))
        .and_then(|locations| locations.child(MODULE_LOCATION));
    SingleSvnSource {
        scm_id: element.child_text("id").to_string(),
        remote: location.map_or_else(String::new, |l| l.child_text("remote").to_string()),
        credential_id: location
            .map_or_else(String::new, |l| l.child_text("credentialsId").to_string()),
        accept_jenkins_notification: element
            .child("traits")
            .is_none_or(common::accepts_notifications),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_svn_round_trip() {
        let source = SvnSource {
            scm_id: "svn-1".to_string(),
            remote: "https://svn.example.com/widgets".to_string(),
            credential_id: "svn-cred".to_string(),
            includes: "trunk,branches/*,tags/*".to_string(),
            excludes: "sandbox/*".to_string(),
            accept_jenkins_notification: true,
        };
        let mut element = Element::new("source");
        append_svn_source_to_tree(&mut element, Some(&source));
        assert_eq!(element.attribute("class"), Some(SVN_SOURCE_CLASS));
        assert_eq!(get_svn_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_svn_skip_notifications_round_trip() {
        let source = SvnSource {
            remote: "https://svn.example.com/widgets".to_string(),
            accept_jenkins_notification: false,
            ..SvnSource::default()
        };
        let mut element = Element::new("source");
        append_svn_source_to_tree(&mut element, Some(&source));
        assert!(!element.child("traits").unwrap().children.is_empty());
        assert_eq!(get_svn_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_single_svn_round_trip() {
        let source = SingleSvnSource {
            scm_id: "svn-single".to_string(),
            remote: "https://svn.example.com/widgets/trunk".to_string(),
            credential_id: "svn-cred".to_string(),
            accept_jenkins_notification: true,
        };
        let mut element = Element::new("source");
        append_single_svn_source_to_tree(&mut element, Some(&source));
        let scm = element.child("scm").unwrap();
        assert_eq!(scm.attribute("class"), Some(SUBVERSION_SCM_CLASS));
        assert!(scm.child("locations").unwrap().child(MODULE_LOCATION).is_some());
        assert_eq!(get_single_svn_source_from_tree(Some(&element)), source);
    }

    #[test]
    fn test_absent_elements_decode_to_zero_values() {
        assert_eq!(get_svn_source_from_tree(None), SvnSource::default());
        assert_eq!(
            get_single_svn_source_from_tree(None),
            SingleSvnSource::default()
        );
    }
}
