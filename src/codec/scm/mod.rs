//! SCM source codec family
//!
//! One codec per provider, all pure functions over the `source` element of a
//! branch source. [`append_source_to_tree`] and [`get_source_from_tree`]
//! dispatch on the source variant / embedded `class` attribute.

pub(crate) mod common;

pub mod bitbucket;
pub mod git;
pub mod github;
pub mod gitlab;
pub mod svn;

pub use bitbucket::{append_bitbucket_source_to_tree, get_bitbucket_source_from_tree};
pub use git::{append_git_source_to_tree, get_git_source_from_tree};
pub use github::{append_github_source_to_tree, get_github_source_from_tree};
pub use gitlab::{append_gitlab_source_to_tree, get_gitlab_source_from_tree};
pub use svn::{
    append_single_svn_source_to_tree, append_svn_source_to_tree, get_single_svn_source_from_tree,
    get_svn_source_from_tree,
};

use crate::codec::tree::Element;
use crate::pipeline::errors::CodecError;
use crate::pipeline::scm::ScmSource;

/// Writes any provider source into the `source` element.
pub fn append_source_to_tree(element: &mut Element, source: &ScmSource) {
    match source {
        ScmSource::Git(git) => append_git_source_to_tree(element, Some(git)),
        ScmSource::Github(github) => append_github_source_to_tree(element, Some(github)),
        ScmSource::Gitlab(gitlab) => append_gitlab_source_to_tree(element, Some(gitlab)),
        ScmSource::BitbucketServer(bitbucket) => {
            append_bitbucket_source_to_tree(element, Some(bitbucket));
        }
        ScmSource::Svn(svn) => append_svn_source_to_tree(element, Some(svn)),
        ScmSource::SingleSvn(single) => append_single_svn_source_to_tree(element, Some(single)),
    }
}

/// Resolves the provider from the element's `class` attribute and decodes
/// the matching source.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedSourceClass`] when the class attribute
/// matches no known provider.
pub fn get_source_from_tree(element: &Element) -> Result<ScmSource, CodecError> {
    let class = element.attribute("class").unwrap_or("");
    match class {
        git::GIT_SOURCE_CLASS => Ok(ScmSource::Git(get_git_source_from_tree(Some(element)))),
        github::GITHUB_SOURCE_CLASS => Ok(ScmSource::Github(get_github_source_from_tree(Some(
            element,
        )))),
        gitlab::GITLAB_SOURCE_CLASS => Ok(ScmSource::Gitlab(get_gitlab_source_from_tree(Some(
            element,
        )))),
        bitbucket::BITBUCKET_SOURCE_CLASS => Ok(ScmSource::BitbucketServer(
            get_bitbucket_source_from_tree(Some(element)),
        )),
        svn::SVN_SOURCE_CLASS => Ok(ScmSource::Svn(get_svn_source_from_tree(Some(element)))),
        svn::SINGLE_SVN_SOURCE_CLASS => Ok(ScmSource::SingleSvn(get_single_svn_source_from_tree(
            Some(element),
        ))),
        other => Err(CodecError::UnsupportedSourceClass(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipeline::scm::GitSource;

    #[test]
    fn test_dispatch_round_trip() {
        let source = ScmSource::Git(GitSource {
            scm_id: "id".to_string(),
            url: "https://example.com/repo.git".to_string(),
            discover_branches: true,
            accept_jenkins_notification: true,
            ..GitSource::default()
        });
        let mut element = Element::new("source");
        append_source_to_tree(&mut element, &source);
        assert_eq!(get_source_from_tree(&element).unwrap(), source);
    }

    #[test]
    fn test_unknown_class_is_a_hard_error() {
        let element = Element::new("source").with_attribute("class", "com.example.MysterySource");
        assert_eq!(
            get_source_from_tree(&element),
            Err(CodecError::UnsupportedSourceClass(
                "com.example.MysterySource".to_string()
            ))
        );
    }

    #[test]
    fn test_missing_class_is_a_hard_error() {
        let element = Element::new("source");
        assert!(matches!(
            get_source_from_tree(&element),
            Err(CodecError::UnsupportedSourceClass(_))
        ));
    }
}
