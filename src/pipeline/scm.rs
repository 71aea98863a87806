//! SCM source descriptions for multi-branch pipelines
//!
//! One value object per supported provider, wrapped in the [`ScmSource`]
//! union. A multi-branch pipeline carries exactly one source; the enum makes
//! a mismatched or doubly-populated source unrepresentable.
//!
//! Discovery strategy ids are provider-specific small integers; `0` means
//! "not configured" and produces no trait element on encode.

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::types::Validate;

/// Clone behavior applied by the Git-family providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GitCloneOption {
    /// Perform a shallow clone.
    #[serde(default)]
    pub shallow: bool,

    /// Clone timeout in seconds. Negative values fall back to 10.
    #[serde(default)]
    pub timeout: i32,

    /// Shallow clone depth. Values below 1 fall back to 1.
    #[serde(default)]
    pub depth: i32,
}

impl GitCloneOption {
    /// Creates a clone option.
    #[must_use]
    pub fn new(shallow: bool, timeout: i32, depth: i32) -> Self {
        Self {
            shallow,
            timeout,
            depth,
        }
    }

    /// Timeout with the fallback applied.
    #[must_use]
    pub fn normalized_timeout(&self) -> i32 {
        if self.timeout < 0 { 10 } else { self.timeout }
    }

    /// Depth with the fallback applied.
    #[must_use]
    pub fn normalized_depth(&self) -> i32 {
        if self.depth < 1 { 1 } else { self.depth }
    }
}

/// Discovery of pull requests originating from forked repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiscoverPrFromForks {
    /// Discovery strategy id.
    pub strategy: i32,

    /// Trust level granted to fork pull requests; the meaning of the value
    /// is provider-specific.
    pub trust: i32,
}

impl DiscoverPrFromForks {
    /// Creates a fork discovery setting.
    #[must_use]
    pub fn new(strategy: i32, trust: i32) -> Self {
        Self { strategy, trust }
    }
}

/// Plain Git repository source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GitSource {
    /// Stable source id written to the `<id>` element.
    #[serde(default)]
    pub scm_id: String,

    /// Clone URL.
    pub url: String,

    /// Credential reference id.
    #[serde(default)]
    pub credential_id: String,

    /// Discover branches of the repository.
    #[serde(default)]
    pub discover_branches: bool,

    /// Clone behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_option: Option<GitCloneOption>,

    /// Regex filter narrowing discovered heads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_filter: Option<String>,

    /// Report build status back to the SCM. Encoded as the absence of the
    /// skip-notifications trait.
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

/// GitHub repository source, including GitHub Enterprise endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GithubSource {
    /// Stable source id written to the `<id>` element.
    #[serde(default)]
    pub scm_id: String,

    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Credential reference id.
    #[serde(default)]
    pub credential_id: String,

    /// GitHub Enterprise API endpoint; `None` for github.com.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_uri: Option<String>,

    /// Branch discovery strategy id.
    #[serde(default)]
    pub discover_branches: i32,

    /// Discovery strategy id for pull requests from the origin repository.
    #[serde(default)]
    pub discover_pr_from_origin: i32,

    /// Discovery of pull requests from forks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discover_pr_from_forks: Option<DiscoverPrFromForks>,

    /// Clone behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_option: Option<GitCloneOption>,

    /// Regex filter narrowing discovered heads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_filter: Option<String>,

    /// Report build status back to the SCM.
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

/// GitLab project source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GitlabSource {
    /// Stable source id written to the `<id>` element.
    #[serde(default)]
    pub scm_id: String,

    /// Configured GitLab server name.
    #[serde(default)]
    pub server_name: String,

    /// Project owner (group or user).
    pub owner: String,

    /// Full project path.
    pub repo: String,

    /// Credential reference id.
    #[serde(default)]
    pub credential_id: String,

    /// Branch discovery strategy id.
    #[serde(default)]
    pub discover_branches: i32,

    /// Discovery strategy id for merge requests from the origin project.
    #[serde(default)]
    pub discover_pr_from_origin: i32,

    /// Discovery of merge requests from forks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discover_pr_from_forks: Option<DiscoverPrFromForks>,

    /// Discover tags of the project.
    #[serde(default)]
    pub discover_tags: bool,

    /// Clone behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_option: Option<GitCloneOption>,

    /// Regex filter narrowing discovered heads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_filter: Option<String>,

    /// Report build status back to the SCM.
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

/// Bitbucket Server repository source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BitbucketServerSource {
    /// Stable source id written to the `<id>` element.
    #[serde(default)]
    pub scm_id: String,

    /// Bitbucket Server base URL.
    pub server_url: String,

    /// Repository owner (project key or user).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Credential reference id.
    #[serde(default)]
    pub credential_id: String,

    /// Branch discovery strategy id.
    #[serde(default)]
    pub discover_branches: i32,

    /// Discovery strategy id for pull requests from the origin repository.
    #[serde(default)]
    pub discover_pr_from_origin: i32,

    /// Discovery of pull requests from forks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discover_pr_from_forks: Option<DiscoverPrFromForks>,

    /// Clone behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_option: Option<GitCloneOption>,

    /// Regex filter narrowing discovered heads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_filter: Option<String>,

    /// Report build status back to the SCM.
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

/// Subversion source discovering branches under a remote base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SvnSource {
    /// Stable source id written to the `<id>` element.
    #[serde(default)]
    pub scm_id: String,

    /// Remote base URL.
    pub remote: String,

    /// Credential reference id.
    #[serde(default)]
    pub credential_id: String,

    /// Comma-separated include patterns, e.g. `trunk,branches/*`.
    #[serde(default)]
    pub includes: String,

    /// Comma-separated exclude patterns.
    #[serde(default)]
    pub excludes: String,

    /// Report build status back to the SCM.
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

/// Subversion source pinned to a single location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SingleSvnSource {
    /// Stable source id written to the `<id>` element.
    #[serde(default)]
    pub scm_id: String,

    /// Remote URL of the single location.
    pub remote: String,

    /// Credential reference id.
    #[serde(default)]
    pub credential_id: String,

    /// Report build status back to the SCM.
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

/// The SCM source of a multi-branch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source_type", rename_all = "snake_case")]
pub enum ScmSource {
    /// Plain Git repository
    Git(GitSource),
    /// GitHub repository
    Github(GithubSource),
    /// GitLab project
    Gitlab(GitlabSource),
    /// Bitbucket Server repository
    BitbucketServer(BitbucketServerSource),
    /// Subversion remote base
    Svn(SvnSource),
    /// Single Subversion location
    SingleSvn(SingleSvnSource),
}

impl ScmSource {
    /// Short discriminator name of this source type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Git(_) => "git",
            Self::Github(_) => "github",
            Self::Gitlab(_) => "gitlab",
            Self::BitbucketServer(_) => "bitbucket_server",
            Self::Svn(_) => "svn",
            Self::SingleSvn(_) => "single_svn",
        }
    }

    /// Regex filter of the source, where the provider supports one.
    #[must_use]
    pub fn regex_filter(&self) -> Option<&str> {
        match self {
            Self::Git(s) => s.regex_filter.as_deref(),
            Self::Github(s) => s.regex_filter.as_deref(),
            Self::Gitlab(s) => s.regex_filter.as_deref(),
            Self::BitbucketServer(s) => s.regex_filter.as_deref(),
            Self::Svn(_) | Self::SingleSvn(_) => None,
        }
    }
}

impl Validate for ScmSource {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if let Some(pattern) = self.regex_filter()
            && let Err(err) = regex::Regex::new(pattern)
        {
            return Err(ValidationError::InvalidBranchFilter {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_option_normalization() {
        let opt = GitCloneOption::new(true, -1, -5);
        assert_eq!(opt.normalized_timeout(), 10);
        assert_eq!(opt.normalized_depth(), 1);

        let opt = GitCloneOption::new(false, 30, 2);
        assert_eq!(opt.normalized_timeout(), 30);
        assert_eq!(opt.normalized_depth(), 2);
    }

    #[test]
    fn test_source_type_names() {
        let source = ScmSource::Github(GithubSource {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            ..GithubSource::default()
        });
        assert_eq!(source.type_name(), "github");
    }

    #[test]
    fn test_source_valid_regex_filter() {
        let source = ScmSource::Git(GitSource {
            url: "https://example.com/repo.git".to_string(),
            regex_filter: Some("release-.*".to_string()),
            ..GitSource::default()
        });
        assert!(source.validate().is_ok());
    }

    #[test]
    fn test_source_invalid_regex_filter() {
        let source = ScmSource::Git(GitSource {
            url: "https://example.com/repo.git".to_string(),
            regex_filter: Some("release-(".to_string()),
            ..GitSource::default()
        });
        assert!(matches!(
            source.validate(),
            Err(ValidationError::InvalidBranchFilter { .. })
        ));
    }

    #[test]
    fn test_source_serde_discriminator() {
        let source = ScmSource::Svn(SvnSource {
            remote: "https://svn.example.com/repo".to_string(),
            includes: "trunk,branches/*".to_string(),
            ..SvnSource::default()
        });
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["source_type"], "svn");
    }
}
