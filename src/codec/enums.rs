//! Static lookup tables
//!
//! Bidirectional mapping between Jenkins parameter class names and short
//! type tags, plus the per-provider fork pull-request trust enumerations.
//! The tables are built once and only ever read, so concurrent callers need
//! no synchronization.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::pipeline::params::ParameterKind;

static PARAMETER_TYPES: &[(&str, &str)] = &[
    ("hudson.model.StringParameterDefinition", "string"),
    ("hudson.model.ChoiceParameterDefinition", "choice"),
    ("hudson.model.TextParameterDefinition", "text"),
    ("hudson.model.BooleanParameterDefinition", "boolean"),
    ("hudson.model.FileParameterDefinition", "file"),
    ("hudson.model.PasswordParameterDefinition", "password"),
];

static LONG_TO_TAG: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PARAMETER_TYPES.iter().copied().collect());

static TAG_TO_LONG: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PARAMETER_TYPES.iter().map(|(long, tag)| (*tag, *long)).collect());

/// Jenkins class name for a parameter kind.
///
/// Pass-through kinds come back verbatim, so an unrecognized class survives
/// an encode/decode cycle unchanged.
#[must_use]
pub fn long_name_for(kind: &ParameterKind) -> String {
    TAG_TO_LONG
        .get(kind.as_tag())
        .map_or_else(|| kind.as_tag().to_string(), |long| (*long).to_string())
}

/// Parameter kind for a Jenkins class name. Unknown class names become
/// [`ParameterKind::Custom`] carrying the class name itself, never an error.
#[must_use]
pub fn kind_for_long_name(class: &str) -> ParameterKind {
    LONG_TO_TAG
        .get(class)
        .map_or_else(|| ParameterKind::Custom(class.to_string()), |tag| ParameterKind::from_tag(tag))
}

/// Fork pull-request trust for Git-family providers without their own
/// enumeration (GitLab merge requests use this one too).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrDiscoverTrust(pub i32);

impl PrDiscoverTrust {
    /// Trust members of the origin project.
    pub const MEMBERS: Self = Self(1);
    /// Trust everyone.
    pub const EVERYONE: Self = Self(2);
    /// Sentinel for unrecognized names.
    pub const INVALID: Self = Self(-1);

    /// Canonical name, or the empty string for values outside the
    /// enumeration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MEMBERS => "TrustMembers",
            Self::EVERYONE => "TrustEveryone",
            _ => "",
        }
    }

    /// Resolves a canonical name. Unrecognized names yield
    /// [`PrDiscoverTrust::INVALID`].
    #[must_use]
    pub fn parse_from_string(name: &str) -> Self {
        match name {
            "TrustMembers" => Self::MEMBERS,
            "TrustEveryone" => Self::EVERYONE,
            _ => Self::INVALID,
        }
    }

    /// Whether the value is inside the enumeration.
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::MEMBERS | Self::EVERYONE)
    }
}

/// Fork pull-request trust levels of the GitHub branch source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GithubPrDiscoverTrust(pub i32);

impl GithubPrDiscoverTrust {
    /// Trust users with prior commits to the repository.
    pub const CONTRIBUTORS: Self = Self(1);
    /// Trust everyone.
    pub const EVERYONE: Self = Self(2);
    /// Trust users with write permission.
    pub const PERMISSION: Self = Self(3);
    /// Trust nobody.
    pub const NOBODY: Self = Self(4);
    /// Sentinel for unrecognized names.
    pub const INVALID: Self = Self(-1);

    /// Canonical name, or the empty string for values outside the
    /// enumeration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CONTRIBUTORS => "TrustContributors",
            Self::EVERYONE => "TrustEveryone",
            Self::PERMISSION => "TrustPermission",
            Self::NOBODY => "TrustNobody",
            _ => "",
        }
    }

    /// Resolves a canonical name. Unrecognized names yield
    /// [`GithubPrDiscoverTrust::INVALID`].
    #[must_use]
    pub fn parse_from_string(name: &str) -> Self {
        match name {
            "TrustContributors" => Self::CONTRIBUTORS,
            "TrustEveryone" => Self::EVERYONE,
            "TrustPermission" => Self::PERMISSION,
            "TrustNobody" => Self::NOBODY,
            _ => Self::INVALID,
        }
    }

    /// Whether the value is inside the enumeration.
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(
            self,
            Self::CONTRIBUTORS | Self::EVERYONE | Self::PERMISSION | Self::NOBODY
        )
    }
}

/// Fork pull-request trust levels of the Bitbucket branch source.
///
/// Unlike the other enumerations, unrecognized names resolve to
/// [`BitbucketPrDiscoverTrust::EVERYONE`] rather than an invalid sentinel;
/// existing configurations rely on that default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitbucketPrDiscoverTrust(pub i32);

impl BitbucketPrDiscoverTrust {
    /// Trust everyone.
    pub const EVERYONE: Self = Self(1);
    /// Trust forks owned by the same team.
    pub const TEAM_FORKS: Self = Self(2);
    /// Trust nobody.
    pub const NOBODY: Self = Self(3);

    /// Canonical name, or the empty string for values outside the
    /// enumeration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EVERYONE => "TrustEveryone",
            Self::TEAM_FORKS => "TrustTeamForks",
            Self::NOBODY => "TrustNobody",
            _ => "",
        }
    }

    /// Resolves a canonical name, defaulting to
    /// [`BitbucketPrDiscoverTrust::EVERYONE`] for unrecognized names.
    #[must_use]
    pub fn parse_from_string(name: &str) -> Self {
        match name {
            "TrustTeamForks" => Self::TEAM_FORKS,
            "TrustNobody" => Self::NOBODY,
            _ => Self::EVERYONE,
        }
    }

    /// Whether the value is inside the enumeration.
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::EVERYONE | Self::TEAM_FORKS | Self::NOBODY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_table_both_directions() {
        for (long, tag) in PARAMETER_TYPES.iter().copied() {
            let kind = kind_for_long_name(long);
            assert_eq!(kind.as_tag(), tag);
            assert_eq!(long_name_for(&kind), long);
        }
    }

    #[test]
    fn test_unknown_long_name_passes_through() {
        let kind = kind_for_long_name("InvalidParameterDefinition");
        assert_eq!(
            kind,
            ParameterKind::Custom("InvalidParameterDefinition".to_string())
        );
        assert_eq!(long_name_for(&kind), "InvalidParameterDefinition");
    }

    #[test]
    fn test_pr_discover_trust_unknown_is_invalid() {
        let trust = PrDiscoverTrust::parse_from_string("fake");
        assert!(!trust.is_valid());
        assert_eq!(trust, PrDiscoverTrust::INVALID);
        assert_eq!(trust.as_str(), "");
    }

    #[test]
    fn test_github_trust_round_trip() {
        for trust in [
            GithubPrDiscoverTrust::CONTRIBUTORS,
            GithubPrDiscoverTrust::EVERYONE,
            GithubPrDiscoverTrust::PERMISSION,
            GithubPrDiscoverTrust::NOBODY,
        ] {
            assert_eq!(GithubPrDiscoverTrust::parse_from_string(trust.as_str()), trust);
            assert!(trust.is_valid());
        }
        assert!(!GithubPrDiscoverTrust::parse_from_string("fake").is_valid());
    }

    #[test]
    fn test_bitbucket_trust_defaults_to_everyone() {
        assert_eq!(
            BitbucketPrDiscoverTrust::parse_from_string("fake"),
            BitbucketPrDiscoverTrust::EVERYONE
        );
        assert_eq!(
            BitbucketPrDiscoverTrust::parse_from_string("TrustTeamForks"),
            BitbucketPrDiscoverTrust::TEAM_FORKS
        );
        assert!(!BitbucketPrDiscoverTrust(7).is_valid());
    }
}
