use core::fmt;
use core::str::FromStr;

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Separates the owner from the repository name in a full name.
pub const SEPARATOR: char = '/';

/// A fully-qualified `owner/name` pair identifying a hosted repository.
///
/// Both parts are non-empty and never contain [`SEPARATOR`]. Case is kept as
/// supplied; equality is exact, while [`RepositoryIdentity::matches_confirmation`]
/// compares case-insensitively.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RepositoryIdentity {
    owner: String,
    name: String,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidRepository {
    #[error("expected the \"OWNER/REPO\" format, got {0:?}")]
    Format(String),
    #[error("repository owner cannot be empty")]
    EmptyOwner,
    #[error("repository name cannot be empty")]
    EmptyName,
    #[error("{0:?} must not contain '/'")]
    Separator(String),
}

impl RepositoryIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, InvalidRepository> {
        let owner = owner.into();
        let name = name.into();

        if owner.is_empty() {
            return Err(InvalidRepository::EmptyOwner);
        }
        if name.is_empty() {
            return Err(InvalidRepository::EmptyName);
        }
        if owner.contains(SEPARATOR) {
            return Err(InvalidRepository::Separator(owner));
        }
        if name.contains(SEPARATOR) {
            return Err(InvalidRepository::Separator(name));
        }

        Ok(Self { owner, name })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical `owner/name` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}{SEPARATOR}{}", self.owner, self.name)
    }

    /// Whether `input` names this repository, ignoring case.
    ///
    /// No whitespace is stripped: a leading or trailing space is a mismatch.
    #[must_use]
    pub fn matches_confirmation(&self, input: &str) -> bool {
        input.to_lowercase() == self.full_name().to_lowercase()
    }
}

impl FromStr for RepositoryIdentity {
    type Err = InvalidRepository;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| InvalidRepository::Format(s.to_owned()))?;

        Self::new(owner, name)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.full_name())
    }
}

impl Serialize for RepositoryIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.full_name())
    }
}

impl<'de> Deserialize<'de> for RepositoryIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let full_name = String::deserialize(deserializer)?;

        full_name.parse().map_err(SerdeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_full_name() {
        let repo: RepositoryIdentity = "bob/proj".parse().unwrap();

        assert_eq!(repo.owner(), "bob");
        assert_eq!(repo.name(), "proj");
        assert_eq!(repo.full_name(), "bob/proj");
        assert_eq!(repo.to_string(), "bob/proj");
    }

    #[test]
    fn test_case_is_preserved() {
        let repo: RepositoryIdentity = "Bob/Proj".parse().unwrap();

        assert_eq!(repo.full_name(), "Bob/Proj");
        assert_ne!(repo, "bob/proj".parse().unwrap());
    }

    #[test]
    fn test_parse_requires_separator() {
        let err = "proj".parse::<RepositoryIdentity>().unwrap_err();
        assert_eq!(err, InvalidRepository::Format("proj".to_owned()));
    }

    #[test]
    fn test_empty_parts_are_rejected() {
        assert_eq!(
            "/proj".parse::<RepositoryIdentity>().unwrap_err(),
            InvalidRepository::EmptyOwner
        );
        assert_eq!(
            "bob/".parse::<RepositoryIdentity>().unwrap_err(),
            InvalidRepository::EmptyName
        );
    }

    #[test]
    fn test_name_with_extra_separator_is_rejected() {
        let err = "bob/proj/extra".parse::<RepositoryIdentity>().unwrap_err();
        assert_eq!(err, InvalidRepository::Separator("proj/extra".to_owned()));
    }

    #[test]
    fn test_confirmation_ignores_case() {
        let repo = RepositoryIdentity::new("owner", "repo").unwrap();

        assert!(repo.matches_confirmation("owner/repo"));
        assert!(repo.matches_confirmation("Owner/Repo"));
        assert!(repo.matches_confirmation("OWNER/REPO"));
    }

    #[test]
    fn test_confirmation_rejects_near_misses() {
        let repo = RepositoryIdentity::new("owner", "repo").unwrap();

        for input in [
            "",
            "repo",
            "owner/",
            "owner/rep",
            "owner/repo2",
            "xowner/repo",
            " owner/repo",
            "owner/repo ",
            "owner-repo",
        ] {
            assert!(
                !repo.matches_confirmation(input),
                "{input:?} should not confirm owner/repo"
            );
        }
    }

    #[test]
    fn test_serde_uses_full_name() {
        let repo = RepositoryIdentity::new("alice", "myrepo").unwrap();

        assert_eq!(serde_json::to_value(&repo).unwrap(), json!("alice/myrepo"));

        let parsed: RepositoryIdentity = serde_json::from_value(json!("alice/myrepo")).unwrap();
        assert_eq!(parsed, repo);

        let invalid: Result<RepositoryIdentity, _> = serde_json::from_value(json!("alice"));
        assert!(invalid.is_err());
    }
}
