//! Release version arithmetic (`major.minor.patch`).

use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// A release number such as `25.3.4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ReleaseVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// The patch release before this one.
    ///
    /// `25.3.4` → `25.3.3`. A `.0` release has no inferable predecessor.
    pub fn previous(&self) -> Result<Self, VersionError> {
        match self.patch.checked_sub(1) {
            Some(patch) => Ok(Self { patch, ..*self }),
            None => Err(VersionError::NoPrevious(self.to_string())),
        }
    }

    /// Git tag name for this release.
    pub fn tag(&self, prefix: &str) -> String {
        format!("{prefix}{self}")
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ReleaseVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::Malformed(s.to_string());

        let parts: Vec<u32> = s
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| malformed()))
            .collect::<Result<_, _>>()?;

        match parts.as_slice() {
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(malformed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("25.3.4".parse(), Ok(ReleaseVersion::new(25, 3, 4)));
        assert_eq!(" 25.3.4 ".parse(), Ok(ReleaseVersion::new(25, 3, 4)));
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "25.3", "25.3.4.1", "25.x.4", "v25.3.4", "25..4"] {
            assert_eq!(
                input.parse::<ReleaseVersion>(),
                Err(VersionError::Malformed(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_previous() {
        let v: ReleaseVersion = "25.3.4".parse().unwrap();
        assert_eq!(v.previous().unwrap().to_string(), "25.3.3");

        let v: ReleaseVersion = "25.3.0".parse().unwrap();
        assert_eq!(v.previous(), Err(VersionError::NoPrevious("25.3.0".to_string())));
    }

    #[test]
    fn test_tag() {
        let v = ReleaseVersion::new(25, 3, 4);
        assert_eq!(v.tag(""), "25.3.4");
        assert_eq!(v.tag("release-"), "release-25.3.4");
    }

    #[test]
    fn test_ordering() {
        assert!(ReleaseVersion::new(25, 3, 10) > ReleaseVersion::new(25, 3, 9));
        assert!(ReleaseVersion::new(25, 4, 0) > ReleaseVersion::new(25, 3, 9));
    }
}
