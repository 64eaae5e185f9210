use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version selector")]
    Empty,
    #[error("`preview` is only valid for the view panel")]
    PreviewNotComparable,
}

/// Which revision the view panel displays. `Preview` renders the in-memory
/// draft and never touches the network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ViewVersion {
    Current,
    Preview,
    Saved(String),
}

impl ViewVersion {
    pub fn is_saved(&self) -> bool {
        matches!(self, ViewVersion::Saved(_))
    }

    /// Path suffix appended to the content endpoint; `Current` fetches the
    /// bare endpoint and `Preview` never fetches at all.
    pub fn path_segment(&self) -> Option<&str> {
        match self {
            ViewVersion::Current | ViewVersion::Preview => None,
            ViewVersion::Saved(id) => Some(id),
        }
    }
}

impl fmt::Display for ViewVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewVersion::Current => f.write_str("current"),
            ViewVersion::Preview => f.write_str("preview"),
            ViewVersion::Saved(id) => f.write_str(id),
        }
    }
}

impl FromStr for ViewVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(VersionError::Empty),
            "current" => Ok(ViewVersion::Current),
            "preview" => Ok(ViewVersion::Preview),
            id => Ok(ViewVersion::Saved(id.to_string())),
        }
    }
}

impl TryFrom<String> for ViewVersion {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Which revision the compare panel diffs against. There is no `Preview`
/// variant: the draft can never be the old side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CompareVersion {
    Current,
    Saved(String),
}

impl CompareVersion {
    pub fn path_segment(&self) -> Option<&str> {
        match self {
            CompareVersion::Current => None,
            CompareVersion::Saved(id) => Some(id),
        }
    }
}

impl fmt::Display for CompareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareVersion::Current => f.write_str("current"),
            CompareVersion::Saved(id) => f.write_str(id),
        }
    }
}

impl FromStr for CompareVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(VersionError::Empty),
            "preview" => Err(VersionError::PreviewNotComparable),
            "current" => Ok(CompareVersion::Current),
            id => Ok(CompareVersion::Saved(id.to_string())),
        }
    }
}

impl TryFrom<String> for CompareVersion {
    type Error = VersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::{CompareVersion, VersionError, ViewVersion};

    #[test]
    fn parses_view_selectors() {
        assert_eq!("current".parse(), Ok(ViewVersion::Current));
        assert_eq!("preview".parse(), Ok(ViewVersion::Preview));
        assert_eq!("v2".parse(), Ok(ViewVersion::Saved("v2".into())));
        assert_eq!("".parse::<ViewVersion>(), Err(VersionError::Empty));
    }

    #[test]
    fn compare_selector_rejects_preview() {
        assert_eq!("current".parse(), Ok(CompareVersion::Current));
        assert_eq!("abc123".parse(), Ok(CompareVersion::Saved("abc123".into())));
        assert_eq!(
            "preview".parse::<CompareVersion>(),
            Err(VersionError::PreviewNotComparable)
        );
        assert_eq!("".parse::<CompareVersion>(), Err(VersionError::Empty));
    }

    #[test]
    fn path_segments_only_for_saved_versions() {
        assert_eq!(ViewVersion::Current.path_segment(), None);
        assert_eq!(ViewVersion::Preview.path_segment(), None);
        assert_eq!(ViewVersion::Saved("7".into()).path_segment(), Some("7"));
        assert_eq!(CompareVersion::Current.path_segment(), None);
        assert_eq!(CompareVersion::Saved("7".into()).path_segment(), Some("7"));
    }

    #[test]
    fn displays_round_trip_parse() {
        for raw in ["current", "preview", "v9"] {
            let version: ViewVersion = raw.parse().expect("parse");
            assert_eq!(version.to_string(), raw);
        }
    }

    #[test]
    fn deserializes_from_json_strings() {
        let version: ViewVersion = serde_json::from_str("\"preview\"").expect("view");
        assert_eq!(version, ViewVersion::Preview);

        let err = serde_json::from_str::<CompareVersion>("\"preview\"").expect_err("compare");
        assert!(err.to_string().contains("only valid for the view panel"));
    }
}
