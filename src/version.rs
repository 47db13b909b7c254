//! Release version grammar.
//!
//! Versions follow the PEP-386/PEP-440 style `N.N(.N)*[{a|b|rc}N[.N]][.postN][.devN]`.
//! Components are kept as text: `0.01` and `0.1` are different versions here.

use std::sync::OnceLock;

use regex::Regex;

/// Full-string grammar every accepted version must match.
pub const VERSION_PATTERN: &str = concat!(
    r"^(?P<version>\d+\.\d+)(?P<extraversion>(?:\.\d+)*)",
    r"(?:(?P<prerel>[ab]|rc)\d+(?:\.\d+)?)?(?P<postdev>(\.post(?P<post>\d+))?",
    r"(\.dev(?P<dev>\d+))?)?$"
);

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version grammar is a valid regex"))
}

/// Pre-release marker of a version, e.g. `rc1` or `b2.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub marker: String,
    pub number: String,
}

impl std::fmt::Display for PreRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.marker, self.number)
    }
}

/// Components of a version that matched the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParts {
    /// Release segments, at least two.
    pub release: Vec<String>,
    pub pre_release: Option<PreRelease>,
    pub post: Option<String>,
    pub dev: Option<String>,
}

impl VersionParts {
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some() || self.dev.is_some()
    }
}

/// Checks whether `version` conforms to the release version grammar.
///
/// The whole string must match; there is no partial or prefix matching and
/// the empty string is rejected.
pub fn is_valid(version: &str) -> bool {
    version_regex().is_match(version)
}

/// Splits a grammar-conforming version into its components.
///
/// # Returns
/// * `Some(VersionParts)` - `version` matched the grammar
/// * `None` - `version` is not a valid release version
///
/// # Example
/// ```
/// let parts = vercheck::version::parse("1.2.3rc1.post4").unwrap();
/// assert_eq!(parts.release, vec!["1", "2", "3"]);
/// assert_eq!(parts.pre_release.unwrap().to_string(), "rc1");
/// assert_eq!(parts.post.as_deref(), Some("4"));
/// ```
pub fn parse(version: &str) -> Option<VersionParts> {
    let caps = version_regex().captures(version)?;

    let base = caps.name("version")?;
    let extra = caps.name("extraversion");
    let release_end = extra.map_or(base.end(), |m| m.end());
    let release = version[..release_end]
        .split('.')
        .map(str::to_string)
        .collect();

    // The pre-release text sits between the release segments and the
    // post/dev suffix; only its marker has a named group.
    let pre_release = caps.name("prerel").map(|marker| {
        let suffix_start = caps
            .name("postdev")
            .map_or(version.len(), |m| m.start());
        PreRelease {
            marker: marker.as_str().to_string(),
            number: version[marker.end()..suffix_start].to_string(),
        }
    });

    Some(VersionParts {
        release,
        pre_release,
        post: caps.name("post").map(|m| m.as_str().to_string()),
        dev: caps.name("dev").map(|m| m.as_str().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_versions() {
        for version in [
            "0.1",
            "0.1.0",
            "1.1.0a1",
            "2.1.0b2",
            "3.1.0rc1",
            "4.1.0.post1",
            "5.1.0.dev1",
            "6.1.0a1.dev1",
            "7.2.3.post4.dev5",
            "1.0b2.1",
            "10.20.30.40.50",
            "007.0100",
        ] {
            assert!(is_valid(version), "{} should be valid", version);
        }
    }

    #[test]
    fn test_invalid_versions() {
        for version in [
            "",
            "1",
            "v1.0.0",
            "0.1a.0",
            "0.1.0a",
            "0.1.0a.dev0",
            "0.1.0a2.post",
            "0.1.0post1",
            "0.1.0a1.dev2.post0",
            "0.1.0a1b1",
            "0.1.0c1",
            "1.0.0-rc1",
            "1.0.0 ",
            " 1.0.0",
            "1.0.0\n",
            "1..0",
        ] {
            assert!(!is_valid(version), "{:?} should be invalid", version);
        }
    }

    fn release() -> impl Strategy<Value = Vec<u64>> {
        prop::collection::vec(any::<u64>(), 2..=5)
    }

    fn pre_release() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["a", "b", "rc"]),
            any::<u64>(),
            prop::option::of(any::<u64>()),
        )
            .prop_map(|(marker, number, sub)| match sub {
                Some(sub) => format!("{}{}.{}", marker, number, sub),
                None => format!("{}{}", marker, number),
            })
    }

    fn post_dev() -> impl Strategy<Value = String> {
        (prop::option::of(any::<u64>()), prop::option::of(any::<u64>())).prop_map(
            |(post, dev)| {
                let mut suffix = String::new();
                if let Some(post) = post {
                    suffix.push_str(&format!(".post{}", post));
                }
                if let Some(dev) = dev {
                    suffix.push_str(&format!(".dev{}", dev));
                }
                suffix
            },
        )
    }

    fn join_release(segments: &[u64]) -> String {
        segments
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    proptest! {
        #[test]
        fn test_generated_versions_are_valid(
            segments in release(),
            pre in prop::option::of(pre_release()),
            suffix in post_dev(),
        ) {
            let version = format!(
                "{}{}{}",
                join_release(&segments),
                pre.clone().unwrap_or_default(),
                suffix
            );
            prop_assert!(is_valid(&version), "{} should be valid", version);

            let parts = parse(&version).unwrap();
            prop_assert_eq!(parts.release.join("."), join_release(&segments));
            prop_assert_eq!(parts.pre_release.map(|p| p.to_string()), pre);
        }

        #[test]
        fn test_dangling_suffix_is_invalid(
            segments in release(),
            pre in prop::option::of(pre_release()),
            suffix in post_dev(),
            dangling in prop::sample::select(vec!["a", "b", "rc", ".post", ".dev", "."]),
        ) {
            let version = format!(
                "{}{}{}{}",
                join_release(&segments),
                pre.unwrap_or_default(),
                suffix,
                dangling
            );
            prop_assert!(!is_valid(&version), "{} should be invalid", version);
        }

        #[test]
        fn test_second_pre_release_marker_is_invalid(
            segments in release(),
            first in pre_release(),
            second in pre_release(),
            suffix in post_dev(),
        ) {
            let version = format!("{}{}{}{}", join_release(&segments), first, second, suffix);
            prop_assert!(!is_valid(&version), "{} should be invalid", version);
        }
    }

    #[test]
    fn test_parse_plain_release() {
        let parts = parse("1.2.3").unwrap();
        assert_eq!(parts.release, vec!["1", "2", "3"]);
        assert_eq!(parts.pre_release, None);
        assert_eq!(parts.post, None);
        assert_eq!(parts.dev, None);
        assert!(!parts.is_pre_release());
    }

    #[test]
    fn test_parse_keeps_leading_zeros() {
        let parts = parse("01.002").unwrap();
        assert_eq!(parts.release, vec!["01", "002"]);
    }

    #[test]
    fn test_parse_all_components() {
        let parts = parse("2.0b3.1.post2.dev7").unwrap();
        assert_eq!(parts.release, vec!["2", "0"]);
        assert_eq!(
            parts.pre_release,
            Some(PreRelease {
                marker: "b".to_string(),
                number: "3.1".to_string(),
            })
        );
        assert_eq!(parts.post.as_deref(), Some("2"));
        assert_eq!(parts.dev.as_deref(), Some("7"));
        assert!(parts.is_pre_release());
    }

    #[test]
    fn test_parse_dev_release_is_pre_release() {
        let parts = parse("5.1.0.dev1").unwrap();
        assert_eq!(parts.pre_release, None);
        assert!(parts.is_pre_release());
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(parse("0.1.0a"), None);
        assert_eq!(parse(""), None);
    }
}
