use crate::classify::Category;
use crate::error::{ChangelogError, Result};
use semver::{BuildMetadata, Prerelease, Version};

/// Represents the type of semantic version bump to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl From<Category> for VersionBump {
    /// Map a change category to the version component it increments.
    ///
    /// Chore maps to Patch: a run with no classified changes still produces
    /// a patch-level bump rather than an absent result.
    fn from(category: Category) -> Self {
        match category {
            Category::Breaking => VersionBump::Major,
            Category::Feature => VersionBump::Minor,
            Category::Fix | Category::Chore => VersionBump::Patch,
        }
    }
}

/// Parses a version string, tolerating a leading 'v' or 'V' prefix.
///
/// # Arguments
/// * `raw` - Version string to parse (e.g., "1.2.3" or "v1.2.3")
pub fn parse_version(raw: &str) -> Result<Version> {
    let clean = raw.trim().trim_start_matches('v').trim_start_matches('V');

    Version::parse(clean)
        .map_err(|e| ChangelogError::version(format!("cannot parse '{}': {}", raw, e)))
}

/// Bumps a version according to the specified bump type.
///
/// Increments the appropriate version component and resets lower components
/// to 0; pre-release and build metadata are cleared.
pub fn bump_version(mut version: Version, bump: VersionBump) -> Version {
    match bump {
        VersionBump::Major => {
            version.major += 1;
            version.minor = 0;
            version.patch = 0;
        }
        VersionBump::Minor => {
            version.minor += 1;
            version.patch = 0;
        }
        VersionBump::Patch => {
            version.patch += 1;
        }
    }
    version.pre = Prerelease::EMPTY;
    version.build = BuildMetadata::EMPTY;
    version
}

/// Compute the next version from the current version string and a bump type
pub fn next_version(current: &str, bump: VersionBump) -> Result<Version> {
    Ok(bump_version(parse_version(current)?, bump))
}
