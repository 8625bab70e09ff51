//! Constants shared by the option declarations and the General page

use crate::config::options::OptionError;

/// Canonical server hostnames, first entry is the default server
pub const OFFICIAL_SERVERS: [&str; 2] = ["musicbrainz.org", "beta.musicbrainz.org"];

/// Whether `host` is one of the canonical servers
pub fn is_official_server(host: &str) -> bool {
    OFFICIAL_SERVERS.contains(&host)
}

/// One selectable program update level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateLevel {
    pub value: i64,
    pub name: &'static str,
    /// Untranslated label
    pub title: &'static str,
}

/// Known update levels, in display order
pub const UPDATE_LEVELS: [UpdateLevel; 3] = [
    UpdateLevel {
        value: 0,
        name: "stable",
        title: "Stable releases only",
    },
    UpdateLevel {
        value: 1,
        name: "beta",
        title: "Stable or Beta releases",
    },
    UpdateLevel {
        value: 2,
        name: "dev",
        title: "Stable, Beta or Dev releases",
    },
];

pub const DEFAULT_UPDATE_LEVEL: i64 = 0;

impl UpdateLevel {
    /// Look up a level by its stored value
    pub fn from_value(value: i64) -> Result<UpdateLevel, OptionError> {
        UPDATE_LEVELS
            .iter()
            .copied()
            .find(|level| level.value == value)
            .ok_or(OptionError::OutOfDomain {
                key: "setting/update_level".to_string(),
                value,
            })
    }

    /// Map a stored value onto the known set, substituting the default level
    pub fn clamp(value: i64) -> UpdateLevel {
        match Self::from_value(value) {
            Ok(level) => level,
            Err(err) => {
                log::debug!("{}, using default update level", err);
                Self::default_level()
            }
        }
    }

    pub fn default_level() -> UpdateLevel {
        UPDATE_LEVELS
            .iter()
            .copied()
            .find(|level| level.value == DEFAULT_UPDATE_LEVEL)
            .unwrap_or(UPDATE_LEVELS[0])
    }
}
