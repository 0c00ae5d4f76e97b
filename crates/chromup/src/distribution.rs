use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported browser build to track.
///
/// Each distribution publishes Windows x64 archives on its own GitHub
/// release feed under its own asset naming scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    Chromium,
    Winchrome,
    Cromite,
}

impl Distribution {
    /// GitHub "latest release" endpoint of the distribution's build feed.
    pub fn feed_url(&self) -> &'static str {
        match self {
            Self::Chromium => {
                "https://api.github.com/repos/ungoogled-software/ungoogled-chromium-windows/releases/latest"
            }
            Self::Winchrome => {
                "https://api.github.com/repos/Hibbiki/chromium-win64/releases/latest"
            }
            Self::Cromite => "https://api.github.com/repos/uazo/cromite/releases/latest",
        }
    }

    /// Suffix identifying the portable Windows x64 archive among the
    /// release assets.
    pub fn asset_suffix(&self) -> &'static str {
        match self {
            Self::Chromium => "windows-x64.zip",
            Self::Winchrome => "chrome-win.zip",
            Self::Cromite => "chrome-win.7z",
        }
    }

    /// Substring of the browser's main window title, used when bringing the
    /// window to the foreground.
    pub fn window_title(&self) -> &'static str {
        match self {
            Self::Chromium | Self::Winchrome => "Chromium",
            Self::Cromite => "Cromite",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Chromium => "chromium",
            Self::Winchrome => "winchrome",
            Self::Cromite => "cromite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_lowercase_names() {
        for (dist, name) in [
            (Distribution::Chromium, "\"chromium\""),
            (Distribution::Winchrome, "\"winchrome\""),
            (Distribution::Cromite, "\"cromite\""),
        ] {
            let encoded = serde_json::to_string(&dist).unwrap();
            assert_eq!(encoded, name);
            let decoded: Distribution = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, dist);
        }
    }

    #[test]
    fn cromite_ships_seven_z() {
        assert!(Distribution::Cromite.asset_suffix().ends_with(".7z"));
        assert!(Distribution::Chromium.asset_suffix().ends_with(".zip"));
    }

    #[test]
    fn feed_urls_point_at_release_endpoints() {
        for dist in [
            Distribution::Chromium,
            Distribution::Winchrome,
            Distribution::Cromite,
        ] {
            assert!(dist.feed_url().ends_with("/releases/latest"));
        }
    }
}
