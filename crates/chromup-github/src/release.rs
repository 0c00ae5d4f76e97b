use serde::Deserialize;

use crate::error::{Error, Result};

/// A published release: version tag plus downloadable assets, in feed order.
#[derive(Clone, Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<Asset>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// First asset whose name ends with `suffix`.
    ///
    /// Distributions publish several artifacts per release (installers,
    /// debug symbols, other platforms); the suffix identifies the one
    /// portable archive the launcher installs from.
    pub fn asset_ending_with(&self, suffix: &str) -> Result<&Asset> {
        self.assets
            .iter()
            .find(|a| a.name.ends_with(suffix))
            .ok_or_else(|| Error::AssetNotFound {
                suffix: suffix.to_string(),
            })
    }
}
