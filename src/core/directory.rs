//! Building secretary lookup

use crate::domain::Recipient;
use indexmap::IndexMap;

/// Maps building display names to secretary recipients
#[derive(Debug, Clone, Default)]
pub struct SecretaryDirectory {
    entries: IndexMap<String, String>,
    fallback: Option<Recipient>,
}

impl SecretaryDirectory {
    /// Creates a directory from `[building_secretaries]` and the administrator address
    pub fn new(entries: IndexMap<String, String>, fallback: Option<Recipient>) -> Self {
        Self { entries, fallback }
    }

    /// Resolves the recipient for a building
    ///
    /// Names match exactly after trimming, then ignoring ASCII case. A building
    /// without an entry falls back to the administrator. An entry that is present
    /// but holds no address yields `None`.
    pub fn resolve(&self, building: &str) -> Option<Recipient> {
        let building = building.trim();
        let entry = self.entries.get(building).or_else(|| {
            self.entries
                .iter()
                .find(|(name, _)| name.trim().eq_ignore_ascii_case(building))
                .map(|(_, value)| value)
        });

        match entry {
            Some(raw) => Recipient::parse(raw),
            None => {
                tracing::info!(
                    building = %building,
                    "No secretary configured for building, using administrator"
                );
                self.fallback.clone()
            }
        }
    }
}
