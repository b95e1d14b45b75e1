//! Read-only table of regional configurations
//!
//! Loaded once at startup, from the built-in seed or from a JSON file, and
//! never mutated afterwards. Changing the table means restarting the process.

use crate::error::ConfigError;
use crate::jurisdiction::RegionalConfig;
use crate::regions;
use lazy_static::lazy_static;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{error, info};

/// Environment variable naming a JSON file that replaces the built-in seed
pub const CONFIG_PATH_ENV: &str = "NOTICE_REGIONAL_CONFIG";

lazy_static! {
    static ref BUILTIN: RegionalConfigStore = RegionalConfigStore::builtin().unwrap_or_else(|e| {
        error!("Built-in regional configuration rejected, no jurisdiction rules apply: {}", e);
        RegionalConfigStore::default()
    });
}

#[derive(Debug, Clone, Default)]
pub struct RegionalConfigStore {
    configs: BTreeMap<String, RegionalConfig>,
}

impl RegionalConfigStore {
    /// Validate and index `configs`; any invalid entry rejects the whole set
    pub fn new(configs: impl IntoIterator<Item = RegionalConfig>) -> Result<Self, ConfigError> {
        let mut table = BTreeMap::new();
        for config in configs {
            config.validate()?;
            if table.contains_key(&config.jurisdiction_id) {
                return Err(ConfigError::DuplicateJurisdiction(config.jurisdiction_id));
            }
            table.insert(config.jurisdiction_id.clone(), config);
        }
        Ok(Self { configs: table })
    }

    /// The seed shipped with the engine (`GN_CONAKRY`, `SN_DAKAR`, `CI_ABIDJAN`)
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(regions::builtin_configs())
    }

    /// Process-wide built-in table
    ///
    /// Empty, after logging an error, if the seed fails validation.
    pub fn global() -> &'static RegionalConfigStore {
        &BUILTIN
    }

    /// Parse a JSON array of configurations
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let configs: Vec<RegionalConfig> = serde_json::from_str(json)?;
        Self::new(configs)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            jurisdictions = store.len(),
            "Loaded regional configuration"
        );
        Ok(store)
    }

    /// Load from `$NOTICE_REGIONAL_CONFIG` if set, otherwise the built-in seed
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()),
            _ => {
                info!("{} not set, using built-in regional configuration", CONFIG_PATH_ENV);
                Self::builtin()
            }
        }
    }

    /// Look up a jurisdiction; `None` means "apply no jurisdiction rule"
    pub fn get(&self, jurisdiction_id: &str) -> Option<&RegionalConfig> {
        self.configs.get(jurisdiction_id)
    }

    pub fn contains(&self, jurisdiction_id: &str) -> bool {
        self.configs.contains_key(jurisdiction_id)
    }

    /// Jurisdiction keys in sorted order
    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionalConfig> {
        self.configs.values()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdiction::DeadlineCategory;

    #[test]
    fn test_builtin_lookup() {
        let store = RegionalConfigStore::builtin().unwrap();
        let conakry = store.get("GN_CONAKRY").expect("seeded");
        assert_eq!(conakry.currency_code, "GNF");
        assert_eq!(conakry.deadline_days(DeadlineCategory::NoticeToQuit), 90);
    }

    #[test]
    fn test_unknown_jurisdiction_is_none() {
        let store = RegionalConfigStore::builtin().unwrap();
        assert!(store.get("UNKNOWN_JURISDICTION").is_none());
        assert!(store.get("").is_none());
        assert!(store.get("gn_conakry").is_none());
    }

    #[test]
    fn test_jurisdictions_sorted() {
        let store = RegionalConfigStore::builtin().unwrap();
        let keys: Vec<_> = store.jurisdictions().collect();
        assert_eq!(keys, vec!["CI_ABIDJAN", "GN_CONAKRY", "SN_DAKAR"]);
    }

    #[test]
    fn test_global_matches_builtin() {
        let builtin = RegionalConfigStore::builtin().expect("seed passes validation");
        assert_eq!(builtin.len(), 3);
        assert_eq!(RegionalConfigStore::global().len(), builtin.len());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = RegionalConfigStore::new(vec![
            RegionalConfig::new("GN_CONAKRY", "Guinea", "Conakry"),
            RegionalConfig::new("GN_CONAKRY", "Guinea", "Kaloum"),
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateJurisdiction(id)) if id == "GN_CONAKRY"
        ));
    }

    #[test]
    fn test_invalid_entry_rejects_whole_set() {
        let result = RegionalConfigStore::new(vec![
            RegionalConfig::new("GN_CONAKRY", "Guinea", "Conakry"),
            RegionalConfig::new("", "Nowhere", "Nowhere"),
        ]);
        assert!(matches!(result, Err(ConfigError::EmptyJurisdictionId)));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {
                "jurisdiction_id": "ML_BAMAKO",
                "country": "Mali",
                "region": "Bamako",
                "contract_language": "fr",
                "currency_code": "XOF",
                "legal_deadlines": { "notice_to_quit": 60 },
                "payment_methods": { "methods": ["cash"], "preferred": "cash" }
            }
        ]"#;
        let store = RegionalConfigStore::from_json_str(json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store
                .get("ML_BAMAKO")
                .unwrap()
                .deadline_days(DeadlineCategory::NoticeToQuit),
            60
        );
    }

    #[test]
    fn test_negative_deadline_is_a_parse_error() {
        let json = r#"[
            {
                "jurisdiction_id": "ML_BAMAKO",
                "country": "Mali",
                "region": "Bamako",
                "contract_language": "fr",
                "currency_code": "XOF",
                "legal_deadlines": { "notice_to_quit": -5 },
                "payment_methods": { "methods": ["cash"], "preferred": "cash" }
            }
        ]"#;
        assert!(matches!(
            RegionalConfigStore::from_json_str(json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RegionalConfigStore::from_path("/nonexistent/regional.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_builtin_round_trips_through_json() {
        let builtin = RegionalConfigStore::builtin().unwrap();
        let configs: Vec<_> = builtin.iter().cloned().collect();
        let json = serde_json::to_string(&configs).unwrap();
        let reloaded = RegionalConfigStore::from_json_str(&json).unwrap();
        assert_eq!(reloaded.len(), builtin.len());
        for config in builtin.iter() {
            assert_eq!(reloaded.get(&config.jurisdiction_id), Some(config));
        }
    }
}
