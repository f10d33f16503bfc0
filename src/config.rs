use serde::Deserialize;

use std::path::PathBuf;

/// Which repository implementation backs the API.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// One SQLite table per entity kind.
    #[default]
    Table,
    /// JSON collections in a key-value table, like browser local storage.
    Local,
}

/// Application settings read from `Rocket.toml` / `ROCKET_*` variables.
#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default)]
    pub store: StoreKind,
}

fn default_database() -> PathBuf {
    PathBuf::from("goal-tracker.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::figment::providers::Serialized;
    use rocket::figment::Figment;

    #[test]
    fn falls_back_to_defaults() {
        let config: AppConfig = Figment::new().extract().unwrap();

        assert_eq!(config.database, PathBuf::from("goal-tracker.db"));
        assert_eq!(config.store, StoreKind::Table);
    }

    #[test]
    fn reads_store_kind() {
        let config: AppConfig = Figment::new()
            .merge(Serialized::default("store", "local"))
            .merge(Serialized::default("database", "/tmp/goals.db"))
            .extract()
            .unwrap();

        assert_eq!(config.store, StoreKind::Local);
        assert_eq!(config.database, PathBuf::from("/tmp/goals.db"));
    }
}
