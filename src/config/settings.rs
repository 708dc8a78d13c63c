#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "tournament.db".to_string(),
            pool_size: 4,
            connection_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub database: DatabaseSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the database path taken from `DATABASE_PATH` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        if let Some(path) = lookup("DATABASE_PATH").filter(|p| !p.is_empty()) {
            config.database.path = path;
        }
        config
    }

    pub fn with_database_path(mut self, path: Option<&str>) -> Self {
        if let Some(path) = path {
            self.database.path = path.to_string();
        }
        self
    }
}
