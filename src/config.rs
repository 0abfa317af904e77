use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for a catalog, stored as `config.json` in the data
/// directory. Each collection gets its own JSON file; the names can be
/// overridden per deployment, missing entries fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding all collection files.
    pub data_dir: PathBuf,

    #[serde(default = "default_activities_file")]
    pub activities_file: String,
    #[serde(default = "default_authors_file")]
    pub authors_file: String,
    #[serde(default = "default_books_file")]
    pub books_file: String,
    #[serde(default = "default_genres_file")]
    pub genres_file: String,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    #[serde(default = "default_sales_file")]
    pub sale_histories_file: String,
}

fn default_activities_file() -> String {
    "activities.json".to_string()
}

fn default_authors_file() -> String {
    "authors.json".to_string()
}

fn default_books_file() -> String {
    "books.json".to_string()
}

fn default_genres_file() -> String {
    "genres.json".to_string()
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_sales_file() -> String {
    "sale_histories.json".to_string()
}

impl CatalogConfig {
    /// Config rooted at the given data directory, with default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            activities_file: default_activities_file(),
            authors_file: default_authors_file(),
            books_file: default_books_file(),
            genres_file: default_genres_file(),
            users_file: default_users_file(),
            sale_histories_file: default_sales_file(),
        }
    }

    /// The platform data directory for bookhaven, e.g.
    /// `~/.local/share/bookhaven` on Linux.
    pub fn default_data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bookhaven", "bookhaven")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load config from `config_dir/config.json`, falling back to a
    /// default config rooted at `config_dir` when the file is absent.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        let config_path = config_dir.join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::new(config_dir));
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CatalogConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to `config_dir/config.json`, creating the directory
    /// if needed.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn activities_path(&self) -> PathBuf {
        self.data_dir.join(&self.activities_file)
    }

    pub fn authors_path(&self) -> PathBuf {
        self.data_dir.join(&self.authors_file)
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    pub fn genres_path(&self) -> PathBuf {
        self.data_dir.join(&self.genres_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn sale_histories_path(&self) -> PathBuf {
        self.data_dir.join(&self.sale_histories_file)
    }
}
