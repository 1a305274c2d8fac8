//! Runtime configuration
//!
//! Resolved once in `main` from flags and environment variables (optionally
//! loaded from `.gogist.env`) and then passed to every command.

use std::env;
use std::io;
use std::path::PathBuf;

use crate::api::GITHUB_API_BASE;
use crate::error::GistError;
use crate::store::TokenStore;

/// Token file name, relative to the user's home directory
pub const TOKEN_FILE: &str = ".gogist";

/// Dotenv file loaded from the working directory at startup
pub const ENV_FILE: &str = ".gogist.env";

pub const TOKEN_PATH_ENV: &str = "GOGIST_TOKEN_PATH";
pub const API_BASE_ENV: &str = "GOGIST_API_BASE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub token_path: PathBuf,
    pub api_base: String,
}

impl Config {
    pub fn new(token_path: impl Into<PathBuf>, api_base: &str) -> Config {
        Config {
            token_path: token_path.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// The token path comes from `token_path` if given, then
    /// `GOGIST_TOKEN_PATH`, then `<home>/.gogist`. The API base comes from
    /// `GOGIST_API_BASE` or defaults to api.github.com.
    pub fn from_env(token_path: Option<PathBuf>) -> Result<Config, GistError> {
        let token_path = match token_path.or_else(|| non_empty_var(TOKEN_PATH_ENV).map(PathBuf::from)) {
            Some(path) => path,
            None => default_token_path()?,
        };

        let api_base = non_empty_var(API_BASE_ENV).unwrap_or_else(|| GITHUB_API_BASE.to_string());

        Ok(Config::new(token_path, &api_base))
    }

    pub fn token_store(&self) -> TokenStore {
        TokenStore::new(&self.token_path)
    }
}

/// `<home>/.gogist`
pub fn default_token_path() -> Result<PathBuf, GistError> {
    let home = dirs::home_dir().ok_or_else(|| {
        GistError::io(
            "resolving token path",
            io::Error::new(io::ErrorKind::NotFound, "home directory not found"),
        )
    })?;

    Ok(home.join(TOKEN_FILE))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
