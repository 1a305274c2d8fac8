//! Error kinds surfaced by every gogist operation
//!
//! Each kind maps to its own process exit code so scripts can tell a
//! missing login apart from a rejected request or a bad glob.

use std::io;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum GistError {
    /// Local I/O failed: reading inputs, the token file, stdin or stdout
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A `--glob` pattern could not be parsed
    #[error("invalid glob pattern `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Two resolved files share the same base name
    #[error("error matching files have the same name: {name}")]
    DuplicateFileName { name: String },

    /// The GitHub API call failed or returned a non-success status
    #[error("{}", remote_message(.status, .message))]
    Remote {
        status: Option<u16>,
        message: String,
    },

    #[error("no token found at `{}`, run `gogist login` first", .path.display())]
    TokenNotFound { path: PathBuf },

    #[error("missing {field}: pass it as a flag or run from a terminal to be prompted")]
    MissingInput { field: &'static str },
}

fn remote_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("GitHub API error ({}): {}", status, message),
        None => format!("GitHub API request failed: {}", message),
    }
}

impl GistError {
    pub fn io(context: impl Into<String>, source: io::Error) -> GistError {
        GistError::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this kind of failure
    pub fn exit_code(&self) -> i32 {
        match self {
            GistError::MissingInput { .. } => 2,
            GistError::Io { .. } => 3,
            GistError::Glob { .. } => 4,
            GistError::DuplicateFileName { .. } => 5,
            GistError::Remote { .. } => 6,
            GistError::TokenNotFound { .. } => 7,
        }
    }

    /// Build a `Remote` error from a failed response body.
    ///
    /// GitHub reports failures as `{"message": "..."}`; anything else is
    /// passed through as-is.
    pub fn from_response(status: u16, body: &str) -> GistError {
        #[derive(Deserialize)]
        struct ApiErrorBody {
            message: String,
        }

        let message = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => parsed.message,
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.trim().to_string(),
        };

        GistError::Remote {
            status: Some(status),
            message,
        }
    }
}

impl From<reqwest::Error> for GistError {
    fn from(err: reqwest::Error) -> GistError {
        GistError::Remote {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = vec![
            GistError::MissingInput { field: "username" },
            GistError::io("reading a.txt", io::Error::from(io::ErrorKind::NotFound)),
            GistError::Glob {
                pattern: "[".to_string(),
                source: glob::Pattern::new("[").unwrap_err(),
            },
            GistError::DuplicateFileName {
                name: "dup.txt".to_string(),
            },
            GistError::Remote {
                status: Some(500),
                message: "boom".to_string(),
            },
            GistError::TokenNotFound {
                path: PathBuf::from("/home/u/.gogist"),
            },
        ];

        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|&c| c != 0 && c != 1));
    }

    #[test]
    fn test_from_response_uses_github_message() {
        let err = GistError::from_response(
            401,
            r#"{"message": "Bad credentials", "documentation_url": "https://docs.github.com"}"#,
        );

        match &err {
            GistError::Remote { status, message } => {
                assert_eq!(*status, Some(401));
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "GitHub API error (401): Bad credentials");
    }

    #[test]
    fn test_from_response_falls_back_to_raw_body() {
        let err = GistError::from_response(502, "  Bad Gateway\n");
        assert_eq!(err.to_string(), "GitHub API error (502): Bad Gateway");

        let err = GistError::from_response(500, "");
        assert_eq!(err.to_string(), "GitHub API error (500): empty response body");
    }

    #[test]
    fn test_duplicate_file_name_display() {
        let err = GistError::DuplicateFileName {
            name: "dup.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "error matching files have the same name: dup.txt"
        );
    }

    #[test]
    fn test_token_not_found_mentions_login() {
        let err = GistError::TokenNotFound {
            path: PathBuf::from("/tmp/.gogist"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/.gogist"));
        assert!(msg.contains("gogist login"));
    }
}
