use std::fmt;

pub mod api;
pub mod collect;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod store;

pub use error::GistError;

/// How requests to GitHub are authenticated
pub enum Credentials {
    /// Stored OAuth / personal access token, sent as a bearer token
    Token(String),
    /// Username and password, only used to create an authorization
    Basic {
        username: String,
        password: String,
        otp: Option<String>,
    },
}

impl Credentials {
    pub fn new(token: &str) -> Credentials {
        Credentials::Token(token.to_string())
    }

    pub fn basic(username: &str, password: &str, otp: Option<&str>) -> Credentials {
        Credentials::Basic {
            username: username.to_string(),
            password: password.to_string(),
            otp: otp.filter(|o| !o.is_empty()).map(String::from),
        }
    }
}

// Keep secrets out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Credentials::Token(***)"),
            Credentials::Basic { username, otp, .. } => f
                .debug_struct("Credentials::Basic")
                .field("username", username)
                .field("password", &"***")
                .field("otp", &otp.as_ref().map(|_| "***"))
                .finish(),
        }
    }
}
