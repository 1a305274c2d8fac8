//! Handlers behind the `login`, `list` and `new` subcommands
//!
//! Each handler performs at most one API call. Output goes to the writer
//! passed in, one URL per line.

use std::io::{Read, Write};
use std::path::PathBuf;

use crate::api::{GitHub, NewGist};
use crate::collect::{self, Collector};
use crate::config::Config;
use crate::error::GistError;

pub const APP_NAME: &str = "gogist";

/// Shown next to the authorization in the user's GitHub settings
pub const AUTH_NOTE_URL: &str = "https://github.com/jakekeeys/gogist";

/// How `login` obtains the token it stores
pub enum Login {
    /// Store an existing personal access token as-is
    Token(String),
    /// Create a new gist-scoped authorization
    Password {
        user: String,
        pass: String,
        otp: Option<String>,
    },
}

#[derive(Debug, Default, Clone)]
pub struct NewArgs {
    pub public: bool,
    pub name: Option<String>,
    pub description: String,
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
    pub globs: Vec<String>,
}

/// `<hostname>/gogist`
pub fn auth_note() -> Result<String, GistError> {
    let hostname = hostname::get().map_err(|e| GistError::io("reading hostname", e))?;
    Ok(format!("{}/{}", hostname.to_string_lossy(), APP_NAME))
}

pub async fn login(config: &Config, login: Login) -> Result<(), GistError> {
    let token = match login {
        Login::Token(token) => token,
        Login::Password { user, pass, otp } => {
            let note = auth_note()?;
            let github = GitHub::with_password(config, &user, &pass, otp.as_deref());
            github.create_authorization(&note, AUTH_NOTE_URL).await?
        }
    };

    let store = config.token_store();
    store.write(&token)?;
    log::info!("token stored in {}", store.path().display());
    Ok(())
}

pub async fn list<W: Write>(
    config: &Config,
    user: Option<&str>,
    out: &mut W,
) -> Result<(), GistError> {
    let github = GitHub::with_token(config)?;
    let gists = github.list_gists(user).await?;

    for gist in gists {
        writeln!(out, "{}", gist.html_url).map_err(|e| GistError::io("writing output", e))?;
    }

    Ok(())
}

/// Create a gist from the given files, or from `stdin` when no file,
/// directory or glob was given.
pub async fn new_gist<R: Read, W: Write>(
    config: &Config,
    args: NewArgs,
    stdin: R,
    out: &mut W,
) -> Result<(), GistError> {
    let github = GitHub::with_token(config)?;

    let collector = Collector::new(args.files, args.dirs, args.globs);
    let files = if collector.is_empty() {
        collect::read_stdin(stdin, args.name.as_deref())?
    } else {
        collector.collect()?
    };
    log::debug!("creating gist with {} file(s)", files.len());

    let gist = github
        .create_gist(&NewGist::new(&args.description, args.public, files))
        .await?;

    writeln!(out, "{}", gist.html_url).map_err(|e| GistError::io("writing output", e))?;
    Ok(())
}
