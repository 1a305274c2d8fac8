use reqwest::{Client, Method, RequestBuilder, Response};

use crate::config::Config;
use crate::error::GistError;
use crate::Credentials;

pub mod authorization;
pub mod gists;

pub use gists::{Gist, NewGist, NewGistFile};

/// Base GitHub API URL, overridable through `Config::api_base`
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = "gogist";
const ACCEPT: &str = "application/vnd.github.v3+json";
const OTP_HEADER: &str = "X-GitHub-OTP";

/// A GitHub API client bound to one set of credentials
#[derive(Debug)]
pub struct GitHub {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl GitHub {
    pub fn new(base_url: &str, credentials: Credentials) -> GitHub {
        GitHub {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Client authenticated with the token stored at `config.token_path`.
    pub fn with_token(config: &Config) -> Result<GitHub, GistError> {
        let token = config.token_store().read()?;
        Ok(GitHub::new(&config.api_base, Credentials::new(&token)))
    }

    /// Client authenticated with username/password, for `login` only.
    pub fn with_password(
        config: &Config,
        username: &str,
        password: &str,
        otp: Option<&str>,
    ) -> GitHub {
        GitHub::new(
            &config.api_base,
            Credentials::basic(username, password, otp),
        )
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{} {}", method, url);

        let builder = self
            .client
            .request(method, url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT);

        authorize(builder, &self.credentials)
    }
}

fn authorize(builder: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    match credentials {
        Credentials::Token(token) => builder.bearer_auth(token),
        Credentials::Basic {
            username,
            password,
            otp,
        } => {
            let builder = builder.basic_auth(username, Some(password));
            match otp {
                Some(otp) => builder.header(OTP_HEADER, otp),
                None => builder,
            }
        }
    }
}

/// Pass through a successful response, or turn the failure body into a
/// `GistError::Remote`.
pub async fn check_status(response: Response) -> Result<Response, GistError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GistError::from_response(status.as_u16(), &body))
}
