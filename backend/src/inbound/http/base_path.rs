//! Mount point of the application.
//!
//! Every route, redirect and template link is relative to one configurable
//! base URL so the board can live under a path prefix behind a proxy.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;

/// Normalised base URL: always begins and ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Normalise `raw` so it begins and ends with exactly one slash.
    ///
    /// # Examples
    /// ```
    /// use snippets::inbound::http::BasePath;
    ///
    /// assert_eq!(BasePath::new("app").as_str(), "/app/");
    /// assert_eq!(BasePath::new("").as_str(), "/");
    /// ```
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self("/".to_owned())
        } else {
            Self(format!("/{trimmed}/"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix for `web::scope`: the base without its trailing slash.
    pub fn scope(&self) -> &str {
        self.0.trim_end_matches('/')
    }

    /// Absolute path for `relative` under this base.
    pub fn join(&self, relative: &str) -> String {
        format!("{}{}", self.0, relative.trim_start_matches('/'))
    }

    /// `302 Found` pointing at `relative` under this base.
    pub fn redirect(&self, relative: &str) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((LOCATION, self.join(relative)))
            .finish()
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::new("/")
    }
}
