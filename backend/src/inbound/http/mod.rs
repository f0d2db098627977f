//! HTTP inbound adapter serving the server-rendered pages.

pub mod app;
pub mod base_path;
pub mod error;
pub mod error_pages;
pub mod flash;
pub mod guard;
pub mod home;
pub mod routes;
pub mod security_headers;
pub mod session;
pub mod session_config;
pub mod snippets;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

pub use app::{AppDependencies, SessionCookie, build_app, session_middleware};
pub use base_path::BasePath;
pub use error::ApiResult;
pub use error_pages::{ErrorPageMode, ErrorPages};
pub use routes::configure;
pub use state::{HttpState, HttpStatePorts};
pub use views::Views;
