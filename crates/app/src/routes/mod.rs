pub mod auth_page;
pub mod dashboard;
pub mod landing;
pub mod not_found;

use dioxus::prelude::*;

use auth_page::Auth;
use dashboard::Dashboard;
use landing::Landing;
use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/auth")]
    Auth {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
