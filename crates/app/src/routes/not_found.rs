use dioxus::prelude::*;

use crate::routes::Route;

/// 404 page for any path the router does not know.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    tracing::warn!(path = %path, "no route matched");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                p { class: "not-found-message", "Oops! Page not found" }
                p { class: "not-found-path", code { "{path}" } }
                Link { to: Route::Landing {},
                    class: "not-found-link",
                    "Return to Home"
                }
            }
        }
    }
}
