use dioxus::prelude::*;

/// Pulsing placeholder shown while a dashboard loads.
#[component]
pub fn Skeleton(#[props(default = "2.5rem".to_string())] height: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "skeleton", style: "height: {height};" }
    }
}
