use dioxus::prelude::*;

/// Labelled text input with an optional inline error message.
#[component]
pub fn Input(
    id: String,
    label: String,
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] error: Option<String>,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "field",
            label { class: "field-label", r#for: "{id}", "{label}" }
            input {
                class: if error.is_some() { "input input-invalid" } else { "input" },
                id: "{id}",
                name: "{id}",
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                oninput: move |evt| on_input.call(evt),
            }
            if let Some(msg) = error {
                p { class: "field-error", "{msg}" }
            }
        }
    }
}
