use dioxus::prelude::*;

use crate::{Card, CardContent, CardHeader, CardTitle};

/// Accent of a stat tile's left border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatVariant {
    #[default]
    Default,
    Success,
    Warning,
    Destructive,
}

impl StatVariant {
    pub fn class(&self) -> &'static str {
        match self {
            StatVariant::Default => "stat-card-default",
            StatVariant::Success => "stat-card-success",
            StatVariant::Warning => "stat-card-warning",
            StatVariant::Destructive => "stat-card-destructive",
        }
    }

    /// `Warning` for any non-zero count that needs attention, otherwise `Default`.
    pub fn attention_if(count: i64) -> Self {
        if count > 0 {
            StatVariant::Warning
        } else {
            StatVariant::Default
        }
    }
}

/// Change since the previous period, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub value: f64,
    pub is_positive: bool,
}

impl Trend {
    /// `+12% from last period` / `-3.5% from last period`.
    pub fn label(&self) -> String {
        let sign = if self.is_positive { '+' } else { '-' };
        format!("{sign}{}% from last period", self.value.abs())
    }

    fn class(&self) -> &'static str {
        if self.is_positive {
            "stat-trend stat-trend-positive"
        } else {
            "stat-trend stat-trend-negative"
        }
    }
}

/// A labelled figure with an optional icon, caption, and trend line.
///
/// Stateless: the same props always render the same markup.
#[component]
pub fn StatCard(
    title: String,
    value: String,
    #[props(default)] description: Option<String>,
    #[props(default)] icon: Option<Element>,
    #[props(default)] trend: Option<Trend>,
    #[props(default)] variant: StatVariant,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        Card { class: "stat-card {variant.class()}",
            CardHeader { class: "stat-card-header",
                CardTitle { class: "stat-card-title", "{title}" }
                if let Some(icon) = icon {
                    span { class: "stat-card-icon", {icon} }
                }
            }
            CardContent {
                div { class: "stat-card-value", "{value}" }
                if let Some(description) = description {
                    p { class: "stat-card-description", "{description}" }
                }
                if let Some(trend) = trend {
                    p { class: trend.class(), "{trend.label()}" }
                }
            }
        }
    }
}
