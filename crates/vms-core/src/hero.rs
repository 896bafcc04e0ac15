//! The hero configuration document.
//!
//! [`HeroConfig`] is the single JSON document behind the public landing page:
//! title, subtitle, background slides, product and technical-service cards,
//! and two call-to-action buttons.
//!
//! Two entry points turn untrusted JSON into a well-formed document:
//!
//! - [`HeroConfig::normalize`] reads whatever is stored on disk, replacing
//!   each missing or mistyped field with its default.
//! - [`HeroConfig::merge`] overlays a client patch onto the current document,
//!   keeping the current value for every field that fails its type check.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default hero title.
pub const DEFAULT_TITLE: &str = "Lorem ipsum dolor sit amet consectetur.";

/// Default hero subtitle.
pub const DEFAULT_SUBTITLE: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

/// One hero-banner background image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Public URL of the image.
    pub src: String,
    /// Optional alt text. Omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Slide {
    /// A slide without alt text.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
        }
    }

    /// A slide with alt text.
    #[must_use]
    pub fn with_alt(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: Some(alt.into()),
        }
    }
}

/// A product or technical-service tile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub alt: String,
    /// Image URLs in rotation order.
    #[serde(default)]
    pub images: Vec<String>,
}

/// A call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaButton {
    pub text: String,
    pub href: String,
}

impl CtaButton {
    fn new(text: &str, href: &str) -> Self {
        Self {
            text: text.to_owned(),
            href: href.to_owned(),
        }
    }

    /// Overlay `raw` onto `fallback` sub-field by sub-field.
    fn overlay(raw: Option<&Value>, fallback: &Self) -> Self {
        Self {
            text: string_or(raw.and_then(|b| b.get("text")), &fallback.text),
            href: string_or(raw.and_then(|b| b.get("href")), &fallback.href),
        }
    }
}

/// The editable site content. Exactly one instance exists per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroConfig {
    pub title: String,
    pub subtitle: String,
    /// Background slides in display order.
    pub slides: Vec<Slide>,
    pub products: Vec<Card>,
    pub technical_services: Vec<Card>,
    pub button1: CtaButton,
    pub button2: CtaButton,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            subtitle: DEFAULT_SUBTITLE.to_owned(),
            slides: Vec::new(),
            products: Vec::new(),
            technical_services: Vec::new(),
            button1: CtaButton::new("Get Quote", "#cta"),
            button2: CtaButton::new("View Catalogue", "#catalogues"),
        }
    }
}

impl HeroConfig {
    /// Build a well-formed document from stored JSON.
    ///
    /// Every field that is missing or has the wrong type falls back to its
    /// default; the rest of the document is kept. Documents written before
    /// slides existed carry a single `heroImage` string, which becomes the
    /// only slide.
    #[must_use]
    pub fn normalize(raw: &Value) -> Self {
        let defaults = Self::default();

        let slides = match raw.get("slides") {
            Some(Value::Array(items)) => sanitize_slides(items),
            _ => raw
                .get("heroImage")
                .and_then(Value::as_str)
                .map(|src| vec![Slide::new(src)])
                .unwrap_or_default(),
        };

        Self {
            title: string_or(raw.get("title"), &defaults.title),
            subtitle: string_or(raw.get("subtitle"), &defaults.subtitle),
            slides,
            products: cards_or(raw.get("products"), &defaults.products),
            technical_services: cards_or(
                raw.get("technicalServices"),
                &defaults.technical_services,
            ),
            button1: CtaButton::overlay(raw.get("button1"), &defaults.button1),
            button2: CtaButton::overlay(raw.get("button2"), &defaults.button2),
        }
    }

    /// Overlay a client patch onto this document.
    ///
    /// Each top-level field is replaced wholesale when the patch carries a
    /// value of the right shape; otherwise the current value is kept. Array
    /// fields are filtered to well-typed elements rather than rejected.
    /// Buttons are overlaid per sub-field. Unknown fields are ignored.
    #[must_use]
    pub fn merge(&self, patch: &Value) -> Self {
        let slides = match patch.get("slides") {
            Some(Value::Array(items)) => sanitize_slides(items),
            _ => self.slides.clone(),
        };

        Self {
            title: string_or(patch.get("title"), &self.title),
            subtitle: string_or(patch.get("subtitle"), &self.subtitle),
            slides,
            products: cards_or(patch.get("products"), &self.products),
            technical_services: cards_or(patch.get("technicalServices"), &self.technical_services),
            button1: CtaButton::overlay(patch.get("button1"), &self.button1),
            button2: CtaButton::overlay(patch.get("button2"), &self.button2),
        }
    }

    /// Cards of the given kind.
    #[must_use]
    pub fn cards(&self, kind: CardKind) -> &[Card] {
        match kind {
            CardKind::Products => &self.products,
            CardKind::TechnicalServices => &self.technical_services,
        }
    }

    /// Mutable cards of the given kind.
    pub fn cards_mut(&mut self, kind: CardKind) -> &mut Vec<Card> {
        match kind {
            CardKind::Products => &mut self.products,
            CardKind::TechnicalServices => &mut self.technical_services,
        }
    }
}

/// The two card collections on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardKind {
    Products,
    TechnicalServices,
}

impl CardKind {
    /// Section heading used on the page and in the CLI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::TechnicalServices => "Technical Services",
        }
    }
}

fn string_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_owned()
}

fn sanitize_slides(items: &[Value]) -> Vec<Slide> {
    items
        .iter()
        .filter_map(|item| {
            let src = item.get("src")?.as_str()?;
            Some(Slide {
                src: src.to_owned(),
                alt: item.get("alt").and_then(Value::as_str).map(str::to_owned),
            })
        })
        .collect()
}

fn cards_or(value: Option<&Value>, fallback: &[Card]) -> Vec<Card> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(sanitize_card).collect(),
        _ => fallback.to_vec(),
    }
}

fn sanitize_card(item: &Value) -> Option<Card> {
    let obj = item.as_object()?;
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };
    let images = obj
        .get("images")
        .and_then(Value::as_array)
        .map(|imgs| {
            imgs.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Some(Card {
        title: text("title"),
        desc: text("desc"),
        alt: text("alt"),
        images,
    })
}
