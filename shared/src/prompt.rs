//! Prompt variants and prompt construction.
//!
//! A deployment serves exactly one [`PromptSpec`]. Building a prompt is pure: the same
//! request always yields the same [`PromptPair`].

use crate::models::{or_placeholder, FieldValue, RewriteRequest, PLACEHOLDER};

/// Host names often carry this badge; it is never a first name.
const HOST_MARKER: &str = "superhost";

/// Fallback when no usable first name can be derived from the host field.
const DEFAULT_FIRST_NAME: &str = "Host";

const STANDARD_SYSTEM: &[&str] = &[
    "You are StaySmart, a concise assistant for travellers.",
    "Write in British English; keep to 5–7 short lines.",
    "Tone: friendly, respectful, trustworthy; no emojis; no exclamation spam.",
    "Personalise to property/host if details are provided.",
    "Mention that the guest will treat the home like their own.",
    "Do not output explanations, code formatting or a signature; only the final message.",
];

const PERSONALISED_SYSTEM: &[&str] = &[
    "You are StaySmart, a concise assistant for travellers writing to short-let hosts.",
    "Write in British English; keep to 5–7 short lines.",
    "Tone: friendly, respectful, trustworthy; no emojis; no exclamation spam.",
    "Greet the host by first name and personalise to the listing if details are provided.",
    "Mention that the guest will treat the home like their own.",
    "Ask for the stated discount percentage once, politely, without pressure.",
    "Do not output explanations, code formatting or a signature; only the final message.",
];

/// How the user block is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserTemplate {
    /// Raw listing/host/guests context.
    Context,
    /// Host first name and party description derived from the raw fields.
    Personalised,
}

/// One deployment variant of the rewrite endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub name: &'static str,
    pub system: &'static [&'static str],
    pub required: &'static [&'static str],
    pub template: UserTemplate,
    pub temperature: f32,
}

impl PromptSpec {
    /// British English rewrite; needs only a draft and a stay length.
    pub fn standard() -> Self {
        Self {
            name: "standard",
            system: STANDARD_SYSTEM,
            required: &["draft", "nights"],
            template: UserTemplate::Context,
            temperature: 0.4,
        }
    }

    /// Stricter variant that addresses the host by name and asks for a discount.
    pub fn personalised() -> Self {
        Self {
            name: "personalised",
            system: PERSONALISED_SYSTEM,
            required: &["draft", "nights", "guests", "discount"],
            template: UserTemplate::Personalised,
            temperature: 0.35,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "standard" => Some(Self::standard()),
            "personalised" | "personalized" | "strict" => Some(Self::personalised()),
            _ => None,
        }
    }

    /// Required fields the request lacks, in declaration order.
    pub fn missing_fields(&self, request: &RewriteRequest) -> Vec<&'static str> {
        self.required
            .iter()
            .copied()
            .filter(|field| !request.has_field(field))
            .collect()
    }

    pub fn build(&self, request: &RewriteRequest) -> PromptPair {
        build_prompt(self, request)
    }
}

/// System and user text for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Assemble the prompt pair for a request.
pub fn build_prompt(spec: &PromptSpec, request: &RewriteRequest) -> PromptPair {
    let draft = request.draft.as_deref().unwrap_or_default();
    let listing = or_placeholder(request.listing.as_ref());
    let nights = or_placeholder(request.nights.as_ref());
    let notes = or_placeholder(request.notes.as_ref());
    let discount = percentage(request.discount.as_ref());

    let user = match spec.template {
        UserTemplate::Context => format!(
            "Original draft:\n---\n{draft}\n---\n\n\
             Context:\n\
             - Listing: {listing}\n\
             - Host: {host}\n\
             - Guests: {guests}\n\
             - Nights: {nights}\n\
             - Notes: {notes}\n\
             - Discount requested: {discount}\n\n\
             Rewrite the message accordingly in 5–7 lines.",
            host = or_placeholder(request.host.as_ref()),
            guests = or_placeholder(request.guests.as_ref()),
        ),
        UserTemplate::Personalised => {
            let host_name = first_name(request.host.as_ref());
            let host_line = match request.host.as_ref() {
                Some(host) if host.is_truthy() => host_name.clone(),
                _ => PLACEHOLDER.to_string(),
            };
            let party_text = request
                .guests
                .as_ref()
                .filter(|g| g.is_truthy())
                .map(party)
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            format!(
                "Original draft:\n---\n{draft}\n---\n\n\
                 Context:\n\
                 - Listing: {listing}\n\
                 - Host first name: {host_line}\n\
                 - Party: {party_text}\n\
                 - Nights: {nights}\n\
                 - Notes: {notes}\n\
                 - Discount requested: {discount}\n\n\
                 Rewrite the message to {host_name} in 5–7 lines."
            )
        }
    };

    PromptPair {
        system: spec.system.join(" "),
        user,
    }
}

/// First name of the host, with the superhost badge removed.
pub fn first_name(host: Option<&FieldValue>) -> String {
    let raw = host.map(ToString::to_string).unwrap_or_default();
    strip_ignore_ascii_case(&raw, HOST_MARKER)
        .split_whitespace()
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_FIRST_NAME.to_string())
}

/// Describe the travelling party from the guest count.
pub fn party(guests: &FieldValue) -> String {
    match guests.as_count() {
        Some(1) => "a solo traveller".to_string(),
        Some(2) => "a couple".to_string(),
        Some(n) => format!("{} quiet guests", n),
        None => format!("{} quiet guests", guests),
    }
}

fn percentage(discount: Option<&FieldValue>) -> String {
    match discount {
        Some(d) if d.is_truthy() => {
            let value = d.to_string();
            format!("{}%", value.trim_end_matches('%').trim_end())
        }
        _ => PLACEHOLDER.to_string(),
    }
}

fn strip_ignore_ascii_case(text: &str, needle: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = find_ignore_ascii_case(rest, needle) {
        out.push_str(&rest[..pos]);
        out.push(' ');
        rest = &rest[pos + needle.len()..];
    }
    out.push_str(rest);
    out
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        haystack
            .get(i..i + needle.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(needle))
    })
}
