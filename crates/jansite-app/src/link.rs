// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use url::Url;

pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";
pub const DEFAULT_RECIPIENT: &str = "971508806292";

/// Window target and features used when handing a message to WhatsApp.
pub const NEW_CONTEXT_TARGET: &str = "_blank";
pub const NEW_CONTEXT_FEATURES: &str = "noopener,noreferrer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsappLink {
    base: Url,
    recipient: String,
}

impl WhatsappLink {
    pub fn new(recipient: &str) -> Result<Self> {
        let recipient = normalize_recipient(recipient)?;
        let base = Url::parse(WHATSAPP_BASE_URL)
            .and_then(|root| root.join(&recipient))
            .with_context(|| format!("build WhatsApp link for recipient {recipient}"))?;
        Ok(Self { base, recipient })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// `https://wa.me/<recipient>?text=<message>`. Everything outside the
    /// unreserved set `A-Z a-z 0-9 - _ . ~` is percent-encoded, including
    /// `!'()*`.
    pub fn message_url(&self, message: &str) -> Url {
        let mut url = self.base.clone();
        url.set_query(Some(&format!("text={}", urlencoding::encode(message))));
        url
    }
}

/// Strips a leading `+` and spaces, then requires international digits only.
pub fn normalize_recipient(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .filter(|ch| *ch != ' ')
        .collect();
    if digits.is_empty() {
        bail!("WhatsApp recipient is empty -- set it to an international number like 971501234567");
    }
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        bail!(
            "WhatsApp recipient {raw:?} must contain only digits (country code first, no dashes)"
        );
    }
    Ok(digits)
}
