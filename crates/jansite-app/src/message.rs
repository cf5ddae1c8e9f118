// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Prefilled WhatsApp messages built from lead and estimator forms.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::{Estimate, FormPayload, format_aed};

/// Fields whose names start with this are form plumbing, not customer input.
pub const INTERNAL_FIELD_PREFIX: char = '_';

pub const APPOINTMENT_CLOSING: &str = "Please confirm the final appointment time on WhatsApp.";
pub const ESTIMATE_CLOSING: &str = "Please confirm the final quote after a measurement visit.";

const STANDARD_LABELS: [(&str, &str); 15] = [
    ("full_name", "Name"),
    ("first_name", "First name"),
    ("last_name", "Last name"),
    ("phone", "Phone"),
    ("email", "Email"),
    ("city", "City"),
    ("area", "Area"),
    ("address", "Address"),
    ("windows", "Windows"),
    ("property_type", "Property type"),
    ("service_interest", "Service"),
    ("preferred_date", "Preferred date"),
    ("backup_date", "Second date option"),
    ("preferred_time", "Preferred time"),
    ("notes", "Notes"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Booking,
    Contact,
    Default,
}

impl Intent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Contact => "contact",
            Self::Default => "default",
        }
    }

    /// Any tag outside the known set is treated as [`Intent::Default`].
    pub fn parse(value: &str) -> Self {
        match value {
            "booking" => Self::Booking,
            "contact" => Self::Contact,
            _ => Self::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    headers: BTreeMap<Intent, String>,
    labels: BTreeMap<String, String>,
    closing: String,
}

impl MessageTemplate {
    pub fn new(
        headers: BTreeMap<Intent, String>,
        labels: BTreeMap<String, String>,
        closing: impl Into<String>,
    ) -> Result<Self> {
        if !headers.contains_key(&Intent::Default) {
            bail!("message template needs a header for the default intent");
        }
        Ok(Self {
            headers,
            labels,
            closing: closing.into(),
        })
    }

    pub fn standard(business_name: &str) -> Self {
        let headers = BTreeMap::from([
            (
                Intent::Booking,
                format!("Hello {business_name}, I would like to request a free visit."),
            ),
            (
                Intent::Contact,
                format!("Hello {business_name}, I have a question."),
            ),
            (
                Intent::Default,
                format!("Hello {business_name}, I would like to get in touch."),
            ),
        ]);
        let labels = STANDARD_LABELS
            .iter()
            .map(|(key, label)| ((*key).to_owned(), (*label).to_owned()))
            .collect();
        Self {
            headers,
            labels,
            closing: APPOINTMENT_CLOSING.to_owned(),
        }
    }

    pub fn header_for(&self, intent: &str) -> &str {
        self.headers
            .get(&Intent::parse(intent))
            .or_else(|| self.headers.get(&Intent::Default))
            .map_or("", String::as_str)
    }

    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels.get(key).map_or(key, String::as_str)
    }

    pub fn build(&self, intent: &str, payload: &FormPayload) -> LeadMessage {
        let mut lines = vec![self.header_for(intent).to_owned(), String::new()];
        for (key, value) in payload.iter() {
            if value.is_empty() || key.starts_with(INTERNAL_FIELD_PREFIX) {
                continue;
            }
            lines.push(format!("{}: {value}", self.label_for(key)));
        }
        lines.push(String::new());
        lines.push(self.closing.clone());
        LeadMessage { lines }
    }
}

/// Message sent from the estimator form, carrying the computed estimate.
pub fn estimate_request(
    business_name: &str,
    payload: &FormPayload,
    estimate: &Estimate,
) -> LeadMessage {
    let product = match estimate.product_label() {
        Some(label) => label,
        None => payload.value_or("product", "-"),
    };
    let total = if estimate.is_priced() {
        format_aed(estimate.total_aed)
    } else {
        "N/A".to_owned()
    };

    let lines = vec![
        format!("Hello {business_name}, I would like an estimate."),
        String::new(),
        format!("Name: {}", payload.value_or("full_name", "-")),
        format!("Phone: {}", payload.value_or("phone", "-")),
        format!("Location: {}", payload.value_or("location", "-")),
        format!("Product: {product}"),
        format!(
            "Width x Height (cm): {} x {}",
            payload.get("width_cm").unwrap_or_default(),
            payload.get("height_cm").unwrap_or_default()
        ),
        format!("Rooms: {}", payload.value_or("rooms", "1")),
        format!("Estimated total: {total}"),
        format!("Notes: {}", payload.value_or("notes", "None")),
        String::new(),
        ESTIMATE_CLOSING.to_owned(),
    ];
    LeadMessage { lines }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadMessage {
    lines: Vec<String>,
}

impl LeadMessage {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for LeadMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
