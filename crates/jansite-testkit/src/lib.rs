// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use jansite_app::{EstimateDisplay, FormPayload, PageSurface, faq_icon};
use time::{Date, Month};
use url::Url;

/// In-memory page that records what each event would have done to the DOM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSurface {
    pub menu_open: bool,
    pub aria_expanded: Option<String>,
    pub active_nav: Vec<String>,
    pub date_minimum: Option<String>,
    pub year_text: Option<String>,
    pub faq: BTreeMap<usize, FaqItemView>,
    pub estimate_total: String,
    pub estimate_details: String,
    pub estimated_total_field: String,
    pub opened: Vec<Url>,
    pub revealed: Vec<String>,
    /// Ids that exist on the page; `reveal` ignores anything else.
    pub element_ids: Vec<String>,
    /// When set, `open_external` fails, standing in for a blocked popup.
    pub block_popups: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItemView {
    pub open: bool,
    pub icon: String,
    pub max_height: String,
}

impl RecordingSurface {
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            element_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Height every recorded FAQ answer pretends to have when expanded.
pub const FAQ_ANSWER_SCROLL_HEIGHT: u32 = 120;

impl PageSurface for RecordingSurface {
    fn set_menu_open(&mut self, open: bool) -> Result<()> {
        self.menu_open = open;
        self.aria_expanded = Some(open.to_string());
        Ok(())
    }

    fn mark_nav(&mut self, page: &str) -> Result<()> {
        self.active_nav.push(page.to_owned());
        Ok(())
    }

    fn set_date_minimum(&mut self, iso_date: &str) -> Result<()> {
        self.date_minimum = Some(iso_date.to_owned());
        Ok(())
    }

    fn stamp_year(&mut self, year: i32) -> Result<()> {
        self.year_text = Some(year.to_string());
        Ok(())
    }

    fn set_faq_open(&mut self, index: usize, open: bool) -> Result<()> {
        let max_height = if open {
            format!("{FAQ_ANSWER_SCROLL_HEIGHT}px")
        } else {
            "0px".to_owned()
        };
        self.faq.insert(
            index,
            FaqItemView {
                open,
                icon: faq_icon(open).to_owned(),
                max_height,
            },
        );
        Ok(())
    }

    fn render_estimate(&mut self, display: &EstimateDisplay) -> Result<()> {
        self.estimate_total = display.total_text.clone();
        self.estimate_details = display.details_text.clone();
        self.estimated_total_field = display.hidden_value.clone();
        Ok(())
    }

    fn open_external(&mut self, url: &Url) -> Result<()> {
        if self.block_popups {
            bail!("popup blocked for {url}");
        }
        self.opened.push(url.clone());
        Ok(())
    }

    fn reveal(&mut self, element_id: &str) -> Result<()> {
        if self.element_ids.iter().any(|id| id == element_id) {
            self.revealed.push(element_id.to_owned());
        }
        Ok(())
    }
}

/// Estimator form as the browser would submit it; unchecked boxes are omitted.
pub fn estimate_form(width_cm: &str, height_cm: &str, product: &str) -> FormPayload {
    FormPayload::new()
        .with("full_name", "")
        .with("phone", "")
        .with("location", "")
        .with("width_cm", width_cm)
        .with("height_cm", height_cm)
        .with("product", product)
        .with("rooms", "1")
        .with("notes", "")
        .with("estimated_total", "")
}

pub fn booking_form() -> FormPayload {
    FormPayload::new()
        .with("full_name", "Layla Rahman")
        .with("phone", "+971 55 010 2030")
        .with("city", "Dubai")
        .with("area", "Jumeirah Village Circle")
        .with("windows", "6")
        .with("service_interest", "Blackout roller blinds")
        .with("preferred_date", "2026-11-03")
        .with("backup_date", "")
        .with("preferred_time", "Morning")
        .with("_gotcha", "")
        .with("_source", "homepage")
}

pub fn fixed_today() -> Result<Date> {
    Ok(Date::from_calendar_date(2026, Month::October, 18)?)
}

/// Decodes the `text` query parameter of a WhatsApp link.
pub fn message_text(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
}
