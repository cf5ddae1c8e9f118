// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use url::Url;

use crate::{EstimateDisplay, SiteEvent};

/// A rendering target for [`SiteEvent`]s: the live DOM, a terminal, or a
/// recorder in tests.
pub trait PageSurface {
    fn set_menu_open(&mut self, open: bool) -> Result<()>;
    fn mark_nav(&mut self, page: &str) -> Result<()>;
    fn set_date_minimum(&mut self, iso_date: &str) -> Result<()>;
    fn stamp_year(&mut self, year: i32) -> Result<()>;
    fn set_faq_open(&mut self, index: usize, open: bool) -> Result<()>;
    fn render_estimate(&mut self, display: &EstimateDisplay) -> Result<()>;
    fn open_external(&mut self, url: &Url) -> Result<()>;
    /// Shows the element with `element_id`; a missing element is not an error.
    fn reveal(&mut self, element_id: &str) -> Result<()>;
}

/// Replays events in order, stopping at the first surface failure.
pub fn apply_events<S: PageSurface + ?Sized>(surface: &mut S, events: &[SiteEvent]) -> Result<()> {
    for event in events {
        match event {
            SiteEvent::MenuChanged { open } => surface.set_menu_open(*open)?,
            SiteEvent::NavMarked(page) => surface.mark_nav(page)?,
            SiteEvent::DateMinimumSet(iso_date) => surface.set_date_minimum(iso_date)?,
            SiteEvent::YearStamped(year) => surface.stamp_year(*year)?,
            SiteEvent::FaqChanged { index, open } => surface.set_faq_open(*index, *open)?,
            SiteEvent::EstimateRendered(display) => surface.render_estimate(display)?,
            SiteEvent::WhatsappOpened(url) => surface.open_external(url)?,
            SiteEvent::SuccessRevealed(element_id) => surface.reveal(element_id)?,
        }
    }
    Ok(())
}
