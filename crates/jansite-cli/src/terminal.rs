// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use jansite_app::{EstimateDisplay, PageSurface, faq_icon};
use std::io::Write;
use url::Url;

/// Prints what the page would show, one line per visible change.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}").context("write to terminal")
    }
}

impl<W: Write> PageSurface for TerminalSurface<W> {
    fn set_menu_open(&mut self, open: bool) -> Result<()> {
        self.line(if open { "menu: open" } else { "menu: closed" })
    }

    fn mark_nav(&mut self, page: &str) -> Result<()> {
        self.line(&format!("nav: {page}"))
    }

    fn set_date_minimum(&mut self, iso_date: &str) -> Result<()> {
        self.line(&format!("earliest date: {iso_date}"))
    }

    fn stamp_year(&mut self, year: i32) -> Result<()> {
        self.line(&format!("year: {year}"))
    }

    fn set_faq_open(&mut self, index: usize, open: bool) -> Result<()> {
        self.line(&format!("faq {index}: {}", faq_icon(open)))
    }

    fn render_estimate(&mut self, display: &EstimateDisplay) -> Result<()> {
        self.line(&display.total_text)?;
        self.line(&display.details_text)
    }

    fn open_external(&mut self, url: &Url) -> Result<()> {
        self.line(url.as_str())
    }

    fn reveal(&mut self, _element_id: &str) -> Result<()> {
        Ok(())
    }
}
