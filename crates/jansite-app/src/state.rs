// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use anyhow::Result;
use time::Date;
use url::Url;

use crate::{
    EstimateDisplay, EstimateInput, FormPayload, MessageTemplate, WhatsappLink, estimate_request,
    link::DEFAULT_RECIPIENT,
};

pub const DEFAULT_BUSINESS_NAME: &str = "Jan Furnishings";
pub const ESTIMATE_SUCCESS_ID: &str = "estimateSuccess";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub business_name: String,
    pub whatsapp_recipient: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_owned(),
            whatsapp_recipient: DEFAULT_RECIPIENT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteState {
    pub menu_open: bool,
    pub open_faq: BTreeSet<usize>,
    business_name: String,
    link: WhatsappLink,
    template: MessageTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteCommand {
    /// `open_faq` lists the FAQ items the markup already shows expanded.
    Load {
        page: Option<String>,
        today: Date,
        open_faq: Vec<usize>,
    },
    ToggleMenu,
    FollowNavLink,
    ToggleFaq(usize),
    RecalculateEstimate(FormPayload),
    SubmitEstimate(FormPayload),
    SubmitLead {
        intent: String,
        success_id: Option<String>,
        payload: FormPayload,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteEvent {
    MenuChanged { open: bool },
    NavMarked(String),
    DateMinimumSet(String),
    YearStamped(i32),
    FaqChanged { index: usize, open: bool },
    EstimateRendered(EstimateDisplay),
    WhatsappOpened(Url),
    SuccessRevealed(String),
}

impl SiteState {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            menu_open: false,
            open_faq: BTreeSet::new(),
            business_name: config.business_name.clone(),
            link: WhatsappLink::new(&config.whatsapp_recipient)?,
            template: MessageTemplate::standard(&config.business_name),
        })
    }

    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn link(&self) -> &WhatsappLink {
        &self.link
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    pub fn dispatch(&mut self, command: SiteCommand) -> Vec<SiteEvent> {
        match command {
            SiteCommand::Load {
                page,
                today,
                open_faq,
            } => {
                let mut events = Vec::with_capacity(3 + open_faq.len());
                if let Some(page) = page.filter(|page| !page.is_empty()) {
                    events.push(SiteEvent::NavMarked(page));
                }
                events.push(SiteEvent::DateMinimumSet(today.to_string()));
                events.push(SiteEvent::YearStamped(today.year()));
                self.open_faq = open_faq.into_iter().collect();
                events.extend(
                    self.open_faq
                        .iter()
                        .map(|&index| SiteEvent::FaqChanged { index, open: true }),
                );
                events
            }
            SiteCommand::ToggleMenu => {
                self.menu_open = !self.menu_open;
                vec![SiteEvent::MenuChanged {
                    open: self.menu_open,
                }]
            }
            SiteCommand::FollowNavLink => {
                self.menu_open = false;
                vec![SiteEvent::MenuChanged { open: false }]
            }
            SiteCommand::ToggleFaq(index) => {
                let open = !self.open_faq.remove(&index);
                if open {
                    self.open_faq.insert(index);
                }
                vec![SiteEvent::FaqChanged { index, open }]
            }
            SiteCommand::RecalculateEstimate(payload) => {
                let estimate = EstimateInput::from_form(&payload).estimate();
                tracing::debug!(
                    total = estimate.total_aed,
                    area = estimate.area_sqm,
                    "estimate recalculated"
                );
                vec![SiteEvent::EstimateRendered(estimate.display())]
            }
            SiteCommand::SubmitEstimate(payload) => {
                let estimate = EstimateInput::from_form(&payload).estimate();
                let message = estimate_request(&self.business_name, &payload, &estimate);
                tracing::info!(total = estimate.total_aed, "estimate request handed off");
                vec![
                    SiteEvent::WhatsappOpened(self.link.message_url(&message.text())),
                    SiteEvent::SuccessRevealed(ESTIMATE_SUCCESS_ID.to_owned()),
                ]
            }
            SiteCommand::SubmitLead {
                intent,
                success_id,
                payload,
            } => {
                let message = self.template.build(&intent, &payload);
                tracing::info!(intent = %intent, "lead handed off");
                let mut events = vec![SiteEvent::WhatsappOpened(
                    self.link.message_url(&message.text()),
                )];
                if let Some(id) = success_id.filter(|id| !id.is_empty()) {
                    events.push(SiteEvent::SuccessRevealed(id));
                }
                events
            }
        }
    }
}

/// Answer toggle glyph shown inside an FAQ button.
pub const fn faq_icon(open: bool) -> &'static str {
    if open { "-" } else { "+" }
}
