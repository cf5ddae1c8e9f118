// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use anyhow::Result;
use jansite_app::{
    ESTIMATE_PROMPT, Intent, MessageTemplate, SiteCommand, SiteConfig, SiteEvent, SiteState,
    apply_events,
};
use jansite_testkit::{
    FAQ_ANSWER_SCROLL_HEIGHT, RecordingSurface, booking_form, estimate_form, fixed_today,
    message_text,
};

fn run(
    state: &mut SiteState,
    surface: &mut RecordingSurface,
    command: SiteCommand,
) -> Result<Vec<SiteEvent>> {
    let events = state.dispatch(command);
    apply_events(surface, &events)?;
    Ok(events)
}

#[test]
fn page_load_prepares_nav_dates_and_footer() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::default();

    run(
        &mut state,
        &mut surface,
        SiteCommand::Load {
            page: Some("faq".to_owned()),
            today: fixed_today()?,
            open_faq: Vec::new(),
        },
    )?;
    assert_eq!(surface.active_nav, vec!["faq".to_owned()]);
    assert_eq!(surface.date_minimum.as_deref(), Some("2026-10-18"));
    assert_eq!(surface.year_text.as_deref(), Some("2026"));

    let mut bare = RecordingSurface::default();
    run(
        &mut state,
        &mut bare,
        SiteCommand::Load {
            page: None,
            today: fixed_today()?,
            open_faq: Vec::new(),
        },
    )?;
    assert!(bare.active_nav.is_empty());
    Ok(())
}

#[test]
fn menu_button_and_nav_links_drive_aria_state() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::default();

    run(&mut state, &mut surface, SiteCommand::ToggleMenu)?;
    assert!(surface.menu_open);
    assert_eq!(surface.aria_expanded.as_deref(), Some("true"));

    run(&mut state, &mut surface, SiteCommand::FollowNavLink)?;
    assert!(!surface.menu_open);
    assert_eq!(surface.aria_expanded.as_deref(), Some("false"));
    Ok(())
}

#[test]
fn faq_accordion_expands_and_collapses_answers() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::default();

    run(&mut state, &mut surface, SiteCommand::ToggleFaq(1))?;
    let item = &surface.faq[&1];
    assert!(item.open);
    assert_eq!(item.icon, "-");
    assert_eq!(item.max_height, format!("{FAQ_ANSWER_SCROLL_HEIGHT}px"));

    run(&mut state, &mut surface, SiteCommand::ToggleFaq(1))?;
    let item = &surface.faq[&1];
    assert!(!item.open);
    assert_eq!(item.icon, "+");
    assert_eq!(item.max_height, "0px");
    Ok(())
}

#[test]
fn faq_item_expanded_in_markup_closes_on_first_click() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::default();

    run(
        &mut state,
        &mut surface,
        SiteCommand::Load {
            page: Some("faq".to_owned()),
            today: fixed_today()?,
            open_faq: vec![0],
        },
    )?;
    let item = &surface.faq[&0];
    assert!(item.open);
    assert_eq!(item.max_height, format!("{FAQ_ANSWER_SCROLL_HEIGHT}px"));

    run(&mut state, &mut surface, SiteCommand::ToggleFaq(0))?;
    let item = &surface.faq[&0];
    assert!(!item.open);
    assert_eq!(item.icon, "+");
    Ok(())
}

#[test]
fn estimator_renders_live_and_resets_to_prompt() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::default();

    run(
        &mut state,
        &mut surface,
        SiteCommand::RecalculateEstimate(estimate_form("", "", "")),
    )?;
    assert_eq!(surface.estimate_total, "AED\u{a0}0");
    assert_eq!(surface.estimate_details, ESTIMATE_PROMPT);
    assert!(surface.estimated_total_field.is_empty());

    run(
        &mut state,
        &mut surface,
        SiteCommand::RecalculateEstimate(
            estimate_form("200", "150", "sheer_curtains").with("express_delivery", "on"),
        ),
    )?;
    assert_eq!(surface.estimate_total, "AED\u{a0}294");
    assert_eq!(surface.estimated_total_field, "294");

    run(
        &mut state,
        &mut surface,
        SiteCommand::RecalculateEstimate(estimate_form("200", "0", "sheer_curtains")),
    )?;
    assert_eq!(surface.estimate_details, ESTIMATE_PROMPT);
    assert!(surface.estimated_total_field.is_empty());
    Ok(())
}

#[test]
fn estimate_submission_opens_whatsapp_and_reveals_success() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::with_elements(["estimateSuccess"]);

    let form = estimate_form("240", "260", "motorized_blinds")
        .with("motorized", "on")
        .with("full_name", "Hamad");
    run(&mut state, &mut surface, SiteCommand::SubmitEstimate(form))?;

    assert_eq!(surface.opened.len(), 1);
    let url = &surface.opened[0];
    assert_eq!(url.host_str(), Some("wa.me"));
    assert_eq!(url.path(), "/971508806292");
    let text = message_text(url).unwrap_or_default();
    assert!(text.starts_with("Hello Jan Furnishings, I would like an estimate.\n\n"));
    assert!(text.contains("Product: Motorized blinds"));
    assert!(text.contains("Estimated total: AED\u{a0}2,895"));
    assert!(text.ends_with("Please confirm the final quote after a measurement visit."));
    assert_eq!(surface.revealed, vec!["estimateSuccess".to_owned()]);
    Ok(())
}

#[test]
fn lead_form_message_round_trips_through_the_link() -> Result<()> {
    let config = SiteConfig {
        business_name: "Jan Furnishings".to_owned(),
        whatsapp_recipient: "+971 50 000 0000".to_owned(),
    };
    let mut state = SiteState::new(&config)?;
    let mut surface = RecordingSurface::with_elements(["visitSuccess"]);

    run(
        &mut state,
        &mut surface,
        SiteCommand::SubmitLead {
            intent: "booking".to_owned(),
            success_id: Some("visitSuccess".to_owned()),
            payload: booking_form(),
        },
    )?;

    let url = &surface.opened[0];
    assert_eq!(url.path(), "/971500000000");
    assert_eq!(
        message_text(url).unwrap_or_default(),
        "Hello Jan Furnishings, I would like to request a free visit.\n\
         \n\
         Name: Layla Rahman\n\
         Phone: +971 55 010 2030\n\
         City: Dubai\n\
         Area: Jumeirah Village Circle\n\
         Windows: 6\n\
         Service: Blackout roller blinds\n\
         Preferred date: 2026-11-03\n\
         Preferred time: Morning\n\
         \n\
         Please confirm the final appointment time on WhatsApp."
    );
    assert_eq!(surface.revealed, vec!["visitSuccess".to_owned()]);
    Ok(())
}

#[test]
fn missing_success_element_is_ignored() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::default();

    run(
        &mut state,
        &mut surface,
        SiteCommand::SubmitLead {
            intent: "newsletter".to_owned(),
            success_id: Some("nowhere".to_owned()),
            payload: booking_form(),
        },
    )?;
    assert!(surface.revealed.is_empty());
    let text = message_text(&surface.opened[0]).unwrap_or_default();
    assert!(text.starts_with("Hello Jan Furnishings, I would like to get in touch."));
    Ok(())
}

#[test]
fn surface_failure_stops_replay() -> Result<()> {
    let mut state = SiteState::new(&SiteConfig::default())?;
    let mut surface = RecordingSurface::with_elements(["estimateSuccess"]);
    surface.block_popups = true;

    let events = state.dispatch(SiteCommand::SubmitEstimate(estimate_form(
        "100",
        "100",
        "zebra_blinds",
    )));
    let error = apply_events(&mut surface, &events).expect_err("popup is blocked");
    assert!(error.to_string().contains("popup blocked"));
    assert!(surface.revealed.is_empty());
    Ok(())
}

#[test]
fn custom_template_changes_lead_wording() -> Result<()> {
    let template = MessageTemplate::new(
        BTreeMap::from([
            (Intent::Default, "Salaam!".to_owned()),
            (Intent::Contact, "Question from the site".to_owned()),
        ]),
        BTreeMap::from([("phone".to_owned(), "Mobile".to_owned())]),
        "Thanks",
    )?;
    let mut state = SiteState::new(&SiteConfig::default())?.with_template(template);
    let mut surface = RecordingSurface::default();

    run(
        &mut state,
        &mut surface,
        SiteCommand::SubmitLead {
            intent: "contact".to_owned(),
            success_id: None,
            payload: jansite_app::FormPayload::new().with("phone", "050"),
        },
    )?;
    assert_eq!(
        message_text(&surface.opened[0]).unwrap_or_default(),
        "Question from the site\n\nMobile: 050\n\nThanks"
    );
    Ok(())
}
