// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Browser entry point. Registers DOM handlers that feed [`SiteState`] and
//! replays its events onto the live page through [`DomSurface`].

#![cfg(target_arch = "wasm32")]

mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use dom::{DomSurface, collect, read_form, today_utc};
use jansite_app::{SiteCommand, SiteConfig, SiteState, apply_events};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlFormElement};

const ESTIMATE_FORM_ID: &str = "estimateForm";
const LEAD_FORM_SELECTOR: &str = ".js-whatsapp-form";

struct Site {
    state: SiteState,
    surface: DomSurface,
}

type SharedSite = Rc<RefCell<Site>>;

impl Site {
    fn dispatch(&mut self, command: SiteCommand) {
        let events = self.state.dispatch(command);
        if let Err(error) = apply_events(&mut self.surface, &events) {
            tracing::warn!(error = %format!("{error:#}"), "page update failed");
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let state = SiteState::new(&SiteConfig::default()).map_err(to_js)?;
    let surface = DomSurface::new(window, document.clone())?;
    let site: SharedSite = Rc::new(RefCell::new(Site { state, surface }));

    let page = document.body().and_then(|body| body.get_attribute("data-page"));
    let today = today_utc().map_err(to_js)?;
    let open_faq = site.borrow().surface.open_faq_items();
    dispatch(
        &site,
        SiteCommand::Load {
            page,
            today,
            open_faq,
        },
    );

    wire_menu(&site, &document)?;
    wire_faq(&site)?;
    wire_estimator(&site, &document)?;
    wire_lead_forms(&site, &document)?;
    Ok(())
}

fn dispatch(site: &SharedSite, command: SiteCommand) {
    site.borrow_mut().dispatch(command);
}

fn to_js(error: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{error:#}"))
}

/// Handlers live as long as the page, so the closures are leaked.
fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_menu(site: &SharedSite, document: &Document) -> Result<(), JsValue> {
    let Some(button) = document.query_selector(".menu-toggle")? else {
        return Ok(());
    };

    let handle = Rc::clone(site);
    listen(&button, "click", move |_| {
        dispatch(&handle, SiteCommand::ToggleMenu);
    })?;

    for link in collect(document.query_selector_all(".nav a")?) {
        let handle = Rc::clone(site);
        listen(&link, "click", move |_| {
            dispatch(&handle, SiteCommand::FollowNavLink);
        })?;
    }
    Ok(())
}

fn wire_faq(site: &SharedSite) -> Result<(), JsValue> {
    let buttons = site.borrow().surface.faq_buttons().to_vec();
    for (index, button) in buttons.iter().enumerate() {
        let handle = Rc::clone(site);
        listen(button, "click", move |_| {
            dispatch(&handle, SiteCommand::ToggleFaq(index));
        })?;
    }
    Ok(())
}

fn wire_estimator(site: &SharedSite, document: &Document) -> Result<(), JsValue> {
    let Some(form) = document.get_element_by_id(ESTIMATE_FORM_ID) else {
        return Ok(());
    };
    let form: HtmlFormElement = form.dyn_into()?;

    for field in collect(form.query_selector_all("input, select")?) {
        for kind in ["input", "change"] {
            let handle = Rc::clone(site);
            let source = form.clone();
            listen(&field, kind, move |_| recalculate(&handle, &source))?;
        }
    }

    let handle = Rc::clone(site);
    let source = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        match read_form(&source) {
            Ok(payload) => dispatch(&handle, SiteCommand::SubmitEstimate(payload)),
            Err(error) => tracing::warn!(?error, "could not read estimator form"),
        }
    })?;

    recalculate(site, &form);
    Ok(())
}

fn recalculate(site: &SharedSite, form: &HtmlFormElement) {
    match read_form(form) {
        Ok(payload) => dispatch(site, SiteCommand::RecalculateEstimate(payload)),
        Err(error) => tracing::warn!(?error, "could not read estimator form"),
    }
}

fn wire_lead_forms(site: &SharedSite, document: &Document) -> Result<(), JsValue> {
    for element in collect(document.query_selector_all(LEAD_FORM_SELECTOR)?) {
        let Ok(form) = element.dyn_into::<HtmlFormElement>() else {
            continue;
        };

        let handle = Rc::clone(site);
        let source = form.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            let intent = source
                .get_attribute("data-intent")
                .unwrap_or_else(|| "default".to_owned());
            let success_id = source.get_attribute("data-success-id");
            match read_form(&source) {
                Ok(payload) => dispatch(
                    &handle,
                    SiteCommand::SubmitLead {
                        intent,
                        success_id,
                        payload,
                    },
                ),
                Err(error) => tracing::warn!(?error, "could not read lead form"),
            }
        })?;
    }
    Ok(())
}
