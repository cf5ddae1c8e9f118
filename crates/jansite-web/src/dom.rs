// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use jansite_app::{
    EstimateDisplay, FIELD_ESTIMATED_TOTAL, FormPayload, NEW_CONTEXT_FEATURES, NEW_CONTEXT_TARGET,
    PageSurface, faq_icon,
};
use time::{Date, Month};
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, FormData, HtmlElement, HtmlFormElement, HtmlInputElement, NodeList, Window,
};

const ESTIMATE_TOTAL_ID: &str = "estimateTotal";
const ESTIMATE_DETAILS_ID: &str = "estimateDetails";

pub struct DomSurface {
    window: Window,
    document: Document,
    faq_buttons: Vec<Element>,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Result<Self, JsValue> {
        let faq_buttons = collect(document.query_selector_all(".faq-button")?);
        Ok(Self {
            window,
            document,
            faq_buttons,
        })
    }

    /// FAQ buttons in document order; the index is the FAQ item id.
    pub fn faq_buttons(&self) -> &[Element] {
        &self.faq_buttons
    }

    /// Indices of FAQ items whose `.faq-item` already carries `open`.
    pub fn open_faq_items(&self) -> Vec<usize> {
        self.faq_buttons
            .iter()
            .enumerate()
            .filter(|(_, button)| {
                button
                    .closest(".faq-item.open")
                    .ok()
                    .flatten()
                    .is_some()
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn select_all(&self, selector: &str) -> Result<Vec<Element>> {
        let nodes = self.document.query_selector_all(selector).map_err(js_error)?;
        Ok(collect(nodes))
    }

    fn select(&self, selector: &str) -> Result<Option<Element>> {
        self.document.query_selector(selector).map_err(js_error)
    }

    fn set_text(&self, element_id: &str, text: &str) {
        if let Some(element) = self.document.get_element_by_id(element_id) {
            element.set_text_content(Some(text));
        }
    }
}

impl PageSurface for DomSurface {
    fn set_menu_open(&mut self, open: bool) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| anyhow!("document has no body"))?;
        body.class_list()
            .toggle_with_force("menu-open", open)
            .map_err(js_error)?;
        if let Some(button) = self.select(".menu-toggle")? {
            button
                .set_attribute("aria-expanded", &open.to_string())
                .map_err(js_error)?;
        }
        Ok(())
    }

    fn mark_nav(&mut self, page: &str) -> Result<()> {
        for link in self.select_all(".nav a")? {
            if link.get_attribute("data-page").as_deref() == Some(page) {
                link.class_list().add_1("active").map_err(js_error)?;
            }
        }
        Ok(())
    }

    fn set_date_minimum(&mut self, iso_date: &str) -> Result<()> {
        for field in self.select_all("input[type=\"date\"]")? {
            if let Ok(input) = field.dyn_into::<HtmlInputElement>() {
                input.set_min(iso_date);
            }
        }
        Ok(())
    }

    fn stamp_year(&mut self, year: i32) -> Result<()> {
        let year = year.to_string();
        for node in self.select_all("[data-year]")? {
            node.set_text_content(Some(&year));
        }
        Ok(())
    }

    fn set_faq_open(&mut self, index: usize, open: bool) -> Result<()> {
        let Some(button) = self.faq_buttons.get(index) else {
            return Ok(());
        };
        let Some(item) = button.closest(".faq-item").map_err(js_error)? else {
            return Ok(());
        };

        item.class_list()
            .toggle_with_force("open", open)
            .map_err(js_error)?;
        if let Some(answer) = item.query_selector(".faq-answer").map_err(js_error)? {
            let max_height = if open {
                format!("{}px", answer.scroll_height())
            } else {
                "0px".to_owned()
            };
            if let Ok(answer) = answer.dyn_into::<HtmlElement>() {
                answer
                    .style()
                    .set_property("max-height", &max_height)
                    .map_err(js_error)?;
            }
        }
        button
            .set_attribute("aria-expanded", &open.to_string())
            .map_err(js_error)?;
        if let Some(icon) = button.query_selector("span").map_err(js_error)? {
            icon.set_text_content(Some(faq_icon(open)));
        }
        Ok(())
    }

    fn render_estimate(&mut self, display: &EstimateDisplay) -> Result<()> {
        self.set_text(ESTIMATE_TOTAL_ID, &display.total_text);
        self.set_text(ESTIMATE_DETAILS_ID, &display.details_text);
        let hidden = format!("#estimateForm [name=\"{FIELD_ESTIMATED_TOTAL}\"]");
        if let Some(field) = self.select(&hidden)?
            && let Ok(input) = field.dyn_into::<HtmlInputElement>()
        {
            input.set_value(&display.hidden_value);
        }
        Ok(())
    }

    fn open_external(&mut self, url: &Url) -> Result<()> {
        self.window
            .open_with_url_and_target_and_features(
                url.as_str(),
                NEW_CONTEXT_TARGET,
                NEW_CONTEXT_FEATURES,
            )
            .map_err(js_error)?;
        Ok(())
    }

    fn reveal(&mut self, element_id: &str) -> Result<()> {
        let Some(element) = self.document.get_element_by_id(element_id) else {
            return Ok(());
        };
        if let Ok(element) = element.dyn_into::<HtmlElement>() {
            element
                .style()
                .set_property("display", "block")
                .map_err(js_error)?;
        }
        Ok(())
    }
}

pub fn collect(nodes: NodeList) -> Vec<Element> {
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Snapshot of a form's entries in document order; file inputs are skipped.
pub fn read_form(form: &HtmlFormElement) -> Result<FormPayload, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut payload = FormPayload::new();
    let Some(entries) = js_sys::try_iter(data.as_ref())? else {
        return Ok(payload);
    };
    for entry in entries {
        let entry = js_sys::Array::from(&entry?);
        if let (Some(key), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
            payload.push(key, value);
        }
    }
    Ok(payload)
}

pub fn today_utc() -> Result<Date> {
    let now = js_sys::Date::new_0();
    let month = Month::try_from((now.get_utc_month() + 1) as u8)?;
    Ok(Date::from_calendar_date(
        now.get_utc_full_year() as i32,
        month,
        now.get_utc_date() as u8,
    )?)
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!(
        "{}",
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    )
}
