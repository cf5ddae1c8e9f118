// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Area-based price estimates for the estimator form.
//!
//! Estimates never fail: unreadable input degrades to a zero total, and the
//! display falls back to a prompt until the form holds something priceable.

use serde::Serialize;

use crate::{FormPayload, Product, format_aed, rate_for};

pub const MOTORIZED_SURCHARGE: f64 = 1.35;
pub const EXPRESS_SURCHARGE: f64 = 1.10;
pub const DEFAULT_ROOMS: f64 = 1.0;

pub const FIELD_WIDTH: &str = "width_cm";
pub const FIELD_HEIGHT: &str = "height_cm";
pub const FIELD_PRODUCT: &str = "product";
pub const FIELD_ROOMS: &str = "rooms";
pub const FIELD_MOTORIZED: &str = "motorized";
pub const FIELD_EXPRESS: &str = "express_delivery";
pub const FIELD_ESTIMATED_TOTAL: &str = "estimated_total";

pub const ESTIMATE_PROMPT: &str = "Enter dimensions and choose a product to see your estimate.";

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateInput {
    pub width_cm: f64,
    pub height_cm: f64,
    pub product: String,
    pub rooms: f64,
    pub motorized: bool,
    pub express: bool,
}

impl EstimateInput {
    pub fn from_form(payload: &FormPayload) -> Self {
        Self {
            width_cm: coerce_dimension(payload.get(FIELD_WIDTH)),
            height_cm: coerce_dimension(payload.get(FIELD_HEIGHT)),
            product: payload.get(FIELD_PRODUCT).unwrap_or_default().to_owned(),
            rooms: coerce_rooms(payload.get(FIELD_ROOMS)),
            motorized: payload.is_checked(FIELD_MOTORIZED),
            express: payload.is_checked(FIELD_EXPRESS),
        }
    }

    pub fn estimate(&self) -> Estimate {
        let area = (self.width_cm / 100.0) * (self.height_cm / 100.0);
        let area_sqm = if area.is_finite() { area.max(0.0) } else { 0.0 };

        let mut subtotal = area_sqm * f64::from(rate_for(&self.product)) * self.rooms;
        let already_motorized = Product::parse(&self.product).is_some_and(Product::is_motorized);
        if self.motorized && !already_motorized {
            subtotal *= MOTORIZED_SURCHARGE;
        }
        if self.express {
            subtotal *= EXPRESS_SURCHARGE;
        }

        let total_aed = if subtotal.is_finite() && subtotal > 0.0 {
            subtotal.round() as u64
        } else {
            0
        };

        Estimate {
            width_cm: self.width_cm,
            height_cm: self.height_cm,
            product: self.product.clone(),
            rooms: self.rooms,
            area_sqm,
            subtotal,
            total_aed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub width_cm: f64,
    pub height_cm: f64,
    pub product: String,
    pub rooms: f64,
    pub area_sqm: f64,
    pub subtotal: f64,
    pub total_aed: u64,
}

impl Estimate {
    pub fn is_priced(&self) -> bool {
        self.total_aed > 0
    }

    pub fn product_label(&self) -> Option<&'static str> {
        Product::parse(&self.product).map(Product::label)
    }

    pub fn display(&self) -> EstimateDisplay {
        if !self.is_priced() {
            return EstimateDisplay {
                total_text: format_aed(0),
                details_text: ESTIMATE_PROMPT.to_owned(),
                hidden_value: String::new(),
            };
        }

        EstimateDisplay {
            total_text: format_aed(self.total_aed),
            details_text: format!(
                "Approx. {:.2} sqm per room x {} room(s). Final quote is confirmed after measurement.",
                self.area_sqm, self.rooms
            ),
            hidden_value: self.total_aed.to_string(),
        }
    }
}

/// Text written into the estimator's total, details, and hidden fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateDisplay {
    pub total_text: String,
    pub details_text: String,
    pub hidden_value: String,
}

fn coerce_dimension(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return 0.0;
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Blank or unreadable counts mean one room. Any other finite number is
/// priced as given, so a negative count zeroes the total.
fn coerce_rooms(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(DEFAULT_ROOMS)
}
