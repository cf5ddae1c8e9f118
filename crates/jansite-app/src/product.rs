// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Every product the estimator can price, keyed by the `product` select value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    SheerCurtains,
    BlackoutCurtains,
    SheerBlackoutCurtains,
    BlackoutRollerBlinds,
    PremiumRollerBlinds,
    ZebraBlinds,
    WoodenBlinds,
    MotorizedCurtains,
    MotorizedBlinds,
}

impl Product {
    pub const ALL: [Self; 9] = [
        Self::SheerCurtains,
        Self::BlackoutCurtains,
        Self::SheerBlackoutCurtains,
        Self::BlackoutRollerBlinds,
        Self::PremiumRollerBlinds,
        Self::ZebraBlinds,
        Self::WoodenBlinds,
        Self::MotorizedCurtains,
        Self::MotorizedBlinds,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SheerCurtains => "sheer_curtains",
            Self::BlackoutCurtains => "blackout_curtains",
            Self::SheerBlackoutCurtains => "sheer_blackout_curtains",
            Self::BlackoutRollerBlinds => "blackout_roller_blinds",
            Self::PremiumRollerBlinds => "premium_roller_blinds",
            Self::ZebraBlinds => "zebra_blinds",
            Self::WoodenBlinds => "wooden_blinds",
            Self::MotorizedCurtains => "motorized_curtains",
            Self::MotorizedBlinds => "motorized_blinds",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sheer_curtains" => Some(Self::SheerCurtains),
            "blackout_curtains" => Some(Self::BlackoutCurtains),
            "sheer_blackout_curtains" => Some(Self::SheerBlackoutCurtains),
            "blackout_roller_blinds" => Some(Self::BlackoutRollerBlinds),
            "premium_roller_blinds" => Some(Self::PremiumRollerBlinds),
            "zebra_blinds" => Some(Self::ZebraBlinds),
            "wooden_blinds" => Some(Self::WoodenBlinds),
            "motorized_curtains" => Some(Self::MotorizedCurtains),
            "motorized_blinds" => Some(Self::MotorizedBlinds),
            _ => None,
        }
    }

    /// Whole AED per square meter.
    pub const fn rate_aed(self) -> u32 {
        match self {
            Self::SheerCurtains => 89,
            Self::BlackoutCurtains => 138,
            Self::SheerBlackoutCurtains => 207,
            Self::BlackoutRollerBlinds => 131,
            Self::PremiumRollerBlinds => 187,
            Self::ZebraBlinds => 368,
            Self::WoodenBlinds => 272,
            Self::MotorizedCurtains => 348,
            Self::MotorizedBlinds => 464,
        }
    }

    /// Motorized variants already include the motor in their rate.
    pub const fn is_motorized(self) -> bool {
        matches!(self, Self::MotorizedCurtains | Self::MotorizedBlinds)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SheerCurtains => "Sheer curtains",
            Self::BlackoutCurtains => "Blackout curtains",
            Self::SheerBlackoutCurtains => "Sheer + blackout curtains",
            Self::BlackoutRollerBlinds => "Blackout roller blinds",
            Self::PremiumRollerBlinds => "Premium roller blinds",
            Self::ZebraBlinds => "Zebra blinds",
            Self::WoodenBlinds => "Wooden blinds",
            Self::MotorizedCurtains => "Motorized curtains",
            Self::MotorizedBlinds => "Motorized blinds",
        }
    }
}

/// Rate for a raw select value; unknown keys price at zero.
pub fn rate_for(key: &str) -> u32 {
    Product::parse(key).map_or(0, Product::rate_aed)
}
