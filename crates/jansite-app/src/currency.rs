// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const CURRENCY_CODE: &str = "AED";

/// Formats whole dirhams the way en-AE renders AED with no fraction digits,
/// e.g. `AED 1,234` with a no-break space after the code.
pub fn format_aed(amount: u64) -> String {
    format!("{CURRENCY_CODE}\u{a0}{}", group_thousands(amount))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
