// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod currency;
pub mod estimate;
pub mod forms;
pub mod link;
pub mod message;
pub mod product;
pub mod state;
pub mod surface;

pub use currency::*;
pub use estimate::*;
pub use forms::*;
pub use link::*;
pub use message::*;
pub use product::*;
pub use state::*;
pub use surface::*;
