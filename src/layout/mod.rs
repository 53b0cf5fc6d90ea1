// SPDX-License-Identifier: MPL-2.0
//! Layout values computed from component configuration.
//!
//! # Components
//!
//! - [`measurement`] - `Measurement` lengths parsed from numbers or `px`/`%`/`auto` strings
//! - [`position`] - `Placement` directives parsed from keywords like `top-right`

mod measurement;
mod position;

pub use measurement::{parse_measurement, Measurement, MeasurementInput};
pub use position::{
    parse_position, CenteringTransform, HorizontalAnchor, Placement, VerticalAnchor,
};
