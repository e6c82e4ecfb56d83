// SPDX-License-Identifier: MPL-2.0
//! User interface screens and widgets.

pub mod capture;
pub mod library;
pub mod navbar;
pub mod overlays;
