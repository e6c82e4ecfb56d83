// SPDX-License-Identifier: MPL-2.0
//! Internationalization support via Fluent.
//!
//! Locale bundles are embedded at build time from `assets/i18n/` and resolved
//! in order: CLI flag, config file, OS locale.

pub mod fluent;

pub use fluent::I18n;
