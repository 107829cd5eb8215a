//! Tabsort Relay - extension relay client
//!
//! The browser side of tabsort is a small extension that exposes the tab
//! and group APIs over a local REST relay. This crate speaks that protocol
//! and implements [`tabsort_core::TabApi`] on top of it, so the core engine
//! never sees HTTP.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;

pub use client::RelayTabApi;
pub use config::{RelayConfig, DEFAULT_RELAY_URL};
