//! Shared Dioxus components and D3.js bridge for the Gapminder dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js chart functions via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (tabs, slider, metrics, containers, etc.)

pub mod js_bridge;
pub mod state;
pub mod components;
