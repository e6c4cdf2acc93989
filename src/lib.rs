//! dexfinder - Pokedex and book finder screens on tui-dispatch
//!
//! The library exposes the app's modules for the binary and for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod filter;
pub mod reducer;
pub mod state;
pub mod theme;
