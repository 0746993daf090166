//! UI module - reusable widgets and the custom-painted charts and map

pub mod charts;
pub mod components;
pub mod map;
