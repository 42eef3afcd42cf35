//! UI module - shared rendering components used by both views

pub mod components;
