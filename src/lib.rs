//! Digital mind: a Buddhist-psychology model of craving, clinging, and awakening,
//! hosted in a headless Bevy app.
pub mod character;
pub mod core;
pub mod mind;
