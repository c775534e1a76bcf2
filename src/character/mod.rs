//! Characters hosting a mind: identity, snapshot, live state, and the systems driving them.
pub mod components;
pub mod events;
pub mod plugin;
pub mod roster;
pub mod systems;

pub use plugin::CharacterPlugin;
