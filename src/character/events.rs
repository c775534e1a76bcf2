//! Messages exchanged between the host application and the mind systems.
use bevy::prelude::Message;

use crate::mind::{AttainmentStage, ClingingKind};

use super::components::CharacterId;

/// A moment of craving toward `target`, supplied by whatever drives the story.
#[derive(Message, Debug, Clone)]
pub struct TanhaArisenEvent {
    pub character: CharacterId,
    pub target: String,
    pub intensity: f32,
}

#[derive(Message, Debug, Clone)]
pub struct ClingingFormedEvent {
    pub character: CharacterId,
    pub kind: ClingingKind,
    pub target: String,
    pub intensity: f32,
}

#[derive(Message, Debug, Clone)]
pub struct ClingingReleasedEvent {
    pub character: CharacterId,
    pub target: String,
}

#[derive(Message, Debug, Clone)]
pub struct AttainmentRequestedEvent {
    pub character: CharacterId,
}

#[derive(Message, Debug, Clone)]
pub struct AttainmentResolvedEvent {
    pub character: CharacterId,
    pub resolution: AttainmentResolution,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttainmentResolution {
    Attained {
        stage: AttainmentStage,
        eradicated: Vec<String>,
    },
    Denied {
        stage: AttainmentStage,
        progress: u8,
        missing: Vec<String>,
    },
    AlreadyComplete,
}
