//! Character plugin wiring the mind core into the ECS schedule.
use bevy::prelude::*;

use crate::mind::MindConfig;

use super::{
    components::{CharacterIdGenerator, CycleTicker},
    events::{
        AttainmentRequestedEvent, AttainmentResolvedEvent, ClingingFormedEvent,
        ClingingReleasedEvent, TanhaArisenEvent,
    },
    roster::CharacterRoster,
    systems::{
        process_clinging_cycle, register_tanha_moments, resolve_attainment_requests,
        spawn_roster_characters, stir_scripted_cravings, tick_mind_cycles,
    },
};

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(MindConfig::load_or_default())
            .insert_resource(CharacterRoster::load_or_default())
            .init_resource::<CharacterIdGenerator>()
            .init_resource::<CycleTicker>()
            .add_message::<TanhaArisenEvent>()
            .add_message::<ClingingFormedEvent>()
            .add_message::<ClingingReleasedEvent>()
            .add_message::<AttainmentRequestedEvent>()
            .add_message::<AttainmentResolvedEvent>()
            .add_systems(Startup, spawn_roster_characters)
            .add_systems(
                Update,
                (
                    tick_mind_cycles,
                    stir_scripted_cravings,
                    register_tanha_moments,
                    process_clinging_cycle,
                    resolve_attainment_requests,
                )
                    .chain(),
            );
    }
}
