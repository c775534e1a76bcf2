//! Systems feeding craving moments into the mind core and writing its results back.
use bevy::prelude::*;

use crate::{
    core::plugin::SimulationClock,
    mind::{advance_stage, check_for_escalation, AttainmentAttempt, MindConfig, Perfection},
};

use super::{
    components::{
        CharacterIdGenerator, CharacterSheet, CravingScript, CycleTicker, Identity, MindState,
    },
    events::{
        AttainmentRequestedEvent, AttainmentResolution, AttainmentResolvedEvent,
        ClingingFormedEvent, ClingingReleasedEvent, TanhaArisenEvent,
    },
    roster::CharacterRoster,
};

/// Spawns one entity per roster entry.
pub fn spawn_roster_characters(
    mut commands: Commands,
    roster: Res<CharacterRoster>,
    mut id_generator: ResMut<CharacterIdGenerator>,
) {
    for entry in roster.entries() {
        let id = id_generator.next_id();
        let identity = Identity::new(id, entry.character.name.clone());

        commands.spawn((
            Name::new(format!("Character {}", identity.display_name)),
            identity,
            CharacterSheet(entry.character.clone()),
            MindState::default(),
            CravingScript::new(entry.cravings.clone(), entry.attainment_interval),
        ));

        let strongest = Perfection::ALL
            .into_iter()
            .max_by_key(|perfection| entry.character.perfections.level(*perfection))
            .unwrap_or(Perfection::Wisdom);
        info!(
            "Spawned {} ({}) with {} scripted cravings; strongest perfection {} ({})",
            entry.character.name,
            id,
            entry.cravings.len(),
            strongest.pali_name(),
            strongest.english_name()
        );
    }
}

/// Converts scaled frame time into whole processing cycles.
pub fn tick_mind_cycles(
    clock: Res<SimulationClock>,
    config: Res<MindConfig>,
    mut ticker: ResMut<CycleTicker>,
) {
    ticker.accumulate(
        clock.last_scaled_delta().as_secs_f32(),
        config.cycle.seconds,
    );
}

/// Replays each character's scripted cravings once per completed cycle.
pub fn stir_scripted_cravings(
    ticker: Res<CycleTicker>,
    mut query: Query<(&Identity, &mut CravingScript)>,
    mut tanha_writer: MessageWriter<TanhaArisenEvent>,
    mut attainment_writer: MessageWriter<AttainmentRequestedEvent>,
) {
    for _ in 0..ticker.ready() {
        for (identity, mut script) in query.iter_mut() {
            for (target, intensity) in &script.cravings {
                tanha_writer.write(TanhaArisenEvent {
                    character: identity.id,
                    target: target.clone(),
                    intensity: *intensity,
                });
            }
            if script.advance() {
                attainment_writer.write(AttainmentRequestedEvent {
                    character: identity.id,
                });
            }
        }
    }
}

/// Records each craving moment in the character's rolling history and forms or
/// reinforces a clinging once the craving has been sustained.
pub fn register_tanha_moments(
    mut events: MessageReader<TanhaArisenEvent>,
    config: Res<MindConfig>,
    clock: Res<SimulationClock>,
    mut query: Query<(&Identity, &mut MindState)>,
    mut formed_writer: MessageWriter<ClingingFormedEvent>,
) {
    for event in events.read() {
        let Some((identity, mut state)) = query
            .iter_mut()
            .find(|(identity, _)| identity.id == event.character)
        else {
            warn!("Craving for unknown character {}", event.character);
            continue;
        };

        let history =
            state.record_sample(&event.target, event.intensity, config.cycle.history_capacity);
        let formed = check_for_escalation(
            event.intensity,
            &history,
            &event.target,
            state.clingings_mut(),
            clock.timestamp(),
            &config.escalation,
            &config.keywords,
        );

        if let Some(clinging) = formed {
            info!(
                "{} now clings to '{}' as {}, {} ({:.1})",
                identity.display_name,
                clinging.target,
                clinging.kind,
                clinging.kind.gloss(),
                clinging.intensity()
            );
            formed_writer.write(ClingingFormedEvent {
                character: identity.id,
                kind: clinging.kind,
                target: clinging.target.clone(),
                intensity: clinging.intensity(),
            });
            state.clingings_mut().push(clinging);
        }
    }
}

/// Strengthens fed clingings, decays the rest, and reports the ones that fade out.
pub fn process_clinging_cycle(
    ticker: Res<CycleTicker>,
    config: Res<MindConfig>,
    mut query: Query<(&Identity, &mut MindState)>,
    mut released_writer: MessageWriter<ClingingReleasedEvent>,
) {
    let cycles = ticker.ready();
    if cycles == 0 {
        return;
    }

    for (identity, mut state) in query.iter_mut() {
        for released in state.run_cycles(cycles, &config.escalation) {
            info!(
                "{} lets go of '{}' ({})",
                identity.display_name,
                released.target,
                released.kind.gloss()
            );
            released_writer.write(ClingingReleasedEvent {
                character: identity.id,
                target: released.target,
            });
        }

        debug!(
            "{} carries {} clingings (akusala bonus {:.0})",
            identity.display_name,
            state.clingings().len(),
            state.akusala_bonus()
        );
    }
}

/// Attempts the next stage for every requesting character and writes the
/// outcome back to its sheet and mind state.
pub fn resolve_attainment_requests(
    mut events: MessageReader<AttainmentRequestedEvent>,
    mut query: Query<(&Identity, &mut CharacterSheet, &mut MindState)>,
    mut resolved_writer: MessageWriter<AttainmentResolvedEvent>,
) {
    for event in events.read() {
        let Some((identity, mut sheet, mut state)) = query
            .iter_mut()
            .find(|(identity, _, _)| identity.id == event.character)
        else {
            warn!("Attainment request for unknown character {}", event.character);
            continue;
        };

        let resolution = match advance_stage(state.stage(), state.fetters(), &sheet.0) {
            AttainmentAttempt::Attained { stage, outcome } => {
                info!(
                    "{} attains {}: {}",
                    identity.display_name,
                    stage,
                    stage.description()
                );
                for line in &outcome.eradicated {
                    info!("  {}", line);
                }
                sheet.0.tendencies = outcome.tendencies;
                state.record_attainment(stage, outcome.fetters);
                AttainmentResolution::Attained {
                    stage,
                    eradicated: outcome.eradicated,
                }
            }
            AttainmentAttempt::Denied { stage, eligibility } => {
                let progress = eligibility.progress();
                debug!(
                    "{} is {}% of the way to {}; missing: {}",
                    identity.display_name,
                    progress,
                    stage,
                    eligibility.requirements_missing.join(", ")
                );
                AttainmentResolution::Denied {
                    stage,
                    progress,
                    missing: eligibility.requirements_missing,
                }
            }
            AttainmentAttempt::Complete => AttainmentResolution::AlreadyComplete,
        };

        resolved_writer.write(AttainmentResolvedEvent {
            character: identity.id,
            resolution,
        });
    }
}
