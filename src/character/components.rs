//! Character components: identity, the external snapshot, and live mind state.
use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
};

use bevy::prelude::*;

use crate::mind::{
    clinging_akusala_bonus, config::EscalationSettings, initialize_fetters, process_clingings,
    types::clamp_intensity, AttainmentStage, Character, Clinging, FetterSet,
};

/// Unique identifier for a character in the running story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub struct CharacterId(u64);

impl CharacterId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CHR-{:04}", self.0)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Identity {
    pub id: CharacterId,
    pub display_name: String,
}

impl Identity {
    pub fn new(id: CharacterId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Snapshot of perfections and tendencies owned by the host application.
#[derive(Component, Debug, Clone)]
pub struct CharacterSheet(pub Character);

/// Live mind state tracked between processing cycles.
#[derive(Component, Debug, Clone)]
pub struct MindState {
    histories: HashMap<String, VecDeque<f32>>,
    clingings: Vec<Clinging>,
    fed_targets: HashSet<String>,
    fetters: FetterSet,
    stage: Option<AttainmentStage>,
}

impl Default for MindState {
    fn default() -> Self {
        Self {
            histories: HashMap::new(),
            clingings: Vec::new(),
            fed_targets: HashSet::new(),
            fetters: initialize_fetters(),
            stage: None,
        }
    }
}

impl MindState {
    /// Appends a craving sample for `target`, keeping at most `capacity` samples,
    /// and returns the resulting rolling history.
    pub fn record_sample(&mut self, target: &str, intensity: f32, capacity: usize) -> Vec<f32> {
        let history = self.histories.entry(target.to_string()).or_default();
        history.push_back(clamp_intensity(intensity));
        while history.len() > capacity.max(1) {
            history.pop_front();
        }
        self.fed_targets.insert(target.to_string());
        history.iter().copied().collect()
    }

    pub fn clingings(&self) -> &[Clinging] {
        &self.clingings
    }

    pub fn clingings_mut(&mut self) -> &mut Vec<Clinging> {
        &mut self.clingings
    }

    /// Targets craved since the last processing cycle; clears the set.
    pub fn take_fed_targets(&mut self) -> HashSet<String> {
        std::mem::take(&mut self.fed_targets)
    }

    /// Runs `cycles` processing cycles against everything craved since the last
    /// call and returns the clingings that faded out.
    ///
    /// All cycles completed in one frame share the same fed set. Histories are
    /// kept only for targets that were fed or still hold a clinging.
    pub fn run_cycles(&mut self, cycles: u32, settings: &EscalationSettings) -> Vec<Clinging> {
        if cycles == 0 {
            return Vec::new();
        }

        let fed = self.take_fed_targets();
        let mut released = Vec::new();
        for _ in 0..cycles {
            let survivors = process_clingings(&self.clingings, &fed, settings);
            released.extend(
                self.clingings
                    .iter()
                    .filter(|clinging| {
                        !survivors.iter().any(|kept| kept.target == clinging.target)
                    })
                    .cloned(),
            );
            self.clingings = survivors;
        }

        let clingings = &self.clingings;
        self.histories.retain(|target, _| {
            fed.contains(target) || clingings.iter().any(|clinging| &clinging.target == target)
        });
        released
    }

    /// Number of targets with a rolling craving history.
    pub fn tracked_targets(&self) -> usize {
        self.histories.len()
    }

    pub fn fetters(&self) -> &FetterSet {
        &self.fetters
    }

    pub fn stage(&self) -> Option<AttainmentStage> {
        self.stage
    }

    pub fn record_attainment(&mut self, stage: AttainmentStage, fetters: FetterSet) {
        self.stage = Some(stage);
        self.fetters = fetters;
    }

    pub fn akusala_bonus(&self) -> f32 {
        clinging_akusala_bonus(&self.clingings)
    }
}

/// Scripted cravings that drive debug characters each cycle.
#[derive(Component, Debug, Clone)]
pub struct CravingScript {
    pub cravings: Vec<(String, f32)>,
    pub attainment_interval: u32,
    cycles: u32,
}

impl CravingScript {
    pub fn new(cravings: Vec<(String, f32)>, attainment_interval: u32) -> Self {
        Self {
            cravings,
            attainment_interval: attainment_interval.max(1),
            cycles: 0,
        }
    }

    /// Advances one cycle and reports whether an attainment attempt is due.
    pub fn advance(&mut self) -> bool {
        self.cycles = self.cycles.wrapping_add(1);
        self.cycles % self.attainment_interval == 0
    }
}

/// Resource that issues monotonically increasing character ids.
#[derive(Resource, Default)]
pub struct CharacterIdGenerator {
    next: u64,
}

impl CharacterIdGenerator {
    pub fn next_id(&mut self) -> CharacterId {
        let id = self.next;
        self.next += 1;
        CharacterId::new(id)
    }
}

/// Counts whole processing cycles out of scaled simulation time.
#[derive(Resource, Debug, Default)]
pub struct CycleTicker {
    accumulated: f32,
    ready: u32,
}

impl CycleTicker {
    pub fn accumulate(&mut self, delta_seconds: f32, seconds_per_cycle: f32) {
        self.ready = 0;
        if delta_seconds <= 0.0 || !delta_seconds.is_finite() {
            return;
        }
        let seconds_per_cycle = seconds_per_cycle.max(f32::EPSILON);
        self.accumulated += delta_seconds;
        while self.accumulated >= seconds_per_cycle {
            self.accumulated -= seconds_per_cycle;
            self.ready += 1;
        }
    }

    /// Cycles completed during the current frame.
    pub fn ready(&self) -> u32 {
        self.ready
    }

    #[cfg(test)]
    pub fn force_ready(&mut self, cycles: u32) {
        self.ready = cycles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mind::{check_for_escalation, MindConfig, Timestamp};

    #[test]
    fn history_is_capped_and_marks_target_fed() {
        let mut state = MindState::default();
        for intensity in [50.0, 61.0, 62.0, 63.0, 64.0, 165.0] {
            state.record_sample("เงิน", intensity, 5);
        }
        let history = state.record_sample("เงิน", 70.0, 5);
        assert_eq!(history, vec![62.0, 63.0, 64.0, 100.0, 70.0]);

        let fed = state.take_fed_targets();
        assert!(fed.contains("เงิน"));
        assert!(state.take_fed_targets().is_empty());
    }

    fn sustained_clinging(state: &mut MindState, target: &str) {
        let settings = MindConfig::default();
        for intensity in [80.0, 85.0, 88.0, 90.0] {
            state.record_sample(target, intensity, 5);
        }
        let history = state.record_sample(target, 92.0, 5);
        let clinging = check_for_escalation(
            92.0,
            &history,
            target,
            state.clingings_mut(),
            Timestamp::default(),
            &settings.escalation,
            &settings.keywords,
        )
        .expect("sustained craving should escalate");
        state.clingings_mut().push(clinging);
    }

    #[test]
    fn fed_set_applies_to_every_cycle_in_a_frame() {
        let settings = MindConfig::default().escalation;
        let mut state = MindState::default();
        sustained_clinging(&mut state, "เงิน");
        assert!((state.clingings()[0].intensity() - 67.0).abs() < 1e-3);

        let released = state.run_cycles(3, &settings);
        assert!(released.is_empty());
        assert!((state.clingings()[0].intensity() - 76.0).abs() < 1e-3);

        // Nothing craved since, so the next frame only decays.
        state.run_cycles(2, &settings);
        assert!((state.clingings()[0].intensity() - 72.0).abs() < 1e-3);
    }

    #[test]
    fn released_and_idle_targets_drop_their_history() {
        let settings = MindConfig::default().escalation;
        let mut state = MindState::default();
        sustained_clinging(&mut state, "ritual");
        state.record_sample("อาหาร", 55.0, 5);
        assert_eq!(state.tracked_targets(), 2);

        // Both were fed this frame, so both histories survive it.
        state.run_cycles(1, &settings);
        assert_eq!(state.tracked_targets(), 2);

        // The idle craving is forgotten; the clinging keeps its history.
        state.run_cycles(1, &settings);
        assert_eq!(state.tracked_targets(), 1);

        let released = state.run_cycles(40, &settings);
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].target, "ritual");
        assert!(state.clingings().is_empty());
        assert_eq!(state.tracked_targets(), 0);
    }

    #[test]
    fn zero_cycles_keep_fed_targets() {
        let settings = MindConfig::default().escalation;
        let mut state = MindState::default();
        state.record_sample("เงิน", 70.0, 5);
        assert!(state.run_cycles(0, &settings).is_empty());
        assert!(state.take_fed_targets().contains("เงิน"));
    }

    #[test]
    fn fresh_state_is_unawakened() {
        let state = MindState::default();
        assert_eq!(state.fetters().remaining(), 10);
        assert_eq!(state.stage(), None);
        assert_eq!(state.akusala_bonus(), 0.0);
    }

    #[test]
    fn ticker_counts_whole_cycles() {
        let mut ticker = CycleTicker::default();
        ticker.accumulate(0.6, 1.0);
        assert_eq!(ticker.ready(), 0);
        ticker.accumulate(0.6, 1.0);
        assert_eq!(ticker.ready(), 1);
        ticker.accumulate(2.0, 1.0);
        assert_eq!(ticker.ready(), 2);
        ticker.accumulate(0.0, 1.0);
        assert_eq!(ticker.ready(), 0);
    }

    #[test]
    fn script_requests_attainment_on_interval() {
        let mut script = CravingScript::new(vec![("เงิน".to_string(), 70.0)], 3);
        let due: Vec<bool> = (0..6).map(|_| script.advance()).collect();
        assert_eq!(due, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn character_id_displays_padded() {
        assert_eq!(CharacterId::new(7).to_string(), "CHR-0007");
    }
}
