//! Craving (tanha) to clinging (upadana) escalation.
//!
//! Sustained craving toward a target forms a clinging record. Records that keep
//! being fed grow stronger, and the rest decay until they are dropped.
use std::collections::HashSet;

use super::{
    config::{ClingingKeywords, EscalationSettings},
    types::{clamp_intensity, Clinging, ClingingKind, Timestamp},
};

/// Classifies a craving target by keyword. Targets that match nothing are sensual.
pub fn classify_target(target: &str, keywords: &ClingingKeywords) -> ClingingKind {
    let target_lower = target.to_lowercase();
    keywords
        .by_priority()
        .into_iter()
        .find(|(_, words)| words.iter().any(|word| target_lower.contains(word.as_str())))
        .map(|(kind, _)| kind)
        .unwrap_or(ClingingKind::Sensual)
}

/// Checks whether the craving history for `target` has been sustained long enough
/// to form a clinging.
///
/// When a clinging for `target` already exists it is strengthened in place and
/// `None` is returned, so callers never hold two records for one target.
pub fn check_for_escalation(
    _current_intensity: f32,
    history: &[f32],
    target: &str,
    existing: &mut [Clinging],
    created_at: Timestamp,
    settings: &EscalationSettings,
    keywords: &ClingingKeywords,
) -> Option<Clinging> {
    if history.len() < settings.required_moments {
        return None;
    }

    let samples: Vec<f32> = history.iter().copied().map(clamp_intensity).collect();
    if samples.iter().any(|sample| *sample <= settings.threshold) {
        return None;
    }

    if let Some(clinging) = existing.iter_mut().find(|clinging| clinging.target == target) {
        clinging.strengthen(settings.repeat_gain);
        return None;
    }

    let mean = samples.iter().sum::<f32>() / samples.len() as f32;
    let intensity = settings.base_intensity + (mean - settings.threshold);

    Some(Clinging::new(
        classify_target(target, keywords),
        target,
        intensity,
        created_at,
        samples,
    ))
}

/// Runs one processing cycle: fed clingings strengthen, the rest decay, and
/// depleted records are dropped. Survivors keep their order.
pub fn process_clingings(
    clingings: &[Clinging],
    fed_targets: &HashSet<String>,
    settings: &EscalationSettings,
) -> Vec<Clinging> {
    clingings
        .iter()
        .cloned()
        .filter_map(|mut clinging| {
            if fed_targets.contains(&clinging.target) {
                clinging.strengthen(settings.feed_gain);
            } else {
                clinging.weaken(settings.decay_per_cycle);
            }
            (!clinging.is_depleted()).then_some(clinging)
        })
        .collect()
}

/// Unwholesome-tendency bonus for an external scorer: half the mean intensity, floored.
pub fn clinging_akusala_bonus(clingings: &[Clinging]) -> f32 {
    if clingings.is_empty() {
        return 0.0;
    }
    let total: f32 = clingings.iter().map(Clinging::intensity).sum();
    (total / clingings.len() as f32 / 2.0).floor()
}
