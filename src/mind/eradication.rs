//! Path attainment: permanent removal of fetters and latent tendencies.
use super::{
    stages::{next_stage, AttainmentStage},
    types::{Character, Fetter, FetterSet, Perfection, TendencyProfile},
};

const SOTAPATTI_KILESA_LIMIT: f32 = 200.0;
const SAKADAGAMI_WEAKENED_CAP: f32 = 30.0;
const SAKADAGAMI_TENDENCY_LIMIT: f32 = 40.0;
const ANAGAMI_TENDENCY_CUTOFF: f32 = 10.0;

/// Fetter set of an unawakened mind: all ten present.
pub fn initialize_fetters() -> FetterSet {
    FetterSet::unawakened()
}

/// Fetters, tendencies, and human-readable descriptions after applying a stage.
#[derive(Debug, Clone, PartialEq)]
pub struct MaggaOutcome {
    pub fetters: FetterSet,
    pub tendencies: TendencyProfile,
    pub eradicated: Vec<String>,
}

/// Applies the eradication of a single stage. Ordering across stages is the
/// caller's responsibility; see [`advance_stage`] for the ordered variant.
pub fn apply_magga(
    stage: AttainmentStage,
    fetters: &FetterSet,
    tendencies: &TendencyProfile,
) -> MaggaOutcome {
    let mut fetters = *fetters;
    let mut tendencies = tendencies.clamped();
    let mut eradicated = Vec::new();

    match stage {
        AttainmentStage::Sotapatti => {
            if fetters.cut(Fetter::SelfView) {
                eradicated.push(Fetter::SelfView.label().to_string());
                // Zeroes the ignorance tendency although the ignorance fetter
                // itself is only cut at arahatta. Kept as-is pending review.
                tendencies.ignorance = 0.0;
            }
            if fetters.cut(Fetter::Doubt) {
                eradicated.push(Fetter::Doubt.label().to_string());
                tendencies.doubt = 0.0;
            }
            if fetters.cut(Fetter::RitualAttachment) {
                eradicated.push(Fetter::RitualAttachment.label().to_string());
            }
        }
        AttainmentStage::Sakadagami => {
            if tendencies.sensual_lust > SAKADAGAMI_WEAKENED_CAP {
                tendencies.sensual_lust = SAKADAGAMI_WEAKENED_CAP;
                eradicated.push("Kāma-rāga weakened".to_string());
            }
            if tendencies.ill_will > SAKADAGAMI_WEAKENED_CAP {
                tendencies.ill_will = SAKADAGAMI_WEAKENED_CAP;
                eradicated.push("Paṭigha weakened".to_string());
            }
        }
        AttainmentStage::Anagami => {
            if fetters.cut(Fetter::SensualLust) {
                eradicated.push(eradicated_label(Fetter::SensualLust));
                tendencies.sensual_lust = 0.0;
            }
            if fetters.cut(Fetter::IllWill) {
                eradicated.push(eradicated_label(Fetter::IllWill));
                tendencies.ill_will = 0.0;
            }
        }
        AttainmentStage::Arahatta => {
            for fetter in [
                Fetter::FormLust,
                Fetter::FormlessLust,
                Fetter::Conceit,
                Fetter::Restlessness,
                Fetter::Ignorance,
            ] {
                if fetters.cut(fetter) {
                    eradicated.push(eradicated_label(fetter));
                }
            }
            tendencies = TendencyProfile::default();
        }
    }

    MaggaOutcome {
        fetters,
        tendencies,
        eradicated,
    }
}

fn eradicated_label(fetter: Fetter) -> String {
    format!("{} - ERADICATED", fetter.label())
}

/// Eligibility verdict for a requested stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaggaEligibility {
    pub can_attain: bool,
    pub requirements_met: Vec<String>,
    pub requirements_missing: Vec<String>,
}

impl MaggaEligibility {
    /// Number of requirements checked for the stage.
    pub fn total_requirements(&self) -> usize {
        self.requirements_met.len() + self.requirements_missing.len()
    }

    /// Whole-number percentage of requirements met, rounded down.
    pub fn progress(&self) -> u8 {
        let total = self.total_requirements();
        if total == 0 {
            return 0;
        }
        (self.requirements_met.len() * 100 / total) as u8
    }
}

struct Requirement {
    met: bool,
    message: String,
}

impl Requirement {
    fn check(
        met: bool,
        met_message: impl Into<String>,
        missing_message: impl Into<String>,
    ) -> Self {
        let message = if met {
            met_message.into()
        } else {
            missing_message.into()
        };
        Self { met, message }
    }

    fn perfection(
        character: &Character,
        perfection: Perfection,
        minimum: u32,
        met_message: &str,
    ) -> Self {
        let level = character.perfections.level(perfection);
        Self::check(
            level >= minimum,
            met_message,
            format!(
                "{} needs {} more levels",
                perfection.pali_name(),
                minimum.saturating_sub(level)
            ),
        )
    }
}

fn requirements(stage: AttainmentStage, character: &Character) -> Vec<Requirement> {
    let tendencies = character.tendencies.clamped();

    match stage {
        AttainmentStage::Sotapatti => {
            let total = tendencies.total();
            vec![
                Requirement::perfection(
                    character,
                    Perfection::Truthfulness,
                    70,
                    "Sacca (Truthfulness) sufficient",
                ),
                Requirement::perfection(
                    character,
                    Perfection::Wisdom,
                    60,
                    "Paññā (Wisdom) sufficient",
                ),
                Requirement::perfection(
                    character,
                    Perfection::Effort,
                    50,
                    "Viriya (Effort) sufficient",
                ),
                Requirement::check(
                    total <= SOTAPATTI_KILESA_LIMIT,
                    "Kilesa levels manageable",
                    format!("Total Kilesa too high ({} > {})", total, SOTAPATTI_KILESA_LIMIT),
                ),
            ]
        }
        AttainmentStage::Sakadagami => vec![
            Requirement::perfection(character, Perfection::Wisdom, 80, "Paññā enhanced"),
            Requirement::check(
                tendencies.sensual_lust <= SAKADAGAMI_TENDENCY_LIMIT,
                "Kāma-rāga weakened",
                "Kāma-rāga still too strong",
            ),
            Requirement::check(
                tendencies.ill_will <= SAKADAGAMI_TENDENCY_LIMIT,
                "Paṭigha weakened",
                "Paṭigha still too strong",
            ),
        ],
        AttainmentStage::Anagami => vec![
            Requirement::perfection(character, Perfection::Wisdom, 100, "Paññā very strong"),
            Requirement::perfection(
                character,
                Perfection::Renunciation,
                80,
                "Nekkhamma (Renunciation) sufficient",
            ),
            Requirement::check(
                tendencies.sensual_lust < ANAGAMI_TENDENCY_CUTOFF,
                "Kāma-rāga nearly gone",
                format!("Kāma-rāga must be < {}", ANAGAMI_TENDENCY_CUTOFF),
            ),
            Requirement::check(
                tendencies.ill_will < ANAGAMI_TENDENCY_CUTOFF,
                "Paṭigha nearly gone",
                format!("Paṭigha must be < {}", ANAGAMI_TENDENCY_CUTOFF),
            ),
        ],
        AttainmentStage::Arahatta => vec![
            Requirement::perfection(character, Perfection::Wisdom, 150, "Paññā perfected"),
            Requirement::perfection(
                character,
                Perfection::Equanimity,
                120,
                "Upekkhā (Equanimity) perfected",
            ),
            Requirement::check(
                tendencies.is_clear(),
                "All Kilesa eradicated",
                "All Kilesa must be eradicated first",
            ),
        ],
    }
}

/// Evaluates every requirement of `stage` against the character's perfections
/// and clamped tendencies.
pub fn can_attain_magga(stage: AttainmentStage, character: &Character) -> MaggaEligibility {
    let mut eligibility = MaggaEligibility::default();
    for requirement in requirements(stage, character) {
        if requirement.met {
            eligibility.requirements_met.push(requirement.message);
        } else {
            eligibility.requirements_missing.push(requirement.message);
        }
    }
    eligibility.can_attain = eligibility.requirements_missing.is_empty();
    eligibility
}

/// Percentage of the requirements of `stage` already met.
pub fn calculate_magga_progress(stage: AttainmentStage, character: &Character) -> u8 {
    can_attain_magga(stage, character).progress()
}

/// Result of trying to move a character to its next stage.
#[derive(Debug, Clone, PartialEq)]
pub enum AttainmentAttempt {
    Attained {
        stage: AttainmentStage,
        outcome: MaggaOutcome,
    },
    Denied {
        stage: AttainmentStage,
        eligibility: MaggaEligibility,
    },
    /// Arahatta already reached; nothing follows.
    Complete,
}

/// Checks and, if eligible, applies the stage after `current`.
pub fn advance_stage(
    current: Option<AttainmentStage>,
    fetters: &FetterSet,
    character: &Character,
) -> AttainmentAttempt {
    let Some(stage) = next_stage(current) else {
        return AttainmentAttempt::Complete;
    };

    let eligibility = can_attain_magga(stage, character);
    if !eligibility.can_attain {
        return AttainmentAttempt::Denied { stage, eligibility };
    }

    AttainmentAttempt::Attained {
        stage,
        outcome: apply_magga(stage, fetters, &character.tendencies),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mind::types::{Parami, PerfectionPortfolio};

    fn sample_tendencies() -> TendencyProfile {
        TendencyProfile {
            sensual_lust: 80.0,
            ill_will: 70.0,
            conceit: 60.0,
            doubt: 50.0,
            views: 40.0,
            existence_lust: 30.0,
            ignorance: 90.0,
        }
    }

    fn uniform_tendencies(value: f32) -> TendencyProfile {
        TendencyProfile {
            sensual_lust: value,
            ill_will: value,
            conceit: value,
            doubt: value,
            views: value,
            existence_lust: value,
            ignorance: value,
        }
    }

    fn character(levels: &[(Perfection, u32)], tendencies: TendencyProfile) -> Character {
        let mut perfections = PerfectionPortfolio::default();
        for (perfection, level) in levels {
            let slot = match perfection {
                Perfection::Generosity => &mut perfections.generosity,
                Perfection::Morality => &mut perfections.morality,
                Perfection::Renunciation => &mut perfections.renunciation,
                Perfection::Wisdom => &mut perfections.wisdom,
                Perfection::Effort => &mut perfections.effort,
                Perfection::Patience => &mut perfections.patience,
                Perfection::Truthfulness => &mut perfections.truthfulness,
                Perfection::Determination => &mut perfections.determination,
                Perfection::LovingKindness => &mut perfections.loving_kindness,
                Perfection::Equanimity => &mut perfections.equanimity,
            };
            *slot = Parami::at_level(*level);
        }
        Character::new("test", "Test", perfections, tendencies)
    }

    #[test]
    fn initial_fetters_are_all_present() {
        let fetters = initialize_fetters();
        assert!(Fetter::ALL.iter().all(|fetter| fetters.is_present(*fetter)));
    }

    #[test]
    fn sotapatti_cuts_first_three_fetters() {
        let outcome = apply_magga(
            AttainmentStage::Sotapatti,
            &initialize_fetters(),
            &sample_tendencies(),
        );

        assert!(!outcome.fetters.self_view);
        assert!(!outcome.fetters.doubt);
        assert!(!outcome.fetters.ritual_attachment);
        assert!(outcome.fetters.sensual_lust);
        assert!(outcome.fetters.ill_will);
        assert!(outcome.fetters.ignorance);
        assert_eq!(outcome.eradicated.len(), 3);

        assert_eq!(outcome.tendencies.doubt, 0.0);
        assert_eq!(outcome.tendencies.ignorance, 0.0);
        assert_eq!(outcome.tendencies.sensual_lust, 80.0);
    }

    #[test]
    fn sakadagami_caps_strong_tendencies_only() {
        let outcome = apply_magga(
            AttainmentStage::Sakadagami,
            &initialize_fetters(),
            &sample_tendencies(),
        );
        assert_eq!(outcome.tendencies.sensual_lust, 30.0);
        assert_eq!(outcome.tendencies.ill_will, 30.0);
        assert!(outcome.eradicated.contains(&"Kāma-rāga weakened".to_string()));
        assert!(outcome.eradicated.contains(&"Paṭigha weakened".to_string()));
        assert_eq!(outcome.fetters, initialize_fetters());

        let mild = TendencyProfile {
            sensual_lust: 20.0,
            ill_will: 15.0,
            ..sample_tendencies()
        };
        let outcome = apply_magga(AttainmentStage::Sakadagami, &initialize_fetters(), &mild);
        assert_eq!(outcome.tendencies.sensual_lust, 20.0);
        assert_eq!(outcome.tendencies.ill_will, 15.0);
        assert!(outcome.eradicated.is_empty());

        let mixed = TendencyProfile {
            sensual_lust: 45.0,
            ill_will: 30.0,
            ..sample_tendencies()
        };
        let outcome = apply_magga(AttainmentStage::Sakadagami, &initialize_fetters(), &mixed);
        assert_eq!(outcome.eradicated, vec!["Kāma-rāga weakened".to_string()]);
    }

    #[test]
    fn anagami_eradicates_sensual_lust_and_ill_will() {
        let outcome = apply_magga(
            AttainmentStage::Anagami,
            &initialize_fetters(),
            &sample_tendencies(),
        );

        assert!(!outcome.fetters.sensual_lust);
        assert!(!outcome.fetters.ill_will);
        assert!(outcome.fetters.form_lust);
        assert!(outcome.fetters.formless_lust);
        assert!(outcome.fetters.conceit);
        assert_eq!(outcome.tendencies.sensual_lust, 0.0);
        assert_eq!(outcome.tendencies.ill_will, 0.0);
        assert_eq!(
            outcome.eradicated,
            vec![
                "Kāma-rāga (Sensual Lust) - ERADICATED".to_string(),
                "Paṭigha (Ill-will) - ERADICATED".to_string(),
            ]
        );
    }

    #[test]
    fn arahatta_clears_remaining_fetters_and_all_tendencies() {
        let outcome = apply_magga(
            AttainmentStage::Arahatta,
            &initialize_fetters(),
            &uniform_tendencies(50.0),
        );

        assert!(!outcome.fetters.form_lust);
        assert!(!outcome.fetters.formless_lust);
        assert!(!outcome.fetters.conceit);
        assert!(!outcome.fetters.restlessness);
        assert!(!outcome.fetters.ignorance);
        assert_eq!(outcome.eradicated.len(), 5);
        assert!(outcome.tendencies.is_clear());
    }

    #[test]
    fn forward_stages_never_restore_a_cut_fetter() {
        let mut fetters = initialize_fetters();
        let mut tendencies = sample_tendencies();
        let mut cut_so_far: Vec<Fetter> = Vec::new();

        for stage in AttainmentStage::ORDER {
            let outcome = apply_magga(stage, &fetters, &tendencies);
            for fetter in &cut_so_far {
                assert!(!outcome.fetters.is_present(*fetter), "{fetter:?} returned at {stage}");
            }
            cut_so_far = Fetter::ALL
                .into_iter()
                .filter(|fetter| !outcome.fetters.is_present(*fetter))
                .collect();
            fetters = outcome.fetters;
            tendencies = outcome.tendencies;
        }

        assert_eq!(fetters.remaining(), 0);
        assert!(tendencies.is_clear());
    }

    #[test]
    fn reapplying_a_stage_reports_nothing_new() {
        let first = apply_magga(
            AttainmentStage::Anagami,
            &initialize_fetters(),
            &sample_tendencies(),
        );
        let second = apply_magga(AttainmentStage::Anagami, &first.fetters, &first.tendencies);
        assert!(second.eradicated.is_empty());
        assert_eq!(second.fetters, first.fetters);
    }

    #[test]
    fn sotapatti_allowed_when_all_requirements_met() {
        let character = character(
            &[
                (Perfection::Truthfulness, 70),
                (Perfection::Wisdom, 60),
                (Perfection::Effort, 50),
            ],
            uniform_tendencies(20.0),
        );
        let result = can_attain_magga(AttainmentStage::Sotapatti, &character);
        assert!(result.can_attain);
        assert_eq!(result.requirements_met.len(), 4);
        assert!(result.requirements_missing.is_empty());
    }

    #[test]
    fn sotapatti_reports_missing_levels() {
        let character = character(
            &[
                (Perfection::Truthfulness, 50),
                (Perfection::Wisdom, 60),
                (Perfection::Effort, 50),
            ],
            uniform_tendencies(20.0),
        );
        let result = can_attain_magga(AttainmentStage::Sotapatti, &character);
        assert!(!result.can_attain);
        assert_eq!(
            result.requirements_missing,
            vec!["Sacca needs 20 more levels".to_string()]
        );
    }

    #[test]
    fn sotapatti_kilesa_limit_is_inclusive() {
        let levels = [
            (Perfection::Truthfulness, 70),
            (Perfection::Wisdom, 60),
            (Perfection::Effort, 50),
        ];
        let at_limit = TendencyProfile {
            sensual_lust: 100.0,
            ill_will: 100.0,
            ..TendencyProfile::default()
        };
        let result = can_attain_magga(AttainmentStage::Sotapatti, &character(&levels, at_limit));
        assert!(result.can_attain);

        let result = can_attain_magga(
            AttainmentStage::Sotapatti,
            &character(&levels, uniform_tendencies(50.0)),
        );
        assert!(!result.can_attain);
        assert!(result.requirements_missing[0].contains("Total Kilesa too high"));
        assert!(result.requirements_missing[0].contains("350"));
    }

    #[test]
    fn sakadagami_requires_weakened_tendencies() {
        let tendencies = TendencyProfile {
            sensual_lust: 40.0,
            ill_will: 40.0,
            conceit: 20.0,
            views: 20.0,
            existence_lust: 20.0,
            ..TendencyProfile::default()
        };
        let result = can_attain_magga(
            AttainmentStage::Sakadagami,
            &character(&[(Perfection::Wisdom, 80)], tendencies),
        );
        assert!(result.can_attain);
        assert!(result.requirements_met.contains(&"Paññā enhanced".to_string()));
        assert!(result.requirements_met.contains(&"Kāma-rāga weakened".to_string()));
        assert!(result.requirements_met.contains(&"Paṭigha weakened".to_string()));

        let strong = TendencyProfile {
            sensual_lust: 41.0,
            ..tendencies
        };
        let result = can_attain_magga(
            AttainmentStage::Sakadagami,
            &character(&[(Perfection::Wisdom, 80)], strong),
        );
        assert!(!result.can_attain);
        assert_eq!(
            result.requirements_missing,
            vec!["Kāma-rāga still too strong".to_string()]
        );
    }

    #[test]
    fn anagami_requires_renunciation_and_near_zero_lust() {
        let tendencies = TendencyProfile {
            sensual_lust: 5.0,
            ill_will: 5.0,
            conceit: 20.0,
            existence_lust: 20.0,
            ..TendencyProfile::default()
        };
        let levels = [(Perfection::Wisdom, 100), (Perfection::Renunciation, 80)];
        let result = can_attain_magga(AttainmentStage::Anagami, &character(&levels, tendencies));
        assert!(result.can_attain);
        assert!(result.requirements_met.contains(&"Paññā very strong".to_string()));
        assert!(result
            .requirements_met
            .contains(&"Nekkhamma (Renunciation) sufficient".to_string()));
        assert_eq!(result.total_requirements(), 4);
    }

    #[test]
    fn anagami_cutoff_is_strict() {
        let levels = [(Perfection::Wisdom, 100), (Perfection::Renunciation, 80)];
        let at_cutoff = TendencyProfile {
            sensual_lust: 10.0,
            ill_will: 9.99,
            ..TendencyProfile::default()
        };
        let result = can_attain_magga(AttainmentStage::Anagami, &character(&levels, at_cutoff));
        assert!(!result.can_attain);
        assert_eq!(
            result.requirements_missing,
            vec!["Kāma-rāga must be < 10".to_string()]
        );
        assert!(result.requirements_met.contains(&"Paṭigha nearly gone".to_string()));
        assert_eq!(result.progress(), 75);

        let both_at_cutoff = TendencyProfile {
            sensual_lust: 10.0,
            ill_will: 10.0,
            ..TendencyProfile::default()
        };
        let result =
            can_attain_magga(AttainmentStage::Anagami, &character(&levels, both_at_cutoff));
        assert_eq!(
            result.requirements_missing,
            vec![
                "Kāma-rāga must be < 10".to_string(),
                "Paṭigha must be < 10".to_string(),
            ]
        );
    }

    #[test]
    fn anagami_reports_missing_perfection_levels() {
        let levels = [(Perfection::Wisdom, 90), (Perfection::Renunciation, 70)];
        let result = can_attain_magga(
            AttainmentStage::Anagami,
            &character(&levels, TendencyProfile::default()),
        );
        assert!(!result.can_attain);
        assert_eq!(
            result.requirements_missing,
            vec![
                "Paññā needs 10 more levels".to_string(),
                "Nekkhamma needs 10 more levels".to_string(),
            ]
        );
        let progress = calculate_magga_progress(
            AttainmentStage::Anagami,
            &character(&levels, TendencyProfile::default()),
        );
        assert_eq!(progress, 50);
    }

    #[test]
    fn arahatta_requires_every_tendency_cleared() {
        let levels = [(Perfection::Wisdom, 150), (Perfection::Equanimity, 120)];
        let result = can_attain_magga(
            AttainmentStage::Arahatta,
            &character(&levels, TendencyProfile::default()),
        );
        assert!(result.can_attain);
        assert!(result.requirements_met.contains(&"Paññā perfected".to_string()));
        assert!(result
            .requirements_met
            .contains(&"Upekkhā (Equanimity) perfected".to_string()));
        assert!(result.requirements_met.contains(&"All Kilesa eradicated".to_string()));

        let one_left = TendencyProfile {
            existence_lust: 1.0,
            ..TendencyProfile::default()
        };
        let result = can_attain_magga(AttainmentStage::Arahatta, &character(&levels, one_left));
        assert!(!result.can_attain);
        assert_eq!(result.requirements_met.len(), 2);
        assert!(result
            .requirements_missing
            .contains(&"All Kilesa must be eradicated first".to_string()));
    }

    #[test]
    fn progress_counts_met_requirements() {
        let full = character(
            &[
                (Perfection::Truthfulness, 70),
                (Perfection::Wisdom, 60),
                (Perfection::Effort, 50),
            ],
            uniform_tendencies(20.0),
        );
        assert_eq!(calculate_magga_progress(AttainmentStage::Sotapatti, &full), 100);

        let none = character(&[], uniform_tendencies(100.0));
        assert_eq!(calculate_magga_progress(AttainmentStage::Sotapatti, &none), 0);

        let half = character(
            &[
                (Perfection::Truthfulness, 70),
                (Perfection::Wisdom, 60),
                (Perfection::Effort, 30),
            ],
            uniform_tendencies(50.0),
        );
        assert_eq!(calculate_magga_progress(AttainmentStage::Sotapatti, &half), 50);

        let one_of_three = character(&[(Perfection::Wisdom, 80)], uniform_tendencies(90.0));
        assert_eq!(calculate_magga_progress(AttainmentStage::Sakadagami, &one_of_three), 33);
    }

    #[test]
    fn advance_stage_walks_forward_only_when_eligible() {
        let unqualified = character(&[], uniform_tendencies(100.0));
        match advance_stage(None, &initialize_fetters(), &unqualified) {
            AttainmentAttempt::Denied { stage, eligibility } => {
                assert_eq!(stage, AttainmentStage::Sotapatti);
                assert_eq!(eligibility.progress(), 0);
            }
            other => panic!("expected denial, got {other:?}"),
        }

        let qualified = character(
            &[
                (Perfection::Truthfulness, 70),
                (Perfection::Wisdom, 60),
                (Perfection::Effort, 50),
            ],
            uniform_tendencies(20.0),
        );
        match advance_stage(None, &initialize_fetters(), &qualified) {
            AttainmentAttempt::Attained { stage, outcome } => {
                assert_eq!(stage, AttainmentStage::Sotapatti);
                assert_eq!(outcome.eradicated.len(), 3);
                assert_eq!(outcome.fetters.remaining(), 7);
            }
            other => panic!("expected attainment, got {other:?}"),
        }

        assert_eq!(
            advance_stage(Some(AttainmentStage::Arahatta), &FetterSet::unawakened(), &qualified),
            AttainmentAttempt::Complete
        );
    }
}
