//! Character roster loading from JSON snapshots.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::mind::{Character, MindError, Parami, PerfectionPortfolio, TendencyProfile};

const ROSTER_DIR: &str = "characters";
const DEFAULT_ATTAINMENT_INTERVAL: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
struct ScriptedCraving {
    target: String,
    intensity: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct RosterFile {
    #[serde(flatten)]
    character: Character,
    #[serde(default)]
    cravings: Vec<ScriptedCraving>,
    #[serde(default)]
    attainment_interval: Option<u32>,
}

/// A character snapshot plus the cravings that drive it in the headless host.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub character: Character,
    pub cravings: Vec<(String, f32)>,
    pub attainment_interval: u32,
}

impl RosterEntry {
    pub fn from_json(raw: &str) -> Result<Self, MindError> {
        let file: RosterFile = serde_json::from_str(raw)?;
        Ok(Self {
            character: file.character,
            cravings: file
                .cravings
                .into_iter()
                .map(|craving| (craving.target, craving.intensity))
                .collect(),
            attainment_interval: file
                .attainment_interval
                .unwrap_or(DEFAULT_ATTAINMENT_INTERVAL),
        })
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CharacterRoster {
    entries: Vec<RosterEntry>,
}

impl CharacterRoster {
    pub fn load_or_default() -> Self {
        let roster = Self::load_from_dir(ROSTER_DIR);
        if roster.entries.is_empty() {
            info!(
                "No character snapshots found in {}. Using debug characters.",
                ROSTER_DIR
            );
            return Self::debug_characters();
        }
        roster
    }

    /// Loads every `*.json` file in `dir`, skipping files that fail to parse.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let Ok(read_dir) = fs::read_dir(dir) else {
            return Self::default();
        };

        let mut paths: Vec<_> = read_dir
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut entries = Vec::new();
        for path in paths {
            let parsed = fs::read_to_string(&path)
                .map_err(|err| err.to_string())
                .and_then(|raw| RosterEntry::from_json(&raw).map_err(|err| err.to_string()));
            match parsed {
                Ok(entry) => entries.push(entry),
                Err(err) => warn!("Skipping character snapshot {} ({})", path.display(), err),
            }
        }

        Self { entries }
    }

    pub fn debug_characters() -> Self {
        // (id, name, [sacca, panna, viriya, nekkhamma, upekkha],
        //  [kama, patigha, mana, vicikiccha, avijja], cravings)
        let prototypes = [
            (
                "malee",
                "Malee",
                [70, 60, 50, 0, 0],
                [20.0, 20.0, 20.0, 20.0, 20.0],
                vec![("เงิน", 72.0), ("ความเชื่อทางการเมือง", 55.0)],
            ),
            (
                "somchai",
                "Somchai",
                [90, 110, 70, 90, 40],
                [5.0, 5.0, 20.0, 0.0, 20.0],
                vec![("พิธีกรรมทางศาสนา", 66.0)],
            ),
            (
                "arun",
                "Arun",
                [30, 20, 10, 0, 0],
                [90.0, 80.0, 70.0, 60.0, 50.0],
                vec![("ตัวตนของฉัน", 85.0), ("อาหาร", 64.0)],
            ),
        ];

        let entries = prototypes
            .into_iter()
            .map(|(id, name, levels, latent, cravings)| {
                let [sacca, panna, viriya, nekkhamma, upekkha] = levels;
                let [kama, patigha, mana, vicikiccha, avijja] = latent;
                let perfections = PerfectionPortfolio {
                    truthfulness: Parami::at_level(sacca),
                    wisdom: Parami::at_level(panna),
                    effort: Parami::at_level(viriya),
                    renunciation: Parami::at_level(nekkhamma),
                    equanimity: Parami::at_level(upekkha),
                    ..PerfectionPortfolio::default()
                };
                let tendencies = TendencyProfile {
                    sensual_lust: kama,
                    ill_will: patigha,
                    conceit: mana,
                    doubt: vicikiccha,
                    ignorance: avijja,
                    ..TendencyProfile::default()
                };
                RosterEntry {
                    character: Character::new(id, name, perfections, tendencies),
                    cravings: cravings
                        .into_iter()
                        .map(|(target, intensity)| (target.to_string(), intensity))
                        .collect(),
                    attainment_interval: DEFAULT_ATTAINMENT_INTERVAL,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }
}
