use std::{env, fs, path::PathBuf};

use bevy::prelude::*;
use serde::Deserialize;

use super::{errors::MindError, types::ClingingKind};

const CONFIG_PATH: &str = "config/mind.toml";
const CONFIG_PATH_ENV: &str = "MIND_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawMindConfig {
    #[serde(default)]
    escalation: RawEscalation,
    #[serde(default)]
    cycle: RawCycle,
    #[serde(default)]
    keywords: RawKeywords,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawEscalation {
    threshold: f32,
    required_moments: usize,
    base_intensity: f32,
    repeat_gain: f32,
    feed_gain: f32,
    decay_per_cycle: f32,
}

impl Default for RawEscalation {
    fn default() -> Self {
        Self {
            threshold: 60.0,
            required_moments: 5,
            base_intensity: 40.0,
            repeat_gain: 5.0,
            feed_gain: 3.0,
            decay_per_cycle: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCycle {
    seconds: f32,
    history_capacity: usize,
}

impl Default for RawCycle {
    fn default() -> Self {
        Self {
            seconds: 1.0,
            history_capacity: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawKeywords {
    view: Vec<String>,
    ritual: Vec<String>,
    self_doctrine: Vec<String>,
    sensual: Vec<String>,
}

impl Default for RawKeywords {
    fn default() -> Self {
        Self {
            view: to_strings(&[
                "ความคิด",
                "ความเชื่อ",
                "ทฤษฎี",
                "อุดมการณ์",
                "ideology",
                "belief",
                "opinion",
                "view",
            ]),
            ritual: to_strings(&[
                "พิธีกรรม",
                "ศาสนพิธี",
                "ประเพณี",
                "ritual",
                "ceremony",
                "practice",
            ]),
            self_doctrine: to_strings(&[
                "ตัวตน",
                "ตัวเอง",
                "อัตตา",
                "ชื่อเสียง",
                "self",
                "ego",
                "identity",
                "reputation",
            ]),
            sensual: to_strings(&[
                "เงิน",
                "อาหาร",
                "เพศ",
                "ความสุข",
                "pleasure",
                "sex",
                "money",
                "food",
            ]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Runtime configuration derived from `config/mind.toml`.
#[derive(Resource, Debug, Clone)]
pub struct MindConfig {
    pub escalation: EscalationSettings,
    pub cycle: CycleSettings,
    pub keywords: ClingingKeywords,
}

/// Constants of the craving-to-clinging escalation.
#[derive(Debug, Clone)]
pub struct EscalationSettings {
    /// Every sample must be strictly above this for craving to count as sustained.
    pub threshold: f32,
    pub required_moments: usize,
    pub base_intensity: f32,
    /// Gain when sustained craving hits a target that already has a clinging.
    pub repeat_gain: f32,
    /// Gain per cycle for a clinging whose target was craved again.
    pub feed_gain: f32,
    pub decay_per_cycle: f32,
}

#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub seconds: f32,
    pub history_capacity: usize,
}

/// Substrings that classify a craving target into a clinging kind.
#[derive(Debug, Clone)]
pub struct ClingingKeywords {
    pub view: Vec<String>,
    pub ritual: Vec<String>,
    pub self_doctrine: Vec<String>,
    pub sensual: Vec<String>,
}

impl ClingingKeywords {
    /// Keyword lists in classification priority order.
    pub fn by_priority(&self) -> [(ClingingKind, &[String]); 4] {
        [
            (ClingingKind::View, self.view.as_slice()),
            (ClingingKind::Ritual, self.ritual.as_slice()),
            (ClingingKind::SelfDoctrine, self.self_doctrine.as_slice()),
            (ClingingKind::Sensual, self.sensual.as_slice()),
        ]
    }
}

impl MindConfig {
    pub fn load_or_default() -> Self {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_PATH));

        match fs::read_to_string(&path) {
            Ok(raw) => match Self::from_toml_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        path.display(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, MindError> {
        let parsed = toml::from_str::<RawMindConfig>(raw)?;
        Ok(parsed.into())
    }
}

impl Default for MindConfig {
    fn default() -> Self {
        RawMindConfig::default().into()
    }
}

impl From<RawMindConfig> for MindConfig {
    fn from(value: RawMindConfig) -> Self {
        let escalation = EscalationSettings {
            threshold: value.escalation.threshold.clamp(0.0, 100.0),
            required_moments: value.escalation.required_moments.max(1),
            base_intensity: value.escalation.base_intensity.clamp(0.0, 100.0),
            repeat_gain: value.escalation.repeat_gain.max(0.0),
            feed_gain: value.escalation.feed_gain.max(0.0),
            decay_per_cycle: value.escalation.decay_per_cycle.max(f32::EPSILON),
        };

        let cycle = CycleSettings {
            seconds: value.cycle.seconds.max(0.01),
            history_capacity: value.cycle.history_capacity.max(escalation.required_moments),
        };

        let keywords = ClingingKeywords {
            view: normalise_keywords(&value.keywords.view),
            ritual: normalise_keywords(&value.keywords.ritual),
            self_doctrine: normalise_keywords(&value.keywords.self_doctrine),
            sensual: normalise_keywords(&value.keywords.sensual),
        };

        Self {
            escalation,
            cycle,
            keywords,
        }
    }
}

fn normalise_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}
