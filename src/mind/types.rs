//! Data model shared by the escalation and eradication engines.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::MindError;

pub const MIN_INTENSITY: f32 = 0.0;
pub const MAX_INTENSITY: f32 = 100.0;

/// Clamps a craving, clinging, or tendency value into `[0, 100]`. NaN maps to zero.
pub fn clamp_intensity(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_INTENSITY;
    }
    value.clamp(MIN_INTENSITY, MAX_INTENSITY)
}

/// Milliseconds on the caller's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

/// The four kinds of clinging (upadana).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClingingKind {
    #[serde(rename = "kamupadana")]
    Sensual,
    #[serde(rename = "ditthupadana")]
    View,
    #[serde(rename = "silabbatupadana")]
    Ritual,
    #[serde(rename = "attavadupadana")]
    SelfDoctrine,
}

impl ClingingKind {
    pub const ALL: [ClingingKind; 4] = [
        ClingingKind::Sensual,
        ClingingKind::View,
        ClingingKind::Ritual,
        ClingingKind::SelfDoctrine,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sensual => "kamupadana",
            Self::View => "ditthupadana",
            Self::Ritual => "silabbatupadana",
            Self::SelfDoctrine => "attavadupadana",
        }
    }

    /// Short English rendering used in log lines.
    pub fn gloss(self) -> &'static str {
        match self {
            Self::Sensual => "clinging to sensual pleasure",
            Self::View => "clinging to views",
            Self::Ritual => "clinging to rites and rituals",
            Self::SelfDoctrine => "clinging to a doctrine of self",
        }
    }
}

impl fmt::Display for ClingingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClingingKind {
    type Err = MindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == normalised)
            .ok_or_else(|| MindError::unknown_clinging_kind(value))
    }
}

/// Persistent clinging formed once craving toward a target has been sustained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinging {
    pub kind: ClingingKind,
    #[serde(deserialize_with = "deserialize_intensity")]
    intensity: f32,
    pub target: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub tanha_history: Vec<f32>,
}

impl Clinging {
    pub fn new(
        kind: ClingingKind,
        target: impl Into<String>,
        intensity: f32,
        created_at: Timestamp,
        tanha_history: Vec<f32>,
    ) -> Self {
        Self {
            kind,
            intensity: clamp_intensity(intensity),
            target: target.into(),
            created_at,
            tanha_history,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Adds `amount` and returns the new intensity, capped at 100.
    pub fn strengthen(&mut self, amount: f32) -> f32 {
        self.intensity = clamp_intensity(self.intensity + amount.max(0.0));
        self.intensity
    }

    /// Removes `amount` and returns the new intensity, floored at 0.
    pub fn weaken(&mut self, amount: f32) -> f32 {
        self.intensity = clamp_intensity(self.intensity - amount.max(0.0));
        self.intensity
    }

    pub fn is_depleted(&self) -> bool {
        self.intensity <= MIN_INTENSITY
    }
}

fn deserialize_intensity<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(clamp_intensity)
}

/// One of the ten fetters (samyojana).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fetter {
    SelfView,
    Doubt,
    RitualAttachment,
    SensualLust,
    IllWill,
    FormLust,
    FormlessLust,
    Conceit,
    Restlessness,
    Ignorance,
}

impl Fetter {
    pub const ALL: [Fetter; 10] = [
        Fetter::SelfView,
        Fetter::Doubt,
        Fetter::RitualAttachment,
        Fetter::SensualLust,
        Fetter::IllWill,
        Fetter::FormLust,
        Fetter::FormlessLust,
        Fetter::Conceit,
        Fetter::Restlessness,
        Fetter::Ignorance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SelfView => "Sakkāya-diṭṭhi (Personality Belief)",
            Self::Doubt => "Vicikicchā (Doubt)",
            Self::RitualAttachment => "Sīlabbata-parāmāsa (Rites & Rituals)",
            Self::SensualLust => "Kāma-rāga (Sensual Lust)",
            Self::IllWill => "Paṭigha (Ill-will)",
            Self::FormLust => "Rūpa-rāga (Fine-Material Lust)",
            Self::FormlessLust => "Arūpa-rāga (Immaterial Lust)",
            Self::Conceit => "Māna (Conceit)",
            Self::Restlessness => "Uddhacca (Restlessness)",
            Self::Ignorance => "Avijjā (Ignorance)",
        }
    }
}

/// Presence flags for all ten fetters. `true` means the fetter still binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetterSet {
    pub self_view: bool,
    pub doubt: bool,
    pub ritual_attachment: bool,
    pub sensual_lust: bool,
    pub ill_will: bool,
    pub form_lust: bool,
    pub formless_lust: bool,
    pub conceit: bool,
    pub restlessness: bool,
    pub ignorance: bool,
}

impl FetterSet {
    /// Baseline for an unawakened character: every fetter present.
    pub const fn unawakened() -> Self {
        Self {
            self_view: true,
            doubt: true,
            ritual_attachment: true,
            sensual_lust: true,
            ill_will: true,
            form_lust: true,
            formless_lust: true,
            conceit: true,
            restlessness: true,
            ignorance: true,
        }
    }

    pub fn is_present(&self, fetter: Fetter) -> bool {
        match fetter {
            Fetter::SelfView => self.self_view,
            Fetter::Doubt => self.doubt,
            Fetter::RitualAttachment => self.ritual_attachment,
            Fetter::SensualLust => self.sensual_lust,
            Fetter::IllWill => self.ill_will,
            Fetter::FormLust => self.form_lust,
            Fetter::FormlessLust => self.formless_lust,
            Fetter::Conceit => self.conceit,
            Fetter::Restlessness => self.restlessness,
            Fetter::Ignorance => self.ignorance,
        }
    }

    /// Cuts a fetter. Returns `true` when it was still present.
    pub fn cut(&mut self, fetter: Fetter) -> bool {
        let flag = match fetter {
            Fetter::SelfView => &mut self.self_view,
            Fetter::Doubt => &mut self.doubt,
            Fetter::RitualAttachment => &mut self.ritual_attachment,
            Fetter::SensualLust => &mut self.sensual_lust,
            Fetter::IllWill => &mut self.ill_will,
            Fetter::FormLust => &mut self.form_lust,
            Fetter::FormlessLust => &mut self.formless_lust,
            Fetter::Conceit => &mut self.conceit,
            Fetter::Restlessness => &mut self.restlessness,
            Fetter::Ignorance => &mut self.ignorance,
        };
        std::mem::replace(flag, false)
    }

    pub fn remaining(&self) -> usize {
        Fetter::ALL
            .into_iter()
            .filter(|fetter| self.is_present(*fetter))
            .count()
    }
}

impl Default for FetterSet {
    fn default() -> Self {
        Self::unawakened()
    }
}

/// The seven latent tendencies (anusaya), each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TendencyProfile {
    #[serde(alias = "kama_raga")]
    pub sensual_lust: f32,
    #[serde(alias = "patigha")]
    pub ill_will: f32,
    #[serde(alias = "mana")]
    pub conceit: f32,
    #[serde(alias = "vicikiccha")]
    pub doubt: f32,
    #[serde(alias = "ditthi")]
    pub views: f32,
    #[serde(alias = "bhava_raga")]
    pub existence_lust: f32,
    #[serde(alias = "avijja")]
    pub ignorance: f32,
}

impl TendencyProfile {
    pub fn values(&self) -> [f32; 7] {
        [
            self.sensual_lust,
            self.ill_will,
            self.conceit,
            self.doubt,
            self.views,
            self.existence_lust,
            self.ignorance,
        ]
    }

    pub fn total(&self) -> f32 {
        self.values().iter().sum()
    }

    pub fn is_clear(&self) -> bool {
        self.values().iter().all(|value| *value == 0.0)
    }

    pub fn clamped(&self) -> Self {
        Self {
            sensual_lust: clamp_intensity(self.sensual_lust),
            ill_will: clamp_intensity(self.ill_will),
            conceit: clamp_intensity(self.conceit),
            doubt: clamp_intensity(self.doubt),
            views: clamp_intensity(self.views),
            existence_lust: clamp_intensity(self.existence_lust),
            ignorance: clamp_intensity(self.ignorance),
        }
    }
}

/// Level and accumulated experience of a single perfection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parami {
    pub level: u32,
    #[serde(alias = "exp")]
    pub experience: u32,
}

impl Parami {
    pub const fn at_level(level: u32) -> Self {
        Self {
            level,
            experience: 0,
        }
    }
}

/// The ten perfections (parami).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perfection {
    Generosity,
    Morality,
    Renunciation,
    Wisdom,
    Effort,
    Patience,
    Truthfulness,
    Determination,
    LovingKindness,
    Equanimity,
}

impl Perfection {
    pub const ALL: [Perfection; 10] = [
        Perfection::Generosity,
        Perfection::Morality,
        Perfection::Renunciation,
        Perfection::Wisdom,
        Perfection::Effort,
        Perfection::Patience,
        Perfection::Truthfulness,
        Perfection::Determination,
        Perfection::LovingKindness,
        Perfection::Equanimity,
    ];

    pub fn pali_name(self) -> &'static str {
        match self {
            Self::Generosity => "Dāna",
            Self::Morality => "Sīla",
            Self::Renunciation => "Nekkhamma",
            Self::Wisdom => "Paññā",
            Self::Effort => "Viriya",
            Self::Patience => "Khanti",
            Self::Truthfulness => "Sacca",
            Self::Determination => "Adhiṭṭhāna",
            Self::LovingKindness => "Mettā",
            Self::Equanimity => "Upekkhā",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Self::Generosity => "Generosity",
            Self::Morality => "Morality",
            Self::Renunciation => "Renunciation",
            Self::Wisdom => "Wisdom",
            Self::Effort => "Effort",
            Self::Patience => "Patience",
            Self::Truthfulness => "Truthfulness",
            Self::Determination => "Determination",
            Self::LovingKindness => "Loving-kindness",
            Self::Equanimity => "Equanimity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfectionPortfolio {
    #[serde(alias = "dana", alias = "caga")]
    pub generosity: Parami,
    #[serde(alias = "sila")]
    pub morality: Parami,
    #[serde(alias = "nekkhamma")]
    pub renunciation: Parami,
    #[serde(alias = "panna")]
    pub wisdom: Parami,
    #[serde(alias = "viriya")]
    pub effort: Parami,
    #[serde(alias = "khanti")]
    pub patience: Parami,
    #[serde(alias = "sacca")]
    pub truthfulness: Parami,
    #[serde(alias = "adhitthana")]
    pub determination: Parami,
    #[serde(alias = "metta")]
    pub loving_kindness: Parami,
    #[serde(alias = "upekkha")]
    pub equanimity: Parami,
}

impl PerfectionPortfolio {
    pub fn get(&self, perfection: Perfection) -> Parami {
        match perfection {
            Perfection::Generosity => self.generosity,
            Perfection::Morality => self.morality,
            Perfection::Renunciation => self.renunciation,
            Perfection::Wisdom => self.wisdom,
            Perfection::Effort => self.effort,
            Perfection::Patience => self.patience,
            Perfection::Truthfulness => self.truthfulness,
            Perfection::Determination => self.determination,
            Perfection::LovingKindness => self.loving_kindness,
            Perfection::Equanimity => self.equanimity,
        }
    }

    pub fn level(&self, perfection: Perfection) -> u32 {
        self.get(perfection).level
    }
}

/// Read-only character snapshot supplied by the host application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "parami_portfolio")]
    pub perfections: PerfectionPortfolio,
    #[serde(default, alias = "anusaya")]
    pub tendencies: TendencyProfile,
}

impl Character {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        perfections: PerfectionPortfolio,
        tendencies: TendencyProfile,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            perfections,
            tendencies,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, MindError> {
        Ok(serde_json::from_str(raw)?)
    }
}
