//! Attainment stages and their ordering.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::errors::MindError;

/// The four path attainments (magga), in the only order they can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttainmentStage {
    Sotapatti,
    Sakadagami,
    Anagami,
    Arahatta,
}

impl AttainmentStage {
    pub const ORDER: [AttainmentStage; 4] = [
        AttainmentStage::Sotapatti,
        AttainmentStage::Sakadagami,
        AttainmentStage::Anagami,
        AttainmentStage::Arahatta,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sotapatti => "sotapatti",
            Self::Sakadagami => "sakadagami",
            Self::Anagami => "anagami",
            Self::Arahatta => "arahatta",
        }
    }

    /// Fixed Thai description shown to writers.
    pub fn description(self) -> &'static str {
        match self {
            Self::Sotapatti => "โสดาบัน (ผู้ได้เข้ากระแสธรรม) - ตัดสังโยชน์ 3 ข้อแรก ไม่ตกอบาย",
            Self::Sakadagami => "สกทาคามี (ผู้กลับมาอีกครั้งเดียว) - ลดกามราคะและพยาบาท",
            Self::Anagami => "อนาคามี (ผู้ไม่กลับมา) - ตัดกามราคะและพยาบาทสิ้นเชิง เกิดสุทธาวาส",
            Self::Arahatta => "อรหัตต์ (ผู้บรรลุธรรม) - ตัดกิเลสทั้งหมด ไม่เกิดอีก บรรลุปรินิพพาน",
        }
    }
}

impl fmt::Display for AttainmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AttainmentStage {
    type Err = MindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ORDER
            .into_iter()
            .find(|stage| stage.label() == normalised)
            .ok_or_else(|| MindError::unknown_stage(value))
    }
}

/// Stage that follows `current`; `None` as input means no stage reached yet.
pub fn next_stage(current: Option<AttainmentStage>) -> Option<AttainmentStage> {
    match current {
        None => Some(AttainmentStage::Sotapatti),
        Some(AttainmentStage::Sotapatti) => Some(AttainmentStage::Sakadagami),
        Some(AttainmentStage::Sakadagami) => Some(AttainmentStage::Anagami),
        Some(AttainmentStage::Anagami) => Some(AttainmentStage::Arahatta),
        Some(AttainmentStage::Arahatta) => None,
    }
}

/// Thai description shown when a character reaches `stage`.
pub fn stage_description(stage: AttainmentStage) -> &'static str {
    stage.description()
}
