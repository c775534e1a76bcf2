//! Mind core: craving escalation, fetter eradication, and stage sequencing.
//!
//! Everything here is synchronous and free of ambient state. Callers pass in
//! the current records plus an explicit timestamp and write back what comes out.
pub mod config;
pub mod eradication;
pub mod errors;
pub mod escalation;
pub mod stages;
pub mod types;

pub use config::MindConfig;
pub use eradication::{
    advance_stage, apply_magga, calculate_magga_progress, can_attain_magga, initialize_fetters,
    AttainmentAttempt, MaggaEligibility, MaggaOutcome,
};
pub use errors::MindError;
pub use escalation::{
    check_for_escalation, classify_target, clinging_akusala_bonus, process_clingings,
};
pub use stages::{next_stage, stage_description, AttainmentStage};
pub use types::{
    Character, Clinging, ClingingKind, Fetter, FetterSet, Parami, Perfection,
    PerfectionPortfolio, TendencyProfile, Timestamp,
};
