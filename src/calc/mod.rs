//! # Cutting-Mode Calculator
//!
//! Heuristic CNC parameters for drills and mills:
//!
//! - `vc`: cutting speed, m/min
//! - `n`: spindle speed, rpm
//! - `fz`: feed per tooth, mm
//! - `feed`: table feed, mm/min
//! - `ap` / `ae`: depth and width of cut, mm
//!
//! Inputs are classified case-insensitively. The calculation never fails;
//! degenerate inputs land on the floor values.

pub mod errors;
pub mod modes;
pub mod recommendations;
pub mod request;

pub use errors::{CalcError, CalcResult};
pub use modes::{calculate_cutting_modes, round_to, select_fz, select_vc, CuttingModes};
pub use recommendations::{build_recommendations, Recommendations};
pub use request::{CalcOutcome, CalcRequest, REQUIRED_FIELDS};

/// Tool kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolType {
    Drill,
    Mill,
    /// Anything else (boring bars, chamfer tools, ...)
    Other,
}

impl ToolType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "drill" => ToolType::Drill,
            "mill" => ToolType::Mill,
            _ => ToolType::Other,
        }
    }

    /// Tooth count assumed when the request gives none
    pub fn default_teeth(self) -> i64 {
        match self {
            ToolType::Drill => 2,
            _ => 4,
        }
    }
}

/// Cutting material of the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMaterial {
    Hss,
    Carbide,
    /// Indexable inserts and anything unrecognised
    Indexable,
}

impl ToolMaterial {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "hss" => ToolMaterial::Hss,
            "carbide" => ToolMaterial::Carbide,
            _ => ToolMaterial::Indexable,
        }
    }
}

/// Coarse level read from free-text material properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify by substring: "выс" (high) wins over "низ" (low)
    ///
    /// Empty text is treated as the medium default.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        if lowered.contains("выс") {
            RiskLevel::High
        } else if lowered.contains("низ") {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        }
    }
}
