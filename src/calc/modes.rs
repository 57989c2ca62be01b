use std::f64::consts::PI;

use serde::Serialize;

use super::{RiskLevel, ToolMaterial, ToolType};
use crate::materials::MaterialRecord;

/// Cutting speed never drops below this, m/min
const MIN_VC: f64 = 8.0;

/// Drill feed per tooth floor, mm
const MIN_FZ_DRILL: f64 = 0.04;

/// Mill and other-tool feed per tooth floor, mm
const MIN_FZ: f64 = 0.02;

/// Smallest cut depth and width for mills, mm
const MIN_ENGAGEMENT: f64 = 0.5;

/// Magnitude cap on every reported parameter
const MAX_REPORTED: f64 = 1e300;

/// Calculated parameters, rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CuttingModes {
    /// Cutting speed, m/min (2 dp)
    pub vc: f64,
    /// Spindle speed, rpm (whole)
    pub n: f64,
    /// Feed per tooth, mm (4 dp)
    pub fz: f64,
    /// Table feed, mm/min (1 dp)
    pub feed: f64,
    /// Depth of cut, mm (2 dp)
    pub ap: f64,
    /// Width of cut, mm (2 dp)
    pub ae: f64,
}

/// Recommended cutting speed, m/min
pub fn select_vc(tool_type: ToolType, tool_material: ToolMaterial, props: &MaterialRecord) -> f64 {
    let machinability = props.machinability();

    let (base, multiplier) = match tool_material {
        ToolMaterial::Hss => (40.0, if tool_type == ToolType::Drill { 1.1 } else { 1.0 }),
        ToolMaterial::Carbide => (140.0, if tool_type == ToolType::Mill { 1.3 } else { 1.2 }),
        ToolMaterial::Indexable => (110.0, if tool_type == ToolType::Mill { 1.25 } else { 1.0 }),
    };

    let mut penalty = 1.0;
    match RiskLevel::classify(&props.temperature_risk) {
        RiskLevel::High => penalty -= 0.25,
        RiskLevel::Low => penalty += 0.1,
        RiskLevel::Medium => {}
    }
    match RiskLevel::classify(&props.work_hardening) {
        RiskLevel::High => penalty -= 0.1,
        RiskLevel::Low => penalty += 0.05,
        RiskLevel::Medium => {}
    }

    (base * machinability * multiplier * penalty).max(MIN_VC)
}

/// Feed per tooth from diameter and machinability, mm
pub fn select_fz(
    tool_type: ToolType,
    tool_material: ToolMaterial,
    props: &MaterialRecord,
    diameter: f64,
) -> f64 {
    let machinability = props.machinability();

    if tool_type == ToolType::Drill {
        // per-revolution feed split over two flutes
        let base = if diameter > 10.0 { 0.12 } else { 0.08 };
        return (base * machinability).max(MIN_FZ_DRILL);
    }

    let tool_factor = match tool_material {
        ToolMaterial::Carbide => 1.2,
        ToolMaterial::Hss => 0.9,
        ToolMaterial::Indexable => 1.0,
    };

    let diameter_factor = 0.045 + diameter / 100.0;
    (diameter_factor * machinability * tool_factor).max(MIN_FZ)
}

/// Full parameter set for one tool
///
/// `teeth <= 0` falls back to the tool type's default. Feed is computed
/// from the unrounded `fz` and `n`.
pub fn calculate_cutting_modes(
    tool_type: ToolType,
    tool_material: ToolMaterial,
    props: &MaterialRecord,
    diameter: f64,
    teeth: i64,
) -> CuttingModes {
    let vc = select_vc(tool_type, tool_material, props);
    let fz = select_fz(tool_type, tool_material, props, diameter);

    let n = if diameter > 0.0 {
        1000.0 * vc / (PI * diameter)
    } else {
        0.0
    };
    let n = n.max(1.0);

    let teeth = if teeth > 0 {
        teeth
    } else {
        tool_type.default_teeth()
    };
    let feed = fz * teeth as f64 * n;

    let (ap, ae) = match tool_type {
        ToolType::Drill => (diameter * 2.0, diameter * 0.95),
        _ => (
            (diameter * 0.2).max(MIN_ENGAGEMENT),
            (diameter * 0.6).max(MIN_ENGAGEMENT),
        ),
    };

    CuttingModes {
        vc: reported(vc, 2),
        n: reported(n, 0),
        fz: reported(fz, 4),
        feed: reported(feed, 1),
        ap: reported(ap, 2),
        ae: reported(ae, 2),
    }
}

/// Rounded and capped at `MAX_REPORTED`
///
/// Degenerate diameters overflow `n`, `feed` or the engagement to infinity,
/// which JSON cannot carry.
fn reported(value: f64, digits: usize) -> f64 {
    round_to(value, digits).clamp(-MAX_REPORTED, MAX_REPORTED)
}

/// Round to `digits` decimal places
///
/// Works on the exact binary value and breaks ties to even, so results
/// match decimal rounding of the stored float rather than of its scaled
/// product.
pub fn round_to(value: f64, digits: usize) -> f64 {
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}
