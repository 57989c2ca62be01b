//! Cutting-Mode Calculation Tests
//!
//! Properties of the calculator over realistic material records:
//! - Reference values for a carbide end mill
//! - Spindle speed and cutting speed floors
//! - Heat and work-hardening penalties lower cutting speed
//! - Loosely typed client input computes the same as typed input

use serde_json::json;
use tgcnc::calc::{
    calculate_cutting_modes, select_vc, CalcRequest, ToolMaterial, ToolType,
};
use tgcnc::materials::{fallback_material, MaterialRecord};

// =============================================================================
// Test Utilities
// =============================================================================

fn material(machinability: f64) -> MaterialRecord {
    MaterialRecord {
        machinability_index: Some(machinability),
        ..Default::default()
    }
}

// =============================================================================
// Reference Values
// =============================================================================

#[test]
fn test_carbide_end_mill_reference() {
    let modes = calculate_cutting_modes(ToolType::Mill, ToolMaterial::Carbide, &material(1.0), 10.0, 4);

    assert_eq!(modes.vc, 182.0);
    assert_eq!(modes.n, 5793.0);
    assert_eq!(modes.fz, 0.174);
    assert_eq!(modes.feed, 4032.1);
    assert_eq!(modes.ap, 2.0);
    assert_eq!(modes.ae, 6.0);
}

#[test]
fn test_indexable_mill_on_aluminium() {
    let aluminium = fallback_material("алюминий АМг6");
    let modes = calculate_cutting_modes(ToolType::Mill, ToolMaterial::Indexable, &aluminium, 50.0, 5);

    // 110 * 0.85 * 1.25 * (1 + 0.1 + 0.05) = 134.40625
    assert!((modes.vc - 134.41).abs() < 0.011, "vc = {}", modes.vc);
    // (0.045 + 0.5) * 0.85 * 1.0 = 0.46325
    assert!((modes.fz - 0.4633).abs() < 0.00011, "fz = {}", modes.fz);
    assert_eq!(modes.ap, 10.0);
    assert_eq!(modes.ae, 30.0);
}

// =============================================================================
// Floors
// =============================================================================

#[test]
fn test_spindle_speed_never_below_one() {
    let cases = [
        (ToolType::Drill, 0.0),
        (ToolType::Mill, -3.0),
        (ToolType::Other, 1.0e12),
    ];

    for (tool_type, diameter) in cases {
        let modes = calculate_cutting_modes(tool_type, ToolMaterial::Hss, &material(0.01), diameter, 0);
        assert!(modes.n >= 1.0, "{:?} d={} gave n={}", tool_type, diameter, modes.n);
        assert!(modes.vc >= 8.0);
    }
}

#[test]
fn test_zero_teeth_uses_tool_default() {
    let drill_default = calculate_cutting_modes(ToolType::Drill, ToolMaterial::Hss, &material(0.6), 6.0, 0);
    let drill_two = calculate_cutting_modes(ToolType::Drill, ToolMaterial::Hss, &material(0.6), 6.0, 2);
    assert_eq!(drill_default, drill_two);

    let mill_default = calculate_cutting_modes(ToolType::Mill, ToolMaterial::Hss, &material(0.6), 6.0, -1);
    let mill_four = calculate_cutting_modes(ToolType::Mill, ToolMaterial::Hss, &material(0.6), 6.0, 4);
    assert_eq!(mill_default, mill_four);
}

// =============================================================================
// Penalties
// =============================================================================

#[test]
fn test_difficult_material_is_slower() {
    let steel = fallback_material("сталь 40Х");
    let titanium = fallback_material("титан ВТ22");

    for tool_material in [ToolMaterial::Hss, ToolMaterial::Carbide, ToolMaterial::Indexable] {
        let steel_vc = select_vc(ToolType::Mill, tool_material, &steel);
        let titanium_vc = select_vc(ToolType::Mill, tool_material, &titanium);
        assert!(titanium_vc < steel_vc, "{:?}", tool_material);
    }
}

#[test]
fn test_risk_matching_is_case_insensitive() {
    let mut shouting = material(0.6);
    shouting.temperature_risk = "ВЫСОКИЙ".to_string();
    let mut quiet = material(0.6);
    quiet.temperature_risk = "высокий".to_string();

    assert_eq!(
        select_vc(ToolType::Mill, ToolMaterial::Carbide, &shouting),
        select_vc(ToolType::Mill, ToolMaterial::Carbide, &quiet)
    );
}

// =============================================================================
// Request Parsing
// =============================================================================

#[test]
fn test_string_numbers_match_typed_numbers() {
    let typed = json!({
        "user_id": 1,
        "tool_type": "drill",
        "tool_material": "HSS",
        "diameter": 12.5,
        "teeth": 2,
        "material_properties": {"machinability_index": 0.5, "temperature_risk": "средний"}
    });
    let loose = json!({
        "user_id": "1",
        "tool_type": "Drill",
        "tool_material": "hss",
        "diameter": "12.5",
        "teeth": "2",
        "material_properties": {"machinability_index": "0.5", "temperature_risk": "средний"}
    });

    let typed = CalcRequest::from_slice(typed.to_string().as_bytes()).unwrap().evaluate();
    let loose = CalcRequest::from_slice(loose.to_string().as_bytes()).unwrap().evaluate();

    assert_eq!(typed.calculation, loose.calculation);
}
