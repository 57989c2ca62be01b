//! # Machining Recommendations
//!
//! Advice shown next to the calculated modes: the material's own notes and
//! risks plus notes derived from machinability, heat and work-hardening
//! levels and the tool kind.

use std::collections::HashSet;

use serde::Serialize;

use super::{RiskLevel, ToolMaterial, ToolType};
use crate::materials::MaterialRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub risks: Vec<String>,
    /// Material notes then derived notes, without blanks or repeats
    pub notes: Vec<String>,
    pub coolant: String,
    pub temperature_risk: String,
    pub work_hardening: String,
}

/// Build recommendations for a material and tool
///
/// `tool_material` is the raw request value; it is echoed upper-cased in
/// the cutting-speed note.
pub fn build_recommendations(
    props: &MaterialRecord,
    tool_type: ToolType,
    tool_material: &str,
) -> Recommendations {
    let derived = dynamic_notes(props, tool_type, tool_material);

    let mut seen = HashSet::new();
    let notes = props
        .notes
        .iter()
        .cloned()
        .chain(derived)
        .filter(|note| !note.is_empty())
        .filter(|note| seen.insert(note.clone()))
        .collect();

    Recommendations {
        risks: props.risks.clone(),
        notes,
        coolant: props.coolant.clone(),
        temperature_risk: props.temperature_risk.clone(),
        work_hardening: props.work_hardening.clone(),
    }
}

fn dynamic_notes(props: &MaterialRecord, tool_type: ToolType, tool_material: &str) -> Vec<String> {
    let mut notes = Vec::new();
    let material = ToolMaterial::parse(tool_material);
    let name = props.display_name();
    let machinability = props.machinability();

    if machinability <= 0.45 {
        notes.push(format!(
            "{name}: держите минимально возможный вылет инструмента и снижайте подачу на 10-15%."
        ));
    } else if machinability >= 0.75 {
        notes.push(format!(
            "{name}: допускается агрессивная стратегия с повышенной подачей, контролируйте вибрации."
        ));
    }

    match RiskLevel::classify(&props.temperature_risk) {
        RiskLevel::High => notes.push(
            "Повышенный нагрев — используйте обильное охлаждение и делайте технологические паузы."
                .to_string(),
        ),
        RiskLevel::Low => notes.push(
            "Низкий нагрев — можно применять минимальную СОЖ, уделите внимание удалению стружки."
                .to_string(),
        ),
        RiskLevel::Medium => {}
    }

    match RiskLevel::classify(&props.work_hardening) {
        RiskLevel::High => notes.push(
            "Материал склонен к наклёпу — увеличьте подачу и избегайте холостых проходов."
                .to_string(),
        ),
        RiskLevel::Low if tool_type == ToolType::Mill => notes.push(
            "Низкая склонность к наклёпу — используйте постоянную нагрузку на зуб для ровной поверхности."
                .to_string(),
        ),
        _ => {}
    }

    let recommended_vc = if material == ToolMaterial::Carbide {
        &props.recommended_vc_carbide
    } else {
        &props.recommended_vc_hss
    };
    if !recommended_vc.is_empty() {
        notes.push(format!(
            "Ориентируйтесь на скорость резания {recommended_vc} для инструмента {}.",
            tool_material.trim().to_uppercase()
        ));
    }

    match tool_type {
        ToolType::Mill => {
            if !props.recommended_fz.is_empty() {
                notes.push(format!(
                    "Поддерживайте подачу на зуб в диапазоне {} для стабильной фрезеровки.",
                    props.recommended_fz
                ));
            }
            if material == ToolMaterial::Carbide {
                notes.push(
                    "Пробуйте динамическое фрезерование с постоянной нагрузкой для твердосплава."
                        .to_string(),
                );
            } else {
                notes.push(
                    "Для HSS выбирайте лёгкий встречный проход и невысокую глубину при черновых операциях."
                        .to_string(),
                );
            }
        }
        ToolType::Drill => notes.push(
            "При сверлении очищайте канавки и выполняйте прерывистое сверление глубже 3D."
                .to_string(),
        ),
        ToolType::Other => notes.push(
            "Следите за равномерным износом и корректируйте подачи между черновыми и чистовыми проходами."
                .to_string(),
        ),
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::fallback_material;

    #[test]
    fn test_titanium_mill_carbide() {
        let props = fallback_material("титан вт6");
        let rec = build_recommendations(&props, ToolType::Mill, "carbide");

        assert_eq!(rec.risks, props.risks);
        assert_eq!(rec.temperature_risk, "высокий");
        assert_eq!(&rec.notes[..3], &props.notes[..]);

        let derived = &rec.notes[3..];
        assert!(derived[0].starts_with("Титан Вт6: держите минимально"));
        assert!(derived[1].starts_with("Повышенный нагрев"));
        assert!(derived[2].starts_with("Материал склонен к наклёпу"));
        assert_eq!(
            derived[3],
            "Ориентируйтесь на скорость резания 40-70 для инструмента CARBIDE."
        );
        assert!(derived[4].contains("0.04-0.08"));
        assert!(derived[5].starts_with("Пробуйте динамическое фрезерование"));
        assert_eq!(derived.len(), 6);
    }

    #[test]
    fn test_aluminium_drill_uses_hss_range() {
        let props = fallback_material("алюминий");
        let rec = build_recommendations(&props, ToolType::Drill, "hss");

        assert!(rec.notes.iter().any(|n| n.contains("агрессивная стратегия")));
        assert!(rec.notes.iter().any(|n| n.starts_with("Низкий нагрев")));
        assert!(!rec.notes.iter().any(|n| n.starts_with("Низкая склонность")));
        assert!(rec.notes.contains(&"Ориентируйтесь на скорость резания 60-90 для инструмента HSS.".to_string()));
        assert!(rec.notes.last().unwrap().starts_with("При сверлении"));
    }

    #[test]
    fn test_empty_properties() {
        let rec = build_recommendations(&MaterialRecord::default(), ToolType::Other, "indexable");

        assert_eq!(
            rec.notes,
            vec![
                "Следите за равномерным износом и корректируйте подачи между черновыми и чистовыми проходами."
                    .to_string()
            ]
        );
        assert!(rec.risks.is_empty());
        assert_eq!(rec.coolant, "");
    }

    #[test]
    fn test_notes_deduplicated_and_blanks_dropped() {
        let props = MaterialRecord {
            notes: vec![
                "Охлаждайте".to_string(),
                String::new(),
                "Охлаждайте".to_string(),
                "При сверлении очищайте канавки и выполняйте прерывистое сверление глубже 3D."
                    .to_string(),
            ],
            ..Default::default()
        };
        let rec = build_recommendations(&props, ToolType::Drill, "hss");

        assert_eq!(rec.notes.len(), 2);
        assert_eq!(rec.notes[0], "Охлаждайте");
    }

    #[test]
    fn test_unnamed_material_note() {
        let props = MaterialRecord {
            machinability_index: Some(0.3),
            ..Default::default()
        };
        let rec = build_recommendations(&props, ToolType::Mill, "hss");

        assert!(rec.notes[0].starts_with("Материал: держите"));
    }
}
