//! # Heuristic Fallback
//!
//! Deterministic material profiles used when no model is configured or the
//! model call fails. The profile is picked by substring of the lower-cased
//! name: aluminium, titanium, or a generic structural steel.

use async_trait::async_trait;

use super::analyzer::MaterialAnalyzer;
use super::record::MaterialRecord;

/// Offline analyzer backed by [`fallback_material`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

#[async_trait]
impl MaterialAnalyzer for HeuristicAnalyzer {
    fn source(&self) -> &'static str {
        "heuristic"
    }

    async fn analyze(&self, material_name: &str) -> MaterialRecord {
        fallback_material(material_name)
    }
}

struct Profile {
    hardness: &'static str,
    machinability: f64,
    temperature_risk: &'static str,
    work_hardening: &'static str,
    coolant: &'static str,
    notes: &'static [&'static str],
    risks: &'static [&'static str],
    vc_hss: &'static str,
    vc_carbide: &'static str,
    fz: &'static str,
}

const ALUMINIUM: Profile = Profile {
    hardness: "70-90 HB",
    machinability: 0.85,
    temperature_risk: "низкий",
    work_hardening: "низкая",
    coolant: "Эмульсия или минимально-воздушное охлаждение",
    notes: &[
        "Используйте острый инструмент с большим передним углом",
        "Высокие подачи допустимы, но следите за вибрациями",
        "Удаляйте стружку продувкой",
    ],
    risks: &["Залипание стружки", "Вибрации при больших вылетах"],
    vc_hss: "60-90",
    vc_carbide: "180-280",
    fz: "0.06-0.12",
};

const TITANIUM: Profile = Profile {
    hardness: "200-320 HB",
    machinability: 0.35,
    temperature_risk: "высокий",
    work_hardening: "высокая",
    coolant: "Высоконапорная СОЖ, охлаждение через инструмент",
    notes: &[
        "Минимизируйте контакт инструмента с материалом",
        "Используйте жёсткую оснастку и короткий вылет",
        "Контролируйте износ по задней поверхности",
    ],
    risks: &["Перегрев", "Наклёп", "Быстрый износ инструмента"],
    vc_hss: "15-20",
    vc_carbide: "40-70",
    fz: "0.04-0.08",
};

const GENERIC: Profile = Profile {
    hardness: "120-200 HB",
    machinability: 0.6,
    temperature_risk: "средний",
    work_hardening: "средняя",
    coolant: "Эмульсия или синтетическая СОЖ",
    notes: &[
        "Контролируйте температурный режим",
        "Используйте жёсткую фиксацию заготовки",
        "Следите за эвакуацией стружки",
    ],
    risks: &["Перегрев", "Вибрации"],
    vc_hss: "25-35",
    vc_carbide: "120-180",
    fz: "0.05-0.1",
};

/// Build the heuristic record for a material name
pub fn fallback_material(material_name: &str) -> MaterialRecord {
    let name = material_name.trim();
    let lowered = name.to_lowercase();

    let profile = if lowered.contains("алю") {
        &ALUMINIUM
    } else if lowered.contains("титан") {
        &TITANIUM
    } else {
        &GENERIC
    };

    MaterialRecord {
        name: title_case(name),
        hardness_hb: profile.hardness.to_string(),
        structure: "См. справочные данные".to_string(),
        machinability_index: Some(profile.machinability),
        temperature_risk: profile.temperature_risk.to_string(),
        work_hardening: profile.work_hardening.to_string(),
        coolant: profile.coolant.to_string(),
        notes: profile.notes.iter().map(|s| s.to_string()).collect(),
        risks: profile.risks.iter().map(|s| s.to_string()).collect(),
        recommended_vc_hss: profile.vc_hss.to_string(),
        recommended_vc_carbide: profile.vc_carbide.to_string(),
        recommended_fz: profile.fz.to_string(),
        extra: Default::default(),
    }
}

/// Upper-case the first letter of every word, lower-case the rest
///
/// A word starts at any letter that does not follow another letter, so
/// grade designations like "12х18н10т" become "12Х18Н10Т".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aluminium_profile() {
        let record = fallback_material("  алюминий д16т ");

        assert_eq!(record.name, "Алюминий Д16Т");
        assert_eq!(record.machinability_index, Some(0.85));
        assert_eq!(record.temperature_risk, "низкий");
        assert_eq!(record.recommended_vc_carbide, "180-280");
        assert_eq!(record.notes.len(), 3);
    }

    #[test]
    fn test_titanium_profile() {
        let record = fallback_material("Титан ВТ6");

        assert_eq!(record.machinability_index, Some(0.35));
        assert_eq!(record.work_hardening, "высокая");
        assert_eq!(record.risks.len(), 3);
    }

    #[test]
    fn test_generic_profile() {
        let record = fallback_material("сталь 45");

        assert_eq!(record.name, "Сталь 45");
        assert_eq!(record.machinability_index, Some(0.6));
        assert_eq!(record.hardness_hb, "120-200 HB");
        assert_eq!(record.structure, "См. справочные данные");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(fallback_material("Inconel 718"), fallback_material("Inconel 718"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("12х18н10т"), "12Х18Н10Т");
        assert_eq!(title_case("AISI 304L"), "Aisi 304L");
        assert_eq!(title_case("нержавеющая сталь"), "Нержавеющая Сталь");
    }
}
