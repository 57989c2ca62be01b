//! # Material Record
//!
//! Machining properties of a workpiece material. Records come from the
//! language model or the heuristic fallback, and from clients posting
//! `material_properties` to the calculator, so every field is optional and
//! read leniently. Unknown fields are preserved.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Machinability index assumed when a record does not carry one
pub const DEFAULT_MACHINABILITY: f64 = 0.6;

/// Material properties as cached in `materials.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Normalised material name
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    /// Brinell hardness, free text (e.g. "120-200 HB")
    #[serde(default, deserialize_with = "lenient::string")]
    pub hardness_hb: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub structure: String,

    /// 0..1, 1 = machines easily
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub machinability_index: Option<f64>,

    /// низкий / средний / высокий
    #[serde(default, deserialize_with = "lenient::string")]
    pub temperature_risk: String,

    /// низкая / средняя / высокая
    #[serde(default, deserialize_with = "lenient::string")]
    pub work_hardening: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub coolant: String,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub notes: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub risks: Vec<String>,

    /// Vc range for HSS tools, m/min
    #[serde(default, deserialize_with = "lenient::string")]
    pub recommended_vc_hss: String,

    /// Vc range for carbide tools, m/min
    #[serde(default, deserialize_with = "lenient::string")]
    pub recommended_vc_carbide: String,

    /// Feed per tooth range for mills, mm
    #[serde(default, deserialize_with = "lenient::string")]
    pub recommended_fz: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MaterialRecord {
    /// Cache key for a material name: trimmed and lower-cased
    pub fn cache_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Machinability index, or the default when absent
    pub fn machinability(&self) -> f64 {
        self.machinability_index.unwrap_or(DEFAULT_MACHINABILITY)
    }

    /// Name for user-facing notes
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "Материал"
        } else {
            name
        }
    }

    /// The name as it appears in history (`None` when the record has no name)
    pub fn history_name(&self) -> Option<String> {
        if self.name.is_empty() {
            None
        } else {
            Some(self.name.clone())
        }
    }
}
