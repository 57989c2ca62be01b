use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{CalcError, CalcResult};
use super::modes::{calculate_cutting_modes, CuttingModes};
use super::recommendations::{build_recommendations, Recommendations};
use super::{ToolMaterial, ToolType};
use crate::lenient;
use crate::materials::MaterialRecord;

/// Keys a calculation request must carry, in reporting order
pub const REQUIRED_FIELDS: [&str; 6] = [
    "user_id",
    "tool_type",
    "tool_material",
    "diameter",
    "teeth",
    "material_properties",
];

/// A validated calculation request
#[derive(Debug, Clone, PartialEq)]
pub struct CalcRequest {
    pub user_id: i64,
    /// As sent by the client; echoed into history
    pub tool_type: String,
    /// As sent by the client; echoed into history and notes
    pub tool_material: String,
    pub diameter: f64,
    pub teeth: i64,
    pub material: MaterialRecord,
}

/// Response body of a calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcOutcome {
    pub calculation: CuttingModes,
    pub recommendations: Recommendations,
}

impl CalcRequest {
    /// Parse a raw request body; it must be a JSON object
    pub fn from_slice(body: &[u8]) -> CalcResult<Self> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Self::from_object(&map),
            _ => Err(CalcError::InvalidBody),
        }
    }

    /// Validate a request object
    ///
    /// Presence is checked first for every field; numbers may be sent as
    /// JSON numbers or numeric strings.
    pub fn from_object(payload: &Map<String, Value>) -> CalcResult<Self> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !payload.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CalcError::MissingFields(missing));
        }

        let material = match &payload["material_properties"] {
            value @ Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|_| CalcError::InvalidMaterial)?,
            _ => return Err(CalcError::InvalidMaterial),
        };

        Ok(Self {
            user_id: number_i64(payload, "user_id")?,
            tool_type: text(payload, "tool_type")?,
            tool_material: text(payload, "tool_material")?,
            diameter: lenient::as_f64(&payload["diameter"])
                .ok_or(CalcError::InvalidNumber { field: "diameter" })?,
            teeth: number_i64(payload, "teeth")?,
            material,
        })
    }

    pub fn tool_type(&self) -> ToolType {
        ToolType::parse(&self.tool_type)
    }

    pub fn tool_material(&self) -> ToolMaterial {
        ToolMaterial::parse(&self.tool_material)
    }

    /// Cutting modes plus recommendations
    pub fn evaluate(&self) -> CalcOutcome {
        let tool_type = self.tool_type();

        CalcOutcome {
            calculation: calculate_cutting_modes(
                tool_type,
                self.tool_material(),
                &self.material,
                self.diameter,
                self.teeth,
            ),
            recommendations: build_recommendations(&self.material, tool_type, &self.tool_material),
        }
    }
}

fn number_i64(payload: &Map<String, Value>, field: &'static str) -> CalcResult<i64> {
    lenient::as_i64(&payload[field]).ok_or(CalcError::InvalidNumber { field })
}

fn text(payload: &Map<String, Value>, field: &'static str) -> CalcResult<String> {
    lenient::as_text(&payload[field]).ok_or(CalcError::InvalidText { field })
}
