//! # OpenAI Analyzer
//!
//! Asks a language model (OpenAI Responses API) for the machining properties
//! of a material. The model is prompted to answer with a JSON object in the
//! `MaterialRecord` schema. Any failure degrades to the heuristic record.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::analyzer::MaterialAnalyzer;
use super::errors::{MaterialError, MaterialResult};
use super::fallback::fallback_material;
use super::record::MaterialRecord;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const TEMPERATURE: f64 = 0.4;
const MAX_OUTPUT_TOKENS: u32 = 600;

const SYSTEM_PROMPT: &str = "Ты технолог-металлург. Анализируешь материал и возвращаешь JSON \
со структурированными свойствами. Говори кратко и по-деловому.";

fn user_prompt(material_name: &str) -> String {
    format!(
        r#"
Проанализируй материал "{material_name}" для обработки на ЧПУ.

Верни JSON со следующими полями:
- name: нормализованное название материала
- hardness_hb: твердость по Бринеллю (строка)
- structure: краткое описание структуры
- machinability_index: число от 0 до 1 (1 — легко обрабатывается)
- temperature_risk: низкий/средний/высокий
- work_hardening: низкая/средняя/высокая склонность к наклепу
- coolant: рекомендации по СОЖ
- notes: список из 3–5 технологических советов
- risks: список возможных проблем при обработке
- recommended_vc_hss: рекомендуемый диапазон Vc в м/мин для HSS
- recommended_vc_carbide: диапазон Vc для твердосплавного инструмента
- recommended_fz: диапазон подачи на зуб для фрез
"#
    )
}

/// Model endpoint configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,

    /// Model name (default: gpt-4.1-mini)
    pub model: String,

    /// API base URL without trailing slash
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}

/// Analyzer backed by the OpenAI Responses API
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiAnalyzer {
    pub fn new(config: OpenAiConfig) -> MaterialResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn request(&self, material_name: &str) -> MaterialResult<MaterialRecord> {
        let payload = json!({
            "model": self.config.model,
            "input": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt(material_name)},
            ],
            "temperature": TEMPERATURE,
            "max_output_tokens": MAX_OUTPUT_TOKENS,
        });

        let response = self
            .client
            .post(self.config.responses_url())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MaterialError::UpstreamStatus {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| MaterialError::InvalidJson(e.to_string()))?;
        let text = extract_output_text(&value).ok_or(MaterialError::EmptyOutput)?;

        parse_material_json(&text)
    }
}

#[async_trait]
impl MaterialAnalyzer for OpenAiAnalyzer {
    fn source(&self) -> &'static str {
        "openai"
    }

    async fn analyze(&self, material_name: &str) -> MaterialRecord {
        match self.request(material_name).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    material = %material_name,
                    error = %e,
                    "model analysis failed, using heuristic profile"
                );
                fallback_material(material_name)
            }
        }
    }
}

/// Collect the generated text from a Responses API body
///
/// Uses the top-level `output_text` when present, otherwise concatenates
/// every `output_text` content part of every output item.
pub fn extract_output_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let mut text = String::new();
    for item in body.get("output")?.as_array()? {
        let Some(parts) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in parts {
            if part.get("type").and_then(Value::as_str) == Some("output_text") {
                if let Some(chunk) = part.get("text").and_then(Value::as_str) {
                    text.push_str(chunk);
                }
            }
        }
    }

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse model output into a record; the output must be a JSON object
pub fn parse_material_json(text: &str) -> MaterialResult<MaterialRecord> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| MaterialError::InvalidJson(e.to_string()))?;

    if !value.is_object() {
        return Err(MaterialError::InvalidJson("expected an object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| MaterialError::InvalidJson(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner
        .strip_prefix("json")
        .or_else(|| inner.strip_prefix("JSON"))
        .unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
