//! # Calculation Request Errors
//!
//! Messages are user-facing (Russian) and returned verbatim in the
//! `{"error": ...}` body.

use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Required keys absent from the request, in declaration order
    #[error("Отсутствуют поля: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A numeric field holds something that is not a number
    #[error("Некорректное числовое значение поля {field}")]
    InvalidNumber { field: &'static str },

    /// A text field holds something that is not text
    #[error("Некорректное значение поля {field}")]
    InvalidText { field: &'static str },

    /// `material_properties` is not an object
    #[error("Свойства материала должны быть объектом")]
    InvalidMaterial,

    /// Request body is not a JSON object
    #[error("Некорректный JSON")]
    InvalidBody,
}
