use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SalaryGrade {
    pub id: Uuid,
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_salary: Decimal,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NewSalaryGrade {
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_salary: Decimal,
    pub description: String,
}
