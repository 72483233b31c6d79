use serde::{Deserialize, Serialize};

/// Contract scheme a calculation is requested for. Carried on the wire as
/// the `type` query parameter of `/calculator`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContractType {
    ContractOfEmployment,
    B2bScale,
    B2bFlat,
    B2bRevenue,
}

impl ContractType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractType::ContractOfEmployment => "CONTRACT_OF_EMPLOYMENT",
            ContractType::B2bScale => "B2B_SCALE",
            ContractType::B2bFlat => "B2B_FLAT",
            ContractType::B2bRevenue => "B2B_REVENUE",
        }
    }
}

/// One request shape per contract scheme.
///
/// Amount fields stay raw strings: the service parses them, the client only
/// flags them visually. The variants serialize untagged, so the body carries
/// exactly the active section's field set and nothing else.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationRequest {
    #[serde(rename_all = "camelCase")]
    ContractOfEmployment {
        gross_salary: String,
        under_26: bool,
    },
    #[serde(rename_all = "camelCase")]
    B2bScale {
        gross_salary: String,
        costs: String,
        zus: bool,
    },
    #[serde(rename_all = "camelCase")]
    B2bFlat {
        gross_salary: String,
        costs: String,
        zus: bool,
        ipbox: bool,
    },
    #[serde(rename_all = "camelCase")]
    B2bRevenue {
        gross_salary: String,
        costs: String,
        tax_rate: String,
        zus: bool,
        #[serde(rename = "is_it")]
        is_it: bool,
        #[serde(rename = "is_medic")]
        is_medic: bool,
    },
}

impl CalculationRequest {
    /// Fixed mapping from request variant to wire tag.
    pub fn contract_type(&self) -> ContractType {
        match self {
            CalculationRequest::ContractOfEmployment { .. } => ContractType::ContractOfEmployment,
            CalculationRequest::B2bScale { .. } => ContractType::B2bScale,
            CalculationRequest::B2bFlat { .. } => ContractType::B2bFlat,
            CalculationRequest::B2bRevenue { .. } => ContractType::B2bRevenue,
        }
    }
}

/// Response of the calculation service: one pre-rendered HTML table per tax
/// year plus the two aggregate yearly summaries, `[summary_2021,
/// summary_2022]`. Consumed once per submission, never cached.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CalculationResult {
    #[serde(rename = "2021")]
    pub table_2021: String,
    #[serde(rename = "2022")]
    pub table_2022: String,
    pub summary: [f64; 2],
}
