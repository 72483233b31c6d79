mod controller;
mod types;
mod view;

pub use controller::{CalculatorController, INVALID_DATA_ALERT};
pub use types::{CalculationRequest, CalculationResult, ContractType};
pub use view::{
    Checkbox, Display, EmploymentSection, GREATER_WORD, LOWER_WORD, LineSection, NumericInput,
    Page, ProfessionField, ResultsPanel, ResultsView, RevenueSection, ScaleSection, SectionTag,
    Slot, TextInput, direction_word, is_invalid_amount, summary_delta_percent,
};
