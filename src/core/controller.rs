use tracing::debug;

use crate::api::{CalculatorClient, ClientError, SubmitOutcome};
use crate::core::types::CalculationRequest;
use crate::core::view::{Page, SectionTag};

/// Fixed alert text when the service rejects the submitted values.
pub const INVALID_DATA_ALERT: &str = "błędnie wprowadzone dane";

/// Owns the page state and the calculator client. All element references
/// are resolved once at construction; nothing is looked up ad hoc.
pub struct CalculatorController {
    pub page: Page,
    client: CalculatorClient,
}

impl CalculatorController {
    pub fn new(page: Page, client: CalculatorClient) -> Self {
        CalculatorController { page, client }
    }

    /// Reads the given section's named fields into its request variant.
    /// Text fields pass through as raw strings, checkboxes as their checked
    /// state; nothing is validated or coerced here.
    pub fn build_request(&self, section: SectionTag) -> CalculationRequest {
        match section {
            SectionTag::Employment => self.page.employment.read_request(),
            SectionTag::B2bScale => self.page.scale.read_request(),
            SectionTag::B2bLine => self.page.line.read_request(),
            SectionTag::B2bRevenue => self.page.revenue.read_request(),
        }
    }

    /// Submits the given section once and applies the outcome to the page:
    /// a rejected calculation raises the alert and leaves the result slots
    /// untouched; a successful one renders into the results view. Transport
    /// and parse failures propagate to the caller. No retries.
    pub async fn submit(&mut self, section: SectionTag) -> Result<(), ClientError> {
        let request = self.build_request(section);
        let contract = section.contract_type();
        debug!(contract = contract.as_str(), ?request, "submitting calculation");

        match self.client.calculate(contract, &request).await? {
            SubmitOutcome::Rejected => self.page.alert(INVALID_DATA_ALERT),
            SubmitOutcome::Calculated(result) => self.page.results.render(&result),
        }
        Ok(())
    }
}
