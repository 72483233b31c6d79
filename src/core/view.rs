//! Typed view state for the calculator page.
//!
//! Every element the controller touches is owned by [`Page`] and addressed
//! through an explicit field, resolved once at construction. Sections,
//! inputs, checkboxes and result slots are plain values mutated by typed
//! methods; presentation flags (`invalid`, `disabled`, `hidden`, `show`)
//! live next to the state they describe.

use crate::core::types::{CalculationRequest, CalculationResult, ContractType};

/// Direction label when the 2022 summary strictly exceeds the 2021 summary.
pub const GREATER_WORD: &str = "większe";
/// Direction label otherwise; ties read as lower.
pub const LOWER_WORD: &str = "mniejsze";

/// CSS display state of a section container.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Display {
    Block,
    None,
}

/// The four mutually exclusive contract sections.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SectionTag {
    Employment,
    B2bScale,
    B2bLine,
    B2bRevenue,
}

impl SectionTag {
    pub const ALL: [SectionTag; 4] = [
        SectionTag::Employment,
        SectionTag::B2bScale,
        SectionTag::B2bLine,
        SectionTag::B2bRevenue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionTag::Employment => "employment",
            SectionTag::B2bScale => "b2b-scale",
            SectionTag::B2bLine => "b2b-line",
            SectionTag::B2bRevenue => "b2b-revenue",
        }
    }

    /// Wire tag submitted for this section. The linear-tax section submits
    /// as the flat-rate contract type.
    pub fn contract_type(self) -> ContractType {
        match self {
            SectionTag::Employment => ContractType::ContractOfEmployment,
            SectionTag::B2bScale => ContractType::B2bScale,
            SectionTag::B2bLine => ContractType::B2bFlat,
            SectionTag::B2bRevenue => ContractType::B2bRevenue,
        }
    }
}

/// Classifies a salary or costs value. Invalid when empty, not parseable as
/// a number, or parseable but negative.
pub fn is_invalid_amount(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match value.parse::<f64>() {
        Ok(amount) => amount < 0.0,
        Err(_) => true,
    }
}

/// An amount field with live validation. The `invalid` flag mirrors a CSS
/// marker class: purely presentational, recomputed on every input event,
/// never blocking submission. Fields start unflagged; the classifier only
/// runs once a value change arrives.
#[derive(Clone, Debug, Default)]
pub struct NumericInput {
    value: String,
    invalid: bool,
}

impl NumericInput {
    /// Handles a value change: stores the raw text and reclassifies it.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.invalid = is_invalid_amount(&self.value);
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }
}

/// A plain text field without validation (the revenue tax rate).
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Clone, Debug, Default)]
pub struct Checkbox {
    pub checked: bool,
    pub disabled: bool,
}

/// Inputs of the contract-of-employment section.
#[derive(Clone, Debug, Default)]
pub struct EmploymentSection {
    pub gross_salary: NumericInput,
    /// Present on the page; not part of the submitted payload.
    pub ppk: Checkbox,
    pub under_26: Checkbox,
}

impl EmploymentSection {
    /// Reads the section's named fields into its request variant.
    pub fn read_request(&self) -> CalculationRequest {
        CalculationRequest::ContractOfEmployment {
            gross_salary: self.gross_salary.value().to_string(),
            under_26: self.under_26.checked,
        }
    }
}

/// Inputs of the B2B progressive-scale section.
#[derive(Clone, Debug, Default)]
pub struct ScaleSection {
    pub gross_salary: NumericInput,
    pub costs: NumericInput,
    pub zus: Checkbox,
}

impl ScaleSection {
    pub fn read_request(&self) -> CalculationRequest {
        CalculationRequest::B2bScale {
            gross_salary: self.gross_salary.value().to_string(),
            costs: self.costs.value().to_string(),
            zus: self.zus.checked,
        }
    }
}

/// Inputs of the B2B linear-tax section.
#[derive(Clone, Debug, Default)]
pub struct LineSection {
    pub gross_salary: NumericInput,
    pub costs: NumericInput,
    pub zus: Checkbox,
    pub ipbox: Checkbox,
}

impl LineSection {
    pub fn read_request(&self) -> CalculationRequest {
        CalculationRequest::B2bFlat {
            gross_salary: self.gross_salary.value().to_string(),
            costs: self.costs.value().to_string(),
            zus: self.zus.checked,
            ipbox: self.ipbox.checked,
        }
    }
}

/// The two profession checkboxes gated by
/// [`RevenueSection::sync_profession_gates`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProfessionField {
    IsIt,
    IsMedic,
}

/// Inputs of the B2B revenue-tax section.
#[derive(Clone, Debug, Default)]
pub struct RevenueSection {
    pub gross_salary: NumericInput,
    pub costs: NumericInput,
    pub tax_rate: TextInput,
    pub zus: Checkbox,
    pub is_it: Checkbox,
    pub is_medic: Checkbox,
}

impl RevenueSection {
    /// Applies the profession-gate rule after `control` is toggled: a
    /// dependent checkbox is disabled unless the control is checked and the
    /// dependent is the control itself. The control is a member of its own
    /// dependent set, so a checked control only ever re-enables itself;
    /// unchecking it disables both. The rule is kept exactly as stated.
    pub fn sync_profession_gates(&mut self, control: ProfessionField) {
        let checked = match control {
            ProfessionField::IsIt => self.is_it.checked,
            ProfessionField::IsMedic => self.is_medic.checked,
        };
        for field in [ProfessionField::IsIt, ProfessionField::IsMedic] {
            let disabled = !(checked && field == control);
            match field {
                ProfessionField::IsIt => self.is_it.disabled = disabled,
                ProfessionField::IsMedic => self.is_medic.disabled = disabled,
            }
        }
    }

    /// Checked state is read regardless of the disabled flag.
    pub fn read_request(&self) -> CalculationRequest {
        CalculationRequest::B2bRevenue {
            gross_salary: self.gross_salary.value().to_string(),
            costs: self.costs.value().to_string(),
            tax_rate: self.tax_rate.value().to_string(),
            zus: self.zus.checked,
            is_it: self.is_it.checked,
            is_medic: self.is_medic.checked,
        }
    }
}

/// One innerHTML-style slot in the results area. Content is trusted,
/// pre-rendered markup from the service; nothing is escaped.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    html: String,
}

impl Slot {
    pub fn clear(&mut self) {
        self.html.clear();
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Container that fades the results in once the first calculation lands.
#[derive(Clone, Debug)]
pub struct ResultsPanel {
    hidden: bool,
    show: bool,
    reflows: u32,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        ResultsPanel {
            hidden: true,
            show: false,
            reflows: 0,
        }
    }
}

impl ResultsPanel {
    /// Unhides the container, forces a layout read, then adds the `show`
    /// class. The intermediate read matters: without a layout pass between
    /// unhiding and the class flip, the transition applies instantly
    /// instead of animating.
    pub fn reveal(&mut self) {
        self.hidden = false;
        self.force_reflow();
        self.show = true;
    }

    fn force_reflow(&mut self) {
        // Stands in for reading the container's offset height.
        self.reflows += 1;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_shown(&self) -> bool {
        self.show
    }

    pub fn reflows(&self) -> u32 {
        self.reflows
    }
}

/// Integer percentage gap between the two yearly summaries:
/// `floor(abs(summary_2022 / summary_2021 - 1) * 100)`.
pub fn summary_delta_percent(summary_2021: f64, summary_2022: f64) -> u32 {
    ((summary_2022 / summary_2021 - 1.0).abs() * 100.0).floor() as u32
}

/// Word shown next to the percentage. Strict comparison: ties read as lower.
pub fn direction_word(summary_2021: f64, summary_2022: f64) -> &'static str {
    if summary_2022 > summary_2021 {
        GREATER_WORD
    } else {
        LOWER_WORD
    }
}

/// The five result slots, the direction label and the reveal container.
#[derive(Clone, Debug, Default)]
pub struct ResultsView {
    pub table_2021: Slot,
    pub table_2022: Slot,
    pub summary_2021: Slot,
    pub summary_2022: Slot,
    pub summary_compare: Slot,
    pub greater_lower: Slot,
    pub panel: ResultsPanel,
}

impl ResultsView {
    /// Renders a calculation result. The five slots are wiped before the
    /// new fill, unconditionally, so nothing from an earlier calculation
    /// can survive a re-render.
    pub fn render(&mut self, result: &CalculationResult) {
        for slot in [
            &mut self.table_2021,
            &mut self.table_2022,
            &mut self.summary_2021,
            &mut self.summary_2022,
            &mut self.summary_compare,
        ] {
            slot.clear();
        }

        self.table_2021.set_html(result.table_2021.clone());
        self.table_2022.set_html(result.table_2022.clone());

        let [summary_2021, summary_2022] = result.summary;
        self.summary_2021.set_html(summary_2021.to_string());
        self.summary_2022.set_html(summary_2022.to_string());
        self.summary_compare.set_html(format!(
            "{}%",
            summary_delta_percent(summary_2021, summary_2022)
        ));
        self.greater_lower
            .set_html(direction_word(summary_2021, summary_2022));

        self.panel.reveal();
    }
}

/// The whole calculator page: four contract sections, the results area and
/// the alert log. Constructed once and handed to the controller by
/// reference; the employment section is visible by default.
#[derive(Clone, Debug)]
pub struct Page {
    pub employment: EmploymentSection,
    pub scale: ScaleSection,
    pub line: LineSection,
    pub revenue: RevenueSection,
    pub results: ResultsView,
    visible: SectionTag,
    alerts: Vec<String>,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            employment: EmploymentSection::default(),
            scale: ScaleSection::default(),
            line: LineSection::default(),
            revenue: RevenueSection::default(),
            results: ResultsView::default(),
            visible: SectionTag::Employment,
            alerts: Vec::new(),
        }
    }
}

impl Page {
    /// Shows the requested section and hides every other one. Idempotent;
    /// exactly one section is visible at all times by construction.
    pub fn show_section(&mut self, tag: SectionTag) {
        self.visible = tag;
    }

    pub fn display(&self, tag: SectionTag) -> Display {
        if tag == self.visible {
            Display::Block
        } else {
            Display::None
        }
    }

    pub fn visible_section(&self) -> SectionTag {
        self.visible
    }

    /// Records a user-visible alert.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn sample_result(summary_2021: f64, summary_2022: f64) -> CalculationResult {
        CalculationResult {
            table_2021: "<table>2021</table>".to_string(),
            table_2022: "<table>2022</table>".to_string(),
            summary: [summary_2021, summary_2022],
        }
    }

    #[test]
    fn employment_is_visible_at_page_load() {
        let page = Page::default();
        assert_eq!(page.visible_section(), SectionTag::Employment);
        assert_eq!(page.display(SectionTag::Employment), Display::Block);
        assert_eq!(page.display(SectionTag::B2bScale), Display::None);
    }

    #[test]
    fn show_section_hides_every_other_section() {
        let mut page = Page::default();
        for tag in SectionTag::ALL {
            page.show_section(tag);
            for other in SectionTag::ALL {
                let expected = if other == tag {
                    Display::Block
                } else {
                    Display::None
                };
                assert_eq!(page.display(other), expected, "{}", other.as_str());
            }
        }
    }

    #[test]
    fn show_section_is_idempotent() {
        let mut page = Page::default();
        page.show_section(SectionTag::B2bRevenue);
        page.show_section(SectionTag::B2bRevenue);
        assert_eq!(page.display(SectionTag::B2bRevenue), Display::Block);
        assert_eq!(
            SectionTag::ALL
                .iter()
                .filter(|t| page.display(**t) == Display::Block)
                .count(),
            1
        );
    }

    #[test]
    fn line_section_submits_as_flat_contract() {
        assert_eq!(
            SectionTag::B2bLine.contract_type(),
            ContractType::B2bFlat
        );
    }

    #[test]
    fn validator_flags_negative_empty_and_non_numeric() {
        for bad in ["-1", "", "abc"] {
            assert!(is_invalid_amount(bad), "{bad:?} should be invalid");
        }
        for good in ["0", "1500.50"] {
            assert!(!is_invalid_amount(good), "{good:?} should be valid");
        }
    }

    #[test]
    fn input_event_reclassifies_on_every_change() {
        let mut field = NumericInput::default();
        assert!(!field.is_invalid()); // untouched fields carry no marker

        field.input("-1");
        assert!(field.is_invalid());

        field.input("1500.50");
        assert!(!field.is_invalid());
        assert_eq!(field.value(), "1500.50");

        field.input("");
        assert!(field.is_invalid());
    }

    #[test]
    fn checked_control_enables_only_itself() {
        let mut section = RevenueSection::default();
        section.is_it.checked = true;
        section.sync_profession_gates(ProfessionField::IsIt);

        assert!(!section.is_it.disabled);
        assert!(section.is_medic.disabled);
    }

    #[test]
    fn unchecked_control_disables_both_dependents() {
        let mut section = RevenueSection::default();
        // Start from an enabled state to show it is overridden.
        section.is_it.checked = true;
        section.sync_profession_gates(ProfessionField::IsIt);
        assert!(!section.is_it.disabled);

        section.is_it.checked = false;
        section.sync_profession_gates(ProfessionField::IsIt);
        assert!(section.is_it.disabled);
        assert!(section.is_medic.disabled);
    }

    #[test]
    fn disabled_checkbox_still_reports_checked_state() {
        let mut section = RevenueSection::default();
        section.is_medic.checked = true;
        section.is_it.checked = false;
        section.sync_profession_gates(ProfessionField::IsIt);
        assert!(section.is_medic.disabled);

        match section.read_request() {
            CalculationRequest::B2bRevenue { is_medic, .. } => assert!(is_medic),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn delta_percent_matches_worked_examples() {
        assert_eq!(summary_delta_percent(5000.0, 6000.0), 20);
        assert_eq!(direction_word(5000.0, 6000.0), GREATER_WORD);

        assert_eq!(summary_delta_percent(6000.0, 5000.0), 16);
        assert_eq!(direction_word(6000.0, 5000.0), LOWER_WORD);

        assert_eq!(summary_delta_percent(6000.0, 6000.0), 0);
        assert_eq!(direction_word(6000.0, 6000.0), LOWER_WORD);
    }

    #[test]
    fn render_fills_all_slots_and_reveals_panel() {
        let mut view = ResultsView::default();
        assert!(view.panel.is_hidden());

        view.render(&sample_result(5000.0, 6000.0));

        assert_eq!(view.table_2021.html(), "<table>2021</table>");
        assert_eq!(view.table_2022.html(), "<table>2022</table>");
        assert_eq!(view.summary_2021.html(), "5000");
        assert_eq!(view.summary_2022.html(), "6000");
        assert_eq!(view.summary_compare.html(), "20%");
        assert_eq!(view.greater_lower.html(), GREATER_WORD);

        assert!(!view.panel.is_hidden());
        assert!(view.panel.is_shown());
        assert_eq!(view.panel.reflows(), 1);
    }

    #[test]
    fn second_render_leaves_no_residue() {
        let mut view = ResultsView::default();
        view.render(&sample_result(5000.0, 6000.0));

        let second = CalculationResult {
            table_2021: "<p>a</p>".to_string(),
            table_2022: "<p>b</p>".to_string(),
            summary: [6000.0, 5000.0],
        };
        view.render(&second);

        assert_eq!(view.table_2021.html(), "<p>a</p>");
        assert_eq!(view.table_2022.html(), "<p>b</p>");
        assert_eq!(view.summary_2021.html(), "6000");
        assert_eq!(view.summary_2022.html(), "5000");
        assert_eq!(view.summary_compare.html(), "16%");
        assert_eq!(view.greater_lower.html(), LOWER_WORD);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_exactly_one_section_visible(choices in proptest::collection::vec(0usize..4, 1..10)) {
            let mut page = Page::default();
            for choice in choices {
                let tag = SectionTag::ALL[choice];
                page.show_section(tag);
                let visible: Vec<_> = SectionTag::ALL
                    .iter()
                    .filter(|t| page.display(**t) == Display::Block)
                    .collect();
                prop_assert_eq!(visible.len(), 1);
                prop_assert_eq!(*visible[0], tag);
            }
        }

        #[test]
        fn prop_non_negative_amounts_are_valid(amount in 0.0f64..1.0e12) {
            prop_assert!(!is_invalid_amount(&amount.to_string()));
        }

        #[test]
        fn prop_negative_amounts_are_invalid(amount in -1.0e12f64..-1e-9) {
            prop_assert!(is_invalid_amount(&amount.to_string()));
        }

        #[test]
        fn prop_direction_word_tracks_strict_order(
            summary_2021 in 1.0f64..1.0e9,
            summary_2022 in 1.0f64..1.0e9,
        ) {
            let word = direction_word(summary_2021, summary_2022);
            if summary_2022 > summary_2021 {
                prop_assert_eq!(word, GREATER_WORD);
            } else {
                prop_assert_eq!(word, LOWER_WORD);
            }
        }
    }
}
