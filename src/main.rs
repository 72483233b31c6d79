use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use kalkulator::api::CalculatorClient;
use kalkulator::core::{CalculatorController, Page, ProfessionField, SectionTag};

#[derive(Parser, Debug)]
#[command(
    name = "kalkulator",
    about = "Salary comparison client: 2021 vs 2022 tax rules per contract type"
)]
struct Cli {
    /// Base URL of the calculation service.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    base_url: String,
    #[command(subcommand)]
    contract: Contract,
}

#[derive(Subcommand, Debug)]
enum Contract {
    /// Contract of employment.
    Employment {
        #[arg(long)]
        gross_salary: String,
        #[arg(long)]
        under_26: bool,
    },
    /// B2B taxed on the progressive scale.
    B2bScale {
        #[arg(long)]
        gross_salary: String,
        #[arg(long)]
        costs: String,
        #[arg(long)]
        zus: bool,
    },
    /// B2B taxed at the flat linear rate.
    B2bLine {
        #[arg(long)]
        gross_salary: String,
        #[arg(long)]
        costs: String,
        #[arg(long)]
        zus: bool,
        #[arg(long)]
        ipbox: bool,
    },
    /// B2B taxed on revenue (ryczałt).
    B2bRevenue {
        #[arg(long)]
        gross_salary: String,
        #[arg(long)]
        costs: String,
        #[arg(long)]
        tax_rate: String,
        #[arg(long)]
        zus: bool,
        #[arg(long)]
        is_it: bool,
        #[arg(long)]
        is_medic: bool,
    },
}

/// Fills the page from the parsed arguments and returns the section to
/// submit. Mirrors the page's own event order: select the section, type the
/// values, toggle the checkboxes.
fn fill_page(page: &mut Page, contract: &Contract) -> SectionTag {
    match contract {
        Contract::Employment {
            gross_salary,
            under_26,
        } => {
            page.show_section(SectionTag::Employment);
            page.employment.gross_salary.input(gross_salary.clone());
            page.employment.under_26.checked = *under_26;
            SectionTag::Employment
        }
        Contract::B2bScale {
            gross_salary,
            costs,
            zus,
        } => {
            page.show_section(SectionTag::B2bScale);
            page.scale.gross_salary.input(gross_salary.clone());
            page.scale.costs.input(costs.clone());
            page.scale.zus.checked = *zus;
            SectionTag::B2bScale
        }
        Contract::B2bLine {
            gross_salary,
            costs,
            zus,
            ipbox,
        } => {
            page.show_section(SectionTag::B2bLine);
            page.line.gross_salary.input(gross_salary.clone());
            page.line.costs.input(costs.clone());
            page.line.zus.checked = *zus;
            page.line.ipbox.checked = *ipbox;
            SectionTag::B2bLine
        }
        Contract::B2bRevenue {
            gross_salary,
            costs,
            tax_rate,
            zus,
            is_it,
            is_medic,
        } => {
            page.show_section(SectionTag::B2bRevenue);
            page.revenue.gross_salary.input(gross_salary.clone());
            page.revenue.costs.input(costs.clone());
            page.revenue.tax_rate.input(tax_rate.clone());
            page.revenue.zus.checked = *zus;
            page.revenue.is_it.checked = *is_it;
            page.revenue.sync_profession_gates(ProfessionField::IsIt);
            page.revenue.is_medic.checked = *is_medic;
            page.revenue.sync_profession_gates(ProfessionField::IsMedic);
            SectionTag::B2bRevenue
        }
    }
}

/// Validation is presentational: flag, warn, never block.
fn warn_on_invalid_amounts(page: &Page, section: SectionTag) {
    let fields: &[(&str, &kalkulator::core::NumericInput)] = match section {
        SectionTag::Employment => &[("gross_salary", &page.employment.gross_salary)],
        SectionTag::B2bScale => &[
            ("gross_salary", &page.scale.gross_salary),
            ("costs", &page.scale.costs),
        ],
        SectionTag::B2bLine => &[
            ("gross_salary", &page.line.gross_salary),
            ("costs", &page.line.costs),
        ],
        SectionTag::B2bRevenue => &[
            ("gross_salary", &page.revenue.gross_salary),
            ("costs", &page.revenue.costs),
        ],
    };
    for (name, field) in fields {
        if field.is_invalid() {
            warn!(field = name, value = field.value(), "invalid amount");
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut page = Page::default();
    let section = fill_page(&mut page, &cli.contract);
    warn_on_invalid_amounts(&page, section);

    let client = match CalculatorClient::new(cli.base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Client error: {e}");
            std::process::exit(1);
        }
    };

    let mut controller = CalculatorController::new(page, client);
    if let Err(e) = controller.submit(section).await {
        eprintln!("Calculation error: {e}");
        std::process::exit(1);
    }

    let page = &controller.page;
    if let Some(alert) = page.alerts().last() {
        eprintln!("{alert}");
        std::process::exit(1);
    }

    let results = &page.results;
    println!("=== 2021 ===");
    println!("{}", results.table_2021.html());
    println!("=== 2022 ===");
    println!("{}", results.table_2022.html());
    println!(
        "Podsumowanie 2021: {}  |  Podsumowanie 2022: {}",
        results.summary_2021.html(),
        results.summary_2022.html()
    );
    println!(
        "Podsumowanie 2022 jest {} o {} względem 2021",
        results.greater_lower.html(),
        results.summary_compare.html()
    );
}
