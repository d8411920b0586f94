use analytics::AnalyticsEngine;
use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use configuration::{Config, LoggingConfig};
use core_types::{Concept, FormulaInput};
use datasets::samples;
use evaluator::relations::{self, OkunParams, PhillipsParams};
use evaluator::{DisplayClamps, FormulaEvaluator, POLICY_TABLE};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod render;

/// The main entry point for the Macrolab application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load MACROLAB__* overrides from a .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    // Dropping the guard flushes the log file, so it lives until main returns.
    let _log_guard = init_logging(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Concepts => handle_concepts(),
        Commands::Eval(args) => handle_eval(args, &config),
        Commands::Policies => handle_policies(),
        Commands::Textbook => handle_textbook(),
        Commands::Doubling(args) => handle_doubling(args),
        Commands::OkunScenarios(args) => handle_okun_scenarios(args, &config),
        Commands::Phillips(args) => handle_phillips(args, &config),
        Commands::Analyze(args) => handle_analyze(args),
        Commands::Serve(args) => handle_serve(args, config).await,
    }
}

/// Console logging goes to stderr so tables on stdout stay clean. When
/// `logging.directory` is set, a daily rolling file gets the same events.
fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level '{}'", config.level))?;

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "macrolab.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("failed to install the tracing subscriber")?;
    Ok(guard)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Textbook macroeconomics: GDP, prices, labor and the relations between them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file with default inputs, display clamps and server settings.
    #[arg(long, global = true, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every concept with the inputs it takes.
    Concepts,
    /// Evaluate one concept.
    Eval(EvalArgs),
    /// Show the stylized policy-effect table.
    Policies,
    /// Work through the textbook exercises with the bundled data.
    Textbook,
    /// Years to double at several growth rates, by the rule of 70.
    Doubling(DoublingArgs),
    /// Okun's law under a range of growth scenarios.
    OkunScenarios(OkunScenarioArgs),
    /// Points along the short-run Phillips curve.
    Phillips(PhillipsArgs),
    /// Describe a dataset and fit trends, correlations and Okun's coefficient.
    Analyze(AnalyzeArgs),
    /// Start the HTTP API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct EvalArgs {
    /// The concept to evaluate (e.g., "okuns-law", "cpi").
    concept: Concept,

    /// A scalar input, as name=value. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_value)]
    values: Vec<(String, Decimal)>,

    /// A series input, as name=v1,v2,... Repeatable.
    #[arg(long = "series", value_name = "NAME=V1,V2", value_parser = parse_series)]
    series: Vec<(String, Vec<Decimal>)>,

    /// A text input, as name=value. Repeatable.
    #[arg(long = "label", value_name = "NAME=VALUE", value_parser = parse_label)]
    labels: Vec<(String, String)>,

    /// Do not fill missing scalars from the configured defaults.
    #[arg(long)]
    no_defaults: bool,

    /// Show raw outputs without the configured display clamps.
    #[arg(long)]
    raw: bool,

    /// Print the result as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct DoublingArgs {
    /// Annual growth rates in percent.
    #[arg(long, value_delimiter = ',', default_value = "1,2,3,5,7,10")]
    rates: Vec<Decimal>,

    /// Also show where an index of 100 stands after this many years.
    #[arg(long, default_value_t = 35)]
    years: u32,
}

#[derive(Parser)]
struct OkunScenarioArgs {
    /// Okun's coefficient; defaults to the configured `okuns-law` value.
    #[arg(long)]
    beta: Option<Decimal>,

    /// Growth rate that keeps unemployment flat, in percent.
    #[arg(long)]
    natural_growth: Option<Decimal>,

    /// Starting unemployment rate, in percent.
    #[arg(long)]
    initial_unemployment: Option<Decimal>,
}

#[derive(Parser)]
struct PhillipsArgs {
    #[arg(long)]
    expected_inflation: Option<Decimal>,

    #[arg(long)]
    beta: Option<Decimal>,

    #[arg(long)]
    natural_unemployment: Option<Decimal>,

    /// Lowest unemployment rate on the curve.
    #[arg(long, default_value = "2")]
    from: Decimal,

    /// Highest unemployment rate on the curve.
    #[arg(long, default_value = "12")]
    to: Decimal,

    #[arg(long, default_value_t = 11)]
    steps: usize,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// CSV file with a header row; the bundled French series when omitted.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Column to use as x in a correlation.
    #[arg(long, requires = "y")]
    x: Option<String>,

    /// Column to use as y in a correlation.
    #[arg(long, requires = "x")]
    y: Option<String>,

    /// Estimate Okun's coefficient from a growth and an unemployment column.
    #[arg(long)]
    okun: bool,

    #[arg(long, default_value = "growth")]
    growth_column: String,

    #[arg(long, default_value = "unemployment")]
    unemployment_column: String,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

fn parse_decimal(text: &str) -> Result<Decimal, String> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| format!("'{text}' is not a number"))
}

fn split_pair(text: &str) -> Result<(&str, &str), String> {
    text.split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{text}'"))
}

fn parse_value(text: &str) -> Result<(String, Decimal), String> {
    let (name, value) = split_pair(text)?;
    Ok((name.to_string(), parse_decimal(value)?))
}

fn parse_series(text: &str) -> Result<(String, Vec<Decimal>), String> {
    let (name, values) = split_pair(text)?;
    let values = values
        .split(',')
        .map(|v| parse_decimal(v.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name.to_string(), values))
}

fn parse_label(text: &str) -> Result<(String, String), String> {
    let (name, value) = split_pair(text)?;
    Ok((name.to_string(), value.to_string()))
}

/// A command-line value, else the configured default for `concept`.
fn param(given: Option<Decimal>, config: &Config, concept: Concept, name: &str) -> anyhow::Result<Decimal> {
    given
        .or_else(|| config.defaults_for(concept).and_then(|d| d.get(name).copied()))
        .ok_or_else(|| anyhow!("--{} was not given and {concept} has no default for '{name}'", name.replace('_', "-")))
}

// ==============================================================================
// Formula Commands
// ==============================================================================

fn handle_concepts() -> anyhow::Result<()> {
    println!("{}", render::concepts_table());
    Ok(())
}

fn handle_eval(args: EvalArgs, config: &Config) -> anyhow::Result<()> {
    let concept = args.concept;

    let mut input = FormulaInput::new();
    for (name, value) in &args.values {
        input = input.with_value(name, *value);
    }
    for (name, values) in args.series {
        input = input.with_series(&name, values);
    }
    for (name, value) in &args.labels {
        input = input.with_label(name, value);
    }
    if !args.no_defaults {
        if let Some(defaults) = config.defaults_for(concept) {
            input = input.merge_defaults(defaults);
        }
    }

    let result = FormulaEvaluator::new()
        .evaluate(concept, &input)
        .with_context(|| format!("could not evaluate {concept}"))?;
    let result = if args.raw {
        result
    } else {
        DisplayClamps::new(&config.display.clamps).apply(result)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render::result_table(&result));
        for warning in &result.warnings {
            eprintln!("warning: {warning}");
        }
    }
    Ok(())
}

fn handle_policies() -> anyhow::Result<()> {
    println!("{}", render::policy_table(&POLICY_TABLE));
    Ok(())
}

fn handle_doubling(args: DoublingArgs) -> anyhow::Result<()> {
    let table = relations::doubling_table(&args.rates)?;
    let mut rows = Vec::with_capacity(table.len());
    for (rate, years_to_double) in table {
        let path = relations::compound_path(dec!(100), rate, args.years)?;
        let end = path.last().copied().unwrap_or(dec!(100));
        rows.push((rate, years_to_double, end));
    }
    println!("{}", render::doubling_table(&rows, args.years));
    Ok(())
}

fn handle_okun_scenarios(args: OkunScenarioArgs, config: &Config) -> anyhow::Result<()> {
    let concept = Concept::OkunsLaw;
    let params = OkunParams {
        beta: param(args.beta, config, concept, "beta")?,
        natural_growth: param(args.natural_growth, config, concept, "natural_growth")?,
    };
    let initial = param(args.initial_unemployment, config, concept, "initial_unemployment")?;

    let scenarios = [
        ("deep recession", dec!(-3)),
        ("mild recession", dec!(-1)),
        ("slow growth", dec!(1)),
        ("natural growth", params.natural_growth),
        ("strong growth", dec!(4)),
        ("rapid growth", dec!(6)),
    ];
    let outcomes = relations::okun_scenarios(&params, initial, &scenarios)?;
    println!("{}", render::okun_table(&outcomes, initial));
    Ok(())
}

fn handle_phillips(args: PhillipsArgs, config: &Config) -> anyhow::Result<()> {
    let concept = Concept::PhillipsCurve;
    let params = PhillipsParams {
        expected_inflation: param(args.expected_inflation, config, concept, "expected_inflation")?,
        beta: param(args.beta, config, concept, "beta")?,
        natural_unemployment: param(args.natural_unemployment, config, concept, "natural_unemployment")?,
    };
    let points = relations::phillips_points(&params, args.from, args.to, args.steps)?;
    println!("{}", render::phillips_table(&points));
    Ok(())
}

/// Runs the classic exercises end to end through the evaluator.
fn handle_textbook() -> anyhow::Result<()> {
    let evaluator = FormulaEvaluator::new();
    let mut rows: Vec<(&str, FormulaInput, Concept)> = Vec::new();

    let industries = samples::two_industry_example();
    let column = |name: &str| {
        industries
            .numeric_column(name)
            .with_context(|| format!("two-industry sample lacks '{name}'"))
    };
    let production = column("production")?;
    let income_total = |name: &str| column(name).map(|values| values.iter().sum::<Decimal>());
    rows.push((
        "Two industries, production approach",
        FormulaInput::new()
            .with_series("production", production.clone())
            .with_series("intermediate_consumption", column("intermediate_consumption")?),
        Concept::GdpProduction,
    ));
    rows.push((
        "Two industries, income approach",
        FormulaInput::new()
            .with_value("wages", income_total("wages")?)
            .with_value("interest", income_total("interest")?)
            .with_value("profits", income_total("profits")?)
            .with_value("taxes", Decimal::ZERO),
        Concept::GdpIncome,
    ));
    // Cars are the only final good and households buy all of them.
    let final_sales = production.last().copied().unwrap_or_default();
    rows.push((
        "Two industries, expenditure approach",
        FormulaInput::new()
            .with_value("consumption", final_sales)
            .with_value("investment", Decimal::ZERO)
            .with_value("government_spending", Decimal::ZERO)
            .with_value("exports", Decimal::ZERO)
            .with_value("imports", Decimal::ZERO),
        Concept::GdpExpenditure,
    ));

    let computers = samples::computers_example();
    rows.push((
        "Computers, base year 1",
        FormulaInput::new()
            .with_series("quantities", computers.numeric_column("quantity")?)
            .with_series("prices", computers.numeric_column("price")?),
        Concept::NominalRealGdp,
    ));

    let basket = samples::cpi_exercise();
    rows.push((
        "Bread, milk and meat basket",
        FormulaInput::new()
            .with_series("base_quantities", basket.numeric_column("base_quantity")?)
            .with_series("base_prices", basket.numeric_column("base_price")?)
            .with_series("current_prices", basket.numeric_column("current_price")?),
        Concept::Cpi,
    ));

    let labor = samples::labor_exercise();
    let first = |name: &str| -> anyhow::Result<Decimal> {
        labor
            .numeric_column(name)?
            .first()
            .copied()
            .with_context(|| format!("labor sample has no '{name}'"))
    };
    let market = FormulaInput::new()
        .with_value("employed", first("employed")?)
        .with_value("unemployed", first("unemployed")?)
        .with_value("working_age_population", first("working_age_population")?);
    rows.push(("Labor market", market.clone(), Concept::UnemploymentRate));
    rows.push(("Labor market", market.clone(), Concept::ParticipationRate));
    rows.push(("Labor market", market, Concept::EmploymentRate));

    rows.push((
        "Okun, growth 3.5% from 9.5% unemployment",
        FormulaInput::new()
            .with_value("growth", dec!(3.5))
            .with_value("natural_growth", dec!(2.2))
            .with_value("beta", dec!(0.5))
            .with_value("initial_unemployment", dec!(9.5)),
        Concept::OkunsLaw,
    ));
    rows.push((
        "1000 over 10 years at 3% inflation",
        FormulaInput::new()
            .with_value("amount", dec!(1000))
            .with_value("inflation_rate", dec!(3))
            .with_value("periods", dec!(10)),
        Concept::PurchasingPower,
    ));
    rows.push((
        "Pessimistic households, 1500bn consumption",
        FormulaInput::new()
            .with_value("consumption", dec!(1500))
            .with_label("outlook", "pessimistic"),
        Concept::HouseholdOutlook,
    ));

    let mut results = Vec::with_capacity(rows.len());
    for (title, input, concept) in rows {
        let result = evaluator
            .evaluate(concept, &input)
            .with_context(|| format!("exercise '{title}' failed"))?;
        results.push((title, result));
    }
    println!("{}", render::exercises_table(&results));
    Ok(())
}

// ==============================================================================
// Analysis & Server Commands
// ==============================================================================

fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let dataset = match &args.csv {
        Some(path) => datasets::load_csv(path).with_context(|| format!("could not read {}", path.display()))?,
        None => samples::france_sample(),
    };
    let engine = AnalyticsEngine::new();

    let mut columns = Vec::new();
    for column in dataset.columns.iter().filter(|c| c.has_values()) {
        let values = column.present();
        let summary = engine.describe(&values)?;
        columns.push((column.name.as_str(), summary, engine.trend(&values).ok()));
    }
    println!("{} ({} rows)", dataset.name, dataset.row_count());
    println!("{}", render::summary_table(&columns));

    let numeric: Vec<(&str, &[Option<Decimal>])> = dataset
        .columns
        .iter()
        .filter(|c| c.has_values())
        .map(|c| (c.name.as_str(), c.values.as_slice()))
        .collect();
    if numeric.len() >= 2 {
        println!("{}", render::correlation_matrix_table(&engine.correlation_matrix(&numeric)?));
    }

    if let (Some(x), Some(y)) = (&args.x, &args.y) {
        let (xs, ys) = dataset.paired_columns(x, y)?;
        let correlation = engine.correlation(&xs, &ys)?;
        let regression = engine.regression(&xs, &ys)?;
        println!("{}", render::correlation_table(x, y, &correlation, &regression));
    }

    if args.okun {
        let (growth, unemployment) = dataset.paired_columns(&args.growth_column, &args.unemployment_column)?;
        let estimate = engine.okun_estimate(&growth, &unemployment)?;
        println!("{}", render::okun_estimate_table(&estimate));
    }
    Ok(())
}

async fn handle_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", config.server.host, port)
        .parse()
        .context("server.host and port do not form a socket address")?;
    web_server::run_server(addr, config).await
}
