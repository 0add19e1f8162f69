//! # Multicalc CLI Application
//!
//! Command-line driver for the calc_core calculators, one subcommand per
//! screen. Results print as text, or as JSON with `--json`. Logs go to
//! stderr so stdout only ever carries results.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calc_core::arithmetic::{evaluate_expression, CalculatorState, Key, Operator};
use calc_core::calculations::{self, age, bmi, discount, emi, gst, CalculationRequest};
use calc_core::conversion::{self, CurrencyCode, Unit, UnitConversionInput};
use calc_core::number::{format_number, parse_number, parse_optional, parse_positive};
use calc_core::number_theory::{self, BinaryOp, MathOperation, MathUtilityInput, NumberBase};
use calc_core::units::Kilograms;
use calc_core::{CalcError, CalculatorKind, HttpRateSource, RateBook, Settings};

/// Multicalc - everyday calculators from the command line
#[derive(Parser)]
#[command(name = "calc_cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (defaults to ./multicalc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available calculators
    List,

    /// Feed a key sequence to the keypad, e.g. "2 + 3 × 4 ="
    Keys {
        #[arg(allow_hyphen_values = true)]
        sequence: String,

        /// Enable scientific keys (functions, constants, ^)
        #[arg(long)]
        scientific: bool,
    },

    /// Evaluate an expression, e.g. "2sin(30)+8(9+6)"
    Expr {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Body Mass Index
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: String,

        /// Height in centimeters
        #[arg(long, conflicts_with_all = ["feet", "inches"])]
        cm: Option<String>,

        /// Height in feet (with --inches)
        #[arg(long)]
        feet: Option<String>,

        /// Additional inches, 0-11
        #[arg(long)]
        inches: Option<String>,
    },

    /// Loan installment
    Emi {
        principal: String,

        /// Annual interest rate in percent
        rate: String,

        /// Tenure in months (or years with --years)
        tenure: String,

        #[arg(long)]
        years: bool,
    },

    /// Goods and Services Tax
    Gst {
        amount: String,

        /// GST rate in percent
        rate: String,
    },

    /// Discount and savings
    Discount {
        price: String,

        /// Discount in percent
        percent: String,
    },

    /// Age from a birth date (YYYY-MM-DD)
    Age {
        birth_date: String,

        /// Reference date instead of now (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Convert between units, e.g. `convert 10 km mile`
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,
        from: String,
        to: String,
    },

    /// Convert currency with live exchange rates
    Currency { amount: String, from: String, to: String },

    /// Math utilities: sqrt, power, factorial, prime, lcm, gcd, bitwise
    Math {
        operation: String,

        #[arg(allow_hyphen_values = true)]
        a: String,

        #[arg(allow_hyphen_values = true)]
        b: Option<String>,

        /// Bitwise operation for `bitwise` (AND, OR, XOR, NOT)
        #[arg(long, default_value = "AND")]
        op: String,
    },

    /// Convert an integer between bases 2, 8, 10 and 16
    Base {
        #[arg(allow_hyphen_values = true)]
        value: String,

        #[arg(long, default_value_t = 10)]
        from: u32,

        #[arg(long, default_value_t = 2)]
        to: u32,
    },

    /// Run a JSON calculation request from a file (or `-` for stdin)
    Json { file: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            report_error(&e.into(), cli.json);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.log_level);

    match run(&cli, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    let json = cli.json;

    match &cli.command {
        Commands::List => {
            let entries: Vec<_> = CalculatorKind::ALL
                .iter()
                .map(|k| serde_json::json!({"name": k.name(), "description": k.description(), "route": k.route()}))
                .collect();
            emit(json, &entries, || {
                CalculatorKind::ALL
                    .iter()
                    .map(|k| format!("  {:<22} {}", k.name(), k.description()))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }

        Commands::Keys { sequence, scientific } => {
            let keys = Key::parse_sequence(sequence)?;
            if !scientific {
                if let Some(key) = keys.iter().find(|k| is_scientific_key(k)) {
                    bail!("{key:?} is only available on the scientific calculator (use --scientific)");
                }
            }
            let mut state = CalculatorState::default();
            for key in keys {
                state.press(key);
            }
            emit(json, &state, || state.display.clone())
        }

        Commands::Expr { expression } => {
            let value = evaluate_expression(expression)?;
            let result = calculations::ExpressionResult {
                expression: expression.clone(),
                value,
            };
            emit(json, &result, || format_number(value))
        }

        Commands::Bmi { weight, cm, feet, inches } => {
            let height = match (cm, feet, inches) {
                (Some(cm), _, _) => bmi::Height::Centimeters {
                    cm: parse_number("height", cm)?,
                },
                (None, None, None) => bail!(CalcError::incomplete_input("height", "Give --cm or --feet/--inches")),
                (None, feet, inches) => bmi::Height::FeetInches {
                    feet: parse_optional("feet", feet.as_deref().unwrap_or(""))?.unwrap_or(0.0),
                    inches: parse_optional("inches", inches.as_deref().unwrap_or(""))?.unwrap_or(0.0),
                },
            };
            let input = bmi::BmiInput {
                weight_kg: Kilograms(parse_number("weight", weight)?),
                height,
            };
            let result = bmi::calculate(&input)?;
            emit(json, &result, || {
                banner("BMI", &[("BMI", format!("{:.1}", result.bmi)), ("Category", result.category.to_string())])
            })
        }

        Commands::Emi { principal, rate, tenure, years } => {
            let unit = if *years { emi::TenureUnit::Years } else { emi::TenureUnit::Months };
            let input = emi::EmiInput::from_fields(principal, rate, tenure, unit)?;
            let result = emi::calculate(&input)?;
            emit(json, &result, || {
                banner(
                    "EMI",
                    &[
                        ("Monthly EMI", format!("{:.0}", result.monthly_payment)),
                        ("Total Amount", format!("{:.0}", result.total_amount)),
                        ("Total Interest", format!("{:.0}", result.total_interest)),
                    ],
                )
            })
        }

        Commands::Gst { amount, rate } => {
            let result = gst::calculate(&gst::GstInput::from_fields(amount, rate)?)?;
            emit(json, &result, || {
                banner(
                    "GST",
                    &[
                        ("Original Amount", format!("{:.2}", result.original_amount)),
                        ("GST Amount", format!("{:.2}", result.gst_amount)),
                        ("Total with GST", format!("{:.2}", result.total_with_gst)),
                    ],
                )
            })
        }

        Commands::Discount { price, percent } => {
            let result = discount::calculate(&discount::DiscountInput::from_fields(price, percent)?)?;
            emit(json, &result, || {
                banner(
                    "DISCOUNT",
                    &[
                        ("Original Price", format!("{:.2}", result.original_price)),
                        ("Discount", format!("{:.2}", result.discount_amount)),
                        ("Final Price", format!("{:.2}", result.final_price)),
                        ("You Saved", format!("{:.2}", result.saved)),
                    ],
                )
            })
        }

        Commands::Age { birth_date, as_of } => {
            let input = age::AgeInput::from_fields(birth_date, as_of.as_deref())?;
            let result = age::calculate(&input)?;
            emit(json, &result, || {
                banner(
                    "AGE",
                    &[
                        ("Age", format!("{} years, {} months, {} days", result.years, result.months, result.days)),
                        ("Total Days", result.total_days.to_string()),
                        ("Total Hours", result.total_hours.to_string()),
                        ("Total Minutes", result.total_minutes.to_string()),
                        ("Total Seconds", result.total_seconds.to_string()),
                    ],
                )
            })
        }

        Commands::Convert { value, from, to } => {
            let input = UnitConversionInput {
                value: parse_number("value", value)?,
                from: parse_unit(from)?,
                to: parse_unit(to)?,
            };
            let result = conversion::calculate(&input)?;
            emit(json, &result, || {
                format!(
                    "{} {} = {} {}",
                    format_number(result.value),
                    result.from,
                    format_number(result.result),
                    result.to
                )
            })
        }

        Commands::Currency { amount, from, to } => {
            let amount = parse_positive("amount", amount)?;
            let from = CurrencyCode::new(from)?;
            let to = CurrencyCode::new(to)?;

            let source = HttpRateSource::new(&settings.rates)?;
            let mut book = RateBook::new(CurrencyCode::new(&settings.rates.base_currency)?);
            book.refresh(&source).await?;

            let converted = book.convert(amount, &from, &to)?;
            let rate = book.exchange_rate(&from, &to)?;
            let result = serde_json::json!({
                "amount": amount,
                "from": from,
                "to": to,
                "rate": rate,
                "result": converted,
            });
            emit(json, &result, || {
                format!("{amount:.2} {from} = {converted:.2} {to}\n1 {from} = {rate:.4} {to}")
            })
        }

        Commands::Math { operation, a, b, op } => {
            let operation = MathOperation::from_str_flexible(operation)
                .with_context(|| format!("unknown math operation '{operation}'"))?;
            let mut input = MathUtilityInput::new(operation, a.clone());
            input.input2 = b.clone();
            input.binary_op = BinaryOp::from_str_flexible(op)
                .with_context(|| format!("unknown bitwise operation '{op}'"))?;
            let result = number_theory::calculate(&input)?;
            emit(json, &result, || result.output.clone())
        }

        Commands::Base { value, from, to } => {
            let from = parse_base(*from)?;
            let to = parse_base(*to)?;
            let mut input = MathUtilityInput::new(MathOperation::BaseConverter, value.clone());
            input.from_base = from;
            input.to_base = to;
            let result = number_theory::calculate(&input)?;
            emit(json, &result, || result.output.clone())
        }

        Commands::Json { file } => {
            let text = read_input(file)?;
            let request: CalculationRequest = serde_json::from_str(&text).context("invalid calculation request")?;
            debug!(calc_type = request.calc_type(), "running json request");
            let outcome = calculations::run(&request)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
    }
}

fn is_scientific_key(key: &Key) -> bool {
    matches!(key, Key::Function(_) | Key::Constant(_) | Key::Operator(Operator::Pow))
}

fn parse_unit(text: &str) -> Result<Unit> {
    Unit::from_str_flexible(text)
        .ok_or_else(|| CalcError::invalid_input("unit", text, "Unknown unit").into())
}

fn parse_base(radix: u32) -> Result<NumberBase> {
    NumberBase::from_radix(radix)
        .ok_or_else(|| CalcError::invalid_input("base", radix.to_string(), "Base must be 2, 8, 10 or 16").into())
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
    }
}

/// Print `value` as pretty JSON, or the human-readable rendering.
fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", human());
    }
    Ok(())
}

fn banner(title: &str, rows: &[(&str, String)]) -> String {
    let rule = "═".repeat(39);
    let mut out = format!("{rule}\n  {title} RESULTS\n{rule}\n");
    for (label, value) in rows {
        out.push_str(&format!("  {label:<16} {value}\n"));
    }
    out.push_str(&rule);
    out
}

fn report_error(error: &anyhow::Error, json: bool) {
    let calc_error = error.downcast_ref::<CalcError>();

    if json {
        let body = match calc_error {
            Some(e) => serde_json::json!({
                "error": e,
                "code": e.error_code(),
                "message": e.user_message(),
                "recoverable": e.is_recoverable(),
            }),
            None => serde_json::json!({"message": format!("{error:#}")}),
        };
        println!("{body:#}");
        return;
    }

    match calc_error {
        Some(e) => {
            eprintln!("Error: {}", e.user_message());
            eprintln!("  [{}] {}", e.error_code(), e);
        }
        None => eprintln!("Error: {error:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_values_parse() {
        let cli = Cli::try_parse_from(["calc_cli", "convert", "-40", "F", "C"]).unwrap();
        match cli.command {
            Commands::Convert { value, .. } => assert_eq!(value, "-40"),
            _ => panic!("expected convert"),
        }
    }

    #[tokio::test]
    async fn test_run_offline_commands() {
        let settings = Settings::default();
        for args in [
            vec!["calc_cli", "list"],
            vec!["calc_cli", "keys", "2 + 3 × 4 ="],
            vec!["calc_cli", "--json", "expr", "8(9+6)"],
            vec!["calc_cli", "emi", "100000", "10", "12"],
            vec!["calc_cli", "bmi", "--weight", "70", "--feet", "5", "--inches", "9"],
            vec!["calc_cli", "age", "2000-01-01", "--as-of", "2024-06-15"],
            vec!["calc_cli", "math", "bitwise", "12", "10", "--op", "xor"],
            vec!["calc_cli", "base", "FF", "--from", "16", "--to", "10"],
        ] {
            let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
            assert!(run(&cli, &settings).await.is_ok(), "{args:?}");
        }
    }

    #[tokio::test]
    async fn test_errors_surface_as_calc_errors() {
        let settings = Settings::default();
        let cli = Cli::try_parse_from(["calc_cli", "keys", "30 sin"]).unwrap();
        assert!(run(&cli, &settings).await.is_err());

        let cli = Cli::try_parse_from(["calc_cli", "discount", "100", "150"]).unwrap();
        let err = run(&cli, &settings).await.unwrap_err();
        assert_eq!(err.downcast_ref::<CalcError>().map(|e| e.error_code()), Some("INVALID_DOMAIN"));

        let cli = Cli::try_parse_from(["calc_cli", "convert", "1", "m", "kg"]).unwrap();
        assert!(run(&cli, &settings).await.is_err());
    }
}
