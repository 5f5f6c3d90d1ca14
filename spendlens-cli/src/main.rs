use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use spendlens_core::TransactionTable;
use spendlens_ingest::{
    ParseOutcome, PdfTextExtractor, SkippedLine, StatementParser, TextExtractor,
};
use spendlens_insights::{Insights, TableFilter, export_csv, format_amount, render_summary};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "spendlens", version, about = "Payment-app statement parser and spending insights")]
struct Cli {
    /// Log parser diagnostics (overrides config log level; RUST_LOG wins over both)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement PDF and print them
    Parse {
        pdf: PathBuf,

        /// Print records as JSON
        #[arg(long)]
        json: bool,

        /// Print the extracted text when no transactions are recognized
        #[arg(long)]
        raw: bool,
    },

    /// Summarize spending: totals, top spends, daily/monthly averages, categories
    Insights {
        pdf: PathBuf,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only include these payees (repeatable)
        #[arg(long = "payee")]
        payees: Vec<String>,

        /// Number of top spends to list (default: config report.top_n)
        #[arg(long)]
        top: Option<usize>,

        /// Print insights as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write extracted transactions to CSV
    Export {
        pdf: PathBuf,

        /// Output CSV path
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Manage ~/.spendlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

impl Command {
    /// `config init|show` must run even when the config file does not parse
    fn tolerates_bad_config(&self) -> bool {
        matches!(self, Command::Config { .. })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::resolve_config(config::load_config(), cli.command.tolerates_bad_config())?;
    init_logging(cli.verbose, &cfg);

    match cli.command {
        Command::Parse { pdf, json, raw } => {
            let (outcome, skipped) = load_statement(&pdf)?;
            match outcome {
                ParseOutcome::Table(table) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&table)?);
                    } else {
                        print_table(&table, &cfg.report.currency_symbol);
                        print_skipped(&skipped);
                    }
                }
                other => {
                    report_no_data(&pdf, &other);
                    if let (true, ParseOutcome::RawText(text)) = (raw, &other) {
                        println!("{}", text.as_text());
                    }
                }
            }
        }

        Command::Insights {
            pdf,
            from,
            to,
            payees,
            top,
            json,
        } => {
            if let (Some(f), Some(t)) = (from, to) {
                if f > t {
                    bail!("--from {f} is after --to {t}");
                }
            }

            let (outcome, _) = load_statement(&pdf)?;
            let Some(table) = outcome.table() else {
                report_no_data(&pdf, &outcome);
                return Ok(());
            };

            let mut filter = TableFilter {
                from,
                to,
                ..TableFilter::default()
            };
            if !payees.is_empty() {
                filter = filter.payees(payees);
            }

            let filtered = filter.apply(table);
            if filtered.is_empty() {
                eprintln!("No transactions match the filters.");
                return Ok(());
            }

            let insights = Insights::compute(&filtered, top.unwrap_or(cfg.report.top_n));
            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else {
                print!("{}", render_summary(&insights, &cfg.report.currency_symbol));
            }
        }

        Command::Export { pdf, out } => {
            let (outcome, _) = load_statement(&pdf)?;
            let Some(table) = outcome.table() else {
                report_no_data(&pdf, &outcome);
                return Ok(());
            };
            export_csv(table, &out).with_context(|| format!("exporting {}", pdf.display()))?;
            println!("Wrote {} transactions to {}", table.len(), out.display());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: bool, cfg: &Config) {
    let fallback = if verbose {
        "debug".to_string()
    } else {
        cfg.log.level.clone()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_statement(pdf: &Path) -> Result<(ParseOutcome, Vec<SkippedLine>)> {
    let raw = PdfTextExtractor
        .extract_path(pdf)
        .with_context(|| format!("extracting text from {}", pdf.display()))?;
    let parser = StatementParser::new()?;
    let mut report = parser.scan(&raw);
    let skipped = std::mem::take(&mut report.skipped);

    tracing::info!(
        records = report.records.len(),
        skipped = skipped.len(),
        "parsed {}",
        pdf.display()
    );
    Ok((report.into_outcome(raw), skipped))
}

fn report_no_data(pdf: &Path, outcome: &ParseOutcome) {
    match outcome {
        ParseOutcome::Empty => eprintln!(
            "No text could be extracted from {} (scanned or image-only PDF?)",
            pdf.display()
        ),
        _ => eprintln!(
            "No transactions recognized in {} (pass --raw to `parse` to see the extracted text)",
            pdf.display()
        ),
    }
}

fn print_table(table: &TransactionTable, symbol: &str) {
    println!(
        "{:<12} {:<8} {:<32} {:>14} {:>14}",
        "Date", "Time", "Description", "Debit", "Credit"
    );
    for r in table {
        let money = |v: f64| {
            if v > 0.0 {
                format_amount(symbol, v)
            } else {
                "-".to_string()
            }
        };
        println!(
            "{:<12} {:<8} {:<32} {:>14} {:>14}",
            r.date.format("%Y-%m-%d").to_string(),
            r.time.format("%H:%M").to_string(),
            r.description,
            money(r.debit),
            money(r.credit)
        );
    }
    println!("\n{} transactions", table.len());
}

fn print_skipped(skipped: &[SkippedLine]) {
    if skipped.is_empty() {
        return;
    }
    println!("\nSkipped {} line(s):", skipped.len());
    for s in skipped {
        println!("  line {}: {} ({})", s.line_no, s.line, s.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_core::ExtractionError;

    #[test]
    fn test_missing_pdf_surfaces_read_error() {
        let err = load_statement(Path::new("/nonexistent/statement.pdf")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/statement.pdf"));
        assert!(matches!(
            err.downcast_ref::<ExtractionError>(),
            Some(ExtractionError::Read { .. })
        ));
    }

    #[test]
    fn test_only_config_commands_tolerate_bad_config() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;
        assert!(parse(&["spendlens", "config", "show"]).tolerates_bad_config());
        assert!(parse(&["spendlens", "config", "init"]).tolerates_bad_config());
        assert!(!parse(&["spendlens", "parse", "x.pdf"]).tolerates_bad_config());
        assert!(!parse(&["spendlens", "export", "x.pdf", "--out", "x.csv"]).tolerates_bad_config());
    }
}
