//! resultpage CLI - find the results page in extracted report text

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use resultpage::{
    load_pages, AnalysisOptions, AnalysisReport, Classification, FileExtractor, JsonFormat,
    ResultLayoutConfig, ResultPageFinder, TermMatcher,
};

#[derive(Parser)]
#[command(name = "resultpage")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Find the quarterly results page in extracted report text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify pages and decide whether re-extraction is needed
    Analyze {
        /// Page JSON file (array of {page_number, text})
        #[arg(value_name = "PAGES")]
        input: PathBuf,

        /// Re-extracted page JSON used when the primary pages are rejected
        #[arg(long, value_name = "FILE")]
        fallback: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print a page table instead of JSON
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// List the financial terms found in a text file
    Terms {
        /// Text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct LayoutArgs {
    /// Layout hint JSON, e.g. '{"resultPageConfig": {"type": "Multi"}}'
    #[arg(long, env = "RESULT_PAGE_HINT")]
    hint: Option<String>,

    /// File containing the layout hint JSON (takes precedence over --hint)
    #[arg(long, value_name = "FILE")]
    hint_file: Option<PathBuf>,

    /// Result layout, used when no hint is given
    #[arg(long, value_enum, env = "RESULT_TYPE")]
    layout: Option<LayoutMode>,

    /// Accounting scope for the multi page layout
    #[arg(long, value_enum, env = "MULTI_PAGE_RESULT_TYPE")]
    variant: Option<Scope>,
}

#[derive(Args)]
struct ThresholdArgs {
    /// Minimum financial terms for a relevant page
    #[arg(long, env = "MIN_FINANCIAL_TERMS", default_value_t = 7)]
    min_terms: usize,

    /// Z-score above which a page is an outlier
    #[arg(long, env = "ZSCORE_THRESHOLD", default_value_t = 1.0)]
    zscore_threshold: f64,

    /// Z-score gap (percent) separating a clear winner in single page layout
    #[arg(long, env = "GAP_PERCENTAGE_THRESHOLD", default_value_t = 30.0)]
    gap_threshold: f64,
}

impl ThresholdArgs {
    fn to_options(&self) -> AnalysisOptions {
        AnalysisOptions::new()
            .with_min_financial_terms(self.min_terms)
            .with_zscore_threshold(self.zscore_threshold)
            .with_gap_threshold_percent(self.gap_threshold)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LayoutMode {
    /// One results page
    #[value(alias = "single_page")]
    Single,
    /// Results spread over several pages
    #[value(alias = "multi_page")]
    Multi,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Scope {
    /// Group-level statement
    Consolidated,
    /// Entity-level statement
    Standalone,
}

impl LayoutArgs {
    fn resolve(&self) -> Result<ResultLayoutConfig, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.hint_file {
            let hint = fs::read_to_string(path)?;
            return Ok(ResultLayoutConfig::from_hint(Some(&hint))?);
        }
        if self.hint.is_some() {
            return Ok(ResultLayoutConfig::from_hint(self.hint.as_deref())?);
        }
        if let Some(mode) = self.layout {
            let layout = match mode {
                LayoutMode::Single => "single",
                LayoutMode::Multi => "multi",
            };
            let variant = self.variant.map(|scope| match scope {
                Scope::Consolidated => "consolidated",
                Scope::Standalone => "standalone",
            });
            return Ok(ResultLayoutConfig::from_names(layout, variant)?);
        }
        Ok(ResultLayoutConfig::from_hint(None)?)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            fallback,
            output,
            compact,
            summary,
            layout,
            thresholds,
        }) => cmd_analyze(
            &input,
            fallback.as_deref(),
            output.as_deref(),
            compact,
            summary,
            &layout,
            &thresholds,
        ),
        Some(Commands::Terms { input }) => cmd_terms(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: resultpage analyze <PAGES>".yellow());
            println!("       resultpage --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_analyze(
    input: &Path,
    fallback: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
    summary: bool,
    layout: &LayoutArgs,
    thresholds: &ThresholdArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = thresholds.to_options();
    options.validate()?;

    let finder = ResultPageFinder::new()
        .with_options(options)
        .with_layout(layout.resolve()?);

    let pages = load_pages(input)?;
    log::info!("Loaded {} pages from {}", pages.len(), input.display());

    let report = match fallback {
        Some(path) => {
            let outcome = finder.analyze_with_fallback(&pages, &FileExtractor::new(path))?;
            if let Some(ref name) = outcome.reextracted_with {
                eprintln!(
                    "{} {} ({})",
                    "Re-extracted with".yellow(),
                    name,
                    outcome.primary_verdict.message()
                );
            }
            outcome.report
        }
        None => finder.analyze(&pages),
    };

    if summary {
        print_summary(&report);
        return Ok(());
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = report.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
        print_verdict(&report);
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn print_verdict(report: &AnalysisReport) {
    if report.needs_reextraction {
        println!("{}: {}", "Re-extraction needed".yellow().bold(), report.message);
    } else {
        let pages: Vec<String> = report
            .results_page_numbers()
            .iter()
            .map(|n| n.to_string())
            .collect();
        println!(
            "{}: page {}",
            "Results page".green().bold(),
            pages.join(", ")
        );
    }
}

fn print_summary(report: &AnalysisReport) {
    println!("{}", "Analysis".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());
    println!("{}: {}", "Layout".bold(), report.layout);
    println!("{}: {}", "Pages".bold(), report.page_count());
    println!("{}: {:.2}", "Mean terms".bold(), report.statistics.mean);
    println!("{}: {:.2}", "Std dev".bold(), report.statistics.std_dev);

    println!();
    println!(
        "{:>5}  {:>5}  {:>7}  {}",
        "Page".bold(),
        "Terms".bold(),
        "Z".bold(),
        "Classification".bold()
    );
    println!("{}", "─".repeat(60).dimmed());
    for page in &report.pages {
        let label = page.classification.to_string();
        let label = match page.classification {
            Classification::ResultsPage => label.green().bold(),
            Classification::NotRelevant => label.dimmed(),
            Classification::DuplicateResultsPage | Classification::MoreResultsPages => {
                label.yellow()
            }
            _ => label.normal(),
        };
        let marker = if page.is_outlier { "*" } else { " " };
        println!(
            "{:>5}  {:>5}  {:>7.3}{} {}",
            page.page_number, page.unique_term_count, page.z_score, marker, label
        );
    }

    println!();
    print_verdict(report);
}

fn cmd_terms(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let text = resultpage::analysis::prepare_text(&text);
    let terms = TermMatcher::new().find_terms(&text);

    for term in &terms {
        println!("  {} {}", "•".dimmed(), term);
    }
    println!(
        "\n{} {} unique terms",
        "Found".green().bold(),
        terms.len()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resultpage".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Quarterly results page finder");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/resultpage".dimmed());
    println!("License: MIT");
}
