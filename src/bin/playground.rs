use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use chart_geometry::api::{ChartPlayground, PlaygroundConfig, default_period};
use chart_geometry::core::LabelLocale;
use chart_geometry::render::{ChartStyle, DrawPlan, SvgRenderer};
use chart_geometry::telemetry::init_default_tracing;
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

const USAGE: &str = "usage: playground [--format html|json] [--output <path>] [--seed <n>] [--locale ja|en|es] [--today <yyyy-mm-dd>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Json,
}

#[derive(Debug)]
struct CliArgs {
    format: OutputFormat,
    output: Option<PathBuf>,
    seed: Option<u64>,
    locale: LabelLocale,
    today: Option<NaiveDate>,
}

fn main() {
    let _ = init_default_tracing("chart_geometry=info,playground=info");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let period = default_period(today).map_err(|err| err.to_string())?;
    let config = PlaygroundConfig::default().with_locale(args.locale);
    let mut playground = ChartPlayground::new(period, config).map_err(|err| err.to_string())?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    playground.regenerate(&mut rng);
    info!(
        start = %period.start,
        end = %period.end,
        seed = ?args.seed,
        "generated playground data"
    );

    let payload = match args.format {
        OutputFormat::Html => {
            let mut renderer =
                SvgRenderer::new(ChartStyle::default()).map_err(|err| err.to_string())?;
            playground
                .render(&mut renderer)
                .map_err(|err| err.to_string())?;
            renderer.into_document("chart-geometry playground")
        }
        OutputFormat::Json => {
            let plans = playground.draw_plans().map_err(|err| err.to_string())?;
            plans_to_json(&plans)?
        }
    };

    match &args.output {
        Some(path) => fs::write(path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => std::io::stdout()
            .write_all(payload.as_bytes())
            .map_err(|err| format!("failed to write stdout: {err}")),
    }
}

fn plans_to_json(plans: &[DrawPlan]) -> Result<String, String> {
    serde_json::to_string_pretty(plans).map_err(|err| format!("failed to serialize json: {err}"))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut format = OutputFormat::Html;
    let mut output = None::<PathBuf>;
    let mut seed = None::<u64>;
    let mut locale = LabelLocale::default();
    let mut today = None::<NaiveDate>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --format".to_owned())?;
                format = match value.as_str() {
                    "html" => OutputFormat::Html,
                    "json" => OutputFormat::Json,
                    other => return Err(format!("unknown format `{other}`")),
                };
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --seed".to_owned())?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|err| format!("invalid --seed `{value}`: {err}"))?,
                );
            }
            "--locale" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --locale".to_owned())?;
                locale = match value.as_str() {
                    "ja" | "ja-JP" => LabelLocale::JaJp,
                    "en" | "en-US" => LabelLocale::EnUs,
                    "es" | "es-ES" => LabelLocale::EsEs,
                    other => return Err(format!("unknown locale `{other}`")),
                };
            }
            "--today" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --today".to_owned())?;
                today = Some(
                    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .map_err(|err| format!("invalid --today `{value}`: {err}"))?,
                );
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        format,
        output,
        seed,
        locale,
        today,
    })
}

