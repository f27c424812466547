//! Command-line tools for scatter reports.
//!
//! Examples:
//!   scatter-cli build outputs/run1/result.json outputs/run1/report.json --title "City survey"
//!   scatter-cli summary outputs/run1/report.json
//!   scatter-cli snapshot outputs/run1/report.json plot.svg --width 1200 --height 800 --select 2

use std::path::PathBuf;
use std::process;

use scatter::config::ViewConfig;
use scatter::controller::ScatterView;
use scatter::dataset::{ClusterId, Dataset};
use scatter::geom::Size;
use scatter::report::{build_report, PipelineResult, ReportMeta};
use scatter::snapshot::render_svg;
use tracing::{error, info};

fn usage() -> ! {
    eprintln!("scatter-cli");
    eprintln!("Usage: scatter-cli <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  build <result.json> <report.json> [--title T] [--question Q]");
    eprintln!("                              Build the compact report dataset");
    eprintln!("  summary <report.json>       Print clusters, counts and vote coverage");
    eprintln!("  snapshot <report.json> <out.svg> [--width W] [--height H] [--select ID] [--config cfg.json]");
    eprintln!("                              Render a static SVG of the scatter plot");
    process::exit(1);
}

/// Split `args` into positionals and `--key value` options.
fn split_args(args: &[String]) -> (Vec<String>, Vec<(String, String)>) {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if let Some(key) = args[i].strip_prefix("--") {
            match args.get(i + 1) {
                Some(v) => options.push((key.to_string(), v.clone())),
                None => {
                    eprintln!("missing value for --{key}");
                    usage();
                }
            }
            i += 2;
        } else {
            positional.push(args[i].clone());
            i += 1;
        }
    }
    (positional, options)
}

fn option<'a>(options: &'a [(String, String)], key: &str) -> Option<&'a str> {
    options
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn parse_option<T: std::str::FromStr>(options: &[(String, String)], key: &str, default: T) -> T {
    match option(options, key) {
        None => default,
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("invalid value for --{key}: {v}");
                usage();
            }
        },
    }
}

fn cmd_build(positional: &[String], options: &[(String, String)]) -> Result<(), String> {
    let [input, output] = positional else { usage() };
    let result = PipelineResult::from_path(input).map_err(|e| e.to_string())?;
    let meta = ReportMeta {
        title: option(options, "title").map(str::to_string),
        question: option(options, "question").map(str::to_string),
    };
    let report = build_report(result, meta);
    let json = report.to_json_string().map_err(|e| e.to_string())?;
    std::fs::write(output, &json).map_err(|e| format!("failed to write {output}: {e}"))?;
    info!("Report written to {} ({} bytes)", output, json.len());
    Ok(())
}

fn cmd_summary(positional: &[String]) -> Result<(), String> {
    let [input] = positional else { usage() };
    let dataset = Dataset::from_path(input).map_err(|e| e.to_string())?;
    let view = ScatterView::new(dataset, ViewConfig::default()).map_err(|e| e.to_string())?;
    let ds = view.dataset();

    if let Some(title) = &ds.title {
        println!("{title}");
    }
    if let Some(q) = ds.question.as_deref().filter(|q| !q.is_empty()) {
        println!("Q: {q}");
    }
    println!(
        "{} clusters, {} arguments, {} comments",
        ds.clusters.len(),
        ds.argument_count(),
        ds.comments.len()
    );
    for c in &ds.clusters {
        let voted = c
            .arguments
            .iter()
            .filter(|a| a.votes + a.disagrees > 0)
            .count();
        println!(
            "  [{:>3}] {} {:<40} {:>5} args  {:>5} with votes",
            c.id.0,
            c.color,
            c.cluster,
            c.arguments.len(),
            voted
        );
    }

    let report = view.preprocess_report();
    if !report.is_clean() {
        println!(
            "{} missing and {} malformed comment records",
            report.missing_comments.len(),
            report.malformed_comments.len()
        );
    }
    Ok(())
}

fn cmd_snapshot(positional: &[String], options: &[(String, String)]) -> Result<(), String> {
    let [input, output] = positional else { usage() };
    let config = match option(options, "config") {
        Some(path) => ViewConfig::from_path(PathBuf::from(path)).map_err(|e| e.to_string())?,
        None => ViewConfig::default(),
    };
    let width: f64 = parse_option(options, "width", config.layout.fallback_width);
    let height: f64 = parse_option(options, "height", config.layout.fallback_height);

    let dataset = Dataset::from_path(input).map_err(|e| e.to_string())?;
    let mut view = ScatterView::new(dataset, config).map_err(|e| e.to_string())?;
    view.mount(Size::new(width, height)).map_err(|e| e.to_string())?;

    if let Some(id) = option(options, "select") {
        let id: u32 = id.parse().map_err(|_| format!("invalid cluster id: {id}"))?;
        view.click_cluster(ClusterId(id), 0.0);
    }

    let svg = render_svg(&view).ok_or("nothing to render")?;
    std::fs::write(output, svg).map_err(|e| format!("failed to write {output}: {e}"))?;
    info!("Snapshot written to {}", output);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((cmd, rest)) = args.split_first() else {
        usage()
    };
    let (positional, options) = split_args(rest);

    let res = match cmd.as_str() {
        "build" => cmd_build(&positional, &options),
        "summary" => cmd_summary(&positional),
        "snapshot" => cmd_snapshot(&positional, &options),
        _ => usage(),
    };

    if let Err(e) = res {
        error!("{e}");
        process::exit(2);
    }
}
