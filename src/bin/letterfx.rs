use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "letterfx", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the `<style>` + `<script>` snippet for a rule list.
    Generate(GenerateArgs),
    /// Run the rules against an HTML fragment and print the resulting spans as JSON.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input rules JSON (array or `{ "rules": [...] }`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output HTML path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input rules JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// HTML fragment to animate.
    #[arg(long)]
    html: PathBuf,

    /// Viewport width in px.
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f64,

    /// Viewport height in px.
    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,

    /// Height given to each matched element when stacking them down the page.
    #[arg(long, default_value_t = 120.0)]
    line_height: f64,

    /// Scroll positions to visit after load, in order.
    #[arg(long = "scroll")]
    scroll: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_rules(path: &Path) -> anyhow::Result<letterfx::RuleSet> {
    letterfx::RuleSet::from_path(path).with_context(|| format!("load rules '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let rules = read_rules(&args.in_path)?;
    let snippet = letterfx::generate_snippet(&rules)?;
    let html = snippet.to_html()?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, html).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let rules = read_rules(&args.in_path)?;
    rules.validate()?;

    let source = std::fs::read_to_string(&args.html)
        .with_context(|| format!("read html '{}'", args.html.display()))?;
    let mut doc = letterfx::Document::from_html(&source)?;

    // No layout engine: matched elements are stacked top to bottom in document order.
    let mut y = 0.0;
    let mut placed = std::collections::BTreeSet::new();
    for rule in rules.rules() {
        for el in doc.elements_by_class(rule.identifier.as_str()) {
            if placed.insert(el) {
                let rect = letterfx::Rect::new(0.0, y, args.viewport_width, y + args.line_height);
                doc.set_rect(el, rect)?;
                y += args.line_height;
            }
        }
    }

    let viewport = letterfx::Viewport::new(args.viewport_width, args.viewport_height);
    let mut runtime = letterfx::Runtime::from_rule_set(doc, viewport, &rules);
    runtime.dom_content_loaded()?;
    runtime.settle()?;
    for y in &args.scroll {
        runtime.scroll_to(*y)?;
        runtime.settle()?;
    }

    let report = serde_json::to_string_pretty(&runtime.snapshot())
        .with_context(|| "serialize simulation report")?;
    println!("{report}");
    Ok(())
}
