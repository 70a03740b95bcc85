mod cli;

use titleforged::{config, scanner};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use tf_av::{default_output_path, parse_ffprobe_json, FfprobeProber, ToolRegistry, TranscodeCommand};
use tf_plan::{FilePlan, TitlePlanner};
use tf_probe::Prober;
use tf_rules::{RuleEngine, RuleSet};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "titleforged=trace,tf_plan=trace,tf_rules=trace,tf_av=debug,tf_probe=debug".to_string()
        } else {
            "titleforged=info,tf_plan=info,tf_rules=info,tf_av=info,tf_probe=info".to_string()
        }
    });

    // Logs go to stderr so --json output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan {
            file,
            from_json,
            json,
            output,
        } => plan_file(
            &file,
            from_json.as_deref(),
            output.as_deref(),
            json,
            cli.config.as_deref(),
        ),
        Commands::Scan { dir, json } => scan_dir(&dir, json, cli.config.as_deref()),
        Commands::Rewrite { title, rules } => {
            rewrite_title(&title, rules.as_deref(), cli.config.as_deref())
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("titleforged {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn ffprobe_prober(registry: &ToolRegistry, config: &config::Config) -> Result<FfprobeProber> {
    let ffprobe = registry.require("ffprobe")?;
    Ok(
        FfprobeProber::new(ffprobe.to_path_buf(), config.scan.extensions.clone())
            .with_timeout(registry.timeout()),
    )
}

fn plan_file(
    file: &Path,
    from_json: Option<&Path>,
    output: Option<&Path>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = ToolRegistry::discover(&config.tools);
    let planner = TitlePlanner::from_config(&config);

    let media_info = match from_json {
        Some(dump) => {
            let content = std::fs::read_to_string(dump)
                .with_context(|| format!("Failed to read ffprobe dump: {:?}", dump))?;
            parse_ffprobe_json(file, &content)?
        }
        None => {
            if !file.exists() {
                anyhow::bail!("Input file does not exist: {:?}", file);
            }
            tracing::info!("Probing media info: {:?}", file);
            ffprobe_prober(&registry, &config)?.probe(file)?
        }
    };
    tracing::debug!("Media info: {:?}", media_info);

    let file_plan = planner.plan(&media_info);

    let command = file_plan.needs_processing.then(|| {
        let program = registry
            .path("ffmpeg")
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("ffmpeg"));
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(file));
        TranscodeCommand::new(program, file, &output)
            .copy_streams(planner.user_options().main.is_empty())
            .arguments(file_plan.arguments.clone())
    });

    if json {
        let value = serde_json::json!({
            "plan": file_plan,
            "command": command.as_ref().map(TranscodeCommand::build),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_plan(&file_plan);
    match command {
        Some(command) => println!("\nCommand:\n  {}", command.to_shell_string()),
        None => println!("\nNothing to do for this file."),
    }

    Ok(())
}

fn print_plan(file_plan: &FilePlan) {
    let plan = &file_plan.plan;
    println!("File: {}", file_plan.file_path.display());
    println!(
        "Streams: {} video, {} audio, {} subtitle",
        plan.tally.video.count, plan.tally.audio.count, plan.tally.subtitle.count
    );
    println!(
        "Needs processing: {}",
        if file_plan.needs_processing { "yes" } else { "no" }
    );

    if let Some(ref title) = plan.global_title {
        println!("\nContainer title: {:?}", title);
    }

    if !plan.deletions.is_empty() {
        println!("\nSingle-stream titles removed:");
        for stream_type in &plan.deletions {
            println!("  {}", stream_type);
        }
    }

    if !plan.rewrites.is_empty() {
        println!("\nRewrites:");
        for rewrite in &plan.rewrites {
            print!(
                "  [{}:{}] {:?} -> {:?}",
                rewrite.stream_type.letter(),
                rewrite.type_index,
                rewrite.original_title,
                rewrite.title
            );
            if let Some(ref disposition) = rewrite.disposition {
                print!(" (disposition {})", disposition);
            }
            println!();
        }
    }
}

fn scan_dir(dir: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = ToolRegistry::discover(&config.tools);
    let prober = ffprobe_prober(&registry, &config)?;
    let planner = TitlePlanner::from_config(&config);

    let report = scanner::scan_library(dir, &config.scan.extensions, &planner, &prober)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for file_plan in report.pending() {
        let relative = file_plan
            .file_path
            .strip_prefix(&report.root)
            .unwrap_or(file_plan.file_path.as_path());
        println!(
            "{} ({} rewrites, {} deletions{})",
            relative.display(),
            file_plan.plan.rewrites.len(),
            file_plan.plan.deletions.len(),
            if file_plan.plan.global_title.is_some() {
                ", container title"
            } else {
                ""
            }
        );
    }

    println!(
        "\n{} of {} files need processing",
        report.pending_count(),
        report.files.len()
    );

    Ok(())
}

fn rewrite_title(title: &str, rules: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let engine = match rules {
        Some(raw) => RuleEngine::new(RuleSet::try_parse(raw).context("Invalid --rules")?),
        None => {
            let config = config::load_config_or_default(config_path)?;
            TitlePlanner::from_config(&config).engine().clone()
        }
    };

    for err in engine.invalid_rules() {
        println!("⚠ {}", err);
    }

    let rewrite = engine.apply(title);
    println!("Matched: {}", if rewrite.matched { "yes" } else { "no" });
    println!("Title: {:?}", rewrite.title);
    if !rewrite.disposition.is_empty() {
        println!("Disposition: {}", rewrite.disposition);
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = ToolRegistry::discover(&config.tools).check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable probing and processing.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let warnings = config::validate_config(&config);
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        println!("⚠ Configuration has {} warning(s)", warnings.len());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    let rules = match config.title.mode {
        config::TitleMode::Rules => RuleSet::parse(&config.title.rules).len(),
        config::TitleMode::Strip => RuleSet::strip_all().len(),
    };
    println!("  Title mode: {:?}", config.title.mode);
    println!("  Rules: {}", rules);
    println!("  Copy video title to container: {}", config.title.copy_video_to_global);
    println!("  Delete single-stream titles: {}", config.title.delete_singles);
    println!("  Advanced options: {}", config.advanced.enabled);

    Ok(())
}
