//! CLI for prdoc-forge.
//!
//! A thin shell over the library: it gathers user input and hands it to the
//! functions implemented there. Author and submit prdoc files, inspect the
//! form a schema describes, generate skeletons, and check existing files.

use clap::{Args, Parser, Subcommand};
use prdoc_forge::{
    config, template, yaml, CheckOutcome, DocFile, DocFileName, Editor, FieldDescriptor,
    FieldKind, ForgeConfig, FormDescriptor, PrNumber, TargetError, TargetParams,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// prdoc-forge - author, check and submit prdoc PR metadata files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, global = true, env = config::env::PRDOC_CONFIG)]
    config: Option<PathBuf>,

    /// Schema file overriding the configured one.
    #[arg(short, long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a model and print the pre-filled "create new file" URL.
    Submit(SubmitArgs),

    /// Print the form derived from the schema.
    Form(FormArgs),

    /// Generate a skeleton prdoc file for a PR.
    Generate(GenerateArgs),

    /// Check prdoc files against the schema.
    Check(CheckArgs),

    /// List prdoc files in the configured folders.
    Scan(ScanArgs),

    /// Load all valid prdoc files and print them.
    Load(LoadArgs),
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// Organization or user owning the repository.
    #[arg(long)]
    org: Option<String>,

    /// Repository name.
    #[arg(long)]
    repo: Option<String>,

    /// Pull request number.
    #[arg(long)]
    pull: Option<PrNumber>,

    /// Branch the new file is proposed against.
    #[arg(long)]
    branch: Option<String>,

    /// Take org, repo, pull and branch from a shared link instead.
    #[arg(long, conflicts_with_all = ["org", "repo", "pull", "branch"])]
    from_url: Option<String>,

    /// Model file to submit. Reads stdin when absent.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct FormArgs {
    /// Print the form description as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// The PR number the file is for.
    #[arg(short, long)]
    number: PrNumber,

    /// Optional title slug for the file name.
    #[arg(short, long)]
    title: Option<String>,

    /// Print the skeleton instead of writing a file.
    #[arg(long)]
    dry_run: bool,

    /// Write somewhere other than the configured output folder.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Check one specific file.
    #[arg(short, long, conflicts_with = "number")]
    file: Option<PathBuf>,

    /// Check the file for a PR number. May be repeated.
    #[arg(short, long)]
    number: Vec<PrNumber>,

    /// Print the outcomes as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Also list files whose names do not follow the prdoc convention.
    #[arg(short, long)]
    all: bool,
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Load one specific file.
    #[arg(short, long, conflicts_with = "number")]
    file: Option<PathBuf>,

    /// Load the file for a PR number. May be repeated.
    #[arg(short, long)]
    number: Vec<PrNumber>,

    /// Print the loaded files as JSON instead of YAML.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Use compact formatting without module target paths for cleaner output
        .with(fmt::layer().compact().with_target(false))
        // Allow runtime log filtering via RUST_LOG env var (e.g., RUST_LOG=debug)
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // Register as the global default subscriber
        .init();
}

/// Main dispatch.
fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = ForgeConfig::load_or_default(cli.config.as_deref());

    // An explicit schema flag beats whatever the config points at.
    if let Some(schema) = cli.schema {
        config.schema = Some(schema);
    }

    match cli.command {
        Command::Submit(args) => cmd_submit(&config, &args),
        Command::Form(args) => cmd_form(&config, &args),
        Command::Generate(args) => cmd_generate(&config, args),
        Command::Check(args) => cmd_check(&config, &args),
        Command::Scan(args) => cmd_scan(&config, &args),
        Command::Load(args) => cmd_load(&config, &args),
    }
}

/// Validates the model and prints the pre-filled submission URL.
fn cmd_submit(
    config: &ForgeConfig,
    args: &SubmitArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Nothing happens until all four target parameters are present.
    let params = match resolve_params(args) {
        Ok(params) => params,
        Err(e @ TargetError::Missing { .. }) => {
            println!("{e}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    let text = read_model(args.model.as_deref())?;
    let model = yaml::parse(&text)?;

    let mut editor = Editor::new(config.schema()?)?.with_host(&config.host);
    let report = editor.update(model)?;

    if !report.is_empty() {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for violation in &report {
                println!("{violation}");
            }
        }
        return Ok(ExitCode::from(1));
    }

    let url = editor.submit(&params)?;

    if args.json {
        let out = json!({
            "url": url.as_str(),
            "filename": Editor::proposed_path(params.pull),
            "yaml": editor.yaml_text(),
            "target": params,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        // The canonical text first, the handoff URL as the last line.
        if let Some(yaml) = editor.yaml_text() {
            print!("{yaml}");
        }
        println!("{url}");
    }

    Ok(ExitCode::from(0))
}

fn resolve_params(args: &SubmitArgs) -> Result<TargetParams, TargetError> {
    match &args.from_url {
        Some(url) => TargetParams::from_url(url),
        None => TargetParams::resolve(
            args.org.clone(),
            args.repo.clone(),
            args.pull,
            args.branch.clone(),
        ),
    }
}

fn read_model(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => std::io::read_to_string(std::io::stdin()),
    }
}

/// Prints the form derived from the schema.
fn cmd_form(config: &ForgeConfig, args: &FormArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let schema = config.schema()?;
    let form = FormDescriptor::from_schema(&schema)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&form)?);
    } else {
        if let Some(title) = &form.title {
            println!("{title}");
        }
        print_fields(&form.fields, 1);
    }

    Ok(ExitCode::from(0))
}

fn print_fields(fields: &[FieldDescriptor], depth: usize) {
    let indent = "  ".repeat(depth);

    for field in fields {
        let required = if field.required { ", required" } else { "" };

        match &field.kind {
            FieldKind::Text => println!("{indent}{} [text{required}]", field.label),
            FieldKind::Number => println!("{indent}{} [number{required}]", field.label),
            FieldKind::Checkbox => println!("{indent}{} [checkbox{required}]", field.label),
            FieldKind::Select { options } => {
                let choices: Vec<String> = options
                    .iter()
                    .map(|option| match option.as_str() {
                        Some(text) => text.to_string(),
                        None => option.to_string(),
                    })
                    .collect();
                println!(
                    "{indent}{} [select{required}: {}]",
                    field.label,
                    choices.join(" | ")
                );
            }
            FieldKind::Group { fields } => {
                println!("{indent}{} [group{required}]", field.label);
                print_fields(fields, depth + 1);
            }
            FieldKind::List { item } => {
                println!("{indent}{} [list{required}]", field.label);
                print_fields(std::slice::from_ref(item.as_ref()), depth + 1);
            }
        }
    }
}

/// Renders the skeleton and writes it to the output folder.
fn cmd_generate(
    config: &ForgeConfig,
    args: GenerateArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let template = template::load_template(config.template.as_deref())?;
    let skeleton = template::render_skeleton(&template, args.number)?;

    if args.dry_run {
        println!("{skeleton}");
        return Ok(ExitCode::from(0));
    }

    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
    std::fs::create_dir_all(&output_dir)?;

    let name = DocFileName::new(args.number, args.title.as_deref());
    let path = output_dir.join(name.filename());

    if path.exists() {
        error!(path = %path.display(), "File already exists, not overwriting");
        return Ok(ExitCode::from(1));
    }

    std::fs::write(&path, skeleton)?;
    println!("{}", path.display());

    Ok(ExitCode::from(0))
}

/// Checks files against the schema and reports per-file outcomes.
fn cmd_check(
    config: &ForgeConfig,
    args: &CheckArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let validator = config.schema()?.compile()?;

    let outcomes: Vec<CheckOutcome> = if let Some(file) = &args.file {
        vec![DocFile::check(file, &validator)]
    } else if !args.number.is_empty() {
        args.number
            .iter()
            .map(|&number| match find_in_folders(number, &config.prdoc_folders) {
                Some(path) => DocFile::check(&path, &validator),
                None => CheckOutcome::Invalid {
                    path: PathBuf::from(DocFileName::from(number).filename()),
                    reasons: vec![format!(
                        "No prdoc found for PR #{number} in the configured folders"
                    )],
                },
            })
            .collect()
    } else {
        let mut outcomes = Vec::new();
        for dir in &config.prdoc_folders {
            match DocFile::check_dir(dir, &validator) {
                Ok(mut found) => outcomes.append(&mut found),
                Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping folder"),
            }
        }
        outcomes
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for outcome in &outcomes {
            match outcome {
                CheckOutcome::Ok { path } => println!("OK  {}", path.display()),
                CheckOutcome::BadFilename { path } => {
                    println!("ERR {} (unconventional file name)", path.display());
                }
                CheckOutcome::Invalid { path, reasons } => {
                    println!("ERR {}", path.display());
                    for reason in reasons {
                        println!("      {reason}");
                    }
                }
            }
        }
    }

    if outcomes.iter().all(CheckOutcome::passed) {
        Ok(ExitCode::from(0))
    } else {
        Ok(ExitCode::from(1))
    }
}

fn find_in_folders(number: PrNumber, folders: &[PathBuf]) -> Option<PathBuf> {
    folders
        .iter()
        .find_map(|dir| DocFileName::find(number, dir).ok())
}

/// Lists prdoc files in the configured folders.
fn cmd_scan(config: &ForgeConfig, args: &ScanArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    for dir in &config.prdoc_folders {
        match DocFile::find_in_dir(dir, !args.all) {
            Ok(files) => {
                for file in files {
                    println!("{}", file.display());
                }
            }
            Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping folder"),
        }
    }

    Ok(ExitCode::from(0))
}

/// Loads the selected prdoc files and prints the collection.
fn cmd_load(config: &ForgeConfig, args: &LoadArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let validator = config.schema()?.compile()?;

    let mut all_loaded = true;
    let mut docs: Vec<DocFile> = Vec::new();

    if let Some(file) = &args.file {
        match DocFile::load(file, &validator) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                warn!(error = %e, "Failed to load prdoc file");
                all_loaded = false;
            }
        }
    } else if !args.number.is_empty() {
        for &number in &args.number {
            let Some(path) = find_in_folders(number, &config.prdoc_folders) else {
                warn!(number, "No prdoc found in the configured folders");
                all_loaded = false;
                continue;
            };
            match DocFile::load(&path, &validator) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    warn!(error = %e, "Failed to load prdoc file");
                    all_loaded = false;
                }
            }
        }
    } else {
        for dir in &config.prdoc_folders {
            match DocFile::load_dir(dir, &validator) {
                Ok((loaded, mut found)) => {
                    all_loaded &= loaded;
                    docs.append(&mut found);
                }
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Skipping folder");
                    all_loaded = false;
                }
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
    } else {
        print!("{}", serde_yaml::to_string(&docs)?);
    }

    if all_loaded {
        Ok(ExitCode::from(0))
    } else {
        Ok(ExitCode::from(1))
    }
}
