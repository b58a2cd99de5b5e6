use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ferrum_tree::validation::{self, operation_outcome, ValidationIssue};
use ferrum_tree::{json, schema, ModelConfig, Node, Primitive, ValidationContext, Visitor};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fhir-tree", version, about = "Validate, walk and describe FHIR resource trees")]
struct Cli {
    /// Build nodes without semantic validation
    #[arg(long, global = true)]
    no_validation: bool,

    /// YAML model configuration
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse and validate a resource, printing an OperationOutcome
    Validate { file: PathBuf },
    /// Print the traversal of a resource
    Walk { file: PathBuf },
    /// Print the canonical JSON form of a resource
    Canonical {
        file: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Describe the fields of a node kind
    Describe { kind: String },
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => ModelConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ModelConfig::default(),
    }
    .with_env_overrides();
    if cli.no_validation {
        config.validation = false;
    }
    config.install();

    match cli.command {
        Command::Validate { file } => validate(&file),
        Command::Walk { file } => {
            let node = load(&file)?;
            let mut printer = TreePrinter::default();
            node.accept(&mut printer);
            Ok(ExitCode::SUCCESS)
        }
        Command::Canonical { file, pretty } => {
            let node = load(&file)?;
            let output = if pretty {
                serde_json::to_string_pretty(&node)?
            } else {
                serde_json::to_string(&node)?
            };
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Command::Describe { kind } => {
            describe(&kind)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn load(path: &Path) -> Result<Node> {
    let value = read_json(path)?;
    let node =
        json::parse(&value).with_context(|| format!("failed to load {}", path.display()))?;
    tracing::debug!(path = %path.display(), kind = node.kind_name(), "loaded resource");
    Ok(node)
}

fn validate(path: &Path) -> Result<ExitCode> {
    let value = read_json(path)?;

    let result = json::parse(&value).and_then(|node| {
        // Re-check the whole tree so advisory findings are reported too.
        let ctx = ValidationContext::current();
        if ctx.enabled {
            validation::validate_tree(&node, &ctx)
        } else {
            Ok(Vec::new())
        }
    });

    let (issues, code) = match result {
        Ok(issues) => (issues, ExitCode::SUCCESS),
        Err(e) => (vec![ValidationIssue::from_error(&e)], ExitCode::FAILURE),
    };

    println!("{}", serde_json::to_string_pretty(&operation_outcome(&issues))?);
    Ok(code)
}

fn describe(kind: &str) -> Result<()> {
    let kind = schema::standard().kind(kind)?;

    println!("{} ({:?})", kind.name(), kind.category());
    if let Some(description) = kind.description() {
        println!("  {}", description);
    }
    for field in kind.fields() {
        let mut line = format!(
            "  {:<28} {:<6} {}",
            field.name,
            field.cardinality.to_string(),
            field.type_names()
        );
        if !field.target_kinds.is_empty() {
            line.push_str(&format!(" -> {}", field.target_kinds.join(" | ")));
        }
        if let Some(binding) = &field.binding {
            line.push_str(&format!(" [{} {}]", binding.strength, binding.value_set));
        }
        println!("{}", line);
    }
    Ok(())
}

#[derive(Default)]
struct TreePrinter {
    depth: usize,
}

impl TreePrinter {
    fn label(name: &str, index: Option<usize>) -> String {
        match index {
            Some(i) => format!("{}[{}]", name, i),
            None => name.to_string(),
        }
    }
}

impl Visitor for TreePrinter {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &Node) {
        println!(
            "{}{} ({})",
            "  ".repeat(self.depth),
            Self::label(name, index),
            node.kind_name()
        );
        self.depth += 1;
    }

    fn visit_primitive(&mut self, name: &str, index: Option<usize>, value: &Primitive) {
        println!(
            "{}{} = {}",
            "  ".repeat(self.depth),
            Self::label(name, index),
            value
        );
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &Node) {
        self.depth = self.depth.saturating_sub(1);
    }
}
