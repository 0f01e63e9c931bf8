use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser as _, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vcfg::{Config, Document, Node, Parser, Scope};

#[derive(Debug, clap::Parser)]
#[command(
    name = "vcfg",
    version,
    about = "Parse a vcfg file and print its outline or a single value"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Section to look the first key up in (defaults to the root section)
    #[arg(short, long)]
    section: Option<String>,
    /// Key path, one segment per flag: `-k server -k port`
    #[arg(short, long = "key", value_name = "KEY")]
    keys: Vec<String>,
    /// How to print the value
    #[arg(long = "as", value_enum, default_value_t = ValueType::String)]
    value_type: ValueType,
    /// Fail on malformed input instead of skipping it
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();

    let mut parser = Parser::with_config(Config::default().with_strict(args.strict));
    let document = match &args.input {
        Some(path) => parser
            .open(path)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        None => {
            parser.set_buffer(read_stdin()?);
            parser.parse().context("failed to parse stdin")?
        }
    };
    debug!(sections = document.sections().len(), "input parsed");

    let output = if args.keys.is_empty() {
        document.to_string()
    } else {
        let node = resolve(document, args.section.as_deref(), &args.keys)?;
        format!("{}\n", render(node, args.value_type)?)
    };

    io::stdout()
        .write_all(output.as_bytes())
        .context("failed to write stdout")?;
    Ok(())
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

/// Walk the key path: the first segment in the section, the rest in nodes
fn resolve<'a>(
    document: &'a Document,
    section: Option<&str>,
    keys: &[String],
) -> Result<&'a Node> {
    let Some((first, rest)) = keys.split_first() else {
        bail!("empty key path");
    };
    let mut node = document
        .get_node(Scope::from(section), first)
        .with_context(|| format!("cannot resolve {first}"))?;
    for key in rest {
        node = document
            .get_node(node, key)
            .with_context(|| format!("cannot resolve {key} under {}", node.name()))?;
    }
    Ok(node)
}

fn render(node: &Node, value_type: ValueType) -> Result<String> {
    let rendered = match value_type {
        ValueType::String => node.as_str()?.to_string(),
        ValueType::Int => node.as_int()?.to_string(),
        ValueType::Float => node.as_float()?.to_string(),
        ValueType::Bool => node.as_bool().to_string(),
    };
    Ok(rendered)
}
