//! CLI: check documents against a built-in schema, print its storage
//! definition, or list what is available.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use json_shape::catalog::{self, Entry};
use json_shape::storage::storage_definition;
use json_shape::{Outcome, Schema, validate_batch};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate JSON documents against built-in record schemas
#[derive(Parser, Debug)]
#[command(name = "json-shape", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate every input document and report all violations
    Check(CheckCmd),
    /// print the document-store definition of a schema
    Storage(StorageCmd),
    /// list the built-in schemas
    Schemas,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Parser, Debug)]
struct CheckCmd {
    /// built-in schema name (see `schemas`)
    #[arg(long)]
    schema: String,

    #[command(flatten)]
    input_settings: InputSettings,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(clap::Parser, Debug)]
struct StorageCmd {
    /// built-in schema name (see `schemas`)
    #[arg(long)]
    schema: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Loaded input documents. `sources[i]` says where `values[i]` came from.
#[derive(Debug, Default)]
struct Documents {
    sources: Vec<String>,
    values: Vec<Value>,
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    valid: bool,
    #[serde(flatten)]
    outcome: &'a Outcome,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Documents> {
        let mut documents = Documents::default();
        for source_path in resolve_file_path_patterns(&self.input)? {
            let source_path_str = source_path.display().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file: {source_path_str}"))?;

            if self.ndjson {
                for (index, line) in source.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let label = format!("{source_path_str}:{}", index + 1);
                    let value = serde_json::from_str::<Value>(line)
                        .with_context(|| format!("failed to parse NDJSON line ({label})"))?;
                    self.select(&mut documents, label, value)?;
                }
            } else {
                let value = serde_json::from_str::<Value>(&source).with_context(|| {
                    format!("failed to parse JSON source file ({source_path_str})")
                })?;
                self.select(&mut documents, source_path_str, value)?;
            }
        }
        debug!(count = documents.values.len(), "loaded input documents");
        Ok(documents)
    }

    fn select(&self, documents: &mut Documents, source: String, mut value: Value) -> Result<()> {
        match self.json_pointer.as_deref() {
            None => {
                documents.sources.push(source);
                documents.values.push(value);
            }
            Some(pointer) => {
                let selected = value
                    .pointer_mut(pointer)
                    .map(Value::take)
                    .ok_or_else(|| anyhow!("json pointer {pointer} selects nothing in {source}"))?;
                documents.sources.push(format!("{source}#{pointer}"));
                documents.values.push(selected);
            }
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Process exit code on success: 0 when everything checked out, 1 when
    /// any document had violations.
    pub fn run(&self) -> Result<u8> {
        match &self.cmd {
            Command::Check(target) => target.run(),
            Command::Storage(target) => target.run(),
            Command::Schemas => {
                for entry in catalog::entries() {
                    println!("{:<16} {}", entry.name.bold(), entry.description);
                }
                Ok(0)
            }
        }
    }
}

impl CheckCmd {
    fn run(&self) -> Result<u8> {
        let entry = lookup(&self.schema)?;
        let schema = entry
            .build()
            .with_context(|| format!("building schema {}", entry.name))?;
        let schema = Schema::FieldSet(schema);

        let documents = self.input_settings.load()?;
        let outcomes = validate_batch(&schema, &documents.values);

        let invalid = outcomes.iter().filter(|o| !o.is_valid()).count();
        match self.format {
            OutputFormat::Text => print_text(&documents.sources, &outcomes),
            OutputFormat::Json => {
                let reports: Vec<Report> = documents
                    .sources
                    .iter()
                    .zip(&outcomes)
                    .map(|(source, outcome)| Report {
                        source: source.as_str(),
                        valid: outcome.is_valid(),
                        outcome,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        }
        debug!(checked = outcomes.len(), invalid, "check finished");
        Ok(if invalid == 0 { 0 } else { 1 })
    }
}

impl StorageCmd {
    fn run(&self) -> Result<u8> {
        let entry = lookup(&self.schema)?;
        let schema = entry.build().with_context(|| format!("building schema {}", entry.name))?;
        let definition = storage_definition(&schema)
            .with_context(|| format!("schema {} cannot be stored", entry.name))?;
        let definition_src = serde_json::to_string_pretty(&definition)?;
        match self.out.as_ref() {
            Some(out) => write_output(out, &definition_src)?,
            None => println!("{definition_src}"),
        }
        Ok(0)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn lookup(name: &str) -> Result<&'static Entry> {
    catalog::find(name).ok_or_else(|| {
        let known: Vec<&str> = catalog::entries().iter().map(|e| e.name).collect();
        anyhow!("unknown schema {name:?} (known: {})", known.join(", "))
    })
}

fn print_text(sources: &[String], outcomes: &[Outcome]) {
    for (source, outcome) in sources.iter().zip(outcomes) {
        if outcome.is_valid() {
            println!("{} {}", "ok".green().bold(), source);
            continue;
        }
        println!("{} {}", "invalid".red().bold(), source);
        for result in outcome.invalid_results() {
            println!("  {} {}", result.kind.to_string().yellow(), result.message);
        }
    }
    let invalid = outcomes.iter().filter(|o| !o.is_valid()).count();
    let summary = format!("{} document(s) checked, {invalid} invalid", outcomes.len());
    if invalid == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

fn write_output(out: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("writing {}", out.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            let entries =
                glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
            for entry in entries {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
