use anyhow::Context;
use clap::{Parser, Subcommand};
use doc_columns::engine::core::decode::ColumnDecoder;
use doc_columns::engine::core::read::projection::ProjectionEngine;
use doc_columns::{ColumnSet, DecodeError, logging};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use tracing::info;

#[derive(Parser)]
#[command(name = "doc_columns")]
#[command(about = "Encode JSON documents into path columns and read them back", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a document (or one document per line with --lines) into columns
    Encode {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Treat every non-empty input line as its own document
        #[arg(long)]
        lines: bool,
    },

    /// Decode a single column into the sub-document it describes
    Decode {
        #[arg(short, long)]
        path: String,

        /// Column values as a JSON array
        #[arg(short, long)]
        values: String,

        #[arg(short, long, default_value = "")]
        arr_info: String,
    },

    /// Answer an inclusion projection from encoded columns
    Project {
        #[arg(short, long)]
        path: String,

        /// Column set JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Input is a plain document; encode it first
        #[arg(long)]
        from_document: bool,
    },

    /// Rebuild the whole document from encoded columns
    Reconstruct {
        /// Column set JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {input}"))
    }
}

fn read_columns(input: &str) -> anyhow::Result<ColumnSet> {
    let raw = read_input(input)?;
    serde_json::from_str(&raw).with_context(|| format!("parsing column set from {input}"))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the caret report before handing the error to anyhow.
fn reported(err: DecodeError) -> anyhow::Error {
    eprintln!("{}", err.report());
    err.into()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    match args.command {
        Command::Encode { input, lines } => {
            let raw = read_input(&input)?;
            if lines {
                let documents = raw
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(serde_json::from_str::<Value>)
                    .collect::<Result<Vec<_>, _>>()
                    .context("parsing input documents")?;
                info!(documents = documents.len(), "Encoding document batch");
                let encoded = doc_columns::encode_many(&documents)
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()?;
                print_json(&encoded)?;
            } else {
                let document: Value =
                    serde_json::from_str(&raw).context("parsing input document")?;
                print_json(&doc_columns::encode(&document)?)?;
            }
        }
        Command::Decode {
            path,
            values,
            arr_info,
        } => {
            let values: Vec<Value> =
                serde_json::from_str(&values).context("values must be a JSON array")?;
            let decoded = ColumnDecoder::default()
                .decode(&path, &values, &arr_info)
                .map_err(reported)?;
            print_json(&decoded)?;
        }
        Command::Project {
            path,
            input,
            from_document,
        } => {
            let columns = if from_document {
                let document: Value = serde_json::from_str(&read_input(&input)?)
                    .context("parsing input document")?;
                doc_columns::encode(&document)?
            } else {
                read_columns(&input)?
            };
            let outcome = ProjectionEngine::new(&columns)
                .answer(&path)
                .map_err(reported)?;
            print_json(&outcome)?;
        }
        Command::Reconstruct { input } => {
            let columns = read_columns(&input)?;
            let document = ColumnDecoder::default()
                .reconstruct(&columns)
                .map_err(reported)?;
            print_json(&document)?;
        }
    }

    Ok(())
}
