use anyhow::{Context, Result};
use clap::{App, Arg};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use sol2tact::response::{self, TranspileRequest};
use sol2tact::{parser, transpiler};

fn main() -> Result<()> {
    let matches = App::new("sol2tact")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Solidity to Tact Transpiler")
        .about("Converts Solidity smart contracts to Tact")
        .arg(
            Arg::with_name("INPUT")
                .help("Input Solidity file, or - to read stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("PATH")
                .help("Output directory, or a .tact file path")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Read INPUT as a {\"code\": ...} request and print the JSON response"),
        )
        .arg(
            Arg::with_name("model")
                .long("model")
                .help("Print the extracted contract model as JSON")
                .conflicts_with("json"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Enable debug logging"),
        )
        .get_matches();

    init_tracing(matches.is_present("verbose"));

    let input = matches.value_of("INPUT").context("INPUT is required")?;
    let source = read_input(input)?;

    if matches.is_present("json") {
        let request: TranspileRequest = serde_json::from_str(&source)
            .with_context(|| format!("Failed to read transpile request from {}", input))?;
        let response = response::handle(&request);
        println!("{}", serde_json::to_string_pretty(&response)?);
        if !response.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Extract the structural model
    let model = parser::parse(&source).with_context(|| "Failed to parse Solidity code")?;

    if matches.is_present("model") {
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    let contract_name = model.name.clone();
    let tact_code = transpiler::emit(model);

    match matches.value_of("output") {
        Some(output) => {
            let output_file = output_path(Path::new(output), &contract_name)?;
            fs::write(&output_file, tact_code)
                .with_context(|| format!("Failed to write output file: {}", output_file.display()))?;
            println!(
                "Successfully converted {} to {}",
                contract_name,
                output_file.display()
            );
        }
        None => print!("{}", tact_code),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "sol2tact=debug" } else { "sol2tact=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
}

/// A `.tact` path is used as given; anything else is a directory that
/// receives `<contract name>.tact`.
fn output_path(output: &Path, contract_name: &str) -> Result<PathBuf> {
    if output.extension().map_or(false, |ext| ext == "tact") {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        return Ok(output.to_path_buf());
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create directory: {}", output.display()))?;
    Ok(output.join(format!("{}.tact", contract_name.to_lowercase())))
}
