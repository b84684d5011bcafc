use anyhow::{anyhow, Result};
use binpacker_algorithms::Binpacker;
use binpacker_challenges::bin_packing::Challenge;
use binpacker_structs::{
    config::{GenerateSettings, PackerConfig},
    core::{PackingReport, WeightedUnit},
};
use binpacker_utils::{compress_obj, decompress_obj, dejsonify, jsonify, jsonify_pretty};
use clap::{arg, ArgAction, ArgMatches, Command};
use log::info;
use serde::de::DeserializeOwned;
use std::{fs, io::Read, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("binpacker")
        .about("Packs weighted units into the fewest fixed-capacity bins")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("pack")
                .about("Packs units once and prints the bins")
                .arg(
                    arg!(<CONFIG> "Packer config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<UNITS> "Units json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the packing report will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress "If output file is set, the report will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Packs units, then repeatedly adds a new unit and repacks")
                .arg(
                    arg!(<CONFIG> "Packer config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<UNITS> "Units json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--rounds [ROUNDS] "Number of arrival rounds after the initial packing")
                        .default_value("5")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"arrival-weight" [WEIGHT] "Weight of the unit arriving each round")
                        .default_value("2")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random instance and prints its units")
                .arg(
                    arg!(<SETTINGS> "Generate settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<RAND_HASH> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<NONCE> "Nonce value").value_parser(clap::value_parser!(u64))),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a packing report against a generated instance")
                .arg(
                    arg!(<SETTINGS> "Generate settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<RAND_HASH> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<NONCE> "Nonce value").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(<REPORT> "Report json string, path to json or zlib file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    init_logging();
    let matches = cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("pack", sub_m)) => pack(
            required::<String>(sub_m, "CONFIG")?,
            required::<String>(sub_m, "UNITS")?,
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_flag("compress"),
        ),
        Some(("simulate", sub_m)) => simulate(
            required::<String>(sub_m, "CONFIG")?,
            required::<String>(sub_m, "UNITS")?,
            required::<usize>(sub_m, "rounds")?,
            required::<u32>(sub_m, "arrival-weight")?,
        ),
        Some(("generate", sub_m)) => generate(
            required::<String>(sub_m, "SETTINGS")?,
            required::<String>(sub_m, "RAND_HASH")?,
            required::<u64>(sub_m, "NONCE")?,
        ),
        Some(("verify", sub_m)) => verify(
            required::<String>(sub_m, "SETTINGS")?,
            required::<String>(sub_m, "RAND_HASH")?,
            required::<u64>(sub_m, "NONCE")?,
            required::<String>(sub_m, "REPORT")?,
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    }
}

fn required<T>(matches: &ArgMatches, id: &str) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow!("Missing argument '{}'", id))
}

pub fn pack(
    config: String,
    units: String,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<()> {
    let mut packer = load_packer(&config, &units)?;
    packer.pack_items()?;
    let report = packer.report();
    print_bins(&report);

    if let Some(path) = output_file {
        if compress {
            fs::write(&path, compress_obj(&report)?)?;
        } else {
            fs::write(&path, jsonify(&report)?)?;
        }
        info!("Saved report to {}", path.display());
    }
    Ok(())
}

pub fn simulate(config: String, units: String, rounds: usize, arrival_weight: u32) -> Result<()> {
    let mut packer = load_packer(&config, &units)?;
    for round in 0..=rounds {
        packer.pack_items()?;
        print_bins(&packer.report());
        println!("----------------------------------");
        if round < rounds {
            packer.push_pending(WeightedUnit::new(format!("Z{}", round), arrival_weight))?;
        }
    }
    Ok(())
}

pub fn generate(settings: String, rand_hash: String, nonce: u64) -> Result<()> {
    let challenge = load_challenge(&settings, &rand_hash, nonce)?;
    println!("{}", jsonify_pretty(&challenge.units)?);
    Ok(())
}

pub fn verify(settings: String, rand_hash: String, nonce: u64, report: String) -> Result<()> {
    let challenge = load_challenge(&settings, &rand_hash, nonce)?;
    let report: PackingReport = if report.ends_with(".zlib") {
        decompress_obj(&fs::read(&report)?)?
    } else {
        load_json(&report)?
    };

    match challenge.evaluate_solution(&report) {
        Ok(quality) => {
            println!("Report is valid");
            println!(
                "Bins: {} (lower bound {}, baseline {}), quality: {}",
                report.num_bins(),
                challenge.lower_bound(),
                challenge.compute_baseline().num_bins(),
                quality
            );
            Ok(())
        }
        Err(e) => Err(anyhow!("Invalid report: {}", e)),
    }
}

fn print_bins(report: &PackingReport) {
    for (i, bin) in report.bins.iter().enumerate() {
        println!("{}", bin.render(i));
    }
}

fn load_packer(config: &str, units: &str) -> Result<Binpacker> {
    let config: PackerConfig = load_json(config)?;
    let units: Vec<WeightedUnit> = load_json(units)?;
    let mut packer = Binpacker::from_config(&config)?;
    packer.set_pending(units)?;
    Ok(packer)
}

fn load_challenge(settings: &str, rand_hash: &str, nonce: u64) -> Result<Challenge> {
    let settings: GenerateSettings = load_json(settings)?;
    let seed = settings.calc_seed(rand_hash, nonce)?;
    Challenge::generate_instance(&seed, &settings)
}

/// Reads `input` as stdin (`-`), a `.json` file, or a literal json string.
fn load_json<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let json = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        buffer
    } else if input.ends_with(".json") {
        fs::read_to_string(input).map_err(|e| anyhow!("Failed to read file {}: {}", input, e))?
    } else {
        input.to_string()
    };

    dejsonify::<T>(&json).map_err(|e| anyhow!("Failed to parse {}: {}", input, e))
}
