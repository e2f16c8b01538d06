use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pulsemap_common::{OmKey, Real, init_tracer};
use pulsemap_restructure::{RestructuredPulses, SensorKey, restructure_value};
use serde::Serialize;
use serde_json::Value;
use std::{
    fmt::Display,
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info, level_filters::LevelFilter};

// cargo run --bin pulsemap-restructure -- --input event_pulses.json --key-kind om-key --pretty

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KeyKind {
    /// Sensor keys are kept as the strings they were written as
    Opaque,
    /// Sensor keys are parsed as `string,om[,pmt]`
    OmKey,
}

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// JSON pulse map to read, if absent the pulse map is read from stdin
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// File to write the restructured pulses to, if absent they are written to stdout
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// How sensor keys in the input are interpreted
    #[clap(long, env = "PULSEMAP_KEY_KIND", value_enum, default_value_t = KeyKind::Opaque)]
    key_kind: KeyKind,

    /// Indent the JSON output
    #[clap(long)]
    pretty: bool,
}

fn read_document(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Cannot read pulse map from {}", path.display())),
        None => {
            let mut document = String::new();
            io::stdin()
                .read_to_string(&mut document)
                .context("Cannot read pulse map from stdin")?;
            Ok(document)
        }
    }
}

fn write_document(output: Option<&Path>, document: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("Cannot write restructured pulses to {}", path.display())),
        None => writeln!(io::stdout().lock(), "{document}")
            .context("Cannot write restructured pulses to stdout"),
    }
}

fn render<K>(restructured: &RestructuredPulses<K, Real>, pretty: bool) -> Result<String>
where
    K: SensorKey + Serialize,
{
    let document = if pretty {
        serde_json::to_string_pretty(restructured)
    } else {
        serde_json::to_string(restructured)
    };
    document.context("Cannot serialise restructured pulses")
}

fn restructure_document<K>(value: &Value, pretty: bool) -> Result<String>
where
    K: SensorKey + FromStr + Serialize,
    K::Err: Display,
{
    let restructured = restructure_value::<K>(value)?;
    info!(
        "Restructured {0} pulses from {1} sensors",
        restructured.num_pulses(),
        restructured.num_sensors()
    );
    render(&restructured, pretty)
}

fn run(args: &Cli) -> Result<()> {
    let document = read_document(args.input.as_deref())?;
    debug!("Read {0} bytes", document.len());

    let value: Value = serde_json::from_str(&document).context("Pulse map is not valid JSON")?;

    let output = match args.key_kind {
        KeyKind::Opaque => restructure_document::<String>(&value, args.pretty)?,
        KeyKind::OmKey => restructure_document::<OmKey>(&value, args.pretty)?,
    };
    write_document(args.output.as_deref(), &output)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let tracer = init_tracer!(LevelFilter::INFO)?;
    debug!(
        "Log filter taken from {0}",
        if tracer.is_from_env() { "RUST_LOG" } else { "defaults" }
    );

    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_argument_has_help() {
        let command = Cli::command();
        for argument in command.get_arguments() {
            let id = argument.get_id().as_str();
            if id != "help" && id != "version" {
                assert!(argument.get_help().is_some(), "{id} has no help text");
            }
        }
    }

    #[test]
    fn cli_defaults() {
        let args = Cli::try_parse_from(["pulsemap-restructure"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn cli_parses_key_kind() {
        let args = Cli::try_parse_from([
            "pulsemap-restructure",
            "--input",
            "pulses.json",
            "--key-kind",
            "om-key",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("pulses.json")));
        assert_eq!(args.key_kind, KeyKind::OmKey);
        assert!(args.pretty);
    }

    #[test]
    fn cli_rejects_unknown_key_kind() {
        assert!(
            Cli::try_parse_from(["pulsemap-restructure", "--key-kind", "channel"]).is_err()
        );
    }

    #[test]
    fn document_with_om_keys() {
        let value = json!({
            "12,30,0": [{ "charge": 2.0, "time": 20.0 }, { "charge": 3.0, "time": 30.0 }],
            "12,31,0": [{ "charge": 4.0, "time": 40.0 }],
        });

        let output = restructure_document::<OmKey>(&value, false).unwrap();

        assert_eq!(
            output,
            concat!(
                r#"{"flat_charges":[2.0,3.0,4.0],"flat_times":[20.0,30.0,40.0],"#,
                r#""per_key_times":{"12,30,0":[20.0,30.0],"12,31,0":[40.0]},"#,
                r#""per_key_charges":{"12,30,0":[2.0,3.0],"12,31,0":[4.0]}}"#
            )
        );
    }

    #[test]
    fn document_shape_error_is_reported() {
        let error = restructure_document::<String>(&json!(7), false).unwrap_err();
        assert!(error.to_string().starts_with("Input Type Error"));
    }

    #[test]
    fn run_reads_and_writes_files() {
        let dir = std::env::temp_dir().join(format!("pulsemap-restructure-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("pulses.json");
        let output = dir.join("restructured.json");
        fs::write(&input, r#"{"A": [{"charge": 1.5, "time": 10.0}]}"#).unwrap();

        let args = Cli {
            input: Some(input),
            output: Some(output.clone()),
            key_kind: KeyKind::Opaque,
            pretty: true,
        };
        run(&args).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(
            written,
            json!({
                "flat_charges": [1.5],
                "flat_times": [10.0],
                "per_key_times": { "A": [10.0] },
                "per_key_charges": { "A": [1.5] },
            })
        );
    }
}
