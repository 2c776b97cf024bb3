/*
This code is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT
*/

use log::{error, LevelFilter};
use shapefile_reader::configs::get_configs;
use shapefile_reader::{Result, ShapeFile};
use std::env;
use std::process;

#[derive(Copy, Clone, Debug, PartialEq)]
enum OutputFormat {
    Summary,
    Csv,
    Json,
}

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            1
        }
    };
    process::exit(code);
}

fn run() -> Result<()> {
    let mut input_file = String::new();
    let mut format = OutputFormat::Summary;
    let mut verbose = false;
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        help();
        return Ok(());
    }
    for arg in args {
        if arg == "-h" || arg == "--help" {
            help();
            return Ok(());
        } else if arg == "--version" {
            version();
            return Ok(());
        } else if arg == "--license" || arg == "--licence" {
            license();
            return Ok(());
        } else if let Some(v) = flag_value(&arg, &["--input", "-i"]) {
            input_file = v;
        } else if arg == "--csv" {
            format = OutputFormat::Csv;
        } else if arg == "--json" {
            format = OutputFormat::Json;
        } else if arg == "-v" || arg == "--verbose" {
            verbose = true;
        } else if !arg.starts_with("-") && input_file.is_empty() {
            input_file = arg;
        }
    }

    let configs = get_configs()?;

    let mut log_builder = env_logger::Builder::new();
    if verbose || configs.verbose_mode {
        log_builder.filter_level(LevelFilter::Debug);
    } else {
        log_builder.filter_level(LevelFilter::Warn);
    }
    if let Ok(filter) = env::var("RUST_LOG") {
        log_builder.parse_filters(&filter);
    }
    log_builder.init();

    if input_file.is_empty() {
        help();
        return Ok(());
    }

    let result = ShapeFile::read_with_configs(&input_file, &configs)?;
    match format {
        OutputFormat::Csv => println!("{}", result.dump_feature_info()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Summary => {
            let bb = result.bounding_box;
            let center = result.header_bounds_center();
            println!("File: {}", input_file);
            println!(
                "Shape type: {} ({})",
                shapefile_reader::vector::shape_type_name(result.shape_type),
                result.shape_type
            );
            println!("Features: {}", result.num_features());
            println!(
                "Bounds: x {} to {}, y {} to {}",
                bb.min_x, bb.max_x, bb.min_y, bb.max_y
            );
            println!("Center: {}", center);
            if let Some((z_min, z_max)) = result.z_range {
                println!("Z range: {} to {}", z_min, z_max);
            }
            if let Some((m_min, m_max)) = result.m_range {
                println!("M range: {} to {}", m_min, m_max);
            }
        }
    }

    Ok(())
}

/// Returns the value of a `--flag=value` style argument when `arg` starts with
/// one of `flags`. Only the flag itself and surrounding quotes are removed.
fn flag_value(arg: &str, flags: &[&str]) -> Option<String> {
    let rest = flags.iter().find_map(|f| arg.strip_prefix(f))?;
    if !rest.is_empty() && !rest.starts_with('=') {
        return None;
    }
    let v = rest.strip_prefix('=').unwrap_or(rest);
    Some(v.trim_matches(|c| c == '"' || c == '\'').to_string())
}

fn help() {
    let s = "shp_dump Help

Reads an ESRI Shapefile (.shp) and its attribute table (.dbf).

The following commands are recognized:
-i, --input      Input .shp file; the .dbf with the same stem is read alongside.
--csv            Prints the feature attributes as comma-delimited text.
--json           Prints the decoded features as JSON.
-v, --verbose    Logs per-record detail.
-h, --help       Prints help information.
--license        Prints the license.
--version        Prints the version.

Settings are read from settings.json in the working directory, if present.

Example Usage:
>> shp_dump -i=roads.shp --csv
";
    println!("{}", s);
}

fn license() {
    let license_text = "shapefile_reader License

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
associated documentation files (the \"Software\"), to deal in the Software without restriction,
including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense,
and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so,
subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial
portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES
OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.";
    println!("{}", license_text);
}

fn version() {
    const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
    println!("shp_dump v{}", VERSION.unwrap_or("unknown"));
}
