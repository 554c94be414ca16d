use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use spdlog::{error, info, warn};

use wp2md::logger::configure_logger;
use wp2md::pipeline::run;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "wp2md.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// WordPress export file [default: export.xml]
    #[arg(long = "inputfile")]
    input_file: Option<PathBuf>,

    /// Directory where the posts are written [default: output]
    #[arg(long = "outputdir")]
    output_dir: Option<PathBuf>,

    /// Config path
    #[arg(short, long)]
    config_path: Option<PathBuf>,
}

const VALUE_OPTIONS: [&str; 4] = ["--inputfile", "--outputdir", "--config-path", "-c"];
const FLAG_OPTIONS: [&str; 4] = ["--help", "-h", "--version", "-V"];

/// Keeps the program name and the options wp2md knows, with their values.
/// Anything else is dropped so an unknown option never hides the ones after it.
fn known_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut args = args.into_iter();
    let mut known: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let arg_str = arg.to_string_lossy().into_owned();
        if FLAG_OPTIONS.contains(&arg_str.as_str()) {
            known.push(arg);
        } else if VALUE_OPTIONS.contains(&arg_str.as_str()) {
            if let Some(value) = args.next() {
                known.push(arg);
                known.push(value);
            }
        } else if VALUE_OPTIONS.iter().any(|opt| opt.starts_with("--") && arg_str.starts_with(&format!("{}=", opt))) {
            known.push(arg);
        }
    }

    known
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse_from(known_args(env::args_os()));

    let config = match open_config(args.config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run wp2md --help");
            bail!("Invalid configuration");
        }
    };
    let config = config.with_overrides(args.input_file, args.output_dir);

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Converting {} into {}", config.input_file.display(), config.output_dir.display());

    let summary = match run(&config).await {
        Ok(summary) => summary,
        Err(err) => {
            error!("{:#}", err);
            return Err(err);
        }
    };

    info!("Done. posts={}, written={}, images={}, images_with_bad_status={}, orphaned_images={}",
        summary.posts,
        summary.documents_written,
        summary.images_downloaded,
        summary.images_with_bad_status,
        summary.orphaned_images
    );

    if !summary.failures.is_empty() {
        for failure in &summary.failures {
            error!("Failed: post={} - {}", failure.post, failure.error);
        }
        bail!("{} files could not be written", summary.failures.len());
    }

    Ok(())
}
