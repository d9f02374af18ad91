//! Substrate entry point
//!
//! Usage: `substrate [run.json]`
//!
//! The run file holds `seed`, an optional `palette` of `#rrggbb` strings, and
//! any `SimConfig` fields. Everything is optional. Draw calls are tallied, not
//! rasterized; plug a real `DrawingContext` in to produce an image.

use std::process::ExitCode;

use serde::{Deserialize, Serialize};

use substrate::{
    Color, CountingContext, Palette, RunSummary, SimConfig, SubstrateResult, run_with_config,
};

/// Earth tones used when the run file has no palette
const DEFAULT_PALETTE: [Color; 8] = [
    Color::rgb(0x3a, 0x24, 0x1d),
    Color::rgb(0x6b, 0x4a, 0x2f),
    Color::rgb(0x9c, 0x6b, 0x3c),
    Color::rgb(0xc8, 0x9b, 0x5e),
    Color::rgb(0xe2, 0xc9, 0x96),
    Color::rgb(0x5a, 0x6e, 0x6c),
    Color::rgb(0x8a, 0x9a, 0x86),
    Color::rgb(0xb3, 0x3c, 0x26),
];

#[derive(Debug, Default, Deserialize)]
struct RunFile {
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    palette: Option<Palette>,
    #[serde(flatten)]
    config: SimConfig,
}

#[derive(Debug, Serialize)]
struct Report {
    summary: RunSummary,
    draw_calls: CountingContext,
}

fn load_run_file(path: Option<String>) -> SubstrateResult<RunFile> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let run: RunFile = serde_json::from_str(&json)?;
            log::info!("Loaded run file {path}");
            Ok(run)
        }
        None => Ok(RunFile::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let run = match load_run_file(std::env::args().nth(1)) {
        Ok(run) => run,
        Err(e) => {
            log::error!("Unable to load run file: {e}");
            return ExitCode::FAILURE;
        }
    };

    let palette = match run.palette {
        Some(palette) => palette,
        None => match Palette::new(DEFAULT_PALETTE.to_vec()) {
            Ok(palette) => palette,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut ctx = CountingContext::default();
    let summary = match run_with_config(&run.config, &palette, run.seed, &mut ctx) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Run rejected: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = Report {
        summary,
        draw_calls: ctx,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Unable to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}
