//! What the binary does once arguments and config are loaded.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};

use tracing::info;

use crate::cli::Args;
use crate::config::Config;
use crate::review::{review_data, AttemptRecord};
use crate::runtime::{data_model_from_json, DataModel, ScormApi};
use crate::script;
use crate::Result;

/// Initial data for the session: `--data`, `--attempt`, or empty.
pub fn seed_data(args: &Args) -> Result<DataModel> {
    if let Some(ref path) = args.data {
        return data_model_from_json(&std::fs::read_to_string(path)?);
    }
    if let Some(ref path) = args.attempt {
        return review_data(&AttemptRecord::from_file(path)?);
    }
    Ok(DataModel::new())
}

/// Seed a session, replay the script and write the transcript to `out`.
///
/// The script comes from `args.script`, or from `stdin` when no path is
/// given. With `--dump` the final data follows as pretty JSON, keys sorted.
pub fn run<R: Read, W: Write>(args: &Args, config: &Config, stdin: R, mut out: W) -> Result<()> {
    let data = seed_data(args)?;
    let calls = match args.script {
        Some(ref path) => script::read_script(File::open(path)?)?,
        None => script::read_script(stdin)?,
    };

    let mut api = ScormApi::with_guard(data, config.runtime.terminate_guard);
    info!(session = %api.id(), calls = calls.len(), "replaying script");

    for entry in script::replay(&mut api, &calls) {
        if args.json {
            serde_json::to_writer(&mut out, &entry.record())?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", entry)?;
        }
    }

    info!(session = %api.id(), phase = %api.phase(), "script finished");

    if args.dump {
        let data: BTreeMap<_, _> = api.into_data().into_iter().collect();
        serde_json::to_writer_pretty(&mut out, &data)?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}
