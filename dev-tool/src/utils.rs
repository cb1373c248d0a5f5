use std::{
    fs::File,
    io::{stdout, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Error};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

pub(crate) fn progress_spin_until_done<R>(msg: &'static str, func: impl FnOnce() -> R) -> R {
    let progress_bar = ProgressBar::new_spinner()
        .with_style(ProgressStyle::default_bar().template("{msg}: {elapsed:>10} {spinner:.green}"));
    progress_bar.set_message(msg);
    progress_bar.enable_steady_tick(100);
    let res = func();
    progress_bar.finish();
    res
}

/// Writes the value as JSON to the file or to stdout if there is no file.
pub(crate) fn write_json(
    value: &impl Serialize,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), Error> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Creating output file {} failed.", path.display())
        })?)),
        None => Box::new(BufWriter::new(stdout())),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    }
    .context("Serializing the output failed.")?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
