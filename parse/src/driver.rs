use std::io::{BufRead, BufReader, Write};
use std::time::Instant;

use log::info;

use crate::{
    analyzer::analyze,
    error::{Error, Fatal},
    options::Options,
    stats::report,
};

/// Program text from `--source`, or stdin.
pub fn open_input(opts: &Options) -> Result<Box<dyn BufRead>, Fatal> {
    match &opts.source {
        Some(path) => {
            let file = std::fs::File::open(path).map_err(|e| Error::FileOpen(path.clone(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(std::io::stdin().lock())),
    }
}

/// Analyze `input`, write the statistics file if requested, then the XML to `out`.
///
/// Nothing reaches `out` unless the statistics were written.
pub fn run<R: BufRead, W: Write>(
    opts: &Options,
    input: R,
    out: &mut W,
    start: Instant,
) -> Result<(), Fatal> {
    let (program, stats) = analyze(input, opts.dialect)?;

    if let Some(path) = &opts.stats_file {
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        let text = report(&opts.keys, &stats, opts.fancy, elapsed);
        std::fs::write(path, text).map_err(|e| Error::StatsWrite(path.clone(), e))?;
        info!("statistics written to {}", path);
    }

    program
        .write_xml(out, opts.pretty)
        .and_then(|_| out.flush())
        .map_err(Error::OutputWrite)?;
    Ok(())
}
