use std::time::Instant;

use ippcparse::{open_input, run, Error, Fatal, Options};

fn main() {
    env_logger::init();
    let start = Instant::now();

    let opts = match Options::parse_from(std::env::args()) {
        Ok(opts) => opts,
        // --help and --version
        Err(Error::Cli(e)) if !e.use_stderr() => e.exit(),
        Err(e) => exit(Fatal::from(e), false),
    };

    let stdout = std::io::stdout();
    let result = open_input(&opts).and_then(|input| run(&opts, input, &mut stdout.lock(), start));
    if let Err(fatal) = result {
        exit(fatal, opts.fancy);
    }
}

fn exit(fatal: Fatal, fancy: bool) -> ! {
    fatal.print_diag(fancy);
    std::process::exit(fatal.exit_code())
}
