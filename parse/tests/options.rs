use ippcparse::{Error, ErrorKind, Fatal, Options, StatKey};
use isa::Dialect;

fn parse(line: &str) -> Result<Options, Error> {
    let argv = std::iter::once("ippcparse").chain(line.split_whitespace());
    Options::parse_from(argv)
}

fn keys(line: &str, expects: Vec<StatKey>) {
    let opts = parse(line).unwrap_or_else(|e| panic!("{}: {}", line, e));
    assert_eq!(opts.keys, expects, "{}", line);
}

fn param_error(line: &str) {
    let err = parse(line).expect_err(line);
    println!("{}", err);
    assert_eq!(Fatal::from(err).kind(), ErrorKind::Param, "{}", line);
}

macro_rules! case {
    ($name:ident, $line:expr, $expects:expr) => {
        #[test]
        fn $name() {
            #[allow(unused_imports)]
            use StatKey::*;
            keys($line, $expects);
        }
    };
}

case!(no_arguments, "", vec![]);
case!(stats_alone, "--stats=out.txt", vec![]);
case!(
    ordered,
    "--stats=out --eol --loc --frequent --comments",
    vec![Eol, Loc, Frequent, Comments]
);
case!(
    repeated_and_print,
    "--stats out --loc --print=a --loc --print b --jumps",
    vec![Loc, Print("a".into()), Loc, Print("b".into()), Jumps]
);
case!(
    every_jump_flag,
    "--stats=s --jumps --fwjumps --backjumps --badjumps --labels",
    vec![Jumps, FwJumps, BackJumps, BadJumps, Labels]
);
case!(
    mixed_with_settings,
    "--fancy --stats=s --loc --pretty --eol",
    vec![Loc, Eol]
);

#[test]
fn parameter_errors() {
    param_error("--loc");
    param_error("--loc --stats=out");
    param_error("--stats=a --stats=b");
    param_error("--stats=");
    param_error("--stats");
    param_error("--print");
    param_error("--unknown");
    param_error("--loc=3 --stats=out");
    param_error("positional");
}

#[test]
fn stats_not_first_names_the_flag() {
    match parse("--comments --stats=out") {
        Err(Error::StatsNotFirst(flag)) => assert_eq!(flag, "comments"),
        other => panic!("{:?}", other),
    }
    assert!(matches!(parse("--stats="), Err(Error::MissingStatsFile)));
    assert!(matches!(parse("--stats=a --stats=a"), Err(Error::DuplicateStats)));
}

#[test]
fn help_and_version() {
    for line in ["--help", "--version"] {
        match parse(line) {
            Err(Error::Cli(e)) => assert!(!e.use_stderr()),
            other => panic!("{:?}", other),
        }
    }
}

#[test]
fn switches() {
    let opts = parse("--stats=s.txt --loc --legacy --fancy --source=prog.ippc").unwrap();
    assert_eq!(opts.stats_file.as_deref(), Some("s.txt"));
    assert_eq!(opts.dialect, Dialect::Legacy);
    assert!(opts.fancy);
    assert!(!opts.pretty);
    assert_eq!(opts.source.as_deref(), Some("prog.ippc"));

    let opts = parse("").unwrap();
    assert_eq!(opts.stats_file, None);
    assert_eq!(opts.dialect, Dialect::Extended);
}

#[test]
fn config_file() {
    let path = std::env::temp_dir().join(format!("ippcparse-{}.yaml", std::process::id()));
    std::fs::write(&path, "dialect: legacy\npretty: true\n").unwrap();
    let opts = parse(&format!("--config={} --fancy", path.display())).unwrap();
    assert_eq!(opts.dialect, Dialect::Legacy);
    assert!(opts.pretty);
    assert!(opts.fancy);

    std::fs::write(&path, "pretty: [").unwrap();
    param_error(&format!("--config={}", path.display()));
    std::fs::remove_file(&path).unwrap();

    let err = parse("--config=/nonexistent/ippcparse.yaml").unwrap_err();
    assert_eq!(Fatal::from(err).kind(), ErrorKind::NoEntry);
}

#[test]
fn many_repeats_keep_every_key() {
    let line = format!("--stats=s {}", "--loc ".repeat(300));
    let opts = parse(&line).unwrap();
    assert_eq!(opts.keys.len(), 300);
    assert!(opts.keys.iter().all(|key| *key == StatKey::Loc));
}

#[test]
fn legacy_flag_overrides_config() {
    let path = std::env::temp_dir().join(format!("ippcparse-ext-{}.yaml", std::process::id()));
    std::fs::write(&path, "dialect: extended\n").unwrap();
    let opts = parse(&format!("--config={} --legacy", path.display())).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(opts.dialect, Dialect::Legacy);
}
