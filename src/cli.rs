use crate::error::CliError;
use crate::perm::PermissionSet;
use getopts::Options;
use std::path::PathBuf;

/// Validated invocation. Built once, never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub paths: Vec<PathBuf>,
    pub target: PermissionSet,
    pub dry_run: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help(String),
    Run(Config),
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "print this help menu");
    opts.optmulti(
        "p",
        "path",
        "file / directory for which permissions will be set (repeatable)",
        "PATH",
    );
    opts.optopt(
        "m",
        "mode",
        "3 digit octal representation of permissions to set",
        "MODE",
    );
    opts.optflag(
        "n",
        "dry-run",
        "print actions which would occur without executing them",
    );
    opts.optflag("v", "verbose", "also log entries which need no change");
    opts
}

pub fn usage(program: &str) -> String {
    let brief = format!(
        "Usage: {} --mode MODE --path PATH [--path PATH...]",
        program
    );
    options().usage(&brief)
}

/// Parses `args` without the program name.
pub fn parse_args(program: &str, args: &[String]) -> Result<Invocation, CliError> {
    let matches = options().parse(args)?;

    if matches.opt_present("h") {
        return Ok(Invocation::Help(usage(program)));
    }

    if let Some(arg) = matches.free.first() {
        return Err(CliError::Unexpected(arg.clone()));
    }

    let target: PermissionSet = match matches.opt_str("m") {
        Some(m) => m.parse()?,
        None => return Err(CliError::MissingMode),
    };

    let paths: Vec<PathBuf> = matches
        .opt_strs("p")
        .into_iter()
        .map(PathBuf::from)
        .collect();
    if paths.is_empty() {
        return Err(CliError::MissingPath);
    }
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        return Err(CliError::NoSuchPath(missing.clone()));
    }

    Ok(Invocation::Run(Config {
        paths,
        target,
        dry_run: matches.opt_present("n"),
        verbose: matches.opt_present("v"),
    }))
}
