use anyhow::Result;
use ensure_access::cli::{self, Invocation};
use ensure_access::{Chmod, Enforcer, LogReport, Tree};
use env_logger::Env;
use log::error;
use std::env;
use std::process;

fn logger_builder(verbose: bool) -> env_logger::Builder {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ensure-access");

    let config = match cli::parse_args(program, args.get(1..).unwrap_or(&[])) {
        Ok(Invocation::Help(usage)) => {
            print!("{}", usage);
            process::exit(0);
        }
        Ok(Invocation::Run(config)) => config,
        Err(why) => {
            logger_builder(false).try_init()?;
            error!("{}", why);
            eprint!("{}", cli::usage(program));
            process::exit(1);
        }
    };

    logger_builder(config.verbose).try_init()?;

    let mut enforcer = Enforcer::new(config.target, config.dry_run, Tree, Chmod, LogReport);
    let summary = enforcer.run(&config.paths);

    for why in &summary.failures {
        error!("{}", why);
    }

    if !summary.is_success() {
        process::exit(1);
    }

    Ok(())
}
