use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::debug;

use benchload::app::run_load;
use benchload::args::{DEFAULT_CONFIG_FILES, LoadArgs, RunSettings};
use benchload::config::{apply_config, load_config};
use benchload::error::AppResult;

use crate::logger::init_logging;

pub(crate) fn run() -> AppResult<()> {
    execute().inspect_err(|err| {
        eprintln!("{}", err);
        if err.is_usage_error() {
            eprintln!("{}", LoadArgs::command().render_usage());
        }
    })
}

fn execute() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(());
    };

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    init_logging(args.verbose, args.no_color);

    let settings = RunSettings::from_args(&args)?;
    debug!(
        "Resolved settings: mode={} window={} timeout={:?}",
        settings.mode.as_str(),
        settings.window_size,
        settings.timeout
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_load(&settings))?;
    Ok(())
}

fn parse_args() -> AppResult<Option<(LoadArgs, ArgMatches)>> {
    let mut cmd = LoadArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = LoadArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
