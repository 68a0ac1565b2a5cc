use log::LevelFilter;

/// Initializes `env_logger`. `RUST_LOG` still overrides the chosen level.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(get_log_level(verbose))
        .parse_default_env()
        .init();
}

pub fn get_log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}
