use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Levels applied unless `RUST_LOG` names the same target
pub const DEFAULT_DIRECTIVES: [&str; 2] = ["fat_tail=info", "reqwest=warn"];

/// Defaults whose target `rust_log` does not already configure
///
/// A bare level such as `debug` sets every target, so no defaults apply.
pub fn default_directives(rust_log: Option<&str>) -> Vec<&'static str> {
    let entries: Vec<&str> = rust_log
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();

    if entries.iter().any(|d| d.parse::<LevelFilter>().is_ok()) {
        return Vec::new();
    }

    let configured: Vec<&str> = entries
        .iter()
        .map(|d| d.split(['=', '[']).next().unwrap_or_default())
        .collect();

    DEFAULT_DIRECTIVES
        .iter()
        .copied()
        .filter(|directive| {
            let target = directive.split('=').next().unwrap_or_default();
            !configured.contains(&target)
        })
        .collect()
}

/// `RUST_LOG` filter with the crate defaults layered on top
pub fn env_filter() -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    with_defaults(EnvFilter::from_default_env(), rust_log.as_deref())
}

fn with_defaults(mut filter: EnvFilter, rust_log: Option<&str>) -> EnvFilter {
    for directive in default_directives(rust_log) {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive '{}': {}", directive, e),
        }
    }
    filter
}
