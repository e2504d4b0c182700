//! Parsed command-line bundle carried by `Settings`.

/// Run options handed to the loader by the CLI.
///
/// The loader stores the bundle without interpreting it; later stages and
/// the notification connector read the flags they care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Branch the dependency round targets.
    pub branch: String,
    /// Log notifications instead of posting them.
    pub simulate: bool,
    /// Discard saved round state before starting.
    pub reset: bool,
    /// Do not read or write round state.
    pub no_state: bool,
    /// Abandon stale update changes before starting.
    pub sweep_changes: bool,
    /// Repositories requested on the command line.
    pub repos: Vec<String>,
    /// Non-blocking repositories requested on the command line.
    pub non_blocking_repos: Vec<String>,
    /// Reduce output to warnings and errors.
    pub quiet: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            branch: "dev".to_string(),
            simulate: false,
            reset: false,
            no_state: false,
            sweep_changes: false,
            repos: Vec::new(),
            non_blocking_repos: Vec::new(),
            quiet: false,
        }
    }
}
