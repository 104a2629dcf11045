use anyhow::Result;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    /// Device base URL override; falls back to the stored config.
    pub url: Option<String>,
}

pub fn run() -> Result<()> {
    run_with_options(TuiRunOptions::default())
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}
