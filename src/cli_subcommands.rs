use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the current drive status
    Status {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Eject the mounted image
    Eject,

    /// Mount the named image, then show the resulting status
    Load { name: String },

    /// Enumerate the device's image catalog
    Images {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll the drive status on the auto-refresh period
    Watch,

    /// Show client and device firmware versions
    Version,

    /// Configure the device address, or show it when no URL is given
    Connect {
        /// Device base URL, e.g. http://ode.local
        url: Option<String>,
    },
}
