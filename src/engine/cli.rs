//! Command-line interface for little-room.

use std::env;
use std::path::PathBuf;

pub struct Cli {
    /// Optional JSON config file.
    pub config: Option<PathBuf>,
    /// Run without a mirror window, against the simulated device.
    pub headless: bool,
    /// Frame budget for headless runs.
    pub frames: u64,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Supported flags:
    /// - `--config <path>` - Load settings from a JSON file
    /// - `--headless` - Run without a window
    /// - `--frames <n>` - Headless frame budget (default 600)
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().collect();

        let mut cli = Cli {
            config: None,
            headless: false,
            frames: 600,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" if i + 1 < args.len() => {
                    cli.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
                "--headless" => cli.headless = true,
                "--frames" if i + 1 < args.len() => {
                    match args[i + 1].parse() {
                        Ok(n) => cli.frames = n,
                        Err(_) => eprintln!("Invalid frame count: {}. Using default.", args[i + 1]),
                    }
                    i += 1;
                }
                other => eprintln!("Unknown flag: {other}. Ignoring."),
            }
            i += 1;
        }

        cli
    }
}
