//! Init command implementation

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use lattelint_core::ProcessorConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

/// Writes the default configuration to `.lattelint.json` in the working directory.
pub fn run_init(force: bool) -> Result<()> {
    let config_path = Path::new(ProcessorConfig::CONFIG_FILES[1]);

    let mut contents =
        serde_json::to_string_pretty(&ProcessorConfig::default()).into_diagnostic()?;
    contents.push('\n');

    let mut file = match create_new(config_path) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if !force {
                return Err(miette::miette!(
                    "Config file already exists. Use --force to overwrite."
                ));
            }
            match std::fs::remove_file(config_path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_diagnostic(),
            }
            create_new(config_path).into_diagnostic()?
        }
        result => result.into_diagnostic()?,
    };

    file.write_all(contents.as_bytes()).into_diagnostic()?;
    info!("Created {}", config_path.display());
    Ok(())
}

/// Creates `path`, failing if it exists. Symlinks are not followed.
fn create_new(path: &Path) -> io::Result<File> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}
