use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use tempfile::TempDir;

/// Isolated working directory for one run of the binary.
///
/// The binary is started with the environment's `bin/` directory as its
/// entire PATH, so every external tool it touches (xrandr, gsettings) has to
/// be provided as a stub. Stubs log their arguments next to the cache.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("bin"))?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Where the binary keeps its cache when run in this environment.
    pub fn images_dir(&self) -> PathBuf {
        self.path().join("images")
    }

    /// Drop a fake executable onto the stub PATH. It appends its arguments
    /// to the returned log file, prints `stdout` and exits with `exit_code`.
    pub fn stub_command(&self, name: &str, stdout: &str, exit_code: i32) -> Result<PathBuf> {
        let log = self.path().join(format!("{name}.log"));
        let program = self.path().join("bin").join(name);

        let script = if stdout.is_empty() {
            format!(
                "#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {}\n",
                log.display(),
                exit_code
            )
        } else {
            format!(
                "#!/bin/sh\necho \"$@\" >> \"{}\"\n/bin/cat <<'STUBEOF'\n{}\nSTUBEOF\nexit {}\n",
                log.display(),
                stdout,
                exit_code
            )
        };
        fs::write(&program, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&program, fs::Permissions::from_mode(0o755))?;
        }

        Ok(log)
    }

    /// Run the bingwall binary inside this environment against the given
    /// archive endpoint.
    pub fn run_bingwall(&self, endpoint: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_bingwall"))
            .args(args)
            .current_dir(self.path())
            .env("BINGWALL_ENDPOINT", endpoint)
            .env("PATH", self.path().join("bin"))
            .env("NO_COLOR", "1")
            .env_remove("WAYLAND_DISPLAY")
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
