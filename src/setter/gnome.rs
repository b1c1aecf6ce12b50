use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

const SCHEMA: &str = "org.gnome.desktop.background";

/// Apply the wallpaper through gsettings.
///
/// GNOME 42+ reads `picture-uri-dark` in dark style; older desktops only
/// know `picture-uri`, so the dark key is written best-effort and success
/// is judged on the light key alone.
pub fn apply_wallpaper(path: &Path) -> Result<()> {
    if which::which("gsettings").is_err() {
        bail!("gsettings is not installed, cannot set a GNOME wallpaper");
    }

    let uri = picture_uri(path)?;
    run_gsettings("gsettings", "picture-uri", &uri)?;
    let _ = run_gsettings("gsettings", "picture-uri-dark", &uri);
    Ok(())
}

/// `file://` URI for the canonicalized image path.
fn picture_uri(path: &Path) -> Result<String> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve wallpaper path {}", path.display()))?;
    Ok(format!("file://{}", absolute.display()))
}

fn run_gsettings(program: &str, key: &str, uri: &str) -> Result<()> {
    let output = Command::new(program)
        .args(["set", SCHEMA, key, uri])
        .output()
        .with_context(|| format!("Failed to execute {program}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("gsettings set {} failed: {}", key, stderr.trim());
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn stub_gsettings(dir: &Path, exit_code: i32) -> (PathBuf, PathBuf) {
        let log = dir.join("gsettings.log");
        let program = dir.join("gsettings-stub");
        fs::write(
            &program,
            format!(
                "#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {}\n",
                log.display(),
                exit_code
            ),
        )
        .unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
        (program, log)
    }

    #[test]
    fn passes_schema_key_and_uri() {
        let dir = tempfile::tempdir().unwrap();
        let (program, log) = stub_gsettings(dir.path(), 0);

        run_gsettings(
            program.to_str().unwrap(),
            "picture-uri",
            "file:///tmp/wall.jpg",
        )
        .unwrap();

        let logged = fs::read_to_string(log).unwrap();
        assert_eq!(
            logged.trim(),
            "set org.gnome.desktop.background picture-uri file:///tmp/wall.jpg"
        );
    }

    #[test]
    fn nonzero_exit_codes_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (program, _log) = stub_gsettings(dir.path(), 1);

        let err = run_gsettings(program.to_str().unwrap(), "picture-uri", "file:///x.jpg");
        assert!(err.is_err());
    }

    #[test]
    fn picture_uri_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("wall.jpg");
        fs::write(&image, b"jpeg").unwrap();

        let uri = picture_uri(&image).unwrap();
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("wall.jpg"));
    }

    #[test]
    fn relative_paths_resolve_against_the_working_directory() {
        // picture_uri must never emit a relative file:// URI even when the
        // cache path itself is relative.
        let uri = picture_uri(Path::new(".")).unwrap();
        assert!(uri.starts_with("file:///"));
    }
}
