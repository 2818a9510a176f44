use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;
use std::process::Command;

/// Program used to hand a URL to the desktop's default browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Detect the URL opener on the current OS
pub fn detect_opener() -> Result<Opener> {
    #[cfg(target_os = "macos")]
    {
        if let Ok(program) = which::which("open") {
            return Ok(Opener { program, args: vec![] });
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(program) = which::which("cmd") {
            return Ok(Opener {
                program,
                args: vec!["/C".into(), "start".into(), "".into()],
            });
        }
    }

    #[cfg(target_os = "linux")]
    {
        let names = ["xdg-open", "gio", "sensible-browser"];
        for name in &names {
            if let Ok(program) = which::which(name) {
                let args = if *name == "gio" { vec!["open".into()] } else { vec![] };
                return Ok(Opener { program, args });
            }
        }
    }

    bail!("Could not find a program to open links. Open the profile URL manually.")
}

pub fn ensure_web_link(url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        bail!("Refusing to open non-web link: {}", url)
    }
}

/// Open the profile link from an upload result in the default browser.
pub fn open_link(url: &str) -> Result<()> {
    ensure_web_link(url)?;
    let opener = detect_opener()?;

    let child = Command::new(&opener.program)
        .args(&opener.args)
        .arg(url)
        .spawn()
        .with_context(|| format!("Failed to launch {}", opener.program.display()))?;

    info!("Opened {} (PID: {}) via {}", url, child.id(), opener.program.display());
    Ok(())
}
