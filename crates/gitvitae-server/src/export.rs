//! Resume export pipeline.
//!
//! The dashboard posts rendered resume HTML; conversion is delegated to
//! external tools. `pandoc` handles markdown and docx over stdin/stdout; a
//! headless Chromium prints PDF via temp files. Missing tools surface as
//! `MissingTool`, which the API maps to 503.

use std::io::Write;
use std::process::{Command, Stdio};
use std::str::FromStr;

use gitvitae_core::{Result, VitaeError};

const CHROMIUM_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "resume.md",
            ExportFormat::Pdf => "resume.pdf",
            ExportFormat::Docx => "resume.docx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = VitaeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(VitaeError::InvalidInput(format!(
                "unknown export format '{other}' (expected md, pdf, or docx)"
            ))),
        }
    }
}

/// Convert resume HTML into the requested format.
pub fn export_html(format: ExportFormat, html: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Markdown => pandoc(html, "markdown"),
        ExportFormat::Docx => pandoc(html, "docx"),
        ExportFormat::Pdf => print_pdf(html),
    }
}

fn pandoc(html: &str, to: &str) -> Result<Vec<u8>> {
    let pandoc =
        which::which("pandoc").map_err(|_| VitaeError::MissingTool("pandoc".to_string()))?;

    let mut child = Command::new(pandoc)
        .args(["-f", "html", "-t", to, "-o", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| VitaeError::Export(format!("failed to spawn pandoc: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(html.as_bytes())?;
    }
    let output = child
        .wait_with_output()
        .map_err(|e| VitaeError::Export(format!("pandoc did not finish: {e}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VitaeError::Export(format!(
            "pandoc exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(output.stdout)
}

fn print_pdf(html: &str) -> Result<Vec<u8>> {
    let browser = CHROMIUM_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| VitaeError::MissingTool("chromium".to_string()))?;

    let workdir = tempfile::tempdir()?;
    let input = workdir.path().join("resume.html");
    let output = workdir.path().join("resume.pdf");
    std::fs::write(&input, html)?;

    let status = Command::new(browser)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg(format!("--print-to-pdf={}", output.display()))
        .arg(format!("file://{}", input.display()))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| VitaeError::Export(format!("failed to spawn chromium: {e}")))?;
    if !status.success() {
        return Err(VitaeError::Export(format!(
            "chromium exited with {status}"
        )));
    }
    Ok(std::fs::read(&output)?)
}
