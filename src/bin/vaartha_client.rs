//! Command-line client for a running Vaartha server.
//!
//! Sends text to `POST /analyze` and prints the label, the confidence as a percentage with
//! its band, and a numbered list of fact-check sources.
use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};
use vaartha::analysis::ConfidenceBand;

#[derive(Parser)]
#[command(
    name = "vaartha-client",
    about = "Analyze news text against a running Vaartha server"
)]
struct Cli {
    /// Text to analyze; read from stdin when omitted.
    text: Option<String>,
    /// Base URL of the Vaartha server.
    #[arg(long, env = "VAARTHA_SERVER_URL", default_value = "http://localhost:8000")]
    server: String,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
    /// Print the raw JSON response instead of the formatted report.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    sources: Vec<SourceEntry>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    publisher: String,
    url: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();
    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read text from stdin")?;
            buffer
        }
    };
    if text.trim().is_empty() {
        bail!("please provide some text to analyze");
    }

    let client = reqwest::Client::builder()
        .user_agent("vaartha-client")
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("failed to build HTTP client")?;
    let endpoint = format!("{}/analyze", cli.server.trim_end_matches('/'));
    let response = client
        .post(&endpoint)
        .json(&json!({ "text": text }))
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}"))?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("server returned a non-JSON body")?;
    if !status.is_success() {
        let detail = body
            .get("detail")
            .and_then(Value::as_str)
            .unwrap_or("no detail");
        bail!("server returned {status}: {detail}");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let report: AnalyzeResponse =
        serde_json::from_value(body).context("unexpected analyze response shape")?;
    print!("{}", render_report(&report));
    Ok(())
}

fn render_report(report: &AnalyzeResponse) -> String {
    let mut out = String::new();
    let label = report.label.as_deref().unwrap_or("No label available");
    out.push_str(&format!("Label: {label}\n"));

    match report.confidence {
        Some(score) => {
            let band = ConfidenceBand::from_score(score)
                .map(|band| format!(" ({band})"))
                .unwrap_or_default();
            out.push_str(&format!("Confidence: {:.2}%{band}\n", score * 100.0));
        }
        None => out.push_str("Confidence: N/A\n"),
    }

    if report.sources.is_empty() {
        out.push_str("Sources: No sources available\n");
    } else {
        out.push_str("Sources:\n");
        for (index, source) in report.sources.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} <{}>\n",
                index + 1,
                source.publisher,
                source.url
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sources_and_band() {
        let report = AnalyzeResponse {
            label: Some("Fake".into()),
            confidence: Some(0.8734),
            sources: vec![SourceEntry {
                publisher: "Snopes".into(),
                url: "https://snopes.com/x".into(),
            }],
        };

        assert_eq!(
            render_report(&report),
            "Label: Fake\nConfidence: 87.34% (high)\nSources:\n  1. Snopes <https://snopes.com/x>\n"
        );
    }

    #[test]
    fn renders_placeholders_for_missing_fields() {
        let report = AnalyzeResponse {
            label: None,
            confidence: None,
            sources: Vec::new(),
        };

        assert_eq!(
            render_report(&report),
            "Label: No label available\nConfidence: N/A\nSources: No sources available\n"
        );
    }
}
