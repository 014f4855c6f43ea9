use std::path::PathBuf;

use ask_verify::SanMatching;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ask-verify",
    version,
    about = "Authenticate voice-assistant skill requests offline or against the live certificate store"
)]
pub struct Cli {
    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate a captured request body
    Verify(VerifyArgs),
    /// Check a certificate chain URL without fetching it
    CheckUrl(CheckUrlArgs),
    /// Fetch or load a signing certificate and show what was parsed
    InspectCert(InspectCertArgs),
    Version,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Raw request body ("-" reads stdin)
    #[arg(long)]
    pub body: PathBuf,

    /// Value of the SignatureCertChainUrl header
    #[arg(long)]
    pub cert_url: String,

    /// Value of the Signature header
    #[arg(long)]
    pub signature: String,

    /// Allowed application id (repeatable; overrides ASK_VERIFY_APPLICATION_IDS)
    #[arg(long = "app-id")]
    pub app_ids: Vec<String>,

    /// Evaluate at this instant (RFC 3339) instead of now
    #[arg(long)]
    pub at: Option<String>,

    /// Freshness tolerance in seconds
    #[arg(long)]
    pub tolerance: Option<u64>,

    /// SAN matching mode: legacy or exact
    #[arg(long)]
    pub san_matching: Option<SanMatching>,

    /// Load the certificate from this file instead of fetching it
    #[arg(long)]
    pub cert_file: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckUrlArgs {
    pub url: String,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InspectCertArgs {
    /// Chain URL to fetch (checked first)
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub url: Option<String>,

    /// Certificate file (PEM or DER)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Evaluate validity at this instant (RFC 3339) instead of now
    #[arg(long)]
    pub at: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}
