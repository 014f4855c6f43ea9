use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use ask_verify::{
    AuthConfig, AuthenticationResult, CertificateSource, Clock, FixedClock,
    HttpCertificateSource, RequestAuthenticator, StaticCertificateSource, SystemClock,
};
use tracing::debug;

use super::{parse_instant, report_rejection};
use crate::cli::args::VerifyArgs;
use crate::exit_codes::SUCCESS;

pub async fn run(args: VerifyArgs) -> anyhow::Result<i32> {
    let body = read_body(&args.body)?;
    let config = build_config(&args)?;
    debug!(
        cert_url = %args.cert_url,
        offline = args.cert_file.is_some(),
        allowed = config.application_ids.len(),
        "verifying request"
    );

    let source: Arc<dyn CertificateSource> = match &args.cert_file {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read certificate {}", path.display()))?;
            Arc::new(StaticCertificateSource::new(bytes))
        }
        None => Arc::new(HttpCertificateSource::from_config(&config)?),
    };

    let clock: Arc<dyn Clock> = match &args.at {
        Some(raw) => Arc::new(FixedClock::new(parse_instant(raw)?)),
        None => Arc::new(SystemClock),
    };

    let authenticator = RequestAuthenticator::with_collaborators(&config, source, clock);
    let outcome = authenticator
        .authenticate_body(&body, &args.cert_url, &args.signature)
        .await;

    Ok(match outcome {
        AuthenticationResult::Authenticated => {
            if args.json {
                println!("{}", serde_json::json!({ "ok": true }));
            } else {
                println!("authenticated");
            }
            SUCCESS
        }
        AuthenticationResult::Rejected(err) => report_rejection(&err, args.json),
    })
}

fn build_config(args: &VerifyArgs) -> anyhow::Result<AuthConfig> {
    let mut config = AuthConfig::from_env()?;
    if !args.app_ids.is_empty() {
        config = config.with_application_ids(args.app_ids.iter().cloned());
    }
    if let Some(secs) = args.tolerance {
        config = config.with_timestamp_tolerance(secs);
    }
    if let Some(mode) = args.san_matching {
        config = config.with_san_matching(mode);
    }
    Ok(config)
}

fn read_body(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read body from stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("failed to read body {}", path.display()))
}
