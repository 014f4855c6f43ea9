use anyhow::Context;
use ask_verify::protocol::SERVICE_DOMAIN;
use ask_verify::{
    AuthConfig, Certificate, CertificateSource, CertificateValidator, ChainUrlPolicy,
    HttpCertificateSource,
};
use chrono::Utc;

use super::{parse_instant, report_rejection};
use crate::cli::args::InspectCertArgs;
use crate::exit_codes::SUCCESS;

pub async fn run(args: InspectCertArgs) -> anyhow::Result<i32> {
    let config = AuthConfig::from_env()?;
    let now = match &args.at {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };

    let (source_url, bytes) = match (&args.url, &args.file) {
        (Some(raw), _) => {
            let url = match ChainUrlPolicy::default().validate(raw) {
                Ok(url) => url,
                Err(err) => return Ok(report_rejection(&err, args.json)),
            };
            let source = HttpCertificateSource::from_config(&config)?;
            match source.fetch(&url).await {
                Ok(bytes) => (url.to_string(), bytes),
                Err(err) => return Ok(report_rejection(&err, args.json)),
            }
        }
        (None, Some(path)) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read certificate {}", path.display()))?;
            (path.display().to_string(), bytes)
        }
        (None, None) => anyhow::bail!("either --url or --file is required"),
    };

    let cert = match Certificate::parse(source_url, bytes) {
        Ok(cert) => cert,
        Err(err) => return Ok(report_rejection(&err, args.json)),
    };

    let validator = CertificateValidator::new(SERVICE_DOMAIN, config.san_matching);
    let verdict = validator.validate(&cert, now);

    if args.json {
        let out = serde_json::json!({
            "source": cert.source_url(),
            "fingerprint": cert.fingerprint(),
            "subject": cert.subject(),
            "issuer": cert.issuer(),
            "valid_from": cert.valid_from().to_rfc3339(),
            "valid_to": cert.valid_to().to_rfc3339(),
            "subject_alternative_names": cert
                .subject_alternative_names()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            "key_bits": cert.key_bits(),
            "evaluated_at": now.to_rfc3339(),
            "ok": verdict.is_ok(),
            "reason": verdict.as_ref().err().map(|e| e.reason()),
            "message": verdict.as_ref().err().map(ToString::to_string),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("source:      {}", cert.source_url());
        println!("fingerprint: {}", cert.fingerprint());
        println!("subject:     {}", cert.subject());
        println!("issuer:      {}", cert.issuer());
        println!("valid from:  {}", cert.valid_from().to_rfc3339());
        println!("valid to:    {}", cert.valid_to().to_rfc3339());
        println!("SANs:        {}", cert.san_text());
        println!("key:         RSA {} bits", cert.key_bits());
        match &verdict {
            Ok(()) => println!("status:      ok at {}", now.to_rfc3339()),
            Err(err) => println!("status:      rejected ({}): {}", err.reason(), err),
        }
    }

    Ok(match verdict {
        Ok(()) => SUCCESS,
        Err(err) => err.reason().exit_code(),
    })
}
