use ask_verify::ChainUrlPolicy;

use super::report_rejection;
use crate::cli::args::CheckUrlArgs;
use crate::exit_codes::SUCCESS;

pub fn run(args: CheckUrlArgs) -> anyhow::Result<i32> {
    match ChainUrlPolicy::default().validate(&args.url) {
        Ok(url) => {
            if args.json {
                println!("{}", serde_json::json!({ "ok": true, "url": url.as_str() }));
            } else {
                println!("ok: {}", url);
            }
            Ok(SUCCESS)
        }
        Err(err) => Ok(report_rejection(&err, args.json)),
    }
}
