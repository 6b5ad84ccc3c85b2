// src/bin/pob_eval.rs
//
// Reads {"pob": "..."} on stdin and writes one JSON document to stdout.

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use craftcoach_data::config::AppConfig;
use craftcoach_data::error::Result;
use craftcoach_data::logging;
use craftcoach_data::models::pob::{parse_request, EvalResponse, EvalResult};
use craftcoach_data::pob::{self, BuildResolver};
use craftcoach_data::services::http_cache::{HttpTransport, ReqwestTransport};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init("warn");

    let (response, code) = match run().await {
        Ok(result) => (EvalResponse::success(result), ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("Build evaluation failed: {}", e);
            (EvalResponse::failure(e), ExitCode::FAILURE)
        }
    };

    match serde_json::to_string(&response) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            tracing::error!("Failed to serialize evaluator output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    code
}

async fn run() -> Result<EvalResult> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let pob = parse_request(&raw)?;

    let user_agent = AppConfig::user_agent_from_env();
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&user_agent)?);
    let resolver = BuildResolver::new(transport);

    pob::evaluate(&resolver, &pob).await
}
