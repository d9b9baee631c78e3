use dashbak_engine::ReportSummary;
use serde::Serialize;

/// Standard response wrapper the binary prints as single-line JSON.
#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Prints the run summary to stdout.
pub fn print_summary(summary: &ReportSummary) {
    let response = CliResponse {
        success: summary.success,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(summary),
        error: None,
    };
    println!("{}", serde_json::to_string(&response).unwrap());
}

/// Prints an error response to stderr and terminates the process.
pub fn output_error(message: &str) -> ! {
    let response: CliResponse<()> = CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(message.to_string()),
    };
    eprintln!("{}", serde_json::to_string(&response).unwrap());
    std::process::exit(1);
}
