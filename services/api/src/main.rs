use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match lender_match_api::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lender-match: {err}");
            ExitCode::FAILURE
        }
    }
}
