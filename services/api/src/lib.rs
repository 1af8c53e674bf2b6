mod cli;
mod infra;
mod routes;
mod server;

use clientdesk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
