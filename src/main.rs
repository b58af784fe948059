/*
 * Responsibility
 * - tokio runtime startup
 * - app::run() 呼び出し (no logic here)
 */
use anyhow::Result;

mod api;
mod app;
mod config;
mod error;
mod messages;
mod middleware;
mod repos;
mod services;
mod state;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
