use ssm_env::cli::{Args, run};

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let code = run(Args::parse()).await?;
    std::process::exit(code);
}
