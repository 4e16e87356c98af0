use anyhow::Result;
use clap::Parser;

use func_chain_perf::{
    benchmarks::CountingAllocator,
    cli::{self, Cli},
    logging,
};

// 確保回数を計測するためにグローバルアロケータを差し替える
#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(&cli.log_level);

    if let Err(error) = cli::execute(cli) {
        eprintln!("❌ エラー: {error:#}");
        std::process::exit(1);
    }

    Ok(())
}
