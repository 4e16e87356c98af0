pub mod args;
pub mod commands;

pub use args::{Cli, Commands, RunArgs};

use anyhow::Result;

/// サブコマンドを実行
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => commands::run::execute(&args),
        Commands::Eval {
            pipeline,
            input,
            strategy,
        } => commands::eval::execute(&pipeline, input, strategy).map(|_| ()),
        Commands::Presets => {
            commands::presets::execute();
            Ok(())
        }
    }
}
