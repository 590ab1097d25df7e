use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Publication { action } => commands::publication::handle(&action, ctx, flags).await,
        Commands::Prediction { action } => commands::prediction::handle(&action, ctx, flags).await,
        Commands::Vote(args) => commands::vote::handle(&args, ctx, flags).await,
        Commands::Confirm(args) => commands::confirm::handle(&args, ctx, flags).await,
        Commands::Stats { decision_id } => commands::stats::handle(&decision_id, ctx, flags).await,
        Commands::Decision { action } => commands::decision::handle(&action, ctx, flags).await,
        Commands::Config => commands::config::handle(&ctx.config, flags),
    }
}
