use crate::cli::GlobalFlags;
use crate::cli::subcommands::DecisionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdg decision`.
pub async fn handle(
    action: &DecisionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DecisionCommands::Get { id } => output(&ctx.service.get_decision(id).await?, flags.format),
        DecisionCommands::List { publication_id } => {
            output(&ctx.service.list_decisions(publication_id).await?, flags.format)
        }
        DecisionCommands::Votes { id } => output(&ctx.service.list_votes(id).await?, flags.format),
        DecisionCommands::Recompute { id } => {
            let outcome = ctx.service.recompute(id).await?;
            output(
                &serde_json::json!({ "decision_id": id, "outcome": outcome }),
                flags.format,
            )
        }
    }
}
