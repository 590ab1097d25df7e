use crate::cli::GlobalFlags;
use crate::cli::subcommands::PublicationCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdg publication`.
pub async fn handle(
    action: &PublicationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PublicationCommands::Register { title, id } => {
            let record = ctx
                .service
                .register_publication(title, id.as_deref())
                .await?;
            output(&record, flags.format)
        }
        PublicationCommands::Get { id } => {
            output(&ctx.service.get_publication(id).await?, flags.format)
        }
        PublicationCommands::Summary { id } => {
            let summary = ctx.service.get_summary(id).await?;
            output(
                &serde_json::json!({
                    "summary": summary,
                    "confirmed_sdgs": summary.confirmed_sdgs(),
                }),
                flags.format,
            )
        }
        PublicationCommands::Deactivate { id } => {
            output(&ctx.service.set_history_active(id, false).await?, flags.format)
        }
        PublicationCommands::Activate { id } => {
            output(&ctx.service.set_history_active(id, true).await?, flags.format)
        }
    }
}
