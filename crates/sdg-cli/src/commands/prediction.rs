use crate::cli::GlobalFlags;
use crate::cli::subcommands::PredictionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdg prediction`.
pub async fn handle(
    action: &PredictionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PredictionCommands::Record {
            publication_id,
            sdg,
            score,
            model,
        } => {
            let model = model.as_deref().unwrap_or(&ctx.config.prediction.model);
            let prediction = ctx
                .service
                .record_prediction(publication_id, model, *sdg, *score)
                .await?;
            output(&prediction, flags.format)
        }
        PredictionCommands::List { publication_id } => {
            output(&ctx.service.list_predictions(publication_id).await?, flags.format)
        }
        PredictionCommands::Top {
            publication_id,
            model,
        } => {
            let model = model.as_deref().unwrap_or(&ctx.config.prediction.model);
            let top = ctx
                .service
                .highest_confidence_sdg(publication_id, model)
                .await?
                .map(|(sdg, score)| serde_json::json!({ "sdg": sdg, "score": score }));
            output(
                &serde_json::json!({ "model": model, "top": top }),
                flags.format,
            )
        }
    }
}
