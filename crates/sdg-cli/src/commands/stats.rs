use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdg stats`.
pub async fn handle(decision_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.service.get_statistics(decision_id).await?, flags.format)
}
