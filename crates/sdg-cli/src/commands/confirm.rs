use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConfirmArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdg confirm`.
pub async fn handle(args: &ConfirmArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let decision = ctx
        .service
        .manual_confirm(&args.decision_id, &args.user, args.label, args.comment.as_deref())
        .await?;
    output(&decision, flags.format)
}
