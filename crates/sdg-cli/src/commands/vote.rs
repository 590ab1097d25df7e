use sdg_core::ids::{PREFIX_DECISION, prefix_of};
use sdg_db::engine::{VoteRequest, VoteTarget};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::VoteArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sdg vote`.
pub async fn handle(args: &VoteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut request = VoteRequest::new(&args.user, target_for(args), args.label);
    if let Some(proposed) = args.proposed {
        request = request.with_proposed_label(proposed);
    }
    if let Some(comment) = &args.comment {
        request = request.with_comment(comment);
    }

    let receipt = ctx.service.submit_vote(request).await?;
    output(&receipt, flags.format)
}

/// Decision ids are recognised by their prefix unless `--decision` forces it.
fn target_for(args: &VoteArgs) -> VoteTarget {
    if args.decision || prefix_of(&args.target) == Some(PREFIX_DECISION) {
        VoteTarget::Decision(args.target.clone())
    } else {
        VoteTarget::Publication(args.target.clone())
    }
}
