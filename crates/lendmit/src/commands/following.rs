//! Following handlers: follow, unfollow, followees.

use lendmit_core::FollowOutcome;

use crate::cli::FolloweeArgs;
use crate::error::CliError;
use crate::output::{self, FolloweeRow};

use super::Context;

fn print_followees(ctx: &Context<'_>, list: &[String]) {
    let out = output::render_list(
        &ctx.global.output,
        list,
        |m| FolloweeRow { member: m.clone() },
        Clone::clone,
    );
    output::print_output(&out, ctx.global.quiet);
}

/// Surface a reconciliation error recorded after a successful request.
fn report_reconcile(ctx: &Context<'_>) {
    if let Some(err) = ctx.client.subscriptions().status().error {
        output::notice(ctx.global, &err);
    }
}

pub async fn follow(ctx: &Context<'_>, args: FolloweeArgs) -> Result<(), CliError> {
    let me = ctx.login().await?;
    let subs = ctx.client.subscriptions();
    let outcome = subs.follow(&me.id, &args.followee).await?;

    let message = outcome.message(args.followee.trim());
    match outcome {
        FollowOutcome::Subscribed => output::success(ctx.global, &message),
        FollowOutcome::AwaitingConfirmation => output::notice(ctx.global, &message),
    }
    report_reconcile(ctx);
    print_followees(ctx, &subs.followees());
    Ok(())
}

pub async fn unfollow(ctx: &Context<'_>, args: FolloweeArgs) -> Result<(), CliError> {
    let me = ctx.login().await?;
    let subs = ctx.client.subscriptions();
    subs.unfollow(&me.id, &args.followee).await?;

    if let Some(info) = subs.status().info {
        output::success(ctx.global, &info);
    }
    report_reconcile(ctx);
    print_followees(ctx, &subs.followees());
    Ok(())
}

pub async fn followees(ctx: &Context<'_>) -> Result<(), CliError> {
    ctx.login().await?;
    let list = ctx.client.subscriptions().refresh_current().await?;
    print_followees(ctx, &list);
    Ok(())
}
