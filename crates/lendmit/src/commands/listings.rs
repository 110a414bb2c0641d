//! Listing handlers: mine, feed, intent, remember.

use serde::Serialize;
use tracing::debug;

use lendmit_core::{Category, ListingSource, Resource};

use crate::cli::{ListingsArgs, ListingsCommand};
use crate::error::CliError;
use crate::output::{self, ResourceRow};

use super::Context;

#[derive(Serialize)]
struct IntentView {
    resource: String,
    intent: Option<String>,
}

fn parse_category(raw: &str) -> Result<Category, CliError> {
    raw.trim().parse().map_err(|_| CliError::Validation {
        field: "category".into(),
        reason: format!("unknown category '{raw}'"),
    })
}

fn print_resources(ctx: &Context<'_>, resources: &[Resource]) {
    let out = output::render_list(&ctx.global.output, resources, |r| ResourceRow::from(r), |r| {
        r.id.clone()
    });
    output::print_output(&out, ctx.global.quiet);
}

fn report_source(ctx: &Context<'_>, source: &ListingSource) {
    match source {
        ListingSource::Server { .. } => debug!(%source, "listing loaded"),
        ListingSource::Cache => output::notice(ctx.global, "Server unavailable; showing cached listings"),
        ListingSource::OwnedFallback => {
            output::notice(ctx.global, "Global listing unavailable; showing your own listings");
        }
    }
}

pub async fn handle(ctx: &Context<'_>, args: ListingsArgs) -> Result<(), CliError> {
    let catalog = ctx.client.catalog();

    match args.command {
        ListingsCommand::Mine => {
            ctx.login().await?;
            if let Some(source) = catalog.refresh_owned().await {
                report_source(ctx, &source);
            }
            if let Some(err) = catalog.status().error {
                output::notice(ctx.global, &err);
            }
            print_resources(ctx, &catalog.mine());
            Ok(())
        }

        ListingsCommand::Feed => {
            // The feed falls back to the owned listing, so sign in first
            // when credentials are available.
            match ctx.login().await {
                Ok(_) => {
                    if let Some(source) = catalog.refresh_owned().await {
                        report_source(ctx, &source);
                    }
                }
                Err(CliError::NoCredentials { .. }) => debug!("browsing feed anonymously"),
                Err(e) => return Err(e),
            }
            let source = catalog.refresh_feed().await;
            report_source(ctx, &source);
            print_resources(ctx, &catalog.feed());
            Ok(())
        }

        ListingsCommand::Intent { resource_id } => {
            let intent = catalog.fetch_intent(&resource_id).await;
            let view = IntentView {
                resource: resource_id,
                intent,
            };
            let out = output::render_single(
                &ctx.global.output,
                &view,
                |v| format!("{}: {}", v.resource, v.intent.as_deref().unwrap_or("-")),
                |v| v.intent.clone().unwrap_or_else(|| "-".into()),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        ListingsCommand::Remember {
            id,
            name,
            category,
            description,
        } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let identity = ctx.login().await?;

            let mut resource = Resource::new(id, identity.id, name);
            if let Some(category) = category {
                resource = resource.with_category(category.to_string());
            }
            if let Some(description) = description {
                resource = resource.with_description(description);
            }

            if catalog.add_local(resource.clone()).is_done() {
                output::success(ctx.global, &format!("Remembered '{}'", resource.name));
            } else {
                output::notice(ctx.global, "Could not write the local cache; listing not remembered");
            }
            let out = output::render_list(
                &ctx.global.output,
                std::slice::from_ref(&resource),
                |r| ResourceRow::from(r),
                |r| r.id.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }
    }
}
