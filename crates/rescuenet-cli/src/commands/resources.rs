//! Resource roster handlers.

use std::sync::Arc;

use tabled::Tabled;

use rescuenet_core::{Dispatcher, EntityId, Resource, ResourceUpdate};

use crate::cli::{GlobalOpts, ResourcesArgs, ResourcesCommand};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "Contact")]
    contact: String,
}

impl From<&Arc<Resource>> for ResourceRow {
    fn from(r: &Arc<Resource>) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name.clone(),
            kind: r.resource_type.to_string(),
            status: r.status.to_string(),
            load: format!("{}/{}", r.current_load, r.capacity),
            contact: r.contact.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dispatcher: &Dispatcher,
    args: ResourcesArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ResourcesCommand::List => {
            let mut snap: Vec<Arc<Resource>> =
                dispatcher.store().resources().iter().cloned().collect();
            snap.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string()));
            let out = output::render_list(&global.output, &snap, |r| ResourceRow::from(r))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResourcesCommand::Refresh => {
            // Best-effort position fix first, so the directory query
            // centers on where the operator actually is.
            let timeout = cfg.endpoints.timeout();
            match crate::geo_client(&cfg.endpoints, timeout) {
                Ok(geo) => match geo.locate().await {
                    Ok(pos) => dispatcher.set_reference_position(pos.lat, pos.lng),
                    Err(e) => {
                        tracing::warn!(error = %e, "geolocation failed, keeping reference position");
                    }
                },
                Err(e) => tracing::warn!(error = %e, "geolocation client unavailable"),
            }

            let count = dispatcher.refresh_resources().await;
            if !global.quiet {
                eprintln!("Resource roster refreshed ({count} resources)");
            }
            Ok(())
        }

        ResourcesCommand::Update {
            id,
            status,
            capacity,
            load,
        } => {
            let updated = dispatcher.update_resource(
                &EntityId::from(id),
                ResourceUpdate {
                    status: status.map(Into::into),
                    capacity,
                    current_load: load,
                },
            )?;
            let out = output::render_single(&global.output, updated.as_ref(), |r| {
                format!(
                    "{} ({}): {} | load {}/{}",
                    r.name,
                    util::short_id(&r.id),
                    r.status,
                    r.current_load,
                    r.capacity
                )
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
