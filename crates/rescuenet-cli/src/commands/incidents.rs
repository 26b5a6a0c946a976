//! Incident listing, resolution, and checklist handlers.

use std::sync::Arc;

use tabled::Tabled;

use rescuenet_core::{Dispatcher, Incident};

use crate::cli::{GlobalOpts, IncidentsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct IncidentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Checklist")]
    checklist: String,
    #[tabled(rename = "Reported")]
    reported: String,
}

impl From<&Arc<Incident>> for IncidentRow {
    fn from(i: &Arc<Incident>) -> Self {
        let (done, total) = i.checklist_progress();
        Self {
            id: util::short_id(&i.id),
            kind: i.incident_type.label(),
            severity: output::severity_label(i.severity),
            confidence: i.confidence.to_string(),
            status: i.status.to_string(),
            checklist: format!("{done}/{total}"),
            reported: util::fmt_timestamp(i.timestamp),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn list(
    dispatcher: &Dispatcher,
    args: IncidentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(ref identifier) = args.id {
        let incident = util::resolve_incident(dispatcher, identifier)?;
        let out = output::render_single(&global.output, incident.as_ref(), detail)?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let snap: Vec<Arc<Incident>> = if args.active {
        dispatcher.store().active_incidents()
    } else {
        dispatcher.store().incidents().iter().cloned().collect()
    };

    if snap.is_empty() && !global.quiet {
        eprintln!("No incidents on record");
        return Ok(());
    }

    let out = output::render_list(&global.output, &snap, |i| IncidentRow::from(i))?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn resolve(dispatcher: &Dispatcher, identifier: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let incident = util::resolve_incident(dispatcher, identifier)?;
    dispatcher.resolve_incident(&incident.id)?;
    if !global.quiet {
        eprintln!("Incident {} resolved", util::short_id(&incident.id));
    }
    Ok(())
}

pub fn check(
    dispatcher: &Dispatcher,
    incident_ref: &str,
    item_ref: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let incident = util::resolve_incident(dispatcher, incident_ref)?;
    let item_id = util::resolve_item_id(&incident, item_ref)?;
    let updated = dispatcher.toggle_checklist_item(&incident.id, &item_id)?;

    if !global.quiet {
        let (done, total) = updated.checklist_progress();
        eprintln!(
            "Checklist updated ({done}/{total} complete on {})",
            util::short_id(&updated.id)
        );
    }
    Ok(())
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(incident: &Incident) -> String {
    let mut lines = vec![
        format!("Incident {}", incident.id),
        format!(
            "  {} | {} | confidence {} | {}",
            incident.incident_type.label(),
            output::severity_label(incident.severity),
            incident.confidence,
            incident.status
        ),
        format!("  reported {}", util::fmt_timestamp(incident.timestamp)),
        format!("  at ({:.4}, {:.4})", incident.lat, incident.lng),
        format!("  {}", incident.description),
    ];
    if incident.photo_attached || incident.video_attached {
        let mut evidence = Vec::new();
        if incident.photo_attached {
            evidence.push("photo");
        }
        if incident.video_attached {
            evidence.push("video");
        }
        lines.push(format!("  evidence: {}", evidence.join(", ")));
    }
    lines.push(String::from("  checklist:"));
    for (i, item) in incident.checklist.iter().enumerate() {
        let mark = if item.completed { "x" } else { " " };
        lines.push(format!("    {}. [{mark}] {}", i + 1, item.task));
    }
    lines.join("\n")
}
