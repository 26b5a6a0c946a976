//! Report command handler.

use rescuenet_core::{Dispatcher, Incident, NewReport};

use crate::cli::{GlobalOpts, ReportArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    dispatcher: &Dispatcher,
    args: ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let incident = dispatcher
        .report_incident(NewReport {
            incident_type: args.kind.into(),
            description: args.description,
            photo_attached: args.photo,
            video_attached: args.video,
        })
        .await?;

    let out = output::render_single(&global.output, incident.as_ref(), detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(incident: &Incident) -> String {
    let mut lines = vec![
        format!("Incident {} recorded", incident.id),
        format!(
            "  {} | {} | confidence {}",
            incident.incident_type.label(),
            output::severity_label(incident.severity),
            incident.confidence
        ),
        format!("  at ({:.4}, {:.4})", incident.lat, incident.lng),
        String::from("  checklist:"),
    ];
    for (i, item) in incident.checklist.iter().enumerate() {
        lines.push(format!("    {}. [ ] {}", i + 1, item.task));
    }
    lines.push(format!(
        "  resolve with: rescuenet resolve {}",
        util::short_id(&incident.id)
    ));
    lines.join("\n")
}
