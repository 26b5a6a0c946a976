//! Status overview: stress level plus incident distribution bars.

use serde::Serialize;

use rescuenet_core::{CategorySlice, Dispatcher, StressLevel};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

const BAR_WIDTH: usize = 24;

#[derive(Serialize)]
struct StatusView {
    stress: StressLevel,
    active_incidents: usize,
    total_incidents: usize,
    resources: usize,
    distribution: [CategorySlice; 5],
}

pub fn handle(dispatcher: &Dispatcher, global: &GlobalOpts) -> Result<(), CliError> {
    let view = StatusView {
        stress: dispatcher.stress(),
        active_incidents: dispatcher.store().active_incidents().len(),
        total_incidents: dispatcher.store().incidents().len(),
        resources: dispatcher.store().resources().len(),
        distribution: dispatcher.distribution(),
    };

    let out = match global.output {
        OutputFormat::Json => output::render_json(&view)?,
        OutputFormat::Table => render_text(&view),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_text(view: &StatusView) -> String {
    let mut lines = vec![
        format!("Community stress: {}", output::stress_label(view.stress)),
        format!(
            "Incidents: {} active / {} total | Resources: {}",
            view.active_incidents, view.total_incidents, view.resources
        ),
        String::new(),
    ];
    for slice in &view.distribution {
        lines.push(format!(
            "  {:<10} {} {:>3}% ({})",
            slice.label,
            bar(slice.relative_height),
            slice.percentage,
            slice.count
        ));
    }
    lines.join("\n")
}

/// Fixed-width bar scaled by the slice's relative height (0.0 to 1.0).
fn bar(relative_height: f64) -> String {
    let filled = (relative_height * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
