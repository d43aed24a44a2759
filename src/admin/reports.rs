use crate::admin::titles::{TitleCommandError, TitleReport, TitleResult};

pub fn render(result: &TitleResult) -> Vec<String> {
    match result {
        Ok(report) => render_report(report),
        Err(err) => vec![render_error(err)],
    }
}

pub fn render_report(report: &TitleReport) -> Vec<String> {
    let mut lines = Vec::new();
    match report {
        TitleReport::Added { target, title, .. } => lines.push(format!(
            "Title {} ({}) added to known titles list for player {}.",
            title.id, title.display_name, target.name
        )),
        TitleReport::Removed { target, title, .. } => lines.push(format!(
            "Title {} ({}) removed from known titles list for player {}.",
            title.id, title.display_name, target.name
        )),
        TitleReport::Current { target, title, .. } => lines.push(format!(
            "Title {} ({}) set as current selected title for player {}.",
            title.id, title.display_name, target.name
        )),
        TitleReport::MaskSet {
            target,
            known_mask,
            dropped,
            ..
        } => {
            lines.push(format!(
                "Done! Known titles for {} set to {}.",
                target.name, known_mask
            ));
            if *dropped != 0 {
                lines.push(format!("Ignored unknown title bits {}.", dropped));
            }
        }
    }
    if report.selection_cleared() {
        lines.push(format!(
            "Current selected title for player {} reset as not known now.",
            report.target().name
        ));
    }
    lines
}

/// Denials never name the target.
pub fn render_error(err: &TitleCommandError) -> String {
    match err {
        TitleCommandError::NoTargetSelected => "No character selected.".to_string(),
        TitleCommandError::InsufficientPrivilege => {
            "Your security level is too low to change this character's titles.".to_string()
        }
        TitleCommandError::InvalidTitleId(id) => format!("Invalid title id: {}", id),
    }
}
