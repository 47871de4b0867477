use anyhow::Result;
use colored::{ColoredString, Colorize};
use placement_application::StatusView;
use placement_core::application::BadgeClass;

pub fn run(json: bool) -> Result<()> {
    let views = StatusView::all();

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!(
        "{:<14} {:<14} {:<15} {}",
        "STATUS".bold(),
        "LABEL".bold(),
        "BADGE".bold(),
        "FINAL".bold()
    );
    for view in &views {
        println!(
            "{:<14} {:<14} {:<15} {}",
            view.status.as_str(),
            view.label,
            badge(view.badge),
            if view.is_final { "yes" } else { "no" }
        );
    }

    Ok(())
}

fn badge(class: BadgeClass) -> ColoredString {
    let text = class.as_str();
    match class {
        BadgeClass::Positive => text.green(),
        BadgeClass::Negative => text.red(),
        BadgeClass::Informational => text.blue(),
        BadgeClass::Highlight => text.magenta(),
        BadgeClass::Neutral => text.normal(),
    }
}
