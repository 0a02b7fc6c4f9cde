use stackdev::domain::ports::DevEvent;
use stackdev::UnitStatus;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_start_header(
    project: &str,
    out_dir: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "stackdev start");
    header.add("Project", project);
    header.add("Output", out_dir);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

/// Render one dev event as console lines.
///
/// The first line carries the `[timestamp]` prefix; per-resource error
/// lines under a failed unit are indented by two spaces only.
pub fn render_dev_event(
    timestamp: &str,
    event: &DevEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        DevEvent::Started { root, .. } => {
            format!("{} {} Watching {}\n", prefix, icon(Icon::Watch), root.display())
        }
        DevEvent::Warning { message } => {
            format!("{} {} {}\n", prefix, icon(Icon::Warning), message)
        }
        DevEvent::FileChanged { path } => {
            format!("{} {} Changed: {}\n", prefix, icon(Icon::Arrow), path)
        }
        DevEvent::FileIgnored { path } => format!(
            "{} {} {}\n",
            prefix,
            icon(Icon::Pending),
            ColoredText::dim(format!("Skipped: {} (not a build input)", path))
                .render(supports_color)
        ),
        DevEvent::BuildStarted => format!("{} {} Building...\n", prefix, icon(Icon::Progress)),
        DevEvent::BuildFailed { code, message } => format!(
            "{} {} Build failed [{}]: {}\n",
            prefix,
            icon(Icon::Error),
            code,
            message
        ),
        DevEvent::BuildUnchanged { fingerprint } => format!(
            "{} {} No changes {}\n",
            prefix,
            icon(Icon::Success),
            ColoredText::dim(format!("({})", fingerprint.short())).render(supports_color)
        ),
        DevEvent::BuildComplete {
            fingerprint,
            units,
            first,
        } => format!(
            "{} {} Built {} {}{}\n",
            prefix,
            icon(Icon::Success),
            plural(units.len(), "unit"),
            ColoredText::dim(format!("({})", fingerprint.short())).render(supports_color),
            if *first { ", initial deploy" } else { "" }
        ),
        DevEvent::DeployQueued { fingerprint } => format!(
            "{} {} Deploy queued {}\n",
            prefix,
            icon(Icon::Pending),
            ColoredText::dim(format!("({})", fingerprint.short())).render(supports_color)
        ),
        DevEvent::DeployStarted { units, .. } => format!(
            "{} {} Deploying {}\n",
            prefix,
            icon(Icon::Deploy),
            units.join(", ")
        ),
        DevEvent::UnitDeployed {
            name,
            status,
            errors,
        } => {
            let mut out = match status {
                UnitStatus::Success => format!("{} {} {}\n", prefix, icon(Icon::Success), name),
                UnitStatus::Failed => format!(
                    "{} {} {}\n",
                    prefix,
                    icon(Icon::Error),
                    ColoredText::error(name.as_str()).render(supports_color)
                ),
            };
            for error in errors {
                out.push_str(&format!("  {}: {}\n", error.id, error.message));
            }
            out
        }
        DevEvent::DeployFailed { message } => format!(
            "{} {} Deploy failed: {}\n",
            prefix,
            icon(Icon::Error),
            message
        ),
        DevEvent::DeployComplete {
            fingerprint,
            succeeded,
            failed,
        } => {
            let short = ColoredText::dim(format!("({})", fingerprint.short())).render(supports_color);
            if *failed > 0 {
                format!(
                    "{} {} Deployed {}: {} succeeded, {}\n",
                    prefix,
                    icon(Icon::Warning),
                    short,
                    succeeded,
                    ColoredText::warning(format!("{} failed", failed)).render(supports_color)
                )
            } else {
                format!(
                    "{} {} Deployed {}: {} succeeded\n",
                    prefix,
                    icon(Icon::Success),
                    short,
                    succeeded
                )
            }
        }
        DevEvent::FunctionInvoked { function_id } => format!(
            "{} {} {} invoked\n",
            prefix,
            icon(Icon::Function),
            function_id
        ),
        DevEvent::FunctionLog {
            function_id,
            message,
        } => format!(
            "{} {} {} {}\n",
            prefix,
            icon(Icon::Arrow),
            ColoredText::info(format!("{}:", function_id)).render(supports_color),
            message
        ),
        DevEvent::FunctionSucceeded { function_id } => format!(
            "{} {} {} succeeded\n",
            prefix,
            icon(Icon::Success),
            function_id
        ),
        DevEvent::Shutdown => format!("{} {} Stopped.\n", prefix, icon(Icon::Watch)),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
