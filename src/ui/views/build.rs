use stackdev::{Artifact, Fingerprint};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// `stackdev build` output: fingerprint, then one line per unit.
pub fn render_build_summary(
    artifact: &Artifact,
    fingerprint: &Fingerprint,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = format!(
        "{} {} {}\n  {} {}\n",
        Icon::Success.colored(supports_color, supports_unicode),
        ColoredText::success("Built").bold().render(supports_color),
        artifact.directory().display(),
        ColoredText::dim("Fingerprint:").render(supports_color),
        fingerprint
    );
    for unit in artifact.units() {
        out.push_str(&format!(
            "  {} {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            unit.name,
            ColoredText::dim(unit.template_file.display().to_string()).render(supports_color)
        ));
    }
    out
}

pub fn build_summary_json(artifact: &Artifact, fingerprint: &Fingerprint) -> serde_json::Value {
    serde_json::json!({
        "event": "build_complete",
        "command": "build",
        "directory": artifact.directory(),
        "fingerprint": fingerprint,
        "units": artifact.unit_names(),
    })
}

/// `stackdev deploy` line when the build matched what is deployed.
pub fn render_up_to_date(supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} Nothing to deploy {}\n",
        Icon::Success.colored(supports_color, supports_unicode),
        ColoredText::dim("(no changes)").render(supports_color)
    )
}
