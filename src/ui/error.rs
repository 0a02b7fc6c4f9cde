use stackdev::StackError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Stable code for any error reaching `main`.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<StackError>()
        .map(StackError::code)
        .unwrap_or("error")
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(format!("Error [{}]:", error_code(err)))
            .bold()
            .render(supports_color),
        err
    );
    if let Some(hint) = err.downcast_ref::<StackError>().and_then(hint) {
        out.push_str(&format!(
            "  {} {}\n",
            ColoredText::dim("Hint:").render(supports_color),
            hint
        ));
    }
    out
}

fn hint(err: &StackError) -> Option<&'static str> {
    match err {
        StackError::SessionLocked { .. } => {
            Some("another `stackdev start` or `stackdev deploy` is running for this project")
        }
        StackError::ProjectNotFound { .. } => Some("pass an existing directory with -C/--project"),
        StackError::Build { .. } => Some("check `[build] command` in stackdev.toml"),
        StackError::DeployExecutor { .. } => Some("check `[deploy] command` in stackdev.toml"),
        _ => None,
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "code": error_code(err),
            "message": err.to_string(),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color && !caps.is_ci, caps.supports_unicode)
    );
}
