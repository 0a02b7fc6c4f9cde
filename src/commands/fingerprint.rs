use std::path::Path;

use anyhow::Result;
use stackdev::fingerprint_directory;

pub fn cmd_fingerprint(dir: &Path, json: bool) -> Result<()> {
    let fingerprint = fingerprint_directory(dir)?;

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "fingerprint",
            "command": "fingerprint",
            "directory": dir,
            "fingerprint": fingerprint,
        }))?;
    } else {
        println!("{}", fingerprint);
    }
    Ok(())
}
