//! Reusable test content

use std::fs;
use std::path::Path;

/// Write `manifest.json` plus one template per `(stack, body)` into `dir`.
pub fn write_assembly(dir: &Path, stacks: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    let mut artifacts = serde_json::Map::new();
    for (name, body) in stacks {
        let file = format!("{}.template.json", name);
        fs::write(dir.join(&file), body).unwrap();
        artifacts.insert(
            name.to_string(),
            serde_json::json!({
                "type": "aws:cloudformation:stack",
                "properties": {"templateFile": file}
            }),
        );
    }
    artifacts.insert(
        "Tree".to_string(),
        serde_json::json!({"type": "cdk:tree", "properties": {"file": "tree.json"}}),
    );
    let manifest = serde_json::json!({"version": "36.0.0", "artifacts": artifacts});
    fs::write(dir.join("manifest.json"), manifest.to_string()).unwrap();
}

/// Build script: renders `templates/*.json` into `$STACKDEV_OUT_DIR` as stacks.
pub const SYNTH_SCRIPT: &str = r#"#!/bin/sh
set -e
out="$STACKDEV_OUT_DIR"
mkdir -p "$out"
entries=""
for f in templates/*.json; do
  name=$(basename "$f" .json)
  cp "$f" "$out/$name.template.json"
  entry="\"$name\":{\"type\":\"aws:cloudformation:stack\",\"properties\":{\"templateFile\":\"$name.template.json\"}}"
  if [ -z "$entries" ]; then entries="$entry"; else entries="$entries,$entry"; fi
done
printf '{"version":"36.0.0","artifacts":{%s}}' "$entries" > "$out/manifest.json"
printf '{"templates/Api.json":true}' > "$out/inputs.json"
"#;

/// Deploy script: reports every unit as deployed, logging the request.
pub const DEPLOY_OK_SCRIPT: &str = r#"#!/bin/sh
cat > deploy-request.json
printf '{"Api":{"status":"success","errors":{}}}'
"#;

/// Deploy script: one unit fails with a resource error.
pub const DEPLOY_PARTIAL_SCRIPT: &str = r#"#!/bin/sh
cat > /dev/null
printf '{"Api":{"status":"success","errors":{}},"Storage":{"status":"failed","errors":{"Table":"Rollback"}}}'
"#;
