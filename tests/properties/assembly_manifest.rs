//! Property tests for `manifest.json` parsing.

use proptest::prelude::*;

use stackdev::domain::services::{AssemblyManifest, STACK_ARTIFACT_TYPE};

fn artifact_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(STACK_ARTIFACT_TYPE.to_string()),
        Just("cdk:tree".to_string()),
        Just("cdk:asset-manifest".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,256}") {
        let _ = AssemblyManifest::parse(&s);
    }

    /// PROPERTY: Exactly the stack artifacts become units, each once.
    #[test]
    fn property_only_stacks_become_units(
        entries in proptest::collection::btree_map("[A-Za-z][A-Za-z0-9]{0,10}", artifact_type(), 0..8)
    ) {
        let artifacts: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(name, kind)| {
                (
                    name.clone(),
                    serde_json::json!({
                        "type": kind,
                        "properties": {"templateFile": format!("{}.template.json", name)}
                    }),
                )
            })
            .collect();
        let content = serde_json::json!({"version": "36.0.0", "artifacts": artifacts}).to_string();

        let manifest = AssemblyManifest::parse(&content).unwrap();

        let mut expected: Vec<&String> = entries
            .iter()
            .filter(|(_, kind)| kind.as_str() == STACK_ARTIFACT_TYPE)
            .map(|(name, _)| name)
            .collect();
        expected.sort();
        let mut actual: Vec<&String> = manifest.units().iter().map(|u| &u.name).collect();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }
}
