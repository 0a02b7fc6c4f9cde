//! Property tests for the checksum engine.

use proptest::prelude::*;

use stackdev::{fingerprint_directory, Fingerprint};

use crate::common::write_assembly;

fn template() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~]{0,64}").unwrap()
}

fn stacks() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::btree_map("[A-Z][a-z]{0,8}", template(), 1..=4)
        .prop_map(|map| map.into_iter().collect())
}

fn borrowed(stacks: &[(String, String)]) -> Vec<(&str, &str)> {
    stacks.iter().map(|(n, t)| (n.as_str(), t.as_str())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The same templates fingerprint identically in any directory.
    #[test]
    fn property_fingerprint_is_path_independent(stacks in stacks()) {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write_assembly(&a.path().join("cdk.out"), &borrowed(&stacks));
        write_assembly(&b.path().join("elsewhere/out"), &borrowed(&stacks));

        prop_assert_eq!(
            fingerprint_directory(&a.path().join("cdk.out")).unwrap(),
            fingerprint_directory(&b.path().join("elsewhere/out")).unwrap()
        );
    }

    /// PROPERTY: Fingerprints are 64 lowercase hex characters.
    #[test]
    fn property_fingerprint_is_sha256_hex(templates in proptest::collection::vec(template(), 0..8)) {
        let fp = Fingerprint::of_templates(&templates);
        prop_assert_eq!(fp.as_str().len(), 64);
        prop_assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// PROPERTY: Enumeration order never changes the fingerprint.
    #[test]
    fn property_fingerprint_ignores_order(templates in proptest::collection::vec(template(), 0..8)) {
        let mut reversed = templates.clone();
        reversed.reverse();
        prop_assert_eq!(Fingerprint::of_templates(&templates), Fingerprint::of_templates(&reversed));
    }

    /// PROPERTY: Editing one template changes the fingerprint.
    #[test]
    fn property_fingerprint_is_content_sensitive(
        templates in proptest::collection::vec(template(), 1..8),
        index in any::<prop::sample::Index>(),
    ) {
        let mut edited = templates.clone();
        let i = index.index(edited.len());
        edited[i].push_str(" ");

        prop_assert_ne!(Fingerprint::of_templates(&templates), Fingerprint::of_templates(&edited));
    }
}
