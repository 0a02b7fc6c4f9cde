//! Property tests for input manifest lookups.

use proptest::prelude::*;

use stackdev::InputManifest;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn relative_path() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(segment(), 1..=4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Lookups never panic on arbitrary input.
    #[test]
    fn property_lookup_never_panics(s in "(?s).{0,128}") {
        let manifest: InputManifest = [("lib/api.ts", true)].into_iter().collect();
        let _ = manifest.is_input(&s);
    }

    /// PROPERTY: `./`-prefixed and backslash spellings find the same entry.
    #[test]
    fn property_path_spelling_is_irrelevant(segments in relative_path()) {
        let key = segments.join("/");
        let manifest: InputManifest = [(key.as_str(), true)].into_iter().collect();

        prop_assert!(manifest.is_input(&key));
        let dotted = format!("./{}", key);
        prop_assert!(manifest.is_input(&dotted));
        prop_assert!(manifest.is_input(&segments.join("\\")));
    }

    /// PROPERTY: Paths never recorded are never inputs.
    #[test]
    fn property_unknown_paths_are_irrelevant(
        known in relative_path(),
        other in relative_path(),
    ) {
        prop_assume!(known != other);
        let manifest: InputManifest = [(known.join("/"), true)].into_iter().collect();

        prop_assert!(!manifest.is_input(&other.join("/")));
    }
}
