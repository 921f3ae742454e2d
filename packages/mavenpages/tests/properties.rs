use mavenpages::{Algorithm, ArtifactCoordinate};
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn coordinate_splits_segments(segments in prop::collection::vec("[A-Za-z0-9_.-]{1,12}", 3..8)) {
        let coordinate = ArtifactCoordinate::from_segments(segments.clone()).expect("enough segments");
        let n = segments.len();
        prop_assert_eq!(&coordinate.version, &segments[n - 1]);
        prop_assert_eq!(&coordinate.artifact, &segments[n - 2]);
        prop_assert_eq!(coordinate.group_id(), segments[..n - 2].join("."));
    }

    #[test]
    fn short_paths_have_no_coordinate(segments in prop::collection::vec("[a-z]{1,8}", 0..3)) {
        prop_assert!(ArtifactCoordinate::from_segments(segments).is_none());
    }

    #[test]
    fn digests_are_deterministic_and_content_sensitive(
        data in prop::collection::vec(any::<u8>(), 1..512),
        index in any::<prop::sample::Index>(),
    ) {
        let mut changed = data.clone();
        let at = index.index(changed.len());
        changed[at] = changed[at].wrapping_add(1);

        for algorithm in Algorithm::ALL {
            let digest = algorithm.digest_hex(&data);
            prop_assert_eq!(&digest, &algorithm.digest_hex(&data.clone()));
            prop_assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            prop_assert_ne!(digest, algorithm.digest_hex(&changed));
        }
    }
}
