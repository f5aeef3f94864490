use ndarray::Array4;
use proptest::prelude::*;
use voxdiff_core::{pairwise_ssd, ScoreListBuilder, Strategy as LoopStrategy, Volume};

fn frame_pair() -> impl Strategy<Value = (Vec<i16>, Vec<i16>)> {
    (0usize..256).prop_flat_map(|len| {
        (
            prop::collection::vec(any::<i16>(), len),
            prop::collection::vec(any::<i16>(), len),
        )
    })
}

fn small_volume() -> impl Strategy<Value = Volume<i16>> {
    (1usize..5, 1usize..5, 1usize..4, 2usize..6).prop_flat_map(|(x, y, z, t)| {
        prop::collection::vec(any::<i16>(), x * y * z * t).prop_map(move |voxels| {
            Volume::new(Array4::from_shape_vec((x, y, z, t), voxels).unwrap())
        })
    })
}

proptest! {
    #[test]
    fn ssd_is_symmetric((a, b) in frame_pair()) {
        prop_assert_eq!(pairwise_ssd(&a, &b).unwrap(), pairwise_ssd(&b, &a).unwrap());
    }

    #[test]
    fn ssd_of_frame_with_itself_is_zero(a in prop::collection::vec(any::<i16>(), 0..256)) {
        prop_assert_eq!(pairwise_ssd(&a, &a).unwrap(), 0);
    }

    #[test]
    fn ssd_is_non_negative((a, b) in frame_pair()) {
        prop_assert!(pairwise_ssd(&a, &b).unwrap() >= 0);
    }

    #[test]
    fn unequal_lengths_always_fail(
        a in prop::collection::vec(any::<u8>(), 0..64),
        b in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(a.len() != b.len());
        prop_assert!(pairwise_ssd(&a, &b).unwrap_err().is_shape_error());
    }

    #[test]
    fn score_count_is_frames_minus_one(volume in small_volume()) {
        let scores = ScoreListBuilder::new(&volume).build().unwrap();
        prop_assert_eq!(scores.len(), volume.frames() - 1);
    }

    #[test]
    fn strategies_agree(volume in small_volume()) {
        let flattened = ScoreListBuilder::new(&volume).build().unwrap();
        let nested = ScoreListBuilder::new(&volume).strategy(LoopStrategy::Nested).build().unwrap();
        let parallel = ScoreListBuilder::new(&volume).strategy(LoopStrategy::Parallel).build().unwrap();
        prop_assert_eq!(&flattened, &nested);
        prop_assert_eq!(&flattened, &parallel);
    }
}
