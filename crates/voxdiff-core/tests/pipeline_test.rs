//! End-to-end tests: file or custom source in, score report out.

mod common;

use std::path::Path;

use common::{lcg_voxels, NiftiFixture};
use ndarray::Array4;
use voxdiff_core::config::{EngineConfig, VoxdiffConfig};
use voxdiff_core::volume::OffsetSource;
use voxdiff_core::{
    run, run_with, DataType, LoadedVolume, RunError, ScoreEngine, ScoreListBuilder, SsdError,
    Strategy, Volume, VolumeError, VolumeMetadata, VolumeShape, VolumeSource, VoxdiffErrorCode,
};

/// Serves one fixed in-memory volume for any path.
struct StaticSource(Volume<i16>);

impl VolumeSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn load(&self, _path: &Path) -> Result<LoadedVolume, VolumeError> {
        Ok(LoadedVolume {
            volume: self.0.clone().into(),
            metadata: VolumeMetadata::in_memory(DataType::Int16),
        })
    }
}

fn engine(strategy: Strategy, repeat: u32) -> VoxdiffConfig {
    VoxdiffConfig {
        engine: EngineConfig {
            strategy: Some(strategy),
            threads: None,
            repeat: Some(repeat),
        },
        ..Default::default()
    }
}

#[test]
fn run_scores_file_with_misdeclared_offset() {
    let dir = tempfile::TempDir::new().unwrap();
    let shape = VolumeShape::new(8, 8, 4, 12);
    let voxels = lcg_voxels(shape.total_voxels(), 99);
    let path = NiftiFixture::int16(shape, &voxels)
        .extensions(&[5376])
        .vox_offset(0.0)
        .write(dir.path(), "sub-01_bold.nii");

    let report = run(&path, &VoxdiffConfig::default()).unwrap();
    assert_eq!(report.shape, shape);
    assert_eq!(report.scores.len(), 11);
    assert_eq!(report.metadata.offset_source, OffsetSource::Extensions);
    assert_eq!(report.strategy, Strategy::Flattened);

    let expected = Volume::from_fortran_vec(shape, voxels).unwrap();
    assert_eq!(report.scores, ScoreListBuilder::new(&expected).build().unwrap());
}

#[test]
fn every_strategy_produces_the_same_report_scores() {
    let dir = tempfile::TempDir::new().unwrap();
    let shape = VolumeShape::new(6, 5, 4, 7);
    let path = NiftiFixture::int16(shape, &lcg_voxels(shape.total_voxels(), 5))
        .write(dir.path(), "bold.nii");

    let baseline = run(&path, &engine(Strategy::Flattened, 1)).unwrap().scores;
    for strategy in [Strategy::Nested, Strategy::Parallel] {
        assert_eq!(run(&path, &engine(strategy, 1)).unwrap().scores, baseline);
    }
}

#[test]
fn custom_source_plugs_into_pipeline() {
    let volume = Volume::new(Array4::from_shape_fn((2, 2, 2, 3), |(x, y, z, t)| {
        ((x + 2 * y + 4 * z) * t) as i16
    }));
    let report = run_with(&StaticSource(volume), Path::new("memory"), &engine(Strategy::Nested, 3))
        .unwrap();
    // frame t = t * idx, so SSD = t^2 * sum(idx^2) = t^2 * 140
    assert_eq!(report.scores.as_slice(), &[140, 560]);
    assert_eq!(report.score_timing.runs, 3);
    assert_eq!(report.load_timing.runs, 1);
    assert_eq!(report.metadata.offset_source, OffsetSource::InMemory);
}

#[test]
fn repeated_parallel_runs_share_one_dedicated_pool() {
    let volume = Volume::new(Array4::from_shape_fn((4, 3, 2, 6), |(x, y, _, t)| {
        ((x + y) * t) as i16
    }));
    let mut config = engine(Strategy::Parallel, 5);
    config.engine.threads = Some(2);

    let report = run_with(&StaticSource(volume.clone()), Path::new("memory"), &config).unwrap();
    assert_eq!(report.threads, 2);
    assert_eq!(report.score_timing.runs, 5);
    assert_eq!(report.scores, ScoreListBuilder::new(&volume).build().unwrap());

    let engine = ScoreEngine::new(Strategy::Parallel, 2).unwrap();
    assert_eq!(engine.pool_threads(), Some(2));
    assert_eq!(engine.score(&volume.clone().into()).unwrap(), report.scores);
}

#[test]
fn single_frame_file_fails_without_partial_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let shape = VolumeShape::new(3, 3, 3, 1);
    let path = NiftiFixture::int16(shape, &lcg_voxels(27, 1)).write(dir.path(), "t1.nii");

    let err = run(&path, &VoxdiffConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::Ssd(SsdError::TooFewFrames { frames: 1 })));
    assert_eq!(err.error_code(), "SHAPE_ERROR");
}

#[test]
fn missing_file_propagates_volume_error() {
    let err = run(Path::new("/nonexistent/bold.nii"), &VoxdiffConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::Volume(VolumeError::FileNotFound { .. })));
}

#[test]
fn report_serializes_to_json() {
    let volume = Volume::new(Array4::<i16>::zeros((2, 2, 2, 3)));
    let report =
        run_with(&StaticSource(volume), Path::new("memory"), &VoxdiffConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["scores"], serde_json::json!([0, 0]));
    assert_eq!(json["strategy"], "flattened");
    assert_eq!(json["shape"]["t"], 3);
    assert!(json["score_timing"]["total"].is_f64());
}

/// Reference fMRI run (64x64x34x200, int16, 5376 bytes of extensions with a
/// vox_offset of 0). Point `VOXDIFF_REFERENCE_NII` at the file to enable.
#[test]
#[ignore]
fn reference_volume_regression() {
    let Some(path) = std::env::var_os("VOXDIFF_REFERENCE_NII") else {
        return;
    };
    let report = run(Path::new(&path), &VoxdiffConfig::default()).unwrap();
    assert_eq!(report.shape, VolumeShape::new(64, 64, 34, 200));
    assert_eq!(report.metadata.data_offset, 5728);
    assert_eq!(report.scores.len(), 199);
    assert_eq!(report.scores.first(), Some(36_263_554));
    assert_eq!(report.scores.last(), Some(198_750_728));

    let nested = run(Path::new(&path), &engine(Strategy::Nested, 1)).unwrap();
    assert_eq!(nested.scores, report.scores);
}
