//! Tests for proximity merging.

use super::*;
use crate::ribbon::append_segment_quad;
use approx::assert_relative_eq;
use glam::{DMat4, DVec3};

/// Strip along +X at height `y`, `segments` quads of length 0.1, width 0.02.
fn strip_at(y: f64, x0: f64, segments: usize) -> Mesh {
    let mut mesh = Mesh::new();
    for s in 0..segments {
        let start = DVec3::new(x0 + s as f64 * 0.1, y, 0.0);
        let end = DVec3::new(x0 + (s + 1) as f64 * 0.1, y, 0.0);
        append_segment_quad(&mut mesh, start, end, 0.02);
    }
    mesh
}

fn merger() -> MeshMerger {
    MeshMerger::new(0.01).unwrap()
}

#[test]
fn rejects_invalid_tolerance() {
    assert_eq!(
        MeshMerger::new(0.0).unwrap_err(),
        MeshError::Config(ConfigError::InvalidMergeDistance(0.0))
    );
    assert!(MeshMerger::new(f64::INFINITY).is_err());
    assert_eq!(
        MeshMerger::from_config(&RibbonConfig::default()).unwrap().tolerance(),
        0.01
    );
}

#[test]
fn should_merge_is_symmetric() {
    let mut set = MeshSet::new();
    let near = [0.0, 0.004, 0.0099, 0.01, 0.02, 0.5];
    for y in near {
        set.insert_sealed(strip_at(0.0, 0.0, 1), DMat4::IDENTITY);
        set.insert_sealed(strip_at(y, 0.0, 1), DMat4::IDENTITY);
    }
    let meshes: Vec<&RibbonMesh> = set.iter().collect();
    let merger = merger();
    for a in &meshes {
        for b in &meshes {
            assert_eq!(merger.should_merge(a, b), merger.should_merge(b, a));
        }
    }
}

#[test]
fn never_merges_mesh_with_itself() {
    let mut set = MeshSet::new();
    let handle = set.insert_sealed(strip_at(0.0, 0.0, 2), DMat4::IDENTITY);
    let mesh = set.get(handle).unwrap();
    assert!(!merger().should_merge(mesh, mesh));
}

#[test]
fn tolerance_is_strict() {
    let a = [DVec3::ZERO];
    let b = [DVec3::new(0.0, 0.01, 0.0)];
    assert!(!vertices_within(&a, &b, 0.01));
    assert!(vertices_within(&a, &b, 0.0101));
    assert!(!vertices_within(&a, &[], 1.0));
}

#[test]
fn distant_meshes_are_left_alone() {
    let mut set = MeshSet::new();
    set.insert_sealed(strip_at(0.0, 0.0, 2), DMat4::IDENTITY);
    set.insert_sealed(strip_at(0.5, 0.0, 2), DMat4::IDENTITY);

    let report = merger().merge_pass(&mut set);
    assert!(report.is_noop());
    assert_eq!(set.len(), 2);
}

#[test]
fn newer_mesh_folds_into_oldest_touching_mesh() {
    let mut set = MeshSet::new();
    let oldest = set.insert_sealed(strip_at(0.0, 0.0, 1), DMat4::IDENTITY);
    let middle = set.insert_sealed(strip_at(0.005, 0.0, 1), DMat4::IDENTITY);
    let newest = set.insert_sealed(strip_at(0.0025, 0.0, 1), DMat4::IDENTITY);

    let report = merger().merge_pass(&mut set);

    assert_eq!(
        report.merges,
        vec![
            MergeRecord { absorbed: newest, target: oldest },
            MergeRecord { absorbed: middle, target: oldest },
        ]
    );
    assert_eq!(set.handles(), vec![oldest]);
    assert_eq!(set.get(oldest).unwrap().mesh().vertex_count(), 12);
    assert_eq!(set.get(oldest).unwrap().mesh().triangle_count(), 6);
}

#[test]
fn bridge_mesh_joins_otherwise_separate_meshes() {
    let mut set = MeshSet::new();
    let left = set.insert_sealed(strip_at(0.0, 0.0, 1), DMat4::IDENTITY);
    set.insert_sealed(strip_at(0.0, 0.3, 1), DMat4::IDENTITY);
    // Spans x = 0.1..0.3, touching both ends
    set.insert_sealed(strip_at(0.0, 0.1, 2), DMat4::IDENTITY);

    let report = merger().merge_pass(&mut set);
    assert_eq!(report.merge_count(), 2);
    assert_eq!(set.handles(), vec![left]);
}

#[test]
fn merge_pass_is_idempotent_once_converged() {
    let mut set = MeshSet::new();
    for (y, x0) in [(0.0, 0.0), (0.0, 0.1), (0.3, 0.0), (0.305, 0.0), (0.8, 0.0)] {
        set.insert_sealed(strip_at(y, x0, 1), DMat4::IDENTITY);
    }

    let merger = merger();
    let first = merger.merge_pass(&mut set);
    let after_first = set.len();
    let second = merger.merge_pass(&mut set);

    assert_eq!(first.merge_count(), 2);
    assert!(second.is_noop());
    assert_eq!(set.len(), after_first);
    assert_eq!(after_first, 3);
}

#[test]
fn empty_and_growing_meshes_are_skipped() {
    let mut set = MeshSet::new();
    let finished = set.insert_sealed(strip_at(0.0, 0.0, 1), DMat4::IDENTITY);
    let empty = set.insert_sealed(Mesh::new(), DMat4::IDENTITY);
    let growing = set.insert(strip_at(0.0, 0.0, 1), DMat4::IDENTITY);

    let report = merger().merge_pass(&mut set);
    assert!(report.is_noop());
    assert_eq!(set.handles(), vec![finished, empty, growing]);

    set.seal(growing).unwrap();
    let report = merger().merge_pass(&mut set);
    assert_eq!(report.merges, vec![MergeRecord { absorbed: growing, target: finished }]);
    assert_eq!(set.handles(), vec![finished, empty]);
}

#[test]
fn proximity_uses_world_space() {
    let mut set = MeshSet::new();
    let shifted = DMat4::from_translation(DVec3::new(0.0, 0.005, 0.0));
    let a = set.insert_sealed(strip_at(0.0, 0.0, 1), DMat4::IDENTITY);
    // Local geometry is far away but the transform brings it alongside
    let b = set.insert_sealed(strip_at(-1.0, 0.0, 1), DMat4::from_translation(DVec3::new(0.0, 1.005, 0.0)));
    let c = set.insert_sealed(strip_at(0.0, 0.0, 1), shifted * DMat4::from_translation(DVec3::Y));

    let merger = merger();
    assert!(merger.should_merge(set.get(a).unwrap(), set.get(b).unwrap()));
    assert!(!merger.should_merge(set.get(a).unwrap(), set.get(c).unwrap()));
}

#[test]
fn combine_maps_source_into_target_frame() {
    let mut set = MeshSet::new();
    let offset = DVec3::new(0.0, 0.0, 2.0);
    let target = set.insert_sealed(strip_at(0.0, 0.0, 1), DMat4::from_translation(offset));
    let source_mesh = strip_at(0.0, 0.1, 1).transformed(&DMat4::from_translation(offset));
    let source = set.insert_sealed(source_mesh, DMat4::IDENTITY);

    let world_before: Vec<DVec3> = set
        .iter()
        .flat_map(|m| m.world_mesh().vertices().to_vec())
        .collect();

    let report = merger().merge_pass(&mut set);
    assert_eq!(report.merges, vec![MergeRecord { absorbed: source, target }]);

    let merged = set.get(target).unwrap();
    assert_eq!(merged.mesh().vertex_count(), 8);
    assert!(merged.mesh().validate());
    for v in merged.mesh().vertices() {
        assert_relative_eq!(v.z.abs(), 0.01, epsilon = 1e-12);
    }
    let world_after = merged.world_mesh();
    for v in &world_before {
        assert!(world_after.vertices().iter().any(|w| w.distance(*v) < 1e-12));
    }
}

#[test]
fn grid_scan_matches_exhaustive_scan() {
    let a: Vec<DVec3> = (0..400).map(|i| DVec3::new(i as f64 * 0.01, 0.0, 0.0)).collect();
    let mut b: Vec<DVec3> = (0..400).map(|i| DVec3::new(i as f64 * 0.01, 0.02, 0.0)).collect();
    assert!(a.len() * b.len() > config::constants::GRID_SCAN_THRESHOLD);

    assert!(!vertices_within(&a, &b, 0.01));
    assert!(!vertices_within(&b, &a, 0.01));

    b[250].y = 0.0099;
    assert!(vertices_within(&a, &b, 0.01));
    assert!(vertices_within(&b, &a, 0.01));
}

#[test]
fn vertex_grid_finds_neighbours_across_cells() {
    let points = [DVec3::new(-0.001, 0.0, 0.0), DVec3::new(0.5, 0.5, 0.5)];
    let grid = VertexGrid::new(&points, 0.01);
    assert!(grid.any_within(DVec3::new(0.001, 0.0, 0.0)));
    assert!(grid.any_within(DVec3::new(0.5, 0.509, 0.5)));
    assert!(!grid.any_within(DVec3::new(0.02, 0.0, 0.0)));
}
