use pathedit_core::{
    ControlId, Document, EntityRef, KeyframePos, PathId, SegmentVariant, Vector,
};
use pathedit_editor::{
    AddKeyframe, AddPath, AddSegment, CommandError, ConvertSegment, DragControls, MoveDestination,
    MoveEndControl, MoveKeyframe, MoveOrder, PropertyPatch, RemoveKeyframe,
    RemovePathsAndEndControls, SplitSegment, UpdateProperties,
};

fn empty_path_doc() -> (Document, PathId) {
    let mut doc = Document::new();
    let path = doc.create_path("Path 1");
    let uid = path.uid;
    doc.paths.push(path);
    (doc, uid)
}

/// Appends a linear segment ending at (x, y) and returns the end control.
fn add_linear(doc: &mut Document, path: PathId, x: f64, y: f64) -> ControlId {
    let end = doc.create_end_control(x, y, 0.0);
    let id = end.uid;
    let mut cmd = AddSegment::new(path, end, SegmentVariant::Linear);
    assert!(cmd.execute(doc));
    id
}

/// Appends a cubic segment ending at (x, y) and returns the end control.
fn add_cubic(doc: &mut Document, path: PathId, x: f64, y: f64) -> ControlId {
    let end = doc.create_end_control(x, y, 0.0);
    let id = end.uid;
    let mut cmd = AddSegment::new(path, end, SegmentVariant::Cubic);
    assert!(cmd.execute(doc));
    id
}

fn positions(doc: &Document, path: PathId, segment: usize) -> Vec<Vector> {
    doc.path(path).unwrap().segments[segment]
        .controls
        .iter()
        .map(|id| doc.control(*id).unwrap().pos())
        .collect()
}

#[test]
fn test_add_segment_cubic_on_empty_path() {
    let (mut doc, path) = empty_path_doc();
    let end = doc.create_end_control(10.0, 10.0, 0.0);
    let end_id = end.uid;
    let mut cmd = AddSegment::new(path, end, SegmentVariant::Cubic);
    assert!(cmd.execute(&mut doc));

    assert_eq!(doc.path(path).unwrap().segments.len(), 1);
    assert_eq!(
        positions(&doc, path, 0),
        vec![
            Vector::new(0.0, 0.0),
            Vector::new(0.0, 10.0),
            Vector::new(10.0, 0.0),
            Vector::new(10.0, 10.0),
        ]
    );
    let segment_uid = doc.path(path).unwrap().segments[0].uid;

    cmd.undo(&mut doc);
    assert!(doc.path(path).unwrap().segments.is_empty());
    assert!(doc.control(end_id).is_none());

    cmd.redo(&mut doc);
    let segments = &doc.path(path).unwrap().segments;
    assert_eq!(segments.len(), 1);
    // the identical segment object is reinstated, not a new one
    assert_eq!(segments[0].uid, segment_uid);
    assert_eq!(doc.control(end_id).unwrap().pos(), Vector::new(10.0, 10.0));
}

#[test]
fn test_add_segment_cubic_tangent_continuity() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0); // A(0,0) -> B(10,0)
    add_cubic(&mut doc, path, 20.0, 10.0); // B -> C with synthesized middles

    let got = positions(&doc, path, 1);
    // p1 mirrors the previous second-to-last control (A) through B
    assert_eq!(got[1], Vector::new(20.0, 0.0));
    // p2 is the midpoint of B and C
    assert_eq!(got[2], Vector::new(15.0, 5.0));
}

#[test]
fn test_add_segment_linear_on_empty_path_creates_origin() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 5.0);
    assert_eq!(
        positions(&doc, path, 0),
        vec![Vector::new(0.0, 0.0), Vector::new(10.0, 5.0)]
    );
    let first = doc.path(path).unwrap().segments[0].first();
    assert!(doc.control(first).unwrap().is_end());
}

#[test]
fn test_add_segment_shares_previous_endpoint() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    add_linear(&mut doc, path, 20.0, 0.0);
    let segments = &doc.path(path).unwrap().segments;
    assert_eq!(segments[0].last(), segments[1].first());
}

#[test]
fn test_convert_segment_to_cubic_uses_neighbor_tangent() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0); // A -> B
    add_linear(&mut doc, path, 10.0, 10.0); // B -> C
    let segment = doc.path(path).unwrap().segments[1].uid;

    let mut cmd = ConvertSegment::new(path, segment, SegmentVariant::Cubic);
    assert!(cmd.execute(&mut doc));

    let got = positions(&doc, path, 1);
    assert_eq!(got.len(), 4);
    // mirror of A through B
    assert_eq!(got[1], Vector::new(20.0, 0.0));
    // no next segment: midpoint of B and C
    assert_eq!(got[2], Vector::new(10.0, 5.0));
    // synthesized middles are plain controls even though A is an endpoint
    let middles = doc.path(path).unwrap().segments[1].middle().to_vec();
    assert!(middles.iter().all(|id| !doc.control(*id).unwrap().is_end()));

    let before = doc.snapshot();
    cmd.undo(&mut doc);
    assert_eq!(doc.path(path).unwrap().segments[1].controls.len(), 2);
    assert!(middles.iter().all(|id| doc.control(*id).is_none()));

    cmd.redo(&mut doc);
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_convert_segment_to_line_detaches_middles() {
    let (mut doc, path) = empty_path_doc();
    add_cubic(&mut doc, path, 10.0, 10.0);
    let segment = doc.path(path).unwrap().segments[0].uid;
    let middles = doc.path(path).unwrap().segments[0].middle().to_vec();
    let before = doc.snapshot();

    let mut cmd = ConvertSegment::new(path, segment, SegmentVariant::Linear);
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.path(path).unwrap().segments[0].controls.len(), 2);
    assert!(middles.iter().all(|id| doc.control(*id).is_none()));

    cmd.undo(&mut doc);
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_convert_linear_to_line_is_a_noop() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    let segment = doc.path(path).unwrap().segments[0].uid;
    let mut cmd = ConvertSegment::new(path, segment, SegmentVariant::Linear);
    assert!(!cmd.execute(&mut doc));
}

#[test]
fn test_split_linear_segment() {
    let (mut doc, path) = empty_path_doc();
    let b = add_linear(&mut doc, path, 12.0, 0.0);
    let segment = doc.path(path).unwrap().segments[0].uid;
    let a = doc.path(path).unwrap().segments[0].first();
    let before = doc.snapshot();

    let point = doc.create_end_control(5.0, 5.0, 0.0);
    let point_id = point.uid;
    let mut cmd = SplitSegment::new(path, segment, point);
    assert!(cmd.execute(&mut doc));

    let segments = &doc.path(path).unwrap().segments;
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].controls, vec![a, point_id]);
    assert_eq!(segments[1].controls, vec![point_id, b]);

    cmd.undo(&mut doc);
    assert_eq!(doc.snapshot(), before);
    assert!(doc.control(point_id).is_none());
}

#[test]
fn test_split_cubic_segment_derives_midpoints() {
    let (mut doc, path) = empty_path_doc();
    add_cubic(&mut doc, path, 10.0, 10.0);
    let segment = doc.path(path).unwrap().segments[0].uid;

    let point = doc.create_end_control(5.0, 5.0, 0.0);
    let point_id = point.uid;
    let mut cmd = SplitSegment::new(path, segment, point);
    assert!(cmd.execute(&mut doc));

    let first = positions(&doc, path, 0);
    let second = positions(&doc, path, 1);
    // original truncated to [p0, p1, mid(p1, point), point]
    assert_eq!(first[2], Vector::new(2.5, 7.5));
    assert_eq!(first[3], Vector::new(5.0, 5.0));
    // inserted segment [point, mid(p2, point), p2, p3]
    assert_eq!(second[0], Vector::new(5.0, 5.0));
    assert_eq!(second[1], Vector::new(7.5, 2.5));
    assert_eq!(second[3], Vector::new(10.0, 10.0));

    let inserted_uid = doc.path(path).unwrap().segments[1].uid;
    let after = doc.snapshot();
    cmd.undo(&mut doc);
    assert_eq!(doc.path(path).unwrap().segments.len(), 1);
    assert!(doc.control(point_id).is_none());

    cmd.redo(&mut doc);
    assert_eq!(doc.snapshot(), after);
    assert_eq!(doc.path(path).unwrap().segments[1].uid, inserted_uid);
}

#[test]
fn test_drag_moves_main_absolutely_and_followers_relatively() {
    let (mut doc, path) = empty_path_doc();
    add_cubic(&mut doc, path, 10.0, 10.0);
    let segments = &doc.path(path).unwrap().segments;
    let main = segments[0].last();
    let followers = segments[0].middle().to_vec();

    // the drag origin is not exactly the main control's position
    let mut cmd = DragControls::new(
        main,
        Vector::new(10.0, 10.0),
        Vector::new(13.0, 14.0),
        followers.clone(),
    );
    assert!(cmd.execute(&mut doc));

    assert_eq!(doc.control(main).unwrap().pos(), Vector::new(13.0, 14.0));
    assert_eq!(
        doc.control(followers[0]).unwrap().pos(),
        Vector::new(3.0, 14.0)
    );
    assert_eq!(
        doc.control(followers[1]).unwrap().pos(),
        Vector::new(13.0, 4.0)
    );

    cmd.undo(&mut doc);
    assert_eq!(doc.control(main).unwrap().pos(), Vector::new(10.0, 10.0));
    assert_eq!(
        doc.control(followers[0]).unwrap().pos(),
        Vector::new(0.0, 10.0)
    );
}

#[test]
fn test_drag_merge_requires_same_main_and_followers() {
    let (mut doc, path) = empty_path_doc();
    add_cubic(&mut doc, path, 10.0, 10.0);
    let segments = &doc.path(path).unwrap().segments;
    let main = segments[0].last();
    let other = segments[0].first();

    let mut first = DragControls::new(main, Vector::new(10.0, 10.0), Vector::new(12.0, 12.0), vec![]);
    first.execute(&mut doc);
    let second = DragControls::new(main, Vector::new(12.0, 12.0), Vector::new(15.0, 15.0), vec![]);
    let third = DragControls::new(other, Vector::new(0.0, 0.0), Vector::new(1.0, 1.0), vec![]);

    assert!(!first.merge(&third));
    assert!(first.merge(&second));

    // single undo of the merged command returns to the pre-first state
    first.undo(&mut doc);
    assert_eq!(doc.control(main).unwrap().pos(), Vector::new(10.0, 10.0));
}

#[test]
fn test_remove_shared_end_control_relinks_segments() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    let b = add_linear(&mut doc, path, 10.0, 10.0);
    add_linear(&mut doc, path, 0.0, 10.0);
    let before = doc.snapshot();
    let original_uids: Vec<_> = doc.path(path).unwrap().segments.iter().map(|s| s.uid).collect();
    let c = doc.path(path).unwrap().segments[1].last();

    let mut cmd = RemovePathsAndEndControls::new(&doc, &[EntityRef::Control(b)]);
    assert!(cmd.has_targets());
    assert!(cmd.execute(&mut doc));

    let segments = &doc.path(path).unwrap().segments;
    assert_eq!(segments.len(), 2);
    // the first segment's last was relinked to the removed segment's last
    assert_eq!(segments[0].last(), c);
    assert!(doc.control(b).is_none());
    assert!(cmd.entities().is_empty()); // forward: nothing to highlight

    cmd.undo(&mut doc);
    assert_eq!(doc.snapshot(), before);
    let restored: Vec<_> = doc.path(path).unwrap().segments.iter().map(|s| s.uid).collect();
    assert_eq!(restored, original_uids);
    // after undo the removed entities are reported for highlighting
    assert_eq!(cmd.entities(), vec![EntityRef::Control(b)]);

    cmd.redo(&mut doc);
    assert_eq!(doc.path(path).unwrap().segments.len(), 2);
    assert!(doc.control(b).is_none());
}

#[test]
fn test_remove_first_and_last_end_controls() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    add_linear(&mut doc, path, 10.0, 10.0);
    let a = doc.path(path).unwrap().segments[0].first();
    let c = doc.path(path).unwrap().segments[1].last();

    let mut cmd = RemovePathsAndEndControls::new(&doc, &[EntityRef::Control(a)]);
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.path(path).unwrap().segments.len(), 1);
    assert!(doc.control(a).is_none());
    cmd.undo(&mut doc);

    let mut cmd = RemovePathsAndEndControls::new(&doc, &[EntityRef::Control(c)]);
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.path(path).unwrap().segments.len(), 1);
    assert!(doc.control(c).is_none());
    // the shared first control of the removed last segment survives
    let survivor = doc.path(path).unwrap().segments[0].last();
    assert!(doc.control(survivor).is_some());
}

#[test]
fn test_remove_sole_segment_removes_all_controls() {
    let (mut doc, path) = empty_path_doc();
    let b = add_linear(&mut doc, path, 10.0, 0.0);
    let a = doc.path(path).unwrap().segments[0].first();

    let mut cmd = RemovePathsAndEndControls::new(&doc, &[EntityRef::Control(a)]);
    assert!(cmd.execute(&mut doc));
    assert!(doc.path(path).unwrap().segments.is_empty());
    assert!(doc.control(a).is_none());
    assert!(doc.control(b).is_none());
}

#[test]
fn test_remove_path_covers_its_controls() {
    let (mut doc, path1) = empty_path_doc();
    let b = add_linear(&mut doc, path1, 10.0, 0.0);
    let path2 = doc.create_path("Path 2");
    let path2_uid = path2.uid;
    doc.paths.push(path2);
    let d = add_linear(&mut doc, path2_uid, 5.0, 5.0);
    let before = doc.snapshot();

    // the end control of the removed path must not be processed separately
    let mut cmd = RemovePathsAndEndControls::new(
        &doc,
        &[EntityRef::Path(path1), EntityRef::Control(b), EntityRef::Control(d)],
    );
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.paths.len(), 1);
    assert!(doc.control(b).is_none());
    assert!(doc.control(d).is_none());
    assert!(doc.path(path2_uid).unwrap().segments.is_empty());

    cmd.undo(&mut doc);
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_remove_with_no_resolvable_targets() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    let cmd = RemovePathsAndEndControls::new(&doc, &[EntityRef::Path(PathId(9999))]);
    assert!(!cmd.has_targets());
    let mut cmd = cmd;
    assert!(!cmd.execute(&mut doc));
}

#[test]
fn test_move_end_control_within_path() {
    let (mut doc, path) = empty_path_doc();
    let b = add_linear(&mut doc, path, 10.0, 0.0);
    let c = add_linear(&mut doc, path, 10.0, 10.0);
    let before = doc.snapshot();

    let mut cmd = MoveEndControl::new(
        &doc,
        c,
        MoveDestination::Control(b),
        MoveOrder::Before,
    )
    .unwrap();
    assert!(cmd.execute(&mut doc));

    let segments = &doc.path(path).unwrap().segments;
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].last(), c);
    assert_eq!(segments[1].first(), c);
    assert_eq!(segments[1].last(), b);
    assert!(cmd.entities().contains(&EntityRef::Control(c)));

    cmd.undo(&mut doc);
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_move_end_control_across_paths() {
    let (mut doc, path1) = empty_path_doc();
    let b = add_linear(&mut doc, path1, 10.0, 0.0);
    let a = doc.path(path1).unwrap().segments[0].first();
    let path2 = {
        let path = doc.create_path("Path 2");
        let uid = path.uid;
        doc.paths.push(path);
        uid
    };
    let d = add_linear(&mut doc, path2, 5.0, 5.0);
    let before = doc.snapshot();

    let mut cmd =
        MoveEndControl::new(&doc, b, MoveDestination::Control(d), MoveOrder::After).unwrap();
    assert!(cmd.execute(&mut doc));

    // the source path collapses: its remaining lone endpoint leaves the canvas
    assert!(doc.path(path1).unwrap().segments.is_empty());
    assert!(doc.control(a).is_none());
    assert!(cmd.entities().contains(&EntityRef::Control(a)));

    let segments = &doc.path(path2).unwrap().segments;
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].first(), d);
    assert_eq!(segments[1].last(), b);

    let after = doc.snapshot();
    cmd.undo(&mut doc);
    assert_eq!(doc.snapshot(), before);
    assert!(doc.control(a).is_some());

    cmd.redo(&mut doc);
    assert_eq!(doc.snapshot(), after);
}

#[test]
fn test_move_end_control_clips_excess_middles() {
    let (mut doc, path1) = empty_path_doc();
    let b = add_cubic(&mut doc, path1, 10.0, 10.0);
    add_cubic(&mut doc, path1, 20.0, 20.0);
    let seg0_middles = doc.path(path1).unwrap().segments[0].middle().to_vec();
    let seg1_middles = doc.path(path1).unwrap().segments[1].middle().to_vec();
    let path2 = {
        let path = doc.create_path("Path 2");
        let uid = path.uid;
        doc.paths.push(path);
        uid
    };
    let y = add_linear(&mut doc, path2, 5.0, 5.0);
    let before = doc.snapshot();

    // removing b from its path leaves four middles in one run
    let mut cmd =
        MoveEndControl::new(&doc, b, MoveDestination::Control(y), MoveOrder::After).unwrap();
    assert!(cmd.execute(&mut doc));

    let merged = &doc.path(path1).unwrap().segments;
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].controls.len(), 4);
    // clipped to the first and last middle of the run; the interior is dropped
    assert_eq!(merged[0].middle(), &[seg0_middles[0], seg1_middles[1]]);
    assert!(doc.control(seg0_middles[1]).is_none());
    assert!(doc.control(seg1_middles[0]).is_none());
    assert!(cmd.entities().contains(&EntityRef::Control(seg0_middles[1])));
    assert!(cmd.entities().contains(&EntityRef::Control(seg1_middles[0])));

    cmd.undo(&mut doc);
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_move_end_control_invalid_constructions() {
    let (mut doc, path) = empty_path_doc();
    let b = add_linear(&mut doc, path, 10.0, 0.0);

    assert_eq!(
        MoveEndControl::new(&doc, b, MoveDestination::Control(b), MoveOrder::Before).unwrap_err(),
        CommandError::SelfDestination
    );

    let loose = doc.create_end_control(1.0, 1.0, 0.0);
    let loose_id = loose.uid;
    doc.insert_control(loose);
    assert_eq!(
        MoveEndControl::new(&doc, loose_id, MoveDestination::Path(path), MoveOrder::After)
            .unwrap_err(),
        CommandError::DetachedControl(loose_id)
    );

    assert_eq!(
        MoveEndControl::new(&doc, b, MoveDestination::Path(PathId(9999)), MoveOrder::After)
            .unwrap_err(),
        CommandError::UnknownPath(PathId(9999))
    );

    assert_eq!(
        MoveEndControl::new(&doc, b, MoveDestination::Path(path), MoveOrder::Before).unwrap_err(),
        CommandError::NoPrecedingPath
    );
}

#[test]
fn test_add_keyframe_sorted_insert() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    let segment = doc.path(path).unwrap().segments[0].uid;

    let mut late = AddKeyframe::new(path, KeyframePos::new(segment, 0.8, 0.5));
    assert!(late.execute(&mut doc));
    let mut early = AddKeyframe::new(path, KeyframePos::new(segment, 0.2, 0.9));
    assert!(early.execute(&mut doc));

    let profiles = &doc.path(path).unwrap().segments[0].speed_profiles;
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].x_pos, 0.2);
    assert_eq!(profiles[1].x_pos, 0.8);

    let early_uid = early.keyframe().unwrap().uid;
    early.undo(&mut doc);
    let profiles = &doc.path(path).unwrap().segments[0].speed_profiles;
    assert_eq!(profiles.len(), 1);
    assert!(profiles.iter().all(|kf| kf.uid != early_uid));

    early.redo(&mut doc);
    let profiles = &doc.path(path).unwrap().segments[0].speed_profiles;
    assert_eq!(profiles[0].uid, early_uid);
}

#[test]
fn test_move_keyframe_across_segments_and_merge() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    add_linear(&mut doc, path, 20.0, 0.0);
    let seg1 = doc.path(path).unwrap().segments[0].uid;
    let seg2 = doc.path(path).unwrap().segments[1].uid;

    let mut add = AddKeyframe::new(path, KeyframePos::new(seg1, 0.5, 0.5));
    assert!(add.execute(&mut doc));
    let kf = add.keyframe().unwrap().uid;

    let mut first = MoveKeyframe::new(path, KeyframePos::new(seg2, 0.3, 0.7), kf);
    assert!(first.execute(&mut doc));
    assert!(doc.path(path).unwrap().segments[0].speed_profiles.is_empty());
    assert_eq!(doc.path(path).unwrap().segments[1].speed_profiles[0].x_pos, 0.3);

    let mut second = MoveKeyframe::new(path, KeyframePos::new(seg2, 0.6, 0.4), kf);
    assert!(second.execute(&mut doc));
    assert!(first.merge(&second));

    // one undo of the merged move restores the original position
    first.undo(&mut doc);
    let profiles = &doc.path(path).unwrap().segments[0].speed_profiles;
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].x_pos, 0.5);
    assert_eq!(profiles[0].y_pos, 0.5);

    first.redo(&mut doc);
    let profiles = &doc.path(path).unwrap().segments[1].speed_profiles;
    assert_eq!(profiles[0].x_pos, 0.6);
}

#[test]
fn test_move_keyframe_unknown_is_a_noop() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    let seg = doc.path(path).unwrap().segments[0].uid;
    let bogus = pathedit_core::KeyframeId(9999);
    let mut cmd = MoveKeyframe::new(path, KeyframePos::new(seg, 0.5, 0.5), bogus);
    assert!(!cmd.execute(&mut doc));
}

#[test]
fn test_remove_keyframe_reinserts_at_exact_index() {
    let (mut doc, path) = empty_path_doc();
    add_linear(&mut doc, path, 10.0, 0.0);
    let segment = doc.path(path).unwrap().segments[0].uid;
    for (x, y) in [(0.2, 0.1), (0.5, 0.2), (0.8, 0.3)] {
        let mut add = AddKeyframe::new(path, KeyframePos::new(segment, x, y));
        assert!(add.execute(&mut doc));
    }
    let middle = doc.path(path).unwrap().segments[0].speed_profiles[1].uid;

    let mut cmd = RemoveKeyframe::new(path, middle);
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.path(path).unwrap().segments[0].speed_profiles.len(), 2);

    cmd.undo(&mut doc);
    let profiles = &doc.path(path).unwrap().segments[0].speed_profiles;
    assert_eq!(profiles.len(), 3);
    assert_eq!(profiles[1].uid, middle);

    cmd.redo(&mut doc);
    assert_eq!(doc.path(path).unwrap().segments[0].speed_profiles.len(), 2);
}

#[test]
fn test_update_properties_patch_and_undo() {
    let (mut doc, path) = empty_path_doc();
    let patch = PropertyPatch {
        name: Some("Auton Left".to_string()),
        visible: Some(false),
        ..Default::default()
    };
    let mut cmd = UpdateProperties::new(vec![EntityRef::Path(path)], patch);
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.path(path).unwrap().name, "Auton Left");
    assert!(!doc.path(path).unwrap().visible);

    cmd.undo(&mut doc);
    assert_eq!(doc.path(path).unwrap().name, "Path 1");
    assert!(doc.path(path).unwrap().visible);
}

#[test]
fn test_update_properties_reports_no_change() {
    let (mut doc, path) = empty_path_doc();
    let patch = PropertyPatch {
        name: Some("Path 1".to_string()),
        ..Default::default()
    };
    let mut cmd = UpdateProperties::new(vec![EntityRef::Path(path)], patch);
    assert!(!cmd.execute(&mut doc));
}

#[test]
fn test_update_properties_merge_keeps_earliest_previous() {
    let (mut doc, path) = empty_path_doc();
    let mut first = UpdateProperties::new(
        vec![EntityRef::Path(path)],
        PropertyPatch {
            name: Some("Step 1".to_string()),
            ..Default::default()
        },
    );
    assert!(first.execute(&mut doc));
    let mut second = UpdateProperties::new(
        vec![EntityRef::Path(path)],
        PropertyPatch {
            name: Some("Step 2".to_string()),
            visible: Some(false),
            ..Default::default()
        },
    );
    assert!(second.execute(&mut doc));
    assert!(first.merge(&second));

    first.undo(&mut doc);
    assert_eq!(doc.path(path).unwrap().name, "Path 1");
    assert!(doc.path(path).unwrap().visible);

    first.redo(&mut doc);
    assert_eq!(doc.path(path).unwrap().name, "Step 2");
    assert!(!doc.path(path).unwrap().visible);
}

#[test]
fn test_update_properties_heading_needs_end_control() {
    let (mut doc, path) = empty_path_doc();
    add_cubic(&mut doc, path, 10.0, 10.0);
    let middle = doc.path(path).unwrap().segments[0].middle()[0];
    let end = doc.path(path).unwrap().segments[0].last();

    let patch = PropertyPatch {
        heading: Some(90.0),
        ..Default::default()
    };
    let mut cmd = UpdateProperties::new(vec![EntityRef::Control(middle)], patch.clone());
    assert!(!cmd.execute(&mut doc));

    let mut cmd = UpdateProperties::new(vec![EntityRef::Control(end)], patch);
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.control(end).unwrap().heading(), Some(90.0));
}

#[test]
fn test_add_path_adopts_and_releases_controls() {
    let mut doc = Document::new();
    let mut path = doc.create_path("Path 1");
    let uid = path.uid;
    let a = doc.create_end_control(0.0, 0.0, 0.0);
    let b = doc.create_end_control(10.0, 0.0, 0.0);
    path.segments.push(pathedit_core::Segment::new(
        doc.alloc_segment_id(),
        a.uid,
        vec![],
        b.uid,
    ));
    let (a_id, b_id) = (a.uid, b.uid);

    let mut cmd = AddPath::new(path, vec![a, b]);
    assert!(cmd.execute(&mut doc));
    assert_eq!(doc.paths.len(), 1);
    assert!(doc.control(a_id).is_some());
    let entities = cmd.entities();
    assert!(entities.contains(&EntityRef::Path(uid)));
    assert!(entities.contains(&EntityRef::Control(a_id)));

    cmd.undo(&mut doc);
    assert!(doc.paths.is_empty());
    assert!(doc.control(a_id).is_none());
    assert!(cmd.entities().is_empty());

    cmd.redo(&mut doc);
    assert_eq!(doc.paths.len(), 1);
    assert!(doc.control(b_id).is_some());
}
