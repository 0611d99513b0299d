//! Integration tests for constraint creation, cascading and persistence,
//! driven through the public API against an in-memory canvas.

use canvas_align::constraint::{
    apply_around, apply_constraints, export, import, CONNECTIVITY_DEPTH_LIMIT,
};
use canvas_align::{
    Anchor, Canvas, ConstraintError, ConstraintStore, Endpoint, EngineContext, Rect, WidgetId,
    WidgetPort,
};
use pretty_assertions::assert_eq;

fn x_of(canvas: &Canvas, id: &str) -> f64 {
    canvas
        .rect(&WidgetId::new(id))
        .unwrap_or_else(|| panic!("widget '{}' not found", id))
        .x
}

/// Widgets w0..w{n-1}, 10 wide, each one's left edge tied to the previous
/// one's right edge.
fn chain(n: usize) -> (Canvas, ConstraintStore) {
    let mut canvas = Canvas::new();
    for i in 0..n {
        canvas
            .add(format!("w{}", i).as_str(), Rect::new(i as f64 * 10.0, 0.0, 10.0, 10.0))
            .expect("add widget");
    }
    let mut store = ConstraintStore::new();
    for i in 1..n {
        store
            .create(
                &mut canvas,
                Endpoint::new(format!("w{}", i).as_str(), Anchor::LEFT),
                Endpoint::new(format!("w{}", i - 1).as_str(), Anchor::RIGHT),
            )
            .expect("create link");
    }
    (canvas, store)
}

#[test]
fn test_create_moves_dependent_and_indexes_both_ends() {
    let mut canvas = Canvas::new();
    canvas.add("a", Rect::new(10.0, 10.0, 50.0, 30.0)).unwrap();
    canvas.add("b", Rect::new(200.0, 80.0, 40.0, 40.0)).unwrap();
    let mut store = ConstraintStore::new();

    let a = Endpoint::new("b", Anchor::CENTER_Y);
    let b = Endpoint::new("a", Anchor::CENTER_Y);
    let id = store.create(&mut canvas, a.clone(), b.clone()).unwrap();

    // b's center line moves to a's (25), a stays put
    assert_eq!(canvas.rect(&"b".into()), Some(Rect::new(200.0, 5.0, 40.0, 40.0)));
    assert_eq!(canvas.rect(&"a".into()), Some(Rect::new(10.0, 10.0, 50.0, 30.0)));

    assert_eq!(store.find(&a, &b).map(|c| c.id.clone()), Some(id.clone()));
    assert_eq!(store.incident_to(&"a".into()).len(), 1);
    assert_eq!(store.incident_to(&"b".into()).len(), 1);
    assert!(store.connected(&"a".into(), &"b".into()));

    let used = store.used_anchors(&"a".into());
    assert_eq!(used.len(), 1);
    assert_eq!(used[&Anchor::CENTER_Y][0].other.id, WidgetId::new("b"));
}

#[test]
fn test_invalid_links_are_rejected_without_side_effects() {
    let mut canvas = Canvas::new();
    canvas.add("a", Rect::new(0.0, 0.0, 50.0, 30.0)).unwrap();
    canvas.add("b", Rect::new(100.0, 0.0, 50.0, 30.0)).unwrap();
    let mut store = ConstraintStore::new();

    let self_link = store.create(
        &mut canvas,
        Endpoint::new("a", Anchor::LEFT),
        Endpoint::new("a", Anchor::RIGHT),
    );
    assert!(matches!(self_link, Err(ConstraintError::InvalidConstraint { .. })));

    let cross_axis = store.create(
        &mut canvas,
        Endpoint::new("a", Anchor::LEFT),
        Endpoint::new("b", Anchor::TOP),
    );
    assert!(matches!(cross_axis, Err(ConstraintError::InvalidConstraint { .. })));

    let missing = store.create(
        &mut canvas,
        Endpoint::new("a", Anchor::LEFT),
        Endpoint::new("ghost", Anchor::LEFT),
    );
    assert_eq!(missing, Err(ConstraintError::unknown("ghost")));

    assert!(store.is_empty());
    assert_eq!(x_of(&canvas, "b"), 100.0);
}

#[test]
fn test_cascade_depth_cap_and_continuation() {
    let (mut canvas, store) = chain(10);
    canvas.set_position(&"w0".into(), 5.0, 0.0).unwrap();

    let first = apply_around(&store, &mut canvas, &"w0".into(), 3);
    assert_eq!(
        first.moved,
        vec![WidgetId::new("w1"), WidgetId::new("w2"), WidgetId::new("w3")]
    );
    assert_eq!(first.frontier, vec![WidgetId::new("w3")]);
    assert_eq!(x_of(&canvas, "w3"), 35.0);
    assert_eq!(x_of(&canvas, "w4"), 40.0);

    // picking up from the frontier carries the shift three more hops
    let second = apply_around(&store, &mut canvas, &"w3".into(), 3);
    assert_eq!(
        second.moved,
        vec![WidgetId::new("w4"), WidgetId::new("w5"), WidgetId::new("w6")]
    );
    assert_eq!(x_of(&canvas, "w6"), 65.0);
    assert_eq!(x_of(&canvas, "w7"), 70.0);
    assert_eq!(x_of(&canvas, "w0"), 5.0);
}

#[test]
fn test_cascade_does_not_move_dragged_widget_back() {
    let (mut canvas, store) = chain(3);
    canvas.set_position(&"w1".into(), 40.0, 0.0).unwrap();
    apply_around(&store, &mut canvas, &"w1".into(), 8);
    assert_eq!(x_of(&canvas, "w1"), 40.0);
    assert_eq!(x_of(&canvas, "w0"), 30.0);
    assert_eq!(x_of(&canvas, "w2"), 50.0);
}

#[test]
fn test_connectivity_hop_ceiling() {
    let (_, store) = chain(CONNECTIVITY_DEPTH_LIMIT + 2);
    let last_reachable = WidgetId::new(format!("w{}", CONNECTIVITY_DEPTH_LIMIT));
    let beyond = WidgetId::new(format!("w{}", CONNECTIVITY_DEPTH_LIMIT + 1));
    assert!(store.connected(&"w0".into(), &last_reachable));
    assert!(!store.connected(&"w0".into(), &beyond));
}

#[test]
fn test_global_relaxation_is_idempotent() {
    let (mut canvas, store) = chain(5);
    for i in 0..5 {
        canvas
            .set_position(&WidgetId::new(format!("w{}", i)), 100.0 - i as f64 * 17.0, 0.0)
            .unwrap();
    }

    let first = apply_constraints(&store, &mut canvas);
    assert!(first.converged);
    let settled: Vec<f64> = (0..5).map(|i| x_of(&canvas, &format!("w{}", i))).collect();
    assert_eq!(settled, vec![100.0, 110.0, 120.0, 130.0, 140.0]);

    let second = apply_constraints(&store, &mut canvas);
    assert_eq!(second.iterations, 1);
    assert!(second.converged);
    let again: Vec<f64> = (0..5).map(|i| x_of(&canvas, &format!("w{}", i))).collect();
    assert_eq!(again, settled);
}

#[test]
fn test_persistence_round_trip_ignores_list_order() {
    let (_, store) = chain(4);
    let json = export(&store).unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    if let Some(list) = value["list"].as_array_mut() {
        list.reverse();
    }
    let reversed = value.to_string();

    let scrambled = || {
        let mut canvas = Canvas::new();
        for (i, x) in [7.0, 300.0, -40.0, 12.5].iter().enumerate() {
            canvas
                .add(format!("w{}", i).as_str(), Rect::new(*x, 0.0, 10.0, 10.0))
                .unwrap();
        }
        canvas
    };

    let mut forward_canvas = scrambled();
    let mut forward_store = ConstraintStore::new();
    let forward = import(&mut forward_store, &mut forward_canvas, &json).unwrap();

    let mut reverse_canvas = scrambled();
    let mut reverse_store = ConstraintStore::new();
    let reverse = import(&mut reverse_store, &mut reverse_canvas, &reversed).unwrap();

    assert!(forward.converged && reverse.converged);
    assert_eq!(forward_canvas, reverse_canvas);
    assert_eq!(export(&reverse_store).unwrap(), json);
    assert_eq!(x_of(&forward_canvas, "w3"), 37.0);
}

#[test]
fn test_context_link_unlink_and_remove() {
    let mut canvas = Canvas::new();
    canvas.add("a", Rect::new(0.0, 0.0, 50.0, 30.0)).unwrap();
    canvas.add("b", Rect::new(100.0, 100.0, 50.0, 30.0)).unwrap();
    canvas.add("c", Rect::new(300.0, 300.0, 50.0, 30.0)).unwrap();
    let mut ctx = EngineContext::new();

    let ab = ctx
        .link(
            &mut canvas,
            Endpoint::new("b", Anchor::TOP),
            Endpoint::new("a", Anchor::BOTTOM),
        )
        .unwrap();
    ctx.link(
        &mut canvas,
        Endpoint::new("c", Anchor::TOP),
        Endpoint::new("b", Anchor::BOTTOM),
    )
    .unwrap();
    assert_eq!(canvas.rect(&"c".into()).map(|r| r.y), Some(60.0));

    assert!(ctx.unlink(&ab).is_some());
    assert!(ctx.unlink(&ab).is_none());
    assert_eq!(ctx.constraints.len(), 1);

    let removed = ctx.remove_widget(&"c".into());
    assert_eq!(removed.len(), 1);
    assert!(ctx.constraints.is_empty());
}
