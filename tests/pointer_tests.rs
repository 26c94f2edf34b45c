// Host-side tests for the pointer engine and the interactive hit-test.
// DOM nodes are replaced by a small mock implementing `HitTarget`.

use ambient_motion::core::*;
use std::rc::Rc;

#[derive(Clone)]
struct MockNode {
    tag: &'static str,
    attrs: Vec<(&'static str, &'static str)>,
    parent: Option<Rc<MockNode>>,
}

impl MockNode {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            parent: None,
        }
    }

    fn attr(mut self, name: &'static str, value: &'static str) -> Self {
        self.attrs.push((name, value));
        self
    }

    fn inside(mut self, parent: MockNode) -> Self {
        self.parent = Some(Rc::new(parent));
        self
    }
}

impl HitTarget for MockNode {
    fn tag_name(&self) -> String {
        // the DOM reports upper-case tag names for HTML elements
        self.tag.to_ascii_uppercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| (*v).to_string())
    }

    fn parent(&self) -> Option<Self> {
        self.parent.as_deref().cloned()
    }
}

#[test]
fn allow_list_matches_each_interactive_kind() {
    assert!(is_interactive(Some(MockNode::new("button"))));
    assert!(is_interactive(Some(MockNode::new("a"))));
    assert!(is_interactive(Some(MockNode::new("input"))));
    assert!(is_interactive(Some(MockNode::new("div").attr("role", "button"))));
    assert!(is_interactive(Some(MockNode::new("div").attr("data-cursor-hover", ""))));
}

#[test]
fn plain_elements_are_not_interactive() {
    assert!(!is_interactive(Some(MockNode::new("div"))));
    assert!(!is_interactive(Some(MockNode::new("span").attr("role", "presentation"))));
    assert!(!is_interactive::<MockNode>(None));
}

#[test]
fn hit_test_walks_up_to_interactive_ancestor() {
    let icon = MockNode::new("svg").inside(MockNode::new("span").inside(MockNode::new("button")));
    assert!(is_interactive(Some(icon)));
}

#[test]
fn selector_list_covers_every_matcher() {
    let sel = interactive_selector();
    for m in INTERACTIVE_MATCHERS {
        assert!(sel.contains(&m.selector()), "missing {:?} in {sel}", m);
    }
    assert!(sel.contains("[role=\"button\"]"));
    assert!(sel.contains("[data-cursor-hover]"));
}

#[test]
fn initial_state_is_off_screen() {
    let s = PointerState::default();
    assert!(!s.has_position());
    assert!(s.x < 0.0 && s.y < 0.0);
    assert_eq!(s.speed, 0.0);
    assert!(!s.is_over_interactive);
}

#[test]
fn straight_line_at_constant_speed_reads_within_five_percent() {
    let store = SignalStore::new(PointerState::default());
    let mut engine = PointerEngine::new(1920.0, 1080.0);
    let target = MockNode::new("section").inside(MockNode::new("main"));

    // 300 px per tick along a diagonal
    let step = 300.0 / 2f32.sqrt();
    for i in 0..10 {
        let t = i as f32;
        let patch = engine.sample(100.0 + step * t, 50.0 + step * t, Some(target.clone()));
        store.set_state(patch);
        assert!(!store.get_state().is_over_interactive);
    }
    let state = store.get_state();
    assert!((state.speed - 300.0).abs() <= 15.0, "speed {} not within 5% of 300", state.speed);
    assert!(state.has_position());
}

#[test]
fn five_events_are_enough_to_track_constant_speed() {
    let mut engine = PointerEngine::new(1920.0, 1080.0);
    let mut last = PointerPatch::default();
    for i in 0..5 {
        last = engine.sample(300.0 * i as f32, 400.0, Some(MockNode::new("p")));
    }
    let speed = last.speed.unwrap_or_default();
    assert!((speed - 300.0).abs() <= 15.0, "speed {speed}");
    assert_eq!(last.is_over_interactive, Some(false));
}

#[test]
fn first_sample_has_zero_speed() {
    let mut engine = PointerEngine::new(800.0, 600.0);
    let patch = engine.sample(400.0, 300.0, None::<MockNode>);
    assert_eq!(patch.speed, Some(0.0));
    assert_eq!(patch.normalized_x, Some(0.5));
    assert_eq!(patch.normalized_y, Some(0.5));
}

#[test]
fn smoothing_converges_to_constant_input() {
    let mut s = ExpSmoother::default();
    s.push(0.0);
    let r = 42.0;
    for _ in 0..200 {
        s.push(r);
    }
    assert!((s.value() - r).abs() < 1e-3);
}

#[test]
fn smoothing_uses_the_fixed_low_pass_weights() {
    let mut s = ExpSmoother::default();
    s.push(10.0);
    let v = s.push(20.0);
    assert!((v - (10.0 * 0.85 + 20.0 * 0.15)).abs() < 1e-5);
}

#[test]
fn speed_decays_when_pointer_slows() {
    let mut engine = PointerEngine::new(800.0, 600.0);
    for i in 0..20 {
        engine.sample(50.0 * i as f32, 0.0, None::<MockNode>);
    }
    let fast = engine.speed();
    let x = 50.0 * 19.0;
    for i in 1..20 {
        engine.sample(x + i as f32, 0.0, None::<MockNode>);
    }
    assert!(engine.speed() < fast * 0.2);
}

#[test]
fn normalized_coordinates_follow_viewport_resize() {
    let mut engine = PointerEngine::new(1000.0, 500.0);
    let p = engine.sample(500.0, 250.0, None::<MockNode>);
    assert_eq!((p.normalized_x, p.normalized_y), (Some(0.5), Some(0.5)));
    engine.set_viewport(2000.0, 1000.0);
    let p = engine.sample(500.0, 250.0, None::<MockNode>);
    assert_eq!((p.normalized_x, p.normalized_y), (Some(0.25), Some(0.25)));
}
