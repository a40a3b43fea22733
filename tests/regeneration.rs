// tests/regeneration.rs
use arbor_turtle::{Canvas, Error, Grammar, IterationRange, LSystem, PrimitiveSink};
use glam::{Quat, Vec3};

/// Records what a renderer would have instantiated.
#[derive(Default)]
struct RecordingSink {
    segments: Vec<(Vec3, Vec3)>,
    markers: Vec<(Vec3, Quat)>,
    clears: usize,
}

impl PrimitiveSink for RecordingSink {
    fn clear(&mut self) {
        self.segments.clear();
        self.markers.clear();
        self.clears += 1;
    }

    fn segment(&mut self, start: Vec3, end: Vec3) {
        self.segments.push((start, end));
    }

    fn marker(&mut self, point: Vec3, orientation: Quat) {
        self.markers.push((point, orientation));
    }
}

#[test]
fn test_default_tree() {
    let tree = LSystem::default();
    assert_eq!(tree.command_string(), "F[+F]F[-F]L");
    assert_eq!(tree.iteration_label(), "Iterations: 1");

    let drawing = tree.regenerate().unwrap();
    assert_eq!(drawing.segment_count(), 4);
    assert_eq!(drawing.marker_count(), 1);
}

#[test]
fn test_regeneration_is_deterministic() {
    let mut tree = LSystem::default();
    tree.set_iterations(4);
    let first = tree.regenerate().unwrap();
    let second = tree.regenerate().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_iterations_are_clamped() {
    let mut tree = LSystem::default();
    assert_eq!(tree.set_iterations(0), 1);
    assert_eq!(tree.set_iterations(99), 6);
    assert_eq!(tree.iteration_label(), "Iterations: 6");
    assert_eq!(tree.set_iterations(3), 3);

    let range = IterationRange { min: 2, max: 4 };
    assert_eq!(range.clamp(1), 2);
    assert!(range.contains(4));
    assert!(!range.contains(5));
}

#[test]
fn test_validation() {
    let tree = LSystem {
        iterations: 9,
        ..Default::default()
    };
    assert!(matches!(tree.regenerate(), Err(Error::InvalidConfig(_))));

    let tree = LSystem {
        range: IterationRange { min: 3, max: 2 },
        ..Default::default()
    };
    assert!(matches!(tree.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_malformed_grammar_surfaces_error() {
    let broken = LSystem {
        axiom: "F".to_owned(),
        rules: Grammar::from([('F', "F]")]),
        ..Default::default()
    };
    assert!(matches!(
        broken.regenerate(),
        Err(Error::UnmatchedPop { index: 1, emitted: 1 })
    ));
}

#[test]
fn test_canvas_replaces_whole_drawing() {
    let mut canvas = Canvas::new(LSystem::default(), RecordingSink::default());
    assert!(canvas.current().is_none());

    canvas.refresh().unwrap();
    assert_eq!(canvas.sink().segments.len(), 4);
    assert_eq!(canvas.sink().markers.len(), 1);

    let drawing = canvas.set_iterations(2).unwrap();
    assert_eq!(drawing.segment_count(), 16);
    assert_eq!(canvas.sink().segments.len(), 16);
    assert_eq!(canvas.sink().markers.len(), 5);
    assert_eq!(canvas.sink().clears, 2);
    assert_eq!(canvas.system().iterations, 2);
}

#[test]
fn test_canvas_keeps_previous_drawing_on_error() {
    let mut canvas = Canvas::new(LSystem::default(), RecordingSink::default());
    canvas.refresh().unwrap();

    let broken = LSystem {
        rules: Grammar::from([('F', "]F")]),
        ..Default::default()
    };
    assert!(canvas.set_system(broken).is_err());

    assert_eq!(canvas.system(), &LSystem::default());
    assert_eq!(canvas.sink().clears, 1);
    assert_eq!(canvas.sink().segments.len(), 4);
    assert_eq!(canvas.current().unwrap().segment_count(), 4);

    let sink = canvas.into_sink();
    assert_eq!(sink.markers.len(), 1);
}

#[test]
fn test_canvas_restores_iterations_on_error() {
    // Well-formed after one pass, an unmatched ']' after two.
    let system = LSystem {
        axiom: "FB".to_owned(),
        rules: Grammar::from([('B', "C"), ('C', "]")]),
        ..Default::default()
    };
    let mut canvas = Canvas::new(system, RecordingSink::default());
    assert_eq!(canvas.refresh().unwrap().segment_count(), 1);

    let err = canvas.set_iterations(2).unwrap_err();
    assert!(matches!(err, Error::UnmatchedPop { index: 1, emitted: 1 }));

    assert_eq!(canvas.system().iterations, 1);
    assert_eq!(canvas.system().iteration_label(), "Iterations: 1");
    assert_eq!(canvas.sink().clears, 1);
    assert_eq!(canvas.sink().segments.len(), 1);
    assert_eq!(canvas.current().unwrap().segment_count(), 1);
}

#[test]
fn test_toml_configuration() {
    let source = r#"
        axiom = "X"
        iterations = 2

        [rules]
        X = "F[+X][-X]"
        F = "FF"

        [turtle]
        step_length = 0.5
        turn_angle = 30.0
        origin = [1.0, 0.0, 0.0]
    "#;

    let system = LSystem::from_toml_str(source).unwrap();
    assert_eq!(system.axiom, "X");
    assert_eq!(system.rules.rule('F'), Some("FF"));
    assert_eq!(system.range, IterationRange::default());
    assert_eq!(system.turtle.step_length, 0.5);
    assert_eq!(system.turtle.origin, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(system.turtle.orientation, Quat::IDENTITY);
    assert_eq!(system.command_string(), "FF[+F[+X][-X]][-F[+X][-X]]");

    let drawing = system.regenerate().unwrap();
    assert_eq!(drawing.segment_count(), 4);
    assert_eq!(drawing.marker_count(), 0);
}

#[test]
fn test_toml_round_trip() {
    let tree = LSystem::default();
    let text = tree.to_toml_string().unwrap();
    assert!(text.contains("[rules]"));
    assert_eq!(LSystem::from_toml_str(&text).unwrap(), tree);

    let mut bracketed = LSystem {
        axiom: "X".to_owned(),
        rules: Grammar::from([('X', "F[+X]F[-X]"), ('[', "["), ('+', "+-+")]),
        ..Default::default()
    };
    bracketed.set_iterations(3);
    bracketed.turtle.origin = Vec3::new(1.0, -2.0, 0.5);
    let text = bracketed.to_toml_string().unwrap();
    assert_eq!(LSystem::from_toml_str(&text).unwrap(), bracketed);
}

#[test]
fn test_toml_errors() {
    assert!(matches!(
        LSystem::from_toml_str("iterations = \"three\""),
        Err(Error::Toml(_))
    ));
    assert!(matches!(
        LSystem::from_toml_str("[turtle]\nstep_length = -1.0"),
        Err(Error::InvalidConfig(_))
    ));
    // Rule keys are single symbols.
    assert!(matches!(
        LSystem::from_toml_str("[rules]\nFF = \"F\""),
        Err(Error::Toml(_))
    ));
    assert!(matches!(
        LSystem::from_toml_str("[rules]\n\"\" = \"F\""),
        Err(Error::Toml(_))
    ));
}
