mod common;

use common::parse;
use rubyscope_api::Position;
use rubyscope_core::pin::{DeclaredTypeInference, LocalVariable, Pin, PinKind};
use rubyscope_core::{RuntimeSamples, SourceBuffer};
use rubyscope_ruby::AssignmentInference;

const SOURCE: &str = "\
class Foo
  def bar(limit)
    count = 0
    label = \"n\"
    list = Set.new
    a, b = 1, 2
    count
  end

  def self.baz
    y = :sym
  end

  z = 3
end
";

fn local<'s>(pins: &'s [Pin], name: &str) -> &'s LocalVariable {
    pins.iter()
        .filter_map(Pin::as_local_variable)
        .find(|pin| pin.name() == name)
        .unwrap_or_else(|| panic!("no local named {name}"))
}

#[test]
fn test_closure_paths() {
    let source = parse(SOURCE);
    let pins = source.local_variable_pins();
    assert_eq!(local(pins, "limit").closure_path(), "Foo#bar");
    assert_eq!(local(pins, "count").closure_path(), "Foo#bar");
    assert_eq!(local(pins, "a").closure_path(), "Foo#bar");
    assert_eq!(local(pins, "y").closure_path(), "Foo.baz");
    assert_eq!(local(pins, "z").closure_path(), "Foo");
}

#[test]
fn test_assignments_and_static_types() {
    let source = parse(SOURCE);
    let pins = source.local_variable_pins();

    let count = local(pins, "count");
    assert_eq!(count.assignment(), Some("0"));
    assert_eq!(count.static_type().to_string(), "Integer");
    assert_eq!(local(pins, "label").static_type().to_string(), "String");
    assert_eq!(local(pins, "list").static_type().to_string(), "Set");
    assert_eq!(local(pins, "y").static_type().to_string(), "Symbol");

    let a = local(pins, "a");
    assert_eq!(a.assignment(), None);
    assert!(a.static_type().is_undefined());
    assert!(local(pins, "limit").assignment().is_none());
}

#[test]
fn test_presence_runs_to_end_of_scope() {
    let source = parse(SOURCE);
    let pins = source.local_variable_pins();
    let count = local(pins, "count");

    // Declared on line 2, visible until the method's `end` on line 7.
    assert!(!count.visible_from(Position::new(1, 10)));
    assert!(count.visible_from(Position::new(2, 4)));
    assert!(count.visible_from(Position::new(6, 4)));
    assert!(!count.visible_from(Position::new(10, 4)));

    let limit = local(pins, "limit");
    assert!(limit.visible_from(Position::new(1, 2)));
    assert!(!limit.visible_from(Position::new(13, 2)));

    let z = local(pins, "z");
    assert!(z.visible_from(Position::new(13, 6)));
    assert!(!z.visible_from(Position::new(15, 0)));
}

#[test]
fn test_reparse_merges_locals() {
    let before = parse(SOURCE);
    let edited = format!("# leading comment\n{SOURCE}");
    let after = parse(&edited);

    let mut old = before
        .local_variable_pins()
        .iter()
        .find(|p| p.name() == "count")
        .cloned()
        .unwrap();
    let new = after
        .local_variable_pins()
        .iter()
        .find(|p| p.name() == "count")
        .unwrap();

    assert!(old.try_merge(new));
    assert_eq!(old.location().unwrap().start_line, 3);

    let other = after
        .local_variable_pins()
        .iter()
        .find(|p| p.name() == "label")
        .unwrap();
    assert!(!old.try_merge(other));
}

#[test]
fn test_runtime_samples_override_static_inference() {
    let source = parse(SOURCE);
    let pins = source.local_variable_pins();
    let count = pins.iter().find(|p| p.name() == "count").unwrap();
    let inference = AssignmentInference::new().unwrap();

    let samples = RuntimeSamples::from_json(r#"{"Foo#bar%count": ["Float"]}"#).unwrap();
    assert_eq!(count.typify(&samples, &inference).to_string(), "Float");

    let empty = RuntimeSamples::from_json(r#"{"Foo#bar%count": []}"#).unwrap();
    assert_eq!(count.typify(&empty, &inference).to_string(), "Integer");

    let unparseable = RuntimeSamples::from_json(r##"{"Foo#bar%count": ["#<Foo>"]}"##).unwrap();
    assert_eq!(count.typify(&unparseable, &inference).to_string(), "Integer");

    let unrelated = RuntimeSamples::from_json(r#"{"Foo#baz%count": ["Float"]}"#).unwrap();
    assert_eq!(
        count.typify(&unrelated, &DeclaredTypeInference).to_string(),
        "Integer"
    );

    let a = pins.iter().find(|p| p.name() == "a").unwrap();
    assert!(a.typify(&RuntimeSamples::new(), &inference).is_undefined());
}

#[test]
fn test_definition_pins() {
    let source = parse(SOURCE);
    let paths: Vec<(PinKind, String)> = source
        .definition_pins()
        .iter()
        .map(|pin| (pin.kind(), pin.path()))
        .collect();
    assert_eq!(
        paths,
        vec![
            (PinKind::Namespace, "Foo".to_string()),
            (PinKind::Method, "Foo#bar".to_string()),
            (PinKind::Method, "Foo.baz".to_string()),
        ]
    );
    match &source.definition_pins()[1] {
        Pin::Method(method) => assert_eq!(method.parameters, vec!["limit"]),
        other => panic!("expected a method pin, got {other:?}"),
    }

    let edited = format!("# leading comment\n{SOURCE}");
    let after = parse(&edited);
    let mut bar = source.definition_pins()[1].clone();
    assert!(bar.try_merge(&after.definition_pins()[1]));
    assert_eq!(bar.location().unwrap().start_line, 2);
    assert!(!bar.try_merge(&after.definition_pins()[2]));
}

#[test]
fn test_namespace_variables_are_not_locals() {
    let source = parse("class Foo\n  @@count = 0\n  def bump\n    @last = 1\n  end\nend\n$verbose = true\n");
    assert!(source.local_variable_pins().is_empty());
    let vars: Vec<(PinKind, &str, &str)> = source
        .definition_pins()
        .iter()
        .filter(|pin| !matches!(pin.kind(), PinKind::Namespace | PinKind::Method))
        .map(|pin| (pin.kind(), pin.name(), pin.closure_path()))
        .collect();
    assert_eq!(
        vars,
        vec![
            (PinKind::ClassVariable, "@@count", "Foo"),
            (PinKind::InstanceVariable, "@last", "Foo"),
            (PinKind::GlobalVariable, "$verbose", ""),
        ]
    );
}
