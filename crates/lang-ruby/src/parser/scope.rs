//! Scope builder.
//!
//! Walks the syntax tree once, recording every class, module and method
//! definition with its fully qualified namespace, and a local variable pin
//! for each assignment, parameter, `for` variable and rescued exception.
//! Definitions and assignments to instance, class and global variables and
//! constants become pins of their own kind.

use super::utils::{range_between, range_of, span_of, text_of};
use crate::inference::expression_type;
use rubyscope_api::ConstructKind;
use rubyscope_core::pin::{LocalVariable, MethodPin, NamespaceKind, NamespacePin, Pin, Variable};
use rubyscope_core::types::ComplexType;
use rubyscope_core::{Construct, Span};
use tree_sitter::{Node, TreeCursor};

/// Definitions and locals of one source snapshot, in source order.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScopeIndex {
    pub constructs: Vec<(Span, Construct)>,
    pub locals: Vec<Pin>,
    /// Every pin that is not a local variable.
    pub definitions: Vec<Pin>,
}

/// Lexical state handed down the walk.
#[derive(Debug, Clone)]
struct Frame {
    namespace: String,
    closure_path: String,
    /// Inside `class << self`.
    singleton: bool,
    /// Where locals declared in this frame stop being visible.
    scope_end: usize,
}

pub(crate) struct ScopeBuilder<'a> {
    code: &'a str,
    index: ScopeIndex,
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            index: ScopeIndex::default(),
        }
    }

    pub fn build(mut self, root: &Node) -> ScopeIndex {
        let frame = Frame {
            namespace: String::new(),
            closure_path: String::new(),
            singleton: false,
            scope_end: root.end_byte().max(self.code.len()),
        };
        let mut cursor = root.walk();
        self.visit_node(root, &mut cursor, &frame);
        self.index
    }

    fn visit_node(&mut self, node: &Node, cursor: &mut TreeCursor, frame: &Frame) {
        let entered = self.enter_scope(node, frame);
        let frame = entered.as_ref().unwrap_or(frame);

        self.register_declarations(node, frame);

        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                self.visit_node(&child, cursor, frame);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    /// Returns the frame for the node's children when the node opens a new
    /// scope.
    fn enter_scope(&mut self, node: &Node, frame: &Frame) -> Option<Frame> {
        match node.kind() {
            "class" | "module" => {
                let name_node = node.child_by_field_name("name")?;
                let namespace = qualify(&frame.namespace, text_of(self.code, &name_node));
                let (kind, pin_kind) = if node.kind() == "class" {
                    (ConstructKind::Class, NamespaceKind::Class)
                } else {
                    (ConstructKind::Module, NamespaceKind::Module)
                };
                self.index
                    .constructs
                    .push((span_of(node), Construct::new(kind, namespace.clone())));
                let (closure_path, name) = match namespace.rsplit_once("::") {
                    Some((outer, name)) => (outer.to_string(), name.to_string()),
                    None => (String::new(), namespace.clone()),
                };
                self.index.definitions.push(Pin::Namespace(NamespacePin {
                    name,
                    closure_path,
                    location: Some(range_of(self.code, &name_node)),
                    kind: pin_kind,
                }));
                Some(Frame {
                    closure_path: namespace.clone(),
                    namespace,
                    singleton: false,
                    scope_end: node.end_byte(),
                })
            }
            "singleton_class" => Some(Frame {
                singleton: true,
                scope_end: node.end_byte(),
                ..frame.clone()
            }),
            "method" | "singleton_method" => {
                let name_node = node.child_by_field_name("name")?;
                let name = text_of(self.code, &name_node);
                let kind = if node.kind() == "singleton_method" || frame.singleton {
                    ConstructKind::SingletonMethod
                } else {
                    ConstructKind::Method
                };
                let separator = match kind {
                    ConstructKind::Method => '#',
                    _ => '.',
                };
                let closure_path = format!("{}{}{}", frame.namespace, separator, name);
                self.index.constructs.push((
                    span_of(node),
                    Construct::new(kind, frame.namespace.clone())
                        .with_closure_path(closure_path.clone()),
                ));
                self.index.definitions.push(Pin::Method(MethodPin {
                    name: name.to_string(),
                    closure_path: frame.namespace.clone(),
                    location: Some(range_of(self.code, &name_node)),
                    scope: kind.scope(),
                    parameters: parameter_nodes(node)
                        .iter()
                        .map(|param| text_of(self.code, param).to_string())
                        .collect(),
                }));
                let inner = Frame {
                    namespace: frame.namespace.clone(),
                    closure_path,
                    singleton: frame.singleton,
                    scope_end: node.end_byte(),
                };
                self.register_parameters(node, &inner);
                Some(inner)
            }
            "block" | "do_block" | "lambda" => {
                let inner = Frame {
                    scope_end: node.end_byte(),
                    ..frame.clone()
                };
                self.register_parameters(node, &inner);
                Some(inner)
            }
            _ => None,
        }
    }

    /// Parameters are visible across the whole definition or block.
    fn register_parameters(&mut self, owner: &Node, frame: &Frame) {
        let presence = range_between(self.code, owner.start_byte(), owner.end_byte());
        for name_node in parameter_nodes(owner) {
            self.push_local(&name_node, None, frame, presence);
        }
    }

    fn register_declarations(&mut self, node: &Node, frame: &Frame) {
        let presence = range_between(self.code, node.start_byte(), frame.scope_end);
        match node.kind() {
            "assignment" | "operator_assignment" => {
                let Some(left) = node.child_by_field_name("left") else {
                    return;
                };
                let right = node.child_by_field_name("right");
                match left.kind() {
                    "identifier" => self.push_local(&left, right.as_ref(), frame, presence),
                    "instance_variable" | "class_variable" | "global_variable" | "constant" => {
                        self.push_variable(&left, right.as_ref(), frame)
                    }
                    _ => {
                        let mut targets = Vec::new();
                        collect_targets(&left, &mut targets);
                        for target in targets {
                            self.push_local(&target, None, frame, presence);
                        }
                    }
                }
            }
            "for" => {
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    let mut targets = Vec::new();
                    collect_targets(&pattern, &mut targets);
                    for target in targets {
                        self.push_local(&target, None, frame, presence);
                    }
                }
            }
            "exception_variable" => {
                if let Some(name) = node.named_child(0).filter(|n| n.kind() == "identifier") {
                    self.push_local(&name, None, frame, presence);
                }
            }
            _ => {}
        }
    }

    fn push_local(
        &mut self,
        name_node: &Node,
        assignment: Option<&Node>,
        frame: &Frame,
        presence: rubyscope_api::Range,
    ) {
        let variable = self.variable(name_node, assignment, frame.closure_path.clone());
        self.index
            .locals
            .push(Pin::LocalVariable(LocalVariable::new(variable, presence)));
    }

    /// Instance, class and global variables and constants belong to the
    /// namespace, not to the method that assigns them. Globals have none.
    fn push_variable(&mut self, name_node: &Node, assignment: Option<&Node>, frame: &Frame) {
        let closure_path = match name_node.kind() {
            "global_variable" => String::new(),
            _ => frame.namespace.clone(),
        };
        let variable = self.variable(name_node, assignment, closure_path);
        let pin = match name_node.kind() {
            "instance_variable" => Pin::InstanceVariable(variable),
            "class_variable" => Pin::ClassVariable(variable),
            "global_variable" => Pin::GlobalVariable(variable),
            _ => Pin::Constant(variable),
        };
        self.index.definitions.push(pin);
    }

    fn variable(
        &self,
        name_node: &Node,
        assignment: Option<&Node>,
        closure_path: String,
    ) -> Variable {
        let mut variable = Variable::new(text_of(self.code, name_node), closure_path)
            .with_location(range_of(self.code, name_node));
        if let Some(value) = assignment {
            let static_type = expression_type(value, self.code)
                .map(ComplexType::simple)
                .unwrap_or_default();
            variable = variable
                .with_assignment(text_of(self.code, value))
                .with_static_type(static_type);
        }
        variable
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if let Some(absolute) = name.strip_prefix("::") {
        absolute.to_string()
    } else if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}::{name}")
    }
}

fn parameter_nodes<'t>(owner: &Node<'t>) -> Vec<Node<'t>> {
    let mut names = Vec::new();
    if let Some(params) = owner.child_by_field_name("parameters") {
        collect_parameter_names(&params, &mut names);
    }
    names
}

fn collect_parameter_names<'t>(params: &Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = params.walk();
    for child in params.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => out.push(child),
            "optional_parameter"
            | "keyword_parameter"
            | "splat_parameter"
            | "hash_splat_parameter"
            | "block_parameter" => {
                if let Some(name) = child.child_by_field_name("name") {
                    out.push(name);
                }
            }
            "destructured_parameter" => collect_parameter_names(&child, out),
            _ => {}
        }
    }
}

/// Plain local names on the left of a multiple assignment or `for`.
fn collect_targets<'t>(node: &Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "identifier" => out.push(*node),
        "left_assignment_list" | "rest_assignment" | "destructured_left_assignment" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_targets(&child, out);
            }
        }
        _ => {}
    }
}
