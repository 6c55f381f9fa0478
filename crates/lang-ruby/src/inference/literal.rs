use crate::parser::utils::text_of;
use tree_sitter::Node;

/// Core class of a literal node kind.
pub fn literal_type(kind: &str) -> Option<&'static str> {
    let name = match kind {
        "string" | "chained_string" | "heredoc_beginning" | "subshell" => "String",
        "integer" => "Integer",
        "float" => "Float",
        "rational" => "Rational",
        "complex" => "Complex",
        "array" | "string_array" | "symbol_array" => "Array",
        "hash" => "Hash",
        "simple_symbol" | "delimited_symbol" => "Symbol",
        "regex" => "Regexp",
        "range" => "Range",
        "true" | "false" => "Boolean",
        "nil" => "NilClass",
        "lambda" => "Proc",
        _ => return None,
    };
    Some(name)
}

/// Type of an expression node when its shape gives it away: a literal, or
/// a `Const.new(...)` construction.
pub fn expression_type(node: &Node, code: &str) -> Option<String> {
    if let Some(name) = literal_type(node.kind()) {
        return Some(name.to_string());
    }
    match node.kind() {
        "call" => {
            let method = node.child_by_field_name("method")?;
            let receiver = node.child_by_field_name("receiver")?;
            let is_constant = matches!(receiver.kind(), "constant" | "scope_resolution");
            (text_of(code, &method) == "new" && is_constant)
                .then(|| text_of(code, &receiver).to_string())
        }
        "parenthesized_statements" if node.named_child_count() == 1 => {
            expression_type(&node.named_child(0)?, code)
        }
        _ => None,
    }
}
