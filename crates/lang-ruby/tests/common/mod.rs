use rubyscope_ruby::RubySource;

pub const CURSOR: &str = "<|>";

/// Parse `marked` with its cursor marker removed. Returns the buffer and the
/// byte offset where the marker was.
pub fn parse_with_cursor(marked: &str) -> (RubySource, usize) {
    let offset = marked.find(CURSOR).expect("cursor marker missing");
    let code = marked.replacen(CURSOR, "", 1);
    (RubySource::parse(code).expect("ruby source parses"), offset)
}

#[allow(dead_code)]
pub fn parse(code: &str) -> RubySource {
    RubySource::parse(code).expect("ruby source parses")
}
