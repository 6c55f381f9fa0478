pub mod inference;
pub mod parser;
pub mod source;

pub use inference::AssignmentInference;
pub use parser::RubyParser;
pub use source::RubySource;
