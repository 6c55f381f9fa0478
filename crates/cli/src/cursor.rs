use anyhow::{Context, anyhow};
use clap::Args;
use rubyscope_api::Position;
use rubyscope_core::util::offset_at;
use rubyscope_ruby::RubySource;
use std::path::PathBuf;

/// A Ruby file and a cursor inside it.
#[derive(Args, Debug, Clone)]
pub struct CursorArgs {
    /// Ruby source file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Byte offset of the cursor
    #[arg(long, conflicts_with_all = ["line", "col"])]
    pub offset: Option<usize>,

    /// Zero-based line of the cursor
    #[arg(long, requires = "col")]
    pub line: Option<usize>,

    /// Zero-based UTF-16 column of the cursor
    #[arg(long, requires = "line")]
    pub col: Option<usize>,
}

impl CursorArgs {
    /// Cursor byte offset in `code`; the end of the text when no position
    /// was given.
    pub fn offset_in(&self, code: &str) -> anyhow::Result<usize> {
        match (self.offset, self.line, self.col) {
            (Some(offset), _, _) => Ok(offset),
            (None, Some(line), Some(col)) => offset_at(code, Position::new(line, col))
                .ok_or_else(|| anyhow!("line {line} is past the end of the file")),
            _ => Ok(code.len()),
        }
    }

    pub fn load(&self) -> anyhow::Result<(RubySource, usize)> {
        let code = std::fs::read_to_string(&self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let offset = self.offset_in(&code)?;
        let source = RubySource::parse(code)?;
        Ok((source, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(offset: Option<usize>, line: Option<usize>, col: Option<usize>) -> CursorArgs {
        CursorArgs {
            file: PathBuf::from("unused.rb"),
            offset,
            line,
            col,
        }
    }

    #[test]
    fn test_offset_resolution() {
        let code = "a = 1\nb.c\n";
        assert_eq!(args(Some(2), None, None).offset_in(code).unwrap(), 2);
        assert_eq!(args(None, Some(1), Some(2)).offset_in(code).unwrap(), 8);
        assert_eq!(args(None, None, None).offset_in(code).unwrap(), code.len());
        assert!(args(None, Some(9), Some(0)).offset_in(code).is_err());
    }
}
