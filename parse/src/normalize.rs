// ----------------------------------------------------------------------------
// Line

/// One raw source line split into code and comment.
#[derive(Debug, Clone)]
pub struct Line {
    idx: usize,
    code: String,
    has_comment: bool,
}

impl Line {
    pub fn new(idx: usize, str: &str) -> Self {
        // No escaping: the comment starts at the very first '#'
        let (code, has_comment) = match str.split_once('#') {
            Some((code, _)) => (code, true),
            None => (str, false),
        };
        Self {
            idx,
            code: code.to_string(),
            has_comment,
        }
    }

    /// 1-based line number.
    pub fn no(&self) -> usize {
        self.idx + 1
    }

    pub fn has_comment(&self) -> bool {
        self.has_comment
    }

    /// Code part with whitespace runs collapsed to one space, or `None` when
    /// nothing is left.
    pub fn normalized(&self) -> Option<String> {
        let code = collapse(&self.code);
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(raw: &str, expect: Option<&str>, comment: bool) {
        let line = Line::new(0, raw);
        assert_eq!(line.normalized().as_deref(), expect, "{:?}", raw);
        assert_eq!(line.has_comment(), comment, "{:?}", raw);
    }

    #[test]
    fn tests() {
        case("", None, false);
        case("   \t  ", None, false);
        case("# only a comment", None, true);
        case("   # indented comment", None, true);
        case("MOVE GF@a int@1", Some("MOVE GF@a int@1"), false);
        case("  MOVE\tGF@a    int@1  ", Some("MOVE GF@a int@1"), false);
        case("WRITE string@x#tail", Some("WRITE string@x"), true);
        case("WRITE GF@a # say it", Some("WRITE GF@a"), true);
        case(".IPPcode23#header", Some(".IPPcode23"), true);
        case("\r\n", None, false);
    }

    #[test]
    fn line_numbers() {
        assert_eq!(Line::new(0, "BREAK").no(), 1);
        assert_eq!(Line::new(4, "LABEL a #b#c").no(), 5);
    }
}
