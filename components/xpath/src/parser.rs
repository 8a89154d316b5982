use crate::ast::{Axis, LocationPath, LocationStep, NodeTest, Predicate};
use crate::characters::{is_ncname_continue_char, is_ncname_start_char};
use crate::cursor::Cursor;
use crate::namespaces::Namespaces;
use crate::XPathError;

type ParseResult<'a, T> = Result<(Cursor<'a>, T), XPathError>;

fn syntax(cur: &Cursor, message: &str) -> XPathError {
    XPathError::Syntax {
        position: cur.offset(),
        message: message.to_string(),
    }
}

fn ncname<'a>(cur: &Cursor<'a>) -> Option<(Cursor<'a>, &'a str)> {
    let mut chars = cur.chars();
    let first = match chars.next() {
        Some(ch) if is_ncname_start_char(ch) => ch,
        _ => return None,
    };

    let len = first.len_utf8()
        + chars
            .take_while(|&ch| is_ncname_continue_char(ch))
            .map(char::len_utf8)
            .sum::<usize>();
    let (name, rest) = cur.advance_to(len);
    Some((rest, name))
}

/// Recursive descent parser for location paths and their unions
pub(crate) struct PathParser<'n> {
    namespaces: &'n Namespaces,
}

impl<'n> PathParser<'n> {
    pub(crate) fn new(namespaces: &'n Namespaces) -> Self {
        Self { namespaces }
    }

    pub(crate) fn parse(&self, input: &str) -> Result<Vec<LocationPath>, XPathError> {
        let mut cur = Cursor::for_str(input).skip_whitespace();
        let mut paths = vec![];

        loop {
            let (next, path) = self.location_path(cur)?;
            paths.push(path);

            cur = next.skip_whitespace();
            if cur.eof() {
                return Ok(paths);
            } else if cur.starts_with("|") {
                cur = cur.advance(1).skip_whitespace();
            } else {
                return Err(syntax(&cur, "expected `|` or end of expression"));
            }
        }
    }

    fn location_path<'a>(&self, cur: Cursor<'a>) -> ParseResult<'a, LocationPath> {
        let mut path = LocationPath::default();
        let mut cur = cur;

        if cur.starts_with("//") {
            path.absolute = true;
            path.steps.push(LocationStep::descendant_or_self());
            cur = cur.advance(2);
        } else if cur.starts_with("/") {
            path.absolute = true;
            cur = cur.advance(1);

            // `/` alone selects the document node
            let peek = cur.skip_whitespace();
            if peek.eof() || peek.starts_with("|") {
                return Ok((cur, path));
            }
        }

        loop {
            let (next, step) = self.step(cur.skip_whitespace())?;
            path.steps.push(step);

            cur = next.skip_whitespace();
            if cur.starts_with("//") {
                path.steps.push(LocationStep::descendant_or_self());
                cur = cur.advance(2);
            } else if cur.starts_with("/") {
                cur = cur.advance(1);
            } else {
                return Ok((cur, path));
            }
        }
    }

    fn step<'a>(&self, cur: Cursor<'a>) -> ParseResult<'a, LocationStep> {
        if cur.starts_with("..") {
            return Err(syntax(&cur, "parent steps are not supported"));
        }
        if cur.starts_with(".") {
            return Ok((cur.advance(1), LocationStep::new(Axis::Self_, NodeTest::Node)));
        }

        let (cur, axis) = if cur.starts_with("@") {
            (cur.advance(1).skip_whitespace(), Axis::Attribute)
        } else {
            (cur, Axis::Child)
        };

        let (cur, node_test) = self.node_test(cur)?;
        let (cur, predicates) = self.predicates(cur)?;
        Ok((
            cur,
            LocationStep {
                axis,
                node_test,
                predicates,
            },
        ))
    }

    fn node_test<'a>(&self, cur: Cursor<'a>) -> ParseResult<'a, NodeTest> {
        if cur.starts_with("*") {
            return Ok((cur.advance(1), NodeTest::AnyName));
        }

        let (after_name, name) = match ncname(&cur) {
            Some(result) => result,
            None => return Err(syntax(&cur, "expected name test")),
        };

        if after_name.starts_with(":") {
            let namespace = match self.namespaces.resolve(name) {
                Some(uri) => uri.to_string(),
                None => {
                    return Err(XPathError::UnknownPrefix {
                        position: cur.offset(),
                        prefix: name.to_string(),
                    })
                }
            };

            let local_cur = after_name.advance(1);
            if local_cur.starts_with("*") {
                return Ok((local_cur.advance(1), NodeTest::AnyNameInNamespace(namespace)));
            }

            return match ncname(&local_cur) {
                Some((rest, local)) => Ok((
                    rest,
                    NodeTest::Name {
                        namespace: Some(namespace),
                        local: local.to_string(),
                    },
                )),
                None => Err(syntax(&local_cur, "expected local name")),
            };
        }

        let peek = after_name.skip_whitespace();
        if peek.starts_with("(") {
            let close = peek.advance(1).skip_whitespace();
            if !close.starts_with(")") {
                return Err(syntax(&close, "expected `)`"));
            }
            let node_test = match name {
                "text" => NodeTest::Text,
                "node" => NodeTest::Node,
                _ => return Err(syntax(&cur, "unsupported node type test")),
            };
            return Ok((close.advance(1), node_test));
        }

        Ok((
            after_name,
            NodeTest::Name {
                namespace: None,
                local: name.to_string(),
            },
        ))
    }

    fn predicates<'a>(&self, cur: Cursor<'a>) -> ParseResult<'a, Vec<Predicate>> {
        let mut predicates = vec![];
        let mut cur = cur;

        loop {
            let peek = cur.skip_whitespace();
            if !peek.starts_with("[") {
                return Ok((cur, predicates));
            }

            let inner = peek.advance(1).skip_whitespace();
            let digits = inner.chars().take_while(|ch| ch.is_ascii_digit()).count();
            if digits == 0 {
                return Err(syntax(&inner, "expected position"));
            }

            let (number, rest) = inner.advance_to(digits);
            let position: usize = match number.parse() {
                Ok(position) if position > 0 => position,
                _ => return Err(syntax(&inner, "position must be between 1 and usize::MAX")),
            };

            let close = rest.skip_whitespace();
            if !close.starts_with("]") {
                return Err(syntax(&close, "expected `]`"));
            }

            predicates.push(Predicate::Position(position));
            cur = close.advance(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn namespaces() -> Namespaces {
        Namespaces::new()
            .with("rdf", "urn:rdf")
            .with("dm", "urn:dm")
    }

    fn parse(input: &str) -> Result<Vec<LocationPath>, XPathError> {
        PathParser::new(&namespaces()).parse(input)
    }

    fn parse_to_string(input: &str) -> String {
        parse(input)
            .unwrap()
            .iter()
            .map(|path| path.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    #[test]
    fn relative_name() {
        assert_eq!("child::{urn:dm}startTime", parse_to_string("dm:startTime"));
    }

    #[test]
    fn unprefixed_name_has_no_namespace() {
        assert_eq!("child::li", parse_to_string("li"));
    }

    #[test]
    fn absolute_descendant() {
        assert_eq!(
            "/descendant-or-self::node()/child::{urn:rdf}Description/child::{urn:dm}videoFrameRate/child::text()",
            parse_to_string("//rdf:Description/dm:videoFrameRate/text()")
        );
    }

    #[test]
    fn inner_descendant() {
        assert_eq!(
            "child::a/descendant-or-self::node()/child::b",
            parse_to_string("a//b")
        );
    }

    #[test]
    fn root_only() {
        assert_eq!("/", parse_to_string("/"));
    }

    #[test]
    fn attribute_and_self() {
        assert_eq!(
            "self::node()/attribute::{urn:dm}comment",
            parse_to_string(". / @dm:comment")
        );
    }

    #[test]
    fn wildcards() {
        assert_eq!(
            "child::*/child::{urn:rdf}*/attribute::*",
            parse_to_string("*/rdf:*/@*")
        );
    }

    #[test]
    fn predicates() {
        assert_eq!(
            "child::{urn:rdf}li[2][1]",
            parse_to_string("rdf:li[2] [ 1 ]")
        );
    }

    #[test]
    fn union() {
        assert_eq!(
            "child::{urn:dm}comment | attribute::{urn:dm}comment",
            parse_to_string(" dm:comment |@dm:comment ")
        );
    }

    #[test]
    fn unknown_prefix() {
        assert_matches!(
            parse("//xmpDM:markers"),
            Err(XPathError::UnknownPrefix { position: 2, prefix }) if prefix == "xmpDM"
        );
    }

    #[test]
    fn empty_expression() {
        assert_matches!(parse(""), Err(XPathError::Syntax { position: 0, .. }));
    }

    #[test]
    fn trailing_slash() {
        assert_matches!(parse("a/"), Err(XPathError::Syntax { position: 2, .. }));
    }

    #[test]
    fn zero_position() {
        assert_matches!(parse("a[0]"), Err(XPathError::Syntax { .. }));
    }

    #[test]
    fn unsupported_node_type() {
        assert_matches!(parse("comment()"), Err(XPathError::Syntax { .. }));
    }

    #[test]
    fn parent_step() {
        assert_matches!(parse("a/.."), Err(XPathError::Syntax { position: 2, .. }));
    }

    #[test]
    fn garbage_after_path() {
        assert_matches!(parse("a b"), Err(XPathError::Syntax { position: 2, .. }));
    }
}
