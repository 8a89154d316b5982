use std::str::Chars;

use crate::characters::is_whitespace_char;

#[derive(Copy, Clone, Debug)]
pub(crate) struct Cursor<'a> {
    rest: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn for_str(input: &'a str) -> Self {
        Self {
            rest: input,
            offset: 0,
        }
    }

    pub(crate) fn advance(&self, bytes: usize) -> Self {
        let (_, rest) = self.rest.split_at(bytes);
        Self {
            rest,
            offset: self.offset + bytes,
        }
    }

    pub(crate) fn advance_to(&self, bytes: usize) -> (&'a str, Self) {
        let (skip, rest) = self.rest.split_at(bytes);
        (
            skip,
            Self {
                rest,
                offset: self.offset + bytes,
            },
        )
    }

    pub(crate) fn skip_whitespace(&self) -> Self {
        let len: usize = self
            .chars()
            .take_while(|&ch| is_whitespace_char(ch))
            .map(char::len_utf8)
            .sum();
        self.advance(len)
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest.starts_with(prefix)
    }

    pub(crate) fn next_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    pub(crate) fn eof(&self) -> bool {
        self.rest.is_empty()
    }

    pub(crate) fn chars(&self) -> Chars<'a> {
        self.rest.chars()
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }
}
