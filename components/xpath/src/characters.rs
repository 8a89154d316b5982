use std::cmp::Ordering::{Equal, Greater, Less};

fn binary_search_table(c: char, table: &[(char, char)]) -> bool {
    table
        .binary_search_by(|&(low, high)| {
            if c < low {
                Greater
            } else if c > high {
                Less
            } else {
                Equal
            }
        })
        .is_ok()
}

// NCName start characters, the colon is excluded
const NCNAME_START_CHAR_TABLE: &[(char, char)] = &[
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{2ff}'),
    ('\u{370}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

pub fn is_ncname_start_char(c: char) -> bool {
    binary_search_table(c, NCNAME_START_CHAR_TABLE)
}

const NCNAME_CONTINUE_CHAR_TABLE: &[(char, char)] = &[
    ('-', '.'),
    ('0', '9'),
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    ('\u{b7}', '\u{b7}'),
    ('\u{c0}', '\u{d6}'),
    ('\u{d8}', '\u{f6}'),
    ('\u{f8}', '\u{37d}'),
    ('\u{37f}', '\u{1fff}'),
    ('\u{200c}', '\u{200d}'),
    ('\u{203f}', '\u{2040}'),
    ('\u{2070}', '\u{218f}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

pub fn is_ncname_continue_char(c: char) -> bool {
    binary_search_table(c, NCNAME_CONTINUE_CHAR_TABLE)
}

pub fn is_whitespace_char(ch: char) -> bool {
    matches!(ch, '\x20' | '\x09' | '\x0D' | '\x0A')
}
