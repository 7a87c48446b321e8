//! Parses `key=value` property strings: bare, double- or single-quoted
//! values, backslash escapes inside quotes, last occurrence of a duplicate
//! key wins.

use indexmap::IndexMap;
use std::iter::Peekable;
use std::str::Chars;

pub fn get(props: &str, key: &str) -> String {
    parse_all(props).get(key).cloned().unwrap_or_default()
}

pub fn parse_all(props: &str) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    let mut chars = props.chars().peekable();

    loop {
        skip_ws(&mut chars);
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                break;
            }
            key.push(c);
            chars.next();
        }

        if chars.peek() != Some(&'=') {
            // malformed token: no '=' found, skip to the next whitespace run
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                chars.next();
            }
            continue;
        }
        chars.next(); // consume '='

        let value = read_value(&mut chars);
        if !key.is_empty() {
            map.insert(key, value);
        }
    }

    map
}

fn skip_ws(chars: &mut Peekable<Chars>) {
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else {
            break;
        }
    }
}

fn read_value(chars: &mut Peekable<Chars>) -> String {
    match chars.peek() {
        Some('"') => {
            chars.next();
            read_quoted(chars, '"')
        }
        Some('\'') => {
            chars.next();
            read_quoted(chars, '\'')
        }
        _ => {
            let mut v = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                v.push(c);
                chars.next();
            }
            v
        }
    }
}

fn read_quoted(chars: &mut Peekable<Chars>, quote: char) -> String {
    let mut v = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                v.push(next);
            }
        } else if c == quote {
            break;
        } else {
            v.push(c);
        }
    }
    v
}
