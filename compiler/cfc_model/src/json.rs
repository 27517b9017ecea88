//! Restricted JSON reader for parcel specs and host side files.
//!
//! Only four kinds of values exist: strings without escapes, hashes,
//! booleans and `null`. Arrays, numbers and escape sequences are rejected,
//! since none of them are legal in a `.cfp` file. Hash entries keep their
//! source order.

/// A parsed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsonValue {
    String(String),
    Hash(JsonHash),
    Bool(bool),
    Null,
}

impl JsonValue {
    /// Human-readable name of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::String(_) => "string",
            JsonValue::Hash(_) => "hash",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Null => "null",
        }
    }
}

/// An ordered list of key/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonHash {
    entries: Vec<(String, JsonValue)>,
}

impl JsonHash {
    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Value of the last entry with `key`.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a complete document. Returns `None` on any syntax error or
/// trailing garbage.
pub fn parse(text: &str) -> Option<JsonValue> {
    let mut parser = Parser {
        text,
        pos: 0,
        depth: 0,
    };
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos != text.len() {
        return None;
    }
    Some(value)
}

/// Hashes nested deeper than this are rejected instead of recursing further.
const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    #[inline]
    fn current(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.text[self.pos..].starts_with(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Option<JsonValue> {
        match self.current()? {
            b'"' => self.parse_string().map(JsonValue::String),
            b'{' => {
                if self.depth >= MAX_DEPTH {
                    return None;
                }
                self.depth += 1;
                let hash = self.parse_hash();
                self.depth -= 1;
                hash.map(JsonValue::Hash)
            }
            b'n' if self.eat_keyword("null") => Some(JsonValue::Null),
            b't' if self.eat_keyword("true") => Some(JsonValue::Bool(true)),
            b'f' if self.eat_keyword("false") => Some(JsonValue::Bool(false)),
            _ => None,
        }
    }

    /// Parse a double-quoted string. Escapes are not allowed.
    fn parse_string(&mut self) -> Option<String> {
        if self.current()? != b'"' {
            return None;
        }
        self.pos += 1;
        let start = self.pos;
        loop {
            match self.current()? {
                b'"' => break,
                b'\\' => return None,
                _ => self.pos += 1,
            }
        }
        let string = self.text[start..self.pos].to_string();
        self.pos += 1;
        Some(string)
    }

    fn parse_hash(&mut self) -> Option<JsonHash> {
        if self.current()? != b'{' {
            return None;
        }
        self.pos += 1;

        let mut hash = JsonHash::default();
        loop {
            self.skip_whitespace();
            if self.current()? == b'}' {
                self.pos += 1;
                return Some(hash);
            }

            let key = self.parse_string()?;
            self.skip_whitespace();
            if self.current()? != b':' {
                return None;
            }
            self.pos += 1;
            self.skip_whitespace();
            let value = self.parse_value()?;
            hash.entries.push((key, value));

            self.skip_whitespace();
            match self.current()? {
                b',' => self.pos += 1,
                b'}' => {
                    self.pos += 1;
                    return Some(hash);
                }
                _ => return None,
            }
        }
    }
}
