//! Top-level declaration scanner for `.cfh` headers.
//!
//! Only the outline of a header is read: the `parcel` statement, class
//! headers and verbatim C blocks. Class bodies are skipped by brace
//! matching; member declarations belong to the full header grammar.
//!
//! ```text
//! parcel Animal;
//!
//! /** Doc comment. */
//! public class Animal::Dog nickname Dog inherits Animal {
//!     ...
//! }
//!
//! __C__
//! #define ANIMAL_DOG_LEGS 4
//! __END_C__
//! ```

use cfc_model::{ClassDecl, ClassFlags};

use crate::HierarchyError;

/// A top-level declaration in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decl {
    Parcel(String),
    /// A class header together with the parcel statement in effect.
    Class { parcel: String, decl: ClassDecl },
    CBlock(String),
}

const C_BLOCK_START: &str = "__C__";
const C_BLOCK_END: &str = "__END_C__";

/// Scan `text` into its top-level declarations. `path` is used in errors.
///
/// A class must be preceded by a `parcel` statement.
pub fn scan(text: &str, path: &str) -> Result<Vec<Decl>, HierarchyError> {
    let mut scanner = Scanner {
        text,
        pos: 0,
        line: 1,
        path,
    };
    let mut decls = Vec::new();
    let mut parcel: Option<&str> = None;

    loop {
        scanner.skip_trivia()?;
        if scanner.at_end() {
            break;
        }
        let line = scanner.line;
        let word = scanner.word();
        match word {
            "parcel" => {
                let name = scanner.ident()?;
                scanner.skip_trivia()?;
                scanner.expect(b';')?;
                parcel = Some(name);
                decls.push(Decl::Parcel(name.to_string()));
            }
            C_BLOCK_START => decls.push(Decl::CBlock(scanner.c_block(line)?)),
            "" => return Err(scanner.error(line, "Unexpected character")),
            _ => {
                let flags = scanner.class_modifiers(word)?;
                let Some(parcel) = parcel else {
                    return Err(scanner.error(line, "Class declared before parcel statement"));
                };
                let decl = scanner.class_header(flags)?;
                decls.push(Decl::Class {
                    parcel: parcel.to_string(),
                    decl,
                });
                scanner.skip_body()?;
            }
        }
    }
    Ok(decls)
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    path: &'a str,
}

impl<'a> Scanner<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self, n: usize) {
        let end = (self.pos + n).min(self.text.len());
        self.line += self.text.as_bytes()[self.pos..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.pos = end;
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), HierarchyError> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.advance(rest.len() - trimmed.len());

            if trimmed.starts_with("//") {
                let len = trimmed.find('\n').unwrap_or(trimmed.len());
                self.advance(len);
            } else if trimmed.starts_with("/*") {
                let line = self.line;
                let Some(len) = trimmed[2..].find("*/") else {
                    return Err(self.error(line, "Unterminated comment"));
                };
                self.advance(len + 4);
            } else {
                return Ok(());
            }
        }
    }

    /// Consume an identifier-like word; empty if none starts here.
    fn word(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .bytes()
            .take_while(|&b| b.is_ascii_alphanumeric() || b == b'_')
            .count();
        self.advance(len);
        &rest[..len]
    }

    fn ident(&mut self) -> Result<&'a str, HierarchyError> {
        self.skip_trivia()?;
        let line = self.line;
        let word = self.word();
        if word.is_empty() {
            return Err(self.error(line, "Expected identifier"));
        }
        Ok(word)
    }

    /// `Foo::Bar::Baz`
    fn class_name(&mut self) -> Result<&'a str, HierarchyError> {
        self.skip_trivia()?;
        let start = self.pos;
        self.ident()?;
        while self.rest().starts_with("::") {
            self.advance(2);
            self.word_required()?;
        }
        Ok(&self.text[start..self.pos])
    }

    fn word_required(&mut self) -> Result<(), HierarchyError> {
        let line = self.line;
        if self.word().is_empty() {
            return Err(self.error(line, "Expected identifier after '::'"));
        }
        Ok(())
    }

    fn expect(&mut self, byte: u8) -> Result<(), HierarchyError> {
        if self.peek() == Some(byte) {
            self.advance(1);
            return Ok(());
        }
        Err(self.error(self.line, &format!("Expected '{}'", char::from(byte))))
    }

    /// Read modifiers starting with the already consumed `first` word, up
    /// to and including `class`.
    fn class_modifiers(&mut self, first: &str) -> Result<ClassFlags, HierarchyError> {
        let mut flags = ClassFlags::empty();
        let mut word = first;
        loop {
            let flag = match word {
                "class" => return Ok(flags),
                "public" => ClassFlags::PUBLIC,
                "final" => ClassFlags::FINAL,
                "inert" => ClassFlags::INERT,
                "abstract" => ClassFlags::ABSTRACT,
                _ => {
                    return Err(self.error(self.line, &format!("Unexpected '{word}'")));
                }
            };
            if flags.contains(flag) {
                return Err(self.error(self.line, &format!("Duplicate modifier '{word}'")));
            }
            flags |= flag;
            word = self.ident()?;
        }
    }

    /// Class name with optional `nickname` and `inherits` clauses, up to
    /// the opening brace.
    fn class_header(&mut self, flags: ClassFlags) -> Result<ClassDecl, HierarchyError> {
        let mut decl = ClassDecl::new(self.class_name()?).with_flags(flags);
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'{') {
                return Ok(decl);
            }
            let line = self.line;
            match self.word() {
                "nickname" if decl.nickname.is_none() => {
                    decl = decl.with_nickname(self.ident()?);
                }
                "inherits" if decl.parent.is_none() => {
                    decl = decl.with_parent(self.class_name()?);
                }
                "" => return Err(self.error(line, "Expected '{'")),
                other => {
                    return Err(self.error(line, &format!("Unexpected '{other}' in class header")));
                }
            }
        }
    }

    /// Skip a `{ ... }` body, honoring nested braces, comments and string
    /// literals.
    fn skip_body(&mut self) -> Result<(), HierarchyError> {
        let open_line = self.line;
        self.expect(b'{')?;
        let mut depth = 1usize;
        while depth > 0 {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(open_line, "Unterminated class body")),
                Some(b'{') => depth += 1,
                Some(b'}') => depth -= 1,
                Some(quote @ (b'"' | b'\'')) => {
                    self.skip_literal(quote)?;
                    continue;
                }
                Some(_) => {
                    let step = self.rest().chars().next().map_or(1, char::len_utf8);
                    self.advance(step);
                    continue;
                }
            }
            self.advance(1);
        }
        Ok(())
    }

    fn skip_literal(&mut self, quote: u8) -> Result<(), HierarchyError> {
        let line = self.line;
        let bytes = self.rest().as_bytes();
        let mut i = 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'\n' => break,
                b if b == quote => {
                    self.advance(i + 1);
                    return Ok(());
                }
                _ => i += 1,
            }
        }
        Err(self.error(line, "Unterminated literal"))
    }

    /// Text between `__C__` and `__END_C__`, verbatim.
    fn c_block(&mut self, line: usize) -> Result<String, HierarchyError> {
        let rest = self.rest();
        let Some(len) = rest.find(C_BLOCK_END) else {
            return Err(self.error(line, "Unterminated __C__ block"));
        };
        self.advance(len + C_BLOCK_END.len());
        Ok(rest[..len].to_string())
    }

    #[cold]
    fn error(&self, line: usize, message: &str) -> HierarchyError {
        HierarchyError::Syntax {
            path: self.path.to_string(),
            line,
            message: message.to_string(),
        }
    }
}
