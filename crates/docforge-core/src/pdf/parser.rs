//! PDF object parser (C4): recursively reads primitives, arrays, dicts,
//! references, and indirect objects from a token stream.

use crate::pdf::error::Error;
use crate::pdf::lexer::{Lexer, Token};
use crate::pdf::object::{Dict, Name, Object, PdfString, Ref, Stream};

/// An indirect object as read from the file: its declared number/gen plus
/// the parsed value (which may itself be a `Stream`).
#[derive(Debug, Clone)]
pub struct IndirectObject {
    pub num: u32,
    pub gen: u16,
    pub value: Object,
}

pub struct ObjectParser<'a> {
    lex: Lexer<'a>,
    data: &'a [u8],
}

impl<'a> ObjectParser<'a> {
    pub fn new(data: &'a [u8], pos: usize) -> Self {
        Self {
            lex: Lexer::at(data, pos),
            data,
        }
    }

    pub fn pos(&self) -> usize {
        self.lex.pos
    }

    /// Parse a single direct object starting at the cursor. Handles the
    /// `<int> <int> R` reference lookahead for bare integers.
    pub fn parse_object(&mut self) -> Result<Object, Error> {
        let tok = self
            .lex
            .next_token()?
            .ok_or_else(|| Error::UnexpectedToken("end of input while parsing object".into()))?;
        self.parse_object_from(tok)
    }

    fn parse_object_from(&mut self, tok: Token) -> Result<Object, Error> {
        match tok {
            Token::Integer(n) => {
                // Lookahead for "<gen> R" reference syntax.
                let checkpoint = self.lex.pos;
                if let Some(Token::Integer(g)) = self.lex.next_token()? {
                    let checkpoint2 = self.lex.pos;
                    if let Some(Token::Keyword(k)) = self.lex.next_token()? {
                        if k == "R" {
                            return Ok(Object::Ref(Ref::new(n as u32, g as u16)));
                        }
                    }
                    self.lex.pos = checkpoint2;
                }
                self.lex.pos = checkpoint;
                Ok(Object::integer(n))
            }
            Token::Real(r) => Ok(Object::real(r)),
            Token::Name(n) => Ok(Object::Name(Name(n))),
            Token::LiteralString(b) | Token::HexString(b) => Ok(Object::String(PdfString::new(b))),
            Token::ArrayStart => self.parse_array(),
            Token::DictStart => self.parse_dict_or_stream(),
            Token::Keyword(k) => match k.as_str() {
                "true" => Ok(Object::Bool(true)),
                "false" => Ok(Object::Bool(false)),
                "null" => Ok(Object::Null),
                other => Err(Error::UnexpectedToken(format!("keyword '{other}'"))),
            },
            other => Err(Error::UnexpectedToken(format!("{other:?}"))),
        }
    }

    fn parse_array(&mut self) -> Result<Object, Error> {
        let mut items = Vec::new();
        loop {
            let tok = self
                .lex
                .next_token()?
                .ok_or_else(|| Error::UnexpectedToken("unterminated array".into()))?;
            if tok == Token::ArrayEnd {
                break;
            }
            items.push(self.parse_object_from(tok)?);
        }
        Ok(Object::Array(items))
    }

    fn parse_dict_or_stream(&mut self) -> Result<Object, Error> {
        let dict = self.parse_dict_body()?;

        // Lookahead for "stream" keyword.
        let checkpoint = self.lex.pos;
        self.lex.skip_whitespace_and_comments();
        if self.lex.remaining().starts_with(b"stream") {
            self.lex.pos += "stream".len();
            // Body starts after a single CRLF or LF.
            if self.data.get(self.lex.pos) == Some(&b'\r') {
                self.lex.pos += 1;
            }
            if self.data.get(self.lex.pos) == Some(&b'\n') {
                self.lex.pos += 1;
            } else {
                return Err(Error::MissingKeyword("LF after 'stream'".into()));
            }
            let body_start = self.lex.pos;

            let declared_len = dict.get_int("Length").map(|v| v as usize);
            let body_end = match declared_len {
                Some(len) if body_start + len <= self.data.len() => {
                    let candidate_end = body_start + len;
                    if self.looks_like_endstream(candidate_end) {
                        candidate_end
                    } else {
                        self.scan_for_endstream(body_start)?
                    }
                }
                _ => self.scan_for_endstream(body_start)?,
            };

            let raw_data = self.data[body_start..body_end].to_vec();
            self.lex.pos = body_end;
            self.lex.skip_whitespace_and_comments();
            if self.lex.remaining().starts_with(b"endstream") {
                self.lex.pos += "endstream".len();
            }
            return Ok(Object::Stream(Stream { dict, raw_data }));
        }
        self.lex.pos = checkpoint;
        Ok(Object::Dict(dict))
    }

    fn looks_like_endstream(&self, pos: usize) -> bool {
        let mut p = pos;
        while self.data.get(p).is_some_and(|b| {
            matches!(b, 0x00 | 0x09 | 0x0a | 0x0c | 0x0d | 0x20)
        }) {
            p += 1;
        }
        self.data[p..].starts_with(b"endstream")
    }

    fn scan_for_endstream(&self, from: usize) -> Result<usize, Error> {
        let needle = b"endstream";
        let hay = &self.data[from..];
        let idx = hay
            .windows(needle.len())
            .position(|w| w == needle)
            .ok_or_else(|| Error::StreamLengthMismatch("no endstream found".into()))?;
        // Trim a single trailing EOL that precedes "endstream".
        let mut end = from + idx;
        if end > from && self.data[end - 1] == b'\n' {
            end -= 1;
            if end > from && self.data[end - 1] == b'\r' {
                end -= 1;
            }
        }
        Ok(end)
    }

    fn parse_dict_body(&mut self) -> Result<Dict, Error> {
        let mut dict = Dict::new();
        loop {
            let tok = self
                .lex
                .next_token()?
                .ok_or_else(|| Error::UnexpectedToken("unterminated dictionary".into()))?;
            if tok == Token::DictEnd {
                break;
            }
            let Token::Name(key) = tok else {
                return Err(Error::UnexpectedToken(format!(
                    "expected dictionary key, found {tok:?}"
                )));
            };
            let value = self.parse_object()?;
            if dict.insert(Name(key.clone()), value).is_some() {
                return Err(Error::DuplicateDictKey(key));
            }
        }
        Ok(dict)
    }

    /// Parse a top-level indirect object: `<num> <gen> obj ... endobj`.
    pub fn parse_indirect_object(&mut self) -> Result<IndirectObject, Error> {
        let num = match self.lex.next_token()? {
            Some(Token::Integer(n)) => n as u32,
            other => return Err(Error::UnexpectedToken(format!("object number, got {other:?}"))),
        };
        let gen = match self.lex.next_token()? {
            Some(Token::Integer(g)) => g as u16,
            other => return Err(Error::UnexpectedToken(format!("generation, got {other:?}"))),
        };
        match self.lex.next_token()? {
            Some(Token::Keyword(k)) if k == "obj" => {}
            other => return Err(Error::MissingKeyword(format!("'obj', got {other:?}"))),
        }
        let value = self.parse_object()?;
        // Tolerate a missing "endobj" (some producers omit it before EOF).
        let checkpoint = self.lex.pos;
        match self.lex.next_token()? {
            Some(Token::Keyword(k)) if k == "endobj" => {}
            _ => self.lex.pos = checkpoint,
        }
        Ok(IndirectObject { num, gen, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference() {
        let mut p = ObjectParser::new(b"12 0 R", 0);
        assert_eq!(p.parse_object().unwrap(), Object::Ref(Ref::new(12, 0)));
    }

    #[test]
    fn parses_plain_integer_without_reference_lookahead_consuming_input() {
        let mut p = ObjectParser::new(b"12 0 obj", 0);
        assert_eq!(p.parse_object().unwrap(), Object::integer(12));
        assert_eq!(p.parse_object().unwrap(), Object::integer(0));
    }

    #[test]
    fn parses_nested_dict_and_array() {
        let mut p = ObjectParser::new(b"<< /Kids [1 0 R 2 0 R] /Count 2 >>", 0);
        let obj = p.parse_object().unwrap();
        let dict = obj.as_dict().unwrap();
        assert_eq!(dict.get_int("Count"), Some(2));
        assert_eq!(dict.get_array("Kids").unwrap().len(), 2);
    }

    #[test]
    fn rejects_duplicate_dict_keys() {
        let mut p = ObjectParser::new(b"<< /A 1 /A 2 >>", 0);
        assert!(matches!(
            p.parse_object(),
            Err(Error::DuplicateDictKey(_))
        ));
    }

    #[test]
    fn parses_indirect_object_with_stream_and_declared_length() {
        let src = b"1 0 obj << /Length 5 >> stream\nhello\nendstream\nendobj";
        let mut p = ObjectParser::new(src, 0);
        let obj = p.parse_indirect_object().unwrap();
        assert_eq!(obj.num, 1);
        let stream = obj.value.as_stream().unwrap();
        assert_eq!(stream.raw_data, b"hello");
    }

    #[test]
    fn falls_back_to_endstream_scan_when_length_unreliable() {
        let src = b"1 0 obj << /Length 999 >> stream\nhello\nendstream\nendobj";
        let mut p = ObjectParser::new(src, 0);
        let obj = p.parse_indirect_object().unwrap();
        let stream = obj.value.as_stream().unwrap();
        assert_eq!(stream.raw_data, b"hello");
    }

    #[test]
    fn parses_crlf_terminated_stream_start() {
        let src = b"1 0 obj << /Length 5 >> stream\r\nhello\r\nendstream\nendobj";
        let mut p = ObjectParser::new(src, 0);
        let obj = p.parse_indirect_object().unwrap();
        let stream = obj.value.as_stream().unwrap();
        assert_eq!(stream.raw_data, b"hello");
    }
}
