//! Byte cursor over the source text.
//!
//! Positions are byte offsets that always sit on a `char` boundary: every
//! movement steps over whole characters.

pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move back to an earlier position returned by [`Cursor::pos`].
    pub fn reset(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos && self.src.is_char_boundary(pos));
        self.pos = pos;
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        self.rest()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `prefix` if the remaining input starts with it.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Consume `len` bytes; the caller guarantees they end on a boundary.
    pub fn advance(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.src.len());
    }

    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Consume everything up to (not including) the next occurrence of
    /// `needle`, or to the end of input.
    pub fn eat_until(&mut self, needle: &str) {
        match self.rest().find(needle) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.src.len(),
        }
    }

    /// Consume one line break (`\n` or `\r\n`) if present.
    pub fn eat_newline(&mut self) -> bool {
        self.eat("\r\n") || self.eat("\n")
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }
}
