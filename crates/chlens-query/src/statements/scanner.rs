//! Lexical state machine behind the statement splitter

/// What the splitter should do with the character(s) at the scan position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Append the next `n` characters (1 or 2) to the current statement
    Consume(usize),
    /// An active semicolon: close the current statement
    Delimiter,
}

/// Scanner modes plus the 1-based position of the next character.
///
/// At most one of the four mode flags is set at any time. The fields are
/// public so a scan can be resumed from an arbitrary seeded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerState {
    pub in_single_quote: bool,
    pub in_double_quote: bool,
    pub in_line_comment: bool,
    pub in_block_comment: bool,
    pub line: u32,
    pub column: u32,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self::at(1, 1)
    }
}

impl ScannerState {
    /// Creates an idle state positioned at `line`/`column`
    pub fn at(line: u32, column: u32) -> Self {
        Self {
            in_single_quote: false,
            in_double_quote: false,
            in_line_comment: false,
            in_block_comment: false,
            line,
            column,
        }
    }

    /// True when the scanner is outside every quote and comment
    pub fn is_idle(&self) -> bool {
        !self.in_single_quote
            && !self.in_double_quote
            && !self.in_line_comment
            && !self.in_block_comment
    }

    /// Position of the next character as `(line, column)`
    pub fn position(&self) -> (u32, u32) {
        (self.line, self.column)
    }

    /// Decides how to treat `ch` (with one character of lookahead) and
    /// updates the mode flags accordingly. Positions are not touched; call
    /// [`ScannerState::advance`] for every consumed character.
    pub fn classify(&mut self, ch: char, next: Option<char>) -> Transition {
        if self.in_line_comment {
            // Cleared by `advance` on the newline
            return Transition::Consume(1);
        }

        if self.in_block_comment {
            if ch == '*' && next == Some('/') {
                self.in_block_comment = false;
                return Transition::Consume(2);
            }
            return Transition::Consume(1);
        }

        if self.in_single_quote {
            return Self::quoted(&mut self.in_single_quote, '\'', ch, next);
        }

        if self.in_double_quote {
            return Self::quoted(&mut self.in_double_quote, '"', ch, next);
        }

        match (ch, next) {
            ('-', Some('-')) => {
                self.in_line_comment = true;
                Transition::Consume(2)
            }
            ('/', Some('*')) => {
                self.in_block_comment = true;
                Transition::Consume(2)
            }
            ('\'', _) => Self::quoted(&mut self.in_single_quote, '\'', ch, next),
            ('"', _) => Self::quoted(&mut self.in_double_quote, '"', ch, next),
            (';', _) => Transition::Delimiter,
            _ => Transition::Consume(1),
        }
    }

    /// Quote handling shared by both quote kinds: a doubled quote is an
    /// escape and never toggles the mode.
    fn quoted(flag: &mut bool, quote: char, ch: char, next: Option<char>) -> Transition {
        if ch != quote {
            return Transition::Consume(1);
        }
        if next == Some(quote) {
            return Transition::Consume(2);
        }
        *flag = !*flag;
        Transition::Consume(1)
    }

    /// Moves the position past `ch`
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
            self.in_line_comment = false;
        } else {
            self.column += 1;
        }
    }
}
