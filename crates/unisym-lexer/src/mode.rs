//! Lexical mode stack
//!
//! Embedded sub-languages (string interpolation, markup) are tracked as an
//! explicit stack of modes. The bottom frame is always `Default` and is never
//! popped, so unbalanced closers in code degrade to ordinary tokens.

/// Which kind of string a `StringInterpolation` frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationKind {
    /// Backtick template; holes open with `${`
    Template,
    /// C# `$"..."`; holes open with `{`, `{{` and `}}` are escapes
    CSharp { verbatim: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ordinary code; `braces` counts unmatched `{` opened in this frame
    Default { braces: u32 },
    /// Inside a string literal between holes
    StringInterpolation { kind: InterpolationKind },
    /// Between `<` and `>` of a markup tag
    MarkupTag { closing: bool },
    /// Children of an open markup element
    MarkupText,
    /// `{ ... }` inside markup; `braces` counts nested `{` in the expression
    MarkupExpressionContainer { braces: u32 },
}

#[derive(Debug, Clone)]
pub struct ModeStack {
    frames: Vec<Mode>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Mode::Default { braces: 0 }],
        }
    }

    pub fn current(&self) -> Mode {
        self.frames
            .last()
            .copied()
            .unwrap_or(Mode::Default { braces: 0 })
    }

    pub fn current_mut(&mut self) -> &mut Mode {
        if self.frames.is_empty() {
            self.frames.push(Mode::Default { braces: 0 });
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn push(&mut self, mode: Mode) {
        self.frames.push(mode);
    }

    /// Pop the top frame; the bottom frame stays
    pub fn pop(&mut self) -> Option<Mode> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Replace the top frame (tag `>` turns into element text)
    pub fn replace(&mut self, mode: Mode) {
        *self.current_mut() = mode;
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when any open frame is markup
    pub fn in_markup(&self) -> bool {
        self.frames.iter().any(|m| {
            matches!(
                m,
                Mode::MarkupTag { .. } | Mode::MarkupText | Mode::MarkupExpressionContainer { .. }
            )
        })
    }

    /// True when a string is waiting for its holes to close
    pub fn in_interpolation(&self) -> bool {
        self.frames
            .iter()
            .any(|m| matches!(m, Mode::StringInterpolation { .. }))
    }

    /// Number of open markup elements (tags plus element bodies)
    pub fn open_elements(&self) -> usize {
        self.frames
            .iter()
            .filter(|m| matches!(m, Mode::MarkupText | Mode::MarkupTag { .. }))
            .count()
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_frame_is_never_popped() {
        let mut stack = ModeStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.current(), Mode::Default { braces: 0 });
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_nested_contexts_compose() {
        let mut stack = ModeStack::new();
        stack.push(Mode::StringInterpolation {
            kind: InterpolationKind::Template,
        });
        stack.push(Mode::Default { braces: 0 });
        stack.push(Mode::MarkupTag { closing: false });
        stack.replace(Mode::MarkupText);
        stack.push(Mode::MarkupExpressionContainer { braces: 0 });
        assert!(stack.in_markup());
        assert!(stack.in_interpolation());
        assert_eq!(stack.open_elements(), 1);

        assert_eq!(stack.pop(), Some(Mode::MarkupExpressionContainer { braces: 0 }));
        assert_eq!(stack.pop(), Some(Mode::MarkupText));
        assert!(!stack.in_markup());
        assert_eq!(stack.pop(), Some(Mode::Default { braces: 0 }));
        assert_eq!(
            stack.current(),
            Mode::StringInterpolation {
                kind: InterpolationKind::Template
            }
        );
    }
}
