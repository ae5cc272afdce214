use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

/// Byte range inside a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    RuntimeError,
}

/// The concrete reason a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    UnterminatedString,
    StatementExpected,
    UnknownStatement(String),
    VariableExpected,
    EqualsExpected,
    EndOfLineExpected,
    MissingRightParen,
    ExpressionExpected,
    /// Parentheses nested deeper than the interpreter allows.
    NestingTooDeep(usize),
    /// Only reachable if the operator matchers and the evaluator disagree.
    UnknownOperator(String),
    VariableNotFound(String),
}

impl ErrorReason {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorReason::UnterminatedString => ErrorKind::LexError,
            ErrorReason::VariableNotFound(_) => ErrorKind::RuntimeError,
            ErrorReason::StatementExpected
            | ErrorReason::UnknownStatement(_)
            | ErrorReason::VariableExpected
            | ErrorReason::EqualsExpected
            | ErrorReason::EndOfLineExpected
            | ErrorReason::MissingRightParen
            | ErrorReason::ExpressionExpected
            | ErrorReason::NestingTooDeep(_)
            | ErrorReason::UnknownOperator(_) => ErrorKind::ParseError,
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorReason::UnterminatedString => write!(f, "Unclosed string"),
            ErrorReason::StatementExpected => write!(f, "Statement expected"),
            ErrorReason::UnknownStatement(name) => write!(f, "Unknown statement: {}", name),
            ErrorReason::VariableExpected => write!(f, "Variable expected"),
            ErrorReason::EqualsExpected => write!(f, "= expected"),
            ErrorReason::EndOfLineExpected => write!(f, "End of line expected"),
            ErrorReason::MissingRightParen => write!(f, "Missing \")\""),
            ErrorReason::ExpressionExpected => write!(f, "Expression expected"),
            ErrorReason::NestingTooDeep(limit) => {
                write!(f, "Expression nested too deeply (limit {})", limit)
            }
            ErrorReason::UnknownOperator(op) => write!(f, "Unknown operator: {}", op),
            ErrorReason::VariableNotFound(name) => write!(f, "Variable {} not found", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicError {
    pub reason: ErrorReason,
    pub span: Span,
    pub help: Option<String>,
}

impl BasicError {
    pub fn new(reason: ErrorReason, span: Span) -> Self {
        Self {
            reason,
            span,
            help: None,
        }
    }

    pub fn new_with_help(reason: ErrorReason, span: Span, help: String) -> Self {
        Self {
            reason,
            span,
            help: Some(help),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.reason.kind()
    }

    pub fn message(&self) -> String {
        self.reason.to_string()
    }

    /// Renders the error as a diagnostic on stderr.
    ///
    /// `line_number` is 1-based and only shown when the line came from a file.
    pub fn report(&self, source: &str, filename: Option<&str>, line_number: Option<usize>) {
        let filename = filename.unwrap_or("<repl>");
        let message = self.message();

        let color = match self.kind() {
            ErrorKind::LexError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::RuntimeError => Color::Magenta,
        };

        let kind_str = match self.kind() {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::ParseError => "Syntax Error",
            ErrorKind::RuntimeError => "Runtime Error",
        };

        // ariadne counts characters, the scanner counts bytes
        let start = char_offset(source, self.span.start);
        let end = char_offset(source, self.span.end).max(start);

        let headline = match line_number {
            Some(n) => format!("{} on line {}: {}", kind_str.fg(color), n, message),
            None => format!("{}: {}", kind_str.fg(color), message),
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(headline)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        // Nothing sensible to do if stderr itself is gone.
        let _ = report_builder
            .finish()
            .eprint((filename, Source::from(source)));
    }
}

fn char_offset(source: &str, byte_offset: usize) -> usize {
    let clamped = byte_offset.min(source.len());
    source
        .char_indices()
        .take_while(|(index, _)| *index < clamped)
        .count()
}

impl fmt::Display for BasicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for BasicError {}
