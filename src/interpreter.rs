use crate::error::{BasicError, ErrorReason, Span};
use crate::lexer::{MatchResult, Scanner, Token};
use crate::value::Value;
use std::collections::HashMap;
use tracing::{debug, trace};

/// How many parentheses may be open at once within one line.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Variable table. Names are case-insensitive and stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(&name.to_lowercase()).copied()
    }

    pub fn assign(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_lowercase(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// What a successfully executed line did.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A line of output. A bare `PRINT` produces an empty line.
    Print(String),
    Assign { name: String, value: f64 },
}

/// Executes one line at a time against a persistent environment.
#[derive(Debug, Default)]
pub struct Interpreter {
    environment: Environment,
    depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
            depth: 0,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Parses and executes a single statement.
    ///
    /// On error the environment is left untouched.
    pub fn parse_statement(&mut self, line: &str) -> Result<Effect, BasicError> {
        let mut scanner = Scanner::new(line);
        self.depth = 0;

        let keyword = match scanner.match_keyword() {
            MatchResult::Success(token) => token,
            MatchResult::Failure => {
                return Err(BasicError::new(
                    ErrorReason::StatementExpected,
                    Span::single(scanner.peek_position()),
                ));
            }
        };

        let statement = keyword.lexeme.to_lowercase();
        debug!(statement = %statement, "dispatching");
        match statement.as_str() {
            "let" => self.parse_let(&mut scanner),
            "print" => self.parse_print(&mut scanner),
            _ => Err(BasicError::new_with_help(
                ErrorReason::UnknownStatement(statement),
                keyword.span,
                "Only LET and PRINT statements are supported.".to_string(),
            )),
        }
    }

    fn parse_let(&mut self, scanner: &mut Scanner) -> Result<Effect, BasicError> {
        let variable = match scanner.match_variable() {
            MatchResult::Success(token) => token,
            MatchResult::Failure => {
                return Err(BasicError::new_with_help(
                    ErrorReason::VariableExpected,
                    Span::single(scanner.peek_position()),
                    "LET needs a variable name: LET x = 1".to_string(),
                ));
            }
        };

        // variable names are not case sensitive
        let name = variable.lexeme.to_lowercase();
        if !scanner.match_literal("=").is_success() {
            return Err(BasicError::new(
                ErrorReason::EqualsExpected,
                Span::single(scanner.peek_position()),
            ));
        }

        let value = self.parse_expression(scanner)?;
        expect_eol(scanner)?;

        debug!(name = %name, value, "assigning");
        self.environment.assign(&name, value);
        Ok(Effect::Assign { name, value })
    }

    fn parse_print(&mut self, scanner: &mut Scanner) -> Result<Effect, BasicError> {
        if scanner.match_eol().is_success() {
            return Ok(Effect::Print(String::new()));
        }

        let mut output = self.parse_value(scanner)?.to_string();
        while scanner.match_literal(",").is_success() {
            output.push_str(&self.parse_value(scanner)?.to_string());
        }

        expect_eol(scanner)?;
        Ok(Effect::Print(output))
    }

    fn parse_value(&mut self, scanner: &mut Scanner) -> Result<Value, BasicError> {
        let value = match scanner.match_string()? {
            MatchResult::Success(token) => Value::from(token.lexeme),
            MatchResult::Failure => Value::from(self.parse_expression(scanner)?),
        };
        trace!(kind = value.type_name(), "printable value");
        Ok(value)
    }

    fn parse_expression(&mut self, scanner: &mut Scanner) -> Result<f64, BasicError> {
        let mut result = self.parse_term(scanner)?;

        while let MatchResult::Success(operator) = scanner.match_add_or_sub() {
            let right = self.parse_term(scanner)?;
            result = match operator.lexeme.as_str() {
                "+" => result + right,
                "-" => result - right,
                _ => return Err(unknown_operator(operator)),
            };
        }

        Ok(result)
    }

    fn parse_term(&mut self, scanner: &mut Scanner) -> Result<f64, BasicError> {
        let mut result = self.parse_factor(scanner)?;

        while let MatchResult::Success(operator) = scanner.match_mul_or_div() {
            let right = self.parse_factor(scanner)?;
            result = match operator.lexeme.as_str() {
                "*" => result * right,
                // division by zero follows IEEE 754 and yields an infinity or NaN
                "/" => result / right,
                _ => return Err(unknown_operator(operator)),
            };
        }

        Ok(result)
    }

    fn parse_factor(&mut self, scanner: &mut Scanner) -> Result<f64, BasicError> {
        if let MatchResult::Success(number) = scanner.match_number() {
            // digit runs always parse, huge ones saturate to infinity
            return Ok(number.lexeme.parse::<f64>().unwrap_or(f64::INFINITY));
        }

        if let MatchResult::Success(variable) = scanner.match_variable() {
            // variable names are case insensitive
            let name = variable.lexeme.to_lowercase();
            return self.environment.get(&name).ok_or_else(|| {
                BasicError::new_with_help(
                    ErrorReason::VariableNotFound(name.clone()),
                    variable.span,
                    format!("Assign it first: LET {} = ...", name),
                )
            });
        }

        if let MatchResult::Success(open) = scanner.match_literal("(") {
            if self.depth >= MAX_NESTING_DEPTH {
                return Err(BasicError::new(
                    ErrorReason::NestingTooDeep(MAX_NESTING_DEPTH),
                    open.span,
                ));
            }

            self.depth += 1;
            let value = self.parse_expression(scanner);
            self.depth -= 1;
            let value = value?;
            if scanner.match_literal(")").is_success() {
                return Ok(value);
            }
            return Err(BasicError::new_with_help(
                ErrorReason::MissingRightParen,
                Span::single(scanner.peek_position()),
                "Every '(' needs a matching ')'.".to_string(),
            ));
        }

        Err(BasicError::new(
            ErrorReason::ExpressionExpected,
            Span::single(scanner.peek_position()),
        ))
    }
}

fn expect_eol(scanner: &mut Scanner) -> Result<(), BasicError> {
    if scanner.match_eol().is_success() {
        Ok(())
    } else {
        Err(BasicError::new(
            ErrorReason::EndOfLineExpected,
            Span::single(scanner.peek_position()),
        ))
    }
}

fn unknown_operator(operator: Token) -> BasicError {
    BasicError::new(ErrorReason::UnknownOperator(operator.lexeme), operator.span)
}
