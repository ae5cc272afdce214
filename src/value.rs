use std::fmt;

/// A printable value: what `PRINT` accepts between commas.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    let sign = if n.is_sign_negative() { "-" } else { "" };
                    write!(f, "{}Infinity", sign)
                } else if *n == 0.0 {
                    // -0 prints as 0
                    write!(f, "0")
                } else if n.abs() < 1e-6 || n.abs() >= 1e21 {
                    write_exponential(f, *n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest digits in scientific form with an explicit exponent sign for
/// positive exponents: `1e-7`, `1.5e+21`.
fn write_exponential(f: &mut fmt::Formatter, n: f64) -> fmt::Result {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => write!(f, "{}", text),
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
