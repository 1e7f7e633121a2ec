/// Binary set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOp {
    /// Union (`+`)
    Union,
    /// Difference, left minus right (`-`)
    Difference,
}

impl SetOp {
    /// Maps operator token text to an operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(SetOp::Union),
            "-" => Some(SetOp::Difference),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            SetOp::Union => '+',
            SetOp::Difference => '-',
        }
    }
}
