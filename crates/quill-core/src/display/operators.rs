//! Operator method names and the symbols they are written with

/// Metadata operator name to source symbol
pub const OPERATOR_SYMBOLS: &[(&str, &str)] = &[
    ("op_Addition", "+"),
    ("op_Subtraction", "-"),
    ("op_Multiply", "*"),
    ("op_Division", "/"),
    ("op_Modulus", "%"),
    ("op_ExclusiveOr", "^"),
    ("op_BitwiseAnd", "&"),
    ("op_BitwiseOr", "|"),
    ("op_LogicalAnd", "&&"),
    ("op_LogicalOr", "||"),
    ("op_Assign", "="),
    ("op_LeftShift", "<<"),
    ("op_RightShift", ">>"),
    ("op_Equality", "=="),
    ("op_GreaterThan", ">"),
    ("op_LessThan", "<"),
    ("op_Inequality", "!="),
    ("op_GreaterThanOrEqual", ">="),
    ("op_LessThanOrEqual", "<="),
    ("op_MultiplicationAssignment", "*="),
    ("op_SubtractionAssignment", "-="),
    ("op_ExclusiveOrAssignment", "^="),
    ("op_LeftShiftAssignment", "<<="),
    ("op_ModulusAssignment", "%="),
    ("op_AdditionAssignment", "+="),
    ("op_BitwiseAndAssignment", "&="),
    ("op_BitwiseOrAssignment", "|="),
    ("op_Comma", ","),
    ("op_DivisionAssignment", "/="),
    ("op_Decrement", "--"),
    ("op_Increment", "++"),
    ("op_UnaryNegation", "-"),
    ("op_UnaryPlus", "+"),
    ("op_OnesComplement", "~"),
];

/// Look up the source symbol for an operator method name
pub fn operator_symbol(name: &str) -> Option<&'static str> {
    OPERATOR_SYMBOLS
        .iter()
        .find(|(op, _)| *op == name)
        .map(|(_, symbol)| *symbol)
}

/// Display text for an operator: `operator +`, or the name without `op_` when unmapped
pub fn operator_display_name(name: &str) -> String {
    match operator_symbol(name) {
        Some(symbol) => format!("operator {symbol}"),
        None => name.strip_prefix("op_").unwrap_or(name).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_operators() {
        assert_eq!(operator_display_name("op_Addition"), "operator +");
        assert_eq!(operator_display_name("op_LogicalOr"), "operator ||");
        assert_eq!(operator_display_name("op_OnesComplement"), "operator ~");
    }

    #[test]
    fn test_unmapped_operators_drop_prefix() {
        assert_eq!(operator_display_name("op_Implicit"), "Implicit");
        assert_eq!(operator_display_name("op_True"), "True");
    }
}
