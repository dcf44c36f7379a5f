use thiserror::Error;

/// Syntax and semantic errors found while generating code.
///
/// Each variant has a fixed numeric code. The generator stops at the first
/// one it meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodeGenError {
    #[error("CODE GENERATOR ERROR[1]: '=' must be followed by a number.")]
    NumberExpected,
    #[error("CODE GENERATOR ERROR[2]: identifier must be followed by '='.")]
    EqualsExpected,
    #[error("CODE GENERATOR ERROR[3]: expected identifier.")]
    IdentifierExpected,
    #[error("CODE GENERATOR ERROR[4]: semicolon or comma missing after variable declaration.")]
    VarSeparatorExpected,
    #[error("CODE GENERATOR ERROR[5]: semicolon missing after procedure declaration.")]
    ProcSemicolonExpected,
    #[error("CODE GENERATOR ERROR[6]: period expected.")]
    PeriodExpected,
    #[error("CODE GENERATOR ERROR[7]: ':=' expected.")]
    BecomesExpected,
    #[error("CODE GENERATOR ERROR[8]: call must be followed by an identifier.")]
    CallTargetExpected,
    #[error("CODE GENERATOR ERROR[9]: 'then' expected.")]
    ThenExpected,
    #[error("CODE GENERATOR ERROR[10]: semicolon or 'end' expected.")]
    SemicolonOrEndExpected,
    #[error("CODE GENERATOR ERROR[11]: 'do' expected.")]
    DoExpected,
    #[error("CODE GENERATOR ERROR[12]: relational operator expected.")]
    RelationalOperatorExpected,
    #[error("CODE GENERATOR ERROR[13]: right parenthesis missing.")]
    RightParenMissing,
    #[error("CODE GENERATOR ERROR[14]: the preceding factor cannot begin with this symbol.")]
    IllegalFactor,
    #[error("CODE GENERATOR ERROR[14]: a procedure cannot be used as a value.")]
    ProcedureInExpression,
    #[error("CODE GENERATOR ERROR[15]: undeclared identifier.")]
    Undeclared,
    #[error("CODE GENERATOR ERROR[16]: assignment to constant or procedure is not allowed.")]
    AssignToNonVariable,
    #[error("CODE GENERATOR ERROR[17]: call of a constant or variable is meaningless.")]
    CallOfNonProcedure,
    #[error("CODE GENERATOR ERROR[18]: cannot write a procedure.")]
    WriteProcedure,
    #[error("CODE GENERATOR ERROR[19]: cannot read into a constant or procedure.")]
    ReadIntoNonVariable,
    #[error("CODE GENERATOR ERROR[20]: identifier is not declared in the current scope.")]
    NotInCurrentScope,
}

impl CodeGenError {
    pub fn code(self) -> i32 {
        match self {
            CodeGenError::NumberExpected => 1,
            CodeGenError::EqualsExpected => 2,
            CodeGenError::IdentifierExpected => 3,
            CodeGenError::VarSeparatorExpected => 4,
            CodeGenError::ProcSemicolonExpected => 5,
            CodeGenError::PeriodExpected => 6,
            CodeGenError::BecomesExpected => 7,
            CodeGenError::CallTargetExpected => 8,
            CodeGenError::ThenExpected => 9,
            CodeGenError::SemicolonOrEndExpected => 10,
            CodeGenError::DoExpected => 11,
            CodeGenError::RelationalOperatorExpected => 12,
            CodeGenError::RightParenMissing => 13,
            CodeGenError::IllegalFactor | CodeGenError::ProcedureInExpression => 14,
            CodeGenError::Undeclared => 15,
            CodeGenError::AssignToNonVariable => 16,
            CodeGenError::CallOfNonProcedure => 17,
            CodeGenError::WriteProcedure => 18,
            CodeGenError::ReadIntoNonVariable => 19,
            CodeGenError::NotInCurrentScope => 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_carries_code() {
        let all = [
            CodeGenError::NumberExpected,
            CodeGenError::EqualsExpected,
            CodeGenError::IdentifierExpected,
            CodeGenError::VarSeparatorExpected,
            CodeGenError::ProcSemicolonExpected,
            CodeGenError::PeriodExpected,
            CodeGenError::BecomesExpected,
            CodeGenError::CallTargetExpected,
            CodeGenError::ThenExpected,
            CodeGenError::SemicolonOrEndExpected,
            CodeGenError::DoExpected,
            CodeGenError::RelationalOperatorExpected,
            CodeGenError::RightParenMissing,
            CodeGenError::IllegalFactor,
            CodeGenError::ProcedureInExpression,
            CodeGenError::Undeclared,
            CodeGenError::AssignToNonVariable,
            CodeGenError::CallOfNonProcedure,
            CodeGenError::WriteProcedure,
            CodeGenError::ReadIntoNonVariable,
            CodeGenError::NotInCurrentScope,
        ];

        for err in all {
            let prefix = format!("CODE GENERATOR ERROR[{}]: ", err.code());
            assert!(err.to_string().starts_with(&prefix), "{err:?}");
        }
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = CodeGenError::Undeclared;
        let _: &dyn std::error::Error = &err;
    }
}
