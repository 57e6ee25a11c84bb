#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Column not found: '{0}'")]
    MissingColumn(String),

    #[error("Type mismatch in column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Row has {got} cells but the table has {expected} columns")]
    RowArity { expected: usize, got: usize },
}
