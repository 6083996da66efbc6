//! Error types for the cQASM frontend.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("lexer error at line {line}, column {col}: {message}")]
    Lexer {
        /// Error description.
        message: String,
        /// 1-based source line.
        line: usize,
        /// 1-based source column.
        col: usize,
    },

    /// Unexpected token.
    #[error("unexpected token at line {line}, column {col}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// What the parser expected.
        expected: String,
        /// What it found instead.
        found: String,
        /// 1-based source line.
        line: usize,
        /// 1-based source column.
        col: usize,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// Invalid version statement.
    #[error("invalid cQASM version: {0}")]
    InvalidVersion(String),

    /// Unknown gate or instruction name.
    #[error("unknown instruction at line {line}, column {col}: '{name}'")]
    UnknownInstruction {
        /// The unrecognized name.
        name: String,
        /// 1-based source line.
        line: usize,
        /// 1-based source column.
        col: usize,
    },

    /// Wrong number of parameters for a gate.
    #[error("instruction '{name}' expects {expected} parameters, got {got}")]
    WrongParameterCount {
        /// Instruction name.
        name: String,
        /// Expected parameter count.
        expected: usize,
        /// Actual parameter count.
        got: usize,
    },

    /// Wrong number of qubit operands for a gate.
    #[error("instruction '{name}' expects {expected} qubit operands, got {got}")]
    WrongOperandCount {
        /// Instruction name.
        name: String,
        /// Expected operand count.
        expected: usize,
        /// Actual operand count.
        got: usize,
    },

    /// Single-gate-multiple-qubit operand lists of differing lengths.
    #[error("instruction '{name}' has operand lists of differing lengths ({lengths:?})")]
    OperandLengthMismatch {
        /// Instruction name.
        name: String,
        /// The observed list lengths.
        lengths: Vec<usize>,
    },

    /// IR error during circuit construction (register lookups, gate
    /// construction).
    #[error("circuit error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur during circuit export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The target format cannot express a gate.
    #[error("unsupported gate: {0}")]
    UnsupportedGate(String),

    /// Underlying IR error.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
