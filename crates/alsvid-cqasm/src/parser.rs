//! Recursive-descent parser for the cQASM 3 subset.
//!
//! Produces a `(RegisterManager, Ir)` pair directly; there is no separate
//! AST. Supported statements: the version header, named qubit/bit register
//! declarations, catalog gate applications with SGMQ operand notation
//! (`H q[0, 2]`, `H q[0:4]`), broadcast and indexed measurements, the
//! non-unitaries `init`/`reset`/`barrier`/`wait`, and
//! `asm(Backend) ''' … '''` passthrough blocks.

use alsvid_ir::{
    AsmDeclaration, Barrier, Gate, Init, Ir, Measure, NonUnitary, Qubit, RegisterKind,
    RegisterManager, Reset, Wait, catalog,
};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a cQASM 3 source string.
pub fn parse(source: &str) -> ParseResult<(RegisterManager, Ir)> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()?;
    Ok((parser.register_manager, parser.ir))
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<SpannedToken>,
    pos: usize,
    register_manager: RegisterManager,
    ir: Ir,
}

/// A register reference with optional indices; `None` means the whole
/// register (broadcast notation).
struct RegisterRef {
    name: String,
    indices: Option<Vec<u32>>,
}

/// A parsed gate parameter.
#[derive(Debug, Clone, Copy)]
enum Param {
    Int(i64),
    Float(f64),
}

impl Param {
    fn as_f64(self) -> f64 {
        match self {
            Param::Int(v) => v as f64,
            Param::Float(v) => v,
        }
    }
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(token) => tokens.push(token),
                Err((span, message)) => {
                    let (line, col) = line_col(source, span.start);
                    return Err(ParseError::Lexer { message, line, col });
                }
            }
        }
        Ok(Self {
            source,
            tokens,
            pos: 0,
            register_manager: RegisterManager::new(),
            ir: Ir::new(),
        })
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.peek().is_some_and(|t| {
            std::mem::discriminant(t) == std::mem::discriminant(token)
        }) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> ParseResult<Token> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEof(expected.to_string())),
            Some(found)
                if std::mem::discriminant(found) != std::mem::discriminant(&expected) =>
            {
                let found = found.to_string();
                Err(self.unexpected(&expected.to_string(), &found))
            }
            Some(_) => Ok(self.advance().unwrap_or(expected)),
        }
    }

    /// Location of the current token, for error reporting.
    fn here(&self) -> (usize, usize) {
        let offset = self
            .tokens
            .get(self.pos.min(self.tokens.len().saturating_sub(1)))
            .map(|t| t.span.start)
            .unwrap_or(self.source.len());
        line_col(self.source, offset)
    }

    fn unexpected(&self, expected: &str, found: &str) -> ParseError {
        let (line, col) = self.here();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            line,
            col,
        }
    }

    fn parse_program(&mut self) -> ParseResult<()> {
        self.skip_separators();
        self.expect(Token::Version)?;
        self.parse_version()?;

        while !self.is_eof() {
            self.skip_separators();
            if self.is_eof() {
                break;
            }
            self.parse_statement()?;
        }
        Ok(())
    }

    fn skip_separators(&mut self) {
        while self.consume(&Token::Semicolon) {}
    }

    fn parse_version(&mut self) -> ParseResult<()> {
        match self.advance() {
            Some(Token::FloatLiteral(v)) if (3.0..4.0).contains(&v) => Ok(()),
            Some(Token::IntLiteral(3)) => Ok(()),
            Some(other) => Err(ParseError::InvalidVersion(other.to_string())),
            None => Err(ParseError::UnexpectedEof("version number".to_string())),
        }
    }

    fn parse_statement(&mut self) -> ParseResult<()> {
        match self.peek() {
            Some(Token::Qubit) => self.parse_register_declaration(RegisterKind::Qubit),
            Some(Token::Bit) => self.parse_register_declaration(RegisterKind::Bit),
            Some(Token::Asm) => self.parse_asm_declaration(),
            Some(Token::Init) => {
                self.advance();
                self.parse_single_qubit_non_unitary(|qubit| NonUnitary::Init(Init { qubit }))
            }
            Some(Token::Reset) => {
                self.advance();
                self.parse_single_qubit_non_unitary(|qubit| NonUnitary::Reset(Reset { qubit }))
            }
            Some(Token::Barrier) => {
                self.advance();
                self.parse_single_qubit_non_unitary(|qubit| {
                    NonUnitary::Barrier(Barrier { qubit })
                })
            }
            Some(Token::Wait) => self.parse_wait(),
            Some(Token::Identifier(_)) => self.parse_gate_or_measure(),
            Some(other) => Err(self.unexpected("a statement", &other.to_string())),
            None => Err(ParseError::UnexpectedEof("a statement".to_string())),
        }
    }

    fn parse_register_declaration(&mut self, kind: RegisterKind) -> ParseResult<()> {
        self.advance();
        let size = if self.consume(&Token::LBracket) {
            let size = self.parse_int_literal()?;
            self.expect(Token::RBracket)?;
            size as u32
        } else {
            1
        };
        let name = self.parse_identifier()?;
        self.register_manager.add_register(kind, name, size)?;
        Ok(())
    }

    fn parse_asm_declaration(&mut self) -> ParseResult<()> {
        self.advance();
        self.expect(Token::LParen)?;
        let backend_name = self.parse_identifier()?;
        self.expect(Token::RParen)?;
        let backend_code = match self.advance() {
            Some(Token::RawBlock(code)) => code,
            Some(other) => return Err(self.unexpected("''' raw text '''", &other.to_string())),
            None => return Err(ParseError::UnexpectedEof("''' raw text '''".to_string())),
        };
        self.ir.add_asm_declaration(AsmDeclaration {
            backend_name,
            backend_code,
        });
        Ok(())
    }

    fn parse_single_qubit_non_unitary(
        &mut self,
        build: impl Fn(Qubit) -> NonUnitary,
    ) -> ParseResult<()> {
        let reference = self.parse_register_ref()?;
        for qubit in self.resolve_qubits(&reference)? {
            self.ir.add_non_unitary(build(qubit));
        }
        Ok(())
    }

    fn parse_wait(&mut self) -> ParseResult<()> {
        self.advance();
        self.expect(Token::LParen)?;
        let time = self.parse_int_literal()? as i64;
        self.expect(Token::RParen)?;
        let reference = self.parse_register_ref()?;
        for qubit in self.resolve_qubits(&reference)? {
            self.ir
                .add_non_unitary(NonUnitary::Wait(Wait { qubit, time }));
        }
        Ok(())
    }

    /// A statement starting with an identifier is either a gate application
    /// (`H q[0]`, `CR(1.2) q[0], q[1]`) or a measurement assignment
    /// (`b = measure q`, `b[0] = measure q[0]`).
    fn parse_gate_or_measure(&mut self) -> ParseResult<()> {
        let name_location = self.here();
        let reference = self.parse_register_ref()?;

        if self.consume(&Token::Eq) {
            self.expect(Token::Measure)?;
            let qubit_ref = self.parse_register_ref()?;
            let bits = self.resolve_bits(&reference)?;
            let qubits = self.resolve_qubits(&qubit_ref)?;
            if bits.len() != qubits.len() {
                return Err(ParseError::OperandLengthMismatch {
                    name: "measure".to_string(),
                    lengths: vec![bits.len(), qubits.len()],
                });
            }
            for (qubit, bit) in qubits.into_iter().zip(bits) {
                self.ir
                    .add_non_unitary(NonUnitary::Measure(Measure::new(qubit, bit)));
            }
            return Ok(());
        }

        // Not an assignment: the reference was a gate name, which takes no
        // indices.
        if reference.indices.is_some() {
            let (line, col) = name_location;
            return Err(ParseError::UnexpectedToken {
                expected: "'=' after an indexed reference".to_string(),
                found: reference.name,
                line,
                col,
            });
        }
        self.parse_gate_application(reference.name, name_location)
    }

    fn parse_gate_application(
        &mut self,
        name: String,
        location: (usize, usize),
    ) -> ParseResult<()> {
        let params = if matches!(self.peek(), Some(Token::LParen)) {
            self.parse_params()?
        } else {
            vec![]
        };

        let mut operand_refs = vec![self.parse_register_ref()?];
        while self.consume(&Token::Comma) {
            operand_refs.push(self.parse_register_ref()?);
        }

        let operands: Vec<Vec<Qubit>> = operand_refs
            .iter()
            .map(|r| self.resolve_qubits(r))
            .collect::<ParseResult<_>>()?;

        let lengths: Vec<usize> = operands.iter().map(Vec::len).collect();
        if lengths.windows(2).any(|w| w[0] != w[1]) {
            return Err(ParseError::OperandLengthMismatch { name, lengths });
        }

        let count = lengths.first().copied().unwrap_or(0);
        for k in 0..count {
            let tuple: Vec<Qubit> = operands.iter().map(|list| list[k]).collect();
            let gate = build_gate(&name, &params, &tuple, location)?;
            self.ir.add_gate(gate);
        }
        Ok(())
    }

    fn parse_params(&mut self) -> ParseResult<Vec<Param>> {
        self.expect(Token::LParen)?;
        let mut params = vec![self.parse_param()?];
        while self.consume(&Token::Comma) {
            params.push(self.parse_param()?);
        }
        self.expect(Token::RParen)?;
        Ok(params)
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        let negative = if self.consume(&Token::Minus) {
            true
        } else {
            self.consume(&Token::Plus);
            false
        };
        let sign = if negative { -1.0 } else { 1.0 };
        match self.advance() {
            Some(Token::FloatLiteral(v)) => Ok(Param::Float(sign * v)),
            Some(Token::IntLiteral(v)) => {
                let value = v as i64;
                Ok(Param::Int(if negative { -value } else { value }))
            }
            Some(other) => Err(self.unexpected("a number", &other.to_string())),
            None => Err(ParseError::UnexpectedEof("a number".to_string())),
        }
    }

    fn parse_register_ref(&mut self) -> ParseResult<RegisterRef> {
        let name = self.parse_identifier()?;
        let indices = if self.consume(&Token::LBracket) {
            let mut indices = Vec::new();
            loop {
                let start = self.parse_int_literal()? as u32;
                if self.consume(&Token::Colon) {
                    // Inclusive range, `q[0:4]`.
                    let end = self.parse_int_literal()? as u32;
                    indices.extend(start..=end);
                } else {
                    indices.push(start);
                }
                if !self.consume(&Token::Comma) {
                    break;
                }
            }
            self.expect(Token::RBracket)?;
            Some(indices)
        } else {
            None
        };
        Ok(RegisterRef { name, indices })
    }

    fn resolve_qubits(&self, reference: &RegisterRef) -> ParseResult<Vec<Qubit>> {
        match &reference.indices {
            Some(indices) => indices
                .iter()
                .map(|&i| {
                    self.register_manager
                        .qubit_index(&reference.name, i)
                        .map_err(ParseError::from)
                })
                .collect(),
            None => {
                let first = self.register_manager.qubit_index(&reference.name, 0)?;
                let (register, _) = self.register_manager.resolve_qubit(first)?;
                Ok((0..register.size())
                    .map(|i| Qubit(register.offset() + i))
                    .collect())
            }
        }
    }

    fn resolve_bits(&self, reference: &RegisterRef) -> ParseResult<Vec<alsvid_ir::Bit>> {
        match &reference.indices {
            Some(indices) => indices
                .iter()
                .map(|&i| {
                    self.register_manager
                        .bit_index(&reference.name, i)
                        .map_err(ParseError::from)
                })
                .collect(),
            None => {
                let first = self.register_manager.bit_index(&reference.name, 0)?;
                let (register, _) = self.register_manager.resolve_bit(first)?;
                Ok((0..register.size())
                    .map(|i| alsvid_ir::Bit(register.offset() + i))
                    .collect())
            }
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(self.unexpected("an identifier", &other.to_string())),
            None => Err(ParseError::UnexpectedEof("an identifier".to_string())),
        }
    }

    fn parse_int_literal(&mut self) -> ParseResult<u64> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(v),
            Some(other) => Err(self.unexpected("an integer", &other.to_string())),
            None => Err(ParseError::UnexpectedEof("an integer".to_string())),
        }
    }
}

fn build_gate(
    name: &str,
    params: &[Param],
    qubits: &[Qubit],
    location: (usize, usize),
) -> ParseResult<Gate> {
    let check_params = |expected: usize| -> ParseResult<()> {
        if params.len() != expected {
            return Err(ParseError::WrongParameterCount {
                name: name.to_string(),
                expected,
                got: params.len(),
            });
        }
        Ok(())
    };
    let check_operands = |expected: usize| -> ParseResult<()> {
        if qubits.len() != expected {
            return Err(ParseError::WrongOperandCount {
                name: name.to_string(),
                expected,
                got: qubits.len(),
            });
        }
        Ok(())
    };

    let single = |constructor: fn(Qubit) -> Gate| -> ParseResult<Gate> {
        check_params(0)?;
        check_operands(1)?;
        Ok(constructor(qubits[0]))
    };
    let rotation = |constructor: fn(Qubit, f64) -> Gate| -> ParseResult<Gate> {
        check_params(1)?;
        check_operands(1)?;
        Ok(constructor(qubits[0], params[0].as_f64()))
    };

    match name {
        "I" | "Identity" => single(catalog::i),
        "H" | "Hadamard" => single(catalog::h),
        "X" => single(catalog::x),
        "X90" => single(catalog::x90),
        "mX90" => single(catalog::mx90),
        "Y" => single(catalog::y),
        "Y90" => single(catalog::y90),
        "mY90" => single(catalog::my90),
        "Z" => single(catalog::z),
        "S" => single(catalog::s),
        "Sdag" => single(catalog::sdag),
        "T" => single(catalog::t),
        "Tdag" => single(catalog::tdag),
        "Rx" => rotation(catalog::rx),
        "Ry" => rotation(catalog::ry),
        "Rz" => rotation(catalog::rz),
        "Rn" => {
            check_params(5)?;
            check_operands(1)?;
            Ok(catalog::rn(
                qubits[0],
                params[0].as_f64(),
                params[1].as_f64(),
                params[2].as_f64(),
                params[3].as_f64(),
                params[4].as_f64(),
            )?)
        }
        "SWAP" => {
            check_params(0)?;
            check_operands(2)?;
            Ok(catalog::swap(qubits[0], qubits[1])?)
        }
        "CNOT" => {
            check_params(0)?;
            check_operands(2)?;
            Ok(catalog::cnot(qubits[0], qubits[1])?)
        }
        "CZ" => {
            check_params(0)?;
            check_operands(2)?;
            Ok(catalog::cz(qubits[0], qubits[1])?)
        }
        "CR" => {
            check_params(1)?;
            check_operands(2)?;
            Ok(catalog::cr(qubits[0], qubits[1], params[0].as_f64())?)
        }
        "CRk" => {
            check_params(1)?;
            check_operands(2)?;
            let Param::Int(k) = params[0] else {
                return Err(ParseError::WrongParameterCount {
                    name: name.to_string(),
                    expected: 1,
                    got: params.len(),
                });
            };
            Ok(catalog::crk(qubits[0], qubits[1], k)?)
        }
        _ => {
            let (line, col) = location;
            Err(ParseError::UnknownInstruction {
                name: name.to_string(),
                line,
                col,
            })
        }
    }
}

/// 1-based line and column of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(source.len());
    let mut line = 1;
    let mut col = 1;
    for ch in source[..clamped].chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
