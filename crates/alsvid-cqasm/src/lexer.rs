//! Lexer for cQASM 3.

use logos::{Lexer, Logos};

/// Tokens for cQASM 3.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum Token {
    // Keywords
    #[token("version")]
    Version,

    #[token("qubit")]
    Qubit,

    #[token("bit")]
    Bit,

    #[token("measure")]
    Measure,

    #[token("init")]
    Init,

    #[token("reset")]
    Reset,

    #[token("barrier")]
    Barrier,

    #[token("wait")]
    Wait,

    #[token("asm")]
    Asm,

    // Literals
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    FloatLiteral(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLiteral(u64),

    // Raw text block for asm payloads, delimited by triple quotes.
    #[token("'''", lex_raw_block)]
    RawBlock(String),

    // Identifiers (gate and register names)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Punctuation
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Eq,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,
}

/// Consume everything up to the closing `'''`, returning the raw content.
fn lex_raw_block(lex: &mut Lexer<'_, Token>) -> Option<String> {
    let remainder = lex.remainder();
    let end = remainder.find("'''")?;
    let content = remainder[..end].to_string();
    lex.bump(end + 3);
    Some(content)
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Version => write!(f, "version"),
            Token::Qubit => write!(f, "qubit"),
            Token::Bit => write!(f, "bit"),
            Token::Measure => write!(f, "measure"),
            Token::Init => write!(f, "init"),
            Token::Reset => write!(f, "reset"),
            Token::Barrier => write!(f, "barrier"),
            Token::Wait => write!(f, "wait"),
            Token::Asm => write!(f, "asm"),
            Token::FloatLiteral(v) => write!(f, "{v}"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::RawBlock(_) => write!(f, "'''…'''"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Eq => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
        }
    }
}

/// A token with its source span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    /// The token.
    pub token: Token,
    /// Byte range in the source.
    pub span: std::ops::Range<usize>,
}

/// Tokenize a cQASM 3 source string.
pub fn tokenize(
    source: &str,
) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(Ok(SpannedToken { token, span })),
            Err(()) => {
                let slice = &source[span.clone()];
                tokens.push(Err((span, format!("invalid token: '{slice}'"))));
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .map(|r| r.unwrap().token)
            .collect()
    }

    #[test]
    fn version_statement() {
        let tokens = ok_tokens("version 3.0");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::Version);
        assert!(matches!(tokens[1], Token::FloatLiteral(v) if (v - 3.0).abs() < 1e-9));
    }

    #[test]
    fn register_declaration() {
        let tokens = ok_tokens("qubit[2] q");
        assert_eq!(
            tokens,
            vec![
                Token::Qubit,
                Token::LBracket,
                Token::IntLiteral(2),
                Token::RBracket,
                Token::Identifier("q".to_string()),
            ]
        );
    }

    #[test]
    fn parameterized_gate() {
        let tokens = ok_tokens("Rz(-1.5) q[0]");
        assert_eq!(tokens[0], Token::Identifier("Rz".to_string()));
        assert_eq!(tokens[1], Token::LParen);
        assert_eq!(tokens[2], Token::Minus);
        assert!(matches!(tokens[3], Token::FloatLiteral(v) if (v - 1.5).abs() < 1e-9));
    }

    #[test]
    fn raw_block_keeps_content() {
        let tokens = ok_tokens("asm(Backend) ''' a ' \" {} () [] b '''");
        assert_eq!(tokens[0], Token::Asm);
        let Token::RawBlock(content) = &tokens[4] else {
            panic!("expected raw block, got {:?}", tokens[4]);
        };
        assert_eq!(content, " a ' \" {} () [] b ");
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = ok_tokens(
            "// line comment\nqubit q\n/* multi\nline */\nbit b",
        );
        assert_eq!(tokens.len(), 4);
    }
}
