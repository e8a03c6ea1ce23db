#[cfg(test)]
mod scanner_tests {
    use rox_interpreter as lox;

    use lox::error::{LoxError, Result};
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(std::result::Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn assert_token_matches(result: &Result<Token>, expected_type: TokenType, expected_lexeme: &str) {
        match result {
            Ok(token) => {
                assert_eq!(
                    token.token_type, expected_type,
                    "Expected token type {:?}, got {:?}",
                    expected_type, token.token_type
                );
                assert_eq!(
                    token.lexeme, expected_lexeme,
                    "Expected lexeme '{}', got '{}'",
                    expected_lexeme, token.lexeme
                );
            }
            Err(e) => panic!("Expected token but got error: {}", e),
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let results: Vec<_> = Scanner::new(",.$(#").collect();

        // COMMA, DOT, error for '$', LEFT_PAREN, error for '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );
    }

    #[test]
    fn test_unexpected_multibyte_character() {
        let results: Vec<_> = Scanner::new("é;").collect();

        assert_eq!(results.len(), 3);
        match &results[0] {
            Err(LoxError::Lex { message, line }) => {
                assert_eq!(message, "Unexpected character: é");
                assert_eq!(*line, 1);
            }
            other => panic!("Expected a lex error, got {:?}", other),
        }
        assert_token_matches(&results[1], TokenType::SEMICOLON, ";");
        assert_token_matches(&results[2], TokenType::EOF, "");
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_token_sequence(
            "class fun var if else while for return this super and or nil true false print classy _x1",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::FUN, "fun"),
                (TokenType::VAR, "var"),
                (TokenType::IF, "if"),
                (TokenType::ELSE, "else"),
                (TokenType::WHILE, "while"),
                (TokenType::FOR, "for"),
                (TokenType::RETURN, "return"),
                (TokenType::THIS, "this"),
                (TokenType::SUPER, "super"),
                (TokenType::AND, "and"),
                (TokenType::OR, "or"),
                (TokenType::NIL, "nil"),
                (TokenType::TRUE, "true"),
                (TokenType::FALSE, "false"),
                (TokenType::PRINT, "print"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::IDENTIFIER, "_x1"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_number_literals() {
        let tokens: Vec<Token> = Scanner::new("123 45.67 8.")
            .collect::<Result<_>>()
            .expect("numbers scan cleanly");

        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            rendered,
            vec![
                "NUMBER 123 123.0",
                "NUMBER 45.67 45.67",
                "NUMBER 8 8.0",
                "DOT . null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        let tokens: Vec<Token> = Scanner::new("\"hello\" \"multi\nline\" x")
            .collect::<Result<_>>()
            .expect("strings scan cleanly");

        assert_eq!(tokens[0].to_string(), "STRING \"hello\" hello");
        assert!(matches!(&tokens[1].token_type, TokenType::STRING(s) if s == "multi\nline"));

        // The identifier after the two-line string is on line 2.
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let results: Vec<_> = Scanner::new("print \"oops\n").collect();

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(errors, vec!["[line 2] Error: Unterminated string."]);
        assert_token_matches(results.last().expect("EOF"), TokenType::EOF, "");
    }

    #[test]
    fn test_comments_and_line_counting() {
        let tokens: Vec<Token> = Scanner::new("// a comment ( ) ;\nvar a; // trailing\n\n\ta / b")
            .collect::<Result<_>>()
            .expect("comments scan cleanly");

        let summary: Vec<(&str, usize)> = tokens
            .iter()
            .map(|t| (t.token_type.name(), t.line))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("VAR", 2),
                ("IDENTIFIER", 2),
                ("SEMICOLON", 2),
                ("IDENTIFIER", 4),
                ("SLASH", 4),
                ("IDENTIFIER", 4),
                ("EOF", 4),
            ]
        );
    }

    #[test]
    fn test_exactly_one_eof() {
        let mut scanner = Scanner::new("");

        assert_token_matches(&scanner.next().expect("EOF"), TokenType::EOF, "");
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
