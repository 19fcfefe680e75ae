use itertools::{Itertools, PeekingNext};

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Symbol(String)
}

// Consumes the rest of a symbol whose first character is already in hand.
// Symbols run until whitespace or a `|`; the arrow is only recognized at
// the start of a token, so symbols may contain dashes.
pub fn lex_symbol(line: &mut impl PeekingNext<Item = char>, head: char) -> Token {
    let mut text = String::from(head);
    text.extend(line.peeking_take_while(|&c| !c.is_whitespace() && c != '|'));

    Token::Symbol(text)
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.next() {
        if c.is_whitespace() {
            continue;
        } else if c == '|' {
            tokens.push(Token::Or);
        } else if c == '-' && line_chars.peeking_next(|&next| next == '>').is_some() {
            tokens.push(Token::Arrow);
        } else {
            tokens.push(lex_symbol(&mut line_chars, c));
        }
    }

    return tokens;
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn symbol(text: &str) -> Token {
        Token::Symbol(text.to_string())
    }

    #[test]
    fn lex_normal_symbol() {
        let lines = vec![
            "alpha bravo charlie",
            "delta",
            "a|b"
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (symbol("alpha"), " bravo charlie"),
            (symbol("delta"), ""),
            (symbol("a"), "|b")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            let head = chars.next().unwrap();
            assert_eq!(lex_symbol(&mut chars, head), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "E -> E + T | T",
            "A -> a |",
            "S->x"
        ];
        let answers = vec![
            vec![
                symbol("E"),
                Token::Arrow,
                symbol("E"),
                symbol("+"),
                symbol("T"),
                Token::Or,
                symbol("T")
            ],
            vec![
                symbol("A"),
                Token::Arrow,
                symbol("a"),
                Token::Or
            ],
            // The arrow is only an arrow at the start of a token
            vec![symbol("S->x")]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line), answer)
        }
    }

    #[test]
    fn lex_pipes_without_spaces() {
        assert_eq!(lex_line("A -> a|b"), vec![
            symbol("A"),
            Token::Arrow,
            symbol("a"),
            Token::Or,
            symbol("b")
        ]);
    }

    #[test]
    fn lex_arrow_at_token_start() {
        assert_eq!(lex_line("S ->A"), vec![
            symbol("S"),
            Token::Arrow,
            symbol("A")
        ]);
    }

    #[test]
    fn lex_blank_line() {
        assert_eq!(lex_line("   \t  "), Vec::new());
    }
}
