use model::{Keyword, TokenKind};

/// Classify a maximal identifier run as a keyword or a plain identifier.
pub fn keyword_or_identifier(text: &str) -> TokenKind {
    Keyword::ALL
        .into_iter()
        .find(|keyword| keyword.as_str() == text)
        .map_or_else(|| TokenKind::Ident(text.to_string()), TokenKind::Keyword)
}
