//! Parsing of token-id lists typed by a user.
//!
//! Two surface forms are accepted: a JSON array (`[0, 1, 2]`) and a bare
//! comma-separated list (`0,1,2`).

use wordtok_core::{Result, TokenId, TokenizerError};

/// Parse a token-id list.
///
/// Blank input and `[]` both give an empty list.
pub fn parse_token_ids(input: &str) -> Result<Vec<TokenId>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    if input.starts_with('[') && input.ends_with(']') {
        return serde_json::from_str::<Vec<TokenId>>(input).map_err(|e| {
            TokenizerError::InvalidInput(format!("Token IDs must be an array of integers: {}", e))
        });
    }

    input
        .split(',')
        .map(|piece| {
            let piece = piece.trim();
            piece.parse::<TokenId>().map_err(|_| {
                TokenizerError::InvalidInput(format!("'{}' is not an integer token ID", piece))
            })
        })
        .collect()
}
