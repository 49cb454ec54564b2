//! Merchant key canonicalization
//!
//! Bank descriptions for the same payee vary wildly ("POS STARBUCKS #1234",
//! "STARBUCKS COFFEE SEATTLE"). The merchant key is a short, stable string
//! that groups those variants so learned preferences apply across them.

/// Transaction-type prefixes that say nothing about the payee
const NOISE_PREFIXES: [&str; 5] = ["POS", "PURCHASE", "PAYMENT", "DEBIT", "CREDIT"];

/// Corporate suffixes that say nothing about the payee
const NOISE_SUFFIXES: [&str; 5] = ["LLC", "INC", "CORP", "CO", "LTD"];

/// Canonicalize a description into a merchant key.
///
/// Uppercases, collapses whitespace, keeps the first three tokens, then
/// strips one leading transaction-type token and one trailing corporate
/// suffix. Empty input yields an empty key, which never matches any
/// preference.
pub fn merchant_key(description: &str) -> String {
    let upper = description.to_uppercase();
    let mut tokens: Vec<&str> = upper.split_whitespace().take(3).collect();

    if tokens
        .first()
        .is_some_and(|t| NOISE_PREFIXES.contains(t))
    {
        tokens.remove(0);
    }
    if tokens
        .last()
        .is_some_and(|t| NOISE_SUFFIXES.contains(t))
    {
        tokens.pop();
    }

    tokens.join(" ").trim().to_string()
}
