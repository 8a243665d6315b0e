//! Vault name and symbol normalization
//!
//! Both operations start from the raw contract values kept on the record,
//! so running them again with the same curated override gives the same
//! result. A different override can change the result; callers re-run both
//! whenever curated metadata changes.

use super::types::VaultRecord;

const NAME_SUFFIX: &str = "yVault";
const SYMBOL_PREFIX: &str = "yv";

/// Return `value` unless it is empty, then `fallback`
pub fn first_non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

impl VaultRecord {
    /// Derive `name`, `display_name` and `formatted_name`.
    ///
    /// Quotes are stripped from the name only. The display name keeps the
    /// contract's quotes, and a curated display name is used verbatim.
    pub fn normalize_name(&mut self, curated_display_name: &str) {
        let stripped = strip_quotes(&self.raw_name);
        let display_name = first_non_empty(curated_display_name, &self.raw_name).to_string();

        let mut formatted_name = self.token.name.clone();
        if !formatted_name.ends_with(NAME_SUFFIX) {
            formatted_name = format!("{} {}", formatted_name, NAME_SUFFIX);
        }
        if !display_name.is_empty() && !display_name.ends_with(NAME_SUFFIX) {
            formatted_name = format!("{} {}", display_name, NAME_SUFFIX);
        }

        let name = first_non_empty(first_non_empty(&stripped, &display_name), &formatted_name)
            .to_string();

        self.name = name;
        self.display_name = display_name;
        self.formatted_name = formatted_name;
    }

    /// Derive `symbol`, `display_symbol` and `formatted_symbol`
    pub fn normalize_symbol(&mut self, curated_display_symbol: &str) {
        let stripped = strip_quotes(&self.raw_symbol);

        let mut formatted_symbol = self.token.symbol.clone();
        if !formatted_symbol.starts_with(SYMBOL_PREFIX) {
            formatted_symbol = format!("{}{}", SYMBOL_PREFIX, formatted_symbol);
        }
        if !curated_display_symbol.is_empty() && !curated_display_symbol.starts_with(SYMBOL_PREFIX)
        {
            formatted_symbol = format!("{}{}", SYMBOL_PREFIX, curated_display_symbol);
        }

        let symbol = first_non_empty(
            first_non_empty(&stripped, curated_display_symbol),
            &formatted_symbol,
        )
        .to_string();
        let display_symbol = first_non_empty(curated_display_symbol, &symbol).to_string();

        self.symbol = symbol;
        self.display_symbol = display_symbol;
        self.formatted_symbol = formatted_symbol;
    }
}
