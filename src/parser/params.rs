//! Parameter string parser for the `|key="value"` tail of an inline marker.

use crate::core::ast::{Params, DEFAULT_PARAM};

/// Parses `key="value"` pairs out of a parameter string.
///
/// Values end at the next double quote; there is no escape handling. A
/// string with no `=` at all is stored whole (trimmed) under `_default`.
pub fn parse_params(input: &str) -> Params {
    let mut params = Params::new();
    let mut key_start = 0;

    while let Some(sep) = input[key_start..].find('=').map(|i| key_start + i) {
        let key = input[key_start..sep].trim().to_string();
        let after_sep = &input[sep + 1..];

        let Some(open) = after_sep.find('"') else {
            params.insert(key, after_sep.trim().to_string());
            return params;
        };
        let value_start = sep + 1 + open + 1;

        match input[value_start..].find('"') {
            Some(close) => {
                let value_end = value_start + close;
                params.insert(key, input[value_start..value_end].to_string());
                key_start = value_end + 1;
            }
            None => {
                params.insert(key, input[value_start..].to_string());
                return params;
            }
        }
    }

    if params.is_empty() {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            params.insert(DEFAULT_PARAM.to_string(), trimmed.to_string());
        }
    }

    params
}
