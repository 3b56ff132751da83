//! Machine translation client.
//!
//! [`GoogleTranslator`] calls the public `translate_a/single` endpoint (the `gtx` client).
//! Language defaults: an explicit target translates from auto-detect; text containing Myanmar
//! script goes to English; anything else goes to Myanmar.

use async_trait::async_trait;
use churchbot_core::{BotError, Result};
use serde_json::Value;
use tracing::{debug, instrument};

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com";

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into `target` (or the default pair when `None`).
    async fn translate(&self, text: &str, target: Option<&str>) -> Result<String>;
}

/// True when `text` contains a character from the Myanmar Unicode block.
pub fn contains_myanmar(text: &str) -> bool {
    text.chars().any(|c| ('\u{1000}'..='\u{109F}').contains(&c))
}

/// Source and target language codes for `text`.
pub fn language_pair<'a>(text: &str, target: Option<&'a str>) -> (&'a str, &'a str) {
    match target {
        Some(target) => ("auto", target),
        None if contains_myanmar(text) => ("my", "en"),
        None => ("auto", "my"),
    }
}

/// Splits `/tran` input into the text to translate and an optional target language.
///
/// A replied-to message wins over inline text; the last argument is then the target if it is at
/// most three characters. Inline text only yields a target when there is more than one argument.
pub fn parse_tran_args(args: &[String], reply_text: Option<&str>) -> Option<(String, Option<String>)> {
    let is_lang = |s: &str| s.chars().count() <= 3;

    if let Some(reply) = reply_text.map(str::trim).filter(|t| !t.is_empty()) {
        let target = args.last().filter(|a| is_lang(a)).cloned();
        return Some((reply.to_string(), target));
    }

    match args {
        [] => None,
        [.., last] if args.len() > 1 && is_lang(last) => {
            Some((args[..args.len() - 1].join(" "), Some(last.clone())))
        }
        _ => Some((args.join(" "), None)),
    }
}

/// Concatenates the translated segments of a `translate_a/single` response
/// (`[[["translated", "original", ...], ...], ...]`).
pub fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| BotError::Translation("Unexpected response shape".to_string()))?;
    let text: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        return Err(BotError::Translation("Empty translation".to_string()));
    }
    Ok(text)
}

pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    /// `base_url` defaults to [`DEFAULT_TRANSLATE_URL`].
    pub fn new(base_url: Option<&str>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: Option<&str>) -> Self {
        let base_url = base_url
            .unwrap_or(DEFAULT_TRANSLATE_URL)
            .trim_end_matches('/')
            .to_string();
        Self { client, base_url }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn translate(&self, text: &str, target: Option<&str>) -> Result<String> {
        let (source, target) = language_pair(text, target);
        debug!(source_lang = source, target_lang = target, "Requesting translation");

        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| BotError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Translation(format!(
                "Translate endpoint returned {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BotError::Translation(e.to_string()))?;
        parse_translation(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detects_myanmar_script() {
        assert!(contains_myanmar("မင်္ဂလာပါ"));
        assert!(!contains_myanmar("hello"));
        assert_eq!(language_pair("မင်္ဂလာပါ", None), ("my", "en"));
        assert_eq!(language_pair("hello", None), ("auto", "my"));
        assert_eq!(language_pair("hello", Some("fr")), ("auto", "fr"));
    }

    #[test]
    fn test_parse_tran_args_inline() {
        assert_eq!(parse_tran_args(&[], None), None);
        assert_eq!(
            parse_tran_args(&args(&["good", "morning", "fr"]), None),
            Some(("good morning".to_string(), Some("fr".to_string())))
        );
        // a single short word is text, not a target
        assert_eq!(
            parse_tran_args(&args(&["hi"]), None),
            Some(("hi".to_string(), None))
        );
        assert_eq!(
            parse_tran_args(&args(&["good", "morning"]), None),
            Some(("good morning".to_string(), None))
        );
    }

    #[test]
    fn test_parse_tran_args_reply_wins() {
        assert_eq!(
            parse_tran_args(&args(&["en"]), Some("ကျေးဇူးတင်ပါတယ်")),
            Some(("ကျေးဇူးတင်ပါတယ်".to_string(), Some("en".to_string())))
        );
        assert_eq!(
            parse_tran_args(&args(&["ignored", "words"]), Some("hello")),
            Some(("hello".to_string(), None))
        );
        assert_eq!(parse_tran_args(&[], Some("   ")), None);
    }

    #[test]
    fn test_parse_translation_joins_segments() {
        let body = json!([[["Hello. ", "မင်္ဂလာပါ။", null], ["Thanks", "ကျေးဇူး", null]], null, "my"]);
        assert_eq!(parse_translation(&body).unwrap(), "Hello. Thanks");
        assert!(parse_translation(&json!({"error": 1})).is_err());
        assert!(parse_translation(&json!([[]])).is_err());
    }
}
