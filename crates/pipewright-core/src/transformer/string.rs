//! String transformers
//!
//! Copyright (c) 2025 Pipewright Team
//! Licensed under the Apache-2.0 license

use super::{expect_entries, expect_scalar_string, expect_string, value_type_name, Transformer};
use crate::argument::ArgumentIterator;
use crate::coercion::scalar_to_string;
use crate::enums::{Algorithm, Case, Quotes, StringPosition, TranslationTable};
use crate::error::{Error, Result};
use crate::extraction::ExtractionContext;
use crate::provider::{
    ChangeCaseArgumentProvider, EscapeHtmlArgumentProvider, FormatDateArgumentProvider, HashArgumentProvider,
    JoinArgumentProvider, MaxWordsArgumentProvider, SplitArgumentProvider, StripTagsArgumentProvider,
    TrimArgumentProvider,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use sha2::Digest;
use std::fmt::Write as _;

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").expect("Valid regex pattern")
});

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Valid regex pattern"));

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?\s*([A-Za-z][A-Za-z0-9-]*)\b[^>]*>").expect("Valid regex pattern")
});

#[derive(Debug, Clone, Default)]
pub struct ChangeCaseTransformer {
    arguments: ChangeCaseArgumentProvider,
}

impl ChangeCaseTransformer {
    pub fn new(arguments: ChangeCaseArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for ChangeCaseTransformer {
    fn name(&self) -> &'static str {
        ChangeCaseArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let case = self.arguments.get_case_argument_value(arguments, data, context)?;
        let text = expect_string(self.name(), data, arguments)?;

        let converted = match case {
            Case::Lower => text.to_lowercase(),
            Case::Upper => text.to_uppercase(),
            Case::Title => title_case(text),
        };
        Ok(Value::String(converted))
    }
}

fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            word_start = true;
            result.push(c);
        } else if word_start {
            word_start = false;
            result.extend(c.to_uppercase());
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}

#[derive(Debug, Clone, Default)]
pub struct EscapeHtmlTransformer {
    arguments: EscapeHtmlArgumentProvider,
}

impl EscapeHtmlTransformer {
    pub fn new(arguments: EscapeHtmlArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for EscapeHtmlTransformer {
    fn name(&self) -> &'static str {
        EscapeHtmlArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let quotes = self.arguments.get_quotes_argument_value(arguments, data, context)?;
        let table = self.arguments.get_translation_table_argument_value(arguments, data, context)?;
        let double_encode = self
            .arguments
            .get_allow_double_encoding_argument_value(arguments, data, context)?;
        let text = expect_string(self.name(), data, arguments)?;

        Ok(Value::String(escape_html(text, quotes, table, double_encode)))
    }
}

fn escape_html(text: &str, quotes: Quotes, table: TranslationTable, double_encode: bool) -> String {
    let apostrophe = match table {
        TranslationTable::Html5 => "&apos;",
        TranslationTable::Html401 | TranslationTable::Xml1 | TranslationTable::Xhtml => "&#039;",
    };

    let mut escaped = String::with_capacity(text.len());
    for (index, c) in text.char_indices() {
        match c {
            '&' if !double_encode && ENTITY.is_match(&text[index..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quotes != Quotes::NoQuotes => escaped.push_str("&quot;"),
            '\'' if quotes == Quotes::Quotes => escaped.push_str(apostrophe),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, Default)]
pub struct HashTransformer {
    arguments: HashArgumentProvider,
}

impl HashTransformer {
    pub fn new(arguments: HashArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for HashTransformer {
    fn name(&self) -> &'static str {
        HashArgumentProvider::TRANSFORMER
    }

    /// Hex digest of the data followed by the salt
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let algorithm = self.arguments.get_algorithm_argument_value(arguments, data, context)?;
        let salt = self.arguments.get_salt_argument_value(arguments, data, context)?;
        let mut input = expect_scalar_string(self.name(), data, arguments)?;
        input.push_str(&salt);

        Ok(Value::String(hash_hex(algorithm, input.as_bytes())))
    }
}

fn digest_hex<D: Digest>(input: &[u8]) -> String {
    hex::encode(D::digest(input))
}

pub fn hash_hex(algorithm: Algorithm, input: &[u8]) -> String {
    match algorithm {
        Algorithm::Md5 => digest_hex::<md5::Md5>(input),
        Algorithm::Sha1 => digest_hex::<sha1::Sha1>(input),
        Algorithm::Sha256 => digest_hex::<sha2::Sha256>(input),
        Algorithm::Sha384 => digest_hex::<sha2::Sha384>(input),
        Algorithm::Sha512 => digest_hex::<sha2::Sha512>(input),
        Algorithm::Sha3_256 => digest_hex::<sha3::Sha3_256>(input),
        Algorithm::Sha3_512 => digest_hex::<sha3::Sha3_512>(input),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaxWordsTransformer {
    arguments: MaxWordsArgumentProvider,
}

impl MaxWordsTransformer {
    pub fn new(arguments: MaxWordsArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for MaxWordsTransformer {
    fn name(&self) -> &'static str {
        MaxWordsArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let max_words = self.arguments.get_max_words_argument_value(arguments, data, context)?;
        let truncation = self
            .arguments
            .get_truncation_string_argument_value(arguments, data, context)?;
        let text = expect_string(self.name(), data, arguments)?;

        Ok(Value::String(truncate_words(text, max_words, truncation.as_deref())))
    }
}

/// Keep the first `max_words` words, appending `truncation` when words were dropped
fn truncate_words(text: &str, max_words: usize, truncation: Option<&str>) -> String {
    let mut words = 0;
    let mut in_word = false;

    for (index, c) in text.char_indices() {
        if c.is_whitespace() {
            in_word = false;
            continue;
        }
        if !in_word {
            in_word = true;
            words += 1;
            if words > max_words {
                let mut kept = text[..index].trim_end().to_string();
                kept.push_str(truncation.unwrap_or_default());
                return kept;
            }
        }
    }
    text.to_string()
}

#[derive(Debug, Clone, Default)]
pub struct SplitTransformer {
    arguments: SplitArgumentProvider,
}

impl SplitTransformer {
    pub fn new(arguments: SplitArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for SplitTransformer {
    fn name(&self) -> &'static str {
        SplitArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let separator = self.arguments.get_separator_argument_value(arguments, data, context)?;
        let text = expect_scalar_string(self.name(), data, arguments)?;

        Ok(Value::Array(
            text.split(separator.as_str())
                .map(|part| Value::String(part.to_string()))
                .collect(),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct JoinTransformer {
    arguments: JoinArgumentProvider,
}

impl JoinTransformer {
    pub fn new(arguments: JoinArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for JoinTransformer {
    fn name(&self) -> &'static str {
        JoinArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let separator = self.arguments.get_separator_argument_value(arguments, data, context)?;
        let parts = expect_entries(self.name(), data, arguments)?
            .into_iter()
            .map(|(key, item)| match item {
                Value::Array(_) | Value::Object(_) => Err(Error::invalid_input_data(
                    self.name(),
                    format!(
                        "Element {} must be a scalar value, received {}",
                        scalar_to_string(&key),
                        value_type_name(&item)
                    ),
                    arguments,
                    data,
                )),
                scalar => Ok(scalar_to_string(&scalar)),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Value::String(parts.join(&separator)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrimTransformer {
    arguments: TrimArgumentProvider,
}

impl TrimTransformer {
    pub fn new(arguments: TrimArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for TrimTransformer {
    fn name(&self) -> &'static str {
        TrimArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let characters = self.arguments.get_characters_argument_value(arguments, data, context)?;
        let position = self.arguments.get_position_argument_value(arguments, data, context)?;
        let text = expect_string(self.name(), data, arguments)?;

        let strip = |c: char| match &characters {
            Some(characters) => characters.contains(c),
            None => c.is_whitespace(),
        };
        let trimmed = match position {
            StringPosition::Start => text.trim_start_matches(strip),
            StringPosition::End => text.trim_end_matches(strip),
            StringPosition::Both => text.trim_matches(strip),
        };
        Ok(Value::String(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StripTagsTransformer {
    arguments: StripTagsArgumentProvider,
}

impl StripTagsTransformer {
    pub fn new(arguments: StripTagsArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for StripTagsTransformer {
    fn name(&self) -> &'static str {
        StripTagsArgumentProvider::TRANSFORMER
    }

    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let allowed = normalize_tags(self.arguments.get_allowed_tags_argument_value(arguments, data, context)?);
        let strip_content = normalize_tags(
            self.arguments
                .get_strip_content_for_tags_argument_value(arguments, data, context)?,
        );
        let text = expect_string(self.name(), data, arguments)?;

        let mut stripped = COMMENT.replace_all(text, "").into_owned();
        for tag in &strip_content {
            let element = Regex::new(&format!(r"(?is)<{0}\b[^>]*>.*?</{0}\s*>", regex::escape(tag))).map_err(
                |e| Error::Configuration {
                    message: format!("Invalid tag name {tag}: {e}"),
                    context: Some(self.name().to_string()),
                },
            )?;
            stripped = element.replace_all(&stripped, "").into_owned();
        }

        let result = TAG.replace_all(&stripped, |captures: &regex::Captures<'_>| {
            let name = captures[1].to_ascii_lowercase();
            if allowed.contains(&name) {
                captures[0].to_string()
            } else {
                String::new()
            }
        });
        Ok(Value::String(result.into_owned()))
    }
}

/// Accept `b`, `<b>` and `</b>` alike
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim_matches(|c| c == '<' || c == '>' || c == '/').to_ascii_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct FormatDateTransformer {
    arguments: FormatDateArgumentProvider,
}

impl FormatDateTransformer {
    pub fn new(arguments: FormatDateArgumentProvider) -> Self {
        Self { arguments }
    }
}

impl Transformer for FormatDateTransformer {
    fn name(&self) -> &'static str {
        FormatDateArgumentProvider::TRANSFORMER
    }

    /// Accepts RFC 3339 strings, `YYYY-MM-DD[ HH:MM:SS]` and Unix timestamps
    fn transform(
        &self,
        data: &Value,
        arguments: Option<&ArgumentIterator>,
        context: Option<&ExtractionContext>,
    ) -> Result<Value> {
        let format = self.arguments.get_format_argument_value(arguments, data, context)?;
        let date = parse_date(data).ok_or_else(|| {
            Error::invalid_input_data(
                self.name(),
                format!("Expected a date string or Unix timestamp, received {}", super::compare::describe(data)),
                arguments,
                data,
            )
        })?;

        let mut formatted = String::new();
        write!(formatted, "{}", date.format(&format)).map_err(|_| {
            Error::invalid_input_data(
                self.name(),
                format!("Date cannot be rendered with format \"{format}\""),
                arguments,
                data,
            )
        })?;
        Ok(Value::String(formatted))
    }
}

fn parse_date(data: &Value) -> Option<DateTime<FixedOffset>> {
    match data {
        Value::Number(number) => number
            .as_i64()
            .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
            .map(|date| date.fixed_offset()),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(date) = DateTime::parse_from_rfc3339(text) {
                return Some(date);
            }
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
                .iter()
                .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(text, "%Y-%m-%d")
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
                .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(raw: Value) -> ArgumentIterator {
        ArgumentIterator::from_value(&raw).unwrap()
    }

    #[test]
    fn test_change_case() {
        let transformer = ChangeCaseTransformer::default();
        assert_eq!(
            transformer.transform(&json!("hello wORLD"), Some(&args(json!(["title"]))), None).unwrap(),
            json!("Hello World")
        );
        assert_eq!(
            transformer.transform(&json!("Mixed"), Some(&args(json!(["upper"]))), None).unwrap(),
            json!("MIXED")
        );
        assert!(matches!(
            transformer.transform(&json!(5), Some(&args(json!(["lower"]))), None),
            Err(Error::InvalidInputData { .. })
        ));
        assert!(matches!(
            transformer.transform(&json!("x"), None, None),
            Err(Error::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_escape_html() {
        let transformer = EscapeHtmlTransformer::default();
        let input = json!("<a href=\"x\">Tom's &amp; Jerry</a>");
        assert_eq!(
            transformer.transform(&input, None, None).unwrap(),
            json!("&lt;a href=&quot;x&quot;&gt;Tom&#039;s &amp;amp; Jerry&lt;/a&gt;")
        );
        assert_eq!(
            transformer
                .transform(&input, Some(&args(json!(["noquotes", "html5", false]))), None)
                .unwrap(),
            json!("&lt;a href=\"x\"&gt;Tom's &amp; Jerry&lt;/a&gt;")
        );
        assert_eq!(
            transformer
                .transform(&json!("'"), Some(&args(json!(["quotes", "html5"]))), None)
                .unwrap(),
            json!("&apos;")
        );
    }

    #[test]
    fn test_hash() {
        let transformer = HashTransformer::default();
        assert_eq!(
            transformer.transform(&json!("abc"), Some(&args(json!(["sha256"]))), None).unwrap(),
            json!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(
            transformer.transform(&json!("ab"), Some(&args(json!(["md5", "c"]))), None).unwrap(),
            json!("900150983cd24fb0d6963f7d28e17f72")
        );
        assert_eq!(
            transformer.transform(&json!("abc"), Some(&args(json!(["sha1"]))), None).unwrap(),
            json!("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
        assert_eq!(hash_hex(Algorithm::Sha3_256, b"").len(), 64);
        assert_eq!(hash_hex(Algorithm::Sha512, b"").len(), 128);
    }

    #[test]
    fn test_max_words() {
        let transformer = MaxWordsTransformer::default();
        let arguments = args(json!([3, "..."]));
        assert_eq!(
            transformer.transform(&json!("one two  three four five"), Some(&arguments), None).unwrap(),
            json!("one two  three...")
        );
        assert_eq!(
            transformer.transform(&json!("one two three "), Some(&arguments), None).unwrap(),
            json!("one two three ")
        );
    }

    #[test]
    fn test_split_and_join() {
        let split = SplitTransformer::default();
        assert_eq!(split.transform(&json!("a,b,,c"), None, None).unwrap(), json!(["a", "b", "", "c"]));
        assert_eq!(
            split.transform(&json!("a|b"), Some(&args(json!(["|"]))), None).unwrap(),
            json!(["a", "b"])
        );

        let join = JoinTransformer::default();
        assert_eq!(
            join.transform(&json!(["a", 1, true, 2.5]), Some(&args(json!([" "]))), None).unwrap(),
            json!("a 1 1 2.5")
        );
        assert!(matches!(
            join.transform(&json!(["a", ["b"]]), None, None),
            Err(Error::InvalidInputData { ref errors, .. }) if errors[0] == "Element 1 must be a scalar value, received array"
        ));
    }

    #[test]
    fn test_trim() {
        let transformer = TrimTransformer::default();
        assert_eq!(transformer.transform(&json!("  x  "), None, None).unwrap(), json!("x"));
        assert_eq!(
            transformer.transform(&json!("--x--"), Some(&args(json!(["-", "start"]))), None).unwrap(),
            json!("x--")
        );
        assert_eq!(
            transformer.transform(&json!("--x--"), Some(&args(json!(["-", "end"]))), None).unwrap(),
            json!("--x")
        );
    }

    #[test]
    fn test_strip_tags() {
        let transformer = StripTagsTransformer::default();
        let input = json!("<p>Hello <b>bold</b><!-- note --><script>alert(1)</script></p>");
        assert_eq!(
            transformer.transform(&input, None, None).unwrap(),
            json!("Hello boldalert(1)")
        );
        assert_eq!(
            transformer
                .transform(&input, Some(&args(json!([["<b>"], ["script"]]))), None)
                .unwrap(),
            json!("Hello <b>bold</b>")
        );
    }

    #[test]
    fn test_format_date() {
        let transformer = FormatDateTransformer::default();
        assert_eq!(
            transformer.transform(&json!("2024-03-05T10:20:30Z"), None, None).unwrap(),
            json!("2024-03-05")
        );
        assert_eq!(
            transformer
                .transform(&json!(0), Some(&args(json!(["%d/%m/%Y %H:%M"]))), None)
                .unwrap(),
            json!("01/01/1970 00:00")
        );
        assert_eq!(
            transformer
                .transform(&json!("2024-03-05"), Some(&args(json!(["%B %-d, %Y"]))), None)
                .unwrap(),
            json!("March 5, 2024")
        );
        assert!(matches!(
            transformer.transform(&json!("yesterday"), None, None),
            Err(Error::InvalidInputData { .. })
        ));
    }
}
