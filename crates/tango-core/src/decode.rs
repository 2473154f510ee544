//! Term decoder
//!
//! Turns the raw JSON payloads of a lexicon archive into typed values:
//! - `index.json` into [`DictionaryMeta`]
//! - `term_bank_*.json` into a list of [`TermEntry`]
//!
//! Term-bank rows are positional arrays rather than objects:
//!
//! | pos | field           | type             | when absent/null |
//! |-----|-----------------|------------------|------------------|
//! | 0   | expression      | string           | rejected         |
//! | 1   | reading         | string           | rejected         |
//! | 2   | definition tags | string           | `""`             |
//! | 3   | rules           | string           | `""`             |
//! | 4   | score           | number           | `0`              |
//! | 5   | glossary        | array of strings | rejected         |
//! | 6   | sequence        | number           | `0`              |
//! | 7   | term tags       | string           | `""`             |
//!
//! Every function here is pure.

use crate::errors::{Result, TangoError};
use crate::model::{DictionaryMeta, TermEntry};
use serde::Deserialize;
use serde_json::Value;

const MIN_ROW_LEN: usize = 6;
const MAX_ROW_LEN: usize = 8;

const POS_EXPRESSION: usize = 0;
const POS_READING: usize = 1;
const POS_DEFINITION_TAGS: usize = 2;
const POS_RULES: usize = 3;
const POS_SCORE: usize = 4;
const POS_GLOSSARY: usize = 5;
const POS_SEQUENCE: usize = 6;
const POS_TERM_TAGS: usize = 7;

/// Wire shape of `index.json`
#[derive(Debug, Deserialize)]
struct RawIndex {
    title: String,
    #[serde(default)]
    format: Option<i64>,
    #[serde(default)]
    version: Option<i64>,
    #[serde(default)]
    revision: Option<String>,
    #[serde(default)]
    sequenced: Option<bool>,
}

fn invalid_metadata(reason: impl Into<String>) -> TangoError {
    TangoError::InvalidMetadata {
        reason: reason.into(),
    }
}

/// Decode the content of an archive's `index.json`
///
/// `format` falls back to the legacy `version` key, then to 0.
pub fn decode_index(bytes: &[u8]) -> Result<DictionaryMeta> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| invalid_metadata(format!("index.json is not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| invalid_metadata("index.json must be a JSON object"))?;

    match object.get("title") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(invalid_metadata("`title` must be a string")),
        None => return Err(invalid_metadata("missing required field `title`")),
    }

    let raw: RawIndex = serde_json::from_value(value)
        .map_err(|e| invalid_metadata(format!("unexpected field type: {}", e)))?;

    Ok(DictionaryMeta {
        title: raw.title,
        format: raw.format.or(raw.version).unwrap_or(0),
        revision: raw.revision.unwrap_or_default(),
        sequenced: raw.sequenced.unwrap_or(false),
    })
}

/// Decode the content of one `term_bank_*.json` entry
///
/// `entry` names the archive entry and is only used for error context.
/// Decoding stops at the first malformed row.
pub fn decode_term_bank(entry: &str, bytes: &[u8]) -> Result<Vec<TermEntry>> {
    let invalid_bank = |reason: String| TangoError::InvalidTermBank {
        entry: entry.to_string(),
        reason,
    };

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| invalid_bank(format!("term bank is not valid JSON: {}", e)))?;

    let rows = value
        .as_array()
        .ok_or_else(|| invalid_bank("term bank must be a JSON array of rows".to_string()))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| decode_term_row(entry, index, row))
        .collect()
}

/// Decode a single positional row
pub fn decode_term_row(entry: &str, index: usize, row: &Value) -> Result<TermEntry> {
    let reader = RowReader::new(entry, index, row)?;

    Ok(TermEntry {
        expression: reader.required_string(POS_EXPRESSION, "expression")?,
        reading: reader.required_string(POS_READING, "reading")?,
        definition_tags: reader.optional_string(POS_DEFINITION_TAGS, "definition tags")?,
        rules: reader.optional_string(POS_RULES, "rules")?,
        score: reader.optional_integer(POS_SCORE, "score")?,
        glossary: reader.glossary(POS_GLOSSARY)?,
        sequence: reader.optional_integer(POS_SEQUENCE, "sequence")?,
        term_tags: reader.optional_string(POS_TERM_TAGS, "term tags")?,
    })
}

/// Position-checked access to one row
struct RowReader<'a> {
    entry: &'a str,
    index: usize,
    fields: &'a [Value],
}

impl<'a> RowReader<'a> {
    fn new(entry: &'a str, index: usize, row: &'a Value) -> Result<Self> {
        let fields = row.as_array().ok_or_else(|| TangoError::InvalidTermRow {
            entry: entry.to_string(),
            row: index,
            reason: "row must be a JSON array".to_string(),
        })?;

        let reader = Self {
            entry,
            index,
            fields: fields.as_slice(),
        };

        if !(MIN_ROW_LEN..=MAX_ROW_LEN).contains(&fields.len()) {
            return Err(reader.reject(format!(
                "expected {} to {} positions, found {}",
                MIN_ROW_LEN,
                MAX_ROW_LEN,
                fields.len()
            )));
        }

        Ok(reader)
    }

    fn reject(&self, reason: impl Into<String>) -> TangoError {
        TangoError::InvalidTermRow {
            entry: self.entry.to_string(),
            row: self.index,
            reason: reason.into(),
        }
    }

    fn required_string(&self, pos: usize, name: &str) -> Result<String> {
        match self.fields.get(pos) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.reject(format!(
                "{} (position {}) must be a string, found {}",
                name,
                pos,
                type_name(other)
            ))),
            None => Err(self.reject(format!("{} (position {}) is missing", name, pos))),
        }
    }

    fn optional_string(&self, pos: usize, name: &str) -> Result<String> {
        match self.fields.get(pos) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.reject(format!(
                "{} (position {}) must be a string, found {}",
                name,
                pos,
                type_name(other)
            ))),
        }
    }

    fn optional_integer(&self, pos: usize, name: &str) -> Result<i64> {
        match self.fields.get(pos) {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .ok_or_else(|| self.reject(format!("{} (position {}) is out of range", name, pos))),
            Some(other) => Err(self.reject(format!(
                "{} (position {}) must be a number, found {}",
                name,
                pos,
                type_name(other)
            ))),
        }
    }

    fn glossary(&self, pos: usize) -> Result<Vec<String>> {
        let items = match self.fields.get(pos) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(self.reject(format!(
                    "glossary (position {}) must be an array, found {}",
                    pos,
                    type_name(other)
                )))
            }
            None => return Err(self.reject(format!("glossary (position {}) is missing", pos))),
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(self.reject(format!(
                    "glossary item {} must be a string, found {}",
                    i,
                    type_name(other)
                ))),
            })
            .collect()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_index_full() {
        let meta = decode_index(br#"{"title":"T1","format":3,"revision":"r1","sequenced":true}"#)
            .unwrap();
        assert_eq!(meta.title, "T1");
        assert_eq!(meta.format, 3);
        assert_eq!(meta.revision, "r1");
        assert!(meta.sequenced);
    }

    #[test]
    fn test_decode_index_defaults_and_unknown_fields() {
        let meta = decode_index(br#"{"title":"T1","author":"someone","url":"x"}"#).unwrap();
        assert_eq!(meta.format, 0);
        assert_eq!(meta.revision, "");
        assert!(!meta.sequenced);
    }

    #[test]
    fn test_decode_index_legacy_version_key() {
        let meta = decode_index(br#"{"title":"Old","version":1,"revision":"a"}"#).unwrap();
        assert_eq!(meta.format, 1);

        let both = decode_index(br#"{"title":"New","format":3,"version":3}"#).unwrap();
        assert_eq!(both.format, 3);
    }

    #[test]
    fn test_decode_index_rejects_missing_title() {
        let err = decode_index(br#"{"format":3}"#).unwrap_err();
        assert!(matches!(err, TangoError::InvalidMetadata { .. }));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_decode_index_rejects_non_object() {
        let inputs: [&[u8]; 3] = [b"[1,2]", b"\"title\"", b"not json"];
        for input in inputs {
            let err = decode_index(input).unwrap_err();
            assert!(matches!(err, TangoError::InvalidMetadata { .. }));
        }
    }

    #[test]
    fn test_decode_full_row() {
        let row = json!(["犬", "いぬ", "n", "v1", 5, ["dog", "hound"], 1234, "P"]);
        let entry = decode_term_row("term_bank_1.json", 0, &row).unwrap();
        assert_eq!(entry.expression, "犬");
        assert_eq!(entry.reading, "いぬ");
        assert_eq!(entry.definition_tags, "n");
        assert_eq!(entry.rules, "v1");
        assert_eq!(entry.score, 5);
        assert_eq!(entry.glossary, vec!["dog", "hound"]);
        assert_eq!(entry.sequence, 1234);
        assert_eq!(entry.term_tags, "P");
    }

    #[test]
    fn test_decode_reduced_row() {
        let row = json!(["猫", "ねこ", null, null, null, ["cat"]]);
        let entry = decode_term_row("term_bank_1.json", 0, &row).unwrap();
        assert_eq!(entry, TermEntry::new("猫", "ねこ", vec!["cat".to_string()]));
    }

    #[test]
    fn test_decode_float_score_truncates() {
        let row = json!(["a", "b", "", "", -2.7, [], 3.9, ""]);
        let entry = decode_term_row("t", 0, &row).unwrap();
        assert_eq!(entry.score, -2);
        assert_eq!(entry.sequence, 3);
    }

    #[test]
    fn test_reject_non_string_expression() {
        let row = json!([1, "いぬ", "", "", 0, ["dog"], 0, ""]);
        let err = decode_term_row("term_bank_2.json", 7, &row).unwrap_err();
        match err {
            TangoError::InvalidTermRow { entry, row, reason } => {
                assert_eq!(entry, "term_bank_2.json");
                assert_eq!(row, 7);
                assert!(reason.contains("expression"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_reject_non_string_glossary_item() {
        let row = json!(["犬", "いぬ", "", "", 0, ["dog", {"type": "image"}], 0, ""]);
        let err = decode_term_row("t", 0, &row).unwrap_err();
        assert!(err.to_string().contains("glossary item 1"));
    }

    #[test]
    fn test_reject_wrong_shape() {
        let too_short = json!(["犬", "いぬ", "", "", 0]);
        let too_long = json!(["犬", "いぬ", "", "", 0, [], 0, "", "extra"]);
        let not_array = json!({"expression": "犬"});
        let tag_as_number = json!(["犬", "いぬ", 3, "", 0, [], 0, ""]);

        for row in [too_short, too_long, not_array, tag_as_number] {
            assert!(matches!(
                decode_term_row("t", 0, &row),
                Err(TangoError::InvalidTermRow { .. })
            ));
        }
    }

    #[test]
    fn test_decode_term_bank_preserves_order() {
        let bank = br#"[["a","1","","",0,["x"],0,""],["b","2","","",0,["y"],0,""]]"#;
        let entries = decode_term_bank("term_bank_1.json", bank).unwrap();
        let expressions: Vec<&str> = entries.iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_term_bank_reports_offending_row() {
        let bank = br#"[["a","1","","",0,["x"],0,""],["b",2,"","",0,["y"],0,""]]"#;
        let err = decode_term_bank("term_bank_3.json", bank).unwrap_err();
        assert!(matches!(err, TangoError::InvalidTermRow { row: 1, .. }));
    }

    #[test]
    fn test_decode_term_bank_rejects_non_array() {
        let err = decode_term_bank("term_bank_1.json", br#"{"rows":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            TangoError::InvalidTermBank { ref entry, .. } if entry == "term_bank_1.json"
        ));
    }

    #[test]
    fn test_unparseable_bank_names_no_row() {
        let err = decode_term_bank("term_bank_3.json", r#"[["犬","いぬ""#.as_bytes()).unwrap_err();
        assert!(matches!(err, TangoError::InvalidTermBank { .. }));

        let ex_err: crate::errors::ExError = err.into();
        assert_eq!(ex_err.entity_id(), Some("term_bank_3.json"));
        assert_eq!(ex_err.row(), None);
    }

    #[test]
    fn test_empty_term_bank() {
        assert!(decode_term_bank("term_bank_1.json", b"[]").unwrap().is_empty());
    }
}
