//! Glossary column codec
//!
//! The glossary list is stored as one JSON array in a TEXT column. Callers
//! outside the repository only ever see `Vec<String>`.

use crate::errors::Result;
use tango_core::errors::TangoError;

pub(crate) fn encode(glossary: &[String]) -> Result<String> {
    serde_json::to_string(glossary).map_err(|e| TangoError::from(e).into())
}

pub(crate) fn decode(expression: &str, stored: &str) -> Result<Vec<String>> {
    serde_json::from_str(stored).map_err(|e| {
        TangoError::CorruptGlossary {
            expression: expression.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tango_core::ExErrorKind;

    #[test]
    fn test_round_trip_preserves_order() {
        let glossary = vec![
            "dog".to_string(),
            "hound".to_string(),
            "\"quoted\", with comma".to_string(),
        ];
        let stored = encode(&glossary).unwrap();
        assert_eq!(decode("犬", &stored).unwrap(), glossary);
    }

    #[test]
    fn test_non_ascii_stored_verbatim() {
        let stored = encode(&["いぬ".to_string()]).unwrap();
        assert_eq!(stored, r#"["いぬ"]"#);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        for bad in ["not json", r#"{"a":1}"#, "[1,2]"] {
            let err = decode("犬", bad).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::CorruptGlossary);
            assert_eq!(err.entity_id(), Some("犬"));
        }
    }
}
