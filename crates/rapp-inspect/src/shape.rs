//! Inline schema parsing
//!
//! Parses `name:type[,name:type...]` into a [`Schema`]. Order is declaration
//! order; type names are those accepted by [`TypeTag`]'s `FromStr`.

use std::collections::HashSet;

use rapp_core::{Schema, TypeTag};
use rapp_proto::descriptors;

use crate::error::InspectError;

/// Type name given to schemas parsed from the command line
pub const INLINE_TYPE_NAME: &str = "inline";

/// Parse an inline schema
pub fn parse(input: &str) -> Result<Schema, InspectError> {
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for (position, entry) in input.split(',').enumerate() {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(InspectError::EmptyField { position });
        }
        let Some((name, kind)) = entry.split_once(':') else {
            return Err(InspectError::MissingType { name: entry.to_string() });
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(InspectError::EmptyField { position });
        }
        let tag = kind
            .parse::<TypeTag>()
            .map_err(|source| InspectError::FieldType { name: name.to_string(), source })?;
        if !seen.insert(name) {
            return Err(InspectError::DuplicateField(name.to_string()));
        }
        fields.push((name.to_string(), tag));
    }

    Ok(Schema::new(INLINE_TYPE_NAME, descriptors(fields)?))
}

#[cfg(test)]
mod tests {
    use rapp_core::ProtocolError;

    use super::*;

    #[test]
    fn parses_player() {
        let schema = parse("Id:int32, Name:string ,Active:bool,Score:double").unwrap();
        assert_eq!(schema.fingerprint().to_string(), "5ea47e503a547dac");
        assert_eq!(schema.head_size(), 15);
        assert_eq!(schema.fields()[1].name, "Name");
    }

    #[test]
    fn accepts_aliases() {
        let long = parse("A:int64,B:str").unwrap();
        let short = parse("A:i64,B:string").unwrap();
        assert_eq!(long.fingerprint(), short.fingerprint());
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(matches!(parse(""), Err(InspectError::EmptyField { position: 0 })));
        assert!(matches!(parse("A:int32,,B:bool"), Err(InspectError::EmptyField { position: 1 })));
        assert!(matches!(parse(":int32"), Err(InspectError::EmptyField { position: 0 })));
        assert!(matches!(parse("A"), Err(InspectError::MissingType { name }) if name == "A"));
        assert!(matches!(
            parse("A:uuid"),
            Err(InspectError::FieldType { source: ProtocolError::UnknownTypeTag(_), .. })
        ));
        assert!(matches!(parse("A:bool,A:byte"), Err(InspectError::DuplicateField(name)) if name == "A"));
    }

    #[test]
    fn rejects_more_fields_than_indices() {
        let input: Vec<_> = (0..=rapp_proto::MAX_FIELDS).map(|i| format!("f{i}:byte")).collect();
        assert!(matches!(
            parse(&input.join(",")),
            Err(InspectError::Protocol(ProtocolError::TooManyFields { count: 65_537 }))
        ));
    }
}
