use alloc::boxed::Box;
use alloc::string::ToString;

use recast_document::Value;

use crate::Recast;
use crate::error::{DecodeError, EncodeError, Result};
use crate::info::MessageInfo;
use crate::ops::RecastRef;

/// Stores a protobuf message as its canonical JSON text.
pub(super) fn encode(value: &dyn Recast) -> Result<Value> {
    let RecastRef::Message(message) = value.recast_ref() else {
        return Err(EncodeError::Unsupported {
            type_path: value.type_path(),
        }
        .into());
    };
    protobuf_json_mapping::print_to_string(message)
        .map(Value::String)
        .map_err(|error| {
            EncodeError::Message {
                type_path: value.type_path(),
                message: error.to_string(),
            }
            .into()
        })
}

pub(super) fn decode(info: &MessageInfo, value: &Value) -> Result<Option<Box<dyn Recast>>> {
    match value {
        Value::Null => Ok(None),
        Value::String(json) => info.parse(json).map(Some).map_err(|message| {
            DecodeError::Message {
                target: info.ty().path(),
                message,
            }
            .into()
        }),
        other => Err(DecodeError::Incompatible {
            target: info.ty().path(),
            found: other.kind_name(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use protobuf::well_known_types::timestamp::Timestamp;
    use recast_document::Value;

    use super::{decode, encode};
    use crate::info::Typed;

    #[test]
    fn timestamp_as_json_text() {
        let mut timestamp = Timestamp::new();
        timestamp.seconds = 1_704_276_930;
        let encoded = encode(&timestamp).unwrap();
        assert!(matches!(&encoded, Value::String(json) if json.starts_with("\"2024-01-03T10:15:30")));

        let info = <Timestamp as Typed>::type_info().as_message().unwrap();
        let decoded = decode(info, &encoded).unwrap().unwrap();
        assert_eq!(decoded.downcast_ref::<Timestamp>(), Some(&timestamp));
    }

    #[test]
    fn bad_json_is_a_decode_error() {
        let info = <Timestamp as Typed>::type_info().as_message().unwrap();
        let error = decode(info, &Value::from("{not json")).unwrap_err();
        assert!(error.as_decode().is_some());
        assert!(decode(info, &Value::Int(1)).is_err());
    }
}
