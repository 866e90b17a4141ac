//! Whole-document behavior of a [`Recaster`] over derived types.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use protobuf::well_known_types::timestamp::Timestamp;

use crate::error::{DecodeError, EncodeError, ReconstructionError};
use crate::info::Typed;
use crate::transform::CustomTransformer;
use crate::{Date, Document, Object, PrimitiveArray, Recast, RecastOptions, Recaster, Value, doc};

#[derive(Recast, Default, Debug, PartialEq)]
#[recast(alias = "record")]
struct Record {
    id: i64,
    tags: Vec<String>,
    meta: HashMap<String, i32>,
}

#[derive(Recast, Default, Debug, PartialEq)]
#[recast(alias = "listing")]
struct Listing {
    id: String,
    tags: Vec<String>,
    meta: HashMap<String, i32>,
}

#[derive(Recast, Default, Debug, PartialEq)]
#[recast(alias = "blob")]
struct Blob {
    bytes: Box<[Option<u8>]>,
}

#[derive(Recast, Default, Debug, PartialEq)]
enum Level {
    #[default]
    Low,
    #[recast(rename = "HIGH")]
    High,
}

#[derive(Recast, Default, Debug, PartialEq)]
#[recast(alias = "profile")]
struct Profile {
    #[recast(rename = "display_name")]
    name: String,
    level: Level,
    nickname: Option<String>,
    #[recast(skip)]
    cached: u32,
}

#[derive(Recast, Default, Debug)]
#[recast(alias = "envelope")]
struct Envelope {
    rows: Vec<HashMap<String, Object>>,
}

#[derive(Recast, Default, Debug, PartialEq)]
#[recast(alias = "stamps")]
struct Stamps {
    date: Date,
    at: Option<DateTime<Utc>>,
}

#[derive(Recast, Default, Debug, PartialEq)]
#[recast(alias = "table")]
struct Table {
    rows: Vec<HashMap<String, i32>>,
}

#[derive(Recast, Default, Debug, PartialEq)]
#[recast(alias = "event")]
struct Event {
    name: String,
    at: Timestamp,
}

fn recaster() -> Recaster {
    Recaster::builder()
        .register::<Record>()
        .register::<Listing>()
        .register::<Blob>()
        .register::<Profile>()
        .register::<Envelope>()
        .register::<Stamps>()
        .register::<Table>()
        .register::<Event>()
        .build()
}

fn record() -> Record {
    Record {
        id: 7,
        tags: vec!["a".into(), "b".into()],
        meta: HashMap::from([("x".into(), 1)]),
    }
}

#[test]
fn struct_round_trip() {
    let recaster = recaster();
    let document = recaster.to_document(&record()).unwrap();

    assert_eq!(
        document,
        doc! {
            "__recast" => "record",
            "id" => 7_i64,
            "tags" => vec!["a", "b"],
            "meta" => doc! { "x" => 1_i32 },
        }
    );
    // discriminator comes first
    assert_eq!(document.keys().next(), Some("__recast"));

    let decoded: Record = recaster.from_document(&document).unwrap();
    assert_eq!(decoded, record());
}

#[test]
fn text_ids_round_trip() {
    let recaster = recaster();
    let listing = Listing {
        id: "abc".into(),
        tags: vec!["x".into(), "y".into()],
        meta: HashMap::from([("k".into(), 1)]),
    };

    let document = recaster.to_document(&listing).unwrap();
    assert_eq!(
        document,
        doc! {
            "__recast" => "listing",
            "id" => "abc",
            "tags" => vec!["x", "y"],
            "meta" => doc! { "k" => 1_i32 },
        }
    );

    let decoded: Listing = recaster.from_document(&document).unwrap();
    assert_eq!(decoded.id, "abc");
    assert_eq!(decoded.tags, ["x", "y"]);
    assert_eq!(decoded.meta.get("k"), Some(&1_i32));
    assert_eq!(decoded, listing);
}

#[test]
fn type_path_is_accepted_in_place_of_alias() {
    let recaster = recaster();
    let path = <Record as Typed>::type_info().type_path();
    assert!(path.ends_with("::Record"));

    let decoded: Record = recaster
        .from_document(&doc! { "__recast" => path, "id" => 3_i64 })
        .unwrap();
    assert_eq!(decoded.id, 3);
}

#[test]
fn empty_maps_follow_store_empties() {
    let value = Record::default();

    let document = recaster().to_document(&value).unwrap();
    assert!(!document.contains_key("meta"));

    let recaster = Recaster::builder()
        .register::<Record>()
        .options(RecastOptions::new().with_store_empties(true))
        .build();
    let document = recaster.to_document(&value).unwrap();
    assert_eq!(document.get("meta"), Some(&Value::Document(Default::default())));
    assert_eq!(recaster.from_document::<Record>(&document).unwrap(), value);
}

#[test]
fn renamed_skipped_and_optional_fields() {
    let recaster = recaster();
    let profile = Profile {
        name: "Ada".into(),
        level: Level::High,
        nickname: None,
        cached: 9,
    };

    let document = recaster.to_document(&profile).unwrap();
    assert_eq!(document.get_str("display_name"), Some("Ada"));
    assert_eq!(document.get_str("level"), Some("HIGH"));
    assert!(!document.contains_key("nickname"));
    assert!(!document.contains_key("cached"));

    let decoded: Profile = recaster.from_document(&document).unwrap();
    assert_eq!(decoded, Profile { cached: 0, ..profile });

    let with_nulls = Recaster::builder()
        .register::<Profile>()
        .options(RecastOptions::new().with_store_nulls(true))
        .build();
    let document = with_nulls.to_document(&Profile::default()).unwrap();
    assert_eq!(document.get("nickname"), Some(&Value::Null));
}

#[test]
fn unknown_variant_is_reported() {
    let error = recaster()
        .from_document::<Profile>(&doc! { "level" => "MEDIUM" })
        .unwrap_err();
    assert_eq!(error.path(), Some("level"));
    assert!(matches!(error.as_decode(), Some(DecodeError::UnknownVariant { .. })));
}

#[test]
fn discriminators_survive_three_levels() {
    let recaster = recaster();
    let envelope = Envelope {
        rows: vec![HashMap::from([
            ("record".into(), Object::new(record())),
            ("count".into(), Object::new(2_i32)),
        ])],
    };

    let document = recaster.to_document(&envelope).unwrap();
    let row = document
        .get("rows")
        .and_then(|rows| rows.as_array())
        .and_then(|rows| rows[0].as_document())
        .unwrap();
    assert_eq!(
        row.get("record").and_then(Value::as_document).and_then(|d| d.get_str("__recast")),
        Some("record")
    );

    let decoded: Envelope = recaster.from_document(&document).unwrap();
    let row = &decoded.rows[0];
    assert_eq!(row["record"].downcast_ref::<Record>(), Some(&record()));
    assert_eq!(row["count"].downcast_ref::<i32>(), Some(&2));
}

#[test]
fn object_root_decodes_by_discriminator() {
    let recaster = recaster();
    let document = recaster.to_document(&record()).unwrap();
    let object: Object = recaster.from_document(&document).unwrap();
    assert_eq!(object.downcast_ref::<Record>(), Some(&record()));

    let decoded = recaster.from_document_dyn(&document, None).unwrap();
    assert!(decoded.is::<Record>());
}

#[test]
fn dates_are_lenient_and_instants_strict() {
    let recaster = recaster();

    let decoded: Stamps = recaster
        .from_document(&doc! { "date" => "not a date" })
        .unwrap();
    assert_eq!(decoded.date, Date::default());

    let decoded: Stamps = recaster
        .from_document(&doc! { "date" => "Wed Jan 03 10:15:30 UTC 2024" })
        .unwrap();
    assert_eq!(decoded.date.millis(), 1_704_276_930_000);

    let decoded: Stamps = recaster
        .from_document(&doc! { "date" => "Wed Jan 03 10:15:30 PST 2024" })
        .unwrap();
    assert_eq!(decoded.date, Date::default());

    let decoded: Stamps = recaster
        .from_document(&doc! { "date" => "Wed Jan 03 02:15:30 -0800 2024" })
        .unwrap();
    assert_eq!(decoded.date.millis(), 1_704_276_930_000);

    let error = recaster
        .from_document::<Stamps>(&doc! { "at" => "2024-01-03T10:15:30Z" })
        .unwrap_err();
    assert_eq!(error.path(), Some("at"));
    assert!(matches!(error.as_decode(), Some(DecodeError::Incompatible { .. })));

    let at = Utc.with_ymd_and_hms(2024, 1, 3, 10, 15, 30).unwrap();
    let error = recaster
        .from_document::<Stamps>(&doc! { "date" => Value::Instant(at) })
        .unwrap_err();
    assert_eq!(error.path(), Some("date"));
    assert!(matches!(
        error.as_decode(),
        Some(DecodeError::Incompatible { target: "date", found: "instant" })
    ));

    let stamps = Stamps { date: Date::from(at), at: Some(at) };
    let document = recaster.to_document(&stamps).unwrap();
    assert_eq!(document.get("at"), Some(&Value::Instant(at)));
    assert_eq!(recaster.from_document::<Stamps>(&document).unwrap(), stamps);
}

#[test]
fn leaf_edge_cases() {
    let recaster = recaster();
    let dispatcher = recaster.dispatcher();

    assert_eq!(dispatcher.encode(&'\0', None).unwrap(), Value::Null);
    let decoded = dispatcher
        .decode(<char as Typed>::type_info(), &Value::from(""), None)
        .unwrap()
        .unwrap();
    assert_eq!(decoded.downcast_ref::<char>(), Some(&'\0'));

    let bytes: Box<[Option<u8>]> = Box::new([Some(1), Some(2)]);
    let encoded = dispatcher.encode(&bytes, None).unwrap();
    assert_eq!(encoded, Value::Packed(PrimitiveArray::from(vec![1_u8, 2])));
    let decoded = dispatcher
        .decode(<Box<[Option<u8>]> as Typed>::type_info(), &encoded, None)
        .unwrap()
        .unwrap();
    assert_eq!(decoded.downcast_ref::<Box<[Option<u8>]>>(), Some(&bytes));
}

#[test]
fn boxed_bytes_keep_their_order() {
    let recaster = recaster();
    let blob = Blob {
        bytes: Box::new([Some(1), Some(2), Some(3)]),
    };

    let document = recaster.to_document(&blob).unwrap();
    assert_eq!(
        document.get("bytes"),
        Some(&Value::Packed(PrimitiveArray::from(vec![1_u8, 2, 3])))
    );
    assert_eq!(recaster.from_document::<Blob>(&document).unwrap(), blob);
}

macro_rules! assert_null_leaves {
    ($dispatcher:ident: $($ty:ty),* $(,)?) => {$(
        assert_eq!(
            $dispatcher.encode(&None::<$ty>, None).unwrap(),
            Value::Null,
            "{}",
            stringify!($ty)
        );
        assert!(
            $dispatcher
                .decode(<$ty as Typed>::type_info(), &Value::Null, None)
                .unwrap()
                .is_none(),
            "{}",
            stringify!($ty)
        );
    )*};
}

#[test]
fn null_passes_through_every_leaf() {
    let recaster = recaster();
    let dispatcher = recaster.dispatcher();
    assert_null_leaves!(dispatcher:
        bool, u8, i16, char, i32, i64, f32, f64, String,
        Date, DateTime<Utc>, NaiveDateTime, NaiveTime, Document,
        Box<[u8]>, Box<[Option<u8>]>, Box<[i16]>, Box<[i32]>, Box<[i64]>,
        Box<[f32]>, Box<[f64]>, Box<[char]>, Box<[Option<char>]>,
    );

    // a raw value keeps the null itself
    assert_eq!(dispatcher.encode(&None::<Value>, None).unwrap(), Value::Null);
    let decoded = dispatcher
        .decode(<Value as Typed>::type_info(), &Value::Null, None)
        .unwrap()
        .unwrap();
    assert_eq!(decoded.downcast_ref::<Value>(), Some(&Value::Null));
}

#[test]
fn non_struct_roots_are_wrapped() {
    let recaster = recaster();
    let document = recaster.to_document(&vec![1_i32, 2]).unwrap();
    assert_eq!(
        document.get("__encodedValue"),
        Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
    );
    let decoded: Vec<i32> = recaster.from_document(&document).unwrap();
    assert_eq!(decoded, [1, 2]);
}

#[test]
fn messages_are_stored_as_json() {
    let recaster = recaster();
    let event = Event {
        name: "deploy".into(),
        at: Timestamp {
            seconds: 1_704_276_930,
            ..Default::default()
        },
    };

    let document = recaster.to_document(&event).unwrap();
    let stored = document.get_str("at").unwrap();
    assert!(stored.starts_with("\"2024-01-03T10:15:30"), "{stored}");

    let decoded: Event = recaster.from_document(&document).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn located_errors_carry_the_document_path() {
    let error = recaster()
        .from_document::<Table>(&doc! {
            "rows" => vec![doc! { "k" => 1_i32 }, doc! { "k" => "seven" }],
        })
        .unwrap_err();
    assert_eq!(error.path(), Some("rows[1].k"));
    assert!(matches!(error.as_decode(), Some(DecodeError::Parse { .. })));

    let error = recaster()
        .from_document::<Table>(&doc! { "rows" => vec![Value::Null] })
        .unwrap_err();
    assert_eq!(error.path(), Some("rows[0]"));
    assert!(matches!(error.as_decode(), Some(DecodeError::NullElement { .. })));
}

#[test]
fn depth_is_limited_both_ways() {
    let recaster = Recaster::builder()
        .register::<Record>()
        .options(RecastOptions::new().with_max_depth(1))
        .build();

    let error = recaster.to_document(&record()).unwrap_err();
    assert_eq!(error.path(), Some("tags"));
    assert!(matches!(error.as_encode(), Some(EncodeError::DepthLimitExceeded(1))));

    let error = recaster
        .from_document::<Record>(&doc! { "tags" => vec!["a"] })
        .unwrap_err();
    assert!(matches!(error.as_decode(), Some(DecodeError::DepthLimitExceeded(1))));
}

#[test]
fn discriminator_failures() {
    let recaster = recaster();

    let error = recaster
        .from_document_dyn(&doc! { "__recast" => "nobody" }, None)
        .unwrap_err();
    assert!(matches!(
        error.as_reconstruction(),
        Some(ReconstructionError::UnknownDiscriminator(name)) if name == "nobody"
    ));

    let error = recaster
        .from_document::<Record>(&doc! { "__recast" => "profile" })
        .unwrap_err();
    assert!(matches!(error.as_reconstruction(), Some(ReconstructionError::TypeMismatch { .. })));

    let error = recaster.from_document_dyn(&doc! { "id" => 1_i64 }, None).unwrap_err();
    assert!(matches!(error.as_reconstruction(), Some(ReconstructionError::MissingDiscriminator)));

    let error = recaster
        .from_document_dyn(&doc! { "__recast" => 5_i32 }, None)
        .unwrap_err();
    assert!(matches!(
        error.as_reconstruction(),
        Some(ReconstructionError::InvalidDiscriminator { found: "int" })
    ));
}

#[test]
fn merge_keeps_absent_fields() {
    let recaster = recaster();
    let mut value = record();
    recaster
        .merge_document(&doc! { "__recast" => "record", "id" => 9_i64 }, &mut value)
        .unwrap();
    assert_eq!(value.id, 9);
    assert_eq!(value.tags, ["a", "b"]);

    let mut number = 1_i32;
    let error = recaster.merge_document(&doc! {}, &mut number).unwrap_err();
    assert!(matches!(error.as_reconstruction(), Some(ReconstructionError::NotMergeable { .. })));
}

struct Upper;

impl CustomTransformer for Upper {
    fn encode(&self, value: &dyn Recast) -> Result<Value, EncodeError> {
        let text = value.downcast_ref::<String>().ok_or(EncodeError::Unsupported {
            type_path: value.type_path(),
        })?;
        Ok(Value::String(text.to_uppercase()))
    }

    fn decode(
        &self,
        _target: &'static crate::info::TypeInfo,
        value: &Value,
    ) -> Result<Option<Box<dyn Recast>>, DecodeError> {
        Ok(value.as_str().map(|text| Box::new(text.to_lowercase()) as Box<dyn Recast>))
    }
}

#[test]
fn custom_transformers_take_precedence() {
    let recaster = Recaster::builder()
        .register::<Record>()
        .with_transformer::<String>(Upper)
        .build();

    let document = recaster.to_document(&record()).unwrap();
    assert_eq!(document.get("tags"), Some(&Value::from(vec!["A", "B"])));

    let decoded: Record = recaster.from_document(&document).unwrap();
    assert_eq!(decoded.tags, ["a", "b"]);
}
