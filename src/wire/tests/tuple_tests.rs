//! Tuple renderer: exact fit, structure, and the no-overrun property.

use proptest::prelude::*;

use crate::{
    error::UplinkError,
    item::{CustomData, DataPointValue, Event, EventSchema, Item, Severity, Timeseries, ValueList},
    sizing,
    wire::{self, cursor::BodyCursor, token, tuple},
};

fn sample_event() -> Item {
    Item::from(Event::new(
        EventSchema::V1,
        "thresholdViolation",
        "1.0.1",
        Severity::Error,
        "2018-04-26T08:06:25.317Z",
    ))
}

#[test]
fn render_fills_an_exactly_sized_cursor() {
    let mut item = sample_event();
    let size = sizing::tuple_size(&item);
    let mut cursor = BodyCursor::with_limit(size).expect("allocate");
    let boundary = token::boundary();

    tuple::render_tuple(&mut cursor, &mut item, &boundary).expect("render");
    assert_eq!(cursor.remaining(), 0, "sizing must match rendered length");

    let body = cursor.into_bytes();
    let text = std::str::from_utf8(&body).expect("tuple is utf-8");
    assert!(text.starts_with(&format!("--{boundary}\r\n")));
    assert!(text.contains(wire::META_CONTENT_TYPE));
    assert!(text.contains(wire::JSON_CONTENT_TYPE));
    assert!(text.ends_with("--\r\n"));
}

#[test]
fn render_with_one_byte_less_always_fails() {
    let mut item = sample_event();
    let size = sizing::tuple_size(&item);
    let mut cursor = BodyCursor::with_limit(size - 1).expect("allocate");
    let err = tuple::render_tuple(&mut cursor, &mut item, &token::boundary())
        .expect_err("short buffer must fail");
    assert!(matches!(err, UplinkError::Capacity(_)));
}

#[test]
fn raw_payloads_are_pulled_into_place() {
    let data: Vec<u8> = (0_u8..=199).cycle().take(40_000).collect();
    let mut item = Item::from(CustomData::new(
        "vibrationSample",
        "1.0",
        "application/cbor",
        data.clone(),
    ));
    let size = sizing::tuple_size(&item);
    let mut cursor = BodyCursor::with_limit(size).expect("allocate");

    tuple::render_tuple(&mut cursor, &mut item, &token::boundary()).expect("render");
    assert_eq!(cursor.remaining(), 0);

    let body = cursor.into_bytes();
    let needle = &data[..];
    assert!(
        body.windows(needle.len()).any(|window| window == needle),
        "raw payload bytes must appear verbatim in the tuple",
    );
}

#[test]
fn retried_render_restarts_raw_payload_from_byte_zero() {
    let data = b"abcdefghij".to_vec();
    let mut item = Item::from(CustomData::new(
        "vibrationSample",
        "1.0",
        "application/cbor",
        data,
    ));
    let size = sizing::tuple_size(&item);

    for _ in 0..2 {
        let mut cursor = BodyCursor::with_limit(size).expect("allocate");
        tuple::render_tuple(&mut cursor, &mut item, &token::boundary()).expect("render");
        let body = cursor.into_bytes();
        assert!(body.windows(10).any(|w| w == b"abcdefghij"));
    }
}

fn arbitrary_timeseries() -> impl Strategy<Value = Timeseries> {
    let value = ("[a-z]{1,12}", "[0-9]{1,6}", "[0-9]{1,4}")
        .prop_map(|(id, value, quality)| DataPointValue::new(id, value, quality));
    let list = proptest::collection::vec(value, 0..4).prop_map(|values| {
        values.into_iter().fold(
            ValueList::new("2018-04-26T08:06:25.317Z"),
            ValueList::with_value,
        )
    });
    proptest::collection::vec(list, 0..4).prop_map(|lists| {
        lists
            .into_iter()
            .fold(Timeseries::new("cfg-1"), Timeseries::with_value_list)
    })
}

proptest! {
    // For any buffer of the computed size the renderer fits exactly and
    // never overruns; for any buffer one byte smaller it always fails.
    #[test]
    fn no_overrun_property(timeseries in arbitrary_timeseries()) {
        let mut item = Item::from(timeseries);
        let size = sizing::tuple_size(&item);
        let boundary = token::boundary();

        let mut exact = BodyCursor::with_limit(size).expect("allocate");
        tuple::render_tuple(&mut exact, &mut item, &boundary).expect("render");
        prop_assert_eq!(exact.remaining(), 0);

        let mut short = BodyCursor::with_limit(size - 1).expect("allocate");
        let result = tuple::render_tuple(&mut short, &mut item, &boundary);
        prop_assert!(matches!(result, Err(UplinkError::Capacity(_))));
    }
}
