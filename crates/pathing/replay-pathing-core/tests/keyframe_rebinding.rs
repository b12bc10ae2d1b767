use std::thread;

use replay_pathing::{
    parse_legacy_keyframe_sets, Config, Keyframe, KeyframeSet, LegacyDecoder, LegacyError,
    ObjectDecoder, PlainPosition, PositionValue, SpectatedPosition, TimeValue,
};
use serde::de::Deserializer;
use serde::Deserialize;

/// Wrap one position keyframe object in a minimal document and decode it.
fn position_keyframe(keyframe: &str) -> Keyframe<PositionValue> {
    let json = format!(r#"[{{ "positionKeyframes": [{keyframe}] }}]"#);
    let mut sets = parse_legacy_keyframe_sets(&json).expect("decode position keyframe");
    sets.remove(0).position_keyframes.remove(0)
}

fn time_keyframe(keyframe: &str) -> Keyframe<TimeValue> {
    let json = format!(r#"[{{ "timeKeyframes": [{keyframe}] }}]"#);
    let mut sets = parse_legacy_keyframe_sets(&json).expect("decode time keyframe");
    sets.remove(0).time_keyframes.remove(0)
}

fn position_error(keyframe: &str) -> LegacyError {
    let json = format!(r#"[{{ "positionKeyframes": [{keyframe}] }}]"#);
    parse_legacy_keyframe_sets(&json).expect_err("position keyframe should fail")
}

#[test]
fn documented_scenario_decodes_to_spectated_set() {
    let json = r#"[{"name":"A","positionKeyframes":[{"realTimestamp":100,"position":{"x":1,"y":2,"z":3,"yaw":0,"pitch":0,"roll":0},"spectatedEntityID":42}],"timeKeyframes":[{"realTimestamp":100,"timestamp":0}]}]"#;
    let sets = parse_legacy_keyframe_sets(json).unwrap();

    let mut expected: KeyframeSet = KeyframeSet::new("A");
    expected.position_keyframes.push(Keyframe::new(
        100,
        PositionValue::Spectated(SpectatedPosition::new(
            PlainPosition {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                yaw: 0.0,
                pitch: 0.0,
                roll: 0.0,
            },
            42,
        )),
    ));
    expected
        .time_keyframes
        .push(Keyframe::new(100, TimeValue { value: 0 }));

    assert_eq!(sets, vec![expected]);
}

#[test]
fn sibling_id_before_or_after_value_resolves_identically() {
    let after = position_keyframe(
        r#"{ "realTimestamp": 5, "value": { "x": 1.25, "y": 2, "z": -3, "yaw": 10, "pitch": 20, "roll": 30 }, "spectatedEntityID": 8 }"#,
    );
    let before = position_keyframe(
        r#"{ "spectatedEntityID": 8, "value": { "x": 1.25, "y": 2, "z": -3, "yaw": 10, "pitch": 20, "roll": 30 }, "realTimestamp": 5 }"#,
    );
    assert_eq!(after, before);
    assert_eq!(after.value.spectated_entity_id(), Some(8));
    assert_eq!(after.value.position().x, 1.25);
    assert_eq!(after.value.position().roll, 30.0);
}

#[test]
fn inline_id_wins_over_sibling_id() {
    let keyframe = position_keyframe(
        r#"{ "value": { "x": 4, "spectatedEntityID": 3 }, "spectatedEntityID": 11 }"#,
    );
    assert_eq!(
        keyframe.value,
        PositionValue::Spectated(SpectatedPosition::new(
            PlainPosition {
                x: 4.0,
                ..PlainPosition::default()
            },
            3,
        ))
    );

    let sibling_first = position_keyframe(
        r#"{ "spectatedEntityID": 11, "value": { "x": 4, "spectatedEntityID": 3 } }"#,
    );
    assert_eq!(sibling_first, keyframe);
}

#[test]
fn strict_config_rejects_conflicting_entity_ids() {
    let json = r#"[{ "positionKeyframes": [{ "value": { "spectatedEntityID": 3 }, "spectatedEntityID": 11 }] }]"#;
    let err = LegacyDecoder::new()
        .with_config(Config::strict())
        .decode_str(json)
        .unwrap_err();
    assert_eq!(err.field(), Some("spectatedEntityID"));
    assert_eq!(err.category(), "value");

    // matching ids are not a conflict
    let json = r#"[{ "positionKeyframes": [{ "value": { "spectatedEntityID": 3 }, "spectatedEntityID": 3 }] }]"#;
    let sets = LegacyDecoder::new()
        .with_config(Config::strict())
        .decode_str(json)
        .unwrap();
    assert_eq!(
        sets[0].position_keyframes[0].value.spectated_entity_id(),
        Some(3)
    );
}

#[test]
fn missing_values_decode_to_zeroed_defaults() {
    let position = position_keyframe(r#"{ "realTimestamp": 12 }"#);
    assert_eq!(position.value, PositionValue::Plain(PlainPosition::default()));
    assert_eq!(position.real_timestamp, 12);

    let time = time_keyframe(r#"{ "realTimestamp": 12 }"#);
    assert_eq!(time.value, TimeValue { value: 0 });

    let partial = position_keyframe(r#"{ "position": { "y": 70 } }"#);
    assert_eq!(
        partial.value,
        PositionValue::Plain(PlainPosition {
            y: 70.0,
            ..PlainPosition::default()
        })
    );
}

#[test]
fn position_and_value_are_synonyms() {
    let inner = r#"{ "x": 1, "y": 2, "z": 3, "yaw": 4, "pitch": 5, "roll": 6 }"#;
    let via_position = position_keyframe(&format!(r#"{{ "position": {inner} }}"#));
    let via_value = position_keyframe(&format!(r#"{{ "value": {inner} }}"#));
    assert_eq!(via_position, via_value);
}

#[test]
fn timestamp_and_value_are_synonyms() {
    let bare = time_keyframe(r#"{ "timestamp": 5 }"#);
    let value = time_keyframe(r#"{ "value": 5 }"#);
    let nested = time_keyframe(r#"{ "value": { "value": 5 } }"#);
    assert_eq!(bare, value);
    assert_eq!(bare, nested);
    assert_eq!(bare.value, TimeValue { value: 5 });
}

#[test]
fn later_duplicate_fields_replace_earlier_ones() {
    let position = position_keyframe(
        r#"{ "value": { "x": 1, "spectatedEntityID": 2 }, "position": { "x": 9 } }"#,
    );
    assert_eq!(
        position.value,
        PositionValue::Plain(PlainPosition {
            x: 9.0,
            ..PlainPosition::default()
        })
    );

    let time = time_keyframe(r#"{ "value": { "value": 1 }, "timestamp": 2, "realTimestamp": 3, "realTimestamp": 4 }"#);
    assert_eq!(time, Keyframe::new(4, TimeValue { value: 2 }));
}

#[test]
fn null_geometry_keeps_defaults_and_null_inline_id_means_plain() {
    let keyframe = position_keyframe(
        r#"{ "value": { "x": null, "y": 3, "spectatedEntityID": null } }"#,
    );
    assert_eq!(
        keyframe.value,
        PositionValue::Plain(PlainPosition {
            y: 3.0,
            ..PlainPosition::default()
        })
    );
}

#[test]
fn unknown_fields_are_skipped_at_every_level() {
    let json = r#"[{
        "version": 3,
        "name": "drift",
        "positionKeyframes": [{ "easing": [1, 2], "value": { "x": 1, "color": "red" }, "realTimestamp": 7 }],
        "timeKeyframes": [{ "speed": 1.5, "timestamp": 9 }],
        "extra": { "nested": [true, null] }
    }]"#;
    let sets = parse_legacy_keyframe_sets(json).unwrap();
    assert_eq!(sets[0].name, "drift");
    assert_eq!(sets[0].position_keyframes[0].real_timestamp, 7);
    assert_eq!(sets[0].position_keyframes[0].value.position().x, 1.0);
    assert_eq!(sets[0].time_keyframes[0].value.value, 9);
}

#[test]
fn wrong_scalar_kinds_name_their_field() {
    let err = position_error(r#"{ "realTimestamp": "soon" }"#);
    assert!(matches!(
        err,
        LegacyError::MalformedValue {
            field: "realTimestamp",
            ..
        }
    ));

    let err = position_error(r#"{ "spectatedEntityID": 1.5 }"#);
    assert_eq!(err.field(), Some("spectatedEntityID"));

    let err = position_error(r#"{ "value": { "yaw": "north" } }"#);
    assert_eq!(err.field(), Some("yaw"));

    let err = position_error(r#"{ "position": 12 }"#);
    assert_eq!(err.field(), Some("position"));

    let err = position_error(r#"{ "realTimestamp": -1 }"#);
    assert_eq!(err.field(), Some("realTimestamp"));

    let err = parse_legacy_keyframe_sets(r#"[{ "name": 5 }]"#).unwrap_err();
    assert_eq!(err.field(), Some("name"));

    let err = parse_legacy_keyframe_sets(r#"[{ "timeKeyframes": [{ "timestamp": "0" }] }]"#)
        .unwrap_err();
    assert_eq!(err.field(), Some("timestamp"));

    let err = parse_legacy_keyframe_sets(r#"[{ "positionKeyframes": [3] }]"#).unwrap_err();
    assert_eq!(err.field(), Some("positionKeyframes"));
}

#[test]
fn nested_time_value_errors_are_delegate_errors() {
    let err = parse_legacy_keyframe_sets(r#"[{ "timeKeyframes": [{ "value": { "value": "x" } }] }]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        LegacyError::DelegateDecode { field: "value", .. }
    ));

    // a bare value of the wrong kind is not delegated
    let err = parse_legacy_keyframe_sets(r#"[{ "timeKeyframes": [{ "value": "x" }] }]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        LegacyError::MalformedValue { field: "value", .. }
    ));
}

#[test]
fn truncated_input_is_a_stream_error() {
    let err = parse_legacy_keyframe_sets(r#"[{ "name": "A", "positionKeyframes": [{ "realTimestamp": 1"#)
        .unwrap_err();
    assert_eq!(err.category(), "stream");

    let err = parse_legacy_keyframe_sets(r#"[{ "name" "A" }]"#).unwrap_err();
    assert!(matches!(err, LegacyError::StreamSyntax { line: 1, .. }));
}

/// Keeps only the `name` of each custom object.
struct NamesOnly;

#[derive(Deserialize)]
struct Named {
    name: String,
}

impl ObjectDecoder for NamesOnly {
    type Object = String;

    fn decode_objects<'de, D>(&self, deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let named = Vec::<Named>::deserialize(deserializer)?;
        Ok(named.into_iter().map(|n| n.name).collect())
    }
}

#[test]
fn injected_object_decoder_receives_custom_objects() {
    let json = r#"[
        { "name": "A", "customObjects": [{ "name": "logo", "x": 1 }, { "name": "title" }] },
        { "name": "B", "customObjects": [{ "label": "no name" }] }
    ]"#;
    let decoder = LegacyDecoder::new().with_objects(NamesOnly);

    let err = decoder.decode_str(json).unwrap_err();
    assert!(matches!(
        err,
        LegacyError::DelegateDecode {
            field: "customObjects",
            ..
        }
    ));

    let sets = decoder
        .decode_str(r#"[{ "customObjects": [{ "name": "logo", "x": 1 }, { "name": "title" }] }]"#)
        .unwrap();
    assert_eq!(sets[0].custom_objects, vec!["logo", "title"]);
}

#[test]
fn independent_decodes_run_concurrently() {
    let decoder = LegacyDecoder::new();
    let decoder = &decoder;
    let results: Vec<Vec<KeyframeSet>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                scope.spawn(move || {
                    let json = format!(
                        r#"[{{ "name": "set-{i}", "positionKeyframes": [{{ "realTimestamp": {i}, "spectatedEntityID": {i} }}] }}]"#
                    );
                    decoder.decode_str(&json).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, sets) in results.iter().enumerate() {
        assert_eq!(sets[0].name, format!("set-{i}"));
        let keyframe = &sets[0].position_keyframes[0];
        assert_eq!(keyframe.real_timestamp, i as u32);
        assert_eq!(keyframe.value.spectated_entity_id(), Some(i as i32));
    }
}
