//! Property tests: random type trees and values survive encode/decode

use calldata_abi::{ArrayLength, Codec, DecodeOptions, EncodeOptions, Value};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;

// A small alphabet so generated values repeat and the optimizer has work to do.
const WORDS: &[&str] = &[
    "",
    "a",
    "Hello",
    "World",
    "a string that is longer than one thirty-two byte word",
];

fn hex_value(bytes: Vec<u8>) -> Value {
    Value::from(format!("0x{}", hex::encode(bytes)))
}

fn codec_strategy() -> impl Strategy<Value = Codec> {
    let leaf = prop_oneof![
        Just(Codec::Bool),
        Just(Codec::Address),
        Just(Codec::UInt(64)),
        Just(Codec::Int(32)),
        Just(Codec::FixedBytes(4)),
        Just(Codec::String),
        Just(Codec::Bytes),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Codec::dynamic_array),
            (inner.clone(), 1usize..4)
                .prop_map(|(element, len)| Codec::fixed_array(element, len).unwrap()),
            vec(inner, 1..4).prop_map(|codecs| {
                Codec::tuple(
                    codecs
                        .into_iter()
                        .enumerate()
                        .map(|(i, codec)| (format!("f{}", i), codec)),
                )
                .unwrap()
            }),
        ]
    })
}

fn value_strategy(codec: &Codec) -> BoxedStrategy<Value> {
    match codec {
        Codec::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        Codec::Address => any::<[u8; 20]>()
            .prop_map(|a| hex_value(a.to_vec()))
            .boxed(),
        Codec::UInt(_) => prop_oneof![Just(0u64), Just(100), Just(150), any::<u64>()]
            .prop_map(Value::from)
            .boxed(),
        Codec::Int(_) => any::<i32>().prop_map(Value::from).boxed(),
        Codec::FixedBytes(len) => vec(any::<u8>(), *len as usize).prop_map(hex_value).boxed(),
        Codec::String => select(WORDS).prop_map(Value::from).boxed(),
        Codec::Bytes => prop_oneof![
            select(WORDS).prop_map(|s| s.as_bytes().to_vec()),
            vec(any::<u8>(), 0..70),
        ]
        .prop_map(hex_value)
        .boxed(),
        Codec::Array(array) => {
            let element = value_strategy(array.element());
            let len = match array.length() {
                ArrayLength::Fixed(n) => n..n + 1,
                ArrayLength::Dynamic => 0..4,
            };
            vec(element, len).prop_map(Value::List).boxed()
        }
        Codec::Tuple(tuple) => tuple
            .fields()
            .iter()
            .map(|field| value_strategy(&field.codec))
            .collect::<Vec<_>>()
            .prop_map(Value::List)
            .boxed(),
    }
}

fn codec_and_value() -> impl Strategy<Value = (Codec, Value)> {
    codec_strategy().prop_flat_map(|codec| {
        let value = value_strategy(&codec);
        (Just(codec), value)
    })
}

proptest! {
    #[test]
    fn plain_round_trip((codec, value) in codec_and_value()) {
        let encoded = codec.encode(&value, &EncodeOptions::default()).unwrap();
        prop_assert_eq!(encoded.len() % 32, 0);
        prop_assert_eq!(codec.decode(&encoded, &DecodeOptions::default()).unwrap(), value);
    }

    #[test]
    fn optimized_round_trip((codec, value) in codec_and_value()) {
        let plain = codec.encode(&value, &EncodeOptions::default()).unwrap();
        let optimized = codec.encode(&value, &EncodeOptions::optimized()).unwrap();
        prop_assert!(optimized.len() <= plain.len());
        prop_assert_eq!(optimized.len() % 32, 0);
        prop_assert_eq!(codec.decode(&optimized, &DecodeOptions::default()).unwrap(), value);
    }

    #[test]
    fn static_codecs_fill_their_head((codec, value) in codec_and_value()) {
        if let Some(words) = codec.static_words() {
            let encoded = codec.encode(&value, &EncodeOptions::optimized()).unwrap();
            prop_assert_eq!(encoded.len(), words * 32);
        }
    }

    #[test]
    fn decode_never_panics_on_noise(data in vec(any::<u8>(), 0..256)) {
        let codec = Codec::tuple([
            ("xs", Codec::dynamic_array(Codec::String)),
            ("y", Codec::UInt(256)),
            ("b", Codec::Bytes),
        ])
        .unwrap();
        let _ = codec.decode(&data, &DecodeOptions::default());
    }
}
