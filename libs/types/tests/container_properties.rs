//! Container and Identifier Property Tests
//!
//! Properties that must hold for any member values, regardless of how the
//! application reached its current state.

use dob_types::{
    generate64, ChannelId, Container, ErrorKind, HandlerId, Int32Array, Int32Sequence,
    Int64Container, TypesystemError,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Operation applied to a sequence in a random script
#[derive(Debug, Clone)]
enum SeqOp {
    Push(i32),
    Insert(usize, i32),
    Remove(usize),
    Clear,
    MarkSent,
}

fn seq_op() -> impl Strategy<Value = SeqOp> {
    prop_oneof![
        any::<i32>().prop_map(SeqOp::Push),
        (0usize..12, any::<i32>()).prop_map(|(i, v)| SeqOp::Insert(i, v)),
        (0usize..12).prop_map(SeqOp::Remove),
        Just(SeqOp::Clear),
        Just(SeqOp::MarkSent),
    ]
}

proptest! {
    #[test]
    fn prop_identifier_equality_ignores_alias(raw in any::<i64>(), alias in "[A-Za-z0-9_/]{1,24}") {
        let plain = ChannelId::from_raw(raw);
        let named = ChannelId::from_raw_and_string(raw, alias.clone()).unwrap();

        prop_assert_eq!(&plain, &named);
        prop_assert_eq!(plain.hash_code(), named.hash_code());
        prop_assert_eq!(hash_of(&plain), hash_of(&named));
        prop_assert_eq!(plain.hash_code(), raw as i32);
        prop_assert_eq!(named.raw_string(), alias.as_str());
    }

    #[test]
    fn prop_from_string_is_deterministic(name in "[A-Za-z0-9_/ .-]{1,32}") {
        let a = HandlerId::from_string(name.clone()).unwrap();
        let b = HandlerId::from_string(name.clone()).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.raw_value(), generate64(&name));
        prop_assert_eq!(a.utf8_length(), name.len() + 1);
        prop_assert_eq!(a.display_string().into_owned(), name);
    }

    #[test]
    fn prop_ordering_follows_raw_value(a in any::<i64>(), b in any::<i64>()) {
        let left = ChannelId::from_raw_and_string(a, "left").unwrap();
        let right = ChannelId::from_raw(b);
        prop_assert_eq!(left.cmp(&right), a.cmp(&b));
    }

    #[test]
    fn prop_utf8_round_trip(raw in any::<i64>(), alias in any::<String>()) {
        match ChannelId::from_raw_and_string(raw, alias.clone()) {
            Ok(sent) => {
                let received =
                    ChannelId::from_raw_and_utf8(raw, sent.utf8_bytes_with_nul()).unwrap();
                prop_assert_eq!(received.raw_string(), alias.as_str());
                prop_assert_eq!(received.utf8_length(), sent.utf8_length());
            }
            Err(err) => {
                prop_assert!(alias.contains('\0'));
                prop_assert_eq!(err.kind(), ErrorKind::EncodingFailure);
            }
        }
    }

    #[test]
    fn prop_alias_with_nul_never_constructed(
        prefix in "[a-z]{0,8}",
        suffix in "[a-z]{0,8}",
    ) {
        let alias = format!("{}\0{}", prefix, suffix);
        prop_assert!(ChannelId::from_raw_and_string(1, alias.clone()).is_err());
        prop_assert!(HandlerId::from_string(alias.clone()).is_err());
        prop_assert!(ChannelId::from_raw_and_utf8(1, alias.as_bytes()).is_err());
    }

    #[test]
    fn prop_value_clone_is_independent(initial in any::<i64>(), update in any::<i64>()) {
        let mut original = Int64Container::new();
        original.set(initial);
        let snapshot = original.clone();

        original.set(update);
        original.set_changed(false);

        prop_assert_eq!(snapshot.get().copied(), Ok(initial));
        prop_assert!(snapshot.is_changed());
        prop_assert!(!original.is_changed());
    }

    #[test]
    fn prop_set_changed_false_is_idempotent(values in vec(any::<i32>(), 0..16)) {
        let mut seq = Int32Sequence::new();
        for v in &values {
            seq.push(*v);
        }

        seq.set_changed(false);
        let once = seq.clone();
        seq.set_changed(false);

        prop_assert_eq!(&seq, &once);
        prop_assert!(!seq.is_changed());
        prop_assert_eq!(seq.as_slice(), values.as_slice());
    }

    #[test]
    fn prop_array_index_bounds(size in 1usize..32, index in 0usize..64) {
        let mut array = Int32Array::new(size).unwrap();
        prop_assert_eq!(array.len(), size);

        if index < size {
            array.get_mut(index).unwrap().set(index as i32);
            prop_assert!(array.is_changed());
            prop_assert_eq!(array.get(index).unwrap().get().copied(), Ok(index as i32));
        } else {
            let err = array.get_mut(index).unwrap_err();
            prop_assert_eq!(err, TypesystemError::IndexOutOfRange { index, len: size });
            prop_assert!(!array.is_changed());
        }
    }

    #[test]
    fn prop_array_set_changed_reaches_every_slot(size in 1usize..16, touched in 0usize..16) {
        let mut array = Int32Array::new(size).unwrap();
        let touched = touched % size;
        array.get_mut(touched).unwrap().set(1);

        array.set_changed(false);
        prop_assert!(array.iter().all(|slot| !slot.is_changed()));

        array.set_changed(true);
        prop_assert!(array.iter().all(|slot| slot.is_changed()));
        // Only the touched slot carries a value
        prop_assert_eq!(array.iter().filter(|slot| !slot.is_null()).count(), 1);
    }

    #[test]
    fn prop_sequence_matches_vec_model(ops in vec(seq_op(), 0..40)) {
        let mut seq = Int32Sequence::new();
        let mut model: Vec<i32> = Vec::new();
        let mut model_changed = false;

        for op in ops {
            match op {
                SeqOp::Push(v) => {
                    seq.push(v);
                    model.push(v);
                    model_changed = true;
                }
                SeqOp::Insert(i, v) => {
                    let result = seq.insert(i, v);
                    if i <= model.len() {
                        prop_assert!(result.is_ok());
                        model.insert(i, v);
                        model_changed = true;
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                SeqOp::Remove(i) => {
                    let result = seq.remove_at(i);
                    if i < model.len() {
                        prop_assert_eq!(result, Ok(model.remove(i)));
                        model_changed = true;
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                SeqOp::Clear => {
                    seq.clear();
                    model.clear();
                    model_changed = true;
                }
                SeqOp::MarkSent => {
                    seq.set_changed(false);
                    model_changed = false;
                }
            }

            prop_assert_eq!(seq.as_slice(), model.as_slice());
            prop_assert_eq!(seq.is_changed(), model_changed);
            prop_assert_eq!(seq.is_null(), model.is_empty());
        }
    }
}
