use codec::{
    codes, place_flags, CharacterId, CharacterTable, DefineSprite, Depth, FixedBounds, Matrix,
    PlaceKind, Placement, RawRecord, Record, Rect, SwfVersion,
};
use proptest::prelude::*;

const TYPED_CODES: [u16; 7] = [
    codes::SHOW_FRAME,
    codes::PLACE_OBJECT,
    codes::REMOVE_OBJECT,
    codes::START_SOUND,
    codes::PLACE_OBJECT2,
    codes::REMOVE_OBJECT2,
    codes::PLACE_OBJECT3,
];

fn fixed() -> impl Strategy<Value = i32> {
    -(1i32 << 30)..(1i32 << 30)
}

fn matrix_strategy() -> impl Strategy<Value = Matrix> {
    (fixed(), fixed(), fixed(), fixed(), fixed(), fixed()).prop_map(
        |(scale_x, scale_y, rotate_skew0, rotate_skew1, translate_x, translate_y)| Matrix {
            scale_x,
            scale_y,
            rotate_skew0,
            rotate_skew1,
            translate_x,
            translate_y,
        },
    )
}

fn placement_strategy() -> impl Strategy<Value = Placement> {
    (
        any::<u16>(),
        prop::option::of(any::<u16>()),
        prop::option::of(matrix_strategy()),
        any::<u8>(),
        prop::collection::vec(any::<u8>(), 0..12),
    )
        .prop_map(|(depth, character_id, matrix, flags, tail)| Placement {
            kind: PlaceKind::PlaceObject2,
            depth: Depth::new(depth),
            character_id: character_id.map(CharacterId::new),
            matrix,
            flags: flags & !(place_flags::CHARACTER | place_flags::MATRIX),
            flags3: 0,
            class_name: None,
            tail,
        })
}

fn record_strategy() -> impl Strategy<Value = Record> {
    prop_oneof![
        Just(Record::ShowFrame),
        placement_strategy().prop_map(Record::Place),
        (any::<u16>(), any::<u16>()).prop_map(|(id, depth)| Record::RemoveObject {
            character_id: CharacterId::new(id),
            depth: Depth::new(depth),
        }),
        any::<u16>().prop_map(|depth| Record::RemoveObject2 {
            depth: Depth::new(depth)
        }),
        (any::<u16>(), prop::collection::vec(any::<u8>(), 0..8)).prop_map(|(id, info)| {
            Record::StartSound {
                sound_id: CharacterId::new(id),
                info,
            }
        }),
        (
            (1u16..=wire::MAX_CODE).prop_filter("typed code", |c| !TYPED_CODES.contains(c)),
            prop::collection::vec(any::<u8>(), 0..96),
            any::<bool>(),
        )
            .prop_map(|(code, body, long)| {
                let long_header = long || body.len() >= usize::from(wire::LONG_LENGTH_MARKER);
                Record::Other(RawRecord {
                    code,
                    body,
                    long_header,
                })
            }),
    ]
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-5000i32..5000, 0i32..5000, -5000i32..5000, 0i32..5000)
        .prop_map(|(x, w, y, h)| Rect::new(x, x + w, y, y + h))
}

proptest! {
    #[test]
    fn prop_sprite_roundtrip(
        id in any::<u16>(),
        frames in any::<u16>(),
        records in prop::collection::vec(record_strategy(), 0..24),
    ) {
        let sprite = DefineSprite::with_records(CharacterId::new(id), frames, records);
        let version = SwfVersion::default();
        let bytes = sprite.try_encode(version).unwrap();
        prop_assert_eq!(&bytes, &sprite.encode(version));
        let decoded = DefineSprite::decode(&bytes, version, &wire::Limits::unlimited()).unwrap();
        prop_assert_eq!(decoded, sprite);
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = DefineSprite::decode(&bytes, SwfVersion::default(), &wire::Limits::for_testing());
    }

    #[test]
    fn prop_placement_order_is_irrelevant(
        a in rect_strategy(),
        b in rect_strategy(),
        ta in (-1000i32..1000, -1000i32..1000),
        tb in (-1000i32..1000, -1000i32..1000),
    ) {
        let mut table = CharacterTable::new();
        table.insert(FixedBounds::new(CharacterId::new(1), a));
        table.insert(FixedBounds::new(CharacterId::new(2), b));

        let first = Placement::place(Depth::new(1), CharacterId::new(1), Some(Matrix::translate(ta.0, ta.1)));
        let second = Placement::place(Depth::new(2), CharacterId::new(2), Some(Matrix::translate(tb.0, tb.1)));

        let forward = DefineSprite::with_records(
            CharacterId::new(9), 1, vec![first.clone().into(), second.clone().into()]);
        let backward = DefineSprite::with_records(
            CharacterId::new(9), 1, vec![second.into(), first.into()]);

        let bounds = forward.bounds(&table);
        prop_assert_eq!(bounds, backward.bounds(&table));
        prop_assert_eq!(bounds.x_min, (a.x_min + ta.0).min(b.x_min + tb.0));
        prop_assert_eq!(bounds.y_max, (a.y_max + ta.1).max(b.y_max + tb.1));
    }
}
