#![no_main]

use codec::{CharacterTable, DefineSprite, FixedBounds, Rect, SwfVersion};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&version, body)) = data.split_first() else {
        return;
    };
    let version = SwfVersion::new(version);
    let Ok(sprite) = DefineSprite::decode(body, version, &wire::Limits::for_testing()) else {
        return;
    };

    // Anything that decodes must encode and decode back to itself.
    let bytes = sprite.encode(version);
    let again = DefineSprite::decode(&bytes, version, &wire::Limits::unlimited())
        .expect("re-encoded sprite must decode");
    assert_eq!(again, sprite);

    let mut table = CharacterTable::new();
    for id in sprite.needed_character_ids() {
        table.insert(FixedBounds::new(id, Rect::new(0, 20, 0, 20)));
    }
    let _ = sprite.bounds(&table);
});
