use bitstream::{sb_bits_needed, BitReader, BitWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bit(bool),
    Unsigned { bits: u8, value: u32 },
    Signed { bits: u8, value: i32 },
    Align,
    U8(u8),
    U16(u16),
    U32(u32),
}

fn mask_value(bits: u8, value: u32) -> u32 {
    if bits >= 32 {
        value
    } else {
        let mask = (1u32 << bits) - 1;
        value & mask
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bit),
        (1u8..=32, any::<u32>()).prop_map(|(bits, value)| Op::Unsigned {
            bits,
            value: mask_value(bits, value),
        }),
        any::<i32>()
            .prop_flat_map(|value| (Just(value), sb_bits_needed(value).max(1)..=32u8))
            .prop_map(|(value, bits)| Op::Signed { bits, value }),
        Just(Op::Align),
        any::<u8>().prop_map(Op::U8),
        any::<u16>().prop_map(Op::U16),
        any::<u32>().prop_map(Op::U32),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut writer = BitWriter::new();

        for op in &ops {
            match op {
                Op::Bit(b) => writer.write_bit(*b),
                Op::Unsigned { bits, value } => writer.write_ub(*value, *bits).unwrap(),
                Op::Signed { bits, value } => writer.write_sb(*value, *bits).unwrap(),
                Op::Align => writer.align_to_byte(),
                Op::U8(v) => {
                    writer.align_to_byte();
                    writer.write_u8(*v).unwrap();
                }
                Op::U16(v) => {
                    writer.align_to_byte();
                    writer.write_u16(*v).unwrap();
                }
                Op::U32(v) => {
                    writer.align_to_byte();
                    writer.write_u32(*v).unwrap();
                }
            }
        }

        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);

        for op in &ops {
            match op {
                Op::Bit(b) => {
                    prop_assert_eq!(reader.read_bit().unwrap(), *b);
                }
                Op::Unsigned { bits, value } => {
                    prop_assert_eq!(reader.read_ub(*bits).unwrap(), *value);
                }
                Op::Signed { bits, value } => {
                    prop_assert_eq!(reader.read_sb(*bits).unwrap(), *value);
                }
                Op::Align => {
                    reader.align_to_byte().unwrap();
                }
                Op::U8(v) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_u8().unwrap(), *v);
                }
                Op::U16(v) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_u16().unwrap(), *v);
                }
                Op::U32(v) => {
                    reader.align_to_byte().unwrap();
                    prop_assert_eq!(reader.read_u32().unwrap(), *v);
                }
            }
        }
    }

    #[test]
    fn prop_reader_never_panics(data in prop::collection::vec(any::<u8>(), 0..64), widths in prop::collection::vec(0u8..40, 0..32)) {
        let mut reader = BitReader::new(&data);
        for bits in widths {
            let _ = reader.read_sb(bits);
            let _ = reader.read_cstring();
            let _ = reader.align_to_byte();
        }
    }
}
