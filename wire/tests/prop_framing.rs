use proptest::prelude::*;
use wire::{read_records, write_end, write_record, DecodeError, Limits};

fn record_strategy() -> impl Strategy<Value = (u16, Vec<u8>, bool)> {
    (
        1u16..=wire::MAX_CODE,
        prop::collection::vec(any::<u8>(), 0..96),
        any::<bool>(),
    )
}

proptest! {
    #[test]
    fn prop_framing_roundtrip(records in prop::collection::vec(record_strategy(), 0..24)) {
        let mut buf = Vec::new();
        for (code, body, long) in &records {
            write_record(&mut buf, *code, body, *long).unwrap();
        }
        write_end(&mut buf);

        let stream = read_records(&buf, &Limits::unlimited()).unwrap();
        prop_assert_eq!(stream.consumed, buf.len());
        prop_assert_eq!(stream.records.len(), records.len());
        for (framed, (code, body, long)) in stream.records.iter().zip(&records) {
            prop_assert_eq!(framed.code, *code);
            prop_assert_eq!(framed.body, body.as_slice());
            prop_assert_eq!(framed.long_header, *long || body.len() >= 63);
        }
    }

    #[test]
    fn prop_cut_stream_never_terminates(records in prop::collection::vec(record_strategy(), 1..8), cut in 1usize..64) {
        let mut buf = Vec::new();
        for (code, body, long) in &records {
            write_record(&mut buf, *code, body, *long).unwrap();
        }
        write_end(&mut buf);
        let keep = buf.len().saturating_sub(cut.min(buf.len()));
        let result = read_records(&buf[..keep], &Limits::unlimited());
        let failed_as_expected = matches!(result, Err(DecodeError::UnterminatedStream { .. }));
        prop_assert!(failed_as_expected);
    }
}
