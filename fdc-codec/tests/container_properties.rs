//! Container-level properties that hold across the codecs.

use chrono::{NaiveDate, NaiveDateTime};
use fdc_codec::{
    ContainerKind, DeviceClass, FixedClock, Record, RecordSet, decode_offline, decode_online,
    encode_offline, encode_online, merge,
};

fn dt(d: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, d)
        .unwrap()
        .and_hms_opt(12, 0, s)
        .unwrap()
}

fn clock(s: u32) -> FixedClock {
    FixedClock(dt(1, s))
}

/// Offline-shaped record on a marker both containers share.
fn offline_record(kind: u8, day: u8, second: u8) -> Record {
    Record::new(
        Some(dt(u32::from(day), u32::from(second))),
        vec![0x02, 0x07, kind, 24, 3, day, 12, 0, second, 0x10, 0x20],
    )
}

fn sample_dump(device: DeviceClass) -> Vec<u8> {
    let records: RecordSet = (1..=20)
        .map(|i| offline_record(if i % 2 == 0 { 0xE9 } else { 0xE7 }, i, i * 2))
        .collect();
    encode_offline(&records, device)
}

#[test]
fn test_offline_size_is_fixed() {
    for device in [DeviceClass::Gt, DeviceClass::Wbvf] {
        assert_eq!(encode_offline(&[], device).len(), device.container_size());

        let big: RecordSet = (0..60_000)
            .map(|i| offline_record(0xE9, 1 + (i % 28) as u8, (i % 60) as u8))
            .collect();
        assert_eq!(encode_offline(&big, device).len(), device.container_size());
    }
}

#[test]
fn test_offline_online_round_trip_keeps_count() {
    let dump = sample_dump(DeviceClass::Gt);
    let records = decode_offline(&dump);
    assert_eq!(records.len(), 20);

    let text = encode_online(&records, &clock(0));
    let decoded = decode_online(text.as_bytes()).unwrap();
    assert_eq!(decoded.kind, ContainerKind::Online);
    assert_eq!(decoded.records.len(), records.len());

    // Every record but the last one (which carries the zero tail) survives
    // byte for byte once the type byte is gone.
    for (before, after) in records.iter().zip(&decoded.records).take(19) {
        assert_eq!(before.timestamp, after.timestamp);
        assert_eq!(&before.payload[1..], &after.payload[..]);
    }
}

#[test]
fn test_reencode_is_stable_apart_from_file_timestamp() {
    let records = decode_offline(&sample_dump(DeviceClass::Wbvf));

    let first = encode_online(&records, &clock(1));
    let second = encode_online(&records, &clock(2));
    assert_ne!(first, second);
    // Six timestamp bytes are twelve hex digits.
    assert_eq!(first[12..], second[12..]);
    assert_eq!(first, encode_online(&records, &clock(1)));

    assert_eq!(
        encode_offline(&records, DeviceClass::Wbvf),
        encode_offline(&records, DeviceClass::Wbvf)
    );
}

#[test]
fn test_merge_length_identity() {
    let a: RecordSet = (1..=10)
        .map(|i| offline_record(0xE9, i, 0))
        .chain([Record::new(None, vec![0x07, 0xE9, 0, 0, 0, 0, 0, 0])])
        .collect();
    // Overlaps A on even days; odd days share a timestamp but not the payload.
    let b: RecordSet = (1..=10)
        .map(|i| {
            let mut r = offline_record(0xE9, i, 0);
            if i % 2 == 1 {
                r.payload.push(0xFF);
            }
            r
        })
        .chain([Record::new(None, vec![0x07, 0xE9, 0, 0, 0, 0, 0, 0])])
        .collect();

    let shared = b
        .iter()
        .filter(|r| r.timestamp.is_some() && a.contains(*r))
        .count();
    let outcome = merge(a.clone(), b.clone());

    assert_eq!(shared, 5);
    assert_eq!(outcome.duplicates, shared);
    assert_eq!(outcome.records.len(), a.len() + b.len() - shared);

    // Dated records come first in ascending order, undated ones trail.
    let dated: Vec<_> = outcome
        .records
        .iter()
        .take_while(|r| r.timestamp.is_some())
        .collect();
    assert_eq!(dated.len(), outcome.records.len() - 2);
    assert!(dated.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn test_no_markers_is_empty_not_error() {
    assert!(decode_offline(&[0u8; 9000]).is_empty());
    assert!(decode_offline(b"").is_empty());

    let decoded = decode_online(b"1A0107091225000A00112233").unwrap();
    assert!(decoded.records.is_empty());
}

#[test]
fn test_online_scenario() {
    let decoded = decode_online(b"00010203040500 0A07E900050A0C0A004142").unwrap();

    assert_eq!(decoded.records.len(), 1);
    let record = &decoded.records[0];
    assert_eq!(
        record.timestamp,
        Some(
            NaiveDate::from_ymd_opt(2000, 5, 10)
                .unwrap()
                .and_hms_opt(12, 10, 0)
                .unwrap()
        )
    );
    assert!(record.payload.ends_with(&[0x41, 0x42]));
}

#[test]
fn test_binary_online_input_falls_back_to_offline() {
    let dump = sample_dump(DeviceClass::Gt);
    let decoded = decode_online(&dump).unwrap();
    assert_eq!(decoded.kind, ContainerKind::Offline);
    assert_eq!(decoded.records, decode_offline(&dump));
}
