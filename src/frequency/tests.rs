use super::FrequencyTable;

#[test]
fn test_counts_distinct_bytes() {
    let freq = FrequencyTable::from_bytes(&[0x41, 0x41, 0x41, 0x42]);

    assert_eq!(freq.len(), 2);
    assert_eq!(freq.get(0x41), Some(3));
    assert_eq!(freq.get(0x42), Some(1));
    assert_eq!(freq.total(), 4);
}

#[test]
fn test_absent_bytes_have_no_entry() {
    let freq = FrequencyTable::from_bytes(&[0, 0, 7]);

    assert_eq!(freq.get(1), None);
    assert_eq!(freq.get(0xFF), None);
    assert!(freq.iter().all(|(_, c)| c >= 1));
}

#[test]
fn test_empty_buffer() {
    let freq = FrequencyTable::from_bytes(&[]);

    assert!(freq.is_empty());
    assert_eq!(freq.total(), 0);
}

#[test]
fn test_iteration_is_ascending() {
    let freq = FrequencyTable::from_bytes(&[9, 3, 200, 3, 0]);
    let bytes: Vec<_> = freq.iter().map(|(b, _)| b).collect();

    assert_eq!(bytes, vec![0, 3, 9, 200]);
}

#[test]
fn test_from_counts_skips_zero() {
    let freq = FrequencyTable::from_counts(vec![(1, 0), (2, 5), (2, 1)]);

    assert_eq!(freq.len(), 1);
    assert_eq!(freq.get(2), Some(6));
}

#[test]
fn test_merge_of_partial_counts() {
    let data = [0x03, 0x74, 0x04, 0x04, 0x04, 0x35, 0x35, 0x64, 0x64, 0x64];
    let (head, tail) = data.split_at(4);

    let mut merged = FrequencyTable::from_bytes(head);
    merged.merge(&FrequencyTable::from_bytes(tail));

    assert_eq!(merged, FrequencyTable::from_bytes(&data));
}
