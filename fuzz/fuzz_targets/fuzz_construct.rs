#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use suffreq::query::naive::naive_frequencies;

#[derive(Arbitrary, Debug)]
struct Input {
    text: Vec<u8>,
    top_n: i8,
    min_length: u8,
}

fuzz_target!(|input: Input| {
    // Arbitrary bytes must either be rejected or build a consistent tree
    let Ok(tree) = suffreq::construct(&input.text) else {
        assert!(suffreq::tree::validate(&input.text).is_err());
        return;
    };
    assert_eq!(tree.leaf_count(), input.text.len() + 1);

    let min_length = i64::from(input.min_length);
    let Ok(report) = suffreq::query(&tree, i64::from(input.top_n), min_length) else {
        assert_eq!(min_length, 0);
        return;
    };

    let limit = if input.top_n <= 0 { 0 } else { input.top_n as usize };
    let naive = naive_frequencies(&input.text, limit, input.min_length as usize);
    assert_eq!(report.total, naive.total);
    assert_eq!(report.entries.len(), naive.entries.len());
    for pair in report.entries.windows(2) {
        assert!(pair[0].occurrences >= pair[1].occurrences);
    }
});
