#![no_main]

use chunksum::process_chunks;
use chunksum::readers::parse_records;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode errors are fine; any record set that decodes must aggregate
    // to the same total regardless of worker count.
    if let Ok(records) = parse_records(data) {
        let single = process_chunks(&records, 1);
        let workers = (data.len() % 16) + 1;
        assert_eq!(single, process_chunks(&records, workers));
    }
});
