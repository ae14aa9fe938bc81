#![no_main]
use elf_util::analysis::{collect_load_ranges, compute_envelope, OverlapDetector, OverlapMode};
use elf_util::formats::elf::ElfParser;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(parser) = ElfParser::parse(data) else {
        return;
    };
    let path = Path::new("<fuzz>");
    if let Ok(walk) = parser.segments() {
        let _ = compute_envelope(walk, path, 1, 0x1000);
    }
    if let Ok(walk) = parser.segments() {
        let mut detector = OverlapDetector::new();
        if collect_load_ranges(walk, path, &mut detector).is_ok() {
            let _ = detector.clone().finish(OverlapMode::Adjacent);
            let _ = detector.finish(OverlapMode::Exhaustive);
        }
    }
});
