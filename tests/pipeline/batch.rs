//! Multi-file runs: ordering, failure isolation and flag combinations.

use crate::common::{flags, run, show_infos, ElfBuilder, Inputs, Phdr};
use elf_util::config::RunConfig;

fn firmware(start: u64) -> Vec<u8> {
    ElfBuilder::elf64()
        .phdr(Phdr::load(start, 0x800, flags::RX, 0x1000))
        .build()
}

#[test]
fn batch_continues_after_a_failing_file() {
    let mut inputs = Inputs::new();
    let first = inputs.add("first.elf", &firmware(0x1000));
    let missing = inputs.add_missing("missing.elf");
    let third = inputs.add("third.elf", &firmware(0x4000));

    let outcome = run(&show_infos(), inputs.paths());
    assert_eq!(outcome.summary.files, 3);
    assert_eq!(outcome.summary.envelopes, 2);
    assert_eq!(outcome.summary.failed, vec![missing.clone()]);
    assert_eq!(outcome.summary.exit_code(), 1);

    // Indices follow command-line positions, gaps included.
    assert!(outcome
        .stdout
        .contains(&format!("FILEPATH_1=\"{}\"\n", first.display())));
    assert!(!outcome.stdout.contains("FILEPATH_2="));
    assert!(outcome
        .stdout
        .contains(&format!("FILEPATH_3=\"{}\"\n", third.display())));
    assert!(outcome.stdout.contains("LOAD_ADDR_MIN_3=0x4000\n"));

    assert!(outcome.stderr.starts_with(&format!(
        "elf-util: Could not open '{}'",
        missing.display()
    )));
}

#[test]
fn envelopes_come_before_overlaps() {
    let mut inputs = Inputs::new();
    let a = inputs.add("a.elf", &firmware(0x1000));
    let b = inputs.add("b.elf", &firmware(0x1400));

    let config = RunConfig {
        show_infos: true,
        check_overlap: true,
        ..Default::default()
    };
    let outcome = run(&config, inputs.paths());
    assert!(outcome.summary.success());
    assert_eq!(outcome.summary.envelopes, 2);
    assert_eq!(outcome.summary.overlaps, 1);

    let lines: Vec<&str> = outcome.stdout.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], format!("FILEPATH_1=\"{}\"", a.display()));
    assert_eq!(lines[6], format!("FILEPATH_2=\"{}\"", b.display()));
    assert_eq!(
        lines[12],
        format!(
            "overlap {} 0x1000-0x1800 vs. {} 0x1400-0x1c00",
            a.display(),
            b.display()
        )
    );
}

#[test]
fn error_is_reported_once_with_both_analyses() {
    let mut inputs = Inputs::new();
    inputs.add(
        "short.elf",
        &ElfBuilder::elf64()
            .phdr(Phdr::load(0x1000, 0x800, flags::RX, 0x1000))
            .truncate(64 + 10)
            .build(),
    );

    let config = RunConfig {
        show_infos: true,
        check_overlap: true,
        ..Default::default()
    };
    let outcome = run(&config, inputs.paths());
    assert_eq!(outcome.summary.exit_code(), 1);
    assert_eq!(outcome.stderr.lines().count(), 1);
}

#[test]
fn no_analysis_still_validates_inputs() {
    let mut inputs = Inputs::new();
    inputs.add("good.elf", &firmware(0x1000));
    let bad = inputs.add("bad.bin", b"\x7fELX");

    let outcome = run(&RunConfig::default(), inputs.paths());
    assert!(outcome.stdout.is_empty());
    assert_eq!(outcome.summary.failed, vec![bad.clone()]);
    assert_eq!(
        outcome.stderr,
        format!("elf-util: '{}': not an ELF binary\n", bad.display())
    );
}
