use crate::common::{check_overlap, flags, run, ElfBuilder, Inputs, Phdr};
use elf_util::analysis::OverlapMode;
use elf_util::config::RunConfig;
use std::path::Path;

fn single_load(start: u64, end: u64) -> Vec<u8> {
    ElfBuilder::elf64()
        .phdr(Phdr::load(start, end - start, flags::RX, 0x1000))
        .build()
}

fn line(first: &Path, a: (u64, u64), second: &Path, b: (u64, u64)) -> String {
    format!(
        "overlap {} {:#x}-{:#x} vs. {} {:#x}-{:#x}\n",
        first.display(),
        a.0,
        a.1,
        second.display(),
        b.0,
        b.1
    )
}

#[test]
fn disjoint_files_report_nothing() {
    let mut inputs = Inputs::new();
    inputs.add("a.elf", &single_load(0x1000, 0x2000));
    inputs.add("b.elf", &single_load(0x2000, 0x3000));

    let outcome = run(&check_overlap(), inputs.paths());
    assert!(outcome.summary.success());
    assert_eq!(outcome.summary.overlaps, 0);
    assert!(outcome.stdout.is_empty());
}

#[test]
fn overlapping_files_are_reported_in_start_order() {
    let mut inputs = Inputs::new();
    let b = inputs.add("b.elf", &single_load(0x1800, 0x2800));
    let a = inputs.add("a.elf", &single_load(0x1000, 0x2000));

    let outcome = run(&check_overlap(), inputs.paths());
    assert!(outcome.summary.success());
    assert_eq!(
        outcome.stdout,
        line(&a, (0x1000, 0x2000), &b, (0x1800, 0x2800))
    );
}

#[test]
fn only_load_segments_take_part() {
    let mut inputs = Inputs::new();
    inputs.add("a.elf", &single_load(0x1000, 0x2000));
    inputs.add(
        "b.elf",
        &ElfBuilder::elf64()
            .phdr(Phdr::note(0x1000, 0x1000))
            .phdr(Phdr::load(0x4000, 0x1000, flags::RW, 0x1000))
            .build(),
    );

    let outcome = run(&check_overlap(), inputs.paths());
    assert!(outcome.stdout.is_empty());
}

#[test]
fn segments_of_one_file_are_checked_against_each_other() {
    let mut inputs = Inputs::new();
    let path = inputs.add(
        "self.elf",
        &ElfBuilder::elf64()
            .phdr(Phdr::load(0x1000, 0x1000, flags::RX, 0x1000))
            .phdr(Phdr::load(0x1800, 0x1000, flags::RW, 0x1000))
            .build(),
    );

    let outcome = run(&check_overlap(), inputs.paths());
    assert_eq!(
        outcome.stdout,
        line(&path, (0x1000, 0x2000), &path, (0x1800, 0x2800))
    );
}

#[test]
fn nested_range_behind_a_neighbour() {
    let mut inputs = Inputs::new();
    let a = inputs.add("a.elf", &single_load(0x1000, 0x5000));
    let b = inputs.add("b.elf", &single_load(0x2000, 0x3000));
    let c = inputs.add("c.elf", &single_load(0x4000, 0x6000));

    let adjacent = run(&check_overlap(), inputs.paths());
    assert_eq!(adjacent.summary.overlaps, 1);
    assert_eq!(
        adjacent.stdout,
        line(&a, (0x1000, 0x5000), &b, (0x2000, 0x3000))
    );

    let config = RunConfig {
        overlap_mode: OverlapMode::Exhaustive,
        ..check_overlap()
    };
    let exhaustive = run(&config, inputs.paths());
    assert_eq!(exhaustive.summary.overlaps, 2);
    assert_eq!(
        exhaustive.stdout,
        format!(
            "{}{}",
            line(&a, (0x1000, 0x5000), &b, (0x2000, 0x3000)),
            line(&a, (0x1000, 0x5000), &c, (0x4000, 0x6000))
        )
    );
}

#[test]
fn failed_file_contributes_no_ranges() {
    let mut inputs = Inputs::new();
    inputs.add("a.elf", &single_load(0x1000, 0x2000));
    let broken = ElfBuilder::elf64()
        .phdr(Phdr::load(0x1800, 0x1000, flags::RX, 0x1000))
        .phdr(Phdr::load(0x9000, 0x1000, flags::RX, 0x1000))
        .truncate(64 + 56 + 20)
        .build();
    inputs.add("broken.elf", &broken);

    let outcome = run(&check_overlap(), inputs.paths());
    assert_eq!(outcome.summary.exit_code(), 1);
    assert_eq!(outcome.summary.overlaps, 0);
    assert!(outcome.stdout.is_empty());
    assert_eq!(outcome.stderr.lines().count(), 1);
}
