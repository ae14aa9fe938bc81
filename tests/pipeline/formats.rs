//! Class, byte order and table layout handling.

use crate::common::{create_temp_file, flags, run, show_infos, ElfBuilder, Inputs, Phdr};
use elf_util::analysis::{compute_envelope, LoadEnvelope};
use elf_util::formats::elf::{ElfClass, ElfData, ElfError};
use elf_util::image::ElfImage;
use elf_util::io::IOLimits;
use elf_util::ElfUtilError;

fn sample(builder: ElfBuilder) -> ElfBuilder {
    builder
        .phdr(Phdr::load(0x8000_0000, 0x1_2345, flags::RX, 0x1000))
        .phdr(Phdr::load(0x8004_0000, 0x800, flags::RW, 0x1000))
        .phdr(Phdr::note(0x8005_0000, 0x40))
}

fn envelope_of(bytes: &[u8]) -> LoadEnvelope {
    let file = create_temp_file(bytes);
    let image = ElfImage::open(file.path(), &IOLimits::default()).unwrap();
    compute_envelope(image.segments().unwrap(), image.path(), 1, 0).unwrap()
}

fn without_path(mut env: LoadEnvelope) -> LoadEnvelope {
    env.path.clear();
    env
}

#[test]
fn all_layouts_agree() {
    let reference = without_path(envelope_of(&sample(ElfBuilder::elf64()).build()));
    assert_eq!(reference.load_min, 0x8000_0000);
    assert_eq!(reference.load_max, 0x8005_1000);

    for builder in [
        ElfBuilder::elf32(),
        ElfBuilder::elf32().big_endian(),
        ElfBuilder::elf64().big_endian(),
    ] {
        let env = without_path(envelope_of(&sample(builder).build()));
        assert_eq!(env, reference);
    }
}

#[test]
fn image_reports_class_and_byte_order() {
    let file = create_temp_file(&sample(ElfBuilder::elf32().big_endian()).build());
    let image = ElfImage::open(file.path(), &IOLimits::default()).unwrap();
    assert_eq!(image.class(), ElfClass::Elf32);
    assert_eq!(image.endianness(), ElfData::Big);
    assert_eq!(image.header().e_phnum, 3);
    assert_eq!(image.segments().unwrap().count(), 3);
}

#[test]
fn wider_entry_stride_is_followed() {
    let padded = sample(ElfBuilder::elf64()).phentsize(64).build();
    let plain = sample(ElfBuilder::elf64()).build();
    assert_eq!(
        without_path(envelope_of(&padded)),
        without_path(envelope_of(&plain))
    );
}

#[test]
fn narrow_entry_stride_is_malformed() {
    let file = create_temp_file(&sample(ElfBuilder::elf64()).phentsize(32).build());
    let image = ElfImage::open(file.path(), &IOLimits::default()).unwrap();
    let err = image.segments().unwrap_err();
    assert!(matches!(
        err,
        ElfUtilError::Format {
            source: ElfError::MalformedProgramHeaders(_),
            ..
        }
    ));
}

#[test]
fn truncated_table_is_a_format_error() {
    let bytes = sample(ElfBuilder::elf64()).truncate(64 + 56 * 2).build();
    let mut inputs = Inputs::new();
    let path = inputs.add("short.elf", &bytes);

    let outcome = run(&show_infos(), inputs.paths());
    assert_eq!(outcome.summary.exit_code(), 1);
    assert!(outcome.stdout.is_empty());
    assert!(outcome
        .stderr
        .starts_with(&format!("elf-util: '{}': truncated", path.display())));
}

#[test]
fn phnum_beyond_file_is_a_format_error() {
    let bytes = sample(ElfBuilder::elf32()).phnum(200).build();
    let file = create_temp_file(&bytes);
    let image = ElfImage::open(file.path(), &IOLimits::default()).unwrap();
    assert!(matches!(
        image.segments(),
        Err(ElfUtilError::Format {
            source: ElfError::Truncated { .. },
            ..
        })
    ));
}

#[test]
fn rejects_non_elf_inputs() {
    let mut inputs = Inputs::new();
    let empty = inputs.add("empty", b"");
    let text = inputs.add("notes.txt", b"#!/bin/sh\necho hello\n");
    let mut bad_class = sample(ElfBuilder::elf64()).build();
    bad_class[4] = 7;
    let class = inputs.add("class.elf", &bad_class);

    let outcome = run(&show_infos(), inputs.paths());
    assert_eq!(outcome.summary.failed.len(), 3);
    assert!(outcome.stdout.is_empty());

    let lines: Vec<&str> = outcome.stderr.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("elf-util: '{}': not an ELF binary", empty.display()),
            format!("elf-util: '{}': not an ELF binary", text.display()),
            format!("elf-util: '{}': invalid ELF class (7)", class.display()),
        ]
    );
}

#[test]
fn oversized_input_is_refused() {
    let mut inputs = Inputs::new();
    inputs.add("big.elf", &sample(ElfBuilder::elf64()).build());

    let mut config = show_infos();
    config.io = IOLimits { max_file_size: 64 };
    let outcome = run(&config, inputs.paths());
    assert_eq!(outcome.summary.exit_code(), 1);
    assert!(outcome.stderr.contains("exceeding the maximum allowed size"));
}
