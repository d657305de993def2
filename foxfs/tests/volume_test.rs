// SPDX-License-Identifier: MIT

use foxfs::codec::{self, SCHEMA_INODE};
use foxfs::prelude::*;
use foxio::prelude::*;

const SIZE_BYTES: u64 = 256 * 1024;
const BGD_OFFSET: u64 = 4096;
const INODE_TABLE: u64 = 3 * 4096;
const DIR_BLOCK: u64 = 8 * 4096;

fn scenario_widths() -> FieldWidths {
    FieldWidths::default()
        .with(FieldCategory::Block, WidthClass::U32)
        .with(FieldCategory::Uid, WidthClass::U16)
        .with(FieldCategory::Gid, WidthClass::U16)
        .with(FieldCategory::Inode, WidthClass::U32)
}

fn format_image(buf: &mut [u8], widths: FieldWidths) -> FoxMeta {
    let mut meta = FoxMeta::new(SIZE_BYTES);
    meta.widths = widths;
    let mut io = MemFoxIO::new(buf);
    let mut fmt = FoxFormatter::new(&mut io, &meta);
    fmt.format(true).expect("format failed");
    fmt.write_group_descriptor(BGD_OFFSET, 2, 3, 54, 120)
        .expect("bgd write failed");
    meta
}

#[test]
fn superblock_signature_and_version() {
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    format_image(&mut buf, scenario_widths());

    assert_eq!(&buf[..8], b"foxfs!!!");
    let mut io = MemFoxIO::new(&mut buf);
    let vol = FoxVolume::open_read_only(&mut io).expect("open failed");
    assert_eq!(vol.superblock().version(), (1, 0));
    assert_eq!(*vol.widths(), scenario_widths());
}

#[test]
fn altered_signature_aborts_mount() {
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    format_image(&mut buf, scenario_widths());
    buf[5] = b'?';

    let mut io = MemFoxIO::new(&mut buf);
    match FoxVolume::mount(&mut io) {
        Err(FoxMountError::SignatureMismatch { found }) => assert_eq!(&found, b"foxfs?!!"),
        other => panic!("unexpected mount result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn invalid_superblock_width_aborts_mount() {
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    format_image(&mut buf, scenario_widths());
    // date slot is the low nibble of the third packed byte
    buf[21 + 2] = (buf[21 + 2] & 0xF0) | 0x07;

    let mut io = MemFoxIO::new(&mut buf);
    let err = FoxVolume::mount(&mut io).err().expect("mount should fail");
    assert_eq!(
        err,
        FoxMountError::Codec(FoxCodecError::InvalidWidthClass {
            code: 7,
            category: Some(FieldCategory::Date)
        })
    );
}

#[test]
fn inode_roundtrip_through_volume() {
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    format_image(&mut buf, scenario_widths());
    let mut io = MemFoxIO::new(&mut buf);
    let mut vol = FoxVolume::mount(&mut io).expect("mount failed");

    let mut inode = FoxInode::new(FileType::Regular, 0o640);
    inode.uid = 1000;
    inode.gid = 100;
    inode.size = 13 * 4096;
    inode.blocks = 13;
    for (i, block) in (100..=112).enumerate() {
        inode.set_block_pointer(i, block);
    }
    inode.ads_dir = 113;

    let written = vol.write_inode(INODE_TABLE, &inode).expect("write failed");
    let expected = codec::size_of(SCHEMA_INODE, vol.widths()).expect("inode is sized");
    assert_eq!(written, expected);

    let back = vol.read_inode(INODE_TABLE).expect("read failed");
    assert_eq!(back, inode);
    assert_eq!(back.uid, 1000);
    assert_eq!(
        (0..13).filter_map(|i| back.block_pointer(i)).collect::<Vec<_>>(),
        (100..=112).collect::<Vec<u64>>()
    );
    vol.unmount().expect("unmount failed");
}

#[test]
fn readme_directory_entry() {
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    format_image(&mut buf, scenario_widths());
    let mut io = MemFoxIO::new(&mut buf);
    let mut vol = FoxVolume::mount(&mut io).expect("mount failed");

    let entries = [
        FoxDirEntry::new(b".", 2),
        FoxDirEntry::new(b"..", 2),
        FoxDirEntry::new(b"readme.txt", 42),
    ];
    vol.write_dir_entries(DIR_BLOCK, &entries)
        .expect("write failed");

    let listing = vol.read_dir_entries(DIR_BLOCK, 4096).expect("read failed");
    let readme = listing
        .iter()
        .map(|e| e.expect("entry decode failed"))
        .find(|e| e.name_str() == Some("readme.txt"))
        .expect("readme.txt not found");
    assert_eq!(readme.inode, 42);

    // 1 + 10 + 4 bytes after "." (6) and ".." (7)
    let raw = &listing.as_bytes()[13..28];
    assert_eq!(raw[0], 10);
    assert_eq!(&raw[1..11], b"readme.txt");
    assert_eq!(&raw[11..], &42u32.to_le_bytes());
}

#[test]
fn truncated_listing_keeps_earlier_entries() {
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    format_image(&mut buf, scenario_widths());
    let mut io = MemFoxIO::new(&mut buf);
    let mut vol = FoxVolume::mount(&mut io).expect("mount failed");

    let entries = [FoxDirEntry::new(b"a.txt", 11), FoxDirEntry::new(b"b.txt", 12)];
    let written = vol.write_dir_entries(DIR_BLOCK, &entries).expect("write failed");

    // cut the second entry inside its inode number
    let listing = vol
        .read_dir_entries(DIR_BLOCK, written - 1 - 2)
        .expect("read failed");
    let results: Vec<_> = listing.iter().collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Ok(FoxDirEntry::new(b"a.txt", 11)));
    assert!(matches!(
        results[1],
        Err(FoxCodecError::BufferTruncated { .. })
    ));
}

#[test]
fn drifted_group_descriptor_is_reported() {
    let mut buf = vec![0u8; SIZE_BYTES as usize];
    let meta = format_image(&mut buf, scenario_widths());
    let bgd_len = FoxBlockGroupDesc::fixed_size(&meta.widths).expect("bgd is sized");
    let copy_at = BGD_OFFSET as usize + bgd_len - PACKED_WIDTHS_SIZE;
    let drifted = meta.widths.with(FieldCategory::Date, WidthClass::U32);
    buf[copy_at..copy_at + PACKED_WIDTHS_SIZE].copy_from_slice(&drifted.pack());

    let mut io = MemFoxIO::new(&mut buf);
    let mut vol = FoxVolume::open_read_only(&mut io).expect("open failed");
    assert_eq!(
        vol.read_block_group(BGD_OFFSET),
        Err(FoxRecordError::ConfigurationDrift {
            expected: meta.widths.pack(),
            found: drifted.pack(),
        })
    );

    let report = FoxChecker::new(&mut vol).check_groups(&[BGD_OFFSET]);
    assert!(report.has_error());
    assert!(report.findings.iter().any(|f| f.code == "GRP_DRIFT"));
}

#[test]
fn mount_over_std_file() {
    let mut file = tempfile::tempfile().expect("tempfile failed");
    file.set_len(SIZE_BYTES).expect("set_len failed");
    let mut io = StdFoxIO::new(&mut file);

    let meta = FoxMeta::new(SIZE_BYTES);
    FoxFormatter::new(&mut io, &meta)
        .format(false)
        .expect("format failed");

    let vol = FoxVolume::mount(&mut io).expect("mount failed");
    assert_eq!(vol.superblock().mount_count.get(), 1);
    assert_eq!(*vol.widths(), FieldWidths::default());
    vol.unmount().expect("unmount failed");
}

#[test]
fn volume_inside_partition() {
    const PART: u64 = 2048;
    let mut buf = vec![0u8; (PART + SIZE_BYTES) as usize];
    let mut meta = FoxMeta::new(SIZE_BYTES);
    meta.widths = scenario_widths();
    {
        let mut io = MemFoxIO::new_with_offset(&mut buf, PART);
        let mut fmt = FoxFormatter::new(&mut io, &meta);
        fmt.format(false).expect("format failed");
        fmt.write_group_descriptor(BGD_OFFSET, 2, 3, 54, 120)
            .expect("bgd write failed");
    }
    assert!(buf[..PART as usize].iter().all(|&b| b == 0));
    assert_eq!(&buf[PART as usize..PART as usize + 8], b"foxfs!!!");

    let mut io = MemFoxIO::new_with_offset(&mut buf, PART);
    let mut vol = FoxVolume::mount(&mut io).expect("mount failed");
    assert_eq!(*vol.widths(), scenario_widths());
    assert_eq!(vol.read_block_group(BGD_OFFSET).expect("bgd read").free_blocks, 54);
    vol.unmount().expect("unmount failed");

    let mut io = MemFoxIO::new(&mut buf);
    assert!(FoxVolume::open_read_only(&mut io).is_err());
}
