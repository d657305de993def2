// SPDX-License-Identifier: MIT

use alloc::collections::BTreeMap;
use alloc::format;

use foxio::FoxIO;

use crate::core::{Finding, FoxCodecError, FoxRecordError, VerifyReport};
use crate::fs::types::FsState;
use crate::fs::volume::FoxVolume;

/// Consistency checks over an opened volume.
///
/// Group descriptors have no fixed location, so the caller lists them.
pub struct FoxChecker<'v, 'io, IO: FoxIO + ?Sized> {
    vol: &'v mut FoxVolume<'io, IO>,
}

impl<'v, 'io, IO: FoxIO + ?Sized> FoxChecker<'v, 'io, IO> {
    pub fn new(vol: &'v mut FoxVolume<'io, IO>) -> Self {
        Self { vol }
    }

    pub fn check_superblock(&self, report: &mut VerifyReport) {
        let sb = self.vol.superblock();
        let state = sb.state();
        if state.contains(FsState::ERRORS) {
            report.push(Finding::warn("SB_ERRORS", "volume marked with errors"));
        }
        if sb.needs_check() {
            report.push(Finding::warn(
                "SB_MOUNTS",
                format!(
                    "mount count {} reached max {}",
                    sb.mount_count.get(),
                    sb.max_mounts.get()
                ),
            ));
        }
        report.push(Finding::info(
            "SB_OK",
            format!("block_size={} widths [{}]", sb.block_size(), self.vol.widths()),
        ));
    }

    /// Decodes each descriptor, checks its width copy and sanity-checks its pointers.
    pub fn check_groups(&mut self, offsets: &[u64]) -> VerifyReport {
        let mut report = VerifyReport::default();
        self.check_superblock(&mut report);

        // block -> first group offset claiming it
        let mut claimed: BTreeMap<u64, u64> = BTreeMap::new();

        for &offset in offsets {
            let desc = match self.vol.read_block_group(offset) {
                Ok(desc) => desc,
                Err(FoxRecordError::ConfigurationDrift { expected, found }) => {
                    report.push(Finding::err(
                        "GRP_DRIFT",
                        format!("group @{offset:#x}: widths {found:02X?}, superblock {expected:02X?}"),
                    ));
                    continue;
                }
                Err(FoxRecordError::Codec(e @ FoxCodecError::InvalidWidthClass { .. })) => {
                    report.push(Finding::err("GRP_WIDTHS", format!("group @{offset:#x}: {e}")));
                    continue;
                }
                Err(e) => {
                    report.push(Finding::err("GRP_DECODE", format!("group @{offset:#x}: {e}")));
                    continue;
                }
            };

            if desc.block_bitmap == 0 || desc.inode_table == 0 {
                report.push(Finding::err(
                    "GRP_NULL_PTR",
                    format!("group @{offset:#x}: null bitmap or inode table pointer"),
                ));
                continue;
            }
            if desc.block_bitmap == desc.inode_table {
                report.push(Finding::err(
                    "GRP_OVERLAP",
                    format!(
                        "group @{offset:#x}: bitmap and inode table share block {}",
                        desc.block_bitmap
                    ),
                ));
                continue;
            }

            let mut shared = false;
            for block in [desc.block_bitmap, desc.inode_table] {
                let other = *claimed.entry(block).or_insert(offset);
                if other != offset {
                    shared = true;
                    report.push(Finding::warn(
                        "GRP_SHARED",
                        format!("block {block} used by groups @{other:#x} and @{offset:#x}"),
                    ));
                }
            }
            if !shared {
                report.push(Finding::info(
                    "GRP_OK",
                    format!(
                        "group @{offset:#x}: free blocks {} free inodes {}",
                        desc.free_blocks, desc.free_inodes
                    ),
                ));
            }
        }

        report
    }
}

#[cfg(all(test, feature = "mem"))]
mod tests {
    use super::*;
    use crate::codec::{FieldCategory, FieldWidths, WidthClass};
    use crate::core::Severity;
    use crate::fs::formatter::FoxFormatter;
    use crate::fs::meta::FoxMeta;
    use crate::fs::types::{FoxBlockGroupDesc, FoxRecord};
    use alloc::vec;
    use foxio::prelude::*;

    fn codes(report: &VerifyReport) -> alloc::vec::Vec<&'static str> {
        report.findings.iter().map(|f| f.code).collect()
    }

    #[test]
    fn reports_drift_and_null_pointers() {
        let meta = FoxMeta::new(32 * 1024);
        let mut buf = vec![0u8; 32 * 1024];
        let mut io = MemFoxIO::new(&mut buf);
        {
            let mut fmt = FoxFormatter::new(&mut io, &meta);
            fmt.format(false).unwrap();
            fmt.write_group_descriptor(4096, 2, 3, 100, 50).unwrap();
            fmt.write_group_descriptor(4160, 0, 3, 100, 50).unwrap();
        }

        let drifted = FieldWidths::default().with(FieldCategory::Uid, WidthClass::U16);
        let stale = FoxBlockGroupDesc::new(5, 6, 1, 1, &meta.widths);
        let mut bytes = stale.encode(&meta.widths).unwrap();
        let tail = bytes.len() - 6;
        bytes[tail..].copy_from_slice(&drifted.pack());
        io.write_at(4224, &bytes).unwrap();

        let mut vol = FoxVolume::open_read_only(&mut io).unwrap();
        let report = FoxChecker::new(&mut vol).check_groups(&[4096, 4160, 4224]);

        assert_eq!(codes(&report), ["SB_OK", "GRP_OK", "GRP_NULL_PTR", "GRP_DRIFT"]);
        assert!(report.has_error());
        assert_eq!(report.count(Severity::Error), 2);
    }

    #[test]
    fn shared_blocks_are_warned() {
        let meta = FoxMeta::new(32 * 1024);
        let mut buf = vec![0u8; 32 * 1024];
        let mut io = MemFoxIO::new(&mut buf);
        {
            let mut fmt = FoxFormatter::new(&mut io, &meta);
            fmt.format(false).unwrap();
            fmt.write_group_descriptor(4096, 2, 3, 0, 0).unwrap();
            fmt.write_group_descriptor(4160, 4, 3, 0, 0).unwrap();
        }

        let mut vol = FoxVolume::open_read_only(&mut io).unwrap();
        let report = FoxChecker::new(&mut vol).check_groups(&[4096, 4160]);
        assert_eq!(codes(&report), ["SB_OK", "GRP_OK", "GRP_SHARED"]);
        assert!(!report.has_error());
    }

    #[test]
    fn shared_block_names_the_first_claimant() {
        let meta = FoxMeta::new(32 * 1024);
        let mut buf = vec![0u8; 32 * 1024];
        let mut io = MemFoxIO::new(&mut buf);
        {
            let mut fmt = FoxFormatter::new(&mut io, &meta);
            fmt.format(false).unwrap();
            fmt.write_group_descriptor(4096, 2, 3, 0, 0).unwrap();
            fmt.write_group_descriptor(4160, 4, 3, 0, 0).unwrap();
            fmt.write_group_descriptor(4224, 5, 3, 0, 0).unwrap();
        }

        let mut vol = FoxVolume::open_read_only(&mut io).unwrap();
        let report = FoxChecker::new(&mut vol).check_groups(&[4096, 4160, 4224]);
        assert_eq!(codes(&report), ["SB_OK", "GRP_OK", "GRP_SHARED", "GRP_SHARED"]);

        let shared: alloc::vec::Vec<&str> = report
            .findings
            .iter()
            .filter(|f| f.code == "GRP_SHARED")
            .map(|f| f.msg.as_str())
            .collect();
        assert_eq!(
            shared,
            [
                "block 3 used by groups @0x1000 and @0x1040",
                "block 3 used by groups @0x1000 and @0x1080",
            ]
        );
    }
}
