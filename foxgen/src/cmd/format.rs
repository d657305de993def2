// SPDX-License-Identifier: MIT

use std::fs::OpenOptions;
use std::path::Path;
use std::time::Instant;

use foxfs::prelude::*;
use foxio::prelude::*;

use crate::layout::VolumeLayout;
use crate::utils::{self, progress};

/// Writes a fresh foxfs volume to `output`.
pub fn run(layout: &VolumeLayout, output: &Path, full: bool, dry_run: bool) -> anyhow::Result<()> {
    let t0 = Instant::now();
    layout.validate()?;
    let meta = layout.meta()?;
    crate::log_info!("Volume layout\n{layout}");

    if dry_run {
        crate::log_info!("Dry run mode: no data will be written.");
        return Ok(());
    }

    crate::log_info!("Writing foxfs image to: {}", output.display());
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(output)?;
    file.set_len(meta.size_bytes)?;
    let mut io = StdFoxIO::new(&mut file);

    if full {
        progress::zero_with_progress(&mut io, meta.size_bytes, "zeroing")?;
    }

    let mut formatter = FoxFormatter::new(&mut io, &meta);
    formatter.format(false)?;
    for g in &layout.groups {
        let len = formatter.write_group_descriptor(
            g.offset,
            g.block_bitmap,
            g.inode_table,
            g.free_blocks,
            g.free_inodes,
        )?;
        crate::log_verbose!("Group descriptor @{:#x} ({len} bytes)", g.offset);
    }
    io.flush()?;

    crate::log_info!(
        "Formatted {} in {:.2?}",
        utils::pretty_bytes(meta.size_bytes),
        t0.elapsed()
    );
    Ok(())
}
