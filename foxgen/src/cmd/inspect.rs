// SPDX-License-Identifier: MIT

use std::fs::File;
use std::path::Path;

use colored::Colorize;
use foxfs::prelude::*;
use foxio::prelude::*;

use crate::utils;

/// Prints the superblock of the volume at `offset` in `image` and checks the
/// listed group descriptors. Group and directory offsets are volume-relative.
pub fn run(
    image: &Path,
    offset: u64,
    groups: &[u64],
    dir: Option<(u64, usize)>,
) -> anyhow::Result<()> {
    let mut file = File::open(image)?;
    let mut io = StdFoxIO::new_with_offset(&mut file, offset);
    let mut vol = FoxVolume::open_read_only(&mut io)?;

    print_superblock(vol.superblock());

    if let Some((offset, len)) = dir {
        println!("\n  Directory @{offset:#x}");
        let listing = vol.read_dir_entries(offset, len)?;
        for entry in &listing {
            match entry {
                Ok(e) => println!(
                    "    {:>10}  {}",
                    e.inode,
                    String::from_utf8_lossy(&e.name)
                ),
                Err(e) => println!("    {} {e}", "!".red()),
            }
        }
    }

    if groups.is_empty() {
        return Ok(());
    }

    let report = FoxChecker::new(&mut vol).check_groups(groups);
    println!();
    for f in &report.findings {
        let sev = match f.sev {
            Severity::Info => f.sev.to_string().green(),
            Severity::Warn => f.sev.to_string().yellow(),
            Severity::Error => f.sev.to_string().red().bold(),
        };
        println!("  [{sev}] {}: {}", f.code, f.msg);
    }

    if report.has_error() {
        anyhow::bail!(
            "{} error(s) found in {} group descriptor(s)",
            report.count(Severity::Error),
            groups.len()
        );
    }
    crate::log_info!("All group descriptors OK");
    Ok(())
}

fn print_superblock(sb: &FoxSuperblock) {
    let (major, minor) = sb.version();
    println!("\n  {}", "Superblock".bold());
    println!("  signature    {}", String::from_utf8_lossy(&sb.sig));
    println!("  version      {major}.{minor}");
    println!("  block size   {}", sb.block_size());
    println!("  os           {}", sb.os());
    println!(
        "  mounts       {}/{}",
        sb.mount_count.get(),
        sb.max_mounts.get()
    );
    println!("  state        {:?}", sb.state());
    println!("  widths raw   {}", utils::hex(&sb.widths));
    match sb.field_widths() {
        Ok(widths) => {
            for (cat, class) in widths.iter() {
                println!("    {:<8} {} byte(s)  {}", cat.name(), class.bytes(), cat.description());
            }
        }
        Err(e) => println!("  {} {e}", "invalid widths:".red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_image(path: &Path, partition_offset: usize) {
        let meta = FoxMeta::new(32 * 1024);
        let mut volume = vec![0u8; 32 * 1024];
        {
            let mut io = MemFoxIO::new(&mut volume);
            let mut fmt = FoxFormatter::new(&mut io, &meta);
            fmt.format(false).unwrap();
            fmt.write_group_descriptor(4096, 2, 3, 10, 10).unwrap();
        }
        let mut image = vec![0u8; partition_offset];
        image.extend_from_slice(&volume);
        std::fs::write(path, image).unwrap();
    }

    #[test]
    fn inspects_volume_at_partition_offset() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("disk.img");
        write_image(&img, 1024);

        run(&img, 1024, &[4096], None).unwrap();
        assert!(run(&img, 0, &[], None).is_err());
    }
}
