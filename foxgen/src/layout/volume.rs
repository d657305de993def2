// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use foxfs::codec::{FieldCategory, FieldWidths, WidthClass};
use foxfs::fs::constant::*;
use foxfs::fs::types::{FoxBlockGroupDesc, FoxRecord, OsId};
use foxfs::fs::FoxMeta;
use serde::Deserialize;

use crate::layout::size::Size;

fn default_block_size() -> u16 {
    FOXFS_DEFAULT_BLOCK_SIZE
}

fn default_max_mounts() -> u16 {
    FOXFS_DEFAULT_MAX_MOUNTS
}

fn default_os() -> String {
    "linux".into()
}

/// Block-group descriptor placed by `foxgen format`.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    pub offset: u64,
    pub block_bitmap: u64,
    pub inode_table: u64,
    #[serde(default)]
    pub free_blocks: u64,
    #[serde(default)]
    pub free_inodes: u64,
}

/// Host-side description of a volume, read from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeLayout {
    pub size: Size,
    #[serde(default = "default_block_size")]
    pub block_size: u16,
    #[serde(default = "default_os")]
    pub os: String,
    #[serde(default = "default_max_mounts")]
    pub max_mounts: u16,
    /// Category name to byte width
    #[serde(default)]
    pub widths: BTreeMap<String, usize>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

impl VolumeLayout {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolves the `[widths]` table over the default profile.
    pub fn field_widths(&self) -> anyhow::Result<FieldWidths> {
        let mut widths = FieldWidths::default();
        for (name, &bytes) in &self.widths {
            let Some(category) = FieldCategory::from_name(name) else {
                anyhow::bail!("Unknown field category '{name}'");
            };
            let Some(class) = WidthClass::from_bytes(bytes) else {
                anyhow::bail!(
                    "Width of '{name}' must be one of 1, 2, 3, 4, 6 or 8 bytes (got {bytes})"
                );
            };
            widths = widths.with(category, class);
        }
        Ok(widths)
    }

    pub fn os_id(&self) -> anyhow::Result<OsId> {
        OsId::from_name(&self.os.to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Unknown OS '{}'", self.os))
    }

    pub fn meta(&self) -> anyhow::Result<FoxMeta> {
        let meta = FoxMeta::new_custom(
            self.size.0,
            self.block_size,
            self.os_id()?,
            self.max_mounts,
            self.field_widths()?,
        );
        meta.validate()?;
        Ok(meta)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let meta = self.meta()?;
        let block_size = meta.block_size as u64;
        let desc_size = FoxBlockGroupDesc::fixed_size(&meta.widths)? as u64;
        for g in &self.groups {
            let fits = g
                .offset
                .checked_add(desc_size)
                .is_some_and(|end| end <= meta.size_bytes);
            if g.offset < block_size || !fits {
                anyhow::bail!(
                    "Group descriptor @{:#x} ({desc_size} bytes) outside the volume data area",
                    g.offset
                );
            }
            for (what, block) in [("block_bitmap", g.block_bitmap), ("inode_table", g.inode_table)] {
                if block == 0 || block >= meta.block_count() {
                    anyhow::bail!("Group @{:#x}: {what} {block} outside the volume", g.offset);
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for VolumeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  size        {}", self.size)?;
        writeln!(f, "  block size  {}", self.block_size)?;
        writeln!(f, "  os          {}", self.os)?;
        writeln!(f, "  max mounts  {}", self.max_mounts)?;
        match self.field_widths() {
            Ok(w) => writeln!(f, "  widths      {w}")?,
            Err(e) => writeln!(f, "  widths      invalid ({e})")?,
        }
        for g in &self.groups {
            writeln!(
                f,
                "  group @{:#x}  bitmap {} inode table {} free {}/{}",
                g.offset, g.block_bitmap, g.inode_table, g.free_blocks, g.free_inodes
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        size = "4M"
        block_size = 1024
        os = "bsd"

        [widths]
        block = 4
        uid = 2
        gid = 2

        [[groups]]
        offset = 1024
        block_bitmap = 2
        inode_table = 3
    "#;

    #[test]
    fn parse_sample() {
        let layout = VolumeLayout::from_toml(SAMPLE).unwrap();
        assert_eq!(layout.size, Size(4 * 1024 * 1024));
        assert_eq!(layout.max_mounts, FOXFS_DEFAULT_MAX_MOUNTS);
        assert_eq!(layout.os_id().unwrap(), OsId::Bsd);

        let widths = layout.field_widths().unwrap();
        assert_eq!(widths.category_width(FieldCategory::Uid), 2);
        assert_eq!(widths.category_width(FieldCategory::Date), 8);
        layout.validate().unwrap();
    }

    #[test]
    fn rejects_bad_width_and_category() {
        let mut layout = VolumeLayout::from_toml(SAMPLE).unwrap();
        layout.widths.insert("uid".into(), 5);
        assert!(layout.field_widths().is_err());

        layout.widths.remove("uid");
        layout.widths.insert("color".into(), 1);
        assert!(layout.field_widths().is_err());
    }

    #[test]
    fn rejects_group_in_first_block() {
        let mut layout = VolumeLayout::from_toml(SAMPLE).unwrap();
        layout.groups[0].offset = 0;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn rejects_group_ending_past_volume() {
        let mut layout = VolumeLayout::from_toml(SAMPLE).unwrap();
        layout.size = Size(8192);
        layout.groups[0].offset = 8190;
        assert!(layout.validate().is_err());

        let desc_size = FoxBlockGroupDesc::fixed_size(&layout.field_widths().unwrap()).unwrap();
        layout.groups[0].offset = 8192 - desc_size as u64;
        layout.validate().unwrap();
    }
}
