// SPDX-License-Identifier: MIT

use serde::{Deserialize, Deserializer};

/// Volume size in bytes, written as `"512K"`, `"4M"`, `"1G"` or a plain byte count.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Size(pub u64);

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SizeVisitor;

        impl<'de> serde::de::Visitor<'de> for SizeVisitor {
            type Value = Size;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a size string like '512K', '4M', '1G' or a byte count")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Size(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(value)
                    .map(Size)
                    .map_err(|_| E::custom("size must not be negative"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                parse_size_bytes(value).map(Size).map_err(|_| {
                    E::custom(format!(
                        "Invalid size format '{value}'. Use K, M or G suffix."
                    ))
                })
            }
        }

        deserializer.deserialize_any(SizeVisitor)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::utils::pretty_bytes(self.0))
    }
}

pub fn parse_size_bytes(size: &str) -> anyhow::Result<u64> {
    let lower = size.trim().to_lowercase();

    let (num, shift) = if let Some(num) = lower.strip_suffix('k') {
        (num, 10)
    } else if let Some(num) = lower.strip_suffix('m') {
        (num, 20)
    } else if let Some(num) = lower.strip_suffix('g') {
        (num, 30)
    } else {
        (lower.as_str(), 0)
    };

    let value = num.trim().parse::<u64>()?;
    value
        .checked_mul(1u64 << shift)
        .ok_or_else(|| anyhow::anyhow!("Size '{size}' overflows"))
}
