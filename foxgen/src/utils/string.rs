pub fn pretty_bytes(n: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut val = n as f64;
    let mut idx = 0usize;
    while val >= 1024.0 && idx + 1 < UNITS.len() {
        val /= 1024.0;
        idx += 1;
    }
    if idx == 0 {
        format!("{n} {}", UNITS[idx])
    } else {
        format!("{:.1} {}", val, UNITS[idx])
    }
}

/// Parses a byte offset, decimal or `0x`-prefixed hexadecimal.
pub fn parse_offset(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid offset '{s}': {e}"))
}

/// Space-separated hex dump.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("4096"), Ok(4096));
        assert_eq!(parse_offset("0x1000"), Ok(4096));
        assert!(parse_offset("0xZZ").is_err());
    }

    #[test]
    fn bytes() {
        assert_eq!(pretty_bytes(512), "512 B");
        assert_eq!(pretty_bytes(4 * 1024 * 1024), "4.0 MiB");
        assert_eq!(hex(&[0x0A, 0xFF]), "0A FF");
    }
}
