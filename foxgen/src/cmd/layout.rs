// SPDX-License-Identifier: MIT

use colored::Colorize;
use foxfs::codec::{self, FieldWidths, RecordKind, schema_for};

/// Prints every record schema resolved against `widths`.
pub fn run(widths: &FieldWidths) -> anyhow::Result<()> {
    println!("  widths: {widths}");
    for kind in RecordKind::ALL {
        let schema = schema_for(kind);
        let size = match codec::size_of(schema, widths) {
            Ok(n) => format!("{n} bytes"),
            Err(_) => "unsized".to_string(),
        };
        println!("\n  {} ({size})", kind.name().bold());

        for (i, field) in codec::layout(schema, widths)?.iter().enumerate() {
            let offset = field
                .offset
                .map_or_else(|| "+".to_string(), |o| o.to_string());
            println!(
                "    #{i:<2} @{offset:>4}  {:>2} byte(s)  {}",
                field.width, field.descriptor
            );
        }
    }
    Ok(())
}
